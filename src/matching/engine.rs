//! Match engine - scoring and ranking primitives / 匹配引擎 - 评分与排序原语
//!
//! - score_paths: score every indexed icon path against the search terms
//! - score_catalog(s): score every record of each catalog, cap per catalog
//! - merge_candidates: combine, filter, rank and cap both candidate lists
//!
//! All scores are integral and accumulate additively; sorting is stable, so
//! equal scores keep discovery order and results are deterministic.
//! 分数为整数并累加；排序稳定，同分保持发现顺序，结果确定。

use std::collections::HashMap;
use std::sync::Arc;

use super::distance::{fuzzy_tolerance, levenshtein};
use super::index::KeywordIndex;
use crate::catalog::CatalogSource;
use crate::config::{CatalogScoring, PathScoring};

/// Icon candidate with its accumulated score / 带累计分数的图标候选
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub path: String,
    pub score: u32,
}

/// Score every indexed path against the search terms / 按搜索词为每个索引路径评分
///
/// Each (term, keyword) pair contributes at most one of DIRECT, PARTIAL or
/// FUZZY; contributions accumulate across pairs and no path is skipped.
/// 每个 (词, 关键词) 对最多贡献一项；逐对累加，不跳过任何路径。
pub fn score_paths(
    index: &KeywordIndex,
    terms: &[String],
    scoring: &PathScoring,
) -> Vec<ScoredCandidate> {
    let mut candidates = Vec::with_capacity(index.len());

    for (path, keywords) in index.iter() {
        let mut score = 0u32;

        for term in terms {
            let tolerance = fuzzy_tolerance(
                term.chars().count(),
                scoring.fuzzy_threshold,
                scoring.fuzzy_ratio,
            );

            for keyword in keywords {
                if term == keyword {
                    score += scoring.direct;
                } else if keyword.contains(term.as_str()) || term.contains(keyword.as_str()) {
                    score += scoring.partial;
                } else if levenshtein(term, keyword) <= tolerance {
                    score += scoring.fuzzy;
                }
            }
        }

        candidates.push(ScoredCandidate {
            path: path.to_string(),
            score,
        });
    }

    candidates
}

/// Score one catalog's records against the query name / 按查询名称为单个编目的记录评分
///
/// Records scoring below MIN are dropped, survivors are capped to `limit`
/// best-first, then resolved; records without an image are skipped. Any
/// failure degrades to fewer candidates.
/// 低于 MIN 的记录丢弃，幸存者按分数取前 `limit` 个再解析；无图片的记录跳过。
pub async fn score_catalog(
    source: &dyn CatalogSource,
    query_lower: &str,
    scoring: &CatalogScoring,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let summaries = match source.index().await {
        Ok(summaries) => summaries,
        Err(e) => {
            tracing::warn!("Catalog {} index failed, skipped: {}", source.name(), e);
            return Vec::new();
        }
    };

    let mut scored = Vec::new();
    for summary in summaries {
        let name_lower = summary.name.to_lowercase();

        let score = if name_lower == query_lower {
            scoring.exact
        } else if name_lower.contains(query_lower) || query_lower.contains(name_lower.as_str()) {
            scoring.partial
        } else {
            let distance = levenshtein(&name_lower, query_lower);
            scoring.base.saturating_sub(distance as u32)
        };

        if score >= scoring.min {
            scored.push((summary, score));
        }
    }

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(limit);

    let mut candidates = Vec::with_capacity(scored.len());
    for (summary, score) in scored {
        match source.record(&summary.id).await {
            Ok(Some(record)) => {
                if let Some(image) = record.image {
                    candidates.push(ScoredCandidate {
                        path: image,
                        score,
                    });
                }
            }
            Ok(None) => {
                tracing::warn!(
                    "Catalog {} record {} missing, skipped",
                    source.name(),
                    summary.id
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Catalog {} record {} lookup failed, skipped: {}",
                    source.name(),
                    summary.id,
                    e
                );
            }
        }
    }

    candidates
}

/// Score all registered catalogs / 为全部已注册编目评分
///
/// Each catalog contributes independently, no cross-catalog normalization;
/// per-catalog results concatenate in registration order.
/// 各编目独立贡献，无跨编目归一化；结果按注册顺序连接。
pub async fn score_catalogs(
    sources: &[Arc<dyn CatalogSource>],
    query: &str,
    scoring: &CatalogScoring,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let query_lower = query.to_lowercase();

    let mut candidates = Vec::new();
    for source in sources {
        candidates.extend(score_catalog(source.as_ref(), &query_lower, scoring, limit).await);
    }
    candidates
}

/// Merge catalog and path candidates into the final ranked path list
/// 将编目候选与路径候选合并为最终排序路径列表
///
/// A path surfacing from both sources collapses to its maximum score at its
/// earliest position. Entries below `min_score` are dropped, the rest sort
/// descending by score (stable on ties) and the list is capped at
/// `max_results`. 同一路径取最高分并保留最早位置。
pub fn merge_candidates(
    catalog_candidates: Vec<ScoredCandidate>,
    path_candidates: Vec<ScoredCandidate>,
    min_score: u32,
    max_results: usize,
) -> Vec<String> {
    let mut merged: Vec<ScoredCandidate> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for candidate in catalog_candidates.into_iter().chain(path_candidates) {
        match positions.get(&candidate.path) {
            Some(&pos) => {
                if candidate.score > merged[pos].score {
                    merged[pos].score = candidate.score;
                }
            }
            None => {
                positions.insert(candidate.path.clone(), merged.len());
                merged.push(candidate);
            }
        }
    }

    merged.retain(|c| c.score >= min_score);
    merged.sort_by(|a, b| b.score.cmp(&a.score));
    merged.truncate(max_results);

    merged.into_iter().map(|c| c.path).collect()
}
