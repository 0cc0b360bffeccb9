//! Keyword index - one-time icon library scan / 关键词索引 - 一次性图标库扫描
//!
//! Maps every icon path to the keywords of its filename. Built once by a
//! recursive concurrent scan, read-only afterwards. Subdirectories of one
//! level are scanned in parallel; each subtree returns its own fragment and
//! the parent merges fragments in listing order after all children complete.
//! 每个图标路径映射到其文件名关键词；一次构建，之后只读。
//! 同级子目录并行扫描，父级在全部子树完成后按列表顺序合并片段。

use futures::future::{join_all, BoxFuture};
use indexmap::IndexMap;
use std::collections::HashSet;

use super::tokenizer::filename_keywords;
use crate::browse::DirectoryBrowser;

/// Keyword map fragment for one subtree / 单个子树的关键词映射片段
pub type KeywordMap = IndexMap<String, Vec<String>>;

/// Immutable keyword index over the icon library / 图标库的不可变关键词索引
///
/// Entries iterate in discovery order, which makes equal-score ranking
/// deterministic / 条目按发现顺序迭代，同分排序因此确定
#[derive(Debug, Default)]
pub struct KeywordIndex {
    entries: KeywordMap,
}

impl KeywordIndex {
    /// Build an index from precomputed entries / 从预计算条目构建索引
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in discovery order / 按发现顺序迭代条目
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(path, keywords)| (path.as_str(), keywords.as_slice()))
    }

    /// Keywords of one indexed path / 单个索引路径的关键词
    pub fn keywords(&self, path: &str) -> Option<&[String]> {
        self.entries.get(path).map(|k| k.as_slice())
    }
}

/// Scan settings consumed by the index build / 索引构建使用的扫描设置
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directories skipped entirely, descendants included (exact path match)
    /// 完全跳过的目录，包含其子树（精确路径匹配）
    pub ignored_paths: HashSet<String>,
    /// Words dropped from filename keywords / 文件名关键词中丢弃的停用词
    pub stop_words: HashSet<String>,
}

/// Build the keyword index from a one-time directory scan / 通过一次目录扫描构建关键词索引
///
/// Files directly at the root level are excluded; only files in
/// subdirectories contribute keywords. A listing failure inside one subtree
/// is logged and degrades to an empty fragment; sibling subtrees are
/// unaffected and the partial index is still usable.
/// 根目录层的文件不参与；子树列表失败记录日志并降级为空片段，不影响兄弟子树。
pub async fn build_index(
    browser: &dyn DirectoryBrowser,
    root: &str,
    options: &ScanOptions,
) -> KeywordIndex {
    let entries = scan_directory(browser, options, root.to_string(), true).await;
    KeywordIndex { entries }
}

/// Scan one directory and everything below it / 扫描一个目录及其全部下层
fn scan_directory<'a>(
    browser: &'a dyn DirectoryBrowser,
    options: &'a ScanOptions,
    path: String,
    is_base_level: bool,
) -> BoxFuture<'a, KeywordMap> {
    Box::pin(async move {
        let mut fragment = KeywordMap::new();

        if options.ignored_paths.contains(&path) {
            return fragment;
        }

        let listing = match browser.browse(&path).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!("Failed to list directory {}: {}", path, e);
                return fragment;
            }
        };

        if !is_base_level {
            for file in &listing.files {
                fragment.insert(file.clone(), filename_keywords(file, &options.stop_words));
            }
        }

        // Fan out one scan per subdirectory, merge fragments in listing
        // order once all of them have joined / 每个子目录一个并发扫描，全部汇合后按列表顺序合并
        let subtrees = join_all(
            listing
                .dirs
                .into_iter()
                .map(|dir| scan_directory(browser, options, dir, false)),
        )
        .await;

        for subtree in subtrees {
            fragment.extend(subtree);
        }

        fragment
    })
}
