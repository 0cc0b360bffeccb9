//! Matching configuration module / 匹配配置模块
//!
//! Scoring constants, stop words and scan settings loaded from a JSON file
//! Creates default config file on first run / 首次运行时创建默认配置文件
//!
//! The loaded value is returned for explicit injection; there is no global
//! configuration state / 加载结果显式注入，不使用全局配置状态

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::matching::tokenizer::default_stop_words;

/// Matching configuration / 匹配配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Icon library scan settings / 图标库扫描设置
    pub scan: ScanConfig,
    /// Words dropped during tokenization / 分词时丢弃的停用词
    pub stop_words: HashSet<String>,
    /// Scoring constants for icon path matches / 图标路径匹配的评分常量
    pub scoring: PathScoring,
    /// Scoring constants for catalog matches / 编目匹配的评分常量
    pub catalog_scoring: CatalogScoring,
    /// Minimum score for a merged candidate to survive / 合并候选保留的最低分数
    pub min_score: u32,
    /// Maximum number of returned candidates / 返回候选的上限
    pub max_results: usize,
    /// Maximum entries a single catalog may contribute / 单个编目可贡献的条目上限
    pub catalog_limit: usize,
}

/// Icon library scan settings / 图标库扫描设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Root directory of the icon library / 图标库根目录
    pub root: String,
    /// Directories skipped entirely, descendants included (exact path match)
    /// 完全跳过的目录，包含其子树（精确路径匹配）
    pub ignored_paths: HashSet<String>,
}

/// Scoring constants for icon path matches / 图标路径匹配的评分常量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathScoring {
    /// Exact word match / 完全词匹配
    pub direct: u32,
    /// Substring match / 子串匹配
    pub partial: u32,
    /// Fuzzy match via edit distance / 编辑距离模糊匹配
    pub fuzzy: u32,
    /// Minimum tolerated edit distance / 最低容许编辑距离
    pub fuzzy_threshold: usize,
    /// Tolerance growth per term character / 每字符的容差增长
    pub fuzzy_ratio: f32,
}

/// Scoring constants for catalog matches / 编目匹配的评分常量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogScoring {
    /// Exact name match / 完全名称匹配
    pub exact: u32,
    /// Partial name match / 部分名称匹配
    pub partial: u32,
    /// Base fuzzy score before distance adjustment / 距离调整前的模糊基准分
    pub base: u32,
    /// Minimum score for an entry to be considered / 条目保留的最低分数
    pub min: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            stop_words: default_stop_words(),
            scoring: PathScoring::default(),
            catalog_scoring: CatalogScoring::default(),
            min_score: 15,
            max_results: 30,
            catalog_limit: 3,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: "icons".to_string(),
            ignored_paths: ["icons/svg", "icons/dice", "icons/pings"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Default for PathScoring {
    fn default() -> Self {
        Self {
            direct: 25,
            partial: 15,
            fuzzy: 5,
            fuzzy_threshold: 2,
            fuzzy_ratio: 0.3,
        }
    }
}

impl Default for CatalogScoring {
    fn default() -> Self {
        Self {
            exact: 30,
            partial: 20,
            base: 20,
            min: 15,
        }
    }
}

/// Load configuration from file, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config(path: impl AsRef<Path>) -> Result<MatchConfig, String> {
    let path = path.as_ref();

    if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: MatchConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        tracing::info!("Loaded matching configuration from {:?}", path);
        Ok(config)
    } else {
        let config = MatchConfig::default();
        save_config(&config, path)?;
        tracing::info!("Created default matching configuration at {:?}", path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config(config: &MatchConfig, path: impl AsRef<Path>) -> Result<(), String> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(path.as_ref(), content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_carries_original_scoring_constants() {
        let config = MatchConfig::default();
        assert_eq!(config.scoring.direct, 25);
        assert_eq!(config.scoring.partial, 15);
        assert_eq!(config.scoring.fuzzy, 5);
        assert_eq!(config.scoring.fuzzy_threshold, 2);
        assert!((config.scoring.fuzzy_ratio - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.catalog_scoring.exact, 30);
        assert_eq!(config.catalog_scoring.partial, 20);
        assert_eq!(config.catalog_scoring.base, 20);
        assert_eq!(config.catalog_scoring.min, 15);
        assert_eq!(config.min_score, 15);
        assert_eq!(config.max_results, 30);
        assert_eq!(config.catalog_limit, 3);
        assert!(config.stop_words.contains("the"));
        assert!(config.scan.ignored_paths.contains("icons/svg"));
    }

    #[test]
    fn load_config_creates_default_on_first_run_then_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");

        let created = load_config(&path).unwrap();
        assert!(path.exists());

        let reloaded = load_config(&path).unwrap();
        assert_eq!(created.scoring.direct, reloaded.scoring.direct);
        assert_eq!(created.stop_words, reloaded.stop_words);
        assert_eq!(created.scan.root, reloaded.scan.root);
    }

    #[test]
    fn load_config_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load_config(&path).is_err());
    }
}
