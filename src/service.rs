//! Icon matching service / 图标匹配服务
//!
//! Owns the configuration, the catalog registry, the build lifecycle state
//! and the write-once keyword index. `preload_icons` runs the one-time
//! library scan and flips readiness; `find_matching_icons` is the single
//! query entry point. Callers must gate queries on `is_ready`; an unready
//! service answers with an empty candidate list instead of failing.
//! 持有配置、编目注册表、构建状态与一次写入的关键词索引。
//! 调用方应以 `is_ready` 作为查询前置条件；未就绪时返回空候选列表。

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::browse::DirectoryBrowser;
use crate::catalog::CatalogManager;
use crate::config::MatchConfig;
use crate::matching::{
    build_index, merge_candidates, score_catalogs, score_paths, tokenize, KeywordIndex,
    ScanOptions,
};
use crate::state::{IndexProgress, IndexState};

pub struct IconService {
    config: MatchConfig,
    catalogs: CatalogManager,
    state: Arc<IndexState>,
    // Write-once: set exactly when the build joins, read-only afterwards,
    // so concurrent queries need no locking
    index: OnceCell<KeywordIndex>,
}

impl IconService {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            catalogs: CatalogManager::new(),
            state: Arc::new(IndexState::new()),
            index: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Catalog registry / 编目注册表
    pub fn catalogs(&self) -> &CatalogManager {
        &self.catalogs
    }

    /// Whether the keyword index build has completed / 关键词索引是否构建完成
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Build progress snapshot / 构建进度快照
    pub fn progress(&self) -> IndexProgress {
        self.state.get_progress()
    }

    /// Scan the icon library and build the keyword index / 扫描图标库并构建关键词索引
    ///
    /// Runs once per service; a second call is rejected. Listing failures
    /// inside the scan degrade to a partial index and the service still
    /// becomes ready. 每个服务只运行一次；列表失败降级为部分索引，服务仍会就绪。
    pub async fn preload_icons(&self, browser: &dyn DirectoryBrowser) -> anyhow::Result<()> {
        if self.index.get().is_some() || self.state.is_running() {
            anyhow::bail!("Icon index build already started");
        }

        tracing::info!("Icon index build started, root: {}", self.config.scan.root);
        self.state.start();

        let options = ScanOptions {
            ignored_paths: self.config.scan.ignored_paths.clone(),
            stop_words: self.config.stop_words.clone(),
        };
        let index = build_index(browser, &self.config.scan.root, &options).await;
        let entry_count = index.len() as u64;

        if self.index.set(index).is_err() {
            anyhow::bail!("Icon index build already started");
        }
        self.state.finish(entry_count);

        tracing::info!("Icon index build completed, {} icons indexed", entry_count);
        Ok(())
    }

    /// Find the best matching icons for an item name / 查找物品名称的最佳匹配图标
    ///
    /// Returns up to `max_results` icon paths, best match first. Catalog and
    /// filesystem candidates are scored independently and merged; every
    /// failure along the way degrades to fewer results.
    /// 返回至多 `max_results` 个图标路径，最佳匹配在前。
    pub async fn find_matching_icons(&self, item_name: &str) -> Vec<String> {
        let Some(index) = self.index.get() else {
            tracing::warn!("Matching query before index build completed, no candidates");
            return Vec::new();
        };

        if item_name.trim().is_empty() {
            return Vec::new();
        }

        let terms = tokenize(item_name, &self.config.stop_words);
        tracing::debug!("Matching {:?} with search terms {:?}", item_name, terms);

        let sources = self.catalogs.sources().await;
        let catalog_candidates = score_catalogs(
            &sources,
            item_name,
            &self.config.catalog_scoring,
            self.config.catalog_limit,
        )
        .await;

        let path_candidates = score_paths(index, &terms, &self.config.scoring);

        merge_candidates(
            catalog_candidates,
            path_candidates,
            self.config.min_score,
            self.config.max_results,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::Listing;
    use crate::catalog::{CatalogRecord, StaticCatalog};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FakeBrowser {
        tree: HashMap<String, Listing>,
    }

    #[async_trait]
    impl DirectoryBrowser for FakeBrowser {
        async fn browse(&self, path: &str) -> Result<Listing> {
            self.tree
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow!("no such directory: {}", path))
        }
    }

    fn library() -> FakeBrowser {
        let mut tree = HashMap::new();
        tree.insert(
            "icons".to_string(),
            Listing {
                files: Vec::new(),
                dirs: vec!["icons/weapons".to_string()],
            },
        );
        tree.insert(
            "icons/weapons".to_string(),
            Listing {
                files: vec![
                    "icons/weapons/flaming-sword.webp".to_string(),
                    "icons/weapons/sword.webp".to_string(),
                ],
                dirs: Vec::new(),
            },
        );
        FakeBrowser { tree }
    }

    fn init_logs() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("smarticons=debug")
            .try_init();
    }

    #[tokio::test]
    async fn query_before_preload_returns_no_candidates() {
        init_logs();
        let service = IconService::new(MatchConfig::default());

        assert!(!service.is_ready());
        assert!(service.find_matching_icons("Flaming Sword").await.is_empty());
    }

    #[tokio::test]
    async fn preload_flips_readiness_and_ranks_path_candidates() {
        init_logs();
        let service = IconService::new(MatchConfig::default());

        service.preload_icons(&library()).await.unwrap();
        assert!(service.is_ready());
        assert_eq!(service.progress().entry_count, 2);

        let matches = service.find_matching_icons("Flaming Sword").await;
        assert_eq!(
            matches,
            vec![
                "icons/weapons/flaming-sword.webp",
                "icons/weapons/sword.webp"
            ]
        );
    }

    #[tokio::test]
    async fn second_preload_is_rejected() {
        let service = IconService::new(MatchConfig::default());

        service.preload_icons(&library()).await.unwrap();
        assert!(service.preload_icons(&library()).await.is_err());
    }

    #[tokio::test]
    async fn catalog_candidates_outrank_weaker_path_candidates() {
        init_logs();
        let service = IconService::new(MatchConfig::default());
        service.preload_icons(&library()).await.unwrap();

        service
            .catalogs()
            .register(Arc::new(StaticCatalog::new(
                "items",
                vec![CatalogRecord {
                    id: "1".to_string(),
                    name: "Sword".to_string(),
                    image: Some("icons/catalog/sword-of-legend.webp".to_string()),
                }],
            )))
            .await;

        // EXACT (30) beats the single DIRECT pair (25)
        let matches = service.find_matching_icons("Sword").await;
        assert_eq!(matches[0], "icons/catalog/sword-of-legend.webp");
        assert!(matches.contains(&"icons/weapons/sword.webp".to_string()));
    }

    #[tokio::test]
    async fn stop_word_only_query_matches_nothing_from_paths() {
        init_logs();
        let service = IconService::new(MatchConfig::default());
        service.preload_icons(&library()).await.unwrap();

        assert!(service.find_matching_icons("the of a").await.is_empty());
    }

    #[tokio::test]
    async fn broken_subtree_still_yields_a_ready_service() {
        init_logs();
        let mut browser = library();
        browser.tree.get_mut("icons").unwrap().dirs.push("icons/broken".to_string());

        let service = IconService::new(MatchConfig::default());
        service.preload_icons(&browser).await.unwrap();

        assert!(service.is_ready());
        assert_eq!(service.progress().entry_count, 2);
    }

    #[tokio::test]
    async fn identical_queries_return_identical_orderings() {
        let service = IconService::new(MatchConfig::default());
        service.preload_icons(&library()).await.unwrap();

        let first = service.find_matching_icons("sword").await;
        let second = service.find_matching_icons("sword").await;
        assert_eq!(first, second);
    }
}
