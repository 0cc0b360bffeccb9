//! Catalog registry / 编目注册表

use std::sync::Arc;
use tokio::sync::RwLock;

use super::CatalogSource;

/// Catalog manager (holds all registered sources) / 编目管理器
///
/// Registration order is preserved; query results concatenate in this order
/// 保留注册顺序；查询结果按此顺序连接
#[derive(Clone)]
pub struct CatalogManager {
    sources: Arc<RwLock<Vec<Arc<dyn CatalogSource>>>>,
}

impl CatalogManager {
    pub fn new() -> Self {
        Self {
            sources: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a catalog source / 注册编目源
    pub async fn register(&self, source: Arc<dyn CatalogSource>) {
        tracing::info!("Catalog registered: {}", source.name());
        let mut sources = self.sources.write().await;
        sources.push(source);
    }

    /// All sources in registration order / 按注册顺序的全部编目源
    pub async fn sources(&self) -> Vec<Arc<dyn CatalogSource>> {
        self.sources.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.sources.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sources.read().await.is_empty()
    }
}

impl Default for CatalogManager {
    fn default() -> Self {
        Self::new()
    }
}
