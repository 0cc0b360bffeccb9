//! In-memory catalog / 内存编目

use anyhow::Result;
use async_trait::async_trait;

use super::{CatalogRecord, CatalogSource, CatalogSummary};

/// Static in-memory catalog source / 静态内存编目源
///
/// For hosts that already hold their records, and for tests
/// 适用于已持有记录的宿主以及测试
pub struct StaticCatalog {
    name: String,
    records: Vec<CatalogRecord>,
}

impl StaticCatalog {
    pub fn new(name: impl Into<String>, records: Vec<CatalogRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    async fn index(&self) -> Result<Vec<CatalogSummary>> {
        Ok(self
            .records
            .iter()
            .map(|r| CatalogSummary {
                id: r.id.clone(),
                name: r.name.clone(),
            })
            .collect())
    }

    async fn record(&self, id: &str) -> Result<Option<CatalogRecord>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }
}
