//! Catalog service boundary / 编目服务边界
//!
//! A catalog exposes a lightweight summary index and resolves full records
//! on demand; only records carrying an image path can become icon
//! candidates. Catalogs are searched independently of the filesystem index.
//! 编目暴露轻量摘要索引并按需解析完整记录；只有带图片路径的记录能成为候选。

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Summary entry of a catalog index / 编目索引的摘要条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub id: String,
    pub name: String,
}

/// Full catalog record / 完整编目记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    /// Icon image path, if the record has one / 记录的图标图片路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Catalog source interface (provides only primitive operations) / 编目源接口
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Catalog name / 编目名称
    fn name(&self) -> &str;

    /// Summary index of all records / 全部记录的摘要索引
    async fn index(&self) -> Result<Vec<CatalogSummary>>;

    /// Resolve a full record by identifier / 按标识符解析完整记录
    async fn record(&self, id: &str) -> Result<Option<CatalogRecord>>;
}

pub mod json_file;
pub mod manager;
pub mod memory;

pub use json_file::JsonCatalog;
pub use manager::CatalogManager;
pub use memory::StaticCatalog;
