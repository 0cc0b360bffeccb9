//! JSON file catalog - lenient per-entry parsing / JSON 文件编目
//!
//! Dump format: a JSON array of records / 转储格式为记录的 JSON 数组
//! `[{"id": "...", "name": "...", "image": "icons/..."}]`
//!
//! Entries with missing fields or a non-string image are logged and
//! skipped; a bad entry never aborts the load
//! 字段缺失或 image 非字符串的条目记录日志并跳过，不中断加载

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use super::{CatalogRecord, CatalogSource, CatalogSummary};

/// Catalog source backed by a JSON dump file / 基于 JSON 转储文件的编目源
pub struct JsonCatalog {
    name: String,
    records: Vec<CatalogRecord>,
}

impl JsonCatalog {
    /// Load a catalog dump from a JSON file / 从 JSON 文件加载编目转储
    pub async fn load(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let name = name.into();
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {:?}", path))?;

        let entries = value.as_array().cloned().unwrap_or_default();
        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            match parse_entry(&entry) {
                Some(record) => records.push(record),
                None => tracing::error!("Invalid catalog entry in {} skipped: {}", name, entry),
            }
        }

        tracing::info!("Catalog {} loaded, {} records", name, records.len());
        Ok(Self { name, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Extract one record; id and name must be strings, image is kept only when
/// it is a string / 提取单条记录；id 和 name 必须是字符串
fn parse_entry(entry: &Value) -> Option<CatalogRecord> {
    let id = entry.get("id").and_then(|v| v.as_str())?;
    let name = entry.get("name").and_then(|v| v.as_str())?;

    let image = match entry.get("image") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return None,
    };

    Some(CatalogRecord {
        id: id.to_string(),
        name: name.to_string(),
        image,
    })
}

#[async_trait]
impl CatalogSource for JsonCatalog {
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
