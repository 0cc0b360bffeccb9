//! Directory listing service boundary / 目录列表服务边界
//!
//! The index builder consumes one primitive: list the immediate files and
//! subdirectories of a single directory. Hosts plug in their own browser;
//! `LocalBrowser` covers libraries on a local filesystem.
//! 索引构建只消费一个原语：列出单个目录的直接文件和子目录。

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// One level of a directory listing / 目录的一层列表
///
/// Both lists carry full library paths, not bare names / 两个列表都携带完整库路径
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
}

/// Directory listing service (provides only primitive operations) / 目录列表服务
#[async_trait]
pub trait DirectoryBrowser: Send + Sync {
    /// List the immediate files and subdirectories of one directory
    /// 列出单个目录的直接文件和子目录
    async fn browse(&self, path: &str) -> Result<Listing>;
}

/// Local filesystem browser / 本地文件系统浏览器
///
/// Library paths are resolved under a fixed root / 库路径在固定根目录下解析
pub struct LocalBrowser {
    root: PathBuf,
}

impl LocalBrowser {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a library path under the root / 在根目录下解析库路径
    ///
    /// Parent components are dropped, so a listing can never escape the root
    /// 丢弃上级路径组件，列表不会越出根目录
    fn resolve(&self, path: &str) -> PathBuf {
        let path = path.trim_start_matches('/').replace('\\', "/");

        let mut normalized = PathBuf::new();
        for component in Path::new(&path).components() {
            match component {
                Component::ParentDir => {
                    normalized.pop();
                }
                Component::Normal(name) => normalized.push(name),
                _ => {}
            }
        }

        self.root.join(normalized)
    }
}

#[async_trait]
impl DirectoryBrowser for LocalBrowser {
    async fn browse(&self, path: &str) -> Result<Listing> {
        let full_path = self.resolve(path);
        let mut entries = fs::read_dir(&full_path).await?;

        let mut listing = Listing::default();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            let child = if path.is_empty() {
                name
            } else {
                format!("{}/{}", path.trim_end_matches('/'), name)
            };

            if entry.file_type().await?.is_dir() {
                listing.dirs.push(child);
            } else {
                listing.files.push(child);
            }
        }

        // Listing order must not depend on filesystem readdir order / 列表顺序不依赖文件系统
        listing.files.sort();
        listing.dirs.sort();

        Ok(listing)
    }
}
