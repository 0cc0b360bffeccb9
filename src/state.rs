//! Index build lifecycle state / 索引构建生命周期状态
//!
//! Readiness is a single flag flipped once, after the whole scan has joined;
//! no partial index is ever visible to queries / 就绪是扫描完全汇合后翻转一次的单一标志

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Index building progress snapshot / 索引构建进度快照
#[derive(Debug, Clone, Default)]
pub struct IndexProgress {
    pub is_running: bool,
    pub is_ready: bool,
    /// Indexed icon count / 已索引图标数
    pub entry_count: u64,
    /// Completion time (Unix timestamp) / 完成时间
    pub last_done_time: Option<i64>,
}

/// Index build state / 索引构建状态
pub struct IndexState {
    running: AtomicBool,
    ready: AtomicBool,
    progress: RwLock<IndexProgress>,
}

impl IndexState {
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            ready: AtomicBool::new(false),
            progress: RwLock::new(IndexProgress::default()),
        }
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
        let mut progress = self.progress.write();
        progress.is_running = true;
        progress.is_ready = false;
        progress.entry_count = 0;
    }

    /// Mark the build complete and flip readiness / 标记构建完成并翻转就绪标志
    ///
    /// A partial index still counts as a completed build; degraded subtrees
    /// only reduce the entry count / 部分索引也算构建完成
    pub fn finish(&self, entry_count: u64) {
        self.running.store(false, Ordering::SeqCst);
        self.ready.store(true, Ordering::SeqCst);
        let mut progress = self.progress.write();
        progress.is_running = false;
        progress.is_ready = true;
        progress.entry_count = entry_count;
        progress.last_done_time = Some(Utc::now().timestamp());
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub fn get_progress(&self) -> IndexProgress {
        self.progress.read().clone()
    }
}

impl Default for IndexState {
    fn default() -> Self {
        Self::new()
    }
}
