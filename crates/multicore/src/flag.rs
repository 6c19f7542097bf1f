//! 就绪握手字

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::{READY_FAULT, READY_MAGIC, READY_PENDING};
use crate::error::PeerSyncError;

/// 一次轮询观察到的对端状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerStatus {
    /// 尚未就绪
    Pending,
    /// 已就绪
    Ready,
}

/// 对端就绪信号
///
/// 非安全核通过它观察安全核是否完成了关键初始化。实现必须是无阻塞的单次读取。
pub trait PeerSignal: Send + Sync {
    /// 读取一次对端状态
    fn poll(&self) -> Result<PeerStatus, PeerSyncError>;
}

/// 共享内存中的就绪握手字
///
/// 安全核以 Release 写入 [`READY_MAGIC`]，非安全核以 Acquire 读取，
/// 因此非安全核看到就绪之后，安全核在此之前建立的共享内存内容对它可见。
#[repr(transparent)]
pub struct ReadyFlag {
    word: AtomicU32,
}

impl ReadyFlag {
    /// 创建处于未就绪状态的握手字
    pub const fn new() -> Self {
        Self {
            word: AtomicU32::new(READY_PENDING),
        }
    }

    /// 安全核：宣告就绪
    pub fn signal_ready(&self) {
        self.word.store(READY_MAGIC, Ordering::Release);
    }

    /// 安全核：宣告初始化失败，非安全核将停机而不是继续等待
    pub fn signal_fault(&self) {
        self.word.store(READY_FAULT, Ordering::Release);
    }

    /// 恢复为未就绪（仅用于复位路径）
    pub fn reset(&self) {
        self.word.store(READY_PENDING, Ordering::Release);
    }

    #[cfg(test)]
    pub(crate) fn store_raw(&self, word: u32) {
        self.word.store(word, Ordering::Release);
    }

    /// 读取原始值
    pub fn raw(&self) -> u32 {
        self.word.load(Ordering::Acquire)
    }
}

impl Default for ReadyFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerSignal for ReadyFlag {
    fn poll(&self) -> Result<PeerStatus, PeerSyncError> {
        match self.word.load(Ordering::Acquire) {
            READY_PENDING => Ok(PeerStatus::Pending),
            READY_MAGIC => Ok(PeerStatus::Ready),
            READY_FAULT => Err(PeerSyncError::PeerFault),
            other => Err(PeerSyncError::BadHandshake(other)),
        }
    }
}
