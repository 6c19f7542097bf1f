//! 跨核错误类型

use core::fmt;

/// 等待对端就绪时的错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerSyncError {
    /// 握手字既不是初始值也不是就绪魔数
    BadHandshake(u32),
    /// 对端在握手字中报告自身初始化失败
    PeerFault,
}

/// 邮箱队列错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxError {
    /// 队列尚未初始化
    NotInitialized,
    /// HAL 未能把队列发布给安全核
    HalInit,
    /// 没有空闲槽位
    NoFreeSlot,
    /// 槽位编号越界
    InvalidSlot,
    /// 槽位不处于该操作要求的状态
    BadSlotState,
}

/// 启动协议错误，全部是致命的
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// 跨核握手未完成
    PeerSyncFailure(PeerSyncError),
    /// 同步后邮箱队列初始化失败
    QueueInitFailure(MailboxError),
    /// 协议已经开始过，不允许重入
    Reentered,
    /// 尚未调用 `begin` 就开始轮询
    NotStarted,
}

impl From<PeerSyncError> for BootError {
    fn from(e: PeerSyncError) -> Self {
        BootError::PeerSyncFailure(e)
    }
}

impl From<MailboxError> for BootError {
    fn from(e: MailboxError) -> Self {
        BootError::QueueInitFailure(e)
    }
}

impl fmt::Display for PeerSyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerSyncError::BadHandshake(word) => write!(f, "bad handshake word {:#010x}", word),
            PeerSyncError::PeerFault => f.write_str("peer core reported a fault"),
        }
    }
}

impl fmt::Display for MailboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MailboxError::NotInitialized => "mailbox queue not initialized",
            MailboxError::HalInit => "mailbox HAL initialization failed",
            MailboxError::NoFreeSlot => "no free mailbox slot",
            MailboxError::InvalidSlot => "mailbox slot out of range",
            MailboxError::BadSlotState => "mailbox slot in wrong state",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::PeerSyncFailure(e) => write!(f, "error sync'ing with secure core: {}", e),
            BootError::QueueInitFailure(e) => {
                write!(f, "non-secure mailbox initialization failed: {}", e)
            }
            BootError::Reentered => f.write_str("boot protocol re-entered"),
            BootError::NotStarted => f.write_str("boot protocol not started"),
        }
    }
}
