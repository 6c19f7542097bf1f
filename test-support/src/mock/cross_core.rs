//! 跨核通道的 Mock 实现
//!
//! 注意：这里不直接依赖 `multicore` crate（避免循环依赖）。
//! `multicore` crate 在 `cfg(test)` 下为这些类型实现 `PeerSignal` / `MailboxHal`。

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// 主核就绪信号的 Mock
///
/// 在被轮询 `ready_after` 次之后报告就绪；`ready_after == usize::MAX` 表示永不就绪。
pub struct MockPeer {
    ready_after: AtomicUsize,
    polls: AtomicUsize,
    fail: AtomicBool,
}

impl MockPeer {
    pub const fn new(ready_after: usize) -> Self {
        Self {
            ready_after: AtomicUsize::new(ready_after),
            polls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    /// 永不就绪的主核
    pub const fn silent() -> Self {
        Self::new(usize::MAX)
    }

    /// 握手字被破坏的主核
    pub const fn broken() -> Self {
        Self {
            ready_after: AtomicUsize::new(usize::MAX),
            polls: AtomicUsize::new(0),
            fail: AtomicBool::new(true),
        }
    }

    /// 记录一次轮询，返回 (是否就绪, 是否失败)
    pub fn poll(&self) -> (bool, bool) {
        let n = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail.load(Ordering::SeqCst) {
            return (false, true);
        }
        (n > self.ready_after.load(Ordering::SeqCst), false)
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

/// 邮箱 HAL 的 Mock
pub struct MockMailboxHal {
    pub fail_init: AtomicBool,
    pub init_calls: AtomicUsize,
    pub notifications: AtomicUsize,
}

impl MockMailboxHal {
    pub const fn new() -> Self {
        Self {
            fail_init: AtomicBool::new(false),
            init_calls: AtomicUsize::new(0),
            notifications: AtomicUsize::new(0),
        }
    }

    pub const fn failing() -> Self {
        Self {
            fail_init: AtomicBool::new(true),
            init_calls: AtomicUsize::new(0),
            notifications: AtomicUsize::new(0),
        }
    }

    /// 记录一次初始化，返回是否成功
    pub fn init(&self) -> bool {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        !self.fail_init.load(Ordering::SeqCst)
    }

    pub fn notify(&self) {
        self.notifications.fetch_add(1, Ordering::SeqCst);
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn notifications(&self) -> usize {
        self.notifications.load(Ordering::SeqCst)
    }
}
