//! 架构相关操作的 Mock 实现

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// PRIMASK 置位表示中断被屏蔽
const PRIMASK_PM: usize = 0x1;

/// Mock 架构操作
pub struct MockArchOps {
    pub interrupts_enabled: AtomicBool,
    pub core_id: AtomicUsize,
    pub core_count: AtomicUsize,
}

impl MockArchOps {
    pub const fn new() -> Self {
        Self {
            interrupts_enabled: AtomicBool::new(true),
            core_id: AtomicUsize::new(0),
            core_count: AtomicUsize::new(2),
        }
    }

    /// 返回旧的 PRIMASK 值
    pub unsafe fn read_and_disable_interrupts(&self) -> usize {
        if self.interrupts_enabled.swap(false, Ordering::SeqCst) {
            0
        } else {
            PRIMASK_PM
        }
    }

    pub unsafe fn restore_interrupts(&self, flags: usize) {
        self.interrupts_enabled
            .store(flags & PRIMASK_PM == 0, Ordering::SeqCst);
    }

    pub fn flags_enabled(&self, flags: usize) -> bool {
        flags & PRIMASK_PM == 0
    }

    pub fn core_id(&self) -> usize {
        self.core_id.load(Ordering::Relaxed)
    }

    pub fn core_count(&self) -> usize {
        self.core_count.load(Ordering::Relaxed)
    }
}

/// 全局 Mock 实例
pub static MOCK_ARCH_OPS: MockArchOps = MockArchOps::new();
