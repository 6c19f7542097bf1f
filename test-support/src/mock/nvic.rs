//! NVIC 的 Mock 实现
//!
//! 注意：这里不直接依赖 `irq` crate（避免循环依赖）。
//! `irq` crate 在 `cfg(test)` 下为此类型实现 `NvicOps`。

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

/// Mock 支持的最大中断号
pub const MOCK_NVIC_LINES: usize = 65;

/// 复位后的优先级寄存器值
pub const RESET_PRIORITY: u8 = 0;

/// Mock 的中断控制器
///
/// 复位状态模拟安全固件启动早期：所有中断关闭，目标状态为非安全（ITNS 置位）。
pub struct MockNvic {
    enabled: [AtomicBool; MOCK_NVIC_LINES],
    non_secure: [AtomicBool; MOCK_NVIC_LINES],
    priority: [AtomicU8; MOCK_NVIC_LINES],
    /// 对 NVIC 的写操作计数
    pub writes: AtomicUsize,
}

impl MockNvic {
    pub const fn new() -> Self {
        Self {
            enabled: [const { AtomicBool::new(false) }; MOCK_NVIC_LINES],
            non_secure: [const { AtomicBool::new(true) }; MOCK_NVIC_LINES],
            priority: [const { AtomicU8::new(RESET_PRIORITY) }; MOCK_NVIC_LINES],
            writes: AtomicUsize::new(0),
        }
    }

    pub fn set_priority(&self, irqn: u32, priority: u8) {
        self.priority[irqn as usize].store(priority, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    pub fn priority(&self, irqn: u32) -> u8 {
        self.priority[irqn as usize].load(Ordering::SeqCst)
    }

    pub fn enable(&self, irqn: u32) {
        self.enabled[irqn as usize].store(true, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    pub fn disable(&self, irqn: u32) {
        self.enabled[irqn as usize].store(false, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_enabled(&self, irqn: u32) -> bool {
        self.enabled[irqn as usize].load(Ordering::SeqCst)
    }

    pub fn clear_target_state(&self, irqn: u32) {
        self.non_secure[irqn as usize].store(false, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    pub fn targets_non_secure(&self, irqn: u32) -> bool {
        self.non_secure[irqn as usize].load(Ordering::SeqCst)
    }

    /// 测试用：模拟非安全世界把某条线重新配置为开启
    pub fn force_enable(&self, irqn: u32) {
        self.enabled[irqn as usize].store(true, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}
