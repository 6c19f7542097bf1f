//! 中断保护器
//!
//! 基于 RAII 屏蔽本核中断，在销毁时恢复原状态。
//!
//! 注意：屏蔽中断只能阻止**本核**上“线程 vs 中断”的并发，
//! 并不能阻止另一颗核的并行访问；跨核共享数据仍需要自旋锁。

use crate::arch_ops;

/// 中断保护器，创建时屏蔽中断，销毁时恢复。
///
/// # 示例
/// ```ignore
/// {
///     let guard = IntrGuard::new(); // 屏蔽中断
///     // 临界区代码
/// } // 离开作用域，自动恢复
/// ```
pub struct IntrGuard {
    flags: usize,
}

impl IntrGuard {
    /// 屏蔽中断并返回保护器。
    pub fn new() -> Self {
        // SAFETY: 保存的状态只会由对应的 Drop 恢复，保证成对出现。
        let flags = unsafe { arch_ops().read_and_disable_interrupts() };
        IntrGuard { flags }
    }

    /// 进入临界区前中断是否处于开启状态。
    pub fn was_enabled(&self) -> bool {
        arch_ops().flags_enabled(self.flags)
    }
}

impl Default for IntrGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IntrGuard {
    fn drop(&mut self) {
        // SAFETY: flags 是创建时保存的值
        unsafe { arch_ops().restore_interrupts(self.flags) };
    }
}
