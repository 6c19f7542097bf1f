//! Cortex-M33 架构操作
//!
//! 用 PRIMASK 实现 [`sync::ArchOps`] 的中断屏蔽。

use core::arch::asm;

use sync::ArchOps;

/// PRIMASK.PM
const PRIMASK_PM: usize = 0x1;

/// Cortex-M 的架构操作
pub struct CortexM {
    core_id: usize,
}

impl CortexM {
    /// 创建实例，`core_id` 为本镜像运行的核
    pub const fn new(core_id: usize) -> Self {
        Self { core_id }
    }
}

impl ArchOps for CortexM {
    unsafe fn read_and_disable_interrupts(&self) -> usize {
        let primask: usize;
        // SAFETY: 读 PRIMASK 后屏蔽中断，调用者负责恢复
        unsafe {
            asm!("mrs {}, PRIMASK", "cpsid i", out(reg) primask, options(nostack, preserves_flags));
        }
        primask
    }

    unsafe fn restore_interrupts(&self, flags: usize) {
        if flags & PRIMASK_PM == 0 {
            // SAFETY: 进入临界区前中断是开启的
            unsafe { asm!("cpsie i", options(nostack, preserves_flags)) };
        }
    }

    fn flags_enabled(&self, flags: usize) -> bool {
        flags & PRIMASK_PM == 0
    }

    fn core_id(&self) -> usize {
        self.core_id
    }

    fn core_count(&self) -> usize {
        if crate::config::MULTI_CORE_TOPOLOGY { 2 } else { 1 }
    }
}

/// 安全镜像所在的核
pub static SECURE_CORE: CortexM = CortexM::new(0);

/// 非安全镜像所在的核：双核拓扑下是 1 号核，否则与安全镜像共用 0 号核
pub static NON_SECURE_CORE: CortexM =
    CortexM::new(if crate::config::MULTI_CORE_TOPOLOGY { 1 } else { 0 });
