//! Cortex-M33 NVIC 后端
//!
//! 直接访问 System Control Space 中的 NVIC 寄存器（ARMv8-M，带 TrustZone 的 ITNS）。

use core::arch::asm;

use irq::{NVIC_PRIO_BITS, NvicOps};
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::register_structs;
use tock_registers::registers::ReadWrite;

/// 安全世界看到的 NVIC 基址
pub const NVIC_BASE: usize = 0xE000_E100;

register_structs! {
    #[allow(non_snake_case)]
    NvicRegisters {
        (0x000 => ISER: [ReadWrite<u32>; 16]),
        (0x040 => _reserved0),
        (0x080 => ICER: [ReadWrite<u32>; 16]),
        (0x0C0 => _reserved1),
        (0x100 => ISPR: [ReadWrite<u32>; 16]),
        (0x140 => _reserved2),
        (0x180 => ICPR: [ReadWrite<u32>; 16]),
        (0x1C0 => _reserved3),
        (0x200 => IABR: [ReadWrite<u32>; 16]),
        (0x240 => _reserved4),
        (0x280 => ITNS: [ReadWrite<u32>; 16]),
        (0x2C0 => _reserved5),
        (0x300 => IPR: [ReadWrite<u8>; 496]),
        (0x4F0 => @END),
    }
}

/// NVIC 驱动
pub struct CortexMNvic {
    base: usize,
}

impl CortexMNvic {
    /// 创建实例
    ///
    /// # Safety
    ///
    /// `base` 必须是 NVIC 寄存器块的地址，且整个程序只有这一个实例写它
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    fn regs(&self) -> &NvicRegisters {
        // SAFETY: new 的调用者保证 base 指向 NVIC 寄存器块
        unsafe { &*(self.base as *const NvicRegisters) }
    }
}

#[inline(always)]
fn word_bit(irqn: u32) -> (usize, u32) {
    ((irqn / 32) as usize, 1 << (irqn % 32))
}

#[inline(always)]
fn barrier() {
    // SAFETY: 只是内存屏障
    unsafe { asm!("dsb", "isb", options(nostack, preserves_flags)) };
}

impl NvicOps for CortexMNvic {
    fn set_priority(&self, irqn: u32, priority: u8) {
        self.regs().IPR[irqn as usize].set(priority << (8 - NVIC_PRIO_BITS));
    }

    fn priority(&self, irqn: u32) -> u8 {
        self.regs().IPR[irqn as usize].get() >> (8 - NVIC_PRIO_BITS)
    }

    fn enable(&self, irqn: u32) {
        let (word, bit) = word_bit(irqn);
        self.regs().ISER[word].set(bit);
    }

    fn disable(&self, irqn: u32) {
        let (word, bit) = word_bit(irqn);
        self.regs().ICER[word].set(bit);
        barrier();
    }

    fn is_enabled(&self, irqn: u32) -> bool {
        let (word, bit) = word_bit(irqn);
        self.regs().ISER[word].get() & bit != 0
    }

    fn clear_target_state(&self, irqn: u32) {
        let (word, bit) = word_bit(irqn);
        let itns = &self.regs().ITNS[word];
        itns.set(itns.get() & !bit);
    }

    fn targets_non_secure(&self, irqn: u32) -> bool {
        let (word, bit) = word_bit(irqn);
        self.regs().ITNS[word].get() & bit != 0
    }
}

/// 全局 NVIC 实例
// SAFETY: NVIC_BASE 是架构规定的地址
pub static NVIC: CortexMNvic = unsafe { CortexMNvic::new(NVIC_BASE) };
