//! 安全侧平台层
//!
//! - [`irq_init`] - 每个外设的中断初始化入口
//! - [`vectors`] - 向量表入口
//! - [`router`] - 分区路由器 [`SpmRouter`]
//! - `nvic` - Cortex-M33 NVIC 后端（仅 ARM 目标）

pub mod irq_init;
#[cfg(target_arch = "arm")]
pub mod nvic;
pub mod router;
pub mod vectors;

pub use irq_init::{
    RequiredIrq, bind_required, bind_required_in, init_from_manifest, init_line, init_line_in,
    init_peripheral, init_peripheral_in,
};
pub use router::{RouterError, SignalSet, SpmRouter};

use irq::IrqTable;

use crate::config::SECURE_CONFIG;

/// 全局中断注册表
pub static IRQ_TABLE: IrqTable = IrqTable::new(SECURE_CONFIG);

/// 全局分区路由器
#[cfg(target_arch = "arm")]
pub static ROUTER: SpmRouter = SpmRouter::new(irq::IntcAdapter::new(&nvic::NVIC));

/// 安全侧平台初始化：注册架构操作、NVIC 后端、路由器和日志
///
/// 之后分区加载流程才能调用 [`irq_init`] 中的入口。
///
/// # Safety
///
/// 必须在全局中断打开之前、单线程环境下调用，且只能调用一次
#[cfg(target_arch = "arm")]
pub unsafe fn platform_init() {
    // SAFETY: 由调用者保证
    unsafe {
        sync::register_arch_ops(&crate::arch::SECURE_CORE);
        irq::register_nvic_ops(&nvic::NVIC);
        irq::register_router(&ROUTER);
        crate::log::init(::log::LevelFilter::Info);
    }
}
