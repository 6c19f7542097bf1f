//! 非安全侧启动
//!
//! - [`stdio`] - 标准输出串口
//! - [`rtos`] - RTOS 与 NS 接口协作者
//! - [`boot`] - 非安全 `main`

pub mod boot;
pub mod rtos;
pub mod stdio;

pub use boot::{MultiCoreLinks, NsConfig, NsPlatform, ns_main, ns_start};
pub use rtos::{NsInterface, Rtos, RtosError, ThreadAttr, ThreadFunc, ThreadId};
pub use stdio::{DriverError, Stdout, Usart, UsartMode, stdio_init};

/// 非安全侧平台初始化：注册架构操作和日志
///
/// # Safety
///
/// 必须在 [`ns_main`] 之前、单线程环境下调用，且只能调用一次
#[cfg(target_arch = "arm")]
pub unsafe fn platform_init() {
    // SAFETY: 由调用者保证
    unsafe {
        sync::register_arch_ops(&crate::arch::NON_SECURE_CORE);
        crate::log::init(::log::LevelFilter::Info);
    }
}
