//! nRF9160 平台层
//!
//! 同一颗芯片上的两个世界：
//!
//! - [`secure`]：安全外设的中断注册、向量表入口和分区路由器。分区加载流程对每个
//!   交给安全侧的外设调用一次 `<name>_irq_init`，之后向量入口把中断路由到所属分区。
//! - [`ns`]：非安全 `main`。标准输出、双核握手、RTOS 启动。
//!
//! 哪些外设交给安全侧由 cargo feature 决定，见 [`config`]。
//! 所有致命错误都汇集到 [`halt::fail_stop`]。

#![no_std]

#[cfg(test)]
extern crate std;

#[cfg(target_arch = "arm")]
pub mod arch;
pub mod config;
pub mod halt;
pub mod log;
pub mod ns;
pub mod secure;

#[cfg(test)]
mod tests;
