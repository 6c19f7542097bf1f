//! 安全侧中断注册与分发
//!
//! 此 crate 把每条物理中断线绑定到一个处理上下文（所属分区 + 加载期中断描述），
//! 使向量表中的通用入口无需知道哪条线归哪个分区，即可把中断路由到正确的隔离上下文。
//!
//! # 组件
//!
//! - [`source`] - 物理中断线 [`IrqLine`] 与逻辑中断源 [`InterruptSource`]（多对一）
//! - [`config`] - 平台常量与按外设启用的 [`SecureConfig`] 表
//! - [`context`] - [`HandlerContext`]、[`PartitionHandle`]、[`IrqLoadInfo`]
//! - [`intc`] - 中断控制器适配层 [`IntcAdapter`] 以及 HAL 原语 [`NvicOps`]
//! - [`table`] - 固定容量的注册表 [`IrqTable`]
//! - [`dispatch`] - 路由 trait [`IrqRouter`] 与向量入口生成宏 [`irq_vectors!`]
//!
//! # 生命周期
//!
//! 1. 初始化阶段（全局中断尚未打开）：平台对每个启用的外设调用一次 [`IrqTable::bind`]，
//!    先保存上下文，再 arm 中断线（设置默认优先级、清除非安全目标位、保持关闭）。
//! 2. 运行阶段：注册表只读；硬件触发中断时，向量入口查表并调用路由函数。
//!
//! 绑定后的上下文在整个程序生命周期内不可变，不存在解绑操作。
//!
//! # 架构解耦
//!
//! - [`NvicOps`]: 中断控制器原语，通过 [`register_nvic_ops`] 注册
//! - [`IrqRouter`]: 分区路由，通过 [`register_router`] 注册

#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod context;
pub mod dispatch;
mod error;
pub mod intc;
pub mod source;
pub mod table;

pub use config::{DEFAULT_IRQ_PRIORITY, NVIC_PRIO_BITS, SecureConfig};
pub use context::{FlihResult, HandlerContext, IrqHandling, IrqLoadInfo, PartitionHandle};
pub use dispatch::{IrqRouter, register_router, router, trampoline};
pub use error::{HalStatus, IrqError};
pub use intc::{IntcAdapter, LineState, NvicOps, TargetState, nvic_ops, register_nvic_ops};
pub use source::{InterruptSource, IrqLine};
pub use table::IrqTable;

#[cfg(test)]
mod tests;
