//! Mock 实现模块
//!
//! 提供架构、中断控制器、跨核通道的 Mock 实现，用于宿主机测试

pub mod arch;
pub mod cross_core;
pub mod nvic;
