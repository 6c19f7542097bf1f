//! 测试支持 crate
//!
//! 提供宿主机测试用的 Mock：架构操作、中断控制器、跨核通道。
//! 各 crate 在 `cfg(test)` 下为这些类型实现自己的 ops trait。

#![no_std]

pub mod mock;
