//! 中断控制器适配层
//!
//! 把硬件相关的优先级 / 使能 / 目标状态原语包装成注册阶段使用的 `arm` 操作。
//! 原语本身（[`NvicOps`]）由平台 crate 实现并注册；对合法的中断线，这些原语视为不会失败。

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::config::DEFAULT_IRQ_PRIORITY;
use crate::source::IrqLine;

/// 中断控制器原语
///
/// 对应 CMSIS 的 `NVIC_SetPriority` / `NVIC_EnableIRQ` / `NVIC_ClearTargetState` 等。
pub trait NvicOps: Send + Sync {
    /// 设置优先级
    fn set_priority(&self, irqn: u32, priority: u8);
    /// 读取优先级
    fn priority(&self, irqn: u32) -> u8;
    /// 开启中断线
    fn enable(&self, irqn: u32);
    /// 关闭中断线
    fn disable(&self, irqn: u32);
    /// 中断线是否开启
    fn is_enabled(&self, irqn: u32) -> bool;
    /// 清除目标状态位，使中断只能投递到安全世界
    fn clear_target_state(&self, irqn: u32);
    /// 目标状态位是否指向非安全世界
    fn targets_non_secure(&self, irqn: u32) -> bool;
}

static NVIC_OPS_DATA: AtomicUsize = AtomicUsize::new(0);
static NVIC_OPS_VTABLE: AtomicUsize = AtomicUsize::new(0);

/// 注册中断控制器原语
///
/// # Safety
/// 必须在单线程环境下调用，且只能调用一次
pub unsafe fn register_nvic_ops(ops: &'static dyn NvicOps) {
    let ptr = ops as *const dyn NvicOps;
    // SAFETY: 将 fat pointer 拆分为 data 和 vtable 两部分存储
    let (data, vtable) = unsafe { core::mem::transmute::<*const dyn NvicOps, (usize, usize)>(ptr) };
    NVIC_OPS_DATA.store(data, Ordering::Release);
    NVIC_OPS_VTABLE.store(vtable, Ordering::Release);
}

/// 获取已注册的中断控制器原语
///
/// # Panics
/// 如果尚未调用 [`register_nvic_ops`]，则 panic
#[inline]
pub fn nvic_ops() -> &'static dyn NvicOps {
    let data = NVIC_OPS_DATA.load(Ordering::Acquire);
    let vtable = NVIC_OPS_VTABLE.load(Ordering::Acquire);
    if data == 0 {
        panic!("irq: NvicOps not registered");
    }
    // SAFETY: 重组 register_nvic_ops 保存的 fat pointer
    unsafe { &*core::mem::transmute::<(usize, usize), *const dyn NvicOps>((data, vtable)) }
}

/// 中断线的目标世界
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    /// 只投递到安全世界
    Secure,
    /// 可投递到非安全世界
    NonSecure,
}

/// 中断线在控制器中的状态快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineState {
    /// 是否开启
    pub enabled: bool,
    /// 优先级
    pub priority: u8,
    /// 目标世界
    pub target: TargetState,
}

/// 中断控制器适配器
#[derive(Clone, Copy)]
pub struct IntcAdapter<'a> {
    hal: &'a dyn NvicOps,
    default_priority: u8,
}

impl<'a> IntcAdapter<'a> {
    /// 使用平台默认优先级
    pub const fn new(hal: &'a dyn NvicOps) -> Self {
        Self::with_priority(hal, DEFAULT_IRQ_PRIORITY)
    }

    /// 使用指定的默认优先级
    pub const fn with_priority(hal: &'a dyn NvicOps, default_priority: u8) -> Self {
        Self {
            hal,
            default_priority,
        }
    }

    /// 注册阶段的 arm 操作：默认优先级、仅安全目标、保持关闭
    ///
    /// 开启中断线是单独的一步，由所属分区在准备好接收时执行。
    pub fn arm(&self, line: IrqLine) {
        let irqn = line.irqn();
        self.hal.set_priority(irqn, self.default_priority);
        self.hal.clear_target_state(irqn);
        self.hal.disable(irqn);
    }

    /// 开启中断线
    pub fn enable(&self, line: IrqLine) {
        self.hal.enable(line.irqn());
    }

    /// 关闭中断线
    pub fn disable(&self, line: IrqLine) {
        self.hal.disable(line.irqn());
    }

    /// 查询中断线状态
    pub fn state(&self, line: IrqLine) -> LineState {
        let irqn = line.irqn();
        LineState {
            enabled: self.hal.is_enabled(irqn),
            priority: self.hal.priority(irqn),
            target: if self.hal.targets_non_secure(irqn) {
                TargetState::NonSecure
            } else {
                TargetState::Secure
            },
        }
    }

    /// 配置的默认优先级
    pub fn default_priority(&self) -> u8 {
        self.default_priority
    }
}

impl IntcAdapter<'static> {
    /// 使用已注册的全局原语
    pub fn global() -> Self {
        Self::new(nvic_ops())
    }
}
