//! 分区路由器
//!
//! 向量入口查到 `(owner, descriptor)` 后连同触发的线一起交给 [`SpmRouter::route`]：
//!
//! - SLIH：关闭该线并向所属分区置位信号，分区处理完后调用 [`SpmRouter::eoi`] 清除信号、重新打开该线。
//! - FLIH：在中断上下文中直接运行处理函数；只有它返回 [`FlihResult::Signal`] 时才关闭该线并置位信号。
//! - 描述不属于触发的线，或所属分区未注册：关闭触发的线，不置位任何信号。
//!
//! 分区表在初始化阶段写入，之后在中断上下文中只读；信号位图在中断与线程之间共享，
//! 由屏蔽中断的自旋锁保护。

use core::fmt;

use bitflags::bitflags;
use irq::{FlihResult, IntcAdapter, IrqHandling, IrqLine, IrqLoadInfo, IrqRouter, PartitionHandle};
use sync::{RwLock, SpinLock};

use crate::config::MAX_PARTITIONS;

bitflags! {
    /// 分区信号位图
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SignalSet: u32 {
        const _ = !0;
    }
}

/// 路由器错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterError {
    /// 分区句柄超出分区表或未注册
    UnknownPartition(PartitionHandle),
    /// 分区句柄已注册
    DuplicatePartition(PartitionHandle),
    /// 描述中的中断号不是本平台的中断线
    BadSource(u32),
    /// 信号未置位时请求结束中断
    NotAsserted(u32),
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::UnknownPartition(p) => write!(f, "unknown {}", p),
            RouterError::DuplicatePartition(p) => write!(f, "{} already registered", p),
            RouterError::BadSource(irqn) => write!(f, "irq {} is not a platform line", irqn),
            RouterError::NotAsserted(signal) => write!(f, "signal {:#x} not asserted", signal),
        }
    }
}

/// 分区表项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionInfo {
    /// 分区 id（与 [`IrqLoadInfo::pid`] 对应）
    pub pid: u32,
}

/// 安全分区管理器的中断路由器
pub struct SpmRouter {
    intc: IntcAdapter<'static>,
    partitions: RwLock<[Option<PartitionInfo>; MAX_PARTITIONS]>,
    signals: SpinLock<[SignalSet; MAX_PARTITIONS]>,
}

impl SpmRouter {
    /// 创建路由器
    pub const fn new(intc: IntcAdapter<'static>) -> Self {
        Self {
            intc,
            partitions: sync::const_rwlock([None; MAX_PARTITIONS]),
            signals: SpinLock::new([SignalSet::empty(); MAX_PARTITIONS]),
        }
    }

    /// 注册分区（初始化阶段）
    pub fn register_partition(&self, owner: PartitionHandle, pid: u32) -> Result<(), RouterError> {
        let mut table = self.partitions.write();
        let slot = table
            .get_mut(owner.as_raw())
            .ok_or(RouterError::UnknownPartition(owner))?;
        if slot.is_some() {
            return Err(RouterError::DuplicatePartition(owner));
        }
        *slot = Some(PartitionInfo { pid });
        log::debug!("router: {} registered as pid {}", owner, pid);
        Ok(())
    }

    /// 查询分区信息
    pub fn partition(&self, owner: PartitionHandle) -> Option<PartitionInfo> {
        self.partitions.read().get(owner.as_raw()).copied().flatten()
    }

    /// 分区当前已置位的信号
    pub fn asserted(&self, owner: PartitionHandle) -> SignalSet {
        self.signals
            .lock()
            .get(owner.as_raw())
            .copied()
            .unwrap_or(SignalSet::empty())
    }

    /// 打开描述对应的中断线（分区准备好接收时调用）
    pub fn irq_enable(&self, info: &IrqLoadInfo) -> Result<(), RouterError> {
        self.intc.enable(line_of(info)?);
        Ok(())
    }

    /// 关闭描述对应的中断线
    pub fn irq_disable(&self, info: &IrqLoadInfo) -> Result<(), RouterError> {
        self.intc.disable(line_of(info)?);
        Ok(())
    }

    /// 结束一次 SLIH 中断：清除信号并重新打开该线
    pub fn eoi(&self, owner: PartitionHandle, info: &IrqLoadInfo) -> Result<(), RouterError> {
        let line = line_of(info)?;
        let signal = SignalSet::from_bits_retain(info.signal);
        {
            let mut signals = self.signals.lock();
            let set = signals
                .get_mut(owner.as_raw())
                .ok_or(RouterError::UnknownPartition(owner))?;
            if !set.contains(signal) {
                return Err(RouterError::NotAsserted(info.signal));
            }
            set.remove(signal);
        }
        self.intc.enable(line);
        Ok(())
    }

    fn assert_signal(&self, owner: PartitionHandle, line: IrqLine, signal: u32) {
        self.intc.disable(line);
        if let Some(set) = self.signals.lock().get_mut(owner.as_raw()) {
            set.insert(SignalSet::from_bits_retain(signal));
        }
    }
}

fn line_of(info: &IrqLoadInfo) -> Result<IrqLine, RouterError> {
    IrqLine::from_irqn(info.source).ok_or(RouterError::BadSource(info.source))
}

impl IrqRouter for SpmRouter {
    fn route(&self, line: IrqLine, owner: PartitionHandle, descriptor: &'static IrqLoadInfo) {
        if descriptor.source != line.irqn() {
            // 描述与触发的线对不上，无法确定该通知谁；关掉触发的线，避免中断风暴
            log::error!(
                "router: {} fired with descriptor for irq {}",
                line,
                descriptor.source
            );
            self.intc.disable(line);
            return;
        }
        if self.partition(owner).is_none() {
            // 没有人会处理这个信号，保持线关闭以免反复触发
            log::error!("router: {} for {}", RouterError::UnknownPartition(owner), line);
            self.intc.disable(line);
            return;
        }

        match descriptor.handling {
            IrqHandling::Slih => self.assert_signal(owner, line, descriptor.signal),
            IrqHandling::Flih(handler) => {
                if handler() == FlihResult::Signal {
                    self.assert_signal(owner, line, descriptor.signal);
                }
            }
        }
    }
}
