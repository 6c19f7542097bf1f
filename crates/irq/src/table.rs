//! 中断注册表
//!
//! 每条 [`IrqLine`] 一个槽位的固定容量表，不分配堆内存。
//!
//! # 并发模型
//!
//! 绑定只发生在初始化阶段、全局中断打开之前；之后注册表只读，中断上下文中的查表无需加锁。
//! 槽位状态仍用原子量维护，使重复或竞争的绑定被确定性地拒绝，而不是覆盖已 arm 的线：
//!
//! ```text
//! Empty --bind 抢占成功--> Binding --写入上下文--> Bound --> arm 中断线
//! ```
//!
//! 只有处于 `Bound` 的槽位对查表可见（Release / Acquire 配对）。

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicU8, Ordering};

use crate::config::SecureConfig;
use crate::context::{HandlerContext, IrqLoadInfo, PartitionHandle};
use crate::dispatch::IrqRouter;
use crate::error::IrqError;
use crate::intc::IntcAdapter;
use crate::source::{InterruptSource, IrqLine};

const SLOT_EMPTY: u8 = 0;
const SLOT_BINDING: u8 = 1;
const SLOT_BOUND: u8 = 2;

struct Slot {
    state: AtomicU8,
    context: UnsafeCell<MaybeUninit<HandlerContext>>,
}

impl Slot {
    const fn new() -> Self {
        Self {
            state: AtomicU8::new(SLOT_EMPTY),
            context: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    fn get(&self) -> Option<HandlerContext> {
        if self.state.load(Ordering::Acquire) == SLOT_BOUND {
            // SAFETY: 进入 Bound 之前上下文已写入，且之后不再修改
            Some(unsafe { (*self.context.get()).assume_init_read() })
        } else {
            None
        }
    }
}

/// 中断注册表
pub struct IrqTable {
    config: SecureConfig,
    slots: [Slot; IrqLine::COUNT],
}

// SAFETY: 上下文只在独占 Binding 状态时写入一次，发布后只读
unsafe impl Sync for IrqTable {}

impl IrqTable {
    /// 以给定的启用表创建空注册表
    ///
    /// 这是一个 `const fn`，平台可以直接把它放进 `static`。
    pub const fn new(config: SecureConfig) -> Self {
        Self {
            config,
            slots: [const { Slot::new() }; IrqLine::COUNT],
        }
    }

    /// 注册表使用的启用表
    pub fn config(&self) -> &SecureConfig {
        &self.config
    }

    /// 绑定中断源
    ///
    /// 先保存 `{owner, descriptor}`，再通过 `intc` arm 该中断源所在的线
    /// （默认优先级、清除非安全目标位、保持关闭）。
    ///
    /// # 错误
    /// - [`IrqError::InvalidSource`]: 外设未交给安全侧处理，或描述中的中断号不是该外设所在的线；
    ///   不创建任何条目，也不触碰中断控制器
    /// - [`IrqError::AlreadyBound`]: 该线（可能经由另一个共享此线的外设）已绑定，原绑定保持不变
    pub fn bind(
        &self,
        intc: &IntcAdapter<'_>,
        source: InterruptSource,
        owner: PartitionHandle,
        descriptor: &'static IrqLoadInfo,
    ) -> Result<(), IrqError> {
        if !self.config.is_enabled(source) {
            log::warn!("irq: bind {} rejected, not a secure peripheral", source);
            return Err(IrqError::InvalidSource);
        }

        let line = source.line();
        let slot = &self.slots[line.index()];
        if slot.state.load(Ordering::Acquire) != SLOT_EMPTY {
            log::error!("irq: {} already bound on {}", source, line);
            return Err(IrqError::AlreadyBound);
        }
        if descriptor.source != line.irqn() {
            log::warn!(
                "irq: bind {} rejected, descriptor names irq {} instead of {}",
                source,
                descriptor.source,
                line
            );
            return Err(IrqError::InvalidSource);
        }
        if slot
            .state
            .compare_exchange(SLOT_EMPTY, SLOT_BINDING, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            log::error!("irq: {} already bound on {}", source, line);
            return Err(IrqError::AlreadyBound);
        }

        // SAFETY: 抢占到 Binding 的调用者独占该槽位
        unsafe {
            (*slot.context.get()).write(HandlerContext::new(owner, descriptor));
        }
        slot.state.store(SLOT_BOUND, Ordering::Release);

        intc.arm(line);
        log::debug!("irq: {} bound on {} to {}", source, line, owner);
        Ok(())
    }

    /// 按中断源查询上下文
    pub fn context(&self, source: InterruptSource) -> Option<HandlerContext> {
        self.context_for_line(source.line())
    }

    /// 按中断线查询上下文
    #[inline]
    pub fn context_for_line(&self, line: IrqLine) -> Option<HandlerContext> {
        self.slots[line.index()].get()
    }

    /// 中断源所在的线是否已绑定
    pub fn is_bound(&self, source: InterruptSource) -> bool {
        self.context(source).is_some()
    }

    /// 已绑定的线数
    pub fn bound_count(&self) -> usize {
        self.iter_bound().count()
    }

    /// 遍历所有已绑定的 `(线, 上下文)`
    pub fn iter_bound(&self) -> impl Iterator<Item = (IrqLine, HandlerContext)> + '_ {
        IrqLine::ALL
            .iter()
            .filter_map(|line| self.context_for_line(*line).map(|ctx| (*line, ctx)))
    }

    /// 分发一次中断：查表后以触发的线和绑定的 `(owner, descriptor)` 调用路由器恰好一次
    ///
    /// 未绑定的线返回 [`IrqError::Unrouted`]，调用方必须把它当作致命错误。
    #[inline]
    pub fn dispatch(&self, line: IrqLine, router: &dyn IrqRouter) -> Result<(), IrqError> {
        let ctx = self.context_for_line(line).ok_or(IrqError::Unrouted(line))?;
        router.route(line, ctx.owner, ctx.descriptor);
        Ok(())
    }
}
