//! 向量分发
//!
//! 每个物理向量一个跳板（trampoline）：查出本线绑定的上下文，调用共享的路由函数。
//! 跳板本身不含业务逻辑，向量表因此不需要在编译期知道哪条线归哪个分区。
//!
//! 路由器在中断上下文中执行，不得阻塞；它可能导致切换到所属分区的执行上下文。

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::context::{IrqLoadInfo, PartitionHandle};
use crate::source::IrqLine;
use crate::table::IrqTable;

/// 共享路由函数
pub trait IrqRouter: Send + Sync {
    /// 按分区描述处理一次中断
    ///
    /// `line` 是实际触发的线；绑定时已保证它与 `descriptor.source` 一致，
    /// 路由器仍应以 `line` 为准去屏蔽或打开中断。
    fn route(&self, line: IrqLine, owner: PartitionHandle, descriptor: &'static IrqLoadInfo);
}

static ROUTER_DATA: AtomicUsize = AtomicUsize::new(0);
static ROUTER_VTABLE: AtomicUsize = AtomicUsize::new(0);

/// 注册全局路由器
///
/// # Safety
/// 必须在打开全局中断之前、单线程环境下调用，且只能调用一次
pub unsafe fn register_router(router: &'static dyn IrqRouter) {
    let ptr = router as *const dyn IrqRouter;
    // SAFETY: fat pointer 布局为 (data, vtable)
    let (data, vtable) =
        unsafe { core::mem::transmute::<*const dyn IrqRouter, (usize, usize)>(ptr) };
    ROUTER_DATA.store(data, Ordering::Release);
    ROUTER_VTABLE.store(vtable, Ordering::Release);
}

/// 获取已注册的路由器
pub fn router() -> Option<&'static dyn IrqRouter> {
    let data = ROUTER_DATA.load(Ordering::Acquire);
    let vtable = ROUTER_VTABLE.load(Ordering::Acquire);
    if data == 0 {
        return None;
    }
    // SAFETY: 重组 register_router 保存的 fat pointer
    Some(unsafe { &*core::mem::transmute::<(usize, usize), *const dyn IrqRouter>((data, vtable)) })
}

/// 向量入口的公共实现
///
/// 线未绑定或路由器未注册时调用 `unrouted`，它不会返回：
/// 未路由的中断说明注册步骤与已 arm 的线不一致，不能被静默吞掉。
#[inline(always)]
pub fn trampoline(table: &IrqTable, line: IrqLine, unrouted: fn(IrqLine) -> !) {
    let Some(router) = router() else {
        unrouted(line)
    };
    if table.dispatch(line, router).is_err() {
        unrouted(line)
    }
}

/// 生成向量表入口
///
/// 每个条目展开为一个 `#[unsafe(no_mangle)] extern "C"` 函数，名字与硬件向量表约定一致，
/// 函数体只调用 [`trampoline`]。
///
/// ```ignore
/// irq::irq_vectors! {
///     table = crate::secure::IRQ_TABLE,
///     unrouted = crate::halt::unrouted_interrupt;
///     TIMER0_IRQHandler => Timer0,
///     GPIOTE0_IRQHandler => Gpiote0,
/// }
/// ```
#[macro_export]
macro_rules! irq_vectors {
    (table = $table:path, unrouted = $unrouted:path; $($name:ident => $line:ident),* $(,)?) => {
        $(
            #[doc = concat!("Vector table entry for `", stringify!($line), "`.")]
            #[unsafe(no_mangle)]
            #[allow(non_snake_case)]
            pub extern "C" fn $name() {
                $crate::dispatch::trampoline(&$table, $crate::IrqLine::$line, $unrouted);
            }
        )*
    };
}
