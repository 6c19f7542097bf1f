//! 停机监督者
//!
//! 所有致命错误最终汇集到 [`fail_stop`]：以 Emergency 级别输出原因，然后让本核永久停在原地。
//! 不做展开、不重试，也不存在恢复路径。

use core::fmt;

use irq::{InterruptSource, IrqError, IrqLine};
use multicore::BootError;

/// 停机原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailStop {
    /// 双核启动协议失败
    Boot(BootError),
    /// 中断触发时对应的线没有绑定上下文
    Unrouted(IrqLine),
    /// 安全外设的中断初始化失败
    IrqInit(InterruptSource, IrqError),
    /// RTOS 调度器返回了
    SchedulerReturned,
}

impl From<BootError> for FailStop {
    fn from(e: BootError) -> Self {
        FailStop::Boot(e)
    }
}

impl fmt::Display for FailStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailStop::Boot(e) => write!(f, "{}", e),
            FailStop::Unrouted(line) => write!(f, "unrouted interrupt on {}", line),
            FailStop::IrqInit(source, e) => write!(f, "{} irq init failed: {}", source, e),
            FailStop::SchedulerReturned => f.write_str("RTOS scheduler returned"),
        }
    }
}

/// 输出原因并停机
pub fn fail_stop(reason: FailStop) -> ! {
    klog::emergency_print(format_args!("fail-stop: {}", reason));
    park()
}

/// 让本核永久停在原地
pub fn park() -> ! {
    loop {
        core::hint::spin_loop();
    }
}

/// 向量入口在线未绑定时调用
pub fn unrouted_interrupt(line: IrqLine) -> ! {
    fail_stop(FailStop::Unrouted(line))
}
