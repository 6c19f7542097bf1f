//! RTOS 协作者
//!
//! 非安全侧只需要内核的四个动作：初始化、建线程、启动调度器、查询当前线程。

use core::fmt;

/// 线程入口
pub type ThreadFunc = fn(usize);

/// 线程 id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadId(pub u32);

/// RTOS 错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtosError {
    /// 未指明的错误
    Error,
    /// 资源不足
    Resource,
    /// 参数错误
    Parameter,
    /// 内存不足
    NoMemory,
    /// 不允许在中断上下文中调用
    Isr,
}

impl fmt::Display for RtosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RtosError::Error => "unspecified RTOS error",
            RtosError::Resource => "resource not available",
            RtosError::Parameter => "bad parameter",
            RtosError::NoMemory => "out of memory",
            RtosError::Isr => "not allowed in ISR context",
        };
        f.write_str(s)
    }
}

/// 线程属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAttr {
    /// 线程名
    pub name: &'static str,
    /// 栈大小（字节）
    pub stack_size: usize,
}

/// RTOS 内核
pub trait Rtos: Send + Sync {
    /// 初始化内核
    fn kernel_initialize(&self) -> Result<(), RtosError>;
    /// 创建线程
    fn create_thread(
        &self,
        entry: ThreadFunc,
        arg: usize,
        attr: &ThreadAttr,
    ) -> Result<ThreadId, RtosError>;
    /// 启动调度器，只在出错时返回
    fn kernel_start(&self) -> RtosError;
    /// 当前线程，不在线程上下文时为 `None`
    fn current_thread(&self) -> Option<ThreadId>;
    /// 内核节拍数
    fn tick_count(&self) -> usize;
}

/// 非安全侧调用安全服务的接口
pub trait NsInterface: Send + Sync {
    /// 建立调用安全服务所需的互斥等资源，须在内核初始化之后调用
    fn init(&self) -> Result<(), RtosError>;
}
