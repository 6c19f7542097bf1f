//! 中断处理上下文
//!
//! 一个 [`HandlerContext`] 由所属分区 [`PartitionHandle`] 与加载期中断描述 [`IrqLoadInfo`] 组成。
//! 描述必须是 `'static`：中断线可能在任何时刻触发，绑定后的描述在整个程序生命周期内必须有效。

use core::fmt;

/// 不透明的分区句柄
///
/// 注册表只保存和比较它，从不解引用；解释权属于路由器。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionHandle(usize);

impl PartitionHandle {
    /// 由原始值构造
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// 原始值
    pub const fn as_raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for PartitionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "partition#{}", self.0)
    }
}

/// 一级中断处理函数的返回值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlihResult {
    /// 已在中断上下文中处理完毕，无需通知分区
    Handled,
    /// 需要向分区置位中断信号
    Signal,
}

/// 中断处理模型
#[derive(Clone, Copy)]
pub enum IrqHandling {
    /// 二级处理：路由器屏蔽该线并向分区置位信号，分区确认（EOI）后重新开启
    Slih,
    /// 一级处理：在中断上下文中直接运行处理函数
    Flih(fn() -> FlihResult),
}

impl fmt::Debug for IrqHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrqHandling::Slih => f.write_str("Slih"),
            IrqHandling::Flih(_) => f.write_str("Flih"),
        }
    }
}

/// 加载期中断描述（来自分区清单，静态存在）
#[derive(Debug)]
pub struct IrqLoadInfo {
    /// NVIC 中断号
    pub source: u32,
    /// 所属分区 ID
    pub pid: u32,
    /// 分配给该中断的信号位
    pub signal: u32,
    /// 处理模型
    pub handling: IrqHandling,
}

impl IrqLoadInfo {
    /// 二级处理的中断描述
    pub const fn slih(source: u32, pid: u32, signal: u32) -> Self {
        Self {
            source,
            pid,
            signal,
            handling: IrqHandling::Slih,
        }
    }

    /// 一级处理的中断描述
    pub const fn flih(source: u32, pid: u32, signal: u32, handler: fn() -> FlihResult) -> Self {
        Self {
            source,
            pid,
            signal,
            handling: IrqHandling::Flih(handler),
        }
    }
}

/// 绑定在一条中断线上的处理上下文
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext {
    /// 所属分区
    pub owner: PartitionHandle,
    /// 加载期中断描述
    pub descriptor: &'static IrqLoadInfo,
}

impl HandlerContext {
    /// 构造上下文
    pub const fn new(owner: PartitionHandle, descriptor: &'static IrqLoadInfo) -> Self {
        Self { owner, descriptor }
    }
}

/// 描述按身份（地址）比较：两个内容相同的描述仍是不同的绑定
impl PartialEq for HandlerContext {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && core::ptr::eq(self.descriptor, other.descriptor)
    }
}

impl Eq for HandlerContext {}
