//! 中断注册错误类型

use core::fmt;

use crate::source::IrqLine;

/// 注册与分发错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqError {
    /// 外设未被识别，或当前硬件配置没有把它交给安全侧
    InvalidSource,
    /// 该中断线已经绑定了上下文
    AlreadyBound,
    /// 中断触发时该线没有绑定上下文（注册步骤被跳过）
    Unrouted(IrqLine),
}

/// 平台 HAL 状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum HalStatus {
    /// 成功
    Success = 0,
    /// 通用错误
    Generic = -1,
    /// 参数无效
    InvalidInput = -2,
    /// 资源已被占用
    Busy = -3,
}

impl IrqError {
    /// 转换为 HAL 状态码
    pub fn to_hal_status(&self) -> HalStatus {
        match self {
            IrqError::InvalidSource => HalStatus::InvalidInput,
            IrqError::AlreadyBound => HalStatus::Busy,
            IrqError::Unrouted(_) => HalStatus::Generic,
        }
    }
}

impl HalStatus {
    /// 由注册结果得到状态码
    pub fn from_result(result: Result<(), IrqError>) -> Self {
        match result {
            Ok(()) => HalStatus::Success,
            Err(e) => e.to_hal_status(),
        }
    }
}

impl fmt::Display for IrqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrqError::InvalidSource => f.write_str("interrupt source not enabled for secure handling"),
            IrqError::AlreadyBound => f.write_str("interrupt line already bound"),
            IrqError::Unrouted(line) => write!(f, "unrouted interrupt on {}", line),
        }
    }
}
