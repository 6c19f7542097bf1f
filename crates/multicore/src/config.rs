//! 跨核协议常量

/// 邮箱队列槽位数
pub const NUM_MAILBOX_QUEUE_SLOT: usize = 4;

/// 安全核写入握手字的就绪魔数
pub const READY_MAGIC: u32 = 0x5EC0_0001;

/// 安全核初始化失败时写入握手字的值
pub const READY_FAULT: u32 = 0x5EC0_DEAD;

/// 握手字的初始值（对端尚未就绪）
pub const READY_PENDING: u32 = 0;

/// 邮箱消息携带的参数个数
pub const MAILBOX_MSG_ARGS: usize = 4;
