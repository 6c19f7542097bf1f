//! 非安全侧邮箱队列
//!
//! 队列位于两核共享的内存中，由 [`NUM_MAILBOX_QUEUE_SLOT`] 个槽位和四个槽位位图组成：
//!
//! - `empty`：空闲槽位
//! - `pending`：非安全侧已提交、安全侧尚未取走的请求
//! - `in_flight`：安全侧已取走、尚未写回结果的请求
//! - `replied`：安全侧已写回结果、非安全侧尚未取走的槽位
//!
//! 一个槽位的生命周期：
//!
//! ```text
//! empty --alloc_slot--> 已分配 --submit--> pending --take_pending--> 处理中
//!       <--take_reply-- replied <--mark_replied--
//! ```
//!
//! 队列必须先由 [`MailboxQueue::init`] 复位并发布给安全核，此前的任何操作都返回
//! [`MailboxError::NotInitialized`]。

use bitflags::bitflags;
use sync::SpinLock;

use crate::config::{MAILBOX_MSG_ARGS, NUM_MAILBOX_QUEUE_SLOT};
use crate::error::MailboxError;

bitflags! {
    /// 槽位位图，第 n 位对应第 n 个槽位
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SlotMask: u8 {
        /// 槽位 0
        const SLOT0 = 1 << 0;
        /// 槽位 1
        const SLOT1 = 1 << 1;
        /// 槽位 2
        const SLOT2 = 1 << 2;
        /// 槽位 3
        const SLOT3 = 1 << 3;
    }
}

const _: () = assert!(SlotMask::all().bits().count_ones() as usize == NUM_MAILBOX_QUEUE_SLOT);

impl SlotMask {
    fn of(slot: SlotId) -> Self {
        SlotMask::from_bits_retain(1 << slot.0)
    }

    fn first(self) -> Option<SlotId> {
        if self.is_empty() {
            None
        } else {
            Some(SlotId(self.bits().trailing_zeros() as u8))
        }
    }
}

/// 槽位编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotId(u8);

impl SlotId {
    /// 由原始编号构造，不做范围检查（越界编号在队列操作中被拒绝）
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// 槽位下标
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    fn checked(self) -> Result<Self, MailboxError> {
        if self.index() < NUM_MAILBOX_QUEUE_SLOT {
            Ok(self)
        } else {
            Err(MailboxError::InvalidSlot)
        }
    }
}

/// 一条跨核请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailboxMsg {
    /// 调用类型
    pub call_type: u32,
    /// 调用方标识
    pub client_id: i32,
    /// 参数
    pub args: [u32; MAILBOX_MSG_ARGS],
}

impl MailboxMsg {
    /// 空消息
    pub const EMPTY: MailboxMsg = MailboxMsg {
        call_type: 0,
        client_id: 0,
        args: [0; MAILBOX_MSG_ARGS],
    };

    /// 创建消息
    pub const fn new(call_type: u32, client_id: i32, args: [u32; MAILBOX_MSG_ARGS]) -> Self {
        Self {
            call_type,
            client_id,
            args,
        }
    }
}

/// 邮箱 HAL 原语
///
/// 平台实现：把队列地址告知安全核，以及在有新请求时触发跨核通知（IPC 事件）。
pub trait MailboxHal: Send + Sync {
    /// 把队列发布给安全核
    fn init(&self, queue_addr: usize) -> Result<(), MailboxError>;

    /// 通知安全核有待处理的请求
    fn notify_peer(&self);
}

#[derive(Clone, Copy)]
struct Slot {
    msg: MailboxMsg,
    reply: i32,
}

impl Slot {
    const EMPTY: Slot = Slot {
        msg: MailboxMsg::EMPTY,
        reply: 0,
    };
}

struct QueueInner {
    hal: Option<&'static dyn MailboxHal>,
    empty: SlotMask,
    pending: SlotMask,
    in_flight: SlotMask,
    replied: SlotMask,
    slots: [Slot; NUM_MAILBOX_QUEUE_SLOT],
}

impl QueueInner {
    fn hal(&self) -> Result<&'static dyn MailboxHal, MailboxError> {
        self.hal.ok_or(MailboxError::NotInitialized)
    }

    fn is_allocated(&self, slot: SlotId) -> bool {
        !self.empty.contains(SlotMask::of(slot))
    }
}

/// 邮箱队列
pub struct MailboxQueue {
    inner: SpinLock<QueueInner>,
}

impl MailboxQueue {
    /// 创建未初始化的队列，可直接放进 `static`
    pub const fn new() -> Self {
        Self {
            inner: SpinLock::new(QueueInner {
                hal: None,
                empty: SlotMask::all(),
                pending: SlotMask::empty(),
                in_flight: SlotMask::empty(),
                replied: SlotMask::empty(),
                slots: [Slot::EMPTY; NUM_MAILBOX_QUEUE_SLOT],
            }),
        }
    }

    /// 复位所有槽位和位图，再由 HAL 发布给安全核
    ///
    /// HAL 失败时队列保持未初始化状态。
    pub fn init(&self, hal: &'static dyn MailboxHal) -> Result<(), MailboxError> {
        {
            let mut inner = self.inner.lock();
            inner.hal = None;
            inner.empty = SlotMask::all();
            inner.pending = SlotMask::empty();
            inner.in_flight = SlotMask::empty();
            inner.replied = SlotMask::empty();
            inner.slots = [Slot::EMPTY; NUM_MAILBOX_QUEUE_SLOT];
        }

        hal.init(self as *const MailboxQueue as usize)
            .inspect_err(|e| log::error!("mailbox: HAL init failed: {}", e))?;

        self.inner.lock().hal = Some(hal);
        log::info!("mailbox: queue ready, {} slots", NUM_MAILBOX_QUEUE_SLOT);
        Ok(())
    }

    /// 是否已初始化
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().hal.is_some()
    }

    /// 分配一个空闲槽位（编号最小者）
    pub fn alloc_slot(&self) -> Result<SlotId, MailboxError> {
        let mut inner = self.inner.lock();
        inner.hal()?;
        let slot = inner.empty.first().ok_or(MailboxError::NoFreeSlot)?;
        inner.empty.remove(SlotMask::of(slot));
        Ok(slot)
    }

    /// 提交请求：写入消息、置 pending，并通知安全核
    pub fn submit(&self, slot: SlotId, msg: MailboxMsg) -> Result<(), MailboxError> {
        let slot = slot.checked()?;
        let hal = {
            let mut inner = self.inner.lock();
            let hal = inner.hal()?;
            let bit = SlotMask::of(slot);
            if !inner.is_allocated(slot) || inner.pending.contains(bit) || inner.replied.contains(bit)
            {
                return Err(MailboxError::BadSlotState);
            }
            inner.slots[slot.index()].msg = msg;
            inner.pending.insert(bit);
            hal
        };
        hal.notify_peer();
        Ok(())
    }

    /// 安全侧：取走一个待处理的请求
    pub fn take_pending(&self) -> Result<Option<(SlotId, MailboxMsg)>, MailboxError> {
        let mut inner = self.inner.lock();
        inner.hal()?;
        let Some(slot) = inner.pending.first() else {
            return Ok(None);
        };
        inner.pending.remove(SlotMask::of(slot));
        inner.in_flight.insert(SlotMask::of(slot));
        Ok(Some((slot, inner.slots[slot.index()].msg)))
    }

    /// 安全侧：写回结果
    ///
    /// 只接受已由 [`take_pending`](Self::take_pending) 取走、尚未回复的槽位。
    pub fn mark_replied(&self, slot: SlotId, reply: i32) -> Result<(), MailboxError> {
        let slot = slot.checked()?;
        let mut inner = self.inner.lock();
        inner.hal()?;
        let bit = SlotMask::of(slot);
        if !inner.in_flight.contains(bit) {
            return Err(MailboxError::BadSlotState);
        }
        inner.slots[slot.index()].reply = reply;
        inner.in_flight.remove(bit);
        inner.replied.insert(bit);
        Ok(())
    }

    /// 取回结果并释放槽位
    pub fn take_reply(&self, slot: SlotId) -> Result<i32, MailboxError> {
        let slot = slot.checked()?;
        let mut inner = self.inner.lock();
        inner.hal()?;
        let bit = SlotMask::of(slot);
        if !inner.replied.contains(bit) {
            return Err(MailboxError::BadSlotState);
        }
        let reply = inner.slots[slot.index()].reply;
        inner.slots[slot.index()] = Slot::EMPTY;
        inner.replied.remove(bit);
        inner.empty.insert(bit);
        Ok(reply)
    }

    /// 空闲槽位位图
    pub fn empty_mask(&self) -> SlotMask {
        self.inner.lock().empty
    }

    /// 待处理位图
    pub fn pending_mask(&self) -> SlotMask {
        self.inner.lock().pending
    }

    /// 处理中位图
    pub fn in_flight_mask(&self) -> SlotMask {
        self.inner.lock().in_flight
    }

    /// 已回复位图
    pub fn replied_mask(&self) -> SlotMask {
        self.inner.lock().replied
    }
}

impl Default for MailboxQueue {
    fn default() -> Self {
        Self::new()
    }
}
