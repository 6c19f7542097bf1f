//! 无锁日志环形缓冲区
//!
//! 多生产者、单消费者。写者先用 CAS 预留一个序号，写入槽位后再以 Release 发布该槽位的序号；
//! 读者只读取已发布的槽位，复制出来后才推进读指针，因此写者不会覆盖正在被读取的槽位。
//!
//! 缓冲区满时丢弃**新**日志并计数，已缓冲的日志不会被覆盖。

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::config::GLOBAL_LOG_BUFFER_SIZE;
use crate::entry::LogEntry;

/// 按缓存行对齐，避免读写指针伪共享
#[repr(align(64))]
struct CachePadded<T>(T);

struct Slot {
    /// 已发布条目的序号 + 1；0 表示从未写入
    seq: AtomicUsize,
    entry: UnsafeCell<LogEntry>,
}

impl Slot {
    const fn new() -> Self {
        Self {
            seq: AtomicUsize::new(0),
            entry: UnsafeCell::new(LogEntry::EMPTY),
        }
    }
}

/// 日志环形缓冲区
pub struct GlobalLogBuffer {
    slots: [Slot; GLOBAL_LOG_BUFFER_SIZE],
    writer: CachePadded<AtomicUsize>,
    reader: CachePadded<AtomicUsize>,
    unread_bytes: AtomicUsize,
    dropped: AtomicUsize,
}

// SAFETY: 槽位内容只在预留到该序号的写者或读者持有时访问
unsafe impl Sync for GlobalLogBuffer {}

impl GlobalLogBuffer {
    /// 创建空缓冲区
    pub const fn new() -> Self {
        Self {
            slots: [const { Slot::new() }; GLOBAL_LOG_BUFFER_SIZE],
            writer: CachePadded(AtomicUsize::new(0)),
            reader: CachePadded(AtomicUsize::new(0)),
            unread_bytes: AtomicUsize::new(0),
            dropped: AtomicUsize::new(0),
        }
    }

    /// 写入一条日志，缓冲区满时丢弃并返回 `false`
    pub fn write(&self, entry: &LogEntry) -> bool {
        let mut pos = self.writer.0.load(Ordering::Relaxed);
        loop {
            let read = self.reader.0.load(Ordering::Acquire);
            if pos.wrapping_sub(read) >= GLOBAL_LOG_BUFFER_SIZE {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            match self.writer.0.compare_exchange_weak(
                pos,
                pos.wrapping_add(1),
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => pos = current,
            }
        }

        let slot = &self.slots[pos % GLOBAL_LOG_BUFFER_SIZE];
        // SAFETY: 序号 pos 由本写者独占，读者在 seq 发布之前不会访问
        unsafe { *slot.entry.get() = *entry };
        self.unread_bytes
            .fetch_add(entry.formatted_len(), Ordering::Relaxed);
        slot.seq.store(pos.wrapping_add(1), Ordering::Release);
        true
    }

    /// 读取并移除最早的一条日志
    pub fn read(&self) -> Option<LogEntry> {
        let pos = self.reader.0.load(Ordering::Relaxed);
        let entry = self.load(pos)?;
        self.reader.0.store(pos.wrapping_add(1), Ordering::Release);
        self.unread_bytes
            .fetch_sub(entry.formatted_len(), Ordering::Relaxed);
        Some(entry)
    }

    /// 按绝对序号读取一条日志，不移动读指针
    ///
    /// 序号必须落在 `[reader_index, writer_index)` 内。
    pub fn peek(&self, index: usize) -> Option<LogEntry> {
        let read = self.reader.0.load(Ordering::Acquire);
        if index.wrapping_sub(read) >= self.len() {
            return None;
        }
        self.load(index)
    }

    fn load(&self, pos: usize) -> Option<LogEntry> {
        let slot = &self.slots[pos % GLOBAL_LOG_BUFFER_SIZE];
        if slot.seq.load(Ordering::Acquire) != pos.wrapping_add(1) {
            return None;
        }
        // SAFETY: seq 已发布，且读指针尚未越过 pos，写者不会复用该槽位
        Some(unsafe { *slot.entry.get() })
    }

    /// 读指针（下一条待读日志的序号）
    pub fn reader_index(&self) -> usize {
        self.reader.0.load(Ordering::Acquire)
    }

    /// 写指针（下一条日志将得到的序号）
    pub fn writer_index(&self) -> usize {
        self.writer.0.load(Ordering::Acquire)
    }

    /// 未读条目数
    pub fn len(&self) -> usize {
        self.writer_index().wrapping_sub(self.reader_index())
    }

    /// 是否没有未读条目
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 未读日志格式化后的总字节数
    pub fn unread_bytes(&self) -> usize {
        self.unread_bytes.load(Ordering::Relaxed)
    }

    /// 因缓冲区满而丢弃的条目数
    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}
