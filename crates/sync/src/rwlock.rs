//! 读写锁
//!
//! 基于 `lock_api` 的自旋读写锁。写锁只应在初始化阶段使用；
//! 读锁可在中断上下文中获取。本锁不屏蔽中断。

use core::{
    hint,
    sync::atomic::{AtomicUsize, Ordering},
};

use lock_api::{GuardSend, RawRwLock};

const WRITER: usize = 1 << (usize::BITS - 1);

/// 自旋读写锁的原始实现
pub struct RawRwSpinLock {
    state: AtomicUsize,
}

// SAFETY: 写者独占 WRITER 位，读者计数只在 WRITER 位清零时增加
unsafe impl RawRwLock for RawRwSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = RawRwSpinLock {
        state: AtomicUsize::new(0),
    };

    type GuardMarker = GuardSend;

    fn lock_shared(&self) {
        while !self.try_lock_shared() {
            hint::spin_loop();
        }
    }

    fn try_lock_shared(&self) -> bool {
        let state = self.state.load(Ordering::Relaxed);
        state & WRITER == 0
            && self
                .state
                .compare_exchange_weak(state, state + 1, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
    }

    unsafe fn unlock_shared(&self) {
        self.state.fetch_sub(1, Ordering::Release);
    }

    fn lock_exclusive(&self) {
        while !self.try_lock_exclusive() {
            hint::spin_loop();
        }
    }

    fn try_lock_exclusive(&self) -> bool {
        self.state
            .compare_exchange(0, WRITER, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock_exclusive(&self) {
        self.state.store(0, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        self.state.load(Ordering::Relaxed) != 0
    }
}

/// 自旋读写锁
pub type RwLock<T> = lock_api::RwLock<RawRwSpinLock, T>;
/// 读保护器
pub type RwLockReadGuard<'a, T> = lock_api::RwLockReadGuard<'a, RawRwSpinLock, T>;
/// 写保护器
pub type RwLockWriteGuard<'a, T> = lock_api::RwLockWriteGuard<'a, RawRwSpinLock, T>;

/// 在 const 上下文中创建读写锁，用于 `static`
pub const fn const_rwlock<T>(data: T) -> RwLock<T> {
    RwLock::const_new(<RawRwSpinLock as RawRwLock>::INIT, data)
}
