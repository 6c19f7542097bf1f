//! 非安全核启动协议
//!
//! 协议在启动时只运行一次：
//!
//! 1. `NotStarted → WaitingForPeer`：一上电立即进入，早于其它任何初始化。
//! 2. `WaitingForPeer → Synchronized`：只在观察到安全核的就绪信号之后发生，
//!    等待是无超时的忙轮询；安全核永远不就绪时非安全核永远停在这里。
//! 3. 进入 `Synchronized` 后初始化邮箱队列。
//!
//! 握手失败或队列初始化失败时返回 [`BootError`]，由平台监督者停机。

use core::sync::atomic::{AtomicU8, Ordering};

use crate::error::BootError;
use crate::flag::{PeerSignal, PeerStatus};
use crate::mailbox::{MailboxHal, MailboxQueue};

/// 启动状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BootState {
    /// 尚未开始
    NotStarted = 0,
    /// 正在等待安全核就绪
    WaitingForPeer = 1,
    /// 已与安全核同步
    Synchronized = 2,
}

impl BootState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => BootState::NotStarted,
            1 => BootState::WaitingForPeer,
            _ => BootState::Synchronized,
        }
    }
}

/// 启动协议状态机
pub struct MulticoreBoot {
    state: AtomicU8,
}

impl MulticoreBoot {
    /// 创建处于 `NotStarted` 的状态机
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(BootState::NotStarted as u8),
        }
    }

    /// 当前状态
    pub fn state(&self) -> BootState {
        BootState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// `NotStarted → WaitingForPeer`
    ///
    /// 协议不可重入，第二次调用返回 [`BootError::Reentered`]。
    pub fn begin(&self) -> Result<(), BootError> {
        self.state
            .compare_exchange(
                BootState::NotStarted as u8,
                BootState::WaitingForPeer as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|_| BootError::Reentered)
    }

    /// 执行一次轮询
    ///
    /// 对端就绪时迁移到 `Synchronized` 并返回 `true`；已同步时直接返回 `true`，不再读取对端。
    pub fn poll(&self, peer: &dyn PeerSignal) -> Result<bool, BootError> {
        match self.state() {
            BootState::NotStarted => Err(BootError::NotStarted),
            BootState::Synchronized => Ok(true),
            BootState::WaitingForPeer => match peer.poll()? {
                PeerStatus::Pending => Ok(false),
                PeerStatus::Ready => {
                    self.state
                        .store(BootState::Synchronized as u8, Ordering::Release);
                    Ok(true)
                }
            },
        }
    }

    /// 忙等直到对端就绪，没有超时
    pub fn wait_for_peer(&self, peer: &dyn PeerSignal) -> Result<(), BootError> {
        while !self.poll(peer)? {
            core::hint::spin_loop();
        }
        Ok(())
    }

    /// 运行完整的启动协议
    pub fn synchronize(
        &self,
        peer: &dyn PeerSignal,
        queue: &MailboxQueue,
        hal: &'static dyn MailboxHal,
    ) -> Result<(), BootError> {
        self.begin()?;
        log::info!("Non-secure code running on non-secure core.");

        self.wait_for_peer(peer)
            .inspect_err(|e| log::error!("multicore: {}", e))?;
        log::debug!("multicore: synchronized with secure core");

        queue.init(hal).map_err(|e| {
            let err = BootError::from(e);
            log::error!("multicore: {}", err);
            err
        })
    }
}

impl Default for MulticoreBoot {
    fn default() -> Self {
        Self::new()
    }
}
