//! 双核启动同步与非安全侧邮箱
//!
//! 在双核拓扑中，非安全核必须等安全核建立好安全边界（MPU / IDAU 配置、邮箱内存）之后才能继续运行。
//! 此 crate 提供非安全核一侧的启动协议：
//!
//! ```text
//! NotStarted --begin--> WaitingForPeer --观察到对端就绪--> Synchronized --> 初始化邮箱队列
//! ```
//!
//! # 组件
//!
//! - [`flag`] - 共享内存中的就绪握手字 [`ReadyFlag`] 与抽象 [`PeerSignal`]
//! - [`boot`] - 启动状态机 [`MulticoreBoot`]
//! - [`mailbox`] - 跨核邮箱队列 [`MailboxQueue`] 以及 HAL 原语 [`MailboxHal`]
//!
//! 所有失败都是致命的：错误被原样交还给平台的监督者，由它停机，此处不做任何重试。

#![no_std]

#[cfg(test)]
extern crate std;

pub mod boot;
pub mod config;
mod error;
pub mod flag;
pub mod mailbox;

pub use boot::{BootState, MulticoreBoot};
pub use config::{NUM_MAILBOX_QUEUE_SLOT, READY_FAULT, READY_MAGIC};
pub use error::{BootError, MailboxError, PeerSyncError};
pub use flag::{PeerSignal, PeerStatus, ReadyFlag};
pub use mailbox::{MailboxHal, MailboxMsg, MailboxQueue, SlotId, SlotMask};

#[cfg(test)]
mod tests;
