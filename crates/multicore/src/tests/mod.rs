// Unit tests for the boot handshake and the mailbox queue, run on the host.
//
// Peer and mailbox HAL are simulated by `test_support::mock::cross_core`.

use std::boxed::Box;
use std::sync::Once;

use test_support::mock::arch::MockArchOps;
use test_support::mock::cross_core::{MockMailboxHal, MockPeer};

use crate::{MailboxError, MailboxHal, PeerSignal, PeerStatus, PeerSyncError};

mod boot;

impl PeerSignal for MockPeer {
    fn poll(&self) -> Result<PeerStatus, PeerSyncError> {
        match MockPeer::poll(self) {
            (_, true) => Err(PeerSyncError::PeerFault),
            (true, false) => Ok(PeerStatus::Ready),
            (false, false) => Ok(PeerStatus::Pending),
        }
    }
}

impl MailboxHal for MockMailboxHal {
    fn init(&self, _queue_addr: usize) -> Result<(), MailboxError> {
        if MockMailboxHal::init(self) {
            Ok(())
        } else {
            Err(MailboxError::HalInit)
        }
    }

    fn notify_peer(&self) {
        MockMailboxHal::notify(self)
    }
}

/// `sync` 的 ArchOps 由宿主 Mock 提供
struct HostArch(MockArchOps);

impl sync::ArchOps for HostArch {
    unsafe fn read_and_disable_interrupts(&self) -> usize {
        unsafe { self.0.read_and_disable_interrupts() }
    }

    unsafe fn restore_interrupts(&self, flags: usize) {
        unsafe { self.0.restore_interrupts(flags) }
    }

    fn flags_enabled(&self, flags: usize) -> bool {
        self.0.flags_enabled(flags)
    }

    fn core_id(&self) -> usize {
        self.0.core_id()
    }

    fn core_count(&self) -> usize {
        self.0.core_count()
    }
}

static HOST_ARCH: HostArch = HostArch(MockArchOps::new());
static INIT: Once = Once::new();

fn init_arch() {
    INIT.call_once(|| unsafe { sync::register_arch_ops(&HOST_ARCH) });
}

fn leak_hal(hal: MockMailboxHal) -> &'static MockMailboxHal {
    Box::leak(Box::new(hal))
}
