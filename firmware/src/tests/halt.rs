use std::string::ToString;

use irq::{InterruptSource, IrqError, IrqLine};
use multicore::{BootError, MailboxError, PeerSyncError};

use crate::halt::FailStop;

#[test]
fn test_fail_stop_from_boot_error() {
    let reason = FailStop::from(BootError::QueueInitFailure(MailboxError::HalInit));
    assert_eq!(reason, FailStop::Boot(BootError::QueueInitFailure(MailboxError::HalInit)));
}

#[test]
fn test_fail_stop_display() {
    let reason = FailStop::Boot(BootError::PeerSyncFailure(PeerSyncError::PeerFault));
    assert!(reason.to_string().starts_with("error sync'ing with secure core"));

    assert_eq!(
        FailStop::Unrouted(IrqLine::Timer1).to_string(),
        "unrouted interrupt on TIMER1_IRQHandler(irq 16)"
    );
    assert_eq!(
        FailStop::IrqInit(InterruptSource::Spim0, IrqError::AlreadyBound).to_string(),
        "SPIM0 irq init failed: interrupt line already bound"
    );
    assert_eq!(FailStop::SchedulerReturned.to_string(), "RTOS scheduler returned");
}
