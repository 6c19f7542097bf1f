use super::*;
use crate::{BootError, BootState, MailboxQueue, MulticoreBoot};

const BOUNDED_POLLS: usize = 10_000;

#[test]
fn test_begin_enters_waiting_once() {
    let boot = MulticoreBoot::new();
    assert_eq!(boot.state(), BootState::NotStarted);
    boot.begin().unwrap();
    assert_eq!(boot.state(), BootState::WaitingForPeer);
    assert_eq!(boot.begin(), Err(BootError::Reentered));
    assert_eq!(boot.state(), BootState::WaitingForPeer);
}

#[test]
fn test_poll_before_begin_is_rejected() {
    let boot = MulticoreBoot::new();
    let peer = MockPeer::new(0);
    assert_eq!(boot.poll(&peer), Err(BootError::NotStarted));
    assert_eq!(peer.polls(), 0);
}

#[test]
fn test_transition_not_before_peer_ready() {
    let boot = MulticoreBoot::new();
    let peer = MockPeer::new(5);
    boot.begin().unwrap();

    for _ in 0..5 {
        assert_eq!(boot.poll(&peer), Ok(false));
        assert_eq!(boot.state(), BootState::WaitingForPeer);
    }
    assert_eq!(boot.poll(&peer), Ok(true));
    assert_eq!(boot.state(), BootState::Synchronized);

    // 已同步后不再读取对端
    assert_eq!(boot.poll(&peer), Ok(true));
    assert_eq!(peer.polls(), 6);
}

#[test]
fn test_silent_peer_makes_no_progress() {
    let boot = MulticoreBoot::new();
    let peer = MockPeer::silent();
    boot.begin().unwrap();

    for _ in 0..BOUNDED_POLLS {
        assert_eq!(boot.poll(&peer), Ok(false));
    }
    assert_eq!(boot.state(), BootState::WaitingForPeer);
    assert_eq!(peer.polls(), BOUNDED_POLLS);
}

#[test]
fn test_broken_peer_is_fatal() {
    let boot = MulticoreBoot::new();
    let peer = MockPeer::broken();
    boot.begin().unwrap();
    assert_eq!(
        boot.wait_for_peer(&peer),
        Err(BootError::PeerSyncFailure(PeerSyncError::PeerFault))
    );
    assert_eq!(boot.state(), BootState::WaitingForPeer);
}

#[test]
fn test_synchronize_initializes_queue() {
    init_arch();
    let boot = MulticoreBoot::new();
    let peer = MockPeer::new(3);
    let queue = MailboxQueue::new();
    let hal = leak_hal(MockMailboxHal::new());

    boot.synchronize(&peer, &queue, hal).unwrap();

    assert_eq!(boot.state(), BootState::Synchronized);
    assert!(queue.is_initialized());
    assert_eq!(hal.init_calls(), 1);
    assert_eq!(peer.polls(), 4);
}

#[test]
fn test_synchronize_reports_queue_failure() {
    init_arch();
    let boot = MulticoreBoot::new();
    let peer = MockPeer::new(0);
    let queue = MailboxQueue::new();
    let hal = leak_hal(MockMailboxHal::failing());

    assert_eq!(
        boot.synchronize(&peer, &queue, hal),
        Err(BootError::QueueInitFailure(MailboxError::HalInit))
    );
    assert_eq!(boot.state(), BootState::Synchronized);
    assert!(!queue.is_initialized());
}

#[test]
fn test_synchronize_does_not_touch_queue_on_peer_failure() {
    init_arch();
    let boot = MulticoreBoot::new();
    let peer = MockPeer::broken();
    let queue = MailboxQueue::new();
    let hal = leak_hal(MockMailboxHal::new());

    assert!(matches!(
        boot.synchronize(&peer, &queue, hal),
        Err(BootError::PeerSyncFailure(_))
    ));
    assert_eq!(hal.init_calls(), 0);
}

#[test]
fn test_synchronize_runs_once() {
    init_arch();
    let boot = MulticoreBoot::new();
    let peer = MockPeer::new(0);
    let queue = MailboxQueue::new();
    let hal = leak_hal(MockMailboxHal::new());

    boot.synchronize(&peer, &queue, hal).unwrap();
    assert_eq!(boot.synchronize(&peer, &queue, hal), Err(BootError::Reentered));
    assert_eq!(hal.init_calls(), 1);
}
