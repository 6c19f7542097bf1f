use irq::{InterruptSource, IrqLine};

use crate::config::*;

#[test]
fn test_secure_config_follows_features() {
    assert_eq!(SECURE_CONFIG.is_enabled(InterruptSource::Timer0), cfg!(feature = "timer0"));
    assert_eq!(SECURE_CONFIG.is_enabled(InterruptSource::Uarte1), cfg!(feature = "uarte1"));
    assert_eq!(
        SECURE_CONFIG.is_enabled(InterruptSource::FfTestUart),
        cfg!(feature = "psa-api-test-ipc")
    );
}

#[test]
fn test_test_uart_implies_egu5() {
    if SECURE_CONFIG.is_enabled(InterruptSource::FfTestUart) {
        assert!(SECURE_CONFIG.is_enabled(InterruptSource::Egu5));
        assert!(SECURE_CONFIG.line_enabled(IrqLine::Egu5));
    }
}

#[test]
fn test_build_constants() {
    assert_eq!(DEFAULT_UART_BAUDRATE, 115_200);
    assert_eq!(TEST_THREAD_STACK_SIZE, 3072);
    assert_eq!(TEST_THREAD_NAME, "test_thread");
    assert_eq!(MULTI_CORE_TOPOLOGY, cfg!(feature = "multi-core"));
}
