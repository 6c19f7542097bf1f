//! Integration tests for the public klog API: macros, global registration and the
//! `log` facade bridge.
//!
//! All tests share the global buffer, so each one takes `SERIAL` first.

use std::sync::{Mutex, MutexGuard, Once};

use klog::{LogContextProvider, LogLevel, LogOutput, pr_debug, pr_emerg, pr_err, pr_info, pr_warn};

static INIT: Once = Once::new();
static SERIAL: Mutex<()> = Mutex::new(());
static OUTPUT_BUF: Mutex<String> = Mutex::new(String::new());

struct TestOutput;

impl LogOutput for TestOutput {
    fn write_str(&self, s: &str) {
        OUTPUT_BUF.lock().unwrap().push_str(s);
    }
}

struct TestContextProvider;

impl LogContextProvider for TestContextProvider {
    fn core_id(&self) -> usize {
        1
    }

    fn thread_id(&self) -> u32 {
        42
    }

    fn timestamp(&self) -> usize {
        123456
    }
}

static TEST_OUTPUT: TestOutput = TestOutput;
static TEST_PROVIDER: TestContextProvider = TestContextProvider;

fn setup() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    INIT.call_once(|| {
        unsafe {
            klog::register_log_output(&TEST_OUTPUT);
            klog::register_context_provider(&TEST_PROVIDER);
        }
        klog::init_log_facade(log::LevelFilter::Debug).unwrap();
    });
    while klog::read_log().is_some() {}
    take_output();
    guard
}

fn take_output() -> String {
    std::mem::take(&mut *OUTPUT_BUF.lock().unwrap())
}

#[test]
fn test_pr_info_buffered_and_printed() {
    let _g = setup();

    pr_info!("hello {}", 1);

    assert_eq!(klog::log_len(), 1);
    let entry = klog::read_log().unwrap();
    assert_eq!(entry.level(), LogLevel::Info);
    assert_eq!(entry.message(), "hello 1");
    assert!(take_output().contains("hello 1\x1b[0m\n"));
}

#[test]
fn test_context_provider_applied() {
    let _g = setup();

    pr_warn!("ctx");

    let entry = klog::read_log().unwrap();
    assert_eq!(entry.core_id(), 1);
    assert_eq!(entry.thread_id(), 42);
    assert_eq!(entry.timestamp(), 123456);
    assert!(take_output().contains("[      123456] [C1/T 42] ctx"));
}

#[test]
fn test_pr_debug_filtered_by_default() {
    let _g = setup();

    pr_debug!("should not be logged {}", unreachable_arg());

    assert_eq!(klog::log_len(), 0);
    assert_eq!(take_output(), "");
}

fn unreachable_arg() -> u32 {
    panic!("filtered macro evaluated its arguments")
}

#[test]
fn test_console_level_threshold() {
    let _g = setup();

    klog::set_console_level(LogLevel::Error);
    pr_info!("quiet");
    pr_err!("loud");
    klog::set_console_level(klog::DEFAULT_CONSOLE_LEVEL);

    let out = take_output();
    assert!(!out.contains("quiet"));
    assert!(out.contains("loud"));
    assert_eq!(klog::log_len(), 2);
}

#[test]
fn test_log_facade_lands_in_buffer() {
    let _g = setup();

    log::warn!(target: "irq", "bind rejected");
    log::debug!(target: "irq", "debug is below the global level");

    assert_eq!(klog::log_len(), 1);
    let entry = klog::read_log().unwrap();
    assert_eq!(entry.level(), LogLevel::Warning);
    assert_eq!(entry.message(), "irq: bind rejected");
}

#[test]
fn test_emergency_print_bypasses_buffer() {
    let _g = setup();

    klog::emergency_print(format_args!("halting: {}", "unrouted"));
    pr_emerg!("buffered emergency");

    assert_eq!(klog::log_len(), 1);
    let out = take_output();
    assert!(out.contains("[EMERG]"));
    assert!(out.contains("halting: unrouted"));
}
