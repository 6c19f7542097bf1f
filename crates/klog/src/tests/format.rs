use super::*;
use crate::{MAX_LOG_MESSAGE_LENGTH, format_log_entry};

#[test]
fn test_message_truncation() {
    let log = LogCore::with_levels(LogLevel::Debug, LogLevel::Warning);

    let long_msg = "a".repeat(300);
    test_log!(log, LogLevel::Info, "{}", long_msg);

    let entry = log.read().unwrap();
    assert_eq!(entry.message().len(), MAX_LOG_MESSAGE_LENGTH);
}

#[test]
fn test_truncation_keeps_utf8_boundary() {
    let log = LogCore::with_levels(LogLevel::Debug, LogLevel::Warning);

    // 三字节字符，128 不是 3 的倍数
    let long_msg = "安".repeat(100);
    test_log!(log, LogLevel::Info, "{}", long_msg);

    let entry = log.read().unwrap();
    assert_eq!(entry.message().len(), 126);
    assert!(entry.message().chars().all(|c| c == '安'));
}

#[test]
fn test_empty_and_utf8_messages() {
    let log = LogCore::with_levels(LogLevel::Debug, LogLevel::Warning);
    test_log!(log, LogLevel::Info, "");
    test_log!(log, LogLevel::Info, "你好，世界！");

    assert_eq!(log.read().unwrap().message(), "");
    assert_eq!(log.read().unwrap().message(), "你好，世界！");
}

#[test]
fn test_format_layout() {
    let log = LogCore::new();
    test_log!(log, LogLevel::Error, "boom");

    let entry = log.read().unwrap();
    let mut out = String::new();
    format_log_entry(&mut out, &entry).unwrap();
    assert_eq!(out, "\x1b[31m[ERR] [           0] [C0/T  0] boom\x1b[0m");
    assert_eq!(entry.formatted_len(), out.len());
}

#[test]
fn test_unread_bytes_track_formatted_length() {
    let log = LogCore::with_levels(LogLevel::Debug, LogLevel::Emergency);
    assert_eq!(log.unread_bytes(), 0);

    test_log!(log, LogLevel::Info, "A");
    test_log!(log, LogLevel::Info, "This is a much longer message");
    let total = log.unread_bytes();

    let first = log.read().unwrap();
    let mut formatted = String::new();
    format_log_entry(&mut formatted, &first).unwrap();
    assert_eq!(log.unread_bytes(), total - formatted.len());

    log.read().unwrap();
    assert_eq!(log.unread_bytes(), 0);
}
