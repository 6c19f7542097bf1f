// Unit tests for klog, run on the host against local `LogCore` instances.

use std::format;
use std::string::String;

use crate::{LogCore, LogLevel};

/// Logs into a local `LogCore`, mirroring what the `pr_*` macros do with the global one.
macro_rules! test_log {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger.log($level, format_args!($($arg)*))
    };
}

mod format;
