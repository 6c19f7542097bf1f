//! 构建期配置
//!
//! 每个外设的 cargo feature 在这里汇总成一张 [`SecureConfig`] 表，
//! 其余代码只查表，不再出现按外设划分的条件编译。

use irq::{InterruptSource, SecureConfig};

macro_rules! secure_config {
    ($($source:ident => $feature:literal),* $(,)?) => {
        /// 由 cargo feature 生成的安全外设启用表
        pub const SECURE_CONFIG: SecureConfig = SecureConfig::empty()
            $(.with(InterruptSource::$source, cfg!(feature = $feature)))*;
    };
}

secure_config! {
    Fpu => "fpu",
    Clock => "clock",
    Power => "power",
    Spim0 => "spim0",
    Spis0 => "spis0",
    Twim0 => "twim0",
    Twis0 => "twis0",
    Uarte0 => "uarte0",
    Spim1 => "spim1",
    Spis1 => "spis1",
    Twim1 => "twim1",
    Twis1 => "twis1",
    Uarte1 => "uarte1",
    Spim2 => "spim2",
    Spis2 => "spis2",
    Twim2 => "twim2",
    Twis2 => "twis2",
    Uarte2 => "uarte2",
    Spim3 => "spim3",
    Spis3 => "spis3",
    Twim3 => "twim3",
    Twis3 => "twis3",
    Uarte3 => "uarte3",
    Gpiote0 => "gpiote0",
    Saadc => "saadc",
    Timer0 => "timer0",
    Timer1 => "timer1",
    Timer2 => "timer2",
    Rtc0 => "rtc0",
    Rtc1 => "rtc1",
    Wdt => "wdt",
    Egu0 => "egu0",
    Egu1 => "egu1",
    Egu2 => "egu2",
    Egu3 => "egu3",
    Egu4 => "egu4",
    Egu5 => "egu5",
    Pwm0 => "pwm0",
    Pwm1 => "pwm1",
    Pwm2 => "pwm2",
    Pwm3 => "pwm3",
    Pdm => "pdm",
    Ipc => "ipc",
    I2s => "i2s",
    FfTestUart => "psa-api-test-ipc",
}

/// 是否为双核拓扑
pub const MULTI_CORE_TOPOLOGY: bool = cfg!(feature = "multi-core");

/// 是否启动非安全侧回归测试线程
pub const TEST_FRAMEWORK_NS: bool = cfg!(feature = "test-framework-ns");

/// 是否启动 PSA API 测试线程
pub const PSA_API_TEST_NS: bool = cfg!(feature = "psa-api-test-ns");

/// 标准输出串口波特率
pub const DEFAULT_UART_BAUDRATE: u32 = 115_200;

/// 测试线程栈大小
pub const TEST_THREAD_STACK_SIZE: usize = 3 * 1024;

/// 测试线程名
pub const TEST_THREAD_NAME: &str = "test_thread";

/// 分区表容量
pub const MAX_PARTITIONS: usize = 8;
