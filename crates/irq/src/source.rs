//! 物理中断线与逻辑中断源
//!
//! [`IrqLine`] 对应 NVIC 中的一个向量（nRF9160 编号），[`InterruptSource`] 对应一个外设功能。
//! 多个外设功能可以共用一条中断线：例如串口块 n 的 SPIM/SPIS/TWIM/TWIS/UARTE
//! 共用 `SERIALn`，CLOCK 与 POWER 共用 `CLOCK_POWER`。绑定发生在线上，
//! 所以同一条线上的所有外设共享同一个 [`HandlerContext`](crate::HandlerContext)。

use core::fmt;
use core::str::FromStr;

use crate::error::IrqError;

macro_rules! irq_lines {
    ($($variant:ident = $irqn:literal => $handler:literal),* $(,)?) => {
        /// 物理中断线（一个向量表项）
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum IrqLine {
            $(
                #[doc = $handler]
                $variant,
            )*
        }

        impl IrqLine {
            /// 所有中断线，按注册表槽位顺序排列
            pub const ALL: &'static [IrqLine] = &[$(IrqLine::$variant),*];

            /// 中断线数量，即注册表容量
            pub const COUNT: usize = Self::ALL.len();

            /// NVIC 中断号
            pub const fn irqn(self) -> u32 {
                match self {
                    $(IrqLine::$variant => $irqn,)*
                }
            }

            /// 向量表中的入口符号名
            pub const fn handler_name(self) -> &'static str {
                match self {
                    $(IrqLine::$variant => $handler,)*
                }
            }

            /// 由 NVIC 中断号反查中断线
            pub const fn from_irqn(irqn: u32) -> Option<IrqLine> {
                match irqn {
                    $($irqn => Some(IrqLine::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

irq_lines! {
    ClockPower = 5 => "CLOCK_POWER_IRQHandler",
    Serial0 = 8 => "UARTE0_SPIM0_SPIS0_TWIM0_TWIS0_IRQHandler",
    Serial1 = 9 => "UARTE1_SPIM1_SPIS1_TWIM1_TWIS1_IRQHandler",
    Serial2 = 10 => "UARTE2_SPIM2_SPIS2_TWIM2_TWIS2_IRQHandler",
    Serial3 = 11 => "UARTE3_SPIM3_SPIS3_TWIM3_TWIS3_IRQHandler",
    Gpiote0 = 13 => "GPIOTE0_IRQHandler",
    Saadc = 14 => "SAADC_IRQHandler",
    Timer0 = 15 => "TIMER0_IRQHandler",
    Timer1 = 16 => "TIMER1_IRQHandler",
    Timer2 = 17 => "TIMER2_IRQHandler",
    Rtc0 = 20 => "RTC0_IRQHandler",
    Rtc1 = 21 => "RTC1_IRQHandler",
    Wdt = 24 => "WDT_IRQHandler",
    Egu0 = 27 => "EGU0_IRQHandler",
    Egu1 = 28 => "EGU1_IRQHandler",
    Egu2 = 29 => "EGU2_IRQHandler",
    Egu3 = 30 => "EGU3_IRQHandler",
    Egu4 = 31 => "EGU4_IRQHandler",
    Egu5 = 32 => "EGU5_IRQHandler",
    Pwm0 = 33 => "PWM0_IRQHandler",
    Pwm1 = 34 => "PWM1_IRQHandler",
    Pwm2 = 35 => "PWM2_IRQHandler",
    Pwm3 = 36 => "PWM3_IRQHandler",
    Pdm = 38 => "PDM_IRQHandler",
    I2s = 40 => "I2S_IRQHandler",
    Ipc = 42 => "IPC_IRQHandler",
    Fpu = 44 => "FPU_IRQHandler",
}

impl IrqLine {
    /// 注册表中的槽位下标
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for IrqLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(irq {})", self.handler_name(), self.irqn())
    }
}

macro_rules! interrupt_sources {
    ($($variant:ident => $line:ident, $name:literal);* $(;)?) => {
        /// 逻辑中断源（外设功能），编译期枚举，运行时不会创建或销毁
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum InterruptSource {
            $(
                #[doc = $name]
                $variant,
            )*
        }

        impl InterruptSource {
            /// 所有中断源
            pub const ALL: &'static [InterruptSource] = &[$(InterruptSource::$variant),*];

            /// 中断源数量
            pub const COUNT: usize = Self::ALL.len();

            /// 该外设触发中断所经过的物理中断线
            pub const fn line(self) -> IrqLine {
                match self {
                    $(InterruptSource::$variant => IrqLine::$line,)*
                }
            }

            /// 清单（manifest）中使用的外设名
            pub const fn name(self) -> &'static str {
                match self {
                    $(InterruptSource::$variant => $name,)*
                }
            }
        }

        impl FromStr for InterruptSource {
            type Err = IrqError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(InterruptSource::$variant),)*
                    _ => Err(IrqError::InvalidSource),
                }
            }
        }
    };
}

interrupt_sources! {
    Fpu => Fpu, "FPU";
    Clock => ClockPower, "CLOCK";
    Power => ClockPower, "POWER";
    Spim0 => Serial0, "SPIM0";
    Spis0 => Serial0, "SPIS0";
    Twim0 => Serial0, "TWIM0";
    Twis0 => Serial0, "TWIS0";
    Uarte0 => Serial0, "UARTE0";
    Spim1 => Serial1, "SPIM1";
    Spis1 => Serial1, "SPIS1";
    Twim1 => Serial1, "TWIM1";
    Twis1 => Serial1, "TWIS1";
    Uarte1 => Serial1, "UARTE1";
    Spim2 => Serial2, "SPIM2";
    Spis2 => Serial2, "SPIS2";
    Twim2 => Serial2, "TWIM2";
    Twis2 => Serial2, "TWIS2";
    Uarte2 => Serial2, "UARTE2";
    Spim3 => Serial3, "SPIM3";
    Spis3 => Serial3, "SPIS3";
    Twim3 => Serial3, "TWIM3";
    Twis3 => Serial3, "TWIS3";
    Uarte3 => Serial3, "UARTE3";
    Gpiote0 => Gpiote0, "GPIOTE0";
    Saadc => Saadc, "SAADC";
    Timer0 => Timer0, "TIMER0";
    Timer1 => Timer1, "TIMER1";
    Timer2 => Timer2, "TIMER2";
    Rtc0 => Rtc0, "RTC0";
    Rtc1 => Rtc1, "RTC1";
    Wdt => Wdt, "WDT";
    Egu0 => Egu0, "EGU0";
    Egu1 => Egu1, "EGU1";
    Egu2 => Egu2, "EGU2";
    Egu3 => Egu3, "EGU3";
    Egu4 => Egu4, "EGU4";
    Egu5 => Egu5, "EGU5";
    Pwm0 => Pwm0, "PWM0";
    Pwm1 => Pwm1, "PWM1";
    Pwm2 => Pwm2, "PWM2";
    Pwm3 => Pwm3, "PWM3";
    Pdm => Pdm, "PDM";
    Ipc => Ipc, "IPC";
    I2s => I2s, "I2S";
    // PSA API 测试套件的 UART 借用 EGU5 的中断线
    FfTestUart => Egu5, "FF_TEST_UART";
}

impl InterruptSource {
    /// 在 [`SecureConfig`](crate::SecureConfig) 表中的下标
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for InterruptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
