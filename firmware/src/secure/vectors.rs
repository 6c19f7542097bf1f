//! 向量表入口
//!
//! 每条物理中断线一个入口，名字与 nRF9160 启动代码中的向量表一致。
//! 入口总是存在；线未绑定时触发会走 fail-stop，而不是被静默忽略。

use irq::IrqLine;

irq::irq_vectors! {
    table = crate::secure::IRQ_TABLE,
    unrouted = crate::halt::unrouted_interrupt;
    FPU_IRQHandler => Fpu,
    CLOCK_POWER_IRQHandler => ClockPower,
    UARTE0_SPIM0_SPIS0_TWIM0_TWIS0_IRQHandler => Serial0,
    UARTE1_SPIM1_SPIS1_TWIM1_TWIS1_IRQHandler => Serial1,
    UARTE2_SPIM2_SPIS2_TWIM2_TWIS2_IRQHandler => Serial2,
    UARTE3_SPIM3_SPIS3_TWIM3_TWIS3_IRQHandler => Serial3,
    GPIOTE0_IRQHandler => Gpiote0,
    SAADC_IRQHandler => Saadc,
    TIMER0_IRQHandler => Timer0,
    TIMER1_IRQHandler => Timer1,
    TIMER2_IRQHandler => Timer2,
    RTC0_IRQHandler => Rtc0,
    RTC1_IRQHandler => Rtc1,
    WDT_IRQHandler => Wdt,
    EGU0_IRQHandler => Egu0,
    EGU1_IRQHandler => Egu1,
    EGU2_IRQHandler => Egu2,
    EGU3_IRQHandler => Egu3,
    EGU4_IRQHandler => Egu4,
    EGU5_IRQHandler => Egu5,
    PWM0_IRQHandler => Pwm0,
    PWM1_IRQHandler => Pwm1,
    PWM2_IRQHandler => Pwm2,
    PWM3_IRQHandler => Pwm3,
    PDM_IRQHandler => Pdm,
    I2S_IRQHandler => I2s,
    IPC_IRQHandler => Ipc,
}

/// 入口函数类型
pub type Handler = extern "C" fn();

/// 所有入口，按中断线排列，供启动代码填充向量表
pub static HANDLERS: [(IrqLine, Handler); IrqLine::COUNT] = [
    (IrqLine::ClockPower, CLOCK_POWER_IRQHandler),
    (IrqLine::Serial0, UARTE0_SPIM0_SPIS0_TWIM0_TWIS0_IRQHandler),
    (IrqLine::Serial1, UARTE1_SPIM1_SPIS1_TWIM1_TWIS1_IRQHandler),
    (IrqLine::Serial2, UARTE2_SPIM2_SPIS2_TWIM2_TWIS2_IRQHandler),
    (IrqLine::Serial3, UARTE3_SPIM3_SPIS3_TWIM3_TWIS3_IRQHandler),
    (IrqLine::Gpiote0, GPIOTE0_IRQHandler),
    (IrqLine::Saadc, SAADC_IRQHandler),
    (IrqLine::Timer0, TIMER0_IRQHandler),
    (IrqLine::Timer1, TIMER1_IRQHandler),
    (IrqLine::Timer2, TIMER2_IRQHandler),
    (IrqLine::Rtc0, RTC0_IRQHandler),
    (IrqLine::Rtc1, RTC1_IRQHandler),
    (IrqLine::Wdt, WDT_IRQHandler),
    (IrqLine::Egu0, EGU0_IRQHandler),
    (IrqLine::Egu1, EGU1_IRQHandler),
    (IrqLine::Egu2, EGU2_IRQHandler),
    (IrqLine::Egu3, EGU3_IRQHandler),
    (IrqLine::Egu4, EGU4_IRQHandler),
    (IrqLine::Egu5, EGU5_IRQHandler),
    (IrqLine::Pwm0, PWM0_IRQHandler),
    (IrqLine::Pwm1, PWM1_IRQHandler),
    (IrqLine::Pwm2, PWM2_IRQHandler),
    (IrqLine::Pwm3, PWM3_IRQHandler),
    (IrqLine::Pdm, PDM_IRQHandler),
    (IrqLine::I2s, I2S_IRQHandler),
    (IrqLine::Ipc, IPC_IRQHandler),
    (IrqLine::Fpu, FPU_IRQHandler),
];
