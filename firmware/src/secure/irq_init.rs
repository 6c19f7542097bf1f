//! 安全外设的中断初始化入口
//!
//! 每个外设一个 `<name>_irq_init(owner, info)`，由分区加载流程按清单调用。
//! 共用同一条线的外设只是同一张表项的不同名字，第二次绑定会得到 `Busy`。
//! 以线命名的入口（`clock_power_irq_init`、`serialN_irq_init`）绑定该线上任一启用的外设。
//!
//! 安全启动时必须成功的绑定走 [`bind_required`]，失败即停机。

use irq::{
    HalStatus, IntcAdapter, InterruptSource, IrqError, IrqLine, IrqLoadInfo, IrqTable,
    PartitionHandle,
};

use super::IRQ_TABLE;
use crate::halt::{FailStop, fail_stop};

/// 在给定的注册表和控制器上初始化一个外设的中断
pub fn init_peripheral_in(
    table: &IrqTable,
    intc: &IntcAdapter<'_>,
    source: InterruptSource,
    owner: PartitionHandle,
    info: &'static IrqLoadInfo,
) -> HalStatus {
    let status = HalStatus::from_result(table.bind(intc, source, owner, info));
    if status != HalStatus::Success {
        log::warn!("{} irq init for {}: {:?}", source, owner, status);
    }
    status
}

/// 在全局注册表上初始化一个外设的中断
pub fn init_peripheral(
    source: InterruptSource,
    owner: PartitionHandle,
    info: &'static IrqLoadInfo,
) -> HalStatus {
    init_peripheral_in(&IRQ_TABLE, &IntcAdapter::global(), source, owner, info)
}

/// 在给定的注册表和控制器上按线初始化中断
///
/// 取该线上第一个启用的外设去绑定；线上没有任何外设交给安全侧时返回 `InvalidInput`。
pub fn init_line_in(
    table: &IrqTable,
    intc: &IntcAdapter<'_>,
    line: IrqLine,
    owner: PartitionHandle,
    info: &'static IrqLoadInfo,
) -> HalStatus {
    let config = table.config();
    match InterruptSource::ALL
        .iter()
        .copied()
        .find(|source| source.line() == line && config.is_enabled(*source))
    {
        Some(source) => init_peripheral_in(table, intc, source, owner, info),
        None => {
            log::warn!("{} irq init for {}: no secure peripheral on line", line, owner);
            HalStatus::InvalidInput
        }
    }
}

/// 在全局注册表上按线初始化中断
pub fn init_line(line: IrqLine, owner: PartitionHandle, info: &'static IrqLoadInfo) -> HalStatus {
    init_line_in(&IRQ_TABLE, &IntcAdapter::global(), line, owner, info)
}

/// 安全启动时必须成功的一项绑定
#[derive(Debug, Clone, Copy)]
pub struct RequiredIrq {
    /// 外设
    pub source: InterruptSource,
    /// 所属分区
    pub owner: PartitionHandle,
    /// 分区清单中的描述
    pub info: &'static IrqLoadInfo,
}

/// 依次绑定 `required`，遇到第一个失败即返回停机原因
///
/// 之前已成功的绑定保持不变；调用方不应继续启动。
pub fn bind_required_in(
    table: &IrqTable,
    intc: &IntcAdapter<'_>,
    required: &[RequiredIrq],
) -> Result<(), FailStop> {
    for irq in required {
        table
            .bind(intc, irq.source, irq.owner, irq.info)
            .map_err(|e| FailStop::IrqInit(irq.source, e))?;
    }
    log::info!("secure irq: {} required bindings in place", required.len());
    Ok(())
}

/// 在全局注册表上绑定 `required`，任何一项失败都停机
pub fn bind_required(required: &[RequiredIrq]) {
    if let Err(reason) = bind_required_in(&IRQ_TABLE, &IntcAdapter::global(), required) {
        fail_stop(reason)
    }
}

/// 按清单中的外设名初始化
///
/// 名字无法识别时返回 `InvalidInput`。
pub fn init_from_manifest(
    name: &str,
    owner: PartitionHandle,
    info: &'static IrqLoadInfo,
) -> HalStatus {
    match name.parse::<InterruptSource>() {
        Ok(source) => init_peripheral(source, owner, info),
        Err(e) => {
            log::warn!("irq init: unknown peripheral {:?}", name);
            IrqError::to_hal_status(&e)
        }
    }
}

macro_rules! irq_init_fns {
    ($($fn_name:ident => $source:ident),* $(,)?) => {
        $(
            #[doc = concat!("初始化 `", stringify!($source), "` 的中断")]
            pub fn $fn_name(owner: PartitionHandle, info: &'static IrqLoadInfo) -> HalStatus {
                init_peripheral(InterruptSource::$source, owner, info)
            }
        )*
    };
}

irq_init_fns! {
    fpu_irq_init => Fpu,
    clock_irq_init => Clock,
    power_irq_init => Power,
    spim0_irq_init => Spim0,
    spis0_irq_init => Spis0,
    twim0_irq_init => Twim0,
    twis0_irq_init => Twis0,
    uarte0_irq_init => Uarte0,
    spim1_irq_init => Spim1,
    spis1_irq_init => Spis1,
    twim1_irq_init => Twim1,
    twis1_irq_init => Twis1,
    uarte1_irq_init => Uarte1,
    spim2_irq_init => Spim2,
    spis2_irq_init => Spis2,
    twim2_irq_init => Twim2,
    twis2_irq_init => Twis2,
    uarte2_irq_init => Uarte2,
    spim3_irq_init => Spim3,
    spis3_irq_init => Spis3,
    twim3_irq_init => Twim3,
    twis3_irq_init => Twis3,
    uarte3_irq_init => Uarte3,
    gpiote0_irq_init => Gpiote0,
    saadc_irq_init => Saadc,
    timer0_irq_init => Timer0,
    timer1_irq_init => Timer1,
    timer2_irq_init => Timer2,
    rtc0_irq_init => Rtc0,
    rtc1_irq_init => Rtc1,
    wdt_irq_init => Wdt,
    egu0_irq_init => Egu0,
    egu1_irq_init => Egu1,
    egu2_irq_init => Egu2,
    egu3_irq_init => Egu3,
    egu4_irq_init => Egu4,
    egu5_irq_init => Egu5,
    pwm0_irq_init => Pwm0,
    pwm1_irq_init => Pwm1,
    pwm2_irq_init => Pwm2,
    pwm3_irq_init => Pwm3,
    pdm_irq_init => Pdm,
    ipc_irq_init => Ipc,
    i2s_irq_init => I2s,
    ff_test_uart_irq_init => FfTestUart,
}

macro_rules! irq_line_init_fns {
    ($($fn_name:ident => $line:ident),* $(,)?) => {
        $(
            #[doc = concat!("按线初始化 `", stringify!($line), "` 的中断，线上任一外设启用即可")]
            pub fn $fn_name(owner: PartitionHandle, info: &'static IrqLoadInfo) -> HalStatus {
                init_line(IrqLine::$line, owner, info)
            }
        )*
    };
}

irq_line_init_fns! {
    clock_power_irq_init => ClockPower,
    serial0_irq_init => Serial0,
    serial1_irq_init => Serial1,
    serial2_irq_init => Serial2,
    serial3_irq_init => Serial3,
}
