use irq::{
    HalStatus, HandlerContext, IntcAdapter, InterruptSource, IrqError, IrqLine, IrqLoadInfo,
    IrqTable, PartitionHandle, SecureConfig, TargetState,
};

use super::leak_nvic;
use crate::halt::FailStop;
use crate::secure::{
    RequiredIrq, bind_required_in, init_from_manifest, init_line_in, init_peripheral_in,
};

static TIMER0_INFO: IrqLoadInfo = IrqLoadInfo::slih(15, 1, 1 << 4);
static UARTE0_INFO: IrqLoadInfo = IrqLoadInfo::slih(8, 2, 1 << 5);
static GPIOTE0_INFO: IrqLoadInfo = IrqLoadInfo::slih(13, 3, 1 << 6);
static CLOCK_POWER_INFO: IrqLoadInfo = IrqLoadInfo::slih(IrqLine::ClockPower.irqn(), 4, 1 << 2);
static SERIAL2_INFO: IrqLoadInfo = IrqLoadInfo::slih(IrqLine::Serial2.irqn(), 2, 1 << 3);

const P1: PartitionHandle = PartitionHandle::from_raw(1);
const P2: PartitionHandle = PartitionHandle::from_raw(2);
const P3: PartitionHandle = PartitionHandle::from_raw(3);

fn table() -> IrqTable {
    IrqTable::new(SecureConfig::from_sources(&[
        InterruptSource::Timer0,
        InterruptSource::Uarte0,
        InterruptSource::Gpiote0,
    ]))
}

#[test]
fn test_three_peripherals_bind_independently() {
    let nvic = leak_nvic();
    let intc = IntcAdapter::new(nvic);
    let table = table();

    assert_eq!(
        init_peripheral_in(&table, &intc, InterruptSource::Timer0, P1, &TIMER0_INFO),
        HalStatus::Success
    );
    assert_eq!(
        init_peripheral_in(&table, &intc, InterruptSource::Uarte0, P2, &UARTE0_INFO),
        HalStatus::Success
    );
    assert_eq!(
        init_peripheral_in(&table, &intc, InterruptSource::Gpiote0, P3, &GPIOTE0_INFO),
        HalStatus::Success
    );
    assert_eq!(table.bound_count(), 3);

    let timer0 = table.context(InterruptSource::Timer0).unwrap();
    assert_eq!(timer0.owner, P1);
    assert!(core::ptr::eq(timer0.descriptor, &TIMER0_INFO));
    let uarte0 = table.context(InterruptSource::Uarte0).unwrap();
    assert_eq!(uarte0.owner, P2);
    assert!(core::ptr::eq(uarte0.descriptor, &UARTE0_INFO));
    let gpiote0 = table.context(InterruptSource::Gpiote0).unwrap();
    assert_eq!(gpiote0.owner, P3);
    assert!(core::ptr::eq(gpiote0.descriptor, &GPIOTE0_INFO));

    // 第二次绑定 TIMER0 被拒绝，TIMER1 不受影响
    assert_eq!(
        init_peripheral_in(&table, &intc, InterruptSource::Timer0, P2, &UARTE0_INFO),
        HalStatus::Busy
    );
    assert_eq!(table.context(InterruptSource::Timer0).unwrap().owner, P1);
    assert!(!table.is_bound(InterruptSource::Timer1));
    assert!(table.context_for_line(IrqLine::Timer1).is_none());
}

#[test]
fn test_bound_lines_are_armed_secure_and_disabled() {
    let nvic = leak_nvic();
    let intc = IntcAdapter::new(nvic);
    let table = table();
    nvic.0.force_enable(IrqLine::Timer0.irqn());

    init_peripheral_in(&table, &intc, InterruptSource::Timer0, P1, &TIMER0_INFO);

    let state = intc.state(IrqLine::Timer0);
    assert!(!state.enabled);
    assert_eq!(state.target, TargetState::Secure);
    assert_eq!(state.priority, irq::DEFAULT_IRQ_PRIORITY);
    // 未绑定的线保持复位状态
    assert_eq!(intc.state(IrqLine::Timer1).target, TargetState::NonSecure);
}

#[test]
fn test_disabled_peripheral_is_invalid_input() {
    let nvic = leak_nvic();
    let intc = IntcAdapter::new(nvic);
    let table = table();

    assert_eq!(
        init_peripheral_in(&table, &intc, InterruptSource::Timer1, P1, &TIMER0_INFO),
        HalStatus::InvalidInput
    );
    assert_eq!(table.bound_count(), 0);
    assert_eq!(nvic.0.write_count(), 0);
}

#[test]
fn test_shared_line_second_name_is_busy() {
    let nvic = leak_nvic();
    let intc = IntcAdapter::new(nvic);
    let table = IrqTable::new(SecureConfig::from_sources(&[
        InterruptSource::Uarte0,
        InterruptSource::Spim0,
    ]));

    assert_eq!(
        init_peripheral_in(&table, &intc, InterruptSource::Uarte0, P1, &UARTE0_INFO),
        HalStatus::Success
    );
    assert_eq!(
        init_peripheral_in(&table, &intc, InterruptSource::Spim0, P2, &UARTE0_INFO),
        HalStatus::Busy
    );
    assert_eq!(table.context(InterruptSource::Spim0).unwrap().owner, P1);
}

#[test]
fn test_unknown_manifest_name() {
    assert_eq!(init_from_manifest("TIMER9", P1, &TIMER0_INFO), HalStatus::InvalidInput);
    assert_eq!(init_from_manifest("", P1, &TIMER0_INFO), HalStatus::InvalidInput);
}

#[test]
fn test_descriptor_for_wrong_line_is_invalid_input() {
    let nvic = leak_nvic();
    let intc = IntcAdapter::new(nvic);
    let table = table();

    // TIMER0 借用了 UARTE0 的描述
    assert_eq!(
        init_peripheral_in(&table, &intc, InterruptSource::Timer0, P1, &UARTE0_INFO),
        HalStatus::InvalidInput
    );
    assert!(!table.is_bound(InterruptSource::Timer0));
    assert_eq!(nvic.0.write_count(), 0);

    assert_eq!(
        init_peripheral_in(&table, &intc, InterruptSource::Timer0, P1, &TIMER0_INFO),
        HalStatus::Success
    );
}

#[test]
fn test_clock_power_line_binds_with_power_only() {
    let nvic = leak_nvic();
    let intc = IntcAdapter::new(nvic);
    let table = IrqTable::new(SecureConfig::from_sources(&[InterruptSource::Power]));

    assert_eq!(
        init_line_in(&table, &intc, IrqLine::ClockPower, P1, &CLOCK_POWER_INFO),
        HalStatus::Success
    );
    let expected = HandlerContext::new(P1, &CLOCK_POWER_INFO);
    assert_eq!(table.context(InterruptSource::Power), Some(expected));
    assert_eq!(table.context(InterruptSource::Clock), Some(expected));
    assert_eq!(intc.state(IrqLine::ClockPower).target, TargetState::Secure);

    assert_eq!(
        init_line_in(&table, &intc, IrqLine::ClockPower, P2, &CLOCK_POWER_INFO),
        HalStatus::Busy
    );
}

#[test]
fn test_serial_line_binds_through_any_enabled_function() {
    let nvic = leak_nvic();
    let intc = IntcAdapter::new(nvic);
    let table = IrqTable::new(SecureConfig::from_sources(&[InterruptSource::Twis2]));

    assert_eq!(
        init_line_in(&table, &intc, IrqLine::Serial2, P2, &SERIAL2_INFO),
        HalStatus::Success
    );
    assert_eq!(table.context(InterruptSource::Uarte2).unwrap().owner, P2);

    // 线上没有任何外设交给安全侧
    assert_eq!(
        init_line_in(&table, &intc, IrqLine::Serial3, P2, &SERIAL2_INFO),
        HalStatus::InvalidInput
    );
    assert!(table.context_for_line(IrqLine::Serial3).is_none());
}

#[test]
fn test_required_bindings_stop_at_first_failure() {
    let nvic = leak_nvic();
    let intc = IntcAdapter::new(nvic);
    let table = table();

    let required = [
        RequiredIrq {
            source: InterruptSource::Timer0,
            owner: P1,
            info: &TIMER0_INFO,
        },
        RequiredIrq {
            source: InterruptSource::Timer1,
            owner: P1,
            info: &TIMER0_INFO,
        },
        RequiredIrq {
            source: InterruptSource::Uarte0,
            owner: P2,
            info: &UARTE0_INFO,
        },
    ];
    assert_eq!(
        bind_required_in(&table, &intc, &required),
        Err(FailStop::IrqInit(InterruptSource::Timer1, IrqError::InvalidSource))
    );
    assert!(table.is_bound(InterruptSource::Timer0));
    assert!(!table.is_bound(InterruptSource::Uarte0));

    let reason = FailStop::IrqInit(InterruptSource::Timer1, IrqError::InvalidSource);
    assert!(std::format!("{}", reason).contains("irq init failed"));
}

#[test]
fn test_required_bindings_all_succeed() {
    let nvic = leak_nvic();
    let intc = IntcAdapter::new(nvic);
    let table = table();

    let required = [
        RequiredIrq {
            source: InterruptSource::Uarte0,
            owner: P2,
            info: &UARTE0_INFO,
        },
        RequiredIrq {
            source: InterruptSource::Gpiote0,
            owner: P3,
            info: &GPIOTE0_INFO,
        },
    ];
    assert_eq!(bind_required_in(&table, &intc, &required), Ok(()));
    assert_eq!(table.bound_count(), 2);
}
