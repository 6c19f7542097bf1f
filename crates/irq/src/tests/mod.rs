// Unit tests for the interrupt registration table, run on the host.
//
// The NVIC is simulated by `test_support::mock::nvic::MockNvic`; each test owns its own
// controller and table so tests stay independent under the parallel test runner.

use std::sync::Mutex;
use std::vec::Vec;

use test_support::mock::nvic::MockNvic;

use crate::{IrqLine, IrqLoadInfo, IrqRouter, NvicOps, PartitionHandle};


impl NvicOps for MockNvic {
    fn set_priority(&self, irqn: u32, priority: u8) {
        MockNvic::set_priority(self, irqn, priority)
    }

    fn priority(&self, irqn: u32) -> u8 {
        MockNvic::priority(self, irqn)
    }

    fn enable(&self, irqn: u32) {
        MockNvic::enable(self, irqn)
    }

    fn disable(&self, irqn: u32) {
        MockNvic::disable(self, irqn)
    }

    fn is_enabled(&self, irqn: u32) -> bool {
        MockNvic::is_enabled(self, irqn)
    }

    fn clear_target_state(&self, irqn: u32) {
        MockNvic::clear_target_state(self, irqn)
    }

    fn targets_non_secure(&self, irqn: u32) -> bool {
        MockNvic::targets_non_secure(self, irqn)
    }
}

/// Records every `(line, owner, descriptor address)` handed to the router.
struct RecordingRouter {
    calls: Mutex<Vec<(IrqLine, PartitionHandle, usize)>>,
}

impl RecordingRouter {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(IrqLine, PartitionHandle, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

impl IrqRouter for RecordingRouter {
    fn route(&self, line: IrqLine, owner: PartitionHandle, descriptor: &'static IrqLoadInfo) {
        self.calls
            .lock()
            .unwrap()
            .push((line, owner, descriptor as *const IrqLoadInfo as usize));
    }
}

fn addr(info: &'static IrqLoadInfo) -> usize {
    info as *const IrqLoadInfo as usize
}

static TIMER0_INFO: IrqLoadInfo = IrqLoadInfo::slih(15, 1, 1 << 4);
static TIMER1_INFO: IrqLoadInfo = IrqLoadInfo::slih(16, 1, 1 << 5);
static UARTE0_INFO: IrqLoadInfo = IrqLoadInfo::slih(8, 2, 1 << 4);
static GPIOTE0_INFO: IrqLoadInfo = IrqLoadInfo::slih(13, 3, 1 << 6);
static SPARE_INFO: IrqLoadInfo = IrqLoadInfo::slih(0, 9, 1 << 0);

/// One well-formed descriptor per line, owned by a spare partition.
static LINE_INFOS: [IrqLoadInfo; IrqLine::COUNT] = {
    let mut infos = [const { IrqLoadInfo::slih(0, 9, 1 << 0) }; IrqLine::COUNT];
    let mut i = 0;
    while i < IrqLine::COUNT {
        infos[i] = IrqLoadInfo::slih(IrqLine::ALL[i].irqn(), 9, 1 << 0);
        i += 1;
    }
    infos
};

fn line_info(line: IrqLine) -> &'static IrqLoadInfo {
    &LINE_INFOS[line.index()]
}

const OWNER_A: PartitionHandle = PartitionHandle::from_raw(1);
const OWNER_B: PartitionHandle = PartitionHandle::from_raw(2);
const OWNER_C: PartitionHandle = PartitionHandle::from_raw(3);
