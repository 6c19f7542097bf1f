// Host tests for the platform layer.
//
// NVIC and arch ops come from `test_support`; the non-secure collaborators are
// simulated by `Board`, which records every call it receives in order.

use std::boxed::Box;
use std::string::{String, ToString};
use std::sync::{Mutex, MutexGuard, Once};
use std::vec::Vec;

use irq::NvicOps;
use multicore::{MailboxError, MailboxHal};
use test_support::mock::arch::MockArchOps;
use test_support::mock::nvic::MockNvic;

use crate::ns::{DriverError, NsInterface, Rtos, RtosError, ThreadAttr, ThreadFunc, ThreadId};
use crate::ns::{Usart, UsartMode};

mod config;
mod halt;
mod irq_init;

/// NVIC backed by the host mock
pub(crate) struct HostNvic(pub MockNvic);

impl NvicOps for HostNvic {
    fn set_priority(&self, irqn: u32, priority: u8) {
        self.0.set_priority(irqn, priority)
    }

    fn priority(&self, irqn: u32) -> u8 {
        self.0.priority(irqn)
    }

    fn enable(&self, irqn: u32) {
        self.0.enable(irqn)
    }

    fn disable(&self, irqn: u32) {
        self.0.disable(irqn)
    }

    fn is_enabled(&self, irqn: u32) -> bool {
        self.0.is_enabled(irqn)
    }

    fn clear_target_state(&self, irqn: u32) {
        self.0.clear_target_state(irqn)
    }

    fn targets_non_secure(&self, irqn: u32) -> bool {
        self.0.targets_non_secure(irqn)
    }
}

struct HostArch(MockArchOps);

impl sync::ArchOps for HostArch {
    unsafe fn read_and_disable_interrupts(&self) -> usize {
        unsafe { self.0.read_and_disable_interrupts() }
    }

    unsafe fn restore_interrupts(&self, flags: usize) {
        unsafe { self.0.restore_interrupts(flags) }
    }

    fn flags_enabled(&self, flags: usize) -> bool {
        self.0.flags_enabled(flags)
    }

    fn core_id(&self) -> usize {
        self.0.core_id()
    }

    fn core_count(&self) -> usize {
        self.0.core_count()
    }
}

static HOST_ARCH: HostArch = HostArch(MockArchOps::new());
static ARCH_INIT: Once = Once::new();

fn init_arch() {
    ARCH_INIT.call_once(|| unsafe { sync::register_arch_ops(&HOST_ARCH) });
}

fn leak_nvic() -> &'static HostNvic {
    Box::leak(Box::new(HostNvic(MockNvic::new())))
}

/// Serializes tests that touch the stdio and kernel registrations.
static PLATFORM_LOCK: Mutex<()> = Mutex::new(());

fn platform_lock() -> MutexGuard<'static, ()> {
    PLATFORM_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Simulated board: USART, RTOS, NS interface and mailbox hardware in one.
#[derive(Default)]
struct Board {
    calls: Mutex<Vec<String>>,
    sent: Mutex<Vec<u8>>,
    fail_usart_init: bool,
    fail_kernel_init: bool,
    fail_thread: bool,
    fail_mailbox: bool,
    thread: Option<u32>,
    ticks: usize,
}

impl Board {
    fn leak(self) -> &'static Board {
        Box::leak(Box::new(self))
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn sent(&self) -> String {
        String::from_utf8(self.sent.lock().unwrap().clone()).unwrap()
    }
}

impl Usart for Board {
    fn initialize(&self) -> Result<(), DriverError> {
        self.record("usart.initialize");
        if self.fail_usart_init {
            Err(DriverError::Generic)
        } else {
            Ok(())
        }
    }

    fn configure(&self, mode: UsartMode, baudrate: u32) -> Result<(), DriverError> {
        self.record(std::format!("usart.configure({:?}, {})", mode, baudrate));
        Ok(())
    }

    fn send(&self, data: &[u8]) -> Result<(), DriverError> {
        self.sent.lock().unwrap().extend_from_slice(data);
        Ok(())
    }
}

impl Rtos for Board {
    fn kernel_initialize(&self) -> Result<(), RtosError> {
        self.record("kernel.initialize");
        if self.fail_kernel_init {
            Err(RtosError::Error)
        } else {
            Ok(())
        }
    }

    fn create_thread(
        &self,
        entry: ThreadFunc,
        arg: usize,
        attr: &ThreadAttr,
    ) -> Result<ThreadId, RtosError> {
        self.record(std::format!(
            "kernel.create_thread({}, {}, {})",
            attr.name,
            attr.stack_size,
            arg
        ));
        if self.fail_thread {
            return Err(RtosError::NoMemory);
        }
        entry(arg);
        Ok(ThreadId(1))
    }

    fn kernel_start(&self) -> RtosError {
        self.record("kernel.start");
        RtosError::Error
    }

    fn current_thread(&self) -> Option<ThreadId> {
        self.thread.map(ThreadId)
    }

    fn tick_count(&self) -> usize {
        self.ticks
    }
}

impl NsInterface for Board {
    fn init(&self) -> Result<(), RtosError> {
        self.record("ns_interface.init");
        Ok(())
    }
}

impl MailboxHal for Board {
    fn init(&self, _queue_addr: usize) -> Result<(), MailboxError> {
        self.record("mailbox.init");
        if self.fail_mailbox {
            Err(MailboxError::HalInit)
        } else {
            Ok(())
        }
    }

    fn notify_peer(&self) {
        self.record("mailbox.notify");
    }
}

fn strings(calls: &[&str]) -> Vec<String> {
    calls.iter().map(|c| c.to_string()).collect()
}
