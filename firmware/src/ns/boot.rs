//! 非安全 `main`
//!
//! 启动顺序固定为：
//!
//! 1. 标准输出串口
//! 2. 双核拓扑下与安全核握手并初始化邮箱队列，失败即停机
//! 3. 初始化 RTOS 内核
//! 4. 初始化 NS 接口
//! 5. 按配置创建测试线程
//! 6. 启动调度器；调度器返回即停机

use multicore::{MailboxHal, MailboxQueue, MulticoreBoot, PeerSignal};

use super::rtos::{NsInterface, Rtos, ThreadAttr, ThreadFunc};
use super::stdio::{Usart, stdio_init};
use crate::config::{PSA_API_TEST_NS, TEST_FRAMEWORK_NS, TEST_THREAD_NAME, TEST_THREAD_STACK_SIZE};
use crate::halt::{FailStop, fail_stop};

/// 双核握手用到的共享对象
#[derive(Clone, Copy)]
pub struct MultiCoreLinks {
    /// 启动状态机
    pub boot: &'static MulticoreBoot,
    /// 安全核就绪信号
    pub peer: &'static dyn PeerSignal,
    /// 非安全侧邮箱队列
    pub queue: &'static MailboxQueue,
    /// 邮箱硬件
    pub hal: &'static dyn MailboxHal,
}

/// 非安全侧的外部协作者
#[derive(Clone, Copy)]
pub struct NsPlatform {
    /// 标准输出串口
    pub stdio: &'static dyn Usart,
    /// RTOS 内核
    pub rtos: &'static dyn Rtos,
    /// NS 接口
    pub ns_interface: &'static dyn NsInterface,
    /// 双核拓扑时为 `Some`
    pub multicore: Option<MultiCoreLinks>,
}

/// 启动配置
#[derive(Debug, Clone, Copy, Default)]
pub struct NsConfig {
    /// 要创建的测试线程
    pub test_thread: Option<ThreadFunc>,
}

impl NsConfig {
    /// 按 cargo feature 选择测试线程：回归测试优先于 PSA API 测试
    pub fn from_build(test_app: ThreadFunc, psa_api_test: ThreadFunc) -> Self {
        let test_thread = if TEST_FRAMEWORK_NS {
            Some(test_app)
        } else if PSA_API_TEST_NS {
            Some(psa_api_test)
        } else {
            None
        };
        Self { test_thread }
    }
}

/// 测试线程的属性
pub const TEST_THREAD_ATTR: ThreadAttr = ThreadAttr {
    name: TEST_THREAD_NAME,
    stack_size: TEST_THREAD_STACK_SIZE,
};

/// 执行启动序列，返回停机原因
///
/// 正常情况下调度器接管后不会回到这里，所以任何返回值都是致命的。
pub fn ns_start(platform: &NsPlatform, config: &NsConfig) -> FailStop {
    stdio_init(platform.stdio);
    crate::log::set_kernel(platform.rtos);

    if let Some(links) = platform.multicore {
        if let Err(e) = links.boot.synchronize(links.peer, links.queue, links.hal) {
            return FailStop::Boot(e);
        }
    }

    if let Err(e) = platform.rtos.kernel_initialize() {
        log::error!("ns: kernel initialize failed: {}", e);
    }

    if let Err(e) = platform.ns_interface.init() {
        log::error!("ns: interface init failed: {}", e);
    }

    if let Some(entry) = config.test_thread {
        match platform.rtos.create_thread(entry, 0, &TEST_THREAD_ATTR) {
            Ok(id) => log::debug!("ns: {} created as {:?}", TEST_THREAD_NAME, id),
            Err(e) => log::error!("ns: create {} failed: {}", TEST_THREAD_NAME, e),
        }
    }

    let err = platform.rtos.kernel_start();
    log::error!("ns: scheduler returned: {}", err);
    FailStop::SchedulerReturned
}

/// 非安全侧入口，永不返回
pub fn ns_main(platform: &NsPlatform, config: &NsConfig) -> ! {
    fail_stop(ns_start(platform, config))
}
