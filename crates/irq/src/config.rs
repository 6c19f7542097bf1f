//! 平台配置
//!
//! 常量与按外设启用的安全中断表。板级变体之间的差异全部体现在 [`SecureConfig`] 这张表里，
//! 由平台 crate 在编译期根据 cargo feature 构造。

use crate::source::{InterruptSource, IrqLine};

/// NVIC 实现的优先级位数（nRF9160 为 3）
pub const NVIC_PRIO_BITS: u32 = 3;

/// 安全中断的默认优先级
pub const DEFAULT_IRQ_PRIORITY: u8 = 1 << (NVIC_PRIO_BITS - 2);

/// 外设 → 是否由安全侧处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecureConfig {
    enabled: [bool; InterruptSource::COUNT],
}

impl SecureConfig {
    /// 不启用任何外设
    pub const fn empty() -> Self {
        Self {
            enabled: [false; InterruptSource::COUNT],
        }
    }

    /// 启用所有外设
    pub const fn all() -> Self {
        Self {
            enabled: [true; InterruptSource::COUNT],
        }
    }

    /// 由外设列表构造
    pub const fn from_sources(sources: &[InterruptSource]) -> Self {
        let mut config = Self::empty();
        let mut i = 0;
        while i < sources.len() {
            config.enabled[sources[i].index()] = true;
            i += 1;
        }
        config
    }

    /// 返回额外启用（或关闭）了 `source` 的新表
    pub const fn with(mut self, source: InterruptSource, enabled: bool) -> Self {
        self.enabled[source.index()] = enabled;
        self
    }

    /// 外设是否启用
    #[inline]
    pub const fn is_enabled(&self, source: InterruptSource) -> bool {
        self.enabled[source.index()]
    }

    /// 是否有任一映射到 `line` 的外设被启用
    pub fn line_enabled(&self, line: IrqLine) -> bool {
        self.enabled_sources().any(|s| s.line() == line)
    }

    /// 所有启用的外设
    pub fn enabled_sources(&self) -> impl Iterator<Item = InterruptSource> + '_ {
        InterruptSource::ALL
            .iter()
            .copied()
            .filter(|s| self.is_enabled(*s))
    }

    /// 启用的外设数量
    pub fn enabled_count(&self) -> usize {
        self.enabled.iter().filter(|e| **e).count()
    }
}

impl Default for SecureConfig {
    fn default() -> Self {
        Self::empty()
    }
}
