// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Platform capabilities and the placements they guard.

use bitflags::bitflags;
use core::fmt::{self, Display, Formatter};
use thiserror::Error;

bitflags! {
    /// Capabilities of a platform which the reserved region layout depends on.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Capabilities: u8 {
        /// The SoC has an on-chip SRAM window (SRAM A2) usable for firmware.
        const ON_CHIP_MEMORY = 1 << 0;
        /// A base address for the secure monitor has been configured.
        const SECURE_BASE = 1 << 1;
    }
}

/// A window of on-chip SRAM.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OnChipMemory {
    /// Physical base address of the window.
    pub base: u64,
    /// Size of the window in bytes.
    pub size: u64,
}

impl OnChipMemory {
    /// Creates a new on-chip memory window.
    pub const fn new(base: u64, size: u64) -> Self {
        Self { base, size }
    }

    /// Returns whether the range `start..end` lies entirely within the window.
    pub const fn contains(&self, start: u64, end: u64) -> bool {
        start >= self.base && end >= start && end - self.base <= self.size
    }
}

impl Display for OnChipMemory {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:#x} ({:#x} bytes)", self.base, self.size)
    }
}

/// Placement of the secure monitor image.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SecureMonitor {
    /// Physical base address of the secure monitor.
    pub base: u64,
    /// Maximum size in bytes reserved for the secure monitor.
    pub max_size: u64,
}

impl SecureMonitor {
    /// Creates a new secure monitor placement.
    pub const fn new(base: u64, max_size: u64) -> Self {
        Self { base, max_size }
    }
}

/// The platform inputs to the reserved region layout.
///
/// Each capability is present exactly when the value it guards is, so a `PlatformConfig` can never
/// claim a secure base without carrying one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PlatformConfig {
    on_chip_memory: Option<OnChipMemory>,
    secure_monitor: Option<SecureMonitor>,
}

impl PlatformConfig {
    /// Creates a configuration from the optional on-chip memory window and secure monitor
    /// placement.
    pub const fn new(
        on_chip_memory: Option<OnChipMemory>,
        secure_monitor: Option<SecureMonitor>,
    ) -> Self {
        Self {
            on_chip_memory,
            secure_monitor,
        }
    }

    /// Assembles a configuration from capability flags and the values they are meant to guard.
    ///
    /// Fails if a flag is set without its value or a value is given without its flag.
    pub fn from_parts(
        capabilities: Capabilities,
        on_chip_memory: Option<OnChipMemory>,
        secure_monitor: Option<SecureMonitor>,
    ) -> Result<Self, ConfigError> {
        match (
            capabilities.contains(Capabilities::ON_CHIP_MEMORY),
            on_chip_memory,
        ) {
            (true, None) => return Err(ConfigError::MissingOnChipMemory),
            (false, Some(memory)) => return Err(ConfigError::UnexpectedOnChipMemory(memory)),
            _ => {}
        }
        match (
            capabilities.contains(Capabilities::SECURE_BASE),
            secure_monitor,
        ) {
            (true, None) => return Err(ConfigError::MissingSecureMonitor),
            (false, Some(monitor)) => {
                return Err(ConfigError::UnexpectedSecureMonitor(monitor.base));
            }
            _ => {}
        }
        Ok(Self::new(on_chip_memory, secure_monitor))
    }

    /// Returns the capabilities this configuration provides.
    pub fn capabilities(&self) -> Capabilities {
        let mut capabilities = Capabilities::empty();
        capabilities.set(Capabilities::ON_CHIP_MEMORY, self.on_chip_memory.is_some());
        capabilities.set(Capabilities::SECURE_BASE, self.secure_monitor.is_some());
        capabilities
    }

    /// Returns the on-chip memory window, if the platform has one.
    pub fn on_chip_memory(&self) -> Option<OnChipMemory> {
        self.on_chip_memory
    }

    /// Returns the secure monitor placement, if one is configured.
    pub fn secure_monitor(&self) -> Option<SecureMonitor> {
        self.secure_monitor
    }
}

/// Error assembling a [`PlatformConfig`] from flags and values which don't agree.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// `ON_CHIP_MEMORY` is set but no on-chip memory window was given.
    #[error("On-chip memory capability set without an on-chip memory window")]
    MissingOnChipMemory,
    /// An on-chip memory window was given but `ON_CHIP_MEMORY` is not set.
    #[error("On-chip memory window {0} given without the on-chip memory capability")]
    UnexpectedOnChipMemory(OnChipMemory),
    /// `SECURE_BASE` is set but no secure monitor placement was given.
    #[error("Secure base capability set without a secure monitor base address")]
    MissingSecureMonitor,
    /// A secure monitor base address was given but `SECURE_BASE` is not set.
    #[error("Secure monitor base {0:#x} given without the secure base capability")]
    UnexpectedSecureMonitor(u64),
}
