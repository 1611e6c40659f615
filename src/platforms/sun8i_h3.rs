// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

use super::Builder;
use crate::capabilities::{OnChipMemory, SecureMonitor};

/// Allwinner H3, which runs the PSCI secure monitor from SRAM A2.
pub struct Sun8iH3Builder;

impl Sun8iH3Builder {
    pub const PLAT_NAME: &str = "sun8i-h3";

    const SRAM_A2_BASE: u64 = 0x4_0000;
    const SRAM_A2_SIZE: u64 = 48 * 1024;
    // The first 16 KiB of SRAM A2 are left to the SCP exception vectors.
    const SECURE_BASE: u64 = Self::SRAM_A2_BASE + 0x4000;
    const SECURE_MAX_SIZE: u64 = 0x2000;
}

impl Builder for Sun8iH3Builder {
    fn sram_a2(&self) -> Option<OnChipMemory> {
        Some(OnChipMemory::new(Self::SRAM_A2_BASE, Self::SRAM_A2_SIZE))
    }

    fn secure_monitor(&self) -> Option<SecureMonitor> {
        Some(SecureMonitor::new(Self::SECURE_BASE, Self::SECURE_MAX_SIZE))
    }
}
