// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

use super::Builder;
use crate::capabilities::OnChipMemory;

/// Allwinner A64.
///
/// SRAM A2 is present, but as an ARMv8 SoC its secure monitor is TF-A in DRAM rather than an ARMv7
/// PSCI monitor with a configured secure base, so nothing is reserved.
pub struct Sun50iA64Builder;

impl Sun50iA64Builder {
    pub const PLAT_NAME: &str = "sun50i-a64";

    const SRAM_A2_BASE: u64 = 0x4_4000;
    const SRAM_A2_SIZE: u64 = 64 * 1024;
}

impl Builder for Sun50iA64Builder {
    fn sram_a2(&self) -> Option<OnChipMemory> {
        Some(OnChipMemory::new(Self::SRAM_A2_BASE, Self::SRAM_A2_SIZE))
    }
}
