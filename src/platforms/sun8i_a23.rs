// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

use super::Builder;

/// Allwinner A23. It has no SRAM A2, so nothing is reserved.
pub struct Sun8iA23Builder;

impl Sun8iA23Builder {
    pub const PLAT_NAME: &str = "sun8i-a23";
}

impl Builder for Sun8iA23Builder {}
