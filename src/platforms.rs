// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! The supported Allwinner SoCs and the inputs they provide to the region layout.

mod sun50i_a64;
mod sun8i_a23;
mod sun8i_h3;

use crate::{
    capabilities::{OnChipMemory, PlatformConfig, SecureMonitor},
    layout::{self, Layout, LayoutError},
};
use sun8i_a23::Sun8iA23Builder;
use sun8i_h3::Sun8iH3Builder;
use sun50i_a64::Sun50iA64Builder;
use thiserror::Error;

/// The names of all supported platforms.
pub const PLATFORMS: [&str; 3] = [
    Sun8iA23Builder::PLAT_NAME,
    Sun8iH3Builder::PLAT_NAME,
    Sun50iA64Builder::PLAT_NAME,
];

/// Provides the memory configuration of a platform.
pub trait Builder {
    /// The SRAM A2 window, if the SoC has one.
    ///
    /// If there is no SRAM A2 then this should return `None`, and no firmware regions will be
    /// reserved.
    fn sram_a2(&self) -> Option<OnChipMemory> {
        None
    }

    /// Base address and maximum size of the secure monitor, if one is configured.
    ///
    /// Only ARMv7 SoCs which run the PSCI secure monitor from SRAM have one.
    fn secure_monitor(&self) -> Option<SecureMonitor> {
        None
    }

    /// Returns the layout inputs of the platform.
    fn config(&self) -> PlatformConfig {
        PlatformConfig::new(self.sram_a2(), self.secure_monitor())
    }

    /// Computes the reserved firmware regions of the platform.
    fn resolve(&self) -> Result<Layout, LayoutError> {
        layout::resolve(&self.config())
    }
}

/// Returns the builder for the platform with the given name.
pub fn get_builder(platform: &str) -> Result<&'static dyn Builder, UnknownPlatform<'_>> {
    match platform {
        Sun8iA23Builder::PLAT_NAME => Ok(&Sun8iA23Builder),
        Sun8iH3Builder::PLAT_NAME => Ok(&Sun8iH3Builder),
        Sun50iA64Builder::PLAT_NAME => Ok(&Sun50iA64Builder),
        _ => Err(UnknownPlatform(platform)),
    }
}

/// The requested platform isn't supported.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("Unexpected platform name {0:?}. Supported platforms: {platforms:?}", platforms = PLATFORMS)]
pub struct UnknownPlatform<'a>(pub &'a str);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{capabilities::Capabilities, region::RegionId};

    #[test]
    fn all_platforms_resolve() {
        for name in PLATFORMS {
            let builder = get_builder(name).unwrap();
            assert!(builder.resolve().is_ok(), "{name} failed to resolve");
        }
    }

    #[test]
    fn inert_platforms() {
        let a23 = get_builder("sun8i-a23").unwrap();
        assert_eq!(a23.config().capabilities(), Capabilities::empty());
        assert!(a23.resolve().unwrap().is_empty());

        let a64 = get_builder("sun50i-a64").unwrap();
        assert_eq!(a64.config().capabilities(), Capabilities::ON_CHIP_MEMORY);
        assert!(a64.resolve().unwrap().is_empty());
    }

    #[test]
    fn h3_regions() {
        let layout = get_builder("sun8i-h3").unwrap().resolve().unwrap();
        let resume = layout.get(RegionId::Resume).unwrap();
        let scp = layout.get(RegionId::Scp).unwrap();
        assert_eq!((resume.start, resume.size), (0x4_6000, 1024));
        assert_eq!((scp.start, scp.size), (0x4_6400, 16 * 1024));
    }

    #[test]
    fn unknown_platform() {
        let error = get_builder("sun4i-a10").err().unwrap();
        assert_eq!(error, UnknownPlatform("sun4i-a10"));
        assert_eq!(
            error.to_string(),
            "Unexpected platform name \"sun4i-a10\". Supported platforms: \
             [\"sun8i-a23\", \"sun8i-h3\", \"sun50i-a64\"]"
        );
    }
}
