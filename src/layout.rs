// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Placement of the firmware regions stacked after the secure monitor in on-chip memory.
//!
//! On platforms with both an SRAM A2 window and a configured secure monitor base, the memory right
//! after the secure monitor holds, in order:
//!
//! | Region  | Start                                   | Size      |
//! |---------|-----------------------------------------|-----------|
//! | Resume  | secure monitor base + max size          | 1 KiB     |
//! | SCP     | resume start + resume size              | 16 KiB    |
//!
//! On any other platform nothing is reserved.

use crate::{
    capabilities::{OnChipMemory, PlatformConfig},
    region::{Region, RegionId, RegionRecord},
};
use arrayvec::ArrayVec;
use core::fmt::{self, Display, Formatter, Write};
use log::{debug, info};
use thiserror::Error;

/// Size of the resume scratch area in bytes.
pub const RESUME_SIZE: u64 = 1024;

/// Maximum size of the SCP firmware in bytes.
pub const SCP_MAX_SIZE: u64 = 16 * 1024;

/// The number of regions placed after the secure monitor.
pub const TRAILING_REGION_COUNT: usize = 2;

/// A region which must be placed immediately after the one before it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegionRequirement {
    /// The region to place.
    pub id: RegionId,
    /// Size in bytes to reserve for it.
    pub size: u64,
}

/// Regions placed after the secure monitor, lowest address first.
pub const SECURE_MONITOR_TRAILER: [RegionRequirement; TRAILING_REGION_COUNT] = [
    RegionRequirement {
        id: RegionId::Resume,
        size: RESUME_SIZE,
    },
    RegionRequirement {
        id: RegionId::Scp,
        size: SCP_MAX_SIZE,
    },
];

/// Places each of the given regions directly after the previous one, starting at `anchor`.
pub fn stack_regions<const N: usize>(
    anchor: u64,
    requirements: &[RegionRequirement; N],
) -> Result<ArrayVec<Region, N>, LayoutError> {
    let mut regions = ArrayVec::new();
    requirements
        .iter()
        .try_fold(anchor, |start, requirement| -> Result<u64, LayoutError> {
            let region = Region::new(requirement.id, start, requirement.size);
            let end = region.end().ok_or(LayoutError::AddressOverflow {
                region: requirement.id,
            })?;
            regions.push(region);
            Ok(end)
        })?;
    Ok(regions)
}

/// Computes the reserved firmware regions for the given platform.
///
/// Returns an empty layout if the platform has no on-chip memory or no secure monitor base. This is
/// expected on many platforms and is not an error.
pub fn resolve(config: &PlatformConfig) -> Result<Layout, LayoutError> {
    let (Some(memory), Some(monitor)) = (config.on_chip_memory(), config.secure_monitor()) else {
        info!(
            "Capabilities {:?} don't allow reserving firmware regions",
            config.capabilities()
        );
        return Ok(Layout::empty());
    };

    let secure_monitor = Region::new(RegionId::SecureMonitor, monitor.base, monitor.max_size);
    let anchor = secure_monitor.end().ok_or(LayoutError::AddressOverflow {
        region: RegionId::SecureMonitor,
    })?;
    let regions = stack_regions(anchor, &SECURE_MONITOR_TRAILER)?;

    for region in &regions {
        check_fits(region, &memory)?;
        debug!("Reserved {region}");
    }

    Ok(Layout {
        secure_monitor: Some(secure_monitor),
        regions,
    })
}

fn check_fits(region: &Region, memory: &OnChipMemory) -> Result<(), LayoutError> {
    // The caller has already checked that the end doesn't overflow.
    let end = region.start + region.size;
    if memory.contains(region.start, end) {
        Ok(())
    } else {
        Err(LayoutError::OutOfOnChipMemory {
            region: *region,
            memory: *memory,
        })
    }
}

/// The reserved firmware regions of a platform.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Layout {
    secure_monitor: Option<Region>,
    regions: ArrayVec<Region, TRAILING_REGION_COUNT>,
}

impl Layout {
    /// Returns a layout with no regions reserved.
    pub const fn empty() -> Self {
        Self {
            secure_monitor: None,
            regions: ArrayVec::new_const(),
        }
    }

    /// Returns whether no regions were reserved.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns the reserved regions, lowest address first.
    ///
    /// This doesn't include the secure monitor, whose placement was an input.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Returns the region with the given id, if it was reserved.
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        if id == RegionId::SecureMonitor {
            self.secure_monitor.as_ref()
        } else {
            self.regions.iter().find(|region| region.id == id)
        }
    }

    /// Returns the secure monitor region the reserved regions were stacked after.
    pub fn secure_monitor(&self) -> Option<&Region> {
        self.get(RegionId::SecureMonitor)
    }

    /// Returns the resume scratch area.
    pub fn resume(&self) -> Option<&Region> {
        self.get(RegionId::Resume)
    }

    /// Returns the SCP firmware area.
    pub fn scp(&self) -> Option<&Region> {
        self.get(RegionId::Scp)
    }

    /// Returns the fixed-layout records of the reserved regions, lowest address first.
    pub fn records(&self) -> impl Iterator<Item = RegionRecord> + '_ {
        self.regions.iter().map(Region::to_record)
    }

    /// Returns the linker symbols describing the reserved regions, as `(name, value)` pairs.
    pub fn linker_symbols(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.regions.iter().flat_map(|region| {
            let (base_symbol, size_symbol) = region.id.linker_symbols();
            [(base_symbol, region.start), (size_symbol, region.size)]
        })
    }

    /// Writes a `cargo:rustc-link-arg` line defining each linker symbol, for use from a build
    /// script.
    pub fn write_linker_args(&self, out: &mut impl Write) -> fmt::Result {
        for (name, value) in self.linker_symbols() {
            writeln!(out, "cargo:rustc-link-arg=--defsym={name}={value:#x}")?;
        }
        Ok(())
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no reserved regions");
        }
        for (i, region) in self.secure_monitor.iter().chain(&self.regions).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{region}")?;
        }
        Ok(())
    }
}

/// Error computing the reserved region layout.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum LayoutError {
    /// The end of a region is beyond the 64-bit address space.
    #[error("End of {region} region overflows the address space")]
    AddressOverflow {
        /// The region whose end overflows.
        region: RegionId,
    },
    /// A region doesn't fit inside the on-chip memory window.
    #[error("{region} doesn't fit in on-chip memory at {memory}")]
    OutOfOnChipMemory {
        /// The offending region.
        region: Region,
        /// The on-chip memory window it should be inside.
        memory: OnChipMemory,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::SecureMonitor;
    use zerocopy::IntoBytes;

    const SRAM_A2: OnChipMemory = OnChipMemory::new(0x4_0000, 0xc000);

    fn config(
        on_chip_memory: bool,
        secure_base: bool,
        base: u64,
        max_size: u64,
    ) -> PlatformConfig {
        PlatformConfig::new(
            on_chip_memory.then_some(SRAM_A2),
            secure_base.then_some(SecureMonitor::new(base, max_size)),
        )
    }

    #[test]
    fn scenario_h3() {
        let layout = resolve(&config(true, true, 0x4_4000, 0x2000)).unwrap();
        assert_eq!(
            layout.regions(),
            [
                Region::new(RegionId::Resume, 0x4_6000, 1024),
                Region::new(RegionId::Scp, 0x4_6400, 16_384),
            ]
        );
        assert_eq!(
            layout.secure_monitor(),
            Some(&Region::new(RegionId::SecureMonitor, 0x4_4000, 0x2000))
        );
    }

    #[test]
    fn inert_without_capabilities() {
        for (on_chip_memory, secure_base) in [(false, false), (false, true), (true, false)] {
            for (base, max_size) in [(0, 0), (0x4_4000, 0x2000), (u64::MAX, u64::MAX)] {
                let layout =
                    resolve(&config(on_chip_memory, secure_base, base, max_size)).unwrap();
                assert!(layout.is_empty());
                assert!(layout.regions().is_empty());
                assert_eq!(layout.secure_monitor(), None);
                assert_eq!(layout.linker_symbols().count(), 0);
            }
        }
    }

    #[test]
    fn contiguous_and_fixed_size() {
        for (base, max_size) in [
            (0x4_0000, 0),
            (0x4_0000, 0x1000),
            (0x4_4000, 0x2000),
            (0x4_1234, 0x0abc),
            (0x4_0000, 0xc000 - RESUME_SIZE - SCP_MAX_SIZE),
        ] {
            let layout = resolve(&config(true, true, base, max_size)).unwrap();
            let resume = layout.resume().unwrap();
            let scp = layout.scp().unwrap();
            assert_eq!(resume.start, base + max_size);
            assert_eq!(resume.size, 1024);
            assert_eq!(scp.start, resume.start + resume.size);
            assert_eq!(scp.size, 16_384);
        }
    }

    #[test]
    fn deterministic() {
        let input = config(true, true, 0x4_4000, 0x2000);
        let first = resolve(&input).unwrap();
        let second = resolve(&input).unwrap();
        assert_eq!(first, second);
        assert!(
            first
                .records()
                .zip(second.records())
                .all(|(a, b)| a.as_bytes() == b.as_bytes())
        );
    }

    #[test]
    fn fills_on_chip_memory_exactly() {
        // SCP ends exactly at the end of SRAM A2.
        let layout = resolve(&config(true, true, 0x4_7000, 0x0c00)).unwrap();
        assert_eq!(layout.scp().unwrap().end(), Some(0x4_c000));
    }

    #[test]
    fn beyond_on_chip_memory() {
        assert_eq!(
            resolve(&config(true, true, 0x4_7000, 0x0c01)),
            Err(LayoutError::OutOfOnChipMemory {
                region: Region::new(RegionId::Scp, 0x4_8001, SCP_MAX_SIZE),
                memory: SRAM_A2,
            })
        );
        // Secure monitor below the window, so the resume area starts outside it.
        assert_eq!(
            resolve(&config(true, true, 0x2_0000, 0x1000)),
            Err(LayoutError::OutOfOnChipMemory {
                region: Region::new(RegionId::Resume, 0x2_1000, RESUME_SIZE),
                memory: SRAM_A2,
            })
        );
    }

    #[test]
    fn address_overflow() {
        assert_eq!(
            resolve(&config(true, true, u64::MAX, 1)),
            Err(LayoutError::AddressOverflow {
                region: RegionId::SecureMonitor
            })
        );
        assert_eq!(
            resolve(&config(true, true, u64::MAX - 0x500, 0)),
            Err(LayoutError::AddressOverflow {
                region: RegionId::Scp
            })
        );
    }

    #[test]
    fn stack_arbitrary_requirements() {
        let regions = stack_regions(
            0x1000,
            &[
                RegionRequirement {
                    id: RegionId::Scp,
                    size: 0x10,
                },
                RegionRequirement {
                    id: RegionId::Resume,
                    size: 0,
                },
                RegionRequirement {
                    id: RegionId::Scp,
                    size: 0x20,
                },
            ],
        )
        .unwrap();
        assert_eq!(
            regions.as_slice(),
            [
                Region::new(RegionId::Scp, 0x1000, 0x10),
                Region::new(RegionId::Resume, 0x1010, 0),
                Region::new(RegionId::Scp, 0x1010, 0x20),
            ]
        );
    }

    #[test]
    fn linker_args() {
        let layout = resolve(&config(true, true, 0x4_4000, 0x2000)).unwrap();
        let mut args = String::new();
        layout.write_linker_args(&mut args).unwrap();
        assert_eq!(
            args,
            "cargo:rustc-link-arg=--defsym=SUNXI_RESUME_BASE=0x46000\n\
             cargo:rustc-link-arg=--defsym=SUNXI_RESUME_SIZE=0x400\n\
             cargo:rustc-link-arg=--defsym=SUNXI_SCP_BASE=0x46400\n\
             cargo:rustc-link-arg=--defsym=SUNXI_SCP_MAX_SIZE=0x4000\n"
        );
    }

    #[test]
    fn display() {
        assert_eq!(Layout::empty().to_string(), "no reserved regions");
        assert_eq!(
            resolve(&config(true, true, 0x4_4000, 0x2000))
                .unwrap()
                .to_string(),
            "secure monitor region at 0x44000, 0x2000 bytes\n\
             resume region at 0x46000, 0x400 bytes\n\
             SCP region at 0x46400, 0x4000 bytes"
        );
    }
}
