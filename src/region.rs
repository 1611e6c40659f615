// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Named firmware regions and their fixed-layout records.

use core::fmt::{self, Display, Formatter};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout,
    little_endian::{U32, U64},
};

/// Identifies one of the firmware regions reserved in on-chip memory.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum RegionId {
    /// The secure monitor (PSCI) image. Its placement is supplied by the platform, not derived.
    SecureMonitor = 0,
    /// Scratch area used by the secure monitor when resuming from a low-power state.
    Resume = 1,
    /// Firmware for the system control processor.
    Scp = 2,
}

impl RegionId {
    /// Returns the names of the linker symbols holding the base address and size of the region.
    pub const fn linker_symbols(self) -> (&'static str, &'static str) {
        match self {
            Self::SecureMonitor => ("ARMV7_SECURE_BASE", "ARMV7_SECURE_MAX_SIZE"),
            Self::Resume => ("SUNXI_RESUME_BASE", "SUNXI_RESUME_SIZE"),
            Self::Scp => ("SUNXI_SCP_BASE", "SUNXI_SCP_MAX_SIZE"),
        }
    }
}

impl Display for RegionId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::SecureMonitor => "secure monitor",
            Self::Resume => "resume",
            Self::Scp => "SCP",
        })
    }
}

/// A named, contiguous range of physical memory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Region {
    /// Which region this is.
    pub id: RegionId,
    /// Physical address of the first byte of the region.
    pub start: u64,
    /// Size of the region in bytes.
    pub size: u64,
}

impl Region {
    /// Creates a new region descriptor.
    pub const fn new(id: RegionId, start: u64, size: u64) -> Self {
        Self { id, start, size }
    }

    /// Returns the address just past the end of the region, or `None` if that overflows.
    pub const fn end(&self) -> Option<u64> {
        self.start.checked_add(self.size)
    }

    /// Returns the fixed-layout record for this region.
    pub fn to_record(&self) -> RegionRecord {
        RegionRecord {
            id: U32::new(self.id.into()),
            reserved: U32::new(0),
            start: U64::new(self.start),
            size: U64::new(self.size),
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{} region at {:#x}, {:#x} bytes",
            self.id, self.start, self.size
        )
    }
}

/// A region descriptor as handed to image layout tooling: 24 bytes, little-endian.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct RegionRecord {
    id: U32,
    reserved: U32,
    start: U64,
    size: U64,
}

impl RegionRecord {
    /// Returns the raw region id.
    pub fn id(&self) -> u32 {
        self.id.get()
    }

    /// Returns the start address of the region.
    pub fn start(&self) -> u64 {
        self.start.get()
    }

    /// Returns the size of the region in bytes.
    pub fn size(&self) -> u64 {
        self.size.get()
    }
}

impl TryFrom<RegionRecord> for Region {
    type Error = RecordError;

    fn try_from(record: RegionRecord) -> Result<Self, RecordError> {
        let id = RegionId::try_from(record.id())
            .map_err(|e| RecordError::UnknownRegionId(e.number))?;
        Ok(Self::new(id, record.start(), record.size()))
    }
}

/// Error decoding a [`RegionRecord`].
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum RecordError {
    /// The record carries an id which doesn't name any known region.
    #[error("Unknown region id {0}")]
    UnknownRegionId(u32),
}
