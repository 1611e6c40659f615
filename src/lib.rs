// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Reserved firmware regions in the on-chip SRAM of Allwinner SoCs.
//!
//! ARMv7 sunxi SoCs which run their PSCI secure monitor from SRAM A2 reserve two more areas
//! directly after it: a small scratch area used when resuming from suspend, and space for the
//! firmware of the system control processor (SCP). This crate computes where those go, at build
//! configuration time, and hands them to linker and image layout tooling.
//!
//! ```
//! use sunxi_sram_layout::{
//!     platforms::{Builder, get_builder},
//!     region::RegionId,
//! };
//!
//! let layout = get_builder("sun8i-h3").unwrap().resolve().unwrap();
//! assert_eq!(layout.get(RegionId::Resume).unwrap().start, 0x4_6000);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod capabilities;
pub mod layout;
pub mod logger;
pub mod platforms;
pub mod region;

pub use capabilities::{Capabilities, ConfigError, OnChipMemory, PlatformConfig, SecureMonitor};
pub use layout::{Layout, LayoutError, resolve};
pub use region::{Region, RegionId, RegionRecord};
