//! PCI Configuration Space Inventory
//!
//! A `no_std` library for enumerating PCI devices, sizing their BARs, and
//! reconstructing the bus bridge topology from configuration space alone.
//!
//! # Overview
//!
//! The config-space backend is pluggable; everything above it is pure
//! decoding and bookkeeping. This crate provides:
//! - Full 256-bus enumeration over a [`ConfigAccess`] backend
//! - Type 0 / Type 1 header decoding with command, status, and bridge
//!   control register views
//! - Non-destructive BAR sizing via the all-ones probe sequence
//! - Host-bridge-rooted topology reconstruction with nesting depths
//! - A flat discovery-ordered registry with a clamped selection cursor
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Access layer** - [`ConfigAccess`] abstracts the config mechanism
//! 2. **Decode layer** - Header classification and typed register views
//! 3. **Probe layer** - BAR sizing with save/probe/restore discipline
//! 4. **Inventory layer** - Registry, bridge tree, and selection cursor
//!
//! # Usage
//!
//! ```ignore
//! use pciscope_core::Inventory;
//!
//! // Scan all 256 buses through a config-space backend
//! let inventory = Inventory::scan(&mut access)?;
//!
//! // Walk the bridge tree depth-first
//! for id in inventory.topology().walk() {
//!     let device = inventory.registry().get(id);
//!     let depth = inventory.topology().nesting(id);
//! }
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod error;
pub mod config;
pub mod header;
pub mod bar;
pub mod device;
pub mod registry;
pub mod topology;
pub mod cursor;
pub mod scan;

pub use error::{Result, ScanError};
pub use config::{ConfigAccess, Location, CONFIG_BLOCK_LEN};
pub use header::{
    BridgeControlFlags, BridgeFields, CommandFlags, CommonConfig, ConfigHeader, DeviceFields,
    HeaderFields, StatusFlags,
};
pub use bar::{decode_probed, MAX_BAR_SLOTS, PROBE_PATTERN};
pub use device::{class_name, Device, ENUMERATION_INDEX_NOT_FOUND};
pub use registry::{DeviceId, DeviceRegistry};
pub use topology::{Topology, TreeWalk};
pub use cursor::SelectionCursor;

// High-level API exports
pub use scan::Inventory;
