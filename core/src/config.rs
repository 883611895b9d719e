//! Configuration space fundamentals: locations, register offsets, and the
//! hardware access trait.
//!
//! Everything in this crate reads and writes the first 64 bytes of a
//! function's configuration space through the [`ConfigAccess`] trait. The
//! mechanism behind the trait (port I/O, ECAM, a hypervisor call, an
//! in-memory mock) is the embedder's concern; the trait only promises
//! register semantics.

use core::fmt;

use static_assertions::const_assert;

use crate::error::Result;

/// Length of the configuration block this crate models, in bytes.
///
/// Identity, control, and resource-description registers of both standard
/// header layouts fit in this prefix of the 256-byte configuration space.
pub const CONFIG_BLOCK_LEN: usize = 64;

/// Byte offsets of configuration registers within the 64-byte block.
///
/// Offsets up to [`HEADER_TYPE`](offset::HEADER_TYPE) are layout-independent;
/// the remainder are split between the type 0 (device) and type 1 (bridge)
/// layouts.
pub mod offset {
    /// Vendor id (u16, both layouts)
    pub const VENDOR_ID: u8 = 0x00;
    /// Device id (u16, both layouts)
    pub const DEVICE_ID: u8 = 0x02;
    /// Command register (u16, both layouts)
    pub const COMMAND: u8 = 0x04;
    /// Status register (u16, both layouts)
    pub const STATUS: u8 = 0x06;
    /// Revision id (u8, both layouts)
    pub const REVISION_ID: u8 = 0x08;
    /// Programming interface (u8, both layouts)
    pub const PROG_IF: u8 = 0x09;
    /// Subclass code (u8, both layouts)
    pub const SUBCLASS: u8 = 0x0A;
    /// Class code (u8, both layouts)
    pub const CLASS: u8 = 0x0B;
    /// Cache line size (u8, both layouts)
    pub const CACHE_LINE_SIZE: u8 = 0x0C;
    /// Latency timer (u8, both layouts)
    pub const LATENCY_TIMER: u8 = 0x0D;
    /// Header type and multifunction bit (u8, both layouts)
    pub const HEADER_TYPE: u8 = 0x0E;
    /// Built-in self test (u8, both layouts)
    pub const BIST: u8 = 0x0F;
    /// First base address register (u32); type 0 carries six, type 1 two
    pub const BAR0: u8 = 0x10;

    // Type 0 layout
    /// CardBus CIS pointer (u32, type 0)
    pub const CARDBUS_CIS: u8 = 0x28;
    /// Subsystem vendor id (u16, type 0)
    pub const SUBSYS_VENDOR_ID: u8 = 0x2C;
    /// Subsystem device id (u16, type 0)
    pub const SUBSYS_ID: u8 = 0x2E;
    /// Expansion ROM base address (u32, type 0)
    pub const ROM_BASE: u8 = 0x30;
    /// Capabilities list pointer (u8, both layouts)
    pub const CAP_PTR: u8 = 0x34;
    /// Interrupt line (u8, both layouts)
    pub const INT_LINE: u8 = 0x3C;
    /// Interrupt pin (u8, both layouts)
    pub const INT_PIN: u8 = 0x3D;
    /// Minimum grant (u8, type 0)
    pub const MIN_GRANT: u8 = 0x3E;
    /// Maximum latency (u8, type 0)
    pub const MAX_LATENCY: u8 = 0x3F;

    // Type 1 layout
    /// Primary bus number (u8, type 1)
    pub const PRIMARY_BUS: u8 = 0x18;
    /// Secondary bus number (u8, type 1)
    pub const SECONDARY_BUS: u8 = 0x19;
    /// Subordinate bus number (u8, type 1)
    pub const SUBORDINATE_BUS: u8 = 0x1A;
    /// Secondary latency timer (u8, type 1)
    pub const SECONDARY_LATENCY: u8 = 0x1B;
    /// I/O window base, low byte (u8, type 1)
    pub const IO_BASE: u8 = 0x1C;
    /// I/O window limit, low byte (u8, type 1)
    pub const IO_LIMIT: u8 = 0x1D;
    /// Secondary status register (u16, type 1)
    pub const SECONDARY_STATUS: u8 = 0x1E;
    /// Memory window base (u16, type 1)
    pub const MEMORY_BASE: u8 = 0x20;
    /// Memory window limit (u16, type 1)
    pub const MEMORY_LIMIT: u8 = 0x22;
    /// Prefetchable memory window base (u16, type 1)
    pub const PREFETCH_BASE: u8 = 0x24;
    /// Prefetchable memory window limit (u16, type 1)
    pub const PREFETCH_LIMIT: u8 = 0x26;
    /// Prefetchable base, upper 32 bits (u32, type 1)
    pub const PREFETCH_BASE_UPPER: u8 = 0x28;
    /// Prefetchable limit, upper 32 bits (u32, type 1)
    pub const PREFETCH_LIMIT_UPPER: u8 = 0x2C;
    /// I/O window base, upper 16 bits (u16, type 1)
    pub const IO_BASE_UPPER: u8 = 0x30;
    /// I/O window limit, upper 16 bits (u16, type 1)
    pub const IO_LIMIT_UPPER: u8 = 0x32;
    /// Expansion ROM base address (u32, type 1)
    pub const BRIDGE_ROM_BASE: u8 = 0x38;
    /// Bridge control register (u16, type 1)
    pub const BRIDGE_CONTROL: u8 = 0x3E;
}

// Both register maps must end exactly at the block boundary.
const_assert!(offset::MAX_LATENCY as usize + 1 == CONFIG_BLOCK_LEN);
const_assert!(offset::BRIDGE_CONTROL as usize + 2 == CONFIG_BLOCK_LEN);
const_assert!(offset::BAR0 as usize + 6 * 4 <= CONFIG_BLOCK_LEN);

/// PCI device location: bus, device, and function numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    /// Bus number (0-255).
    pub bus: u8,
    /// Device number (0-31).
    pub device: u8,
    /// Function number (0-7).
    pub function: u8,
}

impl Location {
    /// Create a new location.
    pub const fn new(bus: u8, device: u8, function: u8) -> Self {
        Self {
            bus,
            device,
            function,
        }
    }

    /// All candidate locations in ascending bus, device, function order.
    ///
    /// This is the discovery order of the scan and of every ordinal
    /// derived from it.
    pub fn scan_order() -> impl Iterator<Item = Location> {
        (0..=u8::MAX).flat_map(|bus| {
            (0..32u8).flat_map(move |device| {
                (0..8u8).map(move |function| Location::new(bus, device, function))
            })
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{:02x}.{}", self.bus, self.device, self.function)
    }
}

/// Trait for PCI configuration space access.
///
/// Implementations provide the two 32-bit primitives; everything else has a
/// default derived from them. Any failed access is terminal for the scan
/// that issued it (see [`ScanError`](crate::error::ScanError)), so
/// implementations should report failure rather than fabricate data.
pub trait ConfigAccess {
    /// Read a 32-bit value from configuration space.
    ///
    /// The offset must be aligned to 4 bytes.
    fn read32(&mut self, location: Location, offset: u8) -> Result<u32>;

    /// Write a 32-bit value to configuration space.
    ///
    /// The offset must be aligned to 4 bytes.
    fn write32(&mut self, location: Location, offset: u8, value: u32) -> Result<()>;

    /// Read a 16-bit value from configuration space.
    fn read16(&mut self, location: Location, offset: u8) -> Result<u16> {
        let val32 = self.read32(location, offset & !0x3)?;
        let shift = ((offset & 0x2) * 8) as u32;
        Ok(((val32 >> shift) & 0xFFFF) as u16)
    }

    /// Read an 8-bit value from configuration space.
    fn read8(&mut self, location: Location, offset: u8) -> Result<u8> {
        let val32 = self.read32(location, offset & !0x3)?;
        let shift = ((offset & 0x3) * 8) as u32;
        Ok(((val32 >> shift) & 0xFF) as u8)
    }

    /// Read the full 64-byte configuration block of a function.
    fn read_block(&mut self, location: Location) -> Result<[u8; CONFIG_BLOCK_LEN]> {
        let mut block = [0u8; CONFIG_BLOCK_LEN];
        for (index, chunk) in block.chunks_exact_mut(4).enumerate() {
            let dword = self.read32(location, (index * 4) as u8)?;
            chunk.copy_from_slice(&dword.to_le_bytes());
        }
        Ok(block)
    }

    /// Check whether a function is present at `location`.
    ///
    /// The default sniffs the vendor/device id dword: all-ones (no device
    /// drives the bus) or all-zeros means absent. Implementations with a
    /// native presence notion may override.
    fn device_present(&mut self, location: Location) -> Result<bool> {
        let id = self.read32(location, offset::VENDOR_ID)?;
        Ok(id != 0xFFFF_FFFF && id != 0)
    }

    /// Locate the `occurrence`-th function matching a vendor/device id pair,
    /// counting in discovery order. `Ok(None)` means the ordinal is past the
    /// last match.
    fn find_nth(
        &mut self,
        vendor_id: u16,
        device_id: u16,
        occurrence: u8,
    ) -> Result<Option<Location>> {
        let mut seen: u16 = 0;
        for location in Location::scan_order() {
            if !self.device_present(location)? {
                continue;
            }
            let id = self.read32(location, offset::VENDOR_ID)?;
            if (id & 0xFFFF) as u16 == vendor_id && (id >> 16) as u16 == device_id {
                if seen == occurrence as u16 {
                    return Ok(Some(location));
                }
                seen += 1;
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;

    /// Access backed by a single function at 00:03.0 with a fixed id dword.
    struct OneDevice;

    impl ConfigAccess for OneDevice {
        fn read32(&mut self, location: Location, offset: u8) -> Result<u32> {
            if location == Location::new(0, 3, 0) {
                match offset {
                    0x00 => Ok(0x1000_8086),
                    0x04 => Ok(0x0010_0007),
                    _ => Ok(0),
                }
            } else {
                Ok(0xFFFF_FFFF)
            }
        }

        fn write32(&mut self, location: Location, offset: u8, _value: u32) -> Result<()> {
            Err(ScanError::WriteFailed { location, offset })
        }
    }

    #[test]
    fn derived_reads_split_the_dword() {
        let mut access = OneDevice;
        let loc = Location::new(0, 3, 0);
        assert_eq!(access.read16(loc, offset::VENDOR_ID).unwrap(), 0x8086);
        assert_eq!(access.read16(loc, offset::DEVICE_ID).unwrap(), 0x1000);
        assert_eq!(access.read8(loc, 0x00).unwrap(), 0x86);
        assert_eq!(access.read8(loc, 0x01).unwrap(), 0x80);
        assert_eq!(access.read8(loc, offset::COMMAND).unwrap(), 0x07);
        assert_eq!(access.read16(loc, offset::STATUS).unwrap(), 0x0010);
    }

    #[test]
    fn presence_sniffs_the_id_dword() {
        let mut access = OneDevice;
        assert!(access.device_present(Location::new(0, 3, 0)).unwrap());
        assert!(!access.device_present(Location::new(0, 4, 0)).unwrap());
    }

    #[test]
    fn find_nth_counts_in_scan_order() {
        let mut access = OneDevice;
        let found = access.find_nth(0x8086, 0x1000, 0).unwrap();
        assert_eq!(found, Some(Location::new(0, 3, 0)));
        assert_eq!(access.find_nth(0x8086, 0x1000, 1).unwrap(), None);
        assert_eq!(access.find_nth(0x10EC, 0x8139, 0).unwrap(), None);
    }

    #[test]
    fn scan_order_is_ascending() {
        let mut previous = None;
        let mut count = 0usize;
        for location in Location::scan_order() {
            if let Some(prev) = previous {
                assert!(location > prev);
            }
            previous = Some(location);
            count += 1;
        }
        assert_eq!(count, 256 * 32 * 8);
    }

    #[test]
    fn location_formats_as_bus_device_function() {
        let loc = Location::new(0x02, 0x1F, 3);
        assert_eq!(alloc::format!("{}", loc), "02:1f.3");
    }
}
