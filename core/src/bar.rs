//! BAR size probing.
//!
//! Determines how much address space a base address register decodes
//! without a kernel resource API: write all-ones to the register, read back
//! which address bits the device actually implements, restore the original
//! value, then isolate the lowest implemented bit; that bit is the size of
//! the region the device demands.
//!
//! The probe mutates live device state in place, so each slot completes its
//! save/probe/restore sequence before the next slot starts, and any access
//! failure aborts the scan.

use log::trace;

use crate::config::{offset, ConfigAccess, Location};
use crate::error::Result;

/// Largest number of BAR slots any header layout implements.
pub const MAX_BAR_SLOTS: usize = 6;

/// Pattern written to a BAR register during the sizing probe.
pub const PROBE_PATTERN: u32 = 0xFFFF_FFFF;

/// Decode a probed BAR value into the region size in bytes.
///
/// Both low bits set is a reserved encoding and reports size 0 (this is
/// also what the upper half of a 64-bit BAR pair probes to). An I/O BAR
/// (bit 0 set) keeps its address bits above the low 2; a memory BAR keeps
/// them above the low 4. The size is the lowest implemented address bit,
/// isolated by ANDing the masked value with its two's-complement negation.
pub fn decode_probed(probed: u32) -> u32 {
    if probed & 0b11 == 0b11 {
        return 0;
    }
    let masked = if probed & 0b1 != 0 {
        probed & !0b11
    } else {
        probed & !0b1111
    };
    masked & masked.wrapping_neg()
}

/// Probe one BAR slot and return its decoded size.
///
/// The restore write is mandatory and must land before anything else
/// touches the device; the probe value left in place would corrupt the
/// device's address decoding.
pub fn probe_slot<A: ConfigAccess>(
    access: &mut A,
    location: Location,
    slot: usize,
) -> Result<u32> {
    let bar_offset = offset::BAR0 + (slot as u8) * 4;
    let original = access.read32(location, bar_offset)?;
    access.write32(location, bar_offset, PROBE_PATTERN)?;
    let probed = access.read32(location, bar_offset)?;
    access.write32(location, bar_offset, original)?;
    let size = decode_probed(probed);
    trace!(
        "{} BAR{}: value {:#010x} probed {:#010x} size {:#x}",
        location,
        slot,
        original,
        probed,
        size
    );
    Ok(size)
}

/// Probe the first `slots` BAR slots of a function.
///
/// Unprobed slots report size 0. Slots are probed strictly in order, each
/// one fully restored before the next begins.
pub fn probe_all<A: ConfigAccess>(
    access: &mut A,
    location: Location,
    slots: usize,
) -> Result<[u32; MAX_BAR_SLOTS]> {
    let mut sizes = [0u32; MAX_BAR_SLOTS];
    for (slot, size) in sizes.iter_mut().take(slots).enumerate() {
        *size = probe_slot(access, location, slot)?;
    }
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_bar_size() {
        // Bit 0 set, bits 1-3 clear, address bits 4-31 implemented: 16 bytes.
        assert_eq!(decode_probed(0xFFFF_FFF1), 16);
        // Coarser I/O region: first implemented bit at 1 << 8.
        assert_eq!(decode_probed(0xFFFF_FF01), 0x100);
    }

    #[test]
    fn memory_bar_size() {
        // Bits 0-3 clear, implemented bits start at 1 << 16: 64 KiB.
        assert_eq!(decode_probed(0xFFFF_0000), 0x10000);
        // Prefetchable bit (bit 3) does not leak into the size.
        assert_eq!(decode_probed(0xFFFF_0008), 0x10000);
        // 64-bit type bits in the low nibble do not leak either.
        assert_eq!(decode_probed(0xFFFF_F004), 0x1000);
    }

    #[test]
    fn reserved_encoding_is_zero() {
        assert_eq!(decode_probed(0x0000_0003), 0);
        // All-ones is what a 64-bit upper half probes to; reserved, size 0.
        assert_eq!(decode_probed(0xFFFF_FFFF), 0);
    }

    #[test]
    fn unimplemented_bar_is_zero() {
        assert_eq!(decode_probed(0), 0);
        assert_eq!(decode_probed(0x0000_0008), 0);
    }
}
