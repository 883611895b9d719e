//! Common test utilities and mock configuration-space backends

pub mod builder;
pub use builder::BusBuilder;

use std::collections::BTreeMap;

use pciscope_core::{ConfigAccess, Location, Result, ScanError, PROBE_PATTERN};

/// One function's 64-byte configuration block, stored as 16 dwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFunction {
    pub regs: [u32; 16],
    /// Per-slot read-back value after an all-ones BAR write. `None` marks
    /// a hardwired-zero register that ignores writes entirely.
    pub bar_probe: [Option<u32>; 6],
}

impl MockFunction {
    /// A plain endpoint function. Defaults to an Ethernet class code with
    /// memory decoding and bus mastering enabled.
    pub fn new(vendor_id: u16, device_id: u16) -> Self {
        let mut regs = [0u32; 16];
        regs[0] = (device_id as u32) << 16 | vendor_id as u32;
        regs[1] = 0x0010_0006; // status: capabilities list; command: memory + master
        regs[2] = 0x0200_0000;
        Self {
            regs,
            bar_probe: [None; 6],
        }
    }

    pub fn set_class(&mut self, class: u8, subclass: u8, prog_if: u8) {
        self.regs[2] = (class as u32) << 24
            | (subclass as u32) << 16
            | (prog_if as u32) << 8
            | (self.regs[2] & 0xFF);
    }

    pub fn set_header_type(&mut self, header_type: u8) {
        self.regs[3] = (self.regs[3] & !0x00FF_0000) | (header_type as u32) << 16;
    }

    #[allow(dead_code)]
    pub fn set_multifunction(&mut self) {
        self.regs[3] |= 0x0080_0000;
    }

    /// Install a BAR: `value` is what the register holds, `probe` is what
    /// it reads back as after the sizing write.
    #[allow(dead_code)]
    pub fn set_bar(&mut self, slot: usize, value: u32, probe: u32) {
        self.regs[4 + slot] = value;
        self.bar_probe[slot] = Some(probe);
    }

    /// Fill in the Type 1 bus number triple.
    pub fn set_buses(&mut self, primary: u8, secondary: u8, subordinate: u8) {
        self.regs[6] = (self.regs[6] & 0xFF00_0000)
            | (subordinate as u32) << 16
            | (secondary as u32) << 8
            | primary as u32;
    }

    #[allow(dead_code)]
    pub fn set_interrupt(&mut self, line: u8, pin: u8) {
        self.regs[15] = (self.regs[15] & 0xFFFF_0000) | (pin as u32) << 8 | line as u32;
    }

    fn write(&mut self, offset: u8, value: u32) {
        let index = (offset as usize / 4) % 16;
        if (0x10..=0x24).contains(&offset) && offset % 4 == 0 {
            let slot = (offset as usize - 0x10) / 4;
            match self.bar_probe[slot] {
                Some(probe) if value == PROBE_PATTERN => self.regs[index] = probe,
                Some(_) => self.regs[index] = value,
                None => {}
            }
            return;
        }
        self.regs[index] = value;
    }
}

/// In-memory configuration space for testing. Absent locations read as
/// all-ones, like a real bus with nothing responding.
#[derive(Debug, Clone, Default)]
pub struct MockConfigSpace {
    pub functions: BTreeMap<Location, MockFunction>,
    /// Fail the next read matching (location, offset).
    pub fail_read_at: Option<(Location, u8)>,
    /// Fail the next write matching (location, offset).
    pub fail_write_at: Option<(Location, u8)>,
    /// Every write issued through the backend, in order.
    pub write_log: Vec<(Location, u8, u32)>,
}

impl MockConfigSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: Location, function: MockFunction) {
        self.functions.insert(location, function);
    }

    /// Copy of every function's register file, for before/after comparison.
    #[allow(dead_code)]
    pub fn register_snapshot(&self) -> BTreeMap<Location, [u32; 16]> {
        self.functions
            .iter()
            .map(|(location, function)| (*location, function.regs))
            .collect()
    }
}

impl ConfigAccess for MockConfigSpace {
    fn read32(&mut self, location: Location, offset: u8) -> Result<u32> {
        if self.fail_read_at == Some((location, offset)) {
            return Err(ScanError::ReadFailed { location, offset });
        }
        match self.functions.get(&location) {
            Some(function) => Ok(function.regs[(offset as usize / 4) % 16]),
            None => Ok(0xFFFF_FFFF),
        }
    }

    fn write32(&mut self, location: Location, offset: u8, value: u32) -> Result<()> {
        if self.fail_write_at == Some((location, offset)) {
            return Err(ScanError::WriteFailed { location, offset });
        }
        self.write_log.push((location, offset, value));
        if let Some(function) = self.functions.get_mut(&location) {
            function.write(offset, value);
        }
        Ok(())
    }
}
