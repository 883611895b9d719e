//! Configuration header decoding.
//!
//! A function's 64-byte configuration block decodes into a [`ConfigHeader`]:
//! the layout-independent prefix ([`CommonConfig`]) plus one of three
//! layout-specific views ([`HeaderFields`]). The variant is selected by the
//! class code: class 0x06 / subclass 0x04 gets the bridge layout, every
//! other recognized header gets the device layout, and unrecognized header
//! types keep only the prefix.

use bitflags::bitflags;

use crate::config::{offset, CONFIG_BLOCK_LEN};

/// Class code for bridge devices.
pub const CLASS_BRIDGE: u8 = 0x06;

/// Bridge subclass for the host bridge (the topology root).
pub const SUBCLASS_HOST_BRIDGE: u8 = 0x00;

/// Bridge subclass for PCI-to-PCI bridges (internal topology nodes).
pub const SUBCLASS_PCI_TO_PCI: u8 = 0x04;

/// Header-type field: standard (type 0) register layout.
pub const HEADER_LAYOUT_DEVICE: u8 = 0x00;

/// Header-type field: PCI-to-PCI bridge (type 1) register layout.
pub const HEADER_LAYOUT_BRIDGE: u8 = 0x01;

/// Mask selecting the layout bits of the header-type register.
pub const HEADER_LAYOUT_MASK: u8 = 0x7F;

/// Multifunction bit of the header-type register.
pub const HEADER_TYPE_MULTIFUNCTION: u8 = 0x80;

bitflags! {
    /// Command register bits (offset 0x04).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CommandFlags: u16 {
        /// Respond to I/O space accesses
        const IO_SPACE = 1 << 0;
        /// Respond to memory space accesses
        const MEMORY_SPACE = 1 << 1;
        /// May act as a bus master
        const BUS_MASTER = 1 << 2;
        /// Monitor special cycles
        const SPECIAL_CYCLES = 1 << 3;
        /// Memory write and invalidate enable
        const MEMORY_WRITE_INVALIDATE = 1 << 4;
        /// VGA palette snooping
        const VGA_PALETTE_SNOOP = 1 << 5;
        /// Respond to parity errors
        const PARITY_ERROR_RESPONSE = 1 << 6;
        /// SERR# driver enable
        const SERR_ENABLE = 1 << 8;
        /// Fast back-to-back transactions allowed
        const FAST_BACK_TO_BACK = 1 << 9;
        /// Legacy interrupt assertion disabled
        const INTERRUPT_DISABLE = 1 << 10;
    }
}

bitflags! {
    /// Status register bits (offset 0x06).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u16 {
        /// Interrupt is pending
        const INTERRUPT_STATUS = 1 << 3;
        /// Capabilities list present at the capabilities pointer
        const CAPABILITIES_LIST = 1 << 4;
        /// 66 MHz capable
        const MHZ_66 = 1 << 5;
        /// Fast back-to-back capable
        const FAST_BACK_TO_BACK = 1 << 7;
        /// Master data parity error detected
        const MASTER_DATA_PARITY_ERROR = 1 << 8;
        /// Signaled a target abort
        const SIGNALED_TARGET_ABORT = 1 << 11;
        /// Received a target abort
        const RECEIVED_TARGET_ABORT = 1 << 12;
        /// Received a master abort
        const RECEIVED_MASTER_ABORT = 1 << 13;
        /// Signaled a system error
        const SIGNALED_SYSTEM_ERROR = 1 << 14;
        /// Detected a parity error
        const DETECTED_PARITY_ERROR = 1 << 15;
    }
}

bitflags! {
    /// Bridge control register bits (offset 0x3E, type 1 layout).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BridgeControlFlags: u16 {
        /// Parity error response on the secondary interface
        const PARITY_ERROR_RESPONSE = 1 << 0;
        /// SERR# forwarding enable
        const SERR_ENABLE = 1 << 1;
        /// ISA I/O range filtering
        const ISA_ENABLE = 1 << 2;
        /// VGA range forwarding
        const VGA_ENABLE = 1 << 3;
        /// Master abort reporting mode
        const MASTER_ABORT_MODE = 1 << 5;
        /// Secondary bus reset asserted
        const SECONDARY_BUS_RESET = 1 << 6;
        /// Fast back-to-back on the secondary interface
        const FAST_BACK_TO_BACK = 1 << 7;
    }
}

/// Layout-independent header prefix, shared by every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonConfig {
    /// Vendor id.
    pub vendor_id: u16,
    /// Device id.
    pub device_id: u16,
    /// Command register, raw.
    pub command: u16,
    /// Status register, raw.
    pub status: u16,
    /// Revision id.
    pub revision: u8,
    /// Programming interface.
    pub prog_if: u8,
    /// Subclass code.
    pub subclass: u8,
    /// Class code.
    pub class: u8,
    /// Cache line size, in dwords.
    pub cache_line_size: u8,
    /// Latency timer.
    pub latency_timer: u8,
    /// Header type register, raw (layout bits plus multifunction bit).
    pub header_type: u8,
    /// Built-in self test register.
    pub bist: u8,
}

impl CommonConfig {
    fn decode(block: &[u8; CONFIG_BLOCK_LEN]) -> Self {
        Self {
            vendor_id: u16_at(block, offset::VENDOR_ID),
            device_id: u16_at(block, offset::DEVICE_ID),
            command: u16_at(block, offset::COMMAND),
            status: u16_at(block, offset::STATUS),
            revision: block[offset::REVISION_ID as usize],
            prog_if: block[offset::PROG_IF as usize],
            subclass: block[offset::SUBCLASS as usize],
            class: block[offset::CLASS as usize],
            cache_line_size: block[offset::CACHE_LINE_SIZE as usize],
            latency_timer: block[offset::LATENCY_TIMER as usize],
            header_type: block[offset::HEADER_TYPE as usize],
            bist: block[offset::BIST as usize],
        }
    }

    /// Multifunction bit of the header-type register.
    pub fn is_multifunction(&self) -> bool {
        self.header_type & HEADER_TYPE_MULTIFUNCTION != 0
    }

    /// Typed view of the command register.
    pub fn command_flags(&self) -> CommandFlags {
        CommandFlags::from_bits_retain(self.command)
    }

    /// Typed view of the status register.
    pub fn status_flags(&self) -> StatusFlags {
        StatusFlags::from_bits_retain(self.status)
    }
}

/// Type 0 (device) layout fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceFields {
    /// Raw base address registers, six slots.
    pub bars: [u32; 6],
    /// CardBus CIS pointer.
    pub cardbus_cis: u32,
    /// Subsystem vendor id.
    pub subsystem_vendor_id: u16,
    /// Subsystem device id.
    pub subsystem_id: u16,
    /// Expansion ROM base address.
    pub rom_base: u32,
    /// Capabilities list pointer.
    pub capabilities_ptr: u8,
    /// Interrupt line routing.
    pub interrupt_line: u8,
    /// Interrupt pin (0 = none, 1-4 = INTA#-INTD#).
    pub interrupt_pin: u8,
    /// Minimum grant, in units of 250 ns.
    pub min_grant: u8,
    /// Maximum latency, in units of 250 ns.
    pub max_latency: u8,
}

impl DeviceFields {
    fn decode(block: &[u8; CONFIG_BLOCK_LEN]) -> Self {
        let mut bars = [0u32; 6];
        for (slot, bar) in bars.iter_mut().enumerate() {
            *bar = u32_at(block, offset::BAR0 + (slot as u8) * 4);
        }
        Self {
            bars,
            cardbus_cis: u32_at(block, offset::CARDBUS_CIS),
            subsystem_vendor_id: u16_at(block, offset::SUBSYS_VENDOR_ID),
            subsystem_id: u16_at(block, offset::SUBSYS_ID),
            rom_base: u32_at(block, offset::ROM_BASE),
            capabilities_ptr: block[offset::CAP_PTR as usize],
            interrupt_line: block[offset::INT_LINE as usize],
            interrupt_pin: block[offset::INT_PIN as usize],
            min_grant: block[offset::MIN_GRANT as usize],
            max_latency: block[offset::MAX_LATENCY as usize],
        }
    }
}

/// Type 1 (PCI-to-PCI bridge) layout fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeFields {
    /// Raw base address registers, two slots.
    pub bars: [u32; 2],
    /// Bus number on the upstream side.
    pub primary_bus: u8,
    /// Bus number exposed downstream; children live on this bus.
    pub secondary_bus: u8,
    /// Highest bus number reachable behind this bridge.
    pub subordinate_bus: u8,
    /// Latency timer for the secondary interface.
    pub secondary_latency: u8,
    /// I/O window base, low byte.
    pub io_base: u8,
    /// I/O window limit, low byte.
    pub io_limit: u8,
    /// Status register of the secondary interface, raw.
    pub secondary_status: u16,
    /// Memory window base.
    pub memory_base: u16,
    /// Memory window limit.
    pub memory_limit: u16,
    /// Prefetchable memory window base.
    pub prefetch_base: u16,
    /// Prefetchable memory window limit.
    pub prefetch_limit: u16,
    /// Prefetchable window base, upper 32 bits.
    pub prefetch_base_upper: u32,
    /// Prefetchable window limit, upper 32 bits.
    pub prefetch_limit_upper: u32,
    /// I/O window base, upper 16 bits.
    pub io_base_upper: u16,
    /// I/O window limit, upper 16 bits.
    pub io_limit_upper: u16,
    /// Capabilities list pointer.
    pub capabilities_ptr: u8,
    /// Expansion ROM base address.
    pub rom_base: u32,
    /// Interrupt line routing.
    pub interrupt_line: u8,
    /// Interrupt pin (0 = none, 1-4 = INTA#-INTD#).
    pub interrupt_pin: u8,
    /// Bridge control register, raw.
    pub bridge_control: u16,
}

impl BridgeFields {
    fn decode(block: &[u8; CONFIG_BLOCK_LEN]) -> Self {
        Self {
            bars: [u32_at(block, offset::BAR0), u32_at(block, offset::BAR0 + 4)],
            primary_bus: block[offset::PRIMARY_BUS as usize],
            secondary_bus: block[offset::SECONDARY_BUS as usize],
            subordinate_bus: block[offset::SUBORDINATE_BUS as usize],
            secondary_latency: block[offset::SECONDARY_LATENCY as usize],
            io_base: block[offset::IO_BASE as usize],
            io_limit: block[offset::IO_LIMIT as usize],
            secondary_status: u16_at(block, offset::SECONDARY_STATUS),
            memory_base: u16_at(block, offset::MEMORY_BASE),
            memory_limit: u16_at(block, offset::MEMORY_LIMIT),
            prefetch_base: u16_at(block, offset::PREFETCH_BASE),
            prefetch_limit: u16_at(block, offset::PREFETCH_LIMIT),
            prefetch_base_upper: u32_at(block, offset::PREFETCH_BASE_UPPER),
            prefetch_limit_upper: u32_at(block, offset::PREFETCH_LIMIT_UPPER),
            io_base_upper: u16_at(block, offset::IO_BASE_UPPER),
            io_limit_upper: u16_at(block, offset::IO_LIMIT_UPPER),
            capabilities_ptr: block[offset::CAP_PTR as usize],
            rom_base: u32_at(block, offset::BRIDGE_ROM_BASE),
            interrupt_line: block[offset::INT_LINE as usize],
            interrupt_pin: block[offset::INT_PIN as usize],
            bridge_control: u16_at(block, offset::BRIDGE_CONTROL),
        }
    }

    /// Typed view of the bridge control register.
    pub fn control_flags(&self) -> BridgeControlFlags {
        BridgeControlFlags::from_bits_retain(self.bridge_control)
    }
}

/// Layout-specific portion of a decoded header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFields {
    /// Type 0 layout (or display fallback for non-bridge classes).
    Device(DeviceFields),
    /// Type 1 layout for PCI-to-PCI bridges.
    Bridge(BridgeFields),
    /// Unrecognized header type; only the common prefix is meaningful.
    Generic,
}

/// A fully decoded configuration header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigHeader {
    /// Layout-independent prefix, valid for every variant.
    pub common: CommonConfig,
    /// Layout-specific fields, selected by the class code.
    pub fields: HeaderFields,
}

impl ConfigHeader {
    /// Decode a raw 64-byte configuration block.
    ///
    /// Class 0x06 / subclass 0x04 selects the bridge layout. Any other
    /// class with a recognized header type decodes through the device
    /// layout for display purposes; unrecognized header types keep only
    /// the common prefix.
    pub fn decode(block: &[u8; CONFIG_BLOCK_LEN]) -> Self {
        let common = CommonConfig::decode(block);
        let fields = if common.class == CLASS_BRIDGE && common.subclass == SUBCLASS_PCI_TO_PCI {
            HeaderFields::Bridge(BridgeFields::decode(block))
        } else {
            match common.header_type & HEADER_LAYOUT_MASK {
                HEADER_LAYOUT_DEVICE | HEADER_LAYOUT_BRIDGE => {
                    HeaderFields::Device(DeviceFields::decode(block))
                }
                _ => HeaderFields::Generic,
            }
        };
        Self { common, fields }
    }

    /// Whether this header identifies a host bridge (topology root).
    pub fn is_host_bridge(&self) -> bool {
        self.common.class == CLASS_BRIDGE && self.common.subclass == SUBCLASS_HOST_BRIDGE
    }

    /// Whether this header decoded through the bridge layout.
    pub fn is_pci_bridge(&self) -> bool {
        matches!(self.fields, HeaderFields::Bridge(_))
    }

    /// Number of BAR slots this layout implements.
    pub fn bar_slots(&self) -> usize {
        match self.fields {
            HeaderFields::Device(_) => 6,
            HeaderFields::Bridge(_) => 2,
            HeaderFields::Generic => 0,
        }
    }

    /// Raw value of one BAR slot, if the layout has it.
    pub fn bar(&self, slot: usize) -> Option<u32> {
        match &self.fields {
            HeaderFields::Device(fields) => fields.bars.get(slot).copied(),
            HeaderFields::Bridge(fields) => fields.bars.get(slot).copied(),
            HeaderFields::Generic => None,
        }
    }

    /// Bridge-layout fields, when present.
    pub fn bridge(&self) -> Option<&BridgeFields> {
        match &self.fields {
            HeaderFields::Bridge(fields) => Some(fields),
            _ => None,
        }
    }

    /// Device-layout fields, when present.
    pub fn device(&self) -> Option<&DeviceFields> {
        match &self.fields {
            HeaderFields::Device(fields) => Some(fields),
            _ => None,
        }
    }
}

fn u16_at(block: &[u8; CONFIG_BLOCK_LEN], offset: u8) -> u16 {
    let i = offset as usize;
    u16::from_le_bytes([block[i], block[i + 1]])
}

fn u32_at(block: &[u8; CONFIG_BLOCK_LEN], offset: u8) -> u32 {
    let i = offset as usize;
    u32::from_le_bytes([block[i], block[i + 1], block[i + 2], block[i + 3]])
}
