//! The per-function device record.

use crate::bar::MAX_BAR_SLOTS;
use crate::config::Location;
use crate::header::ConfigHeader;

/// Sentinel enumeration index meaning "not found after exhausting the
/// search space". Valid data, not an error.
pub const ENUMERATION_INDEX_NOT_FOUND: u8 = 0xFF;

/// One discovered PCI function.
///
/// Created during the scan in discovery order and immutable afterwards;
/// the BAR sizes and name references are filled in immediately after
/// decoding, before the record enters the registry.
#[derive(Debug, Clone, Copy)]
pub struct Device {
    /// Where the function lives on the bus.
    pub location: Location,
    /// Its decoded configuration header.
    pub header: ConfigHeader,
    /// Decoded size per BAR slot; 0 for an unused slot, an unimplemented
    /// layout, or the continuation half of a 64-bit pair.
    pub bar_sizes: [u32; MAX_BAR_SLOTS],
    /// Ordinal of this function among same-id functions in discovery
    /// order, or [`ENUMERATION_INDEX_NOT_FOUND`].
    pub enumeration_index: u8,
    /// Registered vendor name, borrowed from the static name tables.
    pub vendor_description: Option<&'static str>,
    /// Part description, borrowed from the static name tables.
    pub device_description: Option<&'static str>,
}

impl Device {
    /// Build a record for a decoded header; sizes and names start empty.
    pub fn new(location: Location, header: ConfigHeader) -> Self {
        Self {
            location,
            header,
            bar_sizes: [0; MAX_BAR_SLOTS],
            enumeration_index: ENUMERATION_INDEX_NOT_FOUND,
            vendor_description: None,
            device_description: None,
        }
    }

    /// Vendor id, from the common header prefix.
    pub fn vendor_id(&self) -> u16 {
        self.header.common.vendor_id
    }

    /// Device id, from the common header prefix.
    pub fn device_id(&self) -> u16 {
        self.header.common.device_id
    }

    /// Whether this function is a host bridge (topology root candidate).
    pub fn is_host_bridge(&self) -> bool {
        self.header.is_host_bridge()
    }

    /// Whether this function is a PCI-to-PCI bridge (internal tree node).
    pub fn is_pci_bridge(&self) -> bool {
        self.header.is_pci_bridge()
    }

    /// The bus this function exposes downstream, when it is a bridge the
    /// topology descends into.
    ///
    /// A PCI-to-PCI bridge reports its secondary bus register; a host
    /// bridge fans out to bus 0. Everything else has no downstream bus.
    pub fn secondary_bus(&self) -> Option<u8> {
        if let Some(bridge) = self.header.bridge() {
            Some(bridge.secondary_bus)
        } else if self.is_host_bridge() {
            Some(0)
        } else {
            None
        }
    }

    /// Human-readable name of this function's class/subclass pair.
    pub fn class_name(&self) -> &'static str {
        class_name(self.header.common.class, self.header.common.subclass)
    }
}

/// Display name for a class/subclass pair, following the PCI-SIG class
/// code assignments.
pub fn class_name(class: u8, subclass: u8) -> &'static str {
    match (class, subclass) {
        (0x00, 0x01) => "VGA-compatible unclassified device",
        (0x00, _) => "Unclassified device",
        (0x01, 0x00) => "SCSI storage controller",
        (0x01, 0x01) => "IDE controller",
        (0x01, 0x02) => "Floppy disk controller",
        (0x01, 0x04) => "RAID controller",
        (0x01, 0x05) => "ATA controller",
        (0x01, 0x06) => "SATA controller",
        (0x01, 0x07) => "Serial Attached SCSI controller",
        (0x01, 0x08) => "Non-volatile memory controller",
        (0x01, _) => "Mass storage controller",
        (0x02, 0x00) => "Ethernet controller",
        (0x02, 0x01) => "Token ring controller",
        (0x02, 0x80) => "Wireless controller",
        (0x02, _) => "Network controller",
        (0x03, 0x00) => "VGA-compatible controller",
        (0x03, 0x01) => "XGA controller",
        (0x03, 0x02) => "3D controller",
        (0x03, _) => "Display controller",
        (0x04, 0x00) => "Multimedia video controller",
        (0x04, 0x01) => "Multimedia audio controller",
        (0x04, 0x03) => "Audio device",
        (0x04, _) => "Multimedia controller",
        (0x05, _) => "Memory controller",
        (0x06, 0x00) => "Host bridge",
        (0x06, 0x01) => "ISA bridge",
        (0x06, 0x02) => "EISA bridge",
        (0x06, 0x04) => "PCI-to-PCI bridge",
        (0x06, 0x05) => "PCMCIA bridge",
        (0x06, 0x07) => "CardBus bridge",
        (0x06, 0x09) => "Semi-transparent PCI-to-PCI bridge",
        (0x06, _) => "Bridge",
        (0x07, 0x00) => "Serial controller",
        (0x07, 0x01) => "Parallel controller",
        (0x07, 0x03) => "Modem",
        (0x07, _) => "Communication controller",
        (0x08, 0x00) => "Programmable interrupt controller",
        (0x08, 0x01) => "DMA controller",
        (0x08, 0x02) => "System timer",
        (0x08, 0x03) => "Real-time clock",
        (0x08, 0x05) => "SD host controller",
        (0x08, _) => "System peripheral",
        (0x09, _) => "Input device controller",
        (0x0A, _) => "Docking station",
        (0x0B, _) => "Processor",
        (0x0C, 0x00) => "FireWire controller",
        (0x0C, 0x03) => "USB controller",
        (0x0C, 0x05) => "SMBus controller",
        (0x0C, _) => "Serial bus controller",
        (0x0D, _) => "Wireless controller",
        (0x0F, _) => "Satellite communications controller",
        (0x10, _) => "Encryption controller",
        (0x11, _) => "Signal processing controller",
        (0x13, _) => "Non-essential instrumentation",
        _ => "Unknown device",
    }
}
