//! Static PCI vendor and device name tables.
//!
//! A small, embedded subset of the public PCI id registry covering the
//! vendors and parts commonly seen on real machines and in virtualized
//! guests. Lookups are linear scans over `'static` tables; callers keep the
//! returned references for as long as they like without owning anything.
//!
//! Unknown ids resolve to `None`; the caller decides the fallback text.

#![no_std]
#![warn(missing_docs)]

/// One PCI vendor id and its registered name.
#[derive(Debug, Clone, Copy)]
pub struct Vendor {
    /// 16-bit vendor id.
    pub id: u16,
    /// Full registered vendor name.
    pub name: &'static str,
    /// Short display name.
    pub short_name: &'static str,
}

/// One (vendor id, device id) pair and its part name.
#[derive(Debug, Clone, Copy)]
pub struct Product {
    /// 16-bit vendor id.
    pub vendor_id: u16,
    /// 16-bit device id, scoped to the vendor.
    pub device_id: u16,
    /// Short part/chip name.
    pub name: &'static str,
    /// Longer marketing/datasheet description.
    pub description: &'static str,
}

/// Known PCI vendors.
pub const VENDORS: &[Vendor] = &[
    Vendor { id: 0x8086, name: "Intel Corporation", short_name: "Intel" },
    Vendor { id: 0x8087, name: "Intel Corporation", short_name: "Intel" },
    Vendor { id: 0x1022, name: "Advanced Micro Devices, Inc. [AMD]", short_name: "AMD" },
    Vendor { id: 0x1002, name: "Advanced Micro Devices, Inc. [AMD/ATI]", short_name: "AMD/ATI" },
    Vendor { id: 0x10DE, name: "NVIDIA Corporation", short_name: "NVIDIA" },
    Vendor { id: 0x14E4, name: "Broadcom Inc. and subsidiaries", short_name: "Broadcom" },
    Vendor { id: 0x10EC, name: "Realtek Semiconductor Co., Ltd.", short_name: "Realtek" },
    Vendor { id: 0x1106, name: "VIA Technologies, Inc.", short_name: "VIA" },
    Vendor { id: 0x1039, name: "Silicon Integrated Systems [SiS]", short_name: "SiS" },
    Vendor { id: 0x10B7, name: "3Com Corporation", short_name: "3Com" },
    Vendor { id: 0x10B9, name: "ULi Electronics Inc.", short_name: "ULi" },
    Vendor { id: 0x102B, name: "Matrox Electronics Systems Ltd.", short_name: "Matrox" },
    Vendor { id: 0x121A, name: "3Dfx Interactive, Inc.", short_name: "3Dfx" },
    Vendor { id: 0x5333, name: "S3 Graphics Ltd.", short_name: "S3" },
    Vendor { id: 0x1013, name: "Cirrus Logic", short_name: "Cirrus" },
    Vendor { id: 0x1000, name: "Broadcom / LSI", short_name: "LSI" },
    Vendor { id: 0x9005, name: "Adaptec", short_name: "Adaptec" },
    Vendor { id: 0x1077, name: "QLogic Corp.", short_name: "QLogic" },
    Vendor { id: 0x11AB, name: "Marvell Technology Group Ltd.", short_name: "Marvell" },
    Vendor { id: 0x1B4B, name: "Marvell Technology Group Ltd.", short_name: "Marvell" },
    Vendor { id: 0x168C, name: "Qualcomm Atheros", short_name: "Atheros" },
    Vendor { id: 0x1969, name: "Qualcomm Atheros", short_name: "Atheros" },
    Vendor { id: 0x104C, name: "Texas Instruments", short_name: "TI" },
    Vendor { id: 0x1033, name: "NEC Corporation", short_name: "NEC" },
    Vendor { id: 0x1180, name: "Ricoh Co Ltd", short_name: "Ricoh" },
    Vendor { id: 0x1217, name: "O2 Micro, Inc.", short_name: "O2Micro" },
    Vendor { id: 0x197B, name: "JMicron Technology Corp.", short_name: "JMicron" },
    Vendor { id: 0x1B21, name: "ASMedia Technology Inc.", short_name: "ASMedia" },
    Vendor { id: 0x15B3, name: "Mellanox Technologies", short_name: "Mellanox" },
    Vendor { id: 0x1AF4, name: "Red Hat, Inc.", short_name: "RedHat" },
    Vendor { id: 0x1B36, name: "Red Hat, Inc.", short_name: "RedHat" },
    Vendor { id: 0x15AD, name: "VMware", short_name: "VMware" },
    Vendor { id: 0x80EE, name: "InnoTek Systemberatung GmbH", short_name: "VirtualBox" },
    Vendor { id: 0x5853, name: "XenSource, Inc.", short_name: "Xen" },
    Vendor { id: 0x1414, name: "Microsoft Corporation", short_name: "Microsoft" },
    Vendor { id: 0x1234, name: "QEMU", short_name: "QEMU" },
    Vendor { id: 0x106B, name: "Apple Inc.", short_name: "Apple" },
    Vendor { id: 0x1D6B, name: "Linux Foundation", short_name: "Linux" },
];

/// Known PCI devices, grouped by vendor.
pub const PRODUCTS: &[Product] = &[
    // Intel chipset parts
    Product { vendor_id: 0x8086, device_id: 0x1237, name: "440FX", description: "82441FX Pentium Pro Processor to PCI Bridge" },
    Product { vendor_id: 0x8086, device_id: 0x7000, name: "PIIX3", description: "82371SB PIIX3 ISA [Natoma/Triton II]" },
    Product { vendor_id: 0x8086, device_id: 0x7010, name: "PIIX3_IDE", description: "82371SB PIIX3 IDE [Natoma/Triton II]" },
    Product { vendor_id: 0x8086, device_id: 0x7110, name: "PIIX4_ISA", description: "82371AB/EB/MB PIIX4 ISA" },
    Product { vendor_id: 0x8086, device_id: 0x7111, name: "PIIX4_IDE", description: "82371AB/EB/MB PIIX4 IDE" },
    Product { vendor_id: 0x8086, device_id: 0x7112, name: "PIIX4_USB", description: "82371AB/EB/MB PIIX4 USB" },
    Product { vendor_id: 0x8086, device_id: 0x7113, name: "PIIX4_PM", description: "82371AB/EB/MB PIIX4 ACPI" },
    Product { vendor_id: 0x8086, device_id: 0x1130, name: "i815_HB", description: "82815 815 Chipset Host Bridge and Memory Controller Hub" },
    Product { vendor_id: 0x8086, device_id: 0x244E, name: "ICH_P2P", description: "82801 PCI Bridge" },
    Product { vendor_id: 0x8086, device_id: 0x2918, name: "ICH9_LPC", description: "82801IB (ICH9) LPC Interface Controller" },
    Product { vendor_id: 0x8086, device_id: 0x2922, name: "ICH9_AHCI", description: "82801IB (ICH9) 6 port SATA Controller [AHCI mode]" },
    Product { vendor_id: 0x8086, device_id: 0x2930, name: "ICH9_SMB", description: "82801I (ICH9 Family) SMBus Controller" },
    Product { vendor_id: 0x8086, device_id: 0x293E, name: "ICH9_HDA", description: "82801I (ICH9 Family) HD Audio Controller" },
    Product { vendor_id: 0x8086, device_id: 0x29C0, name: "Q35_HB", description: "82G33/G31/P35/P31 Express DRAM Controller" },
    Product { vendor_id: 0x8086, device_id: 0x3A22, name: "ICH10_AHCI", description: "82801JI (ICH10 Family) SATA AHCI Controller" },
    // Intel network
    Product { vendor_id: 0x8086, device_id: 0x100E, name: "82540EM", description: "82540EM Gigabit Ethernet Controller" },
    Product { vendor_id: 0x8086, device_id: 0x100F, name: "82545EM", description: "82545EM Gigabit Ethernet Controller (Copper)" },
    Product { vendor_id: 0x8086, device_id: 0x10D3, name: "82574L", description: "82574L Gigabit Network Connection" },
    Product { vendor_id: 0x8086, device_id: 0x1502, name: "82579LM", description: "82579LM Gigabit Network Connection" },
    Product { vendor_id: 0x8086, device_id: 0x153A, name: "I217-LM", description: "Ethernet Connection I217-LM" },
    Product { vendor_id: 0x8086, device_id: 0x15A2, name: "I218-V", description: "Ethernet Connection I218-V" },
    Product { vendor_id: 0x8086, device_id: 0x1533, name: "I210", description: "I210 Gigabit Network Connection" },
    // Intel graphics
    Product { vendor_id: 0x8086, device_id: 0x0166, name: "IvyBridge_GT2", description: "3rd Gen Core processor Graphics Controller" },
    Product { vendor_id: 0x8086, device_id: 0x0416, name: "Haswell_GT2", description: "4th Gen Core Processor Integrated Graphics Controller" },
    Product { vendor_id: 0x8086, device_id: 0x1916, name: "Skylake_GT2", description: "Skylake GT2 [HD Graphics 520]" },
    Product { vendor_id: 0x8086, device_id: 0x5916, name: "KabyLake_GT2", description: "HD Graphics 620" },
    // AMD
    Product { vendor_id: 0x1022, device_id: 0x2000, name: "PCnet32", description: "79c970 [PCnet32 LANCE]" },
    Product { vendor_id: 0x1022, device_id: 0x1480, name: "Starship_Root", description: "Starship/Matisse Root Complex" },
    Product { vendor_id: 0x1022, device_id: 0x1483, name: "Starship_GPP", description: "Starship/Matisse GPP Bridge" },
    Product { vendor_id: 0x1022, device_id: 0x7901, name: "FCH_SATA", description: "FCH SATA Controller [AHCI mode]" },
    Product { vendor_id: 0x1022, device_id: 0x790B, name: "FCH_SMB", description: "FCH SMBus Controller" },
    Product { vendor_id: 0x1002, device_id: 0x5046, name: "Rage128_PF", description: "Rage 128 PRO Ultra AGP 4x" },
    Product { vendor_id: 0x1002, device_id: 0x67DF, name: "Ellesmere", description: "Ellesmere [Radeon RX 470/480/570/580]" },
    Product { vendor_id: 0x1002, device_id: 0x731F, name: "Navi10", description: "Navi 10 [Radeon RX 5600/5700 series]" },
    // NVIDIA
    Product { vendor_id: 0x10DE, device_id: 0x0141, name: "NV43", description: "NV43 [GeForce 6600]" },
    Product { vendor_id: 0x10DE, device_id: 0x1380, name: "GM107", description: "GM107 [GeForce GTX 750 Ti]" },
    Product { vendor_id: 0x10DE, device_id: 0x1C82, name: "GP107", description: "GP107 [GeForce GTX 1050 Ti]" },
    Product { vendor_id: 0x10DE, device_id: 0x2484, name: "GA104", description: "GA104 [GeForce RTX 3070]" },
    // Realtek
    Product { vendor_id: 0x10EC, device_id: 0x8029, name: "RTL8029", description: "RTL-8029(AS) NE2000 compatible Ethernet" },
    Product { vendor_id: 0x10EC, device_id: 0x8139, name: "RTL8139", description: "RTL-8100/8101L/8139 PCI Fast Ethernet Adapter" },
    Product { vendor_id: 0x10EC, device_id: 0x8168, name: "RTL8168", description: "RTL8111/8168/8411 PCI Express Gigabit Ethernet Controller" },
    // Broadcom
    Product { vendor_id: 0x14E4, device_id: 0x1677, name: "BCM5751", description: "NetXtreme BCM5751 Gigabit Ethernet PCI Express" },
    Product { vendor_id: 0x14E4, device_id: 0x43A0, name: "BCM4360", description: "BCM4360 802.11ac Dual Band Wireless Network Adapter" },
    // VIA
    Product { vendor_id: 0x1106, device_id: 0x0305, name: "VT8363", description: "VT8363/8365 [KT133/KM133] Host Bridge" },
    Product { vendor_id: 0x1106, device_id: 0x8305, name: "VT8363_AGP", description: "VT8363/8365 [KT133/KM133 AGP]" },
    Product { vendor_id: 0x1106, device_id: 0x0686, name: "VT82C686", description: "VT82C686 [Apollo Super South]" },
    Product { vendor_id: 0x1106, device_id: 0x0571, name: "VT82C586_IDE", description: "VT82C586A/B/VT82C686/A/B/VT823x/A/C PIPC Bus Master IDE" },
    Product { vendor_id: 0x1106, device_id: 0x3038, name: "VT83C572", description: "VT82xx/62xx/VX700/8x0/900 UHCI USB 1.1 Controller" },
    Product { vendor_id: 0x1106, device_id: 0x3058, name: "VT82C686_AC97", description: "VT82C686 AC97 Audio Controller" },
    // 3Com / classic NICs
    Product { vendor_id: 0x10B7, device_id: 0x9050, name: "3c905", description: "3c905 100BaseTX [Boomerang]" },
    Product { vendor_id: 0x10B7, device_id: 0x9200, name: "3c905C", description: "3c905C-TX/TX-M [Tornado]" },
    // Storage controllers
    Product { vendor_id: 0x1000, device_id: 0x0030, name: "53c1030", description: "53c1030 PCI-X Fusion-MPT Dual Ultra320 SCSI" },
    Product { vendor_id: 0x1000, device_id: 0x0058, name: "SAS1068E", description: "SAS1068E PCI-Express Fusion-MPT SAS" },
    Product { vendor_id: 0x11AB, device_id: 0x4320, name: "88E8001", description: "88E8001 Gigabit Ethernet Controller" },
    Product { vendor_id: 0x1B4B, device_id: 0x9230, name: "88SE9230", description: "88SE9230 PCIe 2.0 x2 4-port SATA 6 Gb/s RAID Controller" },
    // Display (virtual and classic)
    Product { vendor_id: 0x1013, device_id: 0x00B8, name: "GD5446", description: "GD 5446 [Cirrus Logic]" },
    Product { vendor_id: 0x102B, device_id: 0x0519, name: "Millennium", description: "MGA 2064W [Millennium]" },
    Product { vendor_id: 0x121A, device_id: 0x0003, name: "Banshee", description: "Voodoo Banshee" },
    Product { vendor_id: 0x5333, device_id: 0x8811, name: "Trio64", description: "86c764/765 [Trio32/64/64V+]" },
    Product { vendor_id: 0x1234, device_id: 0x1111, name: "QEMU_VGA", description: "QEMU Virtual Video Controller" },
    // Virtio / paravirtual
    Product { vendor_id: 0x1AF4, device_id: 0x1000, name: "virtio-net", description: "Virtio network device" },
    Product { vendor_id: 0x1AF4, device_id: 0x1001, name: "virtio-blk", description: "Virtio block device" },
    Product { vendor_id: 0x1AF4, device_id: 0x1002, name: "virtio-balloon", description: "Virtio memory balloon" },
    Product { vendor_id: 0x1AF4, device_id: 0x1003, name: "virtio-console", description: "Virtio console" },
    Product { vendor_id: 0x1AF4, device_id: 0x1004, name: "virtio-scsi", description: "Virtio SCSI" },
    Product { vendor_id: 0x1AF4, device_id: 0x1005, name: "virtio-rng", description: "Virtio RNG" },
    Product { vendor_id: 0x1AF4, device_id: 0x1041, name: "virtio-net-1.0", description: "Virtio 1.0 network device" },
    Product { vendor_id: 0x1AF4, device_id: 0x1042, name: "virtio-blk-1.0", description: "Virtio 1.0 block device" },
    Product { vendor_id: 0x1AF4, device_id: 0x1050, name: "virtio-gpu", description: "Virtio 1.0 GPU" },
    Product { vendor_id: 0x1B36, device_id: 0x0001, name: "QEMU_P2P", description: "QEMU PCI-PCI bridge" },
    Product { vendor_id: 0x1B36, device_id: 0x0008, name: "QEMU_HB", description: "QEMU PCIe Host bridge" },
    Product { vendor_id: 0x1B36, device_id: 0x000C, name: "QEMU_RP", description: "QEMU PCIe Root port" },
    Product { vendor_id: 0x15AD, device_id: 0x0405, name: "SVGA_II", description: "SVGA II Adapter" },
    Product { vendor_id: 0x15AD, device_id: 0x07B0, name: "VMXNET3", description: "VMXNET3 Ethernet Controller" },
    Product { vendor_id: 0x15AD, device_id: 0x07C0, name: "PVSCSI", description: "PVSCSI SCSI Controller" },
    Product { vendor_id: 0x80EE, device_id: 0xBEEF, name: "VBoxVGA", description: "VirtualBox Graphics Adapter" },
    Product { vendor_id: 0x80EE, device_id: 0xCAFE, name: "VBoxGuest", description: "VirtualBox Guest Service" },
    Product { vendor_id: 0x5853, device_id: 0x0001, name: "Xen_Platform", description: "Xen Platform Device" },
    Product { vendor_id: 0x1414, device_id: 0x5353, name: "HyperV_Video", description: "Hyper-V virtual VGA" },
    // USB controllers
    Product { vendor_id: 0x1033, device_id: 0x0194, name: "uPD720200", description: "uPD720200 USB 3.0 Host Controller" },
    Product { vendor_id: 0x104C, device_id: 0x8241, name: "TUSB73x0", description: "TUSB73x0 SuperSpeed USB 3.0 xHCI Host Controller" },
    Product { vendor_id: 0x1B21, device_id: 0x1042, name: "ASM1042", description: "ASM1042 SuperSpeed USB Host Controller" },
];

/// Full registered name for a vendor id.
pub fn vendor_name(id: u16) -> Option<&'static str> {
    VENDORS.iter().find(|v| v.id == id).map(|v| v.name)
}

/// Short display name for a vendor id.
pub fn vendor_short_name(id: u16) -> Option<&'static str> {
    VENDORS.iter().find(|v| v.id == id).map(|v| v.short_name)
}

/// Short part name for a (vendor id, device id) pair.
pub fn device_name(vendor_id: u16, device_id: u16) -> Option<&'static str> {
    PRODUCTS
        .iter()
        .find(|p| p.vendor_id == vendor_id && p.device_id == device_id)
        .map(|p| p.name)
}

/// Datasheet-style description for a (vendor id, device id) pair.
pub fn device_description(vendor_id: u16, device_id: u16) -> Option<&'static str> {
    PRODUCTS
        .iter()
        .find(|p| p.vendor_id == vendor_id && p.device_id == device_id)
        .map(|p| p.description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vendor_resolves() {
        assert_eq!(vendor_name(0x8086), Some("Intel Corporation"));
        assert_eq!(vendor_short_name(0x1AF4), Some("RedHat"));
    }

    #[test]
    fn unknown_vendor_is_none() {
        assert_eq!(vendor_name(0xFFFF), None);
        assert_eq!(vendor_short_name(0x0000), None);
    }

    #[test]
    fn device_lookup_is_scoped_to_vendor() {
        assert_eq!(device_name(0x1AF4, 0x1000), Some("virtio-net"));
        // Same device id under a different vendor must not match.
        assert_eq!(device_name(0x8086, 0x1000), None);
    }

    #[test]
    fn device_description_resolves() {
        assert_eq!(
            device_description(0x8086, 0x1237),
            Some("82441FX Pentium Pro Processor to PCI Bridge")
        );
        assert_eq!(device_description(0x8086, 0xFFFF), None);
    }
}
