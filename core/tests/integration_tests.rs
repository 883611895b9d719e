//! End-to-end tests over a full mock machine

mod common;

use common::BusBuilder;
use pciscope_core::{CommandFlags, Inventory, Location, StatusFlags};

/// An i440FX-flavoured machine: host bridge, multifunction PIIX3,
/// VGA, e1000, and a PCI-PCI bridge with a virtio NIC behind it.
fn build_machine() -> common::MockConfigSpace {
    let mut builder = BusBuilder::new();
    builder.add_host_bridge(0);

    let isa = builder.add_endpoint(Location::new(0, 1, 0), 0x8086, 0x7000);
    isa.set_class(0x06, 0x01, 0x00);
    isa.set_multifunction();

    let ide = builder.add_endpoint(Location::new(0, 1, 1), 0x8086, 0x7010);
    ide.set_class(0x01, 0x01, 0x80);
    ide.set_bar(4, 0x0000_C041, 0xFFFF_FFF1); // 16-byte I/O

    let vga = builder.add_endpoint(Location::new(0, 2, 0), 0x1234, 0x1111);
    vga.set_class(0x03, 0x00, 0x00);
    vga.set_bar(0, 0xFD00_0008, 0xFF00_0008); // 16 MiB prefetchable
    vga.set_bar(2, 0xFEBF_0000, 0xFFFF_F000); // 4 KiB registers

    let nic = builder.add_endpoint(Location::new(0, 3, 0), 0x8086, 0x100E);
    nic.set_bar(0, 0xFEBC_0000, 0xFFFE_0000); // 128 KiB
    nic.set_bar(1, 0x0000_C001, 0xFFFF_FFC1); // 64-byte I/O

    builder.add_pci_bridge(0, 4, 1);

    let virtio = builder.add_endpoint(Location::new(1, 5, 0), 0x1AF4, 0x1000);
    virtio.set_bar(0, 0x0000_C081, 0xFFFF_FFE1); // 32-byte I/O
    virtio.set_bar(1, 0xFE00_0000, 0xFFFF_F000); // 4 KiB
    virtio.set_bar(4, 0xFE00_400C, 0xFFFF_C00C); // 16 KiB, 64-bit prefetchable
    virtio.set_bar(5, 0x0000_0000, 0xFFFF_FFFF); // upper half of BAR4

    builder.build()
}

#[test]
fn test_full_machine_inventory() {
    let mut space = build_machine();
    let inventory = Inventory::scan(&mut space).expect("scan should succeed");
    let registry = inventory.registry();
    assert_eq!(registry.len(), 7);

    let virtio_id = registry.last().expect("non-empty registry");
    let virtio = registry.get(virtio_id);
    assert_eq!(virtio.location, Location::new(1, 5, 0));
    assert_eq!(virtio.vendor_description, Some("Red Hat, Inc."));
    assert_eq!(virtio.device_description, Some("Virtio network device"));
    assert_eq!(virtio.bar_sizes, [0x20, 0x1000, 0, 0, 0x4000, 0]);
    assert_eq!(
        virtio.bar_sizes[5], 0,
        "the continuation half of a 64-bit pair has no size of its own"
    );

    // Bridge windows are not BARs; only the two real slots get sized.
    let bridge = inventory
        .registry()
        .iter()
        .find(|(_, device)| device.is_pci_bridge())
        .map(|(id, _)| id)
        .expect("one PCI-PCI bridge");
    assert_eq!(registry.get(bridge).header.bar_slots(), 2);
    assert_eq!(registry.get(bridge).secondary_bus(), Some(1));
}

#[test]
fn test_register_views_survive_decode() {
    let mut space = build_machine();
    let inventory = Inventory::scan(&mut space).expect("scan should succeed");

    let (_, isa) = inventory
        .registry()
        .iter()
        .find(|(_, device)| device.location == Location::new(0, 1, 0))
        .expect("ISA bridge present");
    assert!(isa.header.common.is_multifunction());

    let (_, ide) = inventory
        .registry()
        .iter()
        .find(|(_, device)| device.location == Location::new(0, 1, 1))
        .expect("IDE function present");
    assert_eq!(ide.header.common.prog_if, 0x80);
    assert!(ide
        .header
        .common
        .command_flags()
        .contains(CommandFlags::MEMORY_SPACE | CommandFlags::BUS_MASTER));
    assert!(ide
        .header
        .common
        .status_flags()
        .contains(StatusFlags::CAPABILITIES_LIST));
}

#[test]
fn test_cursor_moves_over_the_inventory() {
    let mut space = build_machine();
    let mut inventory = Inventory::scan(&mut space).expect("scan should succeed");

    let first = inventory.selected_device().expect("cursor seeds on first");
    assert_eq!(first.location, Location::new(0, 0, 0));

    inventory.move_next();
    inventory.move_next();
    let ide = inventory.selected_device().expect("selection never clears");
    assert_eq!(ide.location, Location::new(0, 1, 1));

    inventory.move_previous();
    let isa = inventory.selected_device().expect("selection never clears");
    assert_eq!(isa.location, Location::new(0, 1, 0));

    // Run far past both ends; the cursor clamps instead of wrapping.
    for _ in 0..20 {
        inventory.move_next();
    }
    let last = inventory.selected_device().expect("selection never clears");
    assert_eq!(last.location, Location::new(1, 5, 0));
    for _ in 0..20 {
        inventory.move_previous();
    }
    let first = inventory.selected_device().expect("selection never clears");
    assert_eq!(first.location, Location::new(0, 0, 0));
}

#[test]
fn test_flat_order_bookkeeping() {
    let mut space = build_machine();
    let inventory = Inventory::scan(&mut space).expect("scan should succeed");
    let registry = inventory.registry();

    let first = registry.first();
    let last = registry.last();
    assert_eq!(registry.distance(first, last), registry.len() - 1);
    assert_eq!(registry.distance(last, first), registry.len() - 1);
    assert_eq!(registry.distance(first, first), 0);
    assert_eq!(registry.distance(None, last), 0);

    assert_eq!(registry.count_before(first), 0);
    assert_eq!(registry.count_after(last), 0);
    assert_eq!(registry.count_before(last), registry.len() - 1);
    assert_eq!(registry.count_after(first), registry.len() - 1);
}
