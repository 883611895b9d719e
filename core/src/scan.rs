//! Scan orchestration.
//!
//! Walks every candidate location in ascending bus/device/function order,
//! decodes each present function, probes its BARs, resolves its
//! enumeration index, and accumulates the records in a registry. Once
//! enumeration completes, the topology is built over the registry and the
//! cursor is seeded on the first device. The whole result is returned as
//! one [`Inventory`]; there is no global state, and a failed scan leaves
//! nothing behind.

use log::{debug, info};

use crate::bar;
use crate::config::{ConfigAccess, Location};
use crate::cursor::SelectionCursor;
use crate::device::{Device, ENUMERATION_INDEX_NOT_FOUND};
use crate::error::Result;
use crate::header::ConfigHeader;
use crate::registry::{DeviceId, DeviceRegistry};
use crate::topology::Topology;

/// A completed scan: the flat registry, the bridge tree over it, and the
/// selection cursor.
///
/// The registry and topology are immutable once built; only the cursor
/// moves between input events.
#[derive(Debug)]
pub struct Inventory {
    registry: DeviceRegistry,
    topology: Topology,
    cursor: SelectionCursor,
}

impl Inventory {
    /// Run a full scan over a hardware access collaborator.
    ///
    /// Functions 1-7 of a device are visited only when function 0 is
    /// present and flags itself multifunction. Any access failure aborts
    /// the scan immediately; so does a registry without exactly one host
    /// bridge.
    pub fn scan<A: ConfigAccess>(access: &mut A) -> Result<Self> {
        info!("starting PCI bus scan");
        let mut registry = DeviceRegistry::new();

        for bus in 0..=u8::MAX {
            for device in 0..32u8 {
                for function in 0..8u8 {
                    let location = Location::new(bus, device, function);
                    if !access.device_present(location)? {
                        if function == 0 {
                            break;
                        }
                        continue;
                    }
                    let id = record(access, &mut registry, location)?;
                    if function == 0 && !registry.get(id).header.common.is_multifunction() {
                        break;
                    }
                }
            }
        }

        info!("scan complete: {} functions discovered", registry.len());
        let topology = Topology::build(&registry)?;
        let cursor = SelectionCursor::at_first(&registry);

        Ok(Self {
            registry,
            topology,
            cursor,
        })
    }

    /// The flat discovery-ordered registry.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// The bridge tree built over the registry.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The selection cursor state.
    pub fn cursor(&self) -> &SelectionCursor {
        &self.cursor
    }

    /// Id of the currently selected device.
    pub fn selected(&self) -> Option<DeviceId> {
        self.cursor.selected()
    }

    /// The currently selected device record.
    pub fn selected_device(&self) -> Option<&Device> {
        self.cursor.selected().map(|id| self.registry.get(id))
    }

    /// Move the selection one device back in flat order.
    pub fn move_previous(&mut self) {
        self.cursor.move_previous(&self.registry);
    }

    /// Move the selection one device forward in flat order.
    pub fn move_next(&mut self) {
        self.cursor.move_next(&self.registry);
    }
}

/// Decode one present function, fill in its derived data, and append it.
fn record<A: ConfigAccess>(
    access: &mut A,
    registry: &mut DeviceRegistry,
    location: Location,
) -> Result<DeviceId> {
    let block = access.read_block(location)?;
    let header = ConfigHeader::decode(&block);

    let mut device = Device::new(location, header);
    device.bar_sizes = bar::probe_all(access, location, header.bar_slots())?;
    device.enumeration_index = resolve_enumeration_index(
        access,
        location,
        header.common.vendor_id,
        header.common.device_id,
    )?;

    #[cfg(feature = "names")]
    {
        device.vendor_description = pciscope_ids::vendor_name(header.common.vendor_id);
        device.device_description =
            pciscope_ids::device_description(header.common.vendor_id, header.common.device_id);
    }

    debug!(
        "{}: {:04x}:{:04x} {}",
        location,
        header.common.vendor_id,
        header.common.device_id,
        device.class_name()
    );
    Ok(registry.append(device))
}

/// Ordinal of `location` among functions sharing its vendor/device pair,
/// probed through the collaborator one occurrence at a time. Exhausting
/// the search space yields the 0xFF sentinel, which is data, not an error.
fn resolve_enumeration_index<A: ConfigAccess>(
    access: &mut A,
    location: Location,
    vendor_id: u16,
    device_id: u16,
) -> Result<u8> {
    for occurrence in 0..ENUMERATION_INDEX_NOT_FOUND {
        match access.find_nth(vendor_id, device_id, occurrence)? {
            Some(found) if found == location => return Ok(occurrence),
            Some(_) => {}
            None => break,
        }
    }
    Ok(ENUMERATION_INDEX_NOT_FOUND)
}
