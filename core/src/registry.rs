//! The flat, discovery-ordered device registry.
//!
//! A growth-only arena owns every [`Device`]; stable indices double as
//! flat-order positions, so bidirectional navigation and the positional
//! arithmetic the presentation layer needs are plain index operations.

use alloc::vec::Vec;

use crate::device::Device;

/// Stable handle to a device in the registry arena.
///
/// Minted by [`DeviceRegistry::append`] in discovery order; comparing ids
/// compares flat-order positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeviceId(usize);

impl DeviceId {
    /// Position of the device in the flat discovery order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns all discovered devices in strict discovery order.
///
/// Write-once after the scan phase: devices are only appended, never
/// removed or reordered.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    /// Add a device at the tail of the flat ordering.
    pub fn append(&mut self, device: Device) -> DeviceId {
        let id = DeviceId(self.devices.len());
        self.devices.push(device);
        id
    }

    /// Look up a device by its id.
    pub fn get(&self, id: DeviceId) -> &Device {
        &self.devices[id.0]
    }

    /// Number of devices discovered.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the scan found nothing.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// First device in flat order.
    pub fn first(&self) -> Option<DeviceId> {
        if self.devices.is_empty() {
            None
        } else {
            Some(DeviceId(0))
        }
    }

    /// Last device in flat order.
    pub fn last(&self) -> Option<DeviceId> {
        self.devices.len().checked_sub(1).map(DeviceId)
    }

    /// The device after `id` in flat order, if any.
    pub fn next_of(&self, id: DeviceId) -> Option<DeviceId> {
        if id.0 + 1 < self.devices.len() {
            Some(DeviceId(id.0 + 1))
        } else {
            None
        }
    }

    /// The device before `id` in flat order, if any.
    pub fn prev_of(&self, id: DeviceId) -> Option<DeviceId> {
        id.0.checked_sub(1).map(DeviceId)
    }

    /// All devices with their ids, in flat order.
    pub fn iter(&self) -> impl Iterator<Item = (DeviceId, &Device)> {
        self.devices
            .iter()
            .enumerate()
            .map(|(index, device)| (DeviceId(index), device))
    }

    /// Hops along the flat ordering between two devices.
    ///
    /// Zero for a device and itself, zero when either reference is absent,
    /// and symmetric in its arguments.
    pub fn distance(&self, a: Option<DeviceId>, b: Option<DeviceId>) -> usize {
        match (a, b) {
            (Some(a), Some(b)) => a.0.abs_diff(b.0),
            _ => 0,
        }
    }

    /// Devices strictly before `id` in flat order; zero when absent.
    pub fn count_before(&self, id: Option<DeviceId>) -> usize {
        id.map_or(0, |id| id.0)
    }

    /// Devices strictly after `id` in flat order; zero when absent.
    pub fn count_after(&self, id: Option<DeviceId>) -> usize {
        id.map_or(0, |id| self.devices.len() - 1 - id.0)
    }
}
