//! The selection cursor.
//!
//! Tracks which device is currently highlighted. The cursor owns nothing
//! but an id into the registry arena and only ever moves along the flat
//! ordering; boundary moves are no-ops, so repeated movement past either
//! end is harmless.

use crate::registry::{DeviceId, DeviceRegistry};

/// Currently selected device within the flat ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    selected: Option<DeviceId>,
}

impl SelectionCursor {
    /// A cursor with nothing selected.
    pub fn new() -> Self {
        Self { selected: None }
    }

    /// A cursor on the first device of `registry`, when one exists.
    pub fn at_first(registry: &DeviceRegistry) -> Self {
        Self {
            selected: registry.first(),
        }
    }

    /// The selected device, if any.
    pub fn selected(&self) -> Option<DeviceId> {
        self.selected
    }

    /// Move one step back in flat order; no-op at the first device or
    /// with nothing selected.
    pub fn move_previous(&mut self, registry: &DeviceRegistry) {
        if let Some(current) = self.selected {
            if let Some(previous) = registry.prev_of(current) {
                self.selected = Some(previous);
            }
        }
    }

    /// Move one step forward in flat order; no-op at the last device or
    /// with nothing selected.
    pub fn move_next(&mut self, registry: &DeviceRegistry) {
        if let Some(current) = self.selected {
            if let Some(next) = registry.next_of(current) {
                self.selected = Some(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Location;
    use crate::device::Device;
    use crate::header::{blocks, ConfigHeader};

    fn registry_of(count: u8) -> DeviceRegistry {
        let mut registry = DeviceRegistry::new();
        for device in 0..count {
            registry.append(Device::new(
                Location::new(0, device, 0),
                ConfigHeader::decode(&blocks::device(0x8086, 0x100E, 0x02, 0x00)),
            ));
        }
        registry
    }

    #[test]
    fn starts_on_the_first_device() {
        let registry = registry_of(3);
        let cursor = SelectionCursor::at_first(&registry);
        assert_eq!(cursor.selected(), registry.first());
    }

    #[test]
    fn empty_registry_selects_nothing() {
        let registry = DeviceRegistry::new();
        let mut cursor = SelectionCursor::at_first(&registry);
        assert_eq!(cursor.selected(), None);
        cursor.move_next(&registry);
        cursor.move_previous(&registry);
        assert_eq!(cursor.selected(), None);
    }

    #[test]
    fn movement_clamps_at_both_ends() {
        let registry = registry_of(3);
        let mut cursor = SelectionCursor::at_first(&registry);

        cursor.move_previous(&registry);
        assert_eq!(cursor.selected(), registry.first());

        cursor.move_next(&registry);
        cursor.move_next(&registry);
        assert_eq!(cursor.selected(), registry.last());

        for _ in 0..4 {
            cursor.move_next(&registry);
        }
        assert_eq!(cursor.selected(), registry.last());

        for _ in 0..8 {
            cursor.move_previous(&registry);
        }
        assert_eq!(cursor.selected(), registry.first());
    }
}
