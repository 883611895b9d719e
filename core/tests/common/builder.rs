use pciscope_core::Location;

use crate::common::{MockConfigSpace, MockFunction};

/// Assembles populated mock buses for scan and topology tests.
pub struct BusBuilder {
    space: MockConfigSpace,
}

impl BusBuilder {
    pub fn new() -> Self {
        Self {
            space: MockConfigSpace::new(),
        }
    }

    /// Host bridge at 00:`device`.0, modelled on the i440FX.
    pub fn add_host_bridge(&mut self, device: u8) {
        let mut function = MockFunction::new(0x8086, 0x1237);
        function.set_class(0x06, 0x00, 0x00);
        self.space.insert(Location::new(0, device, 0), function);
    }

    /// PCI-to-PCI bridge on `bus` forwarding to `secondary`.
    pub fn add_pci_bridge(&mut self, bus: u8, device: u8, secondary: u8) {
        let mut function = MockFunction::new(0x1B36, 0x0001);
        function.set_class(0x06, 0x04, 0x00);
        function.set_header_type(0x01);
        function.set_buses(bus, secondary, secondary);
        self.space.insert(Location::new(bus, device, 0), function);
    }

    /// Plain endpoint; customize further through the returned handle.
    pub fn add_endpoint(
        &mut self,
        location: Location,
        vendor_id: u16,
        device_id: u16,
    ) -> &mut MockFunction {
        self.space
            .insert(location, MockFunction::new(vendor_id, device_id));
        self.space
            .functions
            .get_mut(&location)
            .expect("just inserted")
    }

    pub fn build(self) -> MockConfigSpace {
        self.space
    }
}
