//! Bus topology reconstruction.
//!
//! Rebuilds the physical bridge hierarchy from the flat registry: the
//! unique host bridge roots the tree, and every other device hangs under
//! the bridge whose secondary bus equals its own bus number. The tree is a
//! second view over the registry arena, holding parent links and nesting
//! depths keyed by [`DeviceId`] rather than a copy of the devices.

use alloc::vec;
use alloc::vec::Vec;

use log::{debug, warn};

use crate::error::{Result, ScanError};
use crate::registry::{DeviceId, DeviceRegistry};

#[derive(Debug, Clone, Default)]
struct TreeNode {
    parent: Option<DeviceId>,
    children: Vec<DeviceId>,
    nesting: u8,
}

/// The reconstructed parent→children bridge tree.
#[derive(Debug)]
pub struct Topology {
    root: DeviceId,
    nodes: Vec<TreeNode>,
}

impl Topology {
    /// Build the tree over a completed registry.
    ///
    /// Phase 1 finds the unique host bridge; zero or several host bridges
    /// fail the build, since descent has no defined behavior without
    /// exactly one root. Phase 2 recursively attaches children by
    /// secondary-bus equality, siblings in flat order, descending into
    /// each PCI-to-PCI bridge before continuing its sibling scan.
    pub fn build(registry: &DeviceRegistry) -> Result<Self> {
        let mut root = None;
        for (id, device) in registry.iter() {
            if device.is_host_bridge() {
                if root.is_some() {
                    return Err(ScanError::MultipleHostBridges);
                }
                root = Some(id);
            }
        }
        let root = match root {
            Some(id) => id,
            None => return Err(ScanError::NoHostBridge),
        };
        debug!(
            "topology root is host bridge at {}",
            registry.get(root).location
        );

        let mut topology = Self {
            root,
            nodes: vec![TreeNode::default(); registry.len()],
        };
        topology.attach_children(registry, root, 0);

        for (id, device) in registry.iter() {
            if id != root && topology.nodes[id.index()].parent.is_none() {
                warn!(
                    "{} sits on bus {:#04x} that no bridge forwards to",
                    device.location, device.location.bus
                );
            }
        }

        Ok(topology)
    }

    /// Scan the entire flat ordering and attach every device on `bridge`'s
    /// downstream bus. Host bridges never reattach, and neither does a
    /// device that already holds a parent (keeps malformed secondary-bus
    /// cycles finite).
    fn attach_children(&mut self, registry: &DeviceRegistry, bridge: DeviceId, nesting: u8) {
        let secondary = match registry.get(bridge).secondary_bus() {
            Some(bus) => bus,
            None => return,
        };
        let depth = nesting.saturating_add(1);
        for (id, device) in registry.iter() {
            if device.location.bus != secondary || device.is_host_bridge() {
                continue;
            }
            if self.nodes[id.index()].parent.is_some() {
                continue;
            }
            self.nodes[id.index()].parent = Some(bridge);
            self.nodes[id.index()].nesting = depth;
            self.nodes[bridge.index()].children.push(id);
            debug!(
                "attached {} under {} at depth {}",
                device.location,
                registry.get(bridge).location,
                depth
            );
            if device.is_pci_bridge() {
                self.attach_children(registry, id, depth);
            }
        }
    }

    /// The host bridge at the root of the tree.
    pub fn root(&self) -> DeviceId {
        self.root
    }

    /// Parent bridge of a device; `None` for the root and for devices
    /// outside the tree.
    pub fn parent(&self, id: DeviceId) -> Option<DeviceId> {
        self.nodes[id.index()].parent
    }

    /// Children of a device, in flat-order attachment sequence.
    pub fn children(&self, id: DeviceId) -> &[DeviceId] {
        &self.nodes[id.index()].children
    }

    /// Nesting depth in bridge hops from the root (root = 0).
    pub fn nesting(&self, id: DeviceId) -> u8 {
        self.nodes[id.index()].nesting
    }

    /// Whether a device is attached to the tree.
    pub fn contains(&self, id: DeviceId) -> bool {
        id == self.root || self.nodes[id.index()].parent.is_some()
    }

    /// Depth-first traversal of the tree, root first, siblings in flat
    /// order. This is the order an indented tree view renders in.
    pub fn walk(&self) -> TreeWalk<'_> {
        TreeWalk {
            topology: self,
            stack: vec![self.root],
        }
    }
}

/// Iterator behind [`Topology::walk`].
#[derive(Debug)]
pub struct TreeWalk<'a> {
    topology: &'a Topology,
    stack: Vec<DeviceId>,
}

impl<'a> Iterator for TreeWalk<'a> {
    type Item = DeviceId;

    fn next(&mut self) -> Option<DeviceId> {
        let id = self.stack.pop()?;
        for &child in self.topology.nodes[id.index()].children.iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
