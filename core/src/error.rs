//! Error types for PCI scan operations

use core::fmt;

use crate::config::Location;

/// Result type for scan operations
pub type Result<T> = core::result::Result<T, ScanError>;

/// Errors that can occur while scanning and modeling the bus
///
/// Every variant is terminal for the scan that raised it: register state may
/// be left inconsistent after a failed access (especially mid-BAR-probe), and
/// the tree build has no defined behavior without exactly one host bridge, so
/// there is no retry or partial-continuation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// A configuration register read failed
    ReadFailed {
        /// Device the access targeted
        location: Location,
        /// Byte offset within configuration space
        offset: u8,
    },

    /// A configuration register write failed
    WriteFailed {
        /// Device the access targeted
        location: Location,
        /// Byte offset within configuration space
        offset: u8,
    },

    /// No device classified as a host bridge was found
    NoHostBridge,

    /// More than one device classified as a host bridge was found
    MultipleHostBridges,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { location, offset } => {
                write!(f, "config read failed at {} offset {:#04x}", location, offset)
            }
            Self::WriteFailed { location, offset } => {
                write!(f, "config write failed at {} offset {:#04x}", location, offset)
            }
            Self::NoHostBridge => write!(f, "no host bridge present"),
            Self::MultipleHostBridges => write!(f, "more than one host bridge present"),
        }
    }
}
