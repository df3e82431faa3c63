//! Core identifier types using newtype patterns for type safety.
//!
//! Both identifiers are parsed from, and rendered back to, a single canonical
//! text form. Anything else is rejected with a [`FormatError`].

mod bus_id;
mod hardware_id;

pub use bus_id::BusId;
pub use hardware_id::HardwareId;

/// Error type for identifier parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("invalid bus id '{0}' (expected <bus>-<port>, e.g. 3-42)")]
    BusId(String),
    #[error("invalid hardware id '{0}' (expected <vid>:<pid>, e.g. 0123:cdef)")]
    HardwareId(String),
}
