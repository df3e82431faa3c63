//! Bus position of a USB device.

use super::FormatError;
use std::fmt;
use std::str::FromStr;

/// A device's position on the bus topology, rendered as `<bus>-<port>`.
///
/// Ordering is structural: bus first, then port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusId {
    bus: u16,
    port: u16,
}

impl BusId {
    /// Create a bus id from its components.
    #[inline]
    pub const fn new(bus: u16, port: u16) -> Self {
        Self { bus, port }
    }

    /// The bus number.
    #[inline]
    pub const fn bus(self) -> u16 {
        self.bus
    }

    /// The port number on the bus.
    #[inline]
    pub const fn port(self) -> u16 {
        self.port
    }
}

/// Parse one decimal component: digits only, no sign, no leading zeros.
fn parse_component(s: &str) -> Option<u16> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

impl FromStr for BusId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FormatError::BusId(s.to_string());

        let (bus, port) = s.split_once('-').ok_or_else(invalid)?;
        let bus = parse_component(bus).ok_or_else(invalid)?;
        let port = parse_component(port).ok_or_else(invalid)?;

        Ok(Self { bus, port })
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.bus, self.port)
    }
}
