//! Vendor/product identification of a USB device model.

use super::FormatError;
use std::fmt;
use std::str::FromStr;

/// A USB vendor id and product id pair, rendered as `<vid>:<pid>` in
/// four lowercase hex digits each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareId {
    vendor: u16,
    product: u16,
}

impl HardwareId {
    /// Create a hardware id from vendor and product ids.
    #[inline]
    pub const fn new(vendor: u16, product: u16) -> Self {
        Self { vendor, product }
    }

    /// The USB vendor id.
    #[inline]
    pub const fn vendor(self) -> u16 {
        self.vendor
    }

    /// The USB product id.
    #[inline]
    pub const fn product(self) -> u16 {
        self.product
    }
}

fn parse_group(s: &str) -> Option<u16> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(s, 16).ok()
}

impl FromStr for HardwareId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FormatError::HardwareId(s.to_string());

        let (vendor, product) = s.split_once(':').ok_or_else(invalid)?;
        let vendor = parse_group(vendor).ok_or_else(invalid)?;
        let product = parse_group(product).ok_or_else(invalid)?;

        Ok(Self { vendor, product })
    }
}

impl fmt::Display for HardwareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor, self.product)
    }
}
