//! Detach target selection.
//!
//! clap only captures which selector options were given and with what raw
//! values. [`SelectorOptions::validate`] then applies the checks in a fixed
//! order so the first structural problem is always the one reported.

use crate::error::SelectorError;
use crate::types::{BusId, FormatError, HardwareId};
use clap::Args;
use std::fmt;
use std::str::FromStr;

/// The three mutually exclusive selector options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorOption {
    All,
    BusId,
    HardwareId,
}

impl fmt::Display for SelectorOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "--all"),
            Self::BusId => write!(f, "--busid"),
            Self::HardwareId => write!(f, "--hardware-id"),
        }
    }
}

/// The validated target of a detach operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Every device currently shared.
    All,
    /// The device at a bus position.
    ByBus(BusId),
    /// Every device with a vendor/product id.
    ByHardware(HardwareId),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all devices"),
            Self::ByBus(id) => write!(f, "device at bus id {}", id),
            Self::ByHardware(id) => write!(f, "devices with hardware id {}", id),
        }
    }
}

/// Raw selector options as they appeared on the command line.
///
/// The outer `Option` records presence, the inner one the value.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorOptions {
    /// Detach all devices (takes no value)
    #[arg(short = 'a', long = "all", require_equals = true, value_name = "NONE")]
    pub all: Option<Option<String>>,

    /// Detach the device at the given bus id
    #[arg(short = 'b', long = "busid", value_name = "BUSID")]
    pub bus_id: Option<Option<String>>,

    /// Detach all devices with the given hardware id
    #[arg(short = 'i', long = "hardware-id", value_name = "VID:PID")]
    pub hardware_id: Option<Option<String>>,

    /// Tokens not consumed by any option
    #[arg(value_name = "ARGS", hide = true)]
    pub stray: Vec<String>,
}

impl SelectorOptions {
    /// Selector options that were supplied, in declaration order.
    fn supplied(&self) -> Vec<SelectorOption> {
        let mut supplied = Vec::with_capacity(3);
        if self.all.is_some() {
            supplied.push(SelectorOption::All);
        }
        if self.bus_id.is_some() {
            supplied.push(SelectorOption::BusId);
        }
        if self.hardware_id.is_some() {
            supplied.push(SelectorOption::HardwareId);
        }
        supplied
    }

    /// Resolve the options into exactly one [`Selector`].
    pub fn validate(&self) -> Result<Selector, SelectorError> {
        let option = match self.supplied().as_slice() {
            [] => return Err(SelectorError::MissingSelector),
            [option] => *option,
            [first, second, ..] => {
                return Err(SelectorError::ConflictingSelectors(*first, *second));
            }
        };

        if let Some(Some(value)) = &self.all {
            return Err(SelectorError::UnexpectedArgument {
                option,
                value: value.clone(),
            });
        }

        let selector = match option {
            SelectorOption::All => Selector::All,
            SelectorOption::BusId => Selector::ByBus(parse_value(option, &self.bus_id)?),
            SelectorOption::HardwareId => {
                Selector::ByHardware(parse_value(option, &self.hardware_id)?)
            }
        };

        if let Some(token) = self.stray.first() {
            return Err(SelectorError::StrayArgument(token.clone()));
        }

        Ok(selector)
    }
}

fn parse_value<T>(
    option: SelectorOption,
    value: &Option<Option<String>>,
) -> Result<T, SelectorError>
where
    T: FromStr<Err = FormatError>,
{
    let text = value
        .as_ref()
        .and_then(|v| v.as_deref())
        .ok_or(SelectorError::MissingArgument(option))?;

    text.parse().map_err(|source| SelectorError::InvalidArgument {
        option,
        value: text.to_string(),
        source,
    })
}
