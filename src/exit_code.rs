//! Process exit statuses.
//!
//! The numeric values are part of the command-line contract and never change:
//!
//! | Status       | Code |
//! |--------------|------|
//! | `Success`    | 0    |
//! | `Failure`    | 1    |
//! | `ParseError` | 2    |
//! | `Canceled`   | 3    |

use crate::dispatch::Outcome;
use crate::error::SelectorError;

/// Exit status of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    ParseError = 2,
    Canceled = 3,
}

/// Exit code used when a fatal error escapes the command.
pub const FATAL_EXIT_CODE: u8 = 101;

impl ExitCode {
    /// The numeric process exit code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Translate a validation-then-dispatch result.
    pub fn from_result(result: &Result<Outcome, SelectorError>) -> Self {
        match result {
            Ok(outcome) => Self::from(*outcome),
            Err(_) => Self::ParseError,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Succeeded => Self::Success,
            Outcome::OperationFailed => Self::Failure,
            Outcome::Canceled => Self::Canceled,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.code())
    }
}
