#![forbid(unsafe_code)]

//! Configuration errors.
//!
//! Nothing on the geometry or animation paths returns an error: degenerate
//! geometry floors at zero and integration mistakes are debug assertions.
//! The only fallible surface is validating a [`PopoverConfig`](crate::config::PopoverConfig).

use std::fmt;

/// A [`PopoverConfig`](crate::config::PopoverConfig) value out of range.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A duration that must be positive was zero.
    ZeroDuration { field: &'static str },
    /// Insets must be finite and non-negative.
    InvalidInsets { width: f64, height: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDuration { field } => write!(f, "{field} must be positive"),
            Self::InvalidInsets { width, height } => {
                write!(
                    f,
                    "content insets must be finite and non-negative, got {width}x{height}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_field() {
        let err = ConfigError::ZeroDuration {
            field: "transition_duration",
        };
        assert_eq!(err.to_string(), "transition_duration must be positive");
    }

    #[test]
    fn display_reports_insets() {
        let err = ConfigError::InvalidInsets {
            width: -1.0,
            height: 44.0,
        };
        assert!(err.to_string().contains("-1x44"));
    }
}
