#![forbid(unsafe_code)]

//! CardPop error model and graceful degradation.
//!
//! # Design Principles
//!
//! 1. **No errors on the hot path**: fitting and animation never fail;
//!    degenerate geometry floors at zero instead.
//! 2. **Domain-specific errors**: configuration validation and
//!    configuration loading each have their own typed error.
//! 3. **Graceful degradation**: every variant maps to a
//!    [`DegradationAction`] so a host can keep presenting with defaults
//!    instead of giving up.

use std::fmt;
use std::path::PathBuf;

pub use cardpop_presentation::error::ConfigError;

// ── Domain-Specific Error Types ─────────────────────────────────────────

/// Reading a configuration file failed.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not a valid configuration document.
    Parse { path: PathBuf, message: String },
}

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for CardPop.
///
/// Use [`Error::degradation`] to pick a recovery action.
#[derive(Debug)]
pub enum Error {
    /// A configuration value is out of range.
    Config(ConfigError),
    /// A configuration file could not be loaded.
    Load(LoadError),
    /// Raw I/O error (trace output and the like).
    Io(std::io::Error),
}

/// Standard result type for CardPop APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Graceful Degradation ────────────────────────────────────────────────

/// What a host should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationAction {
    /// Present with the default configuration.
    UseDefaults,
    /// Keep going without the failing side channel (trace output).
    Continue,
    /// Nothing sensible to fall back to.
    Shutdown,
}

impl Error {
    /// Determine the graceful degradation action for this error.
    pub fn degradation(&self) -> DegradationAction {
        match self {
            Self::Config(_) => DegradationAction::UseDefaults,
            Self::Load(LoadError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                DegradationAction::UseDefaults
            }
            Self::Load(LoadError::Io { .. }) => DegradationAction::Shutdown,
            Self::Load(LoadError::Parse { .. }) => DegradationAction::UseDefaults,
            Self::Io(_) => DegradationAction::Continue,
        }
    }

    /// Error type label for tracing.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Load(_) => "load",
            Self::Io(_) => "io",
        }
    }

    /// Whether the error is recoverable (does not require shutdown).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.degradation(), DegradationAction::Shutdown)
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "reading {}: {source}", path.display()),
            Self::Parse { path, message } => write!(f, "parsing {}: {message}", path.display()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Load(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
        }
    }
}

impl fmt::Display for DegradationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UseDefaults => write!(f, "use_defaults"),
            Self::Continue => write!(f, "continue"),
            Self::Shutdown => write!(f, "shutdown"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Load(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Self::Load(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;
    use std::io;

    use super::*;

    fn io_load(kind: io::ErrorKind) -> Error {
        Error::from(LoadError::Io {
            path: PathBuf::from("popover.json"),
            source: io::Error::new(kind, "nope"),
        })
    }

    #[test]
    fn config_error_falls_back_to_defaults() {
        let err = Error::from(ConfigError::ZeroDuration {
            field: "transition_duration",
        });
        assert_eq!(err.degradation(), DegradationAction::UseDefaults);
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("transition_duration must be positive"));
        assert_eq!(err.error_type(), "config");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let err = io_load(io::ErrorKind::NotFound);
        assert_eq!(err.degradation(), DegradationAction::UseDefaults);
        assert!(err.to_string().contains("popover.json"));
    }

    #[test]
    fn unreadable_file_shuts_down() {
        let err = io_load(io::ErrorKind::PermissionDenied);
        assert_eq!(err.degradation(), DegradationAction::Shutdown);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn parse_error_has_no_source() {
        let err = LoadError::Parse {
            path: PathBuf::from("popover.json"),
            message: "expected value at line 1".into(),
        };
        assert!(StdError::source(&err).is_none());
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn io_errors_chain() {
        let err = io_load(io::ErrorKind::PermissionDenied);
        let load = StdError::source(&err).expect("load error");
        assert!(load.source().is_some());
    }

    #[test]
    fn trace_io_continues() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(err.degradation(), DegradationAction::Continue);
        assert_eq!(err.degradation().to_string(), "continue");
    }
}
