//! Error types for the edges of the crate.
//!
//! The classifier, auditors and watchdog are total and never fail; a
//! disconnected device is a domain event, not an error.  Errors only come
//! from building collections and loading a device manifest.  All variants
//! are `Copy` so they can be passed around without allocation.

use core::fmt;

use crate::device::Port;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A fixed-capacity collection is full.
    SetFull { capacity: usize },
    /// The device manifest is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetFull { capacity } => write!(f, "set full ({capacity} entries max)"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Manifest errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document could not be decoded.
    Malformed,
    /// Two device entries claim the same port.
    DuplicatePort(Port),
    /// More devices than a [`DeviceSet`](crate::device::DeviceSet) holds.
    TooManyDevices,
    /// A motor group lists no ports.
    EmptyMotorGroup,
    /// A motor group lists more ports than the controller has.
    OversizedMotorGroup,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed manifest"),
            Self::DuplicatePort(p) => write!(f, "port {p} declared twice"),
            Self::TooManyDevices => write!(f, "too many devices"),
            Self::EmptyMotorGroup => write!(f, "motor group has no ports"),
            Self::OversizedMotorGroup => write!(f, "motor group has too many ports"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
