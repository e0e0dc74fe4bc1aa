//! Error types returned by the encoder and the settings loader.

use thiserror::Error;

/// Reasons an encode request can be refused.
///
/// Every variant is a property of the input, so retrying the same request
/// yields the same error. Callers decide what to show instead of a symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The payload does not fit any version in the allowed range at the
    /// requested correction level.
    #[error("Data length = {len} bytes, max capacity = {max} bytes")]
    CapacityExceeded {
        /// Payload length in bytes.
        len: usize,
        /// Largest payload the allowed version range can carry.
        max: usize,
    },

    /// A character has no single-byte Latin-1 representation.
    #[error("Character {character:?} at position {position} is not representable in ISO-8859-1")]
    UnsupportedCharacter {
        /// The offending character.
        character: char,
        /// Character index (not byte index) in the input text.
        position: usize,
    },

    /// A correction level name that is not one of L, M, Q or H.
    #[error("Unknown error correction level: {0:?}")]
    InvalidCorrectionLevel(String),

    /// The minimum version is greater than the maximum version.
    #[error("Invalid version range: {min}..={max}")]
    InvalidVersionRange {
        /// Requested minimum version.
        min: u8,
        /// Requested maximum version.
        max: u8,
    },
}

/// Errors raised while loading [`Settings`](crate::config::Settings).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting `{field}`: {message}")]
    Invalid { field: String, message: String },
}
