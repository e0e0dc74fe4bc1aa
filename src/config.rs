//! Rendering and encoding defaults, loadable from a TOML file.
//!
//! ```toml
//! level = "Q"
//! border = 4
//! scale = 10
//! size = 600
//! share_min_side = 512
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::qrcode::{QrCodeEcc, Version};
use crate::render::{DEFAULT_BORDER, SHARE_MIN_SIDE};

/// Largest image side, in pixels, any setting may produce.
pub const MAX_SIDE: u32 = 16_384;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Error correction level for new sessions.
    pub level: QrCodeEcc,
    /// Quiet zone width in modules.
    pub border: u32,
    /// Pixels per module when `size` is unset.
    pub scale: u32,
    /// Fixed output side in pixels, overriding `scale`.
    pub size: Option<u32>,
    /// Minimum side of images prepared for sharing.
    pub share_min_side: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: QrCodeEcc::Medium,
            border: DEFAULT_BORDER,
            scale: 8,
            size: None,
            share_min_side: SHARE_MIN_SIDE,
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale == 0 {
            return Err(ConfigError::Invalid {
                field: "scale".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        // Largest symbol plus quiet zone, at `scale` pixels per module
        let widest = (Version::MAX.size() as u32)
            .checked_add(self.border.saturating_mul(2))
            .and_then(|modules| modules.checked_mul(self.scale));
        if widest.map_or(true, |side| side > MAX_SIDE) {
            return Err(ConfigError::Invalid {
                field: "scale".to_string(),
                message: format!("border and scale give images wider than {MAX_SIDE} pixels"),
            });
        }
        Self::check_side("size", self.size)?;
        Self::check_side("share_min_side", Some(self.share_min_side))
    }

    fn check_side(field: &str, side: Option<u32>) -> Result<(), ConfigError> {
        match side {
            Some(0) => Err(ConfigError::Invalid {
                field: field.to_string(),
                message: "must be at least 1".to_string(),
            }),
            Some(side) if side > MAX_SIDE => Err(ConfigError::Invalid {
                field: field.to_string(),
                message: format!("must be at most {MAX_SIDE}"),
            }),
            _ => Ok(()),
        }
    }
}
