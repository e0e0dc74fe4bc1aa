//! # qrlive
//!
//! A byte-mode QR code encoder for live previews of typed text.
//!
//! `qrlive` turns text and an error correction level into a QR Code Model 2
//! symbol. Text is carried as ISO-8859-1 bytes in byte mode, the smallest of
//! the 40 versions that fits is chosen, and the mask with the lowest penalty
//! score is applied. Characters outside Latin-1 and payloads larger than
//! version 40 are reported as typed errors instead of producing no symbol.
//!
//! ## Features
//!
//! - Byte-mode encoding at all four error correction levels, versions 1 to 40.
//! - Format and version information that can be read back from the grid.
//! - A [`session::Session`] that re-encodes on every edit and discards
//!   results of superseded requests.
//! - Rendering to grayscale images with nearest-neighbour scaling, a share
//!   canvas of at least 512 px, SVG and terminal text.
//!
//! ## Example
//!
//! ```rust
//! use qrlive::{encode, QrCodeEcc};
//!
//! let qr = encode("HELLO", QrCodeEcc::Medium).unwrap();
//! assert_eq!(qr.size(), 21);
//!
//! let img = qrlive::render::to_image(&qr, 4, 8);
//! assert_eq!(img.dimensions(), (29 * 8, 29 * 8));
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: Core QR code encoding functionality.
//! - [`render`]: Rasterising symbols for display and sharing.
//! - [`session`]: Live re-encoding of an edited request.

pub mod bits;
pub mod config;
pub mod error;
pub mod format;
pub mod latin1;
#[cfg(feature = "cli")]
pub mod logger;
pub mod qrcode;
pub mod reed_solomon;
pub mod render;
pub mod session;

pub use config::Settings;
pub use error::{ConfigError, EncodeError};
pub use qrcode::{Mask, QrCode, QrCodeEcc, Version};
pub use session::{EncodeRequest, Session, Ticket};

/// Encodes `text` at correction level `ecl`.
///
/// Shorthand for [`QrCode::encode_text`].
pub fn encode(text: &str, ecl: QrCodeEcc) -> Result<QrCode, EncodeError> {
    QrCode::encode_text(text, ecl)
}
