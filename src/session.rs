//! Live re-encoding of a text being edited.
//!
//! A [`Session`] owns the current request (text and correction level) and
//! the symbol produced for it. Every edit re-encodes from scratch. Results
//! are tagged with a [`Ticket`], and only the ticket of the most recent
//! request may replace the displayed symbol, so work started for an older
//! request is dropped rather than queued.

use crate::config::Settings;
use crate::error::EncodeError;
use crate::qrcode::{QrCode, QrCodeEcc};

/// Everything an encode depends on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodeRequest {
    pub text: String,
    pub level: QrCodeEcc,
}

impl EncodeRequest {
    pub fn new(text: impl Into<String>, level: QrCodeEcc) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn encode(&self) -> Result<QrCode, EncodeError> {
        QrCode::encode_text(&self.text, self.level)
    }
}

/// Identifies one request issued by [`Session::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Holds the request being edited and the latest symbol for it.
#[derive(Debug, Default)]
pub struct Session {
    request: EncodeRequest,
    generation: u64,
    current: Option<QrCode>,
    last_error: Option<EncodeError>,
}

impl Session {
    /// Starts with empty text at the configured level, already encoded.
    pub fn new(settings: &Settings) -> Self {
        Self::with_level(settings.level)
    }

    /// Starts with empty text at `level`, already encoded.
    pub fn with_level(level: QrCodeEcc) -> Self {
        let mut session = Self {
            request: EncodeRequest::new(String::new(), level),
            ..Self::default()
        };
        session.refresh();
        session
    }

    pub fn request(&self) -> &EncodeRequest {
        &self.request
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Option<&QrCode> {
        self.request.text = text.into();
        self.refresh()
    }

    pub fn set_level(&mut self, level: QrCodeEcc) -> Option<&QrCode> {
        self.request.level = level;
        self.refresh()
    }

    /// Selects the level by selector position; see
    /// [`QrCodeEcc::from_index_clamped`].
    pub fn set_level_index(&mut self, index: i64) -> Option<&QrCode> {
        self.set_level(QrCodeEcc::from_index_clamped(index))
    }

    /// Encodes the current request and publishes the result.
    pub fn refresh(&mut self) -> Option<&QrCode> {
        let (ticket, request) = self.begin();
        let result = request.encode();
        self.complete(ticket, result);
        self.current()
    }

    /// Issues a ticket for the current request, superseding every ticket
    /// issued before it.
    pub fn begin(&mut self) -> (Ticket, EncodeRequest) {
        self.generation += 1;
        let ticket = Ticket {
            generation: self.generation,
        };
        (ticket, self.request.clone())
    }

    /// Publishes `result` if `ticket` is still the latest one.
    ///
    /// Returns `false`, leaving the session untouched, for a superseded
    /// ticket. A failed encode clears the current symbol.
    pub fn complete(&mut self, ticket: Ticket, result: Result<QrCode, EncodeError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "discarding superseded result"
            );
            return false;
        }
        match result {
            Ok(qr) => {
                self.current = Some(qr);
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to generate QR code");
                self.current = None;
                self.last_error = Some(err);
            }
        }
        true
    }

    /// The symbol for the most recently completed request, if it succeeded.
    pub fn current(&self) -> Option<&QrCode> {
        self.current.as_ref()
    }

    /// Why the most recently completed request produced no symbol.
    pub fn last_error(&self) -> Option<&EncodeError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_reencode() {
        let mut session = Session::with_level(QrCodeEcc::Low);
        let v = session.set_text("HELLO").map(|qr| qr.version().value());
        assert_eq!(v, Some(1));

        session.set_level_index(7);
        let qr = session.current().unwrap();
        assert_eq!(qr.error_correction_level(), QrCodeEcc::High);
        assert_eq!(session.request().level, QrCodeEcc::High);
    }

    #[test]
    fn test_new_session_shows_empty_symbol() {
        let settings = Settings {
            level: QrCodeEcc::Quartile,
            ..Settings::default()
        };
        let session = Session::new(&settings);
        assert_eq!(session.request().text, "");
        assert!(session.last_error().is_none());
        let qr = session.current().unwrap();
        assert_eq!(qr.version().value(), 1);
        assert_eq!(qr, &QrCode::encode_text("", QrCodeEcc::Quartile).unwrap());
    }

    #[test]
    fn test_failure_clears_symbol() {
        let mut session = Session::with_level(QrCodeEcc::Medium);
        session.set_text("ok");
        assert!(session.current().is_some());

        session.set_text("snowman ☃");
        assert!(session.current().is_none());
        assert!(matches!(
            session.last_error(),
            Some(EncodeError::UnsupportedCharacter { character: '☃', .. })
        ));

        session.set_text("ok again");
        assert!(session.current().is_some());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_latest_request_wins() {
        let mut session = Session::with_level(QrCodeEcc::Low);
        let (old, old_request) = session.begin();
        session.set_text("newer");
        let (new, new_request) = session.begin();
        assert!(new.generation() > old.generation());

        // The newer result lands first, then the stale one arrives
        assert!(session.complete(new, new_request.encode()));
        assert!(!session.complete(old, old_request.encode()));
        assert_eq!(session.current(), Some(&QrCode::encode_text("newer", QrCodeEcc::Low).unwrap()));
    }

    #[test]
    fn test_superseded_failure_is_ignored() {
        let mut session = Session::with_level(QrCodeEcc::Low);
        session.set_text("keep me");
        let (stale, _) = session.begin();
        let (latest, request) = session.begin();
        let err = EncodeError::CapacityExceeded { len: 9999, max: 2953 };
        assert!(!session.complete(stale, Err(err)));
        assert!(session.last_error().is_none());
        assert!(session.complete(latest, request.encode()));
        assert!(session.current().is_some());
    }
}
