//! Text boundary between Unicode strings and the byte payload of a symbol.
//!
//! Payload bytes are ISO-8859-1, the encoding most decoders assume for byte
//! mode when no ECI header is present. Code points U+0000 to U+00FF map to
//! the byte of the same value; anything above that is refused.

use crate::error::EncodeError;

/// Converts `text` to ISO-8859-1 bytes.
///
/// Returns [`EncodeError::UnsupportedCharacter`] for the first character
/// above U+00FF, with its character index.
pub fn to_latin1(text: &str) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(text.len());
    for (position, character) in text.chars().enumerate() {
        let byte = u8::try_from(u32::from(character))
            .map_err(|_| EncodeError::UnsupportedCharacter { character, position })?;
        out.push(byte);
    }
    Ok(out)
}

/// Converts ISO-8859-1 bytes back to a string. Every byte is valid.
pub fn from_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(to_latin1("HELLO").unwrap(), b"HELLO".to_vec());
    }

    #[test]
    fn test_upper_half_is_single_byte() {
        // "café ñ" is 8 bytes of UTF-8 but 6 bytes of Latin-1
        let bytes = to_latin1("café ñ").unwrap();
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xe9, b' ', 0xf1]);
        assert_eq!(from_latin1(&bytes), "café ñ");
    }

    #[test]
    fn test_unsupported_character_reports_position() {
        let err = to_latin1("ab€c").unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnsupportedCharacter { character: '€', position: 2 }
        );
        assert_eq!(to_latin1("ÿ").unwrap(), vec![0xff]);
        assert!(matches!(
            to_latin1("\u{100}"),
            Err(EncodeError::UnsupportedCharacter { position: 0, .. })
        ));
    }

    #[test]
    fn test_empty() {
        assert!(to_latin1("").unwrap().is_empty());
    }
}
