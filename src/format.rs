//! BCH-coded format and version information.
//!
//! Format information is 5 data bits (2 for the correction level, 3 for the
//! mask) protected by a BCH(15,5) code and XORed with 0x5412 so that it is
//! never all-light. Version information, present from version 7 upward, is
//! 6 data bits protected by BCH(18,6).

use crate::qrcode::{Mask, QrCodeEcc, Version};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_XOR_MASK: u32 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1f25;

/// Largest Hamming distance at which a damaged format word is still accepted.
const MAX_FORMAT_ERRORS: u32 = 3;

/// Returns the 15-bit masked format word for `ecl` and `mask`.
pub fn format_bits(ecl: QrCodeEcc, mask: Mask) -> u32 {
    let data = (u32::from(ecl.format_bits()) << 3) | u32::from(mask.value());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    ((data << 10) | rem) ^ FORMAT_XOR_MASK
}

/// Recovers the correction level and mask from a 15-bit format word.
///
/// The word is matched against all 32 valid codewords; the closest one wins
/// if it is within three bit errors.
pub fn decode_format_bits(bits: u32) -> Option<(QrCodeEcc, Mask)> {
    let mut best: Option<(u32, QrCodeEcc, Mask)> = None;
    for ecl in QrCodeEcc::ALL {
        for m in 0u8..8 {
            let mask = Mask::new(m);
            let distance = (format_bits(ecl, mask) ^ bits).count_ones();
            if best.map_or(true, |(d, _, _)| distance < d) {
                best = Some((distance, ecl, mask));
            }
        }
    }
    best.filter(|&(d, _, _)| d <= MAX_FORMAT_ERRORS)
        .map(|(_, ecl, mask)| (ecl, mask))
}

/// Returns the 18-bit version word, or `None` below version 7 where the
/// symbol carries no version information.
pub fn version_bits(version: Version) -> Option<u32> {
    let ver = u32::from(version.value());
    if ver < 7 {
        return None;
    }
    let mut rem = ver;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    Some((ver << 12) | rem)
}

/// Recovers a version number from an 18-bit version word, tolerating up to
/// three bit errors.
pub fn decode_version_bits(bits: u32) -> Option<Version> {
    (7u8..=Version::MAX.value())
        .map(Version::new)
        .filter_map(|v| version_bits(v).map(|w| ((w ^ bits).count_ones(), v)))
        .min_by_key(|&(d, _)| d)
        .filter(|&(d, _)| d <= 3)
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_format_words() {
        assert_eq!(format_bits(QrCodeEcc::Medium, Mask::new(0)), 0x5412);
        assert_eq!(format_bits(QrCodeEcc::Low, Mask::new(0)), 0x77c4);
        assert_eq!(format_bits(QrCodeEcc::High, Mask::new(7)), 0x083b);
    }

    #[test]
    fn test_format_decode_all_combinations() {
        for ecl in QrCodeEcc::ALL {
            for m in 0..8 {
                let mask = Mask::new(m);
                let word = format_bits(ecl, mask);
                assert_eq!(decode_format_bits(word), Some((ecl, mask)));
                // Three flipped bits are still recoverable
                assert_eq!(decode_format_bits(word ^ 0b100_0001_0000_0010), Some((ecl, mask)));
            }
        }
    }

    #[test]
    fn test_version_words() {
        assert_eq!(version_bits(Version::new(6)), None);
        assert_eq!(version_bits(Version::new(7)), Some(0x07c94));
        assert_eq!(version_bits(Version::new(40)), Some(0x28c69));
        for v in 7..=40 {
            let word = version_bits(Version::new(v)).unwrap();
            assert_eq!(decode_version_bits(word ^ 0b10), Some(Version::new(v)));
        }
    }
}
