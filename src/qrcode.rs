#![forbid(unsafe_code)]
//! Byte-mode QR code encoding.
//!
//! This module turns a byte payload and an error correction level into a
//! QR Code Model 2 symbol: the payload is wrapped in a byte-mode segment,
//! padded to the data capacity of the smallest version that fits, split into
//! Reed-Solomon blocks and interleaved, then drawn into the module grid
//! around the function patterns. All eight masks are tried and the one with
//! the lowest penalty score is kept.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bits::BitBuffer;
use crate::error::EncodeError;
use crate::format;
use crate::latin1;
use crate::reed_solomon::ReedSolomonGenerator;
use crate::render;

/// Mode indicator for byte mode.
const BYTE_MODE_BITS: u32 = 0x4;

/// A finished QR Code symbol: a square grid of dark and light modules.
///
/// Symbols are immutable values. Every encode builds a new one from scratch,
/// so two encodes of the same request compare equal.
///
/// # Example
///
/// ```rust
/// use qrlive::qrcode::{QrCode, QrCodeEcc};
///
/// let qr = QrCode::encode_text("HELLO", QrCodeEcc::Medium).unwrap();
/// assert_eq!(qr.version().value(), 1);
/// assert_eq!(qr.size(), 21);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrCode {
    version: Version,
    /// Width and height in modules, `version * 4 + 17`.
    size: i32,
    errorcorrectionlevel: QrCodeEcc,
    mask: Mask,
    /// Row-major, `true` is dark.
    modules: Vec<bool>,
}

impl QrCode {
    /// Encodes Unicode text as ISO-8859-1 bytes in byte mode.
    ///
    /// Fails with [`EncodeError::UnsupportedCharacter`] if any character is
    /// outside Latin-1, and with [`EncodeError::CapacityExceeded`] if the
    /// bytes do not fit version 40 at `ecl`. The empty string encodes to a
    /// version 1 symbol.
    pub fn encode_text(text: &str, ecl: QrCodeEcc) -> Result<Self, EncodeError> {
        let data = latin1::to_latin1(text)?;
        Self::encode_binary(&data, ecl)
    }

    /// Encodes raw bytes in byte mode with the smallest fitting version and
    /// the lowest-penalty mask.
    pub fn encode_binary(data: &[u8], ecl: QrCodeEcc) -> Result<Self, EncodeError> {
        Self::encode_binary_with(data, ecl, Version::MIN, Version::MAX, None)
    }

    /// Encodes raw bytes with the version restricted to
    /// `minversion..=maxversion` and an optional fixed mask.
    ///
    /// The correction level is never raised above `ecl`, even when a higher
    /// level would fit in the same version.
    pub fn encode_binary_with(
        data: &[u8],
        ecl: QrCodeEcc,
        minversion: Version,
        maxversion: Version,
        mask: Option<Mask>,
    ) -> Result<Self, EncodeError> {
        if minversion > maxversion {
            return Err(EncodeError::InvalidVersionRange {
                min: minversion.value(),
                max: maxversion.value(),
            });
        }

        let version = (minversion.value()..=maxversion.value())
            .map(Version::new)
            .find(|&v| data.len() <= Self::byte_capacity(v, ecl))
            .ok_or(EncodeError::CapacityExceeded {
                len: data.len(),
                max: Self::byte_capacity(maxversion, ecl),
            })?;

        let datacodewords = Self::make_data_codewords(data, version, ecl);
        let allcodewords = Self::add_ecc_and_interleave(&datacodewords, version, ecl);

        let mut grid = Grid::new(version);
        grid.draw_function_patterns(ecl);
        grid.draw_codewords(&allcodewords);

        let mask = match mask {
            Some(m) => m,
            None => grid.choose_mask(ecl),
        };
        grid.apply_mask(mask);
        grid.draw_format_bits(ecl, mask);

        tracing::debug!(
            len = data.len(),
            version = version.value(),
            ecl = %ecl,
            mask = mask.value(),
            "encoded QR symbol"
        );

        Ok(Self {
            version,
            size: grid.size,
            errorcorrectionlevel: ecl,
            mask,
            modules: grid.modules,
        })
    }

    /// Returns the largest byte-mode payload, in bytes, that `version` can
    /// hold at `ecl`.
    pub fn byte_capacity(version: Version, ecl: QrCodeEcc) -> usize {
        let ccbits = byte_count_bits(version);
        let databits = get_num_data_codewords(version, ecl) * 8;
        let payloadbits = databits.saturating_sub(4 + usize::from(ccbits));
        (payloadbits / 8).min((1usize << ccbits) - 1)
    }

    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns the error correction level this symbol was encoded with.
    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.errorcorrectionlevel
    }

    /// Returns the mask applied to the data region, in the range [0, 7].
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Returns `true` for dark modules and `false` for light modules.
    /// Coordinates outside the symbol are light, which is what the quiet
    /// zone around it looks like.
    ///
    /// # Arguments
    ///
    /// * `x` - X-coordinate (0 is left).
    /// * `y` - Y-coordinate (0 is top).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size;
        range.contains(&x) && range.contains(&y) && self.modules[(y * self.size + x) as usize]
    }

    /// Iterates the rows of the symbol, top to bottom, without a border.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks(self.size as usize)
    }

    /// Returns the symbol surrounded by `border` light modules on each side.
    ///
    /// The QR standard asks for a quiet zone of at least four modules.
    pub fn module_grid(&self, border: u32) -> Vec<Vec<bool>> {
        let border = border as i32;
        (-border..self.size + border)
            .map(|y| {
                (-border..self.size + border)
                    .map(|x| self.get_module(x, y))
                    .collect()
            })
            .collect()
    }

    /// Reads both placed copies of the format information and decodes them.
    ///
    /// Returns `None` unless both copies decode to the same level and mask.
    pub fn read_format(&self) -> Option<(QrCodeEcc, Mask)> {
        let size = self.size;
        let mut primary: u32 = 0;
        let mut secondary: u32 = 0;
        for i in 0..15 {
            let (x, y) = match i {
                0..=5 => (8, i),
                6 => (8, 7),
                7 => (8, 8),
                8 => (7, 8),
                _ => (14 - i, 8),
            };
            primary |= u32::from(self.get_module(x, y)) << i;

            let (x, y) = if i < 8 { (size - 1 - i, 8) } else { (8, size - 15 + i) };
            secondary |= u32::from(self.get_module(x, y)) << i;
        }
        let a = format::decode_format_bits(primary)?;
        let b = format::decode_format_bits(secondary)?;
        (a == b).then_some(a)
    }

    /// Reads both copies of the version information (versions 7 and up).
    pub fn read_version(&self) -> Option<Version> {
        let size = self.size;
        let mut upper: u32 = 0;
        let mut lower: u32 = 0;
        for i in 0..18 {
            let a = size - 11 + i % 3;
            let b = i / 3;
            upper |= u32::from(self.get_module(a, b)) << i;
            lower |= u32::from(self.get_module(b, a)) << i;
        }
        let a = format::decode_version_bits(upper)?;
        let b = format::decode_version_bits(lower)?;
        (a == b).then_some(a)
    }

    /// Builds the data codewords: mode indicator, byte count, payload,
    /// terminator, bit padding and alternating pad bytes.
    fn make_data_codewords(data: &[u8], version: Version, ecl: QrCodeEcc) -> Vec<u8> {
        let capacitybits = get_num_data_codewords(version, ecl) * 8;
        let mut bb = BitBuffer::with_capacity(capacitybits / 8);
        bb.append_bits(BYTE_MODE_BITS, 4);
        bb.append_bits(data.len() as u32, byte_count_bits(version));
        bb.append_bytes(data);
        debug_assert!(bb.len() <= capacitybits);

        // Terminator of up to four zero bits, then zeros to the byte boundary
        let terminator = (capacitybits - bb.len()).min(4);
        bb.append_bits(0, terminator as u8);
        bb.append_bits(0, (bb.len().wrapping_neg() & 7) as u8);

        for &padbyte in [0xec, 0x11].iter().cycle() {
            if bb.len() >= capacitybits {
                break;
            }
            bb.append_bits(padbyte, 8);
        }
        bb.into_bytes()
    }

    /// Splits the data codewords into blocks, appends each block's ECC and
    /// interleaves the result column by column.
    fn add_ecc_and_interleave(data: &[u8], ver: Version, ecl: QrCodeEcc) -> Vec<u8> {
        assert_eq!(data.len(), get_num_data_codewords(ver, ecl));
        let numblocks = table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl);
        let blockecclen = table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl);
        let rawcodewords = get_num_raw_data_modules(ver) / 8;
        let numshortblocks = numblocks - rawcodewords % numblocks;
        let shortblockdatalen = rawcodewords / numblocks - blockecclen;

        let rs = ReedSolomonGenerator::new(blockecclen);
        let mut blocks: Vec<(&[u8], Vec<u8>)> = Vec::with_capacity(numblocks);
        let mut rest = data;
        for i in 0..numblocks {
            let datlen = shortblockdatalen + usize::from(i >= numshortblocks);
            let (dat, tail) = rest.split_at(datlen);
            blocks.push((dat, rs.compute_remainder(dat)));
            rest = tail;
        }
        debug_assert!(rest.is_empty());

        let mut result = Vec::with_capacity(rawcodewords);
        for i in 0..=shortblockdatalen {
            for (dat, _) in &blocks {
                // Short blocks have no codeword at the last data column
                if let Some(&b) = dat.get(i) {
                    result.push(b);
                }
            }
        }
        for i in 0..blockecclen {
            for (_, ecc) in &blocks {
                result.push(ecc[i]);
            }
        }
        debug_assert_eq!(result.len(), rawcodewords);
        result
    }
}

impl fmt::Display for QrCode {
    /// Terminal rendering with the standard four module quiet zone.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::to_terminal_string(self, render::DEFAULT_BORDER))
    }
}

/// Mutable module grid used while a symbol is being drawn.
struct Grid {
    version: Version,
    size: i32,
    modules: Vec<bool>,
    /// Modules that belong to function patterns and are never masked.
    isfunction: Vec<bool>,
}

impl Grid {
    fn new(version: Version) -> Self {
        let size = version.size();
        let len = (size * size) as usize;
        Self {
            version,
            size,
            modules: vec![false; len],
            isfunction: vec![false; len],
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.size + x) as usize
    }

    fn get(&self, x: i32, y: i32) -> bool {
        self.modules[self.index(x, y)]
    }

    fn set_function_module(&mut self, x: i32, y: i32, isdark: bool) {
        let i = self.index(x, y);
        self.modules[i] = isdark;
        self.isfunction[i] = true;
    }

    /// Draws timing, finder and alignment patterns and reserves the format
    /// and version areas. The format area gets a placeholder until the mask
    /// is known.
    fn draw_function_patterns(&mut self, ecl: QrCodeEcc) {
        let size = self.size;
        for i in 0..size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        let alignpatpos = get_alignment_pattern_positions(self.version);
        let last = alignpatpos.len().saturating_sub(1);
        for (i, &pos0) in alignpatpos.iter().enumerate() {
            for (j, &pos1) in alignpatpos.iter().enumerate() {
                // Three corners overlap the finder patterns
                let corner = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !corner {
                    self.draw_alignment_pattern(pos0, pos1);
                }
            }
        }

        self.draw_format_bits(ecl, Mask::new(0));
        self.draw_version();
    }

    /// Finder pattern centred at (x, y) together with its light separator,
    /// clipped at the symbol edge.
    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        for dy in -4..=4 {
            for dx in -4..=4 {
                let (xx, yy) = (x + dx, y + dy);
                if (0..self.size).contains(&xx) && (0..self.size).contains(&yy) {
                    let dist = dx.abs().max(dy.abs());
                    self.set_function_module(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                self.set_function_module(x + dx, y + dy, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    /// Draws both copies of the format information and the dark module.
    fn draw_format_bits(&mut self, ecl: QrCodeEcc, mask: Mask) {
        let bits = format::format_bits(ecl, mask);
        let size = self.size;

        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i));
        }
        self.set_function_module(8, 7, get_bit(bits, 6));
        self.set_function_module(8, 8, get_bit(bits, 7));
        self.set_function_module(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i));
        }

        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, get_bit(bits, i));
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, get_bit(bits, i));
        }
        self.set_function_module(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        let Some(bits) = format::version_bits(self.version) else {
            return;
        };
        for i in 0..18 {
            let bit = get_bit(bits, i);
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    /// Places codeword bits in the two-column zig-zag, right to left,
    /// skipping function modules and the vertical timing column.
    /// Remainder modules stay light.
    fn draw_codewords(&mut self, data: &[u8]) {
        assert_eq!(data.len(), get_num_raw_data_modules(self.version) / 8);
        let size = self.size;
        let totalbits = data.len() * 8;
        let mut i: usize = 0;
        let mut right = size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            let upward = ((right + 1) & 2) == 0;
            for vert in 0..size {
                let y = if upward { size - 1 - vert } else { vert };
                for x in [right, right - 1] {
                    let idx = self.index(x, y);
                    if !self.isfunction[idx] && i < totalbits {
                        self.modules[idx] = get_bit(u32::from(data[i >> 3]), 7 - (i & 7) as i32);
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, totalbits);
    }

    /// XORs the mask pattern into every non-function module. Applying the
    /// same mask twice restores the grid.
    fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let idx = self.index(x, y);
                if !self.isfunction[idx] && mask.inverts(x, y) {
                    self.modules[idx] = !self.modules[idx];
                }
            }
        }
    }

    fn choose_mask(&mut self, ecl: QrCodeEcc) -> Mask {
        let mut best = (i32::MAX, Mask::new(0));
        for m in 0u8..8 {
            let mask = Mask::new(m);
            self.apply_mask(mask);
            self.draw_format_bits(ecl, mask);
            let penalty = self.get_penalty_score();
            tracing::trace!(mask = m, penalty, "mask penalty");
            if penalty < best.0 {
                best = (penalty, mask);
            }
            self.apply_mask(mask);
        }
        best.1
    }

    /// Sum of the four penalty rules: runs of five or more same-colored
    /// modules, 2x2 same-colored blocks, finder-like 1:1:3:1:1 patterns
    /// with four light modules on either side, and dark/light imbalance.
    fn get_penalty_score(&self) -> i32 {
        let size = self.size;
        let mut result: i32 = 0;

        for y in 0..size {
            result += self.line_penalty((0..size).map(|x| self.get(x, y)));
        }
        for x in 0..size {
            result += self.line_penalty((0..size).map(|y| self.get(x, y)));
        }

        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color = self.get(x, y);
                if color == self.get(x + 1, y)
                    && color == self.get(x, y + 1)
                    && color == self.get(x + 1, y + 1)
                {
                    result += PENALTY_N2;
                }
            }
        }

        let dark = self.modules.iter().filter(|&&m| m).count() as i32;
        let total = size * size;
        // Smallest k such that the dark ratio is within (10 + 5k)% of 50%
        let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        result + k * PENALTY_N4
    }

    /// Run-length and finder-like penalties for one row or column.
    fn line_penalty(&self, line: impl Iterator<Item = bool>) -> i32 {
        let mut result = 0;
        let mut runcolor = false;
        let mut runlen = 0;
        let mut runhistory = FinderPenalty::new(self.size);
        for color in line {
            if color == runcolor {
                runlen += 1;
                if runlen == 5 {
                    result += PENALTY_N1;
                } else if runlen > 5 {
                    result += 1;
                }
            } else {
                runhistory.add_history(runlen);
                if !runcolor {
                    result += runhistory.count_patterns() * PENALTY_N3;
                }
                runcolor = color;
                runlen = 1;
            }
        }
        result + runhistory.terminate_and_count(runcolor, runlen) * PENALTY_N3
    }
}

/// The last seven run lengths of a line, newest first, used to spot
/// finder-like patterns. The light border outside the symbol counts as
/// part of the first and last runs.
struct FinderPenalty {
    qr_size: i32,
    run_history: [i32; 7],
}

impl FinderPenalty {
    fn new(size: i32) -> Self {
        Self {
            qr_size: size,
            run_history: [0; 7],
        }
    }

    fn add_history(&mut self, mut currentrunlength: i32) {
        if self.run_history[0] == 0 {
            currentrunlength += self.qr_size;
        }
        self.run_history.rotate_right(1);
        self.run_history[0] = currentrunlength;
    }

    /// Called right after a light run ends; returns 0 to 2.
    fn count_patterns(&self) -> i32 {
        let rh = &self.run_history;
        let n = rh[1];
        let core = n > 0 && rh[2] == n && rh[3] == n * 3 && rh[4] == n && rh[5] == n;
        i32::from(core && rh[0] >= n * 4 && rh[6] >= n) + i32::from(core && rh[6] >= n * 4 && rh[0] >= n)
    }

    fn terminate_and_count(mut self, currentruncolor: bool, mut currentrunlength: i32) -> i32 {
        if currentruncolor {
            self.add_history(currentrunlength);
            currentrunlength = 0;
        }
        currentrunlength += self.qr_size;
        self.add_history(currentrunlength);
        self.count_patterns()
    }
}

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

/// Character count indicator width for byte mode.
fn byte_count_bits(ver: Version) -> u8 {
    if ver.value() <= 9 {
        8
    } else {
        16
    }
}

/// Alignment pattern centre coordinates, ascending; empty for version 1.
fn get_alignment_pattern_positions(ver: Version) -> Vec<i32> {
    let ver = i32::from(ver.value());
    if ver == 1 {
        return Vec::new();
    }
    let numalign = ver / 7 + 2;
    let step = if ver == 32 {
        26
    } else {
        (ver * 4 + numalign * 2 + 1) / (numalign * 2 - 2) * 2
    };
    let size = ver * 4 + 17;
    let mut result: Vec<i32> = (0..numalign - 1).map(|i| size - 7 - i * step).collect();
    result.push(6);
    result.reverse();
    result
}

/// Modules available for data and ECC bits after all function patterns,
/// format and version information are excluded. Includes remainder bits.
fn get_num_raw_data_modules(ver: Version) -> usize {
    let ver = usize::from(ver.value());
    let mut result = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let numalign = ver / 7 + 2;
        result -= (25 * numalign - 10) * numalign - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}

fn get_num_data_codewords(ver: Version, ecl: QrCodeEcc) -> usize {
    get_num_raw_data_modules(ver) / 8
        - table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl)
            * table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl)
}

fn table_get(table: &'static [[u8; 41]; 4], ver: Version, ecl: QrCodeEcc) -> usize {
    usize::from(table[ecl.ordinal()][usize::from(ver.value())])
}

fn get_bit(x: u32, i: i32) -> bool {
    ((x >> i) & 1) != 0
}

// Indexed by [ecl.ordinal()][version]; column 0 is unused.
static ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30,
        30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30,
        30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

static NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    #[default]
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    /// All levels in selector order: L, M, Q, H.
    pub const ALL: [QrCodeEcc; 4] = [
        QrCodeEcc::Low,
        QrCodeEcc::Medium,
        QrCodeEcc::Quartile,
        QrCodeEcc::High,
    ];

    /// Maps a selector index to a level, clamping out-of-range indices to
    /// the nearest end (negative to L, 4 and up to H).
    pub fn from_index_clamped(index: i64) -> Self {
        Self::ALL[index.clamp(0, 3) as usize]
    }

    /// The single-letter name used by the QR standard.
    pub fn letter(self) -> char {
        ['L', 'M', 'Q', 'H'][self.ordinal()]
    }

    /// Returns an unsigned 2-bit integer (in the range 0 to 3).
    pub(crate) fn ordinal(self) -> usize {
        use QrCodeEcc::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    /// The 2-bit value stored in the format information.
    pub(crate) fn format_bits(self) -> u8 {
        use QrCodeEcc::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }
}

impl fmt::Display for QrCodeEcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for QrCodeEcc {
    type Err = EncodeError;

    /// Accepts `L`, `M`, `Q`, `H` or the full names, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use QrCodeEcc::*;
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Low),
            "m" | "medium" => Ok(Medium),
            "q" | "quartile" => Ok(Quartile),
            "h" | "high" => Ok(High),
            _ => Err(EncodeError::InvalidCorrectionLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for QrCodeEcc {
    type Error = EncodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<QrCodeEcc> for String {
    fn from(ecl: QrCodeEcc) -> Self {
        ecl.letter().to_string()
    }
}

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Side length in modules, `4 * version + 17`.
    pub const fn size(self) -> i32 {
        self.0 as i32 * 4 + 17
    }
}

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this pattern flips the module at column `x`, row `y`.
    pub fn inverts(self, x: i32, y: i32) -> bool {
        match self.0 {
            0 => (x + y) % 2 == 0,
            1 => y % 2 == 0,
            2 => x % 3 == 0,
            3 => (x + y) % 3 == 0,
            4 => (x / 3 + y / 2) % 2 == 0,
            5 => (x * y) % 2 + (x * y) % 3 == 0,
            6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
            _ => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_table_spot_checks() {
        assert_eq!(QrCode::byte_capacity(Version::new(1), QrCodeEcc::Low), 17);
        assert_eq!(QrCode::byte_capacity(Version::new(1), QrCodeEcc::Medium), 14);
        assert_eq!(QrCode::byte_capacity(Version::new(1), QrCodeEcc::High), 7);
        assert_eq!(QrCode::byte_capacity(Version::new(10), QrCodeEcc::Medium), 213);
        assert_eq!(QrCode::byte_capacity(Version::new(40), QrCodeEcc::Low), 2953);
        assert_eq!(QrCode::byte_capacity(Version::new(40), QrCodeEcc::High), 1273);
    }

    #[test]
    fn test_raw_modules() {
        assert_eq!(get_num_raw_data_modules(Version::new(1)), 208);
        assert_eq!(get_num_raw_data_modules(Version::new(2)), 359);
        assert_eq!(get_num_raw_data_modules(Version::new(7)), 1568);
        assert_eq!(get_num_raw_data_modules(Version::new(40)), 29648);
    }

    #[test]
    fn test_alignment_positions() {
        assert!(get_alignment_pattern_positions(Version::new(1)).is_empty());
        assert_eq!(get_alignment_pattern_positions(Version::new(2)), vec![6, 18]);
        assert_eq!(get_alignment_pattern_positions(Version::new(7)), vec![6, 22, 38]);
        assert_eq!(get_alignment_pattern_positions(Version::new(32)), vec![6, 34, 60, 86, 112, 138]);
        assert_eq!(
            get_alignment_pattern_positions(Version::new(40)),
            vec![6, 30, 58, 86, 114, 142, 170]
        );
    }

    #[test]
    fn test_hello_data_codewords() {
        // Byte mode, count 5, "HELLO", terminator, then 0xEC/0x11 padding
        let cw = QrCode::make_data_codewords(b"HELLO", Version::new(1), QrCodeEcc::Medium);
        assert_eq!(cw.len(), 16);
        assert_eq!(&cw[..7], &[0x40, 0x54, 0x84, 0x54, 0xc4, 0xc4, 0xf0]);
        assert_eq!(&cw[7..], &[0xec, 0x11, 0xec, 0x11, 0xec, 0x11, 0xec, 0x11, 0xec]);
    }

    #[test]
    fn test_interleave_keeps_all_codewords() {
        // Version 5-Q has two short blocks of 15 and two long blocks of 16
        let ver = Version::new(5);
        let ecl = QrCodeEcc::Quartile;
        let n = get_num_data_codewords(ver, ecl);
        assert_eq!(n, 62);
        let data: Vec<u8> = (0..n as u8).collect();
        let all = QrCode::add_ecc_and_interleave(&data, ver, ecl);
        assert_eq!(all.len(), get_num_raw_data_modules(ver) / 8);
        assert_eq!(&all[..4], &[0, 15, 30, 46]);
        // Column 15 exists only in the long blocks
        assert_eq!(&all[60..62], &[45, 61]);
    }

    #[test]
    fn test_mask_is_involution() {
        let mut grid = Grid::new(Version::new(3));
        grid.draw_function_patterns(QrCodeEcc::Low);
        let before = grid.modules.clone();
        for m in 0..8 {
            grid.apply_mask(Mask::new(m));
            grid.apply_mask(Mask::new(m));
            assert_eq!(grid.modules, before);
        }
    }

    #[test]
    fn test_forced_mask_and_invalid_range() {
        let qr = QrCode::encode_binary_with(
            b"abc",
            QrCodeEcc::Low,
            Version::new(3),
            Version::new(5),
            Some(Mask::new(6)),
        )
        .unwrap();
        assert_eq!(qr.version(), Version::new(3));
        assert_eq!(qr.mask(), Mask::new(6));
        assert_eq!(qr.read_format(), Some((QrCodeEcc::Low, Mask::new(6))));

        let err = QrCode::encode_binary_with(b"abc", QrCodeEcc::Low, Version::new(5), Version::new(3), None)
            .unwrap_err();
        assert_eq!(err, EncodeError::InvalidVersionRange { min: 5, max: 3 });
    }

    #[test]
    fn test_bounded_range_capacity() {
        let data = vec![b'x'; 20];
        let err = QrCode::encode_binary_with(&data, QrCodeEcc::Low, Version::MIN, Version::new(1), None)
            .unwrap_err();
        assert_eq!(err, EncodeError::CapacityExceeded { len: 20, max: 17 });
    }

    #[test]
    fn test_version_information_placed() {
        let qr = QrCode::encode_binary(&[b'v'; 200], QrCodeEcc::Low).unwrap();
        assert_eq!(qr.version(), Version::new(9));
        assert_eq!(qr.read_version(), Some(Version::new(9)));

        let small = QrCode::encode_text("tiny", QrCodeEcc::Low).unwrap();
        assert_eq!(small.read_version(), None);
    }

    #[test]
    fn test_ecc_parsing() {
        assert_eq!("q".parse::<QrCodeEcc>().unwrap(), QrCodeEcc::Quartile);
        assert_eq!("High".parse::<QrCodeEcc>().unwrap(), QrCodeEcc::High);
        assert_eq!(
            "X".parse::<QrCodeEcc>().unwrap_err(),
            EncodeError::InvalidCorrectionLevel("X".to_string())
        );
        assert_eq!(QrCodeEcc::from_index_clamped(-3), QrCodeEcc::Low);
        assert_eq!(QrCodeEcc::from_index_clamped(2), QrCodeEcc::Quartile);
        assert_eq!(QrCodeEcc::from_index_clamped(99), QrCodeEcc::High);
    }

    #[test]
    fn test_display_has_quiet_zone() {
        let qr = QrCode::encode_text("", QrCodeEcc::Low).unwrap();
        let text = qr.to_string();
        assert_eq!(text.lines().count(), 29);
        assert!(text.lines().next().unwrap().chars().all(|c| c == ' '));
        assert_eq!(text, render::to_terminal_string(&qr, render::DEFAULT_BORDER));
    }
}
