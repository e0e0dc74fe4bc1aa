//! Reed-Solomon error correction codewords over GF(2^8).
//!
//! The field is built on the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//! (0x11D) with generator element alpha = 2, as QR Code Model 2 requires.

/// Largest number of ECC codewords per block in any version/level.
pub const MAX_DEGREE: usize = 30;

const PRIMITIVE: u16 = 0x11d;

const fn build_exp_table() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        table[i + 255] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    table
}

const fn build_log_table(exp: &[u8; 512]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static EXP_TABLE: [u8; 512] = build_exp_table();
static LOG_TABLE: [u8; 256] = build_log_table(&EXP_TABLE);

/// Arithmetic in GF(256).
pub struct Gf256;

impl Gf256 {
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        EXP_TABLE[usize::from(LOG_TABLE[usize::from(a)]) + usize::from(LOG_TABLE[usize::from(b)])]
    }
}

/// Generator polynomial of a given degree, reused for every block of a symbol.
///
/// Coefficients are stored from highest to lowest power, with the leading
/// (monic) term omitted.
pub struct ReedSolomonGenerator {
    divisor: [u8; MAX_DEGREE],
    degree: usize,
}

impl ReedSolomonGenerator {
    /// Builds the product (x - a^0)(x - a^1)...(x - a^(degree-1)).
    ///
    /// # Panics
    ///
    /// Panics if `degree` is not in `1..=30`.
    pub fn new(degree: usize) -> Self {
        assert!((1..=MAX_DEGREE).contains(&degree), "Degree out of range");
        let mut divisor = [0u8; MAX_DEGREE];
        divisor[degree - 1] = 1;
        let mut root: u8 = 1;
        for _ in 0..degree {
            for j in 0..degree {
                divisor[j] = Gf256::mul(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
            root = Gf256::mul(root, 0x02);
        }
        Self { divisor, degree }
    }

    /// Returns the remainder of `data` * x^degree divided by the generator,
    /// which is the block's ECC codewords.
    pub fn compute_remainder(&self, data: &[u8]) -> Vec<u8> {
        let divisor = &self.divisor[..self.degree];
        let mut result = vec![0u8; self.degree];
        for &b in data {
            let factor = b ^ result[0];
            result.rotate_left(1);
            result[self.degree - 1] = 0;
            for (x, &y) in result.iter_mut().zip(divisor) {
                *x ^= Gf256::mul(y, factor);
            }
        }
        result
    }
}
