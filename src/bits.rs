/// An appendable sequence of bits, packed MSB-first into bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitBuffer {
    data: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(bytes),
            length: 0,
        }
    }

    /// Number of bits appended so far.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Appends the low `len` bits of `val`, most significant first.
    ///
    /// Requires `len <= 31` and that `val` has no bits set above `len`.
    pub fn append_bits(&mut self, val: u32, len: u8) {
        assert!(len <= 31 && (val >> len) == 0, "Value out of range");
        for i in (0..len).rev() {
            let shift = 7 - (self.length & 7);
            if shift == 7 {
                self.data.push(0);
            }
            let bit = ((val >> i) & 1) as u8;
            if let Some(last) = self.data.last_mut() {
                *last |= bit << shift;
            }
            self.length += 1;
        }
    }

    /// Appends whole bytes. Faster than eight one-bit appends when aligned.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        if self.length % 8 == 0 {
            self.data.extend_from_slice(bytes);
            self.length += bytes.len() * 8;
        } else {
            for &b in bytes {
                self.append_bits(u32::from(b), 8);
            }
        }
    }

    /// The packed bytes. A trailing partial byte is zero-filled.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
