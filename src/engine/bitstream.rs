/// Packed bit sequence, MSB-first within each byte, with an exact bit count
/// so trailing pad bits in the last byte are never misread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl Bitstream {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_len: 0,
        }
    }

    /// Reassemble a stream from its packed bytes and exact bit length.
    /// Returns `None` when the byte count cannot hold `bit_len` bits.
    pub fn from_parts(bytes: Vec<u8>, bit_len: usize) -> Option<Self> {
        if bytes.len() != bit_len.div_ceil(8) {
            return None;
        }
        Some(Self { bytes, bit_len })
    }

    pub fn push(&mut self, bit: bool) {
        let byte_index = self.bit_len / 8;
        let bit_offset = self.bit_len % 8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }
        self.bit_len += 1;
    }

    pub fn extend(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.push(bit);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len {
            return None;
        }
        let byte = self.bytes[index / 8];
        Some((byte >> (7 - index % 8)) & 1 == 1)
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn iter(&self) -> Bits<'_> {
        Bits {
            stream: self,
            pos: 0,
        }
    }
}

impl Default for Bitstream {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward iterator over the bits of a stream.
pub struct Bits<'a> {
    stream: &'a Bitstream,
    pos: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = self.stream.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_pack_msb_first() {
        let mut stream = Bitstream::new();
        stream.extend(&[true, false, true, true]);
        assert_eq!(stream.bit_len(), 4);
        assert_eq!(stream.as_bytes(), &[0b1011_0000]);
    }

    #[test]
    fn crossing_byte_boundary() {
        let mut stream = Bitstream::new();
        for i in 0..9 {
            stream.push(i % 2 == 0);
        }
        assert_eq!(stream.bit_len(), 9);
        assert_eq!(stream.as_bytes(), &[0b1010_1010, 0b1000_0000]);
        assert_eq!(stream.get(8), Some(true));
        assert_eq!(stream.get(9), None);
    }

    #[test]
    fn iter_round_trips_pushes() {
        let bits = [true, true, false, true, false, false, true, false, true];
        let mut stream = Bitstream::new();
        stream.extend(&bits);
        let collected: Vec<bool> = stream.iter().collect();
        assert_eq!(collected, bits);
    }

    #[test]
    fn from_parts_validates_length() {
        assert!(Bitstream::from_parts(vec![0xff], 8).is_some());
        assert!(Bitstream::from_parts(vec![0xff], 3).is_some());
        assert!(Bitstream::from_parts(vec![0xff], 9).is_none());
        assert!(Bitstream::from_parts(vec![], 1).is_none());
        assert!(Bitstream::from_parts(vec![], 0).is_some());
    }
}
