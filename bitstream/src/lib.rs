/*!

Bitstream handles the packing of bits into bytes. Bits are stored MSB first, the first bit of the
stream is the highest bit of the first byte.

Some bit hacks are applied here, it can be helpful to understand these
Bit Operations:

number of bits  >> 3 == number of bytes
number of bits  & 7 == bit position inside the current byte

*/

use std::fmt;
use std::io;
use std::str::FromStr;

/// A growable sequence of bits, packed 8 per byte.
///
/// Unused low bits of the last byte are always zero, so two `BitString` with the same bits compare
/// equal.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct BitString {
    data: Vec<u8>,
    num_bits: usize,
}

impl BitString {
    pub fn new() -> Self {
        BitString::default()
    }

    pub fn with_capacity(num_bits: usize) -> Self {
        BitString {
            data: Vec::with_capacity(num_bytes_for(num_bits)),
            num_bits: 0,
        }
    }

    /// number of bits in the stream
    #[inline]
    pub fn len(&self) -> usize {
        self.num_bits
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// the packed bytes, the last byte is padded with zero bits
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Writes the complete bytes to `out` and removes them, returns the number of bytes written.
    ///
    /// Only the bits of a trailing partial byte are kept, so further bits continue where the
    /// written ones ended. On a write error nothing is removed.
    pub fn flush_full_bytes<W: io::Write>(&mut self, out: &mut W) -> io::Result<usize> {
        let full_bytes = self.num_bits >> 3;
        out.write_all(&self.data[..full_bytes])?;
        self.data.drain(..full_bytes);
        self.num_bits &= 7;
        Ok(full_bytes)
    }

    #[inline]
    pub fn push(&mut self, bit: bool) {
        let bit_pos = self.num_bits & 7;
        if bit_pos == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 0x80 >> bit_pos;
        }
        self.num_bits += 1;
    }

    /// Returns the bit at `pos`, or None if `pos` is out of range.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<bool> {
        if pos >= self.num_bits {
            return None;
        }
        Some(self.data[pos >> 3] & (0x80 >> (pos & 7)) != 0)
    }

    /// Appends all bits of `other`.
    pub fn append(&mut self, other: &BitString) {
        if self.num_bits & 7 == 0 {
            // byte aligned, padding of other stays zero
            self.data.extend_from_slice(&other.data);
            self.num_bits += other.num_bits;
            return;
        }
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// Returns a copy of this bitstring extended by one bit.
    pub fn with_bit(&self, bit: bool) -> BitString {
        let mut extended = BitString::with_capacity(self.num_bits + 1);
        extended.append(self);
        extended.push(bit);
        extended
    }

    /// true if `prefix` is a (not necessarily proper) prefix of self
    pub fn starts_with(&self, prefix: &BitString) -> bool {
        if prefix.num_bits > self.num_bits {
            return false;
        }
        let full_bytes = prefix.num_bits >> 3;
        if self.data[..full_bytes] != prefix.data[..full_bytes] {
            return false;
        }
        let rest = prefix.num_bits & 7;
        if rest == 0 {
            return true;
        }
        let mask = !(0xFF_u8 >> rest);
        self.data[full_bytes] & mask == prefix.data[full_bytes]
    }

    pub fn iter(&self) -> Bits<'_> {
        Bits {
            bit_string: self,
            pos: 0,
        }
    }
}

/// number of bytes to hold `num_bits`, rounded up
#[inline]
pub fn num_bytes_for(num_bits: usize) -> usize {
    (num_bits + 7) >> 3
}

/// Iterator over the bits of a [`BitString`], first bit first.
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    bit_string: &'a BitString,
    pos: usize,
}

impl<'a> Iterator for Bits<'a> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        let bit = self.bit_string.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bit_string.num_bits - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Bits<'a> {}

impl<'a> IntoIterator for &'a BitString {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Bits<'a> {
        self.iter()
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bit_string = BitString::new();
        bit_string.extend(iter);
        bit_string
    }
}

impl Extend<bool> for BitString {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

/// Renders the bits as `0` and `1` characters.
impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({} bits: {})", self.num_bits, self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseBitStringError {
    /// position of the first character that is neither `0` nor `1`
    pub pos: usize,
}

impl fmt::Display for ParseBitStringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bit character at position {}", self.pos)
    }
}

impl std::error::Error for ParseBitStringError {}

impl FromStr for BitString {
    type Err = ParseBitStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bit_string = BitString::with_capacity(s.len());
        for (pos, c) in s.chars().enumerate() {
            match c {
                '0' => bit_string.push(false),
                '1' => bit_string.push(true),
                _ => return Err(ParseBitStringError { pos }),
            }
        }
        Ok(bit_string)
    }
}

#[test]
fn test_num_bytes_for() {
    assert_eq!(num_bytes_for(0), 0);
    assert_eq!(num_bytes_for(1), 1);
    assert_eq!(num_bytes_for(8), 1);
    assert_eq!(num_bytes_for(9), 2);
    assert_eq!(num_bytes_for(16), 2);
    assert_eq!(num_bytes_for(17), 3);
}
