//! # Bit Reader
//!
//! T.6 codes are packed most-significant-bit first. The [`BitReader`] keeps a
//! 32 bit window over the input in which the next unread bit is always the top
//! bit, so prefix codes can be matched against the upper bits of a peek.

/// Order of bits within a byte of the input (see TIFF spec, tag 266)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillOrder {
    /// A byte is iterated from most- to least-significant bit
    #[default]
    MsbToLsb = 1,
    /// A byte is iterated from lest- to most-significant bit
    LsbToMsb = 2,
}

impl FillOrder {
    /// Get the fill order for a value of the TIFF `FillOrder` tag
    pub fn from_tag(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::MsbToLsb),
            2 => Some(Self::LsbToMsb),
            _ => None,
        }
    }

    /// Bring a source byte into MSB-first order
    fn normalize(self, byte: u8) -> u8 {
        match self {
            FillOrder::MsbToLsb => byte,
            FillOrder::LsbToMsb => byte.reverse_bits(),
        }
    }
}

/// MSB-first sliding window over a byte slice
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buffer: u32,
    empty_bits: u8,
    source: &'a [u8],
    source_pos: usize,
    fill_order: FillOrder,
}

impl<'a> BitReader<'a> {
    /// Creates a new instance and fills the window
    pub fn new(source: &'a [u8]) -> Self {
        Self::with_fill_order(source, FillOrder::MsbToLsb)
    }

    /// Creates a new instance reading bytes in the given order
    pub fn with_fill_order(source: &'a [u8], fill_order: FillOrder) -> Self {
        let mut reader = BitReader {
            buffer: 0,
            empty_bits: 32,
            source,
            source_pos: 0,
            fill_order,
        };
        reader.fill();
        reader
    }

    /// The top 8 bits of the window and the number of valid bits
    pub fn peek8(&self) -> (u8, u8) {
        ((self.buffer >> 24) as u8, self.valid_bits())
    }

    /// The top 16 bits of the window and the number of valid bits
    pub fn peek16(&self) -> (u16, u8) {
        ((self.buffer >> 16) as u16, self.valid_bits())
    }

    /// The whole window and the number of valid bits
    pub fn peek32(&self) -> (u32, u8) {
        (self.buffer, self.valid_bits())
    }

    /// Number of bits in the window that come from the source
    pub fn valid_bits(&self) -> u8 {
        32 - self.empty_bits
    }

    /// Number of source bytes pulled into the window so far
    pub fn position(&self) -> usize {
        self.source_pos
    }

    /// Drop `count` bits from the window and refill it
    pub fn flush(&mut self, count: u8) {
        self.buffer = self.buffer.checked_shl(u32::from(count)).unwrap_or(0);
        self.empty_bits = self.empty_bits.saturating_add(count).min(32);
        self.fill();
    }

    /// Whether any bit is left, either in the window or in the source
    pub fn has_data(&self) -> bool {
        self.empty_bits < 32 || self.source_pos < self.source.len()
    }

    /// Rewind to the start of the source
    pub fn clear(&mut self) {
        self.buffer = 0;
        self.empty_bits = 32;
        self.source_pos = 0;
        self.fill();
    }

    fn fill(&mut self) {
        while self.empty_bits >= 8 {
            let byte = match self.source.get(self.source_pos) {
                Some(byte) => self.fill_order.normalize(*byte),
                None => break,
            };
            // bits below the valid ones are always zero
            self.buffer |= u32::from(byte) << (self.empty_bits - 8);
            self.empty_bits -= 8;
            self.source_pos += 1;
        }
    }
}

/// A bitwise writer, used to assemble test streams
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct BitWriter {
    buffer: Vec<u8>,
    curr: u8,
    used: u8,
}

#[cfg(test)]
impl BitWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Write a single bit
    pub(crate) fn write(&mut self, b: bool) {
        self.curr = (self.curr << 1) | u8::from(b);
        self.used += 1;
        if self.used == 8 {
            self.buffer.push(self.curr);
            self.curr = 0;
            self.used = 0;
        }
    }

    /// Write the low {off} bits of {val}, most significant first
    pub(crate) fn write_bits(&mut self, val: usize, off: u8) {
        for i in (0..off).rev() {
            self.write((val >> i) & 1 == 1);
        }
    }

    /// Write a string of `0` and `1`, ignoring anything else
    pub(crate) fn write_str(&mut self, bits: &str) {
        for c in bits.chars() {
            match c {
                '0' => self.write(false),
                '1' => self.write(true),
                _ => {}
            }
        }
    }

    /// Pad the last byte with zeros and return the buffer
    pub(crate) fn done(mut self) -> Vec<u8> {
        if self.used > 0 {
            self.buffer.push(self.curr << (8 - self.used));
        }
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::{BitReader, BitWriter, FillOrder};

    #[test]
    fn test_peek_is_left_justified() {
        let reader = BitReader::new(&[0xA5, 0x0F]);
        assert_eq!(reader.peek8(), (0xA5, 16));
        assert_eq!(reader.peek16(), (0xA50F, 16));
        assert_eq!(reader.peek32(), (0xA50F_0000, 16));
    }

    #[test]
    fn test_flush_refills() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.peek32(), (0x1234_5678, 32));
        assert_eq!(reader.position(), 4);

        reader.flush(4);
        // only 4 bits are empty, no refill yet
        assert_eq!(reader.peek32(), (0x2345_6780, 28));

        reader.flush(4);
        assert_eq!(reader.peek32(), (0x3456_789A, 32));
        assert_eq!(reader.position(), 5);

        reader.flush(12);
        assert_eq!(reader.peek16(), (0x6789, 20));
    }

    #[test]
    fn test_has_data() {
        let mut reader = BitReader::new(&[0xFF]);
        assert!(reader.has_data());
        reader.flush(7);
        assert!(reader.has_data());
        reader.flush(1);
        assert!(!reader.has_data());
        // over-consumption saturates
        reader.flush(8);
        assert!(!reader.has_data());
        assert_eq!(reader.peek32(), (0, 0));

        let empty = BitReader::new(&[]);
        assert!(!empty.has_data());
    }

    #[test]
    fn test_flush_whole_window() {
        let data = [0xFF; 6];
        let mut reader = BitReader::new(&data);
        reader.flush(32);
        assert_eq!(reader.peek32(), (0xFFFF_0000, 16));
    }

    #[test]
    fn test_clear() {
        let data = [0x80, 0x01];
        let mut reader = BitReader::new(&data);
        reader.flush(16);
        assert!(!reader.has_data());
        reader.clear();
        assert!(reader.has_data());
        assert_eq!(reader.peek16(), (0x8001, 16));
    }

    #[test]
    fn test_fill_order_lsb_to_msb() {
        let reader = BitReader::with_fill_order(&[0b0000_0001, 0b1100_0000], FillOrder::LsbToMsb);
        assert_eq!(reader.peek16(), (0b1000_0000_0000_0011, 16));
        assert_eq!(FillOrder::from_tag(2), Some(FillOrder::LsbToMsb));
        assert_eq!(FillOrder::from_tag(3), None);
    }

    #[test]
    fn test_bit_writer() {
        let mut bw = BitWriter::new();
        bw.write_bits(0b000011110000, 12);
        bw.write_bits(0b1010, 4);
        bw.write_str("101");
        assert_eq!(bw.done(), vec![0b00001111, 0b00001010, 0b10100000]);
    }
}
