//! # Run-length codes
//!
//! Horizontal mode encodes two runs with the modified Huffman alphabets of
//! ITU-T T.4 (Tables 2 and 3). Runs of 0 to 63 pels use a single terminating
//! code, longer runs are preceded by one or more makeup codes.

use once_cell::sync::Lazy;

use crate::{bits::BitReader, Color, FaxError, FaxResult};

/// White terminating codes, index = run length
#[rustfmt::skip]
const WHITE_TERMINATING: [(u16, u8); 64] = [
    (0x35, 8), (0x07, 6), (0x07, 4), (0x08, 4), (0x0b, 4), (0x0c, 4), (0x0e, 4), (0x0f, 4),
    (0x13, 5), (0x14, 5), (0x07, 5), (0x08, 5), (0x08, 6), (0x03, 6), (0x34, 6), (0x35, 6),
    (0x2a, 6), (0x2b, 6), (0x27, 7), (0x0c, 7), (0x08, 7), (0x17, 7), (0x03, 7), (0x04, 7),
    (0x28, 7), (0x2b, 7), (0x13, 7), (0x24, 7), (0x18, 7), (0x02, 8), (0x03, 8), (0x1a, 8),
    (0x1b, 8), (0x12, 8), (0x13, 8), (0x14, 8), (0x15, 8), (0x16, 8), (0x17, 8), (0x28, 8),
    (0x29, 8), (0x2a, 8), (0x2b, 8), (0x2c, 8), (0x2d, 8), (0x04, 8), (0x05, 8), (0x0a, 8),
    (0x0b, 8), (0x52, 8), (0x53, 8), (0x54, 8), (0x55, 8), (0x24, 8), (0x25, 8), (0x58, 8),
    (0x59, 8), (0x5a, 8), (0x5b, 8), (0x4a, 8), (0x4b, 8), (0x32, 8), (0x33, 8), (0x34, 8),
];

/// White makeup codes, index = run length / 64 - 1
#[rustfmt::skip]
const WHITE_MAKEUP: [(u16, u8); 27] = [
    (0x1b, 5), (0x12, 5), (0x17, 6), (0x37, 7), (0x36, 8), (0x37, 8), (0x64, 8), (0x65, 8),
    (0x68, 8), (0x67, 8), (0xcc, 9), (0xcd, 9), (0xd2, 9), (0xd3, 9), (0xd4, 9), (0xd5, 9),
    (0xd6, 9), (0xd7, 9), (0xd8, 9), (0xd9, 9), (0xda, 9), (0xdb, 9), (0x98, 9), (0x99, 9),
    (0x9a, 9), (0x18, 6), (0x9b, 9),
];

/// Black terminating codes, index = run length
#[rustfmt::skip]
const BLACK_TERMINATING: [(u16, u8); 64] = [
    (0x37, 10), (0x02, 3), (0x03, 2), (0x02, 2), (0x03, 3), (0x03, 4), (0x02, 4), (0x03, 5),
    (0x05, 6), (0x04, 6), (0x04, 7), (0x05, 7), (0x07, 7), (0x04, 8), (0x07, 8), (0x18, 9),
    (0x17, 10), (0x18, 10), (0x08, 10), (0x67, 11), (0x68, 11), (0x6c, 11), (0x37, 11), (0x28, 11),
    (0x17, 11), (0x18, 11), (0xca, 12), (0xcb, 12), (0xcc, 12), (0xcd, 12), (0x68, 12), (0x69, 12),
    (0x6a, 12), (0x6b, 12), (0xd2, 12), (0xd3, 12), (0xd4, 12), (0xd5, 12), (0xd6, 12), (0xd7, 12),
    (0x6c, 12), (0x6d, 12), (0xda, 12), (0xdb, 12), (0x54, 12), (0x55, 12), (0x56, 12), (0x57, 12),
    (0x64, 12), (0x65, 12), (0x52, 12), (0x53, 12), (0x24, 12), (0x37, 12), (0x38, 12), (0x27, 12),
    (0x28, 12), (0x58, 12), (0x59, 12), (0x2b, 12), (0x2c, 12), (0x5a, 12), (0x66, 12), (0x67, 12),
];

/// Black makeup codes, index = run length / 64 - 1
#[rustfmt::skip]
const BLACK_MAKEUP: [(u16, u8); 27] = [
    (0x0f, 10), (0xc8, 12), (0xc9, 12), (0x5b, 12), (0x33, 12), (0x34, 12), (0x35, 12), (0x6c, 13),
    (0x6d, 13), (0x4a, 13), (0x4b, 13), (0x4c, 13), (0x4d, 13), (0x72, 13), (0x73, 13), (0x74, 13),
    (0x75, 13), (0x76, 13), (0x77, 13), (0x52, 13), (0x53, 13), (0x54, 13), (0x55, 13), (0x5a, 13),
    (0x5b, 13), (0x64, 13), (0x65, 13),
];

/// Extended makeup codes for both colors, index = (run length - 1728) / 64 - 1
#[rustfmt::skip]
const SHARED_MAKEUP: [(u16, u8); 13] = [
    (0x08, 11), (0x0c, 11), (0x0d, 11), (0x12, 12), (0x13, 12), (0x14, 12), (0x15, 12), (0x16, 12),
    (0x17, 12), (0x1c, 12), (0x1d, 12), (0x1e, 12), (0x1f, 12),
];

/// The largest run a single makeup code can add
pub const MAX_MAKEUP: u16 = 2560;

static SHARED: Lazy<RunCodes> = Lazy::new(RunCodes::new);

/// The alphabet a run-length code belongs to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RunColor {
    /// Only valid for white runs
    White,
    /// Only valid for black runs
    Black,
    /// Extended makeup codes, valid for both
    Shared,
}

impl From<Color> for RunColor {
    fn from(color: Color) -> Self {
        match color {
            Color::White => RunColor::White,
            Color::Black => RunColor::Black,
        }
    }
}

/// A run-length code, left-justified in 16 bits
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RunCode {
    /// Length of the code in bits
    pub bits: u8,
    /// Mask selecting the top `bits` bits
    pub mask: u16,
    /// The code, shifted to the top of the word
    pub value: u16,
    /// Which alphabet the code is from
    pub color: RunColor,
    /// Number of pels this code stands for
    pub pixels: u16,
    /// Whether this code ends the run
    pub terminating: bool,
}

impl RunCode {
    fn new(code: u16, bits: u8, color: RunColor, pixels: u16, terminating: bool) -> Self {
        let shift = 16 - bits;
        RunCode {
            bits,
            mask: 0xFFFF << shift,
            value: code << shift,
            color,
            pixels,
            terminating,
        }
    }

    /// Whether the lookahead word starts with this code
    pub fn matches(&self, lookahead: u16) -> bool {
        lookahead & self.mask == self.value
    }
}

/// The white and black run-length tables
///
/// Each table holds the terminating and makeup codes of its color plus the
/// shared makeup codes, ordered from the longest to the shortest code.
#[derive(Debug, Clone)]
pub struct RunCodes {
    white: Vec<RunCode>,
    black: Vec<RunCode>,
}

impl Default for RunCodes {
    fn default() -> Self {
        Self::new()
    }
}

impl RunCodes {
    /// Build the tables
    pub fn new() -> Self {
        RunCodes {
            white: build_table(RunColor::White, &WHITE_TERMINATING, &WHITE_MAKEUP),
            black: build_table(RunColor::Black, &BLACK_TERMINATING, &BLACK_MAKEUP),
        }
    }

    /// A process-wide instance, built on first use
    pub fn shared() -> &'static RunCodes {
        &SHARED
    }

    /// The table used for runs of the given color
    pub fn table(&self, color: Color) -> &[RunCode] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Find the code for `color` at the start of the lookahead word
    pub fn match_run(&self, lookahead: u16, color: Color) -> FaxResult<&RunCode> {
        self.table(color)
            .iter()
            .find(|code| code.matches(lookahead))
            .ok_or(FaxError::InvalidHorizontalCode(lookahead))
    }

    /// Read one complete run of `color`
    ///
    /// Makeup codes are summed up until a terminating code ends the run.
    pub fn read_run(&self, reader: &mut BitReader<'_>, color: Color) -> FaxResult<usize> {
        let mut length = 0;
        loop {
            let (lookahead, _) = reader.peek16();
            let code = self.match_run(lookahead, color)?;
            reader.flush(code.bits);
            length += usize::from(code.pixels);
            if code.terminating {
                break Ok(length);
            }
        }
    }
}

fn build_table(color: RunColor, terminating: &[(u16, u8)], makeup: &[(u16, u8)]) -> Vec<RunCode> {
    let mut codes = Vec::with_capacity(terminating.len() + makeup.len() + SHARED_MAKEUP.len());
    for (len, &(code, bits)) in (0u16..).zip(terminating) {
        codes.push(RunCode::new(code, bits, color, len, true));
    }
    for (i, &(code, bits)) in (1u16..).zip(makeup) {
        codes.push(RunCode::new(code, bits, color, i * 64, false));
    }
    for (i, &(code, bits)) in (1u16..).zip(SHARED_MAKEUP.iter()) {
        codes.push(RunCode::new(code, bits, RunColor::Shared, 1728 + i * 64, false));
    }
    // longest first, the sort is stable
    codes.sort_by(|a, b| b.bits.cmp(&a.bits));
    codes
}

#[cfg(test)]
mod tests {
    use super::{RunCodes, RunColor, MAX_MAKEUP};
    use crate::{
        bits::{BitReader, BitWriter},
        Color, FaxError,
    };

    fn run(bits: &str, color: Color) -> Result<usize, FaxError> {
        let mut bw = BitWriter::new();
        bw.write_str(bits);
        let data = bw.done();
        let mut reader = BitReader::new(&data);
        RunCodes::shared().read_run(&mut reader, color)
    }

    #[test]
    fn test_table_layout() {
        let codes = RunCodes::new();
        for color in [Color::White, Color::Black] {
            let table = codes.table(color);
            assert_eq!(table.len(), 64 + 27 + 13);
            assert!(table.windows(2).all(|w| w[0].bits >= w[1].bits));
            assert_eq!(table.iter().filter(|c| c.terminating).count(), 64);
            assert!(table
                .iter()
                .all(|c| c.color == RunColor::from(color) || c.color == RunColor::Shared));
            assert_eq!(table.iter().map(|c| c.pixels).max(), Some(MAX_MAKEUP));
        }
    }

    #[test]
    fn test_tables_are_prefix_free() {
        let codes = RunCodes::new();
        for color in [Color::White, Color::Black] {
            let table = codes.table(color);
            for (i, a) in table.iter().enumerate() {
                for b in &table[i + 1..] {
                    let mask = a.mask & b.mask;
                    assert_ne!(a.value & mask, b.value & mask, "{:?} / {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_terminating() {
        assert_eq!(run("00110101", Color::White), Ok(0));
        assert_eq!(run("1000", Color::White), Ok(3));
        assert_eq!(run("10011", Color::White), Ok(8));
        assert_eq!(run("00110100", Color::White), Ok(63));
        assert_eq!(run("0000110111", Color::Black), Ok(0));
        assert_eq!(run("010", Color::Black), Ok(1));
        assert_eq!(run("11", Color::Black), Ok(2));
        assert_eq!(run("000101", Color::Black), Ok(8));
        assert_eq!(run("000001100111", Color::Black), Ok(63));
    }

    #[test]
    fn test_makeup() {
        // 64 + 0
        assert_eq!(run("11011 00110101", Color::White), Ok(64));
        // 1728 + 2
        assert_eq!(run("010011011 0111", Color::White), Ok(1730));
        // 128 + 3
        assert_eq!(run("000011001000 10", Color::Black), Ok(131));
        // 2560 + 64 + 1
        assert_eq!(run("000000011111 0000001111 010", Color::Black), Ok(2625));
        // 1792 + 1792 + 7
        assert_eq!(run("00000001000 00000001000 1111", Color::White), Ok(3591));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(
            RunCodes::shared().match_run(0x0000, Color::White),
            Err(FaxError::InvalidHorizontalCode(0))
        );
        assert!(matches!(
            run("000000000001", Color::Black),
            Err(FaxError::InvalidHorizontalCode(_))
        ));
    }

    #[test]
    fn test_consumes_exactly_the_code() {
        let mut bw = BitWriter::new();
        bw.write_str("0111 11 1");
        let data = bw.done();
        let mut reader = BitReader::new(&data);
        let codes = RunCodes::shared();
        assert_eq!(codes.read_run(&mut reader, Color::White), Ok(2));
        assert_eq!(codes.read_run(&mut reader, Color::Black), Ok(2));
        assert_eq!(reader.peek8().0, 0b1000_0000);
    }
}
