//! # Mode codes
//!
//! Every coding step of a T.6 line starts with one of ten prefix codes
//! (ITU-T T.6, Table 1). They are at most 7 bits long, so one lookahead
//! byte is always enough to identify them.

use std::fmt;

use crate::{FaxError, FaxResult};

/// The coding mode of the next element
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Pass Mode
    Pass,
    /// Horizontal Mode
    Horizontal,
    /// Vertical Mode; `a1` is this many pels right of `b1`
    Vertical(i8),
    /// Extension
    Extension,
}

impl Mode {
    /// Vertical Mode; Offset 0
    pub const V0: Mode = Mode::Vertical(0);
    /// Vertical Mode; Offset 1
    pub const VR1: Mode = Mode::Vertical(1);
    /// Vertical Mode; Offset 2
    pub const VR2: Mode = Mode::Vertical(2);
    /// Vertical Mode; Offset 3
    pub const VR3: Mode = Mode::Vertical(3);
    /// Vertical Mode; Offset -1
    pub const VL1: Mode = Mode::Vertical(-1);
    /// Vertical Mode; Offset -2
    pub const VL2: Mode = Mode::Vertical(-2);
    /// Vertical Mode; Offset -3
    pub const VL3: Mode = Mode::Vertical(-3);

    /// The offset of `a1` relative to `b1`, 0 for non-vertical modes
    pub fn vertical_offset(&self) -> i8 {
        match self {
            Mode::Vertical(offset) => *offset,
            _ => 0,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Pass => f.write_str("P"),
            Mode::Horizontal => f.write_str("H"),
            Mode::Vertical(0) => f.write_str("V0"),
            Mode::Vertical(o) if *o > 0 => write!(f, "VR{}", o),
            Mode::Vertical(o) => write!(f, "VL{}", -o),
            Mode::Extension => f.write_str("X"),
        }
    }
}

/// A prefix code, left-justified in a byte
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ModeCode {
    /// Length of the code in bits
    pub bits: u8,
    /// Mask selecting the top `bits` bits
    pub mask: u8,
    /// The code, shifted to the top of the byte
    pub value: u8,
    /// What the code stands for
    pub mode: Mode,
}

impl ModeCode {
    const fn new(code: u8, bits: u8, mode: Mode) -> Self {
        let shift = 8 - bits;
        ModeCode {
            bits,
            mask: 0xFF << shift,
            value: code << shift,
            mode,
        }
    }

    /// Whether the lookahead byte starts with this code
    pub fn matches(&self, byte: u8) -> bool {
        byte & self.mask == self.value
    }
}

/// The mode code table
#[rustfmt::skip]
pub const MODE_CODES: [ModeCode; 10] = [
    ModeCode::new(0b1,       1, Mode::V0),
    ModeCode::new(0b011,     3, Mode::VR1),
    ModeCode::new(0b010,     3, Mode::VL1),
    ModeCode::new(0b001,     3, Mode::Horizontal),
    ModeCode::new(0b0001,    4, Mode::Pass),
    ModeCode::new(0b000011,  6, Mode::VR2),
    ModeCode::new(0b000010,  6, Mode::VL2),
    ModeCode::new(0b0000011, 7, Mode::VR3),
    ModeCode::new(0b0000010, 7, Mode::VL3),
    ModeCode::new(0b0000001, 7, Mode::Extension),
];

/// Find the mode code at the start of the lookahead byte
pub fn match_mode(byte: u8) -> FaxResult<&'static ModeCode> {
    MODE_CODES
        .iter()
        .find(|code| code.matches(byte))
        .ok_or(FaxError::InvalidModeCode(byte))
}
