//! # Scanline decoder
//!
//! Implements CCITT T.6 (Group 4 2-dimensional) decoding on top of a
//! [`BitReader`]: every step reads one mode code and places the pels up to
//! the next changing element of the coding line.

use log::{debug, trace, warn};

use crate::{
    bits::{BitReader, FillOrder},
    modes::{match_mode, Mode},
    reference::find_changing_elements,
    runs::RunCodes,
    Color, Decoded, FaxError, FaxImage, FaxResult,
};

/// End of facsimile block (two EOL codes), left-justified in 32 bits
///
/// It is only recognized after a complete row. A stream that starts with
/// EOFB, an image of zero rows, fails with [`FaxError::InvalidModeCode`].
pub const EOFB: u32 = 0x0010_0100;
const EOFB_MASK: u32 = 0xFFFF_FF00;

/// Options for fax decoding
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// The width of the image
    pub width: usize,
    /// Swap black and white in the output
    pub reverse_color: bool,
    /// The order of bits in a byte
    pub fill_order: FillOrder,
}

impl DecodeOptions {
    /// Options for an image that is `width` pels wide
    pub fn new(width: usize) -> Self {
        DecodeOptions {
            width,
            ..Default::default()
        }
    }

    /// Set whether to swap black and white in the output
    pub fn reverse_color(mut self, reverse_color: bool) -> Self {
        self.reverse_color = reverse_color;
        self
    }

    /// Set the order of bits in a byte
    pub fn fill_order(mut self, fill_order: FillOrder) -> Self {
        self.fill_order = fill_order;
        self
    }
}

/// Where the decoder is within the image
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecodeState {
    /// At the start of a row, `a0` is 0
    RowStart,
    /// Some pels of the row are placed
    InRow,
    /// All pels of the row are placed, it is committed at the next step
    RowComplete,
    /// Reached EOFB, padding or the end of the input
    Done,
    /// Stopped on an error
    Failed,
}

enum Step {
    Continue,
    Done,
}

/// The decoder
pub struct Decoder<'a> {
    options: DecodeOptions,
    reader: BitReader<'a>,
    runs: &'a RunCodes,
    rows: Vec<Vec<u8>>,
    reference: Vec<Color>,
    current: Vec<Color>,
    a0: usize,
    color: Color,
    state: DecodeState,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder instance using the shared code tables
    pub fn new(data: &'a [u8], options: DecodeOptions) -> Self {
        Self::with_tables(data, options, RunCodes::shared())
    }

    /// Create a new decoder instance using the given run-length tables
    pub fn with_tables(data: &'a [u8], options: DecodeOptions, runs: &'a RunCodes) -> Self {
        Decoder {
            reader: BitReader::with_fill_order(data, options.fill_order),
            runs,
            rows: Vec::new(),
            reference: vec![Color::White; options.width],
            current: vec![Color::White; options.width],
            a0: 0,
            color: Color::White,
            state: DecodeState::RowStart,
            options,
        }
    }

    /// The current state
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Number of rows committed so far
    pub fn rows_decoded(&self) -> usize {
        self.rows.len()
    }

    fn width(&self) -> usize {
        self.options.width
    }

    /// Decode the whole input
    pub fn decode(mut self) -> Decoded {
        debug!("Decoding T.6 data, {} pels per row", self.width());
        let error = self.run();

        if error.is_some() {
            self.state = DecodeState::Failed;
        } else {
            if self.width() > 0 && self.a0 >= self.width() {
                // the input ended right after a complete row
                self.commit_row();
            }
            self.state = DecodeState::Done;
        }

        let image = FaxImage::from_rows(self.width(), std::mem::take(&mut self.rows));
        match &error {
            Some(e) => warn!(
                "Decoding stopped at byte {} after {} rows: {}",
                self.reader.position(),
                image.height(),
                e
            ),
            None => debug!("Decoded {} rows", image.height()),
        }
        Decoded { image, error }
    }

    fn run(&mut self) -> Option<FaxError> {
        if self.width() == 0 {
            return None;
        }
        while self.reader.has_data() {
            match self.step() {
                Ok(Step::Continue) => {}
                Ok(Step::Done) => return None,
                Err(e) => return Some(e),
            }
        }
        None
    }

    fn step(&mut self) -> FaxResult<Step> {
        if self.a0 >= self.width() {
            self.commit_row();
            let (window, _) = self.reader.peek32();
            if window & EOFB_MASK == EOFB {
                debug!("EOFB after {} rows", self.rows.len());
                return Ok(Step::Done);
            }
        }

        let (window, valid) = self.reader.peek32();
        if window == 0 {
            debug!("{} bits of zero padding", valid);
            return Ok(Step::Done);
        }

        let (byte, _) = self.reader.peek8();
        let code = match_mode(byte)?;
        self.reader.flush(code.bits);
        trace!("{} at a0 = {}", code.mode, self.a0);

        match code.mode {
            Mode::Pass => self.pass(),
            Mode::Horizontal => self.horizontal()?,
            Mode::Vertical(offset) => self.vertical(offset),
            Mode::Extension => return Err(FaxError::UnsupportedExtension),
        }

        self.state = if self.a0 >= self.width() {
            DecodeState::RowComplete
        } else {
            DecodeState::InRow
        };
        Ok(Step::Continue)
    }

    /// Emit the current row and make it the reference for the next one
    fn commit_row(&mut self) {
        let reverse = self.options.reverse_color;
        let row = self
            .current
            .iter()
            .map(|&c| if reverse { (!c).pel() } else { c.pel() })
            .collect();
        self.rows.push(row);
        std::mem::swap(&mut self.reference, &mut self.current);
        self.current.fill(Color::White);
        self.a0 = 0;
        self.color = Color::White;
        self.state = DecodeState::RowStart;
    }

    fn pass(&mut self) {
        let (_, b2) = find_changing_elements(&self.reference, self.a0, self.color, false);
        self.fill(self.a0, b2, self.color);
        self.advance(b2);
    }

    fn horizontal(&mut self) -> FaxResult<()> {
        let a0a1 = self.runs.read_run(&mut self.reader, self.color)?;
        let a1a2 = self.runs.read_run(&mut self.reader, !self.color)?;
        trace!("H({}, {})", a0a1, a1a2);

        let a1 = self.a0 + a0a1;
        let a2 = a1 + a1a2;
        self.fill(self.a0, a1, self.color);
        self.fill(a1, a2, !self.color);
        self.advance(a2);
        Ok(())
    }

    fn vertical(&mut self, offset: i8) {
        let (b1, _) = find_changing_elements(&self.reference, self.a0, self.color, true);
        let a1 = b1.saturating_add_signed(isize::from(offset));
        self.fill(self.a0, a1, self.color);
        self.advance(a1);
        self.color.invert();
    }

    /// Paint `[from, to)`, clipped to the row
    fn fill(&mut self, from: usize, to: usize, color: Color) {
        let width = self.width();
        if to > width {
            debug!("Clipping run [{}, {}) to width {}", from, to, width);
        }
        let to = to.min(width);
        if from < to {
            self.current[from..to].fill(color);
        }
    }

    /// Move `a0` forward to `to`, never past the end of the row
    fn advance(&mut self, to: usize) {
        self.a0 = self.a0.max(to).min(self.width());
    }
}
