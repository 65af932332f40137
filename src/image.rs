//! # Decoded image
use std::fmt;

use crate::{
    color::{invert_pel, Color},
    FaxError, FaxResult,
};

/// Characters for [`FaxImage::ascii_art`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ArtStyle {
    /// Top left, top right, bottom left and bottom right corner
    pub corners: [char; 4],
    /// Top and bottom edge, once per pel
    pub horizontal: char,
    /// Left and right edge, once per row
    pub vertical: char,
    /// A black pel
    pub black: char,
    /// A white pel
    pub white: char,
}

/// `+`, `-` and `|` frame, `#` for black
pub const ASCII: ArtStyle = ArtStyle {
    corners: ['+', '+', '+', '+'],
    horizontal: '-',
    vertical: '|',
    black: '#',
    white: ' ',
};

/// Double-line frame, full blocks for black
pub const UNICODE: ArtStyle = ArtStyle {
    corners: ['╔', '╗', '╚', '╝'],
    horizontal: '═',
    vertical: '║',
    black: '█',
    white: ' ',
};

/// A decoded bi-level image
///
/// Every row holds exactly `width` pels, [`Color::WHITE_PEL`] or
/// [`Color::BLACK_PEL`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaxImage {
    width: usize,
    rows: Vec<Vec<u8>>,
}

impl FaxImage {
    pub(crate) fn from_rows(width: usize, rows: Vec<Vec<u8>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == width));
        FaxImage { width, rows }
    }

    /// Number of pels per row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// The row at index `y`
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    /// Take the rows out of the image
    pub fn into_rows(self) -> Vec<Vec<u8>> {
        self.rows
    }

    /// Swap black and white in every row
    pub fn invert(&mut self) {
        for pel in self.rows.iter_mut().flatten() {
            *pel = invert_pel(*pel);
        }
    }

    /// Draw the image in a frame, one character per pel
    pub fn ascii_art<W: fmt::Write>(&self, w: &mut W, style: &ArtStyle) -> fmt::Result {
        let [top_left, top_right, bottom_left, bottom_right] = style.corners;
        self.edge(w, top_left, style.horizontal, top_right)?;
        for row in &self.rows {
            let line = row.iter().map(|&pel| match pel {
                Color::BLACK_PEL => style.black,
                _ => style.white,
            });
            self.line(w, style.vertical, line, style.vertical)?;
        }
        self.edge(w, bottom_left, style.horizontal, bottom_right)
    }

    fn edge<W: fmt::Write>(&self, w: &mut W, l: char, fill: char, r: char) -> fmt::Result {
        self.line(w, l, std::iter::repeat(fill).take(self.width), r)
    }

    fn line<W, I>(&self, w: &mut W, l: char, chars: I, r: char) -> fmt::Result
    where
        W: fmt::Write,
        I: Iterator<Item = char>,
    {
        w.write_char(l)?;
        for c in chars {
            w.write_char(c)?;
        }
        w.write_char(r)?;
        w.write_char('\n')
    }
}

impl fmt::Display for FaxImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.ascii_art(f, &ASCII)
    }
}

/// The outcome of a decode: the rows committed so far and the error that
/// stopped the decoder, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Every row that was completely decoded
    pub image: FaxImage,
    /// Why decoding stopped early
    pub error: Option<FaxError>,
}

impl Decoded {
    /// Whether the stream was decoded without error
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Drop partial output on error
    pub fn into_result(self) -> FaxResult<FaxImage> {
        match self.error {
            None => Ok(self.image),
            Some(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ArtStyle, Decoded, FaxImage, UNICODE};
    use crate::FaxError;

    fn image() -> FaxImage {
        FaxImage::from_rows(3, vec![vec![255, 0, 255], vec![0, 0, 255]])
    }

    #[test]
    fn test_rows() {
        let img = image();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.row(0), Some(&[255, 0, 255][..]));
        assert_eq!(img.row(2), None);
        assert_eq!(img.into_rows(), vec![vec![255u8, 0, 255], vec![0u8, 0, 255]]);
    }

    #[test]
    fn test_invert() {
        let mut img = image();
        img.invert();
        assert_eq!(img.rows(), &[vec![0u8, 255, 0], vec![255u8, 255, 0]][..]);
    }

    #[test]
    fn test_ascii_art() {
        let img = image();
        assert_eq!(img.to_string(), "+---+\n| # |\n|## |\n+---+\n");

        let mut out = String::new();
        img.ascii_art(&mut out, &UNICODE).unwrap();
        assert_eq!(out, "╔═══╗\n║ █ ║\n║██ ║\n╚═══╝\n");

        let dots = ArtStyle {
            corners: ['.'; 4],
            horizontal: '.',
            vertical: '.',
            black: 'x',
            white: 'o',
        };
        let mut out = String::new();
        FaxImage::from_rows(2, vec![]).ascii_art(&mut out, &dots).unwrap();
        assert_eq!(out, "....\n....\n");
        out.clear();
        img.ascii_art(&mut out, &dots).unwrap();
        assert_eq!(out, ".....\n.oxo.\n.xxo.\n.....\n");
    }

    #[test]
    fn test_decoded_result() {
        let ok = Decoded {
            image: image(),
            error: None,
        };
        assert!(ok.is_complete());
        assert_eq!(ok.into_result().map(|i| i.height()), Ok(2));

        let failed = Decoded {
            image: image(),
            error: Some(FaxError::UnsupportedExtension),
        };
        assert!(!failed.is_complete());
        assert_eq!(failed.into_result(), Err(FaxError::UnsupportedExtension));
    }
}
