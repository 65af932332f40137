//! Common structs and enums

/// Black or White Color
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// No-Ink
    #[default]
    White,
    /// Ink
    Black,
}

impl Color {
    /// Output intensity of a white pel
    pub const WHITE_PEL: u8 = 255;
    /// Output intensity of a black pel
    pub const BLACK_PEL: u8 = 0;

    /// Invert a color
    pub fn invert(&mut self) {
        *self = self.opposite();
    }

    /// The other color
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The 8-bit intensity of this color
    pub fn pel(self) -> u8 {
        match self {
            Color::White => Self::WHITE_PEL,
            Color::Black => Self::BLACK_PEL,
        }
    }
}

impl From<bool> for Color {
    fn from(b: bool) -> Color {
        if b {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        self.opposite()
    }
}

/// Swap black and white in an 8-bit pel
pub(crate) fn invert_pel(pel: u8) -> u8 {
    if pel == Color::BLACK_PEL {
        Color::WHITE_PEL
    } else {
        Color::BLACK_PEL
    }
}

#[cfg(test)]
mod tests {
    use super::{invert_pel, Color};

    #[test]
    fn test_invert() {
        let mut c = Color::White;
        c.invert();
        assert_eq!(c, Color::Black);
        c.invert();
        assert_eq!(c, Color::White);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn test_pels() {
        assert_eq!(Color::White.pel(), 255);
        assert_eq!(Color::Black.pel(), 0);
        assert_eq!(invert_pel(255), 0);
        assert_eq!(invert_pel(0), 255);
        assert_eq!(Color::from(true), Color::Black);
    }
}
