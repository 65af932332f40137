//! Errors raised while decoding a T.6 stream
use thiserror::Error;

/// An error when decoding a CCITT Group 4 encoded bi-level image
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FaxError {
    /// The lookahead byte is not the prefix of any mode code
    #[error("Invalid mode code (lookahead {0:#010b})")]
    InvalidModeCode(u8),

    /// An extension mode code was found
    #[error("Extensions are not supported")]
    UnsupportedExtension,

    /// The lookahead bits are not a run-length code of the current color
    #[error("Invalid horizontal code (lookahead {0:#018b})")]
    InvalidHorizontalCode(u16),

    /// A mode without a handler
    ///
    /// Every [`Mode`](crate::Mode) is handled by the decoder, so this is
    /// reserved for decoders that support fewer modes.
    #[error("Unknown mode ({0})")]
    UnknownMode(u8),
}

/// Type alias for convenience
pub type FaxResult<T> = Result<T, FaxError>;
