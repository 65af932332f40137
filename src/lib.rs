#![warn(missing_docs)]
//! # CCITT Group 4 (T.6) decoder
//!
//! Spec: ITU-T Recommendation T.6 (11/88) <https://www.itu.int/rec/T-REC-T.6-198811-I/en>
//!
//! Decodes MMR compressed bi-level images, as found in TIFF files with
//! `Compression = 4` and in PDF streams with `/CCITTFaxDecode` and `/K -1`,
//! into rows of 8-bit pels (255 = white, 0 = black).
//!
//! ```
//! use ccitt_t6::{decode, DecodeOptions};
//!
//! // Horizontal mode: 8 white pels, 0 black pels, then EOFB
//! let data = [0x33, 0x0D, 0xC0, 0x04, 0x00, 0x40];
//! let decoded = decode(&data, DecodeOptions::new(8));
//! let image = decoded.into_result().unwrap();
//! assert_eq!(image.rows(), &[vec![255u8; 8]][..]);
//! ```

pub mod bits;
mod color;
mod decode;
mod error;
mod image;
pub mod modes;
pub mod reference;
pub mod runs;

pub use color::Color;
pub use decode::{DecodeOptions, DecodeState, Decoder, EOFB};
pub use error::{FaxError, FaxResult};
pub use image::{ArtStyle, Decoded, FaxImage, ASCII, UNICODE};
pub use modes::Mode;

/// Decode a T.6 stream with the shared code tables
///
/// Returns every completely decoded row, along with the error that stopped
/// the decoder if the stream is malformed.
pub fn decode(data: &[u8], options: DecodeOptions) -> Decoded {
    Decoder::new(data, options).decode()
}
