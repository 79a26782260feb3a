//! Conversion between Unicode text and 5-bit Baudot/ITA telegraph code.
//!
//! ```
//! use baudot::{Decoder, Encoder};
//!
//! let words = Encoder::default().encode("HELLO, WORLD!");
//! assert_eq!(Decoder::default().decode(words), "HELLO, WORLD!");
//! ```

pub mod ita;
pub mod tape;

pub use crate::ita::{lookup, Alphabet, AlphabetError, Decoder, Encoder, Shift, Word, ITA1, ITA2, US_TTY};
