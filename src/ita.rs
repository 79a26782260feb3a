//! Stateful Baudot/ITA transducers and the alphabets they run over.

pub mod alphabet;
pub mod decoder;
pub mod encoder;

pub use self::alphabet::{lookup, Alphabet, AlphabetError, LookupError, Shift, Slots, Word, ITA1, ITA2, US_TTY};
pub use self::decoder::Decoder;
pub use self::encoder::Encoder;
