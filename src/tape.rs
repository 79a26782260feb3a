//! Five-hole paper tape pictures of code words.

use crate::ita::Word;
use bitflags::bitflags;

bitflags! {
    /// Punched channels in one row of tape. Channel 1 is the low bit.
    pub struct Holes: u8 {
        const ONE = 0x01;
        const TWO = 0x02;
        const THREE = 0x04;
        const FOUR = 0x08;
        const FIVE = 0x10;
    }
}

impl Holes {
    pub fn from_word(word: Word) -> Self {
        Self::from_bits_truncate(word)
    }

    pub fn word(self) -> Word {
        self.bits()
    }

    /// One row of tape, e.g. `|oo. o |`. The feed hole sits between
    /// channels 2 and 3.
    pub fn render(self) -> String {
        let mark = |hole: Holes| if self.contains(hole) { 'o' } else { ' ' };
        [
            '|',
            mark(Holes::ONE),
            mark(Holes::TWO),
            '.',
            mark(Holes::THREE),
            mark(Holes::FOUR),
            mark(Holes::FIVE),
            '|',
        ]
        .iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_rows() {
        assert_eq!(Holes::from_word(0).render(), "|  .   |");
        assert_eq!(Holes::from_word(1).render(), "|o .   |");
        assert_eq!(Holes::from_word(3).render(), "|oo.   |");
        assert_eq!(Holes::from_word(20).render(), "|  .o o|");
        assert_eq!(Holes::from_word(31).render(), "|oo.ooo|");
    }

    #[test]
    fn masks_to_five_bits() {
        assert_eq!(Holes::from_word(0xE3).word(), 3);
    }
}
