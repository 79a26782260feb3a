use crate::ita::alphabet::{Alphabet, Shift, Word, ITA2};
use tracing::{debug, trace};

/// Turns text into 5-bit words, inserting LS/FS shift words when a character
/// is only available in the other set.
///
/// A character found in the active set never causes a shift, so characters
/// shared by both sets (space, CR, LF) keep whatever set is active. Characters
/// outside the alphabet are dropped.
#[derive(Clone, Debug)]
pub struct Encoder<'a> {
    alphabet: &'a Alphabet,
    shift: Shift,
}

impl Default for Encoder<'static> {
    fn default() -> Self {
        Encoder::new(&ITA2)
    }
}

impl<'a> Encoder<'a> {
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Encoder {
            alphabet,
            shift: Shift::Letters,
        }
    }

    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    pub fn shift(&self) -> Shift {
        self.shift
    }

    pub fn reset(&mut self) {
        self.shift = Shift::Letters;
    }

    pub fn encode_char_into(&mut self, ch: char, output: &mut Vec<Word>) {
        let slots = self.alphabet.slots(ch);
        if let Some(word) = slots.get(self.shift) {
            output.push(word);
            return;
        }

        let target = self.shift.other();
        match (slots.get(target), self.alphabet.shift_word(self.shift)) {
            (Some(word), Some(shift_word)) => {
                debug!(alphabet = self.alphabet.name(), shift = %target, "encoder shifted");
                output.extend_from_slice(&[shift_word, word]);
                self.shift = target;
            }
            _ => trace!(?ch, "skipping character outside the alphabet"),
        }
    }

    pub fn encode_char(&mut self, ch: char) -> Vec<Word> {
        let mut output = Vec::with_capacity(2);
        self.encode_char_into(ch, &mut output);
        output
    }

    pub fn encode_into(&mut self, text: &str, output: &mut Vec<Word>) {
        for ch in text.chars() {
            self.encode_char_into(ch, &mut *output);
        }
    }

    pub fn encode(&mut self, text: &str) -> Vec<Word> {
        let mut output = Vec::with_capacity(text.len());
        self.encode_into(text, &mut output);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ita::alphabet::{CR, ITA1, LF};

    #[test]
    fn encodes_shifts() {
        let mut encoder = Encoder::default();
        assert_eq!(encoder.encode("AA"), vec![3, 3]);
        assert_eq!(encoder.encode("!!"), vec![27, 13, 13]);
        assert_eq!(encoder.encode("AA"), vec![31, 3, 3]);
        assert_eq!(encoder.encode("A!A"), vec![3, 27, 13, 31, 3]);
    }

    #[test]
    fn chars_and_strings_agree() {
        let source = "HELLO, WORLD!";
        let mut by_char = Encoder::default();
        let words: Vec<Word> = source.chars().flat_map(|ch| by_char.encode_char(ch)).collect();
        assert_eq!(words, Encoder::default().encode(source));
    }

    #[test]
    fn shared_characters_keep_the_active_set() {
        let mut encoder = Encoder::default();
        let text: String = ['1', ' ', CR, LF, '2'].iter().collect();
        assert_eq!(encoder.encode(&text), vec![27, 23, 4, 8, 2, 19]);
        assert_eq!(encoder.shift(), Shift::Figures);
    }

    #[test]
    fn skips_unknown_characters() {
        let mut encoder = Encoder::default();
        assert_eq!(encoder.encode("a{é}"), Vec::<Word>::new());
        assert_eq!(encoder.shift(), Shift::Letters);
        assert_eq!(encoder.encode("A{B}C"), vec![3, 25, 14]);
    }

    #[test]
    fn ita1_uses_its_own_shift_words() {
        let mut encoder = Encoder::new(&ITA1);
        assert_eq!(encoder.encode("A1A"), vec![1, 8, 1, 16, 1]);
    }

    #[test]
    fn reports_its_alphabet() {
        assert_eq!(Encoder::default().alphabet().name(), "ITA2");
        assert_eq!(Encoder::new(&ITA1).alphabet().name(), "ITA1");
    }

    #[test]
    fn reset_returns_to_letters() {
        let mut encoder = Encoder::default();
        encoder.encode("!");
        encoder.reset();
        assert_eq!(encoder.encode("A"), vec![3]);
    }
}
