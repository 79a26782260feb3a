use crate::ita::alphabet::{Alphabet, Shift, FS, ITA2, LS};
use std::convert::TryInto;
use std::fmt::Debug;
use tracing::{debug, trace};

/// Turns 5-bit words back into text, following LS/FS shifts as they arrive.
///
/// The active set persists across calls, so one decoder should be used per
/// stream. Words that are not valid indexes into the alphabet are dropped.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    alphabet: &'a Alphabet,
    shift: Shift,
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Decoder::new(&ITA2)
    }
}

impl<'a> Decoder<'a> {
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Decoder {
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

    /// Decode a single word. Shift words and invalid words yield `None`.
    pub fn decode_word<W>(&mut self, word: W) -> Option<char>
    where
        W: TryInto<usize> + Copy + Debug,
    {
        let ch = match word
            .try_into()
            .ok()
            .and_then(|index| self.alphabet.char_at(self.shift, index))
        {
            Some(ch) => ch,
            None => {
                trace!(?word, "skipping word outside the alphabet");
                return None;
            }
        };

        match ch {
            LS => self.shift_to(Shift::Letters),
            FS => self.shift_to(Shift::Figures),
            ch => return Some(ch),
        }
        None
    }

    pub fn decode_into<I>(&mut self, words: I, output: &mut String)
    where
        I: IntoIterator,
        I::Item: TryInto<usize> + Copy + Debug,
    {
        output.extend(words.into_iter().filter_map(|word| self.decode_word(word)));
    }

    pub fn decode<I>(&mut self, words: I) -> String
    where
        I: IntoIterator,
        I::Item: TryInto<usize> + Copy + Debug,
    {
        let mut output = String::new();
        self.decode_into(words, &mut output);
        output
    }

    fn shift_to(&mut self, shift: Shift) {
        if self.shift != shift {
            debug!(alphabet = self.alphabet.name(), %shift, "decoder shifted");
        }
        self.shift = shift;
    }
}
