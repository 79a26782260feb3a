//! Letters/Figures character tables for the Baudot family of codes.

use snafu::Snafu;
use std::borrow::Cow;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// A single 5-bit code unit.
pub type Word = u8;

/// Number of slots in each of the two sets.
pub const SET_SIZE: usize = 32;

/// ASCII <NUL>, conventionally the blank in slot 0.
pub const NUL: char = '\x00';
/// ASCII <ENQ>, "who are you" on ITA2 machines.
pub const ENQ: char = '\x05';
/// ASCII <BEL>
pub const BEL: char = '\x07';
/// ASCII <LF>
pub const LF: char = '\x0A';
/// ASCII <CR>
pub const CR: char = '\x0D';
/// ASCII <SO>. Selects the Figures set.
pub const FS: char = '\x0E';
/// ASCII <SI>. Selects the Letters set.
pub const LS: char = '\x0F';
/// ASCII <DC1>. Left to device interpretation.
pub const DC1: char = '\x11';
/// ASCII <DC2>. Left to device interpretation.
pub const DC2: char = '\x12';
/// ASCII <DC3>. Left to device interpretation.
pub const DC3: char = '\x13';
/// ASCII <DC4>. Left to device interpretation.
pub const DC4: char = '\x14';
/// ASCII <DEL>
pub const DEL: char = '\x7F';

/// Which of the two sets is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shift {
    Letters,
    Figures,
}

impl Shift {
    pub fn other(self) -> Self {
        match self {
            Shift::Letters => Shift::Figures,
            Shift::Figures => Shift::Letters,
        }
    }

    /// The control character that selects this set.
    pub fn control(self) -> char {
        match self {
            Shift::Letters => LS,
            Shift::Figures => FS,
        }
    }
}

impl Default for Shift {
    fn default() -> Self {
        Shift::Letters
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shift::Letters => "letters",
            Shift::Figures => "figures",
        })
    }
}

/// Where a character lives in an alphabet. The first occurrence in each set
/// wins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Slots {
    pub letters: Option<Word>,
    pub figures: Option<Word>,
}

impl Slots {
    pub fn get(self, shift: Shift) -> Option<Word> {
        match shift {
            Shift::Letters => self.letters,
            Shift::Figures => self.figures,
        }
    }

    fn slot_mut(&mut self, shift: Shift) -> &mut Option<Word> {
        match shift {
            Shift::Letters => &mut self.letters,
            Shift::Figures => &mut self.figures,
        }
    }

    pub fn is_empty(self) -> bool {
        self.letters.is_none() && self.figures.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AlphabetError {
    #[error("{set} set has {len} slots, expected {}", SET_SIZE)]
    WrongLength { set: Shift, len: usize },
    #[error("{set} set has no {control:?} control to leave it")]
    MissingShift { set: Shift, control: char },
}

#[derive(Clone, Debug, PartialEq, Eq, Snafu)]
pub enum LookupError {
    #[snafu(display("Invalid alphabet: {}", name))]
    UnknownAlphabet { name: String },
}

/// A pair of 32-entry Letters/Figures sets.
#[derive(Clone)]
pub struct Alphabet {
    name: Cow<'static, str>,
    letters: [char; SET_SIZE],
    figures: [char; SET_SIZE],
    index: OnceLock<HashMap<char, Slots>>,
}

impl Alphabet {
    const fn canonical(name: &'static str, letters: [char; SET_SIZE], figures: [char; SET_SIZE]) -> Self {
        Alphabet {
            name: Cow::Borrowed(name),
            letters,
            figures,
            index: OnceLock::new(),
        }
    }

    /// Build a custom alphabet.
    ///
    /// The Letters set must hold [`FS`] and the Figures set must hold [`LS`],
    /// otherwise an encoder would have no way to leave either set.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        letters: [char; SET_SIZE],
        figures: [char; SET_SIZE],
    ) -> Result<Self, AlphabetError> {
        let alphabet = Alphabet {
            name: name.into(),
            letters,
            figures,
            index: OnceLock::new(),
        };
        for set in [Shift::Letters, Shift::Figures] {
            if alphabet.shift_word(set).is_none() {
                return Err(AlphabetError::MissingShift {
                    set,
                    control: set.other().control(),
                });
            }
        }
        Ok(alphabet)
    }

    /// Like [`Alphabet::new`], for tables whose length is only known at
    /// runtime.
    pub fn from_slices(
        name: impl Into<Cow<'static, str>>,
        letters: &[char],
        figures: &[char],
    ) -> Result<Self, AlphabetError> {
        let letters = <[char; SET_SIZE]>::try_from(letters).map_err(|_| AlphabetError::WrongLength {
            set: Shift::Letters,
            len: letters.len(),
        })?;
        let figures = <[char; SET_SIZE]>::try_from(figures).map_err(|_| AlphabetError::WrongLength {
            set: Shift::Figures,
            len: figures.len(),
        })?;
        Self::new(name, letters, figures)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set(&self, shift: Shift) -> &[char; SET_SIZE] {
        match shift {
            Shift::Letters => &self.letters,
            Shift::Figures => &self.figures,
        }
    }

    /// Character at `index` in the given set, if the index is a valid word.
    pub fn char_at(&self, shift: Shift, index: usize) -> Option<char> {
        self.set(shift).get(index).copied()
    }

    pub fn slots(&self, ch: char) -> Slots {
        self.index().get(&ch).copied().unwrap_or_default()
    }

    pub fn contains(&self, ch: char) -> bool {
        !self.slots(ch).is_empty()
    }

    /// Word that leaves `from` for the other set: FS in Letters, LS in
    /// Figures.
    pub fn shift_word(&self, from: Shift) -> Option<Word> {
        self.slots(from.other().control()).get(from)
    }

    fn index(&self) -> &HashMap<char, Slots> {
        self.index.get_or_init(|| {
            let mut index: HashMap<char, Slots> = HashMap::with_capacity(2 * SET_SIZE);
            for shift in [Shift::Letters, Shift::Figures] {
                for (word, &ch) in self.set(shift).iter().enumerate() {
                    index
                        .entry(ch)
                        .or_default()
                        .slot_mut(shift)
                        .get_or_insert(word as Word);
                }
            }
            index
        })
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("name", &self.name)
            .field("letters", &self.letters)
            .field("figures", &self.figures)
            .finish()
    }
}

/// The ITA1 international teletype alphabet.
pub static ITA1: Alphabet = Alphabet::canonical(
    "ITA1",
    [
        NUL, 'A', 'E', CR,  'Y', 'U', 'I', 'O', FS,  'J', 'G', 'H', 'B', 'C', 'F', 'D',
        ' ', LF,  'X', 'Z', 'S', 'T', 'W', 'V', DEL, 'K', 'M', 'L', 'R', 'Q', 'N', 'P',
    ],
    [
        NUL, '1', '2', CR,  '3', '4', DC1, '5', ' ', '6', '7', '+', '8', '9', DC2, '0',
        LS,  LF,  ',', ':', '.', DC3, '?', '\'', DEL, '(', ')', '=', '-', '/', DC4, '%',
    ],
);

/// The ITA2 international teletype alphabet.
pub static ITA2: Alphabet = Alphabet::canonical(
    "ITA2",
    [
        NUL, 'E', LF,  'A', ' ', 'S', 'I', 'U', CR,  'D', 'R', 'J', 'N', 'F', 'C', 'K',
        'T', 'Z', 'L', 'W', 'H', 'Y', 'P', 'Q', 'O', 'B', 'G', FS,  'M', 'X', 'V', LS,
    ],
    [
        NUL, '3', LF,  '-', ' ', '\'', '8', '7', CR, ENQ, '4', BEL, ',', '!', ':', '(',
        '5', '+', ')', '2', '£', '6', '0', '1', '9', '?', '&', FS,  '.', '/', '=', LS,
    ],
);

/// The US standard teletype alphabet.
pub static US_TTY: Alphabet = Alphabet::canonical(
    "US-TTY",
    [
        NUL, 'E', LF,  'A', ' ', 'S', 'I', 'U', CR,  'D', 'R', 'J', 'N', 'F', 'C', 'K',
        'T', 'Z', 'L', 'W', 'H', 'Y', 'P', 'Q', 'O', 'B', 'G', FS,  'M', 'X', 'V', LS,
    ],
    [
        NUL, '3', LF,  '-', ' ', BEL, '8', '7', CR,  '$', '4', '\'', ',', '!', ':', '(',
        '5', '"', ')', '2', '#', '6', '0', '1', '9', '?', '&', FS,  '.', '/', ';', LS,
    ],
);

pub static ALPHABETS: [&Alphabet; 3] = [&ITA1, &ITA2, &US_TTY];

fn normalize(name: &str) -> String {
    name.replace('-', "_").to_ascii_uppercase()
}

/// Resolve `ITA1`, `ITA2` or `US-TTY` (any case, `-` or `_`) to its table.
pub fn lookup(name: &str) -> Result<&'static Alphabet, LookupError> {
    let wanted = normalize(name);
    ALPHABETS
        .iter()
        .copied()
        .find(|alphabet| normalize(alphabet.name()) == wanted)
        .ok_or_else(|| LookupError::UnknownAlphabet { name: name.to_owned() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_tables_are_valid() {
        for alphabet in ALPHABETS.iter() {
            let rebuilt = Alphabet::new(alphabet.name().to_owned(), alphabet.letters, alphabet.figures);
            assert!(rebuilt.is_ok(), "{} failed validation", alphabet.name());
        }
    }

    #[test]
    fn shift_words() {
        assert_eq!(ITA2.shift_word(Shift::Letters), Some(27));
        assert_eq!(ITA2.shift_word(Shift::Figures), Some(31));
        assert_eq!(ITA1.shift_word(Shift::Letters), Some(8));
        assert_eq!(ITA1.shift_word(Shift::Figures), Some(16));
    }

    #[test]
    fn reverse_index_records_both_sets() {
        assert_eq!(ITA2.slots(' '), Slots { letters: Some(4), figures: Some(4) });
        assert_eq!(ITA2.slots('A'), Slots { letters: Some(3), figures: None });
        assert_eq!(ITA2.slots('£'), Slots { letters: None, figures: Some(20) });
        assert!(ITA2.slots('{').is_empty());
        assert!(!US_TTY.contains('£'));
        assert_eq!(US_TTY.slots('#').figures, Some(20));
    }

    #[test]
    fn char_at_rejects_out_of_range() {
        assert_eq!(ITA2.char_at(Shift::Letters, 3), Some('A'));
        assert_eq!(ITA2.char_at(Shift::Figures, 13), Some('!'));
        assert_eq!(ITA2.char_at(Shift::Letters, 32), None);
    }

    #[test]
    fn first_occurrence_wins() {
        let mut letters = ITA2.letters;
        letters[30] = 'A';
        let alphabet = Alphabet::new("dup", letters, ITA2.figures).unwrap();
        assert_eq!(alphabet.slots('A').letters, Some(3));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Alphabet::from_slices("short", &ITA2.letters[..31], &ITA2.figures).unwrap_err();
        assert_eq!(err, AlphabetError::WrongLength { set: Shift::Letters, len: 31 });

        let mut long = ITA2.figures.to_vec();
        long.push('@');
        let err = Alphabet::from_slices("long", &ITA2.letters, &long).unwrap_err();
        assert_eq!(err, AlphabetError::WrongLength { set: Shift::Figures, len: 33 });
    }

    #[test]
    fn rejects_missing_shift() {
        let mut letters = ITA2.letters;
        letters[27] = '@';
        let err = Alphabet::new("no-fs", letters, ITA2.figures).unwrap_err();
        assert_eq!(err, AlphabetError::MissingShift { set: Shift::Letters, control: FS });
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(lookup("ITA1").unwrap().name(), "ITA1");
        assert_eq!(lookup("ita2").unwrap().name(), "ITA2");
        assert_eq!(lookup("us-tty").unwrap().name(), "US-TTY");
        assert_eq!(lookup("US_TTY").unwrap().name(), "US-TTY");

        let err = lookup("murray").unwrap_err();
        assert_eq!(err.to_string(), "Invalid alphabet: murray");
    }
}
