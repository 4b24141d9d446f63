//! Compact numeric encodings of lexicographer categories.
//!
//! ## Lex number (u8)
//!
//! ```text
//!  7   6  5           0
//! ┌──────┬─────────────┐
//! │ pos  │ file in pos │   noun 0..  verb 64..  adj 128..  adv 192
//! └──────┴─────────────┘
//! ```
//!
//! The exact numbers come from [`LexTables::lex_numbers`]; adjective
//! satellites use a dedicated number (144 in WordNet).
//!
//! ## Lex type (u16)
//!
//! `lex_number << 6 | lex_id`, with `lex_id` the 6-bit sense-local id.

use config::LexTables;

use crate::LexiconError;

pub type LexNumber = u8;
pub type LexType = u16;

const LEX_ID_BITS: u32 = 6;
const LEX_ID_MASK: u16 = (1 << LEX_ID_BITS) - 1;

/// Part of speech, in WordNet's synset type order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    Verb,
    Adjective,
    Adverb,
    AdjectiveSatellite,
}

impl Pos {
    const ALL: [Pos; 5] = [
        Pos::Noun,
        Pos::Verb,
        Pos::Adjective,
        Pos::Adverb,
        Pos::AdjectiveSatellite,
    ];

    pub fn from_symbol(symbol: char) -> Result<Self, LexiconError> {
        match symbol {
            'n' => Ok(Pos::Noun),
            'v' => Ok(Pos::Verb),
            'a' => Ok(Pos::Adjective),
            'r' => Ok(Pos::Adverb),
            's' => Ok(Pos::AdjectiveSatellite),
            other => Err(LexiconError::UnknownPos(other)),
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adjective => 'a',
            Pos::Adverb => 'r',
            Pos::AdjectiveSatellite => 's',
        }
    }

    /// WordNet synset type number, 1..=5.
    #[must_use]
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Encoder/decoder for lex numbers and lex types over injected tables.
#[derive(Debug, Clone)]
pub struct LexCodec {
    tables: LexTables,
    /// Lex number -> lexicographer file number.
    file_of: [Option<u8>; 256],
}

impl LexCodec {
    pub fn new(tables: LexTables) -> Self {
        let mut file_of = [None; 256];
        for (file, &num) in tables
            .lex_numbers
            .iter()
            .take(tables.lex_file_names.len())
            .enumerate()
        {
            file_of[num as usize] = Some(file as u8);
        }
        Self { tables, file_of }
    }

    #[must_use]
    pub fn tables(&self) -> &LexTables {
        &self.tables
    }

    /// Lex number from a lexicographer file number and/or part of speech.
    ///
    /// A satellite POS always yields the satellite number. With only a POS,
    /// the result is the POS's base number (`pos << 6`). With neither, 0.
    pub fn lex_number(&self, file: Option<u8>, pos: Option<Pos>) -> Result<LexNumber, LexiconError> {
        if pos == Some(Pos::AdjectiveSatellite) {
            return Ok(self.tables.satellite_lex_number());
        }
        match (file, pos) {
            (Some(f), _) => {
                if (f as usize) < self.tables.lex_file_names.len() {
                    Ok(self.tables.lex_numbers[f as usize])
                } else {
                    Err(LexiconError::UnknownLexFile(f))
                }
            }
            (None, Some(p)) => Ok((p.index() as u8) << LEX_ID_BITS),
            (None, None) => Ok(0),
        }
    }

    /// Lex number from a name such as `"noun.act"`, `"noun"` or `"n"`.
    ///
    /// Trailing dot-separated parts (e.g. a lex id) are ignored.
    pub fn lex_number_from_name(&self, name: &str) -> Result<LexNumber, LexiconError> {
        let mut parts = name.split('.');
        let head = parts.next().unwrap_or_default();
        let file = parts.next().and_then(|second| {
            let full = format!("{head}.{second}");
            self.tables
                .lex_file_names
                .iter()
                .position(|n| *n == full)
                .map(|i| i as u8)
        });
        let pos = self.pos_from_name(head);
        if file.is_none() && pos.is_none() {
            return Err(LexiconError::UnknownLexName(name.to_string()));
        }
        self.lex_number(file, pos)
    }

    /// Lexicographer file number of a lex number, if it names a file.
    #[must_use]
    pub fn to_lex_file_number(&self, num: LexNumber) -> Option<u8> {
        self.file_of[num as usize]
    }

    /// WordNet synset type number (1..=5) of a lex number.
    #[must_use]
    pub fn to_pos_number(&self, num: LexNumber) -> u8 {
        if num == self.tables.satellite_lex_number() {
            Pos::AdjectiveSatellite.number()
        } else {
            1 + (num >> LEX_ID_BITS)
        }
    }

    #[must_use]
    pub fn to_pos(&self, num: LexNumber) -> Pos {
        Pos::ALL[self.to_pos_number(num) as usize - 1]
    }

    /// Lex type from a lex number and a sense-local id (< 64).
    #[must_use]
    pub fn lex_type(&self, num: LexNumber, lex_id: u8) -> LexType {
        debug_assert!((lex_id as u16) <= LEX_ID_MASK, "lex id {lex_id} exceeds 6 bits");
        (num as u16) << LEX_ID_BITS | (lex_id as u16 & LEX_ID_MASK)
    }

    /// Lex type from a name such as `"noun.act.3"`. A missing or
    /// non-numeric last part counts as lex id 0.
    pub fn lex_type_from_name(&self, name: &str) -> Result<LexType, LexiconError> {
        let lex_id = name
            .rsplit('.')
            .next()
            .and_then(|last| last.parse::<u8>().ok())
            .unwrap_or(0);
        let num = self.lex_number_from_name(name)?;
        Ok(self.lex_type(num, lex_id))
    }

    #[must_use]
    pub fn to_lex_id(&self, lex_type: LexType) -> u8 {
        (lex_type & LEX_ID_MASK) as u8
    }

    #[must_use]
    pub fn to_lex_number(&self, lex_type: LexType) -> LexNumber {
        (lex_type >> LEX_ID_BITS) as u8
    }

    /// Configured long name of `pos`.
    #[must_use]
    pub fn pos_name(&self, pos: Pos) -> Option<&str> {
        self.tables.pos.get(pos.index()).map(|p| p.name.as_str())
    }

    /// Part of speech by configured long name or symbol.
    #[must_use]
    pub fn pos_from_name(&self, name: &str) -> Option<Pos> {
        let mut chars = name.chars();
        let single = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };
        self.tables
            .pos
            .iter()
            .position(|p| p.name == name || Some(p.symbol) == single)
            .and_then(|i| Pos::ALL.get(i).copied())
    }

    #[must_use]
    pub fn lex_file_name(&self, file: u8) -> Option<&str> {
        self.tables.lex_file_names.get(file as usize).map(String::as_str)
    }

    #[must_use]
    pub fn lex_contents(&self, file: u8) -> Option<&str> {
        self.tables.lex_contents.get(file as usize).map(String::as_str)
    }
}

impl Default for LexCodec {
    fn default() -> Self {
        Self::new(LexTables::wordnet())
    }
}
