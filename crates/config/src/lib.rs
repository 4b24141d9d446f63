//! # Config - lookup tables and runtime settings
//!
//! Two kinds of configuration live here:
//!
//! * [`LexTables`]: the static lexicographer tables (part-of-speech names,
//!   lexicographer file names and descriptions, compact lex numbers). They
//!   are data, not logic, and are handed whole to the encoders that need
//!   them. [`LexTables::wordnet`] returns the WordNet 3.x tables.
//! * [`Settings`]: runtime knobs read from the environment.
//!
//! ```text
//! LEXBAG_RESERVE   initial bag capacity in entries    (default: 4096)
//! LEXBAG_CHECKED   use checked inserts in the shell   (default: "true")
//! ```

use thiserror::Error;

/// Default initial capacity of each bag, in entries.
pub const DEFAULT_RESERVE: usize = 4096;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Table columns that must line up have different lengths.
    #[error("table `{table}` has {got} rows, expected {expected}")]
    TableShape {
        table: &'static str,
        got: usize,
        expected: usize,
    },

    /// A lex number appears twice, so it cannot be inverted.
    #[error("lex number {0} is assigned to more than one lexicographer file")]
    DuplicateLexNumber(u8),
}

/// Part-of-speech symbol and its long name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosName {
    pub symbol: char,
    pub name: String,
}

/// Static lexicographer tables.
///
/// `lex_file_names`, `lex_contents` and the first `lex_file_names.len()`
/// entries of `lex_numbers` are indexed by lexicographer file number. The
/// last entry of `lex_numbers` is the adjective-satellite code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexTables {
    /// Ordered by WordNet's synset type number minus one: n, v, a, r, s.
    pub pos: Vec<PosName>,
    pub lex_file_names: Vec<String>,
    pub lex_contents: Vec<String>,
    pub lex_numbers: Vec<u8>,
}

const WORDNET_POS: [(char, &str); 5] = [
    ('n', "noun"),
    ('v', "verb"),
    ('a', "adjective"),
    ('r', "adverb"),
    ('s', "adjective satellite"),
];

const WORDNET_LEX_FILES: [(&str, &str, u8); 45] = [
    ("adj.all", "all adjective clusters", 128),
    ("adj.pert", "relational adjectives (pertainyms)", 160),
    ("adv.all", "all adverbs", 192),
    ("noun.Tops", "unique beginner for nouns", 0),
    ("noun.act", "nouns denoting acts or actions", 1),
    ("noun.animal", "nouns denoting animals", 2),
    ("noun.artifact", "nouns denoting man-made objects", 3),
    ("noun.attribute", "nouns denoting attributes of people and objects", 4),
    ("noun.body", "nouns denoting body parts", 5),
    ("noun.cognition", "nouns denoting cognitive processes and contents", 6),
    ("noun.communication", "nouns denoting communicative processes and contents", 7),
    ("noun.event", "nouns denoting natural events", 8),
    ("noun.feeling", "nouns denoting feelings and emotions", 9),
    ("noun.food", "nouns denoting foods and drinks", 10),
    ("noun.group", "nouns denoting groupings of people or objects", 11),
    ("noun.location", "nouns denoting spatial position", 12),
    ("noun.motive", "nouns denoting goals", 13),
    ("noun.object", "nouns denoting natural objects (not man-made)", 14),
    ("noun.person", "nouns denoting people", 15),
    ("noun.phenomenon", "nouns denoting natural phenomena", 16),
    ("noun.plant", "nouns denoting plants", 17),
    ("noun.possession", "nouns denoting possession and transfer of possession", 18),
    ("noun.process", "nouns denoting natural processes", 19),
    ("noun.quantity", "nouns denoting quantities and units of measure", 20),
    ("noun.relation", "nouns denoting relations between people or things or ideas", 21),
    ("noun.shape", "nouns denoting two and three dimensional shapes", 22),
    ("noun.state", "nouns denoting stable states of affairs", 23),
    ("noun.substance", "nouns denoting substances", 24),
    ("noun.time", "nouns denoting time and temporal relations", 25),
    ("verb.body", "verbs of grooming, dressing and bodily care", 64),
    ("verb.change", "verbs of size, temperature change, intensifying, etc.", 65),
    ("verb.cognition", "verbs of thinking, judging, analyzing, doubting", 66),
    ("verb.communication", "verbs of telling, asking, ordering, singing", 67),
    ("verb.competition", "verbs of fighting, athletic activities", 68),
    ("verb.consumption", "verbs of eating and drinking", 69),
    ("verb.contact", "verbs of touching, hitting, tying, digging", 70),
    ("verb.creation", "verbs of sewing, baking, painting, performing", 71),
    ("verb.emotion", "verbs of feeling", 72),
    ("verb.motion", "verbs of walking, flying, swimming", 73),
    ("verb.perception", "verbs of seeing, hearing, feeling", 74),
    ("verb.possession", "verbs of buying, selling, owning", 75),
    ("verb.social", "verbs of political and social activities and events", 76),
    ("verb.stative", "verbs of being, having, spatial relations", 77),
    ("verb.weather", "verbs of raining, snowing, thawing, thundering", 78),
    ("adj.ppl", "participial adjectives", 176),
];

/// Lex number of adjective satellites, stored after the per-file numbers.
const WORDNET_SATELLITE: u8 = 144;

impl LexTables {
    /// Builds tables from caller-supplied columns and checks their shape.
    pub fn new(
        pos: Vec<PosName>,
        lex_file_names: Vec<String>,
        lex_contents: Vec<String>,
        lex_numbers: Vec<u8>,
    ) -> Result<Self, ConfigError> {
        let files = lex_file_names.len();
        if lex_contents.len() != files {
            return Err(ConfigError::TableShape {
                table: "lex_contents",
                got: lex_contents.len(),
                expected: files,
            });
        }
        if lex_numbers.len() != files + 1 {
            return Err(ConfigError::TableShape {
                table: "lex_numbers",
                got: lex_numbers.len(),
                expected: files + 1,
            });
        }
        let mut seen = [false; 256];
        for &n in &lex_numbers {
            if std::mem::replace(&mut seen[n as usize], true) {
                return Err(ConfigError::DuplicateLexNumber(n));
            }
        }
        Ok(Self {
            pos,
            lex_file_names,
            lex_contents,
            lex_numbers,
        })
    }

    /// The WordNet 3.x tables: 5 parts of speech, 45 lexicographer files and
    /// 46 lex numbers (the last one for adjective satellites).
    pub fn wordnet() -> Self {
        let pos = WORDNET_POS
            .iter()
            .map(|&(symbol, name)| PosName {
                symbol,
                name: name.to_string(),
            })
            .collect();
        let mut lex_numbers: Vec<u8> = WORDNET_LEX_FILES.iter().map(|f| f.2).collect();
        lex_numbers.push(WORDNET_SATELLITE);
        Self {
            pos,
            lex_file_names: WORDNET_LEX_FILES.iter().map(|f| f.0.to_string()).collect(),
            lex_contents: WORDNET_LEX_FILES.iter().map(|f| f.1.to_string()).collect(),
            lex_numbers,
        }
    }

    /// Lex number used for adjective satellites.
    #[must_use]
    pub fn satellite_lex_number(&self) -> u8 {
        self.lex_numbers[self.lex_file_names.len()]
    }
}

impl Default for LexTables {
    fn default() -> Self {
        Self::wordnet()
    }
}

/// Runtime settings, normally read with [`Settings::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Initial capacity of each bag, in entries.
    pub reserve: usize,
    /// Route inserts through the checked `try_*` bag operations.
    pub checked: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reserve: DEFAULT_RESERVE,
            checked: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        Self {
            reserve: parse_or("LEXBAG_RESERVE", lookup("LEXBAG_RESERVE"), defaults.reserve),
            checked: parse_or("LEXBAG_CHECKED", lookup("LEXBAG_CHECKED"), defaults.checked),
        }
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Debug>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(s) => s.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(target: "config", key, value = %s, ?default, "unparsable setting; using default");
            default
        }),
    }
}
