//! # Lexicon - record shapes and lexicographer encodings
//!
//! Boundary types of the dictionary around the bag index:
//!
//! | Module      | Purpose                                                   |
//! |-------------|-----------------------------------------------------------|
//! | [`records`] | Word / pointer / frame / synset records, verbose and compact |
//! | [`lex`]     | Lex numbers and lex types, driven by injected [`config::LexTables`] |
//! | [`sense`]   | Lex-sense and sense-key strings                           |
//!
//! ## Compact field names
//!
//! ```text
//! word           -> w     lex_filenum -> l
//! lex_id         -> l     ss_type     -> s
//! pointer_symbol -> o     words[]     -> w[]
//! synset_offset  -> y     pointers[]  -> p[]
//! pos            -> p     frames[]?   -> f[]?
//! source         -> s     gloss?      -> g?
//! target         -> t
//! f_num          -> f
//! w_num          -> w
//! ```

pub mod lex;
pub mod records;
pub mod sense;

use thiserror::Error;

pub use lex::{LexCodec, LexNumber, LexType, Pos};
pub use records::{
    Frame, MinifiedFrame, MinifiedPointer, MinifiedSynset, MinifiedWord, Pointer, Synset, Word,
};
pub use sense::{lex_sense, sense_key};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexiconError {
    /// Neither a lexicographer file nor a part of speech matched.
    #[error("unknown lexicographer name: {0}")]
    UnknownLexName(String),

    /// Lexicographer file number outside the configured table.
    #[error("unknown lexicographer file number: {0}")]
    UnknownLexFile(u8),

    /// Not a part-of-speech symbol.
    #[error("unknown part of speech: {0:?}")]
    UnknownPos(char),
}
