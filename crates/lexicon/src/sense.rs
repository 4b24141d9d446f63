//! Sense-key formatting.
//!
//! ```text
//! lemma%ss_type:lex_filenum:lex_id:head_word:head_id
//! ```
//!
//! Numeric fields are zero-padded to two digits. `head_word:head_id` is only
//! present for adjective satellites; otherwise the trailing part is `:`.

/// Lex sense: `ss_type:lex_filenum:lex_id:head`.
///
/// `head` is the head word and its lex id, for satellites.
#[must_use]
pub fn lex_sense(ss_type: u8, lex_filenum: u8, lex_id: u8, head: Option<(&str, u8)>) -> String {
    match head {
        Some((word, id)) if !word.is_empty() => {
            format!("{ss_type}:{lex_filenum:02}:{lex_id:02}:{word}:{id:02}")
        }
        _ => format!("{ss_type}:{lex_filenum:02}:{lex_id:02}::"),
    }
}

/// Full sense key: `lemma%lex_sense`.
#[must_use]
pub fn sense_key(
    lemma: &str,
    ss_type: u8,
    lex_filenum: u8,
    lex_id: u8,
    head: Option<(&str, u8)>,
) -> String {
    format!("{lemma}%{}", lex_sense(ss_type, lex_filenum, lex_id, head))
}
