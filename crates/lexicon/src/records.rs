//! Dictionary records in their verbose form and the compact form used for
//! storage. Conversions are plain field renames (`From` both ways).

use serde::{Deserialize, Serialize};

/// One word of a synset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    pub lex_id: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifiedWord {
    #[serde(rename = "w")]
    pub word: String,
    #[serde(rename = "l")]
    pub lex_id: u8,
}

/// A relation from a synset (or one of its words) to another synset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    pub pointer_symbol: String,
    pub synset_offset: u32,
    pub pos: char,
    /// Source word index, 0 for the whole synset.
    pub source: u8,
    /// Target word index, 0 for the whole synset.
    pub target: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifiedPointer {
    #[serde(rename = "o")]
    pub pointer_symbol: String,
    #[serde(rename = "y")]
    pub synset_offset: u32,
    #[serde(rename = "p")]
    pub pos: char,
    #[serde(rename = "s")]
    pub source: u8,
    #[serde(rename = "t")]
    pub target: u8,
}

/// Verb sentence frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub f_num: u8,
    /// Word the frame applies to, 0 for all words.
    pub w_num: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifiedFrame {
    #[serde(rename = "f")]
    pub f_num: u8,
    #[serde(rename = "w")]
    pub w_num: u8,
}

/// A synset as read from the database files.
///
/// The `*_cnt` fields mirror the lengths of their lists; build with
/// [`Synset::new`] to keep them consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    pub lex_filenum: u8,
    pub ss_type: char,
    pub w_cnt: usize,
    pub words: Vec<Word>,
    pub p_cnt: usize,
    pub pointers: Vec<Pointer>,
    pub f_cnt: usize,
    pub frames: Option<Vec<Frame>>,
    pub gloss: Option<String>,
}

impl Synset {
    pub fn new(
        lex_filenum: u8,
        ss_type: char,
        words: Vec<Word>,
        pointers: Vec<Pointer>,
        frames: Option<Vec<Frame>>,
        gloss: Option<String>,
    ) -> Self {
        Self {
            lex_filenum,
            ss_type,
            w_cnt: words.len(),
            words,
            p_cnt: pointers.len(),
            pointers,
            f_cnt: frames.as_ref().map_or(0, Vec::len),
            frames,
            gloss,
        }
    }
}

/// Compact synset. `f` and `g` are left out of the JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifiedSynset {
    #[serde(rename = "l")]
    pub lex_filenum: u8,
    #[serde(rename = "s")]
    pub ss_type: char,
    #[serde(rename = "w")]
    pub words: Vec<MinifiedWord>,
    #[serde(rename = "p")]
    pub pointers: Vec<MinifiedPointer>,
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<MinifiedFrame>>,
    #[serde(rename = "g", default, skip_serializing_if = "Option::is_none")]
    pub gloss: Option<String>,
}

impl From<Word> for MinifiedWord {
    fn from(x: Word) -> Self {
        Self {
            word: x.word,
            lex_id: x.lex_id,
        }
    }
}

impl From<MinifiedWord> for Word {
    fn from(x: MinifiedWord) -> Self {
        Self {
            word: x.word,
            lex_id: x.lex_id,
        }
    }
}

impl From<Pointer> for MinifiedPointer {
    fn from(x: Pointer) -> Self {
        Self {
            pointer_symbol: x.pointer_symbol,
            synset_offset: x.synset_offset,
            pos: x.pos,
            source: x.source,
            target: x.target,
        }
    }
}

impl From<MinifiedPointer> for Pointer {
    fn from(x: MinifiedPointer) -> Self {
        Self {
            pointer_symbol: x.pointer_symbol,
            synset_offset: x.synset_offset,
            pos: x.pos,
            source: x.source,
            target: x.target,
        }
    }
}

impl From<Frame> for MinifiedFrame {
    fn from(x: Frame) -> Self {
        Self {
            f_num: x.f_num,
            w_num: x.w_num,
        }
    }
}

impl From<MinifiedFrame> for Frame {
    fn from(x: MinifiedFrame) -> Self {
        Self {
            f_num: x.f_num,
            w_num: x.w_num,
        }
    }
}

impl From<Synset> for MinifiedSynset {
    /// Lists are taken whole; the `*_cnt` fields are not consulted.
    fn from(x: Synset) -> Self {
        Self {
            lex_filenum: x.lex_filenum,
            ss_type: x.ss_type,
            words: x.words.into_iter().map(Into::into).collect(),
            pointers: x.pointers.into_iter().map(Into::into).collect(),
            frames: x.frames.map(|f| f.into_iter().map(Into::into).collect()),
            gloss: x.gloss,
        }
    }
}

impl From<MinifiedSynset> for Synset {
    fn from(x: MinifiedSynset) -> Self {
        Synset::new(
            x.lex_filenum,
            x.ss_type,
            x.words.into_iter().map(Into::into).collect(),
            x.pointers.into_iter().map(Into::into).collect(),
            x.frames.map(|f| f.into_iter().map(Into::into).collect()),
            x.gloss,
        )
    }
}
