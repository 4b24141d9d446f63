//! Command parsing and execution for the `lexbag` shell.
//!
//! Kept apart from the stdin loop in `main.rs` so commands can be driven
//! directly from tests.

use std::str::{FromStr, SplitWhitespace};

use anyhow::{bail, ensure, Context, Result};

use bag::{BagError, Entry, MAX_SECTION_LEN};
use config::Settings;
use index::{Column, RowId, WordIndex};
use lexicon::{LexCodec, LexType};

/// Highest exclusive upper bound accepted by `RANGE`.
const KEY_SPACE: u16 = 256;

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Exit,
}

pub struct Shell {
    index: WordIndex,
    codec: LexCodec,
}

impl Shell {
    pub fn new(settings: &Settings) -> Self {
        Self {
            index: WordIndex::with_settings(settings),
            codec: LexCodec::default(),
        }
    }

    #[must_use]
    pub fn index(&self) -> &WordIndex {
        &self.index
    }

    /// Runs one input line. Blank lines yield an empty reply.
    pub fn exec(&mut self, line: &str) -> Result<Outcome> {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Ok(Outcome::Reply(String::new()));
        };
        let reply = match cmd.to_uppercase().as_str() {
            "ADD" => {
                let usage = "ADD name type synset";
                let name: String = arg(&mut parts, usage)?;
                let kind = self.parse_type(parts.next().context(usage_msg(usage))?)?;
                let synset: u32 = arg(&mut parts, usage)?;
                let row = self.index.add(name, kind, synset);
                format!("row {row}")
            }
            "PTR" => self.add(&mut parts, Column::Pointers, "PTR row key value")?,
            "FRAME" => self.add(&mut parts, Column::Frames, "FRAME row key value")?,
            "GET" => {
                let usage = "GET row key";
                let row: RowId = arg(&mut parts, usage)?;
                let key: u8 = arg(&mut parts, usage)?;
                values(self.index.get(row, Column::Pointers, key)?)
            }
            "RANGE" => {
                let usage = "RANGE row lo [hi]";
                let row: RowId = arg(&mut parts, usage)?;
                let lo: u8 = arg(&mut parts, usage)?;
                let hi: u16 = match parts.next() {
                    Some(raw) => raw.parse().with_context(|| format!("bad argument `{raw}`"))?,
                    None => KEY_SPACE,
                };
                ensure!(hi <= KEY_SPACE, "upper bound {hi} exceeds {KEY_SPACE}");
                let found = if hi == KEY_SPACE {
                    self.index.get_range(row, Column::Pointers, lo..)?
                } else {
                    self.index.get_range(row, Column::Pointers, lo..hi as u8)?
                };
                values(found)
            }
            "UNPTR" => {
                let usage = "UNPTR row key value";
                let row: RowId = arg(&mut parts, usage)?;
                let key: u8 = arg(&mut parts, usage)?;
                let value: u32 = arg(&mut parts, usage)?;
                self.index.remove_entry(row, Column::Pointers, key, value)?;
                "OK".to_string()
            }
            "UNKEY" => {
                let usage = "UNKEY row key";
                let row: RowId = arg(&mut parts, usage)?;
                let key: u8 = arg(&mut parts, usage)?;
                self.index.remove_key(row, Column::Pointers, key)?;
                "OK".to_string()
            }
            "DEL" => {
                let row: RowId = arg(&mut parts, "DEL row")?;
                self.index.remove_row(row)?;
                "OK".to_string()
            }
            "SHOW" => {
                let row: RowId = arg(&mut parts, "SHOW row")?;
                self.show(row)?
            }
            "STATS" => self.index.stats().to_string(),
            "DUMP" => self.index.to_json()?,
            "EXIT" | "QUIT" => return Ok(Outcome::Exit),
            other => bail!("unknown command: {other}"),
        };
        Ok(Outcome::Reply(reply))
    }

    fn add(&mut self, parts: &mut SplitWhitespace<'_>, column: Column, usage: &str) -> Result<String> {
        let row: RowId = arg(parts, usage)?;
        let key: u8 = arg(parts, usage)?;
        let value: u32 = arg(parts, usage)?;
        // An unchecked index asserts on bad pairs instead of reporting them.
        Entry::try_new(key, value)?;
        if !self.index.is_checked() {
            let id = self.index.section(row, column)?;
            ensure!(
                id.len() < MAX_SECTION_LEN || self.index.glob().bag(column).contains(id, key, value),
                BagError::SectionFull
            );
        }
        self.index.add_entry(row, column, key, value)?;
        Ok("OK".to_string())
    }

    /// Accepts a raw number or a lex name such as `noun.act.3`.
    fn parse_type(&self, raw: &str) -> Result<LexType> {
        if let Ok(kind) = raw.parse::<LexType>() {
            return Ok(kind);
        }
        self.codec
            .lex_type_from_name(raw)
            .with_context(|| format!("bad type `{raw}`"))
    }

    fn type_name(&self, kind: LexType) -> String {
        let num = self.codec.to_lex_number(kind);
        let id = self.codec.to_lex_id(kind);
        match self
            .codec
            .to_lex_file_number(num)
            .and_then(|f| self.codec.lex_file_name(f))
        {
            Some(file) => format!("{file}.{id}"),
            None => format!("{}.{id}", self.codec.to_pos(num).symbol()),
        }
    }

    fn show(&self, row: RowId) -> Result<String> {
        let pointers = pairs(&self.index.entries(row, Column::Pointers)?);
        let frames = pairs(&self.index.entries(row, Column::Frames)?);
        let r = self
            .index
            .table()
            .row(row)
            .with_context(|| format!("no such row: {row}"))?;
        Ok(format!(
            "{} type={} synset={} pointers=[{pointers}] frames=[{frames}]",
            r.name.unwrap_or_default(),
            self.type_name(r.kind),
            r.synset,
        ))
    }
}

fn usage_msg(usage: &str) -> String {
    format!("usage: {usage}")
}

/// Parses the next argument, reporting `usage` when it is missing.
fn arg<T>(parts: &mut SplitWhitespace<'_>, usage: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = parts.next().with_context(|| usage_msg(usage))?;
    raw.parse().with_context(|| format!("bad argument `{raw}`"))
}

fn values(found: std::collections::BTreeSet<u32>) -> String {
    if found.is_empty() {
        return "(empty)".to_string();
    }
    found
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn pairs(entries: &[(u8, u32)]) -> String {
    entries
        .iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(" ")
}
