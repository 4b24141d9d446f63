//! Struct-of-arrays index table.
//!
//! Each row maps a name to a lex type, a synset reference and two section
//! ids (one into the pointer bag, one into the frame bag). Rows are never
//! removed: deleting zeroes every column of the row, so row ids stay stable
//! and are not reused.

use serde::{Deserialize, Serialize};

use bag::SectionId;

use crate::{Column, IndexError};

/// Position of a row in the table.
pub type RowId = usize;

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Columns")]
pub struct IndexTable {
    name: Vec<Option<String>>,
    #[serde(rename = "type")]
    kind: Vec<u16>,
    synset: Vec<u32>,
    pointers: Vec<SectionId>,
    frames: Vec<SectionId>,
}

/// Unvalidated columns as they appear in JSON.
#[derive(Deserialize)]
struct Columns {
    name: Vec<Option<String>>,
    #[serde(rename = "type")]
    kind: Vec<u16>,
    synset: Vec<u32>,
    pointers: Vec<SectionId>,
    frames: Vec<SectionId>,
}

impl TryFrom<Columns> for IndexTable {
    type Error = IndexError;

    fn try_from(c: Columns) -> Result<Self, Self::Error> {
        let expected = c.name.len();
        for (column, got) in [
            ("type", c.kind.len()),
            ("synset", c.synset.len()),
            ("pointers", c.pointers.len()),
            ("frames", c.frames.len()),
        ] {
            if got != expected {
                return Err(IndexError::ColumnMismatch {
                    column,
                    got,
                    expected,
                });
            }
        }
        Ok(Self {
            name: c.name,
            kind: c.kind,
            synset: c.synset,
            pointers: c.pointers,
            frames: c.frames,
        })
    }
}

/// Borrowed view of one row.
#[derive(Debug, PartialEq, Eq)]
pub struct Row<'a> {
    pub name: Option<&'a str>,
    pub kind: u16,
    pub synset: u32,
    pub pointers: &'a SectionId,
    pub frames: &'a SectionId,
}

impl IndexTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rows: usize) -> Self {
        Self {
            name: Vec::with_capacity(rows),
            kind: Vec::with_capacity(rows),
            synset: Vec::with_capacity(rows),
            pointers: Vec::with_capacity(rows),
            frames: Vec::with_capacity(rows),
        }
    }

    /// Number of rows, including deleted ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Number of rows that have not been deleted.
    #[must_use]
    pub fn live_rows(&self) -> usize {
        (0..self.len()).filter(|&r| !self.is_deleted(r)).count()
    }

    /// Appends a row with empty sections.
    pub fn add(&mut self, name: impl Into<String>, kind: u16, synset: u32) -> RowId {
        self.add_with_sections(name, kind, synset, SectionId::EMPTY, SectionId::EMPTY)
    }

    /// Appends a row that already owns its sections.
    pub fn add_with_sections(
        &mut self,
        name: impl Into<String>,
        kind: u16,
        synset: u32,
        pointers: SectionId,
        frames: SectionId,
    ) -> RowId {
        let row = self.len();
        self.name.push(Some(name.into()));
        self.kind.push(kind);
        self.synset.push(synset);
        self.pointers.push(pointers);
        self.frames.push(frames);
        row
    }

    /// Tombstones up to `n` rows starting at `row` and returns how many
    /// rows were in range.
    ///
    /// The rows' section ids are dropped; take them first with
    /// [`IndexTable::take_sections`] if their bag ranges must be wiped.
    pub fn delete(&mut self, row: RowId, n: usize) -> usize {
        let end = row.saturating_add(n).min(self.len());
        if row >= end {
            return 0;
        }
        for r in row..end {
            self.name[r] = None;
            self.kind[r] = 0;
            self.synset[r] = 0;
            self.pointers[r] = SectionId::EMPTY;
            self.frames[r] = SectionId::EMPTY;
        }
        end - row
    }

    /// Moves both section ids out of `row`, leaving empty ones behind.
    pub fn take_sections(&mut self, row: RowId) -> Option<(SectionId, SectionId)> {
        if row >= self.len() {
            return None;
        }
        Some((
            std::mem::take(&mut self.pointers[row]),
            std::mem::take(&mut self.frames[row]),
        ))
    }

    #[must_use]
    pub fn row(&self, row: RowId) -> Option<Row<'_>> {
        if row >= self.len() {
            return None;
        }
        Some(Row {
            name: self.name[row].as_deref(),
            kind: self.kind[row],
            synset: self.synset[row],
            pointers: &self.pointers[row],
            frames: &self.frames[row],
        })
    }

    /// `true` for a tombstoned row. Out-of-range rows are not deleted, they
    /// do not exist.
    #[must_use]
    pub fn is_deleted(&self, row: RowId) -> bool {
        row < self.len() && self.name[row].is_none()
    }

    /// First live row named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<RowId> {
        self.name.iter().position(|n| n.as_deref() == Some(name))
    }

    /// Section id stored in `column` of `row`.
    #[must_use]
    pub fn section(&self, row: RowId, column: Column) -> Option<&SectionId> {
        self.column(column).get(row)
    }

    /// Runs `f` on the section id stored in `column` of `row` and stores
    /// the id it returns.
    pub fn update<T>(
        &mut self,
        row: RowId,
        column: Column,
        f: impl FnOnce(SectionId) -> (SectionId, T),
    ) -> Option<T> {
        let slot = self.column_mut(column).get_mut(row)?;
        let (id, out) = f(std::mem::take(slot));
        *slot = id;
        Some(out)
    }

    /// Iterates `(row, view)` over live rows.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, Row<'_>)> + '_ {
        (0..self.len())
            .filter(|&r| !self.is_deleted(r))
            .filter_map(|r| self.row(r).map(|v| (r, v)))
    }

    fn column(&self, column: Column) -> &Vec<SectionId> {
        match column {
            Column::Pointers => &self.pointers,
            Column::Frames => &self.frames,
        }
    }

    fn column_mut(&mut self, column: Column) -> &mut Vec<SectionId> {
        match column {
            Column::Pointers => &mut self.pointers,
            Column::Frames => &mut self.frames,
        }
    }
}
