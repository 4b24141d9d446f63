//! # Index - name table over shared bags
//!
//! Ties an [`IndexTable`] (one row per name) to a [`Glob`] (the bags the
//! rows' sections live in).
//!
//! ```text
//!  IndexTable                              Glob
//! ┌─────┬──────┬────────┬──────────┬────────┐   ┌──────────────┐
//! │name │ type │ synset │ pointers │ frames │   │ pointers Bag │
//! ├─────┼──────┼────────┼──────────┼────────┤   ├──────────────┤
//! │ dog │ 0x41 │ 1234   │  (0, 3) ─┼────────┼──>│ 1:20 2:30 .. │
//! │ run │ 0x1c │ 5678   │  (3, 2)  │ (0, 1)─┼─┐ ├──────────────┤
//! └─────┴──────┴────────┴──────────┴────────┘ └>│ frames Bag   │
//!                                               └──────────────┘
//! ```
//!
//! Every mutation of a row's section goes through [`WordIndex`], which hands
//! the stored id to the bag and writes the returned id straight back. Callers
//! only ever see borrowed ids, so no stale copy can outlive a relocation.

mod glob;
mod table;

use std::collections::BTreeSet;
use std::ops::RangeBounds;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bag::{Bag, BagError, BagStats, SectionId};
use config::Settings;

pub use glob::Glob;
pub use table::{IndexTable, Row, RowId};

/// Which of a row's two sections an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Pointers,
    Frames,
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Pointers => f.write_str("pointers"),
            Column::Frames => f.write_str("frames"),
        }
    }
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("no such row: {0}")]
    NoSuchRow(RowId),

    #[error("row {0} has been deleted")]
    DeletedRow(RowId),

    /// Imported table columns do not line up.
    #[error("column `{column}` has {got} rows, expected {expected}")]
    ColumnMismatch {
        column: &'static str,
        got: usize,
        expected: usize,
    },

    /// An imported row addresses slots outside its bag.
    #[error("row {row} {column} section lies outside its bag")]
    BadSection {
        row: RowId,
        column: Column,
        source: BagError,
    },

    /// An imported section is not strictly ascending or holds free slots.
    #[error("row {row} {column} section is not sorted or holds free slots")]
    CorruptSection { row: RowId, column: Column },

    /// Two imported rows share slots of the same bag.
    #[error("rows {first} and {second} have overlapping {column} sections")]
    OverlappingSections {
        column: Column,
        first: RowId,
        second: RowId,
    },

    #[error(transparent)]
    Bag(#[from] BagError),

    #[error("invalid index JSON")]
    Json(#[from] serde_json::Error),
}

/// Occupancy of the table and both bags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub rows: usize,
    pub live_rows: usize,
    pub pointers: BagStats,
    pub frames: BagStats,
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rows={} live={} | pointers: {} | frames: {}",
            self.rows, self.live_rows, self.pointers, self.frames
        )
    }
}

/// Index table plus the bags its rows point into.
#[derive(Debug, PartialEq, Eq)]
pub struct WordIndex {
    table: IndexTable,
    glob: Glob,
    /// Route inserts through the checked bag operations.
    checked: bool,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    table: &'a IndexTable,
    glob: &'a Glob,
}

#[derive(Deserialize)]
struct Snapshot {
    table: IndexTable,
    glob: Glob,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            table: IndexTable::new(),
            glob: Glob::with_capacity(settings.reserve),
            checked: settings.checked,
        }
    }

    #[must_use]
    pub fn table(&self) -> &IndexTable {
        &self.table
    }

    #[must_use]
    pub fn glob(&self) -> &Glob {
        &self.glob
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Appends a row with empty sections.
    pub fn add(&mut self, name: impl Into<String>, kind: u16, synset: u32) -> RowId {
        self.table.add(name, kind, synset)
    }

    /// Appends a row and bulk-builds both of its sections.
    ///
    /// `pointers` and `frames` are parallel `(keys, values)` slices. If either
    /// build fails nothing is added and the bags hold no live trace of it.
    pub fn build(
        &mut self,
        name: impl Into<String>,
        kind: u16,
        synset: u32,
        pointers: (&[u8], &[u32]),
        frames: (&[u8], &[u32]),
    ) -> Result<RowId, IndexError> {
        let p = self.build_section(Column::Pointers, pointers)?;
        let f = match self.build_section(Column::Frames, frames) {
            Ok(f) => f,
            Err(e) => {
                self.glob.pointers.delete_section(p);
                return Err(e);
            }
        };
        Ok(self.table.add_with_sections(name, kind, synset, p, f))
    }

    fn build_section(&mut self, column: Column, (keys, values): (&[u8], &[u32])) -> Result<SectionId, IndexError> {
        let bag = self.glob.bag_mut(column);
        if keys.is_empty() && values.is_empty() {
            return Ok(SectionId::EMPTY);
        }
        if self.checked {
            Ok(bag.try_build_section(keys, values)?)
        } else {
            Ok(bag.build_section(keys, values))
        }
    }

    /// Adds `(key, value)` to the `column` section of `row`.
    pub fn add_entry(&mut self, row: RowId, column: Column, key: u8, value: u32) -> Result<(), IndexError> {
        let checked = self.checked;
        self.mutate(row, column, |bag, id| insert(bag, id, key, value, checked))?
    }

    /// Adds every value in `values` under `key`.
    pub fn add_key(&mut self, row: RowId, column: Column, key: u8, values: &[u32]) -> Result<(), IndexError> {
        let checked = self.checked;
        self.mutate(row, column, |bag, mut id| {
            for &value in values {
                let (next, res) = insert(bag, id, key, value, checked);
                id = next;
                if res.is_err() {
                    return (id, res);
                }
            }
            (id, Ok(()))
        })?
    }

    /// Removes `(key, value)` from the `column` section of `row`. Missing
    /// pairs are ignored.
    pub fn remove_entry(&mut self, row: RowId, column: Column, key: u8, value: u32) -> Result<(), IndexError> {
        self.mutate(row, column, |bag, id| (bag.delete_entry(id, key, value), ()))
    }

    /// Removes every value stored under `key`.
    pub fn remove_key(&mut self, row: RowId, column: Column, key: u8) -> Result<(), IndexError> {
        self.mutate(row, column, |bag, id| (bag.delete_key(id, key), ()))
    }

    /// Empties the `column` section of `row`.
    pub fn clear(&mut self, row: RowId, column: Column) -> Result<(), IndexError> {
        self.mutate(row, column, |bag, id| (bag.delete_section(id), ()))
    }

    /// Wipes both sections of `row` and tombstones it.
    pub fn remove_row(&mut self, row: RowId) -> Result<(), IndexError> {
        self.live(row)?;
        if let Some((p, f)) = self.table.take_sections(row) {
            tracing::debug!(target: "index", row, pointers = %p, frames = %f, "removing row");
            self.glob.pointers.delete_section(p);
            self.glob.frames.delete_section(f);
        }
        self.table.delete(row, 1);
        Ok(())
    }

    /// Values stored under `key` in the `column` section of `row`.
    pub fn get(&self, row: RowId, column: Column, key: u8) -> Result<BTreeSet<u32>, IndexError> {
        self.get_range(row, column, key..=key)
    }

    /// Values whose keys fall in `keys`.
    pub fn get_range(
        &self,
        row: RowId,
        column: Column,
        keys: impl RangeBounds<u8>,
    ) -> Result<BTreeSet<u32>, IndexError> {
        let id = self.section(row, column)?;
        Ok(self.glob.bag(column).get_range(id, keys))
    }

    /// All `(key, value)` pairs of the `column` section of `row`.
    pub fn entries(&self, row: RowId, column: Column) -> Result<Vec<(u8, u32)>, IndexError> {
        let id = self.section(row, column)?;
        Ok(self.glob.bag(column).iter(id).collect())
    }

    /// Borrowed section id of a live row.
    pub fn section(&self, row: RowId, column: Column) -> Result<&SectionId, IndexError> {
        self.live(row)?;
        self.table
            .section(row, column)
            .ok_or(IndexError::NoSuchRow(row))
    }

    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            rows: self.table.len(),
            live_rows: self.table.live_rows(),
            pointers: self.glob.pointers.stats(),
            frames: self.glob.frames.stats(),
        }
    }

    /// Serializes table and bags as `{"table": {...}, "glob": {...}}`.
    pub fn to_json(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string(&SnapshotRef {
            table: &self.table,
            glob: &self.glob,
        })?)
    }

    /// Loads an index written by [`WordIndex::to_json`].
    ///
    /// Every non-empty section must lie inside its bag, be strictly
    /// ascending, hold no free slots and share no slot with another row.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        let Snapshot { table, glob } = serde_json::from_str(json)?;
        for column in [Column::Pointers, Column::Frames] {
            check_column(&table, glob.bag(column), column)?;
        }
        tracing::info!(
            target: "index",
            rows = table.len(),
            pointers = glob.pointers.len(),
            frames = glob.frames.len(),
            "index loaded"
        );
        Ok(Self {
            table,
            glob,
            checked: true,
        })
    }

    fn live(&self, row: RowId) -> Result<(), IndexError> {
        if row >= self.table.len() {
            return Err(IndexError::NoSuchRow(row));
        }
        if self.table.is_deleted(row) {
            return Err(IndexError::DeletedRow(row));
        }
        Ok(())
    }

    /// Hands the stored section id of a live row to `f` together with its
    /// bag, and stores the id `f` returns.
    fn mutate<T>(
        &mut self,
        row: RowId,
        column: Column,
        f: impl FnOnce(&mut Bag, SectionId) -> (SectionId, T),
    ) -> Result<T, IndexError> {
        self.live(row)?;
        let bag = self.glob.bag_mut(column);
        self.table
            .update(row, column, |id| f(bag, id))
            .ok_or(IndexError::NoSuchRow(row))
    }
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn check_column(table: &IndexTable, bag: &Bag, column: Column) -> Result<(), IndexError> {
    let mut spans = Vec::new();
    for row in 0..table.len() {
        let Some(id) = table.section(row, column) else {
            continue;
        };
        bag.check_section(id)
            .map_err(|source| IndexError::BadSection { row, column, source })?;
        if id.is_empty() {
            continue;
        }
        let s = bag.section(id);
        if s.iter().any(|e| e.is_free()) || s.windows(2).any(|w| w[0] >= w[1]) {
            return Err(IndexError::CorruptSection { row, column });
        }
        spans.push((id.offset(), id.end(), row));
    }
    spans.sort_unstable();
    for w in spans.windows(2) {
        let ((_, end, first), (start, _, second)) = (w[0], w[1]);
        if start < end {
            return Err(IndexError::OverlappingSections {
                column,
                first,
                second,
            });
        }
    }
    Ok(())
}

/// One insert, checked or not. Always returns a usable id.
fn insert(
    bag: &mut Bag,
    id: SectionId,
    key: u8,
    value: u32,
    checked: bool,
) -> (SectionId, Result<(), IndexError>) {
    if !checked {
        return (bag.add_entry(id, key, value), Ok(()));
    }
    match bag.try_add_entry(id, key, value) {
        Ok(id) => (id, Ok(())),
        Err(e) => {
            let (id, err) = e.into_parts();
            (id, Err(err.into()))
        }
    }
}
