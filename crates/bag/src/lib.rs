//! # Bag - packed sorted multimap
//!
//! A single flat `Vec` of packed [`Entry`] integers, partitioned into
//! variable-length, independently growable **sections**. Each section is one
//! small sorted multimap from an 8-bit key to 24-bit values, addressed by a
//! packed [`SectionId`] `(offset, length)`.
//!
//! ## Layout
//!
//! ```text
//!  offset: 0    1    2    3    4    5    6    7    8
//!        ┌────┬────┬────┬────┬────┬────┬────┬────┬────┐
//!        │1:20│2:30│3:10│3:11│ 0  │5:07│5:09│ 0  │ 0  │
//!        └────┴────┴────┴────┴────┴────┴────┴────┴────┘
//!         └──── section (0, 4) ───┘    └(5, 2)─┘
//! ```
//!
//! Zero doubles as the free-slot marker, so the `(0, 0)` entry is reserved.
//!
//! ## Growth
//!
//! A section grows in place while the slot right after it is free. When that
//! slot belongs to a live section, the whole section is relocated to the tail
//! of the bag and its old range is zero-filled. Either way the caller gets a
//! new [`SectionId`] back and must store it in place of the old one.
//!
//! ## Module Responsibilities
//!
//! | Module     | Purpose                                                  |
//! |------------|----------------------------------------------------------|
//! | [`entry`]  | `Entry` / `SectionId` bit layouts                        |
//! | [`search`] | `search_closest`, `search_exact` over a sub-range        |
//! | `read`     | `get`, `get_range`, `iter`, `contains`                   |
//! | `write`    | `add_entry`, `add_key`, `build_section` (+ checked forms)|
//! | `delete`   | `delete_entry`, `delete_key`, `delete_range`, `delete_section` |
//!
//! ## Example
//!
//! ```rust
//! use bag::Bag;
//!
//! let mut bag = Bag::new();
//! let id = bag.build_section(&[3, 1, 3, 2], &[10, 20, 11, 30]);
//! assert_eq!(bag.get(&id, 3).into_iter().collect::<Vec<_>>(), vec![10, 11]);
//! let id = bag.delete_key(id, 3);
//! assert!(bag.get(&id, 3).is_empty());
//! ```
pub mod entry;
pub mod search;

mod delete;
mod read;
mod write;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use entry::{Entry, SectionId, MAX_SECTION_LEN, MAX_SECTION_OFFSET, MAX_VALUE};
pub use search::{search_closest, search_exact};

/// Errors reported by the checked (`try_*`) bag operations.
///
/// The unchecked operations treat these conditions as caller bugs: they are
/// caught by debug assertions and otherwise produce an unspecified section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BagError {
    /// The value does not fit in 24 bits.
    #[error("entry value {0} exceeds {max}", max = MAX_VALUE)]
    ValueOutOfRange(u32),

    /// `(0, 0)` is indistinguishable from a free slot.
    #[error("entry (0, 0) is reserved as the free-slot marker")]
    ReservedEntry,

    /// The section already holds the maximum number of entries.
    #[error("section is full ({max} entries)", max = MAX_SECTION_LEN)]
    SectionFull,

    /// The bag has grown past what a section id can address.
    #[error("section offset {0} exceeds {max}", max = MAX_SECTION_OFFSET)]
    OffsetOutOfRange(usize),

    /// Bulk build was given key and value slices of different lengths.
    #[error("length mismatch: {keys} keys, {values} values")]
    LengthMismatch { keys: usize, values: usize },

    /// The section id addresses slots beyond the end of the bag.
    #[error("section {offset}+{len} lies outside bag of length {bag_len}")]
    StaleSection {
        offset: usize,
        len: usize,
        bag_len: usize,
    },
}

/// A rejected checked insert. Carries the section id back to the caller,
/// since the id was consumed by the call.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct InsertError {
    /// The section id passed in, unchanged.
    pub id: SectionId,
    #[source]
    pub error: BagError,
}

impl InsertError {
    pub fn into_parts(self) -> (SectionId, BagError) {
        (self.id, self.error)
    }
}

/// Shared backing store for many sections.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bag {
    pub(crate) entries: Vec<Entry>,
}

/// Occupancy snapshot of a [`Bag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagStats {
    /// Logical length (slots ever handed out).
    pub len: usize,
    /// Slots holding a live entry.
    pub live: usize,
    /// Zero-filled slots: freed ranges, relocation leftovers, bulk padding.
    pub free: usize,
    /// Allocated capacity of the backing `Vec`.
    pub capacity: usize,
}

impl std::fmt::Display for BagStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "len={} live={} free={} capacity={}",
            self.len, self.live, self.free, self.capacity
        )
    }
}

impl Bag {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty bag with room for `capacity` entries before the
    /// backing store reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Rebuilds a bag from raw packed entries, e.g. from [`Bag::to_raw`].
    pub fn from_raw(raw: Vec<u32>) -> Self {
        Self {
            entries: raw.into_iter().map(Entry::from_raw).collect(),
        }
    }

    /// Raw packed entries, including free slots.
    #[must_use]
    pub fn to_raw(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.raw()).collect()
    }

    /// Logical length: every slot ever handed out, live or free.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Number of slots holding a live entry.
    #[must_use]
    pub fn live_slots(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_free()).count()
    }

    /// Number of zero-filled slots.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.len() - self.live_slots()
    }

    #[must_use]
    pub fn stats(&self) -> BagStats {
        let live = self.live_slots();
        BagStats {
            len: self.len(),
            live,
            free: self.len() - live,
            capacity: self.capacity(),
        }
    }

    /// Borrowed view of the entries addressed by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` addresses slots past the end of the bag.
    #[must_use]
    pub fn section(&self, id: &SectionId) -> &[Entry] {
        &self.entries[id.offset()..id.end()]
    }

    /// Verifies that `id` lies within the bag.
    pub fn check_section(&self, id: &SectionId) -> Result<(), BagError> {
        if id.end() > self.entries.len() {
            return Err(BagError::StaleSection {
                offset: id.offset(),
                len: id.len(),
                bag_len: self.entries.len(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Bag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("Bag")
            .field("len", &stats.len)
            .field("live", &stats.live)
            .field("free", &stats.free)
            .field("capacity", &stats.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests;
