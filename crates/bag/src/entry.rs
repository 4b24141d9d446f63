//! Bit layouts for the two packed integers the bag is built from.
//!
//! ## Entry (u32)
//!
//! ```text
//! ┌──────────┬──────────────────────────────┐
//! │ key (8)  │ value (24)                   │
//! └──────────┴──────────────────────────────┘
//!  31     24  23                           0
//! ```
//!
//! Because the key sits in the high bits, ordering entries by their raw
//! integer orders them key-major, then by value. The all-zero entry is the
//! free-slot marker and can never be stored.
//!
//! ## SectionId (u32)
//!
//! ```text
//! ┌──────────────────────────────┬──────────┐
//! │ offset (22)                  │ len (10) │
//! └──────────────────────────────┴──────────┘
//!  31                          10  9       0
//! ```
//!
//! `SectionId::EMPTY` (raw 0) denotes an unallocated section.

use serde::{Deserialize, Serialize};

use crate::BagError;

/// Number of low bits holding the entry value.
pub const VALUE_BITS: u32 = 24;
/// Largest value an entry can carry (`2^24 - 1`).
pub const MAX_VALUE: u32 = (1 << VALUE_BITS) - 1;

/// Number of low bits holding the section length.
pub const LENGTH_BITS: u32 = 10;
/// Largest number of entries a single section may hold.
pub const MAX_SECTION_LEN: usize = (1 << LENGTH_BITS) - 1;
/// Largest offset addressable by a section id.
pub const MAX_SECTION_OFFSET: usize = (1 << (32 - LENGTH_BITS)) - 1;

/// One packed `(key, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(u32);

impl Entry {
    /// The free-slot marker. Never a valid stored entry.
    pub const FREE: Entry = Entry(0);

    /// Packs `key` and `value`.
    ///
    /// The value is masked to 24 bits. Debug builds assert that it fits and
    /// that the pair is not the reserved `(0, 0)`.
    #[inline]
    #[must_use]
    pub fn new(key: u8, value: u32) -> Self {
        debug_assert!(value <= MAX_VALUE, "entry value {value:#x} exceeds 24 bits");
        debug_assert!(key != 0 || value != 0, "entry (0, 0) is reserved");
        Entry((key as u32) << VALUE_BITS | (value & MAX_VALUE))
    }

    /// Checked variant of [`Entry::new`].
    pub fn try_new(key: u8, value: u32) -> Result<Self, BagError> {
        if value > MAX_VALUE {
            return Err(BagError::ValueOutOfRange(value));
        }
        if key == 0 && value == 0 {
            return Err(BagError::ReservedEntry);
        }
        Ok(Entry((key as u32) << VALUE_BITS | value))
    }

    /// Lowest possible entry carrying `key`, used as a search boundary.
    ///
    /// Unlike [`Entry::new`] this accepts `(0, 0)`: boundaries are compared
    /// against, never stored.
    #[inline]
    pub(crate) fn floor(key: u8) -> Self {
        Entry((key as u32) << VALUE_BITS)
    }

    #[inline]
    #[must_use]
    pub fn key(self) -> u8 {
        (self.0 >> VALUE_BITS) as u8
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> u32 {
        self.0 & MAX_VALUE
    }

    #[inline]
    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        Entry(raw)
    }

    /// Returns `true` for the zero-filled free-slot marker.
    #[inline]
    #[must_use]
    pub fn is_free(self) -> bool {
        self.0 == 0
    }
}

/// Packed `(offset, length)` descriptor of one section inside a [`crate::Bag`].
///
/// Not `Copy`/`Clone`: every mutating bag call consumes the current id and
/// returns its successor, since the section may have moved. Owners store the
/// returned id back in place of the consumed one; [`SectionId::from_raw`] is
/// the only way to duplicate an id.
#[derive(Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(u32);

impl SectionId {
    /// The unallocated section.
    pub const EMPTY: SectionId = SectionId(0);

    /// Packs `offset` and `len`. Debug builds assert both fit their fields.
    #[inline]
    #[must_use]
    pub fn new(offset: usize, len: usize) -> Self {
        debug_assert!(
            offset <= MAX_SECTION_OFFSET,
            "section offset {offset} exceeds {MAX_SECTION_OFFSET}"
        );
        debug_assert!(len <= MAX_SECTION_LEN, "section length {len} exceeds {MAX_SECTION_LEN}");
        SectionId((offset as u32) << LENGTH_BITS | (len as u32 & MAX_SECTION_LEN as u32))
    }

    /// Checked variant of [`SectionId::new`].
    pub fn try_new(offset: usize, len: usize) -> Result<Self, BagError> {
        if offset > MAX_SECTION_OFFSET {
            return Err(BagError::OffsetOutOfRange(offset));
        }
        if len > MAX_SECTION_LEN {
            return Err(BagError::SectionFull);
        }
        Ok(SectionId((offset as u32) << LENGTH_BITS | len as u32))
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.0 >> LENGTH_BITS) as usize
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        (self.0 & MAX_SECTION_LEN as u32) as usize
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exclusive end of the addressed range.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset() + self.len()
    }

    #[inline]
    #[must_use]
    pub fn raw(&self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        SectionId(raw)
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}", self.offset(), self.len())
    }
}
