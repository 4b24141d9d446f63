/// Read path: `get()`, `get_range()` and friends.
///
/// Queries never touch the bag's layout. Range boundaries are found with two
/// binary searches over the section, so cost is `O(log len + matches)`.
use std::collections::BTreeSet;
use std::ops::{Bound, Range, RangeBounds};

use crate::entry::{Entry, SectionId};
use crate::search::{search_closest, search_exact};
use crate::Bag;

impl Bag {
    /// Returns the set of values stored under `key` in section `id`.
    #[must_use]
    pub fn get(&self, id: &SectionId, key: u8) -> BTreeSet<u32> {
        self.get_range(id, key..=key)
    }

    /// Adds the values stored under `key` to `out`.
    pub fn get_into(&self, id: &SectionId, key: u8, out: &mut BTreeSet<u32>) {
        self.get_range_into(id, key..=key, out);
    }

    /// Returns the set of values whose keys fall in `keys`.
    ///
    /// `get_range(&id, 1..3)` covers keys 1 and 2; use `lo..` or `lo..=255`
    /// to reach the last key.
    #[must_use]
    pub fn get_range(&self, id: &SectionId, keys: impl RangeBounds<u8>) -> BTreeSet<u32> {
        let mut out = BTreeSet::new();
        self.get_range_into(id, keys, &mut out);
        out
    }

    /// Accumulating form of [`Bag::get_range`]. Values already in `out` are
    /// kept, so several sections can be merged into one result.
    pub fn get_range_into(
        &self,
        id: &SectionId,
        keys: impl RangeBounds<u8>,
        out: &mut BTreeSet<u32>,
    ) {
        let span = self.key_span(id, keys);
        out.extend(self.entries[span].iter().map(|e| e.value()));
    }

    /// Returns `true` if section `id` holds `(key, value)`.
    #[must_use]
    pub fn contains(&self, id: &SectionId, key: u8, value: u32) -> bool {
        match Entry::try_new(key, value) {
            Ok(entry) => search_exact(&self.entries, &entry, id.offset()..id.end()).is_ok(),
            Err(_) => false,
        }
    }

    /// Iterates `(key, value)` pairs of section `id` in ascending order.
    pub fn iter<'a>(&'a self, id: &SectionId) -> impl Iterator<Item = (u8, u32)> + 'a {
        self.section(id).iter().map(|e| (e.key(), e.value()))
    }

    /// Distinct keys present in section `id`, ascending.
    #[must_use]
    pub fn keys(&self, id: &SectionId) -> Vec<u8> {
        let mut keys: Vec<u8> = self.section(id).iter().map(|e| e.key()).collect();
        keys.dedup();
        keys
    }

    /// Index range of the entries in section `id` whose keys lie in `keys`.
    pub(crate) fn key_span(&self, id: &SectionId, keys: impl RangeBounds<u8>) -> Range<usize> {
        let (start, end) = (id.offset(), id.end());
        let lo = match keys.start_bound() {
            Bound::Included(&k) => self.lower_bound(k as u16, start..end),
            Bound::Excluded(&k) => self.lower_bound(k as u16 + 1, start..end),
            Bound::Unbounded => start,
        };
        let hi = match keys.end_bound() {
            Bound::Included(&k) => self.lower_bound(k as u16 + 1, lo..end),
            Bound::Excluded(&k) => self.lower_bound(k as u16, lo..end),
            Bound::Unbounded => end,
        };
        lo..hi
    }

    /// First index in `range` whose key is `>= key`. A key of 256 (one past
    /// the last) maps to `range.end`.
    fn lower_bound(&self, key: u16, range: Range<usize>) -> usize {
        match u8::try_from(key) {
            Ok(k) => search_closest(&self.entries, &Entry::floor(k), range),
            Err(_) => range.end,
        }
    }
}
