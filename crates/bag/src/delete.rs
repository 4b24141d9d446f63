/// Delete path: `delete_entry()`, `delete_key()`, `delete_range()`,
/// `delete_section()`.
///
/// Deletes never move a section. Remaining entries shift left and the
/// vacated tail slots are zero-filled, so they become free for in-place
/// growth later.
use std::ops::RangeBounds;

use crate::entry::{Entry, SectionId};
use crate::search::search_exact;
use crate::Bag;

impl Bag {
    /// Removes `(key, value)` from section `id`. A missing pair is a no-op
    /// and returns `id` unchanged.
    pub fn delete_entry(&mut self, id: SectionId, key: u8, value: u32) -> SectionId {
        let Ok(entry) = Entry::try_new(key, value) else {
            return id;
        };
        let (start, end) = (id.offset(), id.end());
        match search_exact(&self.entries, &entry, start..end) {
            Ok(pos) => {
                self.entries.copy_within(pos + 1..end, pos);
                self.entries[end - 1] = Entry::FREE;
                SectionId::new(start, id.len() - 1)
            }
            Err(_) => id,
        }
    }

    /// Removes every value stored under `key`, keeping the other keys'
    /// entries in their original order.
    pub fn delete_key(&mut self, id: SectionId, key: u8) -> SectionId {
        self.delete_range(id, key..=key)
    }

    /// Removes every entry whose key falls in `keys`.
    ///
    /// Sections are sorted key-major, so the matching entries form one
    /// contiguous run found with two boundary searches.
    pub fn delete_range(&mut self, id: SectionId, keys: impl RangeBounds<u8>) -> SectionId {
        let span = self.key_span(&id, keys);
        let run = span.len();
        if run == 0 {
            return id;
        }
        let end = id.end();
        self.entries.copy_within(span.end..end, span.start);
        self.entries[end - run..end].fill(Entry::FREE);
        SectionId::new(id.offset(), id.len() - run)
    }

    /// Zero-fills the whole section and returns [`SectionId::EMPTY`].
    ///
    /// The slots stay in the bag; they are reused only by in-place growth of
    /// the section right before them.
    pub fn delete_section(&mut self, id: SectionId) -> SectionId {
        let (start, end) = (id.offset(), id.end());
        self.entries[start..end].fill(Entry::FREE);
        if !id.is_empty() {
            tracing::trace!(target: "bag", offset = start, len = id.len(), "section wiped");
        }
        SectionId::EMPTY
    }
}
