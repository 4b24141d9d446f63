/// Write path: `add_entry()`, `add_key()`, `build_section()`.
///
/// Sections hold each `(key, value)` pair at most once; adding a pair that is
/// already present returns the id unchanged. A section grows in place while
/// the slot after its end is free, and is moved to the tail of the bag
/// otherwise.
use crate::entry::{Entry, SectionId, MAX_SECTION_LEN, MAX_SECTION_OFFSET};
use crate::search::search_exact;
use crate::{Bag, BagError, InsertError};

impl Bag {
    /// Adds `(key, value)` to section `id` and returns the section's new id.
    ///
    /// The returned id may point at a different offset than `id` (when the
    /// section had to be relocated). Out-of-range values, the reserved
    /// `(0, 0)` pair and a full section are caller bugs; see
    /// [`Bag::try_add_entry`] for the checked form.
    pub fn add_entry(&mut self, id: SectionId, key: u8, value: u32) -> SectionId {
        let entry = Entry::new(key, value);
        match search_exact(&self.entries, &entry, id.offset()..id.end()) {
            Ok(_) => id,
            Err(pos) => self.insert_at(id, entry, pos),
        }
    }

    /// Checked form of [`Bag::add_entry`].
    ///
    /// On error the bag is left untouched and the unchanged id comes back
    /// inside the [`InsertError`].
    pub fn try_add_entry(
        &mut self,
        id: SectionId,
        key: u8,
        value: u32,
    ) -> Result<SectionId, InsertError> {
        let entry = match Entry::try_new(key, value) {
            Ok(e) => e,
            Err(error) => return Err(InsertError { id, error }),
        };
        if let Err(error) = self.check_section(&id) {
            return Err(InsertError { id, error });
        }
        let pos = match search_exact(&self.entries, &entry, id.offset()..id.end()) {
            Ok(_) => return Ok(id),
            Err(pos) => pos,
        };
        if id.len() >= MAX_SECTION_LEN {
            return Err(InsertError {
                id,
                error: BagError::SectionFull,
            });
        }
        let target = if self.must_relocate(&id) {
            self.entries.len()
        } else {
            id.offset()
        };
        if target > MAX_SECTION_OFFSET {
            return Err(InsertError {
                id,
                error: BagError::OffsetOutOfRange(target),
            });
        }
        Ok(self.insert_at(id, entry, pos))
    }

    /// Adds every value in `values` under `key`, threading the section id
    /// through each insert.
    pub fn add_key(&mut self, id: SectionId, key: u8, values: &[u32]) -> SectionId {
        values
            .iter()
            .fold(id, |id, &value| self.add_entry(id, key, value))
    }

    /// Builds a new section at the tail of the bag from parallel `keys` and
    /// `values`.
    ///
    /// Room for every pair is reserved up front, so the build never
    /// relocates. Input order does not matter; duplicate pairs collapse and
    /// leave zero padding after the section.
    pub fn build_section(&mut self, keys: &[u8], values: &[u32]) -> SectionId {
        debug_assert_eq!(keys.len(), values.len(), "keys and values differ in length");
        let start = self.entries.len();
        let n = keys.len().min(values.len());
        self.entries.resize(start + n, Entry::FREE);

        let mut id = SectionId::new(start, 0);
        for (&key, &value) in keys.iter().zip(values) {
            id = self.add_entry(id, key, value);
        }
        tracing::trace!(target: "bag", offset = start, pairs = n, len = id.len(), "section built");
        id
    }

    /// Checked form of [`Bag::build_section`]. All pairs are validated before
    /// the bag is touched.
    pub fn try_build_section(&mut self, keys: &[u8], values: &[u32]) -> Result<SectionId, BagError> {
        if keys.len() != values.len() {
            return Err(BagError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        if keys.len() > MAX_SECTION_LEN {
            return Err(BagError::SectionFull);
        }
        if self.entries.len() > MAX_SECTION_OFFSET {
            return Err(BagError::OffsetOutOfRange(self.entries.len()));
        }
        for (&key, &value) in keys.iter().zip(values) {
            Entry::try_new(key, value)?;
        }
        Ok(self.build_section(keys, values))
    }

    /// Returns `true` if the slot right after section `id` is taken by
    /// another live section.
    fn must_relocate(&self, id: &SectionId) -> bool {
        self.entries.get(id.end()).is_some_and(|e| !e.is_free())
    }

    /// Inserts `entry` at absolute position `pos` (inside the current range
    /// of `id`), growing in place or relocating first.
    fn insert_at(&mut self, id: SectionId, entry: Entry, pos: usize) -> SectionId {
        let len = id.len();
        let rel = pos - id.offset();
        let start = if self.must_relocate(&id) {
            self.relocate(&id)
        } else {
            if id.end() == self.entries.len() {
                self.entries.push(Entry::FREE);
            }
            id.offset()
        };

        let at = start + rel;
        self.entries.copy_within(at..start + len, at + 1);
        self.entries[at] = entry;
        SectionId::new(start, len + 1)
    }

    /// Moves section `id` to the tail, reserving one extra slot after it, and
    /// zero-fills the old range. Returns the new offset.
    fn relocate(&mut self, id: &SectionId) -> usize {
        let (from, len) = (id.offset(), id.len());
        let to = self.entries.len();
        self.entries.resize(to + len + 1, Entry::FREE);
        self.entries.copy_within(from..from + len, to);
        self.entries[from..from + len].fill(Entry::FREE);
        tracing::debug!(target: "bag", from, to, len, "section relocated");
        to
    }
}
