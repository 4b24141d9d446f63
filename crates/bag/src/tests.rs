mod write_tests;

use crate::{Bag, Entry};

/// Asserts that section `id` is strictly ascending and
/// holds no free slots.
pub(crate) fn assert_sorted(bag: &Bag, id: &crate::SectionId) {
    let s = bag.section(id);
    assert!(s.iter().all(|e| !e.is_free()), "free slot inside section {id}");
    assert!(
        s.windows(2).all(|w| w[0] < w[1]),
        "section {id} not strictly ascending: {:?}",
        s.iter().map(|e| (e.key(), e.value())).collect::<Vec<_>>()
    );
}

pub(crate) fn pairs(bag: &Bag, id: &crate::SectionId) -> Vec<(u8, u32)> {
    bag.iter(id).collect()
}

pub(crate) fn raw(bag: &Bag) -> Vec<u32> {
    bag.entries.iter().map(|e: &Entry| e.raw()).collect()
}
