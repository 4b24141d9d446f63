use super::{assert_sorted, pairs, raw};
use crate::*;

// -------------------- add_entry --------------------

#[test]
fn add_entry_to_empty_bag() {
    let mut bag = Bag::new();
    let id = bag.add_entry(SectionId::EMPTY, 4, 40);
    assert_eq!((id.offset(), id.len()), (0, 1));
    assert_eq!(pairs(&bag, &id), vec![(4, 40)]);
}

#[test]
fn add_entry_keeps_section_sorted() {
    let mut bag = Bag::new();
    let mut id = SectionId::EMPTY;
    for (k, v) in [(5, 1), (1, 9), (5, 0), (3, 3), (1, 2)] {
        id = bag.add_entry(id, k, v);
        assert_sorted(&bag, &id);
    }
    assert_eq!(
        pairs(&bag, &id),
        vec![(1, 2), (1, 9), (3, 3), (5, 0), (5, 1)]
    );
}

#[test]
fn add_entry_is_idempotent() {
    let mut bag = Bag::new();
    let id = bag.build_section(&[1, 2], &[10, 20]);
    let before = id.raw();
    let snapshot = raw(&bag);

    let id = bag.add_entry(id, 2, 20);
    assert_eq!(id.raw(), before);
    assert_eq!(raw(&bag), snapshot);
}

#[test]
fn add_entry_grows_in_place_into_free_slot() {
    let mut bag = Bag::new();
    let a = bag.build_section(&[1, 2], &[10, 20]);
    let b = bag.build_section(&[9], &[90]);
    // free the slot right after `a` by wiping `b`
    let _ = bag.delete_section(b);

    let a2 = bag.add_entry(a, 1, 11);
    assert_eq!(a2.offset(), 0);
    assert_eq!(a2.len(), 3);
    assert_eq!(pairs(&bag, &a2), vec![(1, 10), (1, 11), (2, 20)]);
    assert_eq!(bag.len(), 3);
}

#[test]
fn add_entry_at_bag_tail_extends_bag() {
    let mut bag = Bag::new();
    let _a = bag.build_section(&[1], &[1]);
    let b = bag.build_section(&[2, 2], &[5, 7]);
    let b = bag.add_entry(b, 2, 6);
    assert_eq!((b.offset(), b.len()), (1, 3));
    assert_eq!(bag.len(), 4);
    assert_eq!(pairs(&bag, &b), vec![(2, 5), (2, 6), (2, 7)]);
}

#[test]
fn add_entry_relocates_when_successor_is_live() {
    let mut bag = Bag::new();
    let a = bag.build_section(&[3, 1, 3, 2], &[10, 20, 11, 30]);
    let b = bag.build_section(&[7, 8], &[70, 80]);
    let old_offset = a.offset();

    let a = bag.add_entry(a, 2, 31);
    assert_ne!(a.offset(), old_offset);
    assert_eq!(a.offset(), 6);
    assert_eq!(a.len(), 5);
    assert_sorted(&bag, &a);

    assert_eq!(bag.get(&a, 3).into_iter().collect::<Vec<_>>(), vec![10, 11]);
    assert_eq!(bag.get(&a, 2).into_iter().collect::<Vec<_>>(), vec![30, 31]);
    assert_eq!(bag.get(&a, 1).into_iter().collect::<Vec<_>>(), vec![20]);

    // old range is zero-filled, neighbour untouched
    assert!(raw(&bag)[0..4].iter().all(|&e| e == 0));
    assert_eq!(pairs(&bag, &b), vec![(7, 70), (8, 80)]);
    // logical length grew by len + 1
    assert_eq!(bag.len(), 6 + 5);
}

#[test]
fn relocated_section_then_grows_in_place() {
    let mut bag = Bag::new();
    let a = bag.build_section(&[1], &[1]);
    let _b = bag.build_section(&[1], &[2]);
    let a = bag.add_entry(a, 1, 3);
    let relocated_at = a.offset();
    let a = bag.add_entry(a, 1, 4);
    assert_eq!(a.offset(), relocated_at);
    assert_eq!(pairs(&bag, &a), vec![(1, 1), (1, 3), (1, 4)]);
}

#[test]
fn empty_id_relocates_when_slot_zero_is_taken() {
    let mut bag = Bag::new();
    let a = bag.build_section(&[1], &[1]);
    let c = bag.add_entry(SectionId::EMPTY, 2, 2);
    assert_eq!((c.offset(), c.len()), (1, 1));
    assert_eq!(pairs(&bag, &a), vec![(1, 1)]);
    assert_eq!(pairs(&bag, &c), vec![(2, 2)]);
}

// -------------------- try_add_entry --------------------

#[test]
fn try_add_entry_rejects_reserved_pair_and_returns_id() {
    let mut bag = Bag::new();
    let id = bag.build_section(&[1], &[1]);
    let snapshot = raw(&bag);

    let err = bag.try_add_entry(id, 0, 0).unwrap_err();
    assert_eq!(err.error, BagError::ReservedEntry);
    let (id, _) = err.into_parts();
    assert_eq!(pairs(&bag, &id), vec![(1, 1)]);
    assert_eq!(raw(&bag), snapshot);
}

#[test]
fn try_add_entry_rejects_wide_value() {
    let mut bag = Bag::new();
    let err = bag.try_add_entry(SectionId::EMPTY, 1, MAX_VALUE + 1).unwrap_err();
    assert_eq!(err.error, BagError::ValueOutOfRange(MAX_VALUE + 1));
    assert!(bag.is_empty());
}

#[test]
fn try_add_entry_rejects_stale_id() {
    let mut bag = Bag::new();
    let err = bag.try_add_entry(SectionId::new(4, 2), 1, 1).unwrap_err();
    assert_eq!(
        err.error,
        BagError::StaleSection {
            offset: 4,
            len: 2,
            bag_len: 0
        }
    );
}

#[test]
fn try_add_entry_reports_full_section() {
    let mut bag = Bag::new();
    let values: Vec<u32> = (1..=MAX_SECTION_LEN as u32).collect();
    let id = bag.add_key(SectionId::EMPTY, 1, &values);
    assert_eq!(id.len(), MAX_SECTION_LEN);

    // existing pair is still accepted as a no-op
    let id = bag.try_add_entry(id, 1, 5).unwrap();
    let err = bag.try_add_entry(id, 2, 1).unwrap_err();
    assert_eq!(err.error, BagError::SectionFull);
    assert_eq!(err.id.len(), MAX_SECTION_LEN);
}

#[test]
fn try_add_entry_accepts_valid_pair() {
    let mut bag = Bag::new();
    let id = bag.try_add_entry(SectionId::EMPTY, 0, 1).unwrap();
    let id = bag.try_add_entry(id, 1, 0).unwrap();
    assert_eq!(pairs(&bag, &id), vec![(0, 1), (1, 0)]);
}

// -------------------- add_key --------------------

#[test]
fn add_key_threads_section_id() {
    let mut bag = Bag::new();
    let a = bag.build_section(&[1], &[1]);
    let _b = bag.build_section(&[2], &[2]);

    // first insert relocates; later inserts must use the new id
    let a = bag.add_key(a, 5, &[50, 51, 52, 51]);
    assert_eq!(pairs(&bag, &a), vec![(1, 1), (5, 50), (5, 51), (5, 52)]);
    assert_sorted(&bag, &a);
}

// -------------------- build_section --------------------

#[test]
fn build_section_is_order_independent() {
    let mut bag = Bag::new();
    let a = bag.build_section(&[3, 1, 3, 2], &[10, 20, 11, 30]);
    let b = bag.build_section(&[2, 3, 1, 3], &[30, 11, 20, 10]);
    assert_eq!(pairs(&bag, &a), pairs(&bag, &b));
}

#[test]
fn build_section_allocates_at_tail_without_relocating() {
    let mut bag = Bag::new();
    let a = bag.build_section(&[1, 2, 3], &[1, 2, 3]);
    let b = bag.build_section(&[9, 8, 7, 6], &[1, 2, 3, 4]);
    assert_eq!((a.offset(), a.len()), (0, 3));
    assert_eq!((b.offset(), b.len()), (3, 4));
    assert_eq!(bag.len(), 7);
    assert_eq!(bag.free_slots(), 0);
}

#[test]
fn build_section_collapses_duplicates_into_padding() {
    let mut bag = Bag::new();
    let a = bag.build_section(&[1, 1, 1], &[5, 5, 6]);
    assert_eq!(a.len(), 2);
    assert_eq!(bag.len(), 3);
    assert_eq!(bag.free_slots(), 1);
    // the padding slot is free, so the section can grow in place
    let a = bag.add_entry(a, 1, 7);
    assert_eq!((a.offset(), a.len()), (0, 3));
    assert_eq!(bag.len(), 3);
}

#[test]
fn build_section_empty_input() {
    let mut bag = Bag::new();
    let _ = bag.build_section(&[1], &[1]);
    let id = bag.build_section(&[], &[]);
    assert!(id.is_empty());
    assert_eq!(bag.len(), 1);
}

#[test]
fn try_build_section_validates_before_touching_bag() {
    let mut bag = Bag::new();
    assert_eq!(
        bag.try_build_section(&[1, 2], &[1]),
        Err(BagError::LengthMismatch { keys: 2, values: 1 })
    );
    assert_eq!(
        bag.try_build_section(&[1, 0], &[1, 0]),
        Err(BagError::ReservedEntry)
    );
    let keys = vec![1u8; MAX_SECTION_LEN + 1];
    let values: Vec<u32> = (1..=keys.len() as u32).collect();
    assert_eq!(bag.try_build_section(&keys, &values), Err(BagError::SectionFull));
    assert!(bag.is_empty());

    let id = bag.try_build_section(&[2, 1], &[1, 1]).unwrap();
    assert_eq!(pairs(&bag, &id), vec![(1, 1), (2, 1)]);
}

#[test]
fn stats_track_live_and_free() {
    let mut bag = Bag::with_capacity(16);
    let a = bag.build_section(&[1, 2], &[1, 2]);
    let _b = bag.build_section(&[3], &[3]);
    let _a = bag.add_entry(a, 1, 5);

    let stats = bag.stats();
    assert_eq!(stats.len, 3 + 3);
    assert_eq!(stats.live, 4);
    assert_eq!(stats.free, 2);
    assert!(stats.capacity >= 16);
    assert_eq!(
        stats.to_string(),
        format!("len=6 live=4 free=2 capacity={}", stats.capacity)
    );
}
