use bag::SectionId;

use crate::*;

fn table() -> IndexTable {
    let mut t = IndexTable::new();
    t.add("dog", 0x41, 1234);
    t.add("cat", 0x41, 1240);
    t.add_with_sections("run", 0x1c, 5678, SectionId::new(3, 2), SectionId::new(0, 1));
    t
}

#[test]
fn add_hands_out_sequential_rows() {
    let mut t = table();
    assert_eq!(t.len(), 3);
    assert_eq!(t.add("bird", 0, 1), 3);
    assert_eq!(t.find("cat"), Some(1));
    assert_eq!(t.find("fish"), None);
}

#[test]
fn row_view_borrows_columns() {
    let t = table();
    let r = t.row(2).unwrap();
    assert_eq!(r.name, Some("run"));
    assert_eq!(r.kind, 0x1c);
    assert_eq!(r.synset, 5678);
    assert_eq!(r.pointers, &SectionId::new(3, 2));
    assert_eq!(r.frames, &SectionId::new(0, 1));
    assert!(t.row(3).is_none());
}

#[test]
fn delete_tombstones_and_clamps() {
    let mut t = table();
    assert_eq!(t.delete(1, 10), 2);
    assert_eq!(t.len(), 3);
    assert_eq!(t.live_rows(), 1);
    assert!(t.is_deleted(1));
    assert!(t.is_deleted(2));
    assert!(!t.is_deleted(0));
    // Rows past the end do not exist, so they are not "deleted" either.
    assert!(!t.is_deleted(3));

    let r = t.row(2).unwrap();
    assert_eq!(r.name, None);
    assert_eq!(r.synset, 0);
    assert!(r.pointers.is_empty());

    assert_eq!(t.delete(5, 1), 0);
    assert_eq!(t.find("run"), None);
}

#[test]
fn iter_skips_deleted_rows() {
    let mut t = table();
    t.delete(1, 1);
    let names: Vec<_> = t.iter().map(|(row, r)| (row, r.name)).collect();
    assert_eq!(names, vec![(0, Some("dog")), (2, Some("run"))]);
}

#[test]
fn take_sections_leaves_empty_ids() {
    let mut t = table();
    let (p, f) = t.take_sections(2).unwrap();
    assert_eq!(p, SectionId::new(3, 2));
    assert_eq!(f, SectionId::new(0, 1));
    assert!(t.section(2, Column::Pointers).unwrap().is_empty());
    assert!(t.take_sections(9).is_none());
}

#[test]
fn update_stores_returned_id() {
    let mut t = table();
    let old_len = t.update(2, Column::Frames, |id| {
        let len = id.len();
        (SectionId::new(7, len + 1), len)
    });
    assert_eq!(old_len, Some(1));
    assert_eq!(t.section(2, Column::Frames), Some(&SectionId::new(7, 2)));
    assert_eq!(t.section(2, Column::Pointers), Some(&SectionId::new(3, 2)));
    assert_eq!(t.update(3, Column::Frames, |id| (id, ())), None);
}
