#![cfg(feature = "persistent")]
//! Unit tests for PersistentList.

use lazyfp::persistent::PersistentList;
use rstest::rstest;
use std::collections::HashSet;

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_creates_empty_list() {
    let list: PersistentList<i32> = PersistentList::new();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert_eq!(list.head(), None);
}

#[rstest]
fn test_default_is_empty() {
    assert_eq!(PersistentList::<String>::default(), PersistentList::new());
}

#[rstest]
fn test_cons_chain_builds_list_in_reverse_order() {
    let list = PersistentList::new().cons(3).cons(2).cons(1);
    assert_eq!(list.head(), Some(&1));
    assert_eq!(list.len(), 3);
}

#[rstest]
fn test_cons_does_not_modify_original() {
    let list1 = PersistentList::new().cons(1);
    let list2 = list1.cons(2);
    assert_eq!(list1.len(), 1);
    assert_eq!(list1.head(), Some(&1));
    assert_eq!(list2.len(), 2);
    assert_eq!(list2.head(), Some(&2));
}

#[rstest]
fn test_from_slice_and_collect_agree() {
    let from_slice = PersistentList::from_slice(&[1, 2, 3]);
    let collected: PersistentList<i32> = vec![1, 2, 3].into_iter().collect();
    assert_eq!(from_slice, collected);
}

// =============================================================================
// Access
// =============================================================================

#[rstest]
fn test_tail_of_empty_list_is_empty() {
    let list: PersistentList<i32> = PersistentList::new();
    assert!(list.tail().is_empty());
    assert!(list.uncons().is_none());
}

#[rstest]
fn test_uncons() {
    let list = PersistentList::from_slice(&["a", "b"]);
    let (head, tail) = list.uncons().unwrap();
    assert_eq!(*head, "a");
    assert_eq!(tail, PersistentList::singleton("b"));
}

#[rstest]
#[case(0, Some(&10))]
#[case(2, Some(&30))]
#[case(3, None)]
fn test_get(#[case] index: usize, #[case] expected: Option<&i32>) {
    let list = PersistentList::from_slice(&[10, 20, 30]);
    assert_eq!(list.get(index), expected);
}

// =============================================================================
// Transformations
// =============================================================================

#[rstest]
fn test_append_shares_the_right_operand() {
    let left = PersistentList::from_slice(&[1, 2]);
    let right = PersistentList::from_slice(&[3, 4]);
    let combined = left.append(&right);
    assert_eq!(combined, PersistentList::from_slice(&[1, 2, 3, 4]));
    assert_eq!(combined.drop_first(2), right);
}

#[rstest]
#[case(0, vec![])]
#[case(2, vec![1, 2])]
#[case(10, vec![1, 2, 3])]
fn test_take(#[case] count: usize, #[case] expected: Vec<i32>) {
    let list = PersistentList::from_slice(&[1, 2, 3]);
    assert_eq!(list.take(count).into_iter().collect::<Vec<_>>(), expected);
}

#[rstest]
#[case(0, vec![1, 2, 3])]
#[case(1, vec![2, 3])]
#[case(10, vec![])]
fn test_drop_first(#[case] count: usize, #[case] expected: Vec<i32>) {
    let list = PersistentList::from_slice(&[1, 2, 3]);
    assert_eq!(list.drop_first(count).into_iter().collect::<Vec<_>>(), expected);
}

#[rstest]
fn test_reverse() {
    let list = PersistentList::from_slice(&[1, 2, 3]);
    assert_eq!(list.reverse(), PersistentList::from_slice(&[3, 2, 1]));
}

#[rstest]
fn test_fold_left_is_left_associative() {
    let list = PersistentList::from_slice(&["a", "b", "c"]);
    let joined = list.fold_left(String::new(), |mut accumulator, element| {
        accumulator.push_str(element);
        accumulator
    });
    assert_eq!(joined, "abc");
}

// =============================================================================
// Iteration
// =============================================================================

#[rstest]
fn test_borrowed_for_loop() {
    let list = PersistentList::from_slice(&[1, 2, 3]);
    let mut total = 0;
    for element in &list {
        total += element;
    }
    assert_eq!(total, 6);
}

// =============================================================================
// Traits
// =============================================================================

#[rstest]
fn test_hash_agrees_with_eq() {
    let mut set = HashSet::new();
    set.insert(PersistentList::from_slice(&[1, 2]));
    assert!(set.contains(&PersistentList::new().cons(2).cons(1)));
    assert!(!set.contains(&PersistentList::from_slice(&[2, 1])));
}
