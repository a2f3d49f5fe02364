#![cfg(feature = "stream")]
//! Property-based tests for `Stream`.
//!
//! - **Round trip**: `Stream::from_list(xs).to_list() == xs`
//! - **take_while** yields the longest satisfying prefix
//! - **take_at_most / drop_at_most** agree with the list operations
//! - **map** composition and **filter** agree with their list counterparts

use lazyfp::control::Thunk;
use lazyfp::persistent::PersistentList;
use lazyfp::stream::Stream;
use proptest::prelude::*;

fn elements() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50_i32..50, 0..40)
}

fn stream_of(values: &[i32]) -> Stream<i32> {
    Stream::from_list(&PersistentList::from_slice(values))
}

fn to_vec(stream: &Stream<i32>) -> Vec<i32> {
    stream.to_list().into_iter().collect()
}

proptest! {
    #[test]
    fn prop_from_list_round_trip(values in elements()) {
        let list = PersistentList::from_slice(&values);
        prop_assert_eq!(Stream::from_list(&list).to_list(), list);
    }

    #[test]
    fn prop_take_while_is_longest_prefix(values in elements(), bound in -50_i32..50) {
        let expected: Vec<i32> = values.iter().copied().take_while(|x| *x < bound).collect();
        let actual = to_vec(&stream_of(&values).take_while(move |x| *x < bound));
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_take_at_most_size(values in elements(), count in 0_usize..60) {
        let taken = stream_of(&values).take_at_most(count).to_list();
        prop_assert_eq!(taken.len(), count.min(values.len()));
    }

    #[test]
    fn prop_drop_then_take(values in elements(), dropped in 0_usize..60, taken in 0_usize..60) {
        let expected: Vec<i32> = values.iter().copied().skip(dropped).take(taken).collect();
        let actual = to_vec(&stream_of(&values).drop_at_most(dropped).take_at_most(taken));
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_map_composition(values in elements()) {
        let function1 = |x: i32| x.wrapping_mul(3);
        let function2 = |x: i32| x.wrapping_sub(7);

        let stream = stream_of(&values);
        let left = stream.map(function1).map(function2);
        let right = stream.map(move |x| function2(function1(x)));
        prop_assert_eq!(to_vec(&left), to_vec(&right));
    }

    #[test]
    fn prop_filter_matches_list_filter(values in elements(), divisor in 1_i32..5) {
        let expected: Vec<i32> = values.iter().copied().filter(|x| x % divisor == 0).collect();
        let actual = to_vec(&stream_of(&values).filter(move |x| x % divisor == 0));
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_append_concatenates(left in elements(), right in elements()) {
        let combined = stream_of(&left).append(Thunk::ready(stream_of(&right)));
        let expected: Vec<i32> = left.iter().chain(right.iter()).copied().collect();
        prop_assert_eq!(to_vec(&combined), expected);
    }

    #[test]
    fn prop_fold_left_agrees_with_fold_right(values in elements()) {
        let stream = stream_of(&values);
        let left = stream.fold_left(0_i64, |accumulator, x| accumulator + i64::from(x));
        let right = stream.fold_right(Thunk::ready(0_i64), |x, rest| i64::from(x) + rest.value());
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_find_agrees_with_iterator_find(values in elements(), target in -50_i32..50) {
        let stream = stream_of(&values);
        prop_assert_eq!(stream.find(move |x| *x == target), values.iter().copied().find(|x| *x == target));
        prop_assert_eq!(stream.exists(move |x| *x == target), values.contains(&target));
    }
}
