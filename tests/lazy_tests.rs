#![cfg(feature = "control")]
//! Integration tests for `Lazy` and `Thunk`.
//!
//! Tests cover:
//! - Deferred evaluation and memoization
//! - Poisoning after a panicking initializer
//! - `map`, `flat_map`, `lift2`, `sequence`

use lazyfp::control::{Lazy, Thunk, ThunkError};
use rstest::rstest;
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

fn counted(calls: &Rc<Cell<u32>>, value: i32) -> Thunk<i32> {
    let calls = Rc::clone(calls);
    Thunk::new(move || {
        calls.set(calls.get() + 1);
        value
    })
}

// =============================================================================
// Deferred Evaluation
// =============================================================================

#[rstest]
fn lazy_defers_computation() {
    let computed = Cell::new(false);
    let lazy = Lazy::new(|| {
        computed.set(true);
        42
    });
    assert!(!computed.get());
    assert!(!lazy.is_initialized());

    assert_eq!(*lazy.force(), 42);
    assert!(computed.get());
    assert!(lazy.is_initialized());
}

#[rstest]
fn lazy_force_returns_ref() {
    let lazy = Lazy::new(|| "hello".to_string());
    let value = lazy.force();
    assert_eq!(value.len(), 5);
    assert!(value.starts_with("hel"));
}

#[rstest]
fn lazy_initializer_may_force_another_lazy() {
    let inner = Lazy::new(|| 20);
    let outer = Lazy::new(|| *inner.force() + 22);
    assert_eq!(*outer.force(), 42);
    assert!(inner.is_initialized());
}

#[rstest]
fn thunk_force_runs_function_once() {
    let calls = Rc::new(Cell::new(0));
    let thunk = counted(&calls, 7);
    assert_eq!(calls.get(), 0);

    for _ in 0..5 {
        assert_eq!(*thunk.force(), 7);
    }
    assert_eq!(calls.get(), 1);
}

#[rstest]
fn thunk_ready_is_already_evaluated() {
    let thunk = Thunk::ready(vec![1, 2]);
    assert!(thunk.is_evaluated());
    assert_eq!(thunk.value(), vec![1, 2]);
}

// =============================================================================
// Failure and Poisoning
// =============================================================================

#[rstest]
fn lazy_panic_poisons_and_is_not_retried() {
    let calls = Cell::new(0);
    let lazy: Lazy<i32, _> = Lazy::new(|| {
        calls.set(calls.get() + 1);
        panic!("initialization failed")
    });

    assert!(catch_unwind(AssertUnwindSafe(|| *lazy.force())).is_err());
    assert!(lazy.is_poisoned());
    assert!(catch_unwind(AssertUnwindSafe(|| *lazy.force())).is_err());
    assert_eq!(calls.get(), 1);
}

#[rstest]
fn thunk_try_force_reports_panic_then_poison() {
    let thunk: Thunk<i32> = Thunk::new(|| panic!("no value"));
    let shared = thunk.clone();

    assert_eq!(
        thunk.try_force().err(),
        Some(ThunkError::Panicked("no value".to_string()))
    );
    assert!(shared.is_poisoned());
    assert_eq!(shared.try_force().err(), Some(ThunkError::Poisoned));
}

#[rstest]
fn thunk_error_messages() {
    assert_eq!(
        ThunkError::Panicked("boom".to_string()).to_string(),
        "thunk evaluation panicked: boom"
    );
    assert!(ThunkError::Poisoned.to_string().contains("poisoned"));
}

#[rstest]
fn lazy_into_inner_of_poisoned_is_error() {
    let lazy: Lazy<i32, _> = Lazy::new(|| panic!("boom"));
    let _ = lazy.try_force();
    assert_eq!(lazy.into_inner(), Err(ThunkError::Poisoned));
}

// =============================================================================
// Combinators
// =============================================================================

#[rstest]
fn thunk_map_and_flat_map_are_lazy() {
    let calls = Rc::new(Cell::new(0));
    let base = counted(&calls, 10);
    let mapped = base.map(|x| x + 1);
    let chained = mapped.flat_map(|x| Thunk::ready(x * 2));
    assert_eq!(calls.get(), 0);

    assert_eq!(chained.value(), 22);
    assert_eq!(*mapped.force(), 11);
    assert_eq!(calls.get(), 1);
}

#[rstest]
fn thunk_lift2_combines_without_forcing() {
    let calls = Rc::new(Cell::new(0));
    let add = Thunk::lift2(|a: &i32, b: &i32| a + b);
    let sum = add(&counted(&calls, 1), &counted(&calls, 2));
    assert_eq!(calls.get(), 0);
    assert_eq!(sum.value(), 3);
    assert_eq!(calls.get(), 2);
}

#[cfg(feature = "persistent")]
#[rstest]
fn thunk_sequence_preserves_order() {
    use lazyfp::persistent::PersistentList;

    let calls = Rc::new(Cell::new(0));
    let thunks: PersistentList<Thunk<i32>> = (1..=3).map(|n| counted(&calls, n)).collect();
    let sequenced = Thunk::sequence(&thunks);
    assert_eq!(calls.get(), 0);
    assert_eq!(sequenced.value(), PersistentList::from_slice(&[1, 2, 3]));
    assert_eq!(calls.get(), 3);
}

#[rstest]
#[case(Lazy::new(|| 1).map(|x| x + 1).into_inner(), Ok(2))]
#[case(Lazy::new(|| 1).zip_with(Lazy::new(|| 2), |a, b| a * 10 + b).into_inner(), Ok(12))]
#[case(Lazy::new(|| 3).flat_map(|x| Lazy::new(move || x * x)).into_inner(), Ok(9))]
fn lazy_combinators(#[case] result: Result<i32, ThunkError>, #[case] expected: Result<i32, ThunkError>) {
    assert_eq!(result, expected);
}

#[rstest]
fn debug_output_does_not_force() {
    let lazy = Lazy::new(|| 5);
    assert_eq!(format!("{lazy:?}"), "Lazy(\"<uninit>\")");
    let thunk = Thunk::new(|| 5);
    assert_eq!(format!("{thunk:?}"), "Thunk(\"<unevaluated>\")");
    let _ = thunk.force();
    assert_eq!(format!("{thunk:?}"), "Thunk(5)");
}
