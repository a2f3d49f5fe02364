//! Shared, memoized deferred computations.
//!
//! A [`Thunk<A>`] is a reference-counted [`Lazy`] with a type-erased
//! initializer. Cloning a thunk shares the memo cell, so however many
//! clones are forced, the wrapped function runs at most once. Streams use
//! thunks for both the head and the tail of every cell.
//!
//! # Examples
//!
//! ```rust
//! use lazyfp::control::Thunk;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let calls = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&calls);
//! let thunk = Thunk::new(move || {
//!     counter.set(counter.get() + 1);
//!     "computed".to_string()
//! });
//!
//! let shared = thunk.clone();
//! assert_eq!(*thunk.force(), "computed");
//! assert_eq!(*shared.force(), "computed");
//! assert_eq!(calls.get(), 1);
//! ```

use std::cell::Ref;
use std::fmt;
use std::rc::Rc;

use super::lazy::{Lazy, ThunkError};

#[cfg(feature = "persistent")]
use crate::persistent::PersistentList;

type Initializer<A> = Box<dyn FnOnce() -> A>;

/// A shareable, single-evaluation deferred computation.
///
/// # Failure
///
/// A panic raised by the wrapped function propagates to whoever forces the
/// thunk and poisons it for every clone: the function is not retried.
///
/// # Thread Safety
///
/// `Thunk` is built on `Rc` and is neither `Send` nor `Sync`.
pub struct Thunk<A> {
    cell: Rc<Lazy<A, Initializer<A>>>,
}

impl<A> Clone for Thunk<A> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<A> Thunk<A> {
    /// Returns the value if it has already been computed, without forcing.
    pub fn peek(&self) -> Option<Ref<'_, A>> {
        self.cell.get()
    }

    /// Returns `true` once the value has been computed.
    pub fn is_evaluated(&self) -> bool {
        self.cell.is_initialized()
    }

    /// Returns `true` if evaluation panicked.
    pub fn is_poisoned(&self) -> bool {
        self.cell.is_poisoned()
    }

    /// Returns `true` if both thunks share the same memo cell.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.cell, &other.cell)
    }

    /// Moves the value out if this is the only handle and it has been
    /// evaluated.
    pub(crate) fn take_evaluated(&mut self) -> Option<A> {
        Rc::get_mut(&mut self.cell).and_then(Lazy::take_initialized)
    }
}

impl<A: 'static> Thunk<A> {
    /// Wraps a zero-argument function without evaluating it.
    pub fn new<F>(function: F) -> Self
    where
        F: FnOnce() -> A + 'static,
    {
        Self {
            cell: Rc::new(Lazy::new(Box::new(function))),
        }
    }

    /// Creates a thunk that is already evaluated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Thunk;
    ///
    /// let thunk = Thunk::ready(42);
    /// assert!(thunk.is_evaluated());
    /// ```
    pub fn ready(value: A) -> Self {
        Self {
            cell: Rc::new(Lazy::evaluated(value)),
        }
    }

    /// Forces evaluation and returns a reference to the memoized value.
    ///
    /// # Panics
    ///
    /// If the wrapped function panics, or if the thunk is already poisoned.
    pub fn force(&self) -> Ref<'_, A> {
        self.cell.force()
    }

    /// Forces evaluation, reporting failures as a [`ThunkError`].
    ///
    /// # Errors
    ///
    /// See [`Lazy::try_force`].
    pub fn try_force(&self) -> Result<Ref<'_, A>, ThunkError> {
        self.cell.try_force()
    }

    /// Returns a thunk computing `function(self.force())`.
    ///
    /// The receiver is not forced until the result is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Thunk;
    ///
    /// let base = Thunk::new(|| 21);
    /// let doubled = base.map(|x| x * 2);
    /// assert!(!base.is_evaluated());
    /// assert_eq!(*doubled.force(), 42);
    /// ```
    pub fn map<B, F>(&self, function: F) -> Thunk<B>
    where
        B: 'static,
        F: FnOnce(&A) -> B + 'static,
    {
        let source = self.clone();
        Thunk::new(move || {
            let value = source.force();
            function(&value)
        })
    }

    /// Returns a thunk that forces the receiver, applies `function`, then
    /// forces the resulting thunk.
    pub fn flat_map<B, F>(&self, function: F) -> Thunk<B>
    where
        B: Clone + 'static,
        F: FnOnce(&A) -> Thunk<B> + 'static,
    {
        let source = self.clone();
        Thunk::new(move || {
            let next = {
                let value = source.force();
                function(&value)
            };
            next.value()
        })
    }

    /// Lifts a binary function so that it combines two thunks lazily.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Thunk;
    ///
    /// let concat = Thunk::lift2(|a: &String, b: &String| format!("{a}{b}"));
    /// let greeting = concat(&Thunk::ready("Hello, ".to_string()), &Thunk::new(|| "World".to_string()));
    /// assert_eq!(*greeting.force(), "Hello, World");
    /// ```
    pub fn lift2<B, C, F>(function: F) -> impl Fn(&Self, &Thunk<B>) -> Thunk<C>
    where
        B: 'static,
        C: 'static,
        F: Fn(&A, &B) -> C + 'static,
    {
        let function = Rc::new(function);
        move |first, second| {
            let function = Rc::clone(&function);
            let (first, second) = (first.clone(), second.clone());
            Thunk::new(move || function(&first.force(), &second.force()))
        }
    }

    /// Runs `if_true` on the forced value when `condition` holds, otherwise
    /// runs `if_false` without forcing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Thunk;
    ///
    /// let thunk = Thunk::new(|| 42);
    /// thunk.for_each_if(false, |value| println!("{value}"), || println!("skipped"));
    /// assert!(!thunk.is_evaluated());
    /// ```
    pub fn for_each_if<T, U>(&self, condition: bool, if_true: T, if_false: U)
    where
        T: FnOnce(&A),
        U: FnOnce(),
    {
        if condition {
            if_true(&self.force());
        } else {
            if_false();
        }
    }

    /// Mirror of [`for_each_if`](Thunk::for_each_if): the value is forced
    /// only when `condition` does not hold.
    pub fn for_each_unless<T, U>(&self, condition: bool, if_true: T, if_false: U)
    where
        T: FnOnce(),
        U: FnOnce(&A),
    {
        if condition {
            if_true();
        } else {
            if_false(&self.force());
        }
    }
}

impl<A: Clone + 'static> Thunk<A> {
    /// Forces evaluation and returns a clone of the memoized value.
    ///
    /// # Panics
    ///
    /// Same conditions as [`force`](Thunk::force).
    pub fn value(&self) -> A {
        self.force().clone()
    }
}

#[cfg(feature = "persistent")]
impl<A: Clone + 'static> Thunk<A> {
    /// Turns a list of thunks into a thunk of a list. No element is forced
    /// until the result is.
    pub fn sequence(thunks: &PersistentList<Self>) -> Thunk<PersistentList<A>> {
        let thunks = thunks.clone();
        Thunk::new(move || thunks.iter().map(Self::value).collect())
    }

    /// Like [`sequence`](Thunk::sequence), but a panicking element yields
    /// `Err` instead of unwinding. Elements after the first failure are left
    /// unevaluated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::{Thunk, ThunkError};
    /// use lazyfp::persistent::PersistentList;
    ///
    /// let thunks: PersistentList<Thunk<i32>> =
    ///     vec![Thunk::ready(1), Thunk::new(|| panic!("bad element"))].into_iter().collect();
    /// let result = Thunk::try_sequence(&thunks).value();
    /// assert_eq!(result, Err(ThunkError::Panicked("bad element".to_string())));
    /// ```
    pub fn try_sequence(
        thunks: &PersistentList<Self>,
    ) -> Thunk<Result<PersistentList<A>, ThunkError>> {
        let thunks = thunks.clone();
        Thunk::new(move || {
            thunks
                .iter()
                .map(|thunk| thunk.try_force().map(|value| A::clone(&value)))
                .collect()
        })
    }
}

impl<A: fmt::Debug> fmt::Debug for Thunk<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => formatter.debug_tuple("Thunk").field(&*value).finish(),
            None if self.cell.is_poisoned() => {
                formatter.debug_tuple("Thunk").field(&"<poisoned>").finish()
            }
            None => formatter.debug_tuple("Thunk").field(&"<unevaluated>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::{Cell, RefCell};

    fn counting(calls: &Rc<Cell<u32>>, value: i32) -> Thunk<i32> {
        let calls = Rc::clone(calls);
        Thunk::new(move || {
            calls.set(calls.get() + 1);
            value
        })
    }

    #[rstest]
    fn test_thunk_construction_does_not_evaluate() {
        let calls = Rc::new(Cell::new(0));
        let thunk = counting(&calls, 1);
        assert!(!thunk.is_evaluated());
        assert_eq!(calls.get(), 0);
    }

    #[rstest]
    fn test_thunk_clones_share_one_evaluation() {
        let calls = Rc::new(Cell::new(0));
        let thunk = counting(&calls, 5);
        let clones: Vec<_> = (0..4).map(|_| thunk.clone()).collect();
        for clone in &clones {
            assert_eq!(*clone.force(), 5);
        }
        assert_eq!(calls.get(), 1);
        assert!(Thunk::ptr_eq(&thunk, &clones[0]));
    }

    #[rstest]
    fn test_thunk_map_is_lazy() {
        let calls = Rc::new(Cell::new(0));
        let thunk = counting(&calls, 10);
        let mapped = thunk.map(|x| x + 1);
        assert_eq!(calls.get(), 0);
        assert_eq!(mapped.value(), 11);
        assert_eq!(calls.get(), 1);
        assert_eq!(thunk.value(), 10);
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn test_thunk_lift2_with_the_same_thunk_twice() {
        let calls = Rc::new(Cell::new(0));
        let thunk = counting(&calls, 21);
        let add = Thunk::lift2(|a: &i32, b: &i32| a + b);
        assert_eq!(add(&thunk, &thunk).value(), 42);
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn test_thunk_map_may_force_its_source_again() {
        let thunk = Thunk::new(|| 3);
        let source = thunk.clone();
        let squared = thunk.map(move |x| x * *source.force());
        assert_eq!(squared.value(), 9);
    }

    #[rstest]
    #[case::forced(true, 1, "7")]
    #[case::skipped(false, 0, "none")]
    fn test_thunk_for_each_if(
        #[case] condition: bool,
        #[case] expected_calls: u32,
        #[case] expected: &str,
    ) {
        let calls = Rc::new(Cell::new(0));
        let thunk = counting(&calls, 7);
        let seen = RefCell::new(String::new());
        thunk.for_each_if(
            condition,
            |value| *seen.borrow_mut() = value.to_string(),
            || *seen.borrow_mut() = "none".to_string(),
        );
        assert_eq!(calls.get(), expected_calls);
        assert_eq!(*seen.borrow(), expected);
    }

    #[rstest]
    fn test_thunk_for_each_unless_forces_only_on_false() {
        let calls = Rc::new(Cell::new(0));
        let thunk = counting(&calls, 7);
        let seen = Cell::new(0);
        thunk.for_each_unless(true, || seen.set(-1), |value| seen.set(*value));
        assert_eq!((calls.get(), seen.get()), (0, -1));
        thunk.for_each_unless(false, || seen.set(-1), |value| seen.set(*value));
        assert_eq!((calls.get(), seen.get()), (1, 7));
    }

    #[rstest]
    fn test_thunk_flat_map() {
        let thunk = Thunk::new(|| 6);
        let result = thunk.flat_map(|x| {
            let x = *x;
            Thunk::new(move || x * 7)
        });
        assert_eq!(result.value(), 42);
    }

    #[rstest]
    fn test_thunk_panic_poisons_every_clone() {
        let thunk: Thunk<i32> = Thunk::new(|| panic!("no value"));
        let clone = thunk.clone();
        assert_eq!(
            thunk.try_force().err(),
            Some(ThunkError::Panicked("no value".to_string()))
        );
        assert!(clone.is_poisoned());
        assert_eq!(clone.try_force().err(), Some(ThunkError::Poisoned));
    }

    #[rstest]
    fn test_thunk_take_evaluated_requires_unique_handle() {
        let mut thunk = Thunk::ready(3);
        let clone = thunk.clone();
        assert_eq!(thunk.take_evaluated(), None);
        drop(clone);
        assert_eq!(thunk.take_evaluated(), Some(3));
    }

    #[cfg(feature = "persistent")]
    #[rstest]
    fn test_thunk_sequence_defers_elements() {
        let calls = Rc::new(Cell::new(0));
        let thunks: PersistentList<Thunk<i32>> =
            (1..=3).map(|value| counting(&calls, value)).collect();
        let sequenced = Thunk::sequence(&thunks);
        assert_eq!(calls.get(), 0);
        let values: Vec<i32> = sequenced.value().into_iter().collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(calls.get(), 3);
    }

    #[cfg(feature = "persistent")]
    #[rstest]
    fn test_thunk_try_sequence_stops_at_first_failure() {
        let calls = Rc::new(Cell::new(0));
        let thunks: PersistentList<Thunk<i32>> = vec![
            counting(&calls, 1),
            Thunk::new(|| panic!("second")),
            counting(&calls, 3),
        ]
        .into_iter()
        .collect();
        let result = Thunk::try_sequence(&thunks).value();
        assert_eq!(result, Err(ThunkError::Panicked("second".to_string())));
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn test_thunk_debug() {
        let thunk = Thunk::new(|| 1);
        assert_eq!(format!("{thunk:?}"), "Thunk(\"<unevaluated>\")");
        let _ = thunk.force();
        assert_eq!(format!("{thunk:?}"), "Thunk(1)");
    }
}
