//! Stream constructors: `unfold` and everything built on top of it.

use std::rc::Rc;

use super::lazy_stream::Stream;
use crate::control::Thunk;
use crate::persistent::PersistentList;

type Generator<S, E> = Rc<dyn Fn(S) -> Option<(E, S)>>;
type Step<E> = Rc<dyn Fn(&E) -> E>;

impl<E: Clone + 'static> Stream<E> {
    /// Builds a stream by repeatedly applying `generator` to an evolving
    /// state.
    ///
    /// The stream ends at the first state for which `generator` returns
    /// `None`. The generator runs once immediately, to decide whether the
    /// result is empty, and then once per tail as the stream is consumed.
    ///
    /// Generators whose underlying source can also *fail* must fold the
    /// failure into `None` here; use [`try_unfold`](Stream::try_unfold) to
    /// keep failures visible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::stream::Stream;
    ///
    /// let stream = Stream::unfold(0, |state| (state < 3).then(|| (state, state + 1)));
    /// assert_eq!(stream.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    /// ```
    pub fn unfold<S, F>(seed: S, generator: F) -> Self
    where
        S: 'static,
        F: Fn(S) -> Option<(E, S)> + 'static,
    {
        Self::unfold_with(seed, Rc::new(generator))
    }

    fn unfold_with<S: 'static>(seed: S, generator: Generator<S, E>) -> Self {
        match generator(seed) {
            Some((element, next)) => Self::cons_value(
                element,
                Thunk::new(move || Self::unfold_with(next, generator)),
            ),
            None => Self::Empty,
        }
    }

    /// Like [`unfold`](Stream::unfold), but distinguishes the end of the
    /// sequence (`Ok(None)`) from a failure (`Err`).
    ///
    /// A failure is emitted as a final `Err` element, after which the
    /// stream ends.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::stream::Stream;
    ///
    /// let parsed = Stream::try_unfold(0_usize, |index: usize| {
    ///     let inputs = ["1", "2", "x"];
    ///     match inputs.get(index) {
    ///         None => Ok(None),
    ///         Some(text) => text.parse::<i32>().map(|value| Some((value, index + 1))).map_err(|_| *text),
    ///     }
    /// });
    /// let collected: Vec<Result<i32, &str>> = parsed.iter().collect();
    /// assert_eq!(collected, vec![Ok(1), Ok(2), Err("x")]);
    /// ```
    pub fn try_unfold<S, Failure, F>(seed: S, generator: F) -> Stream<Result<E, Failure>>
    where
        S: 'static,
        Failure: Clone + 'static,
        F: Fn(S) -> Result<Option<(E, S)>, Failure> + 'static,
    {
        Stream::unfold(Some(seed), move |state: Option<S>| match generator(state?) {
            Ok(Some((element, next))) => Some((Ok(element), Some(next))),
            Ok(None) => None,
            Err(failure) => Some((Err(failure), None)),
        })
    }

    /// The infinite stream `seed, step(seed), step(step(seed)), ...`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::stream::Stream;
    ///
    /// let powers = Stream::iterate(1_u32, |x| x * 2).take_at_most(5);
    /// assert_eq!(powers.iter().collect::<Vec<_>>(), vec![1, 2, 4, 8, 16]);
    /// ```
    pub fn iterate<F>(seed: E, step: F) -> Self
    where
        F: Fn(&E) -> E + 'static,
    {
        Self::iterate_with(Thunk::ready(seed), Rc::new(step))
    }

    /// Like [`iterate`](Stream::iterate), but the seed is itself deferred
    /// and is only forced when the first element or the tail is.
    pub fn iterate_lazy<F>(seed: Thunk<E>, step: F) -> Self
    where
        F: Fn(&E) -> E + 'static,
    {
        Self::iterate_with(seed, Rc::new(step))
    }

    fn iterate_with(seed: Thunk<E>, step: Step<E>) -> Self {
        let previous = seed.clone();
        Self::cons(
            seed,
            Thunk::new(move || {
                let next = step(&previous.force());
                Self::iterate_with(Thunk::ready(next), step)
            }),
        )
    }

    /// An infinite stream whose every position evaluates `function` afresh
    /// when its head is forced.
    pub fn repeat<F>(function: F) -> Self
    where
        F: Fn() -> E + 'static,
    {
        Self::repeat_with(Rc::new(function))
    }

    fn repeat_with(function: Rc<dyn Fn() -> E>) -> Self {
        let head = Rc::clone(&function);
        Self::cons(
            Thunk::new(move || head()),
            Thunk::new(move || Self::repeat_with(function)),
        )
    }

    /// A finite stream of `count` positions that all share `element`.
    ///
    /// The thunk is shared, not copied: it is evaluated at most once no
    /// matter how many positions are forced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Thunk;
    /// use lazyfp::stream::Stream;
    ///
    /// let stream = Stream::fill(3, Thunk::new(|| "x"));
    /// assert_eq!(stream.iter().collect::<Vec<_>>(), vec!["x", "x", "x"]);
    /// ```
    pub fn fill(count: usize, element: Thunk<E>) -> Self {
        (0..count).fold(Self::Empty, |rest, _| {
            Self::cons(element.clone(), Thunk::ready(rest))
        })
    }

    /// A stream over the elements of a list, in order. The list's nodes
    /// are shared, not copied.
    pub fn from_list(list: &PersistentList<E>) -> Self {
        Self::unfold(list.clone(), |remaining: PersistentList<E>| {
            remaining
                .uncons()
                .map(|(head, tail)| (head.clone(), tail))
        })
    }
}

impl Stream<i64> {
    /// The ascending integers starting at `start`.
    ///
    /// The stream is infinite in practice; it ends after `i64::MAX` rather
    /// than overflowing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::stream::Stream;
    ///
    /// let numbers = Stream::from_int(-2).take_at_most(4);
    /// assert_eq!(numbers.iter().collect::<Vec<_>>(), vec![-2, -1, 0, 1]);
    /// ```
    pub fn from_int(start: i64) -> Self {
        Self::unfold(Some(start), |state: Option<i64>| {
            let current = state?;
            Some((current, current.checked_add(1)))
        })
    }
}

/// The Fibonacci numbers `1, 1, 2, 3, 5, 8, ...`.
///
/// Generated from the state `(x, y)`, emitting `x` and moving to
/// `(y, x + y)`. The stream ends with the largest Fibonacci number that
/// fits in `u64`.
///
/// # Examples
///
/// ```rust
/// use lazyfp::stream::fib;
///
/// let prefix: Vec<u64> = fib().take_at_most(7).iter().collect();
/// assert_eq!(prefix, vec![1, 1, 2, 3, 5, 8, 13]);
/// ```
pub fn fib() -> Stream<u64> {
    Stream::unfold(Some((1_u64, Some(1_u64))), |state: Option<(u64, Option<u64>)>| {
        let (x, y) = state?;
        Some((x, y.map(|y| (y, x.checked_add(y)))))
    })
}
