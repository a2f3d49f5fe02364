//! The `Stream` sum type and its transformations.

use std::fmt;
use std::rc::Rc;

use crate::control::Thunk;
use crate::persistent::PersistentList;

pub(super) type Predicate<E> = Rc<dyn Fn(&E) -> bool>;
type Folder<E, U> = Rc<dyn Fn(E, Thunk<U>) -> U>;
type Expander<E, U> = Rc<dyn Fn(E) -> Stream<U>>;

/// A possibly-infinite, persistent, lazily evaluated sequence.
///
/// A stream is either [`Empty`](Stream::Empty) or a [`Cons`](Stream::Cons)
/// cell whose head and tail are independent [`Thunk`]s. Cloning a stream is
/// O(1) and shares every cell, evaluated or not.
///
/// Every transformation is expressed over deferred tails, so it only forces
/// as much of its source as its consumer demands. Consumers that walk the
/// whole stream (`to_list`, `fold_left`, `exists` without a match) do not
/// terminate on an infinite stream; bound it first with `take_at_most`,
/// `take_while` or `find`.
///
/// # Examples
///
/// ```rust
/// use lazyfp::control::Thunk;
/// use lazyfp::stream::Stream;
///
/// let stream = Stream::cons_value(1, Thunk::new(|| Stream::cons_value(2, Thunk::ready(Stream::empty()))));
/// assert_eq!(stream.first(), Some(1));
/// assert_eq!(stream.to_list().len(), 2);
/// ```
pub enum Stream<E> {
    /// The terminal stream.
    Empty,
    /// A cell holding a deferred head and a deferred tail.
    Cons(Rc<ConsCell<E>>),
}

/// The payload of a [`Stream::Cons`] cell.
pub struct ConsCell<E> {
    head: Thunk<E>,
    tail: Thunk<Stream<E>>,
}

impl<E> ConsCell<E> {
    /// The deferred head element.
    pub const fn head(&self) -> &Thunk<E> {
        &self.head
    }

    /// The deferred remainder of the stream.
    pub const fn tail(&self) -> &Thunk<Stream<E>> {
        &self.tail
    }
}

impl<E> Clone for Stream<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Cons(cell) => Self::Cons(Rc::clone(cell)),
        }
    }
}

impl<E> Default for Stream<E> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<E> Stream<E> {
    /// The empty stream.
    #[inline]
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Builds a cell from a deferred head and a deferred tail. Neither is
    /// forced.
    pub fn cons(head: Thunk<E>, tail: Thunk<Self>) -> Self {
        Self::Cons(Rc::new(ConsCell { head, tail }))
    }

    /// Returns `true` for the empty stream. Forces nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl<E: Clone + 'static> Stream<E> {
    /// Builds a cell from an already-known head and a deferred tail.
    pub fn cons_value(head: E, tail: Thunk<Self>) -> Self {
        Self::cons(Thunk::ready(head), tail)
    }

    /// Returns the first element, forcing only the head thunk.
    pub fn first(&self) -> Option<E> {
        match self {
            Self::Empty => None,
            Self::Cons(cell) => Some(cell.head.value()),
        }
    }

    /// Returns the stream after the first element, forcing only the tail
    /// thunk of the first cell.
    pub fn rest(&self) -> Option<Self> {
        match self {
            Self::Empty => None,
            Self::Cons(cell) => Some(cell.tail.value()),
        }
    }

    /// Lazily truncates the stream to at most `count` elements.
    ///
    /// Head thunks are shared with the source; no tail is forced until the
    /// truncated stream's own tail is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::stream::Stream;
    ///
    /// let naturals = Stream::iterate(0_u32, |x| x + 1);
    /// let prefix: Vec<u32> = naturals.take_at_most(3).iter().collect();
    /// assert_eq!(prefix, vec![0, 1, 2]);
    /// ```
    pub fn take_at_most(&self, count: usize) -> Self {
        match self {
            Self::Cons(cell) if count > 0 => {
                let remaining = count - 1;
                let rest = if remaining == 0 {
                    Thunk::ready(Self::Empty)
                } else {
                    let tail = cell.tail.clone();
                    Thunk::new(move || tail.value().take_at_most(remaining))
                };
                Self::cons(cell.head.clone(), rest)
            }
            _ => Self::Empty,
        }
    }

    /// Skips up to `count` elements, forcing exactly the tails it skips.
    pub fn drop_at_most(&self, count: usize) -> Self {
        let mut current = self.clone();
        for _ in 0..count {
            current = match &current {
                Self::Empty => break,
                Self::Cons(cell) => cell.tail.value(),
            };
        }
        current
    }

    /// Returns the longest prefix whose elements all satisfy `predicate`.
    ///
    /// Forces the head of the first cell immediately and nothing past the
    /// first failing element.
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&E) -> bool + 'static,
    {
        self.take_while_with(Rc::new(predicate))
    }

    fn take_while_with(&self, predicate: Predicate<E>) -> Self {
        match self {
            Self::Cons(cell) if predicate(&cell.head.force()) => {
                let tail = cell.tail.clone();
                Self::cons(
                    cell.head.clone(),
                    Thunk::new(move || tail.value().take_while_with(predicate)),
                )
            }
            _ => Self::Empty,
        }
    }

    /// [`take_while`](Stream::take_while) expressed as a right fold: an
    /// element failing `predicate` ignores the fold of the rest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::stream::Stream;
    ///
    /// let small = Stream::iterate(1, |x| x * 2).take_while_via_fold(|x| *x < 20);
    /// assert_eq!(small.iter().collect::<Vec<_>>(), vec![1, 2, 4, 8, 16]);
    /// ```
    pub fn take_while_via_fold<P>(&self, predicate: P) -> Self
    where
        P: Fn(&E) -> bool + 'static,
    {
        self.fold_right(Thunk::new(Self::empty), move |element, rest| {
            if predicate(&element) {
                Self::cons_value(element, rest)
            } else {
                Self::Empty
            }
        })
    }

    /// Skips the leading run of elements that satisfy `predicate`.
    pub fn drop_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&E) -> bool,
    {
        let mut current = self.clone();
        loop {
            current = match &current {
                Self::Cons(cell) if predicate(&cell.head.force()) => cell.tail.value(),
                _ => return current,
            };
        }
    }

    /// Right fold over the stream with a deferred accumulator.
    ///
    /// `function` receives each element together with an *unforced* thunk
    /// for the fold of the remainder. Ignoring that thunk short-circuits the
    /// fold, so folding an infinite stream terminates whenever `function`
    /// stops demanding more. A `function` that always forces the thunk
    /// recurses once per element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Thunk;
    /// use lazyfp::stream::Stream;
    ///
    /// // Stops at the first element greater than 10, on an infinite stream.
    /// let first_large = Stream::iterate(1_u64, |x| x * 3)
    ///     .fold_right(Thunk::ready(None), |x, rest| if x > 10 { Some(x) } else { rest.value() });
    /// assert_eq!(first_large, Some(27));
    /// ```
    pub fn fold_right<U, F>(&self, accumulator: Thunk<U>, function: F) -> U
    where
        U: Clone + 'static,
        F: Fn(E, Thunk<U>) -> U + 'static,
    {
        self.fold_right_with(accumulator, Rc::new(function))
    }

    fn fold_right_with<U>(&self, accumulator: Thunk<U>, function: Folder<E, U>) -> U
    where
        U: Clone + 'static,
    {
        match self {
            Self::Empty => accumulator.value(),
            Self::Cons(cell) => {
                let tail = cell.tail.clone();
                let step = Rc::clone(&function);
                let rest = Thunk::new(move || tail.value().fold_right_with(accumulator, step));
                function(cell.head.value(), rest)
            }
        }
    }

    /// Strict left fold. Requires a finite stream; runs in constant stack.
    pub fn fold_left<B, F>(&self, initial: B, mut function: F) -> B
    where
        F: FnMut(B, E) -> B,
    {
        self.iter().fold(initial, |accumulator, element| function(accumulator, element))
    }

    /// The first element, computed through [`fold_right`](Stream::fold_right)
    /// without ever forcing the fold of the tail.
    pub fn head_via_fold(&self) -> Option<E> {
        self.fold_right(Thunk::ready(None), |element, _| Some(element))
    }

    /// Lazily applies `function` to every element.
    ///
    /// `function` itself is deferred: it runs for a position only when that
    /// position's head is forced.
    pub fn map<U, F>(&self, function: F) -> Stream<U>
    where
        U: Clone + 'static,
        F: Fn(E) -> U + 'static,
    {
        let function = Rc::new(function);
        self.fold_right(Thunk::new(Stream::empty), move |element, rest| {
            let function = Rc::clone(&function);
            Stream::cons(Thunk::new(move || function(element)), rest)
        })
    }

    /// Keeps the elements satisfying `predicate`.
    ///
    /// Each step forces only as much of the source as is needed to find the
    /// next match.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&E) -> bool + 'static,
    {
        self.filter_with(Rc::new(predicate))
    }

    pub(super) fn filter_with(&self, predicate: Predicate<E>) -> Self {
        match self.drop_while(|element| !predicate(element)) {
            Self::Empty => Self::Empty,
            Self::Cons(cell) => {
                let tail = cell.tail.clone();
                Self::cons(
                    cell.head.clone(),
                    Thunk::new(move || tail.value().filter_with(predicate)),
                )
            }
        }
    }

    /// Lazily concatenates `other` after this stream.
    ///
    /// `other` is forced only once every element of `self` has been
    /// consumed; if `self` is infinite it is never forced.
    pub fn append(&self, other: Thunk<Self>) -> Self {
        self.fold_right(other, |element, rest| Self::cons_value(element, rest))
    }

    /// Maps every element to a stream and lazily concatenates the results.
    ///
    /// Runs of elements that map to empty streams are skipped in a loop,
    /// the same way `filter` skips rejected elements.
    pub fn flat_map<U, F>(&self, function: F) -> Stream<U>
    where
        U: Clone + 'static,
        F: Fn(E) -> Stream<U> + 'static,
    {
        self.flat_map_with(Rc::new(function))
    }

    fn flat_map_with<U>(&self, function: Expander<E, U>) -> Stream<U>
    where
        U: Clone + 'static,
    {
        let mut current = self.clone();
        loop {
            let Self::Cons(cell) = current else {
                return Stream::Empty;
            };
            match function(cell.head.value()) {
                Stream::Empty => current = cell.tail.value(),
                expanded => {
                    let tail = cell.tail.clone();
                    return expanded
                        .append(Thunk::new(move || tail.value().flat_map_with(function)));
                }
            }
        }
    }

    /// Returns the first element satisfying `predicate`, forcing nothing
    /// beyond it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::stream::Stream;
    ///
    /// assert_eq!(Stream::iterate(0, |x| x + 1).find(|x| x * x > 50), Some(8));
    /// ```
    pub fn find<P>(&self, predicate: P) -> Option<E>
    where
        P: Fn(&E) -> bool + 'static,
    {
        self.filter(predicate).first()
    }

    /// Returns `true` as soon as an element satisfies `predicate`.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: Fn(&E) -> bool,
    {
        !self.drop_while(|element| !predicate(element)).is_empty()
    }

    /// Materialises every element into a [`PersistentList`], in order.
    ///
    /// The stream must be finite.
    pub fn to_list(&self) -> PersistentList<E> {
        self.fold_left(PersistentList::new(), |reversed, element| reversed.cons(element))
            .reverse()
    }
}

impl<E> Drop for ConsCell<E> {
    fn drop(&mut self) {
        // Unlink evaluated, unshared tails one cell at a time.
        let mut next = self.tail.take_evaluated();
        while let Some(Stream::Cons(cell)) = next {
            next = match Rc::try_unwrap(cell) {
                Ok(mut cell) => cell.tail.take_evaluated(),
                Err(_) => None,
            };
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Stream<E> {
    /// Shows the already-evaluated prefix without forcing anything;
    /// unevaluated heads print as `?` and an unevaluated tail as `..`.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Stream[")?;
        let mut current = self.clone();
        let mut first = true;
        loop {
            let Self::Cons(cell) = current else {
                break;
            };
            if !first {
                write!(formatter, ", ")?;
            }
            first = false;
            match cell.head.peek() {
                Some(head) => write!(formatter, "{head:?}")?,
                None => write!(formatter, "?")?,
            }
            match cell.tail.peek() {
                Some(tail) => current = tail.clone(),
                None => {
                    write!(formatter, ", ..")?;
                    break;
                }
            }
        }
        write!(formatter, "]")
    }
}
