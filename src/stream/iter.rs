use std::iter::FusedIterator;

use super::lazy_stream::Stream;
use crate::control::Thunk;

/// An iterator over a stream's elements, forcing one cell per `next`.
///
/// Created by [`Stream::iter`]. The iterator holds its own handle on the
/// remaining stream, so it does not borrow the stream it came from. The
/// tail of the cell just yielded stays unforced until the following call.
#[derive(Clone)]
pub struct StreamIter<E> {
    pending: Thunk<Stream<E>>,
}

impl<E: 'static> StreamIter<E> {
    fn new(stream: Stream<E>) -> Self {
        Self {
            pending: Thunk::ready(stream),
        }
    }
}

impl<E: Clone + 'static> Iterator for StreamIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        let Stream::Cons(cell) = self.pending.value() else {
            return None;
        };
        self.pending = cell.tail().clone();
        Some(cell.head().value())
    }
}

impl<E: Clone + 'static> FusedIterator for StreamIter<E> {}

impl<E: Clone + 'static> Stream<E> {
    /// Returns an iterator over the elements.
    ///
    /// The iterator forces the tail of a cell only when asked for the
    /// element after it, so pair it with `take`/`take_while` on infinite
    /// streams.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::stream::Stream;
    ///
    /// let evens: Vec<u32> = Stream::iterate(0_u32, |x| x + 2).iter().take(3).collect();
    /// assert_eq!(evens, vec![0, 2, 4]);
    /// ```
    pub fn iter(&self) -> StreamIter<E> {
        StreamIter::new(self.clone())
    }
}

impl<E: Clone + 'static> IntoIterator for Stream<E> {
    type Item = E;
    type IntoIter = StreamIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        StreamIter::new(self)
    }
}

impl<E: Clone + 'static> IntoIterator for &Stream<E> {
    type Item = E;
    type IntoIter = StreamIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Clone + 'static> FromIterator<E> for Stream<E> {
    /// Collects eagerly into a fully evaluated, finite stream.
    fn from_iter<I: IntoIterator<Item = E>>(iterable: I) -> Self {
        let elements: Vec<E> = iterable.into_iter().collect();
        elements
            .into_iter()
            .rev()
            .fold(Self::Empty, |rest, element| {
                Self::cons_value(element, Thunk::ready(rest))
            })
    }
}
