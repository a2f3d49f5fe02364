//! Persistent (immutable) singly-linked list.
//!
//! This module provides [`PersistentList`], an immutable singly-linked list
//! that uses structural sharing for efficient operations. It is the strict
//! container that finite streams are materialised into.
//!
//! # Examples
//!
//! ```rust
//! use lazyfp::persistent::PersistentList;
//!
//! // Build a list using cons
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//! assert_eq!(list.len(), 3);
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//!
//! // Build from an iterator
//! let list: PersistentList<i32> = (1..=5).collect();
//! assert_eq!(list.iter().sum::<i32>(), 15);
//! ```
//!
//! # Structural Sharing
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Each node contains an element and an optional reference to the next node.
struct Node<T> {
    element: T,
    next: Option<Rc<Self>>,
}

/// A persistent (immutable) singly-linked list.
///
/// # Time Complexity
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | `new`     | O(1)       |
/// | `cons`    | O(1)       |
/// | `head`    | O(1)       |
/// | `tail`    | O(1)       |
/// | `len`     | O(1)       |
/// | `get`     | O(n)       |
/// | `append`  | O(n)       |
/// | `reverse` | O(n)       |
///
/// Dropping a list releases its unshared nodes iteratively, so arbitrarily
/// long lists can be dropped without exhausting the stack.
pub struct PersistentList<T> {
    head: Option<Rc<Node<T>>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> PersistentList<T> {
    /// Creates a new empty list.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    /// Builds a list from a Vec, consuming it from the back with `pop()`.
    fn build_from_vec(mut elements: Vec<T>) -> Self {
        let length = elements.len();
        let mut head: Option<Rc<Node<T>>> = None;
        while let Some(element) = elements.pop() {
            head = Some(Rc::new(Node {
                element,
                next: head,
            }));
        }
        Self { head, length }
    }

    /// Prepends an element to the front of the list.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.head(), Some(&1));
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            head: Some(Rc::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element of the list.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns the list without its first element, sharing its structure.
    ///
    /// If the list is empty, returns an empty list.
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        self.head.as_ref().map_or_else(Self::new, |node| Self {
            head: node.next.clone(),
            length: self.length.saturating_sub(1),
        })
    }

    /// Decomposes the list into its head and tail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(2).cons(1);
    /// if let Some((head, tail)) = list.uncons() {
    ///     assert_eq!(*head, 1);
    ///     assert_eq!(tail.head(), Some(&2));
    /// }
    /// ```
    #[inline]
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.head.as_ref().map(|node| {
            let tail = Self {
                head: node.next.clone(),
                length: self.length.saturating_sub(1),
            };
            (&node.element, tail)
        })
    }

    /// Returns a reference to the element at the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Returns the number of elements in the list.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns an iterator over references to the elements, front to back.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentListIterator<'_, T> {
        PersistentListIterator {
            current: self.head.as_deref(),
            remaining: self.length,
        }
    }

    /// Folds the list from the left.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=4).collect();
    /// assert_eq!(list.fold_left(0, |accumulator, x| accumulator * 10 + x), 1234);
    /// ```
    pub fn fold_left<B, F>(&self, initial: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(initial, function)
    }
}

impl<T: Clone> PersistentList<T> {
    /// Appends another list to this list.
    ///
    /// The result shares every node of `other`; only `self` is copied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::persistent::PersistentList;
    ///
    /// let list1 = PersistentList::new().cons(2).cons(1);
    /// let list2 = PersistentList::new().cons(4).cons(3);
    /// let combined = list1.append(&list2);
    ///
    /// let collected: Vec<&i32> = combined.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3, &4]);
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        let mut elements: Vec<T> = self.iter().cloned().collect();
        let mut head = other.head.clone();
        let mut length = other.length;
        while let Some(element) = elements.pop() {
            head = Some(Rc::new(Node {
                element,
                next: head,
            }));
            length += 1;
        }
        Self { head, length }
    }

    /// Creates a list from a slice, preserving order.
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        let mut head: Option<Rc<Node<T>>> = None;
        for element in slice.iter().rev() {
            head = Some(Rc::new(Node {
                element: element.clone(),
                next: head,
            }));
        }
        Self {
            head,
            length: slice.len(),
        }
    }

    /// Returns a new list containing the first `count` elements.
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        self.iter().take(count).cloned().collect()
    }

    /// Returns the list with the first `count` elements removed, sharing
    /// the remaining nodes.
    #[must_use]
    pub fn drop_first(&self, count: usize) -> Self {
        let mut current = self.clone();
        for _ in 0..count.min(self.len()) {
            current = current.tail();
        }
        current
    }

    /// Returns a new list with elements in reverse order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// let reversed = list.reverse();
    /// let collected: Vec<&i32> = reversed.iter().collect();
    /// assert_eq!(collected, vec![&3, &2, &1]);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut result = Self::new();
        for element in self {
            result = result.cons(element.clone());
        }
        result
    }
}

impl<T> Drop for PersistentList<T> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            next = match Rc::try_unwrap(node) {
                Ok(mut node) => node.next.take(),
                Err(_) => None,
            };
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`PersistentList`].
pub struct PersistentListIterator<'a, T> {
    current: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for PersistentListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_deref();
            self.remaining -= 1;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentListIterator<'_, T> {}

/// An owning iterator over elements of a [`PersistentList`].
pub struct PersistentListIntoIterator<T> {
    list: PersistentList<T>,
}

impl<T: Clone> Iterator for PersistentListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (element, tail) = self
            .list
            .uncons()
            .map(|(head, tail)| (head.clone(), tail))?;
        self.list = tail;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.length, Some(self.list.length))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentListIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentList<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length,
        }
    }
}

impl<T> Default for PersistentList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build_from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone> IntoIterator for PersistentList<T> {
    type Item = T;
    type IntoIter = PersistentListIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentListIntoIterator { list: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = PersistentListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

impl<T: Hash> Hash for PersistentList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}
