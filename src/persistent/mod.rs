//! Persistent (immutable) data structures.
//!
//! - [`PersistentList`]: Persistent singly-linked list
//!
//! # Examples
//!
//! ```rust
//! use lazyfp::persistent::PersistentList;
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4); // New list
//! ```

mod list;

pub use list::{PersistentList, PersistentListIntoIterator, PersistentListIterator};
