//! Control structures for lazy evaluation.
//!
//! - [`Lazy`]: a single-owner memo cell
//! - [`Thunk`]: a shareable, reference-counted memo cell used by streams
//!
//! # Examples
//!
//! ```rust
//! use lazyfp::control::Thunk;
//!
//! let thunk = Thunk::new(|| {
//!     println!("Computing...");
//!     42
//! });
//! // "Computing..." is not printed yet
//!
//! assert_eq!(*thunk.force(), 42);
//! // Now it has been printed, exactly once
//! assert_eq!(*thunk.clone().force(), 42);
//! ```

mod lazy;
mod thunk;

pub use lazy::{Lazy, LazyState, ThunkError};
pub use thunk::Thunk;
