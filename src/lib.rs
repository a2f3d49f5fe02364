//! # lazyfp
//!
//! Lazy, memoized evaluation and persistent lazy streams for Rust, together
//! with a small deferred-IO layer for reading typed values from the console,
//! files, or scripted sources.
//!
//! ## Overview
//!
//! - **Control Structures**: [`Lazy`](control::Lazy) memo cells and shareable
//!   [`Thunk`](control::Thunk)s that evaluate at most once
//! - **Persistent Data Structures**: an immutable singly-linked
//!   [`PersistentList`](persistent::PersistentList)
//! - **Streams**: a possibly-infinite, persistent [`Stream`](stream::Stream)
//!   whose head and tail are both deferred
//! - **Effects**: the [`IO`](effect::IO) action wrapper and the
//!   [`Input`](effect::Input) readers that feed `Stream::unfold`
//!
//! ## Feature Flags
//!
//! - `control`: `Lazy` and `Thunk`
//! - `persistent`: `PersistentList`
//! - `stream`: `Stream` (enables `control` and `persistent`)
//! - `effect`: `IO` and the input readers (enables `control` and `persistent`)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazyfp::prelude::*;
//!
//! let evens = Stream::iterate(0, |x| x + 1).filter(|x| x % 2 == 0);
//! let first: Vec<i32> = evens.take_at_most(4).to_list().into_iter().collect();
//! assert_eq!(first, vec![0, 2, 4, 6]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lazyfp::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "stream")]
    pub use crate::stream::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "stream")]
pub mod stream;

#[cfg(feature = "effect")]
pub mod effect;
