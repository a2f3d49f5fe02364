//! Persistent lazy streams.
//!
//! A [`Stream`] is a cons list whose head and tail are both deferred
//! [`Thunk`](crate::control::Thunk)s. Streams can be infinite: every
//! transformation returns immediately and forces only what its consumer
//! asks for.
//!
//! - Constructors: [`Stream::unfold`], [`Stream::try_unfold`],
//!   [`Stream::iterate`], [`Stream::repeat`], [`Stream::fill`],
//!   [`Stream::from_int`], [`fib`]
//! - Lazy transformations: `take_at_most`, `take_while`, `map`, `filter`,
//!   `append`, `flat_map`
//! - Consumers: `first`, `find`, `exists`, `fold_left`, `fold_right`,
//!   `to_list`, `iter`
//!
//! # Examples
//!
//! ```rust
//! use lazyfp::stream::Stream;
//!
//! let squares = Stream::from_int(1).map(|x| x * x);
//! let small: Vec<i64> = squares.take_while(|x| *x < 30).iter().collect();
//! assert_eq!(small, vec![1, 4, 9, 16, 25]);
//! ```

mod generators;
mod iter;
mod lazy_stream;

pub use generators::fib;
pub use iter::StreamIter;
pub use lazy_stream::{ConsCell, Stream};
