//! Deferred side effects and typed input.
//!
//! - [`IO`]: a single-shot action that runs only through `run_unsafe`
//! - [`Input`]: a reader that returns each value with the reader to use
//!   next, ready to be plugged into [`Stream::unfold`](crate::stream::Stream::unfold)
//! - [`ConsoleReader`], [`FileReader`], [`ScriptReader`], [`LineReader`]:
//!   the available readers
//! - [`InputError`]: why a read failed
//!
//! # Examples
//!
//! ```rust
//! use lazyfp::effect::{IO, Input, ScriptReader};
//!
//! let script: ScriptReader = ["Ada"].into_iter().collect();
//! let greeting = match script.read_string() {
//!     Ok(Some((name, _))) => IO::print_line(format!("Hello, {name}!")),
//!     Ok(None) => IO::empty(),
//!     Err(error) => IO::print_line(error),
//! };
//! greeting.run_unsafe();
//! ```

mod error;
mod input;
mod io;

pub use error::InputError;
pub use input::{ConsoleReader, FileReader, Input, LineReader, ReadResult, ScriptReader};
pub use io::IO;
