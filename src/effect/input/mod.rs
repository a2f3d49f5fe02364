//! Typed line readers that drive [`Stream::unfold`](crate::stream::Stream::unfold).
//!
//! An [`Input`] is consumed by each read and hands back the reader to use
//! next, which is exactly the shape of an `unfold` generator state:
//!
//! ```rust
//! use lazyfp::effect::{Input, ScriptReader};
//! use lazyfp::stream::Stream;
//!
//! let script: ScriptReader = ["3", "1", "4", "-1"].into_iter().collect();
//! let numbers = Stream::unfold(script, |reader| reader.read_int().ok().flatten());
//! assert_eq!(numbers.iter().collect::<Vec<_>>(), vec![3, 1, 4]);
//! ```

mod console;
mod file;
mod reader;
mod script;

pub use console::ConsoleReader;
pub use file::FileReader;
pub use reader::LineReader;
pub use script::ScriptReader;

use super::InputError;

/// The outcome of a single read.
///
/// - `Ok(Some((value, next)))`: a value, and the reader for the next read
/// - `Ok(None)`: the source has no more values
/// - `Err(error)`: the read failed
pub type ReadResult<T, I> = Result<Option<(T, I)>, InputError>;

/// A source of strings and integers, read one entry at a time.
pub trait Input: Sized {
    /// Reads the next entry as a string.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] when the underlying source fails.
    fn read_string(self) -> ReadResult<String, Self>;

    /// Reads the next entry as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Parse`] when the entry is not an integer, or
    /// another [`InputError`] when the underlying source fails.
    fn read_int(self) -> ReadResult<i64, Self>;

    /// Reads a string after showing `prompt`. Sources without a user to
    /// prompt ignore it.
    ///
    /// # Errors
    ///
    /// See [`read_string`](Input::read_string).
    fn read_string_prompt(self, _prompt: &str) -> ReadResult<String, Self> {
        self.read_string()
    }

    /// Reads an integer after showing `prompt`. Sources without a user to
    /// prompt ignore it.
    ///
    /// # Errors
    ///
    /// See [`read_int`](Input::read_int).
    fn read_int_prompt(self, _prompt: &str) -> ReadResult<i64, Self> {
        self.read_int()
    }
}
