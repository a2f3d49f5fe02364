//! Error types for the input readers.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// A failure while reading from an [`Input`](super::Input) source.
///
/// End-of-input is *not* an error: readers report it as `Ok(None)`.
///
/// I/O errors are held behind an `Arc` so that the error stays `Clone`,
/// which lets a failure travel through a [`Stream`](crate::stream::Stream)
/// as an element.
///
/// # Examples
///
/// ```rust
/// use lazyfp::effect::InputError;
///
/// let error = InputError::ScriptExhausted;
/// assert_eq!(error.to_string(), "not enough entries in script");
/// ```
#[derive(Debug, Clone, Error)]
pub enum InputError {
    /// The source file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// Reading a line failed.
    #[error("read failed: {0}")]
    Io(#[source] Arc<io::Error>),

    /// A line could not be parsed as an integer.
    #[error("invalid integer {input:?}: {source}")]
    Parse {
        /// The offending text, trimmed.
        input: String,
        /// The parse failure.
        #[source]
        source: ParseIntError,
    },

    /// A scripted reader was asked for more entries than it holds.
    #[error("not enough entries in script")]
    ScriptExhausted,
}

impl From<io::Error> for InputError {
    fn from(error: io::Error) -> Self {
        Self::Io(Arc::new(error))
    }
}

impl PartialEq for InputError {
    /// Compares variants and their textual payloads. I/O errors compare by
    /// kind, since `io::Error` has no equality of its own.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Open { path, source },
                Self::Open {
                    path: other_path,
                    source: other_source,
                },
            ) => path == other_path && source.kind() == other_source.kind(),
            (Self::Io(source), Self::Io(other_source)) => source.kind() == other_source.kind(),
            (
                Self::Parse { input, source },
                Self::Parse {
                    input: other_input,
                    source: other_source,
                },
            ) => input == other_input && source == other_source,
            (Self::ScriptExhausted, Self::ScriptExhausted) => true,
            _ => false,
        }
    }
}
