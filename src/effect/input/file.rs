use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::{Input, LineReader, ReadResult};
use crate::effect::InputError;

/// Reads entries line by line from a file. The file is closed when the
/// last clone of the reader is dropped.
#[derive(Clone, Debug)]
pub struct FileReader {
    lines: LineReader<BufReader<File>>,
}

impl FileReader {
    /// Opens `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| InputError::Open {
            path: path.to_path_buf(),
            source: Arc::new(source),
        })?;
        debug!(path = %path.display(), "opened input file");
        Ok(Self {
            lines: LineReader::new(BufReader::new(file)),
        })
    }

    fn rewrap<T>(result: ReadResult<T, LineReader<BufReader<File>>>) -> ReadResult<T, Self> {
        Ok(result?.map(|(value, lines)| (value, Self { lines })))
    }
}

impl Input for FileReader {
    fn read_string(self) -> ReadResult<String, Self> {
        Self::rewrap(self.lines.read_string())
    }

    fn read_int(self) -> ReadResult<i64, Self> {
        Self::rewrap(self.lines.read_int())
    }
}
