use std::cell::RefCell;
use std::fmt;
use std::io::BufRead;
use std::rc::Rc;

use tracing::{debug, warn};

use super::{Input, ReadResult};
use crate::effect::InputError;

/// Reads entries line by line from any buffered source.
///
/// An empty line or the end of the source ends the input. Clones share the
/// underlying reader, so the "next" reader returned from a read is the same
/// handle positioned after the consumed line.
pub struct LineReader<R> {
    source: Rc<RefCell<R>>,
}

impl<R> Clone for LineReader<R> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
        }
    }
}

impl<R> fmt::Debug for LineReader<R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("LineReader").finish_non_exhaustive()
    }
}

impl<R: BufRead> LineReader<R> {
    /// Wraps a buffered source.
    pub fn new(source: R) -> Self {
        Self {
            source: Rc::new(RefCell::new(source)),
        }
    }

    /// Reads one line without its terminator; `None` at the end of input.
    fn next_line(&self) -> Result<Option<String>, InputError> {
        let mut buffer = String::new();
        self.source.borrow_mut().read_line(&mut buffer)?;
        let line = buffer.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            debug!("end of input");
            return Ok(None);
        }
        debug!(line, "read line");
        Ok(Some(line.to_owned()))
    }
}

impl<R: BufRead> Input for LineReader<R> {
    fn read_string(self) -> ReadResult<String, Self> {
        Ok(self.next_line()?.map(|line| (line, self)))
    }

    fn read_int(self) -> ReadResult<i64, Self> {
        match self.next_line()? {
            Some(line) => Ok(Some((parse_int(&line)?, self))),
            None => Ok(None),
        }
    }
}

/// Parses a whole entry, surrounding whitespace aside, as an `i64`.
pub(super) fn parse_int(text: &str) -> Result<i64, InputError> {
    let trimmed = text.trim();
    trimmed.parse().map_err(|source| {
        warn!(input = trimmed, %source, "entry is not an integer");
        InputError::Parse {
            input: trimmed.to_owned(),
            source,
        }
    })
}
