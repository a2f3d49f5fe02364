use tracing::debug;

use super::reader::parse_int;
use super::{Input, ReadResult};
use crate::effect::InputError;
use crate::persistent::PersistentList;

/// Replays a fixed list of entries.
///
/// Reading past the last entry is an error ([`InputError::ScriptExhausted`]),
/// so a script must say explicitly where a sequence of integers ends: a
/// negative integer ends the input.
///
/// # Examples
///
/// ```rust
/// use lazyfp::effect::{Input, InputError, ScriptReader};
///
/// let script = ScriptReader::from_iter(["7", "-1"]);
/// let (value, script) = script.read_int().unwrap().unwrap();
/// assert_eq!(value, 7);
/// let script = match script.read_int() {
///     Ok(None) => ScriptReader::default(),
///     other => panic!("unexpected {other:?}"),
/// };
/// assert_eq!(script.read_string().unwrap_err(), InputError::ScriptExhausted);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptReader {
    commands: PersistentList<String>,
}

impl ScriptReader {
    /// A reader over `commands`, first entry first.
    pub const fn new(commands: PersistentList<String>) -> Self {
        Self { commands }
    }

    /// The number of entries not yet read.
    pub const fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl<S: Into<String>> FromIterator<S> for ScriptReader {
    fn from_iter<I: IntoIterator<Item = S>>(iterable: I) -> Self {
        Self::new(iterable.into_iter().map(Into::into).collect())
    }
}

impl Input for ScriptReader {
    fn read_string(self) -> ReadResult<String, Self> {
        let (command, rest) = self.commands.uncons().ok_or(InputError::ScriptExhausted)?;
        Ok(Some((command.clone(), Self::new(rest))))
    }

    fn read_int(self) -> ReadResult<i64, Self> {
        let (command, rest) = self.commands.uncons().ok_or(InputError::ScriptExhausted)?;
        let value = parse_int(command)?;
        if value < 0 {
            debug!(value, "negative entry ends the script");
            return Ok(None);
        }
        Ok(Some((value, Self::new(rest))))
    }
}
