use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::rc::Rc;

use super::{Input, LineReader, ReadResult};
use crate::effect::InputError;

/// An interactive reader: shows a prompt, then reads a line.
///
/// [`ConsoleReader::new`] talks to the process's stdin and stdout;
/// [`ConsoleReader::with_io`] accepts any reader and writer.
pub struct ConsoleReader<R = BufReader<Stdin>, W = Stdout> {
    lines: LineReader<R>,
    prompt: Rc<RefCell<W>>,
}

impl<R, W> Clone for ConsoleReader<R, W> {
    fn clone(&self) -> Self {
        Self {
            lines: self.lines.clone(),
            prompt: Rc::clone(&self.prompt),
        }
    }
}

impl ConsoleReader {
    /// A reader over standard input that prompts on standard output.
    pub fn new() -> Self {
        Self::with_io(BufReader::new(io::stdin()), io::stdout())
    }
}

impl Default for ConsoleReader {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> ConsoleReader<R, W> {
    /// A reader over `input` that writes its prompts to `output`.
    pub fn with_io(input: R, output: W) -> Self {
        Self {
            lines: LineReader::new(input),
            prompt: Rc::new(RefCell::new(output)),
        }
    }

    fn show(&self, prompt: &str) -> Result<(), InputError> {
        let mut output = self.prompt.borrow_mut();
        write!(output, "{prompt} ")?;
        output.flush()?;
        Ok(())
    }

    fn rewrap<T>(&self, result: ReadResult<T, LineReader<R>>) -> ReadResult<T, Self> {
        Ok(result?.map(|(value, lines)| {
            (
                value,
                Self {
                    lines,
                    prompt: Rc::clone(&self.prompt),
                },
            )
        }))
    }
}

impl<R: BufRead, W: Write> Input for ConsoleReader<R, W> {
    fn read_string(self) -> ReadResult<String, Self> {
        let result = self.lines.clone().read_string();
        self.rewrap(result)
    }

    fn read_int(self) -> ReadResult<i64, Self> {
        let result = self.lines.clone().read_int();
        self.rewrap(result)
    }

    fn read_string_prompt(self, prompt: &str) -> ReadResult<String, Self> {
        self.show(prompt)?;
        self.read_string()
    }

    fn read_int_prompt(self, prompt: &str) -> ReadResult<i64, Self> {
        self.show(prompt)?;
        self.read_int()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    fn test_prompt_is_written_before_reading() {
        let console = ConsoleReader::with_io(Cursor::new(b"Ada\n12\n".to_vec()), Vec::new());
        let (name, console) = console.read_string_prompt("Name?").unwrap().unwrap();
        let (age, console) = console.read_int_prompt("Age?").unwrap().unwrap();
        assert_eq!((name.as_str(), age), ("Ada", 12));
        assert_eq!(console.prompt.borrow().as_slice(), b"Name? Age? ");
    }

    #[rstest]
    fn test_unprompted_reads_write_nothing() {
        let console = ConsoleReader::with_io(Cursor::new(b"x\n".to_vec()), Vec::new());
        let (_, console) = console.read_string().unwrap().unwrap();
        assert!(console.prompt.borrow().is_empty());
    }
}
