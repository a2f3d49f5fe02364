//! Deferred console actions.
//!
//! An [`IO`] value describes an effect without performing it. Building,
//! mapping and sequencing actions is pure; only `run_unsafe` executes, and
//! it consumes the action, so each description runs at most once.
//!
//! # Examples
//!
//! ```rust
//! use lazyfp::effect::IO;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let executed = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&executed);
//! let io = IO::new(move || {
//!     flag.set(true);
//!     10
//! })
//! .fmap(|x| x * 2)
//! .flat_map(|x| IO::pure(x + 1));
//!
//! assert!(!executed.get());
//! assert_eq!(io.run_unsafe(), 21);
//! assert!(executed.get());
//! ```

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::ops::Add;

use super::InputError;

/// A deferred action producing an `A`.
///
/// `IO` is single-shot: `run_unsafe` takes `self`. It is not `Send`, since
/// actions commonly capture `Rc` state such as a shared reader.
///
/// `pure` and `flat_map` obey the monad laws when observed through
/// `run_unsafe`:
///
/// 1. `IO::pure(a).flat_map(f)` runs like `f(a)`
/// 2. `m.flat_map(IO::pure)` runs like `m`
/// 3. `m.flat_map(f).flat_map(g)` runs like `m.flat_map(|x| f(x).flat_map(g))`
pub struct IO<A> {
    action: Box<dyn FnOnce() -> A>,
}

impl<A: 'static> IO<A> {
    /// Wraps a closure without running it.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() -> A + 'static,
    {
        Self {
            action: Box::new(action),
        }
    }

    /// An action that performs no effect and yields `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::effect::IO;
    ///
    /// assert_eq!(IO::pure(42).run_unsafe(), 42);
    /// ```
    pub fn pure(value: A) -> Self {
        Self::new(move || value)
    }

    /// Performs the action. Call this at the edge of the program, e.g. in
    /// `main`.
    pub fn run_unsafe(self) -> A {
        (self.action)()
    }

    /// Transforms the result once the action has run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::effect::IO;
    ///
    /// let io = IO::pure(21).fmap(|x| x * 2);
    /// assert_eq!(io.run_unsafe(), 42);
    /// ```
    pub fn fmap<B, F>(self, function: F) -> IO<B>
    where
        F: FnOnce(A) -> B + 'static,
        B: 'static,
    {
        IO::new(move || function(self.run_unsafe()))
    }

    /// Runs this action, feeds its result to `function` and runs the action
    /// that comes back.
    pub fn flat_map<B, F>(self, function: F) -> IO<B>
    where
        F: FnOnce(A) -> IO<B> + 'static,
        B: 'static,
    {
        IO::new(move || function(self.run_unsafe()).run_unsafe())
    }

    /// Alias for [`flat_map`](IO::flat_map).
    pub fn and_then<B, F>(self, function: F) -> IO<B>
    where
        F: FnOnce(A) -> IO<B> + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Runs this action for its effect, then `next`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::effect::IO;
    ///
    /// let io = IO::pure(10).then(IO::pure(20));
    /// assert_eq!(io.run_unsafe(), 20);
    /// ```
    pub fn then<B>(self, next: IO<B>) -> IO<B>
    where
        B: 'static,
    {
        self.flat_map(move |_| next)
    }

    /// Runs both actions in order and combines their results.
    pub fn map2<B, C, F>(self, other: IO<B>, function: F) -> IO<C>
    where
        F: FnOnce(A, B) -> C + 'static,
        B: 'static,
        C: 'static,
    {
        self.flat_map(move |a| other.fmap(move |b| function(a, b)))
    }

    /// Runs both actions in order and pairs their results.
    pub fn product<B>(self, other: IO<B>) -> IO<(A, B)>
    where
        B: 'static,
    {
        self.map2(other, |a, b| (a, b))
    }
}

// =============================================================================
// Console Actions
// =============================================================================

impl IO<()> {
    /// An action that does nothing.
    ///
    /// This is the identity for `+`, which makes it the natural seed when
    /// folding a collection of actions into one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::effect::IO;
    ///
    /// let greetings = ["a", "b"]
    ///     .into_iter()
    ///     .fold(IO::empty(), |io, name| io + IO::new(move || assert!(!name.is_empty())));
    /// greetings.run_unsafe();
    /// ```
    pub fn empty() -> Self {
        Self::pure(())
    }

    /// Creates an IO action that prints a line to standard output.
    ///
    /// The output is not printed until `run_unsafe` is called.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use lazyfp::effect::IO;
    ///
    /// let io = IO::print_line("Hello, World!");
    /// io.run_unsafe(); // Prints "Hello, World!"
    /// ```
    pub fn print_line<S: Display + 'static>(message: S) -> Self {
        Self::new(move || {
            println!("{message}");
        })
    }
}

impl IO<io::Result<()>> {
    /// Like [`print_line`](IO::print_line) without the trailing newline.
    /// Standard output is flushed so the text shows up before a prompt.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use lazyfp::effect::IO;
    ///
    /// IO::print("Name? ").run_unsafe().expect("stdout is writable");
    /// ```
    pub fn print<S: Display + 'static>(message: S) -> Self {
        Self::new(move || {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{message}")?;
            stdout.flush()
        })
    }
}

impl IO<Result<String, InputError>> {
    /// Creates an IO action that reads a line from standard input, without
    /// its line terminator.
    ///
    /// The input is not read until `run_unsafe` is called.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use lazyfp::effect::IO;
    ///
    /// match IO::read_line().run_unsafe() {
    ///     Ok(line) => println!("You entered: {line}"),
    ///     Err(error) => eprintln!("{error}"),
    /// }
    /// ```
    pub fn read_line() -> Self {
        Self::new(|| {
            let mut buffer = String::new();
            io::stdin().lock().read_line(&mut buffer)?;
            let trimmed = buffer.trim_end_matches(['\n', '\r']).len();
            buffer.truncate(trimmed);
            Ok(buffer)
        })
    }
}

/// Sequences two unit actions: `first + second` runs `first`, then `second`.
impl Add for IO<()> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        self.then(other)
    }
}
