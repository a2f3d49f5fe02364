//! Lazy evaluation with memoization.
//!
//! This module provides the `Lazy<T, F>` type for lazy evaluation.
//! Values are computed only when needed and cached for subsequent accesses.
//!
//! # Examples
//!
//! ```rust
//! use lazyfp::control::Lazy;
//!
//! let lazy = Lazy::new(|| {
//!     println!("Computing...");
//!     42
//! });
//!
//! // No output yet - computation is deferred
//! println!("Created lazy value");
//!
//! // Now "Computing..." is printed
//! let value = lazy.force();
//! assert_eq!(*value, 42);
//!
//! // No recomputation - result is memoized
//! let value2 = lazy.force();
//! assert_eq!(*value2, 42);
//! ```

use std::any::Any;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use thiserror::Error;

const POISONED_MESSAGE: &str = "thunk has been poisoned";

/// Errors reported by the non-panicking accessors of [`Lazy`] and
/// [`Thunk`](super::Thunk).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThunkError {
    /// A previous evaluation panicked (or is still running further up the
    /// stack), so no value will ever be available.
    #[error("thunk has been poisoned by an earlier failed evaluation")]
    Poisoned,
    /// The evaluation function panicked while being forced.
    #[error("thunk evaluation panicked: {0}")]
    Panicked(String),
}

/// The internal state of a `Lazy` value.
///
/// This enum tracks whether the lazy value has been initialized,
/// is still pending initialization, or has been poisoned due to
/// a panic during initialization.
#[derive(Debug)]
pub enum LazyState<T, F> {
    /// The value has not been initialized yet.
    /// Contains the initialization function.
    Uninit(F),
    /// The value has been initialized.
    /// Contains the computed value.
    Init(T),
    /// The initialization function panicked, or is currently running.
    Poisoned,
}

/// A lazily evaluated value with memoization.
///
/// `Lazy<T, F>` defers computation until the value is first accessed via `force()`.
/// Once computed, the value is cached and subsequent calls to `force()` return
/// the cached value without recomputation. The initialization function is
/// dropped as soon as it has run, releasing anything it captured.
///
/// # Failure
///
/// If the initialization function panics, the panic propagates to the caller
/// of `force()` and the value is left poisoned: the function is never run a
/// second time, and every later `force()` panics as well. Use
/// [`try_force`](Lazy::try_force) to observe the failure as a [`ThunkError`].
///
/// # Thread Safety
///
/// This type is NOT thread-safe.
///
/// # Examples
///
/// ```rust
/// use lazyfp::control::Lazy;
/// use std::cell::Cell;
///
/// let call_count = Cell::new(0);
/// let lazy = Lazy::new(|| {
///     call_count.set(call_count.get() + 1);
///     42
/// });
///
/// assert_eq!(call_count.get(), 0); // Not called yet
///
/// let _ = lazy.force();
/// assert_eq!(call_count.get(), 1); // Called once
///
/// let _ = lazy.force();
/// assert_eq!(call_count.get(), 1); // Still only once - memoized
/// ```
pub struct Lazy<T, F = fn() -> T> {
    state: RefCell<LazyState<T, F>>,
}

impl<T, F: FnOnce() -> T> Lazy<T, F> {
    /// Creates a new lazy value with the given initialization function.
    ///
    /// The function will not be called until `force()` is invoked.
    #[inline]
    pub const fn new(initializer: F) -> Self {
        Self {
            state: RefCell::new(LazyState::Uninit(initializer)),
        }
    }

    /// Forces evaluation of the lazy value and returns a reference to it.
    ///
    /// # Panics
    ///
    /// - If the initialization function panics; the lazy value becomes
    ///   poisoned and all future calls to `force()` will panic.
    /// - If the value is already poisoned from a previous panic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Lazy;
    ///
    /// let lazy = Lazy::new(|| 42);
    /// assert_eq!(*lazy.force(), 42);
    /// ```
    pub fn force(&self) -> Ref<'_, T> {
        self.initialize();
        Ref::map(self.state.borrow(), |state| match state {
            LazyState::Init(value) => value,
            _ => panic!("{POISONED_MESSAGE}"),
        })
    }

    /// Forces evaluation, reporting a panicking initializer as an error
    /// instead of unwinding through the caller.
    ///
    /// # Errors
    ///
    /// - [`ThunkError::Poisoned`] if an earlier evaluation already failed.
    /// - [`ThunkError::Panicked`] if the initialization function panics now.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::{Lazy, ThunkError};
    ///
    /// let lazy: Lazy<i32, _> = Lazy::new(|| panic!("boom"));
    /// assert_eq!(lazy.try_force().err(), Some(ThunkError::Panicked("boom".to_string())));
    /// assert_eq!(lazy.try_force().err(), Some(ThunkError::Poisoned));
    /// ```
    pub fn try_force(&self) -> Result<Ref<'_, T>, ThunkError> {
        if self.is_poisoned() {
            return Err(ThunkError::Poisoned);
        }
        catch_unwind(AssertUnwindSafe(|| self.initialize()))
            .map_err(|payload| ThunkError::Panicked(panic_message(payload.as_ref())))?;
        Ok(Ref::map(self.state.borrow(), |state| match state {
            LazyState::Init(value) => value,
            _ => unreachable!("initialize returned without storing a value"),
        }))
    }

    /// Runs the initializer if it has not run yet.
    ///
    /// An initialized value is detected under a shared borrow, so `Ref`s
    /// from earlier forces may still be alive. The state moves to
    /// `Poisoned` before the initializer runs and the `RefCell` borrow is
    /// released, so the initializer may freely inspect
    /// other lazy values. A panic leaves the state `Poisoned`.
    fn initialize(&self) {
        match &*self.state.borrow() {
            LazyState::Init(_) => return,
            LazyState::Poisoned => panic!("{POISONED_MESSAGE}"),
            LazyState::Uninit(_) => {}
        }

        let initializer = {
            let mut state = self.state.borrow_mut();
            let LazyState::Uninit(initializer) =
                std::mem::replace(&mut *state, LazyState::Poisoned)
            else {
                unreachable!()
            };
            initializer
        };

        let value = initializer();
        *self.state.borrow_mut() = LazyState::Init(value);
    }

    /// Consumes the Lazy and returns the inner value, evaluating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ThunkError::Poisoned`] if an earlier evaluation panicked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Lazy;
    ///
    /// let lazy = Lazy::new(|| 42);
    /// assert_eq!(lazy.into_inner(), Ok(42));
    /// ```
    pub fn into_inner(self) -> Result<T, ThunkError> {
        match self.state.into_inner() {
            LazyState::Init(value) => Ok(value),
            LazyState::Uninit(initializer) => Ok(initializer()),
            LazyState::Poisoned => Err(ThunkError::Poisoned),
        }
    }

    fn evaluate(self) -> T {
        match self.into_inner() {
            Ok(value) => value,
            Err(_) => panic!("{POISONED_MESSAGE}"),
        }
    }
}

impl<T, F> Lazy<T, F> {
    /// Creates a lazy value that is already initialized, for any
    /// initializer type.
    #[inline]
    pub const fn evaluated(value: T) -> Self {
        Self {
            state: RefCell::new(LazyState::Init(value)),
        }
    }

    /// Returns a reference to the value if it has been initialized.
    ///
    /// Unlike `force()`, this method does not trigger initialization.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Lazy;
    ///
    /// let lazy = Lazy::new(|| 42);
    /// assert!(lazy.get().is_none());
    ///
    /// let _ = lazy.force();
    /// assert!(lazy.get().is_some());
    /// ```
    pub fn get(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.state.borrow(), |state| match state {
            LazyState::Init(value) => Some(value),
            _ => None,
        })
        .ok()
    }

    /// Returns whether the value has been initialized.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        matches!(&*self.state.borrow(), LazyState::Init(_))
    }

    /// Returns whether the lazy value has been poisoned.
    ///
    /// A lazy value becomes poisoned if the initialization function panics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Lazy;
    /// use std::panic::{AssertUnwindSafe, catch_unwind};
    ///
    /// let lazy: Lazy<i32, _> = Lazy::new(|| panic!("initialization failed"));
    /// let _ = catch_unwind(AssertUnwindSafe(|| lazy.force()));
    /// assert!(lazy.is_poisoned());
    /// ```
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        matches!(&*self.state.borrow(), LazyState::Poisoned)
    }

    /// Moves an initialized value out, leaving the cell poisoned.
    ///
    /// Used to unlink long chains of lazy values iteratively when they are
    /// dropped.
    pub(crate) fn take_initialized(&mut self) -> Option<T> {
        let state = self.state.get_mut();
        match std::mem::replace(state, LazyState::Poisoned) {
            LazyState::Init(value) => Some(value),
            other => {
                *state = other;
                None
            }
        }
    }
}

impl<T> Lazy<T, fn() -> T> {
    /// Creates a new lazy value that is already initialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Lazy;
    ///
    /// let lazy = Lazy::new_with_value(42);
    /// assert!(lazy.is_initialized());
    /// ```
    #[inline]
    pub const fn new_with_value(value: T) -> Self {
        Self::evaluated(value)
    }

    /// Lifts a value into the Lazy context. Equivalent to `new_with_value`.
    #[inline]
    pub const fn pure(value: T) -> Self {
        Self::new_with_value(value)
    }
}

// =============================================================================
// Functor-like Operations (map, flat_map, zip_with)
// =============================================================================

impl<T, F: FnOnce() -> T> Lazy<T, F> {
    /// Applies a function to the lazy value, producing a new lazy value.
    ///
    /// Neither the original initializer nor `function` runs until the result
    /// is forced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Lazy;
    ///
    /// let doubled = Lazy::new(|| 21).map(|x| x * 2);
    /// assert_eq!(*doubled.force(), 42);
    /// ```
    pub fn map<U, G>(self, function: G) -> Lazy<U, impl FnOnce() -> U>
    where
        G: FnOnce(T) -> U,
    {
        Lazy::new(move || function(self.evaluate()))
    }

    /// Applies a function that returns a Lazy, then flattens the result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Lazy;
    ///
    /// let result = Lazy::new(|| 21).flat_map(|x| Lazy::new(move || x * 2));
    /// assert_eq!(*result.force(), 42);
    /// ```
    pub fn flat_map<U, FunctionResult, G>(self, function: G) -> Lazy<U, impl FnOnce() -> U>
    where
        FunctionResult: FnOnce() -> U,
        G: FnOnce(T) -> Lazy<U, FunctionResult>,
    {
        Lazy::new(move || function(self.evaluate()).evaluate())
    }

    /// Combines two lazy values using a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyfp::control::Lazy;
    ///
    /// let sum = Lazy::new(|| 20).zip_with(Lazy::new(|| 22), |a, b| a + b);
    /// assert_eq!(*sum.force(), 42);
    /// ```
    pub fn zip_with<U, V, OtherFunction, CombineFunction>(
        self,
        other: Lazy<U, OtherFunction>,
        function: CombineFunction,
    ) -> Lazy<V, impl FnOnce() -> V>
    where
        OtherFunction: FnOnce() -> U,
        CombineFunction: FnOnce(T, U) -> V,
    {
        Lazy::new(move || function(self.evaluate(), other.evaluate()))
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unknown panic".to_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T: Default> Default for Lazy<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Lazy<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        match &*state {
            LazyState::Init(value) => formatter.debug_tuple("Lazy").field(value).finish(),
            LazyState::Uninit(_) => formatter.debug_tuple("Lazy").field(&"<uninit>").finish(),
            LazyState::Poisoned => formatter.debug_tuple("Lazy").field(&"<poisoned>").finish(),
        }
    }
}

// Deref is not implemented: force() hands out a Ref<'_, T>, and forcing
// should stay visible at the call site.
