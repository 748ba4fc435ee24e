// Ordered catch combinator
// Recovers a failed outcome with the first handler whose kind is a base of the
// error. Handlers are tried strictly in the order given.

use crate::classified::ClassifiedError;
use crate::identity::{identity_of, TypeKey};
use crate::kind::ErrorKind;
use crate::outcome::Outcome;

/// A typed recovery handler with its kind erased.
pub struct Handler<'a, T> {
    key: TypeKey,
    kind_name: &'static str,
    run: Box<dyn FnOnce(&ClassifiedError) -> Outcome<T> + 'a>,
}

impl<'a, T: 'a> Handler<'a, T> {
    /// Wrap a handler for errors that can be caught as `K`.
    ///
    /// The handler may return a plain `T` or a new `Outcome<T>`.
    pub fn new<K, F, R>(handler: F) -> Self
    where
        K: ErrorKind,
        F: FnOnce(&K) -> R + 'a,
        R: Into<Outcome<T>> + 'a,
    {
        Self {
            key: identity_of::<K>(),
            kind_name: K::NAME,
            run: Box::new(move |error: &ClassifiedError| -> Outcome<T> {
                match error.catch_as::<K>() {
                    Some(kind) => handler(kind).into(),
                    None => Outcome::from_error(error.clone()),
                }
            }),
        }
    }

    /// Whether this handler accepts `error`
    pub fn matches(&self, error: &ClassifiedError) -> bool {
        error.base_ids().contains(&self.key)
    }

    /// Declared name of the kind this handler catches
    pub fn kind_name(&self) -> &'static str {
        self.kind_name
    }
}

/// Runs `try_fn` once and, on failure, hands the error to the first matching
/// handler in declaration order.
///
/// A successful outcome is returned untouched. If no handler matches, the
/// original failure is returned with its classification intact.
pub fn try_catch<'a, T, F, I>(try_fn: F, handlers: I) -> Outcome<T>
where
    T: 'a,
    F: FnOnce() -> Outcome<T>,
    I: IntoIterator<Item = Handler<'a, T>>,
{
    let error = match try_fn() {
        Outcome::Value(value) => return Outcome::Value(value),
        Outcome::Error(error) => error,
    };

    for handler in handlers {
        if handler.matches(&error) {
            tracing::debug!(
                error = %error,
                handler = handler.kind_name,
                "recovering failed outcome"
            );
            return (handler.run)(&error);
        }
    }

    tracing::debug!(error = %error, "no handler matched failed outcome");
    Outcome::Error(error)
}

/// Starts a fluent try/catch chain around `try_fn`.
///
/// ```
/// use erxpected::{attempt, MathError, Outcome, RuntimeError};
///
/// let recovered = attempt(|| Outcome::<i32>::failure(MathError::new("nan")))
///     .catch(|_: &MathError| 12)
///     .catch(|_: &RuntimeError| 13)
///     .finish();
///
/// assert_eq!(recovered.value(), Some(&12));
/// ```
pub fn attempt<'a, T, F>(try_fn: F) -> Attempt<'a, T, F>
where
    F: FnOnce() -> Outcome<T>,
{
    Attempt {
        try_fn,
        handlers: Vec::new(),
    }
}

/// Builder returned by [`attempt`]
#[must_use = "call `finish` to run the attempt"]
pub struct Attempt<'a, T, F> {
    try_fn: F,
    handlers: Vec<Handler<'a, T>>,
}

impl<'a, T: 'a, F> Attempt<'a, T, F>
where
    F: FnOnce() -> Outcome<T>,
{
    /// Append a handler for errors that can be caught as `K`
    pub fn catch<K, H, R>(mut self, handler: H) -> Self
    where
        K: ErrorKind,
        H: FnOnce(&K) -> R + 'a,
        R: Into<Outcome<T>> + 'a,
    {
        self.handlers.push(Handler::new::<K, H, R>(handler));
        self
    }

    /// Run the attempt and its handlers
    pub fn finish(self) -> Outcome<T> {
        try_catch(self.try_fn, self.handlers)
    }
}
