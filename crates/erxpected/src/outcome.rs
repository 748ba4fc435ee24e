// Outcome container
// Holds exactly one of a value or a classified error

use std::fmt;

use crate::classified::{ClassifiedError, Unclassified};
use crate::config::{self, UnwrapPolicy};
use crate::kind::ErrorKind;

/// The value-or-error result of a fallible operation.
///
/// `Outcome<()>` is the value-less form: its success state is `Value(())`.
/// Cloning deep-copies the stored error, so two outcomes never share error
/// storage.
#[must_use = "this `Outcome` may hold an error, which should be handled"]
#[derive(Clone)]
pub enum Outcome<T = ()> {
    /// Success carrying a value
    Value(T),
    /// Failure carrying a classified error
    Error(ClassifiedError),
}

impl<T> Outcome<T> {
    /// A successful outcome holding `value`
    pub fn success(value: T) -> Self {
        Outcome::Value(value)
    }

    /// A failed outcome holding a kind from the hierarchy
    pub fn failure<K: ErrorKind>(kind: K) -> Self {
        Self::traced(ClassifiedError::new(kind))
    }

    /// A failed outcome holding a value outside the hierarchy.
    ///
    /// Only [`Unclassified`] values are accepted, so a hierarchy kind cannot
    /// reach this path and lose its ancestors:
    ///
    /// ```compile_fail
    /// use erxpected::{Outcome, ZeroDivisionError};
    ///
    /// let _ = Outcome::<i32>::failure_unclassified(ZeroDivisionError::new("div by 0"));
    /// ```
    pub fn failure_unclassified<E>(error: Unclassified<E>) -> Self
    where
        E: fmt::Display + fmt::Debug + Clone + Send + Sync + 'static,
    {
        Self::traced(ClassifiedError::unclassified(error))
    }

    /// Re-host an already classified error
    pub fn from_error(error: ClassifiedError) -> Self {
        Outcome::Error(error)
    }

    fn traced(error: ClassifiedError) -> Self {
        if config::current().trace_failures {
            tracing::debug!(kind = error.kind_name(), error = %error, "outcome failed");
        }
        Outcome::Error(error)
    }

    pub fn has_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    pub fn has_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    /// Whether the operation succeeded; mainly useful for `Outcome<()>`
    pub fn is_succeeded(&self) -> bool {
        !self.has_error()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Value(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ClassifiedError> {
        match self {
            Outcome::Value(_) => None,
            Outcome::Error(error) => Some(error),
        }
    }

    /// Rendered error text, if this outcome failed
    pub fn what(&self) -> Option<String> {
        self.error().map(ClassifiedError::what)
    }

    /// Returns a copy of the value, leaving the outcome usable.
    ///
    /// # Panics
    ///
    /// Calling this on a failed outcome is a fatal contract violation. With the
    /// default [`UnwrapPolicy::Panic`] it panics with the rendered error; with
    /// [`UnwrapPolicy::Abort`] the process is aborted.
    #[track_caller]
    pub fn unwrap(&self) -> T
    where
        T: Clone,
    {
        match self {
            Outcome::Value(value) => value.clone(),
            Outcome::Error(error) => fatal(error),
        }
    }

    /// Consuming form of [`unwrap`](Self::unwrap), with the same failure behavior.
    #[track_caller]
    pub fn into_value(self) -> T {
        match self {
            Outcome::Value(value) => value,
            Outcome::Error(error) => fatal(&error),
        }
    }

    /// The value, or `default` when the outcome failed
    pub fn value_or(&self, default: T) -> T
    where
        T: Clone,
    {
        match self {
            Outcome::Value(value) => value.clone(),
            Outcome::Error(_) => default,
        }
    }

    /// The stored error, only if its concrete type is exactly `E`.
    pub fn get_exact<E: 'static>(&self) -> Option<&E> {
        self.error()?.get_exact::<E>()
    }

    /// The stored error viewed as `K`, if `K` is its kind or an ancestor of it.
    pub fn catch_as<K: ErrorKind>(&self) -> Option<&K> {
        self.error()?.catch_as::<K>()
    }

    /// Converts into a std `Result`, so `?` can consume the outcome.
    pub fn into_result(self) -> Result<T, ClassifiedError> {
        match self {
            Outcome::Value(value) => Ok(value),
            Outcome::Error(error) => {
                tracing::trace!(kind = error.kind_name(), "short-circuiting on failed outcome");
                Err(error)
            }
        }
    }

    pub fn from_result(result: Result<T, ClassifiedError>) -> Self {
        match result {
            Ok(value) => Outcome::Value(value),
            Err(error) => Outcome::Error(error),
        }
    }

    /// Borrow the value, or clone the error out for re-propagation.
    ///
    /// Lets a caller inspect a failed outcome and still pass it upward
    /// unchanged with `?`.
    pub fn rethrow(&self) -> Result<&T, ClassifiedError> {
        match self {
            Outcome::Value(value) => Ok(value),
            Outcome::Error(error) => {
                tracing::trace!(kind = error.kind_name(), "rethrowing inspected failure");
                Err(error.clone())
            }
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Value(value) => Outcome::Value(f(value)),
            Outcome::Error(error) => Outcome::Error(error),
        }
    }

    /// Chains a dependent fallible step; `f` only runs on success.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Value(value) => f(value),
            Outcome::Error(error) => {
                tracing::trace!(kind = error.kind_name(), "short-circuiting on failed outcome");
                Outcome::Error(error)
            }
        }
    }
}

impl Outcome<()> {
    /// A value-less success
    pub fn done() -> Self {
        Outcome::Value(())
    }
}

impl<T> From<T> for Outcome<T> {
    fn from(value: T) -> Self {
        Outcome::Value(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Outcome::Error(error) => f.debug_tuple("Error").field(error).finish(),
        }
    }
}

#[track_caller]
fn fatal(error: &ClassifiedError) -> ! {
    let what = error.what();
    match config::current().unwrap_policy {
        UnwrapPolicy::Panic => panic!("called unwrap on a failed outcome: {}", what),
        UnwrapPolicy::Abort => {
            tracing::error!(kind = error.kind_name(), error = %what, "unwrap on a failed outcome");
            eprintln!("called unwrap on a failed outcome: {}", what);
            std::process::abort()
        }
    }
}
