// Erxpected outcome library
// Value-or-error outcomes whose errors are classified into a kind hierarchy

//! Outcomes that hold either a value or a classified error.
//!
//! Errors are organised into kinds deriving from [`RuntimeError`]. A failed
//! [`Outcome`] remembers every kind its error derives from, so callers can
//! catch it by a base kind with [`Outcome::catch_as`] or by its exact kind with
//! [`Outcome::get_exact`]. Fallible operations compose with `?` inside
//! [`fallible`] or with [`consume!`], stopping at the first failure, and
//! [`try_catch`] / [`attempt`] recover failures with ordered typed handlers.
//!
//! ```
//! use erxpected::prelude::*;
//!
//! fn divide(a: i32, b: i32) -> Outcome<i32> {
//!     ensure!(b != 0, ZeroDivisionError::new("div by 0"));
//!     Outcome::success(a / b)
//! }
//!
//! fn average(total: i32, count: i32) -> Outcome<i32> {
//!     let mean = consume!(divide(total, count));
//!     Outcome::success(mean)
//! }
//!
//! let failed = average(10, 0);
//! let math = failed.catch_as::<MathError>().unwrap();
//! assert_eq!(math.what(), "ZeroDivisionError: div by 0");
//! assert!(failed.catch_as::<ValueError>().is_none());
//!
//! let recovered = attempt(|| average(10, 0))
//!     .catch(|_: &ValueError| -1)
//!     .catch(|_: &MathError| 0)
//!     .finish();
//! assert_eq!(recovered.unwrap(), 0);
//! ```

#[macro_use]
mod macros;

pub mod catch;
pub mod classified;
pub mod compose;
pub mod config;
pub mod identity;
pub mod kind;
pub mod kinds;
pub mod outcome;

pub use catch::{attempt, try_catch, Attempt, Handler};
pub use classified::{ClassifiedError, Unclassified};
pub use compose::{fallible, sequence};
pub use config::{Config, ConfigError, ConfigResult, UnwrapPolicy};
pub use identity::{identity_of, type_name_of, TypeKey};
pub use kind::{ErrorKind, RuntimeError};
pub use kinds::{MathError, ValueError, ZeroDivisionError};
pub use outcome::Outcome;

/// Commonly used items
pub mod prelude {
    pub use crate::{
        attempt, consume, declare_error_kind, ensure, fail, fallible, try_catch, ClassifiedError,
        ErrorKind, Handler, MathError, Outcome, RuntimeError, Unclassified, ValueError,
        ZeroDivisionError,
    };
}
