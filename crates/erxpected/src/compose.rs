//! Sequential composition of fallible operations.
//!
//! A composed operation consumes the outcomes of its sub-operations in the
//! order they are written. The first failure ends the operation: the error is
//! re-hosted unchanged as the operation's own outcome and nothing after it is
//! evaluated. There is no scheduling involved; consuming an outcome is an
//! early return on error.
//!
//! Three equivalent spellings are offered:
//!
//! * [`fallible`] with the `?` operator on [`Outcome::into_result`],
//! * the [`consume!`](crate::consume) macro inside functions returning `Outcome`,
//! * closure chaining with [`Outcome::and_then`].
//!
//! ```
//! use erxpected::{fallible, MathError, Outcome, ZeroDivisionError};
//!
//! fn divide(a: i32, b: i32) -> Outcome<i32> {
//!     if b == 0 {
//!         return Outcome::failure(ZeroDivisionError::new("div by 0"));
//!     }
//!     Outcome::success(a / b)
//! }
//!
//! let outcome = fallible(|| {
//!     let a = divide(6, 0).into_result()?;
//!     let b = divide(4, 2).into_result()?;
//!     Ok(a + b)
//! });
//!
//! assert!(outcome.catch_as::<MathError>().is_some());
//! ```

use crate::classified::ClassifiedError;
use crate::outcome::Outcome;

/// Runs a body that consumes sub-outcomes with `?` and hosts its result.
pub fn fallible<T, F>(body: F) -> Outcome<T>
where
    F: FnOnce() -> Result<T, ClassifiedError>,
{
    Outcome::from_result(body())
}

/// Runs `steps` in order, stopping at the first failure.
///
/// On success the values are returned in step order.
pub fn sequence<T, I>(steps: I) -> Outcome<Vec<T>>
where
    I: IntoIterator,
    I::Item: FnOnce() -> Outcome<T>,
{
    fallible(|| {
        steps
            .into_iter()
            .map(|step| step().into_result())
            .collect::<Result<Vec<T>, ClassifiedError>>()
    })
}
