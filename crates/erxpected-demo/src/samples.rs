// Sample fallible operations
// Small call sites that exercise composition, inspection and ordered catching

use erxpected::prelude::*;

pub fn ok() -> Outcome<i32> {
    Outcome::success(1)
}

pub fn fail() -> Outcome<i32> {
    Outcome::failure(MathError::new("m. err"))
}

/// Consumes a failing step before a succeeding one; the second never runs.
pub fn maybe_a() -> Outcome<i32> {
    let a = consume!(fail());
    let b = consume!(ok());
    Outcome::success(a + b)
}

pub fn maybe_b() -> Outcome<i32> {
    fallible(|| {
        Ok(ok().into_result()?
            + ok().into_result()?
            + maybe_a().into_result()?
            + ok().into_result()?)
    })
}

/// Inspects a failed sub-outcome, then passes it upward unchanged.
pub fn inspect_then_rethrow() -> Outcome<i32> {
    rethrow_after_inspect(maybe_a)
}

fn rethrow_after_inspect(third_step: impl FnOnce() -> Outcome<i32>) -> Outcome<i32> {
    fallible(|| {
        let first = ok().into_result()?;
        let second = ok().into_result()?;
        let third = third_step();
        if third.has_error() {
            tracing::warn!(error = ?third.what(), "sub-operation failed, rethrowing");
            third.rethrow()?;
        }
        // consumed for its failure only; the value is not part of the sum
        ok().into_result()?;
        Ok(first + second + *third.rethrow()?)
    })
}

pub fn monadic_ok() -> Outcome<i32> {
    fallible(|| {
        let first = ok().into_result()?;
        let second = ok().into_result()?;
        Ok(first + second)
    })
}

/// Recovers `maybe_b` with a math handler ahead of a catch-all.
pub fn recovered() -> Outcome<i32> {
    attempt(maybe_b)
        .catch(|err: &MathError| {
            tracing::info!(error = %err, "recovering math failure");
            12
        })
        .catch(|_: &RuntimeError| 13)
        .finish()
}

pub fn divide(a: i32, b: i32) -> Outcome<i32> {
    ensure!(b != 0, ZeroDivisionError::new("div by 0"));
    Outcome::success(a / b)
}

pub fn parse_positive(text: &str) -> Outcome<i32> {
    let value: i32 = match text.trim().parse() {
        Ok(value) => value,
        Err(_) => fail!(ValueError::new(format!("not a number: {:?}", text))),
    };
    ensure!(value > 0, ValueError::new(format!("not positive: {}", value)));
    Outcome::success(value)
}
