// Outcome macros
// Kind declaration plus early-return helpers for functions returning Outcome

/// Declare one or more error kinds deriving from a parent kind.
///
/// ```
/// use erxpected::{declare_error_kind, ErrorKind, MathError};
///
/// declare_error_kind! {
///     /// Raised when a value leaves its allowed range.
///     pub struct OverflowError: MathError;
///     pub struct NanError: MathError as "NotANumber";
/// }
///
/// assert_eq!(OverflowError::new("u8").what(), "OverflowError: u8");
/// assert_eq!(NanError::bare().what(), "NotANumber");
/// ```
#[macro_export]
macro_rules! declare_error_kind {
    (@name $name:ident) => {
        stringify!($name)
    };
    (@name $name:ident $display:literal) => {
        $display
    };
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $parent:ty $(as $display:literal)?;
    )+) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name($parent);

        impl $name {
            /// Create the error with a message
            pub fn new(message: impl Into<String>) -> Self {
                <Self as $crate::ErrorKind>::from_parts(
                    <Self as $crate::ErrorKind>::NAME,
                    Some(message.into()),
                )
            }

            /// Create the error without a message
            pub fn bare() -> Self {
                <Self as $crate::ErrorKind>::from_parts(<Self as $crate::ErrorKind>::NAME, None)
            }

            /// This error viewed as its parent kind
            pub fn parent(&self) -> &$parent {
                &self.0
            }
        }

        impl $crate::ErrorKind for $name {
            const NAME: &'static str = $crate::declare_error_kind!(@name $name $($display)?);

            fn from_parts(kind_name: &'static str, message: Option<String>) -> Self {
                Self(<$parent as $crate::ErrorKind>::from_parts(kind_name, message))
            }

            fn root(&self) -> &$crate::RuntimeError {
                $crate::ErrorKind::root(&self.0)
            }

            fn ancestor_ids() -> ::std::collections::BTreeSet<$crate::TypeKey> {
                <$parent as $crate::ErrorKind>::base_ids()
            }

            fn view(&self, key: $crate::TypeKey) -> Option<&dyn ::std::any::Any> {
                if key == $crate::identity_of::<Self>() {
                    Some(self as &dyn ::std::any::Any)
                } else {
                    $crate::ErrorKind::view(&self.0, key)
                }
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $parent;

            fn deref(&self) -> &$parent {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::ErrorKind::what(self))
            }
        }

        impl ::std::error::Error for $name {}
    )+};
}

/// Consume an outcome inside a function returning `Outcome`.
///
/// Evaluates to the value on success; on failure the enclosing function returns
/// the error immediately and nothing after this point runs.
#[macro_export]
macro_rules! consume {
    ($outcome:expr) => {
        match $crate::Outcome::into_result($outcome) {
            Ok(value) => value,
            Err(error) => return $crate::Outcome::from_error(error),
        }
    };
}

/// Return early with a classified failure
#[macro_export]
macro_rules! fail {
    ($kind:expr) => {
        return $crate::Outcome::failure($kind)
    };
}

/// Return early with a classified failure if a condition is not satisfied
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:expr) => {
        if !($cond) {
            return $crate::Outcome::failure($kind);
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{MathError, Outcome, ValueError, ZeroDivisionError};
    use std::cell::Cell;

    fn divide(a: i32, b: i32) -> Outcome<i32> {
        ensure!(b != 0, ZeroDivisionError::new("div by 0"));
        Outcome::success(a / b)
    }

    fn checked_sum(values: &[i32]) -> Outcome<i32> {
        if values.is_empty() {
            fail!(ValueError::new("empty input"));
        }
        Outcome::success(values.iter().sum())
    }

    #[test]
    fn test_consume_unwraps_success() {
        fn run() -> Outcome<i32> {
            let quotient = consume!(divide(10, 2));
            let total = consume!(checked_sum(&[quotient, 1]));
            Outcome::success(total)
        }
        assert_eq!(run().value(), Some(&6));
    }

    #[test]
    fn test_consume_skips_rest_on_failure() {
        let reached = Cell::new(false);
        let run = || -> Outcome<i32> {
            let quotient = consume!(divide(1, 0));
            reached.set(true);
            Outcome::success(quotient)
        };
        let outcome = run();
        assert!(!reached.get());
        assert!(outcome.catch_as::<MathError>().is_some());
    }

    #[test]
    fn test_fail_and_ensure() {
        assert_eq!(
            checked_sum(&[]).what().as_deref(),
            Some("ValueError: empty input")
        );
        assert!(divide(4, 0).get_exact::<ZeroDivisionError>().is_some());
        assert_eq!(divide(4, 2).value(), Some(&2));
    }
}
