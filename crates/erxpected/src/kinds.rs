// Built-in error kinds
// A numeric branch and a value-validation branch under RuntimeError. Callers
// extend the taxonomy with declare_error_kind! the same way.

use crate::kind::RuntimeError;

crate::declare_error_kind! {
    /// Failure in a numeric computation.
    pub struct MathError: RuntimeError;

    /// Division by zero.
    pub struct ZeroDivisionError: MathError;

    /// A value was rejected by validation.
    pub struct ValueError: RuntimeError;
}
