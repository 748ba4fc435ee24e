// Classified errors
// An owned, type-erased error value together with the ancestor closure that was
// captured for it at construction time.

use std::any::{type_name, Any};
use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fmt;

use crate::identity::{identity_of, TypeKey};
use crate::kind::ErrorKind;

/// Object-safe face of a stored error value.
trait ErasedError: Send + Sync + 'static {
    fn clone_box(&self) -> Box<dyn ErasedError>;

    fn render(&self) -> String;

    fn kind_name(&self) -> &'static str;

    /// The concrete stored value, for exact downcasts.
    fn as_any(&self) -> &dyn Any;

    /// The stored value viewed as the type identified by `key`.
    fn view(&self, key: TypeKey) -> Option<&dyn Any>;

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Holder for values that belong to the kind hierarchy.
struct Kinded<K>(K);

impl<K: ErrorKind> ErasedError for Kinded<K> {
    fn clone_box(&self) -> Box<dyn ErasedError> {
        Box::new(Kinded(self.0.clone()))
    }

    fn render(&self) -> String {
        self.0.what()
    }

    fn kind_name(&self) -> &'static str {
        self.0.kind_name()
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn view(&self, key: TypeKey) -> Option<&dyn Any> {
        self.0.view(key)
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// A value that lives outside the kind hierarchy.
///
/// The wrapper is the stored type, and it is never an [`ErrorKind`], so a
/// wrapped value is caught only as `Unclassified<E>` via
/// [`ClassifiedError::get_exact`]. Hierarchy kinds belong in
/// [`ClassifiedError::new`], which captures their full ancestor closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unclassified<E>(pub E);

impl<E> Unclassified<E> {
    pub fn into_inner(self) -> E {
        self.0
    }
}

impl<E: fmt::Display> fmt::Display for Unclassified<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<E> ErasedError for Unclassified<E>
where
    E: fmt::Display + fmt::Debug + Clone + Send + Sync + 'static,
{
    fn clone_box(&self) -> Box<dyn ErasedError> {
        Box::new(self.clone())
    }

    fn render(&self) -> String {
        self.0.to_string()
    }

    fn kind_name(&self) -> &'static str {
        short_type_name::<E>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn view(&self, key: TypeKey) -> Option<&dyn Any> {
        (key == identity_of::<Self>()).then_some(self as &dyn Any)
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn short_type_name<E: ?Sized>() -> &'static str {
    let full = type_name::<E>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// A boxed error plus the set of kind identities it can be caught as.
///
/// Each instance exclusively owns its boxed value. Cloning performs a deep,
/// polymorphic copy that keeps the concrete type and the captured identities.
pub struct ClassifiedError {
    error: Box<dyn ErasedError>,
    key: TypeKey,
    base_ids: BTreeSet<TypeKey>,
}

impl ClassifiedError {
    /// Classify a value from the kind hierarchy.
    pub fn new<K: ErrorKind>(kind: K) -> Self {
        Self {
            error: Box::new(Kinded(kind)),
            key: identity_of::<K>(),
            base_ids: K::base_ids(),
        }
    }

    /// Wrap a value that does not belong to the kind hierarchy.
    ///
    /// Its identity set holds only `Unclassified<E>`, so it can be retrieved
    /// with [`get_exact`](Self::get_exact) but never caught through a base kind.
    pub fn unclassified<E>(error: Unclassified<E>) -> Self
    where
        E: fmt::Display + fmt::Debug + Clone + Send + Sync + 'static,
    {
        let key = identity_of::<Unclassified<E>>();
        Self {
            error: Box::new(error),
            key,
            base_ids: BTreeSet::from([key]),
        }
    }

    /// Key of the concrete stored type
    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    /// Every identity this error can be caught as, itself included
    pub fn base_ids(&self) -> &BTreeSet<TypeKey> {
        &self.base_ids
    }

    /// Name of the concrete kind
    pub fn kind_name(&self) -> &'static str {
        self.error.kind_name()
    }

    /// Rendered `"<kind>: <message>"` text
    pub fn what(&self) -> String {
        self.error.render()
    }

    /// Whether the error can be caught as `K`
    pub fn is<K: ErrorKind>(&self) -> bool {
        self.base_ids.contains(&identity_of::<K>())
    }

    /// The stored value, only if its concrete type is exactly `E`.
    pub fn get_exact<E: 'static>(&self) -> Option<&E> {
        if self.key != identity_of::<E>() {
            return None;
        }
        self.error.as_any().downcast_ref::<E>()
    }

    /// The stored value viewed as `K`, if `K` is its kind or any ancestor of it.
    pub fn catch_as<K: ErrorKind>(&self) -> Option<&K> {
        let key = identity_of::<K>();
        if !self.base_ids.contains(&key) {
            return None;
        }
        self.error.view(key)?.downcast_ref::<K>()
    }
}

impl<K: ErrorKind> From<K> for ClassifiedError {
    fn from(kind: K) -> Self {
        Self::new(kind)
    }
}

impl Clone for ClassifiedError {
    fn clone(&self) -> Self {
        Self {
            error: self.error.clone_box(),
            key: self.key,
            base_ids: self.base_ids.clone(),
        }
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error.render())
    }
}

impl fmt::Debug for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Inner<'a>(&'a dyn ErasedError);

        impl fmt::Debug for Inner<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.debug(f)
            }
        }

        f.debug_struct("ClassifiedError")
            .field("kind", &self.kind_name())
            .field("error", &Inner(self.error.as_ref()))
            .field("base_ids", &self.base_ids)
            .finish()
    }
}

impl StdError for ClassifiedError {}
