// Error kind hierarchy
// Kinds form a single-parent tree rooted at RuntimeError; every kind knows the
// identities of all of its ancestors so it can be caught through any of them.

use std::any::Any;
use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fmt;

use crate::identity::{identity_of, TypeKey};

/// A classifiable error kind.
///
/// Kinds are declared with [`declare_error_kind!`](crate::declare_error_kind),
/// which embeds the parent kind as the single field of a newtype. A reference
/// to a derived kind can therefore be viewed as a reference to any of its
/// ancestors, and the shared [`RuntimeError`] record at the bottom of the chain
/// carries the dynamic kind name and the message.
pub trait ErrorKind: Clone + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Declared display name of this kind.
    const NAME: &'static str;

    /// Builds the kind from its dynamic name and optional message.
    ///
    /// Derived kinds forward this to their parent unchanged, so every kind in a
    /// chain shares the construction signature of the root.
    fn from_parts(kind_name: &'static str, message: Option<String>) -> Self;

    /// The root record shared by the whole chain.
    fn root(&self) -> &RuntimeError;

    /// Identities of every strict ancestor of this kind.
    fn ancestor_ids() -> BTreeSet<TypeKey>;

    /// Returns this value viewed as the kind identified by `key`, walking up
    /// through embedded parents.
    fn view(&self, key: TypeKey) -> Option<&dyn Any>;

    /// Identity of this kind plus all of its ancestors.
    fn base_ids() -> BTreeSet<TypeKey> {
        let mut ids = Self::ancestor_ids();
        ids.insert(identity_of::<Self>());
        ids
    }

    /// Name of the most-derived kind this value was constructed as.
    fn kind_name(&self) -> &'static str {
        self.root().kind_name
    }

    /// Message supplied at construction, if any.
    fn message(&self) -> Option<&str> {
        self.root().message.as_deref()
    }

    /// Human-readable text: `"<kind>: <message>"`, or just `"<kind>"`.
    fn what(&self) -> String {
        self.root().render()
    }
}

/// Root of every error kind hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    kind_name: &'static str,
    message: Option<String>,
}

impl RuntimeError {
    /// Create a runtime error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_parts(Self::NAME, Some(message.into()))
    }

    /// Create a runtime error without a message
    pub fn bare() -> Self {
        Self::from_parts(Self::NAME, None)
    }

    fn render(&self) -> String {
        match &self.message {
            Some(message) => format!("{}: {}", self.kind_name, message),
            None => self.kind_name.to_string(),
        }
    }
}

impl ErrorKind for RuntimeError {
    const NAME: &'static str = "RuntimeError";

    fn from_parts(kind_name: &'static str, message: Option<String>) -> Self {
        Self {
            kind_name,
            message: message.filter(|message| !message.is_empty()),
        }
    }

    fn root(&self) -> &RuntimeError {
        self
    }

    fn ancestor_ids() -> BTreeSet<TypeKey> {
        BTreeSet::new()
    }

    fn view(&self, key: TypeKey) -> Option<&dyn Any> {
        (key == identity_of::<Self>()).then_some(self as &dyn Any)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl StdError for RuntimeError {}
