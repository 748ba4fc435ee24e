// Type identity registry
// Hands out a stable, process-wide key for every error type used for classification

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Opaque identifier for a concrete error type.
///
/// Keys are assigned the first time a type is requested and are never reused
/// or invalidated for the rest of the process lifetime. They are totally
/// ordered so they can be kept in ordered sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey(u64);

impl TypeKey {
    /// Raw numeric value of the key
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Entry {
    key: TypeKey,
    name: &'static str,
}

#[derive(Default)]
struct Registry {
    by_type: HashMap<TypeId, Entry>,
    names: HashMap<TypeKey, &'static str>,
}

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::default()));

/// Returns the key for `K`, allocating one on first use.
pub fn identity_of<K: ?Sized + 'static>() -> TypeKey {
    let type_id = TypeId::of::<K>();

    if let Some(entry) = REGISTRY.read().by_type.get(&type_id) {
        return entry.key;
    }

    let mut registry = REGISTRY.write();
    // Another caller may have registered the type between the two locks.
    if let Some(entry) = registry.by_type.get(&type_id) {
        return entry.key;
    }

    let key = TypeKey(NEXT_KEY.fetch_add(1, Ordering::Relaxed));
    let name = type_name::<K>();
    registry.by_type.insert(type_id, Entry { key, name });
    registry.names.insert(key, name);
    tracing::trace!(%key, type_name = name, "registered error type");
    key
}

/// Reverse lookup of the type name a key was assigned to.
pub fn type_name_of(key: TypeKey) -> Option<&'static str> {
    REGISTRY.read().names.get(&key).copied()
}

/// Number of keys handed out so far.
pub fn registered_count() -> usize {
    REGISTRY.read().by_type.len()
}
