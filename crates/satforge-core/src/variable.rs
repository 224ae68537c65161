//! Boolean decision variables and the store that names them.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;

use crate::error::{Result, SatForgeError};

/// Stable identity of a boolean decision variable.
///
/// Ids are dense and allocated in creation order, starting at zero. The
/// search engine branches on the lowest unassigned id first, so creation
/// order determines enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableId(usize);

impl VariableId {
    /// Creates an id from a raw index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the dense index of this variable.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Allocates variables and maps caller-defined keys to them.
///
/// Keys are opaque to the engine; they only exist so the encoding layer can
/// find its variables again.
///
/// # Example
///
/// ```
/// use satforge_core::VariableStore;
///
/// let mut store = VariableStore::new();
/// let a = store.new_variable(("Mon", "Ada"));
/// let b = store.new_variable(("Tue", "Ada"));
///
/// assert_ne!(a, b);
/// assert_eq!(store.lookup(&("Mon", "Ada")).unwrap(), a);
/// assert!(store.lookup(&("Wed", "Ada")).is_err());
/// ```
#[derive(Clone)]
pub struct VariableStore<K> {
    ids: HashMap<K, VariableId>,
    keys: Vec<K>,
}

impl<K> Default for VariableStore<K> {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            keys: Vec::new(),
        }
    }
}

impl<K: Debug> Debug for VariableStore<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableStore")
            .field("len", &self.keys.len())
            .finish()
    }
}

impl<K: Eq + Hash + Clone + Debug> VariableStore<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` and returns its variable.
    ///
    /// Registering a key twice returns the id allocated the first time.
    pub fn new_variable(&mut self, key: K) -> VariableId {
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = VariableId::new(self.keys.len());
        self.keys.push(key.clone());
        self.ids.insert(key, id);
        id
    }

    /// Returns the variable registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SatForgeError::UnknownKey`] if the key was never registered.
    pub fn lookup<Q>(&self, key: &Q) -> Result<VariableId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.ids
            .get(key)
            .copied()
            .ok_or_else(|| SatForgeError::UnknownKey(format!("{:?}", key)))
    }
}

impl<K> VariableStore<K> {
    /// Returns the key a variable was registered with.
    pub fn key(&self, id: VariableId) -> Option<&K> {
        self.keys.get(id.index())
    }

    /// Returns true if `id` was allocated by this store.
    pub fn contains(&self, id: VariableId) -> bool {
        id.index() < self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over `(id, key)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &K)> {
        self.keys
            .iter()
            .enumerate()
            .map(|(index, key)| (VariableId::new(index), key))
    }
}
