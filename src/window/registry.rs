//=========================================================================
// Window Registry
//
// Maps a native handle to the shared state of the window that owns it.
//
// Native window procedures are free functions without a receiver; the
// backend looks the receiver up here. Entries are added when the native
// handle comes into existence and removed when it is destroyed, so a
// late message for a dead handle finds nothing instead of a stale window.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

//=== External Crates =====================================================
use log::{trace, warn};

//=== Registry ============================================================

pub(crate) struct Registry<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash + Copy + Debug,
    V: Clone,
{
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Associates `handle` with `value`, replacing any stale entry.
    pub(crate) fn register(&mut self, handle: K, value: V) {
        if self.entries.insert(handle, value).is_some() {
            warn!(target: "platform", "Native handle {:?} re-registered, replacing stale entry", handle);
        } else {
            trace!(target: "platform", "Registered native handle {:?}", handle);
        }
    }

    /// Returns a clone of the entry for `handle`.
    pub(crate) fn lookup(&self, handle: K) -> Option<V> {
        self.entries.get(&handle).cloned()
    }

    pub(crate) fn unregister(&mut self, handle: K) -> Option<V> {
        let removed = self.entries.remove(&handle);
        if removed.is_some() {
            trace!(target: "platform", "Unregistered native handle {:?}", handle);
        }
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> Default for Registry<K, V>
where
    K: Eq + Hash + Copy + Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn lookup_finds_registered_entry() {
        let mut registry = Registry::new();
        registry.register(0x10_isize, Rc::new("main"));

        assert_eq!(registry.lookup(0x10).as_deref(), Some(&"main"));
        assert!(registry.lookup(0x20).is_none());
    }

    #[test]
    fn unregister_removes_entry() {
        let mut registry = Registry::new();
        registry.register(1_isize, 7_u32);

        assert_eq!(registry.unregister(1), Some(7));
        assert!(registry.lookup(1).is_none());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.unregister(1), None, "Second unregister is a no-op");
    }

    #[test]
    fn register_replaces_stale_entry() {
        let mut registry = Registry::new();
        registry.register(5_isize, 1_u32);
        registry.register(5_isize, 2_u32);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(5), Some(2));
    }

    #[test]
    fn lookup_clones_shared_handle() {
        let mut registry = Registry::new();
        let value = Rc::new(42);
        registry.register(9_isize, Rc::clone(&value));

        let found = registry.lookup(9);
        assert_eq!(Rc::strong_count(&value), 3);
        drop(found);
        registry.unregister(9);
        assert_eq!(Rc::strong_count(&value), 1);
    }
}
