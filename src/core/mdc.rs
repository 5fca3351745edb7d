//! Mapped diagnostic context
//!
//! An `Mdc` is the key/value metadata attached to every record emitted by a
//! logger. Reads take the shared side of the lock, writes the exclusive
//! side, and `snapshot` produces an independent point-in-time copy.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Thread-safe string-to-string context map.
#[derive(Debug, Default)]
pub struct Mdc {
    data: RwLock<HashMap<String, String>>,
}

impl Mdc {
    /// Create a blank context.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Create a context copying all entries from an existing one.
    pub fn from_mdc(other: &Mdc) -> Self {
        Self {
            data: RwLock::new(other.snapshot()),
        }
    }

    /// Create a context that takes ownership of the provided map.
    pub fn from_map(data: HashMap<String, String>) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Look up the value for `key`. Absence is a normal `None`, never an
    /// error.
    pub fn get(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    /// Store the string form of `value` under `key`.
    pub fn put(&self, key: impl Into<String>, value: impl ToString) {
        self.data.write().insert(key.into(), value.to_string());
    }

    /// Remove `key`, returning its previous value if any.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.data.write().remove(key)
    }

    /// Produce an independent copy of the current entries.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.data.read().clone()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Clone for Mdc {
    fn clone(&self) -> Self {
        Self::from_mdc(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_put() {
        let mdc = Mdc::new();
        assert_eq!(mdc.get("host"), None);

        mdc.put("host", "web-1");
        assert_eq!(mdc.get("host").unwrap(), "web-1");

        mdc.put("host", "web-2");
        assert_eq!(mdc.get("host").unwrap(), "web-2");
    }

    #[test]
    fn test_put_coerces_value_to_string() {
        let mdc = Mdc::new();
        mdc.put("port", 8080);
        mdc.put("secure", true);

        assert_eq!(mdc.get("port").unwrap(), "8080");
        assert_eq!(mdc.get("secure").unwrap(), "true");
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mdc = Mdc::new();
        mdc.put("a", "1");

        let mut snap = mdc.snapshot();
        assert_eq!(snap.get("a").unwrap(), "1");

        snap.insert("a".to_string(), "2".to_string());
        snap.insert("b".to_string(), "3".to_string());

        assert_eq!(mdc.get("a").unwrap(), "1");
        assert_eq!(mdc.get("b"), None);
    }

    #[test]
    fn test_from_mdc_copies() {
        let parent = Mdc::new();
        parent.put("a", "1");

        let child = Mdc::from_mdc(&parent);
        child.put("a", "2");

        assert_eq!(parent.get("a").unwrap(), "1");
        assert_eq!(child.get("a").unwrap(), "2");
    }

    #[test]
    fn test_from_map_takes_ownership() {
        let map = HashMap::from([("k".to_string(), "v".to_string())]);
        let mdc = Mdc::from_map(map);
        assert_eq!(mdc.get("k").unwrap(), "v");
        assert_eq!(mdc.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mdc = Mdc::new();
        mdc.put("k", "v");
        assert_eq!(mdc.remove("k").unwrap(), "v");
        assert_eq!(mdc.remove("k"), None);
        assert!(mdc.is_empty());
    }
}
