//! Free-form key/value annotations attached to ledger entities.
//!
//! An `Annotations` value is a handle: clones alias the same underlying map.
//! This is how a transfer's two postings end up sharing one annotation map.
//! Use [`Annotations::detached`] when an independent copy is wanted.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};

/// Key under which entities keep their free-text note.
pub const NOTE_KEY: &str = "note";

#[derive(Debug, Clone, Default)]
pub struct Annotations {
    inner: Arc<RwLock<Map<String, Value>>>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Annotations holding only a `note`.
    pub fn with_note(note: impl Into<String>) -> Self {
        let annotations = Self::new();
        annotations.insert(NOTE_KEY, Value::String(note.into()));
        annotations
    }

    fn read(&self) -> RwLockReadGuard<'_, Map<String, Value>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Map<String, Value>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.read().get(key).cloned()
    }

    /// String value under `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.read().get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Insert a value; visible through every handle sharing this map.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.write().insert(key.into(), value)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.write().remove(key)
    }

    /// Flat merge, last write wins on key collision.
    pub fn merge(&self, other: &Map<String, Value>) {
        let mut map = self.write();
        for (key, value) in other {
            map.insert(key.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.read().clone()
    }

    /// Independent copy; later writes to either side are not shared.
    pub fn detached(&self) -> Self {
        Self::from_map(self.snapshot())
    }

    /// Whether both handles point at the same map.
    pub fn is_shared_with(&self, other: &Annotations) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Annotations {
    fn eq(&self, other: &Self) -> bool {
        self.is_shared_with(other) || *self.read() == *other.read()
    }
}

impl From<Map<String, Value>> for Annotations {
    fn from(value: Map<String, Value>) -> Self {
        Self::from_map(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_alias_the_same_map() {
        let a = Annotations::new();
        let b = a.clone();
        b.insert("memo", json!("shared"));
        assert_eq!(a.get_str("memo").as_deref(), Some("shared"));
        assert!(a.is_shared_with(&b));
    }

    #[test]
    fn detached_copy_is_independent() {
        let a = Annotations::with_note("original");
        let b = a.detached();
        b.insert(NOTE_KEY, json!("changed"));
        assert_eq!(a.get_str(NOTE_KEY).as_deref(), Some("original"));
        assert!(!a.is_shared_with(&b));
    }

    #[test]
    fn merge_is_flat_last_write_wins() {
        let a = Annotations::from_map(json!({"x": 1, "y": 2}).as_object().unwrap().clone());
        a.merge(json!({"y": 3, "z": {"n": 1}}).as_object().unwrap());
        assert_eq!(a.snapshot(), *json!({"x": 1, "y": 3, "z": {"n": 1}}).as_object().unwrap());
    }

    #[test]
    fn non_string_note_is_not_a_note() {
        let a = Annotations::new();
        a.insert(NOTE_KEY, json!(42));
        assert_eq!(a.get_str(NOTE_KEY), None);
        assert!(a.contains_key(NOTE_KEY));
    }
}
