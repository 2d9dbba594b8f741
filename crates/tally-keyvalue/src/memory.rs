use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{KvError, KvResult};
use crate::traits::{KeyValueStore, KvIterator};

/// In-memory, `HashMap`-based key-value store.
///
/// Intended for tests and embedding. The map is guarded by a single
/// `RwLock`: `set`/`del` take the exclusive lock, `get`/`iter` the shared
/// one. Individual operations are atomic; multi-step read-modify-write
/// sequences built on top are not.
///
/// Logical keys are stored verbatim. Prefix matching is a literal
/// string-prefix test over the whole key, so the prefix `"ns"` matches both
/// `"ns/x"` and `"nsx"` — a deliberate divergence from the host-backed
/// backend, which matches only whole leading segments.
pub struct InMemoryStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.data.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.read().expect("lock poisoned").is_empty()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.data.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryStore {
    fn set(&self, key: &str, value: &[u8]) -> KvResult<()> {
        let mut map = self.data.write().expect("lock poisoned");
        map.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> KvResult<Vec<u8>> {
        let map = self.data.read().expect("lock poisoned");
        map.get(key).cloned().ok_or(KvError::NotFound)
    }

    fn del(&self, key: &str) -> KvResult<()> {
        let mut map = self.data.write().expect("lock poisoned");
        map.remove(key);
        Ok(())
    }

    fn iter(&self, prefix: &str) -> KvResult<Box<dyn KvIterator>> {
        // Snapshot the matching entries under the read lock so concurrent
        // mutation cannot affect an in-flight iteration. Point reads are
        // not covered by this isolation.
        let map = self.data.read().expect("lock poisoned");
        let mut entries: Vec<(String, Vec<u8>)> = map
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        Ok(Box::new(MemoryIter {
            entries,
            cursor: 0,
        }))
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("entry_count", &self.len())
            .finish()
    }
}

/// Snapshot cursor produced by [`InMemoryStore::iter`].
struct MemoryIter {
    entries: Vec<(String, Vec<u8>)>,
    cursor: usize,
}

impl KvIterator for MemoryIter {
    fn has_next(&self) -> bool {
        self.cursor != self.entries.len()
    }

    fn next_entry(&mut self) -> KvResult<(String, Vec<u8>)> {
        if self.cursor == self.entries.len() {
            return Err(KvError::NotFound);
        }
        let entry = self.entries[self.cursor].clone();
        self.cursor += 1;
        Ok(entry)
    }

    fn close(&mut self) -> KvResult<()> {
        self.entries.clear();
        self.cursor = 0;
        Ok(())
    }
}

impl Drop for MemoryIter {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[test]
    fn set_get_del_round_trip() {
        let store = InMemoryStore::new();
        store.set("a/b", b"value").unwrap();
        assert_eq!(store.get("a/b").unwrap(), b"value");

        store.set("a/b", b"other").unwrap();
        assert_eq!(store.get("a/b").unwrap(), b"other");

        store.del("a/b").unwrap();
        assert_eq!(store.get("a/b"), Err(KvError::NotFound));
    }

    #[test]
    fn get_of_absent_key_is_not_found() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("missing"), Err(KvError::NotFound));
    }

    #[test]
    fn del_of_absent_key_is_ok() {
        let store = InMemoryStore::new();
        assert!(store.del("missing").is_ok());
    }

    #[test]
    fn empty_value_is_present_not_missing() {
        let store = InMemoryStore::new();
        store.set("k", b"").unwrap();
        assert_eq!(store.get("k").unwrap(), Vec::<u8>::new());
    }

    // -----------------------------------------------------------------------
    // Iteration
    // -----------------------------------------------------------------------

    #[test]
    fn iter_yields_sorted_matching_entries() {
        let store = InMemoryStore::new();
        store.set("ns/b", b"2").unwrap();
        store.set("ns/a", b"1").unwrap();
        store.set("other", b"3").unwrap();

        let mut iter = store.iter("ns/").unwrap();
        assert!(iter.has_next());
        assert_eq!(iter.next_entry().unwrap(), ("ns/a".into(), b"1".to_vec()));
        assert_eq!(iter.next_entry().unwrap(), ("ns/b".into(), b"2".to_vec()));
        assert!(!iter.has_next());
    }

    #[test]
    fn prefix_match_is_literal_not_segment_aware() {
        let store = InMemoryStore::new();
        store.set("ns/x", b"1").unwrap();
        store.set("nsx", b"2").unwrap();
        store.set("other", b"3").unwrap();

        let mut iter = store.iter("ns").unwrap();
        let mut keys = Vec::new();
        while iter.has_next() {
            let (k, _) = iter.next_entry().unwrap();
            keys.push(k);
        }
        // Whole-string prefix test: both the composite key and the plain
        // key sharing the prefix bytes match.
        assert_eq!(keys, vec!["ns/x".to_owned(), "nsx".to_owned()]);
    }

    #[test]
    fn iteration_is_snapshot_isolated() {
        let store = InMemoryStore::new();
        store.set("ns/a", b"1").unwrap();

        let mut iter = store.iter("ns/").unwrap();
        store.set("ns/b", b"2").unwrap();
        store.del("ns/a").unwrap();

        // The snapshot taken at iter() time is unaffected by either change.
        assert_eq!(iter.next_entry().unwrap(), ("ns/a".into(), b"1".to_vec()));
        assert!(!iter.has_next());
    }

    #[test]
    fn exhausted_next_is_not_found() {
        let store = InMemoryStore::new();
        let mut iter = store.iter("none").unwrap();
        assert!(!iter.has_next());
        assert_eq!(iter.next_entry(), Err(KvError::NotFound));
    }

    #[test]
    fn close_is_idempotent_and_resets_to_empty() {
        let store = InMemoryStore::new();
        store.set("ns/a", b"1").unwrap();

        let mut iter = store.iter("ns/").unwrap();
        assert!(iter.has_next());
        iter.close().unwrap();
        assert!(!iter.has_next());
        assert_eq!(iter.next_entry(), Err(KvError::NotFound));
        iter.close().unwrap();
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_writers_do_not_lose_distinct_keys() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryStore::new());
        let mut handles = Vec::new();
        for t in 0..4 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    store.set(&format!("t{t}/k{i}"), b"v").unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 200);
    }
}
