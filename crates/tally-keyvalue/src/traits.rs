use std::sync::Arc;

use crate::error::KvResult;

/// Uniform storage contract both Tally backends satisfy.
///
/// All implementations must uphold these invariants:
/// - `set` is an unconditional upsert and idempotent.
/// - `get` fails with `KvError::NotFound` when the key is absent; a missing
///   value is never represented as an empty-but-present one.
/// - `del` of an absent key succeeds.
/// - `iter` never yields a key whose value does not exist at snapshot time.
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> KvResult<()>;

    /// Retrieve the value stored under `key`.
    fn get(&self, key: &str) -> KvResult<Vec<u8>>;

    /// Remove the value stored under `key`, if any.
    fn del(&self, key: &str) -> KvResult<()>;

    /// Iterate over all entries whose key matches `prefix`.
    ///
    /// The prefix may span multiple segments. How it is matched against
    /// stored keys is backend-specific; see the crate docs.
    fn iter(&self, prefix: &str) -> KvResult<Box<dyn KvIterator>>;
}

/// Cursor over the entries matched by a prefix scan.
///
/// The iterator is exclusively owned by the caller until closed. `close`
/// releases backend resources, is idempotent, and resets the cursor to the
/// empty state; re-iteration requires a fresh `iter` call. Implementations
/// also close themselves on drop, so resources are released on every exit
/// path.
pub trait KvIterator {
    /// Non-blocking peek: `true` while entries remain.
    fn has_next(&self) -> bool;

    /// Return the next key-value pair.
    ///
    /// Fails with `KvError::NotFound` when the iterator is exhausted.
    fn next_entry(&mut self) -> KvResult<(String, Vec<u8>)>;

    /// Release resources held by the iterator.
    fn close(&mut self) -> KvResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn set(&self, key: &str, value: &[u8]) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn get(&self, key: &str) -> KvResult<Vec<u8>> {
        (**self).get(key)
    }

    fn del(&self, key: &str) -> KvResult<()> {
        (**self).del(key)
    }

    fn iter(&self, prefix: &str) -> KvResult<Box<dyn KvIterator>> {
        (**self).iter(prefix)
    }
}
