//! Pluggable key-value storage for the Tally balance ledger.
//!
//! This crate defines the storage contract the rest of Tally is written
//! against, plus the two backends it ships with:
//!
//! - [`InMemoryStore`] — `HashMap`-based store for tests and embedding
//! - [`HostStore`] — adapter over an externally supplied [`HostState`]
//!   capability (a blockchain-style state API with composite physical keys)
//!
//! # Keys
//!
//! A logical key is one or more non-empty segments joined by
//! [`KEY_SEPARATOR`], as if it were a path to the value. The same string
//! doubles as an iteration prefix. How a logical key maps onto a physical
//! one is a backend concern:
//!
//! - the in-memory backend stores the logical key verbatim and matches
//!   prefixes as literal string prefixes over the whole key, so the prefix
//!   `"ns"` matches both `"ns/x"` and `"nsx"`;
//! - the host backend encodes multi-segment keys through the host's
//!   composite-key builder (namespace first, zero-byte delimited) and
//!   matches only whole leading segments.
//!
//! This divergence is deliberate and covered by tests in both backends.
//! Callers that need identical scan results across backends must keep the
//! separator character out of individual segments.
//!
//! # Design Rules
//!
//! 1. `set` is an unconditional, idempotent upsert.
//! 2. A missing key is signaled only by `get` returning
//!    [`KvError::NotFound`], never by an empty-but-present value and never
//!    by iteration.
//! 3. Deleting an absent key is not an error.
//! 4. Backend failures are wrapped into [`KvError::Internal`]; host
//!    specifics never leak across this boundary.
//! 5. Iterators close on every exit path: `close` is idempotent and also
//!    runs on drop.

pub mod error;
pub mod host;
pub mod memory;
pub mod traits;

pub use error::{KvError, KvResult};
pub use host::{HostError, HostState, HostStateIter, HostStore};
pub use memory::InMemoryStore;
pub use traits::{KeyValueStore, KvIterator};

/// Separator between the segments of a logical key.
///
/// The separator stands for the path to the value, as if it were a
/// directory tree, which makes keys convenient to enumerate and search.
pub const KEY_SEPARATOR: &str = "/";

/// Join key segments with [`KEY_SEPARATOR`], skipping empty segments and
/// bare separators.
///
/// ```
/// use tally_keyvalue::join;
///
/// assert_eq!(join(["a"]), "a");
/// assert_eq!(join(["a", "b", "c"]), "a/b/c");
/// assert_eq!(join(["a", "", "c"]), "a/c");
/// ```
pub fn join<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_empty() || segment == KEY_SEPARATOR {
            continue;
        }
        if !out.is_empty() {
            out.push_str(KEY_SEPARATOR);
        }
        out.push_str(segment);
    }
    out
}
