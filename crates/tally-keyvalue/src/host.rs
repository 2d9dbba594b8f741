use crate::error::{KvError, KvResult};
use crate::traits::{KeyValueStore, KvIterator};
use crate::KEY_SEPARATOR;

/// Opaque failure reported by the injected host capability.
pub type HostError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Delimiter between the components of a host composite key.
///
/// The host convention is a leading marker byte, then the namespace and
/// every attribute, each terminated by this byte.
const COMPOSITE_DELIMITER: u8 = 0;

/// Externally supplied state API the [`HostStore`] delegates to.
///
/// The capability owns the physical key encoding: multi-segment logical
/// keys are handed over as (namespace, attributes) and the host builds one
/// zero-byte-delimited composite key from them. Cancellation and deadline
/// handling also live behind this boundary.
pub trait HostState: Send + Sync {
    /// Persist `value` under the physical `key`.
    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), HostError>;

    /// Read the value under the physical `key`; `None` when absent.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, HostError>;

    /// Remove the value under the physical `key`.
    fn delete_state(&self, key: &str) -> Result<(), HostError>;

    /// Build one composite physical key from a namespace and its attributes.
    fn create_composite_key(
        &self,
        namespace: &str,
        attributes: &[&str],
    ) -> Result<String, HostError>;

    /// Range-scan all composite keys under (namespace, leading attributes).
    fn state_by_partial_composite_key(
        &self,
        namespace: &str,
        attributes: &[&str],
    ) -> Result<Box<dyn HostStateIter>, HostError>;
}

/// Cursor over a host range scan, yielding physical keys.
pub trait HostStateIter {
    fn has_next(&self) -> bool;
    fn next_entry(&mut self) -> Result<(String, Vec<u8>), HostError>;
    fn close(&mut self) -> Result<(), HostError>;
}

/// Adapter exposing an injected [`HostState`] capability as a
/// [`KeyValueStore`].
///
/// Single-segment logical keys pass through to the host unmodified;
/// multi-segment keys go through the host's composite-key builder with the
/// head segment as the namespace. Every host failure is wrapped into
/// [`KvError::Internal`] carrying only the cause text, and a store without
/// a state handle fails fast with [`KvError::HandleUnset`] before touching
/// the host.
pub struct HostStore<S> {
    state: Option<S>,
}

impl<S: HostState> HostStore<S> {
    /// Create an adapter over the given state handle.
    pub fn new(state: S) -> Self {
        Self { state: Some(state) }
    }

    /// Create an adapter with no state handle; every operation fails with
    /// [`KvError::HandleUnset`] until [`HostStore::attach`] is called.
    pub fn detached() -> Self {
        Self { state: None }
    }

    /// Attach (or replace) the state handle.
    pub fn attach(&mut self, state: S) {
        self.state = Some(state);
    }

    fn state(&self) -> KvResult<&S> {
        self.state.as_ref().ok_or(KvError::HandleUnset)
    }

    /// Map a logical key onto its physical form.
    ///
    /// Multi-segment keys are built by the host's composite-key builder;
    /// single-segment keys need no composite machinery and pass through.
    fn physical_key(&self, state: &S, key: &str) -> KvResult<String> {
        let segments: Vec<&str> = key.split(KEY_SEPARATOR).collect();
        if segments.len() > 1 {
            state
                .create_composite_key(segments[0], &segments[1..])
                .map_err(internal)
        } else {
            Ok(key.to_owned())
        }
    }
}

impl<S: HostState> KeyValueStore for HostStore<S> {
    fn set(&self, key: &str, value: &[u8]) -> KvResult<()> {
        let state = self.state()?;
        let physical = self.physical_key(state, key)?;
        state.put_state(&physical, value).map_err(internal)
    }

    fn get(&self, key: &str) -> KvResult<Vec<u8>> {
        let state = self.state()?;
        let physical = self.physical_key(state, key)?;
        match state.get_state(&physical).map_err(internal)? {
            // The host reports absence as a nil value without an error.
            None => Err(KvError::NotFound),
            Some(value) => Ok(value),
        }
    }

    fn del(&self, key: &str) -> KvResult<()> {
        let state = self.state()?;
        let physical = self.physical_key(state, key)?;
        state.delete_state(&physical).map_err(internal)
    }

    fn iter(&self, prefix: &str) -> KvResult<Box<dyn KvIterator>> {
        let state = self.state()?;
        let segments: Vec<&str> = prefix.split(KEY_SEPARATOR).collect();
        let scan = if segments.len() > 1 {
            state.state_by_partial_composite_key(segments[0], &segments[1..])
        } else {
            state.state_by_partial_composite_key(prefix, &[])
        };

        Ok(Box::new(HostIter {
            scan: Some(scan.map_err(internal)?),
        }))
    }
}

impl<S> std::fmt::Debug for HostStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostStore")
            .field("attached", &self.state.is_some())
            .finish()
    }
}

/// Decode a composite physical key back into its logical form.
///
/// Skips the leading marker byte and rejoins the zero-byte-delimited
/// components with the logical separator. A key without any delimiter is
/// not composite and is returned unchanged.
fn decode_composite(key: &str) -> String {
    let bytes = key.as_bytes();
    if !bytes.contains(&COMPOSITE_DELIMITER) {
        return key.to_owned();
    }

    let mut segments: Vec<&str> = Vec::new();
    let mut start = 1; // skip the marker byte
    for (i, b) in bytes.iter().enumerate().skip(1) {
        if *b == COMPOSITE_DELIMITER {
            segments.push(&key[start..i]);
            start = i + 1;
        }
    }

    segments.join(KEY_SEPARATOR)
}

/// Cursor adapting a host range scan to the [`KvIterator`] contract.
///
/// Entries surface with their logical (decoded) keys. Once closed, the
/// underlying scan is released and the cursor reads as empty.
struct HostIter {
    scan: Option<Box<dyn HostStateIter>>,
}

impl KvIterator for HostIter {
    fn has_next(&self) -> bool {
        self.scan.as_ref().is_some_and(|scan| scan.has_next())
    }

    fn next_entry(&mut self) -> KvResult<(String, Vec<u8>)> {
        let scan = self.scan.as_mut().ok_or(KvError::NotFound)?;
        if !scan.has_next() {
            return Err(KvError::NotFound);
        }
        let (physical, value) = scan.next_entry().map_err(internal)?;
        Ok((decode_composite(&physical), value))
    }

    fn close(&mut self) -> KvResult<()> {
        if let Some(mut scan) = self.scan.take() {
            scan.close().map_err(internal)?;
        }
        Ok(())
    }
}

impl Drop for HostIter {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn internal(cause: HostError) -> KvError {
    KvError::Internal(cause.to_string())
}
