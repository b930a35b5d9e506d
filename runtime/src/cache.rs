//! Process-wide compiled entry cache with an at-most-one-compile
//! guarantee.
//!
//! # Thread Safety
//!
//! Lookups take the lock-free fast path. Misses funnel through a per-key
//! single-flight slot: concurrent callers bearing an identical key admit
//! exactly one compilation, and everyone else blocks behind it on that
//! key's slot and observes its result. Distinct keys never contend. A
//! stuck compilation blocks that key's waiters indefinitely; no timeout
//! or cancellation is defined.
//!
//! # Growth
//!
//! Entries are never evicted; the cache grows monotonically for the
//! process lifetime. A failed compilation is not negatively cached, so a
//! persistently failing signature re-attempts on every call.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;
use snafu::ResultExt;
use strela_device::{ContextId, FunctionId, NativeEntry};
use strela_dtype::DeviceType;
use tracing::debug;

use crate::error::{CompileSnafu, Result};

/// Identity of one distinct call shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub function: FunctionId,
    pub sig_hash: u64,
    pub context: ContextId,
}

impl CacheKey {
    pub fn new(function: FunctionId, signature: &[DeviceType], context: ContextId) -> Self {
        Self { function, sig_hash: signature_hash(signature), context }
    }
}

/// Stable in-process hash of a codegen signature. Ghosts are ordinary
/// signature elements here, so a structurally different type at any
/// position yields a different hash.
fn signature_hash(signature: &[DeviceType]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    signature.hash(&mut hasher);
    hasher.finish()
}

#[derive(Default)]
pub struct CompiledFunctionCache {
    entries: papaya::HashMap<CacheKey, Arc<NativeEntry>>,
    /// One slot per key that has ever missed. Slots are retained for the
    /// cache lifetime, matching the monotonic growth of `entries`; reusing
    /// the same slot for every miss on a key is what keeps compilations
    /// serialized when one fails and a waiter retries.
    inflight: Mutex<std::collections::HashMap<CacheKey, Arc<Mutex<()>>>>,
}

impl CompiledFunctionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.pin().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.pin().contains_key(key)
    }

    /// Return the entry for `key`, compiling it with `compile` on a miss.
    ///
    /// Concurrent calls with an identical key trigger at most one
    /// `compile` invocation; all of them observe the same entry. On
    /// compilation failure nothing is stored and the error propagates to
    /// the caller that attempted it.
    pub fn get_or_compile<F>(&self, key: CacheKey, compile: F) -> Result<Arc<NativeEntry>>
    where
        F: FnOnce() -> strela_device::Result<NativeEntry>,
    {
        // Fast path: lock-free hit.
        if let Some(entry) = self.entries.pin().get(&key) {
            debug!(key = ?key, "compiled entry cache hit");
            return Ok(Arc::clone(entry));
        }

        // Miss: acquire this key's single-flight slot.
        let slot = {
            let mut inflight = self.inflight.lock();
            Arc::clone(inflight.entry(key.clone()).or_default())
        };
        let _admitted = slot.lock();

        // The previous slot holder may have inserted while we waited.
        if let Some(entry) = self.entries.pin().get(&key) {
            debug!(key = ?key, "compiled entry cache hit after wait");
            return Ok(Arc::clone(entry));
        }

        debug!(key = ?key, "compiled entry cache miss, compiling");
        let entry = Arc::new(compile().context(CompileSnafu)?);
        self.entries.pin().insert(key, Arc::clone(&entry));
        Ok(entry)
    }
}

impl std::fmt::Debug for CompiledFunctionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledFunctionCache").field("entries", &self.len()).finish()
    }
}
