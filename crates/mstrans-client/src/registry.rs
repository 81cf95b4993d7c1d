use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::CallResult;
use crate::options::CompletionHandler;

/// Identifies one dispatched call for the lifetime of its client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handlers waiting for their responses, keyed by request id.
///
/// Ids are handed out monotonically starting at 1 and are never reused by
/// the same registry. Resolving consumes the handler; a second resolution
/// of the same id is a no-op. A call whose response never arrives simply
/// stays registered.
pub struct PendingCallbacks {
    next_id: AtomicU64,
    handlers: Mutex<HashMap<u64, CompletionHandler>>,
}

impl PendingCallbacks {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handlers: Mutex::new(HashMap::new()),
        }
    }

    /// Reserves the next id and files the handler under it.
    pub fn register(&self, handler: CompletionHandler) -> RequestId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.insert(id, handler);
        }
        RequestId(id)
    }

    /// Hands `result` to the handler filed under `id` and retires the slot.
    /// Returns false when the id is unknown or already resolved.
    ///
    /// The handler runs after the registry lock is released, so it may
    /// re-enter the registry freely.
    pub fn resolve(&self, id: RequestId, result: CallResult) -> bool {
        let handler = match self.handlers.lock() {
            Ok(mut handlers) => handlers.remove(&id.0),
            Err(_) => None,
        };
        match handler {
            Some(handler) => {
                handler(result);
                true
            }
            None => false,
        }
    }

    /// Number of calls still waiting for a response.
    pub fn pending(&self) -> usize {
        self.handlers.lock().map(|handlers| handlers.len()).unwrap_or(0)
    }
}

impl Default for PendingCallbacks {
    fn default() -> Self {
        Self::new()
    }
}
