use crate::core::registry::Registry;
use crate::utils::error::{CarParkError, Result};
use std::sync::{Arc, Mutex};

/// Handle for hosts that serve several callers at once.
///
/// Every operation runs inside one lock acquisition, so callers never observe the slot
/// map and the registration index out of step.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Runs `operation` with the lock held.
    ///
    /// Listeners subscribed on the inner registry are notified inside this call, while the
    /// lock is still held, so a listener must never call back into the same
    /// `SharedRegistry`: the second `lock()` would deadlock.
    pub fn with<R>(&self, operation: impl FnOnce(&mut Registry) -> R) -> Result<R> {
        let mut registry = self.inner.lock().map_err(|_| CarParkError::LockPoisoned)?;
        Ok(operation(&mut *registry))
    }
}
