use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A named, atomically-updatable holder for one collaborator reference.
///
/// Host bind/unbind notifications arrive on arbitrary threads, so every
/// operation is a single critical section around one `Option<Arc<T>>`:
/// - `set()` overwrites unconditionally
/// - `clear_if_equal()` only clears when the stored reference is the *same
///   instance* (`Arc::ptr_eq`), so a late unbind of a replaced collaborator
///   cannot erase its successor
/// - `get()` hands out a clone of whatever was last stored
///
/// Slots are independent of each other; nothing here spans two slots.
pub struct DependencySlot<T: ?Sized> {
    name: &'static str,
    current: Mutex<Option<Arc<T>>>,
}

impl<T: ?Sized> DependencySlot<T> {
    /// Create an empty slot.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            current: Mutex::new(None),
        }
    }

    /// Slot name (for logging/introspection).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Store `value`, replacing whatever was bound before.
    pub fn set(&self, value: Arc<T>) {
        *self.lock() = Some(value);
    }

    /// Clear the slot if it still holds `value`.
    ///
    /// Returns `false` (and leaves the slot untouched) when `value` was already
    /// superseded or the slot is empty.
    pub fn clear_if_equal(&self, value: &Arc<T>) -> bool {
        let mut current = self.lock();
        match current.as_ref() {
            Some(stored) if Arc::ptr_eq(stored, value) => {
                *current = None;
                true
            }
            _ => false,
        }
    }

    /// Snapshot of the current binding.
    pub fn get(&self) -> Option<Arc<T>> {
        self.lock().clone()
    }

    /// True if a collaborator is currently bound.
    pub fn is_bound(&self) -> bool {
        self.lock().is_some()
    }

    // The guarded value is a single pointer store, so a panic elsewhere cannot
    // leave it half-written; recover instead of propagating the poison.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<T>>> {
        match self.current.lock() {
            Ok(guard) => guard,
            Err(poison) => poison.into_inner(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for DependencySlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencySlot")
            .field("name", &self.name)
            .field("bound", &self.is_bound())
            .finish()
    }
}
