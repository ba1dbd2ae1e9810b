//! Process-wide shared resources
//!
//! The background scroll lock and the global Escape listener are reference
//! counted: the first acquire attaches, the last release detaches. The trap
//! lock admits a single overlay. All three are released by dropping guards,
//! which covers every exit path including an unmount mid-transition.
//!
//! `SharedResources::global()` is initialised lazily on first use and lives
//! for the whole process. Tests build isolated instances with `new()`.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::debug;

/// Reference-counted platform resource
#[derive(Debug, Clone)]
pub struct RefCounted {
    name: &'static str,
    count: Arc<AtomicUsize>,
}

impl RefCounted {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Take one reference; attaches the resource on 0 -> 1
    #[must_use = "the reference is released when the guard is dropped"]
    pub fn acquire(&self) -> RefGuard {
        let previous = self.count.fetch_add(1, Ordering::AcqRel);
        if previous == 0 {
            debug!(resource = self.name, "Attached shared resource");
        }
        RefGuard {
            name: self.name,
            count: Arc::clone(&self.count),
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Whether any holder currently exists
    pub fn is_held(&self) -> bool {
        self.count() > 0
    }
}

/// One reference to a [`RefCounted`] resource
#[derive(Debug)]
pub struct RefGuard {
    name: &'static str,
    count: Arc<AtomicUsize>,
}

impl Drop for RefGuard {
    fn drop(&mut self) {
        let previous = self.count.fetch_sub(1, Ordering::AcqRel);
        if previous == 1 {
            debug!(resource = self.name, "Detached shared resource");
        }
    }
}

/// Exclusive keyboard-trap ownership
#[derive(Debug, Clone, Default)]
pub struct TrapLock {
    // 0 means free; overlay ids start at 1
    holder: Arc<AtomicU64>,
}

impl TrapLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to take the lock for `owner`; `None` when another owner holds it
    pub fn try_acquire(&self, owner: u64) -> Option<TrapGuard> {
        debug_assert!(owner != 0, "owner id 0 is reserved");
        self.holder
            .compare_exchange(0, owner, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TrapGuard {
                owner,
                holder: Arc::clone(&self.holder),
            })
    }

    /// Current owner, if any
    pub fn holder(&self) -> Option<u64> {
        match self.holder.load(Ordering::Acquire) {
            0 => None,
            id => Some(id),
        }
    }
}

/// Proof of trap-lock ownership
#[derive(Debug)]
pub struct TrapGuard {
    owner: u64,
    holder: Arc<AtomicU64>,
}

impl TrapGuard {
    pub fn owner(&self) -> u64 {
        self.owner
    }
}

impl Drop for TrapGuard {
    fn drop(&mut self) {
        let _ = self
            .holder
            .compare_exchange(self.owner, 0, Ordering::AcqRel, Ordering::Acquire);
    }
}

/// Resources shared by every overlay in a document
#[derive(Debug, Clone)]
pub struct SharedResources {
    pub scroll_lock: RefCounted,
    pub escape_listener: RefCounted,
    pub trap: TrapLock,
}

impl Default for SharedResources {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedResources {
    /// Fresh, isolated set of resources
    pub fn new() -> Self {
        Self {
            scroll_lock: RefCounted::new("scroll-lock"),
            escape_listener: RefCounted::new("escape-listener"),
            trap: TrapLock::new(),
        }
    }

    /// The process-wide instance
    pub fn global() -> Self {
        static GLOBAL: OnceLock<SharedResources> = OnceLock::new();
        GLOBAL.get_or_init(SharedResources::new).clone()
    }

    /// Whether background scrolling is currently suspended
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_held()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refcount_nested_release() {
        let lock = RefCounted::new("scroll-lock");
        let outer = lock.acquire();
        let inner = lock.acquire();
        assert_eq!(lock.count(), 2);

        drop(inner);
        assert!(lock.is_held(), "outer holder must keep the lock");
        drop(outer);
        assert!(!lock.is_held());
    }

    #[test]
    fn test_trap_lock_exclusive() {
        let trap = TrapLock::new();
        let first = trap.try_acquire(1).unwrap();
        assert!(trap.try_acquire(2).is_none());
        assert_eq!(trap.holder(), Some(1));

        drop(first);
        assert_eq!(trap.holder(), None);
        let second = trap.try_acquire(2).unwrap();
        assert_eq!(second.owner(), 2);
    }

    #[test]
    fn test_global_is_shared() {
        let a = SharedResources::global();
        let b = SharedResources::global();
        let guard = a.escape_listener.acquire();
        assert!(b.escape_listener.count() >= 1);
        drop(guard);
    }
}
