//! libretro callbacks are bare C function pointers with no user-data slot, so
//! they cannot be told which bridge they belong to. Every call into a core is
//! wrapped in an [`ActiveBridge`] guard that publishes the bridge for the
//! current thread; callbacks look it up with [`with_bridge`].

use std::cell::Cell;
use std::ptr;

use log::debug;

use crate::bridge::Bridge;

thread_local! {
    static ACTIVE: Cell<*mut Bridge> = const { Cell::new(ptr::null_mut()) };
}

/// Publishes a bridge for the current thread until dropped, then restores
/// whatever was published before.
pub(crate) struct ActiveBridge {
    previous: *mut Bridge,
}

impl ActiveBridge {
    pub(crate) fn enter(bridge: *mut Bridge) -> Self {
        let previous = ACTIVE.with(|active| active.replace(bridge));
        Self { previous }
    }
}

impl Drop for ActiveBridge {
    fn drop(&mut self) {
        ACTIVE.with(|active| active.set(self.previous));
    }
}

/// Runs `f` against the published bridge.
///
/// The slot is emptied while `f` runs, so a callback re-entered from inside
/// another callback sees no bridge instead of a second `&mut`. Returns `None`
/// when no bridge is published.
pub(crate) fn with_bridge<R>(f: impl FnOnce(&mut Bridge) -> R) -> Option<R> {
    let bridge = ACTIVE.with(|active| active.replace(ptr::null_mut()));
    if bridge.is_null() {
        debug!("libretro callback outside of a core call; ignoring");
        return None;
    }

    struct Restore(*mut Bridge);
    impl Drop for Restore {
        fn drop(&mut self) {
            ACTIVE.with(|active| active.set(self.0));
        }
    }
    let _restore = Restore(bridge);

    // SAFETY: the pointer was published by an `ActiveBridge` guard whose owner
    // holds the bridge for the guard's lifetime and does not touch it while the
    // core is executing.
    Some(f(unsafe { &mut *bridge }))
}

