//! Panic hook silencing for the duration of a run
//!
//! Confirmation signals are panics, so the default hook would print a message
//! for every failing test. A single forwarding hook is installed once per
//! process. It drops panics raised on a thread that is currently inside a run
//! and hands every other panic to the hook that was installed before it.

use std::cell::Cell;
use std::panic;
use std::sync::Once;

static INSTALL: Once = Once::new();

thread_local! {
    /// Number of runs in progress on this thread
    static QUIET_DEPTH: Cell<usize> = const { Cell::new(0) };
}

fn install() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if QUIET_DEPTH.try_with(Cell::get).unwrap_or(0) == 0 {
                previous(info);
            }
        }));
    });
}

/// Keeps panics on the current thread quiet until dropped.
///
/// Guards nest and may overlap across threads; each one only affects the
/// thread that created it.
pub(crate) struct QuietPanics {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl QuietPanics {
    pub(crate) fn enter() -> Self {
        install();
        QUIET_DEPTH.with(|depth| depth.set(depth.get() + 1));
        Self {
            _not_send: std::marker::PhantomData,
        }
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        QUIET_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
