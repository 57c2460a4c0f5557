//! The framework's own tests, registered into the global registry

mod confirm;
mod setup;

/// Register every self-test suite. Call once, before running.
pub fn register_all() {
    confirm::register();
    setup::register();
}
