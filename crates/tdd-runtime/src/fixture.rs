//! Setup and teardown fixtures
//!
//! A [`Fixture`] is supplied by the test author. Suites hold one per
//! [`SuiteRecord`](crate::SuiteRecord); individual tests can scope one with
//! [`SetupAndTeardown`].

use std::ops::{Deref, DerefMut};

/// Paired setup/teardown operations.
pub trait Fixture: Send {
    fn setup(&mut self);
    fn teardown(&mut self);
}

/// A fixture built from two closures.
pub struct FnFixture<S, T> {
    setup: S,
    teardown: T,
}

impl<S, T> FnFixture<S, T>
where
    S: FnMut() + Send,
    T: FnMut() + Send,
{
    pub fn new(setup: S, teardown: T) -> Self {
        Self { setup, teardown }
    }
}

impl<S, T> Fixture for FnFixture<S, T>
where
    S: FnMut() + Send,
    T: FnMut() + Send,
{
    fn setup(&mut self) {
        (self.setup)()
    }

    fn teardown(&mut self) {
        (self.teardown)()
    }
}

/// Scope guard running a fixture's setup on creation and teardown on drop.
///
/// Teardown also runs while a failing confirmation unwinds out of the test.
///
/// ```
/// use tdd_runtime::{Fixture, SetupAndTeardown};
///
/// #[derive(Default)]
/// struct TempEntry { id: Option<u32> }
///
/// impl Fixture for TempEntry {
///     fn setup(&mut self) { self.id = Some(100); }
///     fn teardown(&mut self) { self.id = None; }
/// }
///
/// let entry = SetupAndTeardown::<TempEntry>::new();
/// assert_eq!(entry.id, Some(100));
/// ```
pub struct SetupAndTeardown<T: Fixture> {
    fixture: T,
}

impl<T: Fixture + Default> SetupAndTeardown<T> {
    pub fn new() -> Self {
        Self::with(T::default())
    }
}

impl<T: Fixture + Default> Default for SetupAndTeardown<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Fixture> SetupAndTeardown<T> {
    /// Wrap an already constructed fixture, running its setup now
    pub fn with(mut fixture: T) -> Self {
        fixture.setup();
        Self { fixture }
    }
}

impl<T: Fixture> Deref for SetupAndTeardown<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.fixture
    }
}

impl<T: Fixture> DerefMut for SetupAndTeardown<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.fixture
    }
}

impl<T: Fixture> Drop for SetupAndTeardown<T> {
    fn drop(&mut self) {
        self.fixture.teardown();
    }
}
