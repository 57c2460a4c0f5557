//! Typed comparisons that raise a [`Signal`] on mismatch
//!
//! Every confirmation takes `(expected, actual, line)` and returns normally
//! when the values agree. On mismatch it unwinds with the matching signal,
//! which the runner turns into a failed verdict.
//!
//! # API
//!
//! - [`confirm_bool`]: boolean equality, raises `BooleanMismatch`
//! - [`confirm_text`]: exact text equality, raises `ValueMismatch`
//! - [`confirm_eq`]: equality for any `PartialEq + Display` value
//! - [`confirm_f32`] / [`confirm_f64`]: tolerant floating point equality
//! - [`Confirmable`]: dispatch trait behind the `confirm!` macro

use crate::signal::Signal;
use std::fmt::Display;

/// Absolute tolerance for single precision confirmations
pub const F32_TOLERANCE: f64 = 1e-4;

/// Absolute tolerance for double precision confirmations
pub const F64_TOLERANCE: f64 = 1e-6;

/// Confirm a boolean value.
pub fn confirm_bool(expected: bool, actual: bool, line: u32) {
    if actual != expected {
        Signal::BooleanMismatch { expected, line }.raise();
    }
}

/// Confirm two pieces of text are identical, byte for byte.
pub fn confirm_text(expected: &str, actual: &str, line: u32) {
    if actual != expected {
        value_mismatch(expected, actual, line);
    }
}

/// Confirm two values are equal, rendering both with `Display` on failure.
pub fn confirm_eq<T>(expected: &T, actual: &T, line: u32)
where
    T: PartialEq + Display + ?Sized,
{
    if actual != expected {
        value_mismatch(expected, actual, line);
    }
}

/// Confirm two `f32` values agree within [`F32_TOLERANCE`].
pub fn confirm_f32(expected: f32, actual: f32, line: u32) {
    if !within_tolerance(f64::from(expected), f64::from(actual), F32_TOLERANCE) {
        value_mismatch(render_float(expected), render_float(actual), line);
    }
}

/// Confirm two `f64` values agree within [`F64_TOLERANCE`].
pub fn confirm_f64(expected: f64, actual: f64, line: u32) {
    if !within_tolerance(expected, actual, F64_TOLERANCE) {
        value_mismatch(render_float(expected), render_float(actual), line);
    }
}

/// Whether `actual` lies inside `[expected - tolerance, expected + tolerance]`.
///
/// NaN never matches. Equal infinities match.
pub fn within_tolerance(expected: f64, actual: f64, tolerance: f64) -> bool {
    expected == actual || (actual - expected).abs() <= tolerance
}

fn render_float(value: impl Into<f64>) -> String {
    format!("{:.6}", value.into())
}

fn value_mismatch(expected: impl Display, actual: impl Display, line: u32) -> ! {
    Signal::ValueMismatch {
        expected: expected.to_string(),
        actual: actual.to_string(),
        line,
    }
    .raise()
}

/// Types the `confirm!` macro knows how to compare.
///
/// `bool` raises `BooleanMismatch`, text compares exactly, floats compare with
/// a fixed tolerance, and integers and `char` compare exactly. Other types can
/// use [`confirm_eq`] directly or implement this trait.
pub trait Confirmable {
    /// Confirm `actual` matches `self` (the expected value).
    fn confirm(&self, actual: &Self, line: u32);
}

impl Confirmable for bool {
    fn confirm(&self, actual: &Self, line: u32) {
        confirm_bool(*self, *actual, line);
    }
}

impl Confirmable for str {
    fn confirm(&self, actual: &Self, line: u32) {
        confirm_text(self, actual, line);
    }
}

impl Confirmable for String {
    fn confirm(&self, actual: &Self, line: u32) {
        confirm_text(self, actual, line);
    }
}

impl Confirmable for f32 {
    fn confirm(&self, actual: &Self, line: u32) {
        confirm_f32(*self, *actual, line);
    }
}

impl Confirmable for f64 {
    fn confirm(&self, actual: &Self, line: u32) {
        confirm_f64(*self, *actual, line);
    }
}

impl<T: Confirmable + ?Sized> Confirmable for &T {
    fn confirm(&self, actual: &Self, line: u32) {
        (**self).confirm(*actual, line);
    }
}

macro_rules! confirm_exact {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Confirmable for $ty {
                fn confirm(&self, actual: &Self, line: u32) {
                    confirm_eq(self, actual, line);
                }
            }
        )*
    };
}

confirm_exact!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char);
