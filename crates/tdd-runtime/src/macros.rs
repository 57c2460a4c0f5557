//! Confirmation macros that capture the caller's source line

/// Confirm `actual` equals `expected`, recording the current line.
///
/// Dispatches through [`Confirmable`](crate::Confirmable): booleans, text,
/// integers and `char` compare exactly, `f32`/`f64` within a fixed tolerance.
///
/// ```
/// use tdd_runtime::confirm;
///
/// fn multiply_by_2(value: i32) -> i32 {
///     value * 2
/// }
///
/// confirm!(4, multiply_by_2(2));
/// confirm!("abc", "abc");
/// confirm!(0.3_f64, 0.1 + 0.2);
/// ```
#[macro_export]
macro_rules! confirm {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::Confirmable::confirm(&$expected, &$actual, line!())
    };
}

/// Confirm a condition holds.
#[macro_export]
macro_rules! confirm_true {
    ($actual:expr $(,)?) => {
        $crate::confirm_bool(true, $actual, line!())
    };
}

/// Confirm a condition does not hold.
#[macro_export]
macro_rules! confirm_false {
    ($actual:expr $(,)?) => {
        $crate::confirm_bool(false, $actual, line!())
    };
}
