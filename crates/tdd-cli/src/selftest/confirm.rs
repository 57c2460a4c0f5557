//! Confirmation self tests
//!
//! The two failure tests are expected to fail: they check that a failing
//! confirmation reports exactly the reason below.

use tdd_runtime::{add_test, confirm, confirm_true, TestRecord};

fn is_negative(value: i32) -> bool {
    value < 0
}

fn multiply_by_2(value: i32) -> i32 {
    value * 2
}

pub(super) fn register() {
    add_test(
        TestRecord::new("Test bool confirms failure", || {
            let result = is_negative(0);
            confirm_true!(result);
        })
        .expect_failure("Expected: true"),
    );

    add_test(
        TestRecord::new("Test int confirms failure", || {
            let result = multiply_by_2(1);
            confirm!(0, result);
        })
        .expect_failure("Expected: 0\nActual: 2"),
    );

    add_test(TestRecord::new("Test float confirms", || {
        confirm!(0.3_f32, 0.1_f32 + 0.2_f32);
        confirm!(0.3_f64, 0.1_f64 + 0.2_f64);
    }));

    add_test(TestRecord::new("Test string confirms", || {
        let greeting = format!("{}, {}", "hello", "world");
        confirm!("hello, world", greeting.as_str());
        confirm!(String::from("abc"), "abc".to_string());
    }));
}
