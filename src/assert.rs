//! Flat, TDD-style entry points over the same matcher registry.
//!
//! ```
//! use im_expect::{assert, Value};
//!
//! assert::equal(Value::list([1, 2, 3]), Value::list([1, 2, 3]));
//! assert::size_of(Value::list([1, 2, 3]), 3);
//! ```

use crate::expect::expect;
use crate::value::Value;

/// Asserts structural equality between `actual` and `expected`.
#[track_caller]
pub fn equal(actual: impl Into<Value>, expected: impl Into<Value>) {
    expect(actual).to().equal(expected);
}

#[track_caller]
pub fn not_equal(actual: impl Into<Value>, expected: impl Into<Value>) {
    expect(actual).to().not().equal(expected);
}

/// Asserts that the collection has the expected size.
#[track_caller]
pub fn size_of(collection: impl Into<Value>, size: usize) {
    expect(collection).to().have().size_of(size);
}
