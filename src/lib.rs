//! Collection-aware fluent assertions for persistent (`im`) collections.
//!
//! The crate carries a small baseline matcher set for plain values and
//! installs collection-aware overrides on top of it through a named matcher
//! registry. Each override guards on the subject's runtime shape: persistent
//! collections get value equality, `size`, key iteration, and nested-path
//! lookup; any other subject reaches the baseline behavior unchanged, so the
//! extension is purely additive.
//!
//! ```
//! use im_expect::{expect, Value};
//!
//! let teas = Value::list(["chai", "matcha", "konacha"]);
//! expect(teas.clone()).to().have().size_of(3);
//! expect(teas.clone()).to().include("matcha");
//! expect(teas).to().have().size().above(2);
//!
//! let menu = Value::map([
//!     ("green", Value::map([("tea", "matcha")])),
//! ]);
//! expect(menu).to().have().nested().property_eq("green.tea", "matcha");
//! ```

pub mod assert;
pub mod baseline;
pub mod context;
pub mod errors;
pub mod expect;
pub mod keys;
pub mod matchers;
pub mod path;
pub mod registry;
pub mod value;

pub use errors::{AssertError, Result};
pub use expect::{expect, Expectation};
pub use value::Value;
