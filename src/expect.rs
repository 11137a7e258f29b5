use once_cell::sync::Lazy;

use crate::baseline::base_registry;
use crate::context::Ctx;
use crate::errors::Result;
use crate::matchers;
use crate::registry::Registry;
use crate::value::Value;

// Process-wide matcher table: the baseline set with the collection-aware
// overrides installed on top, built once on first use.
static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let mut registry = base_registry();
    matchers::install(&mut registry);
    registry
});

/// Starts a fluent assertion on `value`.
///
/// ```
/// use im_expect::{expect, Value};
///
/// let map = Value::map([("foo", "bar")]);
/// expect(map.clone()).to().have().property_eq("foo", "bar");
/// expect(map).to().not().have().key("baz");
/// ```
pub fn expect(value: impl Into<Value>) -> Expectation {
    Expectation::new(value.into())
}

/// A fluent assertion in progress.
///
/// Verb methods dispatch through the matcher registry and panic with the
/// formatted failure, so a chain reads like one sentence and aborts at the
/// first matcher whose check does not hold. Flag methods and language chains
/// return `self` and cost nothing.
#[derive(Clone)]
pub struct Expectation {
    ctx: Ctx,
}

impl Expectation {
    fn new(subject: Value) -> Self {
        Expectation {
            ctx: Ctx::new(subject),
        }
    }

    /// The current chain subject (rebound by `property`).
    pub fn subject(&self) -> &Value {
        &self.ctx.subject
    }

    pub(crate) fn try_run(&mut self, verb: &str, args: &[Value]) -> Result<()> {
        REGISTRY.run(verb, &mut self.ctx, args)
    }

    #[track_caller]
    fn run(mut self, verb: &str, args: &[Value]) -> Self {
        if let Err(err) = self.try_run(verb, args) {
            panic!("{}", err.full_message());
        }
        self
    }

    // -- language chains -----------------------------------------------

    pub fn to(self) -> Self {
        self
    }

    pub fn be(self) -> Self {
        self
    }

    pub fn have(self) -> Self {
        self
    }

    pub fn that(self) -> Self {
        self
    }

    pub fn with(self) -> Self {
        self
    }

    // -- flag chains ---------------------------------------------------

    /// Negates the rest of the chain.
    pub fn not(mut self) -> Self {
        self.ctx.flags.negate = true;
        self
    }

    /// Existential quantification for `keys`.
    pub fn any(mut self) -> Self {
        self.ctx.flags.any = true;
        self
    }

    /// Universal quantification for `keys` (the default).
    pub fn all(mut self) -> Self {
        self.ctx.flags.any = false;
        self
    }

    /// Relaxes `keys` from exact-set to subset semantics, exactly like the
    /// `include`/`contain` language chain.
    pub fn contain(mut self) -> Self {
        self.ctx.flags.contains = true;
        self
    }

    /// Enables dot/bracket path parsing for `property`.
    pub fn nested(mut self) -> Self {
        self.ctx.flags.nested = true;
        self
    }

    pub fn deep(mut self) -> Self {
        self.ctx.flags.deep = true;
        self
    }

    /// Arms the size chain: the next numeric comparator compares against
    /// the collection's size.
    pub fn size(mut self) -> Self {
        self.ctx.flags.size_chain = true;
        self
    }

    /// Baseline counterpart of [`Expectation::size`] for plain values.
    pub fn length(mut self) -> Self {
        self.ctx.flags.length_chain = true;
        self
    }

    // -- verbs ---------------------------------------------------------

    #[track_caller]
    pub fn empty(self) -> Self {
        self.run("empty", &[])
    }

    #[track_caller]
    pub fn equal(self, expected: impl Into<Value>) -> Self {
        self.run("equal", &[expected.into()])
    }

    #[track_caller]
    pub fn equals(self, expected: impl Into<Value>) -> Self {
        self.run("equals", &[expected.into()])
    }

    #[track_caller]
    pub fn eq(self, expected: impl Into<Value>) -> Self {
        self.run("eq", &[expected.into()])
    }

    #[track_caller]
    pub fn eql(self, expected: impl Into<Value>) -> Self {
        self.run("eql", &[expected.into()])
    }

    #[track_caller]
    pub fn eqls(self, expected: impl Into<Value>) -> Self {
        self.run("eqls", &[expected.into()])
    }

    #[track_caller]
    pub fn include(self, value: impl Into<Value>) -> Self {
        self.run("include", &[value.into()])
    }

    /// Method form of the `contains` alias; the no-argument [`contain`]
    /// chain is the flag-arming form.
    ///
    /// [`contain`]: Expectation::contain
    #[track_caller]
    pub fn contains(self, value: impl Into<Value>) -> Self {
        self.run("contains", &[value.into()])
    }

    /// Asserts key presence. Pass several bare keys, or exactly one
    /// structured value (array, object, or any collection) carrying the key
    /// set.
    #[track_caller]
    pub fn keys<I, T>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let args: Vec<Value> = keys.into_iter().map(Into::into).collect();
        self.run("keys", &args)
    }

    #[track_caller]
    pub fn key(self, key: impl Into<Value>) -> Self {
        self.run("key", &[key.into()])
    }

    /// Asserts presence of `path` and rebinds the chain subject to the
    /// resolved value. With the `nested` flag set, string paths use
    /// dot/bracket syntax.
    #[track_caller]
    pub fn property(self, path: impl Into<Value>) -> Self {
        self.run("property", &[path.into()])
    }

    /// Like [`Expectation::property`], additionally asserting the resolved
    /// value equals `expected`.
    #[track_caller]
    pub fn property_eq(self, path: impl Into<Value>, expected: impl Into<Value>) -> Self {
        self.run("property", &[path.into(), expected.into()])
    }

    /// Asserts the collection's size. The no-argument [`size`] chain arms
    /// the comparator redirection instead.
    ///
    /// [`size`]: Expectation::size
    #[track_caller]
    pub fn size_of(self, size: usize) -> Self {
        self.run("size_of", &[Value::from(size)])
    }

    #[track_caller]
    pub fn length_of(self, length: usize) -> Self {
        self.run("length_of", &[Value::from(length)])
    }

    #[track_caller]
    pub fn least(self, bound: impl Into<Value>) -> Self {
        self.run("least", &[bound.into()])
    }

    #[track_caller]
    pub fn gte(self, bound: impl Into<Value>) -> Self {
        self.run("gte", &[bound.into()])
    }

    #[track_caller]
    pub fn most(self, bound: impl Into<Value>) -> Self {
        self.run("most", &[bound.into()])
    }

    #[track_caller]
    pub fn lte(self, bound: impl Into<Value>) -> Self {
        self.run("lte", &[bound.into()])
    }

    #[track_caller]
    pub fn above(self, bound: impl Into<Value>) -> Self {
        self.run("above", &[bound.into()])
    }

    #[track_caller]
    pub fn gt(self, bound: impl Into<Value>) -> Self {
        self.run("gt", &[bound.into()])
    }

    #[track_caller]
    pub fn greater_than(self, bound: impl Into<Value>) -> Self {
        self.run("greater_than", &[bound.into()])
    }

    #[track_caller]
    pub fn below(self, bound: impl Into<Value>) -> Self {
        self.run("below", &[bound.into()])
    }

    #[track_caller]
    pub fn lt(self, bound: impl Into<Value>) -> Self {
        self.run("lt", &[bound.into()])
    }

    #[track_caller]
    pub fn less_than(self, bound: impl Into<Value>) -> Self {
        self.run("less_than", &[bound.into()])
    }

    /// Inclusive on both ends.
    #[track_caller]
    pub fn within(self, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        self.run("within", &[min.into(), max.into()])
    }
}
