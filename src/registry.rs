use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::context::Ctx;
use crate::errors::{AssertError, Result};
use crate::value::Value;

/// A matcher implementation: checks the subject held in `ctx` against the
/// call arguments, mutating the context where the verb requires it
/// (`property` rebinds the subject).
pub type Handler = Arc<dyn Fn(&mut Ctx, &[Value]) -> Result<()> + Send + Sync>;

/// Named matcher table.
///
/// Extensions replace entries through [`Registry::overwrite`], which hands
/// the wrapper the previously registered handler. The wrapper is expected to
/// delegate to it whenever its guard predicate does not hold, so a
/// non-collection subject always reaches the original behavior unchanged.
#[derive(Clone, Default)]
pub struct Registry {
    inner: HashMap<&'static str, Handler>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh matcher under `name`.
    pub fn add(&mut self, name: &'static str, handler: Handler) {
        self.inner.insert(name, handler);
    }

    /// Replaces the matcher for `name` with `wrap(previous)`.
    pub fn overwrite<F>(&mut self, name: &'static str, wrap: F)
    where
        F: FnOnce(Handler) -> Handler,
    {
        let previous = self
            .inner
            .remove(name)
            .unwrap_or_else(|| unknown_matcher(name));
        self.inner.insert(name, wrap(previous));
    }

    pub fn get(&self, name: &str) -> Option<Handler> {
        self.inner.get(name).cloned()
    }

    /// Dispatches one matcher call.
    pub fn run(&self, name: &str, ctx: &mut Ctx, args: &[Value]) -> Result<()> {
        trace!(matcher = name, "dispatch");
        match self.get(name) {
            Some(handler) => handler(ctx, args),
            None => Err(AssertError::usage(format!("unknown matcher `{name}`"))),
        }
    }
}

fn unknown_matcher(name: &'static str) -> Handler {
    Arc::new(move |_, _| Err(AssertError::usage(format!("unknown matcher `{name}`"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn failing(message: &'static str) -> Handler {
        Arc::new(move |_, _| Err(AssertError::failure(message)))
    }

    #[test]
    fn overwrite_hands_the_previous_handler_to_the_wrapper() {
        let mut registry = Registry::new();
        registry.add("verb", failing("base"));
        registry.overwrite("verb", |next| {
            Arc::new(move |ctx, args| {
                if ctx.subject.is_collection() {
                    Err(AssertError::failure("override"))
                } else {
                    next(ctx, args)
                }
            })
        });

        let mut plain = Ctx::new(Value::from(1));
        let err = registry.run("verb", &mut plain, &[]).unwrap_err();
        assert_eq!(err.full_message(), "base");

        let mut collection = Ctx::new(Value::list([1]));
        let err = registry.run("verb", &mut collection, &[]).unwrap_err();
        assert_eq!(err.full_message(), "override");
    }

    #[test]
    fn unknown_names_are_usage_errors() {
        let registry = Registry::new();
        let mut ctx = Ctx::new(Value::Null);
        let err = registry.run("nope", &mut ctx, &[]).unwrap_err();
        assert!(err.is_usage());
    }
}
