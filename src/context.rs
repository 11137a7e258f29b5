use crate::errors::{AssertError, Result};
use crate::value::Value;

/// Chainable flags for one assertion expression.
///
/// Each `expect()` gets a fresh record, so no flag can leak between
/// top-level assertions. Flag methods on the chain set these; matchers read
/// them to pick their semantics.
#[derive(Clone, Copy, Debug, Default)]
pub struct Flags {
    pub negate: bool,
    /// Existential quantification for `keys`; universal when unset.
    pub any: bool,
    /// Subset semantics for `keys` (the `contain` language chain).
    pub contains: bool,
    /// Dot/bracket path parsing for `property`.
    pub nested: bool,
    pub deep: bool,
    /// Size Chain Controller: redirects the numeric comparators to compare
    /// against the collection's size.
    pub size_chain: bool,
    /// Baseline counterpart of `size_chain` for plain values.
    pub length_chain: bool,
}

/// Per-expression assertion state: the subject under test plus the flag
/// record, threaded mutably through every chained matcher call.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub subject: Value,
    pub flags: Flags,
}

impl Ctx {
    pub fn new(subject: Value) -> Self {
        Ctx {
            subject,
            flags: Flags::default(),
        }
    }

    /// Reporting primitive. Applies `negate`, then either passes or produces
    /// the structured failure with the matching message template.
    pub fn assert(
        &self,
        ok: bool,
        msg: impl Into<String>,
        neg_msg: impl Into<String>,
        expected: Option<String>,
        actual: Option<String>,
    ) -> Result<()> {
        let pass = if self.flags.negate { !ok } else { ok };
        if pass {
            return Ok(());
        }
        let message = if self.flags.negate {
            neg_msg.into()
        } else {
            msg.into()
        };
        Err(AssertError::Failure {
            message,
            expected,
            actual,
        })
    }

    /// Rebinds the chain subject; `property` uses this so assertions that
    /// follow apply to the resolved value.
    pub fn rebind(&mut self, value: Value) {
        self.subject = value;
    }
}
