//! Collection-aware overrides for the baseline matcher set.
//!
//! [`install`] wraps each verb with a guard: a recognized persistent
//! collection gets collection semantics, anything else is handed to the
//! previously registered handler unchanged.

use std::sync::Arc;

use tracing::debug;

use crate::baseline::{
    describe_property, f64_arg, CmpOp, COMPARATOR_ALIASES, EQUAL_ALIASES, INCLUDE_ALIASES,
    KEYS_ALIASES,
};
use crate::errors::{AssertError, Result};
use crate::keys;
use crate::path::{property_path, PropertyPath};
use crate::registry::{Handler, Registry};
use crate::value::Value;

/// Installs every collection-aware override into `registry`.
///
/// Installation is process-wide and one-shot by design; installing twice
/// wraps the overrides around themselves and is a caller mistake.
pub fn install(registry: &mut Registry) {
    registry.overwrite("empty", collection_empty);
    for name in EQUAL_ALIASES {
        registry.overwrite(name, collection_equal);
    }
    for name in INCLUDE_ALIASES {
        registry.overwrite(name, collection_include);
    }
    for name in KEYS_ALIASES {
        registry.overwrite(name, keyed_keys);
    }
    registry.overwrite("property", collection_property);
    registry.add("size_of", size_of());
    for (name, op) in COMPARATOR_ALIASES {
        registry.overwrite(name, size_comparator(op));
    }
    registry.overwrite("within", size_within);
}

/// The `assertIsIterable` equivalent: collections pass, everything else
/// fails loudly (never inverted by `not()`).
fn require_collection(subject: &Value) -> Result<usize> {
    subject
        .size()
        .ok_or_else(|| AssertError::failure(format!("expected {subject} to be a collection")))
}

fn usize_arg(args: &[Value], index: usize) -> Result<usize> {
    args.get(index)
        .and_then(Value::as_index)
        .ok_or_else(|| AssertError::usage("a non-negative integer bound is required"))
}

fn collection_empty(next: Handler) -> Handler {
    Arc::new(move |ctx, args| {
        if !ctx.subject.is_collection() {
            return next(ctx, args);
        }
        let size = require_collection(&ctx.subject)?;
        ctx.assert(
            size == 0,
            format!("expected {} to be empty but got size {size}", ctx.subject),
            format!("expected {} to not be empty", ctx.subject),
            None,
            None,
        )
    })
}

fn collection_equal(next: Handler) -> Handler {
    Arc::new(move |ctx, args| {
        if !ctx.subject.is_collection() {
            debug!("equal: non-collection subject, deferring to base matcher");
            return next(ctx, args);
        }
        let expected = args.first().cloned().unwrap_or(Value::Null);
        ctx.assert(
            ctx.subject == expected,
            format!("expected {} to equal {}", ctx.subject, expected),
            format!("expected {} to not equal {}", ctx.subject, expected),
            Some(expected.to_json().to_string()),
            Some(ctx.subject.to_json().to_string()),
        )
    })
}

fn collection_include(next: Handler) -> Handler {
    Arc::new(move |ctx, args| {
        if !ctx.subject.is_collection() {
            return next(ctx, args);
        }
        let needle = args.first().cloned().unwrap_or(Value::Null);
        ctx.assert(
            ctx.subject.includes(&needle),
            format!("expected {} to include {}", ctx.subject, needle),
            format!("expected {} to not include {}", ctx.subject, needle),
            Some(needle.to_json().to_string()),
            Some(ctx.subject.to_string()),
        )
    })
}

fn keyed_keys(next: Handler) -> Handler {
    Arc::new(move |ctx, args| {
        if !ctx.subject.is_keyed() {
            return next(ctx, args);
        }
        let keys = keys::normalize(args)?;
        let any = ctx.flags.any;
        let contains = ctx.flags.contains;
        let ok = if any {
            keys.iter().any(|k| ctx.subject.has(k))
        } else {
            // exact key-set semantics unless the `contain` chain relaxed
            // them to a subset match; the count check applies regardless of
            // negation so `not()` inverts exactly the positive assertion
            let mut all = keys.iter().all(|k| ctx.subject.has(k));
            if !contains {
                all = all && ctx.subject.size() == Some(keys.len());
            }
            all
        };
        let stem = keys::describe(&keys, any, contains);
        let key_payload =
            serde_json::Value::Array(keys.iter().map(Value::to_json).collect()).to_string();
        ctx.assert(
            ok,
            format!("expected {} to {stem}", ctx.subject),
            format!("expected {} to not {stem}", ctx.subject),
            Some(key_payload),
            Some(ctx.subject.to_string()),
        )
    })
}

fn collection_property(next: Handler) -> Handler {
    Arc::new(move |ctx, args| {
        if !ctx.subject.is_collection() {
            return next(ctx, args);
        }
        let arg = args.first().cloned().unwrap_or(Value::Null);
        let expected = args.get(1).cloned();
        let nested = ctx.flags.nested || ctx.flags.deep;
        let descriptor = if nested { "nested " } else { "" };
        let path =
            property_path(&arg, nested).map_err(|e| AssertError::usage(e.to_string()))?;
        let (has, value) = match &path {
            PropertyPath::Flat(key) => (ctx.subject.has(key), ctx.subject.get(key).cloned()),
            PropertyPath::Steps(steps) => {
                (ctx.subject.has_in(steps), ctx.subject.get_in(steps).cloned())
            }
        };
        let shown = describe_property(&path);

        // With both `not()` and an expected value, mere presence is not
        // enough to fail: the combined presence-and-value check below
        // governs, so a missing property lets the negated assertion pass.
        if !ctx.flags.negate || expected.is_none() {
            ctx.assert(
                has,
                format!(
                    "expected {} to have {descriptor}property {shown}",
                    ctx.subject
                ),
                format!(
                    "expected {} to not have {descriptor}property {shown}",
                    ctx.subject
                ),
                None,
                None,
            )?;
        }
        if let Some(expected) = expected {
            let actual = value.clone().unwrap_or(Value::Null);
            ctx.assert(
                has && actual == expected,
                format!(
                    "expected {} to have {descriptor}property {shown} of {expected}, but got {actual}",
                    ctx.subject
                ),
                format!(
                    "expected {} to not have {descriptor}property {shown} of {actual}",
                    ctx.subject
                ),
                Some(expected.to_json().to_string()),
                Some(actual.to_json().to_string()),
            )?;
        }
        ctx.rebind(value.unwrap_or(Value::Null));
        Ok(())
    })
}

fn size_of() -> Handler {
    Arc::new(|ctx, args| {
        let size = require_collection(&ctx.subject)?;
        let n = usize_arg(args, 0)?;
        ctx.assert(
            size == n,
            format!("expected {} to have size {n} but got {size}", ctx.subject),
            format!("expected {} to not have size {size}", ctx.subject),
            Some(n.to_string()),
            Some(size.to_string()),
        )
    })
}

fn size_phrase(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Least => "of at least",
        CmpOp::Most => "of at most",
        CmpOp::Above => "above",
        CmpOp::Below => "below",
    }
}

fn size_comparator(op: CmpOp) -> impl FnOnce(Handler) -> Handler {
    move |next| {
        Arc::new(move |ctx, args| {
            if !ctx.flags.size_chain {
                return next(ctx, args);
            }
            let size = require_collection(&ctx.subject)?;
            let n = f64_arg(args, 0)?;
            let phrase = size_phrase(op);
            ctx.assert(
                op.eval(size as f64, n),
                format!(
                    "expected {} to have a size {phrase} {n} but got {size}",
                    ctx.subject
                ),
                format!(
                    "expected {} to not have a size {phrase} {n} but got {size}",
                    ctx.subject
                ),
                Some(n.to_string()),
                Some(size.to_string()),
            )
        })
    }
}

fn size_within(next: Handler) -> Handler {
    Arc::new(move |ctx, args| {
        if !ctx.flags.size_chain {
            return next(ctx, args);
        }
        let size = require_collection(&ctx.subject)?;
        let min = f64_arg(args, 0)?;
        let max = f64_arg(args, 1)?;
        ctx.assert(
            min <= size as f64 && size as f64 <= max,
            format!(
                "expected {} to have a size within {min}..{max} but got {size}",
                ctx.subject
            ),
            format!(
                "expected {} to not have a size within {min}..{max} but got {size}",
                ctx.subject
            ),
            Some(format!("{min}..{max}")),
            Some(size.to_string()),
        )
    })
}
