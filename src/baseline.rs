//! The host-original matcher set for plain (non-collection) values.
//!
//! Every override installed by [`crate::matchers`] falls back here, so this
//! module defines the behavior a non-collection subject must keep seeing
//! after the extension is installed: deep equality over plain values,
//! `length`-based emptiness and comparisons, own-key iteration for `keys`.

use std::sync::Arc;

use crate::context::Ctx;
use crate::errors::{AssertError, Result};
use crate::keys;
use crate::path::{property_path, PropertyPath};
use crate::registry::{Handler, Registry};
use crate::value::Value;

pub const EQUAL_ALIASES: [&str; 5] = ["equal", "equals", "eq", "eql", "eqls"];
pub const INCLUDE_ALIASES: [&str; 4] = ["include", "includes", "contain", "contains"];
pub const KEYS_ALIASES: [&str; 2] = ["keys", "key"];

/// Numeric comparator shape shared by the baseline and the size-chain
/// overrides.
#[derive(Clone, Copy, Debug)]
pub enum CmpOp {
    Least,
    Most,
    Above,
    Below,
}

impl CmpOp {
    pub fn eval(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CmpOp::Least => lhs >= rhs,
            CmpOp::Most => lhs <= rhs,
            CmpOp::Above => lhs > rhs,
            CmpOp::Below => lhs < rhs,
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            CmpOp::Least => "at least",
            CmpOp::Most => "at most",
            CmpOp::Above => "above",
            CmpOp::Below => "below",
        }
    }
}

pub const COMPARATOR_ALIASES: [(&str, CmpOp); 10] = [
    ("least", CmpOp::Least),
    ("gte", CmpOp::Least),
    ("most", CmpOp::Most),
    ("lte", CmpOp::Most),
    ("above", CmpOp::Above),
    ("gt", CmpOp::Above),
    ("greater_than", CmpOp::Above),
    ("below", CmpOp::Below),
    ("lt", CmpOp::Below),
    ("less_than", CmpOp::Below),
];

/// Builds the registry of original matchers that extensions overwrite.
pub fn base_registry() -> Registry {
    let mut registry = Registry::new();
    registry.add("empty", empty());
    for name in EQUAL_ALIASES {
        registry.add(name, equal());
    }
    for name in INCLUDE_ALIASES {
        registry.add(name, include());
    }
    for name in KEYS_ALIASES {
        registry.add(name, plain_keys());
    }
    registry.add("property", property());
    registry.add("length_of", length_of());
    for (name, op) in COMPARATOR_ALIASES {
        registry.add(name, comparator(op));
    }
    registry.add("within", within());
    registry
}

pub(crate) fn f64_arg(args: &[Value], index: usize) -> Result<f64> {
    args.get(index)
        .and_then(Value::as_f64)
        .ok_or_else(|| AssertError::usage("a numeric bound is required"))
}

fn measured(ctx: &Ctx) -> Result<(f64, bool)> {
    if ctx.flags.length_chain {
        let len = ctx.subject.length().ok_or_else(|| {
            AssertError::failure(format!("expected {} to have a length", ctx.subject))
        })?;
        Ok((len as f64, true))
    } else {
        let n = ctx.subject.as_f64().ok_or_else(|| {
            AssertError::failure(format!("expected {} to be a number", ctx.subject))
        })?;
        Ok((n, false))
    }
}

fn empty() -> Handler {
    Arc::new(|ctx, _args| {
        let len = ctx.subject.length().ok_or_else(|| {
            AssertError::failure(format!(
                "expected {} to be a string, an array, or an object",
                ctx.subject
            ))
        })?;
        ctx.assert(
            len == 0,
            format!("expected {} to be empty", ctx.subject),
            format!("expected {} to not be empty", ctx.subject),
            None,
            None,
        )
    })
}

fn equal() -> Handler {
    Arc::new(|ctx, args| {
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

fn include() -> Handler {
    Arc::new(|ctx, args| {
        let needle = args.first().cloned().unwrap_or(Value::Null);
        let ok = match (&ctx.subject, &needle) {
            (Value::String(s), Value::String(sub)) => s.contains(sub.as_str()),
            (Value::Array(items), _) => items.contains(&needle),
            (Value::Object(entries), Value::Object(sub)) => sub
                .iter()
                .all(|(k, v)| entries.get(k) == Some(v)),
            _ => false,
        };
        ctx.assert(
            ok,
            format!("expected {} to include {}", ctx.subject, needle),
            format!("expected {} to not include {}", ctx.subject, needle),
            None,
            None,
        )
    })
}

fn plain_keys() -> Handler {
    Arc::new(|ctx, args| {
        let keys = keys::normalize(args)?;
        let any = ctx.flags.any;
        let contains = ctx.flags.contains;
        let ok = if any {
            keys.iter().any(|k| ctx.subject.has(k))
        } else {
            let mut all = keys.iter().all(|k| ctx.subject.has(k));
            if !contains {
                all = all && ctx.subject.length() == Some(keys.len());
            }
            all
        };
        let stem = keys::describe(&keys, any, contains);
        ctx.assert(
            ok,
            format!("expected {} to {stem}", ctx.subject),
            format!("expected {} to not {stem}", ctx.subject),
            None,
            Some(ctx.subject.to_string()),
        )
    })
}

fn property() -> Handler {
    Arc::new(|ctx, args| {
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

/// Renders a property argument for messages: literal keys inspect as
/// themselves, step walks as a JSON array.
pub fn describe_property(path: &PropertyPath) -> String {
    match path {
        PropertyPath::Flat(key) => key.to_string(),
        PropertyPath::Steps(steps) => {
            serde_json::to_string(steps).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

fn length_of() -> Handler {
    Arc::new(|ctx, args| {
        let len = ctx.subject.length().ok_or_else(|| {
            AssertError::failure(format!("expected {} to have a length", ctx.subject))
        })?;
        let n = f64_arg(args, 0)?;
        ctx.assert(
            len as f64 == n,
            format!("expected {} to have a length of {n} but got {len}", ctx.subject),
            format!("expected {} to not have a length of {len}", ctx.subject),
            Some(n.to_string()),
            Some(len.to_string()),
        )
    })
}

fn comparator(op: CmpOp) -> Handler {
    Arc::new(move |ctx, args| {
        let bound = f64_arg(args, 0)?;
        let (measured, by_length) = measured(ctx)?;
        let phrase = op.phrase();
        let (msg, neg_msg) = if by_length {
            (
                format!(
                    "expected {} to have a length {phrase} {bound} but got {measured}",
                    ctx.subject
                ),
                format!(
                    "expected {} to not have a length {phrase} {bound}",
                    ctx.subject
                ),
            )
        } else {
            (
                format!("expected {} to be {phrase} {bound}", ctx.subject),
                format!("expected {} to not be {phrase} {bound}", ctx.subject),
            )
        };
        ctx.assert(
            op.eval(measured, bound),
            msg,
            neg_msg,
            Some(bound.to_string()),
            Some(measured.to_string()),
        )
    })
}

fn within() -> Handler {
    Arc::new(|ctx, args| {
        let min = f64_arg(args, 0)?;
        let max = f64_arg(args, 1)?;
        let (measured, by_length) = measured(ctx)?;
        let (msg, neg_msg) = if by_length {
            (
                format!(
                    "expected {} to have a length within {min}..{max} but got {measured}",
                    ctx.subject
                ),
                format!(
                    "expected {} to not have a length within {min}..{max}",
                    ctx.subject
                ),
            )
        } else {
            (
                format!("expected {} to be within {min}..{max}", ctx.subject),
                format!("expected {} to not be within {min}..{max}", ctx.subject),
            )
        };
        ctx.assert(
            min <= measured && measured <= max,
            msg,
            neg_msg,
            Some(format!("{min}..{max}")),
            Some(measured.to_string()),
        )
    })
}
