//! Argument normalization and message rendering for the `keys` matcher.

use itertools::Itertools;

use crate::errors::{AssertError, Result};
use crate::value::Value;

/// Classified form of the raw `keys` argument list: either multiple bare
/// scalar keys, or exactly one structured argument carrying the key set.
#[derive(Clone, Debug, PartialEq)]
pub enum KeysArg {
    Scalars(Vec<Value>),
    Structured(Value),
}

impl KeysArg {
    /// Sorts the raw arguments into one of the two accepted shapes. Mixing a
    /// structured argument with any other argument is a usage error, not an
    /// assertion failure.
    pub fn classify(args: &[Value]) -> Result<Self> {
        match args {
            [single] if is_structured(single) => Ok(KeysArg::Structured(single.clone())),
            _ if args.iter().any(is_structured) => Err(AssertError::usage(
                "keys must be given a single argument of Array|Object|String|Collection, \
                 or multiple String arguments",
            )),
            _ => Ok(KeysArg::Scalars(args.to_vec())),
        }
    }

    /// Collapses to the ordered key sequence. Sequences, stacks, and sets
    /// contribute their elements as keys; keyed shapes contribute their own
    /// keys. An empty key set is a usage error.
    pub fn into_keys(self) -> Result<Vec<Value>> {
        let keys = match self {
            KeysArg::Structured(value) => match &value {
                Value::Map(_) | Value::Object(_) => value.key_seq(),
                _ => value.elements(),
            },
            KeysArg::Scalars(values) => values,
        };
        if keys.is_empty() {
            return Err(AssertError::usage("keys required"));
        }
        Ok(keys)
    }
}

fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_)) || value.is_collection()
}

/// Normalizes the raw `keys` arguments into an ordered sequence of scalar
/// keys, or one of the two usage errors.
pub fn normalize(args: &[Value]) -> Result<Vec<Value>> {
    KeysArg::classify(args)?.into_keys()
}

/// Builds the `have key "x"` / `contain keys "x", and "y"` message stem.
pub fn describe(keys: &[Value], any: bool, contains: bool) -> String {
    let verb = if contains { "contain" } else { "have" };
    match keys {
        [single] => format!("{verb} key {single}"),
        _ => {
            let mut rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
            let last = rendered.pop().unwrap_or_default();
            let conjunction = if any { "or" } else { "and" };
            format!(
                "{verb} keys {}, {conjunction} {last}",
                rendered.iter().join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn scalars(keys: &[&str]) -> Vec<Value> {
        keys.iter().map(|k| Value::from(*k)).collect()
    }

    #[test]
    fn bare_scalars_pass_through_in_order() {
        let keys = normalize(&scalars(&["x", "y"])).unwrap();
        assert_eq!(keys, scalars(&["x", "y"]));
    }

    #[test]
    fn structured_shapes_collapse_to_their_keys() {
        let from_map = normalize(&[Value::map([("bar", 6), ("foo", 7)])]).unwrap();
        assert_eq!(from_map, scalars(&["bar", "foo"]));

        let from_list = normalize(&[Value::list(["bar", "foo"])]).unwrap();
        assert_eq!(from_list, scalars(&["bar", "foo"]));

        let from_set = normalize(&[Value::set(["bar", "foo"])]).unwrap();
        assert_eq!(from_set, scalars(&["bar", "foo"]));

        let from_object = normalize(&[Value::from(json!({"bar": 6, "foo": 7}))]).unwrap();
        assert_eq!(from_object, scalars(&["bar", "foo"]));
    }

    #[test]
    fn mixing_structured_and_bare_arguments_is_a_usage_error() {
        let err = normalize(&[Value::list(["x"]), Value::from("y")]).unwrap_err();
        assert!(err.is_usage());
        assert!(err.full_message().starts_with("keys must be given"));
    }

    #[test]
    fn empty_key_sets_are_usage_errors() {
        assert!(normalize(&[]).unwrap_err().is_usage());
        let err = normalize(&[Value::list::<[&str; 0], &str>([])]).unwrap_err();
        assert_eq!(err.full_message(), "keys required");
    }

    #[test]
    fn describe_joins_with_the_quantifier_conjunction() {
        assert_eq!(describe(&scalars(&["x"]), false, false), "have key \"x\"");
        assert_eq!(
            describe(&scalars(&["x", "y"]), false, true),
            "contain keys \"x\", and \"y\""
        );
        assert_eq!(
            describe(&scalars(&["x", "y", "z"]), true, false),
            "have keys \"x\", \"y\", or \"z\""
        );
    }
}
