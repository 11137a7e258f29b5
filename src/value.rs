use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use im::{OrdMap, OrdSet, Vector};
use itertools::Itertools;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

use crate::path::Step;

/// A dynamically typed assertion subject.
///
/// The four persistent variants are backed by `im` and carry the
/// collection-aware matcher semantics. `Array` and `Object` model plain
/// host values, so overridden matchers can recognize them as non-collections
/// and fall back to the baseline behavior.
///
/// Equality is structural throughout: two values are equal iff they have the
/// same shape and recursively equal contents, which for the persistent
/// variants is exactly the structural equality of the backing `im` types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Persistent sequence, integer-indexed.
    List(Vector<Value>),
    /// Persistent associative map, key-ordered.
    Map(OrdMap<Value, Value>),
    /// Persistent set of unique elements.
    Set(OrdSet<Value>),
    /// Persistent stack: front of the vector is the top, indexable like a
    /// sequence.
    Stack(Vector<Value>),
    /// Plain (non-persistent) sequence.
    Array(Vec<Value>),
    /// Plain (non-persistent) associative object.
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// Builds a stack from top to bottom: the first item ends up on top.
    pub fn stack<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Stack(items.into_iter().map(Into::into).collect())
    }

    /// True for the four persistent collection variants.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Value::List(_) | Value::Map(_) | Value::Set(_) | Value::Stack(_)
        )
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, Value::List(_) | Value::Stack(_))
    }

    /// Number of direct elements/entries of a collection, `None` otherwise.
    pub fn size(&self) -> Option<usize> {
        match self {
            Value::List(v) | Value::Stack(v) => Some(v.len()),
            Value::Map(m) => Some(m.len()),
            Value::Set(s) => Some(s.len()),
            _ => None,
        }
    }

    /// Length of a plain value (string chars, array elements, object
    /// entries), `None` otherwise. Used by the baseline matchers.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(a) => Some(a.len()),
            Value::Object(o) => Some(o.len()),
            _ => None,
        }
    }

    /// The value as a non-negative integer index, when it is one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Value::Number(n) => n.as_u64().and_then(|u| usize::try_from(u).ok()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Direct single-level lookup: index into a sequence/stack, key into a
    /// map or plain object/array.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::List(v) | Value::Stack(v) => key.as_index().and_then(|i| v.get(i)),
            Value::Map(m) => m.get(key),
            Value::Array(a) => key.as_index().and_then(|i| a.get(i)),
            Value::Object(o) => match key {
                Value::String(k) => o.get(k),
                _ => None,
            },
            _ => None,
        }
    }

    /// Key presence. For sets this is element membership.
    pub fn has(&self, key: &Value) -> bool {
        match self {
            Value::Set(s) => s.contains(key),
            _ => self.get(key).is_some(),
        }
    }

    fn get_step(&self, step: &Step) -> Option<&Value> {
        match (self, step) {
            (Value::List(v), Step::Index(i)) | (Value::Stack(v), Step::Index(i)) => v.get(*i),
            (Value::Map(m), Step::Key(k)) => m.get(&Value::String(k.clone())),
            (Value::Map(m), Step::Index(i)) => m.get(&Value::from(*i)),
            (Value::Array(a), Step::Index(i)) => a.get(*i),
            (Value::Object(o), Step::Key(k)) => o.get(k.as_str()),
            _ => None,
        }
    }

    /// Walks a parsed path through arbitrarily nested sequence/map values.
    pub fn get_in(&self, path: &[Step]) -> Option<&Value> {
        let mut current = self;
        for step in path {
            current = current.get_step(step)?;
        }
        Some(current)
    }

    pub fn has_in(&self, path: &[Step]) -> bool {
        self.get_in(path).is_some()
    }

    /// Membership check. Sequences, stacks, and sets look for a structurally
    /// equal element; maps look through their values, or — when the needle is
    /// itself a map — check that every one of its entries is present.
    pub fn includes(&self, needle: &Value) -> bool {
        match self {
            Value::List(v) | Value::Stack(v) => v.iter().any(|e| e == needle),
            Value::Set(s) => s.contains(needle),
            Value::Map(m) => match needle {
                Value::Map(sub) => sub.iter().all(|(k, v)| m.get(k) == Some(v)),
                _ => m.values().any(|v| v == needle),
            },
            _ => false,
        }
    }

    /// Keys of a keyed value as an ordered sequence.
    pub fn key_seq(&self) -> Vec<Value> {
        match self {
            Value::Map(m) => m.keys().cloned().collect(),
            Value::Object(o) => o.keys().map(|k| Value::String(k.clone())).collect(),
            _ => Vec::new(),
        }
    }

    /// Elements of a sequential, set, stack, or plain-array value.
    pub fn elements(&self) -> Vec<Value> {
        match self {
            Value::List(v) | Value::Stack(v) => v.iter().cloned().collect(),
            Value::Set(s) => s.iter().cloned().collect(),
            Value::Array(a) => a.clone(),
            _ => Vec::new(),
        }
    }

    /// Plain-JSON rendering, used for the expected/actual payloads of
    /// failure output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::List(_) => 4,
            Value::Map(_) => 5,
            Value::Set(_) => 6,
            Value::Stack(_) => 7,
            Value::Array(_) => 8,
            Value::Object(_) => 9,
        }
    }
}

// Numbers keep serde_json's equality (1 != 1.0) while gaining a total order;
// the string tiebreak keeps `cmp` consistent with `eq` for same-magnitude
// values of different numeric shapes.
fn cmp_numbers(a: &Number, b: &Number) -> Ordering {
    let fa = a.as_f64().unwrap_or(f64::NAN);
    let fb = b.as_f64().unwrap_or(f64::NAN);
    fa.total_cmp(&fb)
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => cmp_numbers(a, b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) | (Value::Stack(a), Value::Stack(b)) => {
                a.iter().cmp(b.iter())
            }
            (Value::Map(a), Value::Map(b)) => a.iter().cmp(b.iter()),
            (Value::Set(a), Value::Set(b)) => a.iter().cmp(b.iter()),
            (Value::Array(a), Value::Array(b)) => a.cmp(b),
            (Value::Object(a), Value::Object(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn key_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(v) | Value::Stack(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for item in v {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Set(s) => {
                let mut seq = serializer.serialize_seq(Some(s.len()))?;
                for item in s {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Array(a) => {
                let mut seq = serializer.serialize_seq(Some(a.len()))?;
                for item in a {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(&key_string(k), v)?;
                }
                map.end()
            }
            Value::Object(o) => {
                let mut map = serializer.serialize_map(Some(o.len()))?;
                for (k, v) in o {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::List(v) => write_seq(f, "List", v.iter()),
            Value::Stack(v) => write_seq(f, "Stack", v.iter()),
            Value::Set(s) => {
                if s.is_empty() {
                    write!(f, "Set {{}}")
                } else {
                    write!(f, "Set {{ {} }}", s.iter().join(", "))
                }
            }
            Value::Map(m) => {
                if m.is_empty() {
                    write!(f, "Map {{}}")
                } else {
                    let entries = m
                        .iter()
                        .map(|(k, v)| format!("{}: {v}", display_key(k)))
                        .join(", ");
                    write!(f, "Map {{ {entries} }}")
                }
            }
            other => write!(f, "{}", other.to_json()),
        }
    }
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    tag: &str,
    mut items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    match items.next() {
        None => write!(f, "{tag} []"),
        Some(first) => {
            write!(f, "{tag} [ {first}")?;
            for item in items {
                write!(f, ", {item}")?;
            }
            write!(f, " ]")
        }
    }
}

fn display_key(key: &Value) -> String {
    match key {
        Value::String(s) => serde_json::Value::String(s.clone()).to_string(),
        other => other.to_string(),
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(Number::from(n as u64))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vector<Value>> for Value {
    fn from(v: Vector<Value>) -> Self {
        Value::List(v)
    }
}

impl From<OrdMap<Value, Value>> for Value {
    fn from(m: OrdMap<Value, Value>) -> Self {
        Value::Map(m)
    }
}

impl From<OrdSet<Value>> for Value {
    fn from(s: OrdSet<Value>) -> Self {
        Value::Set(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
