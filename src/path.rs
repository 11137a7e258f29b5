use serde::Serialize;
use thiserror::Error;

use crate::value::Value;

/// One step of a nested-property walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Step {
    Key(String),
    Index(usize),
}

impl From<&str> for Step {
    fn from(key: &str) -> Self {
        Step::Key(key.to_string())
    }
}

impl From<String> for Step {
    fn from(key: String) -> Self {
        Step::Key(key)
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Self {
        Step::Index(index)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("property path required")]
    Empty,
    #[error("unsupported path step: {0}")]
    BadStep(String),
}

/// Parses a dot/bracket property path into its steps.
///
/// An unescaped `[` starts a new segment as if a `.` preceded it, so
/// `a.b[1]` splits into `a`, `b`, `[1]`. A segment of the exact form
/// `[<digits>]` becomes an index; anything else becomes a key with the
/// escapes `\.`, `\[`, `\]` reduced to their literal character.
///
/// ```
/// use im_expect::path::{parse_path, Step};
///
/// let steps = parse_path("items[2].name").unwrap();
/// assert_eq!(
///     steps,
///     vec![Step::Key("items".into()), Step::Index(2), Step::Key("name".into())]
/// );
/// ```
pub fn parse_path(path: &str) -> Result<Vec<Step>, PathError> {
    let mut segments: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                // keep the escape; it is resolved per segment below, after
                // the index check ran against the raw text
                Some(&d) if is_delimiter(d) => {
                    chars.next();
                    current.push('\\');
                    current.push(d);
                }
                _ => current.push('\\'),
            },
            '.' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                current.push('[');
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    if segments.is_empty() {
        return Err(PathError::Empty);
    }
    Ok(segments.into_iter().map(segment_to_step).collect())
}

fn is_delimiter(c: char) -> bool {
    c == '.' || c == '[' || c == ']'
}

fn segment_to_step(segment: String) -> Step {
    if let Some(inner) = segment
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
    {
        if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(index) = inner.parse::<usize>() {
                return Step::Index(index);
            }
        }
    }
    Step::Key(unescape(&segment))
}

fn unescape(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&d) if is_delimiter(d) => {
                    chars.next();
                    out.push(d);
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Inverse of [`parse_path`] for paths whose keys avoid raw delimiters:
/// delimiter characters inside keys are backslash-escaped, indices render
/// as `[n]` with no separator.
pub fn path_to_string(steps: &[Step]) -> String {
    let mut out = String::new();
    for (i, step) in steps.iter().enumerate() {
        match step {
            Step::Index(n) => {
                out.push('[');
                out.push_str(&n.to_string());
                out.push(']');
            }
            Step::Key(key) => {
                if i > 0 {
                    out.push('.');
                }
                for c in key.chars() {
                    if is_delimiter(c) {
                        out.push('\\');
                    }
                    out.push(c);
                }
            }
        }
    }
    out
}

/// How a `property` argument addresses the subject.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyPath {
    /// Single-level lookup with a literal key.
    Flat(Value),
    /// Multi-step walk through nested values.
    Steps(Vec<Step>),
}

/// Classifies a `property` argument.
///
/// String arguments are parsed by [`parse_path`] only when the `nested` flag
/// is set; otherwise the whole string is one literal key. A materialized
/// sequence of keys/indices is walked either way.
pub fn property_path(arg: &Value, nested: bool) -> Result<PropertyPath, PathError> {
    match arg {
        Value::String(s) if nested => Ok(PropertyPath::Steps(parse_path(s)?)),
        Value::List(_) | Value::Stack(_) | Value::Array(_) => {
            let steps = arg
                .elements()
                .into_iter()
                .map(|element| match element {
                    Value::String(key) => Ok(Step::Key(key)),
                    ref v => v
                        .as_index()
                        .map(Step::Index)
                        .ok_or_else(|| PathError::BadStep(element.to_string())),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if steps.is_empty() {
                return Err(PathError::Empty);
            }
            Ok(PropertyPath::Steps(steps))
        }
        other => Ok(PropertyPath::Flat(other.clone())),
    }
}
