//! Path-addressed reads and copy-on-write updates of nested JSON config.
//!
//! A path such as `functions.0.color` is parsed once into typed segments:
//! all-digit segments address array elements, every other segment addresses an
//! object key. Updates never touch the input value; they return a new root.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("config path is empty")]
    Empty,

    #[error("config path `{path}` has an empty segment")]
    EmptySegment { path: String },

    #[error("index segment `{segment}` is out of range")]
    IndexOverflow { segment: String },

    #[error("segment `{segment}` expects {expected} but found {found}")]
    KindMismatch {
        segment: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("index {index} is beyond array length {len} (only appending at {len} is allowed)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("nothing to remove at `{path}`")]
    NotFound { path: String },
}

/// One typed step of a config path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    fn parse(raw: &str, path: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::EmptySegment {
                path: path.to_owned(),
            });
        }
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            return raw
                .parse::<usize>()
                .map(Self::Index)
                .map_err(|_| PathError::IndexOverflow {
                    segment: raw.to_owned(),
                });
        }
        Ok(Self::Key(raw.to_owned()))
    }

    fn expected_container(&self) -> &'static str {
        match self {
            Self::Key(_) => "an object",
            Self::Index(_) => "an array",
        }
    }

    fn empty_container(&self) -> Value {
        match self {
            Self::Key(_) => Value::Object(Map::new()),
            Self::Index(_) => Value::Array(Vec::new()),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Parsed dot-delimited config path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    segments: SmallVec<[PathSegment; 4]>,
}

impl ConfigPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let segments = path
            .split('.')
            .map(|raw| PathSegment::parse(raw, path))
            .collect::<Result<SmallVec<_>, _>>()?;
        Ok(Self { segments })
    }

    /// Single-segment path addressing the object key `key`.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        let mut segments = SmallVec::new();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    #[must_use]
    pub fn child(mut self, segment: PathSegment) -> Self {
        self.segments.push(segment);
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Reads the value at this path without creating anything.
    #[must_use]
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| match (segment, node) {
                (PathSegment::Key(key), Value::Object(map)) => map.get(key),
                (PathSegment::Index(index), Value::Array(items)) => items.get(*index),
                _ => None,
            })
    }

    /// Returns a copy of `root` with `value` written at this path.
    ///
    /// Missing or `null` containers along the way are created as arrays for
    /// index segments and objects for key segments. The final segment is
    /// overwritten without merging.
    pub fn set(&self, root: &Value, value: Value) -> Result<Value, PathError> {
        let mut updated = root.clone();
        let (last, parents) = self
            .segments
            .split_last()
            .ok_or(PathError::Empty)?;

        let mut node = &mut updated;
        for (i, segment) in parents.iter().enumerate() {
            let next = &self.segments[i + 1];
            node = descend_or_create(node, segment, next)?;
        }
        write_slot(node, last, value)?;
        Ok(updated)
    }

    /// Returns a copy of `root` without the element at this path, plus the
    /// removed value. Array elements after a removed index shift down.
    pub fn remove(&self, root: &Value) -> Result<(Value, Value), PathError> {
        let mut updated = root.clone();
        let (last, parents) = self
            .segments
            .split_last()
            .ok_or(PathError::Empty)?;

        let mut node = &mut updated;
        for segment in parents {
            node = match (segment, node) {
                (PathSegment::Key(key), Value::Object(map)) => map.get_mut(key),
                (PathSegment::Index(index), Value::Array(items)) => items.get_mut(*index),
                _ => None,
            }
            .ok_or_else(|| self.not_found())?;
        }

        let removed = match (last, node) {
            (PathSegment::Key(key), Value::Object(map)) => map.remove(key),
            (PathSegment::Index(index), Value::Array(items)) if *index < items.len() => {
                Some(items.remove(*index))
            }
            _ => None,
        }
        .ok_or_else(|| self.not_found())?;
        Ok((updated, removed))
    }

    fn not_found(&self) -> PathError {
        PathError::NotFound {
            path: self.to_string(),
        }
    }
}

impl FromStr for ConfigPath {
    type Err = PathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Self::parse(path)
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Reads `path` from `root`; any parse failure or miss yields `None`.
#[must_use]
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    ConfigPath::parse(path).ok()?.get(root)
}

/// Parses `path` and writes `value` into a copy of `root`.
pub fn set_path(root: &Value, path: &str, value: Value) -> Result<Value, PathError> {
    ConfigPath::parse(path)?.set(root, value)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn mismatch(segment: &PathSegment, found: &Value) -> PathError {
    PathError::KindMismatch {
        segment: segment.to_string(),
        expected: segment.expected_container(),
        found: kind_name(found),
    }
}

// Steps from `node` through `segment`, creating the child container (typed by
// `next`) when it is missing or null.
fn descend_or_create<'a>(
    node: &'a mut Value,
    segment: &PathSegment,
    next: &PathSegment,
) -> Result<&'a mut Value, PathError> {
    if node.is_null() {
        *node = segment.empty_container();
    }
    let child = match (segment, node) {
        (PathSegment::Key(key), Value::Object(map)) => {
            map.entry(key.clone()).or_insert(Value::Null)
        }
        (PathSegment::Index(index), Value::Array(items)) => {
            let len = items.len();
            if *index > len {
                return Err(PathError::IndexOutOfRange { index: *index, len });
            }
            if *index == len {
                items.push(Value::Null);
            }
            &mut items[*index]
        }
        (segment, other) => return Err(mismatch(segment, other)),
    };
    if child.is_null() {
        *child = next.empty_container();
    }
    Ok(child)
}

fn write_slot(node: &mut Value, segment: &PathSegment, value: Value) -> Result<(), PathError> {
    if node.is_null() {
        *node = segment.empty_container();
    }
    match (segment, node) {
        (PathSegment::Key(key), Value::Object(map)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (PathSegment::Index(index), Value::Array(items)) => {
            let len = items.len();
            match (*index).cmp(&len) {
                std::cmp::Ordering::Less => {
                    items[*index] = value;
                    Ok(())
                }
                std::cmp::Ordering::Equal => {
                    items.push(value);
                    Ok(())
                }
                std::cmp::Ordering::Greater => {
                    Err(PathError::IndexOutOfRange { index: *index, len })
                }
            }
        }
        (segment, other) => Err(mismatch(segment, other)),
    }
}
