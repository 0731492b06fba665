//! Path-tracking navigation over a parsed JSON document.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a JSON document, displayed as `$.key[0]["odd key"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath(Vec<Segment>);

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.to_string()));
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                Segment::Key(key) if is_identifier(key) => write!(f, ".{key}")?,
                Segment::Key(key) => write!(f, "[{key:?}]")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// A cursor into a JSON document that remembers how it got there.
///
/// Walking into a missing key yields a walker whose [`JsonWalker::data`] is `None`,
/// so optional fields can be probed without matching on every level.
#[derive(Debug, Clone)]
pub struct JsonWalker<'a> {
    data: Option<&'a Value>,
    path: JsonPath,
}

impl<'a> JsonWalker<'a> {
    pub fn new(data: &'a Value) -> Self {
        Self { data: Some(data), path: JsonPath::root() }
    }

    /// Walks into `key` of an object.
    pub fn get(&self, key: &str) -> JsonWalker<'a> {
        JsonWalker {
            data: self.data.and_then(|data| data.as_object()).and_then(|map| map.get(key)),
            path: self.path.key(key),
        }
    }

    pub fn exists(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&'a Value> {
        self.data
    }

    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Walkers for the elements of an array, or `None` if this is not an array.
    pub fn elements(&self) -> Option<Vec<JsonWalker<'a>>> {
        let items = self.data?.as_array()?;
        Some(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| JsonWalker { data: Some(item), path: self.path.index(index) })
                .collect(),
        )
    }

    /// Key/walker pairs of an object, or `None` if this is not an object.
    pub fn entries(&self) -> Option<Vec<(&'a str, JsonWalker<'a>)>> {
        let map = self.data?.as_object()?;
        Some(
            map.iter()
                .map(|(key, value)| {
                    (key.as_str(), JsonWalker { data: Some(value), path: self.path.key(key) })
                })
                .collect(),
        )
    }
}
