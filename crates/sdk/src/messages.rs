//! Localized message dictionaries.
//!
//! A dictionary is a tree of message keys. Leaves are message templates;
//! lists are carried as opaque values (they are replaced wholesale when
//! dictionaries are merged, never merged element by element).

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Per-locale partial dictionaries contributed by one module, keyed by
/// locale code (e.g., "en-US").
pub type LocaleMessages = BTreeMap<String, MessageDict>;

/// A node in a message dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageValue {
    Text(String),
    List(Vec<MessageValue>),
    Dict(MessageDict),
}

impl MessageValue {
    /// Convert an arbitrary JSON value.
    ///
    /// Numbers and booleans become text; `null` has no message form and
    /// yields `None` (null entries inside objects and arrays are skipped).
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Number(n) => Some(Self::Text(n.to_string())),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::List(
                items.iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(map) => Some(Self::Dict(MessageDict::from_json_map(map))),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&MessageDict> {
        match self {
            Self::Dict(d) => Some(d),
            _ => None,
        }
    }
}

impl From<&str> for MessageValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for MessageValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<MessageDict> for MessageValue {
    fn from(d: MessageDict) -> Self {
        Self::Dict(d)
    }
}

/// A keyed level of a message dictionary.
///
/// Keys are kept sorted so serialized output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageDict(BTreeMap<String, MessageValue>);

impl MessageDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object; `None` if the value is not an object.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        value.as_object().map(Self::from_json_map)
    }

    fn from_json_map(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        Self(
            map.iter()
                .filter_map(|(k, v)| MessageValue::from_json(v).map(|v| (k.clone(), v)))
                .collect(),
        )
    }

    /// Insert a value at a dotted key path, creating intermediate levels.
    ///
    /// A non-dictionary value sitting on the path is replaced by a new level.
    pub fn insert_path(&mut self, path: &str, value: impl Into<MessageValue>) {
        let mut segments = path.split('.').peekable();
        let mut level = self;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                level.0.insert(segment.to_string(), value.into());
                return;
            }
            let slot = level
                .0
                .entry(segment.to_string())
                .or_insert_with(|| MessageValue::Dict(Self::new()));
            if !matches!(slot, MessageValue::Dict(_)) {
                *slot = MessageValue::Dict(Self::new());
            }
            let MessageValue::Dict(next) = slot else {
                return;
            };
            level = next;
        }
    }

    /// Builder form of [`insert_path`](Self::insert_path).
    pub fn with(mut self, path: &str, value: impl Into<MessageValue>) -> Self {
        self.insert_path(path, value);
        self
    }

    /// Look up a value by dotted key path (e.g., "nav.finance").
    pub fn get_path(&self, path: &str) -> Option<&MessageValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_dict()?.0.get(segment)?;
        }
        Some(current)
    }

    pub fn get(&self, key: &str) -> Option<&MessageValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut MessageValue> {
        self.0.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MessageValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, MessageValue> {
        self.0.iter()
    }

    pub fn values_mut(&mut self) -> btree_map::ValuesMut<'_, String, MessageValue> {
        self.0.values_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for MessageDict {
    type Item = (String, MessageValue);
    type IntoIter = btree_map::IntoIter<String, MessageValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MessageDict {
    type Item = (&'a String, &'a MessageValue);
    type IntoIter = btree_map::Iter<'a, String, MessageValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, MessageValue)> for MessageDict {
    fn from_iter<I: IntoIterator<Item = (String, MessageValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
