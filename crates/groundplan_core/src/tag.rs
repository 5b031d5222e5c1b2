//! Resource tags.

use serde::{Deserialize, Serialize};

/// A single key/value tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key
    pub key: String,
    /// Tag value
    pub value: String,
}

impl Tag {
    /// Create a tag
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered list of tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags(Vec<Tag>);

impl Tags {
    /// Create an empty tag list
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a tag list carrying only a `Name` tag
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let mut tags = Self::new();
        tags.push(Tag::new("Name", name));
        tags
    }

    /// Append a tag
    pub fn push(&mut self, tag: Tag) {
        self.0.push(tag);
    }

    /// Append a tag, builder-style
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(Tag::new(key, value));
        self
    }

    /// Look up a tag value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|t| t.key == key).map(|t| t.value.as_str())
    }

    /// Number of tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over tags
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}
