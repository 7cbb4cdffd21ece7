//! Section documents and their identifiers.
//!
//! A [`Section`] is a schemaless JSON object holding all editable content for
//! one area of the site (`hero`, `navbar`, `page-about`, ...). Sections are
//! fully independent: no foreign keys, no partial updates. Every save
//! overwrites the whole document.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

// ============================================================================
// SectionId
// ============================================================================

/// Identifier of a section document.
///
/// Section ids are short kebab-case strings (`hero`, `page-about`,
/// `eco-matrix-menu`). Only lowercase ASCII letters, digits, and single
/// hyphens are accepted, which keeps ids safe to use as file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId(String);

impl SectionId {
    /// Creates a section id, validating its shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdant_core::SectionId;
    ///
    /// let id = SectionId::new("page-about").unwrap();
    /// assert_eq!(id.as_str(), "page-about");
    /// assert!(SectionId::new("../etc/passwd").is_err());
    /// ```
    pub fn new<S: Into<String>>(id: S) -> Result<Self> {
        let id = id.into();
        if !is_valid_section_id(&id) {
            return Err(Error::validation_field(
                "id",
                format!("invalid section id '{id}'"),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_section_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 128
        && !id.starts_with('-')
        && !id.ends_with('-')
        && !id.contains("--")
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SectionId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for SectionId {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.0
    }
}

impl std::str::FromStr for SectionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Section
// ============================================================================

/// A schemaless section document: a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section(Map<String, Value>);

impl Section {
    /// Creates an empty section.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Converts an arbitrary JSON value into a section.
    ///
    /// Only JSON objects are sections; anything else is a validation error.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::validation(format!(
                "section must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Converts the section into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the section, returning the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Returns the string at `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the array at `key`, if present and an array.
    pub fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.0.get(key).and_then(Value::as_array)
    }

    /// Sets `key` to `value`, returning the section for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Inserts `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }
}

impl Deref for Section {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Map<String, Value>> for Section {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Section {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<Section> for Value {
    fn from(section: Section) -> Self {
        section.into_value()
    }
}

/// Short human-readable name of a JSON value's kind, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
