//! Field definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use verdant_core::Section;
use verdant_core::section::json_kind;

/// How one key of a section is edited.
///
/// Serialized with a `type` tag: `text`, `textarea`, `image`, `array`, or
/// `object-array` (which also carries its nested `fields`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single-line string.
    Text,
    /// Multi-line string.
    Textarea,
    /// Image URL with an upload affordance.
    Image,
    /// Flat list of strings; element position is display order.
    Array,
    /// List of homogeneous objects, each described by `fields`.
    ObjectArray {
        /// Definitions of each object's keys.
        fields: Vec<FieldDefinition>,
    },
}

impl FieldKind {
    /// Returns `true` for kinds whose value is a string.
    pub fn is_scalar(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Textarea | FieldKind::Image)
    }

    /// Returns `true` for kinds whose value is a list.
    pub fn is_list(&self) -> bool {
        !self.is_scalar()
    }

    /// Value a fresh field of this kind starts with.
    pub fn empty_value(&self) -> Value {
        if self.is_scalar() {
            Value::String(String::new())
        } else {
            Value::Array(Vec::new())
        }
    }

    /// The wire tag of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Image => "image",
            FieldKind::Array => "array",
            FieldKind::ObjectArray { .. } => "object-array",
        }
    }
}

/// One editable key within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Key in the section document.
    pub key: String,
    /// Human label shown in the editor.
    pub label: String,
    /// Editing behavior.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDefinition {
    /// Single-line text field.
    pub fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    /// Multi-line text field.
    pub fn textarea(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Textarea)
    }

    /// Image URL field.
    pub fn image(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Image)
    }

    /// Flat string list field.
    pub fn array(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Array)
    }

    /// List-of-objects field.
    pub fn object_array(key: &str, label: &str, fields: Vec<FieldDefinition>) -> Self {
        Self::new(key, label, FieldKind::ObjectArray { fields })
    }

    fn new(key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    /// Nested definitions for object-array fields; empty otherwise.
    pub fn nested(&self) -> &[FieldDefinition] {
        match &self.kind {
            FieldKind::ObjectArray { fields } => fields,
            _ => &[],
        }
    }

    /// A new object-array element: `order` plus an empty value per nested key.
    pub fn blank_item(&self, order: usize) -> Value {
        let mut item = Map::new();
        for field in self.nested() {
            item.insert(field.key.clone(), field.kind.empty_value());
        }
        item.insert("order".to_string(), Value::from(order));
        Value::Object(item)
    }

    fn check(&self, value: Option<&Value>, at: &str, problems: &mut Vec<String>) {
        let Some(value) = value else {
            problems.push(format!("{at}: missing"));
            return;
        };
        match &self.kind {
            FieldKind::Text | FieldKind::Textarea | FieldKind::Image => {
                if !value.is_string() {
                    problems.push(format!("{at}: expected string, got {}", json_kind(value)));
                }
            }
            FieldKind::Array => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if !item.is_string() {
                            problems.push(format!(
                                "{at}[{i}]: expected string, got {}",
                                json_kind(item)
                            ));
                        }
                    }
                }
                None => problems.push(format!("{at}: expected array, got {}", json_kind(value))),
            },
            FieldKind::ObjectArray { fields } => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        let Some(object) = item.as_object() else {
                            problems.push(format!(
                                "{at}[{i}]: expected object, got {}",
                                json_kind(item)
                            ));
                            continue;
                        };
                        for field in fields {
                            field.check(
                                object.get(&field.key),
                                &format!("{at}[{i}].{}", field.key),
                                problems,
                            );
                        }
                    }
                }
                None => problems.push(format!("{at}: expected array, got {}", json_kind(value))),
            },
        }
    }
}

/// The editable shape of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSchema {
    /// Section id this schema edits.
    pub id: String,
    /// Title shown on the dashboard and editor header.
    pub title: String,
    /// Ordered field definitions.
    pub fields: Vec<FieldDefinition>,
}

impl SectionSchema {
    /// Create a schema.
    pub fn new(id: &str, title: &str, fields: Vec<FieldDefinition>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            fields,
        }
    }

    /// Look up a top-level field definition by key.
    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Describe every place `section` does not match this schema.
    ///
    /// Keys the schema does not declare are ignored. An empty result means
    /// the section is structurally compatible.
    pub fn mismatches(&self, section: &Section) -> Vec<String> {
        let mut problems = Vec::new();
        for field in &self.fields {
            field.check(section.get(&field.key), &field.key, &mut problems);
        }
        problems
    }
}
