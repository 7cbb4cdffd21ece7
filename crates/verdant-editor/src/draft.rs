//! Immutable section drafts.
//!
//! A [`Draft`] is the editor's working copy of a section. Every change is a
//! [`FieldEdit`]; [`Draft::apply`] checks the edit against the section's
//! schema and returns a new draft, leaving the original untouched.

use serde_json::{Map, Number, Value};
use verdant_core::Section;
use verdant_core::section::json_kind;
use verdant_schema::{FieldDefinition, FieldKind, SectionSchema};

use crate::path::{FieldPath, Segment};
use crate::{Error, Result};

/// A single change to a draft.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    /// Replace a text, textarea, or image value, or one flat-array element.
    SetText {
        /// Target value
        path: FieldPath,
        /// New text
        value: String,
    },
    /// Replace an image URL after a successful upload.
    SetImage {
        /// Target image field
        path: FieldPath,
        /// Public URL of the uploaded image
        url: String,
    },
    /// Set an image field to the empty string.
    ClearImage {
        /// Target image field
        path: FieldPath,
    },
    /// Append a blank element to a list field.
    AppendItem {
        /// Target list field
        path: FieldPath,
    },
    /// Remove one element of a list field.
    RemoveItem {
        /// Target list field
        path: FieldPath,
        /// Position to remove
        index: usize,
    },
    /// Set the `order` of one object-array element.
    SetOrder {
        /// Target element (`items[2]`)
        path: FieldPath,
        /// New order value
        order: Number,
    },
}

impl FieldEdit {
    /// Shorthand for [`FieldEdit::SetText`].
    pub fn set_text(path: FieldPath, value: impl Into<String>) -> Self {
        FieldEdit::SetText {
            path,
            value: value.into(),
        }
    }

    /// The path the edit addresses.
    pub fn path(&self) -> &FieldPath {
        match self {
            FieldEdit::SetText { path, .. }
            | FieldEdit::SetImage { path, .. }
            | FieldEdit::ClearImage { path }
            | FieldEdit::AppendItem { path }
            | FieldEdit::RemoveItem { path, .. }
            | FieldEdit::SetOrder { path, .. } => path,
        }
    }
}

// ============================================================================
// Path resolution against the schema
// ============================================================================

/// What a path points at, according to the schema.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target<'a> {
    /// A whole field (`heading`, `items`, `items[0].title`).
    Field(&'a FieldDefinition),
    /// One string inside a flat array (`values[1]`).
    Element(&'a FieldDefinition),
    /// One object inside an object array (`items[1]`).
    Item(&'a FieldDefinition),
    /// The `order` key of an object-array element (`items[1].order`).
    Order(&'a FieldDefinition),
}

pub(crate) fn resolve<'a>(schema: &'a SectionSchema, path: &FieldPath) -> Result<Target<'a>> {
    let text = path.to_string();
    let mut fields: &'a [FieldDefinition] = &schema.fields;
    let mut segments = path.segments().iter().peekable();

    loop {
        let Some(Segment::Key(key)) = segments.next() else {
            return Err(Error::invalid_edit(&text, "expected a field name"));
        };
        let def = fields
            .iter()
            .find(|f| f.key == *key)
            .ok_or_else(|| Error::invalid_edit(&text, format!("'{key}' is not an editable field")))?;

        match segments.next() {
            None => return Ok(Target::Field(def)),
            Some(Segment::Key(_)) => {
                return Err(Error::invalid_edit(&text, format!("'{key}' has no nested keys")));
            }
            Some(Segment::Index(_)) => match &def.kind {
                FieldKind::Array => {
                    if segments.next().is_some() {
                        return Err(Error::invalid_edit(&text, "array elements are plain text"));
                    }
                    return Ok(Target::Element(def));
                }
                FieldKind::ObjectArray { fields: nested } => match segments.peek() {
                    None => return Ok(Target::Item(def)),
                    Some(Segment::Key(k)) if k == "order" => {
                        segments.next();
                        if segments.next().is_some() {
                            return Err(Error::invalid_edit(&text, "order has no nested keys"));
                        }
                        return Ok(Target::Order(def));
                    }
                    Some(_) => fields = nested,
                },
                _ => {
                    return Err(Error::invalid_edit(&text, format!("'{key}' is not a list")));
                }
            },
        }
    }
}

/// Walk `segments` down from `root`, inserting `null` for missing keys.
///
/// Indexes never create elements: an index past the end is an error.
fn slot<'v>(root: &'v mut Map<String, Value>, path: &FieldPath) -> Result<&'v mut Value> {
    let text = path.to_string();
    let Some((Segment::Key(first), rest)) = path.segments().split_first() else {
        return Err(Error::invalid_edit(&text, "expected a field name"));
    };

    let mut current = root.entry(first.clone()).or_insert(Value::Null);
    for segment in rest {
        current = match segment {
            Segment::Key(key) => match current {
                Value::Object(map) => map.entry(key.clone()).or_insert(Value::Null),
                other => {
                    return Err(Error::invalid_edit(
                        &text,
                        format!("expected an object, found {}", json_kind(other)),
                    ));
                }
            },
            Segment::Index(index) => match current {
                Value::Array(items) => {
                    let len = items.len();
                    match items.get_mut(*index) {
                        Some(item) => item,
                        None => {
                            return Err(Error::invalid_edit(
                                &text,
                                format!("index {index} out of range (length {len})"),
                            ));
                        }
                    }
                }
                other => {
                    return Err(Error::invalid_edit(
                        &text,
                        format!("expected a list, found {}", json_kind(other)),
                    ));
                }
            },
        };
    }
    Ok(current)
}

/// The list at `path`, treating a missing or null value as empty.
fn list_slot<'v>(root: &'v mut Map<String, Value>, path: &FieldPath) -> Result<&'v mut Vec<Value>> {
    let value = slot(root, path)?;
    if value.is_null() {
        *value = Value::Array(Vec::new());
    }
    match value {
        Value::Array(items) => Ok(items),
        other => Err(Error::invalid_edit(
            path.to_string(),
            format!("expected a list, found {}", json_kind(other)),
        )),
    }
}

// ============================================================================
// Draft
// ============================================================================

/// The editor's working copy of one section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    section: Section,
}

impl Draft {
    /// Start a draft from a stored section.
    pub fn new(section: Section) -> Self {
        Self { section }
    }

    /// The current content.
    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Consume the draft, yielding the section to persist.
    pub fn into_section(self) -> Section {
        self.section
    }

    /// Read the value at `path`, if present.
    pub fn value_at(&self, path: &FieldPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let Segment::Key(first) = first else {
            return None;
        };
        let mut current = self.section.get(first)?;
        for segment in rest {
            current = match segment {
                Segment::Key(key) => current.get(key)?,
                Segment::Index(index) => current.get(*index)?,
            };
        }
        Some(current)
    }

    /// Apply one edit, returning the resulting draft.
    ///
    /// The edit is checked against `schema`: unknown keys, out-of-range
    /// indexes, and list operations on scalar fields are validation errors.
    pub fn apply(&self, schema: &SectionSchema, edit: FieldEdit) -> Result<Draft> {
        let target = resolve(schema, edit.path())?;
        let mut next = self.section.clone().into_map();
        let text = edit.path().to_string();

        match edit {
            FieldEdit::SetText { path, value } => match target {
                Target::Field(def) if def.kind.is_scalar() => {
                    *slot(&mut next, &path)? = Value::String(value);
                }
                Target::Element(_) => {
                    *slot(&mut next, &path)? = Value::String(value);
                }
                _ => return Err(Error::invalid_edit(text, "not a text value")),
            },
            FieldEdit::SetImage { path, url } => {
                require_image(target, &text)?;
                *slot(&mut next, &path)? = Value::String(url);
            }
            FieldEdit::ClearImage { path } => {
                require_image(target, &text)?;
                *slot(&mut next, &path)? = Value::String(String::new());
            }
            FieldEdit::AppendItem { path } => {
                let def = require_list(target, &text)?;
                let items = list_slot(&mut next, &path)?;
                let item = match def.kind {
                    FieldKind::ObjectArray { .. } => def.blank_item(items.len()),
                    _ => Value::String(String::new()),
                };
                items.push(item);
            }
            FieldEdit::RemoveItem { path, index } => {
                require_list(target, &text)?;
                let items = list_slot(&mut next, &path)?;
                if index >= items.len() {
                    return Err(Error::invalid_edit(
                        text,
                        format!("index {index} out of range (length {})", items.len()),
                    ));
                }
                items.remove(index);
            }
            FieldEdit::SetOrder { path, order } => {
                let Target::Item(_) = target else {
                    return Err(Error::invalid_edit(text, "order applies to list items"));
                };
                match slot(&mut next, &path)? {
                    Value::Object(item) => {
                        item.insert("order".to_string(), Value::Number(order));
                    }
                    other => {
                        return Err(Error::invalid_edit(
                            text,
                            format!("expected an object, found {}", json_kind(other)),
                        ));
                    }
                }
            }
        }

        Ok(Draft {
            section: Section::from(next),
        })
    }

    /// Apply several edits in order, stopping at the first failure.
    pub fn apply_all(
        &self,
        schema: &SectionSchema,
        edits: impl IntoIterator<Item = FieldEdit>,
    ) -> Result<Draft> {
        let mut draft = self.clone();
        for edit in edits {
            draft = draft.apply(schema, edit)?;
        }
        Ok(draft)
    }
}

fn require_image(target: Target<'_>, text: &str) -> Result<()> {
    match target {
        Target::Field(def) if def.kind == FieldKind::Image => Ok(()),
        _ => Err(Error::invalid_edit(text, "not an image field")),
    }
}

fn require_list<'a>(target: Target<'a>, text: &str) -> Result<&'a FieldDefinition> {
    match target {
        Target::Field(def) if def.kind.is_list() => Ok(def),
        _ => Err(Error::invalid_edit(text, "not a list field")),
    }
}
