//! Submitted admin forms.
//!
//! The admin editor is server-rendered, so editor state travels with the
//! form: the hidden `_draft` field carries the full draft as JSON, every
//! visible control carries one value by [`FieldPath`], and `_action` says
//! what the submit button asked for.

use serde_json::{Number, Value};
use verdant_core::Section;
use verdant_core::html::escape;
use verdant_schema::SectionSchema;

use crate::draft::{Draft, FieldEdit, Target, resolve};
use crate::path::FieldPath;
use crate::render::control_text;
use crate::{Error, Result};

/// Hidden input holding the serialized draft.
pub const DRAFT_FIELD: &str = "_draft";

/// Submit buttons' name.
pub const ACTION_FIELD: &str = "_action";

/// Prefix of file inputs attached to image fields.
pub const UPLOAD_PREFIX: &str = "upload:";

/// What a form submission asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Persist the draft.
    Save,
    /// Append to the list at the path.
    Add(FieldPath),
    /// Remove an element of the list at the path.
    Remove(FieldPath, usize),
    /// Empty the image at the path.
    Clear(FieldPath),
}

impl FormAction {
    /// Parse an `_action` value. A missing action means [`FormAction::Save`].
    pub fn parse(text: Option<&str>) -> Result<Self> {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(FormAction::Save);
        };
        if text == "save" {
            return Ok(FormAction::Save);
        }
        if let Some(path) = text.strip_prefix("add:") {
            return Ok(FormAction::Add(FieldPath::parse(path)?));
        }
        if let Some(path) = text.strip_prefix("clear:") {
            return Ok(FormAction::Clear(FieldPath::parse(path)?));
        }
        if let Some(rest) = text.strip_prefix("remove:") {
            let (path, index) = rest
                .rsplit_once(':')
                .ok_or_else(|| Error::path(rest, "expected remove:{path}:{index}"))?;
            let index = index
                .parse::<usize>()
                .map_err(|_| Error::path(rest, format!("'{index}' is not an index")))?;
            return Ok(FormAction::Remove(FieldPath::parse(path)?, index));
        }
        Err(Error::invalid_edit(ACTION_FIELD, format!("unknown action '{text}'")))
    }

    /// The draft edit this action implies, if any.
    pub fn edit(&self) -> Option<FieldEdit> {
        match self {
            FormAction::Save => None,
            FormAction::Add(path) => Some(FieldEdit::AppendItem { path: path.clone() }),
            FormAction::Remove(path, index) => Some(FieldEdit::RemoveItem {
                path: path.clone(),
                index: *index,
            }),
            FormAction::Clear(path) => Some(FieldEdit::ClearImage { path: path.clone() }),
        }
    }
}

/// Map submitted control values to edits.
///
/// Underscore-prefixed names and file inputs are skipped. An empty order
/// input leaves the element's order alone.
pub fn edits_from_form(schema: &SectionSchema, pairs: &[(String, String)]) -> Result<Vec<FieldEdit>> {
    let mut edits = Vec::new();
    for (name, value) in pairs {
        if name.starts_with('_') || name.starts_with(UPLOAD_PREFIX) {
            continue;
        }
        let path = FieldPath::parse(name)?;
        match resolve(schema, &path)? {
            Target::Order(_) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let order = parse_order(trimmed)
                    .ok_or_else(|| Error::invalid_edit(name, "order must be a number"))?;
                let item = path
                    .parent()
                    .ok_or_else(|| Error::invalid_edit(name, "order must belong to an item"))?;
                edits.push(FieldEdit::SetOrder { path: item, order });
            }
            _ => edits.push(FieldEdit::SetText {
                path,
                value: value.clone(),
            }),
        }
    }
    Ok(edits)
}

impl Draft {
    /// Rebuild a draft from a submitted form and report the requested action.
    ///
    /// The `_draft` field is the starting point (empty when absent), then
    /// every control value is applied, then the action's own edit. A
    /// control still showing the rendered text of a non-string value leaves
    /// that value alone.
    pub fn from_form(schema: &SectionSchema, pairs: &[(String, String)]) -> Result<(Draft, FormAction)> {
        let base = match field(pairs, DRAFT_FIELD).map(str::trim) {
            None | Some("") => Draft::default(),
            Some(json) => {
                let value: Value = serde_json::from_str(json).map_err(verdant_core::Error::from)?;
                Draft::new(Section::from_value(value)?)
            }
        };

        let action = FormAction::parse(field(pairs, ACTION_FIELD))?;
        let edits: Vec<FieldEdit> = edits_from_form(schema, pairs)?
            .into_iter()
            .filter(|edit| !base.keeps_non_text(edit))
            .collect();
        let mut draft = base.apply_all(schema, edits)?;
        if let Some(edit) = action.edit() {
            draft = draft.apply(schema, edit)?;
        }
        Ok((draft, action))
    }

    /// Hidden input carrying this draft through the next submission.
    pub fn hidden_input(&self) -> String {
        let json = serde_json::to_string(self.section()).unwrap_or_else(|_| "{}".to_string());
        format!(
            r#"<input type="hidden" name="{DRAFT_FIELD}" value="{}">"#,
            escape(&json)
        )
    }
}

impl Draft {
    fn keeps_non_text(&self, edit: &FieldEdit) -> bool {
        let FieldEdit::SetText { path, value } = edit else {
            return false;
        };
        match self.value_at(path) {
            Some(current) if !current.is_string() => control_text(Some(current)) == value.as_str(),
            _ => false,
        }
    }
}

/// Whole numbers stay integers; anything else must be a finite float.
fn parse_order(text: &str) -> Option<Number> {
    if let Ok(whole) = text.parse::<i64>() {
        return Some(Number::from(whole));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn field<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}
