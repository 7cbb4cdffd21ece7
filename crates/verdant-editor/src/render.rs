//! Admin form rendering.
//!
//! Turns a schema and a draft into HTML controls. Every control's `name` is
//! the textual [`FieldPath`] of the value it edits, so a submitted form can
//! be mapped straight back into [`FieldEdit`](crate::FieldEdit)s (see
//! [`crate::form`]). List buttons submit an `_action` of `add:{path}` or
//! `remove:{path}:{index}`; image controls add `clear:{path}` and a file
//! input named `upload:{path}`.

use std::borrow::Cow;
use std::fmt::Write;

use serde_json::Value;
use verdant_core::html::escape;
use verdant_core::order_key;
use verdant_schema::{FieldDefinition, FieldKind, SectionSchema};

use crate::draft::Draft;
use crate::path::FieldPath;

/// Render every field of `schema` with values from `draft`.
pub fn render_form(schema: &SectionSchema, draft: &Draft) -> String {
    let mut html = String::new();
    for def in &schema.fields {
        let path = FieldPath::key(&def.key);
        html.push_str(&render_field(def, draft.section().get(&def.key), &path));
    }
    html
}

/// Render one field and, for object arrays, everything nested inside it.
///
/// Missing values render as empty controls. Non-string values render as
/// their JSON text so an untouched control submits them back unchanged.
pub fn render_field(def: &FieldDefinition, value: Option<&Value>, path: &FieldPath) -> String {
    let mut html = String::new();
    let name = escape(&path.to_string());
    let label = escape(&def.label);

    match &def.kind {
        FieldKind::Text => {
            let _ = write!(
                html,
                r#"<div class="field field-text"><label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{}"></div>"#,
                escape(&control_text(value))
            );
        }
        FieldKind::Textarea => {
            let _ = write!(
                html,
                r#"<div class="field field-textarea"><label for="{name}">{label}</label><textarea id="{name}" name="{name}" rows="4">{}</textarea></div>"#,
                escape(&control_text(value))
            );
        }
        FieldKind::Image => {
            let url = control_text(value);
            let _ = write!(html, r#"<div class="field field-image"><label for="{name}">{label}</label>"#);
            if value.is_some_and(Value::is_string) && !url.is_empty() {
                let _ = write!(
                    html,
                    r#"<img class="preview" src="{}" alt="{label}"><button type="submit" name="_action" value="clear:{name}">Remove image</button>"#,
                    escape(&url)
                );
            }
            let _ = write!(
                html,
                r#"<input type="url" id="{name}" name="{name}" value="{}"><input type="file" name="upload:{name}" accept="image/*"></div>"#,
                escape(&url)
            );
        }
        FieldKind::Array => {
            let _ = write!(html, r#"<fieldset class="field field-array"><legend>{label}</legend>"#);
            for (i, element) in as_list(value).iter().enumerate() {
                let element_name = escape(&path.index(i).to_string());
                let _ = write!(
                    html,
                    r#"<div class="array-row"><input type="text" name="{element_name}" value="{}"><button type="submit" name="_action" value="remove:{name}:{i}">Remove</button></div>"#,
                    escape(&control_text(Some(element)))
                );
            }
            let _ = write!(
                html,
                r#"<button type="submit" name="_action" value="add:{name}">Add {label}</button></fieldset>"#
            );
        }
        FieldKind::ObjectArray { fields } => {
            let _ = write!(
                html,
                r#"<fieldset class="field field-object-array"><legend>{label}</legend>"#
            );
            for (i, item) in as_list(value).iter().enumerate() {
                let item_path = path.index(i);
                let order_name = escape(&item_path.child("order").to_string());
                let order = order_key(item);
                let _ = write!(
                    html,
                    r#"<fieldset class="item"><legend>{}</legend><label>Order <input type="number" name="{order_name}" value="{}"></label>"#,
                    escape(&item_title(fields, item, i)),
                    if order.is_finite() { order.to_string() } else { String::new() }
                );
                for nested in fields {
                    html.push_str(&render_field(
                        nested,
                        item.get(&nested.key),
                        &item_path.child(&nested.key),
                    ));
                }
                let _ = write!(
                    html,
                    r#"<button type="submit" name="_action" value="remove:{name}:{i}">Remove</button></fieldset>"#
                );
            }
            let _ = write!(
                html,
                r#"<button type="submit" name="_action" value="add:{name}">Add {label}</button></fieldset>"#
            );
        }
    }
    html
}

/// Text a scalar control shows for `value`: strings as-is, anything else
/// as JSON, nothing for a missing or null value.
pub(crate) fn control_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

fn as_list(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Legend for an object-array element: its first non-empty text value.
fn item_title(fields: &[FieldDefinition], item: &Value, index: usize) -> String {
    fields
        .iter()
        .filter(|f| matches!(f.kind, FieldKind::Text))
        .filter_map(|f| item.get(&f.key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Item {}", index + 1))
}
