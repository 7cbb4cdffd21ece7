//! Read-only views with literal fallbacks.
//!
//! A [`SectionView`] wraps a section (or one object-array item) that may be
//! missing. Every accessor takes the value to use when the key is absent,
//! null, the wrong type, or blank, so templates never branch on `None`.

use serde_json::{Map, Value};
use verdant_core::Section;
use verdant_core::order::sorted_by_order;

/// Fallback-aware view over an optional JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionView<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> SectionView<'a> {
    /// View over a section that may not exist.
    pub fn section(section: Option<&'a Section>) -> Self {
        Self {
            map: section.map(Section::as_map),
        }
    }

    /// View over one item; non-objects behave like a missing section.
    pub fn item(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    /// Returns `true` if there is no underlying document.
    pub fn is_missing(&self) -> bool {
        self.map.is_none()
    }

    fn raw(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|m| m.get(key))
    }

    /// Non-blank string at `key`, if any.
    pub fn opt_text(&self, key: &str) -> Option<&'a str> {
        self.raw(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// String at `key`, or `default`.
    pub fn text(&self, key: &str, default: &'a str) -> &'a str {
        self.opt_text(key).unwrap_or(default)
    }

    /// Non-blank strings of the flat array at `key`, or `default` when
    /// there are none.
    pub fn list(&self, key: &str, default: &[&'a str]) -> Vec<&'a str> {
        let values: Vec<&'a str> = self
            .raw(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if values.is_empty() {
            default.to_vec()
        } else {
            values
        }
    }

    /// Object-array items at `key`, stably sorted by `order`.
    pub fn items(&self, key: &str) -> Vec<SectionView<'a>> {
        self.raw(key)
            .and_then(Value::as_array)
            .map(|items| sorted_by_order(items).into_iter().map(SectionView::item).collect())
            .unwrap_or_default()
    }

    /// Like [`items`](Self::items), but falls back to `defaults` when the
    /// list is missing or empty.
    pub fn items_or(&self, key: &str, defaults: &'a [Value]) -> Vec<SectionView<'a>> {
        let items = self.items(key);
        if items.is_empty() {
            sorted_by_order(defaults).into_iter().map(SectionView::item).collect()
        } else {
            items
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section(value: Value) -> Section {
        Section::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let view = SectionView::section(None);
        assert!(view.is_missing());
        assert_eq!(view.text("heading", "Default"), "Default");
        assert_eq!(view.list("values", &["a"]), vec!["a"]);
        assert!(view.items("items").is_empty());
    }

    #[test]
    fn test_text_fallback_cases() {
        let s = section(json!({ "a": "set", "b": "", "c": null, "d": 3, "e": "   " }));
        let view = SectionView::section(Some(&s));
        assert_eq!(view.text("a", "x"), "set");
        for key in ["b", "c", "d", "e", "missing"] {
            assert_eq!(view.text(key, "x"), "x", "key {key}");
        }
    }

    #[test]
    fn test_list_skips_blank_and_non_strings() {
        let s = section(json!({ "values": ["Care", "", 4, "Craft"], "empty": [] }));
        let view = SectionView::section(Some(&s));
        assert_eq!(view.list("values", &[]), vec!["Care", "Craft"]);
        assert_eq!(view.list("empty", &["Default"]), vec!["Default"]);
    }

    #[test]
    fn test_items_sorted_and_stable() {
        let s = section(json!({ "links": [
            { "label": "b", "order": 1 },
            { "label": "first-zero", "order": 0 },
            { "label": "second-zero", "order": 0 },
            { "label": "unordered" }
        ]}));
        let view = SectionView::section(Some(&s));
        let labels: Vec<&str> = view
            .items("links")
            .iter()
            .map(|item| item.text("label", ""))
            .collect();
        assert_eq!(labels, vec!["first-zero", "second-zero", "b", "unordered"]);
    }

    #[test]
    fn test_items_or_defaults() {
        let defaults = vec![json!({ "label": "Home", "order": 0 })];
        let view = SectionView::section(None);
        let items = view.items_or("links", &defaults);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text("label", ""), "Home");
    }

    #[test]
    fn test_non_object_item_is_missing() {
        let value = json!("just a string");
        assert!(SectionView::item(&value).is_missing());
    }
}
