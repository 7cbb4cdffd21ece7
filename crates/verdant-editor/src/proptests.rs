//! Property-based tests for draft edits.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::draft::{Draft, FieldEdit};
    use crate::path::FieldPath;
    use proptest::prelude::*;
    use serde_json::{Value, json};
    use verdant_core::Section;
    use verdant_schema::{FieldDefinition, SectionSchema};

    fn schema() -> SectionSchema {
        SectionSchema::new(
            "testimonials",
            "Testimonials",
            vec![
                FieldDefinition::text("heading", "Heading"),
                FieldDefinition::array("tags", "Tags"),
                FieldDefinition::object_array(
                    "items",
                    "Items",
                    vec![
                        FieldDefinition::textarea("quote", "Quote"),
                        FieldDefinition::text("author", "Author"),
                    ],
                ),
            ],
        )
    }

    fn draft_strategy() -> impl Strategy<Value = Draft> {
        (
            "[a-zA-Z ]{0,20}",
            prop::collection::vec("[a-z]{0,8}", 0..6),
            prop::collection::vec(("[a-zA-Z ]{0,20}", "[a-zA-Z]{0,10}"), 1..8),
        )
            .prop_map(|(heading, tags, items)| {
                let items: Vec<Value> = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, (quote, author))| json!({ "quote": quote, "author": author, "order": i }))
                    .collect();
                Draft::new(
                    Section::from_value(json!({ "heading": heading, "tags": tags, "items": items })).unwrap(),
                )
            })
    }

    proptest! {
        #[test]
        fn test_set_text_changes_exactly_one_leaf(
            draft in draft_strategy(),
            pick in any::<prop::sample::Index>(),
            text in "[a-zA-Z0-9 ]{0,30}",
        ) {
            let len = draft.section().get_array("items").map(Vec::len).unwrap_or_default();
            let index = pick.index(len);
            let path = FieldPath::key("items").index(index).child("author");
            let next = draft.apply(&schema(), FieldEdit::set_text(path.clone(), text.clone())).unwrap();

            prop_assert_eq!(next.value_at(&path), Some(&Value::String(text)));
            prop_assert_eq!(next.section().get("heading"), draft.section().get("heading"));
            prop_assert_eq!(next.section().get("tags"), draft.section().get("tags"));
            for i in 0..len {
                let quote = FieldPath::key("items").index(i).child("quote");
                prop_assert_eq!(next.value_at(&quote), draft.value_at(&quote));
                if i != index {
                    let item = FieldPath::key("items").index(i);
                    prop_assert_eq!(next.value_at(&item), draft.value_at(&item));
                }
            }
        }

        #[test]
        fn test_append_then_remove_last_is_identity(
            draft in draft_strategy(),
            list in prop::sample::select(vec!["tags", "items"]),
        ) {
            let path = FieldPath::key(list);
            let appended = draft.apply(&schema(), FieldEdit::AppendItem { path: path.clone() }).unwrap();
            let len = appended.section().get_array(list).map(Vec::len).unwrap_or_default();
            let restored = appended
                .apply(&schema(), FieldEdit::RemoveItem { path, index: len - 1 })
                .unwrap();
            prop_assert_eq!(restored, draft);
        }
    }
}
