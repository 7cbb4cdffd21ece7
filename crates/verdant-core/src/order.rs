//! Ordering of repeated items.
//!
//! Object-array entries (cards, steps, testimonials, links) carry an
//! `order: number`. Values are not guaranteed unique or contiguous, so every
//! sort here is stable: ties keep their position in the source array.

use std::cmp::Ordering;

use serde_json::Value;

/// Sort key of one item: its numeric `order` field.
///
/// Items without a usable `order` (missing, null, non-numeric) sort after
/// every numbered item. Numeric strings such as `"3"` are accepted because
/// hand-edited documents sometimes carry them.
pub fn order_key(item: &Value) -> f64 {
    match item.get("order") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::INFINITY),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(f64::INFINITY),
        _ => f64::INFINITY,
    }
}

fn compare(a: &Value, b: &Value) -> Ordering {
    order_key(a).total_cmp(&order_key(b))
}

/// Stable in-place sort of items by ascending `order`.
pub fn sort_by_order(items: &mut [Value]) {
    items.sort_by(compare);
}

/// Borrowing variant of [`sort_by_order`].
pub fn sorted_by_order(items: &[Value]) -> Vec<&Value> {
    let mut refs: Vec<&Value> = items.iter().collect();
    refs.sort_by(|a, b| compare(a, b));
    refs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(items: &[Value]) -> Vec<&str> {
        items
            .iter()
            .map(|v| v["label"].as_str().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_sort_ascending() {
        let mut items = vec![
            json!({"label": "c", "order": 2}),
            json!({"label": "a", "order": 0}),
            json!({"label": "b", "order": 1}),
        ];
        sort_by_order(&mut items);
        assert_eq!(labels(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_equal_order_keeps_source_position() {
        let mut items = vec![
            json!({"label": "Services", "order": 0}),
            json!({"label": "About", "order": 0}),
        ];
        sort_by_order(&mut items);
        assert_eq!(labels(&items), vec!["Services", "About"]);
    }

    #[test]
    fn test_missing_order_sorts_last_and_stable() {
        let mut items = vec![
            json!({"label": "x"}),
            json!({"label": "y", "order": 5}),
            json!({"label": "z", "order": null}),
        ];
        sort_by_order(&mut items);
        assert_eq!(labels(&items), vec!["y", "x", "z"]);
    }

    #[test]
    fn test_gaps_and_negative_orders() {
        let mut items = vec![
            json!({"label": "b", "order": 10}),
            json!({"label": "a", "order": -3}),
            json!({"label": "c", "order": 10.5}),
        ];
        sort_by_order(&mut items);
        assert_eq!(labels(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_numeric_string_order() {
        assert_eq!(order_key(&json!({"order": " 4 "})), 4.0);
        assert_eq!(order_key(&json!({"order": "four"})), f64::INFINITY);
    }

    #[test]
    fn test_sorted_by_order_borrows() {
        let items = vec![json!({"label": "b", "order": 1}), json!({"label": "a", "order": 0})];
        let sorted = sorted_by_order(&items);
        assert_eq!(sorted[0]["label"], "a");
        // source untouched
        assert_eq!(items[0]["label"], "b");
    }
}
