//! Conversion between the ordered-pairs wire shape and canonical values.
//!
//! # Rules (`to_canonical`, first match wins)
//! 1. `[Pairs[]]` (the empty-object marker) → empty `Map`
//! 2. list of non-empty `Pairs` → list of maps
//! 3. `Pairs` → `Map`, later duplicate keys overwrite earlier ones
//! 4. list of `Map` → list of normalized maps
//! 5. `Map` → `Map` with normalized values
//! 6. scalars pass through; other lists are normalized element-wise
//!
//! Rules 2, 4 and the list half of 6 collapse into one element-wise arm.

use std::collections::BTreeMap;

use super::Value;

/// Normalize a value into canonical shape. Idempotent.
pub fn to_canonical(value: Value) -> Value {
    match value {
        v if v.is_empty_object_marker() => Value::Map(BTreeMap::new()),
        Value::Pairs(pairs) => {
            let mut map = BTreeMap::new();
            for (key, v) in pairs {
                map.insert(key, to_canonical(v));
            }
            Value::Map(map)
        }
        Value::List(items) => Value::List(items.into_iter().map(to_canonical).collect()),
        Value::Map(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, to_canonical(v)))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Convert a canonical value back into ordered-pairs shape.
///
/// Maps become `Pairs` in key order and the empty map becomes the
/// empty-object marker, so `to_canonical(to_ordered_pairs(v)) == v` for
/// canonical `v`.
pub fn to_ordered_pairs(value: Value) -> Value {
    match value {
        Value::Map(map) if map.is_empty() => Value::empty_object(),
        Value::Map(map) => Value::Pairs(
            map.into_iter()
                .map(|(k, v)| (k, to_ordered_pairs(v)))
                .collect(),
        ),
        Value::Pairs(pairs) => Value::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (k, to_ordered_pairs(v)))
                .collect(),
        ),
        v if v.is_empty_object_marker() => v,
        Value::List(items) => Value::List(items.into_iter().map(to_ordered_pairs).collect()),
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn test_empty_object_marker_becomes_empty_map() {
        assert_eq!(to_canonical(Value::empty_object()), Value::Map(BTreeMap::new()));
    }

    #[test]
    fn test_bare_empty_pairs_becomes_empty_map() {
        assert_eq!(to_canonical(Value::Pairs(vec![])), Value::Map(BTreeMap::new()));
    }

    #[test]
    fn test_empty_list_stays_list() {
        assert_eq!(to_canonical(Value::List(vec![])), Value::List(vec![]));
    }

    #[test]
    fn test_list_of_pairs_becomes_list_of_maps() {
        let input = Value::List(vec![
            Value::pairs([("a", text("b")), ("c", text("d"))]),
            Value::pairs([("e", text("f"))]),
        ]);
        let expected = Value::List(vec![
            Value::map([("a", text("b")), ("c", text("d"))]),
            Value::map([("e", text("f"))]),
        ]);
        assert_eq!(to_canonical(input), expected);
    }

    #[test]
    fn test_pairs_with_nested_map() {
        let input = Value::pairs([("a", Value::map([("b", text("c"))]))]);
        let expected = Value::map([("a", Value::map([("b", text("c"))]))]);
        assert_eq!(to_canonical(input), expected);
    }

    #[test]
    fn test_map_with_pairs_value() {
        let input = Value::map([("a", Value::List(vec![Value::pairs([("b", text("c"))])]))]);
        // A single-element list of pairs is an array of one object.
        let expected = Value::map([("a", Value::List(vec![Value::map([("b", text("c"))])]))]);
        assert_eq!(to_canonical(input), expected);

        let input = Value::map([("a", Value::pairs([("b", text("c"))]))]);
        let expected = Value::map([("a", Value::map([("b", text("c"))]))]);
        assert_eq!(to_canonical(input), expected);
    }

    #[test]
    fn test_map_with_empty_marker_value() {
        let input = Value::map([("a", Value::empty_object())]);
        let expected = Value::map([("a", Value::Map(BTreeMap::new()))]);
        assert_eq!(to_canonical(input), expected);
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let input = Value::pairs([("k", Value::Int(1)), ("other", Value::Null), ("k", Value::Int(2))]);
        let out = to_canonical(input);
        assert_eq!(out.as_map().and_then(|m| m.get("k")), Some(&Value::Int(2)));
        assert_eq!(out.as_map().map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_scalars_unchanged() {
        for v in [Value::Null, Value::Bool(true), Value::Int(-3), Value::Float(1.5), text("x")] {
            assert_eq!(to_canonical(v.clone()), v);
        }
    }

    #[test]
    fn test_mixed_list_normalized_elementwise() {
        let input = Value::List(vec![Value::Int(1), Value::pairs([("a", Value::Int(2))])]);
        let expected = Value::List(vec![Value::Int(1), Value::map([("a", Value::Int(2))])]);
        assert_eq!(to_canonical(input), expected);
    }

    #[test]
    fn test_to_canonical_idempotent() {
        let inputs = vec![
            Value::empty_object(),
            Value::List(vec![Value::empty_object()]),
            Value::pairs([
                ("users", Value::List(vec![Value::pairs([("id", Value::Int(1))])])),
                ("meta", Value::empty_object()),
                ("tags", Value::List(vec![text("a"), text("b")])),
            ]),
            Value::List(vec![Value::Map(BTreeMap::new())]),
        ];
        for v in inputs {
            let once = to_canonical(v);
            assert_eq!(to_canonical(once.clone()), once);
        }
    }

    #[test]
    fn test_ordered_pairs_round_trip() {
        let original = Value::map([
            ("name", text("alice")),
            ("age", Value::Int(30)),
            ("empty", Value::Map(BTreeMap::new())),
            ("address", Value::map([("city", text("Paris")), ("zip", text("75001"))])),
        ]);
        let wire = to_ordered_pairs(original.clone());
        assert!(matches!(wire, Value::Pairs(_)));
        assert_eq!(to_canonical(wire), original);
    }

    #[test]
    fn test_ordered_pairs_empty_map_is_marker() {
        assert!(to_ordered_pairs(Value::Map(BTreeMap::new())).is_empty_object_marker());
    }
}
