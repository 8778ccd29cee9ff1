//! Property tests for the round-trip and ordering invariants from the
//! document model's testable-properties section.

use proptest::prelude::*;
use std::collections::HashSet;
use xcdn::{parse, serialize, Array, Document, Format, Node, Object, Value};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e6_f64..1.0e6_f64).prop_map(Value::Float),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(Value::Bytes),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|values| {
                let mut array = Array::new();
                for v in values {
                    array.push(Node::new(v));
                }
                Value::Array(array)
            }),
            prop::collection::vec(("[a-z][a-z0-9_]{0,6}", inner), 0..4).prop_map(|entries| {
                let mut object = Object::new();
                for (key, value) in entries {
                    object.set(key, Node::new(value));
                }
                Value::Object(object)
            }),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = Document> {
    prop::collection::vec(arb_value(), 0..5).prop_map(|values| {
        let mut doc = Document::new();
        for value in values {
            doc.push_value(Node::new(value));
        }
        doc
    })
}

proptest! {
    #[test]
    fn pretty_round_trip(doc in arb_document()) {
        let text = serialize(&doc, &Format::default());
        let reparsed = parse(&text).unwrap();
        prop_assert_eq!(reparsed, doc);
    }

    #[test]
    fn compact_round_trip(doc in arb_document()) {
        let text = serialize(&doc, &Format::compact());
        let reparsed = parse(&text).unwrap();
        prop_assert_eq!(reparsed, doc);
    }

    #[test]
    fn object_keys_stay_unique_after_overwrites(
        entries in prop::collection::vec(("[a-z]{1,5}", any::<i64>()), 0..12)
    ) {
        let mut object = Object::new();
        for (key, value) in &entries {
            object.set(key.clone(), Node::new(Value::Int(*value)));
        }

        let mut seen = HashSet::new();
        for i in 0..object.len() {
            prop_assert!(seen.insert(object.key_at(i).unwrap().to_string()));
        }
    }

    #[test]
    fn array_preserves_source_order(values in prop::collection::vec(any::<i64>(), 0..20)) {
        let mut array = Array::new();
        for v in &values {
            array.push(Node::new(Value::Int(*v)));
        }
        for (i, v) in values.iter().enumerate() {
            prop_assert_eq!(array.get(i).unwrap().value.as_int(), *v);
        }
    }
}

#[test]
fn documented_scenarios_round_trip() {
    let inputs = [
        r#"$schema: "https://ex/s", $version: 2, { answer: 42 }"#,
        "name: \"xcdn\",\nnested: { flag: true },",
        r#"@mime("image/png") #thumbnail b"aGVsbG8=""#,
        "{ a: 1 }\n42\n",
    ];
    for input in inputs {
        let doc = parse(input).unwrap();
        let pretty = serialize(&doc, &Format::default());
        let compact = serialize(&doc, &Format::compact());
        assert_eq!(parse(&pretty).unwrap(), doc);
        assert_eq!(parse(&compact).unwrap(), doc);
    }
}

#[test]
fn empty_and_whitespace_only_input_is_empty_document() {
    for input in ["", "   ", "// nothing here\n/* just a comment */"] {
        let doc = parse(input).unwrap();
        assert!(doc.prolog().is_empty());
        assert!(doc.values().is_empty());
    }
}
