/// Property-based tests for coercion and typed round trips.
///
/// Uses `proptest` to check that:
/// - a number and its decimal text decode to the same value
/// - integer flags decode to the same bool as their truthiness
/// - encode followed by decode returns the original record, both through
///   the tree and through JSON text
/// - arbitrary trees survive a text round trip
use std::collections::BTreeMap;

use jsontree_core::{
    codec, decode, encode, Decode, Decoder, Encode, Encoder, Node, Path, Result, Value,
};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Record {
    name: String,
    count: i64,
    ratio: f64,
    note: Option<String>,
    flags: Vec<bool>,
    scores: BTreeMap<String, i32>,
}

impl Decode for Record {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        Ok(Record {
            name: keyed.decode("name")?,
            count: keyed.decode("count")?,
            ratio: keyed.decode("ratio")?,
            note: keyed.decode_if_present("note")?,
            flags: keyed.decode("flags")?,
            scores: keyed.decode("scores")?,
        })
    }
}

impl Encode for Record {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut keyed = encoder.keyed()?;
        keyed.encode("name", &self.name)?;
        keyed.encode("count", &self.count)?;
        keyed.encode("ratio", &self.ratio)?;
        keyed.encode_if_present("note", &self.note)?;
        keyed.encode("flags", &self.flags)?;
        keyed.encode("scores", &self.scores)
    }
}

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,12}").unwrap()
}

fn arb_finite() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        ".*",
        any::<i64>(),
        arb_finite(),
        prop::option::of("[a-z ]{0,20}"),
        prop::collection::vec(any::<bool>(), 0..8),
        prop::collection::btree_map(arb_key(), any::<i32>(), 0..6),
    )
        .prop_map(|(name, count, ratio, note, flags, scores)| Record {
            name,
            count,
            ratio,
            note,
            flags,
            scores,
        })
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        arb_finite().prop_map(Value::from),
        ".{0,16}".prop_map(Value::from),
    ]
}

fn arb_tree() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn integer_text_decodes_like_the_number(n in any::<i64>()) {
        let from_number: i64 = decode(&Value::from(n)).unwrap();
        let from_text: i64 = decode(&Value::from(n.to_string())).unwrap();
        prop_assert_eq!(from_number, from_text);
    }

    #[test]
    fn float_text_decodes_like_the_number(f in arb_finite()) {
        let from_number: f64 = decode(&Value::from(f)).unwrap();
        let from_text: f64 = decode(&Value::from(f.to_string())).unwrap();
        prop_assert_eq!(from_number, from_text);
    }

    #[test]
    fn integer_flags_decode_as_truthiness(n in any::<i64>()) {
        let flag: bool = decode(&Value::from(n)).unwrap();
        prop_assert_eq!(flag, n != 0);
        let text_flag: bool = decode(&Value::from(n.to_string())).unwrap();
        prop_assert_eq!(text_flag, n != 0);
    }

    #[test]
    fn record_round_trips_through_the_tree(record in arb_record()) {
        let value = encode(&record).unwrap();
        let back: Record = decode(&value).unwrap();
        prop_assert_eq!(back, record);
    }

    #[test]
    fn record_round_trips_through_text(record in arb_record()) {
        let text = jsontree_core::encoder::to_string(&record).unwrap();
        let back: Record = jsontree_core::decoder::from_str(&text).unwrap();
        prop_assert_eq!(back, record);
    }

    #[test]
    fn tree_round_trips_through_text(tree in arb_tree()) {
        let text = codec::to_string(&tree);
        prop_assert_eq!(codec::parse(&text).unwrap(), tree);
    }

    #[test]
    fn navigation_reaches_every_array_element(items in prop::collection::vec(any::<i64>(), 1..10)) {
        let doc = Node::new(Value::Array(items.iter().copied().map(Value::from).collect()));
        for (i, expected) in items.iter().enumerate() {
            let node = doc.at(i);
            prop_assert_eq!(node.as_i64(), Some(*expected));
            prop_assert_eq!(node.path(), &Path::root().child(i));
        }
        prop_assert!(!doc.at(items.len()).exists());
    }
}
