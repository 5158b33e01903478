/// Navigator tests.
///
/// Reading coerced leaves by path, the absent/null distinction, the three
/// null strategies, and in-place writes through members and elements.
mod common;

use common::USER;
use jsontree_core::{Error, Kind, Node, NullStrategy, Path, PathKey, Value};

fn user() -> Node {
    Node::parse(USER).unwrap()
}

fn path(text: &str) -> Path {
    Path::parse(text).unwrap()
}

// ============================================================================
// Reading
// ============================================================================

#[test]
fn read_strings() {
    let doc = user();
    assert_eq!(doc.get("firstName").as_string().as_deref(), Some("John"));
    assert_eq!(doc.get("lastName").string_value().unwrap(), "Smith");
    assert_eq!(doc.get("height").as_string(), None, "numbers are not strings");
}

#[test]
fn read_numbers_from_text_and_numbers() {
    let doc = user();
    assert_eq!(doc.get("age").as_i64(), Some(20));
    assert_eq!(doc.get("age").as_i32(), Some(20));
    assert_eq!(doc.get("height").as_u64(), Some(170));
    assert_eq!(doc.get("height").as_f64(), Some(170.0));
    assert_eq!(doc.get("happiness").as_f32(), Some(5.5));
    assert_eq!(doc.get("happiness").as_i64(), None, "fractions are not integers");
}

#[test]
fn read_booleans_and_flags() {
    let doc = user();
    assert_eq!(doc.get("hasChildren").as_bool(), Some(true));
    assert_eq!(doc.get("hasGrandchildren").as_bool(), Some(false));
    assert_eq!(doc.get("hasCousins").as_bool(), Some(true));
    assert_eq!(doc.get("hasTwin").as_bool(), Some(false));
    assert_eq!(doc.get("firstName").as_bool(), None);
}

#[test]
fn absent_and_null_are_distinct() {
    let doc = user();
    let email = doc.get("email");
    assert!(email.exists());
    assert!(email.is_null());
    assert_eq!(email.as_string(), None);

    let missing = doc.get("notExist");
    assert!(!missing.exists());
    assert!(!missing.is_null());
    assert_eq!(missing.value().kind(), Kind::Absent);
}

#[test]
fn navigation_never_fails_and_tracks_its_path() {
    let doc = user();
    let deep = doc.get("nope").at(3).get("x");
    assert!(!deep.exists());
    assert_eq!(deep.path().to_string(), "nope[3].x");

    let name = doc.navigate(&path("gadgets[1].name"));
    assert_eq!(name.as_string().as_deref(), Some("linux"));
    assert_eq!(
        name.path().keys(),
        &[
            PathKey::from("gadgets"),
            PathKey::Index(1),
            PathKey::from("name")
        ]
    );

    assert!(!doc.get("firstName").get("x").exists(), "leaves have no members");
    assert!(!doc.get("gadgets").at(9).exists());
}

#[test]
fn arrays_and_objects_lift_their_children() {
    let doc = user();
    let gadgets = doc.get("gadgets").array().unwrap();
    assert_eq!(gadgets.len(), 2);
    assert_eq!(gadgets[1].path().to_string(), "gadgets[1]");
    assert_eq!(gadgets[0].get("name").as_string().as_deref(), Some("iPhone"));
    assert!(doc.get("firstName").array().is_none());

    let members = doc.get("gadgets").at(0).object().unwrap();
    let names: Vec<_> = members.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["type", "name"]);
    assert_eq!(members[1].1.path().to_string(), "gadgets[0].name");

    assert_eq!(doc.keys().first().map(String::as_str), Some("firstName"));
    assert_eq!(doc.len(), 11);
    assert!(doc.get("firstName").is_empty());
}

#[test]
fn display_is_compact_json() {
    let doc = Node::parse(r#"{ "b": [1, 2], "a": null }"#).unwrap();
    assert_eq!(doc.to_string(), r#"{"b":[1,2],"a":null}"#);
}

// ============================================================================
// Null strategies
// ============================================================================

#[test]
fn force_unwrap_reports_what_went_wrong() {
    let doc = user();
    assert_eq!(
        doc.get("notExist").string_value().unwrap_err(),
        Error::KeyNotFound {
            path: path("notExist")
        }
    );
    assert_eq!(
        doc.get("email").string_value().unwrap_err(),
        Error::ValueNotFound {
            expected: "String",
            path: path("email")
        }
    );
    assert_eq!(
        doc.get("firstName").i64_value().unwrap_err(),
        Error::TypeMismatch {
            expected: "i64",
            actual: Kind::String,
            path: path("firstName")
        }
    );
}

#[test]
fn use_empty_value_substitutes_zero_values() {
    let doc = user().with_null_strategy(NullStrategy::UseEmptyValue);
    assert_eq!(doc.get("email").string_value().unwrap(), "");
    assert_eq!(doc.get("notExist").i64_value().unwrap(), 0);
    assert_eq!(doc.get("notExist").f64_value().unwrap(), 0.0);
    assert!(!doc.get("firstName").bool_value().unwrap());
    assert_eq!(doc.get("age").i32_value().unwrap(), 20, "usable values are untouched");
}

#[test]
fn custom_strategy_supplies_a_replacement() {
    let doc = user().with_null_strategy(NullStrategy::custom(|node| {
        if node.path().last() == Some(&PathKey::from("email")) {
            Value::from("unknown@example.com")
        } else {
            Value::from("42")
        }
    }));
    assert_eq!(doc.get("email").string_value().unwrap(), "unknown@example.com");
    assert_eq!(doc.get("missing").u64_value().unwrap(), 42);
    assert_eq!(doc.get("gadgets").at(7).get("name").i64_value().unwrap(), 42);
}

#[test]
fn custom_replacement_that_does_not_coerce_is_a_mismatch() {
    let doc = user().with_null_strategy(NullStrategy::custom(|_| Value::from("n/a")));
    assert!(matches!(
        doc.get("missing").i64_value().unwrap_err(),
        Error::TypeMismatch {
            expected: "i64",
            actual: Kind::String,
            ..
        }
    ));
}

#[test]
fn scalar_or_falls_back_locally() {
    let doc = user();
    assert_eq!(doc.get("missing").scalar_or(7i64), 7);
    assert_eq!(doc.get("age").scalar_or(7i64), 20);
}

// ============================================================================
// Writing
// ============================================================================

#[test]
fn change_a_member() {
    let mut doc = user();
    doc.set("hasChildren", false).unwrap();
    assert_eq!(doc.get("hasChildren").as_bool(), Some(false));

    doc.set("nickname", "Johnny").unwrap();
    assert_eq!(doc.keys().last().map(String::as_str), Some("nickname"));

    doc.set("nickname", Value::Absent).unwrap();
    assert!(!doc.get("nickname").exists(), "writing absent removes the member");
}

#[test]
fn deep_change_through_a_path() {
    let mut doc = user();
    doc.set_at(&path("gadgets[0].name"), "bell").unwrap();
    assert_eq!(
        doc.navigate(&path("gadgets[0].name")).as_string().as_deref(),
        Some("bell")
    );
    assert_eq!(
        doc.navigate(&path("gadgets[1].name")).as_string().as_deref(),
        Some("linux")
    );
}

#[test]
fn navigated_children_are_copies() {
    let doc = user();
    let mut first = doc.get("firstName");
    first.replace("Jane");
    assert_eq!(first.as_string().as_deref(), Some("Jane"));
    assert_eq!(doc.get("firstName").as_string().as_deref(), Some("John"));
}

#[test]
fn arrays_accept_overwrite_and_append() {
    let mut doc = Node::parse("[1, 2]").unwrap();
    doc.set(0usize, 10i64).unwrap();
    doc.set(2usize, 3i64).unwrap();
    assert_eq!(doc.to_string(), "[10,2,3]");

    let err = doc.set(9usize, 1i64).unwrap_err();
    assert!(matches!(&err, Error::InvalidStructure { path: p, .. } if *p == path("[9]")));
}

#[test]
fn writes_through_leaves_fail() {
    let mut doc = user();
    let err = doc.set_at(&path("firstName.first"), "J").unwrap_err();
    assert!(matches!(
        &err,
        Error::InvalidStructure { path: p, .. } if *p == path("firstName.first")
    ));

    let err = doc.set_at(&path("nope.deeper"), 1i64).unwrap_err();
    assert!(matches!(
        &err,
        Error::InvalidStructure { path: p, .. } if *p == path("nope")
    ));

    let err = doc.set("gadgets", 1i64);
    assert!(err.is_ok(), "replacing a member with a leaf is allowed");
    assert!(doc.get("gadgets").set(0usize, 1i64).is_err());
}
