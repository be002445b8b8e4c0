//! End-to-end checks against the public API surface.

use verbatim_json::errors::Details;
use verbatim_json::{AccessError, Value};

#[test]
fn should_parse_heterogeneous_arrays_with_strict_getters() {
    let value = Value::parse("[true, 10]").unwrap();
    assert_eq!(value.len(), 2);
    assert!(value[0].get_bool().unwrap());
    assert!(matches!(
        value[0].get_int(),
        Err(AccessError::TypeMismatch { .. })
    ));
    assert_eq!(value[1].get_int().unwrap(), 10);
    assert!(matches!(
        value[1].get_bool(),
        Err(AccessError::TypeMismatch { .. })
    ));
}

#[test]
fn should_build_and_render_objects() {
    let mut value = Value::Null;
    let object = value.set_object();
    object.push("age", Value::from(100));
    object.push("first", Value::from("John"));
    assert_eq!(value.stringify(0), r#"{"age":100,"first":"John"}"#);
    assert_eq!(
        value.stringify(4),
        "{\n    \"age\": 100,\n    \"first\": \"John\"\n}"
    );
}

#[test]
fn should_decode_escaped_surrogate_pairs_to_utf8() {
    let value = Value::parse(r#"["𝅘𝅥𝅯"]"#).unwrap();
    assert_eq!(value.len(), 1);
    assert_eq!(
        value[0].get_str().unwrap().as_bytes(),
        [0xf0, 0x9d, 0x85, 0xa1]
    );

    // a pair whose combined offset carries into bit 16 (U+20000)
    let value = Value::parse(r#"["\uD840\uDC00"]"#).unwrap();
    assert_eq!(value[0].get_str().unwrap(), "\u{20000}");
    assert_eq!(
        value[0].get_str().unwrap().as_bytes(),
        [0xf0, 0xa0, 0x80, 0x80]
    );
}

#[test]
fn should_validate_num_str_assignments() {
    let mut value = Value::Null;
    value.set_num_str(" -690 whitespace then junk");
    assert!(value.is_null());
    value.set_num_str(" -689 ");
    assert_eq!(value, Value::Num("-689".into()));
    assert_eq!(value.get_val_str(), "-689");
}

#[test]
fn should_map_non_finite_doubles_to_null() {
    assert!(Value::from(f64::INFINITY).is_null());
    assert!(Value::from(f64::NEG_INFINITY).is_null());
    assert!(Value::from(f64::NAN).is_null());
}

#[test]
fn should_accept_exactly_one_document_per_input() {
    for bad in ["{} garbage", "[]{}", "{}[]", "{} 42"] {
        assert_eq!(
            Value::parse(bad).unwrap_err().details,
            Details::TrailingContent,
            "accepted {:?}",
            bad
        );
    }
    let value = Value::parse("  {}\n  ").unwrap();
    assert!(value.is_object());
    assert!(value.is_empty());
}

#[test]
fn should_round_trip_programmatic_documents() {
    let mut value = Value::Null;
    let object = value.set_object();
    object.push("text", Value::from("line\nbreak \"quoted\""));
    object.push("real", Value::from(0.25));
    object.push("big", Value::from(u64::MAX));
    object.push("nothing", Value::Null);
    let mut nested = Value::Null;
    nested
        .set_array()
        .extend([Value::True, Value::False, Value::from(-1i8)]);
    object.push("flags", nested);
    let reparsed = Value::parse(&value.stringify(0)).unwrap();
    assert_eq!(reparsed, value);
    let reparsed = Value::parse(&value.stringify(4)).unwrap();
    assert_eq!(reparsed, value);
}

#[test]
fn should_preserve_number_literals_verbatim() {
    let literals = "[1.10000000,-0,0.0,5e-10,123456789012345678901234567890]";
    let value = Value::parse(literals).unwrap();
    assert_eq!(value.stringify(0), literals);
    // wider than any machine integer, but still a valid JSON number
    assert!(matches!(
        value[4].get_uint64(),
        Err(AccessError::OutOfRange { .. })
    ));
    assert!(value[4].get_real().is_ok());
}

#[test]
fn should_compare_order_sensitively() {
    let a = Value::parse(r#"{"x":1,"y":2}"#).unwrap();
    let b = Value::parse(r#"{"y":2,"x":1}"#).unwrap();
    assert_ne!(a, b);
    assert_ne!(
        Value::parse("[1,2]").unwrap(),
        Value::parse("[2,1]").unwrap()
    );
}

#[test]
fn should_report_depth_against_the_ceiling() {
    let nested = |depth: usize| format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert!(Value::parse(&nested(verbatim_json::MAX_DEPTH)).is_ok());
    assert_eq!(
        Value::parse(&nested(verbatim_json::MAX_DEPTH + 1))
            .unwrap_err()
            .details,
        Details::NestingTooDeep
    );
}

#[test]
fn should_reject_embedded_nul_bytes() {
    let mut value = Value::Null;
    assert!(value.read_bytes(b"{}\0{}").is_err());
    assert!(value.read_bytes(b"\0{}").is_err());
}

#[test]
fn should_expose_all_three_lookup_tiers() {
    let value = Value::parse(r#"{"present":null,"list":[1]}"#).unwrap();
    // always-valid indexing, chainable through misses
    assert!(value["present"].is_null());
    assert!(value["absent"]["deeper"][3].is_null());
    // locate distinguishes missing from null
    assert!(value.locate("present").is_some());
    assert!(value.locate("absent").is_none());
    // at explains the failure
    assert!(matches!(
        value.at("absent"),
        Err(AccessError::KeyNotFound { .. })
    ));
    assert!(matches!(
        value["list"].at_index(1),
        Err(AccessError::IndexOutOfBounds { index: 1, len: 1 })
    ));
    assert!(matches!(
        value["present"].at("x"),
        Err(AccessError::WrongContainerKind { .. })
    ));
}
