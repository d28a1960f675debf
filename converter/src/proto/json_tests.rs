use super::*;
use crate::proto::schema::{SIMPLE_TEST, SIMPLE_TEST_FILE};
use crate::proto::text::decode_text;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn decode(message_type: &str, text: &str) -> DynamicMessage {
    let descriptor = registry().message(message_type).unwrap();
    decode_text(descriptor, text.as_bytes(), "json_tests").unwrap()
}

fn json_of(message_type: &str, text: &str) -> JsonValue {
    to_json(&decode(message_type, text)).unwrap()
}

// compact text, keeps key order visible
fn compact(message_type: &str, text: &str) -> String {
    serde_json::to_string(&json_of(message_type, text)).unwrap()
}

#[test]
fn test_defaults_are_omitted_but_oneof_members_are_not() {
    assert_eq!(
        json_of(
            SIMPLE_TEST,
            r#"name: "t" expr: "" disable_macros: false value { int64_value: 0 }"#
        ),
        json!({"name": "t", "value": {"int64Value": "0"}})
    );
}

#[test]
fn test_keys_follow_declaration_order() {
    assert_eq!(
        compact(
            SIMPLE_TEST,
            r#"value { bool_value: true } expr: "x" disable_check: true name: "n""#
        ),
        r#"{"name":"n","expr":"x","disableCheck":true,"value":{"boolValue":true}}"#
    );
}

#[test]
fn test_empty_document() {
    assert_eq!(json_of(SIMPLE_TEST_FILE, ""), json!({}));
}

#[rstest]
#[case("int64_value: -5", json!({"int64Value": "-5"}))]
#[case("uint64_value: 18446744073709551615", json!({"uint64Value": "18446744073709551615"}))]
#[case("double_value: 1.5", json!({"doubleValue": 1.5}))]
#[case("double_value: 3", json!({"doubleValue": 3}))]
#[case("double_value: -1e-7", json!({"doubleValue": -1e-7}))]
#[case("double_value: nan", json!({"doubleValue": "NaN"}))]
#[case("double_value: inf", json!({"doubleValue": "Infinity"}))]
#[case("double_value: -infinity", json!({"doubleValue": "-Infinity"}))]
#[case(r#"bytes_value: "hello""#, json!({"bytesValue": "aGVsbG8="}))]
#[case(r#"bytes_value: "\377""#, json!({"bytesValue": "/w=="}))]
#[case(r#"bytes_value: """#, json!({"bytesValue": ""}))]
#[case("null_value: NULL_VALUE", json!({"nullValue": null}))]
#[case(r#"string_value: """#, json!({"stringValue": ""}))]
#[case("bool_value: false", json!({"boolValue": false}))]
#[case(r#"type_value: "google.protobuf.Duration""#, json!({"typeValue": "google.protobuf.Duration"}))]
#[case(
    r#"enum_value { type: "cel.expr.conformance.proto3.GlobalEnum" value: 1 }"#,
    json!({"enumValue": {"type": "cel.expr.conformance.proto3.GlobalEnum", "value": 1}})
)]
#[case(
    r#"list_value { values { int64_value: 1 } values { string_value: "a" } }"#,
    json!({"listValue": {"values": [{"int64Value": "1"}, {"stringValue": "a"}]}})
)]
#[case("list_value {}", json!({"listValue": {}}))]
#[case(
    r#"map_value { entries { key { string_value: "k" } value { bool_value: true } } }"#,
    json!({"mapValue": {"entries": [{"key": {"stringValue": "k"}, "value": {"boolValue": true}}]}})
)]
fn test_value_mapping(#[case] text: &str, #[case] expected: JsonValue) {
    assert_eq!(json_of("cel.expr.Value", text), expected);
}

#[rstest]
#[case("primitive: STRING", json!({"primitive": "STRING"}))]
#[case("primitive: 42", json!({"primitive": 42}))]
#[case("null: NULL_VALUE", json!({"null": null}))]
#[case("well_known: DURATION", json!({"wellKnown": "DURATION"}))]
#[case("dyn {}", json!({"dyn": {}}))]
#[case(
    "map_type { key_type { primitive: STRING } value_type { dyn {} } }",
    json!({"mapType": {"keyType": {"primitive": "STRING"}, "valueType": {"dyn": {}}}})
)]
#[case(
    r#"abstract_type { name: "optional_type" parameter_types { type_param: "T" } }"#,
    json!({"abstractType": {"name": "optional_type", "parameterTypes": [{"typeParam": "T"}]}})
)]
fn test_type_mapping(#[case] text: &str, #[case] expected: JsonValue) {
    assert_eq!(json_of("cel.expr.Type", text), expected);
}

#[test]
fn test_map_keys_are_sorted() {
    assert_eq!(
        compact(
            SIMPLE_TEST,
            r#"
            bindings { key: "b" value { value { int64_value: 1 } } }
            bindings { key: "a" value { } }
            "#
        ),
        r#"{"bindings":{"a":{},"b":{"value":{"int64Value":"1"}}}}"#
    );
}

#[rstest]
#[case("google.protobuf.Int64Value] { value: 5 }", json!("5"))]
#[case("google.protobuf.UInt32Value] { value: 7 }", json!(7))]
#[case("google.protobuf.FloatValue] { value: 0.1 }", json!(0.1))]
#[case("google.protobuf.BoolValue] { }", json!(false))]
#[case("google.protobuf.StringValue] { value: \"s\" }", json!("s"))]
#[case("google.protobuf.BytesValue] { value: \"\\001\" }", json!("AQ=="))]
#[case("google.protobuf.Duration] { seconds: 1 nanos: 500000000 }", json!("1.500s"))]
#[case("google.protobuf.Timestamp] { seconds: 0 }", json!("1970-01-01T00:00:00Z"))]
#[case("google.protobuf.Empty] { }", json!({}))]
#[case(
    "google.protobuf.Struct] { fields { key: \"k\" value { string_value: \"v\" } } }",
    json!({"k": "v"})
)]
#[case("google.protobuf.Value] { number_value: 0.5 }", json!(0.5))]
#[case("google.protobuf.ListValue] { }", json!([]))]
#[case("google.protobuf.FieldMask] { paths: \"a_b\" paths: \"c\" }", json!("aB,c"))]
fn test_any_with_well_known_payload(#[case] payload: &str, #[case] expected: JsonValue) {
    let text = format!("details {{ [type.googleapis.com/{payload} }}");
    let json = json_of("cel.expr.Status", &text);
    let type_url = format!(
        "type.googleapis.com/{}",
        payload.split(']').next().unwrap()
    );
    assert_eq!(
        json,
        json!({"details": [{"@type": type_url, "value": expected}]})
    );
}

#[test]
fn test_any_with_message_payload_inlines_fields() {
    assert_eq!(
        compact(
            "cel.expr.Status",
            "code: 3 details { [type.googleapis.com/cel.expr.Value] { int64_value: 1 } } details { }"
        ),
        r#"{"code":3,"details":[{"@type":"type.googleapis.com/cel.expr.Value","int64Value":"1"},{}]}"#
    );
}

#[test]
fn test_any_with_test_all_types_payload() {
    assert_eq!(
        compact(
            "cel.expr.Status",
            r#"details {
                [type.googleapis.com/cel.expr.conformance.proto3.TestAllTypes] {
                    single_int64: 1
                    single_struct { }
                    map_bool_bool { key: true value: false }
                }
            }"#
        ),
        concat!(
            r#"{"details":[{"@type":"type.googleapis.com/cel.expr.conformance.proto3.TestAllTypes","#,
            r#""singleInt64":"1","singleStruct":{},"mapBoolBool":{"true":false}}]}"#
        )
    );
}

#[test]
fn test_explicit_presence_keeps_zero_values() {
    let text = r#"single_int32: 0 single_string: "" standalone_enum: FOO repeated_int32: []"#;
    assert_eq!(
        compact("cel.expr.conformance.proto2.TestAllTypes", text),
        r#"{"singleInt32":0,"singleString":"","standaloneEnum":"FOO"}"#
    );
    assert_eq!(
        compact("cel.expr.conformance.proto3.TestAllTypes", text),
        "{}"
    );
    assert_eq!(
        compact(
            "cel.expr.conformance.proto3.TestAllTypes",
            "optional_bool: false single_bool: false optional_null_value: NULL_VALUE"
        ),
        r#"{"optionalBool":false,"optionalNullValue":null}"#
    );
}

#[rstest]
#[case("null_value: NULL_VALUE", json!(null))]
#[case("number_value: 1.5", json!(1.5))]
#[case("number_value: 2", json!(2))]
#[case(r#"string_value: "s""#, json!("s"))]
#[case("bool_value: false", json!(false))]
#[case("struct_value {}", json!({}))]
#[case("list_value {}", json!([]))]
#[case(
    r#"struct_value {
        fields { key: "b" value { bool_value: true } }
        fields { key: "a" value { list_value { values { number_value: 1 } values { string_value: "x" } } } }
    }"#,
    json!({"a": [1, "x"], "b": true})
)]
fn test_struct_value_mapping(#[case] text: &str, #[case] expected: JsonValue) {
    assert_eq!(json_of("google.protobuf.Value", text), expected);
}

#[rstest]
#[case("", "no member of kind is set")]
#[case("number_value: inf", "number_value inf has no JSON form")]
#[case("number_value: nan", "number_value NaN has no JSON form")]
#[case("list_value { values { } }", "no member of kind is set")]
fn test_struct_value_without_json_form(#[case] text: &str, #[case] expected: &str) {
    let e = to_json(&decode("google.protobuf.Value", text)).unwrap_err();
    assert_eq!(e.message_type, "google.protobuf.Value");
    assert_eq!(e.message, expected);
}

#[rstest]
#[case(r#"paths: "single_int32" paths: "standalone_message.bb""#, Ok("singleInt32,standaloneMessage.bb"))]
#[case("", Ok(""))]
#[case(r#"paths: "fooBar""#, Err("field mask path `fooBar` is not reversible"))]
#[case(r#"paths: "foo__bar""#, Err("field mask path `foo__bar` is not reversible"))]
#[case(r#"paths: "foo_1""#, Err("field mask path `foo_1` is not reversible"))]
fn test_field_mask(#[case] text: &str, #[case] expected: std::result::Result<&str, &str>) {
    let result = to_json(&decode("google.protobuf.FieldMask", text));
    match expected {
        Ok(paths) => assert_eq!(result.unwrap(), json!(paths)),
        Err(message) => assert_eq!(result.unwrap_err().message, message),
    }
}

#[test]
fn test_bare_any_type_url() {
    assert_eq!(
        json_of(
            "cel.expr.Value",
            r#"object_value { type_url: "type.googleapis.com/cel.expr.Value" }"#
        ),
        json!({"objectValue": {"@type": "type.googleapis.com/cel.expr.Value"}})
    );
}

#[rstest]
#[case(0, 0, "0s")]
#[case(1, 0, "1s")]
#[case(-1, 0, "-1s")]
#[case(1, 500_000_000, "1.500s")]
#[case(0, -500_000_000, "-0.500s")]
#[case(-3, -250_000, "-3.000250s")]
#[case(1, 1_000, "1.000001s")]
#[case(1, 1, "1.000000001s")]
#[case(315_576_000_000, 0, "315576000000s")]
fn test_duration(#[case] seconds: i64, #[case] nanos: i32, #[case] expected: &str) {
    assert_eq!(duration_to_json(seconds, nanos), Ok(json!(expected)));
}

#[rstest]
#[case(1, -1)]
#[case(-1, 1)]
#[case(0, 1_000_000_000)]
#[case(315_576_000_001, 0)]
fn test_duration_out_of_range(#[case] seconds: i64, #[case] nanos: i32) {
    assert!(duration_to_json(seconds, nanos).is_err());
}

#[rstest]
#[case(0, 0, "1970-01-01T00:00:00Z")]
#[case(-1, 0, "1969-12-31T23:59:59Z")]
#[case(0, 500_000_000, "1970-01-01T00:00:00.500Z")]
#[case(0, 1_000, "1970-01-01T00:00:00.000001Z")]
#[case(1_700_000_000, 0, "2023-11-14T22:13:20Z")]
fn test_timestamp(#[case] seconds: i64, #[case] nanos: i32, #[case] expected: &str) {
    assert_eq!(timestamp_to_json(seconds, nanos), Ok(json!(expected)));
}

#[test]
fn test_timestamp_out_of_range() {
    assert!(timestamp_to_json(0, -1).is_err());
    assert!(timestamp_to_json(0, 1_000_000_000).is_err());
    assert!(timestamp_to_json(i64::MAX, 0).is_err());
}

#[test]
fn test_invalid_well_known_payload_is_an_encode_error() {
    let status = decode(
        "cel.expr.Status",
        "details { [type.googleapis.com/google.protobuf.Duration] { seconds: 1 nanos: -1 } }",
    );
    let e = to_json(&status).unwrap_err();
    assert_eq!(e.message_type, "google.protobuf.Duration");
    assert!(matches!(
        to_json_pretty(&status),
        Err(JsonEncodeError::Encode(_))
    ));
}

#[test]
fn test_float_formatting() {
    assert_eq!(serde_json::to_string(&float_to_json(3.0)).unwrap(), "3");
    assert_eq!(serde_json::to_string(&float_to_json(-0.0)).unwrap(), "-0.0");
    assert_eq!(serde_json::to_string(&float_to_json(0.25)).unwrap(), "0.25");
    assert_eq!(f32_as_f64(0.1), 0.1);
}

#[test]
fn test_pretty_output() {
    let message = decode(SIMPLE_TEST, r#"name: "t" value { list_value {} }"#);
    let pretty = String::from_utf8(to_json_pretty(&message).unwrap()).unwrap();
    assert_eq!(
        pretty,
        "{\n  \"name\": \"t\",\n  \"value\": {\n    \"listValue\": {}\n  }\n}"
    );
}
