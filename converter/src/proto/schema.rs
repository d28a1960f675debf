// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//
// Message and enum declarations for the CEL conformance test files and everything they
// reach: cel.expr checked/value/eval types, the proto2 and proto3 TestAllTypes messages
// that tests embed in Any values, and the protobuf well-known types. Field order
// follows the declaration order of the .proto sources since JSON output is emitted in
// that order.
//

use lazy_static::lazy_static;

use super::descriptor::{
    EnumDescriptor, FieldDescriptor as F, Kind, MessageDescriptor as M, Registry, WellKnown,
};
use Kind::*;

pub const SIMPLE_TEST_FILE: &str = "cel.expr.conformance.test.SimpleTestFile";
pub const SIMPLE_TEST_SECTION: &str = "cel.expr.conformance.test.SimpleTestSection";
pub const SIMPLE_TEST: &str = "cel.expr.conformance.test.SimpleTest";

pub const ANY: &str = "google.protobuf.Any";
pub const NULL_VALUE: &str = "google.protobuf.NullValue";

const EMPTY: &str = "google.protobuf.Empty";
const DURATION: &str = "google.protobuf.Duration";
const TIMESTAMP: &str = "google.protobuf.Timestamp";
const STRUCT: &str = "google.protobuf.Struct";
const STRUCT_VALUE: &str = "google.protobuf.Value";
const STRUCT_LIST_VALUE: &str = "google.protobuf.ListValue";
const FIELD_MASK: &str = "google.protobuf.FieldMask";

const VALUE: &str = "cel.expr.Value";
const ERROR_SET: &str = "cel.expr.ErrorSet";
const UNKNOWN_SET: &str = "cel.expr.UnknownSet";
const TYPE: &str = "cel.expr.Type";
const PRIMITIVE_TYPE: &str = "cel.expr.Type.PrimitiveType";

lazy_static! {
    static ref REGISTRY: Registry = build();
}

pub fn registry() -> &'static Registry {
    &REGISTRY
}

fn build() -> Registry {
    let mut registry = Registry::default();
    well_known_types(&mut registry);
    value_types(&mut registry);
    eval_types(&mut registry);
    checked_types(&mut registry);
    conformance_types(&mut registry);
    test_all_types_messages(&mut registry);
    registry
}

fn well_known_types(registry: &mut Registry) {
    registry.add_enum(EnumDescriptor::new(NULL_VALUE, vec![("NULL_VALUE", 0)]));

    registry.add_message(
        M::new(
            ANY,
            vec![F::new("type_url", 1, String), F::new("value", 2, Bytes)],
        )
        .well_known(WellKnown::Any),
    );
    registry.add_message(M::new(EMPTY, vec![]).well_known(WellKnown::Empty));
    registry.add_message(
        M::new(
            DURATION,
            vec![F::new("seconds", 1, Int64), F::new("nanos", 2, Int32)],
        )
        .well_known(WellKnown::Duration),
    );
    registry.add_message(
        M::new(
            TIMESTAMP,
            vec![F::new("seconds", 1, Int64), F::new("nanos", 2, Int32)],
        )
        .well_known(WellKnown::Timestamp),
    );

    let wrappers: [(&'static str, Kind); 9] = [
        ("google.protobuf.BoolValue", Bool),
        ("google.protobuf.Int32Value", Int32),
        ("google.protobuf.Int64Value", Int64),
        ("google.protobuf.UInt32Value", Uint32),
        ("google.protobuf.UInt64Value", Uint64),
        ("google.protobuf.FloatValue", Float),
        ("google.protobuf.DoubleValue", Double),
        ("google.protobuf.StringValue", String),
        ("google.protobuf.BytesValue", Bytes),
    ];
    for (name, kind) in wrappers {
        registry.add_message(M::new(name, vec![F::new("value", 1, kind)]).well_known(WellKnown::Wrapper));
    }

    registry.add_message(
        M::new(
            STRUCT,
            vec![F::new("fields", 1, Message("google.protobuf.Struct.FieldsEntry")).repeated()],
        )
        .well_known(WellKnown::Struct),
    );
    registry.add_message(M::map_entry(
        "google.protobuf.Struct.FieldsEntry",
        String,
        Message(STRUCT_VALUE),
    ));
    registry.add_message(
        M::new(
            STRUCT_VALUE,
            vec![
                F::new("null_value", 1, Enum(NULL_VALUE)).in_oneof("kind"),
                F::new("number_value", 2, Double).in_oneof("kind"),
                F::new("string_value", 3, String).in_oneof("kind"),
                F::new("bool_value", 4, Bool).in_oneof("kind"),
                F::new("struct_value", 5, Message(STRUCT)).in_oneof("kind"),
                F::new("list_value", 6, Message(STRUCT_LIST_VALUE)).in_oneof("kind"),
            ],
        )
        .well_known(WellKnown::Value),
    );
    registry.add_message(
        M::new(
            STRUCT_LIST_VALUE,
            vec![F::new("values", 1, Message(STRUCT_VALUE)).repeated()],
        )
        .well_known(WellKnown::ListValue),
    );
    registry.add_message(
        M::new(FIELD_MASK, vec![F::new("paths", 1, String).repeated()])
            .well_known(WellKnown::FieldMask),
    );
}

fn value_types(registry: &mut Registry) {
    registry.add_message(M::new(
        VALUE,
        vec![
            F::new("null_value", 1, Enum(NULL_VALUE)).in_oneof("kind"),
            F::new("bool_value", 2, Bool).in_oneof("kind"),
            F::new("int64_value", 3, Int64).in_oneof("kind"),
            F::new("uint64_value", 4, Uint64).in_oneof("kind"),
            F::new("double_value", 5, Double).in_oneof("kind"),
            F::new("string_value", 6, String).in_oneof("kind"),
            F::new("bytes_value", 7, Bytes).in_oneof("kind"),
            F::new("enum_value", 9, Message("cel.expr.EnumValue")).in_oneof("kind"),
            F::new("object_value", 10, Message(ANY)).in_oneof("kind"),
            F::new("map_value", 11, Message("cel.expr.MapValue")).in_oneof("kind"),
            F::new("list_value", 12, Message("cel.expr.ListValue")).in_oneof("kind"),
            F::new("type_value", 15, String).in_oneof("kind"),
        ],
    ));
    registry.add_message(M::new(
        "cel.expr.EnumValue",
        vec![F::new("type", 1, String), F::new("value", 2, Int32)],
    ));
    registry.add_message(M::new(
        "cel.expr.ListValue",
        vec![F::new("values", 1, Message(VALUE)).repeated()],
    ));
    registry.add_message(M::new(
        "cel.expr.MapValue",
        vec![F::new("entries", 1, Message("cel.expr.MapValue.Entry")).repeated()],
    ));
    registry.add_message(M::new(
        "cel.expr.MapValue.Entry",
        vec![
            F::new("key", 1, Message(VALUE)),
            F::new("value", 2, Message(VALUE)),
        ],
    ));
}

fn eval_types(registry: &mut Registry) {
    registry.add_message(M::new(
        "cel.expr.ExprValue",
        vec![
            F::new("value", 1, Message(VALUE)).in_oneof("kind"),
            F::new("error", 2, Message(ERROR_SET)).in_oneof("kind"),
            F::new("unknown", 3, Message(UNKNOWN_SET)).in_oneof("kind"),
        ],
    ));
    registry.add_message(M::new(
        ERROR_SET,
        vec![F::new("errors", 1, Message("cel.expr.Status")).repeated()],
    ));
    registry.add_message(M::new(
        "cel.expr.Status",
        vec![
            F::new("code", 1, Int32),
            F::new("message", 2, String),
            F::new("details", 3, Message(ANY)).repeated(),
        ],
    ));
    registry.add_message(M::new(
        UNKNOWN_SET,
        vec![F::new("exprs", 1, Int64).repeated()],
    ));
}

fn checked_types(registry: &mut Registry) {
    registry.add_message(M::new(
        "cel.expr.Decl",
        vec![
            F::new("name", 1, String),
            F::new("ident", 2, Message("cel.expr.Decl.IdentDecl")).in_oneof("decl_kind"),
            F::new("function", 3, Message("cel.expr.Decl.FunctionDecl")).in_oneof("decl_kind"),
        ],
    ));
    registry.add_message(M::new(
        "cel.expr.Decl.IdentDecl",
        vec![
            F::new("type", 1, Message(TYPE)),
            F::new("value", 2, Message("cel.expr.Constant")),
            F::new("doc", 3, String),
        ],
    ));
    registry.add_message(M::new(
        "cel.expr.Decl.FunctionDecl",
        vec![F::new("overloads", 1, Message("cel.expr.Decl.FunctionDecl.Overload")).repeated()],
    ));
    registry.add_message(M::new(
        "cel.expr.Decl.FunctionDecl.Overload",
        vec![
            F::new("overload_id", 1, String),
            F::new("params", 2, Message(TYPE)).repeated(),
            F::new("type_params", 3, String).repeated(),
            F::new("result_type", 4, Message(TYPE)),
            F::new("is_instance_function", 5, Bool),
            F::new("doc", 6, String),
        ],
    ));

    registry.add_enum(EnumDescriptor::new(
        PRIMITIVE_TYPE,
        vec![
            ("PRIMITIVE_TYPE_UNSPECIFIED", 0),
            ("BOOL", 1),
            ("INT64", 2),
            ("UINT64", 3),
            ("DOUBLE", 4),
            ("STRING", 5),
            ("BYTES", 6),
        ],
    ));
    registry.add_enum(EnumDescriptor::new(
        "cel.expr.Type.WellKnownType",
        vec![
            ("WELL_KNOWN_TYPE_UNSPECIFIED", 0),
            ("ANY", 1),
            ("TIMESTAMP", 2),
            ("DURATION", 3),
        ],
    ));
    registry.add_message(M::new(
        TYPE,
        vec![
            F::new("dyn", 1, Message(EMPTY)).in_oneof("type_kind"),
            F::new("null", 2, Enum(NULL_VALUE)).in_oneof("type_kind"),
            F::new("primitive", 3, Enum(PRIMITIVE_TYPE)).in_oneof("type_kind"),
            F::new("wrapper", 4, Enum(PRIMITIVE_TYPE)).in_oneof("type_kind"),
            F::new("well_known", 5, Enum("cel.expr.Type.WellKnownType")).in_oneof("type_kind"),
            F::new("list_type", 6, Message("cel.expr.Type.ListType")).in_oneof("type_kind"),
            F::new("map_type", 7, Message("cel.expr.Type.MapType")).in_oneof("type_kind"),
            F::new("function", 8, Message("cel.expr.Type.FunctionType")).in_oneof("type_kind"),
            F::new("message_type", 9, String).in_oneof("type_kind"),
            F::new("type_param", 10, String).in_oneof("type_kind"),
            F::new("type", 11, Message(TYPE)).in_oneof("type_kind"),
            F::new("error", 12, Message(EMPTY)).in_oneof("type_kind"),
            F::new("abstract_type", 14, Message("cel.expr.Type.AbstractType")).in_oneof("type_kind"),
        ],
    ));
    registry.add_message(M::new(
        "cel.expr.Type.ListType",
        vec![F::new("elem_type", 1, Message(TYPE))],
    ));
    registry.add_message(M::new(
        "cel.expr.Type.MapType",
        vec![
            F::new("key_type", 1, Message(TYPE)),
            F::new("value_type", 2, Message(TYPE)),
        ],
    ));
    registry.add_message(M::new(
        "cel.expr.Type.FunctionType",
        vec![
            F::new("result_type", 1, Message(TYPE)),
            F::new("arg_types", 2, Message(TYPE)).repeated(),
        ],
    ));
    registry.add_message(M::new(
        "cel.expr.Type.AbstractType",
        vec![
            F::new("name", 1, String),
            F::new("parameter_types", 2, Message(TYPE)).repeated(),
        ],
    ));

    registry.add_message(M::new(
        "cel.expr.Constant",
        vec![
            F::new("null_value", 1, Enum(NULL_VALUE)).in_oneof("constant_kind"),
            F::new("bool_value", 2, Bool).in_oneof("constant_kind"),
            F::new("int64_value", 3, Int64).in_oneof("constant_kind"),
            F::new("uint64_value", 4, Uint64).in_oneof("constant_kind"),
            F::new("double_value", 5, Double).in_oneof("constant_kind"),
            F::new("string_value", 6, String).in_oneof("constant_kind"),
            F::new("bytes_value", 7, Bytes).in_oneof("constant_kind"),
            F::new("duration_value", 8, Message(DURATION)).in_oneof("constant_kind"),
            F::new("timestamp_value", 9, Message(TIMESTAMP)).in_oneof("constant_kind"),
        ],
    ));
}

fn conformance_types(registry: &mut Registry) {
    registry.add_message(M::new(
        SIMPLE_TEST_FILE,
        vec![
            F::new("name", 1, String),
            F::new("description", 2, String),
            F::new("section", 3, Message(SIMPLE_TEST_SECTION)).repeated(),
        ],
    ));
    registry.add_message(M::new(
        SIMPLE_TEST_SECTION,
        vec![
            F::new("name", 1, String),
            F::new("description", 2, String),
            F::new("test", 3, Message(SIMPLE_TEST)).repeated(),
        ],
    ));
    registry.add_message(M::new(
        SIMPLE_TEST,
        vec![
            F::new("name", 1, String),
            F::new("description", 2, String),
            F::new("expr", 3, String),
            F::new("disable_macros", 4, Bool),
            F::new("disable_check", 5, Bool),
            F::new("check_only", 15, Bool),
            F::new("type_env", 6, Message("cel.expr.Decl")).repeated(),
            F::new("container", 13, String),
            F::new("locale", 14, String),
            F::new("bindings", 7, Message("cel.expr.conformance.test.SimpleTest.BindingsEntry"))
                .repeated(),
            F::new("value", 8, Message(VALUE)).in_oneof("result_matcher"),
            F::new("typed_result", 16, Message("cel.expr.conformance.test.TypedResult"))
                .in_oneof("result_matcher"),
            F::new("eval_error", 9, Message(ERROR_SET)).in_oneof("result_matcher"),
            F::new("any_eval_errors", 10, Message("cel.expr.conformance.test.ErrorSetMatcher"))
                .in_oneof("result_matcher"),
            F::new("unknown", 11, Message(UNKNOWN_SET)).in_oneof("result_matcher"),
            F::new("any_unknowns", 12, Message("cel.expr.conformance.test.UnknownSetMatcher"))
                .in_oneof("result_matcher"),
        ],
    ));
    registry.add_message(M::map_entry(
        "cel.expr.conformance.test.SimpleTest.BindingsEntry",
        String,
        Message("cel.expr.ExprValue"),
    ));
    registry.add_message(M::new(
        "cel.expr.conformance.test.TypedResult",
        vec![
            F::new("result", 1, Message(VALUE)),
            F::new("deduced_type", 2, Message(TYPE)),
        ],
    ));
    registry.add_message(M::new(
        "cel.expr.conformance.test.ErrorSetMatcher",
        vec![F::new("errors", 1, Message(ERROR_SET)).repeated()],
    ));
    registry.add_message(M::new(
        "cel.expr.conformance.test.UnknownSetMatcher",
        vec![F::new("unknowns", 1, Message(UNKNOWN_SET)).repeated()],
    ));
}

//
// TestAllTypes exists once per syntax with identical field numbers; only the package and
// the presence rules differ. Names are built at compile time so descriptors keep their
// `&'static str` names.
//
struct TestAllTypesNames {
    message: &'static str,
    nested_message: &'static str,
    nested_enum: &'static str,
    nested_test_all_types: &'static str,
    global_enum: &'static str,
    map_entries: [&'static str; 13],
}

macro_rules! test_all_types_names {
    ($package:literal) => {
        TestAllTypesNames {
            message: concat!($package, ".TestAllTypes"),
            nested_message: concat!($package, ".TestAllTypes.NestedMessage"),
            nested_enum: concat!($package, ".TestAllTypes.NestedEnum"),
            nested_test_all_types: concat!($package, ".NestedTestAllTypes"),
            global_enum: concat!($package, ".GlobalEnum"),
            map_entries: [
                concat!($package, ".TestAllTypes.MapStringStringEntry"),
                concat!($package, ".TestAllTypes.MapInt64NestedTypeEntry"),
                concat!($package, ".TestAllTypes.MapBoolBoolEntry"),
                concat!($package, ".TestAllTypes.MapBoolStringEntry"),
                concat!($package, ".TestAllTypes.MapBoolBytesEntry"),
                concat!($package, ".TestAllTypes.MapBoolInt32Entry"),
                concat!($package, ".TestAllTypes.MapBoolInt64Entry"),
                concat!($package, ".TestAllTypes.MapBoolUint32Entry"),
                concat!($package, ".TestAllTypes.MapBoolUint64Entry"),
                concat!($package, ".TestAllTypes.MapBoolFloatEntry"),
                concat!($package, ".TestAllTypes.MapBoolDoubleEntry"),
                concat!($package, ".TestAllTypes.MapBoolEnumEntry"),
                concat!($package, ".TestAllTypes.MapBoolMessageEntry"),
            ],
        }
    };
}
fn test_all_types_messages(registry: &mut Registry) {
    test_all_types(registry, &test_all_types_names!("cel.expr.conformance.proto2"), true);
    test_all_types(registry, &test_all_types_names!("cel.expr.conformance.proto3"), false);
}

fn test_all_types(registry: &mut Registry, names: &TestAllTypesNames, proto2: bool) {
    registry.add_enum(EnumDescriptor::new(
        names.nested_enum,
        vec![("FOO", 0), ("BAR", 1), ("BAZ", 2)],
    ));
    registry.add_enum(EnumDescriptor::new(
        names.global_enum,
        vec![("GOO", 0), ("GAR", 1), ("GAZ", 2)],
    ));
    registry.add_message(M::new(
        names.nested_message,
        vec![with_presence(F::new("bb", 1, Int32), proto2)],
    ));
    registry.add_message(M::new(
        names.nested_test_all_types,
        vec![
            F::new("child", 1, Message(names.nested_test_all_types)),
            F::new("payload", 2, Message(names.message)),
        ],
    ));

    // sint, fixed and sfixed share the text and JSON forms of their plain counterparts
    let scalars: [(&'static str, &'static str, Kind); 15] = [
        ("single_int32", "repeated_int32", Int32),
        ("single_int64", "repeated_int64", Int64),
        ("single_uint32", "repeated_uint32", Uint32),
        ("single_uint64", "repeated_uint64", Uint64),
        ("single_sint32", "repeated_sint32", Int32),
        ("single_sint64", "repeated_sint64", Int64),
        ("single_fixed32", "repeated_fixed32", Uint32),
        ("single_fixed64", "repeated_fixed64", Uint64),
        ("single_sfixed32", "repeated_sfixed32", Int32),
        ("single_sfixed64", "repeated_sfixed64", Int64),
        ("single_float", "repeated_float", Float),
        ("single_double", "repeated_double", Double),
        ("single_bool", "repeated_bool", Bool),
        ("single_string", "repeated_string", String),
        ("single_bytes", "repeated_bytes", Bytes),
    ];
    let mut fields = vec![];
    for (number, (name, _, kind)) in (1..).zip(scalars) {
        fields.push(with_presence(F::new(name, number, kind), proto2));
    }
    if !proto2 {
        fields.push(F::new("optional_bool", 16, Bool).optional());
        fields.push(F::new("optional_string", 17, String).optional());
    }

    let well_known: [(&'static str, u32, Kind); 19] = [
        ("single_any", 100, Message(ANY)),
        ("single_duration", 101, Message(DURATION)),
        ("single_timestamp", 102, Message(TIMESTAMP)),
        ("single_struct", 103, Message(STRUCT)),
        ("single_value", 104, Message(STRUCT_VALUE)),
        ("single_int64_wrapper", 105, Message("google.protobuf.Int64Value")),
        ("single_int32_wrapper", 106, Message("google.protobuf.Int32Value")),
        ("single_double_wrapper", 107, Message("google.protobuf.DoubleValue")),
        ("single_float_wrapper", 108, Message("google.protobuf.FloatValue")),
        ("single_uint64_wrapper", 109, Message("google.protobuf.UInt64Value")),
        ("single_uint32_wrapper", 110, Message("google.protobuf.UInt32Value")),
        ("single_string_wrapper", 111, Message("google.protobuf.StringValue")),
        ("single_bool_wrapper", 112, Message("google.protobuf.BoolValue")),
        ("single_bytes_wrapper", 113, Message("google.protobuf.BytesValue")),
        ("list_value", 114, Message(STRUCT_LIST_VALUE)),
        ("null_value", 115, Enum(NULL_VALUE)),
        ("optional_null_value", 116, Enum(NULL_VALUE)),
        ("field_mask", 117, Message(FIELD_MASK)),
        ("empty", 118, Message(EMPTY)),
    ];
    for (name, number, kind) in well_known {
        let field = F::new(name, number, kind);
        fields.push(if name == "optional_null_value" {
            field.optional()
        } else {
            with_presence(field, proto2)
        });
    }

    fields.push(F::new("single_nested_message", 21, Message(names.nested_message)).in_oneof("nested_type"));
    fields.push(F::new("single_nested_enum", 22, Enum(names.nested_enum)).in_oneof("nested_type"));
    fields.push(F::new("standalone_message", 23, Message(names.nested_message)));
    fields.push(with_presence(
        F::new("standalone_enum", 24, Enum(names.nested_enum)),
        proto2,
    ));

    for (number, (_, name, kind)) in (31..).zip(scalars) {
        fields.push(F::new(name, number, kind).repeated());
    }
    let repeated_messages: [(&'static str, u32, Kind); 5] = [
        ("repeated_nested_message", 51, Message(names.nested_message)),
        ("repeated_nested_enum", 52, Enum(names.nested_enum)),
        ("repeated_string_piece", 53, String),
        ("repeated_cord", 54, String),
        ("repeated_lazy_message", 55, Message(names.nested_message)),
    ];
    for (name, number, kind) in repeated_messages {
        fields.push(F::new(name, number, kind).repeated());
    }
    let repeated_well_known: [(&'static str, u32, Kind); 16] = [
        ("repeated_any", 120, Message(ANY)),
        ("repeated_duration", 121, Message(DURATION)),
        ("repeated_timestamp", 122, Message(TIMESTAMP)),
        ("repeated_struct", 123, Message(STRUCT)),
        ("repeated_value", 124, Message(STRUCT_VALUE)),
        ("repeated_int64_wrapper", 125, Message("google.protobuf.Int64Value")),
        ("repeated_int32_wrapper", 126, Message("google.protobuf.Int32Value")),
        ("repeated_double_wrapper", 127, Message("google.protobuf.DoubleValue")),
        ("repeated_float_wrapper", 128, Message("google.protobuf.FloatValue")),
        ("repeated_uint64_wrapper", 129, Message("google.protobuf.UInt64Value")),
        ("repeated_uint32_wrapper", 130, Message("google.protobuf.UInt32Value")),
        ("repeated_string_wrapper", 131, Message("google.protobuf.StringValue")),
        ("repeated_bool_wrapper", 132, Message("google.protobuf.BoolValue")),
        ("repeated_bytes_wrapper", 133, Message("google.protobuf.BytesValue")),
        ("repeated_list_value", 134, Message(STRUCT_LIST_VALUE)),
        ("repeated_null_value", 135, Enum(NULL_VALUE)),
    ];
    for (name, number, kind) in repeated_well_known {
        fields.push(F::new(name, number, kind).repeated());
    }

    let maps: [(&'static str, u32, Kind, Kind); 13] = [
        ("map_string_string", 61, String, String),
        ("map_int64_nested_type", 62, Int64, Message(names.nested_test_all_types)),
        ("map_bool_bool", 63, Bool, Bool),
        ("map_bool_string", 64, Bool, String),
        ("map_bool_bytes", 65, Bool, Bytes),
        ("map_bool_int32", 66, Bool, Int32),
        ("map_bool_int64", 67, Bool, Int64),
        ("map_bool_uint32", 68, Bool, Uint32),
        ("map_bool_uint64", 69, Bool, Uint64),
        ("map_bool_float", 70, Bool, Float),
        ("map_bool_double", 71, Bool, Double),
        ("map_bool_enum", 72, Bool, Enum(names.nested_enum)),
        ("map_bool_message", 73, Bool, Message(names.nested_message)),
    ];
    for ((name, number, key, value), entry) in maps.into_iter().zip(names.map_entries) {
        fields.push(F::new(name, number, Message(entry)).repeated());
        registry.add_message(M::map_entry(entry, key, value));
    }

    fields.push(F::new("oneof_type", 400, Message(names.nested_test_all_types)).in_oneof("kind"));
    fields.push(F::new("oneof_msg", 401, Message(names.nested_message)).in_oneof("kind"));
    fields.push(F::new("oneof_bool", 402, Bool).in_oneof("kind"));

    // fields named after CEL reserved words
    let reserved: [&'static str; 17] = [
        "as", "break", "const", "continue", "else", "for", "function", "if", "import", "let",
        "loop", "package", "namespace", "return", "var", "void", "while",
    ];
    for (number, name) in (500..).zip(reserved) {
        fields.push(with_presence(F::new(name, number, Bool), proto2));
    }

    registry.add_message(M::new(names.message, fields));
}

fn with_presence(field: F, explicit: bool) -> F {
    if explicit {
        field.optional()
    } else {
        field
    }
}
