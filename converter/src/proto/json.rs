// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Canonical protobuf JSON mapping: lowerCamelCase field names, fields at their zero value
//! left out, 64 bit integers quoted, bytes as padded base64 and the special forms of the
//! well-known types.
//!

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat};
use serde_json::{Map, Number, Value as JsonValue};
use thiserror::Error;

use super::descriptor::{FieldDescriptor, Kind, WellKnown};
use super::dynamic::{DynamicMessage, FieldValue, Value};
use super::schema::{registry, NULL_VALUE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message_type}: {message}")]
pub struct EncodeError {
    pub message_type: String,
    pub message: String,
}

type Result<T> = std::result::Result<T, EncodeError>;

pub fn to_json(message: &DynamicMessage) -> Result<JsonValue> {
    match message.descriptor().well_known_type() {
        Some(well_known) => well_known_to_json(well_known, message),
        None => Ok(JsonValue::Object(fields_to_json(message)?)),
    }
}

/// Multi-line JSON with two space indentation.
pub fn to_json_pretty(message: &DynamicMessage) -> std::result::Result<Vec<u8>, JsonEncodeError> {
    let json = to_json(message)?;
    Ok(serde_json::to_vec_pretty(&json)?)
}

#[derive(Debug, Error)]
pub enum JsonEncodeError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

fn fields_to_json(message: &DynamicMessage) -> Result<Map<String, JsonValue>> {
    let mut object = Map::new();
    for field in message.descriptor().fields() {
        if !message.has_field(field) {
            continue;
        }
        let json = match message.get(field) {
            Some(FieldValue::Singular(value)) => value_to_json(field.kind(), value)?,
            Some(FieldValue::List(values)) => JsonValue::Array(
                values
                    .iter()
                    .map(|v| value_to_json(field.kind(), v))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Some(FieldValue::Map(entries)) => {
                let value_kind = map_value_kind(field);
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key.to_string(), value_to_json(value_kind, value)?);
                }
                JsonValue::Object(map)
            }
            None => continue,
        };
        object.insert(field.json_name().to_string(), json);
    }
    Ok(object)
}

fn map_value_kind(field: &FieldDescriptor) -> Kind {
    field
        .map_entry(registry())
        .and_then(|entry| entry.field_by_number(2))
        .map(|value| value.kind())
        .unwrap_or(field.kind())
}

fn value_to_json(kind: Kind, value: &Value) -> Result<JsonValue> {
    let json = match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I32(n) => JsonValue::from(*n),
        Value::U32(n) => JsonValue::from(*n),
        Value::I64(n) => JsonValue::String(n.to_string()),
        Value::U64(n) => JsonValue::String(n.to_string()),
        Value::F32(f) => float_to_json(f32_as_f64(*f)),
        Value::F64(f) => float_to_json(*f),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Bytes(bytes) => JsonValue::String(STANDARD.encode(bytes)),
        Value::EnumNumber(number) => enum_to_json(kind, *number),
        Value::Message(message) => to_json(message)?,
    };
    Ok(json)
}

//
// widening 0.1f32 directly would print 0.10000000149011612
//
fn f32_as_f64(f: f32) -> f64 {
    f.to_string().parse::<f64>().unwrap_or(f64::from(f))
}

// 2^63, every integral double below it converts to i64 exactly
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

//
// integral values print without a fraction (`1`, not `1.0`), negative zero keeps its sign
//
fn float_to_json(f: f64) -> JsonValue {
    if f.is_nan() {
        JsonValue::String("NaN".to_string())
    } else if f.is_infinite() {
        let text = if f > 0.0 { "Infinity" } else { "-Infinity" };
        JsonValue::String(text.to_string())
    } else if f.fract() == 0.0 && f.abs() < I64_BOUND && f.to_bits() != (-0.0f64).to_bits() {
        JsonValue::from(f as i64)
    } else {
        Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
    }
}

fn enum_to_json(kind: Kind, number: i32) -> JsonValue {
    match kind {
        Kind::Enum(NULL_VALUE) => JsonValue::Null,
        Kind::Enum(name) => match registry()
            .enumeration(name)
            .and_then(|enumeration| enumeration.name_of(number))
        {
            Some(value_name) => JsonValue::String(value_name.to_string()),
            None => JsonValue::from(number),
        },
        _ => JsonValue::from(number),
    }
}

fn well_known_to_json(well_known: WellKnown, message: &DynamicMessage) -> Result<JsonValue> {
    match well_known {
        WellKnown::Any => any_to_json(message),
        WellKnown::Empty => Ok(JsonValue::Object(Map::new())),
        WellKnown::Wrapper => {
            let field = &message.descriptor().fields()[0];
            let value = match message.singular(field.name()) {
                Some(value) => value.clone(),
                None => Value::default_for(field.kind()).ok_or_else(|| EncodeError {
                    message_type: message.descriptor().full_name().to_string(),
                    message: "wrapper without a scalar value field".to_string(),
                })?,
            };
            value_to_json(field.kind(), &value)
        }
        WellKnown::Duration => {
            let (seconds, nanos) = seconds_and_nanos(message);
            duration_to_json(seconds, nanos).map_err(|message| EncodeError {
                message_type: "google.protobuf.Duration".to_string(),
                message,
            })
        }
        WellKnown::Timestamp => {
            let (seconds, nanos) = seconds_and_nanos(message);
            timestamp_to_json(seconds, nanos).map_err(|message| EncodeError {
                message_type: "google.protobuf.Timestamp".to_string(),
                message,
            })
        }
        WellKnown::Struct => Ok(fields_to_json(message)?
            .remove("fields")
            .unwrap_or_else(|| JsonValue::Object(Map::new()))),
        WellKnown::ListValue => Ok(fields_to_json(message)?
            .remove("values")
            .unwrap_or_else(|| JsonValue::Array(vec![]))),
        WellKnown::Value => struct_value_to_json(message),
        WellKnown::FieldMask => field_mask_to_json(message.list("paths")).map_err(|message| {
            EncodeError {
                message_type: "google.protobuf.FieldMask".to_string(),
                message,
            }
        }),
    }
}

//
// google.protobuf.Value is whichever JSON value its `kind` member holds
//
fn struct_value_to_json(message: &DynamicMessage) -> Result<JsonValue> {
    let error = |text: String| EncodeError {
        message_type: "google.protobuf.Value".to_string(),
        message: text,
    };
    let member = message
        .which_oneof("kind")
        .and_then(|name| message.descriptor().field_by_name(name))
        .ok_or_else(|| error("no member of kind is set".to_string()))?;
    match message.singular(member.name()) {
        Some(Value::F64(number)) if !number.is_finite() => {
            Err(error(format!("number_value {number} has no JSON form")))
        }
        Some(value) => value_to_json(member.kind(), value),
        None => Err(error(format!("{} is not a singular value", member.name()))),
    }
}

//
// paths are joined with commas and every segment turned into lowerCamelCase; a path that
// would not come back the same way (upper case letters, `_` not followed by a lower case
// letter) has no JSON form
//
fn field_mask_to_json(paths: &[Value]) -> std::result::Result<JsonValue, String> {
    let mut converted = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_str().unwrap_or_default();
        let mut camel = String::with_capacity(path.len());
        let mut chars = path.chars();
        while let Some(c) = chars.next() {
            match c {
                '_' => match chars.next() {
                    Some(next) if next.is_ascii_lowercase() => {
                        camel.push(next.to_ascii_uppercase())
                    }
                    _ => return Err(format!("field mask path `{path}` is not reversible")),
                },
                c if c.is_ascii_uppercase() => {
                    return Err(format!("field mask path `{path}` is not reversible"))
                }
                c => camel.push(c),
            }
        }
        converted.push(camel);
    }
    Ok(JsonValue::String(converted.join(",")))
}

fn any_to_json(message: &DynamicMessage) -> Result<JsonValue> {
    let payload = match message.any_payload() {
        Some(payload) => payload,
        None => return Ok(JsonValue::Object(Map::new())),
    };

    let mut object = Map::new();
    object.insert(
        "@type".to_string(),
        JsonValue::String(payload.type_url.clone()),
    );
    if payload.message.descriptor().well_known_type().is_some() {
        object.insert("value".to_string(), to_json(&payload.message)?);
    } else {
        object.extend(fields_to_json(&payload.message)?);
    }
    Ok(JsonValue::Object(object))
}

fn seconds_and_nanos(message: &DynamicMessage) -> (i64, i32) {
    let seconds = match message.singular("seconds") {
        Some(Value::I64(seconds)) => *seconds,
        _ => 0,
    };
    let nanos = match message.singular("nanos") {
        Some(Value::I32(nanos)) => *nanos,
        _ => 0,
    };
    (seconds, nanos)
}

const MAX_DURATION_SECONDS: i64 = 315_576_000_000;

fn duration_to_json(seconds: i64, nanos: i32) -> std::result::Result<JsonValue, String> {
    if !(-MAX_DURATION_SECONDS..=MAX_DURATION_SECONDS).contains(&seconds)
        || !(-999_999_999..=999_999_999).contains(&nanos)
        || (seconds > 0 && nanos < 0)
        || (seconds < 0 && nanos > 0)
    {
        return Err(format!("seconds {seconds} and nanos {nanos} are out of range"));
    }

    let negative = seconds < 0 || nanos < 0;
    let mut text = format!(
        "{}{}",
        if negative { "-" } else { "" },
        seconds.unsigned_abs()
    );
    text.push_str(&fraction(nanos.unsigned_abs()));
    text.push('s');
    Ok(JsonValue::String(text))
}

//
// 0, 3, 6 or 9 fractional digits
//
fn fraction(nanos: u32) -> String {
    if nanos == 0 {
        String::new()
    } else if nanos % 1_000_000 == 0 {
        format!(".{:03}", nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        format!(".{:06}", nanos / 1_000)
    } else {
        format!(".{:09}", nanos)
    }
}

fn timestamp_to_json(seconds: i64, nanos: i32) -> std::result::Result<JsonValue, String> {
    let nanos = u32::try_from(nanos)
        .ok()
        .filter(|n| *n < 1_000_000_000)
        .ok_or_else(|| format!("nanos {nanos} are out of range"))?;
    let time = DateTime::from_timestamp(seconds, nanos)
        .ok_or_else(|| format!("seconds {seconds} are out of range"))?;
    Ok(JsonValue::String(
        time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    ))
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod json_tests;
