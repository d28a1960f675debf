// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use super::parser::{FieldName, Position, Scalar, TextField, TextValue};
use super::DecodeError;
use crate::proto::descriptor::{FieldDescriptor, Kind, MessageDescriptor, WellKnown};
use crate::proto::dynamic::{AnyPayload, DynamicMessage, MapKey, Value};
use crate::proto::schema::registry;

type Result<T> = std::result::Result<T, DecodeError>;

///
/// Resolves a parsed field list against `descriptor`. Singular fields may appear once,
/// at most one member of a oneof may be set, and every name must exist in the schema.
///
pub(super) fn bind_message(
    descriptor: &'static MessageDescriptor,
    fields: &[TextField],
) -> Result<DynamicMessage> {
    let mut message = DynamicMessage::new(descriptor);
    let mut seen: HashMap<u32, Position> = HashMap::new();
    let mut oneofs: HashMap<&'static str, &'static str> = HashMap::new();

    for field in fields {
        match &field.name {
            FieldName::Expanded(type_url) => bind_any_payload(&mut message, type_url, field)?,
            FieldName::Ident(name) => {
                let field_descriptor = descriptor.field_by_name(name).ok_or_else(|| {
                    DecodeError::at(
                        field.position,
                        format!(
                            "unknown field `{}` in message {}",
                            name,
                            descriptor.full_name()
                        ),
                    )
                })?;

                if field_descriptor.is_repeated() {
                    bind_repeated(&mut message, field_descriptor, &field.value)?;
                    continue;
                }

                if let Some(previous) = seen.insert(field_descriptor.number(), field.position) {
                    return Err(DecodeError::at(
                        field.position,
                        format!(
                            "non-repeated field `{}` is repeated, first set at {}",
                            name, previous
                        ),
                    ));
                }

                if let Some(oneof) = field_descriptor.oneof() {
                    if let Some(other) = oneofs.insert(oneof, field_descriptor.name()) {
                        return Err(DecodeError::at(
                            field.position,
                            format!(
                                "field `{}` is a member of oneof `{}` which is already set by `{}`",
                                name, oneof, other
                            ),
                        ));
                    }
                }

                let value = bind_value(field_descriptor, &field.value)?;
                message.set(field_descriptor, value);
            }
        }
    }

    if descriptor.well_known_type() == Some(WellKnown::Any) {
        check_any(&mut message, fields)?;
    }

    Ok(message)
}

fn bind_repeated(
    message: &mut DynamicMessage,
    field: &FieldDescriptor,
    value: &TextValue,
) -> Result<()> {
    let elements = match value {
        TextValue::List(elements, _) => elements.iter().collect::<Vec<_>>(),
        single => vec![single],
    };

    match field.map_entry(registry()) {
        Some(entry) => {
            for element in elements {
                let (key, value) = bind_map_entry(entry, element)?;
                message.insert_entry(field, key, value);
            }
        }
        None => {
            for element in elements {
                let value = bind_value(field, element)?;
                message.push(field, value);
            }
        }
    }
    Ok(())
}

fn bind_map_entry(
    entry: &'static MessageDescriptor,
    value: &TextValue,
) -> Result<(MapKey, Value)> {
    let (fields, position) = match value {
        TextValue::Message(fields, position) => (fields, *position),
        TextValue::Scalar(_, position) | TextValue::List(_, position) => {
            return Err(DecodeError::at(
                *position,
                format!("expected a {} entry message", entry.full_name()),
            ))
        }
    };

    let bound = bind_message(entry, fields)?;
    let key_field = &entry.fields()[0];
    let value_field = &entry.fields()[1];

    let key = match bound.singular(key_field.name()) {
        Some(key) => key.clone(),
        None => default_value(key_field, position)?,
    };
    let key = MapKey::from_value(&key).ok_or_else(|| {
        DecodeError::at(
            position,
            format!("{} is not a valid map key type", key_field.kind().type_name()),
        )
    })?;

    let value = match bound.singular(value_field.name()) {
        Some(value) => value.clone(),
        None => default_value(value_field, position)?,
    };
    Ok((key, value))
}

fn default_value(field: &FieldDescriptor, position: Position) -> Result<Value> {
    match field.kind() {
        Kind::Message(name) => Ok(Value::Message(Box::new(DynamicMessage::new(
            message_descriptor(name, position)?,
        )))),
        kind => Value::default_for(kind).ok_or_else(|| {
            DecodeError::at(position, format!("no default for {}", kind.type_name()))
        }),
    }
}

fn message_descriptor(name: &str, position: Position) -> Result<&'static MessageDescriptor> {
    registry()
        .message(name)
        .ok_or_else(|| DecodeError::at(position, format!("unknown message type {name}")))
}

fn bind_value(field: &FieldDescriptor, value: &TextValue) -> Result<Value> {
    match (field.kind(), value) {
        (Kind::Message(name), TextValue::Message(fields, position)) => {
            let descriptor = message_descriptor(name, *position)?;
            Ok(Value::Message(Box::new(bind_message(descriptor, fields)?)))
        }
        (Kind::Message(name), TextValue::Scalar(_, position)) => Err(DecodeError::at(
            *position,
            format!(
                "field `{}` expects a {} message, found a scalar",
                field.name(),
                name
            ),
        )),
        (_, TextValue::Message(_, position)) => Err(DecodeError::at(
            *position,
            format!(
                "field `{}` of type {} can not hold a message",
                field.name(),
                field.kind().type_name()
            ),
        )),
        (_, TextValue::List(_, position)) => Err(DecodeError::at(
            *position,
            format!("field `{}` is not repeated, a list is not allowed", field.name()),
        )),
        (kind, TextValue::Scalar(scalar, position)) => {
            bind_scalar(field, kind, scalar).map_err(|message| DecodeError::at(*position, message))
        }
    }
}

fn bind_scalar(
    field: &FieldDescriptor,
    kind: Kind,
    scalar: &Scalar,
) -> std::result::Result<Value, String> {
    let mismatch = || {
        format!(
            "invalid value for {} field `{}`: {}",
            kind.type_name(),
            field.name(),
            describe(scalar)
        )
    };

    match kind {
        Kind::Bool => match scalar {
            Scalar::Ident(ident) => match ident.as_str() {
                "true" | "True" | "t" => Ok(Value::Bool(true)),
                "false" | "False" | "f" => Ok(Value::Bool(false)),
                _ => Err(mismatch()),
            },
            Scalar::Int {
                negative: false,
                digits,
                radix,
            } => match u64::from_str_radix(digits, *radix) {
                Ok(0) => Ok(Value::Bool(false)),
                Ok(1) => Ok(Value::Bool(true)),
                _ => Err(mismatch()),
            },
            _ => Err(mismatch()),
        },
        Kind::Int32 => signed(scalar)
            .and_then(|n| i32::try_from(n).ok())
            .map(Value::I32)
            .ok_or_else(mismatch),
        Kind::Int64 => signed(scalar).map(Value::I64).ok_or_else(mismatch),
        Kind::Uint32 => unsigned(scalar)
            .and_then(|n| u32::try_from(n).ok())
            .map(Value::U32)
            .ok_or_else(mismatch),
        Kind::Uint64 => unsigned(scalar).map(Value::U64).ok_or_else(mismatch),
        // finite literals that overflow f32 are an error, not infinity
        Kind::Float => floating(scalar)
            .filter(|f| !f.is_finite() || (*f as f32).is_finite())
            .map(|f| Value::F32(f as f32))
            .ok_or_else(mismatch),
        Kind::Double => floating(scalar).map(Value::F64).ok_or_else(mismatch),
        Kind::String => match scalar {
            Scalar::Str(bytes) => String::from_utf8(bytes.clone())
                .map(Value::String)
                .map_err(|_| {
                    format!(
                        "field `{}` contains invalid UTF-8, use a bytes field for binary data",
                        field.name()
                    )
                }),
            _ => Err(mismatch()),
        },
        Kind::Bytes => match scalar {
            Scalar::Str(bytes) => Ok(Value::Bytes(bytes.clone())),
            _ => Err(mismatch()),
        },
        Kind::Enum(name) => {
            let enumeration = registry()
                .enumeration(name)
                .ok_or_else(|| format!("unknown enum type {name}"))?;
            match scalar {
                Scalar::Ident(ident) => enumeration
                    .number_of(ident)
                    .map(Value::EnumNumber)
                    .ok_or_else(|| format!("unknown value `{ident}` for enum {name}")),
                Scalar::Int { .. } => signed(scalar)
                    .and_then(|n| i32::try_from(n).ok())
                    .map(Value::EnumNumber)
                    .ok_or_else(mismatch),
                _ => Err(mismatch()),
            }
        }
        Kind::Message(_) => Err(mismatch()),
    }
}

fn describe(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Str(bytes) => format!("string \"{}\"", String::from_utf8_lossy(bytes)),
        Scalar::Ident(ident) => format!("identifier `{ident}`"),
        Scalar::Int {
            negative, digits, ..
        } => format!("integer {}{}", if *negative { "-" } else { "" }, digits),
        Scalar::Float(f) => format!("float {f}"),
    }
}

fn signed(scalar: &Scalar) -> Option<i64> {
    match scalar {
        Scalar::Int {
            negative,
            digits,
            radix,
        } => {
            let magnitude = u64::from_str_radix(digits, *radix).ok()?;
            if *negative {
                0i64.checked_sub_unsigned(magnitude)
            } else {
                i64::try_from(magnitude).ok()
            }
        }
        _ => None,
    }
}

fn unsigned(scalar: &Scalar) -> Option<u64> {
    match scalar {
        Scalar::Int {
            negative: false,
            digits,
            radix,
        } => u64::from_str_radix(digits, *radix).ok(),
        _ => None,
    }
}

fn floating(scalar: &Scalar) -> Option<f64> {
    match scalar {
        Scalar::Float(f) => Some(*f),
        Scalar::Int {
            negative,
            digits,
            radix,
        } => {
            let magnitude = if *radix == 10 {
                digits.parse::<f64>().ok()?
            } else {
                u64::from_str_radix(digits, *radix).ok()? as f64
            };
            Some(if *negative { -magnitude } else { magnitude })
        }
        Scalar::Ident(ident) => match ident.to_ascii_lowercase().as_str() {
            "inf" | "infinity" => Some(f64::INFINITY),
            "nan" => Some(f64::NAN),
            _ => None,
        },
        Scalar::Str(_) => None,
    }
}

fn bind_any_payload(
    message: &mut DynamicMessage,
    type_url: &str,
    field: &TextField,
) -> Result<()> {
    let descriptor = message.descriptor();
    if descriptor.well_known_type() != Some(WellKnown::Any) {
        return Err(DecodeError::at(
            field.position,
            format!(
                "expanded name [{}] is only allowed inside {}, not in {}",
                type_url,
                crate::proto::schema::ANY,
                descriptor.full_name()
            ),
        ));
    }
    if message.any_payload().is_some() {
        return Err(DecodeError::at(
            field.position,
            format!("Any payload is set more than once, found another [{type_url}]"),
        ));
    }
    if !type_url.contains('/') {
        return Err(DecodeError::at(
            field.position,
            format!("invalid Any type URL `{type_url}`, expected prefix/full.type.Name"),
        ));
    }
    let payload_descriptor = registry().resolve_type_url(type_url).ok_or_else(|| {
        DecodeError::at(
            field.position,
            format!("unable to resolve Any type URL `{type_url}`"),
        )
    })?;
    let payload = match &field.value {
        TextValue::Message(fields, _) => bind_message(payload_descriptor, fields)?,
        TextValue::Scalar(_, position) | TextValue::List(_, position) => {
            return Err(DecodeError::at(
                *position,
                format!("expected a {} message for [{}]", payload_descriptor.full_name(), type_url),
            ))
        }
    };
    message.set_any(AnyPayload {
        type_url: type_url.to_string(),
        message: payload,
    });
    Ok(())
}

//
// An Any is either written expanded, `[url] { ... }`, or with its plain fields. Plain
// `value` bytes would need a binary protobuf decoder, so only a bare type_url is accepted
// and it is turned into an empty payload of that type.
//
fn check_any(message: &mut DynamicMessage, fields: &[TextField]) -> Result<()> {
    let position = fields.first().map(|f| f.position).unwrap_or(Position {
        line: 1,
        column: 1,
    });
    let type_url = message.string("type_url").to_string();
    let has_value = matches!(
        message.singular("value"),
        Some(Value::Bytes(bytes)) if !bytes.is_empty()
    );

    if message.any_payload().is_some() {
        if !type_url.is_empty() || has_value {
            return Err(DecodeError::at(
                position,
                "Any can not mix an expanded [type_url] payload with type_url or value fields",
            ));
        }
        return Ok(());
    }

    if has_value {
        return Err(DecodeError::at(
            position,
            "Any with serialized `value` bytes is not supported, use the expanded [type_url] { ... } form",
        ));
    }

    if !type_url.is_empty() {
        let descriptor = registry().resolve_type_url(&type_url).ok_or_else(|| {
            DecodeError::at(position, format!("unable to resolve Any type URL `{type_url}`"))
        })?;
        let payload = DynamicMessage::new(descriptor);
        *message = DynamicMessage::new(message.descriptor());
        message.set_any(AnyPayload {
            type_url,
            message: payload,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "binder_tests.rs"]
mod binder_tests;
