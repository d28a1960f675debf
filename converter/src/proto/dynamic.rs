// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::descriptor::{FieldDescriptor, Kind, MessageDescriptor};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    EnumNumber(i32),
    Message(Box<DynamicMessage>),
}

impl Value {
    ///
    /// Zero value for a scalar kind. Message kinds have no zero value here, an unset
    /// message field is simply absent.
    ///
    pub fn default_for(kind: Kind) -> Option<Value> {
        let value = match kind {
            Kind::Bool => Value::Bool(false),
            Kind::Int32 => Value::I32(0),
            Kind::Int64 => Value::I64(0),
            Kind::Uint32 => Value::U32(0),
            Kind::Uint64 => Value::U64(0),
            Kind::Float => Value::F32(0.0),
            Kind::Double => Value::F64(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Bytes => Value::Bytes(vec![]),
            Kind::Enum(_) => Value::EnumNumber(0),
            Kind::Message(_) => return None,
        };
        Some(value)
    }

    /// Negative zero counts as populated, matching the bitwise presence rule of proto3.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Bool(b) => !*b,
            Value::I32(n) => *n == 0,
            Value::I64(n) => *n == 0,
            Value::U32(n) => *n == 0,
            Value::U64(n) => *n == 0,
            Value::F32(f) => f.to_bits() == 0,
            Value::F64(f) => f.to_bits() == 0,
            Value::String(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::EnumNumber(n) => *n == 0,
            Value::Message(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&DynamicMessage> {
        match self {
            Value::Message(m) => Some(m),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Bool(bool),
    I64(i64),
    U64(u64),
    String(String),
}

impl MapKey {
    pub fn from_value(value: &Value) -> Option<MapKey> {
        let key = match value {
            Value::Bool(b) => MapKey::Bool(*b),
            Value::I32(n) => MapKey::I64(i64::from(*n)),
            Value::I64(n) => MapKey::I64(*n),
            Value::U32(n) => MapKey::U64(u64::from(*n)),
            Value::U64(n) => MapKey::U64(*n),
            Value::String(s) => MapKey::String(s.clone()),
            _ => return None,
        };
        Some(key)
    }
}

impl std::fmt::Display for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapKey::Bool(b) => write!(f, "{b}"),
            MapKey::I64(n) => write!(f, "{n}"),
            MapKey::U64(n) => write!(f, "{n}"),
            MapKey::String(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Singular(Value),
    List(Vec<Value>),
    Map(BTreeMap<MapKey, Value>),
}

/// Expanded payload of a `google.protobuf.Any`, written as `[type_url] { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyPayload {
    pub type_url: String,
    pub message: DynamicMessage,
}

///
/// A message whose shape is known only through its descriptor. Fields are keyed by
/// field number; consumers that need declaration order iterate the descriptor.
///
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessage {
    descriptor: &'static MessageDescriptor,
    fields: IndexMap<u32, FieldValue>,
    any: Option<Box<AnyPayload>>,
}

impl DynamicMessage {
    pub fn new(descriptor: &'static MessageDescriptor) -> Self {
        DynamicMessage {
            descriptor,
            fields: IndexMap::new(),
            any: None,
        }
    }

    pub fn descriptor(&self) -> &'static MessageDescriptor {
        self.descriptor
    }

    pub fn get(&self, field: &FieldDescriptor) -> Option<&FieldValue> {
        self.fields.get(&field.number())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&FieldValue> {
        self.descriptor
            .field_by_name(name)
            .and_then(|field| self.get(field))
    }

    pub fn singular(&self, name: &str) -> Option<&Value> {
        match self.get_by_name(name)? {
            FieldValue::Singular(value) => Some(value),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> &[Value] {
        match self.get_by_name(name) {
            Some(FieldValue::List(values)) => values,
            _ => &[],
        }
    }

    pub fn string(&self, name: &str) -> &str {
        self.singular(name).and_then(Value::as_str).unwrap_or("")
    }

    ///
    /// Presence as the JSON mapping sees it: oneof members, message fields and fields with
    /// explicit presence are present once set, plain scalars only when they differ from
    /// their zero value, repeated and map fields only when non-empty.
    ///
    pub fn has_field(&self, field: &FieldDescriptor) -> bool {
        match self.get(field) {
            None => false,
            Some(FieldValue::List(values)) => !values.is_empty(),
            Some(FieldValue::Map(entries)) => !entries.is_empty(),
            Some(FieldValue::Singular(value)) => {
                field.has_presence()
                    || field.oneof().is_some()
                    || field.kind().is_message()
                    || !value.is_default()
            }
        }
    }

    /// Name of the member currently set for `oneof`, if any.
    pub fn which_oneof(&self, oneof: &str) -> Option<&'static str> {
        self.descriptor
            .fields()
            .iter()
            .filter(|f| f.oneof() == Some(oneof))
            .find(|f| self.fields.contains_key(&f.number()))
            .map(|f| f.name())
    }

    pub fn any_payload(&self) -> Option<&AnyPayload> {
        self.any.as_deref()
    }

    pub(crate) fn set(&mut self, field: &FieldDescriptor, value: Value) {
        self.fields.insert(field.number(), FieldValue::Singular(value));
    }

    pub(crate) fn push(&mut self, field: &FieldDescriptor, value: Value) {
        match self
            .fields
            .entry(field.number())
            .or_insert_with(|| FieldValue::List(vec![]))
        {
            FieldValue::List(values) => values.push(value),
            other => *other = FieldValue::List(vec![value]),
        }
    }

    pub(crate) fn insert_entry(&mut self, field: &FieldDescriptor, key: MapKey, value: Value) {
        match self
            .fields
            .entry(field.number())
            .or_insert_with(|| FieldValue::Map(BTreeMap::new()))
        {
            FieldValue::Map(entries) => {
                entries.insert(key, value);
            }
            other => *other = FieldValue::Map(BTreeMap::from([(key, value)])),
        }
    }

    pub(crate) fn set_any(&mut self, payload: AnyPayload) {
        self.any = Some(Box::new(payload));
    }
}
