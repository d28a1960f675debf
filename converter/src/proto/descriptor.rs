// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use heck::MixedCase;
use indexmap::IndexMap;

///
/// Scalar and composite kinds a field can carry. Message and enum kinds refer to their
/// type by fully qualified name and are resolved through the [`Registry`].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Float,
    Double,
    String,
    Bytes,
    Enum(&'static str),
    Message(&'static str),
}

impl Kind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Enum(name) | Kind::Message(name) => name,
        }
    }

    pub fn is_message(&self) -> bool {
        matches!(self, Kind::Message(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Singular,
    Repeated,
}

/// Message types whose JSON form is not the plain field-by-field object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnown {
    Any,
    Empty,
    Duration,
    Timestamp,
    Wrapper,
    Struct,
    Value,
    ListValue,
    FieldMask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: &'static str,
    json_name: String,
    number: u32,
    kind: Kind,
    cardinality: Cardinality,
    oneof: Option<&'static str>,
    presence: bool,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, number: u32, kind: Kind) -> Self {
        FieldDescriptor {
            name,
            json_name: json_name(name),
            number,
            kind,
            cardinality: Cardinality::Singular,
            oneof: None,
            presence: false,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    pub fn in_oneof(mut self, oneof: &'static str) -> Self {
        self.oneof = Some(oneof);
        self
    }

    /// Explicit presence: proto2 singular fields and proto3 `optional` fields.
    pub fn optional(mut self) -> Self {
        self.presence = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn json_name(&self) -> &str {
        &self.json_name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    pub fn oneof(&self) -> Option<&'static str> {
        self.oneof
    }

    pub fn has_presence(&self) -> bool {
        self.presence
    }

    /// A map field is a repeated field of a synthesized `*Entry` message.
    pub fn map_entry<'r>(&self, registry: &'r Registry) -> Option<&'r MessageDescriptor> {
        match (self.cardinality, self.kind) {
            (Cardinality::Repeated, Kind::Message(name)) => {
                registry.message(name).filter(|m| m.is_map_entry())
            }
            _ => None,
        }
    }
}

//
// protoc derives the JSON name by dropping underscores and upper casing the letter that
// follows, which is what lower camel case does for the snake_case names we declare
//
fn json_name(name: &str) -> String {
    name.to_mixed_case()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageDescriptor {
    full_name: &'static str,
    fields: Vec<FieldDescriptor>,
    map_entry: bool,
    well_known: Option<WellKnown>,
}

impl MessageDescriptor {
    pub fn new(full_name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        MessageDescriptor {
            full_name,
            fields,
            map_entry: false,
            well_known: None,
        }
    }

    pub fn map_entry(full_name: &'static str, key: Kind, value: Kind) -> Self {
        MessageDescriptor {
            full_name,
            fields: vec![
                FieldDescriptor::new("key", 1, key),
                FieldDescriptor::new("value", 2, value),
            ],
            map_entry: true,
            well_known: None,
        }
    }

    pub fn well_known(mut self, well_known: WellKnown) -> Self {
        self.well_known = Some(well_known);
        self
    }

    pub fn full_name(&self) -> &'static str {
        self.full_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    pub fn is_map_entry(&self) -> bool {
        self.map_entry
    }

    pub fn well_known_type(&self) -> Option<WellKnown> {
        self.well_known
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    full_name: &'static str,
    values: Vec<(&'static str, i32)>,
}

impl EnumDescriptor {
    pub fn new(full_name: &'static str, values: Vec<(&'static str, i32)>) -> Self {
        EnumDescriptor { full_name, values }
    }

    pub fn full_name(&self) -> &'static str {
        self.full_name
    }

    pub fn number_of(&self, name: &str) -> Option<i32> {
        self.values
            .iter()
            .find(|(value_name, _)| *value_name == name)
            .map(|(_, number)| *number)
    }

    pub fn name_of(&self, number: i32) -> Option<&'static str> {
        self.values
            .iter()
            .find(|(_, value_number)| *value_number == number)
            .map(|(name, _)| *name)
    }
}

///
/// Lookup table of every message and enum type the converter understands, keyed by fully
/// qualified protobuf name.
///
#[derive(Debug, Default)]
pub struct Registry {
    messages: IndexMap<&'static str, MessageDescriptor>,
    enums: IndexMap<&'static str, EnumDescriptor>,
}

impl Registry {
    pub fn add_message(&mut self, message: MessageDescriptor) {
        self.messages.insert(message.full_name, message);
    }

    pub fn add_enum(&mut self, enumeration: EnumDescriptor) {
        self.enums.insert(enumeration.full_name, enumeration);
    }

    pub fn message(&self, full_name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(full_name)
    }

    pub fn enumeration(&self, full_name: &str) -> Option<&EnumDescriptor> {
        self.enums.get(full_name)
    }

    pub fn messages(&self) -> impl Iterator<Item = &MessageDescriptor> {
        self.messages.values()
    }

    /// Resolves an `Any` type URL such as `type.googleapis.com/cel.expr.Value`.
    pub fn resolve_type_url(&self, type_url: &str) -> Option<&MessageDescriptor> {
        let (_, name) = type_url.rsplit_once('/')?;
        self.message(name)
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod descriptor_tests;
