// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Descriptor driven protobuf support: the bundled schema, dynamic messages, the text
//! format decoder and the canonical JSON encoder. Nothing in here knows about files.
//!

pub mod descriptor;
pub mod dynamic;
pub mod json;
pub mod schema;
pub mod text;

pub use descriptor::{MessageDescriptor, Registry};
pub use dynamic::DynamicMessage;
pub use json::{to_json, to_json_pretty, EncodeError, JsonEncodeError};
pub use schema::registry;
pub use text::{decode_text, DecodeError};
