// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Protobuf text format decoding. Parsing happens in two passes: the grammar in `parser`
//! produces an untyped field tree, `binder` then resolves it against message descriptors.
//!

mod binder;
pub(crate) mod parser;

use thiserror::Error;

use super::descriptor::MessageDescriptor;
use super::dynamic::DynamicMessage;
use parser::{ParserError, Position, Span};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line} column {column}: {message}")]
pub struct DecodeError {
    pub line: u32,
    pub column: usize,
    pub message: String,
}

impl DecodeError {
    pub(crate) fn at(position: Position, message: impl Into<String>) -> Self {
        DecodeError {
            line: position.line,
            column: position.column,
            message: message.into(),
        }
    }
}

impl<'a> From<nom::Err<ParserError<'a>>> for DecodeError {
    fn from(err: nom::Err<ParserError<'a>>) -> Self {
        match err {
            nom::Err::Failure(e) | nom::Err::Error(e) => {
                let fragment = e.span.fragment().lines().next().unwrap_or("");
                let message = match (e.context.is_empty(), e.kind) {
                    (false, nom::error::ErrorKind::Verify) => {
                        format!("{}, at `{fragment}`", e.context)
                    }
                    (true, nom::error::ErrorKind::Eof) => {
                        format!("unexpected content `{fragment}`")
                    }
                    (true, kind) => format!("syntax error ({kind:?}) at `{fragment}`"),
                    (false, _) => format!("syntax error when handling {}, at `{fragment}`", e.context),
                };
                DecodeError::at(e.position(), message)
            }
            nom::Err::Incomplete(_) => DecodeError {
                line: 0,
                column: 0,
                message: "More bytes required for parsing".to_string(),
            },
        }
    }
}

///
/// Decodes `bytes` in protobuf text format as a message of type `descriptor`. `source`
/// names the input in parser diagnostics.
///
pub fn decode_text(
    descriptor: &'static MessageDescriptor,
    bytes: &[u8],
    source: &str,
) -> Result<DynamicMessage, DecodeError> {
    let text = std::str::from_utf8(bytes).map_err(|e| DecodeError {
        line: 0,
        column: 0,
        message: format!("input is not valid UTF-8 ({e})"),
    })?;
    let span = Span::new_extra(text, source);
    let (_, fields) = parser::parse_document(span)?;
    binder::bind_message(descriptor, &fields)
}
