// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use crate::proto::dynamic::Value;
use crate::proto::schema::{registry, SIMPLE_TEST_FILE};
use crate::proto::{DynamicMessage, MessageDescriptor};

///
/// Read-only view over a decoded `cel.expr.conformance.test.SimpleTestFile`. Only `name`
/// and the section list are interpreted; everything else passes through to the encoder
/// untouched.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTestFile {
    source: PathBuf,
    message: DynamicMessage,
}

impl SimpleTestFile {
    pub fn descriptor() -> &'static MessageDescriptor {
        registry()
            .message(SIMPLE_TEST_FILE)
            .unwrap_or_else(|| unreachable!("{} is part of the bundled schema", SIMPLE_TEST_FILE))
    }

    pub(crate) fn new(source: &Path, message: DynamicMessage) -> Self {
        SimpleTestFile {
            source: source.to_path_buf(),
            message,
        }
    }

    /// Path the document was decoded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn name(&self) -> &str {
        self.message.string("name")
    }

    pub fn description(&self) -> &str {
        self.message.string("description")
    }

    pub fn sections(&self) -> impl Iterator<Item = &DynamicMessage> {
        self.message.list("section").iter().filter_map(Value::as_message)
    }

    pub fn test_count(&self) -> usize {
        self.sections().map(|section| section.list("test").len()).sum()
    }

    pub fn as_message(&self) -> &DynamicMessage {
        &self.message
    }
}
