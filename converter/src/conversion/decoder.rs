// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use log::{debug, trace};

use super::document::SimpleTestFile;
use crate::commands::files::read_file_content;
use crate::errors::{Error, Result};
use crate::proto;

///
/// Reads `path` in full and decodes it as a text format `SimpleTestFile`. Read failures
/// surface as `Error::IoError`, grammar and schema violations as `Error::ParseError`.
///
pub fn decode(path: &Path) -> Result<SimpleTestFile> {
    let bytes = read_file_content(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode_bytes(path, &bytes)
}

pub fn decode_bytes(path: &Path, bytes: &[u8]) -> Result<SimpleTestFile> {
    let source = path.display().to_string();
    let message = proto::decode_text(SimpleTestFile::descriptor(), bytes, &source)
        .map_err(|e| Error::parse(path, e.to_string()))?;
    let document = SimpleTestFile::new(path, message);
    trace!(
        "Decoded {} into `{}` with {} tests",
        source,
        document.name(),
        document.test_count()
    );
    Ok(document)
}
