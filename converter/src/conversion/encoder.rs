// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use log::debug;

use super::document::SimpleTestFile;
use crate::commands::files::write_file_content;
use crate::commands::OUTPUT_FILE_EXTENSION;
use crate::errors::{Error, Result};
use crate::proto::{self, JsonEncodeError};

///
/// `<name>.json`, derived from the decoded document rather than the input file. Names
/// that would not produce a plain file inside the output directory are refused.
///
pub fn output_file_name(document: &SimpleTestFile) -> Result<String> {
    let name = document.name();
    if name.is_empty() {
        return Err(Error::invalid_document(
            document.source(),
            format!("the `name` field is empty, refusing to write `{OUTPUT_FILE_EXTENSION}`"),
        ));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::invalid_document(
            document.source(),
            format!("the `name` field `{name}` is not a plain file name"),
        ));
    }
    Ok(format!("{name}{OUTPUT_FILE_EXTENSION}"))
}

pub fn encode(document: &SimpleTestFile) -> Result<Vec<u8>> {
    proto::to_json_pretty(document.as_message()).map_err(|e| match e {
        JsonEncodeError::Encode(e) => Error::invalid_document(document.source(), e.to_string()),
        JsonEncodeError::Serialize(e) => Error::JsonError(e),
    })
}

///
/// Serializes `document` and writes it to `output_dir/<name>.json`, replacing any existing
/// file. The directory must already exist.
///
pub fn encode_and_write(document: &SimpleTestFile, output_dir: &Path) -> Result<PathBuf> {
    let file_name = output_file_name(document)?;
    let json = encode(document)?;
    let path = output_dir.join(file_name);
    write_file_content(&path, &json)?;
    debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(path)
}
