// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use crate::commands::INPUT_FILE_EXTENSION;
use crate::errors::{Error, Result};

///
/// One entry of the input list: a logical name such as `fp_math` resolved against the
/// input directory to `<dir>/fp_math.textproto`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    name: String,
    path: PathBuf,
}

impl InputFile {
    pub fn new(input_dir: &Path, name: &str) -> Self {
        InputFile {
            name: name.to_string(),
            path: input_dir.join(format!("{name}{INPUT_FILE_EXTENSION}")),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolves logical names in the order given. Touches nothing on disk.
pub fn enumerate_inputs<S: AsRef<str>>(input_dir: &Path, names: &[S]) -> Vec<InputFile> {
    names
        .iter()
        .map(|name| InputFile::new(input_dir, name.as_ref()))
        .collect()
}

pub(crate) fn read_file_content(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut content = Vec::new();
    let mut buf_reader = BufReader::new(file);
    buf_reader
        .read_to_end(&mut content)
        .map_err(|e| Error::io(path, e))?;
    Ok(content)
}

//
// Create or truncate, no temp file and rename. An interrupted write leaves a partial file.
//
pub(crate) fn write_file_content(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| Error::io(path, e))?;
    file.write_all(content).map_err(|e| Error::io(path, e))?;
    file.flush().map_err(|e| Error::io(path, e))
}
