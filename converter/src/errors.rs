// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error when accessing `{}`: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parser Error when parsing `{}`: {message}", path.display())]
    ParseError { path: PathBuf, message: String },
    #[error("Document decoded from `{}` can not be written: {message}", path.display())]
    InvalidDocument { path: PathBuf, message: String },
    #[error("Error producing JSON {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("{0}")]
    IllegalArguments(String),
}

impl Error {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::IoError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Error::ParseError {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn invalid_document(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Error::InvalidDocument {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::IoError { path, .. }
            | Error::ParseError { path, .. }
            | Error::InvalidDocument { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<R> = std::result::Result<R, Error>;
