// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod decoder;
pub mod document;
pub mod encoder;

use std::path::PathBuf;

use log::{debug, info};

use crate::commands::files::{enumerate_inputs, InputFile};
use crate::commands::{DEFAULT_INPUT_DIR, DEFAULT_INPUT_FILES};
use crate::errors::{Error, Result};
use crate::utils::writer::Writer;

pub use document::SimpleTestFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub inputs: Vec<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            inputs: DEFAULT_INPUT_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Ready,
    /// Index into the input list of the file being handled.
    Processing(usize),
    Done,
    Failed(usize),
}

///
/// Converts the configured inputs one after the other. The first failure of any kind
/// stops the run; outputs already written stay on disk.
///
#[derive(Debug)]
pub struct Converter {
    inputs: Vec<InputFile>,
    output_dir: PathBuf,
    state: RunState,
}

impl Converter {
    pub fn new(config: ConversionConfig) -> Result<Self> {
        if config.inputs.is_empty() {
            return Err(Error::IllegalArguments(String::from(
                "no input files were given to convert",
            )));
        }
        if let Some(bad) = config
            .inputs
            .iter()
            .find(|name| name.is_empty() || name.contains(['/', '\\']))
        {
            return Err(Error::IllegalArguments(format!(
                "`{bad}` is not a logical file name, expected something like `basic`"
            )));
        }

        Ok(Converter {
            inputs: enumerate_inputs(&config.input_dir, &config.inputs),
            output_dir: config.output_dir,
            state: RunState::Ready,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn inputs(&self) -> &[InputFile] {
        &self.inputs
    }

    /// Returns the paths written, in input order.
    pub fn run(&mut self, writer: &mut Writer) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.inputs.len());
        for (index, input) in self.inputs.iter().enumerate() {
            self.state = RunState::Processing(index);
            writer
                .write_err(format!("Writing {}", input.path().display()))
                .map_err(|e| Error::io(input.path(), e))?;

            let result = decoder::decode(input.path())
                .and_then(|document| encoder::encode_and_write(&document, &self.output_dir));
            match result {
                Ok(path) => {
                    info!("Converted {} into {}", input.name(), path.display());
                    written.push(path);
                }
                Err(e) => {
                    debug!("Stopping after {} of {} inputs", index, self.inputs.len());
                    self.state = RunState::Failed(index);
                    return Err(e);
                }
            }
        }
        self.state = RunState::Done;
        Ok(written)
    }
}
