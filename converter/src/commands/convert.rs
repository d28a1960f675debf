// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches};
use log::debug;

use crate::command::Command;
use crate::commands::{
    CONVERT, DEFAULT_INPUT_DIR, FILE, INPUT_DIR, OUTPUT_DIR, SUCCESS_STATUS_CODE, VERBOSE,
};
use crate::conversion::{ConversionConfig, Converter};
use crate::errors::Result;
use crate::utils::writer::Writer;

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Convert {}

#[allow(clippy::new_without_default)]
impl Convert {
    pub fn new() -> Self {
        Convert {}
    }

    /// Shared with the top level command so a bare invocation converts the default set.
    pub fn args() -> Vec<Arg> {
        vec![
            Arg::new(INPUT_DIR.0)
                .long(INPUT_DIR.0)
                .short(INPUT_DIR.1)
                .help("Directory holding the <name>.textproto inputs")
                .action(ArgAction::Set)
                .default_value(DEFAULT_INPUT_DIR),
            Arg::new(OUTPUT_DIR.0)
                .long(OUTPUT_DIR.0)
                .short(OUTPUT_DIR.1)
                .help("Directory the <name>.json outputs are written to, defaults to the input directory")
                .action(ArgAction::Set)
                .required(false),
            Arg::new(FILE.0)
                .long(FILE.0)
                .short(FILE.1)
                .help("Logical name of an input to convert, such as `basic`. Can be repeated, the order is kept")
                .action(ArgAction::Append)
                .required(false),
            Arg::new(VERBOSE.0)
                .long(VERBOSE.0)
                .short(VERBOSE.1)
                .help("Sets the level of verbosity - add v's to increase output")
                .action(ArgAction::Count),
        ]
    }

    fn config(args: &ArgMatches) -> ConversionConfig {
        let mut config = ConversionConfig::default();
        if let Some(dir) = args.get_one::<String>(INPUT_DIR.0) {
            config.input_dir = PathBuf::from(dir);
        }
        config.output_dir = match args.get_one::<String>(OUTPUT_DIR.0) {
            Some(dir) => PathBuf::from(dir),
            None => config.input_dir.clone(),
        };
        if let Some(files) = args.get_many::<String>(FILE.0) {
            config.inputs = files.cloned().collect();
        }
        config
    }
}

impl Command for Convert {
    fn name(&self) -> &'static str {
        CONVERT
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(CONVERT)
            .about(
                "Converts SimpleTestFile documents from protobuf text format into protobuf JSON, \
                 one <name>.json per input, named after the document.",
            )
            .args(Self::args())
    }

    fn execute(&self, args: &ArgMatches, writer: &mut Writer) -> Result<i32> {
        let config = Self::config(args);
        debug!("Conversion configured as {:?}", config);

        let mut converter = Converter::new(config)?;
        let written = converter.run(writer)?;
        debug!("Wrote {} files", written.len());

        Ok(SUCCESS_STATUS_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matches(args: &[&str]) -> ArgMatches {
        Convert::new()
            .command()
            .get_matches_from(std::iter::once(CONVERT).chain(args.iter().copied()))
    }

    #[test]
    fn test_no_flags_reproduce_the_default_run() {
        assert_eq!(Convert::config(&matches(&[])), ConversionConfig::default());
    }

    #[test]
    fn test_output_dir_follows_input_dir_unless_given() {
        let config = Convert::config(&matches(&["-i", "fixtures"]));
        assert_eq!(config.output_dir, PathBuf::from("fixtures"));

        let config = Convert::config(&matches(&["-i", "fixtures", "--output-dir", "out"]));
        assert_eq!(config.input_dir, PathBuf::from("fixtures"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_repeated_files_keep_their_order() {
        let config = Convert::config(&matches(&["-f", "string", "--file", "basic"]));
        assert_eq!(config.inputs, vec!["string".to_string(), "basic".to_string()]);
    }
}
