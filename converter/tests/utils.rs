// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use simpletest_converter::utils;
use simpletest_converter::utils::writer::Writer;

#[non_exhaustive]
pub struct StatusCode;

const CONVERTER_TEST_APP_NAME: &str = "simpletest-converter-test";

#[allow(dead_code)]
impl StatusCode {
    pub const SUCCESS: i32 = 0;
    pub const INTERNAL_FAILURE: i32 = -1;
    pub const PREPROCESSOR_ERROR: i32 = -3;
}

pub fn get_full_path_for_resource_file(path: &str) -> String {
    let mut resource = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    resource.push(path);
    resource.display().to_string()
}

pub fn read_from_resource_file(path: &str) -> String {
    fs::read_to_string(get_full_path_for_resource_file(path)).unwrap()
}

/// Copies `resources/<path>` into `dir`, keeping only the file name.
#[allow(dead_code)]
pub fn stage_resource_file(path: &str, dir: &Path) -> PathBuf {
    let source = PathBuf::from(get_full_path_for_resource_file(path));
    let target = dir.join(source.file_name().unwrap());
    fs::copy(&source, &target).unwrap();
    target
}

#[allow(dead_code)]
pub fn compare_write_buffer_with_string(expected_output: &str, actual_output_writer: Writer) {
    let actual_output = actual_output_writer.err_to_stripped().unwrap();
    assert_eq!(expected_output, actual_output)
}

pub trait CommandTestRunner {
    fn build_args(&self) -> Vec<String>;

    fn run(&self, writer: &mut Writer) -> i32 {
        let mut app = clap::Command::new(CONVERTER_TEST_APP_NAME);

        let args = self.build_args();

        let command_options = args.iter().fold(
            vec![String::from(CONVERTER_TEST_APP_NAME)],
            |mut res, arg| {
                res.push(arg.to_string());
                res
            },
        );

        let commands = utils::get_converter_commands();

        let mappings = commands.iter().map(|s| (s.name(), s)).fold(
            HashMap::with_capacity(commands.len()),
            |mut map, entry| {
                map.insert(entry.0, entry.1.as_ref());
                map
            },
        );

        for each in &commands {
            app = app.subcommand(each.command());
        }

        let app = app.get_matches_from(command_options);

        match app.subcommand() {
            Some((name, value)) => {
                if let Some(command) = mappings.get(name) {
                    match (*command).execute(value, writer) {
                        Err(e) => {
                            writer
                                .write_err(format!("Error occurred {e}"))
                                .expect("failed to write to stderr");

                            StatusCode::INTERNAL_FAILURE
                        }
                        Ok(code) => code,
                    }
                } else {
                    StatusCode::PREPROCESSOR_ERROR
                }
            }

            None => StatusCode::PREPROCESSOR_ERROR,
        }
    }
}

#[macro_export]
macro_rules! assert_output_from_str_eq {
    ($expected_output: expr, $actual_output_writer: expr) => {
        $crate::utils::compare_write_buffer_with_string($expected_output, $actual_output_writer)
    };
}
