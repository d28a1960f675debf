// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod convert;
pub mod files;

//
// Constants
//
// Application metadata
pub const APP_NAME: &str = "simpletest-converter";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
// Commands
pub const CONVERT: &str = "convert";
// Arguments for convert
pub const INPUT_DIR: (&str, char) = ("input-dir", 'i');
pub const OUTPUT_DIR: (&str, char) = ("output-dir", 'o');
pub const FILE: (&str, char) = ("file", 'f');
pub const VERBOSE: (&str, char) = ("verbose", 'v');

pub const DEFAULT_INPUT_DIR: &str = "testdata";
pub const DEFAULT_INPUT_FILES: [&str; 5] =
    ["basic", "comparisons", "fp_math", "integer_math", "string"];

pub(crate) const INPUT_FILE_EXTENSION: &str = ".textproto";
pub(crate) const OUTPUT_FILE_EXTENSION: &str = ".json";

pub const SUCCESS_STATUS_CODE: i32 = 0;
