// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod command;
pub mod commands;
pub mod conversion;
pub mod errors;
pub mod proto;
pub mod utils;

pub use crate::conversion::{ConversionConfig, Converter, RunState, SimpleTestFile};
pub use crate::errors::{Error, Result};
