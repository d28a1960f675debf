// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::process::exit;

use clap::ArgMatches;
use log::Level;
use simpletest_converter::command::Command;
use simpletest_converter::commands::convert::Convert;
use simpletest_converter::commands::{APP_NAME, APP_VERSION, VERBOSE};
use simpletest_converter::utils::get_converter_commands;
use simpletest_converter::utils::writer::{WriteBuffer::Stderr, Writer};

fn main() {
    let mut app = clap::Command::new(APP_NAME)
        .version(APP_VERSION)
        .about(
            r#"
  Converts the CEL conformance SimpleTestFile documents under testdata/ from
  protobuf text format into protobuf JSON. Without a subcommand the default set
  (basic, comparisons, fp_math, integer_math, string) is converted in place."#,
        )
        .args(Convert::args())
        .args_conflicts_with_subcommands(true);

    let commands = get_converter_commands();
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

    let app = app.get_matches();
    let default_command = Convert::new();
    let (command, args): (&dyn Command, &ArgMatches) = match app.subcommand() {
        Some((name, value)) => match mappings.get(name) {
            Some(command) => (*command, value),
            None => (&default_command, &app),
        },
        None => (&default_command, &app),
    };

    let log_level = match args.get_count(VERBOSE.0) {
        0 => Level::Error,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("Unable to initialise logging: {e}");
    }

    let mut writer = Writer::new(Stderr(std::io::stderr()));
    match command.execute(args, &mut writer) {
        Err(e) => {
            if writer.write_err(format!("Error occurred {e}")).is_err() {
                eprintln!("Error occurred {e}");
            }
            exit(-1);
        }
        Ok(code) => exit(code),
    }
}
