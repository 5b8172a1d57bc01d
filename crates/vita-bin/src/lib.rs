/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

use crate::errors::CliErrors;

mod cmd_args;
mod cmd_parsers;
mod errors;
mod probe_files;
mod serde;
mod sfo;
mod workflow;

fn run_subcommand(name: &str, args: &clap::ArgMatches) -> Result<(), CliErrors> {
    match name {
        "probe" => probe_files::probe_input_files(args),
        "sfo" => sfo::print_sfo(args),
        "convert" => workflow::convert_from_cmd(args),
        _ => Err(CliErrors::Generic(format!("Unknown command {name}")))
    }
}

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    let Some((name, sub_options)) = options.subcommand() else {
        exit(-1);
    };
    cmd_parsers::global_options::setup_logger(sub_options);

    let result = run_subcommand(name, sub_options);

    if let Err(reason) = result {
        println!();
        error!(" Could not complete {name}, reason {:?}", reason);

        println!();
        exit(-1);
    }
}
