/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

/// Default for `--max-width` and `--max-height`
const MAX_DIMENSION: &str = "131072";

#[rustfmt::skip]
fn logging_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
}

#[rustfmt::skip]
fn decoder_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("DECODER")
            .help("Largest image width accepted")
            .value_parser(value_parser!(usize))
            .default_value(MAX_DIMENSION))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("DECODER")
            .help("Largest image height accepted")
            .value_parser(value_parser!(usize))
            .default_value(MAX_DIMENSION))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("DECODER")
            .help("Treat unknown critical chunks and a missing terminator as errors"))
        .arg(Arg::new("no-crc")
            .long("no-crc")
            .action(ArgAction::SetTrue)
            .help_heading("DECODER")
            .help("Do not confirm chunk and stream checksums"))
}

#[rustfmt::skip]
fn probe_command() -> Command {
    Command::new("probe")
        .about("Print the format and dimensions of files as JSON")
        .arg(Arg::new("files")
            .help("Files to probe")
            .action(ArgAction::Append)
            .required(true))
}

#[rustfmt::skip]
fn sfo_command() -> Command {
    Command::new("sfo")
        .about("Print the contents of a param.sfo file as JSON")
        .arg(Arg::new("file")
            .help("The param.sfo to read")
            .required(true))
        .arg(Arg::new("entries")
            .long("entries")
            .action(ArgAction::SetTrue)
            .help("Include the raw header and entry records"))
}

#[rustfmt::skip]
fn convert_command() -> Command {
    let cmd = Command::new("convert")
        .about("Decode an image and write it out as png")
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Input file to read data from")
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Output to write the png to")
            .required(true))
        .arg(Arg::new("bgra")
            .long("bgra")
            .action(ArgAction::SetTrue)
            .help_heading("ENCODER")
            .help("Write colour bytes blue first, the order device tools expect"))
        .arg(Arg::new("from-bgra")
            .long("from-bgra")
            .action(ArgAction::SetTrue)
            .help_heading("DECODER")
            .help("Read input png colour bytes blue first"))
        .arg(Arg::new("level")
            .long("level")
            .help_heading("ENCODER")
            .help("Compression level, 0 to 9")
            .value_parser(value_parser!(u8).range(0..=9))
            .default_value("6"));

    decoder_args(cmd)
}

pub fn create_cmd_args() -> Command {
    let cmd = Command::new("vita")
        .about("Inspect and convert the images and param.sfo files of vita packages")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(probe_command())
        .subcommand(sfo_command())
        .subcommand(convert_command());

    logging_args(cmd)
}
