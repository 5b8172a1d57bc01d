/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;
use std::path::Path;

use clap::ArgMatches;
use log::info;
use vita_core::bytestream::{ByteCursor, OpenMode};
use vita_psf::{ParamSfo, PsfDecoder};

use crate::errors::CliErrors;
use crate::serde::SfoOutput;

/// Decode a param.sfo and render it as JSON
pub fn sfo_to_json(path: &Path, with_records: bool) -> Result<String, CliErrors> {
    let cursor = ByteCursor::open(path, OpenMode::Read)?;
    let mut decoder = PsfDecoder::new(cursor);

    let sfo = ParamSfo::new(decoder.decode()?);
    info!("Read {} values from {}", sfo.values().len(), path.display());

    let records = match decoder.header() {
        Some(header) if with_records => Some((header, decoder.entries())),
        _ => None
    };
    let output = SfoOutput::new(OsString::from(path.as_os_str()), &sfo, records);

    Ok(serde_json::to_string_pretty(&output)?)
}

pub fn print_sfo(args: &ArgMatches) -> Result<(), CliErrors> {
    let file = args
        .get_raw("file")
        .and_then(|mut files| files.next())
        .ok_or_else(|| "No param.sfo given".to_string())?;

    println!("{}", sfo_to_json(Path::new(file), args.get_flag("entries"))?);
    Ok(())
}
