/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use clap::ArgMatches;
use log::{debug, info};
use vita_core::bytestream::{ByteCursor, OpenMode};
use vita_core::options::{DecoderOptions, EncoderOptions};
use vita_image::codecs::{decode_any, ImageFormat};
use vita_image::errors::ImageErrors;

use crate::cmd_parsers::{get_decoder_options, get_encoder_options};
use crate::errors::CliErrors;

/// Decode `in_file` in whatever format it is and write it to `out_file` as png
///
/// Returns the number of bytes written.
pub fn convert_file(
    in_file: &Path, out_file: &Path, decoder_options: DecoderOptions,
    encoder_options: EncoderOptions
) -> Result<usize, CliErrors> {
    if let Some(extension) = out_file.extension() {
        let format = ImageFormat::from_extension(extension.to_string_lossy());

        if let Some(format) = format.filter(|format| !format.has_encoder()) {
            return Err(ImageErrors::NoEncoderForFormat(format).into());
        }
    }
    let input = ByteCursor::open(in_file, OpenMode::Read)?;
    let (format, image) = decode_any(&input, decoder_options)?;

    info!(
        "Decoded {} as {:?}, {}x{}",
        in_file.display(),
        format,
        image.width(),
        image.height()
    );
    let bytes = ImageFormat::PNG.encode(&image, encoder_options)?;

    let mut output = ByteCursor::open(out_file, OpenMode::Create)?;
    output.write_bytes(&bytes)?;
    debug!("Wrote {} bytes to {}", bytes.len(), out_file.display());

    Ok(bytes.len())
}

pub(crate) fn convert_from_cmd(args: &ArgMatches) -> Result<(), CliErrors> {
    info!("Creating workflows from input");

    let in_file = args.get_raw("in").and_then(|mut files| files.next());
    let out_file = args.get_raw("out").and_then(|mut files| files.next());

    let (Some(in_file), Some(out_file)) = (in_file, out_file) else {
        return Err(CliErrors::Generic("Input and output files are required".to_string()));
    };
    let decoder_options = get_decoder_options(args);
    let encoder_options = get_encoder_options(args);

    convert_file(
        Path::new(in_file),
        Path::new(out_file),
        decoder_options,
        encoder_options
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;
    use vita_core::image::pack_rgba;
    use vita_core::options::ChannelOrder;

    use super::*;

    /// A 2x1 24 bit bottom-up bitmap
    fn small_bmp() -> Vec<u8> {
        let mut bmp = Vec::new();
        bmp.extend_from_slice(b"BM");
        bmp.extend_from_slice(&62_u32.to_le_bytes());
        bmp.extend_from_slice(&0_u32.to_le_bytes());
        bmp.extend_from_slice(&54_u32.to_le_bytes());

        bmp.extend_from_slice(&40_u32.to_le_bytes());
        bmp.extend_from_slice(&2_i32.to_le_bytes());
        bmp.extend_from_slice(&1_i32.to_le_bytes());
        bmp.extend_from_slice(&1_u16.to_le_bytes());
        bmp.extend_from_slice(&24_u16.to_le_bytes());
        bmp.extend_from_slice(&[0; 24]);
        // B,G,R per pixel, row padded to 8 bytes
        bmp.extend_from_slice(&[30, 20, 10, 60, 50, 40, 0, 0]);
        bmp
    }

    #[test]
    fn converts_bmp_to_png() {
        let dir = TempDir::new("vita-convert").unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("out.png");
        std::fs::write(&input, small_bmp()).unwrap();

        let written = convert_file(
            &input,
            &output,
            DecoderOptions::default(),
            EncoderOptions::default().set_channel_order(ChannelOrder::Rgba)
        )
        .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(bytes.len(), written);

        let rgba = DecoderOptions::default().set_channel_order(ChannelOrder::Rgba);
        let image = ImageFormat::PNG
            .decode(&ByteCursor::from_vec(bytes), rgba)
            .unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(
            image.pixels(),
            &[pack_rgba(10, 20, 30, 255), pack_rgba(40, 50, 60, 255)]
        );
    }

    #[test]
    fn refuses_formats_without_encoder() {
        let dir = TempDir::new("vita-convert").unwrap();
        let input = dir.path().join("in.bmp");
        std::fs::write(&input, small_bmp()).unwrap();

        let result = convert_file(
            &input,
            &dir.path().join("out.tga"),
            DecoderOptions::default(),
            EncoderOptions::default()
        );
        assert!(matches!(
            result,
            Err(CliErrors::ImageErrors(ImageErrors::NoEncoderForFormat(
                ImageFormat::TGA
            )))
        ));
        assert!(!dir.path().join("out.tga").exists());
    }

    #[test]
    fn unknown_input_is_an_error() {
        let dir = TempDir::new("vita-convert").unwrap();
        let input = dir.path().join("garbage.bin");
        std::fs::write(&input, [0xFF_u8; 3]).unwrap();

        let result = convert_file(
            &input,
            &dir.path().join("out.png"),
            DecoderOptions::default(),
            EncoderOptions::default()
        );
        assert!(matches!(
            result,
            Err(CliErrors::ImageErrors(ImageErrors::UnknownFormat))
        ));
    }
}
