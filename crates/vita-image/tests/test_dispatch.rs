/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::Rng;
use vita_core::bytestream::ByteCursor;
use vita_core::errors::ErrorKind;
use vita_core::image::{pack_rgba, Image};
use vita_core::options::{ChannelOrder, DecoderOptions, EncoderOptions};
use vita_image::codecs::bmp::BmpDecoder;
use vita_image::codecs::{decode_any, guess_format, ImageFormat};
use vita_image::errors::ImageErrors;

/// A BMP with a 40 byte information header, `pixels` already padded
fn bmp(width: i32, height: i32, depth: u16, palette: &[[u8; 4]], pixels: &[u8]) -> Vec<u8> {
    let data_offset = 54 + 4 * palette.len() as u32;
    let file_size = data_offset + pixels.len() as u32;

    let mut out = b"BM".to_vec();
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&data_offset.to_le_bytes());
    out.extend_from_slice(&40_u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&depth.to_le_bytes());
    // compression, image size, resolution
    out.extend_from_slice(&[0; 16]);
    out.extend_from_slice(&(palette.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);

    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend_from_slice(pixels);
    out
}

/// A true colour TGA with an image ID and a skipped colour map
fn tga(width: u16, height: u16, depth: u8, descriptor: u8, pixels: &[u8]) -> Vec<u8> {
    let mut out = vec![3, 1, 2];
    // first entry, two entries of 24 bits
    out.extend_from_slice(&0_u16.to_le_bytes());
    out.extend_from_slice(&2_u16.to_le_bytes());
    out.push(24);
    // origin
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.push(depth);
    out.push(descriptor);
    // image id
    out.extend_from_slice(b"abc");
    // colour map
    out.extend_from_slice(&[0xEE; 6]);
    out.extend_from_slice(pixels);
    out
}

fn bmp_24() -> Vec<u8> {
    let pixels = [
        // bottom row: blue, green
        255, 0, 0, 0, 255, 0, 0, 0, //
        // top row: red, white
        0, 0, 255, 255, 255, 255, 0, 0
    ];
    bmp(2, 2, 24, &[], &pixels)
}

/// A png written with the default encoder options
fn png_default() -> (Image, Vec<u8>) {
    let image = Image::from_pixels(
        2,
        1,
        vec![pack_rgba(1, 2, 3, 4), pack_rgba(5, 6, 7, 8)]
    )
    .unwrap();
    let bytes = ImageFormat::PNG
        .encode(&image, EncoderOptions::default())
        .unwrap();
    (image, bytes)
}

fn decode(format: ImageFormat, data: Vec<u8>) -> Result<Image, ImageErrors> {
    format.decode(&ByteCursor::from_vec(data), DecoderOptions::default())
}

#[test]
fn test_bmp_24_bottom_up() {
    let image = decode(ImageFormat::BMP, bmp_24()).unwrap();

    assert_eq!(
        image.pixels(),
        &[
            pack_rgba(255, 0, 0, 255),
            pack_rgba(255, 255, 255, 255),
            pack_rgba(0, 0, 255, 255),
            pack_rgba(0, 255, 0, 255)
        ]
    );
}

#[test]
fn test_bmp_negative_height_is_top_down() {
    let pixels = [10, 20, 30, 0, 40, 50, 60, 0];
    let image = decode(ImageFormat::BMP, bmp(1, -2, 24, &[], &pixels)).unwrap();

    assert_eq!(image.get(0, 0), Some(pack_rgba(30, 20, 10, 255)));
    assert_eq!(image.get(0, 1), Some(pack_rgba(60, 50, 40, 255)));
}

#[test]
fn test_bmp_8_bit_palette() {
    let palette = [[0, 0, 255, 0], [255, 0, 0, 0]];
    // 3 pixels, padded to 4 bytes
    let pixels = [0, 1, 1, 0];
    let image = decode(ImageFormat::BMP, bmp(3, 1, 8, &palette, &pixels)).unwrap();

    assert_eq!(
        image.pixels(),
        &[
            pack_rgba(255, 0, 0, 255),
            pack_rgba(0, 0, 255, 255),
            pack_rgba(0, 0, 255, 255)
        ]
    );

    let bad_index = [0, 7, 0, 0];
    assert!(decode(ImageFormat::BMP, bmp(3, 1, 8, &palette, &bad_index)).is_err());
}

#[test]
fn test_bmp_headers_only() {
    let palette = [[0, 0, 255, 0], [255, 0, 0, 0]];
    let data = bmp(3, -1, 8, &palette, &[0, 1, 1, 0]);
    let mut decoder = BmpDecoder::new(ByteCursor::from_vec(data));

    assert_eq!(decoder.depth(), None);
    decoder.decode_headers().unwrap();
    assert_eq!(decoder.depth(), Some(8));
    assert_eq!(decoder.dimensions(), Some((3, 1)));
}

#[test]
fn test_bmp_32_bit_ignores_fourth_byte() {
    let pixels = [1, 2, 3, 0];
    let image = decode(ImageFormat::BMP, bmp(1, 1, 32, &[], &pixels)).unwrap();
    assert_eq!(image.pixels(), &[pack_rgba(3, 2, 1, 255)]);
}

#[test]
fn test_bmp_rejects_unsupported_depth() {
    let err = decode(ImageFormat::BMP, bmp(1, 1, 16, &[], &[0; 4])).unwrap_err();
    assert!(matches!(err, ImageErrors::BmpErrors(_)));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_tga_bottom_origin_is_flipped() {
    let pixels = [
        // bottom row
        1, 2, 3, 4, 5, 6, //
        // top row
        7, 8, 9, 10, 11, 12
    ];
    let image = decode(ImageFormat::TGA, tga(2, 2, 24, 0, &pixels)).unwrap();

    assert_eq!(
        image.pixels(),
        &[
            pack_rgba(9, 8, 7, 255),
            pack_rgba(12, 11, 10, 255),
            pack_rgba(3, 2, 1, 255),
            pack_rgba(6, 5, 4, 255)
        ]
    );
}

#[test]
fn test_tga_top_origin_with_alpha() {
    let pixels = [1, 2, 3, 4, 5, 6, 7, 8];
    let image = decode(ImageFormat::TGA, tga(1, 2, 32, 0x20 | 8, &pixels)).unwrap();

    assert_eq!(
        image.pixels(),
        &[pack_rgba(3, 2, 1, 4), pack_rgba(7, 6, 5, 8)]
    );
}

#[test]
fn test_tga_rejects_rle() {
    let mut data = tga(1, 1, 24, 0, &[0; 3]);
    data[2] = 10;
    assert!(!ImageFormat::TGA.probe(&ByteCursor::from_vec(data.clone())));
    assert!(decode(ImageFormat::TGA, data).is_err());
}

#[test]
fn test_guess_format() {
    let (_, png) = png_default();
    let tga_data = tga(1, 1, 24, 0, &[0; 3]);

    let cases = [
        (png, Some(ImageFormat::PNG)),
        (bmp_24(), Some(ImageFormat::BMP)),
        (tga_data, Some(ImageFormat::TGA)),
        (b"hello world, not an image".to_vec(), None),
        (vec![], None)
    ];
    for (data, expected) in cases {
        let mut cursor = ByteCursor::from_vec(data);
        cursor.set_position(5);

        assert_eq!(guess_format(&cursor), expected);
        // probing never moves the caller's cursor
        assert_eq!(cursor.position(), 5);
    }
}

#[test]
fn test_decode_any() {
    let (image, png) = png_default();
    let mut cursor = ByteCursor::from_vec(png);
    cursor.set_position(3);

    let (format, decoded) = decode_any(&cursor, DecoderOptions::default()).unwrap();
    assert_eq!(format, ImageFormat::PNG);
    assert_eq!(decoded, image);
    assert_eq!(cursor.position(), 3);

    let unknown = decode_any(&ByteCursor::from_bytes(b"????"), DecoderOptions::default());
    assert!(matches!(unknown, Err(ImageErrors::UnknownFormat)));
}

#[test]
fn test_png_defaults_round_trip() {
    let pixels = (0..12_u8)
        .map(|i| pack_rgba(0x32, 200 - i, 0x64 + i, 255 - i))
        .collect();
    let image = Image::from_pixels(4, 3, pixels).unwrap();

    let bytes = ImageFormat::PNG
        .encode(&image, EncoderOptions::default())
        .unwrap();
    let (format, decoded) =
        decode_any(&ByteCursor::from_vec(bytes.clone()), DecoderOptions::default()).unwrap();

    assert_eq!(format, ImageFormat::PNG);
    assert_eq!(decoded, image);

    // a reader expecting red first sees red and blue swapped
    let rgba = DecoderOptions::default().set_channel_order(ChannelOrder::Rgba);
    let swapped = ImageFormat::PNG
        .decode(&ByteCursor::from_vec(bytes), rgba)
        .unwrap();
    assert_eq!(swapped.get(0, 0), Some(pack_rgba(0x64, 200, 0x32, 255)));
}

#[test]
fn test_decode_embedded_image() {
    let mut container = b"header".to_vec();
    container.extend_from_slice(&bmp_24());

    let cursor = ByteCursor::from_vec(container);
    let view = cursor.slice(6..).unwrap();

    assert_eq!(guess_format(&view), Some(ImageFormat::BMP));
    let info = ImageFormat::BMP
        .read_info(&view, DecoderOptions::default())
        .unwrap();
    assert_eq!((info.width, info.height), (2, 2));
}

#[test]
fn test_read_info() {
    let (_, png) = png_default();
    let info = ImageFormat::PNG
        .read_info(&ByteCursor::from_vec(png), DecoderOptions::default())
        .unwrap();
    assert_eq!(info.format, ImageFormat::PNG);
    assert_eq!((info.width, info.height), (2, 1));

    let tga_data = tga(7, 3, 32, 0, &[0; 84]);
    let info = ImageFormat::TGA
        .read_info(&ByteCursor::from_vec(tga_data), DecoderOptions::default())
        .unwrap();
    assert_eq!((info.width, info.height), (7, 3));
}

#[test]
fn test_encode_only_png() {
    let image = Image::new(1, 1);
    assert!(ImageFormat::PNG.has_encoder());

    for format in [ImageFormat::BMP, ImageFormat::TGA] {
        assert!(!format.has_encoder());
        let err = format.encode(&image, EncoderOptions::default()).unwrap_err();
        assert!(matches!(err, ImageErrors::NoEncoderForFormat(f) if f == format));
    }
}

#[test]
fn test_extensions() {
    for format in ImageFormat::ALL {
        assert_eq!(ImageFormat::from_extension(format.extension()), Some(format));
    }
    assert_eq!(ImageFormat::from_extension("PNG"), Some(ImageFormat::PNG));
    assert_eq!(ImageFormat::from_extension("jpg"), None);
}

#[test]
fn test_truncated_inputs() {
    let (_, png) = png_default();
    let inputs = [
        (ImageFormat::BMP, bmp_24()),
        (ImageFormat::TGA, tga(2, 1, 24, 0, &[0; 6])),
        (ImageFormat::PNG, png)
    ];
    for (format, full) in inputs {
        let minimum = match format {
            ImageFormat::PNG => 8,
            ImageFormat::BMP => 54,
            ImageFormat::TGA => 18
        };
        for length in 0..minimum {
            let err = decode(format, full[..length].to_vec()).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::Format | ErrorKind::Truncated),
                "{format:?} {length}"
            );
        }
        // cut inside the pixel data
        let cut = full.len() - 2;
        if format != ImageFormat::PNG {
            let err = decode(format, full[..cut].to_vec()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Truncated, "{format:?}");
        }
    }
}

#[test]
fn test_large_dimensions_without_data() {
    // a tiny file claiming a huge image
    let data = bmp(60000, 60000, 32, &[], &[0; 4]);
    let err = decode(ImageFormat::BMP, data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);

    let data = tga(u16::MAX, u16::MAX, 32, 0, &[0; 4]);
    let err = decode(ImageFormat::TGA, data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn test_random_bytes_do_not_panic() {
    let mut rand = nanorand::WyRand::new_seed(0x5641_4954);

    for round in 0..200 {
        let length = rand.generate_range(0_usize..128);
        let mut data = vec![0_u8; length];
        rand.fill_bytes(&mut data);
        // every few rounds look like a TGA header so that path is walked too
        if round % 4 == 0 && length > 17 {
            data[1] = 0;
            data[2] = 2;
            data[16] = 24;
        }
        let mut cursor = ByteCursor::from_vec(data);
        cursor.set_position(1);

        let _ = decode_any(&cursor, DecoderOptions::default());
        assert_eq!(cursor.position(), 1);
    }
}
