//! Hex text to BMP image
//!
//! Read → reassemble → write. Dimensions come from configuration; nothing in
//! the hex file describes the image shape.

use crate::config::DecodeConfig;
use crate::error::{ConvertError, Result};
use crate::hex;
use crate::pipeline::{ConversionReport, Direction, Pipeline};
use crate::traversal::{flattened_len, scanline_order};
use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use std::path::Path;

/// Rebuild a `width` x `height` image from a flattened byte sequence.
///
/// Bytes past `width * height * 3` are ignored.
pub fn reassemble(bytes: &[u8], width: u32, height: u32) -> Result<RgbImage> {
    let expected = match flattened_len(width, height) {
        Some(len) if len > 0 => len,
        _ => return Err(ConvertError::InvalidDimensions { width, height }),
    };
    if bytes.len() < expected {
        return Err(ConvertError::InsufficientData {
            expected,
            actual: bytes.len(),
        });
    }
    if bytes.len() > expected {
        tracing::warn!(
            "Ignoring {} trailing bytes beyond {}x{}",
            bytes.len() - expected,
            width,
            height
        );
    }

    let mut image = RgbImage::new(width, height);
    for ((x, y), rgb) in scanline_order(width, height).zip(bytes.chunks_exact(3)) {
        image.put_pixel(x, y, Rgb([rgb[0], rgb[1], rgb[2]]));
    }
    Ok(image)
}

/// Read and parse a hex text file.
pub fn read_hex_file(path: &Path) -> Result<Vec<u8>> {
    let text = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    hex::parse_lines(&text)
}

/// Write a 24-bit BMP, whatever the extension of `path`.
pub fn save_bmp(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Bmp)
        .map_err(|e| ConvertError::image(path, e))
}

/// Decode the configured hex file into a BMP image.
pub fn run(config: &DecodeConfig) -> Result<ConversionReport> {
    let mut pipeline = Pipeline::new(Direction::Decode);

    let bytes = pipeline.run_step("read", || read_hex_file(&config.input))?;
    tracing::debug!("Parsed {} hex values from {}", bytes.len(), config.input.display());
    let image = pipeline.run_step("reassemble", || {
        reassemble(&bytes, config.width, config.height)
    })?;
    pipeline.run_step("write", || save_bmp(&image, &config.output))?;

    tracing::info!(
        "Wrote {}x{} image to {}",
        config.width,
        config.height,
        config.output.display()
    );

    let used = image.as_raw().len();
    Ok(pipeline.finish(
        &config.input,
        &config.output,
        (config.width, config.height),
        used,
    ))
}
