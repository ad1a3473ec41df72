//! BMP image to hex text
//!
//! Load → flatten → write. The flattened sequence walks scanlines bottom to
//! top, emitting red, green and blue for each pixel.

use crate::bmp_header::BmpInfo;
use crate::config::EncodeConfig;
use crate::error::{ConvertError, Result};
use crate::hex;
use crate::pipeline::{ConversionReport, Direction, Pipeline};
use crate::traversal::scanline_order;
use image::{ColorType, DynamicImage, ImageReader, RgbImage};
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Load an image and convert it to 8-bit RGB, dropping any alpha channel.
///
/// Grayscale BMPs are rejected even though the decoder would expand them to RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let bytes = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    if let Some(info) = BmpInfo::parse(&bytes) {
        tracing::debug!(
            "{} is a {} bpp BMP with {} palette entries",
            path.display(),
            info.bits_per_pixel,
            info.palette.len()
        );
        if info.is_grayscale() {
            return Err(ConvertError::UnsupportedLayout(ColorType::L8));
        }
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ConvertError::io(path, e))?;
    let img = reader.decode().map_err(|e| ConvertError::image(path, e))?;
    tracing::debug!(
        "Decoded {} as {:?} ({}x{})",
        path.display(),
        img.color(),
        img.width(),
        img.height()
    );
    to_rgb(img)
}

/// Keep the first three channels of an 8-bit image with at least three channels.
pub fn to_rgb(img: DynamicImage) -> Result<RgbImage> {
    let color = img.color();
    let channels = color.channel_count();
    if channels < 3 || color.bytes_per_pixel() != channels {
        return Err(ConvertError::UnsupportedLayout(color));
    }
    Ok(img.into_rgb8())
}

/// Flatten pixels bottom row first, left to right, R-G-B.
pub fn flatten(image: &RgbImage) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let mut bytes = Vec::with_capacity(width as usize * height as usize * 3);
    for (x, y) in scanline_order(width, height) {
        bytes.extend_from_slice(&image.get_pixel(x, y).0);
    }
    bytes
}

/// Encode the configured image into a hex text file.
pub fn run(config: &EncodeConfig) -> Result<ConversionReport> {
    let mut pipeline = Pipeline::new(Direction::Encode);

    let image = pipeline.run_step("load", || load_rgb(&config.input))?;
    let dimensions = image.dimensions();
    let bytes = pipeline.run_step("flatten", || Ok(flatten(&image)))?;
    pipeline.run_step("write", || write_hex_file(&config.output, &bytes))?;

    tracing::info!(
        "Wrote {} hex lines for {}x{} image to {}",
        bytes.len(),
        dimensions.0,
        dimensions.1,
        config.output.display()
    );

    Ok(pipeline.finish(&config.input, &config.output, dimensions, bytes.len()))
}

fn write_hex_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    hex::write_lines(&mut writer, bytes).map_err(|e| ConvertError::io(path, e))?;
    writer.flush().map_err(|e| ConvertError::io(path, e))
}
