use std::path::PathBuf;

/// Default hex output file of the encoder
pub const DEFAULT_HEX_OUTPUT: &str = "input.hex";
/// Default hex input file of the decoder
pub const DEFAULT_HEX_INPUT: &str = "formatted_output.hex";
/// Default image output file of the decoder
pub const DEFAULT_BMP_OUTPUT: &str = "output.bmp";
/// Default decoder width in pixels
pub const DEFAULT_WIDTH: u32 = 960;
/// Default decoder height in pixels
pub const DEFAULT_HEIGHT: u32 = 539;

/// Encoder configuration
#[derive(Debug, Clone)]
pub struct EncodeConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl EncodeConfig {
    /// Build from an image base name; `.bmp` is appended to locate the source.
    pub fn from_base_name(name: &str, output: impl Into<PathBuf>) -> Self {
        Self {
            input: PathBuf::from(format!("{}.bmp", name)),
            output: output.into(),
        }
    }
}

/// Decoder configuration
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}
