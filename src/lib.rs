//! Convert 24-bit BMP images to one-byte-per-line hex text and back.
//!
//! Both directions share one byte order: scanlines from bottom to top, pixels
//! left to right, channels red, green, blue.

pub mod bmp_header;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod hex;
pub mod logging;
pub mod pipeline;
pub mod traversal;

pub use config::{DecodeConfig, EncodeConfig};
