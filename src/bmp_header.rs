//! Minimal BMP header inspection.
//!
//! The `image` crate expands indexed BMPs to RGB, which hides whether the file
//! is really a single-channel grayscale bitmap. This reads just enough of the
//! file header, the DIB header and the color table to tell.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Cursor, Read, Seek, SeekFrom};

const FILE_HEADER_LEN: u64 = 14;
const CORE_HEADER_LEN: u32 = 12;
const MAX_PALETTE_LEN: u32 = 256;

/// Bit depth and color table of a BMP file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpInfo {
    pub bits_per_pixel: u16,
    /// Color table entries as (red, green, blue)
    pub palette: Vec<[u8; 3]>,
}

impl BmpInfo {
    /// Parse the headers at the start of `bytes`.
    ///
    /// Returns `None` when the data is not a BMP or the headers are truncated;
    /// the image decoder reports those cases itself.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if !bytes.starts_with(b"BM") {
            return None;
        }
        read_info(&mut Cursor::new(bytes)).ok()
    }

    /// True for 1, 4 or 8 bit images whose color table is the identity gray
    /// ramp (or exactly black and white for two-entry tables).
    pub fn is_grayscale(&self) -> bool {
        if !matches!(self.bits_per_pixel, 1 | 4 | 8) || self.palette.is_empty() {
            return false;
        }
        if self.palette.len() == 2 {
            return self.palette[0] == [0; 3] && self.palette[1] == [255; 3];
        }
        self.palette
            .iter()
            .enumerate()
            .all(|(idx, rgb)| rgb.iter().all(|&c| c as usize == idx))
    }
}

fn read_info<R: Read + Seek>(reader: &mut R) -> io::Result<BmpInfo> {
    reader.seek(SeekFrom::Start(FILE_HEADER_LEN))?;
    let header_len = reader.read_u32::<LittleEndian>()?;

    let (bits_per_pixel, colors_used, entry_len) = if header_len == CORE_HEADER_LEN {
        let _width = reader.read_u16::<LittleEndian>()?;
        let _height = reader.read_u16::<LittleEndian>()?;
        let _planes = reader.read_u16::<LittleEndian>()?;
        (reader.read_u16::<LittleEndian>()?, 0, 3)
    } else {
        let _width = reader.read_i32::<LittleEndian>()?;
        let _height = reader.read_i32::<LittleEndian>()?;
        let _planes = reader.read_u16::<LittleEndian>()?;
        let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
        let _compression = reader.read_u32::<LittleEndian>()?;
        let _image_len = reader.read_u32::<LittleEndian>()?;
        let _x_ppm = reader.read_i32::<LittleEndian>()?;
        let _y_ppm = reader.read_i32::<LittleEndian>()?;
        (bits_per_pixel, reader.read_u32::<LittleEndian>()?, 4)
    };

    let mut palette = Vec::new();
    if matches!(bits_per_pixel, 1 | 4 | 8) {
        let count = if colors_used == 0 {
            1u32 << bits_per_pixel
        } else {
            colors_used
        };
        if count > MAX_PALETTE_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("color table of {} entries", count),
            ));
        }

        reader.seek(SeekFrom::Start(FILE_HEADER_LEN + header_len as u64))?;
        let mut entry = [0u8; 4];
        for _ in 0..count {
            reader.read_exact(&mut entry[..entry_len])?;
            // Stored blue, green, red
            palette.push([entry[2], entry[1], entry[0]]);
        }
    }

    Ok(BmpInfo {
        bits_per_pixel,
        palette,
    })
}
