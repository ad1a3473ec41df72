//! Scanline traversal order shared by the encoder and decoder.
//!
//! BMP files store the bottom row first, so the flattened byte sequence walks
//! rows from `height - 1` down to `0`, each row left to right.

/// Yield `(x, y)` pixel coordinates in flattened order.
pub fn scanline_order(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..height)
        .rev()
        .flat_map(move |y| (0..width).map(move |x| (x, y)))
}

/// Number of bytes in the flattened sequence for a `width` x `height` image,
/// or `None` on overflow.
pub fn flattened_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(3)
}
