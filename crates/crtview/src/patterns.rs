//! Built-in test patterns shown when no image is supplied on the command
//! line. Both are 256x240, the native resolution of the consoles this viewer
//! is tuned for.

use image::{Rgba, RgbaImage};

pub const PATTERN_WIDTH: u32 = 256;
pub const PATTERN_HEIGHT: u32 = 240;

/// Vertical colour bars with a greyscale ramp along the bottom quarter.
pub fn color_bars() -> RgbaImage {
    const BARS: [[u8; 3]; 8] = [
        [255, 255, 255],
        [255, 255, 0],
        [0, 255, 255],
        [0, 255, 0],
        [255, 0, 255],
        [255, 0, 0],
        [0, 0, 255],
        [16, 16, 16],
    ];

    RgbaImage::from_fn(PATTERN_WIDTH, PATTERN_HEIGHT, |x, y| {
        if y >= PATTERN_HEIGHT * 3 / 4 {
            let level = (x * 255 / (PATTERN_WIDTH - 1)) as u8;
            Rgba([level, level, level, 255])
        } else {
            let bar = (x as usize * BARS.len() / PATTERN_WIDTH as usize).min(BARS.len() - 1);
            let [r, g, b] = BARS[bar];
            Rgba([r, g, b, 255])
        }
    })
}

/// Single-pixel checkerboard with an 8-pixel alignment grid overlaid. Good
/// for judging scanline and mask behaviour at the pixel level.
pub fn checker_grid() -> RgbaImage {
    RgbaImage::from_fn(PATTERN_WIDTH, PATTERN_HEIGHT, |x, y| {
        if x % 8 == 0 || y % 8 == 0 {
            Rgba([255, 64, 64, 255])
        } else if (x + y) % 2 == 0 {
            Rgba([224, 224, 224, 255])
        } else {
            Rgba([32, 32, 32, 255])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_have_native_resolution() {
        for pattern in [color_bars(), checker_grid()] {
            assert_eq!(pattern.dimensions(), (PATTERN_WIDTH, PATTERN_HEIGHT));
        }
    }

    #[test]
    fn color_bars_are_opaque() {
        assert!(color_bars().pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn checker_grid_alternates_off_the_grid_lines() {
        let image = checker_grid();
        assert_ne!(image.get_pixel(1, 2), image.get_pixel(2, 2));
    }
}
