// src/logo/circle.rs

use image::{imageops, imageops::FilterType, DynamicImage, GrayImage, Luma, Rgba, RgbaImage};

use crate::error::LogoError;

/// Inputs need at least this many pixels on each side.
pub const MIN_SIDE: u32 = 2;

/// Crop `img` to its centered square, resize to `size`×`size` and keep only
/// the inscribed circle. Pixels outside the circle are transparent black;
/// pixels inside are fully opaque whatever the source alpha was.
pub fn circle_crop(img: &DynamicImage, size: u32) -> Result<RgbaImage, LogoError> {
    let (width, height) = (img.width(), img.height());
    if width < MIN_SIDE || height < MIN_SIDE {
        return Err(LogoError::ImageTooSmall { width, height });
    }

    let rgba = img.to_rgba8();
    let m = width.min(height);
    let left = (width - m) / 2;
    let top = (height - m) / 2;
    let square = imageops::crop_imm(&rgba, left, top, m, m).to_image();

    // Same-size Lanczos is not bit-exact, so skip it to stay idempotent.
    let mut out = if m == size {
        square
    } else {
        imageops::resize(&square, size, size, FilterType::Lanczos3)
    };

    let mask = circle_mask(size);
    for (x, y, px) in out.enumerate_pixels_mut() {
        if mask.get_pixel(x, y).0[0] == 0 {
            *px = Rgba([0, 0, 0, 0]);
        } else {
            px.0[3] = u8::MAX;
        }
    }
    Ok(out)
}

/// `size`×`size` mask: 255 on the filled ellipse inscribed in
/// `(0, 0)..=(size-1, size-1)`, 0 elsewhere.
pub fn circle_mask(size: u32) -> GrayImage {
    GrayImage::from_fn(size, size, |x, y| {
        if in_circle(x, y, size) {
            Luma([u8::MAX])
        } else {
            Luma([0])
        }
    })
}

/// Integer point-in-circle test in doubled coordinates: centre and radius are
/// both `(size-1)/2`, so everything is scaled by 2 to avoid halves.
fn in_circle(x: u32, y: u32, size: u32) -> bool {
    let d = i64::from(size) - 1;
    let dx = 2 * i64::from(x) - d;
    let dy = 2 * i64::from(y) - d;
    dx * dx + dy * dy <= d * d
}
