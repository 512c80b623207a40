// SPDX-License-Identifier: MPL-2.0
//! Geometric transforms: rotate, flip, crop, and resize.

use image::{imageops::FilterType, DynamicImage, GenericImageView, Rgb, RgbImage};

/// Rotate an image 90 degrees counter-clockwise (left).
pub fn rotate_left(image: &DynamicImage) -> DynamicImage {
    image.rotate270()
}

/// Rotate an image 90 degrees clockwise (right).
pub fn rotate_right(image: &DynamicImage) -> DynamicImage {
    image.rotate90()
}

/// Flip an image horizontally (mirror left-to-right).
pub fn flip_horizontal(image: &DynamicImage) -> DynamicImage {
    image.fliph()
}

/// Flip an image vertically (mirror top-to-bottom).
pub fn flip_vertical(image: &DynamicImage) -> DynamicImage {
    image.flipv()
}

/// Rotate an image counter-clockwise by an arbitrary angle in degrees.
///
/// The canvas expands to hold the whole rotated image; uncovered corners are
/// filled with white. Sampling is nearest-neighbor, so exact multiples of 90
/// degrees stay pixel-exact.
pub fn rotate_by_angle(image: &DynamicImage, degrees: f32) -> DynamicImage {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let (sin, cos) = degrees.to_radians().sin_cos();
    let (w, h) = (width as f32, height as f32);
    let new_w = (w * cos.abs() + h * sin.abs()).round().max(1.0) as u32;
    let new_h = (w * sin.abs() + h * cos.abs()).round().max(1.0) as u32;

    let (cx, cy) = (w / 2.0, h / 2.0);
    let (ncx, ncy) = (new_w as f32 / 2.0, new_h as f32 / 2.0);

    let mut output = RgbImage::from_pixel(new_w, new_h, Rgb([255, 255, 255]));
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - ncx;
        let dy = y as f32 + 0.5 - ncy;
        // Inverse rotation from output space back into source space.
        let sx = (cx + dx * cos - dy * sin).floor();
        let sy = (cy + dx * sin + dy * cos).floor();
        if sx >= 0.0 && sx < w && sy >= 0.0 && sy < h {
            *pixel = *rgb.get_pixel(sx as u32, sy as u32);
        }
    }
    DynamicImage::ImageRgb8(output)
}

/// Resize the image to exactly the provided dimensions using a high-quality
/// filter.
pub fn resize(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let width = width.max(1);
    let height = height.max(1);
    image.resize_exact(width, height, FilterType::Lanczos3)
}

/// Resize the image to fit within the provided bounds, preserving its aspect
/// ratio. Images that already fit are returned unchanged (shrink-only,
/// thumbnail semantics).
pub fn resize_to_fit(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let width = width.max(1);
    let height = height.max(1);
    if image.width() <= width && image.height() <= height {
        return image.clone();
    }
    image.resize(width, height, FilterType::Lanczos3)
}

/// Crop the image to the specified rectangle.
///
/// The rectangle coordinates are clamped to the image boundaries.
/// If the resulting crop area is invalid (zero width or height), returns None.
pub fn crop(image: &DynamicImage, x: u32, y: u32, width: u32, height: u32) -> Option<DynamicImage> {
    let img_width = image.width();
    let img_height = image.height();

    if img_width == 0 || img_height == 0 || width == 0 || height == 0 {
        return None;
    }
    if x >= img_width || y >= img_height {
        return None;
    }

    let width = width.min(img_width - x);
    let height = height.min(img_height - y);

    Some(image.crop_imm(x, y, width, height))
}
