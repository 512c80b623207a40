// SPDX-License-Identifier: MPL-2.0
//! Enhancement primitives for the adjustment sliders.
//!
//! Each enhancer interpolates between the image and a "degenerate" version
//! of it: `out = degenerate + factor * (image - degenerate)`, clamped to
//! [0, 255]. A factor of 1.0 is the identity, 0.0 yields the degenerate
//! image, and values above 1.0 push past the original.
//!
//! Degenerate images per enhancer:
//! - brightness: black
//! - contrast: uniform gray at the mean luma
//! - saturation: the grayscale rendition
//! - sharpness: a 3x3-smoothed copy

use crate::processing::filter::smooth_rgb;
use image::{DynamicImage, Rgb, RgbImage};

/// ITU-R 601-2 luma for an RGB triple.
#[inline]
fn luma(pixel: &Rgb<u8>) -> f32 {
    0.299 * f32::from(pixel.0[0]) + 0.587 * f32::from(pixel.0[1]) + 0.114 * f32::from(pixel.0[2])
}

#[inline]
fn lerp_channel(degenerate: f32, value: f32, factor: f32) -> u8 {
    (degenerate + factor * (value - degenerate))
        .round()
        .clamp(0.0, 255.0) as u8
}

fn interpolate(degenerate: &RgbImage, image: &RgbImage, factor: f32) -> RgbImage {
    let mut output = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let deg = degenerate.get_pixel(x, y);
        let mut out = [0u8; 3];
        for c in 0..3 {
            out[c] = lerp_channel(f32::from(deg.0[c]), f32::from(pixel.0[c]), factor);
        }
        output.put_pixel(x, y, Rgb(out));
    }
    output
}

/// Scales brightness: the degenerate image is black, so every channel is
/// multiplied by the factor.
#[must_use]
pub fn brightness(image: &DynamicImage, factor: f32) -> DynamicImage {
    if factor == 1.0 {
        return image.clone();
    }
    let rgb = image.to_rgb8();
    let black = RgbImage::new(rgb.width(), rgb.height());
    DynamicImage::ImageRgb8(interpolate(&black, &rgb, factor))
}

/// Scales contrast around the image's mean luma.
#[must_use]
pub fn contrast(image: &DynamicImage, factor: f32) -> DynamicImage {
    if factor == 1.0 {
        return image.clone();
    }
    let rgb = image.to_rgb8();
    let pixel_count = u64::from(rgb.width()) * u64::from(rgb.height());
    if pixel_count == 0 {
        return image.clone();
    }
    let total: f64 = rgb.pixels().map(|p| f64::from(luma(p))).sum();
    let mean = (total / pixel_count as f64 + 0.5).floor().clamp(0.0, 255.0) as u8;
    let gray = RgbImage::from_pixel(rgb.width(), rgb.height(), Rgb([mean; 3]));
    DynamicImage::ImageRgb8(interpolate(&gray, &rgb, factor))
}

/// Scales color saturation: the degenerate image is the grayscale rendition.
#[must_use]
pub fn saturation(image: &DynamicImage, factor: f32) -> DynamicImage {
    if factor == 1.0 {
        return image.clone();
    }
    let rgb = image.to_rgb8();
    let mut gray = RgbImage::new(rgb.width(), rgb.height());
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let l = luma(pixel).round().clamp(0.0, 255.0) as u8;
        gray.put_pixel(x, y, Rgb([l; 3]));
    }
    DynamicImage::ImageRgb8(interpolate(&gray, &rgb, factor))
}

/// Scales sharpness: the degenerate image is a 3x3-smoothed copy, so factors
/// below 1.0 soften and factors above 1.0 sharpen.
#[must_use]
pub fn sharpness(image: &DynamicImage, factor: f32) -> DynamicImage {
    if factor == 1.0 {
        return image.clone();
    }
    let rgb = image.to_rgb8();
    let smoothed = smooth_rgb(&rgb);
    DynamicImage::ImageRgb8(interpolate(&smoothed, &rgb, factor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, value: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(value)))
    }

    #[test]
    fn brightness_identity_factor_is_noop() {
        let img = uniform(4, 4, [120, 60, 30]);
        let out = brightness(&img, 1.0).to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [120, 60, 30]);
    }

    #[test]
    fn brightness_zero_factor_is_black() {
        let img = uniform(4, 4, [120, 60, 30]);
        let out = brightness(&img, 0.0).to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn brightness_scales_channels() {
        let img = uniform(2, 2, [100, 50, 10]);
        let out = brightness(&img, 2.0).to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [200, 100, 20]);
    }

    #[test]
    fn brightness_clamps_at_white() {
        let img = uniform(2, 2, [200, 200, 200]);
        let out = brightness(&img, 3.0).to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn contrast_zero_factor_flattens_to_mean() {
        let mut buffer = RgbImage::new(2, 1);
        buffer.put_pixel(0, 0, Rgb([0, 0, 0]));
        buffer.put_pixel(1, 0, Rgb([200, 200, 200]));
        let out = contrast(&DynamicImage::ImageRgb8(buffer), 0.0).to_rgb8();
        // Mean luma of {0, 200} is 100; both pixels collapse to it.
        assert_eq!(out.get_pixel(0, 0).0, [100, 100, 100]);
        assert_eq!(out.get_pixel(1, 0).0, [100, 100, 100]);
    }

    #[test]
    fn contrast_above_one_spreads_values_apart() {
        let mut buffer = RgbImage::new(2, 1);
        buffer.put_pixel(0, 0, Rgb([80, 80, 80]));
        buffer.put_pixel(1, 0, Rgb([120, 120, 120]));
        let out = contrast(&DynamicImage::ImageRgb8(buffer), 2.0).to_rgb8();
        assert!(out.get_pixel(0, 0).0[0] < 80);
        assert!(out.get_pixel(1, 0).0[0] > 120);
    }

    #[test]
    fn saturation_zero_factor_is_grayscale() {
        let img = uniform(2, 2, [200, 0, 0]);
        let out = saturation(&img, 0.0).to_rgb8();
        let pixel = out.get_pixel(0, 0).0;
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
        // 0.299 * 200 = 59.8 -> 60
        assert_eq!(pixel[0], 60);
    }

    #[test]
    fn saturation_leaves_gray_pixels_alone() {
        let img = uniform(3, 3, [128, 128, 128]);
        let out = saturation(&img, 3.0).to_rgb8();
        assert_eq!(out.get_pixel(1, 1).0, [128, 128, 128]);
    }

    #[test]
    fn sharpness_identity_on_uniform_image() {
        // Smoothing a flat image is a no-op, so any factor is the identity.
        let img = uniform(5, 5, [90, 90, 90]);
        let out = sharpness(&img, 2.5).to_rgb8();
        assert_eq!(out.get_pixel(2, 2).0, [90, 90, 90]);
    }

    #[test]
    fn sharpness_above_one_amplifies_a_spike() {
        let mut buffer = RgbImage::from_pixel(5, 5, Rgb([100u8; 3]));
        buffer.put_pixel(2, 2, Rgb([140; 3]));
        let img = DynamicImage::ImageRgb8(buffer);
        let soft = sharpness(&img, 0.0).to_rgb8();
        let sharp = sharpness(&img, 2.0).to_rgb8();
        assert!(soft.get_pixel(2, 2).0[0] < 140);
        assert!(sharp.get_pixel(2, 2).0[0] > 140);
    }
}
