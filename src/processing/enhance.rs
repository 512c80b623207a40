// SPDX-License-Identifier: MPL-2.0
//! Advanced enhancement operations.
//!
//! These are the "one click" corrections: contrast-limited adaptive histogram
//! equalization (auto enhance), global histogram equalization, non-local-means
//! noise reduction, and gray-world color balance. The luma-based operations
//! work on the Y channel of a YCbCr decomposition and leave chroma untouched.
//! All of them are deterministic: the same input always yields the same bytes.

use image::{DynamicImage, Rgb, RgbImage};

/// CLAHE clip limit (relative, scaled by tile area / 256).
const CLAHE_CLIP_LIMIT: f32 = 3.0;
/// CLAHE tile grid side length.
const CLAHE_TILE_GRID: u32 = 8;

/// Non-local-means filtering strength.
const NLM_STRENGTH: f32 = 10.0;
/// Non-local-means patch radius (7x7 patches).
const NLM_PATCH_RADIUS: i64 = 3;
/// Non-local-means search window radius (21x21 window).
const NLM_SEARCH_RADIUS: i64 = 10;

/// The advanced operations, dispatched by name from the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvancedOp {
    AutoEnhance,
    NoiseReduction,
    HistogramEqualization,
    ColorBalance,
}

impl AdvancedOp {
    /// All advanced operations in display order.
    pub const ALL: &'static [AdvancedOp] = &[
        AdvancedOp::AutoEnhance,
        AdvancedOp::NoiseReduction,
        AdvancedOp::HistogramEqualization,
        AdvancedOp::ColorBalance,
    ];

    /// Stable identifier used for dispatch.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AdvancedOp::AutoEnhance => "auto-enhance",
            AdvancedOp::NoiseReduction => "noise-reduction",
            AdvancedOp::HistogramEqualization => "histogram-equalization",
            AdvancedOp::ColorBalance => "color-balance",
        }
    }

    /// Looks an operation up by its stable identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// Applies the operation, producing a new image.
    #[must_use]
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        match self {
            AdvancedOp::AutoEnhance => auto_enhance(image),
            AdvancedOp::NoiseReduction => noise_reduction(image),
            AdvancedOp::HistogramEqualization => histogram_equalization(image),
            AdvancedOp::ColorBalance => color_balance(image),
        }
    }
}

// ==========================================================================
// YCbCr helpers
// ==========================================================================

#[inline]
fn rgb_to_y(pixel: &Rgb<u8>) -> f32 {
    let [r, g, b] = pixel.0.map(f32::from);
    0.299 * r + 0.587 * g + 0.114 * b
}

#[inline]
fn rgb_to_cbcr(pixel: &Rgb<u8>) -> (f32, f32) {
    let [r, g, b] = pixel.0.map(f32::from);
    let cb = 128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b;
    (cb, cr)
}

#[inline]
fn ycbcr_to_rgb(y: f32, cb: f32, cr: f32) -> Rgb<u8> {
    let r = y + 1.402 * (cr - 128.0);
    let g = y - 0.344_136 * (cb - 128.0) - 0.714_136 * (cr - 128.0);
    let b = y + 1.772 * (cb - 128.0);
    Rgb([r, g, b].map(|v| v.round().clamp(0.0, 255.0) as u8))
}

/// Extracts the quantized luma plane.
fn luma_plane(rgb: &RgbImage) -> Vec<u8> {
    rgb.pixels()
        .map(|p| rgb_to_y(p).round().clamp(0.0, 255.0) as u8)
        .collect()
}

/// Rebuilds an RGB image from a new luma plane, preserving each pixel's
/// original chroma.
fn replace_luma(rgb: &RgbImage, new_luma: &[u8]) -> RgbImage {
    let mut output = RgbImage::new(rgb.width(), rgb.height());
    for (i, (x, y, pixel)) in rgb.enumerate_pixels().enumerate() {
        let (cb, cr) = rgb_to_cbcr(pixel);
        output.put_pixel(x, y, ycbcr_to_rgb(f32::from(new_luma[i]), cb, cr));
    }
    output
}

// ==========================================================================
// Gray-world color balance
// ==========================================================================

/// Automatic color balance under the gray-world assumption.
///
/// Per-channel means are computed, each channel is scaled by
/// `gray / mean_channel` where `gray` is the mean of the three means
/// (scale 1 when a channel mean is zero), and results are clipped to
/// [0, 255] and rounded to nearest.
#[must_use]
pub fn color_balance(image: &DynamicImage) -> DynamicImage {
    let rgb = image.to_rgb8();
    let pixel_count = u64::from(rgb.width()) * u64::from(rgb.height());
    if pixel_count == 0 {
        return image.clone();
    }

    let mut sums = [0u64; 3];
    for pixel in rgb.pixels() {
        for c in 0..3 {
            sums[c] += u64::from(pixel.0[c]);
        }
    }
    let means = sums.map(|s| s as f32 / pixel_count as f32);
    let gray = (means[0] + means[1] + means[2]) / 3.0;
    let scales = means.map(|m| if m > 0.0 { gray / m } else { 1.0 });

    let mut output = RgbImage::new(rgb.width(), rgb.height());
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let mut out = [0u8; 3];
        for c in 0..3 {
            out[c] = (f32::from(pixel.0[c]) * scales[c]).round().clamp(0.0, 255.0) as u8;
        }
        output.put_pixel(x, y, Rgb(out));
    }
    DynamicImage::ImageRgb8(output)
}

// ==========================================================================
// Histogram equalization
// ==========================================================================

/// Global histogram equalization of the luma channel; chroma is preserved.
#[must_use]
pub fn histogram_equalization(image: &DynamicImage) -> DynamicImage {
    let rgb = image.to_rgb8();
    let luma = luma_plane(&rgb);
    if luma.is_empty() {
        return image.clone();
    }

    let mut histogram = [0u64; 256];
    for &value in &luma {
        histogram[value as usize] += 1;
    }

    let total = luma.len() as u64;
    let cdf_min = histogram
        .iter()
        .scan(0u64, |acc, &count| {
            *acc += count;
            Some(*acc)
        })
        .find(|&cum| cum > 0)
        .unwrap_or(0);
    if total == cdf_min {
        // Single-valued image; equalization is undefined, leave it alone.
        return image.clone();
    }

    let mut lut = [0u8; 256];
    let mut cumulative = 0u64;
    let denom = (total - cdf_min) as f64;
    for (value, &count) in histogram.iter().enumerate() {
        cumulative += count;
        let mapped = if cumulative >= cdf_min {
            ((cumulative - cdf_min) as f64 / denom * 255.0).round()
        } else {
            0.0
        };
        lut[value] = mapped.clamp(0.0, 255.0) as u8;
    }

    let equalized: Vec<u8> = luma.iter().map(|&v| lut[v as usize]).collect();
    DynamicImage::ImageRgb8(replace_luma(&rgb, &equalized))
}

// ==========================================================================
// CLAHE auto enhance
// ==========================================================================

/// Automatic enhancement via contrast-limited adaptive histogram
/// equalization (clip limit 3.0, 8x8 tile grid) of the luma channel.
#[must_use]
pub fn auto_enhance(image: &DynamicImage) -> DynamicImage {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let luma = luma_plane(&rgb);
    let enhanced = clahe_plane(&luma, width, height);
    DynamicImage::ImageRgb8(replace_luma(&rgb, &enhanced))
}

/// Applies CLAHE to a single 8-bit plane.
fn clahe_plane(plane: &[u8], width: u32, height: u32) -> Vec<u8> {
    let tiles_x = CLAHE_TILE_GRID.min(width).max(1);
    let tiles_y = CLAHE_TILE_GRID.min(height).max(1);
    let tile_w = width.div_ceil(tiles_x);
    let tile_h = height.div_ceil(tiles_y);
    let grid_x = width.div_ceil(tile_w);
    let grid_y = height.div_ceil(tile_h);

    // One clipped-and-equalized lookup table per tile.
    let mut luts = vec![[0u8; 256]; (grid_x * grid_y) as usize];
    for ty in 0..grid_y {
        for tx in 0..grid_x {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = (x0 + tile_w).min(width);
            let y1 = (y0 + tile_h).min(height);

            let mut histogram = [0u64; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    histogram[plane[(y * width + x) as usize] as usize] += 1;
                }
            }
            let area = u64::from(x1 - x0) * u64::from(y1 - y0);
            clip_histogram(&mut histogram, area);

            let lut = &mut luts[(ty * grid_x + tx) as usize];
            let mut cumulative = 0u64;
            for (value, &count) in histogram.iter().enumerate() {
                cumulative += count;
                lut[value] = (cumulative as f64 * 255.0 / area as f64).round().min(255.0) as u8;
            }
        }
    }

    // Bilinear interpolation between the four surrounding tile mappings.
    let mut output = vec![0u8; plane.len()];
    for y in 0..height {
        let py = (f64::from(y) + 0.5) / f64::from(tile_h) - 0.5;
        let ty0 = py.floor().max(0.0) as u32;
        let ty0 = ty0.min(grid_y - 1);
        let ty1 = (ty0 + 1).min(grid_y - 1);
        let wy = (py - py.floor()).clamp(0.0, 1.0);
        let wy = if py < 0.0 { 0.0 } else { wy };

        for x in 0..width {
            let px = (f64::from(x) + 0.5) / f64::from(tile_w) - 0.5;
            let tx0 = px.floor().max(0.0) as u32;
            let tx0 = tx0.min(grid_x - 1);
            let tx1 = (tx0 + 1).min(grid_x - 1);
            let wx = (px - px.floor()).clamp(0.0, 1.0);
            let wx = if px < 0.0 { 0.0 } else { wx };

            let value = plane[(y * width + x) as usize] as usize;
            let v00 = f64::from(luts[(ty0 * grid_x + tx0) as usize][value]);
            let v01 = f64::from(luts[(ty0 * grid_x + tx1) as usize][value]);
            let v10 = f64::from(luts[(ty1 * grid_x + tx0) as usize][value]);
            let v11 = f64::from(luts[(ty1 * grid_x + tx1) as usize][value]);

            let top = v00 * (1.0 - wx) + v01 * wx;
            let bottom = v10 * (1.0 - wx) + v11 * wx;
            let blended = top * (1.0 - wy) + bottom * wy;
            output[(y * width + x) as usize] = blended.round().clamp(0.0, 255.0) as u8;
        }
    }
    output
}

/// Clips histogram bins at the scaled clip limit and redistributes the
/// excess evenly across all bins.
fn clip_histogram(histogram: &mut [u64; 256], area: u64) {
    let limit = ((CLAHE_CLIP_LIMIT * area as f32 / 256.0) as u64).max(1);
    let mut excess = 0u64;
    for count in histogram.iter_mut() {
        if *count > limit {
            excess += *count - limit;
            *count = limit;
        }
    }
    let share = excess / 256;
    let mut remainder = (excess % 256) as usize;
    for count in histogram.iter_mut() {
        *count += share;
        if remainder > 0 {
            *count += 1;
            remainder -= 1;
        }
    }
}

// ==========================================================================
// Non-local-means noise reduction
// ==========================================================================

/// Noise reduction via non-local-means averaging (strength 10, 7x7 patches,
/// 21x21 search window). Patch similarity is measured on luma; the weighted
/// average is applied to all three channels.
#[must_use]
pub fn noise_reduction(image: &DynamicImage) -> DynamicImage {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let luma: Vec<f32> = rgb.pixels().map(rgb_to_y).collect();
    let w = i64::from(width);
    let h = i64::from(height);
    let sample = |x: i64, y: i64| -> f32 {
        let x = x.clamp(0, w - 1);
        let y = y.clamp(0, h - 1);
        luma[(y * w + x) as usize]
    };

    let patch_area = {
        let side = 2 * NLM_PATCH_RADIUS + 1;
        (side * side) as f32
    };
    let h2 = NLM_STRENGTH * NLM_STRENGTH;

    let mut output = RgbImage::new(width, height);
    for y in 0..h {
        for x in 0..w {
            let mut weight_sum = 0.0f32;
            let mut acc = [0.0f32; 3];
            for qy in (y - NLM_SEARCH_RADIUS)..=(y + NLM_SEARCH_RADIUS) {
                for qx in (x - NLM_SEARCH_RADIUS)..=(x + NLM_SEARCH_RADIUS) {
                    let mut distance = 0.0f32;
                    for dy in -NLM_PATCH_RADIUS..=NLM_PATCH_RADIUS {
                        for dx in -NLM_PATCH_RADIUS..=NLM_PATCH_RADIUS {
                            let diff = sample(x + dx, y + dy) - sample(qx + dx, qy + dy);
                            distance += diff * diff;
                        }
                    }
                    let weight = (-distance / (patch_area * h2)).exp();
                    let source = rgb.get_pixel(
                        qx.clamp(0, w - 1) as u32,
                        qy.clamp(0, h - 1) as u32,
                    );
                    for c in 0..3 {
                        acc[c] += weight * f32::from(source.0[c]);
                    }
                    weight_sum += weight;
                }
            }
            let mut out = [0u8; 3];
            for c in 0..3 {
                out[c] = (acc[c] / weight_sum).round().clamp(0.0, 255.0) as u8;
            }
            output.put_pixel(x as u32, y as u32, Rgb(out));
        }
    }
    DynamicImage::ImageRgb8(output)
}
