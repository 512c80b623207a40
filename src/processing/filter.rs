// SPDX-License-Identifier: MPL-2.0
//! Stock convolution filters.
//!
//! Each filter is a pure `Image -> Image` function backed by a fixed integer
//! kernel with a divisor and offset, matching the classic filter set users
//! expect from photo editors. Borders are handled by clamping sample
//! coordinates to the image edge.

use image::{DynamicImage, RgbImage};

/// A fixed convolution kernel. `size` is the side length (3 or 5),
/// `weights` holds `size * size` entries in row-major order.
struct Kernel {
    size: u32,
    weights: &'static [i32],
    divisor: i32,
    offset: i32,
}

const BLUR: Kernel = Kernel {
    size: 5,
    #[rustfmt::skip]
    weights: &[
        1, 1, 1, 1, 1,
        1, 0, 0, 0, 1,
        1, 0, 0, 0, 1,
        1, 0, 0, 0, 1,
        1, 1, 1, 1, 1,
    ],
    divisor: 16,
    offset: 0,
};

const SHARPEN: Kernel = Kernel {
    size: 3,
    #[rustfmt::skip]
    weights: &[
        -2, -2, -2,
        -2, 32, -2,
        -2, -2, -2,
    ],
    divisor: 16,
    offset: 0,
};

const EDGE_ENHANCE: Kernel = Kernel {
    size: 3,
    #[rustfmt::skip]
    weights: &[
        -1, -1, -1,
        -1, 10, -1,
        -1, -1, -1,
    ],
    divisor: 2,
    offset: 0,
};

const EMBOSS: Kernel = Kernel {
    size: 3,
    #[rustfmt::skip]
    weights: &[
        -1, 0, 0,
         0, 1, 0,
         0, 0, 0,
    ],
    divisor: 1,
    offset: 128,
};

const SMOOTH: Kernel = Kernel {
    size: 3,
    #[rustfmt::skip]
    weights: &[
        1, 1, 1,
        1, 5, 1,
        1, 1, 1,
    ],
    divisor: 13,
    offset: 0,
};

const FIND_EDGES: Kernel = Kernel {
    size: 3,
    #[rustfmt::skip]
    weights: &[
        -1, -1, -1,
        -1,  8, -1,
        -1, -1, -1,
    ],
    divisor: 1,
    offset: 0,
};

/// The stock filter set, dispatched by name from the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockFilter {
    Blur,
    Sharpen,
    EdgeEnhance,
    Emboss,
    Smooth,
    FindEdges,
}

impl StockFilter {
    /// All stock filters in display order.
    pub const ALL: &'static [StockFilter] = &[
        StockFilter::Blur,
        StockFilter::Sharpen,
        StockFilter::EdgeEnhance,
        StockFilter::Emboss,
        StockFilter::Smooth,
        StockFilter::FindEdges,
    ];

    /// Stable identifier used for dispatch.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            StockFilter::Blur => "blur",
            StockFilter::Sharpen => "sharpen",
            StockFilter::EdgeEnhance => "edge-enhance",
            StockFilter::Emboss => "emboss",
            StockFilter::Smooth => "smooth",
            StockFilter::FindEdges => "find-edges",
        }
    }

    /// Looks a filter up by its stable identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    fn kernel(self) -> &'static Kernel {
        match self {
            StockFilter::Blur => &BLUR,
            StockFilter::Sharpen => &SHARPEN,
            StockFilter::EdgeEnhance => &EDGE_ENHANCE,
            StockFilter::Emboss => &EMBOSS,
            StockFilter::Smooth => &SMOOTH,
            StockFilter::FindEdges => &FIND_EDGES,
        }
    }

    /// Applies the filter, producing a new image.
    #[must_use]
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        let rgb = image.to_rgb8();
        DynamicImage::ImageRgb8(convolve_rgb(&rgb, self.kernel()))
    }
}

/// Smooths an image with the 3x3 smooth kernel. Used both as the Smooth
/// filter and as the degenerate image for the sharpness enhancer.
#[must_use]
pub(crate) fn smooth_rgb(image: &RgbImage) -> RgbImage {
    convolve_rgb(image, &SMOOTH)
}

fn convolve_rgb(image: &RgbImage, kernel: &Kernel) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let half = (kernel.size / 2) as i64;
    let mut output = RgbImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut sums = [0i64; 3];
            for ky in 0..kernel.size {
                for kx in 0..kernel.size {
                    let weight = i64::from(kernel.weights[(ky * kernel.size + kx) as usize]);
                    if weight == 0 {
                        continue;
                    }
                    let sx = (i64::from(x) + i64::from(kx) - half).clamp(0, i64::from(width) - 1);
                    let sy = (i64::from(y) + i64::from(ky) - half).clamp(0, i64::from(height) - 1);
                    let pixel = image.get_pixel(sx as u32, sy as u32);
                    for c in 0..3 {
                        sums[c] += weight * i64::from(pixel.0[c]);
                    }
                }
            }
            let mut out = [0u8; 3];
            for c in 0..3 {
                let value = sums[c] as f32 / kernel.divisor as f32 + kernel.offset as f32;
                out[c] = value.round().clamp(0.0, 255.0) as u8;
            }
            output.put_pixel(x, y, image::Rgb(out));
        }
    }
    output
}
