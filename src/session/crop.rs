// SPDX-License-Identifier: MPL-2.0
//! Crop rectangles and aspect-ratio templates.
//!
//! A [`CropRect`] is always expressed in image pixel coordinates, clamped to
//! the image bounds. Templates produce the largest centered rectangle of a
//! fixed aspect ratio that fits the image.

/// An axis-aligned crop rectangle in image coordinates.
///
/// `x1 <= x2` and `y1 <= y2` always hold; the right and bottom edges are
/// exclusive, so `width = x2 - x1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropRect {
    /// Builds a rectangle from two opposite corners in image space,
    /// normalizing corner order and clamping to the image bounds.
    /// Fractional coordinates are truncated.
    #[must_use]
    pub fn from_corners(
        ax: f32,
        ay: f32,
        bx: f32,
        by: f32,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        let clamp_x = |v: f32| v.max(0.0).min(image_width as f32) as u32;
        let clamp_y = |v: f32| v.max(0.0).min(image_height as f32) as u32;
        Self {
            x1: clamp_x(ax.min(bx)),
            y1: clamp_y(ay.min(by)),
            x2: clamp_x(ax.max(bx)),
            y2: clamp_y(ay.max(by)),
        }
    }

    /// The largest centered rectangle of the given size that fits the image.
    /// Oversized requests are clamped to the image dimensions.
    #[must_use]
    pub fn centered_with_size(
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        let width = width.min(image_width);
        let height = height.min(image_height);
        let x1 = (image_width - width) / 2;
        let y1 = (image_height - height) / 2;
        Self {
            x1,
            y1,
            x2: x1 + width,
            y2: y1 + height,
        }
    }

    /// The largest centered rectangle with aspect ratio `ratio_w : ratio_h`
    /// that fits the image: one dimension spans the image, the other is
    /// derived from the ratio.
    #[must_use]
    pub fn centered_with_ratio(
        ratio_w: u32,
        ratio_h: u32,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        // Cross-multiplied aspect comparison, no float involved:
        // image wider than the ratio <=> img_w / img_h > ratio_w / ratio_h.
        let image_wider =
            u64::from(image_width) * u64::from(ratio_h) > u64::from(ratio_w) * u64::from(image_height);
        let (width, height) = if image_wider {
            let width = u64::from(image_height) * u64::from(ratio_w) / u64::from(ratio_h);
            (width as u32, image_height)
        } else {
            let height = u64::from(image_width) * u64::from(ratio_h) / u64::from(ratio_w);
            (image_width, height as u32)
        };
        Self::centered_with_size(width, height, image_width, image_height)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// True when the rectangle encloses no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Predefined aspect-ratio crop templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropTemplate {
    Square,
    Portrait,
    Landscape,
    InstagramPost,
    InstagramStory,
    FacebookCover,
    TwitterHeader,
    YouTubeThumbnail,
}

impl CropTemplate {
    /// All templates in display order.
    pub const ALL: &'static [CropTemplate] = &[
        CropTemplate::Square,
        CropTemplate::Portrait,
        CropTemplate::Landscape,
        CropTemplate::InstagramPost,
        CropTemplate::InstagramStory,
        CropTemplate::FacebookCover,
        CropTemplate::TwitterHeader,
        CropTemplate::YouTubeThumbnail,
    ];

    /// The template's aspect ratio as `(width, height)`.
    #[must_use]
    pub fn ratio(self) -> (u32, u32) {
        match self {
            CropTemplate::Square | CropTemplate::InstagramPost => (1, 1),
            CropTemplate::Portrait => (4, 5),
            CropTemplate::Landscape | CropTemplate::FacebookCover | CropTemplate::YouTubeThumbnail => {
                (16, 9)
            }
            CropTemplate::InstagramStory => (9, 16),
            CropTemplate::TwitterHeader => (3, 1),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CropTemplate::Square => "Square (1:1)",
            CropTemplate::Portrait => "Portrait (4:5)",
            CropTemplate::Landscape => "Landscape (16:9)",
            CropTemplate::InstagramPost => "Instagram Post (1:1)",
            CropTemplate::InstagramStory => "Instagram Story (9:16)",
            CropTemplate::FacebookCover => "Facebook Cover (16:9)",
            CropTemplate::TwitterHeader => "Twitter Header (3:1)",
            CropTemplate::YouTubeThumbnail => "YouTube Thumbnail (16:9)",
        }
    }

    /// The template's centered rectangle for an image of the given size.
    #[must_use]
    pub fn fit(self, image_width: u32, image_height: u32) -> CropRect {
        let (rw, rh) = self.ratio();
        CropRect::centered_with_ratio(rw, rh, image_width, image_height)
    }
}
