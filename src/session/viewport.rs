// SPDX-License-Identifier: MPL-2.0
//! Viewport state: zoom and the in-progress crop selection drag.
//!
//! Display coordinates are image coordinates scaled by the zoom factor, with
//! the origin shared at the image's top-left corner. All selection geometry
//! is converted back to image space before it becomes a [`CropRect`].

use crate::session::crop::CropRect;

/// Zoom factor bounds and stepping.
pub mod zoom_bounds {
    /// Minimum zoom factor.
    pub const MIN: f32 = 0.1;
    /// Maximum zoom factor.
    pub const MAX: f32 = 10.0;
    /// Default zoom factor (1:1).
    pub const DEFAULT: f32 = 1.0;
    /// Multiplicative step per zoom in/out.
    pub const STEP: f32 = 1.2;
    /// Margin applied by fit-to-window so the image does not touch the
    /// window edges.
    pub const FIT_MARGIN: f32 = 0.9;
}

/// Minimum selection side length, in image pixels. A drag must exceed this
/// in both dimensions, after clamping to the image bounds, to produce a
/// crop rectangle.
pub const MIN_SELECTION_PX: u32 = 10;

/// A zoom factor, guaranteed to be within the valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Creates a new zoom factor, clamping to the valid range. Non-finite
    /// values fall back to the default.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if !value.is_finite() {
            return Self(zoom_bounds::DEFAULT);
        }
        Self(value.clamp(zoom_bounds::MIN, zoom_bounds::MAX))
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// One step zoomed in.
    #[must_use]
    pub fn zoomed_in(self) -> Self {
        Self::new(self.0 * zoom_bounds::STEP)
    }

    /// One step zoomed out.
    #[must_use]
    pub fn zoomed_out(self) -> Self {
        Self::new(self.0 / zoom_bounds::STEP)
    }

    /// The zoom that fits the whole image inside the given canvas with a
    /// small margin.
    #[must_use]
    pub fn fit_to_window(canvas_w: u32, canvas_h: u32, image_w: u32, image_h: u32) -> Self {
        if image_w == 0 || image_h == 0 || canvas_w == 0 || canvas_h == 0 {
            return Self::default();
        }
        let ratio_w = canvas_w as f32 / image_w as f32;
        let ratio_h = canvas_h as f32 / image_h as f32;
        Self::new(ratio_w.min(ratio_h) * zoom_bounds::FIT_MARGIN)
    }

    /// Converts a display-space coordinate to image space.
    #[must_use]
    pub fn display_to_image(self, value: f32) -> f32 {
        value / self.0
    }

    /// Converts an image-space coordinate to display space.
    #[must_use]
    pub fn image_to_display(self, value: f32) -> f32 {
        value * self.0
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(zoom_bounds::DEFAULT)
    }
}

/// The crop selection drag, driven by press/move/release events in display
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectionDrag {
    #[default]
    Idle,
    Dragging {
        start_x: f32,
        start_y: f32,
        current_x: f32,
        current_y: f32,
    },
}

impl SelectionDrag {
    /// Starts a drag at the given display position.
    pub fn begin(&mut self, x: f32, y: f32) {
        *self = SelectionDrag::Dragging {
            start_x: x,
            start_y: y,
            current_x: x,
            current_y: y,
        };
    }

    /// Moves the free corner of an in-progress drag. Ignored while idle.
    pub fn update(&mut self, x: f32, y: f32) {
        if let SelectionDrag::Dragging {
            current_x,
            current_y,
            ..
        } = self
        {
            *current_x = x;
            *current_y = y;
        }
    }

    /// Ends the drag at the given display position and converts it to an
    /// image-space rectangle.
    ///
    /// The corners are clamped to the image bounds first; the rectangle is
    /// then discarded (`None`) when either clamped side is not strictly
    /// larger than [`MIN_SELECTION_PX`] image pixels (treated as an
    /// accidental click). Also returns `None` while idle. The drag returns
    /// to idle either way.
    pub fn finish(
        &mut self,
        x: f32,
        y: f32,
        zoom: ZoomFactor,
        image_w: u32,
        image_h: u32,
    ) -> Option<CropRect> {
        let SelectionDrag::Dragging { start_x, start_y, .. } = *self else {
            return None;
        };
        *self = SelectionDrag::Idle;

        let rect = CropRect::from_corners(
            zoom.display_to_image(start_x),
            zoom.display_to_image(start_y),
            zoom.display_to_image(x),
            zoom.display_to_image(y),
            image_w,
            image_h,
        );
        if rect.width() <= MIN_SELECTION_PX || rect.height() <= MIN_SELECTION_PX {
            return None;
        }
        Some(rect)
    }

    /// Abandons any in-progress drag.
    pub fn cancel(&mut self) {
        *self = SelectionDrag::Idle;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, SelectionDrag::Dragging { .. })
    }
}
