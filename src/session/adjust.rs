// SPDX-License-Identifier: MPL-2.0
//! Adjustment slider state.
//!
//! The four sliders (brightness, contrast, saturation, sharpness) are held
//! as factors and re-applied to a fixed baseline image in a fixed order, so
//! moving a slider back and forth never accumulates rounding error.

use crate::processing::adjust;
use image::DynamicImage;

/// Adjustment factor bounds.
pub mod factor_bounds {
    /// Minimum factor for brightness, contrast, and sharpness.
    pub const MIN: f32 = 0.1;
    /// Minimum factor for saturation (0.0 is full grayscale).
    pub const SATURATION_MIN: f32 = 0.0;
    /// Maximum factor for all sliders.
    pub const MAX: f32 = 3.0;
    /// Neutral factor.
    pub const DEFAULT: f32 = 1.0;
    /// Factors within this distance of 1.0 count as the identity and the
    /// corresponding pass is skipped.
    pub const IDENTITY_EPSILON: f32 = 0.01;
}

/// The four adjustment sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentKind {
    Brightness,
    Contrast,
    Saturation,
    Sharpness,
}

impl AdjustmentKind {
    /// All kinds, in application order.
    pub const ALL: &'static [AdjustmentKind] = &[
        AdjustmentKind::Brightness,
        AdjustmentKind::Contrast,
        AdjustmentKind::Saturation,
        AdjustmentKind::Sharpness,
    ];

    /// Lower bound for this slider's factor.
    #[must_use]
    pub fn min(self) -> f32 {
        match self {
            AdjustmentKind::Saturation => factor_bounds::SATURATION_MIN,
            _ => factor_bounds::MIN,
        }
    }

    /// Upper bound for this slider's factor.
    #[must_use]
    pub fn max(self) -> f32 {
        factor_bounds::MAX
    }

    /// Stable identifier used for dispatch.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AdjustmentKind::Brightness => "brightness",
            AdjustmentKind::Contrast => "contrast",
            AdjustmentKind::Saturation => "saturation",
            AdjustmentKind::Sharpness => "sharpness",
        }
    }

    /// Looks a kind up by its stable identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }
}

/// A slider factor, clamped to its kind's range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustFactor(f32);

impl AdjustFactor {
    /// Creates a factor for the given kind, clamping to that kind's range.
    /// Non-finite values fall back to neutral.
    #[must_use]
    pub fn new(kind: AdjustmentKind, value: f32) -> Self {
        if !value.is_finite() {
            return Self(factor_bounds::DEFAULT);
        }
        Self(value.clamp(kind.min(), kind.max()))
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// True when this factor is close enough to 1.0 to skip its pass.
    #[must_use]
    pub fn is_identity(self) -> bool {
        (self.0 - factor_bounds::DEFAULT).abs() <= factor_bounds::IDENTITY_EPSILON
    }
}

impl Default for AdjustFactor {
    fn default() -> Self {
        Self(factor_bounds::DEFAULT)
    }
}

/// The current position of all four sliders.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdjustmentState {
    brightness: AdjustFactor,
    contrast: AdjustFactor,
    saturation: AdjustFactor,
    sharpness: AdjustFactor,
}

impl AdjustmentState {
    fn slot(&mut self, kind: AdjustmentKind) -> &mut AdjustFactor {
        match kind {
            AdjustmentKind::Brightness => &mut self.brightness,
            AdjustmentKind::Contrast => &mut self.contrast,
            AdjustmentKind::Saturation => &mut self.saturation,
            AdjustmentKind::Sharpness => &mut self.sharpness,
        }
    }

    /// Sets one slider, clamping the value to the slider's range.
    pub fn set(&mut self, kind: AdjustmentKind, value: f32) {
        *self.slot(kind) = AdjustFactor::new(kind, value);
    }

    /// Reads one slider.
    #[must_use]
    pub fn get(&self, kind: AdjustmentKind) -> AdjustFactor {
        match kind {
            AdjustmentKind::Brightness => self.brightness,
            AdjustmentKind::Contrast => self.contrast,
            AdjustmentKind::Saturation => self.saturation,
            AdjustmentKind::Sharpness => self.sharpness,
        }
    }

    /// True when at least one slider is away from neutral.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        AdjustmentKind::ALL
            .iter()
            .any(|&kind| !self.get(kind).is_identity())
    }

    /// Returns every slider to neutral.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies the sliders to a baseline image, in the fixed order
    /// brightness, contrast, saturation, sharpness. Sliders at neutral are
    /// skipped; if all are neutral the baseline is returned unchanged.
    #[must_use]
    pub fn apply_to(&self, baseline: &DynamicImage) -> DynamicImage {
        let mut current: Option<DynamicImage> = None;
        for &kind in AdjustmentKind::ALL {
            let factor = self.get(kind);
            if factor.is_identity() {
                continue;
            }
            let source = current.as_ref().unwrap_or(baseline);
            let next = match kind {
                AdjustmentKind::Brightness => adjust::brightness(source, factor.value()),
                AdjustmentKind::Contrast => adjust::contrast(source, factor.value()),
                AdjustmentKind::Saturation => adjust::saturation(source, factor.value()),
                AdjustmentKind::Sharpness => adjust::sharpness(source, factor.value()),
            };
            current = Some(next);
        }
        current.unwrap_or_else(|| baseline.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn uniform(value: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb(value)))
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in AdjustmentKind::ALL {
            assert_eq!(AdjustmentKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(AdjustmentKind::from_name("gamma"), None);
    }

    #[test]
    fn factors_clamp_per_kind() {
        assert_eq!(AdjustFactor::new(AdjustmentKind::Brightness, 0.0).value(), 0.1);
        assert_eq!(AdjustFactor::new(AdjustmentKind::Saturation, 0.0).value(), 0.0);
        assert_eq!(AdjustFactor::new(AdjustmentKind::Contrast, 9.0).value(), 3.0);
        assert_eq!(
            AdjustFactor::new(AdjustmentKind::Sharpness, f32::INFINITY).value(),
            1.0
        );
    }

    #[test]
    fn near_neutral_counts_as_identity() {
        assert!(AdjustFactor::new(AdjustmentKind::Brightness, 1.005).is_identity());
        assert!(!AdjustFactor::new(AdjustmentKind::Brightness, 1.02).is_identity());
    }

    #[test]
    fn fresh_state_has_no_changes() {
        let state = AdjustmentState::default();
        assert!(!state.has_changes());
    }

    #[test]
    fn set_and_reset_track_changes() {
        let mut state = AdjustmentState::default();
        state.set(AdjustmentKind::Contrast, 1.5);
        assert!(state.has_changes());
        assert_eq!(state.get(AdjustmentKind::Contrast).value(), 1.5);

        state.reset();
        assert!(!state.has_changes());
        assert_eq!(state.get(AdjustmentKind::Contrast).value(), 1.0);
    }

    #[test]
    fn neutral_state_applies_as_identity() {
        let baseline = uniform([30, 90, 150]);
        let out = AdjustmentState::default().apply_to(&baseline).to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [30, 90, 150]);
    }

    #[test]
    fn apply_recomputes_from_the_baseline() {
        let baseline = uniform([100, 100, 100]);
        let mut state = AdjustmentState::default();

        // Push the slider around; only the final position matters.
        state.set(AdjustmentKind::Brightness, 3.0);
        state.set(AdjustmentKind::Brightness, 0.5);
        let out = state.apply_to(&baseline).to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [50, 50, 50]);
    }

    #[test]
    fn passes_compose_in_order() {
        let baseline = uniform([100, 100, 100]);
        let mut state = AdjustmentState::default();
        state.set(AdjustmentKind::Brightness, 2.0);
        state.set(AdjustmentKind::Saturation, 0.0);

        // Brightness doubles to 200 first; desaturating a gray is a no-op.
        let out = state.apply_to(&baseline).to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [200, 200, 200]);
    }
}
