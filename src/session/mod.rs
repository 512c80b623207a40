// SPDX-License-Identifier: MPL-2.0
//! The interactive editing session.
//!
//! [`EditorSession`] owns the image being edited, its undo/redo history, the
//! viewport state, the staged crop selection, and the adjustment preview.
//! All mutation goes through [`EditorSession::dispatch`], which rejects
//! commands while a previous one is still being processed.
//!
//! History semantics: every successful edit commits the resulting image, so
//! the history always contains the displayed image at its index and undo is
//! a pure index move. The originally loaded image is kept outside the
//! bounded history, so "reset to original" works even after the oldest
//! snapshots have been evicted.

pub mod adjust;
pub mod command;
pub mod crop;
pub mod history;
pub mod viewport;

use crate::error::{Error, Result};
use crate::media::{self, SaveOptions};
use crate::processing::transform;
use crate::session::adjust::AdjustmentState;
use crate::session::command::{Command, Outcome};
use crate::session::crop::CropRect;
use crate::session::history::History;
use crate::session::viewport::{SelectionDrag, ZoomFactor};
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Whether the session is currently executing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SessionActivity {
    #[default]
    Idle,
    Processing,
}

/// A single-image editing session.
#[derive(Debug, Clone)]
pub struct EditorSession {
    /// The image as originally loaded, untouched by any edit.
    original: DynamicImage,
    /// The image currently displayed: the committed snapshot plus any
    /// uncommitted adjustment preview.
    current: DynamicImage,
    history: History,
    zoom: ZoomFactor,
    selection: SelectionDrag,
    pending_crop: Option<CropRect>,
    adjustments: AdjustmentState,
    activity: SessionActivity,
}

impl EditorSession {
    /// Starts a session around an already-decoded image.
    #[must_use]
    pub fn from_image(image: DynamicImage) -> Self {
        let image = media::normalize_color_mode(image);
        let mut history = History::new();
        history.commit(image.clone());
        Self {
            original: image.clone(),
            current: image,
            history,
            zoom: ZoomFactor::default(),
            selection: SelectionDrag::default(),
            pending_crop: None,
            adjustments: AdjustmentState::default(),
            activity: SessionActivity::default(),
        }
    }

    /// Starts a session by loading an image from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let image = media::load_image(path)?;
        Ok(Self::from_image(image))
    }

    /// Executes a command against the session.
    ///
    /// Returns [`Outcome::Busy`] without doing anything if a command is
    /// already in flight. Failed commands leave the session state unchanged
    /// apart from returning to idle.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        if self.activity == SessionActivity::Processing {
            tracing::debug!(?command, "command rejected while processing");
            return Ok(Outcome::Busy);
        }
        self.activity = SessionActivity::Processing;
        let result = self.handle(command);
        self.activity = SessionActivity::Idle;
        result
    }

    fn handle(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Open { path } => {
                let image = media::load_image(&path)?;
                tracing::info!(path = %path.display(), width = image.width(), height = image.height(), "image loaded");
                *self = Self::from_image(image);
                Ok(Outcome::Updated)
            }
            Command::Save { path, options } => self.save(&path, &options),

            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::ResetImage => self.reset_image(),

            Command::ZoomIn => {
                self.zoom = self.zoom.zoomed_in();
                Ok(Outcome::Updated)
            }
            Command::ZoomOut => {
                self.zoom = self.zoom.zoomed_out();
                Ok(Outcome::Updated)
            }
            Command::FitToWindow { canvas_w, canvas_h } => {
                self.zoom = ZoomFactor::fit_to_window(
                    canvas_w,
                    canvas_h,
                    self.current.width(),
                    self.current.height(),
                );
                Ok(Outcome::Updated)
            }

            Command::BeginSelection { x, y } => {
                self.pending_crop = None;
                self.selection.begin(x, y);
                Ok(Outcome::SelectionPending)
            }
            Command::UpdateSelection { x, y } => {
                self.selection.update(x, y);
                Ok(Outcome::SelectionPending)
            }
            Command::EndSelection { x, y } => {
                let rect = self.selection.finish(
                    x,
                    y,
                    self.zoom,
                    self.current.width(),
                    self.current.height(),
                );
                match rect {
                    Some(rect) => {
                        self.pending_crop = Some(rect);
                        Ok(Outcome::SelectionPending)
                    }
                    None => {
                        self.pending_crop = None;
                        Ok(Outcome::SelectionDiscarded)
                    }
                }
            }
            Command::ApplyTemplate(template) => {
                self.selection.cancel();
                self.pending_crop =
                    Some(template.fit(self.current.width(), self.current.height()));
                Ok(Outcome::SelectionPending)
            }
            Command::SetCustomSize { width, height } => {
                if width == 0 || height == 0 {
                    return Err(Error::UserInput(
                        "crop size must be at least 1x1 pixel".to_string(),
                    ));
                }
                self.selection.cancel();
                self.pending_crop = Some(CropRect::centered_with_size(
                    width,
                    height,
                    self.current.width(),
                    self.current.height(),
                ));
                Ok(Outcome::SelectionPending)
            }
            Command::CropSelection => self.crop_selection(),

            Command::RotateLeft => self.apply_edit(|img| Ok(transform::rotate_left(img))),
            Command::RotateRight => self.apply_edit(|img| Ok(transform::rotate_right(img))),
            Command::RotateBy { degrees } => {
                if !degrees.is_finite() {
                    return Err(Error::UserInput(
                        "rotation angle must be a finite number of degrees".to_string(),
                    ));
                }
                self.apply_edit(|img| Ok(transform::rotate_by_angle(img, degrees)))
            }
            Command::FlipHorizontal => self.apply_edit(|img| Ok(transform::flip_horizontal(img))),
            Command::FlipVertical => self.apply_edit(|img| Ok(transform::flip_vertical(img))),
            Command::Resize { width, height } => {
                if width == 0 || height == 0 {
                    return Err(Error::UserInput(
                        "resize dimensions must be at least 1x1 pixel".to_string(),
                    ));
                }
                self.apply_edit(|img| Ok(transform::resize(img, width, height)))
            }

            Command::SetAdjustment { kind, value } => {
                self.adjustments.set(kind, value);
                let baseline = self
                    .history
                    .current()
                    .cloned()
                    .unwrap_or_else(|| self.original.clone());
                self.current = self.adjustments.apply_to(&baseline);
                Ok(Outcome::Updated)
            }
            Command::ApplyAdjustments => {
                if !self.adjustments.has_changes() {
                    return Ok(Outcome::NoChange);
                }
                self.history.commit(self.current.clone());
                self.adjustments.reset();
                Ok(Outcome::Updated)
            }
            Command::ResetAdjustments => {
                if !self.adjustments.has_changes() {
                    return Ok(Outcome::NoChange);
                }
                self.adjustments.reset();
                if let Some(committed) = self.history.current() {
                    self.current = committed.clone();
                }
                Ok(Outcome::Updated)
            }

            Command::ApplyFilter(filter) => self.apply_edit(|img| Ok(filter.apply(img))),
            Command::ApplyAdvanced(op) => self.apply_edit(|img| Ok(op.apply(img))),
        }
    }

    /// Runs an edit against the displayed image and commits the result.
    ///
    /// On failure nothing is committed and the session is left as it was.
    /// A successful edit absorbs any adjustment preview, clears the staged
    /// selection, and resets the sliders.
    fn apply_edit<F>(&mut self, edit: F) -> Result<Outcome>
    where
        F: FnOnce(&DynamicImage) -> Result<DynamicImage>,
    {
        let next = edit(&self.current)?;
        self.history.commit(next.clone());
        self.current = next;
        self.pending_crop = None;
        self.selection.cancel();
        self.adjustments.reset();
        Ok(Outcome::Updated)
    }

    fn crop_selection(&mut self) -> Result<Outcome> {
        let rect = self
            .pending_crop
            .ok_or_else(|| Error::UserInput("no crop selection to apply".to_string()))?;
        if rect.is_empty() {
            return Err(Error::UserInput("crop selection has no area".to_string()));
        }
        let outcome = self.apply_edit(|img| {
            transform::crop(img, rect.x1, rect.y1, rect.width(), rect.height())
                .ok_or_else(|| Error::UserInput("crop selection is outside the image".to_string()))
        })?;
        tracing::info!(
            x = rect.x1,
            y = rect.y1,
            width = rect.width(),
            height = rect.height(),
            "image cropped"
        );
        Ok(outcome)
    }

    fn undo(&mut self) -> Result<Outcome> {
        match self.history.undo() {
            Some(snapshot) => {
                self.current = snapshot.clone();
                self.pending_crop = None;
                self.selection.cancel();
                self.adjustments.reset();
                Ok(Outcome::Updated)
            }
            None => Ok(Outcome::NothingToUndo),
        }
    }

    fn redo(&mut self) -> Result<Outcome> {
        match self.history.redo() {
            Some(snapshot) => {
                self.current = snapshot.clone();
                self.pending_crop = None;
                self.selection.cancel();
                self.adjustments.reset();
                Ok(Outcome::Updated)
            }
            None => Ok(Outcome::NothingToRedo),
        }
    }

    fn reset_image(&mut self) -> Result<Outcome> {
        self.history.reset_to(self.original.clone());
        self.current = self.original.clone();
        self.zoom = ZoomFactor::default();
        self.pending_crop = None;
        self.selection.cancel();
        self.adjustments.reset();
        Ok(Outcome::Updated)
    }

    fn save(&mut self, path: &Path, options: &SaveOptions) -> Result<Outcome> {
        media::save_image(&self.current, path, options)?;
        tracing::info!(path = %path.display(), "image saved");
        Ok(Outcome::Saved)
    }

    // ======================================================================
    // Read access
    // ======================================================================

    /// The image currently displayed (including any adjustment preview).
    #[must_use]
    pub fn image(&self) -> &DynamicImage {
        &self.current
    }

    /// The originally loaded image.
    #[must_use]
    pub fn original(&self) -> &DynamicImage {
        &self.original
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomFactor {
        self.zoom
    }

    /// The staged crop rectangle, if any.
    #[must_use]
    pub fn pending_crop(&self) -> Option<CropRect> {
        self.pending_crop
    }

    #[must_use]
    pub fn adjustments(&self) -> &AdjustmentState {
        &self.adjustments
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.activity == SessionActivity::Processing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::filter::StockFilter;
    use crate::session::adjust::AdjustmentKind;
    use crate::session::crop::CropTemplate;
    use image::{Rgb, RgbImage};

    fn session(width: u32, height: u32) -> EditorSession {
        let buffer = RgbImage::from_pixel(width, height, Rgb([100, 100, 100]));
        EditorSession::from_image(DynamicImage::ImageRgb8(buffer))
    }

    #[test]
    fn fresh_session_has_nothing_to_undo() {
        let mut s = session(10, 10);
        assert!(!s.can_undo());
        assert!(!s.can_redo());
        assert_eq!(s.dispatch(Command::Undo).unwrap(), Outcome::NothingToUndo);
        assert_eq!(s.dispatch(Command::Redo).unwrap(), Outcome::NothingToRedo);
    }

    #[test]
    fn rotate_and_undo_round_trip() {
        let mut s = session(8, 4);
        assert_eq!(s.dispatch(Command::RotateLeft).unwrap(), Outcome::Updated);
        assert_eq!((s.image().width(), s.image().height()), (4, 8));
        assert!(s.can_undo());

        assert_eq!(s.dispatch(Command::Undo).unwrap(), Outcome::Updated);
        assert_eq!((s.image().width(), s.image().height()), (8, 4));
        assert!(s.can_redo());

        assert_eq!(s.dispatch(Command::Redo).unwrap(), Outcome::Updated);
        assert_eq!((s.image().width(), s.image().height()), (4, 8));
    }

    #[test]
    fn free_angle_rotation_commits_and_undoes() {
        let mut s = session(10, 10);
        assert_eq!(
            s.dispatch(Command::RotateBy { degrees: 45.0 }).unwrap(),
            Outcome::Updated
        );
        assert_eq!((s.image().width(), s.image().height()), (14, 14));
        assert!(s.can_undo());

        s.dispatch(Command::Undo).unwrap();
        assert_eq!((s.image().width(), s.image().height()), (10, 10));
    }

    #[test]
    fn non_finite_rotation_angle_is_rejected() {
        let mut s = session(10, 10);
        let err = s
            .dispatch(Command::RotateBy { degrees: f32::NAN })
            .unwrap_err();
        assert!(matches!(err, Error::UserInput(_)));
        assert_eq!((s.image().width(), s.image().height()), (10, 10));
        assert!(!s.can_undo());
    }

    #[test]
    fn new_edit_after_undo_drops_the_redo_branch() {
        let mut s = session(8, 4);
        s.dispatch(Command::RotateLeft).unwrap();
        s.dispatch(Command::Undo).unwrap();
        s.dispatch(Command::FlipHorizontal).unwrap();
        assert!(!s.can_redo());
    }

    #[test]
    fn template_then_crop_applies_centered_rect() {
        let mut s = session(1000, 500);
        assert_eq!(
            s.dispatch(Command::ApplyTemplate(CropTemplate::Square)).unwrap(),
            Outcome::SelectionPending
        );
        let rect = s.pending_crop().expect("staged crop");
        assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (250, 0, 750, 500));

        assert_eq!(s.dispatch(Command::CropSelection).unwrap(), Outcome::Updated);
        assert_eq!((s.image().width(), s.image().height()), (500, 500));
        assert!(s.pending_crop().is_none());
    }

    #[test]
    fn crop_without_selection_is_an_error() {
        let mut s = session(10, 10);
        let err = s.dispatch(Command::CropSelection).unwrap_err();
        assert!(matches!(err, Error::UserInput(_)));
        // Session state is untouched by the failed command.
        assert_eq!((s.image().width(), s.image().height()), (10, 10));
        assert!(!s.can_undo());
    }

    #[test]
    fn drag_selection_stages_a_crop() {
        let mut s = session(200, 200);
        s.dispatch(Command::BeginSelection { x: 20.0, y: 30.0 }).unwrap();
        s.dispatch(Command::UpdateSelection { x: 100.0, y: 100.0 }).unwrap();
        assert_eq!(
            s.dispatch(Command::EndSelection { x: 120.0, y: 130.0 }).unwrap(),
            Outcome::SelectionPending
        );

        let rect = s.pending_crop().expect("staged crop");
        assert_eq!((rect.x1, rect.y1), (20, 30));
        assert_eq!((rect.width(), rect.height()), (100, 100));
    }

    #[test]
    fn tiny_drag_is_discarded() {
        let mut s = session(100, 100);
        s.dispatch(Command::BeginSelection { x: 0.0, y: 0.0 }).unwrap();
        assert_eq!(
            s.dispatch(Command::EndSelection { x: 8.0, y: 8.0 }).unwrap(),
            Outcome::SelectionDiscarded
        );
        assert!(s.pending_crop().is_none());
    }

    #[test]
    fn drag_past_the_image_edge_is_discarded_after_clamping() {
        let mut s = session(100, 100);
        s.dispatch(Command::BeginSelection { x: 90.0, y: 0.0 }).unwrap();
        // Clamped to the image, the selection is a 10-pixel sliver.
        assert_eq!(
            s.dispatch(Command::EndSelection { x: 150.0, y: 60.0 }).unwrap(),
            Outcome::SelectionDiscarded
        );
        assert!(s.pending_crop().is_none());
        let err = s.dispatch(Command::CropSelection).unwrap_err();
        assert!(matches!(err, Error::UserInput(_)));
    }

    #[test]
    fn custom_size_stages_a_centered_crop() {
        let mut s = session(100, 100);
        assert_eq!(
            s.dispatch(Command::SetCustomSize { width: 40, height: 20 }).unwrap(),
            Outcome::SelectionPending
        );
        let rect = s.pending_crop().expect("staged crop");
        assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (30, 40, 70, 60));
    }

    #[test]
    fn zero_custom_size_is_rejected() {
        let mut s = session(100, 100);
        let err = s
            .dispatch(Command::SetCustomSize { width: 0, height: 20 })
            .unwrap_err();
        assert!(matches!(err, Error::UserInput(_)));
    }

    #[test]
    fn adjustment_preview_is_not_committed_until_applied() {
        let mut s = session(10, 10);
        s.dispatch(Command::SetAdjustment {
            kind: AdjustmentKind::Brightness,
            value: 2.0,
        })
        .unwrap();
        assert_eq!(s.image().to_rgb8().get_pixel(0, 0).0, [200, 200, 200]);
        // Only the initial snapshot is committed so far.
        assert!(!s.can_undo());

        assert_eq!(s.dispatch(Command::ApplyAdjustments).unwrap(), Outcome::Updated);
        assert!(s.can_undo());
        assert!(!s.adjustments().has_changes());

        s.dispatch(Command::Undo).unwrap();
        assert_eq!(s.image().to_rgb8().get_pixel(0, 0).0, [100, 100, 100]);
    }

    #[test]
    fn slider_moves_recompute_from_the_committed_baseline() {
        let mut s = session(10, 10);
        s.dispatch(Command::SetAdjustment {
            kind: AdjustmentKind::Brightness,
            value: 3.0,
        })
        .unwrap();
        s.dispatch(Command::SetAdjustment {
            kind: AdjustmentKind::Brightness,
            value: 0.5,
        })
        .unwrap();
        // Half of the committed 100, not half of the previewed 255.
        assert_eq!(s.image().to_rgb8().get_pixel(0, 0).0, [50, 50, 50]);
    }

    #[test]
    fn reset_adjustments_restores_the_committed_image() {
        let mut s = session(10, 10);
        s.dispatch(Command::SetAdjustment {
            kind: AdjustmentKind::Brightness,
            value: 2.0,
        })
        .unwrap();
        assert_eq!(s.dispatch(Command::ResetAdjustments).unwrap(), Outcome::Updated);
        assert_eq!(s.image().to_rgb8().get_pixel(0, 0).0, [100, 100, 100]);
        assert_eq!(
            s.dispatch(Command::ApplyAdjustments).unwrap(),
            Outcome::NoChange
        );
    }

    #[test]
    fn reset_image_restores_the_original_after_many_edits() {
        let mut s = session(64, 32);
        for _ in 0..25 {
            s.dispatch(Command::FlipHorizontal).unwrap();
        }
        // More edits than the history holds; reset still reaches the original.
        s.dispatch(Command::RotateLeft).unwrap();
        assert_eq!(s.dispatch(Command::ResetImage).unwrap(), Outcome::Updated);
        assert_eq!((s.image().width(), s.image().height()), (64, 32));
        assert!(!s.can_undo());
        assert!(!s.can_redo());
    }

    #[test]
    fn filters_commit_history_steps() {
        let mut s = session(6, 6);
        s.dispatch(Command::ApplyFilter(StockFilter::Smooth)).unwrap();
        assert!(s.can_undo());
    }

    #[test]
    fn busy_session_rejects_commands() {
        let mut s = session(4, 4);
        s.activity = SessionActivity::Processing;
        assert_eq!(s.dispatch(Command::RotateLeft).unwrap(), Outcome::Busy);
        assert_eq!((s.image().width(), s.image().height()), (4, 4));

        s.activity = SessionActivity::Idle;
        assert_eq!(s.dispatch(Command::RotateLeft).unwrap(), Outcome::Updated);
    }

    #[test]
    fn failed_command_returns_the_session_to_idle() {
        let mut s = session(4, 4);
        assert!(s.dispatch(Command::CropSelection).is_err());
        assert!(!s.is_processing());
        assert_eq!(s.dispatch(Command::ZoomIn).unwrap(), Outcome::Updated);
    }

    #[test]
    fn zoom_commands_step_the_viewport() {
        let mut s = session(4, 4);
        s.dispatch(Command::ZoomIn).unwrap();
        assert!((s.zoom().value() - 1.2).abs() < 1e-6);
        s.dispatch(Command::ZoomOut).unwrap();
        assert!((s.zoom().value() - 1.0).abs() < 1e-6);

        s.dispatch(Command::FitToWindow {
            canvas_w: 8,
            canvas_h: 8,
        })
        .unwrap();
        assert!((s.zoom().value() - 1.8).abs() < 1e-6);
    }
}
