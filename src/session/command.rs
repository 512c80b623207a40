// SPDX-License-Identifier: MPL-2.0
//! The editing command surface.
//!
//! Every user action reaches the session as a [`Command`]; the session
//! answers with an [`Outcome`] (or an error). This keeps the session a
//! single dispatch point that a UI, a test, or a script can drive the same
//! way.

use crate::media::SaveOptions;
use crate::processing::enhance::AdvancedOp;
use crate::processing::filter::StockFilter;
use crate::session::adjust::AdjustmentKind;
use crate::session::crop::CropTemplate;
use std::path::PathBuf;

/// A user action against the editing session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Load an image from disk, replacing the session's image and history.
    Open { path: PathBuf },
    /// Write the current image to disk.
    Save { path: PathBuf, options: SaveOptions },

    Undo,
    Redo,
    /// Return to the originally loaded image, clearing history.
    ResetImage,

    ZoomIn,
    ZoomOut,
    /// Fit the image inside a canvas of the given size.
    FitToWindow { canvas_w: u32, canvas_h: u32 },

    /// Start a crop selection drag at a display-space position.
    BeginSelection { x: f32, y: f32 },
    /// Move the free corner of the selection drag.
    UpdateSelection { x: f32, y: f32 },
    /// Finish the selection drag.
    EndSelection { x: f32, y: f32 },
    /// Stage a centered crop with a template's aspect ratio.
    ApplyTemplate(CropTemplate),
    /// Stage a centered crop of an exact pixel size.
    SetCustomSize { width: u32, height: u32 },
    /// Crop the image to the staged selection.
    CropSelection,

    RotateLeft,
    RotateRight,
    /// Rotate counter-clockwise by an arbitrary angle in degrees, expanding
    /// the canvas.
    RotateBy { degrees: f32 },
    FlipHorizontal,
    FlipVertical,
    /// Resize the image to exact dimensions.
    Resize { width: u32, height: u32 },

    /// Move one adjustment slider; the result is previewed, not committed.
    SetAdjustment { kind: AdjustmentKind, value: f32 },
    /// Commit the previewed adjustments as one history step.
    ApplyAdjustments,
    /// Return all sliders to neutral and drop the preview.
    ResetAdjustments,

    ApplyFilter(StockFilter),
    ApplyAdvanced(AdvancedOp),
}

/// What a successfully dispatched command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The displayed image or viewport changed.
    Updated,
    /// The image was written to disk.
    Saved,
    /// A crop selection is staged, awaiting [`Command::CropSelection`].
    SelectionPending,
    /// The selection drag was too small and was discarded.
    SelectionDiscarded,
    /// Undo requested with no older snapshot.
    NothingToUndo,
    /// Redo requested with no newer snapshot.
    NothingToRedo,
    /// The command would not have changed anything.
    NoChange,
    /// Another operation is in flight; the command was rejected.
    Busy,
}
