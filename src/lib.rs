// SPDX-License-Identifier: MPL-2.0
//! Core engine of a desktop photo cropping and editing tool.
//!
//! The crate is split into a stateful session layer and a stateless
//! processing layer:
//!
//! - [`session`] holds the interactive state: the image under edit, bounded
//!   undo/redo history, zoom, the crop selection, and adjustment sliders,
//!   all driven through a single command dispatch.
//! - [`processing`] contains the pure image operations: geometric
//!   transforms, slider adjustments, stock convolution filters, and the
//!   advanced one-click enhancements.
//! - [`media`] loads and saves image files, normalizing everything to
//!   8-bit RGB.
//! - [`batch`] applies one crop or resize across a whole folder.
//! - [`config`] persists user presets as JSON.

pub mod batch;
pub mod config;
pub mod error;
pub mod media;
pub mod processing;
pub mod session;

pub use error::{Error, Result};
pub use session::EditorSession;
