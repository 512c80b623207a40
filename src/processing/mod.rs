// SPDX-License-Identifier: MPL-2.0
//! Pure image processing operations.
//!
//! Everything in here is a function from an image to a new image, with no
//! session state attached. The session layer composes these in response to
//! user commands; the batch processor calls into them directly.

pub mod adjust;
pub mod enhance;
pub mod filter;
pub mod transform;
