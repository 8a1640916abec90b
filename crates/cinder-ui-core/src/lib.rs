//! Core primitives for the cinder-ui toolkit.
//!
//! This crate holds the leaf types the widget layer is built on: integer
//! pixel geometry, colors, the loader error type, and logging target names.
//! It deliberately has no knowledge of widgets, rendering backends, or the
//! host game client.

pub mod color;
pub mod error;
pub mod geometry;
pub mod logging;

pub use color::Color;
pub use error::{MarkupError, Result};
pub use geometry::{Edges, Point, Rect, Size};
