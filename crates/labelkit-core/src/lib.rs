//! # LabelKit Core
//!
//! Geometry primitives and error types shared by the LabelKit crates.
//! All coordinates are in scene units with the origin at the top-left
//! corner and the y axis pointing down.

pub mod error;
pub mod geometry;
pub mod transform;

pub use error::{ensure_finite, GeometryError};
pub use geometry::{Point, Rect, Size};
pub use transform::ItemTransform;
