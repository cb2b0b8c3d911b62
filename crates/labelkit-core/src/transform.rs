//! Item transform: rotation and uniform scale about the item origin.

use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Rotation (degrees, clockwise on screen) and uniform scale applied to an
/// item's local coordinates before its position is added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemTransform {
    pub rotation: f64,
    pub scale: f64,
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ItemTransform {
    pub fn identity() -> Self {
        Self {
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.rotation.rem_euclid(360.0) == 0.0 && self.scale == 1.0
    }

    /// Map a local point into scene coordinates for an item placed at `pos`.
    pub fn map_point(&self, pos: Point, local: Point) -> Point {
        if self.is_identity() {
            return pos + local;
        }
        let rotation = Rotation2::new(self.rotation.to_radians());
        let v = rotation * (Vector2::new(local.x, local.y) * self.scale);
        Point::new(pos.x + v.x, pos.y + v.y)
    }

    /// Inverse of [`ItemTransform::map_point`]. A zero scale is treated as
    /// no scale.
    pub fn unmap_point(&self, pos: Point, scene: Point) -> Point {
        let d = scene - pos;
        if self.is_identity() {
            return d;
        }
        let rotation = Rotation2::new(self.rotation.to_radians());
        let scale = if self.scale != 0.0 { self.scale } else { 1.0 };
        let v = rotation.inverse() * Vector2::new(d.x, d.y) / scale;
        Point::new(v.x, v.y)
    }

    /// Scene bounding rectangle of a local rectangle.
    ///
    /// Without rotation or scale this is an exact translation, so snapped
    /// coordinates survive the round trip unchanged.
    pub fn map_rect(&self, pos: Point, local: &Rect) -> Rect {
        if self.is_identity() {
            return local.translated(pos);
        }
        let mapped = local.corners().map(|c| self.map_point(pos, c));
        Rect::bounding(&mapped).unwrap_or_default()
    }
}
