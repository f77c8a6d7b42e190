// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-component layout state and local transform composition.

use kurbo::{Point, Size, Vec2};

use crate::transform::{Transform3d, Vec3};

/// Layout inputs of one component.
///
/// `origin` and `rotation_origin` are fractions of `size`: `(0, 0)` is the
/// top-left corner, `(0.5, 0.5)` the center. Negative sizes and scales are
/// not rejected; their rendering is unspecified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Position of the origin point in the parent's space.
    pub position: Vec3,
    /// Anchor placed at `position`.
    pub origin: Vec2,
    /// Pivot for `rotation`.
    pub rotation_origin: Vec2,
    /// Width and height.
    pub size: Size,
    /// Rotation around Z, in radians.
    pub rotation: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Current draw-order key among siblings.
    pub z_index: f64,
    /// Value `z_index` is reset to when a theme omits `zIndex`.
    pub default_z_index: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            origin: Vec2::ZERO,
            rotation_origin: Vec2::new(0.5, 0.5),
            size: Size::ZERO,
            rotation: 0.0,
            scale: 1.0,
            z_index: 0.0,
            default_z_index: 0.0,
        }
    }
}

impl Layout {
    /// Composes the local transform.
    ///
    /// `translate(position) · scale · rotate-about-pivot · translate(-origin·size)`,
    /// where the pivot is the rotation origin expressed relative to the
    /// origin point. Identity scale and zero rotation are skipped.
    #[must_use]
    pub fn local_transform(&self) -> Transform3d {
        let p = self.position;
        let mut t = Transform3d::from_translation(p.x, p.y, p.z);
        if self.scale != 1.0 {
            t = t * Transform3d::from_scale(self.scale, self.scale, 1.0);
        }
        if self.rotation != 0.0 {
            let x_off = (self.origin.x - self.rotation_origin.x) * self.size.width;
            let y_off = (self.origin.y - self.rotation_origin.y) * self.size.height;
            t = t
                * Transform3d::from_translation(-x_off, -y_off, 0.0)
                * Transform3d::from_rotation_z(self.rotation)
                * Transform3d::from_translation(x_off, y_off, 0.0);
        }
        t * Transform3d::from_translation(
            -self.origin.x * self.size.width,
            -self.origin.y * self.size.height,
            0.0,
        )
    }

    /// Center of the component's box in the parent's space, ignoring scale and
    /// rotation.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x - self.size.width * self.origin.x + self.size.width / 2.0,
            self.position.y - self.size.height * self.origin.y + self.size.height / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert_eq!(Layout::default().local_transform(), Transform3d::IDENTITY);
    }

    #[test]
    fn origin_offsets_by_size() {
        let layout = Layout {
            position: Vec3::new(100.0, 50.0, 0.0),
            origin: Vec2::new(0.5, 0.5),
            size: Size::new(20.0, 10.0),
            ..Layout::default()
        };
        assert_eq!(layout.local_transform().translation(), Vec3::new(90.0, 45.0, 0.0));
        assert_eq!(layout.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn scale_applies_before_origin_correction() {
        let layout = Layout {
            position: Vec3::new(10.0, 0.0, 0.0),
            origin: Vec2::new(1.0, 0.0),
            size: Size::new(4.0, 4.0),
            scale: 2.0,
            ..Layout::default()
        };
        let p = layout.local_transform().transform_point(Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(p, Vec3::new(10.0, 0.0, 0.0), "the origin point lands on position");
    }

    #[test]
    fn rotation_pivots_around_rotation_origin() {
        let layout = Layout {
            size: Size::new(10.0, 10.0),
            rotation: core::f64::consts::PI,
            ..Layout::default()
        };
        // Half-turn about the center (5, 5) maps the top-left corner to the
        // bottom-right one.
        let p = layout.local_transform().transform_point(Vec3::ZERO);
        assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9, "got {p:?}");
    }
}
