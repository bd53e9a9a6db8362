// Copyright 2021 Tristam MacDonald
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cross sections, 2D profiles, and extrusion back into 3D.

use super::{Profile, Shape};
use crate::{
    density::{density, Density, OUTSIDE},
    error::{Error, Result},
    math::{vec3, Vec2, Vec3},
    source::{Evaluate, EvaluatePlanar},
};
use std::sync::Arc;

/// A disc in the plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub origin: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const DEFAULT_RADIUS: f32 = 0.5;

    pub fn new(origin: Vec2, radius: f32) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(Error::invalid_parameter(
                "circle",
                format!("radius must be positive, got {}", radius),
            ));
        }
        Ok(Self { origin, radius })
    }
}

impl EvaluatePlanar for Circle {
    fn evaluate_planar(&self, p: Vec2) -> Result<Density> {
        Ok(density((p - self.origin).len_sq() < self.radius * self.radius))
    }
}

/// An axis-aligned rectangle covering `[origin - half_extent, origin + half_extent)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub origin: Vec2,
    pub half_extent: Vec2,
}

impl Rectangle {
    pub const DEFAULT_HALF_EXTENT: f32 = 0.25;

    pub fn new(origin: Vec2, half_extent: Vec2) -> Result<Self> {
        if !half_extent.all(|f| f > 0.0) {
            return Err(Error::invalid_parameter(
                "rectangle",
                format!("half extents must be positive, got {:?}", half_extent),
            ));
        }
        Ok(Self {
            origin,
            half_extent,
        })
    }
}

impl EvaluatePlanar for Rectangle {
    fn evaluate_planar(&self, p: Vec2) -> Result<Density> {
        let local = p - self.origin;
        let lower = local + self.half_extent;
        let upper = self.half_extent - local;
        Ok(density(lower.all(|f| f >= 0.0) && upper.all(|f| f > 0.0)))
    }
}

/// The cross section of a solid on the plane through `origin` facing `normal`.
///
/// Plane coordinates `(a, b)` map to `origin + a * u + b * v`, where `u` and
/// `v` complete `normal` to a right-handed orthonormal basis.
#[derive(Debug, Clone)]
pub struct Cut {
    pub origin: Vec3,
    pub normal: Vec3,
    u: Vec3,
    v: Vec3,
    pub operand: Arc<Shape>,
}

impl Cut {
    pub const DEFAULT_NORMAL: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub fn new(origin: Vec3, normal: Vec3, operand: Arc<Shape>) -> Result<Self> {
        let normal = normal.normalised().ok_or_else(|| {
            Error::invalid_parameter("cut", format!("normal {:?} has no direction", normal))
        })?;

        // Any axis far enough from the normal gives a well conditioned basis
        let helper = if normal.x.abs() < 0.9 {
            vec3(1.0, 0.0, 0.0)
        } else {
            vec3(0.0, 1.0, 0.0)
        };
        let u = normal
            .cross(helper)
            .normalised()
            .ok_or_else(|| Error::invalid_parameter("cut", "normal is parallel to the helper axis"))?;
        let v = normal.cross(u);

        Ok(Self {
            origin,
            normal,
            u,
            v,
            operand,
        })
    }

    /// World position of a point on the cut plane.
    pub fn plane_point(&self, q: Vec2) -> Vec3 {
        self.origin + self.u * q.x + self.v * q.y
    }
}

impl EvaluatePlanar for Cut {
    fn evaluate_planar(&self, q: Vec2) -> Result<Density> {
        self.operand.evaluate(self.plane_point(q))
    }
}

/// A profile swept along local z, covering `0 <= z < height` above `origin`.
#[derive(Debug, Clone)]
pub struct Extrude {
    pub origin: Vec3,
    pub height: f32,
    pub profile: Arc<Profile>,
}

impl Extrude {
    pub const DEFAULT_HEIGHT: f32 = 1.0;

    pub fn new(origin: Vec3, height: f32, profile: Arc<Profile>) -> Result<Self> {
        if !(height > 0.0) {
            return Err(Error::invalid_parameter(
                "extrude",
                format!("height must be positive, got {}", height),
            ));
        }
        Ok(Self {
            origin,
            height,
            profile,
        })
    }
}

impl Evaluate for Extrude {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let local = p - self.origin;
        if local.z < 0.0 || local.z >= self.height {
            return Ok(OUTSIDE);
        }
        self.profile.evaluate_planar(local.xy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::INSIDE;
    use crate::implicit::Sphere;
    use crate::math::vec2;
    use approx::assert_relative_eq;

    #[test]
    fn test_profiles() {
        let circle = Circle::new(vec2(1.0, 0.0), 1.0).unwrap();
        assert_eq!(circle.evaluate_planar(vec2(1.5, 0.5)).unwrap(), INSIDE);
        assert_eq!(circle.evaluate_planar(vec2(-0.5, 0.0)).unwrap(), OUTSIDE);

        let rectangle = Rectangle::new(Vec2::zero(), vec2(1.0, 0.5)).unwrap();
        assert_eq!(rectangle.evaluate_planar(vec2(-1.0, -0.5)).unwrap(), INSIDE);
        assert_eq!(rectangle.evaluate_planar(vec2(1.0, 0.0)).unwrap(), OUTSIDE);
        assert_eq!(rectangle.evaluate_planar(vec2(0.0, 0.6)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_cut_basis_is_orthonormal() {
        let sphere: Arc<Shape> = Arc::new(Sphere::default().into());
        for normal in &[
            vec3(0.0, 0.0, 1.0),
            vec3(1.0, 0.0, 0.0),
            vec3(1.0, 2.0, -3.0),
        ] {
            let cut = Cut::new(Vec3::zero(), *normal, Arc::clone(&sphere)).unwrap();
            assert_relative_eq!(cut.u.len(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(cut.v.len(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(cut.u.dot(cut.v), 0.0, epsilon = 1e-6);
            assert_relative_eq!(cut.u.dot(cut.normal), 0.0, epsilon = 1e-6);
            assert_relative_eq!(cut.u.cross(cut.v).dot(cut.normal), 1.0, epsilon = 1e-5);
        }
        assert!(Cut::new(Vec3::zero(), Vec3::zero(), sphere).is_err());
    }

    #[test]
    fn test_cut_then_extrude_sphere() {
        let sphere = Arc::new(Sphere::new(Vec3::zero(), 1.0).unwrap().into());
        let cut = Cut::new(Vec3::zero(), vec3(0.0, 0.0, 1.0), sphere).unwrap();
        assert_eq!(cut.evaluate_planar(vec2(0.5, 0.5)).unwrap(), INSIDE);
        assert_eq!(cut.evaluate_planar(vec2(1.0, 0.5)).unwrap(), OUTSIDE);

        let slab = Extrude::new(vec3(0.0, 0.0, 1.0), 2.0, Arc::new(cut.into())).unwrap();
        // A disc of radius 1 lifted into a cylinder from z = 1 to z = 3
        assert_eq!(slab.evaluate(vec3(0.5, 0.0, 1.0)).unwrap(), INSIDE);
        assert_eq!(slab.evaluate(vec3(0.0, -0.9, 2.9)).unwrap(), INSIDE);
        assert_eq!(slab.evaluate(vec3(0.5, 0.0, 3.0)).unwrap(), OUTSIDE);
        assert_eq!(slab.evaluate(vec3(0.5, 0.0, 0.9)).unwrap(), OUTSIDE);
        assert_eq!(slab.evaluate(vec3(1.5, 0.0, 2.0)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_invalid_extrude() {
        let circle = Arc::new(Circle::new(Vec2::zero(), 1.0).unwrap().into());
        assert!(Extrude::new(Vec3::zero(), 0.0, circle).is_err());
    }
}
