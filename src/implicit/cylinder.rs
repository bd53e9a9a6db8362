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

use crate::{
    density::{density, Density},
    error::{Error, Result},
    math::{lerp, Vec3},
    source::Evaluate,
};

/// A capped cylinder along the local z axis, tapered into a frustum when the
/// two radii differ.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cylinder {
    /// Centre of the cylinder's axis.
    pub origin: Vec3,
    /// Radius of the cap at `z = -height / 2`.
    pub bottom_radius: f32,
    /// Radius of the cap at `z = height / 2`.
    pub top_radius: f32,
    /// Distance between the two caps.
    pub height: f32,
}

impl Cylinder {
    pub const DEFAULT_RADIUS: f32 = 0.25;
    pub const DEFAULT_HEIGHT: f32 = 1.0;

    /// Create a capped cylinder. One radius may be zero, producing a cone.
    pub fn new(origin: Vec3, bottom_radius: f32, top_radius: f32, height: f32) -> Result<Self> {
        if !(bottom_radius >= 0.0 && top_radius >= 0.0) || bottom_radius + top_radius == 0.0 {
            return Err(Error::invalid_parameter(
                "cylinder",
                format!(
                    "radii must be non-negative and not both zero, got {} and {}",
                    bottom_radius, top_radius
                ),
            ));
        }
        if !(height > 0.0) {
            return Err(Error::invalid_parameter(
                "cylinder",
                format!("height must be positive, got {}", height),
            ));
        }
        Ok(Self {
            origin,
            bottom_radius,
            top_radius,
            height,
        })
    }
}

impl Evaluate for Cylinder {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let local = p - self.origin;
        // Fraction of the way from the bottom cap to the top cap
        let t = local.z / self.height + 0.5;
        if !(t >= 0.0 && t < 1.0) {
            return Ok(density(false));
        }
        let radius = lerp(self.bottom_radius, self.top_radius, t);
        Ok(density(local.xy().len_sq() < radius * radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::{INSIDE, OUTSIDE};
    use crate::math::vec3;

    #[test]
    fn test_cylinder() {
        let cylinder = Cylinder::new(Vec3::zero(), 2.0, 2.0, 8.0).unwrap();

        assert_eq!(cylinder.evaluate(Vec3::zero()).unwrap(), INSIDE);
        assert_eq!(cylinder.evaluate(vec3(1.9, 0.0, -4.0)).unwrap(), INSIDE);
        assert_eq!(cylinder.evaluate(vec3(0.0, 0.0, 4.0)).unwrap(), OUTSIDE);
        assert_eq!(cylinder.evaluate(vec3(0.0, 2.1, 0.0)).unwrap(), OUTSIDE);
        assert_eq!(cylinder.evaluate(vec3(0.0, 0.0, 8.0)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_frustum_tapers() {
        let cone = Cylinder::new(Vec3::zero(), 2.0, 0.0, 4.0).unwrap();

        assert_eq!(cone.evaluate(vec3(1.5, 0.0, -1.5)).unwrap(), INSIDE);
        assert_eq!(cone.evaluate(vec3(1.5, 0.0, 1.5)).unwrap(), OUTSIDE);
        assert_eq!(cone.evaluate(vec3(0.1, 0.0, 1.5)).unwrap(), INSIDE);
    }

    #[test]
    fn test_invalid_cylinder() {
        assert!(Cylinder::new(Vec3::zero(), 0.0, 0.0, 1.0).is_err());
        assert!(Cylinder::new(Vec3::zero(), 1.0, -1.0, 1.0).is_err());
        assert!(Cylinder::new(Vec3::zero(), 1.0, 1.0, 0.0).is_err());
    }
}
