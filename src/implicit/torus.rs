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
    math::Vec3,
    source::Evaluate,
};

/// A torus lying in the local xy plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Torus {
    pub origin: Vec3,
    /// The radius from the center point to the middle of the outer ring.
    pub radius: f32,
    /// The radius of the outer ring itself.
    pub tube_radius: f32,
}

impl Torus {
    pub const DEFAULT_RADIUS: f32 = 0.5;
    pub const DEFAULT_TUBE_RADIUS: f32 = 0.125;

    /// Create a new torus from the primary radius and radius of the outer ring.
    pub fn new(origin: Vec3, radius: f32, tube_radius: f32) -> Result<Self> {
        if !(tube_radius > 0.0 && radius > 0.0) {
            return Err(Error::invalid_parameter(
                "torus",
                format!(
                    "radii must be positive, got {} and {}",
                    radius, tube_radius
                ),
            ));
        }
        Ok(Self {
            origin,
            radius,
            tube_radius,
        })
    }
}

impl Evaluate for Torus {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let local = p - self.origin;
        let q_x = local.xy().len() - self.radius;
        Ok(density(
            q_x * q_x + local.z * local.z < self.tube_radius * self.tube_radius,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::{INSIDE, OUTSIDE};
    use crate::math::vec3;

    #[test]
    fn test_torus() {
        let torus = Torus::new(Vec3::zero(), 8.0, 2.0).unwrap();

        assert_eq!(torus.evaluate(Vec3::zero()).unwrap(), OUTSIDE);
        assert_eq!(torus.evaluate(vec3(8.0, 0.0, 0.0)).unwrap(), INSIDE);
        assert_eq!(torus.evaluate(vec3(0.0, -9.5, 1.0)).unwrap(), INSIDE);
        assert_eq!(torus.evaluate(vec3(10.0, 0.0, 0.0)).unwrap(), OUTSIDE);
        assert_eq!(torus.evaluate(vec3(8.0, 0.0, 8.0)).unwrap(), OUTSIDE);
    }
}
