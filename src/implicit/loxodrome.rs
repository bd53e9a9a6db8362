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
    density::{density, Density, OUTSIDE},
    error::{Error, Result},
    math::Vec3,
    source::Evaluate,
};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// A band following a rhumb line around a spherical shell.
///
/// The spiral crosses every meridian at the same angle, reaching longitude
/// `slope * ln(tan(pi/4 + latitude/2))` at each latitude and winding
/// endlessly towards both poles. The poles themselves are never inside.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Loxodrome {
    pub origin: Vec3,
    /// Radius of the sphere the band is wrapped on.
    pub radius: f32,
    /// Radial thickness of the shell.
    pub thickness: f32,
    /// Width of the band, measured as arc length along a parallel.
    pub width: f32,
    /// Longitude gained per unit of Mercator latitude.
    pub slope: f32,
}

impl Loxodrome {
    pub const DEFAULT_RADIUS: f32 = 0.5;
    pub const DEFAULT_THICKNESS: f32 = 0.05;
    pub const DEFAULT_WIDTH: f32 = 0.1;
    pub const DEFAULT_SLOPE: f32 = 1.0;

    pub fn new(origin: Vec3, radius: f32, thickness: f32, width: f32, slope: f32) -> Result<Self> {
        for (name, value) in &[("radius", radius), ("thickness", thickness), ("width", width)] {
            if !(*value > 0.0) {
                return Err(Error::invalid_parameter(
                    "loxodrome",
                    format!("{} must be positive, got {}", name, value),
                ));
            }
        }
        if !slope.is_finite() {
            return Err(Error::invalid_parameter(
                "loxodrome",
                format!("slope must be finite, got {}", slope),
            ));
        }
        Ok(Self {
            origin,
            radius,
            thickness,
            width,
            slope,
        })
    }

    /// Longitude of the spiral at `latitude`, `None` at the poles.
    fn spiral_longitude(&self, latitude: f32) -> Option<f32> {
        let mercator = (FRAC_PI_4 + latitude / 2.0).tan().ln();
        let longitude = self.slope * mercator;
        if longitude.is_finite() {
            Some(longitude)
        } else {
            None
        }
    }
}

impl Evaluate for Loxodrome {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let local = p - self.origin;
        let r = local.len();
        if (r - self.radius).abs() >= self.thickness / 2.0 || r == 0.0 {
            return Ok(OUTSIDE);
        }

        // Longitude is undefined on the polar axis
        let phi = (local.z / r).max(-1.0).min(1.0).acos();
        if phi == 0.0 || phi == PI || local.xy().len_sq() == 0.0 {
            return Ok(OUTSIDE);
        }
        let latitude = FRAC_PI_2 - phi;
        let longitude = match self.spiral_longitude(latitude) {
            Some(longitude) => longitude,
            None => return Ok(OUTSIDE),
        };

        let theta = local.y.atan2(local.x);
        let delta = (theta - longitude + PI).rem_euclid(2.0 * PI) - PI;
        let arc = delta.abs() * self.radius * latitude.cos();
        Ok(density(arc < self.width / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::INSIDE;
    use crate::math::vec3;

    fn loxodrome() -> Loxodrome {
        Loxodrome::new(Vec3::zero(), 1.0, 0.2, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_equator_crossing() {
        // At the equator the spiral sits on longitude zero
        let l = loxodrome();
        assert_eq!(l.evaluate(vec3(1.0, 0.0, 0.0)).unwrap(), INSIDE);
        assert_eq!(l.evaluate(vec3(-1.0, 0.0, 0.0)).unwrap(), OUTSIDE);
        assert_eq!(l.evaluate(vec3(0.5, 0.0, 0.0)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_follows_spiral() {
        let l = loxodrome();
        let latitude = 0.6f32;
        let longitude = (FRAC_PI_4 + latitude / 2.0).tan().ln();
        let on_spiral = vec3(
            latitude.cos() * longitude.cos(),
            latitude.cos() * longitude.sin(),
            latitude.sin(),
        );
        assert_eq!(l.evaluate(on_spiral).unwrap(), INSIDE);
        assert_eq!(l.evaluate(vec3(-on_spiral.x, -on_spiral.y, on_spiral.z)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_poles_are_outside() {
        let l = loxodrome();
        assert_eq!(l.evaluate(vec3(0.0, 0.0, 1.0)).unwrap(), OUTSIDE);
        assert_eq!(l.evaluate(vec3(0.0, 0.0, -1.0)).unwrap(), OUTSIDE);
        assert_eq!(l.evaluate(Vec3::zero()).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_invalid_loxodrome() {
        assert!(Loxodrome::new(Vec3::zero(), 1.0, 0.0, 0.1, 1.0).is_err());
        assert!(Loxodrome::new(Vec3::zero(), 1.0, 0.1, 0.1, std::f32::INFINITY).is_err());
    }
}
