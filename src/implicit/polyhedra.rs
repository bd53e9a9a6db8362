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

//! Platonic solids described by norm tests rather than faces.

use crate::{
    density::{density, Density},
    error::{Error, Result},
    math::Vec3,
    source::Evaluate,
};

fn check_size(kind: &'static str, size: f32) -> Result<()> {
    if size > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_parameter(
            kind,
            format!("size must be positive, got {}", size),
        ))
    }
}

/// A regular octahedron: the L1 ball `|x| + |y| + |z| < size`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Octahedron {
    pub origin: Vec3,
    /// Distance from the centre to each vertex.
    pub size: f32,
}

impl Octahedron {
    pub const DEFAULT_SIZE: f32 = 0.5;

    pub fn new(origin: Vec3, size: f32) -> Result<Self> {
        check_size("octahedron", size)?;
        Ok(Self { origin, size })
    }
}

impl Evaluate for Octahedron {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        Ok(density((p - self.origin).l1_norm() < self.size))
    }
}

/// A regular tetrahedron inscribed in the cube `[-size, size]^3`, with
/// vertices at `(size, size, size)`, `(-size, -size, size)`,
/// `(size, -size, -size)` and `(-size, size, -size)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tetrahedron {
    pub origin: Vec3,
    pub size: f32,
}

impl Tetrahedron {
    pub const DEFAULT_SIZE: f32 = 0.5;

    pub fn new(origin: Vec3, size: f32) -> Result<Self> {
        check_size("tetrahedron", size)?;
        Ok(Self { origin, size })
    }
}

impl Evaluate for Tetrahedron {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let l = p - self.origin;
        // Each face plane pair folds into one absolute value
        let lower = (l.x + l.y).abs() - l.z;
        let upper = (l.x - l.y).abs() + l.z;
        Ok(density(lower.max(upper) < self.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::{INSIDE, OUTSIDE};
    use crate::math::vec3;

    #[test]
    fn test_octahedron() {
        let octahedron = Octahedron::new(Vec3::zero(), 1.0).unwrap();

        assert_eq!(octahedron.evaluate(Vec3::zero()).unwrap(), INSIDE);
        assert_eq!(octahedron.evaluate(vec3(0.9, 0.0, 0.0)).unwrap(), INSIDE);
        assert_eq!(octahedron.evaluate(vec3(0.4, -0.4, 0.4)).unwrap(), OUTSIDE);
        assert_eq!(octahedron.evaluate(vec3(0.3, -0.3, 0.3)).unwrap(), INSIDE);
    }

    #[test]
    fn test_tetrahedron() {
        let tetrahedron = Tetrahedron::new(Vec3::zero(), 1.0).unwrap();

        assert_eq!(tetrahedron.evaluate(Vec3::zero()).unwrap(), INSIDE);
        // Just inside each vertex
        for v in &[
            vec3(1.0, 1.0, 1.0),
            vec3(-1.0, -1.0, 1.0),
            vec3(1.0, -1.0, -1.0),
            vec3(-1.0, 1.0, -1.0),
        ] {
            assert_eq!(tetrahedron.evaluate(*v * 0.9).unwrap(), INSIDE);
            assert_eq!(tetrahedron.evaluate(-*v * 0.9).unwrap(), OUTSIDE);
        }
    }

    #[test]
    fn test_invalid_size() {
        assert!(Octahedron::new(Vec3::zero(), 0.0).is_err());
        assert!(Tetrahedron::new(Vec3::zero(), -1.0).is_err());
    }
}
