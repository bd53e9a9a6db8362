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

use super::Shape;
use crate::{
    density::Density,
    error::{Error, Result},
    math::{Transform, Vec3},
    source::Evaluate,
};
use std::sync::Arc;

/// An operand moved by a translation, rotation or scaling.
///
/// Evaluation maps the world point back into the operand's frame with the
/// inverse transform.
#[derive(Debug, Clone)]
pub struct Transformed {
    /// Maps the operand's frame into world space.
    pub transform: Transform,
    /// The shape being moved.
    pub operand: Arc<Shape>,
}

impl Transformed {
    pub fn translate(offset: Vec3, operand: Arc<Shape>) -> Self {
        Self {
            transform: Transform::translation(offset),
            operand,
        }
    }

    /// Rotate by `degrees` about `axis`, which passes through the world origin.
    pub fn rotate(axis: Vec3, degrees: f32, operand: Arc<Shape>) -> Result<Self> {
        let transform = Transform::rotation(axis, degrees).ok_or_else(|| {
            Error::invalid_parameter("rotate", format!("rotation axis {:?} has no direction", axis))
        })?;
        Ok(Self { transform, operand })
    }

    /// Scale by `factors` about the world origin. A zero factor collapses
    /// the operand and is rejected.
    pub fn scale(factors: Vec3, operand: Arc<Shape>) -> Result<Self> {
        let transform = Transform::scaling(factors).ok_or_else(|| Error::ZeroFactor {
            kind: "scale",
            parameter: "factor",
            axis: (0..3).find(|&axis| factors[axis] == 0.0).unwrap_or_default(),
        })?;
        Ok(Self { transform, operand })
    }
}

impl Evaluate for Transformed {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        self.operand.evaluate(self.transform.apply_inverse(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::{INSIDE, OUTSIDE};
    use crate::implicit::{RectangularPrism, Sphere};
    use crate::math::vec3;

    fn unit_sphere() -> Arc<Shape> {
        Arc::new(Sphere::new(Vec3::zero(), 1.0).unwrap().into())
    }

    #[test]
    fn test_translate() {
        let t = Transformed::translate(vec3(5.0, 0.0, 0.0), unit_sphere());

        assert_eq!(t.evaluate(vec3(5.0, 0.0, 0.0)).unwrap(), INSIDE);
        assert_eq!(t.evaluate(vec3(5.5, 0.5, 0.0)).unwrap(), INSIDE);
        assert_eq!(t.evaluate(Vec3::zero()).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_scale() {
        let s = Transformed::scale(vec3(3.0, 1.0, 1.0), unit_sphere()).unwrap();

        assert_eq!(s.evaluate(vec3(2.5, 0.0, 0.0)).unwrap(), INSIDE);
        assert_eq!(s.evaluate(vec3(0.0, 1.5, 0.0)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        match Transformed::scale(vec3(1.0, 0.0, 1.0), unit_sphere()) {
            Err(Error::ZeroFactor { axis: 1, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rotate() {
        // A long thin box along x, turned a quarter about z, lies along y
        let bar = RectangularPrism::new(Vec3::zero(), vec3(2.0, 0.25, 0.25)).unwrap();
        let r = Transformed::rotate(vec3(0.0, 0.0, 1.0), 90.0, Arc::new(bar.into())).unwrap();

        assert_eq!(r.evaluate(vec3(0.0, 1.5, 0.0)).unwrap(), INSIDE);
        assert_eq!(r.evaluate(vec3(1.5, 0.0, 0.0)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_zero_axis_is_rejected() {
        assert!(Transformed::rotate(Vec3::zero(), 30.0, unit_sphere()).is_err());
    }
}
