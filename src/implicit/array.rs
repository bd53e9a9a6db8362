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
    density::{density, Density, OUTSIDE},
    error::{Error, Result},
    math::{vec3, Vec3},
    source::Evaluate,
};
use std::sync::Arc;

/// A lattice of copies of one operand.
///
/// Copies sit at `(i, j, k) * step` for every `i` in `0..=repeats[0]`, `j` in
/// `0..=repeats[1]` and `k` in `0..=repeats[2]`, so an axis with `n` repeats
/// holds `n + 1` copies. Every copy is evaluated, even once the point is
/// known to be inside.
#[derive(Debug, Clone)]
pub struct Array {
    /// Offset between neighbouring copies along each axis.
    pub step: Vec3,
    /// Extra copies along each axis.
    pub repeats: [u32; 3],
    pub operand: Arc<Shape>,
}

impl Array {
    pub const DEFAULT_STEP: f32 = 0.3;
    pub const DEFAULT_REPEATS: [u32; 3] = [1, 1, 1];

    /// Fails if any repeated axis has a zero step.
    pub fn new(step: Vec3, repeats: [u32; 3], operand: Arc<Shape>) -> Result<Self> {
        if let Some(axis) = (0..3).find(|&axis| repeats[axis] > 0 && step[axis] == 0.0) {
            return Err(Error::ZeroFactor {
                kind: "array",
                parameter: "step",
                axis,
            });
        }
        Ok(Self {
            step,
            repeats,
            operand,
        })
    }

    /// Number of copies in the lattice.
    pub fn copies(&self) -> usize {
        self.repeats.iter().map(|&r| r as usize + 1).product()
    }
}

impl Evaluate for Array {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let [columns, rows, slices] = self.repeats;
        let mut inside = false;
        for k in 0..=slices {
            for j in 0..=rows {
                for i in 0..=columns {
                    let offset = self.step * vec3(i as f32, j as f32, k as f32);
                    inside |= self.operand.evaluate(p - offset)? != OUTSIDE;
                }
            }
        }
        Ok(density(inside))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::INSIDE;
    use crate::implicit::polyhedron::tests::LeakyCube;
    use crate::implicit::{Polyhedron, Sphere};

    fn sphere() -> Arc<Shape> {
        Arc::new(Sphere::new(Vec3::zero(), 0.25).unwrap().into())
    }

    #[test]
    fn test_repeats_are_inclusive() {
        let array = Array::new(vec3(1.0, 1.0, 1.0), [2, 0, 1], sphere()).unwrap();
        assert_eq!(array.copies(), 6);

        // Both the first and the last copy along each axis are present
        assert_eq!(array.evaluate(Vec3::zero()).unwrap(), INSIDE);
        assert_eq!(array.evaluate(vec3(2.0, 0.0, 0.0)).unwrap(), INSIDE);
        assert_eq!(array.evaluate(vec3(2.0, 0.0, 1.0)).unwrap(), INSIDE);
        assert_eq!(array.evaluate(vec3(3.0, 0.0, 0.0)).unwrap(), OUTSIDE);
        assert_eq!(array.evaluate(vec3(0.0, 1.0, 0.0)).unwrap(), OUTSIDE);
        assert_eq!(array.evaluate(vec3(0.0, 0.0, 2.0)).unwrap(), OUTSIDE);
        // Between copies
        assert_eq!(array.evaluate(vec3(0.5, 0.0, 0.0)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_every_copy_is_evaluated() {
        let leaky: Arc<Shape> = Arc::new(Polyhedron::new(Vec3::zero(), Arc::new(LeakyCube)).into());
        // The second copy is asked about z = 3.5, where the solid cannot answer
        let array = Array::new(vec3(0.0, 0.0, -3.0), [0, 0, 1], leaky).unwrap();

        match array.evaluate(vec3(0.5, 0.5, 0.5)) {
            Err(Error::UnclosedSolid(_)) => {}
            other => panic!("expected an unclosed solid error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_step_is_rejected() {
        match Array::new(vec3(1.0, 0.0, 1.0), [1, 1, 1], sphere()) {
            Err(Error::ZeroFactor { axis: 1, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        // An axis without repeats never uses its step
        assert!(Array::new(vec3(1.0, 0.0, 1.0), [1, 0, 1], sphere()).is_ok());
    }
}
