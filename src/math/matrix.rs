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

use super::vector::{vec3, Vec3};

/// A 4x4 homogeneous matrix, stored row-major.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    /// `rows[i][j]` is row `i`, column `j`. Translation lives in column 3.
    pub rows: [[f32; 4]; 4],
}

impl Mat4 {
    /// The matrix that leaves every point in place.
    pub const fn identity() -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Moves points by `offset`.
    pub fn translation(offset: Vec3) -> Self {
        let mut m = Self::identity();
        m.rows[0][3] = offset.x;
        m.rows[1][3] = offset.y;
        m.rows[2][3] = offset.z;
        m
    }

    /// Scales each axis about the origin.
    pub fn scaling(factors: Vec3) -> Self {
        let mut m = Self::identity();
        m.rows[0][0] = factors.x;
        m.rows[1][1] = factors.y;
        m.rows[2][2] = factors.z;
        m
    }

    /// Rotation by `radians` about `axis` (right-handed), or `None` if the
    /// axis has no direction.
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Option<Self> {
        let a = axis.normalised()?;
        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;

        Some(Self {
            rows: [
                [
                    t * a.x * a.x + c,
                    t * a.x * a.y - s * a.z,
                    t * a.x * a.z + s * a.y,
                    0.0,
                ],
                [
                    t * a.x * a.y + s * a.z,
                    t * a.y * a.y + c,
                    t * a.y * a.z - s * a.x,
                    0.0,
                ],
                [
                    t * a.x * a.z - s * a.y,
                    t * a.y * a.z + s * a.x,
                    t * a.z * a.z + c,
                    0.0,
                ],
                [0.0, 0.0, 0.0, 1.0],
            ],
        })
    }

    /// Swap rows and columns. For a pure rotation this is its inverse.
    pub fn transpose(&self) -> Self {
        let mut m = Self::identity();
        for (i, row) in self.rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                m.rows[j][i] = *value;
            }
        }
        m
    }

    /// Apply to a point (implicit w = 1).
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let r = &self.rows;
        vec3(
            r[0][0] * p.x + r[0][1] * p.y + r[0][2] * p.z + r[0][3],
            r[1][0] * p.x + r[1][1] * p.y + r[1][2] * p.z + r[1][3],
            r[2][0] * p.x + r[2][1] * p.y + r[2][2] * p.z + r[2][3],
        )
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, other: Mat4) -> Mat4 {
        let mut m = Mat4 {
            rows: [[0.0; 4]; 4],
        };
        for i in 0..4 {
            for j in 0..4 {
                m.rows[i][j] = (0..4).map(|k| self.rows[i][k] * other.rows[k][j]).sum();
            }
        }
        m
    }
}

/// An affine operation on points.
///
/// Shapes are evaluated by walking from world space into a child's local
/// space, so transform nodes mostly call [`Transform::apply_inverse`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Transform {
    Translation(Vec3),
    /// Both matrices are computed once, when the rotation is built.
    Rotation { matrix: Mat4, inverse: Mat4 },
    Scaling(Vec3),
}

impl Transform {
    pub fn translation(offset: Vec3) -> Self {
        Transform::Translation(offset)
    }

    /// Rotation of `degrees` about `axis`, or `None` for a zero axis.
    pub fn rotation(axis: Vec3, degrees: f32) -> Option<Self> {
        let matrix = Mat4::from_axis_angle(axis, degrees.to_radians())?;
        // orthonormal, so the transpose is the inverse
        let inverse = matrix.transpose();
        Some(Transform::Rotation { matrix, inverse })
    }

    /// Per-axis scaling, or `None` if any factor is zero.
    pub fn scaling(factors: Vec3) -> Option<Self> {
        if factors.any(|f| f == 0.0) {
            None
        } else {
            Some(Transform::Scaling(factors))
        }
    }

    /// The homogeneous matrix of this transform.
    pub fn matrix(&self) -> Mat4 {
        match self {
            Transform::Translation(offset) => Mat4::translation(*offset),
            Transform::Rotation { matrix, .. } => *matrix,
            Transform::Scaling(factors) => Mat4::scaling(*factors),
        }
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        match self {
            Transform::Translation(offset) => p + *offset,
            Transform::Rotation { matrix, .. } => matrix.transform_point(p),
            Transform::Scaling(factors) => p * *factors,
        }
    }

    pub fn apply_inverse(&self, p: Vec3) -> Vec3 {
        match self {
            Transform::Translation(offset) => p - *offset,
            Transform::Rotation { inverse, .. } => inverse.transform_point(p),
            Transform::Scaling(factors) => p / *factors,
        }
    }
}
