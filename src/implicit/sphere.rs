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

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    /// The centre of the sphere.
    pub origin: Vec3,
    /// The radius of the sphere. Points exactly on the surface are outside.
    pub radius: f32,
}

impl Sphere {
    pub const DEFAULT_RADIUS: f32 = 0.5;

    /// Create a new sphere from the desired centre and radius.
    pub fn new(origin: Vec3, radius: f32) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(Error::invalid_parameter(
                "sphere",
                format!("radius must be positive, got {}", radius),
            ));
        }
        Ok(Self { origin, radius })
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            origin: Vec3::zero(),
            radius: Self::DEFAULT_RADIUS,
        }
    }
}

impl Evaluate for Sphere {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        Ok(density((p - self.origin).len() < self.radius))
    }
}
