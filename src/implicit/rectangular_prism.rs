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

/// An axis-aligned box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectangularPrism {
    /// Centre of the box.
    pub origin: Vec3,
    /// Half the extent of the box along each axis. The box covers
    /// `[origin - half_extent, origin + half_extent)`.
    pub half_extent: Vec3,
}

impl RectangularPrism {
    pub const DEFAULT_HALF_EXTENT: f32 = 0.25;

    /// Create a new rectangular prism from half the desired extents.
    pub fn new(origin: Vec3, half_extent: Vec3) -> Result<Self> {
        if !half_extent.all(|f| f > 0.0) {
            return Err(Error::invalid_parameter(
                "box",
                format!("half extents must be positive, got {:?}", half_extent),
            ));
        }
        Ok(Self {
            origin,
            half_extent,
        })
    }
}

impl Default for RectangularPrism {
    fn default() -> Self {
        Self {
            origin: Vec3::zero(),
            half_extent: Vec3::from_scalar(Self::DEFAULT_HALF_EXTENT),
        }
    }
}

impl Evaluate for RectangularPrism {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let local = p - self.origin;
        let lower = local + self.half_extent;
        let upper = self.half_extent - local;
        Ok(density(lower.all(|f| f >= 0.0) && upper.all(|f| f > 0.0)))
    }
}
