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
    error::Result,
    math::Vec3,
    source::{Containment, Evaluate},
};
use std::sync::Arc;

/// An arbitrary closed polygon mesh, placed at `origin`.
///
/// Inside tests are delegated to the [`Containment`] implementation, whose
/// errors (e.g. an unclosed mesh) propagate out of `evaluate`.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    pub origin: Vec3,
    pub solid: Arc<dyn Containment>,
}

impl Polyhedron {
    pub fn new(origin: Vec3, solid: Arc<dyn Containment>) -> Self {
        Self { origin, solid }
    }
}

impl Evaluate for Polyhedron {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let inside = self.solid.contains_point(p - self.origin)?;
        Ok(density(inside))
    }
}
