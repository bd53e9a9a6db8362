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
    density::{Density, INSIDE},
    error::Result,
    math::Vec3,
    source::Evaluate,
};

/// The same density everywhere; fills the whole grid by default.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Constant {
    pub density: Density,
}

impl Constant {
    pub fn new(density: Density) -> Self {
        Self { density }
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::new(INSIDE)
    }
}

impl Evaluate for Constant {
    fn evaluate(&self, _: Vec3) -> Result<Density> {
        Ok(self.density)
    }
}
