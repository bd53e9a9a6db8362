// Copyright 2018 Tristam MacDonald
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
    density::Density,
    error::Result,
    math::{Vec2, Vec3},
};
use std::{fmt::Debug, sync::Arc};

/// A shape that can be sampled at world-space points.
pub trait Evaluate {
    /// Samples the occupancy at `p`.
    ///
    /// Must be a pure function of `p` and the shape's parameters. Built-in
    /// shapes never fail; errors only come from a [`Containment`] solid.
    fn evaluate(&self, p: Vec3) -> Result<Density>;
}

/// A 2D shape sampled on a plane.
pub trait EvaluatePlanar {
    fn evaluate_planar(&self, p: Vec2) -> Result<Density>;
}

/// A closed polygon mesh that can answer point-in-solid queries.
///
/// Implemented outside this crate, typically by a spatial hash over the
/// mesh's triangles. Implementations should report an unclosed mesh with
/// [`Error::UnclosedSolid`](crate::Error::UnclosedSolid) rather than
/// answering `false`.
pub trait Containment: Debug + Send + Sync {
    fn contains_point(&self, p: Vec3) -> Result<bool>;
}

impl<T: Evaluate + ?Sized> Evaluate for &T {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        (**self).evaluate(p)
    }
}

impl<T: Evaluate + ?Sized> Evaluate for Arc<T> {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        (**self).evaluate(p)
    }
}

impl<T: EvaluatePlanar + ?Sized> EvaluatePlanar for Arc<T> {
    fn evaluate_planar(&self, p: Vec2) -> Result<Density> {
        (**self).evaluate_planar(p)
    }
}
