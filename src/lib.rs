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

//! Constructive solid geometry over binary occupancy: build shape trees,
//! sample them on a regular grid, average the samples into voxels, and
//! extract a triangle mesh with marching cubes.

/// Common math types
pub mod math;

/// Errors raised throughout the pipeline.
pub mod error;

/// Occupancy values and their projection onto isolevels.
pub mod density;

/// Traits for sampling shapes and external solids
pub mod source;

/// Shape expressions built from primitives, combinators and transforms.
pub mod implicit;

/// Lattice geometry shared by sampling, rasterization and meshing.
pub mod grid;

/// Sampling shapes at grid corners.
pub mod sampler;

/// Averaging corner samples into voxels.
pub mod raster;

/// Algorithms for traversing bounded regions of sampled fields.
pub mod traversal;

/// Utilities for outputting mesh data in specific formats.
pub mod extractor;

/// Triangle meshes and their topology.
pub mod mesh;

/// Corner numbering and case tables for marching cubes.
pub mod marching_cubes_tables;

mod marching_cubes;
mod marching_cubes_impl;

pub use self::{
    density::{Density, Level, DENSITY_ISOLEVEL, INSIDE, OUTSIDE},
    error::{Error, Result},
    grid::{Dimensions, Grid, GridOptions},
    implicit::{Expression, Kind, Profile, Shape, ShapeBuilder, ShapeDescription},
    marching_cubes::*,
    mesh::{Mesh, MeshTopology, Triangle},
    raster::Raster,
    sampler::Samples,
    source::{Containment, Evaluate, EvaluatePlanar},
};
