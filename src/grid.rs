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

//! Lattice geometry shared by sampling, rasterization and meshing.
//!
//! ```text
//! +-+-+-+-+
//! |o|o|o|o|
//! +-+-+-+-+
//! |o|o|o|o|
//! +-+-+-+-+
//! ```
//!
//! Shapes are sampled on the corners (`+`), and voxels (`o`) average the
//! corners around them. The origin is the first corner. Buffers are laid out
//! with column fastest, then row, then slice.

use crate::{
    error::{Error, Result},
    math::{vec3, Vec3},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of voxels along each axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub columns: usize,
    pub rows: usize,
    pub slices: usize,
}

impl Dimensions {
    pub const fn new(columns: usize, rows: usize, slices: usize) -> Self {
        Self {
            columns,
            rows,
            slices,
        }
    }

    pub const fn cube(size: usize) -> Self {
        Self::new(size, size, size)
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.columns, self.rows, self.slices]
    }
}

/// The three lattice axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    Column = 0,
    Row = 1,
    Slice = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Column, Axis::Row, Axis::Slice];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Buffer strides for one step along each axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Increments {
    pub column: usize,
    pub row: usize,
    pub slice: usize,
}

/// Grid configuration as it appears in serialized settings.
///
/// Missing fields take the defaults of a 20cm box centred on the origin,
/// measured in millimetres. Either `dimensions` or `spacings` decides the
/// voxel count; when both are given `spacings` wins, and when neither is
/// given the spacing is 1mm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridOptions {
    pub dimensions: Option<Dimensions>,
    pub origin: Option<[f32; 3]>,
    /// Unit direction of the column, row and slice axes.
    pub directions: Option<[[f32; 3]; 3]>,
    pub extents: Option<[f32; 3]>,
    pub spacings: Option<[f32; 3]>,
}

impl GridOptions {
    pub const DEFAULT_ORIGIN: [f32; 3] = [-100.0, -100.0, -100.0];
    pub const DEFAULT_EXTENTS: [f32; 3] = [200.0, 200.0, 200.0];
    pub const DEFAULT_SPACINGS: [f32; 3] = [1.0, 1.0, 1.0];
    pub const DEFAULT_DIRECTIONS: [[f32; 3]; 3] =
        [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
}

/// Tolerance on the length of a direction vector.
const UNIT_TOLERANCE: f32 = 1e-4;

/// A regular lattice of `dimensions` voxels with an arbitrary orientation.
///
/// Immutable once built; `spacing = extent / dimension` along every axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Voxels per axis.
    dimensions: Dimensions,
    /// World position of the first corner.
    origin: Vec3,
    /// Unit vectors along the column, row and slice axes.
    directions: [Vec3; 3],
    /// World length of the lattice along each axis.
    extents: Vec3,
    /// `extents / dimensions`, per axis.
    spacings: Vec3,
    /// One lattice step along each axis, `directions[axis] * spacings[axis]`.
    deltas: [Vec3; 3],
}

impl Grid {
    /// An axis-aligned grid.
    pub fn new(dimensions: Dimensions, origin: Vec3, extents: Vec3) -> Result<Self> {
        Self::oriented(
            dimensions,
            origin,
            [
                vec3(1.0, 0.0, 0.0),
                vec3(0.0, 1.0, 0.0),
                vec3(0.0, 0.0, 1.0),
            ],
            extents,
        )
    }

    /// A grid whose column, row and slice axes point along `directions`.
    pub fn oriented(
        dimensions: Dimensions,
        origin: Vec3,
        directions: [Vec3; 3],
        extents: Vec3,
    ) -> Result<Self> {
        let counts = dimensions.as_array();
        for axis in Axis::ALL.iter().map(|a| a.index()) {
            if counts[axis] == 0 {
                return Err(Error::invalid_grid(format!(
                    "dimension {} is zero",
                    axis
                )));
            }
            if !(extents[axis] > 0.0 && extents[axis].is_finite()) {
                return Err(Error::invalid_grid(format!(
                    "extent {} must be positive and finite, got {}",
                    axis, extents[axis]
                )));
            }
            let length = directions[axis].len();
            if !((length - 1.0).abs() <= UNIT_TOLERANCE) {
                return Err(Error::invalid_grid(format!(
                    "direction {} is not unit length ({})",
                    axis, length
                )));
            }
        }
        if !origin.all(f32::is_finite) {
            return Err(Error::invalid_grid(format!(
                "origin {:?} is not finite",
                origin
            )));
        }

        let spacings = vec3(
            extents.x / dimensions.columns as f32,
            extents.y / dimensions.rows as f32,
            extents.z / dimensions.slices as f32,
        );
        let deltas = [
            directions[0] * spacings.x,
            directions[1] * spacings.y,
            directions[2] * spacings.z,
        ];

        Ok(Self {
            dimensions,
            origin,
            directions,
            extents,
            spacings,
            deltas,
        })
    }

    /// Resolve serialized options, filling in defaults.
    pub fn from_options(options: &GridOptions) -> Result<Self> {
        let origin = Vec3::from(options.origin.unwrap_or(GridOptions::DEFAULT_ORIGIN));
        let extents = Vec3::from(options.extents.unwrap_or(GridOptions::DEFAULT_EXTENTS));
        let raw = options
            .directions
            .unwrap_or(GridOptions::DEFAULT_DIRECTIONS);
        let directions = [Vec3::from(raw[0]), Vec3::from(raw[1]), Vec3::from(raw[2])];

        let dimensions = match (options.dimensions, options.spacings) {
            (Some(dimensions), None) => dimensions,
            (dimensions, spacings) => {
                if dimensions.is_some() {
                    warn!("Both dimensions and spacings specified, using spacings");
                }
                let spacings = Vec3::from(spacings.unwrap_or(GridOptions::DEFAULT_SPACINGS));
                dimensions_from_spacings(extents, spacings)?
            }
        };

        Self::oriented(dimensions, origin, directions, extents)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// World position of the first corner.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn directions(&self) -> [Vec3; 3] {
        self.directions
    }

    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    pub fn spacings(&self) -> Vec3 {
        self.spacings
    }

    /// World offset of one step along `axis`.
    pub fn delta(&self, axis: Axis) -> Vec3 {
        self.deltas[axis.index()]
    }

    pub fn deltas(&self) -> [Vec3; 3] {
        self.deltas
    }

    /// Whether the column, row and slice steps form a right-handed frame.
    pub fn is_right_handed(&self) -> bool {
        self.deltas[0].triple(self.deltas[1], self.deltas[2]) > 0.0
    }

    /// Corners per axis.
    pub fn sample_counts(&self) -> [usize; 3] {
        let d = self.dimensions;
        [d.columns + 1, d.rows + 1, d.slices + 1]
    }

    /// Voxels per axis.
    pub fn raster_counts(&self) -> [usize; 3] {
        self.dimensions.as_array()
    }

    pub fn sample_increments(&self) -> Increments {
        let d = self.dimensions;
        Increments {
            column: 1,
            row: d.columns + 1,
            slice: (d.rows + 1) * (d.columns + 1),
        }
    }

    pub fn raster_increments(&self) -> Increments {
        let d = self.dimensions;
        Increments {
            column: 1,
            row: d.columns,
            slice: d.rows * d.columns,
        }
    }

    /// Number of corners in the grid.
    pub fn samples_size(&self) -> usize {
        let d = self.dimensions;
        (d.columns + 1) * (d.rows + 1) * (d.slices + 1)
    }

    /// Number of voxels in the grid.
    pub fn raster_size(&self) -> usize {
        let d = self.dimensions;
        d.columns * d.rows * d.slices
    }

    /// Buffer offset of a corner, or `None` outside `[0, dimension]`.
    pub fn sample_offset(&self, column: usize, row: usize, slice: usize) -> Option<usize> {
        let d = self.dimensions;
        if column > d.columns || row > d.rows || slice > d.slices {
            return None;
        }
        let i = self.sample_increments();
        Some(slice * i.slice + row * i.row + column * i.column)
    }

    /// Buffer offset of a voxel, or `None` outside `[0, dimension)`.
    pub fn raster_offset(&self, column: usize, row: usize, slice: usize) -> Option<usize> {
        let d = self.dimensions;
        if column >= d.columns || row >= d.rows || slice >= d.slices {
            return None;
        }
        let i = self.raster_increments();
        Some(slice * i.slice + row * i.row + column * i.column)
    }

    fn lattice_point(&self, column: f32, row: f32, slice: f32) -> Vec3 {
        self.origin + self.deltas[0] * column + self.deltas[1] * row + self.deltas[2] * slice
    }

    /// World position of a corner.
    pub fn corner_point(&self, column: usize, row: usize, slice: usize) -> Option<Vec3> {
        self.sample_offset(column, row, slice)?;
        Some(self.lattice_point(column as f32, row as f32, slice as f32))
    }

    /// World position of the centre of a voxel.
    pub fn raster_center_point(&self, column: usize, row: usize, slice: usize) -> Option<Vec3> {
        self.raster_offset(column, row, slice)?;
        Some(self.lattice_point(
            column as f32 + 0.5,
            row as f32 + 0.5,
            slice as f32 + 0.5,
        ))
    }

    /// Every voxel centre, in raster order.
    pub fn raster_center_points(&self) -> Vec<Vec3> {
        let d = self.dimensions;
        let mut points = Vec::with_capacity(self.raster_size());
        for slice in 0..d.slices {
            for row in 0..d.rows {
                for column in 0..d.columns {
                    points.push(self.lattice_point(
                        column as f32 + 0.5,
                        row as f32 + 0.5,
                        slice as f32 + 0.5,
                    ));
                }
            }
        }
        points
    }

    /// Extrapolate from `point` by whole lattice steps, e.g. to reach a
    /// corner just outside the grid.
    pub fn neighbor_point(&self, point: Vec3, direction: [i32; 3]) -> Vec3 {
        point
            + self.deltas[0] * direction[0] as f32
            + self.deltas[1] * direction[1] as f32
            + self.deltas[2] * direction[2] as f32
    }

    /// The 12 edges of the grid's bounding box as pairs of world points.
    pub fn bounding_lines(&self) -> [[Vec3; 2]; 12] {
        let spans = [
            self.directions[0] * self.extents.x,
            self.directions[1] * self.extents.y,
            self.directions[2] * self.extents.z,
        ];
        let corner = |c: usize, r: usize, s: usize| {
            self.origin + spans[0] * c as f32 + spans[1] * r as f32 + spans[2] * s as f32
        };

        let mut lines = [[Vec3::zero(); 2]; 12];
        let mut i = 0;
        for c in 0..2 {
            for s in 0..2 {
                lines[i] = [corner(c, 0, s), corner(c, 1, s)];
                i += 1;
            }
            for r in 0..2 {
                lines[i] = [corner(c, r, 0), corner(c, r, 1)];
                i += 1;
            }
        }
        for s in 0..2 {
            for r in 0..2 {
                lines[i] = [corner(0, r, s), corner(1, r, s)];
                i += 1;
            }
        }
        lines
    }
}

fn dimensions_from_spacings(extents: Vec3, spacings: Vec3) -> Result<Dimensions> {
    let mut counts = [0usize; 3];
    for axis in 0..3 {
        if !(spacings[axis] > 0.0 && spacings[axis].is_finite()) {
            return Err(Error::invalid_grid(format!(
                "spacing {} must be positive and finite, got {}",
                axis, spacings[axis]
            )));
        }
        let exact = extents[axis] / spacings[axis];
        let rounded = exact.round();
        if !(rounded >= 1.0 && rounded.is_finite()) {
            return Err(Error::invalid_grid(format!(
                "extent {} holds no whole voxel of spacing {}",
                extents[axis], spacings[axis]
            )));
        }
        if (rounded - exact).abs() > 1e-3 {
            warn!(
                axis,
                exact = format!("{:.3}", exact),
                rounded,
                "Extent is not a multiple of the spacing, rounding the dimension"
            );
        }
        counts[axis] = rounded as usize;
    }
    Ok(Dimensions::new(counts[0], counts[1], counts[2]))
}
