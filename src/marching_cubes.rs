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
    density::{Level, DENSITY_ISOLEVEL},
    error::{Error, Result},
    extractor::Extractor,
    grid::Grid,
    marching_cubes_impl::march_cube,
    math::Vec3,
    mesh::Mesh,
    raster::Raster,
    sampler::Samples,
    traversal::PaddedGrid,
};
use tracing::{debug, info};

/// A lattice of field values and the world position of each one.
///
/// Corner samples use [`Grid::sample_counts`] and the points recorded while
/// sampling; voxel averages use [`Grid::raster_counts`] and
/// [`Grid::raster_center_points`].
#[derive(Debug, Clone, Copy)]
pub struct Field<'a, V> {
    counts: [usize; 3],
    values: &'a [V],
    points: &'a [Vec3],
}

impl<'a, V> Field<'a, V> {
    /// `values` and `points` are laid out column fastest, then row, then slice.
    pub fn new(counts: [usize; 3], values: &'a [V], points: &'a [Vec3]) -> Result<Self> {
        let expected = counts.iter().product::<usize>();
        for &found in &[values.len(), points.len()] {
            if found != expected {
                return Err(Error::FieldSize { expected, found });
            }
        }
        Ok(Self {
            counts,
            values,
            points,
        })
    }

    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    pub fn values(&self) -> &'a [V] {
        self.values
    }

    pub fn points(&self) -> &'a [Vec3] {
        self.points
    }
}

/// Extracts meshes from sampled fields using the marching cubes algorithm.
///
/// Every cube of the lattice is visited, plus a ring of cubes one step
/// outside it whose outer corners count as infinitely far above the isolevel.
/// Solids touching the edge of the grid are therefore capped off in the
/// boundary planes rather than left open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchingCubes {
    isolevel: f32,
}

impl Default for MarchingCubes {
    /// Separates [`INSIDE`](crate::density::INSIDE) from
    /// [`OUTSIDE`](crate::density::OUTSIDE) densities.
    fn default() -> Self {
        Self::new(DENSITY_ISOLEVEL)
    }
}

impl MarchingCubes {
    /// Levels below `isolevel` are inside the surface.
    pub fn new(isolevel: f32) -> Self {
        Self { isolevel }
    }

    pub fn isolevel(&self) -> f32 {
        self.isolevel
    }

    /// Extract a mesh from a field whose values project through [`Level`].
    pub fn extract<V: Level>(&self, grid: &Grid, field: &Field<V>) -> Result<Mesh> {
        self.extract_with(grid, field, V::level)
    }

    /// Extract a mesh, projecting each value onto a level with `value_level`.
    pub fn extract_with<V, L>(&self, grid: &Grid, field: &Field<V>, value_level: L) -> Result<Mesh>
    where
        V: Copy,
        L: Fn(V) -> f32,
    {
        let mut mesh = Mesh::new();
        self.extract_into(grid, field, value_level, &mut mesh)?;
        Ok(mesh)
    }

    /// Stream triangles into `extractor`, returning how many were emitted.
    ///
    /// Triangles face away from the inside for right-handed lattices; the
    /// table order is kept for left-handed ones, which mirror it back.
    pub fn extract_into<V, L, E>(
        &self,
        grid: &Grid,
        field: &Field<V>,
        value_level: L,
        extractor: &mut E,
    ) -> Result<usize>
    where
        V: Copy,
        L: Fn(V) -> f32,
        E: Extractor + ?Sized,
    {
        let [columns, rows, slices] = field.counts;
        debug!(
            columns,
            rows,
            slices,
            isolevel = self.isolevel,
            "Extracting isosurface"
        );

        let levels: Vec<f32> = field.values.iter().map(|&v| value_level(v)).collect();
        let flip = grid.is_right_handed();
        let mut triangles = 0;

        PaddedGrid::new(grid, field.counts, &levels, field.points).traverse(
            |corners, levels| {
                march_cube(corners, levels, self.isolevel, |[a, b, c]| {
                    if flip {
                        extractor.extract_triangle([a, c, b]);
                    } else {
                        extractor.extract_triangle([a, b, c]);
                    }
                    triangles += 1;
                })
            },
        )?;

        info!(triangles, "Extracted isosurface");
        Ok(triangles)
    }

    /// Mesh corner samples. The samples must have been evaluated with their
    /// points recorded.
    pub fn extract_samples(&self, grid: &Grid, samples: &Samples) -> Result<Mesh> {
        let points = samples.points.as_ref().ok_or(Error::MissingPoints)?;
        let field = Field::new(grid.sample_counts(), &samples.values, points)?;
        self.extract(grid, &field)
    }

    /// Mesh voxel averages, placing each value at its voxel centre.
    pub fn extract_raster(&self, grid: &Grid, raster: &Raster) -> Result<Mesh> {
        let points = grid.raster_center_points();
        let field = Field::new(grid.raster_counts(), &raster.values, &points)?;
        self.extract(grid, &field)
    }
}
