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
    density::Density,
    error::{Error, Result},
    grid::Grid,
    sampler::Samples,
    source::Evaluate,
};
use tracing::debug;

/// Corners of a voxel as (slice, row, column) offsets, in summation order.
const VOXEL_CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [0, 0, 1],
    [0, 1, 0],
    [0, 1, 1],
    [1, 0, 0],
    [1, 0, 1],
    [1, 1, 0],
    [1, 1, 1],
];

/// One density per voxel, in raster offset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub values: Vec<Density>,
}

impl Raster {
    /// The raw voxel buffer, column fastest, then row, then slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Grid {
    /// Sample `expression` on the corners and average them into voxels.
    pub fn rasterize<E>(&self, expression: &E) -> Result<Raster>
    where
        E: Evaluate + ?Sized,
    {
        let samples = self.evaluate_samples(expression, false)?;
        self.rasterize_samples(&samples)
    }

    /// Average the eight corners of every voxel, truncating the mean.
    pub fn rasterize_samples(&self, samples: &Samples) -> Result<Raster> {
        if samples.len() != self.samples_size() {
            return Err(Error::FieldSize {
                expected: self.samples_size(),
                found: samples.len(),
            });
        }

        let d = self.dimensions();
        let increments = self.sample_increments();
        let mut values = Vec::with_capacity(self.raster_size());

        for slice in 0..d.slices {
            for row in 0..d.rows {
                for column in 0..d.columns {
                    let base =
                        slice * increments.slice + row * increments.row + column * increments.column;
                    let sum: u32 = VOXEL_CORNERS
                        .iter()
                        .map(|[s, r, c]| {
                            let offset = base
                                + s * increments.slice
                                + r * increments.row
                                + c * increments.column;
                            u32::from(samples.values[offset])
                        })
                        .sum();
                    values.push((sum / 8) as Density);
                }
            }
        }

        debug!(voxels = values.len(), "Rasterized samples");
        Ok(Raster { values })
    }
}
