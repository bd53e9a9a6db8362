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
use crate::{error::Result, grid::Grid, marching_cubes_tables::CORNERS, math::Vec3};

/// Level given to corners of the padding ring, above any real sample.
///
/// Being infinite, it places every crossing towards the ring exactly on the
/// real corner, so caps lie flat in the boundary planes of the lattice.
pub const PADDING_LEVEL: f32 = std::f32::INFINITY;

/// Traverses every cube of a lattice of field values, including the cubes
/// reaching one step beyond the lattice on every side.
///
/// Corners outside the lattice are never read: their level is
/// [`PADDING_LEVEL`] and their position is extrapolated from the nearest
/// real corner with [`Grid::neighbor_point`].
pub struct PaddedGrid<'a> {
    grid: &'a Grid,
    counts: [usize; 3],
    levels: &'a [f32],
    points: &'a [Vec3],
}

impl<'a> PaddedGrid<'a> {
    /// `levels` and `points` hold `counts[0] * counts[1] * counts[2]` entries,
    /// column fastest. The caller checks the lengths.
    pub fn new(grid: &'a Grid, counts: [usize; 3], levels: &'a [f32], points: &'a [Vec3]) -> Self {
        debug_assert_eq!(levels.len(), counts.iter().product::<usize>());
        debug_assert_eq!(points.len(), levels.len());
        Self {
            grid,
            counts,
            levels,
            points,
        }
    }

    fn offset(&self, index: [usize; 3]) -> usize {
        (index[2] * self.counts[1] + index[1]) * self.counts[0] + index[0]
    }

    /// Level and position of a corner, which may lie on the padding ring.
    fn corner(&self, index: [isize; 3]) -> (f32, Vec3) {
        let mut direction = [0i32; 3];
        let mut nearest = [0usize; 3];
        for axis in 0..3 {
            let n = self.counts[axis] as isize;
            let i = index[axis];
            if i < 0 {
                direction[axis] = -1;
            } else if i >= n {
                direction[axis] = 1;
            }
            nearest[axis] = (i - direction[axis] as isize) as usize;
        }

        let offset = self.offset(nearest);
        if direction == [0; 3] {
            (self.levels[offset], self.points[offset])
        } else {
            let point = self.grid.neighbor_point(self.points[offset], direction);
            (PADDING_LEVEL, point)
        }
    }

    /// Invoke `callback` with the corner positions and levels of each cube,
    /// corners numbered as in [`CORNERS`]. Stops at the first error.
    pub fn traverse<C>(&self, mut callback: C) -> Result<()>
    where
        C: FnMut(&[Vec3; 8], &[f32; 8]) -> Result<()>,
    {
        let [columns, rows, slices] = self.counts;
        let mut corners = [Vec3::zero(); 8];
        let mut levels = [0f32; 8];

        for z in -1..slices as isize {
            for y in -1..rows as isize {
                for x in -1..columns as isize {
                    for i in 0..8 {
                        let (level, corner) = self.corner([
                            x + CORNERS[i][0] as isize,
                            y + CORNERS[i][1] as isize,
                            z + CORNERS[i][2] as isize,
                        ]);
                        levels[i] = level;
                        corners[i] = corner;
                    }

                    callback(&corners, &levels)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Dimensions;
    use crate::math::vec3;

    fn corner_lattice(grid: &Grid) -> (Vec<f32>, Vec<Vec3>) {
        let [columns, rows, slices] = grid.sample_counts();
        let mut levels = vec![];
        let mut points = vec![];
        for s in 0..slices {
            for r in 0..rows {
                for c in 0..columns {
                    levels.push(-1.0);
                    points.push(grid.corner_point(c, r, s).unwrap());
                }
            }
        }
        (levels, points)
    }

    #[test]
    fn test_visits_padding_ring() {
        let grid = Grid::new(Dimensions::new(2, 1, 1), Vec3::zero(), vec3(2.0, 1.0, 1.0)).unwrap();
        let (levels, points) = corner_lattice(&grid);
        let padded = PaddedGrid::new(&grid, grid.sample_counts(), &levels, &points);

        let mut cubes = 0;
        let mut real_cubes = 0;
        padded
            .traverse(|corners, levels| {
                cubes += 1;
                if levels.iter().all(|&l| l == -1.0) {
                    real_cubes += 1;
                }
                // Padded corners stay one lattice step apart
                for &[u, v] in &[[0, 1], [0, 3], [0, 4]] {
                    let step = corners[v] - corners[u];
                    assert!((step.len() - 1.0).abs() < 1e-6);
                }
                Ok(())
            })
            .unwrap();

        // (3 + 1) * (2 + 1) * (2 + 1) cubes including the ring
        assert_eq!(cubes, 36);
        assert_eq!(real_cubes, 2);
    }

    #[test]
    fn test_padded_corners() {
        let grid = Grid::new(Dimensions::cube(1), Vec3::zero(), Vec3::one()).unwrap();
        let (levels, points) = corner_lattice(&grid);
        let padded = PaddedGrid::new(&grid, grid.sample_counts(), &levels, &points);

        assert_eq!(padded.corner([0, 0, 0]), (-1.0, Vec3::zero()));
        assert_eq!(padded.corner([-1, 0, 0]), (PADDING_LEVEL, vec3(-1.0, 0.0, 0.0)));
        assert_eq!(padded.corner([2, 2, -1]), (PADDING_LEVEL, vec3(2.0, 2.0, -1.0)));
    }
}
