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
    error::Result,
    grid::{Axis, Grid},
    math::Vec3,
    source::Evaluate,
};
use tracing::debug;

/// Densities sampled at every corner of a grid, in sample offset order.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    pub values: Vec<Density>,
    /// The world position of each corner, when recorded.
    pub points: Option<Vec<Vec3>>,
}

impl Samples {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Grid {
    /// Evaluate `expression` at every corner, slice by slice, row by row.
    ///
    /// Corner positions are accumulated by stepping a running point along
    /// each axis rather than recomputed from their indices. With
    /// `record_points` the positions are kept for meshing.
    pub fn evaluate_samples<E>(&self, expression: &E, record_points: bool) -> Result<Samples>
    where
        E: Evaluate + ?Sized,
    {
        let [columns, rows, slices] = self.sample_counts();
        let size = self.samples_size();
        debug!(columns, rows, slices, record_points, "Sampling expression");

        let delta_column = self.delta(Axis::Column);
        let delta_row = self.delta(Axis::Row);
        let delta_slice = self.delta(Axis::Slice);

        let mut values = Vec::with_capacity(size);
        let mut points = if record_points {
            Some(Vec::with_capacity(size))
        } else {
            None
        };

        let mut slice_start = self.origin();
        for _ in 0..slices {
            let mut row_start = slice_start;
            for _ in 0..rows {
                let mut point = row_start;
                for _ in 0..columns {
                    values.push(expression.evaluate(point)?);
                    if let Some(points) = points.as_mut() {
                        points.push(point);
                    }
                    point += delta_column;
                }
                row_start += delta_row;
            }
            slice_start += delta_slice;
        }

        debug!(samples = values.len(), "Sampled expression");
        Ok(Samples { values, points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::{INSIDE, OUTSIDE};
    use crate::grid::Dimensions;
    use crate::implicit::{Constant, Shape, Sphere};
    use crate::math::vec3;
    use approx::assert_relative_eq;

    #[test]
    fn test_samples_follow_offsets() {
        let grid = Grid::new(Dimensions::new(3, 2, 2), vec3(-1.5, -1.0, -1.0), vec3(3.0, 2.0, 2.0))
            .unwrap();
        let sphere = Shape::from(Sphere::new(Vec3::zero(), 0.75).unwrap());

        let samples = grid.evaluate_samples(&sphere, true).unwrap();
        assert_eq!(samples.len(), grid.samples_size());

        let points = samples.points.as_ref().unwrap();
        for slice in 0..=2 {
            for row in 0..=2 {
                for column in 0..=3 {
                    let offset = grid.sample_offset(column, row, slice).unwrap();
                    let expected = grid.corner_point(column, row, slice).unwrap();
                    assert_relative_eq!(points[offset].x, expected.x, epsilon = 1e-6);
                    assert_relative_eq!(points[offset].y, expected.y, epsilon = 1e-6);
                    assert_relative_eq!(points[offset].z, expected.z, epsilon = 1e-6);
                    assert_eq!(
                        samples.values[offset],
                        sphere.evaluate(points[offset]).unwrap()
                    );
                }
            }
        }

        // Only the two corners either side of the centre lie within the sphere
        for &column in &[1, 2] {
            let offset = grid.sample_offset(column, 1, 1).unwrap();
            assert_eq!(samples.values[offset], INSIDE);
        }
        assert_eq!(samples.values[0], OUTSIDE);
        let inside = samples.values.iter().filter(|&&v| v == INSIDE).count();
        assert_eq!(inside, 2);
    }

    #[test]
    fn test_points_are_optional() {
        let grid = Grid::new(Dimensions::cube(2), Vec3::zero(), Vec3::one()).unwrap();
        let samples = grid.evaluate_samples(&Constant::default(), false).unwrap();

        assert!(samples.points.is_none());
        assert!(samples.values.iter().all(|&v| v == INSIDE));
    }
}
