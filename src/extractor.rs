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
use crate::{math::Vec3, mesh::Triangle};

/// Trait for outputting extracted triangles.
pub trait Extractor {
    /// Receives each triangle with its vertices in outward-facing order.
    fn extract_triangle(&mut self, vertices: [Vec3; 3]);
}

impl<E: Extractor + ?Sized> Extractor for &mut E {
    fn extract_triangle(&mut self, vertices: [Vec3; 3]) {
        (**self).extract_triangle(vertices)
    }
}

/// Output vertices as a tightly packed array of floats, discarding normals.
pub struct OnlyVertices<'a> {
    vertices: &'a mut Vec<f32>,
}

impl<'a> OnlyVertices<'a> {
    pub fn new(vertices: &'a mut Vec<f32>) -> Self {
        Self { vertices }
    }
}

impl<'a> Extractor for OnlyVertices<'a> {
    fn extract_triangle(&mut self, vertices: [Vec3; 3]) {
        for v in &vertices {
            self.vertices.extend_from_slice(&[v.x, v.y, v.z]);
        }
    }
}

/// Output non-indexed positions and face normals as two parallel arrays of
/// floats, three per vertex, the layout a GPU viewer uploads directly.
pub struct FlatBuffers<'a> {
    positions: &'a mut Vec<f32>,
    normals: &'a mut Vec<f32>,
}

impl<'a> FlatBuffers<'a> {
    pub fn new(positions: &'a mut Vec<f32>, normals: &'a mut Vec<f32>) -> Self {
        Self { positions, normals }
    }
}

impl<'a> Extractor for FlatBuffers<'a> {
    fn extract_triangle(&mut self, vertices: [Vec3; 3]) {
        let n = Triangle::new(vertices).normal;
        for v in &vertices {
            self.positions.extend_from_slice(&[v.x, v.y, v.z]);
            self.normals.extend_from_slice(&[n.x, n.y, n.z]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;

    #[test]
    fn test_flat_buffers() {
        let triangle = [Vec3::zero(), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)];

        let mut positions = vec![];
        let mut normals = vec![];
        FlatBuffers::new(&mut positions, &mut normals).extract_triangle(triangle);

        assert_eq!(positions, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(normals, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);

        let mut vertices = vec![];
        OnlyVertices::new(&mut vertices).extract_triangle(triangle);
        assert_eq!(vertices, positions);
    }
}
