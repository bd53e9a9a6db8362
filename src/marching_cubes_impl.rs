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
    error::{Error, Result},
    marching_cubes_tables::{EDGE_CONNECTION, EDGE_TABLE, TRIANGLE_TABLE},
    math::{lerp, Vec3},
};

/// The case index of a cube: bit `i` is set when corner `i` lies below the
/// isolevel.
pub fn cube_index(levels: &[f32; 8], isolevel: f32) -> usize {
    let mut cube_index = 0;
    for i in 0..8 {
        if levels[i] < isolevel {
            cube_index |= 1 << i;
        }
    }
    cube_index
}

/// Fraction of the way from `a` to `b` at which the isolevel is crossed, or
/// `None` when both ends share a level.
///
/// An infinite end pushes the crossing all the way onto the finite end.
pub fn get_offset(a: f32, b: f32, isolevel: f32) -> Option<f32> {
    if a == b {
        None
    } else if a.is_infinite() {
        Some(1.0)
    } else if b.is_infinite() {
        Some(0.0)
    } else {
        Some((isolevel - a) / (b - a))
    }
}

fn edge_vertex(a: Vec3, b: Vec3, offset: f32) -> Vec3 {
    if offset <= 0.0 {
        a
    } else if offset >= 1.0 {
        b
    } else {
        lerp(a, b, offset)
    }
}

/// March a single cube, given the 8 corner positions and the level at each.
///
/// The `triangle_func` is invoked once per triangle with its vertices in table
/// order, which faces the corners below the isolevel. Triangles whose
/// vertices collapse onto one another are skipped.
pub fn march_cube<T>(
    corners: &[Vec3; 8],
    levels: &[f32; 8],
    isolevel: f32,
    mut triangle_func: T,
) -> Result<()>
where
    T: FnMut([Vec3; 3]),
{
    let cube_index = cube_index(levels, isolevel);
    let edges = EDGE_TABLE[cube_index];
    if edges == 0 {
        return Ok(());
    }

    let mut vertices = [Vec3::zero(); 12];
    for edge in 0..12 {
        if edges & (1 << edge) == 0 {
            continue;
        }
        let [u, v] = EDGE_CONNECTION[edge];
        let offset = get_offset(levels[u], levels[v], isolevel).ok_or(Error::DegenerateEdge {
            edge,
            level: levels[u],
        })?;
        vertices[edge] = edge_vertex(corners[u], corners[v], offset);
    }

    for triangle in TRIANGLE_TABLE[cube_index].chunks(3) {
        if triangle[0] < 0 {
            break;
        }
        let [a, b, c] = [
            vertices[triangle[0] as usize],
            vertices[triangle[1] as usize],
            vertices[triangle[2] as usize],
        ];
        if a != b && b != c && c != a {
            triangle_func([a, b, c]);
        }
    }
    Ok(())
}
