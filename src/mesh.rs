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
use crate::{extractor::Extractor, math::Vec3};
use std::collections::{hash_map::Keys, HashMap};

/// A triangle of world-space vertices and its face normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    /// Unit normal by the right-hand rule, or zero for a zero-area triangle.
    pub normal: Vec3,
}

impl Triangle {
    pub fn new(vertices: [Vec3; 3]) -> Self {
        let [a, b, c] = vertices;
        let normal = (b - a).cross(c - a).normalised().unwrap_or_else(Vec3::zero);
        Self { vertices, normal }
    }

    pub fn area(&self) -> f32 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a).len() * 0.5
    }
}

/// An unordered list of triangles. Adjacent triangles each carry their own
/// copies of shared vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

fn vertex_key(v: Vec3) -> [u32; 3] {
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn push(&mut self, vertices: [Vec3; 3]) {
        self.triangles.push(Triangle::new(vertices));
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices.iter().copied())
    }

    /// Per-vertex normals, one triple per triangle.
    ///
    /// Each is the normalised sum of the face normals of every triangle that
    /// has a vertex at exactly the same position.
    pub fn vertex_normals(&self) -> Vec<[Vec3; 3]> {
        let mut sums: HashMap<[u32; 3], Vec3> = HashMap::new();
        for triangle in &self.triangles {
            for &v in &triangle.vertices {
                *sums.entry(vertex_key(v)).or_insert_with(Vec3::zero) += triangle.normal;
            }
        }

        let normal = |v: Vec3| {
            sums.get(&vertex_key(v))
                .and_then(|n| n.normalised())
                .unwrap_or_else(Vec3::zero)
        };
        self.triangles
            .iter()
            .map(|t| [normal(t.vertices[0]), normal(t.vertices[1]), normal(t.vertices[2])])
            .collect()
    }

    /// Volume enclosed by the mesh, positive when the faces point outward.
    /// Only meaningful for a closed mesh.
    pub fn signed_volume(&self) -> f32 {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.vertices;
                a.triple(b, c)
            })
            .sum::<f32>()
            / 6.0
    }

    /// Weld vertices by exact position and build the face adjacency.
    pub fn topology(&self) -> MeshTopology {
        let mut topology = MeshTopology::new();
        let mut welded: HashMap<[u32; 3], VertexHandle> = HashMap::new();

        for triangle in &self.triangles {
            let mut handles = [VertexHandle(0); 3];
            for (handle, &v) in handles.iter_mut().zip(triangle.vertices.iter()) {
                *handle = *welded
                    .entry(vertex_key(v))
                    .or_insert_with(|| topology.add_vertex());
            }
            topology.add_face(handles[0], handles[1], handles[2]);
        }
        topology
    }
}

impl Extractor for Mesh {
    fn extract_triangle(&mut self, vertices: [Vec3; 3]) {
        self.push(vertices);
    }
}

/// A handle to a specific vertex within a vertex array
///
/// Handles are allocated in order by [`MeshTopology::add_vertex`], one per
/// distinct welded position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct VertexHandle(usize);

/// A handle to a specific face within a mesh
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FaceHandle(usize);

/// A triangular face, vertices in winding order. Counter-clockwise winding,
/// seen from outside, faces outward.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Face([VertexHandle; 3]);

/// An edge within a mesh. Edges are bidirectional (i.e. Edge(u,v) and Edge(v,u)
/// represent the same edge)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Edge(VertexHandle, VertexHandle);

/// Connectivity of a welded mesh, without the vertex positions.
#[derive(Debug, Default)]
pub struct MeshTopology {
    next_vertex: usize,
    faces: Vec<Face>,
    edge_to_face: HashMap<Edge, Vec<FaceHandle>>,
}

impl MeshTopology {
    /// An empty topology with no vertices or faces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new vertex handle.
    pub fn add_vertex(&mut self) -> VertexHandle {
        let handle = VertexHandle(self.next_vertex);
        self.next_vertex += 1;
        handle
    }

    /// Add a face wound `a`, `b`, `c` and register its three edges.
    pub fn add_face(&mut self, a: VertexHandle, b: VertexHandle, c: VertexHandle) -> FaceHandle {
        let face = FaceHandle(self.faces.len());
        self.faces.push(Face([a, b, c]));

        for &(u, v) in &[(a, b), (b, c), (c, a)] {
            self.edge_to_face.entry(Edge::new(u, v)).or_default().push(face);
        }
        face
    }

    /// Number of vertex handles handed out.
    pub fn vertex_count(&self) -> usize {
        self.next_vertex
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// An iterator over the unique edges in the mesh
    pub fn edges(&self) -> Keys<'_, Edge, Vec<FaceHandle>> {
        self.edge_to_face.keys()
    }

    /// The faces that share a given edge. Isosurface extraction may produce
    /// non-manifold meshes with 3 or more faces sharing an edge.
    pub fn adjoining_faces(&self, edge: Edge) -> Vec<Face> {
        self.edge_to_face
            .get(&edge)
            .map(|handles| handles.iter().map(|f| self.faces[f.0]).collect())
            .unwrap_or_default()
    }

    /// Edges shared by anything other than exactly two faces.
    pub fn boundary_edges(&self) -> usize {
        self.edge_to_face.values().filter(|f| f.len() != 2).count()
    }

    /// Every edge is shared by exactly two faces.
    pub fn is_closed(&self) -> bool {
        !self.faces.is_empty() && self.boundary_edges() == 0
    }

    /// Every shared edge is traversed in opposite directions by its two faces.
    pub fn is_consistently_oriented(&self) -> bool {
        self.edge_to_face.iter().all(|(&edge, handles)| match handles[..] {
            [a, b] => {
                self.faces[a.0].matches_winding_direction(edge)
                    != self.faces[b.0].matches_winding_direction(edge)
            }
            _ => true,
        })
    }
}

impl Edge {
    /// Construct a new edge from the two vertices it connects.
    /// The edge direction will be normalised during construction.
    pub fn new(a: VertexHandle, b: VertexHandle) -> Edge {
        if a > b {
            Edge(b, a)
        } else {
            Edge(a, b)
        }
    }

    /// The start of the edge. Note that edge directions are normalised.
    pub fn start(&self) -> VertexHandle {
        self.0
    }

    /// The end of the edge. Note that edge directions are normalised.
    pub fn end(&self) -> VertexHandle {
        self.1
    }
}

impl Face {
    /// The vertices of this face, in winding order.
    pub fn vertices(&self) -> [VertexHandle; 3] {
        self.0
    }

    fn matches_winding_direction(&self, edge: Edge) -> bool {
        (0..3).any(|i| edge.0 == self.0[i] && edge.1 == self.0[(i + 1) % 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;
    use approx::assert_relative_eq;

    fn tetrahedron() -> Mesh {
        let o = Vec3::zero();
        let x = vec3(1.0, 0.0, 0.0);
        let y = vec3(0.0, 1.0, 0.0);
        let z = vec3(0.0, 0.0, 1.0);

        let mut mesh = Mesh::new();
        mesh.push([o, y, x]);
        mesh.push([o, x, z]);
        mesh.push([o, z, y]);
        mesh.push([x, y, z]);
        mesh
    }

    #[test]
    fn test_face_normals() {
        let mesh = tetrahedron();
        assert_eq!(mesh.triangles[0].normal, vec3(0.0, 0.0, -1.0));
        assert_relative_eq!(mesh.triangles[3].normal.len(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(mesh.triangles[0].area(), 0.5);

        let flat = Triangle::new([Vec3::zero(), Vec3::one(), Vec3::one() * 2.0]);
        assert_eq!(flat.normal, Vec3::zero());
    }

    #[test]
    fn test_closed_mesh() {
        let mesh = tetrahedron();
        let topology = mesh.topology();

        assert_eq!(topology.vertex_count(), 4);
        assert_eq!(topology.face_count(), 4);
        assert_eq!(topology.edges().count(), 6);
        assert!(topology.is_closed());
        assert!(topology.is_consistently_oriented());
        assert_relative_eq!(mesh.signed_volume(), 1.0 / 6.0, epsilon = 1e-6);

        let edge = Edge::new(VertexHandle(1), VertexHandle(0));
        assert_eq!(edge.start(), VertexHandle(0));
        assert_eq!(topology.adjoining_faces(edge).len(), 2);
    }

    #[test]
    fn test_open_mesh() {
        let mut mesh = tetrahedron();
        mesh.triangles.pop();
        let topology = mesh.topology();

        assert!(!topology.is_closed());
        assert_eq!(topology.boundary_edges(), 3);
        assert!(!Mesh::new().topology().is_closed());
    }

    #[test]
    fn test_flipped_face_breaks_orientation() {
        let mut mesh = tetrahedron();
        let [a, b, c] = mesh.triangles[3].vertices;
        mesh.triangles[3] = Triangle::new([a, c, b]);

        let topology = mesh.topology();
        assert!(topology.is_closed());
        assert!(!topology.is_consistently_oriented());
    }

    #[test]
    fn test_vertex_normals_average_faces() {
        let mesh = tetrahedron();
        let normals = mesh.vertex_normals();
        assert_eq!(normals.len(), 4);

        // The origin is shared by the three axis-aligned faces
        let n = normals[0][0];
        let expected = -1.0 / 3f32.sqrt();
        assert_relative_eq!(n.x, expected, epsilon = 1e-6);
        assert_relative_eq!(n.y, expected, epsilon = 1e-6);
        assert_relative_eq!(n.z, expected, epsilon = 1e-6);
    }
}
