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

use approx::assert_relative_eq;
use std::sync::Arc;
use voxel_csg::{
    extractor::FlatBuffers,
    implicit::{Constant, Difference, Sphere, Torus},
    math::{vec3, Vec3},
    Dimensions, Evaluate, Grid, GridOptions, MarchingCubes, Mesh, Shape, ShapeBuilder,
    ShapeDescription, INSIDE, OUTSIDE,
};

const RADIUS: f32 = 5.0;

/// Spacing 0.5 over [-7, 7]^3.
fn sphere_grid() -> Grid {
    Grid::new(
        Dimensions::cube(28),
        vec3(-7.0, -7.0, -7.0),
        vec3(14.0, 14.0, 14.0),
    )
    .unwrap()
}

fn sphere() -> Shape {
    Shape::from(Sphere::new(Vec3::zero(), RADIUS).unwrap())
}

fn check_closed_outward(mesh: &Mesh) {
    assert!(!mesh.is_empty());
    let topology = mesh.topology();
    assert!(topology.is_closed());
    assert!(topology.is_consistently_oriented());
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn sphere_samples_make_closed_mesh() {
    let grid = sphere_grid();
    let samples = grid.evaluate_samples(&sphere(), true).unwrap();
    let mesh = MarchingCubes::default()
        .extract_samples(&grid, &samples)
        .unwrap();

    check_closed_outward(&mesh);

    let spacing = grid.spacings().x;
    for v in mesh.vertices() {
        let distance = v.len();
        assert!(distance < RADIUS + spacing, "vertex {:?} too far out", v);
        assert!(distance > RADIUS - spacing, "vertex {:?} too far in", v);
    }

    let analytic = 4.0 / 3.0 * std::f32::consts::PI * RADIUS.powi(3);
    assert_relative_eq!(mesh.signed_volume(), analytic, max_relative = 0.15);
}

#[test]
fn sphere_raster_makes_mesh() {
    let grid = sphere_grid();
    let raster = grid.rasterize(&sphere()).unwrap();
    assert_eq!(raster.as_bytes().len(), 28 * 28 * 28);

    let mesh = MarchingCubes::default()
        .extract_raster(&grid, &raster)
        .unwrap();
    assert!(!mesh.is_empty());
    assert!(mesh.signed_volume() > 0.0);

    let spacing = grid.spacings().x;
    for v in mesh.vertices() {
        assert!(v.len() < RADIUS + 2.0 * spacing);
    }
}

#[test]
fn oriented_grid_keeps_outward_faces() {
    let h = std::f32::consts::FRAC_1_SQRT_2;
    let directions = [vec3(h, h, 0.0), vec3(-h, h, 0.0), vec3(0.0, 0.0, 1.0)];
    let origin = (directions[0] + directions[1] + directions[2]) * -7.0;
    let grid = Grid::oriented(
        Dimensions::cube(28),
        origin,
        directions,
        vec3(14.0, 14.0, 14.0),
    )
    .unwrap();
    assert!(grid.is_right_handed());

    let samples = grid.evaluate_samples(&sphere(), true).unwrap();
    let mesh = MarchingCubes::default()
        .extract_samples(&grid, &samples)
        .unwrap();
    check_closed_outward(&mesh);
}

#[test]
fn solids_touching_the_grid_are_capped() {
    // The sphere pokes out through the +x face of the grid
    let grid = Grid::new(
        Dimensions::new(8, 12, 12),
        vec3(-3.0, -3.0, -3.0),
        vec3(4.0, 6.0, 6.0),
    )
    .unwrap();
    let shape = Shape::from(Sphere::new(Vec3::zero(), 2.0).unwrap());
    let samples = grid.evaluate_samples(&shape, true).unwrap();

    let mut positions = vec![];
    let mut normals = vec![];
    let mut buffers = FlatBuffers::new(&mut positions, &mut normals);
    let triangles = MarchingCubes::default()
        .extract_into(&grid, &grid_field(&grid, &samples), |v: u8| -f32::from(v), &mut buffers)
        .unwrap();

    assert!(triangles > 0);
    assert_eq!(positions.len(), triangles * 9);
    assert_eq!(normals.len(), positions.len());
    assert!(positions.iter().all(|c| c.is_finite()));
    // Cap vertices sit on the boundary plane, never past it
    assert!(positions.chunks(3).all(|v| v[0] <= 1.0));
    assert!(positions.chunks(3).any(|v| v[0] == 1.0));

    let mesh = MarchingCubes::default()
        .extract_samples(&grid, &samples)
        .unwrap();
    assert_eq!(mesh.len(), triangles);
    check_closed_outward(&mesh);
    assert!(mesh.triangles.iter().all(|t| t.area() > 0.0));
}

#[test]
fn filled_grid_meshes_to_its_box() {
    let grid = Grid::new(
        Dimensions::cube(4),
        vec3(-1.0, -1.0, -1.0),
        vec3(2.0, 2.0, 2.0),
    )
    .unwrap();
    let samples = grid
        .evaluate_samples(&Constant::new(INSIDE), true)
        .unwrap();
    let mesh = MarchingCubes::default()
        .extract_samples(&grid, &samples)
        .unwrap();

    // Two triangles per boundary face of every boundary voxel
    assert_eq!(mesh.len(), 6 * 4 * 4 * 2);
    check_closed_outward(&mesh);
    assert_relative_eq!(mesh.signed_volume(), 8.0, max_relative = 1e-5);
    for v in mesh.vertices() {
        assert!(v.all(|c| (-1.0..=1.0).contains(&c)));
        assert!(v.any(|c| c.abs() == 1.0));
    }
}

fn grid_field<'a>(
    grid: &Grid,
    samples: &'a voxel_csg::Samples,
) -> voxel_csg::Field<'a, u8> {
    voxel_csg::Field::new(
        grid.sample_counts(),
        &samples.values,
        samples.points.as_deref().unwrap(),
    )
    .unwrap()
}

#[test]
fn combinators_carve_the_mesh() {
    let sphere = Arc::new(sphere());
    let ring = Arc::new(Shape::from(
        Torus::new(Vec3::zero(), RADIUS, 1.5).unwrap(),
    ));
    let carved = Shape::from(Difference::new(sphere.clone(), ring));
    assert_eq!(carved.evaluate(Vec3::zero()).unwrap(), INSIDE);
    assert_eq!(carved.evaluate(vec3(4.5, 0.0, 0.0)).unwrap(), OUTSIDE);

    let grid = sphere_grid();
    let whole = grid.evaluate_samples(sphere.as_ref(), true).unwrap();
    let part = grid.evaluate_samples(&carved, true).unwrap();

    let mc = MarchingCubes::default();
    let whole = mc.extract_samples(&grid, &whole).unwrap();
    let part = mc.extract_samples(&grid, &part).unwrap();
    assert!(!part.is_empty());
    assert!(part.signed_volume() > 0.0);
    assert!(part.signed_volume() < whole.signed_volume());
}

#[test]
fn described_pipeline() {
    let grid_options: GridOptions = serde_json::from_str(
        r#"{
            "origin": [-1.0, -1.0, -1.0],
            "extents": [2.0, 2.0, 2.0],
            "spacings": [0.125, 0.125, 0.125]
        }"#,
    )
    .unwrap();
    let grid = Grid::from_options(&grid_options).unwrap();
    assert_eq!(grid.dimensions(), Dimensions::cube(16));

    let description: ShapeDescription = serde_json::from_str(
        r#"{
            "kind": "union",
            "operands": [
                { "kind": "box" },
                {
                    "kind": "translate",
                    "options": { "offset": [0.5, 0.0, 0.0] },
                    "operands": [{ "kind": "sphere", "options": { "radius": 0.3 } }]
                }
            ]
        }"#,
    )
    .unwrap();
    let shape = ShapeBuilder::new()
        .build(&description)
        .unwrap()
        .into_solid("pipeline")
        .unwrap();

    let raster = grid.rasterize(&shape).unwrap();
    assert!(raster.as_bytes().iter().any(|&v| v == INSIDE));
    assert!(raster.as_bytes().iter().any(|&v| v == OUTSIDE));

    let samples = grid.evaluate_samples(&shape, true).unwrap();
    let mesh = MarchingCubes::default()
        .extract_samples(&grid, &samples)
        .unwrap();
    assert!(!mesh.is_empty());
    assert!(mesh.signed_volume() > 0.0);
}
