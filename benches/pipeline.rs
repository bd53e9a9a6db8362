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

use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use voxel_csg::{
    implicit::{Difference, Sphere, Torus},
    math::{vec3, Vec3},
    Dimensions, Grid, MarchingCubes, Shape,
};

fn carved_sphere() -> Shape {
    let sphere = Arc::new(Shape::from(Sphere::new(Vec3::zero(), 0.4).unwrap()));
    let ring = Arc::new(Shape::from(Torus::new(Vec3::zero(), 0.4, 0.1).unwrap()));
    Shape::from(Difference::new(sphere, ring))
}

fn grid() -> Grid {
    Grid::new(Dimensions::cube(64), vec3(-0.5, -0.5, -0.5), Vec3::one()).unwrap()
}

fn sample() {
    grid().evaluate_samples(&carved_sphere(), true).unwrap();
}

fn rasterize() {
    grid().rasterize(&carved_sphere()).unwrap();
}

fn marching_cubes() {
    let grid = grid();
    let samples = grid.evaluate_samples(&carved_sphere(), true).unwrap();
    MarchingCubes::default()
        .extract_samples(&grid, &samples)
        .unwrap();
}

fn pipeline_benchmark(c: &mut Criterion) {
    c.bench_function("sample", |b| b.iter(|| sample()));
    c.bench_function("rasterize", |b| b.iter(|| rasterize()));
    c.bench_function("marching cubes", |b| b.iter(|| marching_cubes()));
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
