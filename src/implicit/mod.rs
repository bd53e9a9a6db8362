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

//! Shape expressions: primitives, boolean combinators, transforms and the
//! 2D profiles used by cut and extrude.
//!
//! Trees are built from [`Shape`] and [`Profile`] nodes sharing their
//! operands through [`Arc`], either directly or by name through a
//! [`ShapeBuilder`].

mod array;
mod constant;
mod csg;
mod cylinder;
mod loxodrome;
mod options;
mod planar;
mod polyhedra;
mod polyhedron;
mod rectangular_prism;
mod sphere;
mod torus;
mod transform;

pub use self::{
    array::Array,
    constant::Constant,
    csg::{Difference, Intersection, Union},
    cylinder::Cylinder,
    loxodrome::Loxodrome,
    options::{ShapeBuilder, ShapeDescription, ShapeOptions},
    planar::{Circle, Cut, Extrude, Rectangle},
    polyhedra::{Octahedron, Tetrahedron},
    polyhedron::Polyhedron,
    rectangular_prism::RectangularPrism,
    sphere::Sphere,
    torus::Torus,
    transform::Transformed,
};

use crate::{
    density::Density,
    error::{Error, Result},
    math::{Vec2, Vec3},
    source::{Evaluate, EvaluatePlanar},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

/// Every node kind the factory can build, by its configuration name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Constant,
    Box,
    Sphere,
    Cylinder,
    Torus,
    Tetrahedron,
    Octahedron,
    Loxodrome,
    Polyhedron,
    Union,
    Intersection,
    Difference,
    Translate,
    Scale,
    Rotate,
    Array,
    Cut,
    Extrude,
    Circle,
    Rectangle,
}

impl Kind {
    pub const ALL: [Kind; 20] = [
        Kind::Constant,
        Kind::Box,
        Kind::Sphere,
        Kind::Cylinder,
        Kind::Torus,
        Kind::Tetrahedron,
        Kind::Octahedron,
        Kind::Loxodrome,
        Kind::Polyhedron,
        Kind::Union,
        Kind::Intersection,
        Kind::Difference,
        Kind::Translate,
        Kind::Scale,
        Kind::Rotate,
        Kind::Array,
        Kind::Cut,
        Kind::Extrude,
        Kind::Circle,
        Kind::Rectangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Constant => "constant",
            Kind::Box => "box",
            Kind::Sphere => "sphere",
            Kind::Cylinder => "cylinder",
            Kind::Torus => "torus",
            Kind::Tetrahedron => "tetrahedron",
            Kind::Octahedron => "octahedron",
            Kind::Loxodrome => "loxodrome",
            Kind::Polyhedron => "polyhedron",
            Kind::Union => "union",
            Kind::Intersection => "intersection",
            Kind::Difference => "difference",
            Kind::Translate => "translate",
            Kind::Scale => "scale",
            Kind::Rotate => "rotate",
            Kind::Array => "array",
            Kind::Cut => "cut",
            Kind::Extrude => "extrude",
            Kind::Circle => "circle",
            Kind::Rectangle => "rectangle",
        }
    }

    /// Whether nodes of this kind produce a 2D profile.
    pub fn is_planar(self) -> bool {
        matches!(self, Kind::Cut | Kind::Circle | Kind::Rectangle)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Kind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

/// A 3D node of a shape tree.
#[derive(Debug, Clone)]
pub enum Shape {
    Constant(Constant),
    Box(RectangularPrism),
    Sphere(Sphere),
    Cylinder(Cylinder),
    Torus(Torus),
    Tetrahedron(Tetrahedron),
    Octahedron(Octahedron),
    Loxodrome(Loxodrome),
    Polyhedron(Polyhedron),
    Union(Union),
    Intersection(Intersection),
    Difference(Difference),
    Transformed(Transformed),
    Array(Array),
    Extrude(Extrude),
}

/// A 2D node of a shape tree.
#[derive(Debug, Clone)]
pub enum Profile {
    Cut(Cut),
    Circle(Circle),
    Rectangle(Rectangle),
}

macro_rules! impl_from_node {
    ($enum:ident { $($variant:ident($node:ty)),* $(,)? }) => {
        $(
            impl From<$node> for $enum {
                fn from(node: $node) -> Self {
                    $enum::$variant(node)
                }
            }
        )*
    };
}

impl_from_node!(Shape {
    Constant(Constant),
    Box(RectangularPrism),
    Sphere(Sphere),
    Cylinder(Cylinder),
    Torus(Torus),
    Tetrahedron(Tetrahedron),
    Octahedron(Octahedron),
    Loxodrome(Loxodrome),
    Polyhedron(Polyhedron),
    Union(Union),
    Intersection(Intersection),
    Difference(Difference),
    Transformed(Transformed),
    Array(Array),
    Extrude(Extrude),
});

impl_from_node!(Profile {
    Cut(Cut),
    Circle(Circle),
    Rectangle(Rectangle),
});

impl Evaluate for Shape {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        match self {
            Shape::Constant(s) => s.evaluate(p),
            Shape::Box(s) => s.evaluate(p),
            Shape::Sphere(s) => s.evaluate(p),
            Shape::Cylinder(s) => s.evaluate(p),
            Shape::Torus(s) => s.evaluate(p),
            Shape::Tetrahedron(s) => s.evaluate(p),
            Shape::Octahedron(s) => s.evaluate(p),
            Shape::Loxodrome(s) => s.evaluate(p),
            Shape::Polyhedron(s) => s.evaluate(p),
            Shape::Union(s) => s.evaluate(p),
            Shape::Intersection(s) => s.evaluate(p),
            Shape::Difference(s) => s.evaluate(p),
            Shape::Transformed(s) => s.evaluate(p),
            Shape::Array(s) => s.evaluate(p),
            Shape::Extrude(s) => s.evaluate(p),
        }
    }
}

impl EvaluatePlanar for Profile {
    fn evaluate_planar(&self, p: Vec2) -> Result<Density> {
        match self {
            Profile::Cut(s) => s.evaluate_planar(p),
            Profile::Circle(s) => s.evaluate_planar(p),
            Profile::Rectangle(s) => s.evaluate_planar(p),
        }
    }
}

/// A built node of either dimensionality.
#[derive(Debug, Clone)]
pub enum Expression {
    Solid(Arc<Shape>),
    Planar(Arc<Profile>),
}

impl Expression {
    /// The 3D node, or an operand type error naming `kind` as the consumer.
    pub fn into_solid(self, kind: &'static str) -> Result<Arc<Shape>> {
        match self {
            Expression::Solid(shape) => Ok(shape),
            Expression::Planar(_) => Err(Error::OperandType {
                kind,
                expected: "3D",
            }),
        }
    }

    /// The 2D node, or an operand type error naming `kind` as the consumer.
    pub fn into_planar(self, kind: &'static str) -> Result<Arc<Profile>> {
        match self {
            Expression::Planar(profile) => Ok(profile),
            Expression::Solid(_) => Err(Error::OperandType {
                kind,
                expected: "2D",
            }),
        }
    }
}

impl From<Shape> for Expression {
    fn from(shape: Shape) -> Self {
        Expression::Solid(Arc::new(shape))
    }
}

impl From<Profile> for Expression {
    fn from(profile: Profile) -> Self {
        Expression::Planar(Arc::new(profile))
    }
}

impl From<Arc<Shape>> for Expression {
    fn from(shape: Arc<Shape>) -> Self {
        Expression::Solid(shape)
    }
}

impl From<Arc<Profile>> for Expression {
    fn from(profile: Arc<Profile>) -> Self {
        Expression::Planar(profile)
    }
}
