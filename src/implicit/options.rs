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

//! Building shape trees from declarative descriptions.

use super::*;
use crate::{
    density::INSIDE,
    math::{Vec2, Vec3},
    source::Containment,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};

/// Parameters for a single node. Each kind reads the fields it needs and
/// falls back to its own defaults for the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeOptions {
    /// Local origin of a 3D primitive, cut plane or extrusion.
    pub origin: Option<[f32; 3]>,
    /// Centre of a 2D primitive.
    pub center: Option<[f32; 2]>,
    /// Box half extents.
    pub dimensions: Option<[f32; 3]>,
    /// Rectangle half extents.
    pub extent: Option<[f32; 2]>,
    /// Sphere, circle, torus and loxodrome radius; both cylinder radii.
    pub radius: Option<f32>,
    pub bottom_radius: Option<f32>,
    pub top_radius: Option<f32>,
    pub height: Option<f32>,
    pub tube_radius: Option<f32>,
    pub size: Option<f32>,
    pub thickness: Option<f32>,
    pub width: Option<f32>,
    pub slope: Option<f32>,
    pub density: Option<u8>,
    pub offset: Option<[f32; 3]>,
    pub factors: Option<[f32; 3]>,
    pub axis: Option<[f32; 3]>,
    /// Rotation angle in degrees.
    pub angle: Option<f32>,
    pub steps: Option<[f32; 3]>,
    pub repeats: Option<[u32; 3]>,
    pub normal: Option<[f32; 3]>,
    /// Name of a solid registered on the [`ShapeBuilder`].
    pub solid: Option<String>,
}

const DEFAULT_SCALE_FACTOR: f32 = 0.5;
const DEFAULT_ROTATION_AXIS: [f32; 3] = [0.0, 0.0, 1.0];

impl ShapeOptions {
    fn origin(&self) -> Vec3 {
        self.origin.map(Vec3::from).unwrap_or_default()
    }

    fn center(&self) -> Vec2 {
        self.center.map(Vec2::from).unwrap_or_default()
    }
}

/// A whole shape tree: a kind, its options and its operands.
///
/// ```json
/// {
///   "kind": "difference",
///   "operands": [
///     { "kind": "box" },
///     { "kind": "sphere", "options": { "radius": 0.3 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeDescription {
    pub kind: Kind,
    #[serde(default)]
    pub options: ShapeOptions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operands: Vec<ShapeDescription>,
}

impl ShapeDescription {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            options: ShapeOptions::default(),
            operands: vec![],
        }
    }

    pub fn with_options(mut self, options: ShapeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_operand(mut self, operand: ShapeDescription) -> Self {
        self.operands.push(operand);
        self
    }
}

/// Constructs nodes by kind, resolving polyhedron solids by name.
#[derive(Debug, Clone, Default)]
pub struct ShapeBuilder {
    solids: HashMap<String, Arc<dyn Containment>>,
}

impl ShapeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `solid` available to polyhedron nodes as `name`.
    pub fn register_solid(&mut self, name: impl Into<String>, solid: Arc<dyn Containment>) {
        self.solids.insert(name.into(), solid);
    }

    pub fn with_solid(mut self, name: impl Into<String>, solid: Arc<dyn Containment>) -> Self {
        self.register_solid(name, solid);
        self
    }

    /// Build a description and all of its operands, depth first.
    pub fn build(&self, description: &ShapeDescription) -> Result<Expression> {
        let operands = description
            .operands
            .iter()
            .map(|operand| self.build(operand))
            .collect::<Result<Vec<_>>>()?;
        self.build_kind(description.kind, &description.options, operands)
    }

    /// Build one node from already built operands.
    pub fn build_kind(
        &self,
        kind: Kind,
        options: &ShapeOptions,
        operands: Vec<Expression>,
    ) -> Result<Expression> {
        let name = kind.name();
        let origin = options.origin();

        let expression: Expression = match kind {
            Kind::Constant => {
                no_operands(name, &operands)?;
                Shape::from(Constant::new(options.density.unwrap_or(INSIDE))).into()
            }
            Kind::Box => {
                no_operands(name, &operands)?;
                let half_extent = options
                    .dimensions
                    .map(Vec3::from)
                    .unwrap_or_else(|| Vec3::from_scalar(RectangularPrism::DEFAULT_HALF_EXTENT));
                Shape::from(RectangularPrism::new(origin, half_extent)?).into()
            }
            Kind::Sphere => {
                no_operands(name, &operands)?;
                let radius = options.radius.unwrap_or(Sphere::DEFAULT_RADIUS);
                Shape::from(Sphere::new(origin, radius)?).into()
            }
            Kind::Cylinder => {
                no_operands(name, &operands)?;
                let radius = options.radius.unwrap_or(Cylinder::DEFAULT_RADIUS);
                Shape::from(Cylinder::new(
                    origin,
                    options.bottom_radius.unwrap_or(radius),
                    options.top_radius.unwrap_or(radius),
                    options.height.unwrap_or(Cylinder::DEFAULT_HEIGHT),
                )?)
                .into()
            }
            Kind::Torus => {
                no_operands(name, &operands)?;
                Shape::from(Torus::new(
                    origin,
                    options.radius.unwrap_or(Torus::DEFAULT_RADIUS),
                    options.tube_radius.unwrap_or(Torus::DEFAULT_TUBE_RADIUS),
                )?)
                .into()
            }
            Kind::Tetrahedron => {
                no_operands(name, &operands)?;
                let size = options.size.unwrap_or(Tetrahedron::DEFAULT_SIZE);
                Shape::from(Tetrahedron::new(origin, size)?).into()
            }
            Kind::Octahedron => {
                no_operands(name, &operands)?;
                let size = options.size.unwrap_or(Octahedron::DEFAULT_SIZE);
                Shape::from(Octahedron::new(origin, size)?).into()
            }
            Kind::Loxodrome => {
                no_operands(name, &operands)?;
                Shape::from(Loxodrome::new(
                    origin,
                    options.radius.unwrap_or(Loxodrome::DEFAULT_RADIUS),
                    options.thickness.unwrap_or(Loxodrome::DEFAULT_THICKNESS),
                    options.width.unwrap_or(Loxodrome::DEFAULT_WIDTH),
                    options.slope.unwrap_or(Loxodrome::DEFAULT_SLOPE),
                )?)
                .into()
            }
            Kind::Polyhedron => {
                no_operands(name, &operands)?;
                let solid_name = options.solid.as_ref().ok_or_else(|| {
                    Error::invalid_parameter(name, "a registered solid name is required")
                })?;
                let solid = self
                    .solids
                    .get(solid_name)
                    .ok_or_else(|| Error::UnknownSolid(solid_name.clone()))?;
                Shape::from(Polyhedron::new(origin, Arc::clone(solid))).into()
            }
            Kind::Union => Shape::from(Union::new(solids(name, operands)?)?).into(),
            Kind::Intersection => Shape::from(Intersection::new(solids(name, operands)?)?).into(),
            Kind::Difference => {
                let (a, b) = pair(name, operands)?;
                Shape::from(Difference::new(a.into_solid(name)?, b.into_solid(name)?)).into()
            }
            Kind::Translate => {
                let operand = single(name, operands)?.into_solid(name)?;
                let offset = options.offset.map(Vec3::from).unwrap_or_default();
                Shape::from(Transformed::translate(offset, operand)).into()
            }
            Kind::Scale => {
                let operand = single(name, operands)?.into_solid(name)?;
                let factors = options
                    .factors
                    .map(Vec3::from)
                    .unwrap_or_else(|| Vec3::from_scalar(DEFAULT_SCALE_FACTOR));
                Shape::from(Transformed::scale(factors, operand)?).into()
            }
            Kind::Rotate => {
                let operand = single(name, operands)?.into_solid(name)?;
                let axis = Vec3::from(options.axis.unwrap_or(DEFAULT_ROTATION_AXIS));
                let angle = options.angle.unwrap_or(0.0);
                Shape::from(Transformed::rotate(axis, angle, operand)?).into()
            }
            Kind::Array => {
                let operand = single(name, operands)?.into_solid(name)?;
                let step = options
                    .steps
                    .map(Vec3::from)
                    .unwrap_or_else(|| Vec3::from_scalar(Array::DEFAULT_STEP));
                let repeats = options.repeats.unwrap_or(Array::DEFAULT_REPEATS);
                Shape::from(Array::new(step, repeats, operand)?).into()
            }
            Kind::Cut => {
                let operand = single(name, operands)?.into_solid(name)?;
                let normal = options.normal.map(Vec3::from).unwrap_or(Cut::DEFAULT_NORMAL);
                Profile::from(Cut::new(origin, normal, operand)?).into()
            }
            Kind::Extrude => {
                let profile = single(name, operands)?.into_planar(name)?;
                let height = options.height.unwrap_or(Extrude::DEFAULT_HEIGHT);
                Shape::from(Extrude::new(origin, height, profile)?).into()
            }
            Kind::Circle => {
                no_operands(name, &operands)?;
                let radius = options.radius.unwrap_or(Circle::DEFAULT_RADIUS);
                Profile::from(Circle::new(options.center(), radius)?).into()
            }
            Kind::Rectangle => {
                no_operands(name, &operands)?;
                let half_extent = options
                    .extent
                    .map(Vec2::from)
                    .unwrap_or_else(|| Vec2::from_scalar(Rectangle::DEFAULT_HALF_EXTENT));
                Profile::from(Rectangle::new(options.center(), half_extent)?).into()
            }
        };
        Ok(expression)
    }
}

fn no_operands(kind: &'static str, operands: &[Expression]) -> Result<()> {
    if operands.is_empty() {
        Ok(())
    } else {
        Err(Error::OperandCount {
            kind,
            expected: "0",
            found: operands.len(),
        })
    }
}

fn single(kind: &'static str, operands: Vec<Expression>) -> Result<Expression> {
    let found = operands.len();
    let mut operands = operands.into_iter();
    match (operands.next(), operands.next()) {
        (Some(operand), None) => Ok(operand),
        _ => Err(Error::OperandCount {
            kind,
            expected: "1",
            found,
        }),
    }
}

fn pair(kind: &'static str, operands: Vec<Expression>) -> Result<(Expression, Expression)> {
    let found = operands.len();
    let mut operands = operands.into_iter();
    match (operands.next(), operands.next(), operands.next()) {
        (Some(a), Some(b), None) => Ok((a, b)),
        _ => Err(Error::OperandCount {
            kind,
            expected: "2",
            found,
        }),
    }
}

fn solids(kind: &'static str, operands: Vec<Expression>) -> Result<Vec<Arc<Shape>>> {
    operands
        .into_iter()
        .map(|operand| operand.into_solid(kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::OUTSIDE;
    use crate::implicit::polyhedron::tests::LeakyCube;
    use crate::math::vec3;

    fn build(json: &str) -> Result<Expression> {
        let description: ShapeDescription = serde_json::from_str(json).unwrap();
        ShapeBuilder::new().build(&description)
    }

    fn solid(json: &str) -> Arc<Shape> {
        build(json).unwrap().into_solid("test").unwrap()
    }

    #[test]
    fn test_defaults_match_primitives() {
        let shape = solid(r#"{ "kind": "box" }"#);
        assert_eq!(shape.evaluate(vec3(0.1, 0.1, 0.1)).unwrap(), INSIDE);
        assert_eq!(shape.evaluate(vec3(0.3, 0.0, 0.0)).unwrap(), OUTSIDE);

        let shape = solid(r#"{ "kind": "sphere", "options": { "radius": 1.0 } }"#);
        assert_eq!(shape.evaluate(Vec3::zero()).unwrap(), INSIDE);
        assert_eq!(shape.evaluate(vec3(0.0, -2.0, 0.0)).unwrap(), OUTSIDE);

        let shape = solid(r#"{ "kind": "constant", "options": { "density": 0 } }"#);
        assert_eq!(shape.evaluate(Vec3::zero()).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_build_tree() {
        let shape = solid(
            r#"{
                "kind": "difference",
                "operands": [
                    { "kind": "box", "options": { "dimensions": [1.0, 1.0, 1.0] } },
                    { "kind": "sphere", "options": { "origin": [1.0, 1.0, 1.0], "radius": 0.5 } }
                ]
            }"#,
        );
        assert_eq!(shape.evaluate(Vec3::zero()).unwrap(), INSIDE);
        assert_eq!(shape.evaluate(vec3(0.9, 0.9, 0.9)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_nested_transforms_and_array() {
        let shape = solid(
            r#"{
                "kind": "rotate",
                "options": { "angle": 30.0 },
                "operands": [{
                    "kind": "array",
                    "options": { "repeats": [2, 2, 1], "steps": [0.2, 0.2, 0.2] },
                    "operands": [{
                        "kind": "scale",
                        "options": { "factors": [0.3, 0.3, 0.3] },
                        "operands": [{
                            "kind": "union",
                            "operands": [{ "kind": "box" }, { "kind": "sphere" }]
                        }]
                    }]
                }]
            }"#,
        );
        // The first copy is centred on the origin, which the rotation keeps fixed
        assert_eq!(shape.evaluate(Vec3::zero()).unwrap(), INSIDE);
        assert_eq!(shape.evaluate(vec3(5.0, 5.0, 5.0)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_cut_and_extrude() {
        let shape = solid(
            r#"{
                "kind": "extrude",
                "options": { "height": 2.0 },
                "operands": [{
                    "kind": "cut",
                    "options": { "normal": [0.0, 0.0, 1.0] },
                    "operands": [{ "kind": "sphere", "options": { "radius": 1.0 } }]
                }]
            }"#,
        );
        assert_eq!(shape.evaluate(vec3(0.5, 0.0, 1.5)).unwrap(), INSIDE);
        assert_eq!(shape.evaluate(vec3(0.5, 0.0, 2.5)).unwrap(), OUTSIDE);

        let shape = solid(
            r#"{
                "kind": "extrude",
                "operands": [{ "kind": "rectangle", "options": { "extent": [1.0, 0.5] } }]
            }"#,
        );
        assert_eq!(shape.evaluate(vec3(0.9, -0.4, 0.5)).unwrap(), INSIDE);
        assert_eq!(shape.evaluate(vec3(0.9, -0.6, 0.5)).unwrap(), OUTSIDE);
    }

    #[test]
    fn test_operand_errors() {
        match build(r#"{ "kind": "difference", "operands": [{ "kind": "box" }] }"#) {
            Err(Error::OperandCount {
                kind: "difference",
                found: 1,
                ..
            }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match build(r#"{ "kind": "sphere", "operands": [{ "kind": "box" }] }"#) {
            Err(Error::OperandCount { found: 1, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match build(r#"{ "kind": "extrude", "operands": [{ "kind": "box" }] }"#) {
            Err(Error::OperandType { kind: "extrude", .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match build(r#"{ "kind": "union", "operands": [{ "kind": "circle" }] }"#) {
            Err(Error::OperandType { kind: "union", .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(build(r#"{ "kind": "translate" }"#).is_err());
    }

    #[test]
    fn test_parameter_errors() {
        match build(
            r#"{ "kind": "scale", "options": { "factors": [1.0, 1.0, 0.0] },
                 "operands": [{ "kind": "box" }] }"#,
        ) {
            Err(Error::ZeroFactor { axis: 2, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match build(
            r#"{ "kind": "array", "options": { "steps": [0.0, 1.0, 1.0] },
                 "operands": [{ "kind": "box" }] }"#,
        ) {
            Err(Error::ZeroFactor { kind: "array", .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(build(r#"{ "kind": "sphere", "options": { "radius": -1.0 } }"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_descriptions() {
        assert!(serde_json::from_str::<ShapeDescription>(r#"{ "kind": "teapot" }"#).is_err());
        assert!(serde_json::from_str::<ShapeDescription>(
            r#"{ "kind": "sphere", "options": { "radius": 1.0, "colour": "red" } }"#
        )
        .is_err());
    }

    #[test]
    fn test_polyhedron_solids() {
        let description = ShapeDescription::new(Kind::Polyhedron).with_options(ShapeOptions {
            solid: Some("cube".to_string()),
            ..ShapeOptions::default()
        });

        match ShapeBuilder::new().build(&description) {
            Err(Error::UnknownSolid(name)) => assert_eq!(name, "cube"),
            other => panic!("unexpected {:?}", other),
        }

        let builder = ShapeBuilder::new().with_solid("cube", Arc::new(LeakyCube));
        let shape = builder.build(&description).unwrap().into_solid("test").unwrap();
        assert_eq!(shape.evaluate(vec3(0.5, 0.5, 0.5)).unwrap(), INSIDE);
        assert!(shape.evaluate(vec3(0.5, 0.5, 5.0)).is_err());

        // Errors pass unchanged through combinators
        let wrapped = ShapeDescription::new(Kind::Union).with_operand(description);
        let shape = builder.build(&wrapped).unwrap().into_solid("test").unwrap();
        match shape.evaluate(vec3(0.5, 0.5, 5.0)) {
            Err(Error::UnclosedSolid(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_description_round_trip() {
        let description = ShapeDescription::new(Kind::Translate)
            .with_options(ShapeOptions {
                offset: Some([1.0, 2.0, 3.0]),
                ..ShapeOptions::default()
            })
            .with_operand(ShapeDescription::new(Kind::Torus));
        let json = serde_json::to_string(&description).unwrap();
        let parsed: ShapeDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, description);
    }
}
