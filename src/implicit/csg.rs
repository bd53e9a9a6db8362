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
use super::Shape;
use crate::{
    density::{density, Density, OUTSIDE},
    error::{Error, Result},
    math::Vec3,
    source::Evaluate,
};
use std::sync::Arc;

fn require_operands(kind: &'static str, operands: &[Arc<Shape>]) -> Result<()> {
    if operands.is_empty() {
        Err(Error::OperandCount {
            kind,
            expected: "at least 1",
            found: 0,
        })
    } else {
        Ok(())
    }
}

/// The CSG union operation. Solid where any of the operands is solid.
///
/// Every operand is evaluated at every point, so a failing operand reports
/// its error even where an earlier operand is already solid.
#[derive(Debug, Clone)]
pub struct Union {
    /// At least one operand.
    pub operands: Vec<Arc<Shape>>,
}

impl Union {
    pub fn new(operands: Vec<Arc<Shape>>) -> Result<Self> {
        require_operands("union", &operands)?;
        Ok(Self { operands })
    }
}

impl Evaluate for Union {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let mut inside = false;
        for operand in &self.operands {
            inside |= operand.evaluate(p)? != OUTSIDE;
        }
        Ok(density(inside))
    }
}

/// The CSG intersection operation. Solid only where every operand is solid.
/// Like [`Union`], it never skips an operand.
#[derive(Debug, Clone)]
pub struct Intersection {
    /// At least one operand.
    pub operands: Vec<Arc<Shape>>,
}

impl Intersection {
    pub fn new(operands: Vec<Arc<Shape>>) -> Result<Self> {
        require_operands("intersection", &operands)?;
        Ok(Self { operands })
    }
}

impl Evaluate for Intersection {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let mut inside = true;
        for operand in &self.operands {
            inside &= operand.evaluate(p)? != OUTSIDE;
        }
        Ok(density(inside))
    }
}

/// The CSG difference operation. Takes the density of `a`, except where `b`
/// is solid.
#[derive(Debug, Clone)]
pub struct Difference {
    /// The shape being carved.
    pub a: Arc<Shape>,
    /// The shape carved away.
    pub b: Arc<Shape>,
}

impl Difference {
    pub fn new(a: Arc<Shape>, b: Arc<Shape>) -> Self {
        Self { a, b }
    }
}

impl Evaluate for Difference {
    fn evaluate(&self, p: Vec3) -> Result<Density> {
        let a = self.a.evaluate(p)?;
        if self.b.evaluate(p)? != OUTSIDE {
            Ok(OUTSIDE)
        } else {
            Ok(a)
        }
    }
}
