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

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while building shapes, grids, or meshes.
#[derive(Debug, Error)]
pub enum Error {
    /// The factory was given a kind name it does not know.
    #[error("unknown shape kind `{0}`")]
    UnknownKind(String),

    /// A polyhedron referenced a solid that was never registered.
    #[error("unknown solid `{0}`")]
    UnknownSolid(String),

    /// A node was given the wrong number of operands.
    #[error("{kind} expects {expected} operand(s), found {found}")]
    OperandCount {
        kind: &'static str,
        expected: &'static str,
        found: usize,
    },

    /// A node was given a 2D operand where a 3D one is needed, or vice versa.
    #[error("{kind} expects a {expected} operand")]
    OperandType {
        kind: &'static str,
        expected: &'static str,
    },

    /// A scale factor or array step is zero along some axis.
    #[error("{kind} has a zero {parameter} along axis {axis}")]
    ZeroFactor {
        kind: &'static str,
        parameter: &'static str,
        axis: usize,
    },

    /// Any other out-of-range node parameter.
    #[error("invalid {kind} parameter: {details}")]
    InvalidParameter { kind: &'static str, details: String },

    /// Grid options that cannot describe a lattice.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// A field buffer does not match the lattice it claims to cover.
    #[error("field holds {found} values, expected {expected}")]
    FieldSize { expected: usize, found: usize },

    /// Meshing corner samples needs the corner points recorded while sampling.
    #[error("sample field was evaluated without recording corner points")]
    MissingPoints,

    /// The containment test hit an ambiguous cell of an open mesh.
    #[error("polyhedron is not closed: {0}")]
    UnclosedSolid(String),

    /// A crossed cube edge whose two corner levels are equal.
    #[error("crossed edge {edge} has equal corner levels ({level})")]
    DegenerateEdge { edge: usize, level: f32 },
}

impl Error {
    pub(crate) fn invalid_parameter(kind: &'static str, details: impl Into<String>) -> Self {
        Self::InvalidParameter {
            kind,
            details: details.into(),
        }
    }

    pub(crate) fn invalid_grid(details: impl Into<String>) -> Self {
        Self::InvalidGrid(details.into())
    }
}
