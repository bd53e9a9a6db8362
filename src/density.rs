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

/// Occupancy of a point. Shapes only produce [`INSIDE`] or [`OUTSIDE`]; the
/// values in between appear once voxels average their corners.
pub type Density = u8;

pub const INSIDE: Density = 255;
pub const OUTSIDE: Density = 0;

/// Isolevel separating inside from outside once densities are projected
/// through [`Level`]: half way between `-INSIDE` and `-OUTSIDE`.
pub const DENSITY_ISOLEVEL: f32 = -(INSIDE as f32) / 2.0;

/// Convert an inside test into a density.
pub fn density(inside: bool) -> Density {
    if inside {
        INSIDE
    } else {
        OUTSIDE
    }
}

/// Projects a field sample onto the signed scalar the mesher classifies.
///
/// Values below the isolevel are inside the surface.
pub trait Level: Copy {
    fn level(self) -> f32;
}

impl Level for Density {
    fn level(self) -> f32 {
        -f32::from(self)
    }
}

impl Level for f32 {
    fn level(self) -> f32 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_levels_straddle_isolevel() {
        assert!(INSIDE.level() < DENSITY_ISOLEVEL);
        assert!(OUTSIDE.level() > DENSITY_ISOLEVEL);
        assert_eq!(density(true), INSIDE);
        assert_eq!(density(false), OUTSIDE);
    }
}
