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

//! Small value-type vectors. Every operation returns a new vector, so shared
//! operand subtrees never observe each other's intermediate points.

/// A 2 dimensional vector, used for points on a cut plane.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// A 3 dimensional vector in right-anterior-superior world space.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

// Plus and multiply operators can't be used as separators in macro repetition,
// so fold them instead
macro_rules! fold {
    ($op:tt, $x:expr, $y:expr) => {
        $x $op $y
    };
    ($op:tt, $x:expr, $y:expr, $($rest:expr),+) => {
        fold!($op, ($x $op $y), $($rest),*)
    }
}

macro_rules! impl_arithmetic_op {
    ($name:ident, $op_name:ident, $op_small_name:ident, $op:tt { $($field:ident),+ }) => {
        impl std::ops::$op_name for $name {
            type Output = $name;
            fn $op_small_name(self, other: $name) -> $name {
                $name::new($(self.$field $op other.$field),*)
            }
        }
        impl std::ops::$op_name<f32> for $name {
            type Output = $name;
            fn $op_small_name(self, other: f32) -> $name {
                $name::new($(self.$field $op other),*)
            }
        }
        impl std::ops::$op_name<$name> for f32 {
            type Output = $name;
            fn $op_small_name(self, other: $name) -> $name {
                $name::new($(self $op other.$field),*)
            }
        }
    };
}

macro_rules! impl_assign_op {
    ($name:ident, $op_name:ident, $op_small_name:ident, $op:tt { $($field:ident),+ }) => {
        impl std::ops::$op_name for $name {
            fn $op_small_name(&mut self, other: $name) {
                $(self.$field $op other.$field);*
            }
        }
    };
}

macro_rules! impl_vector {
    ($name:ident { $($field:ident),+ }) => {
        impl $name {
            /// Create a vector
            pub const fn new($($field: f32),*) -> Self {
                Self { $($field),* }
            }

            /// Create a vector by repeating a single value
            pub const fn from_scalar(f: f32) -> Self {
                Self { $($field: f),* }
            }

            /// Create a vector with all coordinates set to zero
            pub const fn zero() -> Self {
                Self::from_scalar(0.0)
            }

            /// Create a vector with all coordinates set to one
            pub const fn one() -> Self {
                Self::from_scalar(1.0)
            }

            /// Squared Euclidean length of this vector
            pub fn len_sq(&self) -> f32 {
                fold!(+, $(self.$field * self.$field),*)
            }

            /// Euclidean length of this vector
            pub fn len(&self) -> f32 {
                self.len_sq().sqrt()
            }

            /// Sum of the absolute values of the components
            pub fn l1_norm(&self) -> f32 {
                fold!(+, $(self.$field.abs()),*)
            }

            /// Calculate the dot product of this vector and another
            pub fn dot(&self, other: Self) -> f32 {
                fold!(+, $(self.$field * other.$field),*)
            }

            /// Normalised copy of this vector, or `None` for a zero-length vector
            pub fn normalised(&self) -> Option<Self> {
                let l = self.len();
                if l.abs() < std::f32::EPSILON {
                    None
                } else {
                    Some(Self {
                        $($field: self.$field / l),*
                    })
                }
            }

            /// Test if every component matches a predicate
            pub fn all<F: Fn(f32) -> bool>(&self, f: F) -> bool {
                fold!(&&, $(f(self.$field)),*)
            }

            /// Test if any component matches a predicate
            pub fn any<F: Fn(f32) -> bool>(&self, f: F) -> bool {
                fold!(||, $(f(self.$field)),*)
            }
        }

        impl std::default::Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl std::ops::Neg for $name {
            type Output = $name;
            fn neg(self) -> $name {
                $name::new($(-self.$field),*)
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::zero(), std::ops::Add::add)
            }
        }

        impl std::ops::Index<usize> for $name {
            type Output = f32;
            fn index(&self, index: usize) -> &f32 {
                [$(&self.$field),*][index]
            }
        }

        impl_arithmetic_op!($name, Add, add, + { $($field),* });
        impl_arithmetic_op!($name, Sub, sub, - { $($field),* });
        impl_arithmetic_op!($name, Mul, mul, * { $($field),* });
        impl_arithmetic_op!($name, Div, div, / { $($field),* });
        impl_assign_op!($name, AddAssign, add_assign, += { $($field),* });
        impl_assign_op!($name, SubAssign, sub_assign, -= { $($field),* });
    };
}

impl_vector!(Vec2 { x, y });
impl_vector!(Vec3 { x, y, z });

impl From<[f32; 2]> for Vec2 {
    fn from(a: [f32; 2]) -> Self {
        Vec2::new(a[0], a[1])
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(a: [f32; 3]) -> Self {
        Vec3::new(a[0], a[1], a[2])
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl Vec3 {
    /// Compute the cross product of this vector and another
    pub fn cross(&self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    pub fn xy(&self) -> Vec2 {
        vec2(self.x, self.y)
    }

    /// Triple product `self · (b × c)`, six times the signed volume of the
    /// tetrahedron spanned with the origin
    pub fn triple(&self, b: Self, c: Self) -> f32 {
        self.dot(b.cross(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_works() {
        assert_eq!(vec2(1.0, 2.0).len_sq(), 5.0);
        assert_eq!(vec3(1.0, 2.0, 3.0).len_sq(), 14.0);
        assert_eq!(vec3(-1.0, 2.0, -3.0).l1_norm(), 6.0);
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        let x = vec3(1.0, 0.0, 0.0);
        let y = vec3(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), vec3(0.0, 0.0, 1.0));
        assert_eq!(x.triple(y, vec3(0.0, 0.0, 1.0)), 1.0);
    }

    #[test]
    fn test_normalised_rejects_zero() {
        assert!(Vec3::zero().normalised().is_none());
        assert_eq!(
            vec3(0.0, 3.0, 0.0).normalised(),
            Some(vec3(0.0, 1.0, 0.0))
        );
    }

    #[test]
    fn test_operators_produce_new_values() {
        let a = vec3(1.0, 2.0, 3.0);
        let mut b = a;
        b += Vec3::one();
        assert_eq!(a, vec3(1.0, 2.0, 3.0));
        assert_eq!(b, vec3(2.0, 3.0, 4.0));
        assert_eq!(a * 2.0, vec3(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a - a, a);
        assert_eq!(a / vec3(1.0, 2.0, 3.0), Vec3::one());
        let as_array: [f32; 3] = a.into();
        assert_eq!(as_array, [1.0, 2.0, 3.0]);
    }
}
