use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use nalgebra::Quaternion;
use rand::Rng;

use crate::canonical_bits;
use crate::error::{Result, VectisError};
use crate::vector2::Vector2;

/// An immutable 3-component double-precision vector.
///
/// Carries the full [`Vector2`] operation set plus the cross product.
/// Value semantics throughout: every operation returns a new vector and
/// never mutates an operand. Equality and hashing are structural and use
/// exact floating-point comparison, with no epsilon tolerance.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    /// The X component.
    pub x: f64,
    /// The Y component.
    pub y: f64,
    /// The Z component.
    pub z: f64,
}

impl Vector3 {
    /// Number of components.
    pub const LEN: usize = 3;

    /// The vector `(0, 0, 0)`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// The vector `(1, 1, 1)`.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// The vector `(1, 0, 0)`.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    /// The vector `(0, 1, 0)`.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    /// The vector `(0, 0, 1)`.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all three components set to `value`.
    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Extends a 2D vector with a third component.
    #[must_use]
    pub const fn from_vector2(xy: Vector2, z: f64) -> Self {
        Self::new(xy.x, xy.y, z)
    }

    /// Draws each component independently and uniformly from `[min, max)`.
    ///
    /// The caller owns the generator: pass a seeded generator for
    /// reproducible values, or a thread-local one when reproducibility
    /// does not matter.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Self {
        Self::new(
            min + (max - min) * rng.gen::<f64>(),
            min + (max - min) * rng.gen::<f64>(),
            min + (max - min) * rng.gen::<f64>(),
        )
    }

    /// Widens a single-precision interop vector, losslessly.
    #[must_use]
    pub fn from_f32(vector: nalgebra::Vector3<f32>) -> Self {
        Self::new(f64::from(vector.x), f64::from(vector.y), f64::from(vector.z))
    }

    /// Narrows to the single-precision interop vector.
    ///
    /// The `f64 -> f32` precision loss happens here, at a named call site,
    /// rather than behind an implicit coercion.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32(self) -> nalgebra::Vector3<f32> {
        nalgebra::Vector3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Euclidean length, `sqrt(dot(self, self))`.
    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Squared length. Avoids the square root of [`Self::length`] when only
    /// comparing magnitudes.
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// True iff every component is exactly `0.0`.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Returns component `index` (`0 -> x`, `1 -> y`, `2 -> z`).
    ///
    /// # Errors
    ///
    /// Returns [`VectisError::IndexOutOfRange`] when `index >= 3`.
    pub fn get(self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(VectisError::IndexOutOfRange {
                index,
                len: Self::LEN,
            }),
        }
    }

    /// Borrows the components as a slice in `x, y, z` order.
    ///
    /// The slice aliases the vector's own storage; nothing is copied.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        // SAFETY: #[repr(C)] guarantees LEN consecutive, initialized f64
        // fields starting at `x`.
        unsafe { std::slice::from_raw_parts(std::ptr::addr_of!(self.x), Self::LEN) }
    }

    /// Copies the components into a fixed-size array in `x, y, z` order.
    #[must_use]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Iterates over the components in `x, y, z` order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.as_slice().iter()
    }

    /// True if any component equals `value` under exact floating-point
    /// comparison (linear scan).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.as_slice().contains(&value)
    }

    /// Copies the components into `dest` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`VectisError::DestinationTooSmall`] when fewer than three
    /// elements remain at `offset`.
    pub fn copy_to_slice(self, dest: &mut [f64], offset: usize) -> Result<()> {
        let end = offset
            .checked_add(Self::LEN)
            .filter(|&end| end <= dest.len())
            .ok_or(VectisError::DestinationTooSmall {
                needed: Self::LEN,
                offset,
                available: dest.len(),
            })?;
        dest[offset..end].copy_from_slice(&self.to_array());
        Ok(())
    }

    /// Dot product, `x1*x2 + y1*y2 + z1*z2`.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product, right-handed: `cross(a, b) == -cross(b, a)`.
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean distance between two points, `(self - other).length()`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Squared Euclidean distance between two points.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Returns the vector scaled to length one.
    ///
    /// A zero-length input divides by zero and yields non-finite
    /// components; callers must guard against it.
    #[must_use]
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    /// Reflects the vector off a surface with the given normal,
    /// `self - 2 * dot(self, normal) * normal`.
    ///
    /// `normal` must already be unit length; it is not normalized here.
    #[must_use]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }

    /// Clamps each component independently to `[min, max]`.
    ///
    /// The minimum bound is applied before the maximum, so a component
    /// where `min > max` resolves to `max`. That ordering is a fixed
    /// tie-break, not a validated precondition.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            self.x.max(min.x).min(max.x),
            self.y.max(min.y).min(max.y),
            self.z.max(min.z).min(max.z),
        )
    }

    /// Linear interpolation, `self + (other - self) * t`.
    ///
    /// `t` is not clamped; values outside `[0, 1]` extrapolate.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    /// Componentwise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Componentwise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Componentwise absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Componentwise square root. A negative component yields NaN.
    #[must_use]
    pub fn sqrt(self) -> Self {
        Self::new(self.x.sqrt(), self.y.sqrt(), self.z.sqrt())
    }

    /// Rotates the vector by a unit quaternion, using the precomputed
    /// cross-term expansion of the quaternion sandwich.
    ///
    /// `rotation` must already be unit length; a non-unit quaternion
    /// produces a scaled result.
    #[must_use]
    pub fn transform(self, rotation: &Quaternion<f64>) -> Self {
        let x2 = rotation.i + rotation.i;
        let y2 = rotation.j + rotation.j;
        let z2 = rotation.k + rotation.k;

        let wx2 = rotation.w * x2;
        let wy2 = rotation.w * y2;
        let wz2 = rotation.w * z2;
        let xx2 = rotation.i * x2;
        let xy2 = rotation.i * y2;
        let xz2 = rotation.i * z2;
        let yy2 = rotation.j * y2;
        let yz2 = rotation.j * z2;
        let zz2 = rotation.k * z2;

        Self::new(
            self.x * (1.0 - yy2 - zz2) + self.y * (xy2 - wz2) + self.z * (xz2 + wy2),
            self.x * (xy2 + wz2) + self.y * (1.0 - xx2 - zz2) + self.z * (yz2 - wx2),
            self.x * (xz2 - wy2) + self.y * (yz2 + wx2) + self.z * (1.0 - xx2 - yy2),
        )
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Componentwise product. Distinct from [`Vector3::dot`].
impl Mul for Vector3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self * Self::splat(rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::splat(self) * rhs
    }
}

impl Div for Vector3 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        let inv = 1.0 / rhs;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Index<usize> for Vector3 {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when `index >= 3`. Use [`Vector3::get`] for a fallible
    /// lookup.
    fn index(&self, index: usize) -> &f64 {
        &self.as_slice()[index]
    }
}

impl Hash for Vector3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(canonical_bits(self.x));
        state.write_u64(canonical_bits(self.y));
        state.write_u64(canonical_bits(self.z));
    }
}

impl IntoIterator for Vector3 {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 3>;

    fn into_iter(self) -> Self::IntoIter {
        self.to_array().into_iter()
    }
}

impl<'a> IntoIterator for &'a Vector3 {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl From<nalgebra::Vector3<f32>> for Vector3 {
    fn from(vector: nalgebra::Vector3<f32>) -> Self {
        Self::from_f32(vector)
    }
}

impl From<Vector3> for nalgebra::Vector3<f32> {
    fn from(vector: Vector3) -> Self {
        vector.to_f32()
    }
}

impl fmt::Display for Vector3 {
    /// Renders as `<x, y, z>`. A formatter precision (`{:.3}`) applies to
    /// each component.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(
                f,
                "<{:.p$}, {:.p$}, {:.p$}>",
                self.x,
                self.y,
                self.z,
                p = p
            ),
            None => write!(f, "<{}, {}, {}>", self.x, self.y, self.z),
        }
    }
}
