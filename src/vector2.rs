use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use nalgebra::Quaternion;
use rand::Rng;

use crate::canonical_bits;
use crate::error::{Result, VectisError};

/// An immutable 2-component double-precision vector.
///
/// Value semantics throughout: every operation returns a new vector and
/// never mutates an operand. Equality and hashing are structural and use
/// exact floating-point comparison, with no epsilon tolerance.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2 {
    /// The X component.
    pub x: f64,
    /// The Y component.
    pub y: f64,
}

impl Vector2 {
    /// Number of components.
    pub const LEN: usize = 2;

    /// The vector `(0, 0)`.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// The vector `(1, 1)`.
    pub const ONE: Self = Self::new(1.0, 1.0);
    /// The vector `(1, 0)`.
    pub const UNIT_X: Self = Self::new(1.0, 0.0);
    /// The vector `(0, 1)`.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components set to `value`.
    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value)
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
        )
    }

    /// Widens a single-precision interop vector, losslessly.
    #[must_use]
    pub fn from_f32(vector: nalgebra::Vector2<f32>) -> Self {
        Self::new(f64::from(vector.x), f64::from(vector.y))
    }

    /// Narrows to the single-precision interop vector.
    ///
    /// The `f64 -> f32` precision loss happens here, at a named call site,
    /// rather than behind an implicit coercion.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32(self) -> nalgebra::Vector2<f32> {
        nalgebra::Vector2::new(self.x as f32, self.y as f32)
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
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns component `index` (`0 -> x`, `1 -> y`).
    ///
    /// # Errors
    ///
    /// Returns [`VectisError::IndexOutOfRange`] when `index >= 2`.
    pub fn get(self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(VectisError::IndexOutOfRange {
                index,
                len: Self::LEN,
            }),
        }
    }

    /// Borrows the components as a slice in `x, y` order.
    ///
    /// The slice aliases the vector's own storage; nothing is copied.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        // SAFETY: #[repr(C)] guarantees LEN consecutive, initialized f64
        // fields starting at `x`.
        unsafe { std::slice::from_raw_parts(std::ptr::addr_of!(self.x), Self::LEN) }
    }

    /// Copies the components into a fixed-size array in `x, y` order.
    #[must_use]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Iterates over the components in `x, y` order.
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
    /// Returns [`VectisError::DestinationTooSmall`] when fewer than two
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

    /// Dot product, `x1*x2 + y1*y2`.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
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
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Componentwise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Componentwise absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Componentwise square root. A negative component yields NaN.
    #[must_use]
    pub fn sqrt(self) -> Self {
        Self::new(self.x.sqrt(), self.y.sqrt())
    }

    /// Rotates the vector in the XY plane by a unit quaternion, using the
    /// precomputed cross-term expansion of the quaternion sandwich.
    ///
    /// `rotation` must already be unit length; a non-unit quaternion
    /// produces a scaled result.
    #[must_use]
    pub fn transform(self, rotation: &Quaternion<f64>) -> Self {
        let x2 = rotation.i + rotation.i;
        let y2 = rotation.j + rotation.j;
        let z2 = rotation.k + rotation.k;

        let wz2 = rotation.w * z2;
        let xx2 = rotation.i * x2;
        let xy2 = rotation.i * y2;
        let yy2 = rotation.j * y2;
        let zz2 = rotation.k * z2;

        Self::new(
            self.x * (1.0 - yy2 - zz2) + self.y * (xy2 - wz2),
            self.x * (xy2 + wz2) + self.y * (1.0 - xx2 - zz2),
        )
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Componentwise product. Distinct from [`Vector2::dot`].
impl Mul for Vector2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self * Self::splat(rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2::splat(self) * rhs
    }
}

impl Div for Vector2 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        let inv = 1.0 / rhs;
        Self::new(self.x * inv, self.y * inv)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Index<usize> for Vector2 {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when `index >= 2`. Use [`Vector2::get`] for a fallible
    /// lookup.
    fn index(&self, index: usize) -> &f64 {
        &self.as_slice()[index]
    }
}

impl Hash for Vector2 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(canonical_bits(self.x));
        state.write_u64(canonical_bits(self.y));
    }
}

impl IntoIterator for Vector2 {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.to_array().into_iter()
    }
}

impl<'a> IntoIterator for &'a Vector2 {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl From<nalgebra::Vector2<f32>> for Vector2 {
    fn from(vector: nalgebra::Vector2<f32>) -> Self {
        Self::from_f32(vector)
    }
}

impl From<Vector2> for nalgebra::Vector2<f32> {
    fn from(vector: Vector2) -> Self {
        vector.to_f32()
    }
}

impl fmt::Display for Vector2 {
    /// Renders as `<x, y>`. A formatter precision (`{:.3}`) applies to
    /// each component.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "<{:.p$}, {:.p$}>", self.x, self.y, p = p),
            None => write!(f, "<{}, {}>", self.x, self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::hash_map::DefaultHasher;

    const TOL: f64 = 1e-12;

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    fn hash_of(vector: Vector2) -> u64 {
        let mut hasher = DefaultHasher::new();
        vector.hash(&mut hasher);
        hasher.finish()
    }

    // ── construction ──

    #[test]
    fn splat_fills_both_components() {
        assert_eq!(Vector2::splat(2.5), v(2.5, 2.5));
    }

    #[test]
    fn constants() {
        assert_eq!(Vector2::ZERO, v(0.0, 0.0));
        assert_eq!(Vector2::ONE, v(1.0, 1.0));
        assert_eq!(Vector2::UNIT_X, v(1.0, 0.0));
        assert_eq!(Vector2::UNIT_Y, v(0.0, 1.0));
    }

    #[test]
    fn random_stays_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let r = Vector2::random(&mut rng, -2.0, 3.0);
            assert!(r.x >= -2.0 && r.x < 3.0, "x out of range: {r}");
            assert!(r.y >= -2.0 && r.y < 3.0, "y out of range: {r}");
        }
    }

    // ── algebra ──

    #[test]
    fn add_commutes_and_associates() {
        let (a, b, c) = (v(1.0, 2.0), v(-0.5, 4.0), v(3.25, -7.0));
        assert_eq!(a + b, b + a);
        assert_eq!((a + b) + c, a + (b + c));
        assert_eq!(a + Vector2::ZERO, a);
        assert_eq!(a - a, Vector2::ZERO);
    }

    #[test]
    fn multiply_componentwise_vs_scalar() {
        let a = v(2.0, -3.0);
        assert_eq!(a * v(4.0, 0.5), v(8.0, -1.5));
        assert_eq!(a * 2.0, v(4.0, -6.0));
        assert_eq!(2.0 * a, v(4.0, -6.0));
    }

    #[test]
    fn divide_componentwise_and_by_scalar() {
        assert_eq!(v(8.0, -2.0) / v(4.0, 0.5), v(2.0, -4.0));
        assert_eq!(v(8.0, -2.0) / 2.0, v(4.0, -1.0));
    }

    #[test]
    fn negate() {
        assert_eq!(-v(1.0, -2.0), v(-1.0, 2.0));
    }

    #[test]
    fn dot_is_symmetric() {
        let (a, b) = (v(1.0, 2.0), v(3.0, -4.0));
        assert_eq!(a.dot(b), b.dot(a));
        assert_eq!(a.dot(b), 3.0 - 8.0);
    }

    #[test]
    fn length_of_3_4_is_5() {
        let a = v(3.0, 4.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a.length_squared(), 25.0);
        assert_eq!(a.length_squared(), a.dot(a));
    }

    #[test]
    fn distance_matches_difference_length() {
        let (a, b) = (v(1.0, 1.0), v(4.0, 5.0));
        assert_eq!(a.distance(b), (a - b).length());
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn normalize_yields_unit_length() {
        let n = v(3.0, -4.0).normalize();
        assert_relative_eq!(n.length(), 1.0, epsilon = TOL);
    }

    #[test]
    fn normalize_zero_is_non_finite() {
        let n = Vector2::ZERO.normalize();
        assert!(!n.x.is_finite());
        assert!(!n.y.is_finite());
    }

    #[test]
    fn reflect_off_horizontal_surface() {
        // Incoming (1, -1) off a floor with normal (0, 1) bounces to (1, 1).
        assert_eq!(v(1.0, -1.0).reflect(Vector2::UNIT_Y), v(1.0, 1.0));
    }

    #[test]
    fn clamp_each_component_independently() {
        let r = v(5.0, -5.0).clamp(v(0.0, 0.0), v(1.0, 1.0));
        assert_eq!(r, v(1.0, 0.0));
    }

    #[test]
    fn clamp_max_wins_when_bounds_cross() {
        let r = v(0.5, 0.5).clamp(v(2.0, 2.0), v(1.0, 1.0));
        assert_eq!(r, v(1.0, 1.0));
    }

    #[test]
    fn lerp_boundaries_and_extrapolation() {
        let (a, b) = (v(1.0, 2.0), v(3.0, 6.0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), v(2.0, 4.0));
        assert_eq!(a.lerp(b, 2.0), v(5.0, 10.0));
    }

    #[test]
    fn min_max_abs_sqrt() {
        let (a, b) = (v(1.0, 5.0), v(2.0, -3.0));
        assert_eq!(a.min(b), v(1.0, -3.0));
        assert_eq!(a.max(b), v(2.0, 5.0));
        assert_eq!(v(-1.5, 2.0).abs(), v(1.5, 2.0));
        assert_eq!(v(4.0, 9.0).sqrt(), v(2.0, 3.0));
        assert!(v(-1.0, 4.0).sqrt().x.is_nan());
    }

    #[test]
    fn transform_rotates_in_plane() {
        // 90 degrees about Z maps (1, 0) to (0, 1).
        let half = std::f64::consts::FRAC_PI_4;
        let rotation = Quaternion::new(half.cos(), 0.0, 0.0, half.sin());
        let r = Vector2::UNIT_X.transform(&rotation);
        assert_relative_eq!(r.x, 0.0, epsilon = TOL);
        assert_relative_eq!(r.y, 1.0, epsilon = TOL);
    }

    #[test]
    fn transform_by_identity_is_identity() {
        let a = v(0.3, -1.7);
        let identity = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        assert_eq!(a.transform(&identity), a);
    }

    // ── sequence contract ──

    #[test]
    fn indexing_and_get() {
        let a = v(1.5, 2.5);
        assert_eq!(a[0], 1.5);
        assert_eq!(a[1], 2.5);
        assert_eq!(a.get(1), Ok(2.5));
        assert_eq!(
            a.get(2),
            Err(VectisError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_range_panics() {
        let _ = v(1.0, 2.0)[2];
    }

    #[test]
    fn slice_aliases_storage() {
        let a = v(1.0, 2.0);
        let s = a.as_slice();
        assert_eq!(s.len(), Vector2::LEN);
        assert_eq!(s.as_ptr(), std::ptr::addr_of!(a.x));
        assert_eq!(s, &[1.0, 2.0]);
    }

    #[test]
    fn array_matches_indexing() {
        let a = v(1.0, 2.0);
        let arr = a.to_array();
        assert_eq!(arr.len(), Vector2::LEN);
        for (i, value) in arr.iter().enumerate() {
            assert_eq!(*value, a[i]);
        }
    }

    #[test]
    fn iteration_order_is_x_then_y() {
        let collected: Vec<f64> = v(1.0, 2.0).into_iter().collect();
        assert_eq!(collected, vec![1.0, 2.0]);
        let borrowed: Vec<f64> = v(1.0, 2.0).iter().copied().collect();
        assert_eq!(borrowed, vec![1.0, 2.0]);
    }

    #[test]
    fn contains_scans_components() {
        let a = v(1.0, 2.0);
        assert!(a.contains(2.0));
        assert!(!a.contains(3.0));
    }

    #[test]
    fn copy_to_slice_with_offset() {
        let mut buffer = [0.0; 4];
        v(1.0, 2.0).copy_to_slice(&mut buffer, 1).unwrap();
        assert_eq!(buffer, [0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn copy_to_slice_rejects_short_destination() {
        let mut buffer = [0.0; 2];
        let result = v(1.0, 2.0).copy_to_slice(&mut buffer, 1);
        assert_eq!(
            result,
            Err(VectisError::DestinationTooSmall {
                needed: 2,
                offset: 1,
                available: 2,
            })
        );
    }

    // ── equality, hashing, conversion, formatting ──

    #[test]
    fn equality_is_exact() {
        assert_eq!(v(1.0, 2.0), v(1.0, 2.0));
        assert_ne!(v(1.0, 2.0), v(1.0, 2.0 + 1e-15));
        assert!(v(0.0, 0.0).is_zero());
        assert!(!v(1e-300, 0.0).is_zero());
    }

    #[test]
    fn equal_vectors_hash_equal() {
        assert_eq!(hash_of(v(1.0, 2.0)), hash_of(v(1.0, 2.0)));
        // -0.0 == 0.0, so the hashes must match too.
        assert_eq!(hash_of(v(-0.0, 2.0)), hash_of(v(0.0, 2.0)));
        assert_ne!(hash_of(v(1.0, 2.0)), hash_of(v(2.0, 1.0)));
    }

    #[test]
    fn f32_round_trip_preserves_representable_values() {
        let a = v(1.5, -0.25);
        assert_eq!(Vector2::from_f32(a.to_f32()), a);
        let via_from: nalgebra::Vector2<f32> = a.into();
        assert_eq!(Vector2::from(via_from), a);
    }

    #[test]
    fn display_renders_angle_brackets() {
        assert_eq!(v(1.0, 2.5).to_string(), "<1, 2.5>");
        assert_eq!(format!("{:.2}", v(1.0, 2.5)), "<1.00, 2.50>");
    }
}
