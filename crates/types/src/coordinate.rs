//! 2D coordinate with component-wise arithmetic and bounds checks.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A pair of scalars addressing a cell (or a direction) on a 2D grid.
///
/// Arithmetic is component-wise. The comparison helpers are *conjunctive*:
/// both components must satisfy the relation, so `!a.all_lt(b)` does not
/// imply `a.all_ge(b)`. This is deliberately not a `PartialOrd` impl, which
/// could not express those semantics through the comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate<T> {
    pub x: T,
    pub y: T,
}

impl<T> Coordinate<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Coordinate<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T> From<[T; 2]> for Coordinate<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}

impl<T: PartialOrd> Coordinate<T> {
    pub fn all_lt(self, other: Self) -> bool {
        self.x < other.x && self.y < other.y
    }

    pub fn all_le(self, other: Self) -> bool {
        self.x <= other.x && self.y <= other.y
    }

    pub fn all_ge(self, other: Self) -> bool {
        self.x >= other.x && self.y >= other.y
    }

    pub fn all_gt(self, other: Self) -> bool {
        self.x > other.x && self.y > other.y
    }
}

impl<T: PartialOrd + Default + Copy> Coordinate<T> {
    /// Half-open bounds test: `(0, 0) <= self < dimensions` component-wise.
    pub fn in_bounds(self, dimensions: Self) -> bool {
        self.all_ge(Self::default()) && self.all_lt(dimensions)
    }
}

impl Coordinate<i32> {
    /// Row-major linear index `y * width + x`.
    ///
    /// Only meaningful for in-bounds coordinates; callers gate with
    /// [`Coordinate::in_bounds`] first.
    pub fn to_index(self, width: i32) -> usize {
        (self.y as isize * width as isize + self.x as isize) as usize
    }

    pub fn as_f64(self) -> Coordinate<f64> {
        Coordinate::new(self.x as f64, self.y as f64)
    }
}

impl Coordinate<f64> {
    /// Truncating conversion back to the integer grid.
    pub fn truncate(self) -> Coordinate<i32> {
        Coordinate::new(self.x as i32, self.y as i32)
    }
}

impl<T: Add<Output = T>> Add for Coordinate<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Coordinate<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Mul<Output = T>> Mul for Coordinate<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl<T: Div<Output = T>> Div for Coordinate<T> {
    type Output = Self;

    /// Component-wise division. Division by zero is the caller's
    /// responsibility, exactly as for the scalar type.
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for Coordinate<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Div<Output = T> + Copy> Div<T> for Coordinate<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: Neg<Output = T>> Neg for Coordinate<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Add<Output = T> + Copy> AddAssign for Coordinate<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Sub<Output = T> + Copy> SubAssign for Coordinate<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Mul<Output = T> + Copy> MulAssign for Coordinate<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Div<Output = T> + Copy> DivAssign for Coordinate<T> {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<T: Mul<Output = T> + Copy> MulAssign<T> for Coordinate<T> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Div<Output = T> + Copy> DivAssign<T> for Coordinate<T> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}
