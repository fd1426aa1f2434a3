use std::fmt;
use std::ops;

/// A 2-D point/vector, expressed the way the game's geometry does: as a
/// complex number with the origin at canvas center.
///
/// Rotation is multiplication by a unit vector; reflection about the 1-5
/// axis is complex conjugation composed with a fixed rotation (see
/// [`crate::geometry::pad::Pad::reflect`]).
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub re: f64,
    pub im: f64,
}

impl Point {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Unit vector at angle `radians`, measured counter-clockwise from the
    /// positive real axis.
    #[inline]
    pub fn from_angle(radians: f64) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.re * other.re + self.im * other.im
    }

    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len <= f64::EPSILON {
            Self::ZERO
        } else {
            self / len
        }
    }

    /// Complex multiplication: scales and rotates `self` by `other`.
    #[inline]
    pub fn rotate(self, other: Self) -> Self {
        Self::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }
}

impl ops::Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl ops::Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl ops::Mul<f64> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }
}

impl ops::Div<f64> for Point {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.re / rhs, self.im / rhs)
    }
}

impl ops::AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl ops::Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.re, self.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_by_quarter_turn_swaps_axes() {
        let p = Point::new(1.0, 0.0);
        let rotated = p.rotate(Point::from_angle(std::f64::consts::FRAC_PI_2));
        assert!((rotated.re).abs() < 1e-9);
        assert!((rotated.im - 1.0).abs() < 1e-9);
    }

    #[test]
    fn conj_is_involutive() {
        let p = Point::new(3.0, -4.0);
        assert_eq!(p.conj().conj(), p);
    }
}
