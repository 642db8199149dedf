use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::vec3::Vec3;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vec2<T> {
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> Vec2<T> {
    #[inline]
    pub fn dot(&self, other: &Vec2<T>) -> T {
        self.x * other.x + self.y * other.y
    }
}

impl<T: Copy + Neg<Output = T>> Vec2<T> {
    /// Rotated a quarter turn: `(-y, x)`.
    #[inline]
    pub fn perpendicular(&self) -> Vec2<T> {
        Vec2 {
            x: -self.y,
            y: self.x,
        }
    }
}

impl Vec2<f64> {
    /// Gains a zero z component.
    #[inline]
    pub fn to_vec3(self) -> Vec3<f64> {
        Vec3::new(self.x, self.y, 0.0)
    }
}

impl<T: Add<Output = T>> Add for Vec2<T> {
    type Output = Vec2<T>;

    #[inline]
    fn add(self, other: Vec2<T>) -> Self::Output {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Vec2<T> {
    type Output = Vec2<T>;

    #[inline]
    fn sub(self, other: Vec2<T>) -> Self::Output {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T: Mul<Output = T>> Mul for Vec2<T> {
    type Output = Vec2<T>;

    #[inline]
    fn mul(self, other: Vec2<T>) -> Self::Output {
        Vec2 {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }
}

impl Mul<f64> for Vec2<f64> {
    type Output = Vec2<f64>;

    #[inline]
    fn mul(self, factor: f64) -> Self::Output {
        Vec2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl<T: Copy + Div<Output = T>> Div<T> for Vec2<T> {
    type Output = Vec2<T>;

    #[inline]
    fn div(self, divisor: T) -> Self::Output {
        Vec2 {
            x: self.x / divisor,
            y: self.y / divisor,
        }
    }
}

#[test]
fn perpendicular_is_orthogonal() {
    let v = Vec2::new(3.0, 7.0);
    assert_eq!(0.0, v.dot(&v.perpendicular()));
    assert_eq!(Vec2::new(-7.0, 3.0), v.perpendicular());
}
