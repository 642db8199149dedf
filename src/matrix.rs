use std::ops::{Add, Mul};

use crate::vec3::Vec3;

/// Index notation is: i, j - row, column.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Matrix3x3<T>([[T; 3]; 3]);

impl<T: Copy> Matrix3x3<T> {
    pub fn new(rows: [[T; 3]; 3]) -> Self {
        Matrix3x3(rows)
    }

    /// Builds the matrix whose columns are the given basis vectors, so that
    /// `m * v == v.x * ihat + v.y * jhat + v.z * khat`.
    pub fn from_columns(ihat: Vec3<T>, jhat: Vec3<T>, khat: Vec3<T>) -> Self {
        Matrix3x3([
            [ihat.x, jhat.x, khat.x],
            [ihat.y, jhat.y, khat.y],
            [ihat.z, jhat.z, khat.z],
        ])
    }

    pub fn column(&self, j: usize) -> Vec3<T> {
        Vec3::new(self.0[0][j], self.0[1][j], self.0[2][j])
    }
}

impl Matrix3x3<f64> {
    pub fn identity() -> Self {
        Matrix3x3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }
}

impl<'a, T: Copy + Add<Output = T> + Mul<Output = T>> Mul<Vec3<T>> for &'a Matrix3x3<T> {
    type Output = Vec3<T>;

    fn mul(self, v: Vec3<T>) -> Self::Output {
        let m = &self.0;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

impl Mul<Matrix3x3<f64>> for Matrix3x3<f64> {
    type Output = Matrix3x3<f64>;

    fn mul(self, o: Matrix3x3<f64>) -> Self::Output {
        let mut out = Matrix3x3::<f64>::default();

        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    out.0[i][j] += self.0[i][k] * o.0[k][j];
                }
            }
        }

        out
    }
}

#[test]
fn mul_matrix_vec() {
    let matrix = &Matrix3x3::new([[1, 0, 10], [0, 1, 0], [0, 0, 1]]);
    let vec = Vec3::new(10, 10, 1);

    assert_eq!(Vec3::new(20, 10, 1), matrix * vec);
}

#[test]
fn mul_identity() {
    let m = Matrix3x3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    assert_eq!(m, m * Matrix3x3::identity());
    assert_eq!(m, Matrix3x3::identity() * m);
}

#[test]
fn columns_round_trip() {
    let i = Vec3::new(1.0, 2.0, 3.0);
    let j = Vec3::new(4.0, 5.0, 6.0);
    let k = Vec3::new(7.0, 8.0, 9.0);
    let m = Matrix3x3::from_columns(i, j, k);

    assert_eq!(j, m.column(1));
    assert_eq!(i + j.scale(2.0) + k.scale(3.0), &m * Vec3::new(1.0, 2.0, 3.0));
}
