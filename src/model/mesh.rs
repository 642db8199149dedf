//! Triangle meshes read from Wavefront OBJ text.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::vec3::Vec3;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to read mesh: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: invalid number {token:?}")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: vertex needs 3 components")]
    MissingComponent { line: usize },
    #[error("line {line}: face needs at least 2 vertices, got {count}")]
    TooFewVertices { line: usize, count: usize },
    #[error("line {line}: vertex index {index} out of range, {count} vertices defined")]
    IndexOutOfRange { line: usize, index: i64, count: usize },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle<T> {
    pub vertices: [Vec3<T>; 3],

    /// Shared by all three vertices: triangles are always *flat*.
    pub normal: Vec3<T>,
}

/// Flat triangle soup: every three consecutive points form a triangle and
/// `normals[i]` is the face normal of the triangle owning `points[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub points: Vec<Vec3<f64>>,
    pub normals: Vec<Vec3<f64>>,
}

impl Mesh {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let data = fs::read_to_string(path)?;
        Self::parse(&data)
    }

    /// Parses the `v` and `f` records of an OBJ file. Faces are fan
    /// triangulated around their first vertex.
    pub fn parse(data: &str) -> Result<Self, MeshError> {
        let mut vertices = Vec::new();
        let mut mesh = Mesh::default();

        for (n, line) in data.lines().enumerate() {
            let line_no = n + 1;
            let mut parts = line.split_whitespace();

            match parts.next() {
                Some("v") => vertices.push(parse_vertex(line_no, parts)?),
                Some("f") => {
                    let face = parse_face(line_no, parts, vertices.len())?;
                    for k in 1..face.len() - 1 {
                        mesh.push(vertices[face[0]], vertices[face[k]], vertices[face[k + 1]]);
                    }
                }
                _ => {}
            }
        }

        Ok(mesh)
    }

    fn push(&mut self, a: Vec3<f64>, b: Vec3<f64>, c: Vec3<f64>) {
        let normal = (b - a).cross(&(c - a)).unit();

        self.points.extend_from_slice(&[a, b, c]);
        self.normals.extend_from_slice(&[normal, normal, normal]);
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.points.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle<f64>> + '_ {
        self.points
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
            .map(|(p, n)| Triangle {
                vertices: [p[0], p[1], p[2]],
                normal: n[0],
            })
    }
}

fn parse_number<T: std::str::FromStr>(line: usize, token: &str) -> Result<T, MeshError> {
    token.parse().map_err(|_| MeshError::InvalidNumber {
        line,
        token: token.to_owned(),
    })
}

fn parse_vertex<'a>(line: usize, mut parts: impl Iterator<Item = &'a str>) -> Result<Vec3<f64>, MeshError> {
    let mut component = || -> Result<f64, MeshError> {
        let token = parts.next().ok_or(MeshError::MissingComponent { line })?;
        parse_number(line, token)
    };

    Ok(Vec3::new(component()?, component()?, component()?))
}

/// Returns zero-based vertex indices. Texture and normal indices after
/// `/` are ignored.
fn parse_face<'a>(
    line: usize,
    parts: impl Iterator<Item = &'a str>,
    count: usize,
) -> Result<Vec<usize>, MeshError> {
    let mut indices = Vec::new();

    for group in parts {
        let token = group.split('/').next().unwrap_or(group);
        let index: i64 = parse_number(line, token)?;
        let resolved = resolve_index(index, count).ok_or(MeshError::IndexOutOfRange { line, index, count })?;
        indices.push(resolved);
    }

    if indices.len() < 2 {
        return Err(MeshError::TooFewVertices {
            line,
            count: indices.len(),
        });
    }

    Ok(indices)
}

/// One-based indices count from the start, negative ones back from the
/// latest vertex. Zero is never valid.
fn resolve_index(index: i64, count: usize) -> Option<usize> {
    if index > 0 {
        let zero_based = (index - 1) as usize;
        (zero_based < count).then(|| zero_based)
    } else if index < 0 {
        let back = index.unsigned_abs() as usize;
        (back <= count).then(|| count - back)
    } else {
        None
    }
}
