use std::io;

use thiserror::Error;

use crate::model::MeshError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed scene file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("invalid model: {0}")]
    Model(String),
    #[error("cannot encode image: {0}")]
    Encode(String),
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
