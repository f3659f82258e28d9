use std::{io, path::PathBuf};

use pcd_octree::OctreeError;
use pcd_parser::error::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("LAS file not provided/not found: {0:?}")]
    InputNotFound(PathBuf),
    #[error("failed to read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to decode LAS file: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to compose octree: {0}")]
    Octree(#[from] OctreeError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}
