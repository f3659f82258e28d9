use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OctreeError {
    #[error("cannot compose an octree from zero points")]
    EmptyInput,
}
