pub mod builder;
pub mod error;
pub mod octant;
pub mod octree;
pub mod position;

pub use builder::{BuildOptions, OctreeBuilder};
pub use error::OctreeError;
pub use octree::{BuildStatistics, NodeId, Octree, OctreeNode};
pub use position::Position;
