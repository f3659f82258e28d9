use pcd_core::pointcloud::point::PointCloud;

use crate::error::ParseError;

pub mod las;

/// Turns an in-memory file image into a decoded point cloud.
pub trait Parser {
    fn parse(&self, buffer: &[u8]) -> Result<PointCloud, ParseError>;
}
