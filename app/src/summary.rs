use std::io::Write;

use pcd_octree::BuildStatistics;
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub point_count: usize,
    pub node_count: u32,
    pub depth: u32,
    pub leaf_count: u32,
    pub depth_capped_leaves: u32,
}

impl Summary {
    pub fn new(point_count: usize, statistics: &BuildStatistics) -> Self {
        Summary {
            point_count,
            node_count: statistics.node_count,
            depth: statistics.max_depth,
            leaf_count: statistics.leaf_count,
            depth_capped_leaves: statistics.depth_capped_leaves,
        }
    }

    pub fn write_text<W: Write>(&self, writer: &mut W) -> Result<(), AppError> {
        writeln!(writer, "Number of points: {}", self.point_count)?;
        writeln!(writer, "Number of octree nodes: {}", self.node_count)?;
        writeln!(writer, "Number of leaves: {}", self.leaf_count)?;
        writeln!(writer, "Depth of octree: {}", self.depth)?;
        Ok(())
    }

    pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<(), AppError> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}
