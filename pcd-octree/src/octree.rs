use std::fmt;

use pcd_core::pointcloud::point::BoundingVolume;
use serde::{Deserialize, Serialize};

pub type NodeId = u32;

pub const NO_PARENT: NodeId = 0;
pub const ROOT_ID: NodeId = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct OctreeNode {
    pub id: NodeId,
    pub depth: u32,
    pub parent_id: NodeId,
    pub bounding_volume: BoundingVolume,
    /// Indices into [`Octree::points`] of every point inside `bounding_volume`.
    pub points: Vec<usize>,
    /// Either empty or the eight child ids in octant order.
    pub children: Vec<NodeId>,
}

impl OctreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id == NO_PARENT
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStatistics {
    pub node_count: u32,
    pub max_depth: u32,
    pub leaf_count: u32,
    /// Leaves that were still over capacity when the depth limit stopped them.
    pub depth_capped_leaves: u32,
}

/// A built octree.
///
/// Nodes are stored in a flat arena in id order, so the node with id `n`
/// lives at index `n - 1`. Ids follow a depth-first pre-order walk.
#[derive(Debug, Clone)]
pub struct Octree<P> {
    points: Vec<P>,
    nodes: Vec<OctreeNode>,
    statistics: BuildStatistics,
}

impl<P> Octree<P> {
    pub(crate) fn from_parts(
        points: Vec<P>,
        nodes: Vec<OctreeNode>,
        statistics: BuildStatistics,
    ) -> Self {
        debug_assert!(!nodes.is_empty());
        Octree {
            points,
            nodes,
            statistics,
        }
    }

    pub fn root(&self) -> &OctreeNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> Option<&OctreeNode> {
        let index = id.checked_sub(1)? as usize;
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, node: &OctreeNode) -> Option<&OctreeNode> {
        self.node(node.parent_id)
    }

    pub fn children<'a>(&'a self, node: &'a OctreeNode) -> impl Iterator<Item = &'a OctreeNode> {
        node.children.iter().filter_map(move |&id| self.node(id))
    }

    pub fn leaves(&self) -> impl Iterator<Item = &OctreeNode> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    pub fn node_points<'a>(&'a self, node: &'a OctreeNode) -> impl Iterator<Item = &'a P> {
        node.points.iter().map(move |&index| &self.points[index])
    }

    pub fn points(&self) -> &[P] {
        &self.points
    }

    pub fn statistics(&self) -> &BuildStatistics {
        &self.statistics
    }

    pub fn into_points(self) -> Vec<P> {
        self.points
    }
}

impl<P> fmt::Display for Octree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            let indent = (node.depth as usize - 1) * 2;
            writeln!(
                f,
                "{:indent$}Node {} (depth {}, parent {}): {} points, Bounding Volume: {:?}",
                "",
                node.id,
                node.depth,
                node.parent_id,
                node.point_count(),
                node.bounding_volume,
                indent = indent
            )?;
        }
        Ok(())
    }
}
