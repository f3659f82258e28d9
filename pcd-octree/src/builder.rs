use pcd_core::pointcloud::point::BoundingVolume;

use crate::error::OctreeError;
use crate::octant::Octant;
use crate::octree::{BuildStatistics, NodeId, Octree, OctreeNode, NO_PARENT, ROOT_ID};
use crate::position::Position;

pub const DEFAULT_LEAF_CAPACITY: usize = 1000;
pub const DEFAULT_MAX_DEPTH: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// A node owning at most this many points is not split.
    pub leaf_capacity: usize,
    /// Nodes at this depth are never split. The root sits at depth 1.
    pub max_depth: u32,
    /// Keep the point list of nodes that have children.
    pub retain_interior_points: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            leaf_capacity: DEFAULT_LEAF_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
            retain_interior_points: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    WithinCapacity,
    Degenerate,
    DepthLimit,
}

// Counters owned by a single compose call.
struct BuildContext {
    next_id: NodeId,
    statistics: BuildStatistics,
}

impl BuildContext {
    fn new() -> Self {
        BuildContext {
            next_id: ROOT_ID,
            statistics: BuildStatistics::default(),
        }
    }

    fn allocate(&mut self, depth: u32) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.statistics.node_count += 1;
        self.statistics.max_depth = self.statistics.max_depth.max(depth);
        id
    }

    fn record_leaf(&mut self, termination: Termination) {
        self.statistics.leaf_count += 1;
        if termination == Termination::DepthLimit {
            self.statistics.depth_capped_leaves += 1;
        }
    }
}

struct PendingNode {
    parent_id: NodeId,
    depth: u32,
    bounding_volume: BoundingVolume,
    points: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct OctreeBuilder {
    options: BuildOptions,
}

impl OctreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        OctreeBuilder { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Builds an octree over `points`.
    ///
    /// The root box is the tight bounding box of the input. Nodes are split
    /// at the center of their box until they own at most
    /// [`BuildOptions::leaf_capacity`] points, they are degenerate (a
    /// zero-extent box, or every owned point at one position), or they reach
    /// [`BuildOptions::max_depth`]. The root is always split once when over
    /// capacity, even if every point coincides.
    pub fn compose<P: Position>(&self, points: Vec<P>) -> Result<Octree<P>, OctreeError> {
        let bounding_volume = BoundingVolume::from_positions(points.iter().map(P::position))
            .ok_or(OctreeError::EmptyInput)?;

        let mut context = BuildContext::new();
        let mut nodes: Vec<OctreeNode> = Vec::new();
        let mut stack = vec![PendingNode {
            parent_id: NO_PARENT,
            depth: 1,
            bounding_volume,
            points: (0..points.len()).collect(),
        }];

        while let Some(pending) = stack.pop() {
            let id = context.allocate(pending.depth);
            if pending.parent_id != NO_PARENT {
                // the parent was pushed before any of its children were popped
                nodes[(pending.parent_id - 1) as usize].children.push(id);
            }

            let mut node = OctreeNode {
                id,
                depth: pending.depth,
                parent_id: pending.parent_id,
                bounding_volume: pending.bounding_volume,
                points: pending.points,
                children: Vec::new(),
            };

            match self.termination(&node, &points) {
                Some(termination) => context.record_leaf(termination),
                None => {
                    let children = split(&node, &points);
                    if !self.options.retain_interior_points {
                        node.points = Vec::new();
                    }
                    // reversed so that octant 0 is popped first
                    stack.extend(children.into_iter().rev());
                }
            }

            nodes.push(node);
        }

        let statistics = context.statistics;
        log::debug!(
            "composed octree with {} nodes ({} leaves), depth {}",
            statistics.node_count,
            statistics.leaf_count,
            statistics.max_depth
        );
        if statistics.depth_capped_leaves > 0 {
            log::warn!(
                "{} leaves hold more than {} points because the depth limit of {} was reached",
                statistics.depth_capped_leaves,
                self.options.leaf_capacity,
                self.options.max_depth
            );
        }

        Ok(Octree::from_parts(points, nodes, statistics))
    }

    fn termination<P: Position>(&self, node: &OctreeNode, points: &[P]) -> Option<Termination> {
        if node.points.len() <= self.options.leaf_capacity {
            Some(Termination::WithinCapacity)
        } else if !node.is_root()
            && (node.bounding_volume.is_degenerate() || is_single_position(&node.points, points))
        {
            Some(Termination::Degenerate)
        } else if node.depth >= self.options.max_depth {
            Some(Termination::DepthLimit)
        } else {
            None
        }
    }
}

// Midpoint splits only shrink a box toward a repeated position, never onto it.
fn is_single_position<P: Position>(indices: &[usize], points: &[P]) -> bool {
    let mut positions = indices.iter().map(|&index| points[index].position());
    match positions.next() {
        Some(first) => positions.all(|position| position == first),
        None => true,
    }
}

fn split<P: Position>(node: &OctreeNode, points: &[P]) -> Vec<PendingNode> {
    let center = node.bounding_volume.center();

    let mut buckets: [Vec<usize>; 8] = Default::default();
    for &index in &node.points {
        let octant = Octant::locate(&center, &points[index].position());
        buckets[octant.index()].push(index);
    }

    Octant::ALL
        .iter()
        .zip(buckets)
        .map(|(octant, points)| {
            PendingNode {
                parent_id: node.id,
                depth: node.depth + 1,
                bounding_volume: octant.bounds(&node.bounding_volume, &center),
                points,
            }
        })
        .collect()
}
