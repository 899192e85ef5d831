//! Track network components

use geo::LineString;

use crate::{EdgeId, NodeId};

/// Canonical non-branching track segment between two junction nodes.
///
/// The construction pipeline stipulates `node_a < node_b`; no traversal
/// direction is implied, and the search derives direction per query from
/// which endpoint matches the current node.
#[derive(Debug, Clone)]
pub struct TrackEdge {
    pub id: EdgeId,
    pub node_a: NodeId,
    pub node_b: NodeId,
    /// Real-world length of the segment.
    pub length: f64,
    /// Geographic shape, ordered from `node_a` to `node_b`.
    pub shape: LineString<f64>,
}
