//! Drag tracking with a single current-target slot.
//!
//! Hosts register one pointer-move and one pointer-up listener per editor and
//! forward them here; [`DragTracker`] knows which node (if any) is being
//! dragged and where it should go.

use crate::coords::effective_scale;
use crate::geometry::Point;
use crate::node::NodeId;

#[derive(Debug, Clone, PartialEq)]
struct DragTarget {
    node: NodeId,
    pointer_start: Point,
    node_start: Point,
}

/// The node currently being dragged, if any.
#[derive(Default, Debug)]
pub struct DragTracker {
    target: Option<DragTarget>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `node`, replacing any drag in progress.
    ///
    /// `pointer` is in screen space, `node_position` is the node's top-left
    /// corner in canvas space.
    pub fn begin(&mut self, node: NodeId, pointer: Point, node_position: Point) {
        if let Some(previous) = &self.target {
            log::debug!("drag of {} replaced by {}", previous.node, node);
        }
        self.target = Some(DragTarget { node, pointer_start: pointer, node_start: node_position });
    }

    /// New canvas position for the dragged node after the pointer moved to `pointer`.
    ///
    /// The screen-space pointer delta is divided by `scale`.
    pub fn update(&self, pointer: Point, scale: f32) -> Option<(NodeId, Point)> {
        let target = self.target.as_ref()?;
        let s = effective_scale(scale);
        let position = Point::new(
            target.node_start.x + (pointer.x - target.pointer_start.x) / s,
            target.node_start.y + (pointer.y - target.pointer_start.y) / s,
        );
        Some((target.node.clone(), position))
    }

    /// Finish the drag, returning the node that was dragged.
    pub fn end(&mut self) -> Option<NodeId> {
        self.target.take().map(|t| t.node)
    }

    pub fn dragged_node(&self) -> Option<&NodeId> {
        self.target.as_ref().map(|t| &t.node)
    }

    pub fn is_dragging(&self) -> bool {
        self.target.is_some()
    }

    /// Abort the drag if it targets `node`.
    pub fn forget(&mut self, node: &NodeId) -> bool {
        if self.dragged_node() == Some(node) {
            self.target = None;
            true
        } else {
            false
        }
    }
}
