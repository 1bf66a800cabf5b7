use crate::node::NodeId;
use std::fmt;

/// Reasons a redraw pass (or a single connection within it) could not be drawn.
///
/// None of these are fatal to an editing session: a missing surface skips the
/// whole frame, invalid geometry skips a single connection for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// No drawing surface is bound, or the bound one refused to start a frame
    MissingSurface,
    /// A node's bounding box is not laid out yet or contains non-finite values
    InvalidGeometry { node: NodeId },
    /// A node referenced by a connection is not known to the position provider
    UnknownNode(NodeId),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSurface => write!(f, "Drawing surface is not available"),
            Self::InvalidGeometry { node } => write!(f, "Node {} has no valid bounding box", node),
            Self::UnknownNode(node) => write!(f, "Node {} is not on the canvas", node),
        }
    }
}

impl std::error::Error for RenderError {}
