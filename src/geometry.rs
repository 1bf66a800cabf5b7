//! Geometry primitives and the position-provider seam used by the renderer.
//!
//! The renderer never reads node bounding boxes directly. It asks a
//! [`PositionProvider`] for the on-screen center of each endpoint, so routing
//! can be driven by a live layout, by the [`GeometryCache`](crate::GeometryCache)
//! or by synthetic coordinates in tests.

use crate::error::RenderError;
use crate::node::NodeId;
use std::collections::HashMap;

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Divide both coordinates by `factor`.
    pub fn unscale(self, factor: f32) -> Point {
        Point::new(self.x / factor, self.y / factor)
    }
}

/// Width and height of the canvas (or of the overlay surface covering it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn scaled(self, factor: f32) -> CanvasSize {
        CanvasSize::new(self.width * factor, self.height * factor)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Trait for node geometry data needed for routing
pub trait NodeGeometry {
    fn id(&self) -> &NodeId;
    fn rect(&self) -> (f32, f32, f32, f32); // left, top, width, height

    /// Midpoint of the bounding box, or `None` when the box is degenerate.
    ///
    /// A box with a zero or negative extent has not been laid out yet.
    fn center(&self) -> Option<Point> {
        let (x, y, w, h) = self.rect();
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return None;
        }
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        Some(Point::new(x + w / 2.0, y + h / 2.0))
    }
}

/// Simple implementation of NodeGeometry
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleNodeGeometry {
    pub id: NodeId,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl NodeGeometry for SimpleNodeGeometry {
    fn id(&self) -> &NodeId { &self.id }
    fn rect(&self) -> (f32, f32, f32, f32) { (self.left, self.top, self.width, self.height) }
}

/// Capability to resolve a node's current on-screen center.
///
/// Returned points are in screen pixels relative to the canvas origin, i.e.
/// after the view's scale and translation have been applied.
pub trait PositionProvider {
    fn center(&self, node: &NodeId) -> Result<Point, RenderError>;
}

impl PositionProvider for HashMap<NodeId, Point> {
    fn center(&self, node: &NodeId) -> Result<Point, RenderError> {
        let point = self
            .get(node)
            .ok_or_else(|| RenderError::UnknownNode(node.clone()))?;
        if point.is_finite() {
            Ok(*point)
        } else {
            Err(RenderError::InvalidGeometry { node: node.clone() })
        }
    }
}
