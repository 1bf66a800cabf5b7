use crate::coords::{effective_scale, Translation, ViewState};
use crate::error::RenderError;
use crate::geometry::{NodeGeometry, Point, PositionProvider};
use crate::node::{NodeId, NodeMarker};
use std::collections::HashMap;

/// A node as tracked by the editor: its laid-out box in canvas space and its marker.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredNode {
    pub id: NodeId,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub marker: NodeMarker,
}

impl NodeGeometry for StoredNode {
    fn id(&self) -> &NodeId { &self.id }
    fn rect(&self) -> (f32, f32, f32, f32) { (self.left, self.top, self.width, self.height) }
}

/// Helper struct to manage spatial state of the editor (node boxes and markers)
///
/// Positions are stored in untransformed canvas space, so zoom and pan changes
/// require no per-node updates.
#[derive(Default)]
pub struct GeometryCache {
    pub nodes: HashMap<NodeId, StoredNode>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a node whose size is not known yet.
    ///
    /// Returns `false` (and leaves the existing node untouched) if the id is
    /// already on the canvas.
    pub fn insert_node(&mut self, id: NodeId, left: f32, top: f32) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(
            id.clone(),
            StoredNode { id, left, top, width: 0.0, height: 0.0, marker: NodeMarker::None },
        );
        true
    }

    /// Standard handler for node rect reports from the host layout.
    ///
    /// Creates the node if it is not tracked yet; keeps its marker otherwise.
    pub fn update_node_rect(&mut self, id: &NodeId, left: f32, top: f32, width: f32, height: f32) {
        let node = self.nodes.entry(id.clone()).or_insert_with(|| StoredNode {
            id: id.clone(),
            left,
            top,
            width,
            height,
            marker: NodeMarker::None,
        });
        node.left = left;
        node.top = top;
        node.width = width;
        node.height = height;
    }

    /// Move a node's top-left corner. Returns `false` for unknown nodes.
    pub fn move_node(&mut self, id: &NodeId, left: f32, top: f32) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.left = left;
                node.top = top;
                true
            }
            None => false,
        }
    }

    pub fn remove_node(&mut self, id: &NodeId) -> Option<StoredNode> {
        self.nodes.remove(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&StoredNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn position(&self, id: &NodeId) -> Option<Point> {
        self.nodes.get(id).map(|n| Point::new(n.left, n.top))
    }

    pub fn marker(&self, id: &NodeId) -> NodeMarker {
        self.nodes.get(id).map(|n| n.marker).unwrap_or_default()
    }

    pub fn set_marker(&mut self, id: &NodeId, marker: NodeMarker) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.marker = marker;
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// View the cache as a [`PositionProvider`] under the given view transform.
    pub fn screen_positions<'a>(&'a self, view: &ViewState) -> ScreenPositions<'a> {
        ScreenPositions {
            cache: self,
            scale: view.scale(),
            translation: view.translation(),
        }
    }
}

/// On-screen node centers, relative to the canvas origin.
///
/// A center at canvas position `c` is shown at `c * scale + translation`.
pub struct ScreenPositions<'a> {
    cache: &'a GeometryCache,
    scale: f32,
    translation: Translation,
}

impl PositionProvider for ScreenPositions<'_> {
    fn center(&self, node: &NodeId) -> Result<Point, RenderError> {
        let stored = self
            .cache
            .get(node)
            .ok_or_else(|| RenderError::UnknownNode(node.clone()))?;
        let center = stored
            .center()
            .ok_or_else(|| RenderError::InvalidGeometry { node: node.clone() })?;
        let s = effective_scale(self.scale);
        Ok(Point::new(
            center.x * s + self.translation.x,
            center.y * s + self.translation.y,
        ))
    }
}
