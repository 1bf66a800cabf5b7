//! The editor session: all mutable state of one editor instance.
//!
//! [`EditorSession`] ties together the node registry, the connection
//! renderer, the view transform, connect mode and drag tracking. Every
//! mutation that can change what is drawn ends with a full redraw, so the
//! surface always reflects the state right after the mutation.

use crate::config::EditorConfig;
use crate::connections::{ConnectionKey, ConnectionSet};
use crate::coords::{Translation, ViewState};
use crate::error::RenderError;
use crate::geometry::{CanvasSize, Point};
use crate::node::{NodeId, NodeIdGenerator, NodeMarker};
use crate::renderer::{ConnectionRenderer, RedrawReport};
use crate::selection::{Activation, ConnectSelection};
use crate::state::{GeometryCache, StoredNode};
use crate::surface::{DrawingSurface, ModelSurface};
use crate::tracking::DragTracker;
use slint::{Color, SharedString, VecModel};
use std::collections::HashSet;
use std::rc::Rc;

pub struct EditorSession {
    config: EditorConfig,
    nodes: GeometryCache,
    renderer: ConnectionRenderer,
    view: ViewState,
    selection: ConnectSelection,
    drag: DragTracker,
    ids: NodeIdGenerator,
    removed: HashSet<NodeId>,
    surface: Option<Box<dyn DrawingSurface>>,
    canvas_size: CanvasSize,
    last_report: Option<RedrawReport>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            nodes: GeometryCache::new(),
            renderer: ConnectionRenderer::new(config.route, config.stroke),
            view: ViewState::new(config.min_scale, config.max_scale),
            selection: ConnectSelection::new(),
            drag: DragTracker::new(),
            ids: NodeIdGenerator::new(),
            removed: HashSet::new(),
            surface: None,
            canvas_size: config.canvas_size,
            last_report: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // === Surface ===

    /// Draw onto `surface` from now on. Triggers a redraw.
    pub fn set_surface<S: DrawingSurface + 'static>(&mut self, surface: S) {
        self.surface = Some(Box::new(surface));
        self.refresh();
    }

    /// Detach the current surface; later redraws are skipped until a new one is set.
    pub fn clear_surface(&mut self) {
        self.surface = None;
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Draw into a Slint model: one row per visible connection.
    ///
    /// `constructor` receives (connection key, SVG path commands, color, line width).
    pub fn bind_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(SharedString, SharedString, Color, f32) -> P + 'static,
    {
        self.set_surface(ModelSurface::new(model, constructor));
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }

    /// The canvas (and overlay) was resized.
    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.canvas_size = CanvasSize::new(width, height);
        self.refresh();
    }

    // === Nodes ===

    pub fn nodes(&self) -> &GeometryCache {
        &self.nodes
    }

    pub fn node(&self, id: &NodeId) -> Option<&StoredNode> {
        self.nodes.get(id)
    }

    pub fn marker(&self, id: &NodeId) -> NodeMarker {
        self.nodes.marker(id)
    }

    /// Create a node with a fresh id at a canvas-space position.
    pub fn add_node_at(&mut self, left: f32, top: f32) -> NodeId {
        let id = self.ids.next_id();
        self.nodes.insert_node(id.clone(), left, top);
        log::debug!("added node {} at ({}, {})", id, left, top);
        self.refresh();
        id
    }

    /// Create a node where a pointer event (e.g. a palette drop) happened.
    ///
    /// `canvas_origin` is the canvas element's top-left corner on screen.
    pub fn add_node_at_pointer(&mut self, pointer: Point, canvas_origin: Point) -> NodeId {
        let position = self.view.screen_to_canvas(pointer, canvas_origin);
        self.add_node_at(position.x, position.y)
    }

    /// Track a node created by an external node store under its own id.
    ///
    /// Returns `false` if a node with this id is already on the canvas.
    /// An id removed earlier may be inserted again.
    pub fn insert_node(&mut self, id: NodeId, left: f32, top: f32) -> bool {
        if self.nodes.contains(&id) {
            return false;
        }
        self.removed.remove(&id);
        self.ids.reserve(&id);
        self.nodes.insert_node(id, left, top);
        self.refresh();
        true
    }

    /// The host laid out a node (or re-measured it).
    ///
    /// Reports for nodes removed from the canvas are dropped; returns `false`
    /// in that case.
    pub fn update_node_rect(
        &mut self,
        id: &NodeId,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
    ) -> bool {
        if self.removed.contains(id) {
            log::debug!("ignoring layout report for removed node {}", id);
            return false;
        }
        self.ids.reserve(id);
        self.nodes.update_node_rect(id, left, top, width, height);
        self.refresh();
        true
    }

    /// Move a node to a new canvas-space position and redraw.
    pub fn move_node(&mut self, id: &NodeId, left: f32, top: f32) -> bool {
        if !self.nodes.move_node(id, left, top) {
            return false;
        }
        self.on_node_moved(id);
        true
    }

    /// A node's position was changed by the host.
    pub fn on_node_moved(&mut self, id: &NodeId) {
        log::trace!("node {} moved", id);
        self.refresh();
    }

    /// A node was clicked. Applies the connect-mode state machine.
    pub fn on_node_activated(&mut self, id: &NodeId) -> Activation {
        if !self.nodes.contains(id) {
            log::warn!("activation of unknown node {}", id);
            return Activation::Ignored;
        }
        let activation = self.selection.activate(id);
        match &activation {
            Activation::Ignored => {}
            Activation::SourceSelected(source) => {
                log::debug!("selected source node {}", source);
                self.nodes.set_marker(source, NodeMarker::SelectedAsSource);
            }
            Activation::Cancelled(source) => {
                log::debug!("deselected source node {}", source);
                self.nodes.set_marker(source, NodeMarker::None);
            }
            Activation::Completed { source, target } => {
                self.nodes.set_marker(target, NodeMarker::None);
                self.connect(source, target);
            }
        }
        activation
    }

    /// A node is about to be removed from the canvas.
    ///
    /// Its connections go away in the same step, before the redraw.
    pub fn on_node_removed(&mut self, id: &NodeId) -> bool {
        self.renderer.disconnect(id);
        self.selection.forget(id);
        self.drag.forget(id);
        let existed = self.nodes.remove_node(id).is_some();
        if existed {
            self.removed.insert(id.clone());
            log::debug!("removed node {}", id);
        }
        self.refresh();
        existed
    }

    // === Connections ===

    pub fn connections(&self) -> &ConnectionSet {
        self.renderer.connections()
    }

    /// Link two live nodes and redraw.
    ///
    /// Self links and links to nodes that are not on the canvas are ignored
    /// and change nothing. Otherwise `source` stops being the pending
    /// connect-mode source, if it was one.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Option<ConnectionKey> {
        if source == target {
            return None;
        }
        if !self.nodes.contains(source) || !self.nodes.contains(target) {
            log::warn!("refusing to connect {} and {}: node not on canvas", source, target);
            return None;
        }
        self.selection.forget(source);
        self.nodes.set_marker(source, NodeMarker::None);
        let key = self.renderer.connect(source, target);
        self.refresh();
        key
    }

    /// Remove every connection touching `node` and redraw.
    pub fn disconnect(&mut self, node: &NodeId) -> Vec<ConnectionKey> {
        let removed = self.renderer.disconnect(node);
        self.refresh();
        removed
    }

    // === Connect mode ===

    pub fn is_connect_mode(&self) -> bool {
        self.selection.is_active()
    }

    pub fn connect_source(&self) -> Option<&NodeId> {
        self.selection.source()
    }

    pub fn set_connect_mode(&mut self, active: bool) {
        if let Some(source) = self.selection.set_active(active) {
            self.nodes.set_marker(&source, NodeMarker::None);
        }
        log::debug!("connect mode {}", if active { "on" } else { "off" });
    }

    /// Flip connect mode; returns the new state.
    pub fn toggle_connect_mode(&mut self) -> bool {
        if let Some(source) = self.selection.toggle() {
            self.nodes.set_marker(&source, NodeMarker::None);
        }
        let active = self.selection.is_active();
        log::debug!("connect mode {}", if active { "on" } else { "off" });
        active
    }

    // === View ===

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn scale(&self) -> f32 {
        self.view.scale()
    }

    /// Set the scale (clamped to the configured bounds) and redraw.
    pub fn set_scale(&mut self, factor: f32) -> f32 {
        let scale = self.view.set_scale(factor);
        self.refresh();
        scale
    }

    /// Set the scale within explicit bounds, which replace the configured ones.
    pub fn set_scale_clamped(&mut self, factor: f32, min_scale: f32, max_scale: f32) -> f32 {
        let scale = self.view.set_scale_clamped(factor, min_scale, max_scale);
        self.refresh();
        scale
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set_scale(self.view.scale() * self.config.zoom_step)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_scale(self.view.scale() / self.config.zoom_step)
    }

    /// The canvas was panned.
    pub fn set_translation(&mut self, translation: Translation) {
        self.view.set_translation(translation);
        self.refresh();
    }

    /// Clear the canvas: nodes, connections, pending source, drag, scale and pan.
    ///
    /// Connect mode itself is kept.
    pub fn reset(&mut self) {
        self.renderer.clear();
        self.removed.extend(self.nodes.nodes.keys().cloned());
        self.nodes.clear();
        if let Some(source) = self.selection.source().cloned() {
            self.selection.forget(&source);
        }
        self.drag.end();
        self.view.reset();
        log::debug!("editor reset");
        self.refresh();
    }

    // === Dragging ===

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn dragged_node(&self) -> Option<&NodeId> {
        self.drag.dragged_node()
    }

    /// Pointer pressed on a node. Replaces any drag in progress.
    pub fn begin_drag(&mut self, id: &NodeId, pointer: Point) -> bool {
        let Some(position) = self.nodes.position(id) else {
            return false;
        };
        self.drag.begin(id.clone(), pointer, position);
        self.refresh();
        true
    }

    /// Pointer moved; moves the dragged node, if any.
    pub fn drag_to(&mut self, pointer: Point) -> bool {
        match self.drag.update(pointer, self.view.scale()) {
            Some((id, position)) => self.move_node(&id, position.x, position.y),
            None => false,
        }
    }

    /// Pointer released.
    pub fn end_drag(&mut self) -> Option<NodeId> {
        let node = self.drag.end();
        self.refresh();
        node
    }

    // === Rendering ===

    /// Fully redraw every connection on the bound surface.
    pub fn redraw(&mut self) -> Result<RedrawReport, RenderError> {
        let Some(surface) = self.surface.as_mut() else {
            self.last_report = None;
            return Err(RenderError::MissingSurface);
        };
        let positions = self.nodes.screen_positions(&self.view);
        let result = self
            .renderer
            .redraw(&positions, self.view.scale(), self.canvas_size, &mut **surface);
        self.last_report = result.as_ref().ok().cloned();
        result
    }

    /// Report of the last successful redraw, `None` if it was skipped.
    pub fn last_report(&self) -> Option<&RedrawReport> {
        self.last_report.as_ref()
    }

    fn refresh(&mut self) {
        if let Err(err) = self.redraw() {
            log::error!("redraw skipped: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use std::cell::RefCell;

    fn session_with_surface() -> (EditorSession, Rc<RefCell<RecordingSurface>>) {
        let surface = RecordingSurface::shared();
        let mut session = EditorSession::default();
        session.set_surface(surface.clone());
        (session, surface)
    }

    fn laid_out_node(session: &mut EditorSession, left: f32, top: f32) -> NodeId {
        let id = session.add_node_at(left, top);
        session.update_node_rect(&id, left, top, 100.0, 50.0);
        id
    }

    #[test]
    fn test_redraw_without_surface_fails_softly() {
        let mut session = EditorSession::default();
        let a = session.add_node_at(0.0, 0.0);
        let b = session.add_node_at(10.0, 0.0);
        session.connect(&a, &b);

        assert_eq!(session.redraw(), Err(RenderError::MissingSurface));
        assert!(session.last_report().is_none());
        assert_eq!(session.connections().len(), 1);
    }

    #[test]
    fn test_connect_requires_live_nodes() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);

        assert!(session.connect(&a, &NodeId::from("ghost")).is_none());
        assert!(session.connections().is_empty());
    }

    #[test]
    fn test_connect_clears_source_marker() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        let b = laid_out_node(&mut session, 300.0, 0.0);
        session.set_connect_mode(true);
        session.on_node_activated(&a);
        assert_eq!(session.marker(&a), NodeMarker::SelectedAsSource);

        session.connect(&a, &b);
        assert_eq!(session.marker(&a), NodeMarker::None);
        assert!(session.connect_source().is_none());
    }

    #[test]
    fn test_direct_connect_ends_pending_selection() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        let b = laid_out_node(&mut session, 300.0, 0.0);
        let c = laid_out_node(&mut session, 0.0, 300.0);
        session.set_connect_mode(true);
        session.on_node_activated(&a);

        session.connect(&a, &b);

        // The next click starts a new selection instead of linking a to c
        assert_eq!(session.on_node_activated(&c), Activation::SourceSelected(c.clone()));
        assert!(!session.connections().contains(&a, &c));
        assert_eq!(session.connections().len(), 1);
    }

    #[test]
    fn test_self_connect_keeps_pending_source() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        session.set_connect_mode(true);
        session.on_node_activated(&a);

        assert!(session.connect(&a, &a).is_none());
        assert_eq!(session.marker(&a), NodeMarker::SelectedAsSource);
        assert_eq!(session.connect_source(), Some(&a));
    }

    #[test]
    fn test_rejected_connect_keeps_pending_source() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        session.set_connect_mode(true);
        session.on_node_activated(&a);

        assert!(session.connect(&a, &NodeId::from("ghost")).is_none());
        assert_eq!(session.marker(&a), NodeMarker::SelectedAsSource);
        assert_eq!(session.connect_source(), Some(&a));
    }

    #[test]
    fn test_late_layout_report_does_not_revive_removed_node() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        session.on_node_removed(&a);

        assert!(!session.update_node_rect(&a, 0.0, 0.0, 100.0, 50.0));
        assert!(!session.nodes().contains(&a));

        // Explicit re-insertion is allowed
        assert!(session.insert_node(a.clone(), 10.0, 10.0));
        assert!(session.update_node_rect(&a, 10.0, 10.0, 100.0, 50.0));
    }

    #[test]
    fn test_late_layout_report_after_reset_is_ignored() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        session.reset();

        assert!(!session.update_node_rect(&a, 0.0, 0.0, 100.0, 50.0));
        assert!(session.nodes().is_empty());
    }

    #[test]
    fn test_toggle_connect_mode_releases_source() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        assert!(session.toggle_connect_mode());
        session.on_node_activated(&a);

        assert!(!session.toggle_connect_mode());
        assert_eq!(session.marker(&a), NodeMarker::None);
        assert!(session.connect_source().is_none());
    }

    #[test]
    fn test_removing_source_node_resets_selection() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        session.set_connect_mode(true);
        session.on_node_activated(&a);

        session.on_node_removed(&a);
        assert!(session.connect_source().is_none());
    }

    #[test]
    fn test_removing_dragged_node_ends_drag() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        session.begin_drag(&a, Point::new(10.0, 10.0));

        session.on_node_removed(&a);
        assert!(!session.is_dragging());
        assert!(!session.drag_to(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_insert_node_rejects_duplicate_ids() {
        let (mut session, _surface) = session_with_surface();
        assert!(session.insert_node(NodeId::from("ext-1"), 0.0, 0.0));
        assert!(!session.insert_node(NodeId::from("ext-1"), 5.0, 5.0));
    }

    #[test]
    fn test_activation_of_unknown_node_is_ignored() {
        let (mut session, _surface) = session_with_surface();
        session.set_connect_mode(true);
        assert_eq!(session.on_node_activated(&NodeId::from("ghost")), Activation::Ignored);
        assert!(session.connect_source().is_none());
    }

    #[test]
    fn test_reset_keeps_connect_mode() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        session.set_connect_mode(true);
        session.on_node_activated(&a);

        session.reset();
        assert!(session.is_connect_mode());
        assert!(session.connect_source().is_none());
        assert!(session.nodes().is_empty());
    }

    #[test]
    fn test_last_report_tracks_skipped_connections() {
        let (mut session, _surface) = session_with_surface();
        let a = laid_out_node(&mut session, 0.0, 0.0);
        let b = session.add_node_at(400.0, 0.0); // not laid out yet
        session.connect(&a, &b);

        let report = session.last_report().expect("redraw ran");
        assert_eq!(report.drawn, 0);
        assert_eq!(report.skipped.len(), 1);
    }
}
