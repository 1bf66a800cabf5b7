//! Test harness wiring a controller to a recording surface.
//!
//! Provides helpers for simulating the host: laying out nodes, clicking them,
//! and dragging them with the pointer.

#![allow(dead_code)]

use node_link_canvas::{
    DrawCommand, EditorConfig, EditorController, NodeId, Point, RecordingSurface, Route,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Width of nodes laid out by the harness.
pub const NODE_WIDTH: f32 = 100.0;
/// Height of nodes laid out by the harness.
pub const NODE_HEIGHT: f32 = 50.0;

pub struct EditorHarness {
    pub ctrl: EditorController,
    pub surface: Rc<RefCell<RecordingSurface>>,
}

impl EditorHarness {
    /// Create a harness with the default 800x600 canvas.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let ctrl = EditorController::with_config(config);
        let surface = RecordingSurface::shared();
        ctrl.set_surface(surface.clone());
        Self { ctrl, surface }
    }

    /// Create a node at `(left, top)` and report a 100x50 layout for it.
    pub fn add_node(&self, left: f32, top: f32) -> NodeId {
        let id = self.ctrl.add_node_at(left, top);
        self.ctrl.update_node_rect(&id, left, top, NODE_WIDTH, NODE_HEIGHT);
        id
    }

    /// Link two nodes through connect mode, the way a user would.
    pub fn connect_by_clicks(&self, source: &NodeId, target: &NodeId) {
        let was_active = self.ctrl.is_connect_mode();
        self.ctrl.set_connect_mode(true);
        self.ctrl.on_node_activated(source);
        self.ctrl.on_node_activated(target);
        self.ctrl.set_connect_mode(was_active);
    }

    /// Press on a node, move the pointer by `(dx, dy)` in screen space, release.
    pub fn drag_node(&self, id: &NodeId, dx: f32, dy: f32) {
        let start = Point::new(400.0, 300.0);
        self.ctrl.begin_drag(id, start);
        self.ctrl.drag_to(Point::new(start.x + dx, start.y + dy));
        self.ctrl.end_drag();
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.surface.borrow().commands().to_vec()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.commands().into_iter().map(|c| c.route).collect()
    }

    /// The only route drawn in the last frame.
    pub fn single_route(&self) -> Route {
        let routes = self.routes();
        assert_eq!(routes.len(), 1, "expected exactly one drawn connection");
        routes[0]
    }

    pub fn frames(&self) -> usize {
        self.surface.borrow().frames()
    }

    pub fn position(&self, id: &NodeId) -> Option<Point> {
        self.ctrl.session().borrow().nodes().position(id)
    }
}
