//! High-level controller for node-link editor applications.
//!
//! The [`EditorController`] wraps an [`EditorSession`] so it can be shared by
//! the many UI callbacks of one editor window.
//!
//! # Example
//!
//! ```ignore
//! use node_link_canvas::EditorController;
//! use std::rc::Rc;
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = EditorController::new();
//!
//!     // Connections are drawn into a model the overlay iterates over
//!     let paths = Rc::new(slint::VecModel::<ConnectionPath>::default());
//!     window.set_connection_paths(paths.clone().into());
//!     ctrl.bind_model(paths, |key, commands, color, width| ConnectionPath {
//!         key,
//!         commands,
//!         color: color.into(),
//!         width,
//!     });
//!
//!     window.on_node_rect_changed(ctrl.node_rect_callback());
//!     window.on_node_clicked(ctrl.node_activated_callback());
//!     window.on_node_deleted(ctrl.node_removed_callback());
//!     window.on_node_pressed(ctrl.pointer_down_callback());
//!     window.on_pointer_moved(ctrl.pointer_move_callback());
//!     window.on_pointer_released(ctrl.pointer_up_callback());
//!     window.on_scale_changed(ctrl.scale_changed_callback());
//!     window.on_connect_mode_toggled(ctrl.connect_mode_toggled_callback());
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::config::EditorConfig;
use crate::connections::ConnectionKey;
use crate::coords::Translation;
use crate::error::RenderError;
use crate::geometry::Point;
use crate::node::{NodeId, NodeMarker};
use crate::renderer::RedrawReport;
use crate::selection::Activation;
use crate::session::EditorSession;
use crate::surface::DrawingSurface;
use slint::{Color, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Controller that owns the editor session and provides callback implementations.
///
/// This provides a high-level API that handles:
/// - Node geometry in canvas space
/// - Connection bookkeeping and redraws
/// - Connect mode
/// - Scale and pan
/// - Drag tracking
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct EditorController {
    session: Rc<RefCell<EditorSession>>,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorController {
    /// Create a new controller with default settings.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self { session: Rc::new(RefCell::new(EditorSession::new(config))) }
    }

    /// Get access to the underlying session.
    pub fn session(&self) -> Rc<RefCell<EditorSession>> {
        self.session.clone()
    }

    pub fn set_surface<S: DrawingSurface + 'static>(&self, surface: S) {
        self.session.borrow_mut().set_surface(surface);
    }

    /// Draw connections into a Slint model, one row per connection.
    pub fn bind_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(SharedString, SharedString, Color, f32) -> P + 'static,
    {
        self.session.borrow_mut().bind_model(model, constructor);
    }

    /// Get the current scale.
    pub fn scale(&self) -> f32 {
        self.session.borrow().scale()
    }

    pub fn is_connect_mode(&self) -> bool {
        self.session.borrow().is_connect_mode()
    }

    pub fn connection_count(&self) -> usize {
        self.session.borrow().connections().len()
    }

    pub fn is_connected(&self, a: &NodeId, b: &NodeId) -> bool {
        self.session.borrow().connections().contains(a, b)
    }

    pub fn marker(&self, id: &NodeId) -> NodeMarker {
        self.session.borrow().marker(id)
    }

    // === Callback factories ===

    /// Returns a callback for node-rect-changed: `(id, left, top, width, height)`.
    pub fn node_rect_callback(&self) -> impl Fn(SharedString, f32, f32, f32, f32) {
        let ctrl = self.clone();
        move |id, left, top, width, height| {
            ctrl.update_node_rect(&NodeId::from(id), left, top, width, height);
        }
    }

    /// Returns a callback for node-moved: `(id, left, top)` in canvas space.
    pub fn node_moved_callback(&self) -> impl Fn(SharedString, f32, f32) {
        let ctrl = self.clone();
        move |id, left, top| {
            ctrl.move_node(&NodeId::from(id), left, top);
        }
    }

    /// Returns a callback for node-clicked.
    pub fn node_activated_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |id| {
            ctrl.on_node_activated(&NodeId::from(id));
        }
    }

    /// Returns a callback for node-deleted.
    pub fn node_removed_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |id| {
            ctrl.on_node_removed(&NodeId::from(id));
        }
    }

    /// Returns a callback for scale-changed. Yields the scale actually applied.
    pub fn scale_changed_callback(&self) -> impl Fn(f32) -> f32 {
        let ctrl = self.clone();
        move |factor| ctrl.set_scale(factor)
    }

    /// Returns a callback for a pointer press on a node: `(id, screen_x, screen_y)`.
    pub fn pointer_down_callback(&self) -> impl Fn(SharedString, f32, f32) {
        let ctrl = self.clone();
        move |id, x, y| {
            ctrl.begin_drag(&NodeId::from(id), Point::new(x, y));
        }
    }

    /// Returns a callback for pointer moves on the canvas: `(screen_x, screen_y)`.
    pub fn pointer_move_callback(&self) -> impl Fn(f32, f32) {
        let ctrl = self.clone();
        move |x, y| {
            ctrl.drag_to(Point::new(x, y));
        }
    }

    /// Returns a callback for pointer release.
    pub fn pointer_up_callback(&self) -> impl Fn() {
        let ctrl = self.clone();
        move || {
            ctrl.end_drag();
        }
    }

    /// Returns a callback for the connect-mode button. Yields the new mode.
    pub fn connect_mode_toggled_callback(&self) -> impl Fn() -> bool {
        let ctrl = self.clone();
        move || ctrl.toggle_connect_mode()
    }

    // === Direct handlers ===

    pub fn add_node_at(&self, left: f32, top: f32) -> NodeId {
        self.session.borrow_mut().add_node_at(left, top)
    }

    /// Create a node at a screen-space drop point.
    pub fn add_node_at_pointer(&self, pointer: Point, canvas_origin: Point) -> NodeId {
        self.session.borrow_mut().add_node_at_pointer(pointer, canvas_origin)
    }

    pub fn insert_node(&self, id: NodeId, left: f32, top: f32) -> bool {
        self.session.borrow_mut().insert_node(id, left, top)
    }

    /// Handle a layout report for a node (canvas space).
    ///
    /// Returns `false` if the node was removed and the report was dropped.
    pub fn update_node_rect(&self, id: &NodeId, left: f32, top: f32, width: f32, height: f32) -> bool {
        self.session.borrow_mut().update_node_rect(id, left, top, width, height)
    }

    pub fn move_node(&self, id: &NodeId, left: f32, top: f32) -> bool {
        self.session.borrow_mut().move_node(id, left, top)
    }

    pub fn on_node_moved(&self, id: &NodeId) {
        self.session.borrow_mut().on_node_moved(id);
    }

    pub fn on_node_activated(&self, id: &NodeId) -> Activation {
        self.session.borrow_mut().on_node_activated(id)
    }

    pub fn on_node_removed(&self, id: &NodeId) -> bool {
        self.session.borrow_mut().on_node_removed(id)
    }

    pub fn connect(&self, source: &NodeId, target: &NodeId) -> Option<ConnectionKey> {
        self.session.borrow_mut().connect(source, target)
    }

    pub fn disconnect(&self, node: &NodeId) -> Vec<ConnectionKey> {
        self.session.borrow_mut().disconnect(node)
    }

    pub fn set_connect_mode(&self, active: bool) {
        self.session.borrow_mut().set_connect_mode(active);
    }

    pub fn toggle_connect_mode(&self) -> bool {
        self.session.borrow_mut().toggle_connect_mode()
    }

    /// Set the scale; returns the clamped value.
    pub fn set_scale(&self, factor: f32) -> f32 {
        self.session.borrow_mut().set_scale(factor)
    }

    pub fn set_scale_clamped(&self, factor: f32, min_scale: f32, max_scale: f32) -> f32 {
        self.session.borrow_mut().set_scale_clamped(factor, min_scale, max_scale)
    }

    pub fn zoom_in(&self) -> f32 {
        self.session.borrow_mut().zoom_in()
    }

    pub fn zoom_out(&self) -> f32 {
        self.session.borrow_mut().zoom_out()
    }

    pub fn set_translation(&self, translation: Translation) {
        self.session.borrow_mut().set_translation(translation);
    }

    /// Pan from a CSS `transform` value such as `matrix(1, 0, 0, 1, 40, 25)`.
    pub fn set_css_transform(&self, value: &str) {
        self.set_translation(Translation::from_css_transform(value));
    }

    pub fn set_canvas_size(&self, width: f32, height: f32) {
        self.session.borrow_mut().set_canvas_size(width, height);
    }

    pub fn reset(&self) {
        self.session.borrow_mut().reset();
    }

    pub fn begin_drag(&self, id: &NodeId, pointer: Point) -> bool {
        self.session.borrow_mut().begin_drag(id, pointer)
    }

    pub fn drag_to(&self, pointer: Point) -> bool {
        self.session.borrow_mut().drag_to(pointer)
    }

    pub fn end_drag(&self) -> Option<NodeId> {
        self.session.borrow_mut().end_drag()
    }

    /// Get the ID of the node currently being dragged.
    pub fn dragged_node(&self) -> Option<NodeId> {
        self.session.borrow().dragged_node().cloned()
    }

    pub fn redraw(&self) -> Result<RedrawReport, RenderError> {
        self.session.borrow_mut().redraw()
    }
}
