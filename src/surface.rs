//! Drawing surfaces the renderer paints connections onto.
//!
//! [`ModelSurface`] pushes rendered paths into a Slint `VecModel` so a `Path`
//! element per row can draw them. [`RecordingSurface`] keeps the last frame
//! in memory, which is what headless hosts and tests use.
//!
//! # Example
//!
//! ```ignore
//! use node_link_canvas::{EditorController, ModelSurface};
//!
//! let ctrl = EditorController::new();
//! let model = Rc::new(VecModel::<LinkPath>::default());
//! ctrl.bind_model(model.clone(), |key, commands, color, width| LinkPath {
//!     key,
//!     commands,
//!     color,
//!     width,
//! });
//! window.set_link_paths(ModelRc::from(model));
//! ```

use crate::connections::ConnectionKey;
use crate::error::RenderError;
use crate::geometry::CanvasSize;
use crate::path::Route;
use slint::{Color, Model, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Stroke applied to every connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub line_width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        // rgba(255, 255, 255, 0.7)
        Self {
            color: Color::from_argb_u8(178, 255, 255, 255),
            line_width: 2.0,
        }
    }
}

/// Something connections can be stroked onto.
///
/// A redraw calls [`begin_frame`](Self::begin_frame) once, which must clear
/// everything drawn before, then [`stroke`](Self::stroke) per visible
/// connection, then [`end_frame`](Self::end_frame).
pub trait DrawingSurface {
    /// Acquire and clear the surface. `size` is the unscaled canvas size.
    fn begin_frame(&mut self, size: CanvasSize) -> Result<(), RenderError>;

    fn stroke(&mut self, key: &ConnectionKey, route: &Route, style: &StrokeStyle);

    fn end_frame(&mut self) {}
}

/// A single stroke recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub key: ConnectionKey,
    pub route: Route,
    pub style: StrokeStyle,
}

/// In-memory surface holding the strokes of the most recent frame.
#[derive(Debug)]
pub struct RecordingSurface {
    available: bool,
    size: Option<CanvasSize>,
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self { available: true, size: None, commands: Vec::new(), frames: 0 }
    }

    /// A surface whose context can never be acquired.
    pub fn unavailable() -> Self {
        Self { available: false, ..Self::new() }
    }

    /// Wrap in `Rc<RefCell<_>>` so it can be handed to a session and still inspected.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Strokes of the last completed or in-progress frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames begun successfully.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn size(&self) -> Option<CanvasSize> {
        self.size
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_frame(&mut self, size: CanvasSize) -> Result<(), RenderError> {
        if !self.available {
            return Err(RenderError::MissingSurface);
        }
        self.commands.clear();
        self.size = Some(size);
        self.frames += 1;
        Ok(())
    }

    fn stroke(&mut self, key: &ConnectionKey, route: &Route, style: &StrokeStyle) {
        self.commands.push(DrawCommand { key: key.clone(), route: *route, style: *style });
    }
}

impl<S: DrawingSurface> DrawingSurface for Rc<RefCell<S>> {
    fn begin_frame(&mut self, size: CanvasSize) -> Result<(), RenderError> {
        self.borrow_mut().begin_frame(size)
    }

    fn stroke(&mut self, key: &ConnectionKey, route: &Route, style: &StrokeStyle) {
        self.borrow_mut().stroke(key, route, style)
    }

    fn end_frame(&mut self) {
        self.borrow_mut().end_frame()
    }
}

/// Surface that syncs each finished frame into a Slint `VecModel`.
///
/// `constructor` builds a row from (connection key, SVG path commands, color,
/// line width). Rows are updated in place; excess rows are removed.
pub struct ModelSurface<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
    pending: Vec<P>,
}

impl<P, F> ModelSurface<P, F>
where
    P: Clone + 'static,
    F: Fn(SharedString, SharedString, Color, f32) -> P,
{
    pub fn new(model: Rc<VecModel<P>>, constructor: F) -> Self {
        Self { model, constructor, pending: Vec::new() }
    }

    pub fn model(&self) -> Rc<VecModel<P>> {
        self.model.clone()
    }
}

impl<P, F> DrawingSurface for ModelSurface<P, F>
where
    P: Clone + 'static,
    F: Fn(SharedString, SharedString, Color, f32) -> P,
{
    fn begin_frame(&mut self, _size: CanvasSize) -> Result<(), RenderError> {
        self.pending.clear();
        Ok(())
    }

    fn stroke(&mut self, key: &ConnectionKey, route: &Route, style: &StrokeStyle) {
        let item = (self.constructor)(
            SharedString::from(key.to_string()),
            SharedString::from(route.to_path_commands()),
            style.color,
            style.line_width,
        );
        self.pending.push(item);
    }

    fn end_frame(&mut self) {
        let drawn = self.pending.len();
        // Update existing rows or add new ones
        for (i, item) in self.pending.drain(..).enumerate() {
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        // Remove excess rows
        while self.model.row_count() > drawn {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::node::NodeId;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        key: SharedString,
        commands: SharedString,
        width: f32,
    }

    fn key(a: &str, b: &str) -> ConnectionKey {
        ConnectionKey::new(&NodeId::from(a), &NodeId::from(b))
    }

    fn straight(x: f32) -> Route {
        Route::Straight { from: Point::new(0.0, 0.0), to: Point::new(x, 0.0) }
    }

    fn model_surface() -> ModelSurface<Row, impl Fn(SharedString, SharedString, Color, f32) -> Row> {
        let model = Rc::new(VecModel::<Row>::default());
        ModelSurface::new(model, |key, commands, _color, width| Row { key, commands, width })
    }

    // ========================================================================
    // StrokeStyle
    // ========================================================================

    #[test]
    fn test_default_stroke_is_translucent_white() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, Color::from_argb_u8(178, 255, 255, 255));
        assert_eq!(style.line_width, 2.0);
    }

    // ========================================================================
    // RecordingSurface
    // ========================================================================

    #[test]
    fn test_recording_surface_clears_on_begin() {
        let mut surface = RecordingSurface::new();
        let style = StrokeStyle::default();

        surface.begin_frame(CanvasSize::default()).expect("surface available");
        surface.stroke(&key("a", "b"), &straight(10.0), &style);
        surface.stroke(&key("a", "c"), &straight(20.0), &style);
        assert_eq!(surface.commands().len(), 2);

        surface.begin_frame(CanvasSize::default()).expect("surface available");
        assert!(surface.commands().is_empty());
        assert_eq!(surface.frames(), 2);
    }

    #[test]
    fn test_unavailable_surface_refuses_frames() {
        let mut surface = RecordingSurface::unavailable();
        assert_eq!(
            surface.begin_frame(CanvasSize::default()),
            Err(RenderError::MissingSurface)
        );
        assert_eq!(surface.frames(), 0);

        surface.set_available(true);
        assert!(surface.begin_frame(CanvasSize::new(10.0, 10.0)).is_ok());
        assert_eq!(surface.size(), Some(CanvasSize::new(10.0, 10.0)));
    }

    #[test]
    fn test_shared_surface_forwards() {
        let shared = RecordingSurface::shared();
        let mut handle = shared.clone();
        handle.begin_frame(CanvasSize::default()).expect("surface available");
        handle.stroke(&key("a", "b"), &straight(5.0), &StrokeStyle::default());
        handle.end_frame();

        assert_eq!(shared.borrow().commands().len(), 1);
        assert_eq!(shared.borrow().commands()[0].key, key("a", "b"));
    }

    // ========================================================================
    // ModelSurface
    // ========================================================================

    #[test]
    fn test_model_surface_syncs_on_end_frame() {
        let mut surface = model_surface();
        let model = surface.model();
        let style = StrokeStyle::default();

        surface.begin_frame(CanvasSize::default()).expect("always available");
        surface.stroke(&key("a", "b"), &straight(10.0), &style);
        assert_eq!(model.row_count(), 0, "Rows appear only when the frame ends");
        surface.end_frame();

        assert_eq!(model.row_count(), 1);
        let row = model.row_data(0).expect("Row should exist");
        assert_eq!(row.key.as_str(), "a-b");
        assert_eq!(row.commands.as_str(), "M 0 0 L 10 0");
        assert_eq!(row.width, 2.0);
    }

    #[test]
    fn test_model_surface_updates_and_shrinks() {
        let mut surface = model_surface();
        let model = surface.model();
        let style = StrokeStyle::default();

        surface.begin_frame(CanvasSize::default()).expect("always available");
        surface.stroke(&key("a", "b"), &straight(10.0), &style);
        surface.stroke(&key("a", "c"), &straight(20.0), &style);
        surface.end_frame();
        assert_eq!(model.row_count(), 2);

        surface.begin_frame(CanvasSize::default()).expect("always available");
        surface.stroke(&key("a", "c"), &straight(30.0), &style);
        surface.end_frame();

        assert_eq!(model.row_count(), 1);
        let row = model.row_data(0).expect("Row should exist");
        assert_eq!(row.key.as_str(), "a-c");
        assert_eq!(row.commands.as_str(), "M 0 0 L 30 0");
    }

    #[test]
    fn test_model_surface_empty_frame_clears_rows() {
        let mut surface = model_surface();
        let model = surface.model();

        surface.begin_frame(CanvasSize::default()).expect("always available");
        surface.stroke(&key("a", "b"), &straight(10.0), &StrokeStyle::default());
        surface.end_frame();

        surface.begin_frame(CanvasSize::default()).expect("always available");
        surface.end_frame();
        assert_eq!(model.row_count(), 0);
    }
}
