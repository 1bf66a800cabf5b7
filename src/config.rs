use crate::geometry::CanvasSize;
use crate::path::RouteConfig;
use crate::surface::StrokeStyle;

/// Settings for an [`EditorSession`](crate::EditorSession).
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub route: RouteConfig,
    pub stroke: StrokeStyle,
    /// Lower bound of the view scale (default: 0.1)
    pub min_scale: f32,
    /// Upper bound of the view scale (default: 10.0)
    pub max_scale: f32,
    /// Factor applied by zoom in / zoom out (default: 1.1)
    pub zoom_step: f32,
    /// Unscaled size of the canvas and its overlay (default: 800x600)
    pub canvas_size: CanvasSize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            route: RouteConfig::default(),
            stroke: StrokeStyle::default(),
            min_scale: 0.1,
            max_scale: 10.0,
            zoom_step: 1.1,
            canvas_size: CanvasSize::default(),
        }
    }
}

impl EditorConfig {
    pub fn with_route(mut self, route: RouteConfig) -> Self {
        self.route = route;
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_scale_bounds(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    pub fn with_zoom_step(mut self, zoom_step: f32) -> Self {
        self.zoom_step = zoom_step;
        self
    }

    pub fn with_canvas_size(mut self, width: f32, height: f32) -> Self {
        self.canvas_size = CanvasSize::new(width, height);
        self
    }
}
