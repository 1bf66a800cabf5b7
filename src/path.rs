use crate::geometry::{CanvasSize, Point};

/// Shape used for connections longer than the curve threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveStyle {
    /// Cubic bezier through both control points
    #[default]
    Cubic,
    /// Quadratic bezier through the source-side control point only
    Quadratic,
}

/// Tuning for the straight-vs-curve routing decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteConfig {
    /// Endpoint distance (screen pixels) up to which a straight segment is drawn
    pub curve_threshold: f32,
    /// Fraction of the canvas extent used to offset control points
    pub control_offset_ratio: f32,
    pub curve_style: CurveStyle,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            curve_threshold: 200.0,
            control_offset_ratio: 0.25,
            curve_style: CurveStyle::Cubic,
        }
    }
}

/// Geometry of a single drawn connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    Straight {
        from: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    Quadratic {
        from: Point,
        ctrl: Point,
        to: Point,
    },
}

impl Route {
    pub fn from(&self) -> Point {
        match *self {
            Route::Straight { from, .. } | Route::Cubic { from, .. } | Route::Quadratic { from, .. } => from,
        }
    }

    pub fn to(&self) -> Point {
        match *self {
            Route::Straight { to, .. } | Route::Cubic { to, .. } | Route::Quadratic { to, .. } => to,
        }
    }

    pub fn is_curved(&self) -> bool {
        !matches!(self, Route::Straight { .. })
    }

    /// Divide every point by `scale`.
    ///
    /// The overlay surface is displayed through the same scale as the canvas,
    /// so coordinates measured on screen must be divided before drawing.
    pub fn scaled(&self, scale: f32) -> Route {
        match *self {
            Route::Straight { from, to } => Route::Straight {
                from: from.unscale(scale),
                to: to.unscale(scale),
            },
            Route::Cubic { from, ctrl1, ctrl2, to } => Route::Cubic {
                from: from.unscale(scale),
                ctrl1: ctrl1.unscale(scale),
                ctrl2: ctrl2.unscale(scale),
                to: to.unscale(scale),
            },
            Route::Quadratic { from, ctrl, to } => Route::Quadratic {
                from: from.unscale(scale),
                ctrl: ctrl.unscale(scale),
                to: to.unscale(scale),
            },
        }
    }

    /// Evaluate the route at parameter t (0.0 to 1.0)
    pub fn point_at(&self, t: f32) -> Point {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        match *self {
            Route::Straight { from, to } => Point::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ),
            Route::Quadratic { from, ctrl, to } => Point::new(
                mt * mt * from.x + 2.0 * mt * t * ctrl.x + t * t * to.x,
                mt * mt * from.y + 2.0 * mt * t * ctrl.y + t * t * to.y,
            ),
            Route::Cubic { from, ctrl1, ctrl2, to } => {
                let mt2 = mt * mt;
                let t2 = t * t;
                Point::new(
                    mt2 * mt * from.x + 3.0 * mt2 * t * ctrl1.x + 3.0 * mt * t2 * ctrl2.x + t2 * t * to.x,
                    mt2 * mt * from.y + 3.0 * mt2 * t * ctrl1.y + 3.0 * mt * t2 * ctrl2.y + t2 * t * to.y,
                )
            }
        }
    }

    /// SVG path commands for this route (e.g. "M 10 20 C 60 20 90 80 140 80")
    pub fn to_path_commands(&self) -> String {
        match *self {
            Route::Straight { from, to } => {
                format!("M {} {} L {} {}", from.x, from.y, to.x, to.y)
            }
            Route::Cubic { from, ctrl1, ctrl2, to } => format!(
                "M {} {} C {} {} {} {} {} {}",
                from.x, from.y, ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
            ),
            Route::Quadratic { from, ctrl, to } => format!(
                "M {} {} Q {} {} {} {}",
                from.x, from.y, ctrl.x, ctrl.y, to.x, to.y
            ),
        }
    }
}

/// Decide how to draw a connection between two on-screen centers.
///
/// Up to `curve_threshold` the route is a straight segment. Beyond it, control
/// points are pushed along the dominant axis (horizontal when `|dx| > |dy|`)
/// by `control_offset_ratio` of the canvas width or height, each toward the
/// opposite endpoint.
///
/// `canvas` is the on-screen canvas size, i.e. already multiplied by the
/// current scale.
pub fn route_between(from: Point, to: Point, canvas: CanvasSize, config: &RouteConfig) -> Route {
    if from.distance_to(to) <= config.curve_threshold {
        return Route::Straight { from, to };
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let (ctrl1, ctrl2) = if dx.abs() > dy.abs() {
        let offset = canvas.width * config.control_offset_ratio * direction(dx);
        (Point::new(from.x + offset, from.y), Point::new(to.x - offset, to.y))
    } else {
        let offset = canvas.height * config.control_offset_ratio * direction(dy);
        (Point::new(from.x, from.y + offset), Point::new(to.x, to.y - offset))
    };

    match config.curve_style {
        CurveStyle::Cubic => Route::Cubic { from, ctrl1, ctrl2, to },
        CurveStyle::Quadratic => Route::Quadratic { from, ctrl: ctrl1, to },
    }
}

fn direction(delta: f32) -> f32 {
    if delta < 0.0 { -1.0 } else { 1.0 }
}
