//! Coordinate mapping between screen space and canvas space.
//!
//! The canvas content is displayed through a scale and a translation. Pointer
//! events arrive in screen space; node positions live in the untransformed
//! canvas space. [`ViewState`] owns the scale and translation and performs the
//! conversion both ways.

use crate::geometry::Point;

/// Translation component of the canvas transform, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation {
    pub x: f32,
    pub y: f32,
}

impl Translation {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Extract the translation from a computed CSS `transform` value.
    ///
    /// Reads the `m41`/`m42` entries of the matrix: the last two arguments of
    /// `matrix(a, b, c, d, e, f)` or the 13th and 14th of `matrix3d(...)`.
    /// `none`, an empty string or anything unparsable yields no translation.
    pub fn from_css_transform(value: &str) -> Translation {
        let value = value.trim();
        if value.is_empty() || value == "none" {
            return Translation::default();
        }

        let parsed = if let Some(args) = css_function_args(value, "matrix3d") {
            parse_numbers(args).filter(|v| v.len() == 16).map(|v| (v[12], v[13]))
        } else if let Some(args) = css_function_args(value, "matrix") {
            parse_numbers(args).filter(|v| v.len() == 6).map(|v| (v[4], v[5]))
        } else {
            None
        };

        match parsed {
            Some((x, y)) if x.is_finite() && y.is_finite() => Translation::new(x, y),
            _ => {
                log::debug!("ignoring unparsable canvas transform {:?}", value);
                Translation::default()
            }
        }
    }
}

fn css_function_args<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_numbers(args: &str) -> Option<Vec<f32>> {
    args.split(',')
        .map(|arg| arg.trim().parse::<f32>().ok())
        .collect()
}

/// Convert a screen-space point into canvas space.
///
/// `origin` is the top-left corner of the canvas element on screen.
/// A non-positive or non-finite `scale` is treated as 1.
pub fn screen_to_canvas(screen: Point, origin: Point, translate: Translation, scale: f32) -> Point {
    let s = effective_scale(scale);
    Point::new(
        (screen.x - origin.x - translate.x) / s,
        (screen.y - origin.y - translate.y) / s,
    )
}

/// Inverse of [`screen_to_canvas`].
pub fn canvas_to_screen(canvas: Point, origin: Point, translate: Translation, scale: f32) -> Point {
    let s = effective_scale(scale);
    Point::new(
        canvas.x * s + translate.x + origin.x,
        canvas.y * s + translate.y + origin.y,
    )
}

pub(crate) fn effective_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
}

/// Scale and pan of the editor view.
///
/// The scale is always kept within `[min_scale, max_scale]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    scale: f32,
    min_scale: f32,
    max_scale: f32,
    translation: Translation,
}

const DEFAULT_MIN_SCALE: f32 = 0.1;
const DEFAULT_MAX_SCALE: f32 = 10.0;

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
    }
}

impl ViewState {
    /// Create a view at scale 1 (or the nearest bound).
    ///
    /// Invalid bounds fall back to `[0.1, 10]`.
    pub fn new(min_scale: f32, max_scale: f32) -> Self {
        let mut view = Self {
            scale: 1.0,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            translation: Translation::default(),
        };
        view.set_scale_bounds(min_scale, max_scale);
        view.scale = view.clamp(1.0);
        view
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn scale_bounds(&self) -> (f32, f32) {
        (self.min_scale, self.max_scale)
    }

    pub fn translation(&self) -> Translation {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Translation) {
        self.translation = translation;
    }

    /// Update the allowed scale range and re-clamp the current scale.
    ///
    /// Bounds given in the wrong order are swapped; non-positive or
    /// non-finite bounds are ignored.
    pub fn set_scale_bounds(&mut self, min_scale: f32, max_scale: f32) {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(min_scale) || !valid(max_scale) {
            log::warn!("ignoring invalid scale bounds [{}, {}]", min_scale, max_scale);
            return;
        }
        self.min_scale = min_scale.min(max_scale);
        self.max_scale = min_scale.max(max_scale);
        self.scale = self.clamp(self.scale);
    }

    /// Set the scale factor, clamped to the configured bounds.
    ///
    /// Returns the scale actually stored. Non-positive or non-finite factors
    /// leave the scale unchanged.
    pub fn set_scale(&mut self, factor: f32) -> f32 {
        if !(factor.is_finite() && factor > 0.0) {
            log::warn!("ignoring invalid scale factor {}", factor);
            return self.scale;
        }
        self.scale = self.clamp(factor);
        self.scale
    }

    /// Replace the bounds, then set the scale within them.
    pub fn set_scale_clamped(&mut self, factor: f32, min_scale: f32, max_scale: f32) -> f32 {
        self.set_scale_bounds(min_scale, max_scale);
        self.set_scale(factor)
    }

    /// Back to scale 1 (or the nearest bound) and no translation.
    pub fn reset(&mut self) {
        self.scale = self.clamp(1.0);
        self.translation = Translation::default();
    }

    pub fn screen_to_canvas(&self, screen: Point, origin: Point) -> Point {
        screen_to_canvas(screen, origin, self.translation, self.scale)
    }

    pub fn canvas_to_screen(&self, canvas: Point, origin: Point) -> Point {
        canvas_to_screen(canvas, origin, self.translation, self.scale)
    }

    fn clamp(&self, factor: f32) -> f32 {
        factor.clamp(self.min_scale, self.max_scale)
    }
}
