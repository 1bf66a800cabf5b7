//! Connection rendering.
//!
//! [`ConnectionRenderer`] owns the connection set and turns it into strokes on
//! a [`DrawingSurface`]. Every redraw is a full one: the surface is cleared and
//! each connection is routed again from the current node centers.

use crate::connections::{Connection, ConnectionKey, ConnectionSet};
use crate::coords::effective_scale;
use crate::error::RenderError;
use crate::geometry::{CanvasSize, PositionProvider};
use crate::node::NodeId;
use crate::path::{route_between, Route, RouteConfig};
use crate::surface::{DrawingSurface, StrokeStyle};

/// Outcome of one redraw pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedrawReport {
    /// Number of connections stroked
    pub drawn: usize,
    /// Connections left out of this frame because an endpoint had no usable geometry
    pub skipped: Vec<(ConnectionKey, RenderError)>,
}

impl RedrawReport {
    pub fn skipped_keys(&self) -> impl Iterator<Item = &ConnectionKey> {
        self.skipped.iter().map(|(key, _)| key)
    }
}

/// Owns the active connections and draws them.
#[derive(Default)]
pub struct ConnectionRenderer {
    connections: ConnectionSet,
    route_config: RouteConfig,
    stroke: StrokeStyle,
}

impl ConnectionRenderer {
    pub fn new(route_config: RouteConfig, stroke: StrokeStyle) -> Self {
        Self {
            connections: ConnectionSet::new(),
            route_config,
            stroke,
        }
    }

    pub fn connections(&self) -> &ConnectionSet {
        &self.connections
    }

    pub fn route_config(&self) -> &RouteConfig {
        &self.route_config
    }

    pub fn set_route_config(&mut self, config: RouteConfig) {
        self.route_config = config;
    }

    pub fn stroke(&self) -> &StrokeStyle {
        &self.stroke
    }

    pub fn set_stroke(&mut self, stroke: StrokeStyle) {
        self.stroke = stroke;
    }

    /// Link two nodes. Returns `None` for a self connection.
    ///
    /// An existing connection between the same pair is overwritten.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Option<ConnectionKey> {
        let key = self.connections.connect(source, target);
        match &key {
            Some(key) => log::debug!("connected {}", key),
            None => log::debug!("ignoring self connection on {}", source),
        }
        key
    }

    /// Remove every connection touching `node`.
    pub fn disconnect(&mut self, node: &NodeId) -> Vec<ConnectionKey> {
        let removed = self.connections.disconnect(node);
        if !removed.is_empty() {
            log::debug!("removed {} connection(s) of {}", removed.len(), node);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.connections.clear();
    }

    /// Clear `surface` and stroke every connection.
    ///
    /// `positions` yields on-screen endpoint centers, `canvas` is the unscaled
    /// canvas size. Routing happens in screen space (the curve threshold and
    /// control offsets are screen pixels); every point is then divided by
    /// `scale` because the surface is displayed through the same scale.
    ///
    /// Fails only if the surface cannot be acquired. Connections whose
    /// endpoints cannot be resolved are skipped and listed in the report.
    pub fn redraw<P>(
        &self,
        positions: &P,
        scale: f32,
        canvas: CanvasSize,
        surface: &mut dyn DrawingSurface,
    ) -> Result<RedrawReport, RenderError>
    where
        P: PositionProvider + ?Sized,
    {
        let scale = effective_scale(scale);
        let screen_canvas = canvas.scaled(scale);

        surface.begin_frame(canvas)?;

        let mut report = RedrawReport::default();
        for (key, connection) in self.connections.iter() {
            match self.route(connection, positions, screen_canvas) {
                Ok(route) => {
                    surface.stroke(key, &route.scaled(scale), &self.stroke);
                    report.drawn += 1;
                }
                Err(err) => {
                    log::warn!("skipping connection {} this frame: {}", key, err);
                    report.skipped.push((key.clone(), err));
                }
            }
        }
        surface.end_frame();

        log::debug!(
            "redrew {} connection(s), skipped {}",
            report.drawn,
            report.skipped.len()
        );
        Ok(report)
    }

    fn route<P>(
        &self,
        connection: &Connection,
        positions: &P,
        screen_canvas: CanvasSize,
    ) -> Result<Route, RenderError>
    where
        P: PositionProvider + ?Sized,
    {
        let from = positions.center(&connection.from)?;
        let to = positions.center(&connection.to)?;
        Ok(route_between(from, to, screen_canvas, &self.route_config))
    }
}
