//! # Node-Link Canvas
//!
//! Connection routing and live redraw for node-link diagram editors.
//!
//! Nodes are free-floating boxes on a zoomable canvas. Connections between
//! them are drawn on an overlay that is fully redrawn whenever anything that
//! affects a connection changes: a node moves, is linked, or is removed, or
//! the view scale changes.
//!
//! ## Features
//!
//! - **Undirected connections** - `A-B` and `B-A` are the same connection
//! - **Distance-based routing** - short connections are straight, long ones curve
//! - **Scale-aware drawing** - routes are computed in screen space and drawn unscaled
//! - **Connect mode** - pick a source node, then a target
//! - **Pluggable surfaces** - draw into a Slint model, or record for tests
//!
//! ## Core Types
//!
//! - [`EditorController`] - Shareable handle with Slint callback factories
//! - [`EditorSession`] - All mutable state of one editor
//! - [`ConnectionRenderer`] - Connection set plus the redraw pass
//! - [`route_between`] - Straight-or-curved routing for one pair of points
//! - [`DrawingSurface`] - Trait implemented by drawing targets
//! - [`PositionProvider`] - Trait resolving node ids to screen-space centers

pub mod error;
pub mod geometry;
pub mod node;
pub mod coords;
pub mod path;
pub mod state;
pub mod connections;
pub mod surface;
pub mod renderer;
pub mod selection;
pub mod tracking;
pub mod config;
pub mod session;
pub mod controller;

pub use error::RenderError;
pub use geometry::{CanvasSize, NodeGeometry, Point, PositionProvider, SimpleNodeGeometry};
pub use node::{NodeId, NodeIdGenerator, NodeMarker};
pub use coords::{canvas_to_screen, screen_to_canvas, Translation, ViewState};
pub use path::{route_between, CurveStyle, Route, RouteConfig};
pub use state::{GeometryCache, ScreenPositions, StoredNode};
pub use connections::{Connection, ConnectionKey, ConnectionSet};
pub use surface::{DrawCommand, DrawingSurface, ModelSurface, RecordingSurface, StrokeStyle};
pub use renderer::{ConnectionRenderer, RedrawReport};
pub use selection::{Activation, ConnectSelection};
pub use tracking::DragTracker;
pub use config::EditorConfig;
pub use session::EditorSession;
pub use controller::EditorController;
