//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use node_link_canvas::Point;
use slint::{Color, SharedString};

/// Row type used when drawing into a Slint model.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionRow {
    pub key: SharedString,
    pub commands: SharedString,
    pub color: Color,
    pub width: f32,
}

impl ConnectionRow {
    pub fn new(key: SharedString, commands: SharedString, color: Color, width: f32) -> Self {
        Self { key, commands, color, width }
    }
}

/// Assert two points are equal within a small tolerance.
pub fn assert_point_near(actual: Point, expected: Point) {
    const EPSILON: f32 = 1e-3;
    assert!(
        (actual.x - expected.x).abs() < EPSILON && (actual.y - expected.y).abs() < EPSILON,
        "expected ({}, {}), got ({}, {})",
        expected.x,
        expected.y,
        actual.x,
        actual.y
    );
}
