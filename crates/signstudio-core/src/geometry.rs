//! Canvas geometry: conversion between pixel and percentage space.
//!
//! Field geometry is stored as percentages (0-100 on each axis) of the
//! document canvas so that it survives re-layout at any zoom level. Pointer
//! input arrives in pixels, in the same coordinate space as the canvas
//! bounding box. Everything here is a pure function of its inputs.

use serde::{Deserialize, Serialize};

/// A position, either in pixels or in canvas percentages depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair, either in pixels or in canvas percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Pixel bounding box of the rendered canvas, in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Translate a pointer position into canvas-local pixels.
    pub fn to_local(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.left, pointer.y - self.top)
    }

    /// True when the canvas has no area (not yet laid out, or collapsed).
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Percentage of `extent` covered by `px`. Zero-sized extents map to 0%.
fn ratio(px: f64, extent: f64) -> f64 {
    if extent <= 0.0 { 0.0 } else { px / extent * 100.0 }
}

/// Canvas-local pixel position → canvas percentages.
pub fn pixel_to_percent(local: Point, canvas: &CanvasRect) -> Point {
    Point::new(ratio(local.x, canvas.width), ratio(local.y, canvas.height))
}

/// Canvas percentages → canvas-local pixel position.
pub fn percent_to_pixel(pct: Point, canvas: &CanvasRect) -> Point {
    Point::new(pct.x / 100.0 * canvas.width, pct.y / 100.0 * canvas.height)
}

/// Percentage size → pixel size at the canvas's current dimensions.
pub fn size_to_pixel(pct: Size, canvas: &CanvasRect) -> Size {
    Size::new(pct.width / 100.0 * canvas.width, pct.height / 100.0 * canvas.height)
}

/// Pixel size → percentage size.
pub fn size_to_percent(px: Size, canvas: &CanvasRect) -> Size {
    Size::new(ratio(px.width, canvas.width), ratio(px.height, canvas.height))
}

/// Clamp a canvas-local pixel position so the element's whole bounding box
/// stays inside `[0, width] x [0, height]`.
///
/// An element larger than the canvas pins to the top/left edge.
pub fn clamp_position(local: Point, size: Size, canvas: &CanvasRect) -> Point {
    let max_x = canvas.width - size.width;
    let max_y = canvas.height - size.height;
    Point::new(local.x.min(max_x).max(0.0), local.y.min(max_y).max(0.0))
}

/// Clamp a percentage position so that `x + width <= 100` and `y + height <= 100`.
pub fn clamp_percent(pct: Point, size: Size) -> Point {
    Point::new(
        pct.x.min(100.0 - size.width).max(0.0),
        pct.y.min(100.0 - size.height).max(0.0),
    )
}
