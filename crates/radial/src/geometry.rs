//! Polar geometry shared by hit-testing and drawing.
//!
//! Angles grow from the positive x axis in surface coordinates (y down), so
//! wedge `i` covers `[i * sweep, (i + 1) * sweep)` for both the pointer
//! classifier and the painter.

use crate::menu::Focus;
use std::f64::consts::TAU;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pixel dimensions of the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Diameter of the menu circle: the shorter side of the surface.
    pub fn circle(&self) -> f64 {
        self.width.min(self.height).max(0) as f64
    }
}

pub fn wedge_sweep(item_count: NonZeroUsize) -> f64 {
    TAU / item_count.get() as f64
}

pub fn wedge_start(index: usize, item_count: NonZeroUsize) -> f64 {
    index as f64 * wedge_sweep(item_count)
}

pub fn wedge_bisector(index: usize, item_count: NonZeroUsize) -> f64 {
    wedge_start(index, item_count) + wedge_sweep(item_count) / 2.0
}

/// Where a wedge's label sits: on its bisector, a third of the circle's
/// diameter away from the center.
pub fn label_anchor(index: usize, item_count: NonZeroUsize, size: Size) -> Point {
    let center = size.center();
    let reach = size.circle() / 3.0;
    let angle = wedge_bisector(index, item_count);
    Point::new(
        center.x + reach * angle.cos(),
        center.y + reach * angle.sin(),
    )
}

/// Maps an angle in radians (any range) to the wedge containing it.
/// A boundary angle belongs to the wedge that starts there.
pub fn wedge_at(angle: f64, item_count: NonZeroUsize) -> usize {
    let n = item_count.get();
    let normalized = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative angles
    (n as f64 * normalized / TAU).floor() as usize % n
}

/// Classifies a pointer position against a menu laid out on `size`.
pub fn classify(
    pointer: Point,
    size: Size,
    center_radius: f64,
    item_count: NonZeroUsize,
) -> Focus {
    let center = size.center();
    if pointer.distance_to(center) <= center_radius {
        return Focus::Center;
    }

    let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);
    Focus::Wedge(wedge_at(dy.atan2(dx), item_count))
}
