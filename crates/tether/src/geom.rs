use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians (0 points along +x, angles grow clockwise in screen space).
    pub fn from_angle(angle: f64) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    /// Angle of the vector in radians, in `(-PI, PI]`.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The drawable area plus the node footprint used to keep node centers inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub bounds: CanvasBounds,
    pub node_half_size: f64,
}

impl Canvas {
    pub const fn new(bounds: CanvasBounds, node_half_size: f64) -> Self {
        Self {
            bounds,
            node_half_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let CanvasBounds { width, height } = self.bounds;
        let half = self.node_half_size;
        let ok = [width, height, half]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0);
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidCanvas {
                width,
                height,
                node_half_size: half,
            })
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.bounds.width / 2.0, self.bounds.height / 2.0)
    }

    /// Largest radius around the center that keeps a whole node on the canvas.
    pub fn available_radius(&self) -> f64 {
        let short_side = self.bounds.width.min(self.bounds.height);
        (short_side / 2.0 - self.node_half_size).max(0.0)
    }

    /// Clamps a node center to `[half, dimension - half]` on both axes.
    ///
    /// A canvas narrower than one node collapses that axis to its midpoint. Non-finite input
    /// coordinates land on the midpoint as well, so no NaN ever leaves a layout.
    pub fn clamp(&self, p: Point) -> Point {
        Point {
            x: clamp_axis(p.x, self.node_half_size, self.bounds.width),
            y: clamp_axis(p.y, self.node_half_size, self.bounds.height),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.clamp(p) == p
    }
}

fn clamp_axis(value: f64, half: f64, extent: f64) -> f64 {
    let lo = half;
    let hi = extent - half;
    if lo > hi || !value.is_finite() {
        return extent / 2.0;
    }
    value.clamp(lo, hi)
}
