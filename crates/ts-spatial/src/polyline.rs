//! Polyline shapes and position queries along them.
//!
//! A relative query `r ∈ [0, 1]` is converted into an absolute distance
//! `r * length` and walked along the segment lengths with
//! [`ts_core::SliceChain`], the same distance-following walk agents use on
//! the lane graph.

use std::str::FromStr;

use ts_core::{CoreError, CoreResult, Point2, SliceChain};

/// An ordered, non-empty sequence of points, optionally closed.
///
/// Segment lengths and the total length are computed once at construction.
/// A closed polyline includes the segment from the last point back to the
/// first in both.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    points:          Vec<Point2>,
    closed:          bool,
    segment_lengths: Vec<f64>,
    length:          f64,
}

impl Polyline {
    /// Build a polyline.  Fails on an empty point list.
    pub fn new(points: Vec<Point2>, closed: bool) -> CoreResult<Self> {
        if points.is_empty() {
            return Err(CoreError::invalid("points", "polyline needs at least one point"));
        }
        let mut segment_lengths: Vec<f64> = points.windows(2).map(|w| w[0].distance(w[1])).collect();
        if closed && points.len() > 1 {
            segment_lengths.push(points[points.len() - 1].distance(points[0]));
        }
        let length = segment_lengths.iter().sum();
        Ok(Self { points, closed, segment_lengths, length })
    }

    /// Open polyline through `points`.
    pub fn open(points: Vec<Point2>) -> CoreResult<Self> {
        Self::new(points, false)
    }

    /// Parse the `"x,y x,y …"` shape-string format.
    pub fn parse(shape: &str, closed: bool) -> CoreResult<Self> {
        let points = shape
            .split_whitespace()
            .map(parse_point)
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(points, closed)
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Total path length.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn start(&self) -> Point2 {
        self.points[0]
    }

    pub fn end(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    /// Position and heading (radians, `atan2` convention) at relative
    /// distance `relative ∈ [0, 1]` along the path.
    pub fn locate(&self, relative: f64) -> CoreResult<(Point2, f64)> {
        if !(0.0..=1.0).contains(&relative) {
            return Err(CoreError::invalid("relative", format!("{relative} is outside [0, 1]")));
        }
        if self.points.len() < 2 {
            return Err(CoreError::invalid("points", "a single-point polyline has no segments to follow"));
        }

        if self.points.len() == 2 && !self.closed {
            let (a, b) = (self.points[0], self.points[1]);
            return Ok((a.lerp(b, relative), a.angle_to(b)));
        }

        let budget = relative * self.length;
        let (segment, offset) = SliceChain::new(&self.segment_lengths, self.closed).walk(0, 0.0, budget)?;
        let a = self.points[segment];
        let b = self.points[(segment + 1) % self.points.len()];
        Ok((a.lerp(b, offset), a.angle_to(b)))
    }

    /// Position at relative distance `relative ∈ [0, 1]`.
    pub fn position(&self, relative: f64) -> CoreResult<Point2> {
        self.locate(relative).map(|(p, _)| p)
    }

    /// Heading at relative distance `relative ∈ [0, 1]`.
    pub fn orientation(&self, relative: f64) -> CoreResult<f64> {
        self.locate(relative).map(|(_, angle)| angle)
    }
}

impl FromStr for Polyline {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s, false)
    }
}

fn parse_point(token: &str) -> CoreResult<Point2> {
    let mut parts = token.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CoreError::invalid("shape", format!("`{token}` is not an `x,y` pair")));
    };
    let coord = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CoreError::invalid("shape", format!("`{s}` is not a finite number")))
    };
    Ok(Point2::new(coord(x)?, coord(y)?))
}
