//! Ring road definition.
//!
//! Junctions sit on a circle and every edge runs clockwise to the next one.
//! Each edge has an inner lane (the straight chord) and a slightly longer
//! outer lane bowed away from the centre; `LEFT` moves inner → outer and
//! `RIGHT` moves back.

use std::f64::consts::TAU;

use anyhow::Result;

use ts_core::{Decision, JunctionId, LaneId, Point2};
use ts_spatial::{Polyline, RoadNetwork, RoadNetworkBuilder};

/// How far the outer lane bulges outward at its midpoint, in metres.
const OUTER_BULGE: f64 = 6.0;

/// Build a ring of `junctions` junctions on a circle of `radius` metres.
///
/// Returns the network, its junctions and the inner lane of every edge.
pub fn build_ring(junctions: usize, radius: f64) -> Result<(RoadNetwork, Vec<JunctionId>, Vec<LaneId>)> {
    let mut b = RoadNetworkBuilder::new();

    let points: Vec<Point2> = (0..junctions)
        .map(|i| {
            let a = TAU * i as f64 / junctions as f64;
            Point2::new(radius * a.cos(), radius * a.sin())
        })
        .collect();
    let ids: Vec<JunctionId> = points.iter().map(|&p| b.add_junction(p)).collect();

    let mut inner_lanes = Vec::with_capacity(junctions);
    for i in 0..junctions {
        let j = (i + 1) % junctions;
        // Arterial every third edge.  Priority only scales the edge weight
        // here: each junction has a single exit, so no selector ever chooses.
        let priority = if i % 3 == 0 { 2 } else { 1 };
        let edge = b.add_edge(ids[i], ids[j], priority)?;

        let (from, to) = (points[i], points[j]);
        let mid = from.lerp(to, 0.5);
        let outward = Point2::new(mid.x / radius, mid.y / radius);
        let bowed = Point2::new(mid.x + outward.x * OUTER_BULGE, mid.y + outward.y * OUTER_BULGE);

        let inner = b.add_shaped_lane(edge, Polyline::open(vec![from, to])?)?;
        let outer = b.add_shaped_lane(edge, Polyline::open(vec![from, bowed, to])?)?;
        b.route(inner, Decision::LEFT, outer)?;
        b.route(outer, Decision::RIGHT, inner)?;
        inner_lanes.push(inner);
    }

    Ok((b.build(), ids, inner_lanes))
}
