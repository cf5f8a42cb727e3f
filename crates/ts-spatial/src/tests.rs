//! Unit tests for ts-spatial.
//!
//! All tests use small hand-built networks.

#[cfg(test)]
mod helpers {
    use ts_core::{EdgeId, JunctionId, Point2};
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Small grid used by the routing and selector tests.
    ///
    /// Junctions:
    ///   0:(0,0)  1:(100,0)  2:(200,0)
    ///   3:(0,100)           4:(200,100)
    ///
    /// Directed edges (lane length, priority):
    ///   e0 0→1 (100,1)   e1 1→2 (100,1)   e2 2→4 (100,1)
    ///   e3 0→3 (500,1)   e4 3→4 (100,1)
    ///
    /// Cheapest 0→4 is 0→1→2→4 (300) over 0→3→4 (600).
    pub fn grid() -> (RoadNetwork, [JunctionId; 5], [EdgeId; 5]) {
        let mut b = RoadNetworkBuilder::new();
        let j = [
            b.add_junction(Point2::new(0.0, 0.0)),
            b.add_junction(Point2::new(100.0, 0.0)),
            b.add_junction(Point2::new(200.0, 0.0)),
            b.add_junction(Point2::new(0.0, 100.0)),
            b.add_junction(Point2::new(200.0, 100.0)),
        ];
        let mut road = |from: usize, to: usize, len: f64| {
            let e = b.add_edge(j[from], j[to], 1).unwrap();
            b.add_lane(e, len).unwrap();
            e
        };
        let e = [
            road(0, 1, 100.0),
            road(1, 2, 100.0),
            road(2, 4, 100.0),
            road(0, 3, 500.0),
            road(3, 4, 100.0),
        ];
        (b.build(), j, e)
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ts_core::{CoreError, Decision, JunctionId, LaneId, Point2};
    use crate::{RoadNetworkBuilder, SpatialError};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.junction_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(net.nearest_junction(Point2::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn ids_are_sequential() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let c = b.add_junction(Point2::new(1.0, 0.0));
        assert_eq!(a, JunctionId(0));
        assert_eq!(c, JunctionId(1));
        let e = b.add_edge(a, c, 1).unwrap();
        let l0 = b.add_lane(e, 10.0).unwrap();
        let l1 = b.add_lane(e, 10.0).unwrap();
        assert_eq!((l0, l1), (LaneId(0), LaneId(1)));
        let net = b.build();
        assert_eq!(net.edge(e).unwrap().lanes(), &[l0, l1]);
        assert_eq!(net.edge(e).unwrap().first_lane(), Some(l0));
    }

    #[test]
    fn edge_to_unknown_junction_is_rejected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let err = b.add_edge(a, JunctionId(7), 1).unwrap_err();
        assert_eq!(err, SpatialError::JunctionNotFound(JunctionId(7)));
    }

    #[test]
    fn priority_is_clamped_to_one() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let c = b.add_junction(Point2::new(1.0, 0.0));
        let zero = b.add_edge(a, c, 0).unwrap();
        let neg = b.add_edge(a, c, -4).unwrap();
        let three = b.add_edge(a, c, 3).unwrap();
        let net = b.build();
        assert_eq!(net.edge(zero).unwrap().priority(), 1);
        assert_eq!(net.edge(neg).unwrap().priority(), 1);
        assert_eq!(net.edge(three).unwrap().priority(), 3);
    }

    #[test]
    fn non_positive_lane_length_is_rejected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let c = b.add_junction(Point2::new(1.0, 0.0));
        let e = b.add_edge(a, c, 1).unwrap();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                b.add_lane(e, bad),
                Err(SpatialError::Core(CoreError::InvalidArgument { what: "length", .. }))
            ));
        }
    }

    #[test]
    fn self_loop_is_listed_once() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let e = b.add_edge(a, a, 1).unwrap();
        let net = b.build();
        assert_eq!(net.junction(a).unwrap().edges(), &[e]);
        assert_eq!(net.out_edges(a).collect::<Vec<_>>(), vec![e]);
    }

    #[test]
    fn keep_decision_cannot_be_routed() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let c = b.add_junction(Point2::new(1.0, 0.0));
        let e = b.add_edge(a, c, 1).unwrap();
        let l0 = b.add_lane(e, 10.0).unwrap();
        let l1 = b.add_lane(e, 10.0).unwrap();
        assert!(b.route(l0, Decision::KEEP, l1).is_err());
        assert_eq!(b.route(l0, Decision::LEFT, LaneId(9)), Err(SpatialError::LaneNotFound(LaneId(9))));
        assert_eq!(b.route(LaneId(9), Decision::LEFT, l1), Err(SpatialError::LaneNotFound(LaneId(9))));
    }

    #[test]
    fn append_lane_after_build() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let c = b.add_junction(Point2::new(1.0, 0.0));
        let e = b.add_edge(a, c, 1).unwrap();
        let mut net = b.build();
        assert_eq!(net.edge_weight(e).unwrap(), f64::INFINITY);
        let l = net.append_lane(e, 40.0).unwrap();
        assert_eq!(net.lane(l).unwrap().edge(), e);
        assert_eq!(net.edge_weight(e).unwrap(), 40.0);
    }
}

// ── Traversal, weights, membership ────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use ts_core::{AgentId, Decision, Point2};
    use crate::RoadNetworkBuilder;
    use super::helpers::grid;

    #[test]
    fn out_edges_exclude_incoming() {
        let (net, j, e) = grid();
        assert_eq!(net.junction(j[0]).unwrap().edges().len(), 2);
        assert_eq!(net.out_edges(j[0]).collect::<Vec<_>>(), vec![e[0], e[3]]);
        // Junction 1 has e0 incoming and e1 outgoing.
        assert_eq!(net.junction(j[1]).unwrap().edges(), &[e[0], e[1]]);
        assert_eq!(net.out_edges(j[1]).collect::<Vec<_>>(), vec![e[1]]);
        // Junction 4 is a sink.
        assert_eq!(net.out_edges(j[4]).count(), 0);
    }

    #[test]
    fn weight_is_longest_lane_over_priority() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let c = b.add_junction(Point2::new(1.0, 0.0));
        let e = b.add_edge(a, c, 2).unwrap();
        b.add_lane(e, 30.0).unwrap();
        b.add_lane(e, 50.0).unwrap();
        let bare = b.add_edge(c, a, 5).unwrap();
        let net = b.build();
        assert_eq!(net.edge_weight(e).unwrap(), 25.0);
        assert_eq!(net.edge_weight(bare).unwrap(), f64::INFINITY);
    }

    #[test]
    fn membership_is_idempotent() {
        let (mut net, _, e) = grid();
        let lane = net.edge(e[0]).unwrap().lanes()[0];
        let agent = AgentId(3);
        net.enter_lane(lane, agent).unwrap();
        net.enter_lane(lane, agent).unwrap();
        assert_eq!(net.lane(lane).unwrap().occupants(), &[agent]);
        assert!(net.leave_lane(lane, agent).unwrap());
        assert!(!net.leave_lane(lane, agent).unwrap());
        assert!(!net.lane(lane).unwrap().contains(agent));
    }

    #[test]
    fn unmapped_decision_stays_on_lane() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let c = b.add_junction(Point2::new(1.0, 0.0));
        let e = b.add_edge(a, c, 1).unwrap();
        let l0 = b.add_lane(e, 10.0).unwrap();
        let l1 = b.add_lane(e, 10.0).unwrap();
        b.route(l0, Decision::LEFT, l1).unwrap();
        let net = b.build();
        let lane = net.lane(l0).unwrap();
        assert_eq!(lane.decision_lane(Decision::LEFT), l1);
        assert_eq!(lane.decision_lane(Decision::RIGHT), l0);
        assert_eq!(lane.decision_lane(Decision::KEEP), l0);
        assert_eq!(lane.routed_decisions(), vec![Decision::LEFT]);
    }

    #[test]
    fn lane_point_without_shape_follows_edge() {
        let (net, _, e) = grid();
        let lane = net.edge(e[3]).unwrap().lanes()[0];
        let (p, angle) = net.lane_point(lane, 0.25).unwrap();
        assert!((p.x - 0.0).abs() < 1e-9 && (p.y - 25.0).abs() < 1e-9);
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(net.lane_point(lane, 1.5).is_err());
    }

    #[test]
    fn nearest_junction_by_coordinate() {
        let (net, j, _) = grid();
        assert_eq!(net.nearest_junction(Point2::new(190.0, 95.0)), Some(j[4]));
        assert_eq!(net.nearest_junction(Point2::new(-5.0, 2.0)), Some(j[0]));
    }
}

// ── Polyline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod polyline {
    use proptest::prelude::*;
    use ts_core::Point2;
    use crate::Polyline;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn midpoint_of_straight_segment() {
        let line = Polyline::open(vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]).unwrap();
        let (p, angle) = line.locate(0.5).unwrap();
        assert_eq!(p, Point2::new(5.0, 0.0));
        assert_eq!(angle, 0.0);
        assert_eq!(line.length(), 10.0);
    }

    #[test]
    fn multi_segment_lookup() {
        // 3 m right, then 4 m up: total 7.
        let line: Polyline = "0,0 3,0 3,4".parse().unwrap();
        assert!(close(line.length(), 7.0));
        let p = line.position(5.0 / 7.0).unwrap();
        assert!(close(p.x, 3.0) && close(p.y, 2.0));
        assert!(close(line.orientation(5.0 / 7.0).unwrap(), std::f64::consts::FRAC_PI_2));
        assert_eq!(line.position(0.0).unwrap(), Point2::new(0.0, 0.0));
        let end = line.position(1.0).unwrap();
        assert!(close(end.x, 3.0) && close(end.y, 4.0));
    }

    #[test]
    fn closed_length_includes_closing_segment() {
        let square = Polyline::parse("0,0 1,0 1,1 0,1", true).unwrap();
        assert!(close(square.length(), 4.0));
        let open = Polyline::parse("0,0 1,0 1,1 0,1", false).unwrap();
        assert!(close(open.length(), 3.0));
        // 3.5 of 4 lies halfway along the closing edge (0,1)→(0,0).
        let p = square.position(0.875).unwrap();
        assert!(close(p.x, 0.0) && close(p.y, 0.5));
    }

    #[test]
    fn out_of_range_relative_is_rejected() {
        let line: Polyline = "0,0 1,0".parse().unwrap();
        assert!(line.locate(-0.1).is_err());
        assert!(line.locate(1.1).is_err());
    }

    #[test]
    fn single_point_has_no_segments() {
        let dot: Polyline = "2,2".parse().unwrap();
        assert_eq!(dot.length(), 0.0);
        assert!(dot.locate(0.0).is_err());
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        assert!("".parse::<Polyline>().is_err());
        assert!("1,2,3".parse::<Polyline>().is_err());
        assert!("1;2".parse::<Polyline>().is_err());
        assert!("x,1".parse::<Polyline>().is_err());
        assert!("inf,1".parse::<Polyline>().is_err());
    }

    proptest! {
        #[test]
        fn two_point_line_is_lerp(
            ax in -1e3f64..1e3, ay in -1e3f64..1e3,
            bx in -1e3f64..1e3, by in -1e3f64..1e3,
            r in 0.0f64..=1.0,
        ) {
            let a = Point2::new(ax, ay);
            let b = Point2::new(bx, by);
            let line = Polyline::open(vec![a, b]).unwrap();
            let (p, angle) = line.locate(r).unwrap();
            prop_assert_eq!(p, a.lerp(b, r));
            prop_assert_eq!(angle, a.angle_to(b));
        }

        #[test]
        fn positions_stay_inside_bounding_box(
            pts in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 2..8),
            r in 0.0f64..=1.0,
        ) {
            let points: Vec<Point2> = pts.iter().map(|&(x, y)| Point2::new(x, y)).collect();
            let line = Polyline::open(points).unwrap();
            prop_assume!(line.length() > 1e-6);
            let p = line.position(r).unwrap();
            prop_assert!((-1e-9..=100.0 + 1e-9).contains(&p.x));
            prop_assert!((-1e-9..=100.0 + 1e-9).contains(&p.y));
        }
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use ts_core::{JunctionId, Point2};
    use crate::{shortest_route, RoadNetworkBuilder, SpatialError};
    use super::helpers::grid;

    #[test]
    fn picks_cheapest_path() {
        let (net, j, e) = grid();
        let route = shortest_route(&net, j[0], j[4]).unwrap();
        assert_eq!(route.edges, vec![e[0], e[1], e[2]]);
        assert_eq!(route.total_weight, 300.0);
    }

    #[test]
    fn priority_makes_roads_cheaper() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let c = b.add_junction(Point2::new(1.0, 0.0));
        let slow = b.add_edge(a, c, 1).unwrap();
        b.add_lane(slow, 100.0).unwrap();
        let fast = b.add_edge(a, c, 4).unwrap();
        b.add_lane(fast, 200.0).unwrap();
        let net = b.build();
        let route = shortest_route(&net, a, c).unwrap();
        assert_eq!(route.edges, vec![fast]);
        assert_eq!(route.total_weight, 50.0);
    }

    #[test]
    fn same_junction_is_trivial() {
        let (net, j, _) = grid();
        let route = shortest_route(&net, j[2], j[2]).unwrap();
        assert!(route.is_trivial());
        assert_eq!(route.total_weight, 0.0);
    }

    #[test]
    fn unreachable_reports_no_route() {
        let (net, j, _) = grid();
        assert_eq!(
            shortest_route(&net, j[4], j[0]),
            Err(SpatialError::NoRoute { from: j[4], to: j[0] })
        );
    }

    #[test]
    fn edges_without_lanes_are_impassable() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let c = b.add_junction(Point2::new(1.0, 0.0));
        b.add_edge(a, c, 1).unwrap();
        let net = b.build();
        assert!(matches!(shortest_route(&net, a, c), Err(SpatialError::NoRoute { .. })));
    }

    #[test]
    fn unknown_junction() {
        let (net, j, _) = grid();
        assert_eq!(
            shortest_route(&net, j[0], JunctionId(99)),
            Err(SpatialError::JunctionNotFound(JunctionId(99)))
        );
    }
}

// ── Edge selection ────────────────────────────────────────────────────────────

#[cfg(test)]
mod selectors {
    use ts_core::Point2;
    use crate::{
        EdgeSelector, FirstEdge, HighestPriority, RoadNetworkBuilder, SeededRandom, TowardsJunction,
    };
    use super::helpers::grid;

    #[test]
    fn first_edge_takes_incidence_order() {
        let (net, j, e) = grid();
        let candidates: Vec<_> = net.out_edges(j[0]).collect();
        assert_eq!(FirstEdge.select(&net, j[0], &candidates), Some(e[0]));
        assert_eq!(FirstEdge.select(&net, j[0], &[]), None);
    }

    #[test]
    fn highest_priority_then_weight_then_id() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_junction(Point2::new(0.0, 0.0));
        let c = b.add_junction(Point2::new(1.0, 0.0));
        let low = b.add_edge(a, c, 1).unwrap();
        b.add_lane(low, 10.0).unwrap();
        let long_hi = b.add_edge(a, c, 3).unwrap();
        b.add_lane(long_hi, 90.0).unwrap();
        let short_hi = b.add_edge(a, c, 3).unwrap();
        b.add_lane(short_hi, 30.0).unwrap();
        let twin = b.add_edge(a, c, 3).unwrap();
        b.add_lane(twin, 30.0).unwrap();
        let net = b.build();

        let all: Vec<_> = net.out_edges(a).collect();
        assert_eq!(HighestPriority.select(&net, a, &all), Some(short_hi));
        assert_eq!(HighestPriority.select(&net, a, &[low, long_hi]), Some(long_hi));
    }

    #[test]
    fn seeded_random_is_reproducible_and_in_range() {
        let (net, j, _) = grid();
        let candidates: Vec<_> = net.out_edges(j[0]).collect();
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..32 {
            let pick = a.select(&net, j[0], &candidates);
            assert_eq!(pick, b.select(&net, j[0], &candidates));
            assert!(candidates.contains(&pick.unwrap()));
        }
    }

    #[test]
    fn towards_junction_follows_route() {
        let (net, j, e) = grid();
        let candidates: Vec<_> = net.out_edges(j[0]).collect();
        let mut to_three = TowardsJunction { target: j[3] };
        assert_eq!(to_three.select(&net, j[0], &candidates), Some(e[3]));
        let mut to_four = TowardsJunction { target: j[4] };
        assert_eq!(to_four.select(&net, j[0], &candidates), Some(e[0]));
        // Unreachable target falls back to the first candidate.
        let mut to_nowhere = TowardsJunction { target: j[0] };
        let from_two: Vec<_> = net.out_edges(j[2]).collect();
        assert_eq!(to_nowhere.select(&net, j[2], &from_two), Some(e[2]));
    }

    #[test]
    fn boxed_selector_delegates() {
        let (net, j, e) = grid();
        let candidates: Vec<_> = net.out_edges(j[0]).collect();
        let mut boxed: Box<dyn EdgeSelector> = Box::new(FirstEdge);
        assert_eq!(boxed.select(&net, j[0], &candidates), Some(e[0]));
    }
}
