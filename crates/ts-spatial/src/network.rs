//! Road network representation and builder.
//!
//! # Data layout
//!
//! Junctions, edges and lanes live in three arenas indexed by their typed
//! ids.  Cross references are ids, never pointers:
//!
//! ```text
//! Junction ──edges──▶ EdgeId*      (incident, both directions, creation order)
//! Edge     ──lanes──▶ LaneId*      (creation order; the first is the entry lane)
//! Lane     ──edge───▶ EdgeId
//! Lane     ──occupants──▶ AgentId* (membership only; agents live elsewhere)
//! ```
//!
//! Topology is fixed once built, except that lanes may be appended to an
//! edge.  Lane membership is the only state that changes during a run; it is
//! mutated through [`RoadNetwork::enter_lane`] / [`RoadNetwork::leave_lane`],
//! which the agent store calls from its single relocation function.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a point to the nearest junction, so callers
//! can place things by coordinate.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use ts_core::{AgentId, CoreError, Decision, EdgeId, JunctionId, LaneId, Point2};

use crate::router::{self, Route};
use crate::{Polyline, SpatialError, SpatialResult};

// ── R-tree junction entry ─────────────────────────────────────────────────────

#[derive(Clone)]
struct JunctionEntry {
    point: [f64; 2],
    id:    JunctionId,
}

impl RTreeObject for JunctionEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for JunctionEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Elements ──────────────────────────────────────────────────────────────────

/// A graph node.
#[derive(Clone, Debug)]
pub struct Junction {
    id:    JunctionId,
    pos:   Point2,
    edges: Vec<EdgeId>,
}

impl Junction {
    pub fn id(&self) -> JunctionId {
        self.id
    }

    pub fn pos(&self) -> Point2 {
        self.pos
    }

    /// Incident edges, incoming and outgoing, in creation order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// A directed road between two junctions.
#[derive(Clone, Debug)]
pub struct Edge {
    id:       EdgeId,
    start:    JunctionId,
    end:      JunctionId,
    /// 1 = lowest priority.
    priority: u32,
    lanes:    Vec<LaneId>,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start(&self) -> JunctionId {
        self.start
    }

    pub fn end(&self) -> JunctionId {
        self.end
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Lanes in creation order.
    pub fn lanes(&self) -> &[LaneId] {
        &self.lanes
    }

    /// The lane agents enter when they turn onto this edge.
    pub fn first_lane(&self) -> Option<LaneId> {
        self.lanes.first().copied()
    }

    /// `true` if this edge leaves `junction`.
    pub fn comes_from(&self, junction: JunctionId) -> bool {
        self.start == junction
    }
}

/// A single traffic channel of an edge.
#[derive(Clone, Debug)]
pub struct Lane {
    id:        LaneId,
    edge:      EdgeId,
    length:    f64,
    shape:     Option<Polyline>,
    routes:    FxHashMap<Decision, LaneId>,
    occupants: Vec<AgentId>,
}

impl Lane {
    pub fn id(&self) -> LaneId {
        self.id
    }

    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// Length in metres.  Always finite and positive.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Geometry, if the lane was built from a shape.
    pub fn shape(&self) -> Option<&Polyline> {
        self.shape.as_ref()
    }

    /// Agents currently on this lane, in arrival order.
    pub fn occupants(&self) -> &[AgentId] {
        &self.occupants
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.occupants.contains(&agent)
    }

    /// The lane an agent holding `decision` should move to.  Unmapped
    /// decisions keep the agent where it is.
    pub fn decision_lane(&self, decision: Decision) -> LaneId {
        self.routes.get(&decision).copied().unwrap_or(self.id)
    }

    /// Decisions this lane routes, sorted.
    pub fn routed_decisions(&self) -> Vec<Decision> {
        let mut keys: Vec<Decision> = self.routes.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph with lanes and lane membership.
///
/// Construct with [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    junctions:   Vec<Junction>,
    edges:       Vec<Edge>,
    lanes:       Vec<Lane>,
    spatial_idx: RTree<JunctionEntry>,
}

impl RoadNetwork {
    /// A network with nothing in it.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn junction_count(&self) -> usize {
        self.junctions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    // ── Element access ────────────────────────────────────────────────────

    pub fn junction(&self, id: JunctionId) -> SpatialResult<&Junction> {
        self.junctions.get(id.index()).ok_or(SpatialError::JunctionNotFound(id))
    }

    pub fn edge(&self, id: EdgeId) -> SpatialResult<&Edge> {
        self.edges.get(id.index()).ok_or(SpatialError::EdgeNotFound(id))
    }

    pub fn lane(&self, id: LaneId) -> SpatialResult<&Lane> {
        self.lanes.get(id.index()).ok_or(SpatialError::LaneNotFound(id))
    }

    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Edges leaving `junction`, in the junction's incidence order.
    ///
    /// Edges that only arrive at `junction` are excluded.  Unknown junctions
    /// have no outgoing edges.
    pub fn out_edges(&self, junction: JunctionId) -> impl Iterator<Item = EdgeId> + '_ {
        self.junctions
            .get(junction.index())
            .map(|j| j.edges.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(move |e| self.edges[e.index()].comes_from(junction))
    }

    /// Routing cost of `edge`: its longest lane divided by its priority, or
    /// `+∞` for an edge without lanes.
    pub fn edge_weight(&self, edge: EdgeId) -> SpatialResult<f64> {
        let e = self.edge(edge)?;
        let longest = e
            .lanes
            .iter()
            .map(|l| self.lanes[l.index()].length)
            .max_by(f64::total_cmp)
            .unwrap_or(f64::INFINITY);
        Ok(longest / e.priority as f64)
    }

    // ── Lane membership ───────────────────────────────────────────────────

    /// Record `agent` as an occupant of `lane`.  Idempotent.
    pub fn enter_lane(&mut self, lane: LaneId, agent: AgentId) -> SpatialResult<()> {
        let l = self.lanes.get_mut(lane.index()).ok_or(SpatialError::LaneNotFound(lane))?;
        if !l.occupants.contains(&agent) {
            l.occupants.push(agent);
        }
        Ok(())
    }

    /// Drop `agent` from `lane`.  Returns whether it was an occupant.
    pub fn leave_lane(&mut self, lane: LaneId, agent: AgentId) -> SpatialResult<bool> {
        let l = self.lanes.get_mut(lane.index()).ok_or(SpatialError::LaneNotFound(lane))?;
        match l.occupants.iter().position(|&a| a == agent) {
            Some(i) => {
                l.occupants.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ── Topology growth ───────────────────────────────────────────────────

    /// Append a straight lane of `length` metres to `edge`.
    pub fn append_lane(&mut self, edge: EdgeId, length: f64) -> SpatialResult<LaneId> {
        push_lane(&mut self.edges, &mut self.lanes, edge, length, None)
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Point and heading at relative position `relative ∈ [0, 1]` on `lane`.
    ///
    /// Uses the lane's shape when it has one, otherwise the straight line
    /// between its edge's junctions.
    pub fn lane_point(&self, lane: LaneId, relative: f64) -> SpatialResult<(Point2, f64)> {
        let l = self.lane(lane)?;
        if let Some(shape) = &l.shape {
            return Ok(shape.locate(relative)?);
        }
        if !(0.0..=1.0).contains(&relative) {
            return Err(CoreError::invalid("relative", format!("{relative} is outside [0, 1]")).into());
        }
        let e = &self.edges[l.edge.index()];
        let a = self.junctions[e.start.index()].pos;
        let b = self.junctions[e.end.index()].pos;
        Ok((a.lerp(b, relative), a.angle_to(b)))
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Cheapest route by [`edge_weight`](Self::edge_weight).  See
    /// [`crate::router`].
    pub fn shortest_route(&self, from: JunctionId, to: JunctionId) -> SpatialResult<Route> {
        router::shortest_route(self, from, to)
    }

    /// The junction nearest to `pos`.  `None` only for an empty network.
    pub fn nearest_junction(&self, pos: Point2) -> Option<JunctionId> {
        self.spatial_idx.nearest_neighbor(&[pos.x, pos.y]).map(|e| e.id)
    }
}

/// Shared by the builder and [`RoadNetwork::append_lane`].
fn push_lane(
    edges:  &mut [Edge],
    lanes:  &mut Vec<Lane>,
    edge:   EdgeId,
    length: f64,
    shape:  Option<Polyline>,
) -> SpatialResult<LaneId> {
    if !length.is_finite() || length <= 0.0 {
        return Err(CoreError::invalid("length", format!("lane length {length} must be finite and > 0")).into());
    }
    let e = edges.get_mut(edge.index()).ok_or(SpatialError::EdgeNotFound(edge))?;
    let id = LaneId::try_from(lanes.len())?;
    lanes.push(Lane {
        id,
        edge,
        length,
        shape,
        routes: FxHashMap::default(),
        occupants: Vec::new(),
    });
    e.lanes.push(id);
    Ok(id)
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ts_core::Point2;
/// use ts_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_junction(Point2::new(0.0, 0.0));
/// let c = b.add_junction(Point2::new(100.0, 0.0));
/// let e = b.add_edge(a, c, 1).unwrap();
/// b.add_lane(e, 100.0).unwrap();
/// let net = b.build();
/// assert_eq!(net.edge_count(), 1);
/// assert_eq!(net.lane_count(), 1);
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    junctions: Vec<Junction>,
    edges:     Vec<Edge>,
    lanes:     Vec<Lane>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a junction and return its id (sequential from 0).
    pub fn add_junction(&mut self, pos: Point2) -> JunctionId {
        let id = JunctionId(self.junctions.len() as u32);
        self.junctions.push(Junction { id, pos, edges: Vec::new() });
        id
    }

    /// Add a **directed** edge from `start` to `end`.
    ///
    /// `priority` is clamped to at least 1.
    pub fn add_edge(&mut self, start: JunctionId, end: JunctionId, priority: i32) -> SpatialResult<EdgeId> {
        for j in [start, end] {
            if j.index() >= self.junctions.len() {
                return Err(SpatialError::JunctionNotFound(j));
            }
        }
        let id = EdgeId::try_from(self.edges.len())?;
        self.edges.push(Edge {
            id,
            start,
            end,
            priority: priority.max(1) as u32,
            lanes: Vec::new(),
        });
        self.junctions[start.index()].edges.push(id);
        if end != start {
            self.junctions[end.index()].edges.push(id);
        }
        Ok(id)
    }

    /// Append a straight lane of `length` metres to `edge`.
    pub fn add_lane(&mut self, edge: EdgeId, length: f64) -> SpatialResult<LaneId> {
        push_lane(&mut self.edges, &mut self.lanes, edge, length, None)
    }

    /// Append a lane following `shape`; its length is the shape's length.
    pub fn add_shaped_lane(&mut self, edge: EdgeId, shape: Polyline) -> SpatialResult<LaneId> {
        let length = shape.length();
        push_lane(&mut self.edges, &mut self.lanes, edge, length, Some(shape))
    }

    /// Route agents on `from` holding `decision` to `to`.
    pub fn route(&mut self, from: LaneId, decision: Decision, to: LaneId) -> SpatialResult<()> {
        if decision.is_keep() {
            return Err(CoreError::invalid("decision", "the keep decision cannot be routed").into());
        }
        if to.index() >= self.lanes.len() {
            return Err(SpatialError::LaneNotFound(to));
        }
        let lane = self.lanes.get_mut(from.index()).ok_or(SpatialError::LaneNotFound(from))?;
        lane.routes.insert(decision, to);
        Ok(())
    }

    pub fn junction_count(&self) -> usize {
        self.junctions.len()
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        let entries: Vec<JunctionEntry> = self
            .junctions
            .iter()
            .map(|j| JunctionEntry { point: [j.pos.x, j.pos.y], id: j.id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            junctions: self.junctions,
            edges: self.edges,
            lanes: self.lanes,
            spatial_idx,
        }
    }
}
