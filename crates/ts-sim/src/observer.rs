//! Simulation observer trait for progress reporting and rendering.

use ts_core::{AgentId, Tick};
use ts_mobility::{Agent, AgentStore, MobilityError};
use ts_spatial::RoadNetwork;

use crate::TickReport;

/// Callbacks invoked by [`Sim::tick`][crate::Sim::tick] at key points.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — position printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_tick_end(&mut self, report: &TickReport, network: &RoadNetwork, agents: &AgentStore) {
///         for agent in agents.iter() {
///             let (p, _) = network.lane_point(agent.lane(), agent.position()).unwrap();
///             println!("{}: {} at {p}", report.tick, agent.id());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each tick, once the elapsed time is known.
    fn on_tick_start(&mut self, _tick: Tick, _elapsed: f64) {}

    /// Called when an agent could not move.  The agent is removed at the end
    /// of the tick.
    fn on_agent_failed(&mut self, _tick: Tick, _agent: AgentId, _error: &MobilityError) {}

    /// Called for every agent taken out of the simulation.
    fn on_agent_removed(&mut self, _tick: Tick, _agent: &Agent) {}

    /// Called at the end of each tick with read-only access to the world, so
    /// renderers and recorders need no hooks into the simulation types.
    fn on_tick_end(&mut self, _report: &TickReport, _network: &RoadNetwork, _agents: &AgentStore) {}

    /// Called once after [`Sim::run`][crate::Sim::run] completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
