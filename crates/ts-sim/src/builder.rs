//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use ts_behavior::DecisionModel;
use ts_core::{Clock, SimConfig};
use ts_mobility::AgentStore;
use ts_schedule::Layers;
use ts_spatial::{EdgeSelector, RoadNetwork, SeededRandom};

use crate::{CommandQueue, ConsoleSink, Sim, SimError, SimObject, SimResult, TracingConsole};

/// Fluent builder for [`Sim<M>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — seed, time factor, thinking, run length, …
/// - [`RoadNetwork`] — the roads; every edge is scheduled for lane switching
/// - `M: DecisionModel` — the decision implementation
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                  |
/// |-----------------|------------------------------------------|
/// | `.selector(s)`  | `SeededRandom::new(config.seed)`         |
/// | `.clock(c)`     | `config.make_clock()` (fixed step)       |
/// | `.console(c)`   | `TracingConsole`                         |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, network, KeepLane)
///     .selector(FirstEdge)
///     .build()?;
/// sim.add_agent(lane, 0.0, 14.0, Vehicle::default())?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: DecisionModel> {
    config:   SimConfig,
    network:  RoadNetwork,
    model:    M,
    selector: Option<Box<dyn EdgeSelector>>,
    clock:    Option<Box<dyn Clock>>,
    console:  Option<Box<dyn ConsoleSink>>,
}

impl<M: DecisionModel> SimBuilder<M> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, network: RoadNetwork, model: M) -> Self {
        Self {
            config,
            network,
            model,
            selector: None,
            clock:    None,
            console:  None,
        }
    }

    /// Edge selection policy at junctions.
    pub fn selector<S: EdgeSelector + 'static>(mut self, selector: S) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Time source.  Use [`ts_core::WallClock`] for real-time runs.
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Destination of command output.
    pub fn console<C: ConsoleSink + 'static>(mut self, console: C) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    /// Validate inputs, schedule every edge and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<M>> {
        let config = self.config;
        for (name, value) in [("step_secs", config.step_secs), ("time_factor", config.time_factor)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::Config(format!("{name} must be finite and >= 0, got {value}")));
            }
        }
        if self.network.lanes().iter().any(|l| !l.occupants().is_empty()) {
            return Err(SimError::Config(
                "network lanes already hold agents; add agents through the simulation".into(),
            ));
        }

        let mut layers = Layers::new();
        for edge in self.network.edges() {
            let object = SimObject::Edge(edge.id());
            layers.register(object.layer(), object);
        }

        info!(
            junctions = self.network.junction_count(),
            edges = self.network.edge_count(),
            lanes = self.network.lane_count(),
            seed = config.seed,
            think = config.think,
            "simulation built"
        );

        Ok(Sim {
            clock:    self.clock.unwrap_or_else(|| Box::new(config.make_clock())),
            selector: self.selector.unwrap_or_else(|| Box::new(SeededRandom::new(config.seed))),
            console:  self.console.unwrap_or_else(|| Box::new(TracingConsole)),
            config,
            network:  self.network,
            agents:   AgentStore::new(),
            layers,
            model:    self.model,
            rngs:     Vec::new(),
            commands: CommandQueue::new(),
        })
    }
}
