//! The `Sim` struct and its tick loop.

use tracing::{debug, warn};

use ts_behavior::{DecisionContext, DecisionModel};
use ts_core::{AgentId, AgentRng, Clock, Decision, LaneId, SimConfig, Tick};
use ts_mobility::{advance, switch_lanes, AgentStore, Vehicle};
use ts_schedule::Layers;
use ts_spatial::{EdgeSelector, RoadNetwork};

use crate::{
    CommandQueue, CommandSender, ConsoleSink, Element, ElementKind, SimError, SimObject, SimObserver,
    SimResult, AGENT_LAYER,
};

// ── TickReport ────────────────────────────────────────────────────────────────

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// The tick that was computed (ticks completed before it).
    pub tick:     Tick,
    /// Simulated seconds, after the time factor.
    pub elapsed:  f64,
    /// Commands executed.
    pub commands: usize,
    /// Agents that made a decision.
    pub thought:  usize,
    /// Agents moved onto another lane by lane switching.
    pub switched: usize,
    /// Agents advanced successfully.
    pub moved:    usize,
    /// Agents whose motion failed.
    pub failed:   usize,
    /// Agents taken out at the end of the tick.
    pub removed:  usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation driver.
///
/// `Sim<M>` owns the road network, the agents and the layered schedule, and
/// runs one tick per [`tick`](Self::tick) call:
///
/// 1. **Clock**: `elapsed = clock.advance() * time_factor`.
/// 2. **Commands**: execute the commands queued at this moment, in FIFO
///    order, against every live element of their target kind.
/// 3. **Think** (if `config.think`): ask the [`DecisionModel`] for a
///    decision per agent (optionally parallel with the `parallel` feature).
/// 4. **Simulate**: walk the layers in ascending order and run each object
///    in registration order.  Edges switch lanes, agents move.
/// 5. **Cleanup**: remove agents marked for removal.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: DecisionModel> {
    /// Global configuration (seed, time factor, thinking, run length).
    pub config: SimConfig,

    pub(crate) clock:    Box<dyn Clock>,
    pub(crate) network:  RoadNetwork,
    pub(crate) agents:   AgentStore,
    pub(crate) layers:   Layers<SimObject>,
    pub(crate) model:    M,
    pub(crate) selector: Box<dyn EdgeSelector>,
    /// Per-agent RNGs indexed by `AgentId`; grown as agents are added.
    pub(crate) rngs:     Vec<AgentRng>,
    pub(crate) commands: CommandQueue,
    pub(crate) console:  Box<dyn ConsoleSink>,
}

impl<M: DecisionModel> Sim<M> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn layers(&self) -> &Layers<SimObject> {
        &self.layers
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Ticks completed so far.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    /// A handle for enqueueing commands, usable from any thread.
    pub fn commands(&self) -> CommandSender {
        self.commands.sender()
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Place a new agent on `lane` and schedule it for motion.
    pub fn add_agent(&mut self, lane: LaneId, position: f64, velocity: f64, vehicle: Vehicle) -> SimResult<AgentId> {
        let id = self.agents.place(&mut self.network, lane, position, velocity, vehicle)?;
        let object = SimObject::Agent(id);
        self.layers.register(object.layer(), object);
        Ok(id)
    }

    /// Flag `agent` for removal at the end of the next tick.  Returns
    /// whether the agent exists.
    pub fn mark_for_removal(&mut self, agent: AgentId) -> bool {
        match self.agents.get_mut(agent) {
            Some(a) => {
                a.mark_for_removal();
                true
            }
            None => false,
        }
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run `config.total_ticks` ticks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.run_ticks(self.config.total_ticks, observer)?;
        observer.on_sim_end(self.clock.current_tick());
        Ok(())
    }

    /// Run exactly `n` ticks.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// Run one tick.
    ///
    /// Per-agent motion failures do not fail the tick: they are logged,
    /// reported to `observer` and the agent is removed at the end of the
    /// tick.  Errors returned here are programming errors.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickReport> {
        let now = self.clock.current_tick();
        let step = self.clock.advance();
        if !step.is_finite() || step < 0.0 {
            return Err(SimError::BadClockStep(step));
        }
        let elapsed = step * self.config.time_factor;
        observer.on_tick_start(now, elapsed);

        let mut report = TickReport { tick: now, elapsed, ..TickReport::default() };

        // ── Phase 1: commands ─────────────────────────────────────────────
        report.commands = self.drain_commands();

        // ── Phase 2: think ────────────────────────────────────────────────
        if self.config.think {
            report.thought = self.think(now, elapsed);
        }

        // ── Phase 3: layered simulate ─────────────────────────────────────
        let layers: Vec<i32> = self.layers.layers().collect();
        for layer in layers {
            // Copy the ids out: removals only happen after the loop.
            let objects = self.layers.items(layer)?.to_vec();
            for object in objects {
                self.simulate(object, now, elapsed, observer, &mut report)?;
            }
        }

        // ── Phase 4: remove agents marked for removal ─────────────────────
        report.removed = self.remove_candidates(now, observer)?;

        debug!(
            tick = %now,
            elapsed,
            commands = report.commands,
            switched = report.switched,
            moved = report.moved,
            failed = report.failed,
            removed = report.removed,
            "tick complete"
        );
        observer.on_tick_end(&report, &self.network, &self.agents);
        Ok(report)
    }

    // ── Phases ────────────────────────────────────────────────────────────

    fn drain_commands(&mut self) -> usize {
        let batch = self.commands.snapshot();
        let count = batch.len();
        for mut command in batch {
            let kind = command.target();
            let mut applied = 0usize;
            match kind {
                ElementKind::Junction => {
                    for j in self.network.junctions() {
                        self.console.write(&command.execute(Element::Junction(j)));
                        applied += 1;
                    }
                }
                ElementKind::Edge => {
                    for e in self.network.edges() {
                        self.console.write(&command.execute(Element::Edge(e)));
                        applied += 1;
                    }
                }
                ElementKind::Lane => {
                    for l in self.network.lanes() {
                        self.console.write(&command.execute(Element::Lane(l)));
                        applied += 1;
                    }
                }
                ElementKind::Agent => {
                    for a in self.agents.iter_mut() {
                        self.console.write(&command.execute(Element::Agent(a)));
                        applied += 1;
                    }
                }
            }
            debug!(target_kind = %kind, applied, "command executed");
        }
        count
    }

    /// Returns the number of agents that decided.
    fn think(&mut self, now: Tick, elapsed: f64) -> usize {
        let seed = self.config.seed;
        while self.rngs.len() < self.agents.slot_count() {
            let id = AgentId(self.rngs.len() as u32);
            self.rngs.push(AgentRng::new(seed, id));
        }

        // Explicit field borrows so the borrow checker sees disjoint access.
        let agents = &self.agents;
        let model  = &self.model;
        let rngs   = &mut self.rngs;
        let ctx    = DecisionContext::new(now, elapsed, &self.network, agents);

        #[cfg(not(feature = "parallel"))]
        let decisions: Vec<(AgentId, Decision)> = rngs
            .iter_mut()
            .enumerate()
            .filter_map(|(i, rng)| {
                let agent = agents.get(AgentId(i as u32))?;
                Some((agent.id(), model.think(agent, &ctx, rng)))
            })
            .collect();

        #[cfg(feature = "parallel")]
        let decisions: Vec<(AgentId, Decision)> = {
            use rayon::prelude::*;

            rngs.par_iter_mut()
                .enumerate()
                .filter_map(|(i, rng)| {
                    let agent = agents.get(AgentId(i as u32))?;
                    Some((agent.id(), model.think(agent, &ctx, rng)))
                })
                .collect()
        };

        let count = decisions.len();
        for (id, decision) in decisions {
            if let Some(agent) = self.agents.get_mut(id) {
                agent.set_decision(decision);
            }
        }
        count
    }

    fn simulate<O: SimObserver>(
        &mut self,
        object:   SimObject,
        now:      Tick,
        elapsed:  f64,
        observer: &mut O,
        report:   &mut TickReport,
    ) -> SimResult<()> {
        match object {
            SimObject::Edge(edge) => {
                report.switched += switch_lanes(&mut self.network, &mut self.agents, edge)?;
            }
            SimObject::Agent(agent) => {
                if !self.agents.contains(agent) {
                    return Ok(());
                }
                match advance(&mut self.network, &mut self.agents, &mut *self.selector, agent, elapsed) {
                    Ok(()) => report.moved += 1,
                    Err(err) => {
                        warn!(tick = %now, agent = %agent, error = %err, "agent could not move");
                        observer.on_agent_failed(now, agent, &err);
                        if let Some(a) = self.agents.get_mut(agent) {
                            a.mark_for_removal();
                        }
                        report.failed += 1;
                    }
                }
            }
        }
        Ok(())
    }

    fn remove_candidates<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<usize> {
        // Sorted, because the store lists ids in order.
        let doomed = self.agents.removal_candidates();
        if doomed.is_empty() {
            return Ok(0);
        }
        self.layers.remove_where(AGENT_LAYER, |object| match object {
            SimObject::Agent(id) => doomed.binary_search(id).is_ok(),
            SimObject::Edge(_) => false,
        });
        for &id in &doomed {
            let agent = self.agents.remove(&mut self.network, id)?;
            debug!(tick = %now, agent = %id, "agent removed");
            observer.on_agent_removed(now, &agent);
        }
        Ok(doomed.len())
    }
}
