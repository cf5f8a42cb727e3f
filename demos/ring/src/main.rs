//! ring — a small traffic run on a circular road.
//!
//! Usage: `ring [config.json]`.  The optional file holds a `SimConfig`;
//! missing fields take their defaults.  Set `RUST_LOG=ts_sim=debug` to see
//! per-tick summaries.

mod network;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ts_behavior::RandomLaneChange;
use ts_core::{AgentId, SimConfig, Tick};
use ts_mobility::{Agent, AgentStore, MobilityError, Vehicle};
use ts_sim::{Describe, ElementKind, SimBuilder, SimObserver, TickReport};
use ts_spatial::{HighestPriority, RoadNetwork};

use network::build_ring;

// ── Constants ─────────────────────────────────────────────────────────────────

const JUNCTIONS:       usize = 8;
const RADIUS_M:        f64   = 250.0;
const AGENTS_PER_EDGE: usize = 3;
const LANE_CHANGE_P:   f64   = 0.1;
const PRINT_EVERY:     u64   = 10;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints a position table every `PRINT_EVERY` ticks and totals at the end.
#[derive(Default)]
struct RingObserver {
    switched: usize,
    failed:   usize,
    removed:  usize,
}

impl SimObserver for RingObserver {
    fn on_agent_failed(&mut self, tick: Tick, agent: AgentId, error: &MobilityError) {
        eprintln!("tick {tick}: {agent} failed: {error}");
    }

    fn on_agent_removed(&mut self, _tick: Tick, _agent: &Agent) {
        self.removed += 1;
    }

    fn on_tick_end(&mut self, report: &TickReport, network: &RoadNetwork, agents: &AgentStore) {
        self.switched += report.switched;
        self.failed += report.failed;
        if report.tick.0 % PRINT_EVERY != 0 {
            return;
        }

        println!("tick {:<5} ({} agents)", report.tick.0, agents.len());
        println!("  {:<10} {:<10} {:>7} {:>9} {:>9} {:>8}", "Agent", "Lane", "Pos", "x", "y", "Heading");
        for agent in agents.iter() {
            let Ok((point, heading)) = network.lane_point(agent.lane(), agent.position()) else {
                continue;
            };
            println!(
                "  {:<10} {:<10} {:>7.3} {:>9.1} {:>9.1} {:>8.2}",
                agent.id().to_string(),
                agent.lane().to_string(),
                agent.position(),
                point.x,
                point.y,
                heading.to_degrees(),
            );
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    println!("=== ring — rust_ts traffic simulator ===");
    println!(
        "Junctions: {JUNCTIONS}  |  Ticks: {}  |  Step: {} s x {}  |  Seed: {}",
        config.total_ticks, config.step_secs, config.time_factor, config.seed
    );
    println!();

    // 1. Road network.
    let (network, _junctions, entry_lanes) = build_ring(JUNCTIONS, RADIUS_M)?;
    info!(
        junctions = network.junction_count(),
        edges = network.edge_count(),
        lanes = network.lane_count(),
        "ring built"
    );

    // 2. Sim.  Every junction has one way out, so HighestPriority always sees
    //    a single candidate; it only chooses once shortcuts are added.
    let model = RandomLaneChange::new(LANE_CHANGE_P)?;
    let mut sim = SimBuilder::new(config, network, model).selector(HighestPriority).build()?;

    // 3. Agents, spread along the inner lanes at mixed speeds.
    let vehicle = Vehicle::default();
    for (i, &lane) in entry_lanes.iter().enumerate() {
        for k in 0..AGENTS_PER_EDGE {
            let position = k as f64 / AGENTS_PER_EDGE as f64;
            let velocity = 10.0 + ((i * AGENTS_PER_EDGE + k) % 7) as f64 * 2.5;
            sim.add_agent(lane, position, velocity, vehicle)?;
        }
    }

    // 4. Commands go through the console on the first tick.
    let commands = sim.commands();
    commands.send(Describe(ElementKind::Edge))?;

    // 5. Run.
    let mut observer = RingObserver::default();
    let t0 = Instant::now();
    sim.run(&mut observer)?;
    let elapsed = t0.elapsed();

    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  lane switches : {}", observer.switched);
    println!("  failed agents : {}", observer.failed);
    println!("  removed       : {}", observer.removed);
    println!("  agents left   : {}", sim.agents().len());

    Ok(())
}
