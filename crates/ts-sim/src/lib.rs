//! `ts-sim` — the tick driver for the rust_ts traffic simulator.
//!
//! # Tick loop
//!
//! ```text
//! per tick:
//!   ① Clock     — elapsed = clock.advance() * time_factor
//!   ② Commands  — execute the commands queued right now (snapshot, FIFO);
//!                 each runs once per live element of its target kind and
//!                 its output goes to the console
//!   ③ Think     — DecisionModel::think per agent, if config.think
//!                 (parallel with the `parallel` feature)
//!   ④ Simulate  — layers ascending, objects in registration order:
//!                   EDGE_LAYER  (1)  lane switching per edge
//!                   AGENT_LAYER (3)  motion per agent
//!   ⑤ Cleanup   — agents marked for removal leave lane, layer and store
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the think phase on Rayon's thread pool.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_behavior::KeepLane;
//! use ts_core::SimConfig;
//! use ts_mobility::Vehicle;
//! use ts_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), network, KeepLane).build()?;
//! sim.add_agent(lane, 0.0, 14.0, Vehicle::default())?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod command;
pub mod console;
pub mod error;
pub mod object;
pub mod observer;
pub mod queue;
pub mod sim;


pub use builder::SimBuilder;
pub use command::{Command, Describe, Element, ElementKind, SetVelocity};
pub use console::{BufferConsole, ConsoleSink, TracingConsole};
pub use error::{SimError, SimResult};
pub use object::{SimObject, AGENT_LAYER, EDGE_LAYER};
pub use observer::{NoopObserver, SimObserver};
pub use queue::{CommandQueue, CommandSender};
pub use sim::{Sim, TickReport};
