//! `ts-mobility` — agents and how they move through the road graph.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`vehicle`]     | `Vehicle` — acceleration and velocity bounds             |
//! | [`agent`]       | `Agent` — lane, validated position and velocity, decision |
//! | [`store`]       | `AgentStore` — slots + the single relocation function    |
//! | [`motion`]      | `advance`, `LaneChain` — constant-velocity motion         |
//! | [`lane_switch`] | `switch_lanes` — decision-driven lane changes per edge   |
//! | [`error`]       | `MobilityError`, `MobilityResult<T>`                     |
//!
//! # Membership rule
//!
//! A lane records which agents occupy it; an agent records only the id of its
//! lane.  [`AgentStore::relocate`] is the only code that changes an agent's
//! lane and it updates both sides, so an agent is always an occupant of
//! exactly the lane it names.

pub mod agent;
pub mod error;
pub mod lane_switch;
pub mod motion;
pub mod store;
pub mod vehicle;


pub use agent::Agent;
pub use error::{MobilityError, MobilityResult};
pub use lane_switch::switch_lanes;
pub use motion::{advance, LaneChain};
pub use store::AgentStore;
pub use vehicle::Vehicle;
