//! `ts-behavior` — the decision-making seam.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`context`] | `DecisionContext<'a>` — read-only tick view                |
//! | [`model`]   | `DecisionModel` trait                                      |
//! | [`keep`]    | `KeepLane` — never changes lane                            |
//! | [`random`]  | `RandomLaneChange` — seeded random routed decisions        |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                       |
//!
//! # Design notes
//!
//! The tick loop in ts-sim runs decision making as its own phase:
//!
//! 1. **Think** (optionally parallel): every live agent's model is called
//!    with a shared `&DecisionContext` and the agent's own `AgentRng`.
//! 2. **Write back** (sequential): the decisions are stored on the agents.
//!
//! Models never see mutable state, so `Send + Sync` is all they need.

pub mod context;
pub mod error;
pub mod keep;
pub mod model;
pub mod random;


pub use context::DecisionContext;
pub use error::{BehaviorError, BehaviorResult};
pub use keep::KeepLane;
pub use model::DecisionModel;
pub use random::RandomLaneChange;
