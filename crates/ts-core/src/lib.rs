//! `ts-core` — foundational types for the `rust_ts` traffic simulator.
//!
//! This crate is a dependency of every other `ts-*` crate.  It intentionally
//! has no `ts-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `JunctionId`, `EdgeId`, `LaneId`              |
//! | [`geo`]      | `Point2`                                                 |
//! | [`decision`] | `Decision` — opaque lane-routing key                     |
//! | [`time`]     | `Tick`, `Clock`, `FixedStepClock`, `WallClock`, `SimConfig` |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (global)                |
//! | [`follow`]   | distance following over a `SegmentChain`                 |
//! | [`error`]    | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod decision;
pub mod error;
pub mod follow;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use decision::Decision;
pub use error::{CoreError, CoreResult};
pub use follow::{follow, Followed, SegmentChain, SliceChain};
pub use geo::Point2;
pub use ids::{AgentId, EdgeId, JunctionId, LaneId};
pub use rng::{AgentRng, SimRng};
pub use time::{Clock, FixedStepClock, SimConfig, Tick, WallClock};
