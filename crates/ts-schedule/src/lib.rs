//! `ts-schedule` — execution order of simulatable objects within a tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`layers`]   | `Layers<T>` (`BTreeMap<i32, Vec<T>>`)                     |
//! | [`error`]    | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Ordering model (summary)
//!
//! Every simulatable object declares an integer layer.  One tick runs:
//!
//! ```text
//! for layer in layers.layers()          // ascending, no duplicates
//!     for object in layers.items(layer) // registration order
//!         object.simulate(elapsed)
//! ```
//!
//! Lower layers finish completely before higher layers start.

pub mod error;
pub mod layers;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use layers::Layers;
