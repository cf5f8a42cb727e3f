//! `ts-spatial` — road graph, lane membership, geometry and edge selection.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`network`]  | `RoadNetwork`, `Junction`, `Edge`, `Lane`, `RoadNetworkBuilder` |
//! | [`polyline`] | `Polyline` — lengths and position queries                   |
//! | [`selector`] | `EdgeSelector` trait and built-in policies                  |
//! | [`router`]   | `shortest_route`, `Route`                                   |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |

pub mod error;
pub mod network;
pub mod polyline;
pub mod router;
pub mod selector;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use network::{Edge, Junction, Lane, RoadNetwork, RoadNetworkBuilder};
pub use polyline::Polyline;
pub use router::{shortest_route, Route};
pub use selector::{EdgeSelector, FirstEdge, HighestPriority, SeededRandom, TowardsJunction};
