//! `mu-routing` — incremental routing graph and bounded one-to-many search.
//!
//! Map-matching scores a candidate transition between two consecutive GPS
//! points by the along-network distance between their projections.  This
//! crate answers that question for one source and many destinations at once,
//! under a distance cap, over a graph whose inferred roads can be switched on
//! and off between map-inference rounds.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`graph`]      | `RoutingGraph` (edge arrays + lookups), `RoutingGraphBuilder` |
//! | [`search`]     | `shortest_paths`, `shortest_paths_batch`, `Route`, `Query` |
//! | [`activation`] | `activate_road`, `deactivate_road`                        |
//! | [`queue`]      | `MinQueue` decrease-key heap                              |
//! | [`config`]     | `RoutingConfig` noise tolerances                          |
//! | [`error`]      | `RoutingError`, `RoutingResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `shortest_paths_batch` runs queries on the rayon pool.    |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public value types.  |
//!
//! # Logging
//!
//! Diagnostics go through the `log` facade; install any logger to see them.

pub mod activation;
pub mod config;
pub mod error;
pub mod graph;
pub mod queue;
pub mod search;


pub use config::RoutingConfig;
pub use error::{RoutingError, RoutingResult};
pub use graph::{RoutingGraph, RoutingGraphBuilder};
pub use queue::MinQueue;
pub use search::{Query, Route};
