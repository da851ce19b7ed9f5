//! The network graph and shortest-path routing.
//!
//! [`MetroNetwork`] owns all station and line records, the undirected
//! connection graph, and the ticket log; `bfs` adds shortest-path search
//! over the connections.

mod bfs;
mod graph;
pub mod seed;

pub use graph::{LineOverview, MetroNetwork, StationEntry};
