//! Metro network routing and ticketing server.
//!
//! Models a transit network of stations, lines and connections, answers
//! shortest-route queries over the connection graph, and sells tickets
//! whose fares and travel instructions are derived from the computed path.

pub mod domain;
pub mod network;
pub mod store;
pub mod web;
