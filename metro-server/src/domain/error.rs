//! Domain error types.
//!
//! These errors represent lookup and routing failures in the domain layer.
//! They are distinct from persistence/IO errors, which live in the store.

use super::StationName;

/// Domain-level errors for graph queries and ticketing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A station name is not present in the network registry.
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// BFS exhausted the reachable graph without finding the destination.
    #[error("no route from {origin} to {destination}")]
    NoRoute {
        origin: StationName,
        destination: StationName,
    },

    /// A ticket was requested over an empty path.
    #[error("ticket path must contain at least one station")]
    EmptyPath,
}
