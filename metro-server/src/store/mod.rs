//! Persistence boundary: typed records and JSON snapshot round-trip.
//!
//! The core never reads or writes files itself; this module is the
//! collaborator that serializes the network's read-only iteration and
//! rebuilds a network from validated records.

mod json;
mod records;

pub use json::{load, save};
pub use records::{
    ConnectionRecord, LineRecord, NetworkSnapshot, StationRecord, TicketRecord,
};

/// Errors surfaced at the persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record violates the schema (invalid name, duplicate entry, or a
    /// reference to a station that does not exist).
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Reading or writing the snapshot file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The snapshot file is not valid JSON for the schema.
    #[error("invalid snapshot: {0}")]
    Serde(#[from] serde_json::Error),
}
