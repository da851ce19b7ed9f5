//! Domain types for the metro network.
//!
//! This module contains the core domain model: validated identifiers,
//! station and line records, fares, and tickets. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod error;
mod fare;
mod line;
mod station;
mod ticket;

pub use error::DomainError;
pub use fare::FareSchedule;
pub use line::{InvalidLineId, Line, LineId};
pub use station::{InvalidStationName, Station, StationId, StationName};
pub use ticket::{InvalidTicketId, Stop, Ticket, TicketId};
