//! Web layer for the metro ticketing service.
//!
//! Provides HTTP endpoints for listing stations, quoting routes, and
//! purchasing tickets. Authentication is out of scope: the optional owner
//! tag on purchases is an opaque string supplied by the caller.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
