//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Ticket;
use crate::network::LineOverview;

/// A station in a line listing.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Station name
    pub name: String,

    /// Whether the station belongs to more than one line
    pub is_transfer: bool,
}

/// A line with its stations, in physical order.
#[derive(Debug, Serialize)]
pub struct LineResult {
    /// Line id (e.g. "Red")
    pub line_id: String,

    /// Display colour
    pub color: String,

    /// Stations in sequence along the line
    pub stations: Vec<StationResult>,
}

impl LineResult {
    pub fn from_overview(overview: &LineOverview) -> Self {
        LineResult {
            line_id: overview.line_id.as_str().to_string(),
            color: overview.color.clone(),
            stations: overview
                .stations
                .iter()
                .map(|s| StationResult {
                    name: s.name.as_str().to_string(),
                    is_transfer: s.is_transfer,
                })
                .collect(),
        }
    }
}

/// Response for the station listing.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Lines in id order
    pub lines: Vec<LineResult>,
}

/// Request for a route quote.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station name
    pub origin: String,

    /// Destination station name
    pub destination: String,
}

/// A route quote: the shortest path and what a ticket would cost.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Station names, origin to destination
    pub path: Vec<String>,

    /// Number of connections traversed
    pub hops: usize,

    /// Fare in minor currency units
    pub price: u32,
}

/// Request to purchase a ticket.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    /// Origin station name
    pub origin: String,

    /// Destination station name
    pub destination: String,

    /// Opaque owner tag (authentication is not this service's concern)
    pub owner: Option<String>,
}

/// Query parameters for the ticket listing.
#[derive(Debug, Deserialize)]
pub struct TicketListRequest {
    /// Restrict the listing to one owner
    pub owner: Option<String>,
}

/// A ticket in responses.
#[derive(Debug, Serialize)]
pub struct TicketResult {
    /// Unique ticket id
    pub ticket_id: String,

    /// Origin station name
    pub origin: String,

    /// Destination station name
    pub destination: String,

    /// Full station sequence
    pub path: Vec<String>,

    /// Number of connections traversed
    pub hops: usize,

    /// Fare in minor currency units
    pub price: u32,

    /// Issue timestamp, RFC 3339
    pub issued_at: String,

    /// Owner tag, if any
    pub owner: Option<String>,

    /// Step-by-step travel instructions
    pub instructions: Vec<String>,
}

impl TicketResult {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        TicketResult {
            ticket_id: ticket.id().as_str().to_string(),
            origin: ticket.origin().as_str().to_string(),
            destination: ticket.destination().as_str().to_string(),
            path: ticket.path().iter().map(|n| n.as_str().to_string()).collect(),
            hops: ticket.hops(),
            price: ticket.price(),
            issued_at: ticket.issued_at().to_rfc3339(),
            owner: ticket.owner().map(str::to_string),
            instructions: ticket.instructions().to_vec(),
        }
    }
}

/// Response for the ticket listing.
#[derive(Debug, Serialize)]
pub struct TicketListResponse {
    /// Tickets in purchase order
    pub tickets: Vec<TicketResult>,
}

/// Error body returned for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description
    pub error: String,
}
