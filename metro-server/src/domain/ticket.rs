//! Tickets and travel-instruction derivation.
//!
//! A ticket is a derived artifact of a computed path: its fare and its
//! step-by-step instructions are pure functions of the path and the line
//! memberships of the stations along it. Once issued a ticket never changes.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{DomainError, LineId, StationName};

/// Error returned when parsing an invalid ticket id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ticket id: {reason}")]
pub struct InvalidTicketId {
    reason: &'static str,
}

/// A ticket identifier: 8 lowercase hex characters.
///
/// Freshly issued tickets take the first 8 characters of a v4 UUID, which is
/// what the ticket log has historically stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketId(String);

impl TicketId {
    /// Generate a fresh ticket id.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        TicketId(uuid[..8].to_string())
    }

    /// Parse a ticket id from a string (used when reloading persisted tickets).
    pub fn parse(s: &str) -> Result<Self, InvalidTicketId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidTicketId {
                reason: "must not be empty",
            });
        }
        Ok(TicketId(trimmed.to_string()))
    }

    /// Returns the ticket id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One station along a path, with its line memberships.
///
/// The network resolves station ids into stops before handing a path to the
/// ticket layer, so instruction derivation needs no access to the graph.
#[derive(Debug, Clone)]
pub struct Stop {
    pub name: StationName,
    pub lines: BTreeSet<LineId>,
}

/// A purchased ticket: route, fare, and derived travel instructions.
#[derive(Debug, Clone)]
pub struct Ticket {
    id: TicketId,
    origin: StationName,
    destination: StationName,
    path: Vec<StationName>,
    price: u32,
    issued_at: DateTime<Utc>,
    owner: Option<String>,
    instructions: Vec<String>,
}

impl Ticket {
    /// Issue a fresh ticket over a computed path.
    ///
    /// Fails with [`DomainError::EmptyPath`] if `stops` is empty.
    pub fn issue(stops: &[Stop], price: u32, owner: Option<String>) -> Result<Self, DomainError> {
        Self::with_id(TicketId::generate(), stops, price, Utc::now(), owner)
    }

    /// Rebuild a ticket with a known id and timestamp.
    ///
    /// Used when reloading the persisted ticket log; instructions are
    /// re-derived rather than stored.
    pub fn with_id(
        id: TicketId,
        stops: &[Stop],
        price: u32,
        issued_at: DateTime<Utc>,
        owner: Option<String>,
    ) -> Result<Self, DomainError> {
        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return Err(DomainError::EmptyPath);
        };

        Ok(Ticket {
            id,
            origin: first.name.clone(),
            destination: last.name.clone(),
            path: stops.iter().map(|s| s.name.clone()).collect(),
            price,
            issued_at,
            owner,
            instructions: derive_instructions(stops),
        })
    }

    /// The ticket's unique id.
    pub fn id(&self) -> &TicketId {
        &self.id
    }

    /// Where the journey starts.
    pub fn origin(&self) -> &StationName {
        &self.origin
    }

    /// Where the journey ends.
    pub fn destination(&self) -> &StationName {
        &self.destination
    }

    /// The full station sequence, origin to destination.
    pub fn path(&self) -> &[StationName] {
        &self.path
    }

    /// Number of connections traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Fare in minor currency units.
    pub fn price(&self) -> u32 {
        self.price
    }

    /// When the ticket was issued.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Opaque owner tag, if the purchase was made by an identified user.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Human-readable travel instructions, one step per entry.
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }
}

/// Derive travel instructions for a path.
///
/// The "current line" starts as the lexicographically smallest line id of the
/// first station and is updated as the path is walked. At each step, if the
/// two stations share a line, travel silently continues on the smallest
/// shared id; otherwise a transfer instruction is emitted, naming the target
/// line when it is unambiguous. Smallest-id selection makes the output
/// deterministic regardless of how line memberships were accumulated.
fn derive_instructions(stops: &[Stop]) -> Vec<String> {
    let Some(first) = stops.first() else {
        return Vec::new();
    };

    let mut instructions = vec![format!("Start at {}", first.name)];
    let mut current_line: Option<&LineId> = first.lines.iter().next();

    for i in 1..stops.len() {
        let prev = &stops[i - 1];
        let stop = &stops[i];

        // BTreeSet intersection iterates in ascending order, so `next()` is
        // the smallest shared line id.
        if let Some(shared) = prev.lines.intersection(&stop.lines).next() {
            current_line = Some(shared);
        } else {
            let mut lines = stop.lines.iter();
            match (lines.next(), lines.next()) {
                // Exactly one line: name it, unless we are already on it.
                (Some(new_line), None) => {
                    if current_line != Some(new_line) {
                        instructions
                            .push(format!("At {}, transfer to {} line", prev.name, new_line));
                        current_line = Some(new_line);
                    }
                }
                // Empty or ambiguous line set: the rider must change, but
                // we cannot name the target line.
                _ => instructions.push(format!("At {}, change lines", prev.name)),
            }
        }

        if i == stops.len() - 1 {
            instructions.push(format!("Arrive at {}", stop.name));
        } else {
            instructions.push(format!("Go to {}", stop.name));
        }
    }

    instructions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(name: &str, lines: &[&str]) -> Stop {
        Stop {
            name: StationName::parse(name).unwrap(),
            lines: lines.iter().map(|l| LineId::parse(l).unwrap()).collect(),
        }
    }

    #[test]
    fn generated_ids_are_8_hex_chars() {
        let id = TicketId::generate();
        assert_eq!(id.as_str().len(), 8);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(TicketId::generate(), TicketId::generate());
    }

    #[test]
    fn parse_rejects_empty_id() {
        assert!(TicketId::parse("").is_err());
        assert!(TicketId::parse("  ").is_err());
        assert!(TicketId::parse("a1b2c3d4").is_ok());
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = Ticket::issue(&[], 200, None).unwrap_err();
        assert!(matches!(err, DomainError::EmptyPath));
    }

    #[test]
    fn single_station_ticket() {
        let ticket = Ticket::issue(&[stop("Central", &["Red"])], 200, None).unwrap();
        assert_eq!(ticket.origin().as_str(), "Central");
        assert_eq!(ticket.destination().as_str(), "Central");
        assert_eq!(ticket.hops(), 0);
        assert_eq!(ticket.instructions(), &["Start at Central".to_string()]);
    }

    #[test]
    fn same_line_journey_has_no_transfers() {
        let stops = [
            stop("A", &["L1"]),
            stop("B", &["L1"]),
            stop("C", &["L1"]),
        ];
        let ticket = Ticket::issue(&stops, 20, None).unwrap();

        assert_eq!(
            ticket.instructions(),
            &[
                "Start at A".to_string(),
                "Go to B".to_string(),
                "Arrive at C".to_string(),
            ]
        );
    }

    #[test]
    fn shared_line_dominates_through_transfer_hub() {
        // B is a transfer station, but every step shares a line with the
        // previous station, so no transfer instruction is ever emitted.
        let stops = [
            stop("A", &["L1"]),
            stop("B", &["L1", "L2"]),
            stop("C", &["L2"]),
        ];
        let ticket = Ticket::issue(&stops, 20, None).unwrap();

        assert_eq!(
            ticket.instructions(),
            &[
                "Start at A".to_string(),
                "Go to B".to_string(),
                "Arrive at C".to_string(),
            ]
        );
    }

    #[test]
    fn transfer_to_named_line() {
        // A and B share no line; B is on exactly one line, so the transfer
        // names it.
        let stops = [stop("A", &["L1"]), stop("B", &["L2"]), stop("C", &["L2"])];
        let ticket = Ticket::issue(&stops, 20, None).unwrap();

        assert_eq!(
            ticket.instructions(),
            &[
                "Start at A".to_string(),
                "At A, transfer to L2 line".to_string(),
                "Go to B".to_string(),
                "Arrive at C".to_string(),
            ]
        );
    }

    #[test]
    fn ambiguous_transfer_says_change_lines() {
        // A and B share no line and B belongs to two lines: the target line
        // is ambiguous.
        let stops = [stop("A", &["L1"]), stop("B", &["L2", "L3"])];
        let ticket = Ticket::issue(&stops, 15, None).unwrap();

        assert_eq!(
            ticket.instructions(),
            &[
                "Start at A".to_string(),
                "At A, change lines".to_string(),
                "Arrive at B".to_string(),
            ]
        );
    }

    #[test]
    fn current_line_choice_is_deterministic() {
        // The first station is on two lines; the smallest id ("Azure") must
        // be chosen, so stepping onto a "Zinc"-only station is a transfer.
        let stops = [stop("A", &["Zinc", "Azure"]), stop("B", &["Zinc"])];
        let ticket = Ticket::issue(&stops, 15, None).unwrap();

        // A and B share Zinc, so the shared-line branch wins and no transfer
        // is emitted; the current line silently becomes Zinc.
        assert_eq!(
            ticket.instructions(),
            &["Start at A".to_string(), "Arrive at B".to_string()]
        );

        // Without a shared line the deterministic start matters.
        let stops = [stop("A", &["Zinc", "Azure"]), stop("B", &["Brass"])];
        let ticket = Ticket::issue(&stops, 15, None).unwrap();
        assert_eq!(
            ticket.instructions(),
            &[
                "Start at A".to_string(),
                "At A, transfer to Brass line".to_string(),
                "Arrive at B".to_string(),
            ]
        );
    }

    #[test]
    fn owner_is_preserved() {
        let ticket =
            Ticket::issue(&[stop("A", &["L1"])], 200, Some("alice".to_string())).unwrap();
        assert_eq!(ticket.owner(), Some("alice"));
    }

    #[test]
    fn with_id_keeps_the_given_id() {
        let id = TicketId::parse("deadbeef").unwrap();
        let issued = Utc::now();
        let ticket =
            Ticket::with_id(id.clone(), &[stop("A", &["L1"])], 200, issued, None).unwrap();

        assert_eq!(ticket.id(), &id);
        assert_eq!(ticket.issued_at(), issued);
    }
}
