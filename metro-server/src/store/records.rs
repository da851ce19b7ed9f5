//! Typed persistence records and snapshot conversion.
//!
//! The store speaks plain strings; everything is schema-validated on the way
//! back in, so malformed input is caught at this boundary and never reaches
//! the core as a half-built graph.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{FareSchedule, LineId, StationName, Ticket, TicketId};
use crate::network::MetroNetwork;

use super::StoreError;

/// A station row: name plus the ids of the lines it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub lines: Vec<String>,
}

/// A line row: id, colour, and the ordered station sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub line_id: String,
    pub color: String,
    pub stations: Vec<String>,
}

/// One undirected edge, canonicalized with the lexicographically smaller
/// name first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub station1: String,
    pub station2: String,
}

/// A persisted ticket. Instructions are not stored; they are re-derived
/// from the path and line memberships on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub ticket_id: String,
    pub origin: String,
    pub destination: String,
    pub path: Vec<String>,
    pub price: u32,
    pub issued_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// The complete persisted state of a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub stations: Vec<StationRecord>,
    pub lines: Vec<LineRecord>,
    pub connections: Vec<ConnectionRecord>,
    pub tickets: Vec<TicketRecord>,
}

impl NetworkSnapshot {
    /// Capture the network's state as records.
    ///
    /// Stations appear in arena order, lines in id order, connections as
    /// sorted canonical pairs, tickets in purchase order.
    pub fn capture(network: &MetroNetwork) -> Self {
        let stations = network
            .stations()
            .map(|(_, station)| StationRecord {
                name: station.name().as_str().to_string(),
                lines: station.lines().iter().map(|l| l.as_str().to_string()).collect(),
            })
            .collect();

        let lines = network
            .lines()
            .map(|line| LineRecord {
                line_id: line.id().as_str().to_string(),
                color: line.color().to_string(),
                stations: line
                    .stations()
                    .iter()
                    .map(|&id| network.station(id).name().as_str().to_string())
                    .collect(),
            })
            .collect();

        let connections = network
            .connection_pairs()
            .into_iter()
            .map(|(a, b)| ConnectionRecord {
                station1: a.as_str().to_string(),
                station2: b.as_str().to_string(),
            })
            .collect();

        let tickets = network.tickets().iter().map(ticket_record).collect();

        NetworkSnapshot {
            stations,
            lines,
            connections,
            tickets,
        }
    }

    /// Rebuild a network from records.
    ///
    /// Load order is stations → lines → connections → tickets: lines depend
    /// on stations existing, connections on both, tickets on the full graph
    /// (for instruction re-derivation). Any schema violation fails with
    /// [`StoreError::MalformedRecord`] and no partially loaded network is
    /// returned.
    pub fn restore(&self, fares: FareSchedule) -> Result<MetroNetwork, StoreError> {
        let mut network = MetroNetwork::new(fares);

        let mut seen_stations = HashSet::new();
        for record in &self.stations {
            let name = parse_station_name(&record.name)?;
            if !seen_stations.insert(name.clone()) {
                return Err(StoreError::MalformedRecord(format!(
                    "duplicate station record: {}",
                    record.name
                )));
            }
            let lines = record
                .lines
                .iter()
                .map(|l| parse_line_id(l))
                .collect::<Result<Vec<_>, _>>()?;
            network.add_station(name, lines);
        }

        let mut seen_lines = HashSet::new();
        for record in &self.lines {
            let id = parse_line_id(&record.line_id)?;
            if !seen_lines.insert(id.clone()) {
                return Err(StoreError::MalformedRecord(format!(
                    "duplicate line record: {}",
                    record.line_id
                )));
            }

            let mut names = Vec::new();
            let mut seen_names = HashSet::new();
            for raw in &record.stations {
                let name = parse_station_name(raw)?;
                if network.lookup(name.as_str()).is_err() {
                    return Err(StoreError::MalformedRecord(format!(
                        "line {} references unknown station {}",
                        record.line_id, raw
                    )));
                }
                if !seen_names.insert(name.clone()) {
                    return Err(StoreError::MalformedRecord(format!(
                        "line {} lists station {} twice",
                        record.line_id, raw
                    )));
                }
                names.push(name);
            }
            network.add_line(id, record.color.clone(), names);
        }

        for record in &self.connections {
            network
                .connect(&record.station1, &record.station2)
                .map_err(|e| StoreError::MalformedRecord(e.to_string()))?;
        }

        for record in &self.tickets {
            let ticket = restore_ticket(&network, record)?;
            network.restore_ticket(ticket);
        }

        Ok(network)
    }
}

fn ticket_record(ticket: &Ticket) -> TicketRecord {
    TicketRecord {
        ticket_id: ticket.id().as_str().to_string(),
        origin: ticket.origin().as_str().to_string(),
        destination: ticket.destination().as_str().to_string(),
        path: ticket.path().iter().map(|n| n.as_str().to_string()).collect(),
        price: ticket.price(),
        issued_at: ticket.issued_at(),
        owner: ticket.owner().map(str::to_string),
    }
}

fn restore_ticket(network: &MetroNetwork, record: &TicketRecord) -> Result<Ticket, StoreError> {
    let id = TicketId::parse(&record.ticket_id)
        .map_err(|e| StoreError::MalformedRecord(e.to_string()))?;

    let mut path = Vec::new();
    for raw in &record.path {
        let station_id = network.lookup(raw).map_err(|_| {
            StoreError::MalformedRecord(format!(
                "ticket {} references unknown station {}",
                record.ticket_id, raw
            ))
        })?;
        path.push(station_id);
    }
    let stops = network.path_stops(&path);

    Ticket::with_id(id, &stops, record.price, record.issued_at, record.owner.clone()).map_err(
        |_| {
            StoreError::MalformedRecord(format!("ticket {} has an empty path", record.ticket_id))
        },
    )
}

fn parse_station_name(raw: &str) -> Result<StationName, StoreError> {
    StationName::parse(raw).map_err(|e| StoreError::MalformedRecord(e.to_string()))
}

fn parse_line_id(raw: &str) -> Result<LineId, StoreError> {
    LineId::parse(raw).map_err(|e| StoreError::MalformedRecord(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::seed::sample_network;

    #[test]
    fn roundtrip_reproduces_snapshot() {
        let mut network = sample_network();
        network
            .purchase_ticket("Central", "Port", Some("alice".to_string()))
            .unwrap();
        network.purchase_ticket("Airport", "Stadium", None).unwrap();

        let snapshot = NetworkSnapshot::capture(&network);
        let restored = snapshot.restore(*network.fares()).unwrap();
        let recaptured = NetworkSnapshot::capture(&restored);

        assert_eq!(snapshot, recaptured);
    }

    #[test]
    fn roundtrip_preserves_graph_shape() {
        let network = sample_network();
        let snapshot = NetworkSnapshot::capture(&network);
        let restored = snapshot.restore(*network.fares()).unwrap();

        assert_eq!(restored.station_count(), network.station_count());
        assert_eq!(restored.lines().count(), network.lines().count());
        assert_eq!(restored.connection_pairs(), network.connection_pairs());

        // Transfer classification survives the round trip.
        for station in ["Park", "Museum"] {
            let id = restored.lookup(station).unwrap();
            assert!(restored.station(id).is_transfer());
        }
    }

    #[test]
    fn restored_tickets_regain_instructions() {
        let mut network = sample_network();
        let ticket = network.purchase_ticket("Central", "Port", None).unwrap();

        let snapshot = NetworkSnapshot::capture(&network);
        let restored = snapshot.restore(*network.fares()).unwrap();

        let reloaded = &restored.tickets()[0];
        assert_eq!(reloaded.id(), ticket.id());
        assert_eq!(reloaded.instructions(), ticket.instructions());
    }

    #[test]
    fn duplicate_station_record_is_malformed() {
        let mut snapshot = NetworkSnapshot::capture(&sample_network());
        snapshot.stations.push(StationRecord {
            name: "Park".into(),
            lines: vec!["Red".into()],
        });

        let err = snapshot.restore(FareSchedule::default()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
    }

    #[test]
    fn line_with_unknown_station_is_malformed() {
        let mut snapshot = NetworkSnapshot::capture(&sample_network());
        snapshot.lines.push(LineRecord {
            line_id: "Yellow".into(),
            color: "yellow".into(),
            stations: vec!["Atlantis".into()],
        });

        let err = snapshot.restore(FareSchedule::default()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
    }

    #[test]
    fn line_listing_a_station_twice_is_malformed() {
        let mut snapshot = NetworkSnapshot::capture(&sample_network());
        snapshot.lines.push(LineRecord {
            line_id: "Loop".into(),
            color: "purple".into(),
            stations: vec!["Central".into(), "Park".into(), "Central".into()],
        });

        let err = snapshot.restore(FareSchedule::default()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
    }

    #[test]
    fn connection_to_unknown_station_is_malformed() {
        let mut snapshot = NetworkSnapshot::capture(&sample_network());
        snapshot.connections.push(ConnectionRecord {
            station1: "Central".into(),
            station2: "Atlantis".into(),
        });

        let err = snapshot.restore(FareSchedule::default()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
    }

    #[test]
    fn ticket_with_unknown_path_station_is_malformed() {
        let mut snapshot = NetworkSnapshot::capture(&sample_network());
        snapshot.tickets.push(TicketRecord {
            ticket_id: "deadbeef".into(),
            origin: "Central".into(),
            destination: "Atlantis".into(),
            path: vec!["Central".into(), "Atlantis".into()],
            price: 250,
            issued_at: Utc::now(),
            owner: None,
        });

        let err = snapshot.restore(FareSchedule::default()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
    }

    #[test]
    fn empty_station_name_is_malformed() {
        let mut snapshot = NetworkSnapshot::capture(&sample_network());
        snapshot.stations.push(StationRecord {
            name: "   ".into(),
            lines: vec![],
        });

        let err = snapshot.restore(FareSchedule::default()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
    }
}
