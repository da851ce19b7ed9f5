//! The metro network: stations, lines, connections, and the ticket log.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use crate::domain::{
    DomainError, FareSchedule, Line, LineId, Station, StationId, StationName, Stop, Ticket,
};

/// The full in-memory network state.
///
/// Stations live in an arena indexed by [`StationId`]; the name→id map and
/// the line registry are the single source of truth. A station appearing on
/// several lines is one arena record, so transfer detection via line-set
/// size is reliable.
///
/// The network is the one place with mutable state (graph plus ticket log).
/// It is created at startup, mutated through the methods here, and flushed
/// to persistence by the owning collaborator at shutdown.
#[derive(Debug, Clone)]
pub struct MetroNetwork {
    stations: Vec<Station>,
    by_name: HashMap<StationName, StationId>,
    lines: BTreeMap<LineId, Line>,
    fares: FareSchedule,
    tickets: Vec<Ticket>,
}

/// A line with its stations, for display grouped-by-line.
#[derive(Debug, Clone)]
pub struct LineOverview {
    pub line_id: LineId,
    pub color: String,
    pub stations: Vec<StationEntry>,
}

/// One station in a [`LineOverview`].
#[derive(Debug, Clone)]
pub struct StationEntry {
    pub name: StationName,
    pub is_transfer: bool,
}

impl MetroNetwork {
    /// Create an empty network with the given fare schedule.
    pub fn new(fares: FareSchedule) -> Self {
        Self {
            stations: Vec::new(),
            by_name: HashMap::new(),
            lines: BTreeMap::new(),
            fares,
            tickets: Vec::new(),
        }
    }

    /// The fare schedule in effect.
    pub fn fares(&self) -> &FareSchedule {
        &self.fares
    }

    /// The station record for an id.
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.0]
    }

    /// Look up a station id by name.
    pub fn lookup(&self, name: &str) -> Result<StationId, DomainError> {
        let parsed = StationName::parse(name)
            .map_err(|_| DomainError::UnknownStation(name.to_string()))?;
        self.by_name
            .get(&parsed)
            .copied()
            .ok_or_else(|| DomainError::UnknownStation(name.to_string()))
    }

    /// All stations, in arena order (insertion order).
    pub fn stations(&self) -> impl Iterator<Item = (StationId, &Station)> {
        self.stations
            .iter()
            .enumerate()
            .map(|(i, s)| (StationId(i), s))
    }

    /// Number of stations in the network.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// All lines, in lexicographic id order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// The line with the given id, if registered.
    pub fn line(&self, id: &LineId) -> Option<&Line> {
        self.lines.get(id)
    }

    /// Insert a station, or union line memberships into an existing one.
    ///
    /// Station identity is keyed by name: re-adding a name returns the
    /// existing record's id, with any new line memberships merged in. This
    /// is how transfer stations form.
    pub fn add_station(
        &mut self,
        name: StationName,
        lines: impl IntoIterator<Item = LineId>,
    ) -> StationId {
        let id = match self.by_name.get(&name) {
            Some(&id) => id,
            None => {
                let id = StationId(self.stations.len());
                self.stations.push(Station::new(name.clone()));
                self.by_name.insert(name, id);
                id
            }
        };
        for line in lines {
            self.stations[id.0].add_line(line);
        }
        id
    }

    /// Register a line with its ordered station sequence.
    ///
    /// Stations not yet in the network are created; existing ones gain this
    /// line's membership. Re-registering a line id replaces the previous
    /// sequence. Duplicate names within `station_names` occupy one position
    /// (first occurrence wins).
    pub fn add_line(
        &mut self,
        id: LineId,
        color: impl Into<String>,
        station_names: impl IntoIterator<Item = StationName>,
    ) {
        let mut line = Line::new(id.clone(), color);
        for name in station_names {
            let station_id = self.add_station(name, [id.clone()]);
            line.add_station(station_id);
        }
        debug!(line = %id, stations = line.len(), "registered line");
        self.lines.insert(id, line);
    }

    /// Add a symmetric connection between two stations, looked up by name.
    ///
    /// Idempotent; connecting a station to itself is a no-op. Fails with
    /// [`DomainError::UnknownStation`] if either name is absent.
    pub fn connect(&mut self, a: &str, b: &str) -> Result<(), DomainError> {
        let id_a = self.lookup(a)?;
        let id_b = self.lookup(b)?;
        if id_a == id_b {
            return Ok(());
        }
        self.stations[id_a.0].add_connection(id_b);
        self.stations[id_b.0].add_connection(id_a);
        Ok(())
    }

    /// All undirected connections as deduplicated, canonically ordered name
    /// pairs (lexicographically smaller name first).
    ///
    /// Each symmetric edge appears exactly once; the result is sorted, so
    /// the save collaborator gets a stable serialization order.
    pub fn connection_pairs(&self) -> Vec<(StationName, StationName)> {
        let mut pairs = Vec::new();
        for (id, station) in self.stations() {
            for &neighbour in station.connections() {
                // Emit each edge from its smaller-id endpoint only.
                if id < neighbour {
                    let a = station.name().clone();
                    let b = self.station(neighbour).name().clone();
                    if a <= b {
                        pairs.push((a, b));
                    } else {
                        pairs.push((b, a));
                    }
                }
            }
        }
        pairs.sort();
        pairs
    }

    /// Stations grouped by line, each flagged as transfer or not, ordered by
    /// line id and, within a line, by the line's physical sequence.
    pub fn list_stations_by_line(&self) -> Vec<LineOverview> {
        self.lines
            .values()
            .map(|line| LineOverview {
                line_id: line.id().clone(),
                color: line.color().to_string(),
                stations: line
                    .stations()
                    .iter()
                    .map(|&id| {
                        let station = self.station(id);
                        StationEntry {
                            name: station.name().clone(),
                            is_transfer: station.is_transfer(),
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// Resolve a path of ids into stops carrying line memberships.
    pub fn path_stops(&self, path: &[StationId]) -> Vec<Stop> {
        path.iter()
            .map(|&id| {
                let station = self.station(id);
                Stop {
                    name: station.name().clone(),
                    lines: station.lines().clone(),
                }
            })
            .collect()
    }

    /// Fare for a path, per the configured schedule.
    pub fn price(&self, path: &[StationId]) -> u32 {
        self.fares.price(path.len())
    }

    /// Purchase a ticket: find the shortest route, price it, derive
    /// instructions, and append the ticket to the log.
    ///
    /// This is the one operation with a side effect beyond pure queries
    /// (the ticket-log append). Fails with [`DomainError::UnknownStation`]
    /// or [`DomainError::NoRoute`].
    pub fn purchase_ticket(
        &mut self,
        origin: &str,
        destination: &str,
        owner: Option<String>,
    ) -> Result<Ticket, DomainError> {
        let path = self.find_shortest_path(origin, destination)?;
        let price = self.price(&path);
        let stops = self.path_stops(&path);
        let ticket = Ticket::issue(&stops, price, owner)?;

        info!(
            ticket = %ticket.id(),
            origin = %ticket.origin(),
            destination = %ticket.destination(),
            hops = ticket.hops(),
            price,
            "ticket purchased"
        );

        self.tickets.push(ticket.clone());
        Ok(ticket)
    }

    /// Append a previously issued ticket to the log, without re-purchasing.
    ///
    /// Used by the load collaborator when restoring persisted state.
    pub fn restore_ticket(&mut self, ticket: Ticket) {
        self.tickets.push(ticket);
    }

    /// The full ticket log, in purchase order.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Tickets, optionally filtered to one owner.
    pub fn list_tickets(&self, owner: Option<&str>) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| owner.is_none() || t.owner() == owner)
            .collect()
    }
}
