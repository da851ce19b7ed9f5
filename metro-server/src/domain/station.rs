//! Station types.

use std::collections::BTreeSet;
use std::fmt;

use super::LineId;

/// Error returned when parsing an invalid station name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStationName {
    reason: &'static str,
}

/// A validated station name, the unique key for a station.
///
/// Names are free-form (e.g. "Station Square") but must be non-empty and
/// carry no leading or trailing whitespace. This type guarantees that any
/// `StationName` value is valid by construction.
///
/// # Examples
///
/// ```
/// use metro_server::domain::StationName;
///
/// let central = StationName::parse("Central").unwrap();
/// assert_eq!(central.as_str(), "Central");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(StationName::parse("  Park ").unwrap().as_str(), "Park");
///
/// // Empty and whitespace-only names are rejected
/// assert!(StationName::parse("").is_err());
/// assert!(StationName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationName(String);

impl StationName {
    /// Parse a station name from a string.
    ///
    /// The input is trimmed; the trimmed form must be non-empty.
    pub fn parse(s: &str) -> Result<Self, InvalidStationName> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStationName {
                reason: "must not be empty",
            });
        }
        Ok(StationName(trimmed.to_string()))
    }

    /// Returns the station name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index of a station in the network's station arena.
///
/// Station records live in an arena owned by the network; all cross-references
/// (connections, line sequences, paths) are ids rather than owning pointers,
/// since the connection graph may contain cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub usize);

/// A station record: name, line memberships, and adjacency.
///
/// Line memberships are a `BTreeSet` so iteration order is the lexicographic
/// order of line ids; instruction derivation relies on this to pick the
/// smallest id deterministically. Connections are kept in insertion order,
/// which fixes the BFS neighbour-exploration order.
#[derive(Debug, Clone)]
pub struct Station {
    name: StationName,
    lines: BTreeSet<LineId>,
    connections: Vec<StationId>,
}

impl Station {
    /// Create a station with no line memberships and no connections.
    pub fn new(name: StationName) -> Self {
        Self {
            name,
            lines: BTreeSet::new(),
            connections: Vec::new(),
        }
    }

    /// The station's name.
    pub fn name(&self) -> &StationName {
        &self.name
    }

    /// The lines this station belongs to, in lexicographic id order.
    pub fn lines(&self) -> &BTreeSet<LineId> {
        &self.lines
    }

    /// Record membership of a line. Idempotent.
    pub fn add_line(&mut self, line: LineId) {
        self.lines.insert(line);
    }

    /// Neighbouring stations, in the order connections were added.
    pub fn connections(&self) -> &[StationId] {
        &self.connections
    }

    /// Add a neighbouring station. Idempotent.
    ///
    /// Symmetry is not enforced here: the owning network must call this on
    /// both endpoints of an edge.
    pub fn add_connection(&mut self, other: StationId) {
        if !self.connections.contains(&other) {
            self.connections.push(other);
        }
    }

    /// True iff this station belongs to more than one line.
    pub fn is_transfer(&self) -> bool {
        self.lines.len() > 1
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Parsing an already-trimmed non-empty string round-trips.
        #[test]
        fn roundtrip(s in "[a-zA-Z][a-zA-Z ]{0,30}[a-zA-Z]") {
            let name = StationName::parse(&s).unwrap();
            prop_assert_eq!(name.as_str(), s.as_str());
        }

        /// Whitespace-only strings are always rejected.
        #[test]
        fn whitespace_rejected(s in "[ \t\n]{0,10}") {
            prop_assert!(StationName::parse(&s).is_err());
        }

        /// Parsing is idempotent: re-parsing the parsed form is identity.
        #[test]
        fn parse_idempotent(s in " ?[a-zA-Z ]{1,30}[a-zA-Z] ?") {
            let once = StationName::parse(&s).unwrap();
            let twice = StationName::parse(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
