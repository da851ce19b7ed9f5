//! Line types.

use std::fmt;

use super::StationId;

/// Error returned when parsing an invalid line id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line id: {reason}")]
pub struct InvalidLineId {
    reason: &'static str,
}

/// A validated line identifier (e.g. "Red").
///
/// Line ids are free-form but non-empty and trimmed. The `Ord` impl is
/// lexicographic, which is what "smallest line id" means everywhere a
/// deterministic choice among lines is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(String);

impl LineId {
    /// Parse a line id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidLineId {
                reason: "must not be empty",
            });
        }
        Ok(LineId(trimmed.to_string()))
    }

    /// Returns the line id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered sequence of stations sharing an id and a display colour.
///
/// The order of `stations` is the physical sequence along the line, so
/// adjacency within a line is purely positional (index ±1). A line does not
/// by itself imply graph connectivity; the network's explicit connections do.
#[derive(Debug, Clone)]
pub struct Line {
    id: LineId,
    color: String,
    stations: Vec<StationId>,
}

impl Line {
    /// Create an empty line.
    pub fn new(id: LineId, color: impl Into<String>) -> Self {
        Self {
            id,
            color: color.into(),
            stations: Vec::new(),
        }
    }

    /// The line's id.
    pub fn id(&self) -> &LineId {
        &self.id
    }

    /// The line's display colour.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Stations in physical order along the line.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Number of stations on the line.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True if the line has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Append a station iff it is not already on the line. Idempotent.
    pub fn add_station(&mut self, station: StationId) {
        if !self.stations.contains(&station) {
            self.stations.push(station);
        }
    }

    /// The stations immediately before and after `station` on this line.
    ///
    /// Returns 0, 1 or 2 neighbours. A station that is not on this line has
    /// no positional neighbours, so the result is empty; absence is not an
    /// error.
    pub fn adjacent_stations(&self, station: StationId) -> Vec<StationId> {
        let Some(idx) = self.stations.iter().position(|&s| s == station) else {
            return Vec::new();
        };

        let mut adjacent = Vec::new();
        if idx > 0 {
            adjacent.push(self.stations[idx - 1]);
        }
        if idx + 1 < self.stations.len() {
            adjacent.push(self.stations[idx + 1]);
        }
        adjacent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Line {
        let mut line = Line::new(LineId::parse("Red").unwrap(), "red");
        line.add_station(StationId(0));
        line.add_station(StationId(1));
        line.add_station(StationId(2));
        line.add_station(StationId(3));
        line
    }

    #[test]
    fn parse_valid_line_ids() {
        assert!(LineId::parse("Red").is_ok());
        assert!(LineId::parse("L1").is_ok());
        assert_eq!(LineId::parse(" Blue ").unwrap().as_str(), "Blue");
    }

    #[test]
    fn reject_empty_line_id() {
        assert!(LineId::parse("").is_err());
        assert!(LineId::parse("  ").is_err());
    }

    #[test]
    fn line_id_ordering_is_lexicographic() {
        let blue = LineId::parse("Blue").unwrap();
        let green = LineId::parse("Green").unwrap();
        let red = LineId::parse("Red").unwrap();
        assert!(blue < green);
        assert!(green < red);
    }

    #[test]
    fn add_station_dedupes() {
        let mut line = red();
        assert_eq!(line.len(), 4);

        line.add_station(StationId(1));
        assert_eq!(line.len(), 4);
        assert_eq!(
            line.stations(),
            &[StationId(0), StationId(1), StationId(2), StationId(3)]
        );
    }

    #[test]
    fn adjacent_interior_station() {
        let line = red();
        assert_eq!(
            line.adjacent_stations(StationId(1)),
            vec![StationId(0), StationId(2)]
        );
    }

    #[test]
    fn adjacent_at_ends() {
        let line = red();
        assert_eq!(line.adjacent_stations(StationId(0)), vec![StationId(1)]);
        assert_eq!(line.adjacent_stations(StationId(3)), vec![StationId(2)]);
    }

    #[test]
    fn adjacent_of_absent_station_is_empty() {
        let line = red();
        assert!(line.adjacent_stations(StationId(99)).is_empty());
    }

    #[test]
    fn single_station_line_has_no_neighbours() {
        let mut line = Line::new(LineId::parse("Shuttle").unwrap(), "grey");
        line.add_station(StationId(7));
        assert!(line.adjacent_stations(StationId(7)).is_empty());
    }
}
