//! A small sample network for demonstrations and tests.

use crate::domain::{FareSchedule, LineId, StationName};

use super::graph::MetroNetwork;

/// Build the demonstration network: three lines, ten stations, with Park
/// (Red/Green) and Museum (Red/Blue) as transfer stations.
///
/// Used by the server when it starts with no persisted state, and by tests
/// that want a realistic small graph.
pub fn sample_network() -> MetroNetwork {
    sample_network_with_fares(FareSchedule::default())
}

/// [`sample_network`] with an explicit fare schedule.
pub fn sample_network_with_fares(fares: FareSchedule) -> MetroNetwork {
    let mut network = MetroNetwork::new(fares);

    add_line(&mut network, "Red", "red", &[
        "Central",
        "Park",
        "Museum",
        "Station Square",
    ]);
    add_line(&mut network, "Blue", "blue", &[
        "Airport",
        "Downtown",
        "Museum",
        "Port",
    ]);
    add_line(&mut network, "Green", "green", &[
        "University",
        "Library",
        "Park",
        "Stadium",
    ]);

    let connections = [
        ("Central", "Park"),
        ("Park", "Museum"),
        ("Museum", "Station Square"),
        ("Airport", "Downtown"),
        ("Downtown", "Museum"),
        ("Museum", "Port"),
        ("University", "Library"),
        ("Library", "Park"),
        ("Park", "Stadium"),
    ];
    for (a, b) in connections {
        // Both endpoints were just added above.
        let _ = network.connect(a, b);
    }

    network
}

fn add_line(network: &mut MetroNetwork, id: &str, color: &str, stations: &[&str]) {
    let (Ok(line_id), Ok(names)) = (
        LineId::parse(id),
        stations
            .iter()
            .map(|s| StationName::parse(s))
            .collect::<Result<Vec<_>, _>>(),
    ) else {
        return; // Static seed data is always valid.
    };
    network.add_line(line_id, color, names);
}
