//! Breadth-first shortest-path search over the connection graph.
//!
//! Routing runs over the explicit undirected connections, not over
//! line sequences: a line describes physical order, but only connections
//! carry reachability. Every hop costs one unit, so BFS finds a
//! minimum-hop path.

use std::collections::VecDeque;

use tracing::trace;

use crate::domain::{DomainError, StationId};

use super::graph::MetroNetwork;

impl MetroNetwork {
    /// Find a shortest path between two stations, by name.
    ///
    /// Returns the ordered station sequence from origin to destination,
    /// inclusive; the origin alone when origin and destination coincide.
    ///
    /// The search is deterministic: the frontier is FIFO and neighbours are
    /// explored in connection insertion order, so among equal-length paths
    /// the first-discovered one always wins. Re-running on an unchanged
    /// graph returns the same path.
    ///
    /// Fails with [`DomainError::UnknownStation`] if either name is absent
    /// and [`DomainError::NoRoute`] if the graph is exhausted without
    /// reaching the destination.
    pub fn find_shortest_path(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<StationId>, DomainError> {
        let start = self.lookup(origin)?;
        let goal = self.lookup(destination)?;

        if start == goal {
            return Ok(vec![start]);
        }

        // Parent pointers double as the visited set.
        let mut parent: Vec<Option<StationId>> = vec![None; self.station_count()];
        let mut queue = VecDeque::new();

        parent[start.0] = Some(start);
        queue.push_back(start);

        let mut explored = 0usize;
        while let Some(current) = queue.pop_front() {
            explored += 1;
            for &neighbour in self.station(current).connections() {
                if parent[neighbour.0].is_some() {
                    continue;
                }
                parent[neighbour.0] = Some(current);

                if neighbour == goal {
                    trace!(
                        origin = %self.station(start).name(),
                        destination = %self.station(goal).name(),
                        explored,
                        "destination reached"
                    );
                    return Ok(reconstruct(&parent, start, goal));
                }
                queue.push_back(neighbour);
            }
        }

        Err(DomainError::NoRoute {
            origin: self.station(start).name().clone(),
            destination: self.station(goal).name().clone(),
        })
    }
}

/// Walk parent pointers back from the goal and reverse.
fn reconstruct(parent: &[Option<StationId>], start: StationId, goal: StationId) -> Vec<StationId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        // The goal was reached, so every node on the way has a parent.
        let prev = parent[current.0].unwrap_or(start);
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
