//! Fare calculation.

/// Fare configuration: a base fare plus a fixed increment per hop.
///
/// Amounts are in minor currency units (e.g. cents), so arithmetic is exact.
/// The schedule is configuration, not policy: callers construct one rather
/// than relying on literals scattered through the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareSchedule {
    /// Flat fare charged for any ticket, however short.
    pub base: u32,

    /// Increment charged per connection traversed.
    pub per_hop: u32,
}

impl FareSchedule {
    /// Create a schedule with the given base fare and per-hop increment.
    pub fn new(base: u32, per_hop: u32) -> Self {
        Self { base, per_hop }
    }

    /// Price of a path with `path_len` stations.
    ///
    /// A path of n stations crosses `n - 1` connections; an empty or
    /// single-station path costs the base fare only.
    pub fn price(&self, path_len: usize) -> u32 {
        let hops = path_len.saturating_sub(1) as u32;
        self.base + hops * self.per_hop
    }
}

impl Default for FareSchedule {
    fn default() -> Self {
        // $2.00 base plus $0.50 per station crossed.
        Self {
            base: 200,
            per_hop: 50,
        }
    }
}
