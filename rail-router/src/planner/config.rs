//! Query policy for the route planner.

/// Configuration parameters for route queries.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Accept queries whose origin and destination are the same station.
    ///
    /// When disabled (the default) such queries are rejected before search.
    pub allow_same_station: bool,
}

impl PlanOptions {
    /// Create a new configuration with the given parameters.
    pub fn new(allow_same_station: bool) -> Self {
        Self { allow_same_station }
    }
}
