use std::time::Duration;

/// Simulation configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Maximum number of rewind snapshots kept in memory. Limits how far
    /// back in time `prev_tick` can travel; oldest snapshots are discarded
    /// first once the cap is reached.
    pub max_history: usize,

    /// Cadence at which an external clock should invoke `tick()`.
    /// The engine itself never sleeps; this is advisory for drivers.
    pub tick_interval: Duration,
}

impl SimConfig {
    // ===== defaults =====
    /// One simulated game tick.
    pub const TICK_INTERVAL: Duration = Duration::from_millis(600);
    pub const MAX_HISTORY_SIZE: usize = 50;

    pub fn new() -> Self {
        Self {
            max_history: Self::MAX_HISTORY_SIZE,
            tick_interval: Self::TICK_INTERVAL,
        }
    }

    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            max_history,
            ..Self::new()
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
