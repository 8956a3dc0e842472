//! Periodic tick driver.
//!
//! The engine never sleeps or spawns threads; a driver owns the clock and
//! invokes `tick()` serially at the configured cadence. Manual stepping
//! (calling `engine.tick()` directly) needs no driver and stays the
//! deterministic path for tests.

use sim_core::SimulationEngine;
use tokio::time::MissedTickBehavior;

/// Drives a borrowed engine from a tokio interval at
/// `config.tick_interval` (one simulated game tick per expiry).
pub struct TickDriver<'a> {
    engine: &'a mut SimulationEngine,
}

impl<'a> TickDriver<'a> {
    pub fn new(engine: &'a mut SimulationEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &SimulationEngine {
        self.engine
    }

    /// Starts the engine and ticks until it stops running.
    ///
    /// Ticks are serial by construction: the driver owns the engine for
    /// the duration, and an in-flight tick always completes.
    pub async fn run(&mut self) {
        self.engine.start();
        let mut interval = tokio::time::interval(self.engine.config().tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first expiry fires immediately; skip it so the initial
        // state stays visible for a full interval.
        interval.tick().await;

        while self.engine.is_running() {
            interval.tick().await;
            self.engine.tick();
        }
        tracing::debug!("tick driver stopped at tick {}", self.engine.current_tick());
    }

    /// Starts the engine and drives at most `ticks` ticks, stopping
    /// early if the engine stops running.
    pub async fn run_ticks(&mut self, ticks: u64) {
        self.engine.start();
        let mut interval = tokio::time::interval(self.engine.config().tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await;

        for _ in 0..ticks {
            if !self.engine.is_running() {
                break;
            }
            interval.tick().await;
            self.engine.tick();
        }
    }
}
