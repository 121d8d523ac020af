use crate::runway::RunwayPool;
use std::time::Duration;

/// Timing and capacity settings, all expressed in multiples of one time unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerConfig {
    pub runways: usize,
    pub time_unit: Duration,
    pub poll_units: u32,
    pub max_occupancy_units: u32,
    pub reconnect_units: u32,
}

impl TowerConfig {
    pub fn with_time_unit(time_unit: Duration) -> TowerConfig {
        TowerConfig {
            time_unit,
            ..TowerConfig::default()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.time_unit * self.poll_units
    }

    /// Exclusive upper bound for simulated runway occupancy.
    pub fn max_occupancy(&self) -> Duration {
        self.time_unit * self.max_occupancy_units
    }

    pub fn reconnect_delay(&self) -> Duration {
        self.time_unit * self.reconnect_units
    }
}

impl Default for TowerConfig {
    fn default() -> Self {
        TowerConfig {
            runways: RunwayPool::DEFAULT_CAPACITY,
            time_unit: Duration::from_secs(1),
            poll_units: 1,
            max_occupancy_units: 3,
            reconnect_units: 2,
        }
    }
}
