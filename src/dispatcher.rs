//! Pairs queued aircraft with free runways.
//!
//! The dispatcher is a single sequential consumer: it asks the tower for the
//! next departure, blocks on the runway pool, and hands the reserved runway to
//! a separate thread for the occupancy period. Up to the pool's capacity of
//! aircraft can therefore be on a runway while the dispatcher keeps polling.
//!
//! When there is nothing to do (processing disabled, exhaustion halt, empty
//! queue) it sleeps for a fixed poll interval, so a newly actionable state is
//! noticed within one interval at worst.

use crate::aircraft::{Aircraft, Category};
use crate::config::TowerConfig;
use crate::runway::{RunwayPool, RunwaySlot};
use crate::tower::{Departure, Tower};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Source of simulated runway occupancy durations.
pub trait Occupancy: Send + Sync {
    fn next_duration(&self) -> Duration;
}

/// Uniform duration in `[0, max)`.
pub struct RandomOccupancy {
    max: Duration,
    rng: Mutex<StdRng>,
}

impl RandomOccupancy {
    pub fn new(max: Duration, seed: Option<u64>) -> RandomOccupancy {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RandomOccupancy {
            max,
            rng: Mutex::new(rng),
        }
    }
}

impl Occupancy for RandomOccupancy {
    fn next_duration(&self) -> Duration {
        let bound = u64::try_from(self.max.as_micros()).unwrap_or(u64::MAX);
        if bound == 0 {
            return Duration::ZERO;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
        Duration::from_micros(rng.gen_range(0..bound))
    }
}

#[cfg(test)]
pub struct FixedOccupancy(pub Duration);

#[cfg(test)]
impl Occupancy for FixedOccupancy {
    fn next_duration(&self) -> Duration {
        self.0
    }
}

fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub enum Step {
    Waiting,
    Halted(Category),
    /// Runway reserved; the handle yields the aircraft once it has departed.
    Departing(JoinHandle<Aircraft>),
}

pub struct Dispatcher {
    tower: Arc<Tower>,
    runways: Arc<RunwayPool>,
    occupancy: Arc<dyn Occupancy>,
    poll_interval: Duration,
}

impl Dispatcher {
    pub fn new(
        tower: Arc<Tower>,
        runways: Arc<RunwayPool>,
        occupancy: Arc<dyn Occupancy>,
        poll_interval: Duration,
    ) -> Dispatcher {
        Dispatcher {
            tower,
            runways,
            occupancy,
            poll_interval,
        }
    }

    pub fn from_config(
        tower: Arc<Tower>,
        runways: Arc<RunwayPool>,
        config: &TowerConfig,
        seed: Option<u64>,
    ) -> Dispatcher {
        let occupancy = RandomOccupancy::new(config.max_occupancy(), seed);
        Dispatcher::new(tower, runways, Arc::new(occupancy), config.poll_interval())
    }

    /// One pass of the loop. Blocks on the runway pool when an aircraft is cleared.
    pub fn step(&self) -> Step {
        match self.tower.next_departure() {
            Departure::Idle => Step::Waiting,
            Departure::Halted(category) => Step::Halted(category),
            Departure::Cleared(aircraft) => {
                let slot = self.runways.acquire();
                Step::Departing(self.occupy(slot, aircraft))
            }
        }
    }

    fn occupy(&self, slot: RunwaySlot, aircraft: Aircraft) -> JoinHandle<Aircraft> {
        let duration = self.occupancy.next_duration();
        thread::spawn(move || {
            info!(
                aircraft = aircraft.id,
                category = %aircraft.category,
                passengers = aircraft.passenger_count,
                occupancy_ms = whole_millis(duration),
                "aircraft {} is using a runway",
                aircraft
            );
            thread::sleep(duration);
            info!(aircraft = aircraft.id, category = %aircraft.category, "aircraft {} has left the runway", aircraft);
            slot.release();
            aircraft
        })
    }

    /// Runs until `stop` is set, then waits for aircraft still on a runway.
    /// Returns every aircraft that departed.
    pub fn run(&self, stop: &AtomicBool) -> Vec<Aircraft> {
        let mut in_flight: Vec<JoinHandle<Aircraft>> = Vec::new();
        let mut departed = Vec::new();

        while !stop.load(Ordering::Acquire) {
            match self.step() {
                Step::Waiting => thread::sleep(self.poll_interval),
                Step::Halted(category) => {
                    debug!(category = %category, "dispatch halted until next state change")
                }
                Step::Departing(handle) => in_flight.push(handle),
            }

            let (finished, running): (Vec<_>, Vec<_>) =
                in_flight.into_iter().partition(|h| h.is_finished());
            in_flight = running;
            departed.extend(finished.into_iter().filter_map(|h| h.join().ok()));
        }

        departed.extend(in_flight.into_iter().filter_map(|h| h.join().ok()));
        departed
    }

    pub fn spawn(self, stop: Arc<AtomicBool>) -> JoinHandle<Vec<Aircraft>> {
        thread::spawn(move || self.run(&stop))
    }
}
