use crate::aircraft::{Aircraft, AircraftId, Category};
use crate::dispatcher::{Dispatcher, FixedOccupancy};
use crate::fleet;
use crate::runway::RunwayPool;
use crate::tower::Tower;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

pub const POLL: Duration = Duration::from_millis(2);

pub fn standard_fleet() -> Vec<Aircraft> {
    fleet::generate(&mut StdRng::seed_from_u64(2024))
}

pub fn standard_tower() -> Arc<Tower> {
    Arc::new(Tower::new(standard_fleet()))
}

pub fn add_aircraft(fleet: &mut Vec<Aircraft>, id: AircraftId, category: Category) {
    fleet.push(Aircraft::new(id, category, 10));
}

pub fn dispatcher(tower: &Arc<Tower>, runways: &Arc<RunwayPool>) -> Dispatcher {
    Dispatcher::new(
        Arc::clone(tower),
        Arc::clone(runways),
        Arc::new(FixedOccupancy(Duration::from_millis(1))),
        POLL,
    )
}

/// Polls `condition` until it holds or a generous deadline passes.
pub fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(POLL);
    }
    condition()
}

pub fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![Just(Category::A), Just(Category::B), Just(Category::C)]
}

pub fn arb_fleet() -> impl Strategy<Value = Vec<Aircraft>> {
    proptest::collection::vec((arb_category(), 1..300u32), 0..40).prop_map(|planes| {
        planes
            .into_iter()
            .enumerate()
            .map(|(i, (category, passengers))| Aircraft::new(i as AircraftId + 1, category, passengers))
            .collect()
    })
}
