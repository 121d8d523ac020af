use crate::aircraft::{Aircraft, AircraftId, Category};
use crate::error::TowerError;
use rand::Rng;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::path::Path;

pub const AIRCRAFT_PER_CATEGORY: u32 = 10;

pub fn passenger_range(category: Category) -> RangeInclusive<u32> {
    match category {
        Category::A => 101..=150,
        Category::B => 50..=100,
        Category::C => 1..=50,
    }
}

/// Startup fleet: ten aircraft per category, ids 1-10 for A, 11-20 for B and 21-30 for C.
pub fn generate<R: Rng>(rng: &mut R) -> Vec<Aircraft> {
    Category::ALL
        .iter()
        .enumerate()
        .flat_map(|(block, category)| {
            let first_id = block as AircraftId * AIRCRAFT_PER_CATEGORY + 1;
            (first_id..first_id + AIRCRAFT_PER_CATEGORY)
                .map(|id| (id, *category))
                .collect::<Vec<_>>()
        })
        .map(|(id, category)| {
            Aircraft::new(id, category, rng.gen_range(passenger_range(category)))
        })
        .collect()
}

pub fn load_from_file(path: &Path) -> Result<Vec<Aircraft>, TowerError> {
    let data = std::fs::read_to_string(path)?;
    parse(&data)
}

/// Every aircraft starts at priority zero whatever the file says.
pub fn parse(data: &str) -> Result<Vec<Aircraft>, TowerError> {
    let mut fleet: Vec<Aircraft> = serde_json::from_str(data)?;
    let mut seen = HashSet::new();
    for aircraft in fleet.iter_mut() {
        if !seen.insert(aircraft.id) {
            return Err(TowerError::DuplicateAircraft(aircraft.id));
        }
        aircraft.priority = 0;
    }
    Ok(fleet)
}
