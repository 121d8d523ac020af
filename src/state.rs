use crate::aircraft::{Aircraft, Category, Priority};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating code broadcast by the airport controller.
///
/// Any integer is storable; only 0-6 and 9 carry a meaning, and 7/8 are
/// refused by the tower before they ever reach the stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OperatingState(pub i64);

impl OperatingState {
    pub const INACTIVE: OperatingState = OperatingState(0);
    pub const CLOSED: OperatingState = OperatingState(9);

    /// Codes that keep whatever state is currently active.
    pub fn is_retained(self) -> bool {
        matches!(self.0, 7 | 8)
    }

    pub fn enables_processing(self) -> bool {
        (1..=6).contains(&self.0)
    }

    /// Category admitted exclusively in modes 1-3.
    pub fn required_category(self) -> Option<Category> {
        match self.0 {
            1 => Some(Category::A),
            2 => Some(Category::B),
            3 => Some(Category::C),
            _ => None,
        }
    }

    pub fn boosted_category(self) -> Option<Category> {
        match self.0 {
            4 => Some(Category::A),
            5 => Some(Category::B),
            6 => Some(Category::C),
            _ => None,
        }
    }

    pub fn priority_for(self, aircraft: &Aircraft) -> Priority {
        if self.required_category() == Some(aircraft.category) {
            1
        } else if self.boosted_category() == Some(aircraft.category) {
            2
        } else {
            0
        }
    }

    pub fn is_eligible(self, aircraft: &Aircraft) -> bool {
        self.required_category()
            .map(|category| category == aircraft.category)
            .unwrap_or(true)
    }

    pub fn description(self) -> Option<&'static str> {
        match self {
            OperatingState::INACTIVE => Some("airport inactive"),
            OperatingState(1) => Some("category A only"),
            OperatingState(2) => Some("category B only"),
            OperatingState(3) => Some("category C only"),
            OperatingState(4) => Some("priority category A"),
            OperatingState(5) => Some("priority category B"),
            OperatingState(6) => Some("priority category C"),
            OperatingState::CLOSED => Some("airport temporarily closed"),
            _ => None,
        }
    }
}

impl fmt::Display for OperatingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
