use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use tabled::Tabled;

pub type AircraftId = u32;
pub type Priority = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
    C,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::A, Category::B, Category::C];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct Aircraft {
    pub id: AircraftId,
    pub category: Category,
    #[tabled(rename = "passengers")]
    #[serde(rename = "passengers")]
    pub passenger_count: u32,
    #[serde(default)]
    pub priority: Priority,
}

impl Aircraft {
    pub fn new(id: AircraftId, category: Category, passenger_count: u32) -> Aircraft {
        Aircraft {
            id,
            category,
            passenger_count,
            priority: 0,
        }
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.category)
    }
}
