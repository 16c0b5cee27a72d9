//! Listing categories as named by the booking API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Technical name of a listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryName {
    All,
    AmazingViews,
    Omg,
    Treehouses,
    Beach,
    Farms,
    TinyHomes,
    Lake,
    Containers,
    Camping,
    Castle,
    Skiing,
    Campers,
    Artic,
    Boat,
    BedAndBreakfasts,
    Rooms,
    EarthHomes,
    Tower,
    Caves,
    Luxes,
    ChefsKitchen,
}

impl CategoryName {
    /// Every category, in catalog order.
    pub const ALL: [CategoryName; 22] = [
        Self::All,
        Self::AmazingViews,
        Self::Omg,
        Self::Treehouses,
        Self::Beach,
        Self::Farms,
        Self::TinyHomes,
        Self::Lake,
        Self::Containers,
        Self::Camping,
        Self::Castle,
        Self::Skiing,
        Self::Campers,
        Self::Artic,
        Self::Boat,
        Self::BedAndBreakfasts,
        Self::Rooms,
        Self::EarthHomes,
        Self::Tower,
        Self::Caves,
        Self::Luxes,
        Self::ChefsKitchen,
    ];

    /// Wire name, e.g. `"AMAZING_VIEWS"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::AmazingViews => "AMAZING_VIEWS",
            Self::Omg => "OMG",
            Self::Treehouses => "TREEHOUSES",
            Self::Beach => "BEACH",
            Self::Farms => "FARMS",
            Self::TinyHomes => "TINY_HOMES",
            Self::Lake => "LAKE",
            Self::Containers => "CONTAINERS",
            Self::Camping => "CAMPING",
            Self::Castle => "CASTLE",
            Self::Skiing => "SKIING",
            Self::Campers => "CAMPERS",
            Self::Artic => "ARTIC",
            Self::Boat => "BOAT",
            Self::BedAndBreakfasts => "BED_AND_BREAKFASTS",
            Self::Rooms => "ROOMS",
            Self::EarthHomes => "EARTH_HOMES",
            Self::Tower => "TOWER",
            Self::Caves => "CAVES",
            Self::Luxes => "LUXES",
            Self::ChefsKitchen => "CHEFS_KITCHEN",
        }
    }

    /// Parse a wire name.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == raw)
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_serde_name() {
        for category in CategoryName::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, serde_json::Value::String(category.as_str().to_string()));
        }
    }

    #[test]
    fn parse_round_trips_known_names() {
        assert_eq!(CategoryName::parse("CHEFS_KITCHEN"), Some(CategoryName::ChefsKitchen));
        assert_eq!(CategoryName::parse("chefs_kitchen"), None);
    }
}
