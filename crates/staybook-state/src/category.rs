//! Category catalog and the "current category" bus.

use staybook_client::category::CategoryName;
use staybook_core::{ObservableState, StateReader};

/// A category as shown in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub icon: &'static str,
    pub display_name: &'static str,
    pub technical_name: CategoryName,
    pub activated: bool,
}

const fn entry(icon: &'static str, display_name: &'static str, technical_name: CategoryName) -> Category {
    Category {
        icon,
        display_name,
        technical_name,
        activated: false,
    }
}

/// Every category, default first.
pub const CATALOG: [Category; 22] = [
    entry("eye", "All", CategoryName::All),
    entry("eye", "Amazing views", CategoryName::AmazingViews),
    entry("exclamation", "OMG!", CategoryName::Omg),
    entry("tree", "Treehouses", CategoryName::Treehouses),
    entry("umbrella-beach", "Beach", CategoryName::Beach),
    entry("tractor", "Farms", CategoryName::Farms),
    entry("house", "Tiny homes", CategoryName::TinyHomes),
    entry("water", "Lake", CategoryName::Lake),
    entry("box", "Containers", CategoryName::Containers),
    entry("tent", "Camping", CategoryName::Camping),
    entry("chess-rook", "Castle", CategoryName::Castle),
    entry("person-skiing", "Skiing", CategoryName::Skiing),
    entry("fire", "Campers", CategoryName::Campers),
    entry("snowflake", "Artic", CategoryName::Artic),
    entry("sailboat", "Boat", CategoryName::Boat),
    entry("mug-saucer", "Bed & breakfasts", CategoryName::BedAndBreakfasts),
    entry("lightbulb", "Rooms", CategoryName::Rooms),
    entry("earth-europe", "Earth homes", CategoryName::EarthHomes),
    entry("tower-observation", "Tower", CategoryName::Tower),
    entry("hill-rockslide", "Caves", CategoryName::Caves),
    entry("champagne-glasses", "Luxes", CategoryName::Luxes),
    entry("kitchen-set", "Chef's kitchen", CategoryName::ChefsKitchen),
];

/// Owner of the selected-category cell. New subscribers get the current
/// selection right away.
#[derive(Debug)]
pub struct CategoryService {
    selected: ObservableState<Category>,
}

impl Default for CategoryService {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryService {
    pub fn new() -> Self {
        Self {
            selected: ObservableState::replay(Self::default_category()),
        }
    }

    pub fn change_category(&self, category: Category) {
        tracing::debug!(category = %category.technical_name, "category changed");
        self.selected.write(category);
    }

    /// Read handle on the selected category.
    pub fn changes(&self) -> StateReader<Category> {
        self.selected.reader()
    }

    pub fn categories(&self) -> &'static [Category] {
        &CATALOG
    }

    pub fn default_category() -> Category {
        CATALOG[0]
    }

    pub fn category_by_technical_name(&self, name: CategoryName) -> Option<Category> {
        CATALOG.iter().copied().find(|c| c.technical_name == name)
    }
}
