use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOption {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerOption {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub people: u32,
}

pub const BUDGET_OPTIONS: &[BudgetOption] = &[
    BudgetOption {
        id: 1,
        title: "Cheap",
        description: "Affordable trips without compromising on experience.",
    },
    BudgetOption {
        id: 2,
        title: "Standard",
        description: "A balanced experience with comfort and value.",
    },
    BudgetOption {
        id: 3,
        title: "Luxury",
        description: "Premium stays and unforgettable luxuries.",
    },
    BudgetOption {
        id: 4,
        title: "Backpacker",
        description: "Minimalist and adventurous travel on a tight budget.",
    },
    BudgetOption {
        id: 5,
        title: "Corporate",
        description: "Professional and efficient travel for work.",
    },
];

pub const TRAVELER_OPTIONS: &[TravelerOption] = &[
    TravelerOption {
        id: 1,
        title: "Solo Trip",
        description: "Explore the world on your own terms, at your own pace.",
        people: 1,
    },
    TravelerOption {
        id: 2,
        title: "Couple Getaway",
        description: "Romantic escapes tailored for two hearts.",
        people: 2,
    },
    TravelerOption {
        id: 3,
        title: "Family Vacation",
        description: "Memorable journeys for the whole family.",
        people: 3,
    },
    TravelerOption {
        id: 4,
        title: "Trip with Friends",
        description: "Unforgettable adventures with your favorite people.",
        people: 4,
    },
    TravelerOption {
        id: 5,
        title: "Business Travel",
        description: "Efficient travel plans to keep you on track.",
        people: 1,
    },
    TravelerOption {
        id: 6,
        title: "Group Tour",
        description: "Organized trips for large groups and communities.",
        people: 5,
    },
];

/// Looks up a budget tier by numeric id or case-insensitive title.
pub fn budget_option(key: &str) -> Option<&'static BudgetOption> {
    let key = key.trim();
    match key.parse::<u32>() {
        Ok(id) => BUDGET_OPTIONS.iter().find(|option| option.id == id),
        Err(_) => BUDGET_OPTIONS
            .iter()
            .find(|option| option.title.eq_ignore_ascii_case(key)),
    }
}

/// Looks up a travel party by numeric id or case-insensitive title.
pub fn traveler_option(key: &str) -> Option<&'static TravelerOption> {
    let key = key.trim();
    match key.parse::<u32>() {
        Ok(id) => TRAVELER_OPTIONS.iter().find(|option| option.id == id),
        Err(_) => TRAVELER_OPTIONS
            .iter()
            .find(|option| option.title.eq_ignore_ascii_case(key)),
    }
}
