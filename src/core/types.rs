use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::planner::{
    catalog::{BudgetOption, TravelerOption},
    trip_plan::TripPlan,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Generated,
    Saved,
    Archived,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Saved => "saved",
            Self::Archived => "archived",
        }
    }

    pub fn from_str(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "generated" => Some(Self::Generated),
            "saved" => Some(Self::Saved),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Whether the stored plan came from a clean parse or from fallback extraction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutcome {
    Full,
    Partial,
}

impl PlanOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
        }
    }

    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "full" => Some(Self::Full),
            "partial" => Some(Self::Partial),
            _ => None,
        }
    }
}

/// The signed-in user, passed explicitly to anything that attributes data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl CurrentUser {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTrip {
    pub outcome: PlanOutcome,
    pub plan: TripPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: String,
    pub user_id: String,
    pub destination: String,
    pub day_count: u32,
    pub budget_label: String,
    pub traveler_label: String,
    pub traveler_count: u32,
    pub status: TripStatus,
    pub outcome: PlanOutcome,
    pub tags: Vec<String>,
    pub plan: TripPlan,
    pub is_public: bool,
    pub likes: i64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TripStats {
    pub total_trips: usize,
    pub total_destinations: usize,
    pub total_days: u64,
    pub budget_breakdown: BTreeMap<String, usize>,
    pub traveler_breakdown: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProviderKeyResponse {
    pub stored: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTripResponse {
    pub trip: GeneratedTrip,
    /// Set when the plan came from fallback extraction and may be incomplete.
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTripResponse {
    pub trip_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTripsResponse {
    pub trips: Vec<TripRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTripResponse {
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptionsResponse {
    pub budgets: Vec<BudgetOption>,
    pub travelers: Vec<TravelerOption>,
    pub max_days: u32,
}
