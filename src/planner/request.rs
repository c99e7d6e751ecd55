use serde::{Deserialize, Serialize};

use crate::core::errors::{AppError, AppResult};

pub const MAX_TRIP_DAYS: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanRequest {
    pub destination_label: String,
    pub day_count: u32,
    pub budget_label: String,
    pub traveler_count: u32,
    pub traveler_label: String,
}

impl TripPlanRequest {
    pub fn validate(&self) -> AppResult<()> {
        self.validate_with_limit(MAX_TRIP_DAYS)
    }

    pub fn validate_with_limit(&self, max_days: u32) -> AppResult<()> {
        if self.destination_label.trim().is_empty() {
            return Err(AppError::InvalidInput("destination cannot be empty".to_string()));
        }
        if self.day_count == 0 {
            return Err(AppError::InvalidInput("trip must last at least one day".to_string()));
        }
        if self.day_count > max_days {
            return Err(AppError::InvalidInput(format!(
                "please enter days less than or equal to {max_days}"
            )));
        }
        if self.budget_label.trim().is_empty() {
            return Err(AppError::InvalidInput("budget cannot be empty".to_string()));
        }
        if self.traveler_count == 0 {
            return Err(AppError::InvalidInput("at least one traveler is required".to_string()));
        }
        Ok(())
    }
}
