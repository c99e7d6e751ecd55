#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;

use trip_planner_lib::{
    core::{
        config::AppConfig,
        errors::{AppError, AppResult},
        types::CurrentUser,
    },
    db::Database,
    planner::request::TripPlanRequest,
    providers::TextGenerator,
    AppState,
};

pub const PLAN_RESPONSE: &str = r#"```json
{
  "hotels": [
    {"name": "Shinjuku Stay", "address": "1-1 Shinjuku, Tokyo", "price_per_night": "$140", "geo_coordinates": {"lat": 35.6938, "lng": 139.7034}, "rating": 4.2, "description": "Near the station"}
  ],
  "itinerary": [
    {"day": 1, "best_time_to_visit": "Morning", "places": [{"place_name": "Meiji Shrine", "place_details": "Shinto shrine", "ticket_price": "Free", "travel_time": "15 minutes"}]},
    {"day": 2, "best_time_to_visit": "Afternoon", "places": []}
  ]
}
```"#;

/// Canned text generator that records every prompt it receives.
pub struct StubGenerator {
    response: Result<String, fn() -> AppError>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        })
    }

    pub fn failing(make_error: fn() -> AppError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(make_error),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate_text(&self, _api_key: &str, prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().expect("prompt log").push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}

pub fn tokyo_request(day_count: u32) -> TripPlanRequest {
    TripPlanRequest {
        destination_label: "Tokyo, Japan".to_string(),
        day_count,
        budget_label: "Standard".to_string(),
        traveler_count: 2,
        traveler_label: "Couple Getaway".to_string(),
    }
}

pub fn user(uid: &str) -> CurrentUser {
    CurrentUser::new(uid)
}

pub async fn state_with(stub: Arc<StubGenerator>) -> AppState {
    let db = Database::in_memory().await.expect("db should initialize");
    AppState::with_parts(db, stub, AppConfig::default())
}
