use tracing::info;
use uuid::Uuid;

use crate::{
    core::{
        errors::{AppError, AppResult},
        types::{
            CurrentUser, DeleteTripResponse, GenerateTripResponse, GeneratedTrip, ListTripsResponse,
            PlanOutcome, Provider, SaveTripResponse, TripRecord, TripStats, TripStatus,
        },
    },
    db::repositories::trips::{self, NewTrip},
    planner::{catalog, insights, request::TripPlanRequest},
    security::{
        identity::{ensure_owner, require_user},
        keyring,
    },
    AppState,
};

const PARTIAL_WARNING: &str = "Trip generated with partial data; some hotels or days may be missing.";

pub async fn generate_trip(
    state: &AppState,
    user: Option<&CurrentUser>,
    request: TripPlanRequest,
    api_key: Option<String>,
) -> AppResult<GenerateTripResponse> {
    require_user(user, "generate a trip")?;
    request.validate_with_limit(state.config.max_days)?;

    let api_key = match api_key.filter(|key| !key.trim().is_empty()) {
        Some(key) => key,
        None => keyring::get_provider_key(Provider::Gemini)?,
    };
    let trip = state.generator.generate(&request, &api_key).await?;
    let warning = matches!(trip.outcome, PlanOutcome::Partial).then(|| PARTIAL_WARNING.to_string());
    Ok(GenerateTripResponse { trip, warning })
}

pub async fn save_trip(
    state: &AppState,
    user: Option<&CurrentUser>,
    request: &TripPlanRequest,
    generated: &GeneratedTrip,
) -> AppResult<SaveTripResponse> {
    let user = require_user(user, "save trips")?;
    request.validate_with_limit(state.config.max_days)?;

    let id = Uuid::new_v4().to_string();
    let tags = insights::trip_tags(
        &request.budget_label,
        request.day_count,
        &request.traveler_label,
    );
    let trip_id = trips::insert_trip(
        state.db.pool(),
        NewTrip {
            id: &id,
            user_id: &user.uid,
            destination: request.destination_label.trim(),
            day_count: request.day_count,
            budget_label: request.budget_label.trim(),
            traveler_label: request.traveler_label.trim(),
            traveler_count: request.traveler_count,
            status: TripStatus::Saved,
            outcome: generated.outcome,
            tags: &tags,
            plan: &generated.plan,
        },
    )
    .await?;
    info!(trip_id = %trip_id, uid = %user.uid, "trip saved");
    Ok(SaveTripResponse {
        trip_id,
        message: "Trip saved successfully!".to_string(),
    })
}

pub async fn list_trips(state: &AppState, user: Option<&CurrentUser>) -> AppResult<ListTripsResponse> {
    let user = require_user(user, "view trips")?;
    let trips = trips::list_trips_for_user(state.db.pool(), &user.uid).await?;
    info!(count = trips.len(), uid = %user.uid, "trips listed");
    Ok(ListTripsResponse { trips })
}

/// Fetches a trip by id and counts the view. Trips are readable by id alone,
/// matching shared-link access.
pub async fn get_trip(state: &AppState, trip_id: &str) -> AppResult<TripRecord> {
    trips::record_view(state.db.pool(), trip_id).await?;
    trips::get_trip(state.db.pool(), trip_id).await
}

pub async fn update_trip_status(
    state: &AppState,
    user: Option<&CurrentUser>,
    trip_id: &str,
    status: TripStatus,
) -> AppResult<TripRecord> {
    let user = require_user(user, "update trips")?;
    let trip = trips::get_trip(state.db.pool(), trip_id).await?;
    ensure_owner(user, &trip, "update")?;
    let updated = trips::update_trip_status(state.db.pool(), trip_id, status).await?;
    info!(trip_id, status = status.as_str(), "trip updated");
    Ok(updated)
}

pub async fn delete_trip(
    state: &AppState,
    user: Option<&CurrentUser>,
    trip_id: &str,
) -> AppResult<DeleteTripResponse> {
    let user = require_user(user, "delete trips")?;
    let trip = trips::get_trip(state.db.pool(), trip_id).await?;
    ensure_owner(user, &trip, "delete")?;
    let deleted = trips::delete_trip(state.db.pool(), trip_id).await?;
    info!(trip_id, deleted, "trip deleted");
    Ok(DeleteTripResponse { deleted })
}

pub async fn search_trips(
    state: &AppState,
    user: Option<&CurrentUser>,
    query: Option<&str>,
    tags: &[String],
) -> AppResult<ListTripsResponse> {
    let all = list_trips(state, user).await?.trips;
    let trips = insights::search_trips(&all, query, tags)
        .into_iter()
        .cloned()
        .collect();
    Ok(ListTripsResponse { trips })
}

pub async fn trip_stats(state: &AppState, user: Option<&CurrentUser>) -> AppResult<TripStats> {
    let trips = list_trips(state, user).await?.trips;
    Ok(insights::trip_stats(&trips))
}

/// Resolves catalog keys (id or title) into a request.
pub fn build_request(
    destination: &str,
    day_count: u32,
    budget: &str,
    traveler: &str,
) -> AppResult<TripPlanRequest> {
    let budget = catalog::budget_option(budget)
        .ok_or_else(|| AppError::InvalidInput(format!("unknown budget option {budget}")))?;
    let traveler = catalog::traveler_option(traveler)
        .ok_or_else(|| AppError::InvalidInput(format!("unknown traveler option {traveler}")))?;
    Ok(TripPlanRequest {
        destination_label: destination.trim().to_string(),
        day_count,
        budget_label: budget.title.to_string(),
        traveler_count: traveler.people,
        traveler_label: traveler.title.to_string(),
    })
}
