use sqlx::{Row, SqlitePool};

use crate::{
    core::{
        errors::{AppError, AppResult},
        types::{PlanOutcome, TripRecord, TripStatus},
    },
    db::parse_timestamp,
    planner::trip_plan::TripPlan,
};

#[derive(Debug, Clone)]
pub struct NewTrip<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub destination: &'a str,
    pub day_count: u32,
    pub budget_label: &'a str,
    pub traveler_label: &'a str,
    pub traveler_count: u32,
    pub status: TripStatus,
    pub outcome: PlanOutcome,
    pub tags: &'a [String],
    pub plan: &'a TripPlan,
}

const TRIP_COLUMNS: &str = "id, user_id, destination, day_count, budget_label, traveler_label, \
     traveler_count, status, outcome, tags_json, plan_json, is_public, likes, views, created_at, updated_at";

pub async fn insert_trip(pool: &SqlitePool, trip: NewTrip<'_>) -> AppResult<String> {
    sqlx::query(
        r#"
        INSERT INTO trips (
          id, user_id, destination, day_count, budget_label, traveler_label,
          traveler_count, status, outcome, tags_json, plan_json
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
    )
    .bind(trip.id)
    .bind(trip.user_id)
    .bind(trip.destination)
    .bind(i64::from(trip.day_count))
    .bind(trip.budget_label)
    .bind(trip.traveler_label)
    .bind(i64::from(trip.traveler_count))
    .bind(trip.status.as_str())
    .bind(trip.outcome.as_str())
    .bind(
        serde_json::to_string(trip.tags)
            .map_err(|err: serde_json::Error| AppError::Internal(err.to_string()))?,
    )
    .bind(
        serde_json::to_string(trip.plan)
            .map_err(|err: serde_json::Error| AppError::Internal(err.to_string()))?,
    )
    .execute(pool)
    .await?;
    Ok(trip.id.to_string())
}

pub async fn list_trips_for_user(pool: &SqlitePool, user_id: &str) -> AppResult<Vec<TripRecord>> {
    let rows = sqlx::query(&format!(
        "SELECT {TRIP_COLUMNS} FROM trips WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(map_trip).collect()
}

pub async fn get_trip(pool: &SqlitePool, id: &str) -> AppResult<TripRecord> {
    let row = sqlx::query(&format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("trip {id}")))?;

    map_trip(row)
}

pub async fn update_trip_status(
    pool: &SqlitePool,
    id: &str,
    status: TripStatus,
) -> AppResult<TripRecord> {
    let affected = sqlx::query(
        r#"
        UPDATE trips
        SET status = ?2,
            updated_at = (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .execute(pool)
    .await?
    .rows_affected();

    if affected == 0 {
        return Err(AppError::NotFound(format!("trip {id}")));
    }
    get_trip(pool, id).await
}

pub async fn record_view(pool: &SqlitePool, id: &str) -> AppResult<()> {
    sqlx::query("UPDATE trips SET views = views + 1 WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_trip(pool: &SqlitePool, id: &str) -> AppResult<bool> {
    let affected = sqlx::query("DELETE FROM trips WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(affected > 0)
}

fn map_trip(row: sqlx::sqlite::SqliteRow) -> AppResult<TripRecord> {
    let id: String = row.try_get("id")?;
    let corrupt = |column: &str, detail: String| {
        AppError::Database(format!("corrupt {column} for trip {id}: {detail}"))
    };

    let status_raw: String = row.try_get("status")?;
    let outcome_raw: String = row.try_get("outcome")?;
    let tags_raw: String = row.try_get("tags_json")?;
    let plan_raw: String = row.try_get("plan_json")?;
    let day_count: i64 = row.try_get("day_count")?;
    let traveler_count: i64 = row.try_get("traveler_count")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(TripRecord {
        user_id: row.try_get("user_id")?,
        destination: row.try_get("destination")?,
        day_count: u32::try_from(day_count)
            .map_err(|err| corrupt("day_count", format!("{day_count}: {err}")))?,
        budget_label: row.try_get("budget_label")?,
        traveler_label: row.try_get("traveler_label")?,
        traveler_count: u32::try_from(traveler_count)
            .map_err(|err| corrupt("traveler_count", format!("{traveler_count}: {err}")))?,
        status: TripStatus::from_str(&status_raw)
            .ok_or_else(|| corrupt("status", format!("unknown value {status_raw:?}")))?,
        outcome: PlanOutcome::from_str(&outcome_raw)
            .ok_or_else(|| corrupt("outcome", format!("unknown value {outcome_raw:?}")))?,
        tags: serde_json::from_str(&tags_raw).map_err(|err| corrupt("tags_json", err.to_string()))?,
        plan: serde_json::from_str(&plan_raw).map_err(|err| corrupt("plan_json", err.to_string()))?,
        is_public: row.try_get::<i64, _>("is_public")? == 1,
        likes: row.try_get("likes")?,
        views: row.try_get("views")?,
        created_at: parse_timestamp(created_at)?,
        updated_at: parse_timestamp(updated_at)?,
        id,
    })
}
