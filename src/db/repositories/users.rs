use sqlx::{Row, SqlitePool};

use crate::{
    core::{
        errors::{AppError, AppResult},
        types::UserProfile,
    },
    db::parse_timestamp,
};

/// Creates the profile on first sign-in; afterwards refreshes the contact
/// fields and `last_login_at` while keeping `created_at`.
pub async fn upsert_user_profile(
    pool: &SqlitePool,
    uid: &str,
    email: Option<&str>,
    display_name: Option<&str>,
    photo_url: Option<&str>,
) -> AppResult<UserProfile> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (uid, email, display_name, photo_url)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(uid) DO UPDATE SET
          email = COALESCE(excluded.email, user_profiles.email),
          display_name = COALESCE(excluded.display_name, user_profiles.display_name),
          photo_url = COALESCE(excluded.photo_url, user_profiles.photo_url),
          last_login_at = (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        "#,
    )
    .bind(uid)
    .bind(email)
    .bind(display_name)
    .bind(photo_url)
    .execute(pool)
    .await?;
    get_user_profile(pool, uid).await
}

pub async fn get_user_profile(pool: &SqlitePool, uid: &str) -> AppResult<UserProfile> {
    let row = sqlx::query(
        r#"
        SELECT uid, email, display_name, photo_url, created_at, last_login_at
        FROM user_profiles
        WHERE uid = ?1
        "#,
    )
    .bind(uid)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("user {uid}")))?;

    let created_at: String = row.try_get("created_at")?;
    let last_login_at: String = row.try_get("last_login_at")?;
    Ok(UserProfile {
        uid: row.try_get("uid")?,
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        photo_url: row.try_get("photo_url")?,
        created_at: parse_timestamp(created_at)?,
        last_login_at: parse_timestamp(last_login_at)?,
    })
}
