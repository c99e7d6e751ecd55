use tracing::info;

use crate::{
    core::{
        errors::{AppError, AppResult},
        types::{CurrentUser, UserProfile},
    },
    db::repositories::users,
    security::identity::require_user,
    AppState,
};

/// Records a sign-in for the given identity and returns its stored profile.
pub async fn sign_in(
    state: &AppState,
    user: &CurrentUser,
    photo_url: Option<String>,
) -> AppResult<UserProfile> {
    if user.uid.trim().is_empty() {
        return Err(AppError::InvalidInput("user id cannot be empty".to_string()));
    }
    let profile = users::upsert_user_profile(
        state.db.pool(),
        user.uid.trim(),
        user.email.as_deref(),
        user.display_name.as_deref(),
        photo_url.as_deref(),
    )
    .await?;
    info!(
        uid = %profile.uid,
        name = profile.display_name.as_deref().unwrap_or(""),
        "user signed in"
    );
    Ok(profile)
}

pub async fn get_profile(state: &AppState, user: Option<&CurrentUser>) -> AppResult<UserProfile> {
    let user = require_user(user, "view a profile")?;
    users::get_user_profile(state.db.pool(), &user.uid).await
}
