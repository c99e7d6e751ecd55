use crate::core::{
    errors::{AppError, AppResult},
    types::{CurrentUser, TripRecord},
};

pub fn require_user<'a>(user: Option<&'a CurrentUser>, action: &str) -> AppResult<&'a CurrentUser> {
    user.filter(|user| !user.uid.trim().is_empty())
        .ok_or_else(|| AppError::Unauthenticated(format!("user must be signed in to {action}")))
}

pub fn ensure_owner(user: &CurrentUser, trip: &TripRecord, action: &str) -> AppResult<()> {
    if trip.user_id != user.uid {
        return Err(AppError::Forbidden(format!("you can only {action} your own trips")));
    }
    Ok(())
}
