use crate::{
    core::{
        errors::{AppError, AppResult},
        types::{ListOptionsResponse, Provider, SetProviderKeyResponse},
    },
    planner::catalog::{BUDGET_OPTIONS, TRAVELER_OPTIONS},
    security::keyring,
    AppState,
};

pub async fn set_provider_key(
    _state: &AppState,
    provider: Provider,
    api_key: String,
) -> AppResult<SetProviderKeyResponse> {
    if api_key.trim().is_empty() {
        return Err(AppError::InvalidInput("api key cannot be empty".to_string()));
    }
    keyring::set_provider_key(provider, api_key.trim())?;
    Ok(SetProviderKeyResponse { stored: true })
}

pub fn list_options(state: &AppState) -> ListOptionsResponse {
    ListOptionsResponse {
        budgets: BUDGET_OPTIONS.to_vec(),
        travelers: TRAVELER_OPTIONS.to_vec(),
        max_days: state.config.max_days,
    }
}
