//! Provider keys in the OS credential store.
//!
//! Backends: macOS Keychain, Windows Credential Manager, and on Linux the
//! Secret Service with a kernel keyutils cache. A write is read back through a
//! fresh entry so a store that does not persist is reported as an error.

use crate::core::{
    errors::{AppError, AppResult},
    types::Provider,
};

const KEYRING_SERVICE: &str = "trip-planner";

fn username_for_provider(provider: &Provider) -> &'static str {
    match provider {
        Provider::Gemini => "gemini",
    }
}

fn env_var_for_provider(provider: &Provider) -> &'static str {
    match provider {
        Provider::Gemini => "GEMINI_API_KEY",
    }
}

fn entry(service: &str, username: &str) -> AppResult<keyring::Entry> {
    keyring::Entry::new(service, username).map_err(|err| AppError::Internal(err.to_string()))
}

fn store_key(service: &str, username: &str, api_key: &str) -> AppResult<()> {
    entry(service, username)?
        .set_password(api_key)
        .map_err(|err| AppError::Internal(err.to_string()))?;

    match entry(service, username)?.get_password() {
        Ok(stored) if stored == api_key => Ok(()),
        Ok(_) => Err(AppError::Internal(format!(
            "keyring entry {service}/{username} did not keep the new key"
        ))),
        Err(err) => Err(AppError::Internal(format!(
            "keyring entry {service}/{username} was not persisted: {err}"
        ))),
    }
}

fn load_key(service: &str, username: &str) -> AppResult<String> {
    entry(service, username)?
        .get_password()
        .map_err(|_err| AppError::ProviderAuth)
}

pub fn set_provider_key(provider: Provider, api_key: &str) -> AppResult<()> {
    store_key(KEYRING_SERVICE, username_for_provider(&provider), api_key)
}

/// Environment first, then the OS keyring.
pub fn get_provider_key(provider: Provider) -> AppResult<String> {
    if let Ok(value) = std::env::var(env_var_for_provider(&provider)) {
        if !value.trim().is_empty() {
            return Ok(value.trim().to_string());
        }
    }
    load_key(KEYRING_SERVICE, username_for_provider(&provider))
}
