use crate::config::{AppConfig, CREDENTIALS_ENV_VAR};

/// Exports `job.credentials_path` as the credential env var so downstream
/// tooling (gcloud token minting) sees the same credential the config names.
/// An env var already set by the operator wins.
pub fn bootstrap_env(config: &AppConfig) {
    if std::env::var_os(CREDENTIALS_ENV_VAR).is_some() {
        return;
    }

    if let Some(path) = &config.job.credentials_path {
        std::env::set_var(CREDENTIALS_ENV_VAR, path);
    }
}
