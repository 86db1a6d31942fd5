use std::path::PathBuf;

use crate::bootstrap::AppPaths;
use crate::config::schema::{
    AppConfig, BUCKET_PLACEHOLDER, INPUT_FILE_PLACEHOLDER, PROJECT_ID_PLACEHOLDER,
};
use crate::error::{AppError, AppResult};

/// Recognized credential reference when `job.credentials_path` is absent.
pub const CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub project_id: Option<String>,
    pub bucket: Option<String>,
    pub input_file: Option<String>,
    pub credentials_path: Option<PathBuf>,
    pub language: Option<String>,
    pub sample_rate_hertz: Option<u32>,
    pub encoding: Option<String>,
    pub model: Option<String>,
    pub punctuation: Option<bool>,
    pub timeout_seconds: Option<u64>,
}

pub fn load_config(paths: &AppPaths, overrides: &CliOverrides) -> AppResult<AppConfig> {
    let config_path = overrides
        .config_path
        .clone()
        .unwrap_or_else(|| paths.config_file.clone());

    let mut config = if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)?;
        toml::from_str::<AppConfig>(&raw)?
    } else {
        let defaults = AppConfig::default();
        write_default_config(&config_path, &defaults)?;
        defaults
    };

    apply_env_overrides(&mut config);
    apply_cli_overrides(&mut config, overrides);

    validate(&config)?;
    Ok(config)
}

fn write_default_config(path: &PathBuf, defaults: &AppConfig) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let data = toml::to_string_pretty(defaults)?;
    std::fs::write(path, data)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Structural checks applied on every load, independent of whether a job will
/// actually be submitted.
fn validate(config: &AppConfig) -> AppResult<()> {
    if config.job.timeout_seconds == 0 {
        return Err(AppError::Config(
            "job.timeout_seconds must be > 0".to_owned(),
        ));
    }

    if config.job.poll_interval_seconds == 0 {
        return Err(AppError::Config(
            "job.poll_interval_seconds must be > 0".to_owned(),
        ));
    }

    if !(config.adaptation.boost.is_finite() && config.adaptation.boost > 0.0) {
        return Err(AppError::Config(
            "adaptation.boost must be a positive number".to_owned(),
        ));
    }

    Ok(())
}

/// Gate run before any remote call. Rejects settings still at their placeholder
/// sentinel and a missing credential reference, so a job that is certain to
/// fail remotely fails locally instead.
pub fn validate_submission(config: &AppConfig) -> AppResult<()> {
    ensure_replaced("job.project_id", &config.job.project_id, PROJECT_ID_PLACEHOLDER)?;
    ensure_replaced("job.bucket", &config.job.bucket, BUCKET_PLACEHOLDER)?;
    ensure_replaced("job.input_file", &config.job.input_file, INPUT_FILE_PLACEHOLDER)?;

    match &config.job.credentials_path {
        Some(path) if path.is_file() => Ok(()),
        Some(path) => Err(AppError::Config(format!(
            "credential file job.credentials_path does not exist: {}",
            path.display()
        ))),
        None if std::env::var_os(CREDENTIALS_ENV_VAR).is_some() => Ok(()),
        None => Err(AppError::Config(format!(
            "no credential source: set {CREDENTIALS_ENV_VAR} or job.credentials_path"
        ))),
    }
}

fn ensure_replaced(setting: &str, value: &str, placeholder: &str) -> AppResult<()> {
    if value.trim().is_empty() || value == placeholder {
        return Err(AppError::Config(format!(
            "{setting} is not set; replace the `{placeholder}` placeholder"
        )));
    }
    Ok(())
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(value) = std::env::var("SPEECHJOB_PROJECT_ID") {
        if !value.trim().is_empty() {
            config.job.project_id = value;
        }
    }
    if let Ok(value) = std::env::var("SPEECHJOB_BUCKET") {
        if !value.trim().is_empty() {
            config.job.bucket = value;
        }
    }
    if let Ok(value) = std::env::var("SPEECHJOB_INPUT_FILE") {
        if !value.trim().is_empty() {
            config.job.input_file = value;
        }
    }
    if let Ok(value) = std::env::var("SPEECHJOB_CREDENTIALS_PATH") {
        if !value.trim().is_empty() {
            config.job.credentials_path = Some(PathBuf::from(value));
        }
    }
    if let Ok(value) = std::env::var("SPEECHJOB_LANGUAGE") {
        config.recognition.language = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
    }
    if let Ok(value) = std::env::var("SPEECHJOB_SAMPLE_RATE_HERTZ") {
        if let Ok(parsed) = value.parse::<u32>() {
            config.recognition.sample_rate_hertz = Some(parsed);
        }
    }
    if let Ok(value) = std::env::var("SPEECHJOB_ENCODING") {
        config.recognition.encoding = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
    }
    if let Ok(value) = std::env::var("SPEECHJOB_MODEL") {
        config.recognition.model = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
    }
    if let Ok(value) = std::env::var("SPEECHJOB_PUNCTUATION") {
        if let Some(parsed) = parse_bool(&value) {
            config.recognition.enable_automatic_punctuation = parsed;
        }
    }
    if let Ok(value) = std::env::var("SPEECHJOB_TIMEOUT_SECONDS") {
        if let Ok(parsed) = value.parse::<u64>() {
            config.job.timeout_seconds = parsed;
        }
    }
    if let Ok(value) = std::env::var("SPEECHJOB_POLL_INTERVAL_SECONDS") {
        if let Ok(parsed) = value.parse::<u64>() {
            config.job.poll_interval_seconds = parsed;
        }
    }
    if let Ok(value) = std::env::var("SPEECHJOB_LOG_LEVEL") {
        config.diagnostics.log_level = value;
    }
}

fn apply_cli_overrides(config: &mut AppConfig, overrides: &CliOverrides) {
    if let Some(value) = &overrides.project_id {
        config.job.project_id = value.clone();
    }
    if let Some(value) = &overrides.bucket {
        config.job.bucket = value.clone();
    }
    if let Some(value) = &overrides.input_file {
        config.job.input_file = value.clone();
    }
    if let Some(value) = &overrides.credentials_path {
        config.job.credentials_path = Some(value.clone());
    }
    if let Some(value) = &overrides.language {
        config.recognition.language = Some(value.clone());
    }
    if let Some(value) = overrides.sample_rate_hertz {
        config.recognition.sample_rate_hertz = Some(value);
    }
    if let Some(value) = &overrides.encoding {
        config.recognition.encoding = Some(value.clone());
    }
    if let Some(value) = &overrides.model {
        config.recognition.model = Some(value.clone());
    }
    if let Some(value) = overrides.punctuation {
        config.recognition.enable_automatic_punctuation = value;
    }
    if let Some(value) = overrides.timeout_seconds {
        config.job.timeout_seconds = value;
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
