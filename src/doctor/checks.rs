use std::process::Command;

use chrono::Utc;
use regex::Regex;

use crate::config::schema::{
    BUCKET_PLACEHOLDER, INPUT_FILE_PLACEHOLDER, PROJECT_ID_PLACEHOLDER,
};
use crate::config::{AppConfig, JobConfig, CREDENTIALS_ENV_VAR};
use crate::doctor::report::{CheckResult, CheckStatus, DoctorReport};

const GCLOUD_MIN_VERSION: &str = "400.0";

pub fn run_doctor(config: &AppConfig) -> DoctorReport {
    let mut checks = Vec::new();

    checks.push(check_binary_version(
        "gcloud",
        GCLOUD_MIN_VERSION,
        true,
        Some("Install the Google Cloud SDK and ensure gcloud is on PATH."),
    ));
    checks.push(check_credentials(config));
    checks.extend(check_job_settings(&config.job));

    DoctorReport::from_checks(Utc::now().to_rfc3339(), checks)
}

fn check_binary_version(
    binary: &str,
    min_version: &str,
    required: bool,
    hint: Option<&str>,
) -> CheckResult {
    let path = match which::which(binary) {
        Ok(path) => path,
        Err(_) => {
            return CheckResult {
                name: binary.to_owned(),
                status: CheckStatus::Fail,
                detail: "binary not found in PATH".to_owned(),
                required,
                hint: hint.map(ToOwned::to_owned),
            }
        }
    };

    let output = version_output(binary);
    let parsed = output.as_deref().and_then(parse_version_triplet);

    match parsed {
        Some(found) => {
            if found >= parse_target_version(min_version) {
                CheckResult {
                    name: binary.to_owned(),
                    status: CheckStatus::Pass,
                    detail: format!(
                        "{} (>= {}) at {}",
                        version_triplet_string(&found),
                        min_version,
                        path.display()
                    ),
                    required,
                    hint: None,
                }
            } else {
                CheckResult {
                    name: binary.to_owned(),
                    status: CheckStatus::Fail,
                    detail: format!("{} (< {})", version_triplet_string(&found), min_version),
                    required,
                    hint: hint.map(ToOwned::to_owned),
                }
            }
        }
        None => CheckResult {
            name: binary.to_owned(),
            status: CheckStatus::Warn,
            detail: format!("installed at {}, version parse failed", path.display()),
            required,
            hint: hint.map(ToOwned::to_owned),
        },
    }
}

fn version_output(binary: &str) -> Option<String> {
    let variants = [["--version"], ["version"]];

    for args in variants {
        let output = Command::new(binary).args(args).output().ok()?;
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).to_string()
        } else {
            String::from_utf8_lossy(&output.stdout).to_string()
        };
        if !text.trim().is_empty() {
            return Some(text);
        }
    }

    None
}

fn parse_version_triplet(text: &str) -> Option<[u32; 3]> {
    let regex = Regex::new(r"(?P<a>\d+)\.(?P<b>\d+)(?:\.(?P<c>\d+))?").ok()?;
    let captures = regex.captures(text)?;

    let major = captures.name("a")?.as_str().parse::<u32>().ok()?;
    let minor = captures.name("b")?.as_str().parse::<u32>().ok()?;
    let patch = captures
        .name("c")
        .map(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(Some(0))?;

    Some([major, minor, patch])
}

fn parse_target_version(text: &str) -> [u32; 3] {
    let mut parts = text
        .split('.')
        .filter_map(|part| part.parse::<u32>().ok())
        .collect::<Vec<_>>();
    while parts.len() < 3 {
        parts.push(0);
    }

    [parts[0], parts[1], parts[2]]
}

fn version_triplet_string(value: &[u32; 3]) -> String {
    format!("{}.{}.{}", value[0], value[1], value[2])
}

fn check_credentials(config: &AppConfig) -> CheckResult {
    let name = "credentials".to_owned();

    if let Some(path) = &config.job.credentials_path {
        return if path.is_file() {
            CheckResult {
                name,
                status: CheckStatus::Pass,
                detail: format!("job.credentials_path = {}", path.display()),
                required: true,
                hint: None,
            }
        } else {
            CheckResult {
                name,
                status: CheckStatus::Fail,
                detail: format!("job.credentials_path does not exist: {}", path.display()),
                required: true,
                hint: Some("Point job.credentials_path at a service account key file.".to_owned()),
            }
        };
    }

    match std::env::var_os(CREDENTIALS_ENV_VAR) {
        Some(value) => {
            let path = std::path::PathBuf::from(&value);
            if path.is_file() {
                CheckResult {
                    name,
                    status: CheckStatus::Pass,
                    detail: format!("{CREDENTIALS_ENV_VAR} = {}", path.display()),
                    required: true,
                    hint: None,
                }
            } else {
                CheckResult {
                    name,
                    status: CheckStatus::Warn,
                    detail: format!(
                        "{CREDENTIALS_ENV_VAR} is set but {} is not a file",
                        path.display()
                    ),
                    required: true,
                    hint: Some(
                        "Verify the env var points at an existing service account key.".to_owned(),
                    ),
                }
            }
        }
        None => CheckResult {
            name,
            status: CheckStatus::Fail,
            detail: format!("{CREDENTIALS_ENV_VAR} is not set and job.credentials_path is empty"),
            required: true,
            hint: Some(format!(
                "Export {CREDENTIALS_ENV_VAR} or set job.credentials_path in the config file."
            )),
        },
    }
}

fn check_job_settings(job: &JobConfig) -> Vec<CheckResult> {
    let settings = [
        ("job.project_id", &job.project_id, PROJECT_ID_PLACEHOLDER),
        ("job.bucket", &job.bucket, BUCKET_PLACEHOLDER),
        ("job.input_file", &job.input_file, INPUT_FILE_PLACEHOLDER),
    ];

    settings
        .iter()
        .map(|(name, value, placeholder)| {
            if value.trim().is_empty() || value.as_str() == *placeholder {
                CheckResult {
                    name: (*name).to_owned(),
                    status: CheckStatus::Fail,
                    detail: format!("still set to the `{placeholder}` placeholder"),
                    required: true,
                    hint: Some(format!("Set {name} before submitting a job.")),
                }
            } else {
                CheckResult {
                    name: (*name).to_owned(),
                    status: CheckStatus::Pass,
                    detail: (*value).clone(),
                    required: true,
                    hint: None,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{check_credentials, check_job_settings, parse_target_version, parse_version_triplet};
    use crate::config::{AppConfig, CREDENTIALS_ENV_VAR};
    use crate::doctor::report::CheckStatus;

    #[test]
    fn version_triplet_parses_gcloud_style_output() {
        assert_eq!(
            parse_version_triplet("Google Cloud SDK 502.0.0\nbq 2.1.11\n"),
            Some([502, 0, 0])
        );
        assert_eq!(parse_version_triplet("tool 1.2"), Some([1, 2, 0]));
        assert_eq!(parse_version_triplet("no digits here"), None);
    }

    #[test]
    fn target_version_pads_missing_components() {
        assert_eq!(parse_target_version("400.0"), [400, 0, 0]);
        assert_eq!(parse_target_version("1.2.3"), [1, 2, 3]);
    }

    #[test]
    fn placeholder_settings_fail_and_real_values_pass() {
        let mut config = AppConfig::default();
        let checks = check_job_settings(&config.job);
        assert_eq!(checks.len(), 3);
        assert!(checks.iter().all(|check| check.status == CheckStatus::Fail));

        config.job.project_id = "spark-f5c5c".to_owned();
        config.job.bucket = "speech-to-text-prg".to_owned();
        config.job.input_file = "P1.wav".to_owned();
        let checks = check_job_settings(&config.job);
        assert!(checks.iter().all(|check| check.status == CheckStatus::Pass));
        assert_eq!(checks[1].detail, "speech-to-text-prg");
    }

    #[test]
    fn missing_credential_source_fails_the_credential_check() {
        let _guard = crate::test_support::lock_env();
        let old = std::env::var(CREDENTIALS_ENV_VAR).ok();
        std::env::remove_var(CREDENTIALS_ENV_VAR);

        let config = AppConfig::default();
        let check = check_credentials(&config);
        assert_eq!(check.status, CheckStatus::Fail);
        assert!(check.detail.contains(CREDENTIALS_ENV_VAR));

        match old {
            Some(value) => std::env::set_var(CREDENTIALS_ENV_VAR, value),
            None => std::env::remove_var(CREDENTIALS_ENV_VAR),
        }
    }

    #[test]
    fn existing_credential_file_passes_the_credential_check() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let key_file = tmp.path().join("sa.json");
        std::fs::write(&key_file, "{}").expect("write key");

        let mut config = AppConfig::default();
        config.job.credentials_path = Some(key_file);
        let check = check_credentials(&config);
        assert_eq!(check.status, CheckStatus::Pass);

        config.job.credentials_path = Some(tmp.path().join("missing.json"));
        let check = check_credentials(&config);
        assert_eq!(check.status, CheckStatus::Fail);
    }
}
