use std::process::Command;

use crate::error::{AppError, AppResult};

const GCLOUD_BINARY: &str = "gcloud";

/// Mints a short-lived access token through the gcloud CLI. Application
/// default credentials resolve from GOOGLE_APPLICATION_CREDENTIALS, which
/// the submission gate has already verified.
pub fn mint_access_token() -> AppResult<String> {
    which::which(GCLOUD_BINARY).map_err(|_| AppError::BinaryMissing {
        binary: GCLOUD_BINARY.to_owned(),
    })?;

    let output = Command::new(GCLOUD_BINARY)
        .args(["auth", "application-default", "print-access-token"])
        .output()?;

    if !output.status.success() {
        return Err(AppError::Auth(format!(
            "gcloud print-access-token failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    token_from_output(&output.stdout)
}

fn token_from_output(stdout: &[u8]) -> AppResult<String> {
    let token = String::from_utf8_lossy(stdout).trim().to_owned();
    if token.is_empty() {
        return Err(AppError::Auth(
            "gcloud returned an empty access token".to_owned(),
        ));
    }
    Ok(token)
}
