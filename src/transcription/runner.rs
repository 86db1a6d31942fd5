use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::transcription::client::RecognizerClient;
use crate::transcription::protocol::Operation;
use crate::transcription::request_builder::build_job;

#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub operation: String,
    pub destination: String,
    pub finished_at_rfc3339: String,
}

/// Drives one job from request construction to a terminal outcome: submit,
/// then poll the returned operation until it reports done or the configured
/// timeout elapses. A timed-out wait sends a best-effort cancel so the remote
/// job does not keep running unattended.
pub async fn run_transcription_job(
    client: &impl RecognizerClient,
    config: &AppConfig,
) -> AppResult<JobOutcome> {
    let job = build_job(config);
    let destination = job.output_uri.clone();

    tracing::info!(input = %job.input_uri, "submitting transcription job");
    let operation = client.submit(&job.request).await?;
    let operation_name = operation.name.clone();
    tracing::info!(operation = %operation_name, "job accepted, waiting for completion");

    let waited = tokio::time::timeout(
        config.job.timeout(),
        await_completion(client, operation, config.job.poll_interval(), &destination),
    )
    .await;

    match waited {
        Ok(result) => result.map(|operation| JobOutcome {
            operation: operation.name,
            destination: destination.clone(),
            finished_at_rfc3339: Utc::now().to_rfc3339(),
        }),
        Err(_elapsed) => {
            if let Err(error) = client.cancel_operation(&operation_name).await {
                tracing::warn!(operation = %operation_name, %error, "cancel after timeout failed");
            }
            Err(AppError::Timeout {
                destination,
                seconds: config.job.timeout_seconds,
            })
        }
    }
}

async fn await_completion(
    client: &impl RecognizerClient,
    mut operation: Operation,
    poll_interval: Duration,
    destination: &str,
) -> AppResult<Operation> {
    loop {
        if operation.done {
            return match operation.error.take() {
                Some(error) => Err(AppError::Submission {
                    destination: destination.to_owned(),
                    cause: format!("{} (code {})", error.message, error.code),
                }),
                None => Ok(operation),
            };
        }

        tokio::time::sleep(poll_interval).await;
        operation = client.get_operation(&operation.name).await?;
    }
}
