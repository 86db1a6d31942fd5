use async_trait::async_trait;

use crate::error::AppResult;
use crate::transcription::protocol::{LongRunningRecognizeRequest, Operation};

pub const SPEECH_API_URL: &str = "https://speech.googleapis.com/v1p1beta1";

/// Seam between the job runner and the remote recognition service.
#[async_trait]
pub trait RecognizerClient {
    async fn submit(&self, request: &LongRunningRecognizeRequest) -> AppResult<Operation>;
    async fn get_operation(&self, name: &str) -> AppResult<Operation>;
    async fn cancel_operation(&self, name: &str) -> AppResult<()>;
}

pub struct SpeechApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SpeechApiClient {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(SPEECH_API_URL.to_owned(), access_token)
    }

    pub fn with_base_url(base_url: String, access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            access_token,
        }
    }

    fn recognize_url(&self) -> String {
        format!("{}/speech:longrunningrecognize", self.base_url)
    }

    fn operation_url(&self, name: &str) -> String {
        format!("{}/operations/{name}", self.base_url)
    }

    fn cancel_url(&self, name: &str) -> String {
        format!("{}/operations/{name}:cancel", self.base_url)
    }
}

#[async_trait]
impl RecognizerClient for SpeechApiClient {
    async fn submit(&self, request: &LongRunningRecognizeRequest) -> AppResult<Operation> {
        let response = self
            .http
            .post(self.recognize_url())
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Operation>().await?)
    }

    async fn get_operation(&self, name: &str) -> AppResult<Operation> {
        let response = self
            .http
            .get(self.operation_url(name))
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Operation>().await?)
    }

    async fn cancel_operation(&self, name: &str) -> AppResult<()> {
        self.http
            .post(self.cancel_url(name))
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SpeechApiClient;

    #[test]
    fn endpoint_urls_are_joined_against_the_base() {
        let client =
            SpeechApiClient::with_base_url("http://localhost:9999/v1p1beta1".to_owned(), "t".to_owned());
        assert_eq!(
            client.recognize_url(),
            "http://localhost:9999/v1p1beta1/speech:longrunningrecognize"
        );
        assert_eq!(
            client.operation_url("7532263941293184"),
            "http://localhost:9999/v1p1beta1/operations/7532263941293184"
        );
        assert_eq!(
            client.cancel_url("7532263941293184"),
            "http://localhost:9999/v1p1beta1/operations/7532263941293184:cancel"
        );
    }

    #[test]
    fn default_base_url_targets_the_speech_api() {
        let client = SpeechApiClient::new("t".to_owned());
        assert!(client
            .recognize_url()
            .starts_with("https://speech.googleapis.com/v1p1beta1"));
    }
}
