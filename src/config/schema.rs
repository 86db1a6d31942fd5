use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sentinel values written into a fresh config file. Submission refuses to run
/// until the operator replaces them.
pub const PROJECT_ID_PLACEHOLDER: &str = "your-project-id-here";
pub const BUCKET_PLACEHOLDER: &str = "your-bucket-name-here";
pub const INPUT_FILE_PLACEHOLDER: &str = "your_file_name_here.wav";

/// Disfluencies the recognizer is biased toward by default.
pub const DEFAULT_FILLER_PHRASES: [&str; 7] = ["um", "uh", "hmm", "like", "so", "yeah", "okay"];
pub const DEFAULT_PHRASE_BOOST: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub job: JobConfig,
    pub recognition: RecognitionSettings,
    pub adaptation: AdaptationConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub project_id: String,
    pub bucket: String,
    pub input_file: String,
    pub credentials_path: Option<PathBuf>,
    pub timeout_seconds: u64,
    pub poll_interval_seconds: u64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            project_id: PROJECT_ID_PLACEHOLDER.to_owned(),
            bucket: BUCKET_PLACEHOLDER.to_owned(),
            input_file: INPUT_FILE_PLACEHOLDER.to_owned(),
            credentials_path: None,
            timeout_seconds: 600,
            poll_interval_seconds: 5,
        }
    }
}

impl JobConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

/// Recognition parameters passed through to the service exactly as configured.
/// Absent optionals are omitted from the request, leaving detection to the
/// service at some cost in accuracy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    pub language: Option<String>,
    pub sample_rate_hertz: Option<u32>,
    pub encoding: Option<String>,
    pub model: Option<String>,
    pub enable_automatic_punctuation: bool,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            language: None,
            sample_rate_hertz: None,
            encoding: None,
            model: Some("video".to_owned()),
            enable_automatic_punctuation: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptationConfig {
    pub phrases: Vec<String>,
    pub boost: f64,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_FILLER_PHRASES
                .iter()
                .map(|phrase| (*phrase).to_owned())
                .collect(),
            boost: DEFAULT_PHRASE_BOOST,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub log_level: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DEFAULT_FILLER_PHRASES};

    #[test]
    fn defaults_carry_placeholders_and_filler_phrases() {
        let config = AppConfig::default();
        assert_eq!(config.job.project_id, "your-project-id-here");
        assert_eq!(config.job.bucket, "your-bucket-name-here");
        assert_eq!(config.job.input_file, "your_file_name_here.wav");
        assert_eq!(config.job.timeout_seconds, 600);
        assert_eq!(config.adaptation.phrases, DEFAULT_FILLER_PHRASES.to_vec());
        assert_eq!(config.adaptation.boost, 10.0);
        assert_eq!(config.recognition.model.as_deref(), Some("video"));
        assert!(config.recognition.language.is_none());
        assert!(config.recognition.sample_rate_hertz.is_none());
        assert!(config.recognition.encoding.is_none());
        assert!(config.recognition.enable_automatic_punctuation);
    }

    #[test]
    fn timeout_and_poll_interval_convert_to_durations() {
        let config = AppConfig::default();
        assert_eq!(config.job.timeout().as_secs(), 600);
        assert_eq!(config.job.poll_interval().as_secs(), 5);
    }
}
