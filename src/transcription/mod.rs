pub mod client;
pub mod protocol;
pub mod request_builder;
pub mod runner;

pub use client::{RecognizerClient, SpeechApiClient};
pub use request_builder::{build_job, TranscriptionJob};
pub use runner::{run_transcription_job, JobOutcome};
