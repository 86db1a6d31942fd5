use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CliOverrides;

#[derive(Debug, Parser)]
#[command(name = "speechjob")]
#[command(about = "One-shot Cloud Speech-to-Text transcription job runner")]
pub struct Cli {
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub project_id: Option<String>,

    #[arg(long)]
    pub bucket: Option<String>,

    #[arg(long)]
    pub input_file: Option<String>,

    #[arg(long)]
    pub credentials: Option<PathBuf>,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub sample_rate_hertz: Option<u32>,

    #[arg(long)]
    pub encoding: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub punctuation: Option<bool>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit the configured audio file and wait for the transcript.
    Submit,
    /// Report whether this machine is ready to submit a job.
    Doctor {
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn to_overrides(&self) -> CliOverrides {
        CliOverrides {
            config_path: self.config.clone(),
            project_id: self.project_id.clone(),
            bucket: self.bucket.clone(),
            input_file: self.input_file.clone(),
            credentials_path: self.credentials.clone(),
            language: self.language.clone(),
            sample_rate_hertz: self.sample_rate_hertz,
            encoding: self.encoding.clone(),
            model: self.model.clone(),
            punctuation: self.punctuation,
            timeout_seconds: self.timeout_seconds,
        }
    }
}
