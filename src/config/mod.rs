pub mod load;
pub mod schema;

pub use load::{load_config, validate_submission, CliOverrides, CREDENTIALS_ENV_VAR};
pub use schema::{
    AdaptationConfig, AppConfig, DiagnosticsConfig, JobConfig, RecognitionSettings,
};
