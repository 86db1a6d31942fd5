use crate::config::{AppConfig, JobConfig};
use crate::transcription::protocol::{
    LongRunningRecognizeRequest, Phrase, PhraseSet, RecognitionAudio, RecognitionConfig,
    SpeechAdaptation, TranscriptOutputConfig,
};

/// One submitted unit of work: the derived source and destination references
/// plus the request that created it. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionJob {
    pub input_uri: String,
    pub output_uri: String,
    pub request: LongRunningRecognizeRequest,
}

pub fn input_uri(job: &JobConfig) -> String {
    format!("gs://{}/audio/{}", job.bucket, job.input_file)
}

/// `<bucket>/transcripts/<input_file>.json`, without the storage scheme.
pub fn output_location(job: &JobConfig) -> String {
    format!("{}/transcripts/{}.json", job.bucket, job.input_file)
}

pub fn output_uri(job: &JobConfig) -> String {
    format!("gs://{}", output_location(job))
}

pub fn build_job(config: &AppConfig) -> TranscriptionJob {
    let input_uri = input_uri(&config.job);
    let output_uri = output_uri(&config.job);

    let request = LongRunningRecognizeRequest {
        config: RecognitionConfig {
            encoding: config.recognition.encoding.clone(),
            sample_rate_hertz: config.recognition.sample_rate_hertz,
            language_code: config.recognition.language.clone(),
            model: config.recognition.model.clone(),
            enable_automatic_punctuation: config.recognition.enable_automatic_punctuation,
            adaptation: SpeechAdaptation {
                phrase_sets: vec![PhraseSet {
                    phrases: config
                        .adaptation
                        .phrases
                        .iter()
                        .map(|phrase| Phrase {
                            value: phrase.clone(),
                            boost: config.adaptation.boost,
                        })
                        .collect(),
                }],
            },
        },
        audio: RecognitionAudio {
            uri: input_uri.clone(),
        },
        output_config: TranscriptOutputConfig {
            gcs_uri: output_uri.clone(),
        },
    };

    TranscriptionJob {
        input_uri,
        output_uri,
        request,
    }
}

#[cfg(test)]
mod tests {
    use super::{build_job, output_location};
    use crate::config::schema::DEFAULT_FILLER_PHRASES;
    use crate::config::AppConfig;

    fn sample_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.job.project_id = "spark-f5c5c".to_owned();
        config.job.bucket = "speech-to-text-prg".to_owned();
        config.job.input_file = "P1.wav".to_owned();
        config
    }

    #[test]
    fn output_location_is_derived_from_bucket_and_file_name() {
        let config = sample_config();
        assert_eq!(
            output_location(&config.job),
            "speech-to-text-prg/transcripts/P1.wav.json"
        );
        // Idempotent: deriving twice from the same config yields the same location.
        assert_eq!(output_location(&config.job), output_location(&config.job));
    }

    #[test]
    fn job_carries_derived_uris_on_both_sides_of_the_request() {
        let job = build_job(&sample_config());
        assert_eq!(job.input_uri, "gs://speech-to-text-prg/audio/P1.wav");
        assert_eq!(
            job.output_uri,
            "gs://speech-to-text-prg/transcripts/P1.wav.json"
        );
        assert_eq!(job.request.audio.uri, job.input_uri);
        assert_eq!(job.request.output_config.gcs_uri, job.output_uri);
    }

    #[test]
    fn default_adaptation_payload_is_the_filler_set_regardless_of_input_file() {
        for input_file in ["P1.wav", "interview-42.flac"] {
            let mut config = sample_config();
            config.job.input_file = input_file.to_owned();
            let job = build_job(&config);

            let phrase_sets = &job.request.config.adaptation.phrase_sets;
            assert_eq!(phrase_sets.len(), 1);
            let phrases = &phrase_sets[0].phrases;
            let values: Vec<&str> = phrases.iter().map(|phrase| phrase.value.as_str()).collect();
            assert_eq!(values, DEFAULT_FILLER_PHRASES.to_vec());
            assert!(phrases.iter().all(|phrase| phrase.boost == 10.0));
        }
    }

    #[test]
    fn recognition_parameters_pass_through_exactly_as_configured() {
        let mut config = sample_config();
        config.recognition.language = Some("en-US".to_owned());
        config.recognition.sample_rate_hertz = Some(16_000);
        config.recognition.encoding = Some("LINEAR16".to_owned());
        config.recognition.model = Some("telephony".to_owned());
        config.recognition.enable_automatic_punctuation = false;

        let job = build_job(&config);
        assert_eq!(job.request.config.language_code.as_deref(), Some("en-US"));
        assert_eq!(job.request.config.sample_rate_hertz, Some(16_000));
        assert_eq!(job.request.config.encoding.as_deref(), Some("LINEAR16"));
        assert_eq!(job.request.config.model.as_deref(), Some("telephony"));
        assert!(!job.request.config.enable_automatic_punctuation);
    }

    #[test]
    fn unset_recognition_parameters_stay_unset() {
        let mut config = sample_config();
        config.recognition.language = None;
        config.recognition.sample_rate_hertz = None;
        config.recognition.encoding = None;

        let job = build_job(&config);
        assert!(job.request.config.language_code.is_none());
        assert!(job.request.config.sample_rate_hertz.is_none());
        assert!(job.request.config.encoding.is_none());
    }
}
