use crate::domain::tts::{AudioEncoding, VoiceGender, VoiceSelection};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::{GOOGLE_TTS_DEFAULT_ENDPOINT, GOOGLE_TTS_MAX_INPUT_CHARS};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Default chunk size, 2% below the provider ceiling
pub const DEFAULT_MAX_CHARS: usize = 4900;

/// Largest accepted `max_chars`: at least 1% headroom below the provider ceiling
pub const MAX_CHARS_LIMIT: usize = GOOGLE_TTS_MAX_INPUT_CHARS * 99 / 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub max_chars: usize,
    pub voice: VoiceSelection,
    pub audio_encoding: AudioEncoding,
    pub output_path: PathBuf,
    pub normalize_whitespace: bool,
    // Google Cloud
    pub google_credentials_path: PathBuf,
    pub google_api_key: Option<String>,
    pub google_tts_endpoint: String,
    // Logging
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            voice: VoiceSelection::default(),
            audio_encoding: AudioEncoding::Mp3,
            output_path: PathBuf::from("output.mp3"),
            normalize_whitespace: true,
            google_credentials_path: PathBuf::from("google_credentials.json"),
            google_api_key: None,
            google_tts_endpoint: GOOGLE_TTS_DEFAULT_ENDPOINT.to_string(),
            log_format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let config = Config {
            max_chars: match env::var("TTS_MAX_CHARS") {
                Ok(value) => value.trim().parse().map_err(|e| {
                    AppError::Config(format!(
                        "TTS_MAX_CHARS '{}' is not a positive integer: {}",
                        value, e
                    ))
                })?,
                Err(_) => defaults.max_chars,
            },
            voice: VoiceSelection {
                language_code: env::var("TTS_LANGUAGE_CODE")
                    .unwrap_or(defaults.voice.language_code),
                name: env::var("TTS_VOICE_NAME").unwrap_or(defaults.voice.name),
                gender: match env::var("TTS_VOICE_GENDER") {
                    Ok(value) => value
                        .parse::<VoiceGender>()
                        .map_err(|e| AppError::Config(format!("TTS_VOICE_GENDER: {}", e)))?,
                    Err(_) => defaults.voice.gender,
                },
            },
            audio_encoding: match env::var("TTS_AUDIO_ENCODING") {
                Ok(value) => value
                    .parse::<AudioEncoding>()
                    .map_err(|e| AppError::Config(format!("TTS_AUDIO_ENCODING: {}", e)))?,
                Err(_) => defaults.audio_encoding,
            },
            output_path: env::var("OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            normalize_whitespace: env::var("TEXT_NORMALIZE_WHITESPACE")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(defaults.normalize_whitespace),
            google_credentials_path: env::var("GOOGLE_APPLICATION_CREDENTIALS")
                .map(PathBuf::from)
                .unwrap_or(defaults.google_credentials_path),
            google_api_key: env::var("GOOGLE_TTS_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            google_tts_endpoint: env::var("GOOGLE_TTS_ENDPOINT")
                .unwrap_or(defaults.google_tts_endpoint),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })
                .unwrap_or(LogFormat::Pretty),
            log_file: env::var("LOG_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on values the provider would reject; nothing is clamped
    pub fn validate(&self) -> AppResult<()> {
        validate_max_chars(self.max_chars)?;

        if self.voice.language_code.trim().is_empty() {
            return Err(AppError::Config("TTS_LANGUAGE_CODE must not be empty".to_string()));
        }
        if self.voice.name.trim().is_empty() {
            return Err(AppError::Config("TTS_VOICE_NAME must not be empty".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(AppError::Config("OUTPUT_PATH must not be empty".to_string()));
        }

        Ok(())
    }
}

/// `max_chars` must be positive and leave headroom below the provider ceiling
pub fn validate_max_chars(max_chars: usize) -> AppResult<()> {
    if max_chars == 0 {
        return Err(AppError::Config(
            "max_chars must be a positive integer".to_string(),
        ));
    }
    if max_chars > MAX_CHARS_LIMIT {
        return Err(AppError::Config(format!(
            "max_chars {} is too close to the {} character request limit (maximum {})",
            max_chars, GOOGLE_TTS_MAX_INPUT_CHARS, MAX_CHARS_LIMIT
        )));
    }
    Ok(())
}
