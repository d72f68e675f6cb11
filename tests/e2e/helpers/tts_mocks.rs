use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use pdf_to_speech::domain::tts::{AudioEncoding, VoiceSelection};
use pdf_to_speech::infrastructure::repositories::{GoogleAuth, GoogleTtsRepository, TtsRepository};
use std::sync::Mutex;

/// Base64 `audioContent` as returned by the Text-to-Speech API
pub fn audio_content(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Google repository pointed at a mock server, authorized with an API key
pub fn api_key_repository(base_url: String) -> GoogleTtsRepository {
    GoogleTtsRepository::new(
        reqwest::Client::new(),
        base_url,
        GoogleAuth::ApiKey("test-key".to_string()),
        VoiceSelection::default(),
        AudioEncoding::Mp3,
    )
}

/// In-process provider: answers each chunk with a marker byte equal to the
/// call index, optionally failing on one call
#[derive(Default)]
pub struct RecordingRepository {
    calls: Mutex<Vec<String>>,
    fail_on: Option<usize>,
}

impl RecordingRepository {
    pub fn failing_on(index: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(index),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TtsRepository for RecordingRepository {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, String> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push(text.to_string());
        if self.fail_on == Some(index) {
            return Err(format!("simulated provider failure on call {}", index));
        }
        Ok(vec![index as u8])
    }
}
