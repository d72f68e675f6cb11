use super::tts_repository::TtsRepository;
use crate::domain::tts::{AudioEncoding, VoiceSelection};
use crate::infrastructure::auth::ServiceAccountAuth;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Google Cloud Text-to-Speech rejects requests above 5000 characters
pub const GOOGLE_TTS_MAX_INPUT_CHARS: usize = 5000;

pub const GOOGLE_TTS_DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com";

/// How requests to the Text-to-Speech API are authorized
pub enum GoogleAuth {
    ApiKey(String),
    ServiceAccount(Arc<ServiceAccountAuth>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelectionParams<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: AudioEncoding,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
    status: Option<String>,
}

/// Google Cloud Text-to-Speech implementation of TTS repository
pub struct GoogleTtsRepository {
    http_client: reqwest::Client,
    endpoint: String,
    auth: GoogleAuth,
    voice: VoiceSelection,
    audio_encoding: AudioEncoding,
}

impl GoogleTtsRepository {
    pub fn new(
        http_client: reqwest::Client,
        endpoint: String,
        auth: GoogleAuth,
        voice: VoiceSelection,
        audio_encoding: AudioEncoding,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            auth,
            voice,
            audio_encoding,
        }
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.endpoint)
    }

    async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, String> {
        match &self.auth {
            GoogleAuth::ApiKey(key) => Ok(request.query(&[("key", key.as_str())])),
            GoogleAuth::ServiceAccount(auth) => {
                let token = auth.access_token().await.map_err(|e| e.to_string())?;
                Ok(request.bearer_auth(token))
            }
        }
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, String> {
        let body = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelectionParams {
                language_code: &self.voice.language_code,
                name: &self.voice.name,
                ssml_gender: self.voice.gender.as_str(),
            },
            audio_config: AudioConfig {
                audio_encoding: self.audio_encoding,
            },
        };

        tracing::debug!(
            voice = %self.voice.name,
            language = %self.voice.language_code,
            audio_encoding = %self.audio_encoding,
            text_length = text.chars().count(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling Google Text-to-Speech synthesize"
        );

        let request = self.http_client.post(self.synthesize_url()).json(&body);
        let response = self
            .authorize(request)
            .await?
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Google Text-to-Speech request failed");
                format!("Google Text-to-Speech request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<GoogleErrorEnvelope>(&error_text)
                .map(|envelope| match envelope.error.status {
                    Some(code) => format!("{}: {}", code, envelope.error.message),
                    None => envelope.error.message,
                })
                .unwrap_or(error_text);

            tracing::error!(
                status = status.as_u16(),
                error = %message,
                "Google Text-to-Speech returned an error"
            );
            return Err(format!(
                "Google Text-to-Speech error (HTTP {}): {}",
                status.as_u16(),
                message
            ));
        }

        let payload: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| format!("Invalid Google Text-to-Speech response: {}", e))?;

        let audio_bytes = STANDARD
            .decode(payload.audio_content.as_bytes())
            .map_err(|e| format!("Invalid base64 audio content: {}", e))?;

        tracing::debug!(audio_size = audio_bytes.len(), "Audio content decoded");

        Ok(audio_bytes)
    }
}
