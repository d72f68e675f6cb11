use super::chunker::split_text;
use super::error::TtsServiceError;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    pub audio_data: Vec<u8>,
    pub chunk_count: usize,
    pub char_count: usize,
    pub word_count: usize,
}

/// Chunk `text` and synthesize every chunk strictly in order, returning the
/// concatenated audio.
///
/// A text without any non-whitespace character short-circuits to empty audio
/// without calling the provider.
pub async fn run(
    text: &str,
    max_chars: usize,
    tts_repo: &dyn TtsRepository,
) -> Result<Vec<u8>, TtsServiceError> {
    let (_, audio_data) = run_chunked(text, max_chars, tts_repo).await?;
    Ok(audio_data)
}

/// `run`, also reporting how many chunks were sent to the provider
async fn run_chunked(
    text: &str,
    max_chars: usize,
    tts_repo: &dyn TtsRepository,
) -> Result<(usize, Vec<u8>), TtsServiceError> {
    if max_chars == 0 {
        return Err(TtsServiceError::Config(
            "max_chars must be a positive integer".to_string(),
        ));
    }

    if text.trim().is_empty() {
        tracing::warn!("Empty text, skipping synthesis");
        return Ok((0, Vec::new()));
    }

    let chunks = split_text(text, max_chars);
    tracing::info!(
        chunk_count = chunks.len(),
        max_chars,
        text_length = text.chars().count(),
        "Text split into chunks"
    );

    let audio_data = synthesize_chunks(&chunks, tts_repo).await?;
    Ok((chunks.len(), audio_data))
}

/// Synthesize chunks one at a time and merge the audio in chunk order.
///
/// Each call is awaited before the next chunk starts. The first failing chunk
/// aborts the run and no partial audio is returned.
async fn synthesize_chunks(
    chunks: &[String],
    tts_repo: &dyn TtsRepository,
) -> Result<Vec<u8>, TtsServiceError> {
    let chunk_count = chunks.len();
    let mut merged_audio = Vec::new();

    for (index, chunk) in chunks.iter().enumerate() {
        let char_count = chunk.chars().count();
        tracing::info!(
            chunk_index = index,
            chunk_size = char_count,
            "Processing chunk {}/{}",
            index + 1,
            chunk_count
        );

        let audio_data = tts_repo.synthesize(chunk).await.map_err(|message| {
            tracing::error!(
                chunk_index = index,
                chunk_size = char_count,
                error = %message,
                "Chunk synthesis failed, aborting"
            );
            TtsServiceError::Synthesis {
                index,
                char_count,
                message,
            }
        })?;
        merged_audio.extend(audio_data);

        tracing::debug!(
            chunk_index = index,
            total_audio_size = merged_audio.len(),
            "Chunk synthesized and merged"
        );
    }

    Ok(merged_audio)
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    max_chars: usize,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        max_chars: usize,
    ) -> Result<Self, TtsServiceError> {
        if max_chars == 0 {
            return Err(TtsServiceError::Config(
                "max_chars must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            tts_repo,
            max_chars,
        })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize a whole document into one audio stream
    ///
    /// This operation:
    /// - Splits the text into chunks below the provider ceiling
    /// - Calls the provider once per chunk, in order
    /// - Concatenates the audio segments
    async fn synthesize(&self, text: &str) -> Result<TtsSynthesisResult, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(&self, text: &str) -> Result<TtsSynthesisResult, TtsServiceError> {
        let start_time = Instant::now();
        let char_count = text.chars().count();
        let word_count = text.split_whitespace().count();
        tracing::info!(char_count, word_count, "TTS synthesis request");

        let (chunk_count, audio_data) =
            run_chunked(text, self.max_chars, self.tts_repo.as_ref()).await?;

        let duration = start_time.elapsed();
        let throughput_chars_per_sec = if duration.as_secs_f64() > 0.0 {
            char_count as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        tracing::info!(
            latency_ms = duration.as_millis(),
            characters_count = char_count,
            chunk_count,
            audio_size_bytes = audio_data.len(),
            throughput_chars_per_sec = format!("{:.2}", throughput_chars_per_sec),
            "TTS synthesis completed"
        );

        Ok(TtsSynthesisResult {
            audio_data,
            chunk_count,
            char_count,
            word_count,
        })
    }
}
