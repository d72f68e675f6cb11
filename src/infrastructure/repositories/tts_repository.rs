use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Cloud Text-to-Speech, test stubs, etc.)
///
/// Implementations synthesize exactly the text they are given. Splitting a
/// document into provider-sized chunks and merging the audio is done by the
/// caller, so `text` is always below the provider's request ceiling.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one chunk of text with the configured voice
    ///
    /// Returns the encoded audio bytes for this chunk only
    ///
    /// # Errors
    /// Returns a human-readable message if the provider rejects the request or
    /// is unreachable
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, String>;
}
