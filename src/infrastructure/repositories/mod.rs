pub mod google_tts_repository;
pub mod tts_repository;

pub use google_tts_repository::{
    GoogleAuth, GoogleTtsRepository, GOOGLE_TTS_DEFAULT_ENDPOINT, GOOGLE_TTS_MAX_INPUT_CHARS,
};
pub use tts_repository::TtsRepository;
