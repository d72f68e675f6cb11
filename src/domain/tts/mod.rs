pub mod chunker;
pub mod error;
pub mod service;
pub mod voice;

pub use chunker::split_text;
pub use error::TtsServiceError;
pub use service::{run, TtsService, TtsServiceApi, TtsSynthesisResult};
pub use voice::{AudioEncoding, VoiceGender, VoiceSelection};
