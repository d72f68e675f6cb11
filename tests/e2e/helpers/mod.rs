pub mod fixtures;
pub mod tts_mocks;

pub use fixtures::{fixture_path, service_account_key};
pub use tts_mocks::{api_key_repository, audio_content, RecordingRepository};
