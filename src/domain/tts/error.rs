use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("chunk {index} ({char_count} characters) failed: {message}")]
    Synthesis {
        index: usize,
        char_count: usize,
        message: String,
    },
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Config(msg) => AppError::Config(msg),
            TtsServiceError::Synthesis {
                index,
                char_count,
                message,
            } => AppError::Synthesis {
                index,
                char_count,
                message,
            },
        }
    }
}
