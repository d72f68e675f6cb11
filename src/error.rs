use std::path::PathBuf;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Synthesis failed on chunk {index} ({char_count} characters): {message}")]
    Synthesis {
        index: usize,
        char_count: usize,
        message: String,
    },

    #[error("Cannot write audio to {}: {message}", path.display())]
    Sink { path: PathBuf, message: String },

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl AppError {
    /// Name of the pipeline stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Source(_) => "source",
            Self::Config(_) => "config",
            Self::Synthesis { .. } => "synthesis",
            Self::Sink { .. } => "sink",
            Self::Prompt(_) => "prompt",
        }
    }

    /// Process exit code reported by the binary
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            _ => 1,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
