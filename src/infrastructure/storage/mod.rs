use crate::error::AppError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

#[derive(Debug, thiserror::Error)]
#[error("cannot write {}: {message}", path.display())]
pub struct SinkError {
    pub path: PathBuf,
    pub message: String,
}

impl From<SinkError> for AppError {
    fn from(err: SinkError) -> Self {
        AppError::Sink {
            path: err.path,
            message: err.message,
        }
    }
}

/// Writes the final audio stream to disk in a single shot.
///
/// Bytes go to a hidden sibling file which is then renamed over the target,
/// so the target is either fully replaced or left untouched.
#[derive(Debug, Clone, Default)]
pub struct AudioFileSink;

impl AudioFileSink {
    pub fn new() -> Self {
        Self
    }

    pub async fn write(&self, path: &Path, audio: &[u8]) -> Result<(), SinkError> {
        let sink_error = |message: String| SinkError {
            path: path.to_path_buf(),
            message,
        };

        let file_name = path
            .file_name()
            .ok_or_else(|| sink_error("output path has no file name".to_string()))?;
        let temp_path = partial_path(path, file_name);

        let result = write_and_rename(&temp_path, path, audio).await;
        if let Err(e) = result {
            // Best effort: the partial file must never outlive a failed write
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(sink_error(e.to_string()));
        }

        tracing::info!(
            path = %path.display(),
            audio_size_bytes = audio.len(),
            "Audio content written to file"
        );
        Ok(())
    }
}

fn partial_path(path: &Path, file_name: &std::ffi::OsStr) -> PathBuf {
    let mut temp_name = OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".partial");
    path.with_file_name(temp_name)
}

async fn write_and_rename(temp_path: &Path, path: &Path, audio: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(temp_path).await?;
    file.write_all(audio).await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(temp_path, path).await
}
