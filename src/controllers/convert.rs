use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    domain::tts::{TtsService, TtsServiceApi},
    error::{AppError, AppResult},
    infrastructure::{
        pdf::{PdfTextSource, TextStats},
        storage::AudioFileSink,
    },
};

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub output_path: PathBuf,
    pub char_count: usize,
    pub word_count: usize,
    pub chunk_count: usize,
    pub audio_size_bytes: usize,
}

/// Drives one PDF -> text -> speech -> file run
pub struct ConvertController {
    text_source: PdfTextSource,
    tts_service: Arc<TtsService>,
    sink: AudioFileSink,
    show_text: bool,
}

impl ConvertController {
    pub fn new(
        text_source: PdfTextSource,
        tts_service: Arc<TtsService>,
        sink: AudioFileSink,
        show_text: bool,
    ) -> Self {
        Self {
            text_source,
            tts_service,
            sink,
            show_text,
        }
    }

    /// Convert `input` into an audio file at `output`.
    ///
    /// The output file is only touched after every chunk has been
    /// synthesized, so a failed run leaves any existing file unchanged.
    pub async fn convert(&self, input: &Path, output: &Path) -> AppResult<ConversionSummary> {
        let text = self.text_source.extract(input).await?;
        let stats = TextStats::of(&text);

        if self.show_text {
            println!("\nExtracted text:\n\n{}\n", text);
        }
        println!(
            "Text length: {} characters, {} words",
            stats.char_count, stats.word_count
        );

        if stats.word_count == 0 {
            return Err(AppError::Source(format!(
                "no extractable text in {} (scanned or image-only PDF?)",
                input.display()
            )));
        }

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            max_chars = self.tts_service.max_chars(),
            "Converting text to speech"
        );

        let result = self.tts_service.synthesize(&text).await?;

        self.sink.write(output, &result.audio_data).await?;

        Ok(ConversionSummary {
            output_path: output.to_path_buf(),
            char_count: result.char_count,
            word_count: result.word_count,
            chunk_count: result.chunk_count,
            audio_size_bytes: result.audio_data.len(),
        })
    }
}
