use crate::domain::tts::AudioEncoding;
use crate::error::{AppError, AppResult};
use crate::infrastructure::pdf::validate_pdf_path;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Convert a PDF document into a single spoken-audio file
#[derive(Parser, Debug)]
#[command(name = "pdf-to-speech", version, about = "Convert a PDF document into speech")]
pub struct Cli {
    /// PDF document to read aloud (prompted for when omitted)
    #[arg(short, long, value_name = "PDF")]
    pub input: Option<PathBuf>,

    /// Output audio file (prompted for when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum characters per synthesis request (overrides TTS_MAX_CHARS)
    #[arg(long, value_name = "CHARS")]
    pub max_chars: Option<usize>,

    /// Print the extracted text before synthesizing it
    #[arg(long)]
    pub show_text: bool,
}

/// Ask for the input PDF until a valid path is entered.
///
/// Surrounding quotes (as left by drag-and-drop into a terminal) are removed.
/// End of input aborts with [`AppError::Prompt`].
pub fn prompt_input_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> AppResult<PathBuf> {
    loop {
        let answer = prompt(input, output, "Enter the path to your PDF file: ")?
            .ok_or_else(|| AppError::Prompt("no input PDF path provided".to_string()))?;

        let answer = answer.trim_matches(|c| c == '"' || c == '\'');
        if answer.is_empty() {
            continue;
        }

        let path = PathBuf::from(answer);
        match validate_pdf_path(&path) {
            Ok(()) => return Ok(path),
            Err(e) => {
                writeln!(output, "{}", e).map_err(|e| AppError::Prompt(e.to_string()))?;
            }
        }
    }
}

/// Ask for the output file name; an empty answer (or end of input) keeps
/// `default`
pub fn prompt_output_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: &Path,
    encoding: AudioEncoding,
) -> AppResult<PathBuf> {
    let question = format!(
        "Enter the output {} file name (default: {}): ",
        encoding.file_extension().to_uppercase(),
        default.display()
    );
    let answer = prompt(input, output, &question)?.unwrap_or_default();
    Ok(resolve_output_path(&answer, default, encoding))
}

/// Apply the default for an empty answer and the encoding's extension to a
/// bare file name
pub fn resolve_output_path(answer: &str, default: &Path, encoding: AudioEncoding) -> PathBuf {
    let answer = answer.trim();
    let path = if answer.is_empty() {
        default.to_path_buf()
    } else {
        PathBuf::from(answer)
    };

    if path.extension().is_none() {
        path.with_extension(encoding.file_extension())
    } else {
        path
    }
}

/// Print `question` and read one trimmed line; `None` on end of input
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> AppResult<Option<String>> {
    write!(output, "{}", question).map_err(|e| AppError::Prompt(e.to_string()))?;
    output.flush().map_err(|e| AppError::Prompt(e.to_string()))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| AppError::Prompt(e.to_string()))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
