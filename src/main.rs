use clap::Parser;
use pdf_to_speech::controllers::cli::{
    prompt_input_path, prompt_output_path, resolve_output_path, Cli,
};
use pdf_to_speech::controllers::convert::ConvertController;
use pdf_to_speech::domain::tts::TtsService;
use pdf_to_speech::error::{AppError, AppResult};
use pdf_to_speech::infrastructure::auth::{ServiceAccountAuth, ServiceAccountKey};
use pdf_to_speech::infrastructure::config::{validate_max_chars, Config, LogFormat};
use pdf_to_speech::infrastructure::pdf::PdfTextSource;
use pdf_to_speech::infrastructure::repositories::{GoogleAuth, GoogleTtsRepository};
use pdf_to_speech::infrastructure::storage::AudioFileSink;
use std::fs::{File, OpenOptions};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(stage = e.stage(), error = %e, "Conversion failed");
            eprintln!("Error ({} stage): {}", e.stage(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(max_chars) = cli.max_chars {
        validate_max_chars(max_chars)?;
        config.max_chars = max_chars;
    }

    // Initialize logging
    init_logging(&config)?;

    tracing::info!(
        max_chars = config.max_chars,
        voice = %config.voice.name,
        language = %config.voice.language_code,
        audio_encoding = %config.audio_encoding,
        "Starting PDF to speech conversion"
    );

    // Resolve input and output before any network work
    let input = match cli.input {
        Some(path) => path,
        None => prompt_input_path(&mut std::io::stdin().lock(), &mut std::io::stdout())?,
    };
    let output = match cli.output {
        Some(path) => resolve_output_path(
            &path.to_string_lossy(),
            &config.output_path,
            config.audio_encoding,
        ),
        None => prompt_output_path(
            &mut std::io::stdin().lock(),
            &mut std::io::stdout(),
            &config.output_path,
            config.audio_encoding,
        )?,
    };

    // === DEPENDENCY INJECTION SETUP ===
    let http_client = reqwest::Client::new();
    let auth = google_auth(&config, http_client.clone())?;
    let tts_repo = Arc::new(GoogleTtsRepository::new(
        http_client,
        config.google_tts_endpoint.clone(),
        auth,
        config.voice.clone(),
        config.audio_encoding,
    ));
    let tts_service = Arc::new(TtsService::new(tts_repo, config.max_chars)?);
    let controller = ConvertController::new(
        PdfTextSource::new(config.normalize_whitespace),
        tts_service,
        AudioFileSink::new(),
        cli.show_text,
    );

    let summary = controller.convert(&input, &output).await?;

    tracing::info!(
        output = %summary.output_path.display(),
        chunk_count = summary.chunk_count,
        audio_size_bytes = summary.audio_size_bytes,
        "Conversion finished"
    );
    println!("Audio content written to file '{}'", summary.output_path.display());

    Ok(())
}

/// Prefer an explicit API key; otherwise load the service account file
fn google_auth(config: &Config, http_client: reqwest::Client) -> AppResult<GoogleAuth> {
    if let Some(key) = &config.google_api_key {
        tracing::info!("Using Google API key authentication");
        return Ok(GoogleAuth::ApiKey(key.clone()));
    }

    tracing::info!(
        credentials = %config.google_credentials_path.display(),
        "Loading Google service account credentials"
    );
    let key = ServiceAccountKey::from_file(&config.google_credentials_path)?;
    let auth = ServiceAccountAuth::new(key, http_client)?;
    tracing::info!(client_email = auth.client_email(), "Service account loaded");

    Ok(GoogleAuth::ServiceAccount(Arc::new(auth)))
}

fn init_logging(config: &Config) -> AppResult<()> {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "pdf_to_speech=info".into())
    };

    // Plain-text copy of the log, alongside the console output
    let log_file = match &config.log_file {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    AppError::Config(format!("cannot open log file {}: {}", path.display(), e))
                })?,
        ),
        None => None,
    };
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .with(log_file.map(file_layer))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .with(log_file.map(file_layer))
            .init();
    }

    Ok(())
}

fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
}
