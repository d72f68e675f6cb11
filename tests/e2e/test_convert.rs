use crate::helpers::{api_key_repository, audio_content, fixture_path};

use httpmock::Method::POST;
use httpmock::MockServer;
use pdf_to_speech::controllers::convert::ConvertController;
use pdf_to_speech::domain::tts::TtsService;
use pdf_to_speech::infrastructure::pdf::PdfTextSource;
use pdf_to_speech::infrastructure::storage::AudioFileSink;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn controller(base_url: String, max_chars: usize) -> ConvertController {
    let repo = Arc::new(api_key_repository(base_url));
    let service = Arc::new(TtsService::new(repo, max_chars).unwrap());
    ConvertController::new(
        PdfTextSource::new(true),
        service,
        AudioFileSink::new(),
        false,
    )
}

#[tokio::test]
async fn it_should_convert_pdf_into_single_audio_file() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/text:synthesize")
            .body_contains("Hello world from page one.")
            .body_contains("The second page says goodbye.");
        then.status(200)
            .json_body(json!({ "audioContent": audio_content(b"AUDIO") }));
    });
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("book.mp3");

    let summary = controller(server.base_url(), 4900)
        .convert(&fixture_path("two_pages.pdf"), &output)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(summary.chunk_count, 1);
    assert_eq!(summary.word_count, 10);
    assert_eq!(summary.output_path, output);
    assert_eq!(std::fs::read(&output).unwrap(), b"AUDIO".to_vec());
}

#[tokio::test]
async fn it_should_request_every_chunk_and_concatenate_audio() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/text:synthesize");
        then.status(200)
            .json_body(json!({ "audioContent": audio_content(b"ab") }));
    });
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("book.mp3");

    let summary = controller(server.base_url(), 12)
        .convert(&fixture_path("two_pages.pdf"), &output)
        .await
        .unwrap();

    assert!(summary.chunk_count > 1);
    mock.assert_hits(summary.chunk_count);
    assert_eq!(summary.audio_size_bytes, 2 * summary.chunk_count);
    assert_eq!(std::fs::read(&output).unwrap(), b"ab".repeat(summary.chunk_count));
}

#[tokio::test]
async fn it_should_leave_existing_output_untouched_when_synthesis_fails() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/v1/text:synthesize");
        then.status(500).body("backend error");
    });
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("book.mp3");
    std::fs::write(&output, b"previous run").unwrap();

    let err = controller(server.base_url(), 4900)
        .convert(&fixture_path("two_pages.pdf"), &output)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), "synthesis");
    assert!(err.to_string().contains("chunk 0"), "got: {err}");
    assert_eq!(std::fs::read(&output).unwrap(), b"previous run".to_vec());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn it_should_reject_pdf_without_text_before_synthesis() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/text:synthesize");
        then.status(200)
            .json_body(json!({ "audioContent": audio_content(b"x") }));
    });
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("blank.mp3");

    let err = controller(server.base_url(), 4900)
        .convert(&fixture_path("blank.pdf"), &output)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), "source");
    mock.assert_hits(0);
    assert!(!output.exists());
}

#[tokio::test]
async fn it_should_fail_fast_on_missing_input() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();

    let err = controller(server.base_url(), 4900)
        .convert(&dir.path().join("missing.pdf"), &dir.path().join("out.mp3"))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), "source");
    assert!(err.to_string().contains("missing.pdf"));
}

#[tokio::test]
async fn it_should_report_unwritable_destination() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/v1/text:synthesize");
        then.status(200)
            .json_body(json!({ "audioContent": audio_content(b"AUDIO") }));
    });
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("no-such-dir").join("book.mp3");

    let err = controller(server.base_url(), 4900)
        .convert(&fixture_path("two_pages.pdf"), &output)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), "sink");
    assert!(!output.exists());
}
