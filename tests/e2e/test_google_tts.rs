use crate::helpers::{api_key_repository, audio_content};

use httpmock::Method::POST;
use httpmock::MockServer;
use pdf_to_speech::domain::tts::run;
use pdf_to_speech::infrastructure::repositories::TtsRepository;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn it_should_send_voice_and_encoding_and_decode_audio() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/text:synthesize")
            .query_param("key", "test-key")
            .json_body(json!({
                "input": { "text": "Hello there" },
                "voice": {
                    "languageCode": "en-US",
                    "name": "en-US-Standard-F",
                    "ssmlGender": "FEMALE"
                },
                "audioConfig": { "audioEncoding": "MP3" }
            }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "audioContent": audio_content(&[0xFF, 0xFB, 0x90, 0x00]) }));
    });

    let repo = api_key_repository(server.base_url());
    let audio = repo.synthesize("Hello there").await.unwrap();

    mock.assert();
    assert_eq!(audio, vec![0xFF, 0xFB, 0x90, 0x00]);
}

#[tokio::test]
async fn it_should_surface_google_error_status_and_message() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/text:synthesize");
        then.status(403)
            .header("content-type", "application/json")
            .json_body(json!({
                "error": {
                    "code": 403,
                    "message": "Cloud Text-to-Speech API has not been used in project",
                    "status": "PERMISSION_DENIED"
                }
            }));
    });

    let repo = api_key_repository(server.base_url());
    let err = repo.synthesize("Hello").await.unwrap_err();

    mock.assert();
    assert!(err.contains("403"), "got: {err}");
    assert!(err.contains("PERMISSION_DENIED"), "got: {err}");
}

#[tokio::test]
async fn it_should_reject_invalid_audio_content() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/v1/text:synthesize");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "audioContent": "not base64!!" }));
    });

    let repo = api_key_repository(server.base_url());
    let err = repo.synthesize("Hello").await.unwrap_err();

    assert!(err.contains("base64"), "got: {err}");
}

#[tokio::test]
async fn it_should_concatenate_provider_audio_in_chunk_order() {
    let server = MockServer::start_async().await;
    let hello = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/text:synthesize")
            .body_contains(r#""text":"hello""#);
        then.status(200)
            .json_body(json!({ "audioContent": audio_content(b"HELLO-") }));
    });
    let world = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/text:synthesize")
            .body_contains(r#""text":"world""#);
        then.status(200)
            .json_body(json!({ "audioContent": audio_content(b"WORLD") }));
    });

    let repo = api_key_repository(server.base_url());
    let audio = run("hello world", 5, &repo).await.unwrap();

    hello.assert();
    world.assert();
    assert_eq!(audio, b"HELLO-WORLD".to_vec());
}

#[tokio::test]
async fn it_should_report_failing_chunk_index_from_provider_errors() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/text:synthesize")
            .body_contains(r#""text":"two""#);
        then.status(429).body("quota exhausted");
    });
    let ok = server.mock(|when, then| {
        when.method(POST).path("/v1/text:synthesize");
        then.status(200)
            .json_body(json!({ "audioContent": audio_content(b"x") }));
    });

    let repo = api_key_repository(server.base_url());
    let err = run("one two three", 4, &repo).await.unwrap_err();

    assert!(err.to_string().contains("chunk 1"), "got: {err}");
    assert!(err.to_string().contains("429"), "got: {err}");
    // Only "one" reached the fallback mock; "three" was never sent
    ok.assert_hits(1);
}
