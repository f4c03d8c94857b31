//! Service client tests
//!
//! Exercises the reqwest-backed clients against a local mock server.

use base64::Engine as _;
use bytes::Bytes;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vidforge::config::{OpenAiConfig, Visibility, YouTubeConfig};
use vidforge::services::{
    ChatMessage, ImageService, OpenAiClient, ScriptService, SpeechService, VideoHost,
    VideoMetadata, YouTubeClient,
};

fn openai_client(server: &MockServer) -> OpenAiClient {
    let config = OpenAiConfig {
        api_key: Some("sk-test".to_string()),
        base_url: server.uri(),
        ..OpenAiConfig::default()
    };
    OpenAiClient::new(&config)
}

fn youtube_client(server: &MockServer) -> YouTubeClient {
    let config = YouTubeConfig {
        access_token: Some("ya29.test".to_string()),
        upload_url: format!("{}/upload", server.uri()),
        ..YouTubeConfig::default()
    };
    YouTubeClient::new(&config)
}

fn metadata() -> VideoMetadata {
    VideoMetadata {
        title: "Title".to_string(),
        description: "Description".to_string(),
        tags: vec!["tag".to_string()],
        visibility: Visibility::Unlisted,
    }
}

#[tokio::test]
async fn test_chat_completion_returns_trimmed_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "  A narration draft.\n" } }]
        })))
        .mount(&server)
        .await;

    let client = openai_client(&server);
    let text = client
        .complete(&[ChatMessage::user("write something")])
        .await
        .unwrap();
    assert_eq!(text, "A narration draft.");
}

#[tokio::test]
async fn test_chat_completion_without_choices_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = openai_client(&server);
    let text = client.complete(&[ChatMessage::user("hi")]).await.unwrap();
    assert!(text.is_empty());
}

#[tokio::test]
async fn test_chat_completion_http_error_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = openai_client(&server);
    let err = client
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn test_speech_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3-bytes".to_vec()))
        .mount(&server)
        .await;

    let client = openai_client(&server);
    let audio = client.synthesize("narration").await.unwrap();
    assert_eq!(audio, Bytes::from_static(b"mp3-bytes"));
}

#[tokio::test]
async fn test_image_decodes_base64_payload() {
    let server = MockServer::start().await;
    let encoded = base64::engine::general_purpose::STANDARD.encode(b"png-bytes");
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "b64_json": encoded }]
        })))
        .mount(&server)
        .await;

    let client = openai_client(&server);
    let image = client.generate("a bridge", "1024x1024").await.unwrap();
    assert_eq!(image, Some(Bytes::from_static(b"png-bytes")));
}

#[tokio::test]
async fn test_image_without_payload_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = openai_client(&server);
    let image = client.generate("a bridge", "1024x1024").await.unwrap();
    assert!(image.is_none());
}

#[tokio::test]
async fn test_upload_returns_assigned_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Location", format!("{}/session", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "vid-123" })))
        .mount(&server)
        .await;

    let client = youtube_client(&server);
    let id = client
        .upload(Bytes::from_static(b"video"), &metadata())
        .await
        .unwrap();
    assert_eq!(id.as_deref(), Some("vid-123"));
}

#[tokio::test]
async fn test_upload_success_without_id_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Location", format!("{}/session", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = youtube_client(&server);
    let id = client
        .upload(Bytes::from_static(b"video"), &metadata())
        .await
        .unwrap();
    assert!(id.is_none());
}

#[tokio::test]
async fn test_upload_session_without_location_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = youtube_client(&server);
    let err = client
        .upload(Bytes::from_static(b"video"), &metadata())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Location"));
}
