//! Qwen VLM provider against a mock DashScope server

use mmr_domain::error::ErrorKind;
use mmr_domain::value_objects::MediaRef;
use mmr_providers::VlmProvider;
use mmr_providers::vlm::QwenVlmProvider;
use mockito::{Matcher, Server};
use serde_json::json;

fn provider(base_url: &str) -> QwenVlmProvider {
    QwenVlmProvider::from_config(&json!({
        "dashscope_api_key": "sk-test",
        "base_url": base_url,
        "model": "qwen-vl",
    }))
    .unwrap()
}

#[tokio::test]
async fn test_caption_reads_first_text_part() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/generation")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({"model": "qwen-vl"})))
        .with_status(200)
        .with_body(
            json!({
                "output": {"choices": [{"message": {"role": "assistant", "content": [
                    {"text": "  A cat sleeping on a mat.  "}
                ]}}]}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let caption = provider(&format!("{}/generation", server.url()))
        .infer(&MediaRef::new("https://example.com/cat.jpg"), "Describe the image.")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(caption, "A cat sleeping on a mat.");
}

#[tokio::test]
async fn test_server_error_is_inference_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/generation")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let err = provider(&format!("{}/generation", server.url()))
        .infer(&MediaRef::new("https://example.com/cat.jpg"), "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Inference);
    assert!(err.to_string().contains("server error (503)"), "{err}");
}

#[tokio::test]
async fn test_response_without_text_is_inference_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/generation")
        .with_status(200)
        .with_body(json!({"output": {"choices": []}}).to_string())
        .create_async()
        .await;

    let err = provider(&format!("{}/generation", server.url()))
        .infer(&MediaRef::new("https://example.com/cat.jpg"), "Describe.")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Inference);
}
