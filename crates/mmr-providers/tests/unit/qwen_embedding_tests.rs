//! Qwen embedding providers against a mock DashScope server

use mmr_domain::error::{Error, ErrorKind};
use mmr_domain::value_objects::MediaRef;
use mmr_providers::embedding::{
    QwenImageEmbeddingProvider, QwenTextEmbeddingProvider, QwenVideoEmbeddingProvider,
};
use mmr_providers::{ImageEmbeddingProvider, TextEmbeddingProvider, VideoEmbeddingProvider};
use mockito::{Matcher, Server};
use serde_json::{Value, json};

fn section(base_url: &str) -> Value {
    json!({
        "dashscope_api_key": "sk-test",
        "base_url": base_url,
        "model": "test-model",
    })
}

#[tokio::test]
async fn test_text_embedding_posts_openai_compatible_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/embeddings")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "test-model",
            "input": ["a cat on a mat"],
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": [{"embedding": [0.1, 0.2, 0.3]}]}).to_string())
        .create_async()
        .await;

    let provider = QwenTextEmbeddingProvider::from_config(&section(&server.url())).unwrap();
    let embedding = provider.infer("a cat on a mat").await.unwrap();

    mock.assert_async().await;
    assert_eq!(embedding.dimensions(), 3);
    assert_eq!(embedding.model, "test-model");
    assert_eq!(provider.provider_name(), "qwen");
}

#[tokio::test]
async fn test_text_embedding_sends_dimension_when_configured() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/embeddings")
        .match_body(Matcher::PartialJson(json!({"dimensions": 2})))
        .with_status(200)
        .with_body(json!({"data": [{"embedding": [1.0, 0.0]}]}).to_string())
        .create_async()
        .await;

    let mut config = section(&server.url());
    config["dimension"] = json!(2);
    let provider = QwenTextEmbeddingProvider::from_config(&config).unwrap();
    provider.infer("hello").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_text_embedding_auth_failure_is_inference_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(401)
        .with_body("invalid key")
        .create_async()
        .await;

    let provider = QwenTextEmbeddingProvider::from_config(&section(&server.url())).unwrap();
    let err = provider.infer("hello").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Inference);
    assert!(err.to_string().contains("authentication failed"), "{err}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_text_embedding_missing_data_is_inference_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_body(json!({"data": []}).to_string())
        .create_async()
        .await;

    let provider = QwenTextEmbeddingProvider::from_config(&section(&server.url())).unwrap();
    let err = provider.infer("hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Inference);
}

#[tokio::test]
async fn test_image_embedding_sends_image_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/multimodal")
        .match_body(Matcher::PartialJson(json!({
            "input": {"contents": [{"image": "https://example.com/cat.jpg"}]},
        })))
        .with_status(200)
        .with_body(json!({"output": {"embeddings": [{"index": 0, "embedding": [0.5, 0.5]}]}}).to_string())
        .create_async()
        .await;

    let provider =
        QwenImageEmbeddingProvider::from_config(&section(&format!("{}/multimodal", server.url())))
            .unwrap();
    let embedding = provider
        .infer(&MediaRef::new("https://example.com/cat.jpg"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(embedding.vector, vec![0.5, 0.5]);
}

#[tokio::test]
async fn test_video_embedding_sends_video_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/multimodal")
        .match_body(Matcher::PartialJson(json!({
            "input": {"contents": [{"video": "https://example.com/clip.mp4"}]},
        })))
        .with_status(200)
        .with_body(json!({"output": {"embeddings": [{"embedding": [0.1, 0.9]}]}}).to_string())
        .create_async()
        .await;

    let provider =
        QwenVideoEmbeddingProvider::from_config(&section(&format!("{}/multimodal", server.url())))
            .unwrap();
    provider
        .infer(&MediaRef::new("https://example.com/clip.mp4"))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_image_embedding_rejects_empty_reference_without_calling() {
    let provider = QwenImageEmbeddingProvider::from_config(&section("http://127.0.0.1:9")).unwrap();
    let err = provider.infer(&MediaRef::new("  ")).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_required_fields_reported_in_order() {
    let err = QwenTextEmbeddingProvider::from_config(&json!({})).err().unwrap();
    assert!(err.to_string().contains("dashscope_api_key"), "{err}");

    let err = QwenImageEmbeddingProvider::from_config(&json!({"dashscope_api_key": "k"}))
        .err()
        .unwrap();
    assert!(err.to_string().contains("base_url"), "{err}");

    let err = QwenVideoEmbeddingProvider::from_config(
        &json!({"dashscope_api_key": "k", "base_url": "https://x"}),
    )
    .err()
    .unwrap();
    assert!(err.to_string().contains("model"), "{err}");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
