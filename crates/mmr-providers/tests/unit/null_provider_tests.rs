//! Null implementations

use mmr_domain::value_objects::MediaRef;
use mmr_providers::asr::NullAsrProvider;
use mmr_providers::embedding::{
    NullImageEmbeddingProvider, NullTextEmbeddingProvider, NullVideoEmbeddingProvider,
};
use mmr_providers::vlm::NullVlmProvider;
use mmr_providers::{
    AsrProvider, ImageEmbeddingProvider, TextEmbeddingProvider, VideoEmbeddingProvider,
    VlmProvider,
};

#[tokio::test]
async fn test_null_text_embedding_is_deterministic() {
    let provider = NullTextEmbeddingProvider::new(16);
    let a = provider.infer("same text").await.unwrap();
    let b = provider.infer("same text").await.unwrap();
    let c = provider.infer("other text").await.unwrap();

    assert_eq!(a.dimensions(), 16);
    assert_eq!(a.vector, b.vector);
    assert_ne!(a.vector, c.vector);
}

#[tokio::test]
async fn test_null_media_embeddings_reject_empty_references() {
    assert!(
        NullImageEmbeddingProvider::new(8)
            .infer(&MediaRef::new(""))
            .await
            .is_err()
    );
    assert!(
        NullVideoEmbeddingProvider::new(8)
            .infer(&MediaRef::new(" "))
            .await
            .is_err()
    );
    let embedding = NullImageEmbeddingProvider::new(8)
        .infer(&MediaRef::new("https://example.com/a.jpg"))
        .await
        .unwrap();
    assert_eq!(embedding.dimensions(), 8);
}

#[tokio::test]
async fn test_null_vlm_and_asr_return_configured_text() {
    let vlm = NullVlmProvider::new("a red bicycle");
    let caption = vlm
        .infer(&MediaRef::new("https://example.com/a.jpg"), "Describe.")
        .await
        .unwrap();
    assert_eq!(caption, "a red bicycle");

    let asr = NullAsrProvider::new("spoken words");
    let transcript = asr.infer(&MediaRef::new("memory://audio/a.wav")).await.unwrap();
    assert_eq!(transcript, "spoken words");
    assert!(asr.infer(&MediaRef::new("")).await.is_err());
}
