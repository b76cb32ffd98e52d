//! Tests for multimodal records and index params

use mmr_domain::value_objects::{
    Embedding, IndexParam, Modality, MultiModalData, StoredRecord, TextOrigin,
};

fn embedding() -> Embedding {
    Embedding::new(vec![0.5, 0.5], "m").unwrap()
}

#[test]
fn test_blank_fields_count_as_absent() {
    let data = MultiModalData::new()
        .with_text("  ")
        .with_image("")
        .with_video("");
    assert!(data.is_empty());
    assert!(data.modalities().is_empty());
}

#[test]
fn test_modalities_in_canonical_order() {
    let data = MultiModalData::new()
        .with_video("https://example.com/v.mp4")
        .with_text("hello")
        .with_image("https://example.com/i.jpg");
    assert_eq!(
        data.modalities(),
        vec![Modality::Text, Modality::Image, Modality::Video]
    );
}

#[test]
fn test_legacy_field_names_deserialize() {
    let data: MultiModalData = serde_json::from_value(serde_json::json!({
        "text": "hi",
        "image_b64_or_url": "https://example.com/i.jpg"
    }))
    .unwrap();
    assert_eq!(data.text(), Some("hi"));
    assert_eq!(
        data.image().map(|m| m.as_str()),
        Some("https://example.com/i.jpg")
    );
    assert!(data.video().is_none());
}

#[test]
fn test_index_param_keeps_parallel_arrays() {
    let mut param = IndexParam::default();
    assert!(param.is_empty());
    param.push_text(TextOrigin::Original, "a".into(), embedding());
    param.push_text(TextOrigin::VideoTranscript, "b".into(), embedding());
    assert_eq!(param.texts.len(), param.text_embeddings.len());
    assert_eq!(param.texts.len(), param.text_origins.len());
    assert_eq!(param.text_for(TextOrigin::VideoTranscript), Some("b"));
    assert_eq!(param.text_for(TextOrigin::ImageCaption), None);
}

#[test]
fn test_stored_record_flattens_derived_texts() {
    let mut data = MultiModalData::new()
        .with_text("original")
        .with_image("https://example.com/i.jpg");
    data.index_param
        .push_text(TextOrigin::Original, "original".into(), embedding());
    data.index_param
        .push_text(TextOrigin::ImageCaption, "a red car".into(), embedding());

    let record = StoredRecord::from_data("id-1", &data);
    assert_eq!(record.id, "id-1");
    assert_eq!(record.text, "original");
    assert_eq!(record.image, "https://example.com/i.jpg");
    assert_eq!(record.image_text, "a red car");
    assert_eq!(record.video_text, "");
}
