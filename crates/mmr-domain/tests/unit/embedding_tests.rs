//! Tests for the embedding value object

use mmr_domain::ErrorKind;
use mmr_domain::value_objects::Embedding;

#[test]
fn test_empty_vector_rejected() {
    let err = Embedding::new(Vec::new(), "m").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_cosine_similarity_of_identical_vectors() {
    let a = Embedding::new(vec![1.0, 2.0, 3.0], "m").unwrap();
    let similarity = a.cosine_similarity(&a.clone()).unwrap();
    assert!((similarity - 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_similarity_of_orthogonal_vectors() {
    let a = Embedding::new(vec![1.0, 0.0], "m").unwrap();
    let b = Embedding::new(vec![0.0, 1.0], "m").unwrap();
    assert!(a.cosine_similarity(&b).unwrap().abs() < 1e-6);
}

#[test]
fn test_cosine_similarity_dimension_mismatch() {
    let a = Embedding::new(vec![1.0, 0.0], "m").unwrap();
    let b = Embedding::new(vec![1.0, 0.0, 0.0], "m").unwrap();
    assert_eq!(a.cosine_similarity(&b), None);
}

#[test]
fn test_cosine_similarity_zero_norm() {
    let a = Embedding::new(vec![0.0, 0.0], "m").unwrap();
    let b = Embedding::new(vec![1.0, 0.0], "m").unwrap();
    assert_eq!(a.cosine_similarity(&b), None);
}
