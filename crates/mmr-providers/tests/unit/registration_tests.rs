//! Link-time registration of every implementation

use mmr_application::registry::{
    ASR_PROVIDERS, IMAGE_EMBEDDING_PROVIDERS, SEARCH_ENGINE_PROVIDERS, STORAGE_PROVIDERS,
    TEXT_EMBEDDING_PROVIDERS, VIDEO_EMBEDDING_PROVIDERS, VLM_PROVIDERS,
};

fn names<P: ?Sized + 'static>(entries: &[mmr_application::registry::ProviderEntry<P>]) -> Vec<&'static str> {
    let mut names: Vec<_> = entries.iter().map(|e| e.name).collect();
    names.sort_unstable();
    names
}

#[test]
fn test_every_category_registers_its_implementations() {
    assert_eq!(names(&TEXT_EMBEDDING_PROVIDERS), vec!["null", "qwen"]);
    assert_eq!(names(&IMAGE_EMBEDDING_PROVIDERS), vec!["null", "qwen"]);
    assert_eq!(names(&VIDEO_EMBEDDING_PROVIDERS), vec!["null", "qwen"]);
    assert_eq!(names(&ASR_PROVIDERS), vec!["aliyun", "null"]);
    assert_eq!(names(&VLM_PROVIDERS), vec!["null", "qwen"]);
    assert_eq!(names(&SEARCH_ENGINE_PROVIDERS), vec!["memory"]);
    assert_eq!(names(&STORAGE_PROVIDERS), vec!["local", "memory"]);
}

#[test]
fn test_remote_templates_carry_required_fields() {
    for (name, config_template) in TEXT_EMBEDDING_PROVIDERS
        .iter()
        .map(|e| (e.name, e.config_template))
        .chain(IMAGE_EMBEDDING_PROVIDERS.iter().map(|e| (e.name, e.config_template)))
        .filter(|(name, _)| *name == "qwen")
    {
        let template = config_template();
        for field in ["dashscope_api_key", "base_url", "model"] {
            assert!(template.get(field).is_some(), "{} missing {field}", name);
        }
    }
    let aliyun = ASR_PROVIDERS.iter().find(|e| e.name == "aliyun").unwrap();
    let template = (aliyun.config_template)();
    for field in ["api_key", "base_url", "model"] {
        assert!(template.get(field).is_some(), "aliyun missing {field}");
    }
}

#[test]
fn test_templates_with_blank_keys_fail_to_build() {
    for entry in TEXT_EMBEDDING_PROVIDERS.iter().filter(|e| e.name == "qwen") {
        let err = (entry.factory)(&(entry.config_template)()).err().unwrap();
        assert!(err.to_string().contains("dashscope_api_key"), "{err}");
    }
    for entry in ASR_PROVIDERS.iter().filter(|e| e.name == "aliyun") {
        let err = (entry.factory)(&(entry.config_template)()).err().unwrap();
        assert!(err.to_string().contains("api_key"), "{err}");
    }
}
