//! Per-category configuration

use std::collections::BTreeMap;

use mmr_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key selecting the active implementation of a category
pub const IMPLEMENTATION_TYPE_KEY: &str = "implementation_type";

/// Configuration of one capability category
///
/// ```toml
/// [components.text_embedding]
/// implementation_type = "qwen"
///
/// [components.text_embedding.qwen]
/// dashscope_api_key = "sk-..."
/// base_url = "https://dashscope.aliyuncs.com/compatible-mode/v1"
/// model = "text-embedding-v4"
/// ```
///
/// Implementation sections are kept as raw values and parsed by the
/// implementation itself when the factory builds it, so missing or unknown
/// fields surface at initialisation, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityConfig {
    /// Name of the active implementation
    #[serde(default)]
    pub implementation_type: String,
    /// One section per implementation name
    #[serde(flatten)]
    pub implementations: BTreeMap<String, Value>,
}

impl CapabilityConfig {
    /// Create a config selecting `implementation_type`
    pub fn new(implementation_type: impl Into<String>) -> Self {
        Self {
            implementation_type: implementation_type.into(),
            implementations: BTreeMap::new(),
        }
    }

    /// Add an implementation section
    pub fn with_section(mut self, name: impl Into<String>, section: Value) -> Self {
        self.implementations.insert(name.into(), section);
        self
    }

    /// Convert an untyped configuration value
    ///
    /// Only the shape is checked: the value must be a mapping and
    /// `implementation_type`, when present, must be a string.
    pub fn from_raw(category: &str, raw: &Value) -> Result<Self> {
        let Value::Object(map) = raw else {
            return Err(Error::configuration(
                category,
                format!("expected a mapping, got {}", value_kind(raw)),
            ));
        };

        let mut config = Self::default();
        for (key, value) in map {
            if key == IMPLEMENTATION_TYPE_KEY {
                config.implementation_type = match value {
                    Value::String(name) => name.trim().to_string(),
                    Value::Null => String::new(),
                    other => {
                        return Err(Error::configuration(
                            category,
                            format!(
                                "{IMPLEMENTATION_TYPE_KEY} must be a string, got {}",
                                value_kind(other)
                            ),
                        ));
                    }
                };
            } else {
                config.implementations.insert(key.clone(), value.clone());
            }
        }
        Ok(config)
    }

    /// Section of `name`, or an empty mapping when absent
    pub fn section(&self, name: &str) -> Value {
        self.implementations
            .get(name)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Serialise back into an untyped value
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            IMPLEMENTATION_TYPE_KEY.to_string(),
            Value::String(self.implementation_type.clone()),
        );
        for (name, section) in &self.implementations {
            map.insert(name.clone(), section.clone());
        }
        Value::Object(map)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
