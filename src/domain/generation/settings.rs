//! Generation Context - 生成参数
//!
//! settings 是一个字符串键到原始值的映射，以 JSON 对象持久化，
//! 读回时可无损还原。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::DEFAULT_LANGUAGE;

/// 保存语言代码的键
const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings must be a JSON object")]
    NotAnObject,

    #[error("setting '{0}' must be a boolean, number or string")]
    UnsupportedValue(String),

    #[error("setting 'language' must be a string")]
    LanguageNotString,

    #[error("failed to decode settings: {0}")]
    Decode(String),
}

/// 原始类型的参数值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// 生成参数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationSettings(BTreeMap<String, SettingValue>);

impl GenerationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从请求中的任意 JSON 校验并构造
    pub fn from_json(value: serde_json::Value) -> Result<Self, SettingsError> {
        let serde_json::Value::Object(map) = value else {
            return Err(SettingsError::NotAnObject);
        };

        let mut entries = BTreeMap::new();
        for (key, value) in map {
            let setting = match value {
                serde_json::Value::Bool(b) => SettingValue::Bool(b),
                serde_json::Value::String(s) => SettingValue::Text(s),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => SettingValue::Integer(i),
                    None => SettingValue::Float(
                        n.as_f64()
                            .ok_or_else(|| SettingsError::UnsupportedValue(key.clone()))?,
                    ),
                },
                _ => return Err(SettingsError::UnsupportedValue(key)),
            };
            entries.insert(key, setting);
        }

        let settings = Self(entries);
        settings.language()?;
        Ok(settings)
    }

    /// 从数据库中保存的 JSON 文本还原
    pub fn from_json_str(s: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(s).map_err(|e| SettingsError::Decode(e.to_string()))
    }

    pub fn to_json_string(&self) -> String {
        // 只包含原始值的映射序列化不会失败
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 请求的语言；未指定时为 None
    ///
    /// 只要求是字符串，具体代码是否可用由模型判断
    pub fn language(&self) -> Result<Option<&str>, SettingsError> {
        match self.get(LANGUAGE_KEY) {
            None => Ok(None),
            Some(SettingValue::Text(lang)) => Ok(Some(lang)),
            Some(_) => Err(SettingsError::LanguageNotString),
        }
    }

    /// 请求的语言，缺省为 "en"
    pub fn language_or_default(&self) -> Result<&str, SettingsError> {
        Ok(self.language()?.unwrap_or(DEFAULT_LANGUAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_accepts_primitives() {
        let settings = GenerationSettings::from_json(json!({
            "language": "fr",
            "speed": 1.25,
            "seed": 42,
            "split_sentences": true
        }))
        .unwrap();

        assert_eq!(settings.language().unwrap(), Some("fr"));
        assert_eq!(settings.get("speed"), Some(&SettingValue::Float(1.25)));
        assert_eq!(settings.get("seed"), Some(&SettingValue::Integer(42)));
        assert_eq!(settings.get("split_sentences"), Some(&SettingValue::Bool(true)));
    }

    #[test]
    fn test_from_json_rejects_nested_values() {
        assert!(matches!(
            GenerationSettings::from_json(json!({"voice": {"pitch": 2}})),
            Err(SettingsError::UnsupportedValue(key)) if key == "voice"
        ));
        assert!(matches!(
            GenerationSettings::from_json(json!([1, 2])),
            Err(SettingsError::NotAnObject)
        ));
        assert!(GenerationSettings::from_json(json!({"x": null})).is_err());
    }

    #[test]
    fn test_language_must_be_string() {
        assert!(matches!(
            GenerationSettings::from_json(json!({"language": 5})),
            Err(SettingsError::LanguageNotString)
        ));
    }

    #[test]
    fn test_unlisted_language_passes_through() {
        let settings = GenerationSettings::from_json(json!({"language": "en-us"})).unwrap();
        assert_eq!(settings.language().unwrap(), Some("en-us"));
        assert_eq!(settings.language_or_default().unwrap(), "en-us");
    }

    #[test]
    fn test_language_defaults_to_english() {
        let settings = GenerationSettings::new();
        assert_eq!(settings.language_or_default().unwrap(), "en");
    }

    #[test]
    fn test_stored_form_restores_identically() {
        let settings = GenerationSettings::from_json(json!({
            "language": "de",
            "temperature": 0.7,
            "top_k": 50
        }))
        .unwrap();

        let stored = settings.to_json_string();
        let restored = GenerationSettings::from_json_str(&stored).unwrap();
        assert_eq!(restored, settings);
    }
}
