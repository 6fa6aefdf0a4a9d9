//! 多语言模型支持的语言代码
//!
//! 仅用于对外展示；生成请求中的语言代码原样交给模型

/// 未在 settings 中指定语言时使用
pub const DEFAULT_LANGUAGE: &str = "en";

pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "pl", "tr", "ru", "nl", "cs", "ar", "zh-cn", "ja", "hu",
    "ko",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_listed() {
        assert!(SUPPORTED_LANGUAGES.contains(&DEFAULT_LANGUAGE));
        assert!(SUPPORTED_LANGUAGES.contains(&"zh-cn"));
        assert_eq!(SUPPORTED_LANGUAGES.len(), 16);
    }
}
