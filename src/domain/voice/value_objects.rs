//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use super::VoiceError;

/// 音色名称最大长度（与 voice_profiles.name 列一致）
const MAX_NAME_LEN: usize = 255;

/// 音色名称
///
/// 不变量: 去除首尾空白后非空，且不超过 255 字符
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, VoiceError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(VoiceError::InvalidName("name is required".to_string()));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(VoiceError::InvalidName(format!(
                "name must not exceed {} characters",
                MAX_NAME_LEN
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音色档案状态
///
/// `Inactive` 即软删除：不出现在列表中，但仍可按 id 查询
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    #[default]
    Active,
    Inactive,
}

impl ProfileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::Active => "active",
            ProfileStatus::Inactive => "inactive",
        }
    }

    pub fn from_active_flag(is_active: bool) -> Self {
        if is_active {
            ProfileStatus::Active
        } else {
            ProfileStatus::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ProfileStatus::Active)
    }
}

impl FromStr for ProfileStatus {
    type Err = VoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProfileStatus::Active),
            "inactive" => Ok(ProfileStatus::Inactive),
            other => Err(VoiceError::InvalidStatus(other.to_string())),
        }
    }
}

/// 参考音频格式
///
/// 仅按扩展名判断，不做内容嗅探
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleFormat {
    Wav,
    Mp3,
    Flac,
    M4a,
    Ogg,
}

impl SampleFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "m4a" => Some(Self::M4a),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    /// 从上传文件名推断格式
    pub fn from_file_name(file_name: &str) -> Result<Self, VoiceError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        Self::from_extension(ext).ok_or_else(|| {
            VoiceError::UnsupportedSampleFormat(if ext.is_empty() {
                file_name.to_string()
            } else {
                format!(".{}", ext.to_lowercase())
            })
        })
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::M4a => "m4a",
            Self::Ogg => "ogg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Flac => "audio/flac",
            Self::M4a => "audio/mp4",
            Self::Ogg => "audio/ogg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_name_is_trimmed() {
        let name = VoiceName::new("  Narrator  ").unwrap();
        assert_eq!(name.as_str(), "Narrator");
    }

    #[test]
    fn test_voice_name_rejects_blank() {
        assert!(VoiceName::new("").is_err());
        assert!(VoiceName::new("   ").is_err());
        assert!(VoiceName::new("x".repeat(256)).is_err());
        assert!(VoiceName::new("x".repeat(255)).is_ok());
    }

    #[test]
    fn test_sample_format_from_file_name() {
        assert_eq!(
            SampleFormat::from_file_name("clip.WAV").unwrap(),
            SampleFormat::Wav
        );
        assert_eq!(
            SampleFormat::from_file_name("voice.take2.m4a").unwrap(),
            SampleFormat::M4a
        );
        assert!(SampleFormat::from_file_name("notes.txt").is_err());
        assert!(SampleFormat::from_file_name("no_extension").is_err());
    }

    #[test]
    fn test_profile_status_round_trip_names() {
        assert_eq!("active".parse::<ProfileStatus>().unwrap(), ProfileStatus::Active);
        assert_eq!(
            ProfileStatus::Inactive.as_str().parse::<ProfileStatus>().unwrap(),
            ProfileStatus::Inactive
        );
        assert!(matches!(
            "deleted".parse::<ProfileStatus>(),
            Err(VoiceError::InvalidStatus(s)) if s == "deleted"
        ));
        assert!(!ProfileStatus::from_active_flag(false).is_active());
    }
}
