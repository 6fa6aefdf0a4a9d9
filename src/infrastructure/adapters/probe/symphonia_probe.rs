//! Symphonia Audio Probe
//!
//! 只读容器头，不解码 PCM；头里缺帧数时退化为逐包累加时长

use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioInfo, AudioProbePort, ProbeError};

/// 基于 symphonia 的音频探测器
#[derive(Debug, Default, Clone)]
pub struct SymphoniaAudioProbe;

impl SymphoniaAudioProbe {
    pub fn new() -> Self {
        Self
    }

    fn probe_blocking(path: &Path) -> Result<AudioInfo, ProbeError> {
        let file = File::open(path).map_err(|e| ProbeError::IoError(e.to_string()))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| match e {
                SymphoniaError::Unsupported(msg) => ProbeError::UnsupportedFormat(msg.to_string()),
                other => ProbeError::DecodingError(format!("Probe failed: {}", other)),
            })?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| ProbeError::InvalidInput("No audio track found".to_string()))?;
        let track_id = track.id;
        let params = track.codec_params.clone();

        let sample_rate = params
            .sample_rate
            .ok_or_else(|| ProbeError::InvalidInput("Unknown sample rate".to_string()))?;

        let frames = match params.n_frames {
            Some(n) => n,
            None => Self::count_frames(format.as_mut(), track_id)?,
        };

        Ok(AudioInfo {
            frames,
            sample_rate,
        })
    }

    fn count_frames(format: &mut dyn FormatReader, track_id: u32) -> Result<u64, ProbeError> {
        let mut frames = 0u64;
        loop {
            match format.next_packet() {
                Ok(packet) if packet.track_id() == track_id => frames += packet.dur,
                Ok(_) => {}
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break
                }
                Err(e) => return Err(ProbeError::DecodingError(e.to_string())),
            }
        }
        Ok(frames)
    }
}

#[async_trait]
impl AudioProbePort for SymphoniaAudioProbe {
    async fn probe(&self, path: &Path) -> Result<AudioInfo, ProbeError> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::probe_blocking(&path))
            .await
            .map_err(|e| ProbeError::IoError(format!("Probe task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_wav(path: &Path, sample_rate: u32, channels: u16, frames: u32) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames * u32::from(channels) {
            writer.write_sample((i % 64) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[tokio::test]
    async fn test_probe_mono_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 24_000, 1, 24_000 * 3 + 100);

        let info = SymphoniaAudioProbe::new().probe(&path).await.unwrap();

        assert_eq!(info.sample_rate, 24_000);
        assert_eq!(info.frames, 24_000 * 3 + 100);
        assert_eq!(info.duration_seconds(), 3);
    }

    #[tokio::test]
    async fn test_probe_stereo_counts_frames_per_channel() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(&path, 22_050, 2, 22_050);

        let info = SymphoniaAudioProbe::new().probe(&path).await.unwrap();

        assert_eq!(info.frames, 22_050);
        assert_eq!(info.duration_seconds(), 1);
    }

    #[tokio::test]
    async fn test_probe_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.wav");
        std::fs::write(&path, b"definitely not audio").unwrap();

        assert!(SymphoniaAudioProbe::new().probe(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_probe_empty_placeholder_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        std::fs::write(&path, b"").unwrap();

        assert!(SymphoniaAudioProbe::new().probe(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_probe_missing_file() {
        let dir = tempdir().unwrap();
        let result = SymphoniaAudioProbe::new()
            .probe(&dir.path().join("missing.wav"))
            .await;

        assert!(matches!(result, Err(ProbeError::IoError(_))));
    }
}
