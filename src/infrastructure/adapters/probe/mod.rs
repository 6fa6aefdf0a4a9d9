//! Probe Adapter - 基于 symphonia 的音频信息读取

mod symphonia_probe;

pub use symphonia_probe::SymphoniaAudioProbe;
