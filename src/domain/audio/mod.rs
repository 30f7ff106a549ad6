//! Audio clip domain module

mod audio_data;
pub mod wav;

pub use audio_data::{AudioData, WAV_MIME_TYPE};
pub use wav::PcmClip;
