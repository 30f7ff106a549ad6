//! Clip playback infrastructure

mod rodio_playback;

pub use rodio_playback::RodioPlayback;
