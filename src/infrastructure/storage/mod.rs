//! Scratch storage for captured clips

mod temp_clips;

pub use temp_clips::TempClipStore;
