//! Recording domain module

mod duration;
mod entity;
mod sample_slot;

pub use duration::{Duration, DEFAULT_CAPTURE_LIMIT_SECS};
pub use entity::{AudioRef, CaptureTimestamp, Recording, RecordingId};
pub use sample_slot::SampleSlot;
