//! Microphone capture infrastructure
//!
//! Opens the default input device with cpal and feeds mono 16-bit samples
//! into the capture controller's sink.

mod cpal_microphone;

pub use cpal_microphone::CpalMicrophone;
