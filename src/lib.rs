//! voice-sampler - record your vocal range, get song recommendations
//!
//! Records three short clips from the microphone (highest pitch, lowest
//! pitch, normal voice), shows each as a playable waveform, and submits
//! them as one multipart request to a recommendation service.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: value objects, the session state machine and errors
//! - **Application**: use cases and port interfaces (traits)
//! - **Infrastructure**: adapters (cpal, rodio, hound, reqwest, XDG config)
//! - **CLI**: argument parsing, presenter and the interactive session loop

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
