//! WAV encoding and decoding for captured clips
//!
//! Clips are stored as mono, 16-bit integer PCM at whatever rate the input
//! device delivered. Decoding accepts any layout `hound` understands and
//! mixes it down to mono so the waveform view can read foreign files too.

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::domain::error::AudioCodecError;

const BITS_PER_SAMPLE: u16 = 16;

/// Mono 16-bit PCM samples with their rate
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PcmClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

/// Encode a mono PCM clip into WAV bytes
pub fn encode(clip: &PcmClip) -> Result<Vec<u8>, AudioCodecError> {
    if clip.sample_rate == 0 {
        return Err(AudioCodecError::Encode("sample rate is zero".into()));
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut buf = Vec::with_capacity(44 + clip.samples.len() * 2);
    {
        let mut writer = WavWriter::new(Cursor::new(&mut buf), spec)
            .map_err(|e| AudioCodecError::Encode(e.to_string()))?;
        for &sample in &clip.samples {
            writer
                .write_sample(sample)
                .map_err(|e| AudioCodecError::Encode(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| AudioCodecError::Encode(e.to_string()))?;
    }

    Ok(buf)
}

/// Decode WAV bytes into mono 16-bit PCM
pub fn decode(bytes: &[u8]) -> Result<PcmClip, AudioCodecError> {
    let mut reader =
        WavReader::new(Cursor::new(bytes)).map_err(|e| AudioCodecError::Decode(e.to_string()))?;
    let spec = reader.spec();

    if spec.channels == 0 {
        return Err(AudioCodecError::Unsupported("zero channels".into()));
    }

    let interleaved: Vec<i16> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, bits) if bits <= 16 => reader
            .samples::<i16>()
            .collect::<Result<_, _>>()
            .map_err(|e| AudioCodecError::Decode(e.to_string()))?,
        (SampleFormat::Int, bits) if bits <= 32 => {
            let shift = bits - 16;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| (v >> shift) as i16))
                .collect::<Result<_, _>>()
                .map_err(|e| AudioCodecError::Decode(e.to_string()))?
        }
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(f32_to_i16))
            .collect::<Result<_, _>>()
            .map_err(|e| AudioCodecError::Decode(e.to_string()))?,
        (format, bits) => {
            return Err(AudioCodecError::Unsupported(format!(
                "{:?} with {} bits per sample",
                format, bits
            )))
        }
    };

    Ok(PcmClip {
        samples: mix_to_mono(&interleaved, spec.channels),
        sample_rate: spec.sample_rate,
    })
}

/// Average interleaved frames down to a single channel
pub fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels as usize)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / frame.len() as i32) as i16
        })
        .collect()
}

/// Convert a float sample in [-1.0, 1.0] to i16, clamping out-of-range input
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
