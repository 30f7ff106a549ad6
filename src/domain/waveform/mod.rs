//! Peak-bin waveform of a clip
//!
//! A clip is split into `bins` equal spans; each bin keeps the largest
//! absolute sample in its span, normalized to 0.0..=1.0 against the loudest
//! bin so quiet recordings still fill the display.

use super::audio::PcmClip;

/// Block characters from silent to full scale
const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Default number of bins computed per clip
pub const DEFAULT_BINS: usize = 256;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Waveform {
    peaks: Vec<f32>,
}

impl Waveform {
    /// Compute `bins` normalized peaks from a clip
    pub fn from_clip(clip: &PcmClip, bins: usize) -> Self {
        Self::from_samples(&clip.samples, bins)
    }

    pub fn from_samples(samples: &[i16], bins: usize) -> Self {
        if samples.is_empty() || bins == 0 {
            return Self::default();
        }

        let bins = bins.min(samples.len());
        let raw: Vec<u16> = (0..bins)
            .map(|i| {
                let start = i * samples.len() / bins;
                let end = ((i + 1) * samples.len() / bins).max(start + 1);
                samples[start..end]
                    .iter()
                    .map(|s| s.unsigned_abs())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let loudest = raw.iter().copied().max().unwrap_or(0);
        let peaks = if loudest == 0 {
            vec![0.0; raw.len()]
        } else {
            raw.iter().map(|&p| p as f32 / loudest as f32).collect()
        };

        Self { peaks }
    }

    pub fn peaks(&self) -> &[f32] {
        &self.peaks
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Resample the peaks to `width` columns and draw them as block characters
    pub fn render(&self, width: usize) -> String {
        if self.peaks.is_empty() || width == 0 {
            return String::new();
        }

        (0..width)
            .map(|col| {
                let start = col * self.peaks.len() / width;
                let end = ((col + 1) * self.peaks.len() / width).max(start + 1);
                let peak = self.peaks[start..end.min(self.peaks.len())]
                    .iter()
                    .copied()
                    .fold(0.0f32, f32::max);
                let level = (peak * (LEVELS.len() - 1) as f32).round() as usize;
                LEVELS[level.min(LEVELS.len() - 1)]
            })
            .collect()
    }
}
