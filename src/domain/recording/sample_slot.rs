//! The three voice samples a session collects, in capture order

use std::fmt;

/// Position of a recording in the session list.
///
/// The order is fixed: highest pitch first, then lowest pitch, then the
/// normal speaking voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleSlot {
    HighPitch,
    LowPitch,
    Normal,
}

impl SampleSlot {
    /// All slots in capture order
    pub const ALL: [SampleSlot; 3] = [Self::HighPitch, Self::LowPitch, Self::Normal];

    /// Number of samples a complete session holds
    pub const COUNT: usize = Self::ALL.len();

    /// Slot for a zero-based position in the session list
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn index(&self) -> usize {
        match self {
            Self::HighPitch => 0,
            Self::LowPitch => 1,
            Self::Normal => 2,
        }
    }

    /// The slot captured after this one, if any
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Multipart field name expected by the recommendation service
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::HighPitch => "high",
            Self::LowPitch => "low",
            Self::Normal => "norm",
        }
    }

    /// File name attached to the multipart part
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::HighPitch => "high.wav",
            Self::LowPitch => "low.wav",
            Self::Normal => "norm.wav",
        }
    }

    /// Short label shown next to the waveform
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HighPitch => "Highest voice",
            Self::LowPitch => "Lowest voice",
            Self::Normal => "Normal voice",
        }
    }

    /// Instruction shown while this slot is waiting to be captured
    pub const fn prompt(&self) -> &'static str {
        match self {
            Self::HighPitch => "Sing the highest note you can produce",
            Self::LowPitch => "Sing the lowest note you can produce",
            Self::Normal => "Say a few words in your normal voice",
        }
    }
}

impl fmt::Display for SampleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_capture_order() {
        assert_eq!(SampleSlot::from_index(0), Some(SampleSlot::HighPitch));
        assert_eq!(SampleSlot::from_index(1), Some(SampleSlot::LowPitch));
        assert_eq!(SampleSlot::from_index(2), Some(SampleSlot::Normal));
        assert_eq!(SampleSlot::from_index(3), None);
    }

    #[test]
    fn next_walks_to_the_end() {
        assert_eq!(SampleSlot::HighPitch.next(), Some(SampleSlot::LowPitch));
        assert_eq!(SampleSlot::LowPitch.next(), Some(SampleSlot::Normal));
        assert_eq!(SampleSlot::Normal.next(), None);
    }

    #[test]
    fn field_and_file_names() {
        let fields: Vec<_> = SampleSlot::ALL.iter().map(|s| s.field_name()).collect();
        assert_eq!(fields, ["high", "low", "norm"]);
        assert_eq!(SampleSlot::Normal.file_name(), "norm.wav");
    }

    #[test]
    fn index_matches_position() {
        for (i, slot) in SampleSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }
}
