//! Voice recording references and the recording-duration clock.
use crate::constants::DEFAULT_RECORDING_LIMIT_SECS;
use crate::media::MediaHandle;
use crate::numbers::percent_of;
use serde::{Deserialize, Serialize};

/// A finished recording owned by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRecording {
    audio: MediaHandle,
}

impl VoiceRecording {
    /// `None` when `reference` is blank, meaning "no recording".
    #[must_use]
    pub fn from_reference(reference: &str) -> Option<Self> {
        MediaHandle::parse(reference).map(|audio| Self { audio })
    }

    #[must_use]
    pub const fn audio(&self) -> &MediaHandle {
        &self.audio
    }

    #[must_use]
    pub fn audio_reference(&self) -> &str {
        self.audio.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    Running,
    LimitReached,
}

/// Screen-local elapsed-time counter for an in-progress capture.
///
/// Ticked once per second by the recording screen; it never touches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingClock {
    elapsed_secs: u32,
    limit_secs: u32,
}

impl Default for RecordingClock {
    fn default() -> Self {
        Self::new(DEFAULT_RECORDING_LIMIT_SECS)
    }
}

impl RecordingClock {
    #[must_use]
    pub const fn new(limit_secs: u32) -> Self {
        Self {
            elapsed_secs: 0,
            limit_secs,
        }
    }

    /// Advance one second; saturates at the limit.
    pub fn tick(&mut self) -> ClockTick {
        if self.elapsed_secs >= self.limit_secs {
            return ClockTick::LimitReached;
        }
        self.elapsed_secs += 1;
        if self.elapsed_secs >= self.limit_secs {
            ClockTick::LimitReached
        } else {
            ClockTick::Running
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
    }

    #[must_use]
    pub const fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    #[must_use]
    pub const fn limit_secs(&self) -> u32 {
        self.limit_secs
    }

    #[must_use]
    pub fn progress_pct(&self) -> u8 {
        percent_of(self.elapsed_secs, self.limit_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_reference_means_no_recording() {
        assert!(VoiceRecording::from_reference("").is_none());
        let rec = VoiceRecording::from_reference("blob:http://localhost/v1").unwrap();
        assert!(rec.audio().is_local());
        assert_eq!(rec.audio_reference(), "blob:http://localhost/v1");
    }

    #[test]
    fn clock_stops_at_limit() {
        let mut clock = RecordingClock::new(3);
        assert_eq!(clock.tick(), ClockTick::Running);
        assert_eq!(clock.tick(), ClockTick::Running);
        assert_eq!(clock.tick(), ClockTick::LimitReached);
        assert_eq!(clock.tick(), ClockTick::LimitReached);
        assert_eq!(clock.elapsed_secs(), 3);
        assert_eq!(clock.progress_pct(), 100);
        clock.reset();
        assert_eq!(clock.elapsed_secs(), 0);
    }

    #[test]
    fn default_clock_runs_thirty_seconds() {
        let mut clock = RecordingClock::default();
        let ticks = std::iter::repeat_with(|| clock.tick())
            .take_while(|tick| *tick == ClockTick::Running)
            .count();
        assert_eq!(ticks, 29);
        assert_eq!(clock.elapsed_secs(), 30);
    }
}
