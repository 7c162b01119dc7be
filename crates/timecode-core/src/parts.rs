//! Conversion between packed frame counts and `hh:mm:ss:ff` fields.
//!
//! Non-drop rates decompose positionally in base `time_base`. Drop-frame
//! rates first restore the frame numbers the SMPTE scheme never assigns
//! (the first `n` numbers of every minute not divisible by ten), after which
//! the count can be decomposed positionally as well.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimecodeError};
use crate::rate::Rate;

/// The hour, minute, second and frame fields of a timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimecodeParts {
    pub hour: u64,
    pub minute: u64,
    pub second: u64,
    pub frame: u64,
}

impl TimecodeParts {
    #[inline]
    pub const fn new(hour: u64, minute: u64, second: u64, frame: u64) -> Self {
        Self {
            hour,
            minute,
            second,
            frame,
        }
    }

    /// Decompose a packed frame count using the numbering scheme of `rate`.
    pub fn from_frames(frames: u64, rate: Rate) -> Self {
        if rate.drop_frame() {
            drop_frame_to_parts(frames, rate)
        } else {
            to_parts(frames, rate.time_base())
        }
    }

    /// Validate the fields against `rate` and pack them into an absolute frame count.
    pub fn to_frames(self, rate: Rate) -> Result<u64> {
        if self.minute >= 60 {
            return Err(TimecodeError::Range(format!(
                "minutes must be between 0 and 59 got: {}",
                self.minute
            )));
        }
        if self.second >= 60 {
            return Err(TimecodeError::Range(format!(
                "seconds must be between 0 and 59 got: {}",
                self.second
            )));
        }
        if self.frame >= rate.time_base() {
            return Err(TimecodeError::Range(format!(
                "frames must be between 0 and {} got: {}",
                rate.time_base() - 1,
                self.frame
            )));
        }

        let naive = self.naive_frames(rate.time_base()).ok_or_else(|| {
            TimecodeError::Range(format!("hours too large to represent: {}", self.hour))
        })?;
        if !rate.drop_frame() {
            return Ok(naive);
        }

        // Cannot overflow: naive already holds time_base * 3600 * hour.
        let total_minutes = 60 * self.hour + self.minute;
        let skipped = rate.drop_frames_per_minute() * (total_minutes - total_minutes / 10);
        Ok(naive - skipped)
    }

    /// Frame count as if every nominal frame number were assigned.
    fn naive_frames(self, time_base: u64) -> Option<u64> {
        let hours = time_base.checked_mul(3600)?.checked_mul(self.hour)?;
        let minutes = time_base.checked_mul(60)?.checked_mul(self.minute)?;
        let seconds = time_base.checked_mul(self.second)?;
        hours
            .checked_add(minutes)?
            .checked_add(seconds)?
            .checked_add(self.frame)
    }
}

/// Positional decomposition of a continuous frame count.
pub fn to_parts(frames: u64, time_base: u64) -> TimecodeParts {
    let total_seconds = frames / time_base;
    TimecodeParts {
        hour: total_seconds / 3600,
        minute: (total_seconds / 60) % 60,
        second: total_seconds % 60,
        frame: frames % time_base,
    }
}

/// Decomposition of a packed drop-frame count.
pub fn drop_frame_to_parts(frames: u64, rate: Rate) -> TimecodeParts {
    to_parts(unpack_drop_frame(frames, rate), rate.time_base())
}

/// Re-insert the skipped frame numbers, yielding a continuous count.
fn unpack_drop_frame(frames: u64, rate: Rate) -> u64 {
    let dropped = rate.drop_frames_per_minute();
    let per_ten_minutes = rate.frames_per_10_minutes();
    let per_minute = rate.frames_per_drop_minute();

    let blocks = frames / per_ten_minutes;
    let remainder = frames % per_ten_minutes;

    let mut unpacked = frames + dropped * 9 * blocks;
    // The first minute of every block keeps all its numbers.
    if remainder > dropped {
        unpacked += dropped * ((remainder - dropped) / per_minute);
    }
    unpacked
}
