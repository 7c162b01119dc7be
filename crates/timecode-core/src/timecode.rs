//! Frame-accurate timecode values.
//!
//! A [`Timecode`] is a [`Rate`] plus an absolute frame count. The
//! `hh:mm:ss:ff` fields are derived on demand. Timecodes are values: every
//! arithmetic operation returns a new one.

use num_rational::Ratio;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use tracing::debug;

use crate::error::{Result, TimecodeError};
use crate::parts::{to_parts, TimecodeParts};
use crate::rate::{is_ascii_digits, Rate};

/// Field separators accepted by [`Timecode::parse`], in any position.
const SEPARATORS: [char; 4] = [':', ';', '.', ','];

/// A timecode at a given rate, stored as a packed frame count.
///
/// Hours are unbounded: the value never wraps back to `00:00:00:00` after
/// 24 hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timecode {
    rate: Rate,
    frames: u64,
}

impl Timecode {
    /// Parse `hh:mm:ss:ff` at the given rate.
    ///
    /// Minutes and seconds must be two digits each; hours and frames take any
    /// number of digits. Any of `:;.,` may separate the fields regardless of
    /// the drop-frame flag.
    pub fn parse(rate: Rate, s: &str) -> Result<Self> {
        let timecode = parse_fields(s).and_then(|fields| Self::from_parts(rate, fields));
        if let Err(err) = &timecode {
            debug!(input = s, %rate, error = %err, "rejected timecode");
        }
        timecode
    }

    /// Build a timecode from its fields, validating them against `rate`.
    pub fn from_parts(rate: Rate, parts: TimecodeParts) -> Result<Self> {
        Ok(Self {
            rate,
            frames: parts.to_frames(rate)?,
        })
    }

    /// Build a timecode from an absolute packed frame count.
    #[inline]
    pub const fn from_frames(rate: Rate, frames: u64) -> Self {
        Self { rate, frames }
    }

    /// Build a timecode from nominal seconds, truncating to whole frames.
    pub fn from_seconds(rate: Rate, seconds: f64) -> Result<Self> {
        if seconds.is_nan() || seconds < 0.0 {
            return Err(TimecodeError::Range(format!(
                "timecode can not have a negative value: {seconds}"
            )));
        }
        if seconds.is_infinite() {
            return Err(TimecodeError::Range(format!(
                "timecode seconds must be finite: {seconds}"
            )));
        }

        let frames = (seconds * rate.time_base() as f64).floor() as u64;
        Ok(Self::from_frames(rate, frames))
    }

    #[inline]
    pub fn rate(self) -> Rate {
        self.rate
    }

    /// Absolute packed frame count.
    #[inline]
    pub fn frames(self) -> u64 {
        self.frames
    }

    /// All four fields, decoded with the rate's numbering scheme.
    #[inline]
    pub fn parts(self) -> TimecodeParts {
        TimecodeParts::from_frames(self.frames, self.rate)
    }

    /// Hour field, e.g. 2 for `02:12:49:15`.
    pub fn hour(self) -> u64 {
        self.parts().hour
    }

    /// Minute field, e.g. 12 for `02:12:49:15`.
    pub fn minute(self) -> u64 {
        self.parts().minute
    }

    /// Second field, e.g. 49 for `02:12:49:15`.
    pub fn second(self) -> u64 {
        self.parts().second
    }

    /// Frame field, e.g. 15 for `02:12:49:15`.
    pub fn frame(self) -> u64 {
        self.parts().frame
    }

    /// Nominal seconds: the frame count in units of the time base.
    ///
    /// Always decomposed as non-drop, so for drop-frame rates this is the
    /// count of elapsed time-base ticks and not the value displayed in the
    /// fields. Use [`Timecode::real_seconds`] for elapsed wall-clock time.
    pub fn seconds(self) -> f64 {
        let time_base = self.rate.time_base();
        let fields = to_parts(self.frames, time_base);
        (fields.hour * 3600 + fields.minute * 60 + fields.second) as f64
            + fields.frame as f64 / time_base as f64
    }

    /// Exact nominal seconds as a reduced fraction of frames over time base.
    pub fn seconds_ratio(self) -> Ratio<u64> {
        Ratio::new(self.frames, self.rate.time_base())
    }

    /// Elapsed wall-clock seconds at the rate's fps.
    pub fn real_seconds(self) -> f64 {
        self.frames as f64 / self.rate.fps()
    }

    /// Advance by `frames`.
    #[allow(clippy::should_implement_trait)]
    #[inline]
    pub fn add(self, frames: u64) -> Self {
        Self::from_frames(self.rate, self.frames + frames)
    }

    /// Step back by `frames`, failing instead of going below zero.
    pub fn sub(self, frames: u64) -> Result<Self> {
        let remaining = self
            .frames
            .checked_sub(frames)
            .ok_or(TimecodeError::NegativeResult {
                frames: self.frames,
                subtrahend: frames,
            })?;
        Ok(Self::from_frames(self.rate, remaining))
    }

    /// Add another timecode of the same rate.
    pub fn add_timecode(self, other: Timecode) -> Result<Self> {
        ensure_same_rate(self.rate, other.rate)?;
        Ok(self.add(other.frames))
    }

    /// Subtract another timecode of the same rate.
    pub fn sub_timecode(self, other: Timecode) -> Result<Self> {
        ensure_same_rate(self.rate, other.rate)?;
        self.sub(other.frames)
    }

    /// Convert to another rate through nominal seconds.
    ///
    /// Truncates to whole frames of the target rate, so converting to a
    /// coarser time base and back can lose up to one source frame.
    pub fn rescale(self, rate: Rate) -> Self {
        let scaled = self.seconds_ratio() * Ratio::from_integer(rate.time_base());
        Self::from_frames(rate, scaled.floor().to_integer())
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.parts();
        let separator = if self.rate.drop_frame() { ';' } else { ':' };
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            fields.hour, fields.minute, fields.second, separator, fields.frame
        )
    }
}

impl Add<u64> for Timecode {
    type Output = Self;
    fn add(self, rhs: u64) -> Self {
        Timecode::add(self, rhs)
    }
}

pub(crate) fn ensure_same_rate(left: Rate, right: Rate) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(TimecodeError::RateMismatch { left, right })
    }
}

fn parse_fields(s: &str) -> Result<TimecodeParts> {
    let malformed = || TimecodeError::Parse(format!("unable to parse timecode: {s}"));

    let fields: Vec<&str> = s.split(&SEPARATORS[..]).collect();
    let [hours, minutes, seconds, frames] = fields.as_slice() else {
        return Err(malformed());
    };
    let well_formed = is_ascii_digits(hours)
        && minutes.len() == 2
        && is_ascii_digits(minutes)
        && seconds.len() == 2
        && is_ascii_digits(seconds)
        && is_ascii_digits(frames);
    if !well_formed {
        return Err(malformed());
    }

    let number = |field: &str, name: &str| {
        field.parse::<u64>().map_err(|e| {
            TimecodeError::Parse(format!("unable to parse timecode {name}: {s}: {e}"))
        })
    };
    Ok(TimecodeParts::new(
        number(*hours, "hours")?,
        number(*minutes, "minutes")?,
        number(*seconds, "seconds")?,
        number(*frames, "frames")?,
    ))
}
