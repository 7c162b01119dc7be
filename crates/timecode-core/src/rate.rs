//! Frame rate model for timecode arithmetic.
//!
//! A [`Rate`] carries the nominal display rate (rounded to two decimals),
//! the integer time base used for field arithmetic, and whether SMPTE
//! drop-frame numbering applies.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{Result, TimecodeError};

const SECONDS_PER_DAY: u64 = 86_400;

/// Frame rate and numbering scheme of a timecode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateRepr", into = "RateRepr")]
pub struct Rate {
    fps: f64,
    time_base: u64,
    drop_frame: bool,
}

impl Rate {
    /// SMPTE 23.98 fps NDF (film pulled down for NTSC)
    pub const FPS_23_98: Self = Self::preset(23.98, 24, false);
    /// Film 24 fps NDF
    pub const FPS_24: Self = Self::preset(24.0, 24, false);
    /// EBU 25 fps NDF
    pub const FPS_25: Self = Self::preset(25.0, 25, false);
    /// SMPTE 29.97 fps NDF
    pub const FPS_29_97: Self = Self::preset(29.97, 30, false);
    /// SMPTE 29.97 fps DF
    pub const FPS_29_97_DF: Self = Self::preset(29.97, 30, true);
    /// SMPTE 30 fps NDF
    pub const FPS_30: Self = Self::preset(30.0, 30, false);
    /// EBU 50 fps NDF
    pub const FPS_50: Self = Self::preset(50.0, 50, false);
    /// SMPTE 59.94 fps NDF
    pub const FPS_59_94: Self = Self::preset(59.94, 60, false);
    /// SMPTE 59.94 fps DF
    pub const FPS_59_94_DF: Self = Self::preset(59.94, 60, true);
    /// SMPTE 60 fps NDF
    pub const FPS_60: Self = Self::preset(60.0, 60, false);
    /// High frame rate 120 fps NDF
    pub const FPS_120: Self = Self::preset(120.0, 120, false);
    /// High frame rate 240 fps NDF
    pub const FPS_240: Self = Self::preset(240.0, 240, false);

    /// Every catalog rate, in ascending fps order.
    pub const CATALOG: [Self; 12] = [
        Self::FPS_23_98,
        Self::FPS_24,
        Self::FPS_25,
        Self::FPS_29_97,
        Self::FPS_29_97_DF,
        Self::FPS_30,
        Self::FPS_50,
        Self::FPS_59_94,
        Self::FPS_59_94_DF,
        Self::FPS_60,
        Self::FPS_120,
        Self::FPS_240,
    ];

    const fn preset(fps: f64, time_base: u64, drop_frame: bool) -> Self {
        Self {
            fps,
            time_base,
            drop_frame,
        }
    }

    /// Create a rate from frames per second.
    ///
    /// The fps is rounded to two decimal places and must be at least 1 after
    /// rounding. The time base must be small enough that 24 hours of frames
    /// fit in a `u64`. Drop-frame numbering skips two frame numbers per
    /// minute (four at 59.94) except for every tenth minute.
    pub fn new(fps: f64, drop_frame: bool) -> Result<Self> {
        let fps = round_hundredths(fps);
        if !fps.is_finite() || fps < 1.0 {
            return Err(TimecodeError::InvalidRate(fps));
        }

        // saturates for huge fps, which the day check then rejects
        let time_base = fps.round() as u64;
        if time_base.checked_mul(SECONDS_PER_DAY).is_none() {
            return Err(TimecodeError::InvalidRate(fps));
        }

        Ok(Self {
            fps,
            time_base,
            drop_frame,
        })
    }

    /// Parse a rate in `num/den` form, e.g. `30000/1001`.
    pub fn parse(s: &str, drop_frame: bool) -> Result<Self> {
        let rate = parse_ratio(s).and_then(|fps| Self::new(fps, drop_frame));
        if let Err(err) = &rate {
            debug!(input = s, error = %err, "rejected frame rate");
        }
        rate
    }

    /// Nominal frames per second, rounded to two decimals.
    #[inline]
    pub fn fps(self) -> f64 {
        self.fps
    }

    /// Integer frames per timecode second.
    #[inline]
    pub fn time_base(self) -> u64 {
        self.time_base
    }

    /// Whether this rate uses SMPTE drop-frame numbering.
    #[inline]
    pub fn drop_frame(self) -> bool {
        self.drop_frame
    }

    /// Same fps and time base with a different numbering scheme.
    #[inline]
    pub fn with_drop_frame(self, drop_frame: bool) -> Self {
        Self { drop_frame, ..self }
    }

    /// Frame numbers skipped at the start of each non-tenth minute.
    pub(crate) fn drop_frames_per_minute(self) -> u64 {
        (self.fps * 0.066666).round() as u64
    }

    /// Packed frames in a minute that starts with skipped numbers.
    pub(crate) fn frames_per_drop_minute(self) -> u64 {
        self.time_base * 60 - self.drop_frames_per_minute()
    }

    /// Packed frames in a ten minute block (one full minute plus nine dropped ones).
    pub(crate) fn frames_per_10_minutes(self) -> u64 {
        self.time_base * 600 - 9 * self.drop_frames_per_minute()
    }

    /// Packed frames in 24 hours of timecode.
    pub(crate) fn frames_per_day(self) -> u64 {
        if self.drop_frame {
            self.frames_per_10_minutes() * 6 * 24
        } else {
            self.time_base * SECONDS_PER_DAY
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.drop_frame {
            write!(f, "{} fps DF", self.fps)
        } else {
            write!(f, "{} fps", self.fps)
        }
    }
}

/// Serialized form of a [`Rate`]; the time base is always derived.
#[derive(Serialize, Deserialize)]
struct RateRepr {
    fps: f64,
    drop_frame: bool,
}

impl TryFrom<RateRepr> for Rate {
    type Error = TimecodeError;

    fn try_from(repr: RateRepr) -> Result<Self> {
        Self::new(repr.fps, repr.drop_frame)
    }
}

impl From<Rate> for RateRepr {
    fn from(rate: Rate) -> Self {
        Self {
            fps: rate.fps,
            drop_frame: rate.drop_frame,
        }
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// True for a non-empty run of ASCII digits.
pub(crate) fn is_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_ratio(s: &str) -> Result<f64> {
    let (num, den) = s
        .split_once('/')
        .filter(|(num, den)| is_ascii_digits(num) && is_ascii_digits(den))
        .ok_or_else(|| TimecodeError::Parse(format!("unable to parse rate: {s}")))?;

    let num: f64 = num
        .parse()
        .map_err(|e| TimecodeError::Parse(format!("unable to parse rate numerator: {s}: {e}")))?;
    let den: f64 = den
        .parse()
        .map_err(|e| TimecodeError::Parse(format!("unable to parse rate denominator: {s}: {e}")))?;
    if den == 0.0 {
        return Err(TimecodeError::Parse(format!(
            "rate cannot have a denominator of 0: {s}"
        )));
    }

    Ok(num / den)
}
