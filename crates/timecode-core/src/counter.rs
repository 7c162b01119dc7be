//! Running timecode counter with 24-hour wraparound.
//!
//! The counter owns a single [`Timecode`] and replaces it on every
//! operation; no arithmetic happens in place. Unlike [`Timecode`], results
//! wrap modulo 24 hours in both directions, so subtracting past midnight
//! lands at the end of the previous day.

use std::fmt;
use tracing::debug;

use crate::error::Result;
use crate::rate::Rate;
use crate::timecode::{ensure_same_rate, Timecode};

/// A mutable timecode position, e.g. a transport clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimecodeCounter {
    current: Timecode,
}

impl TimecodeCounter {
    /// Create a counter at `00:00:00:00` for the given fps.
    pub fn new(fps: f64, drop_frame: bool) -> Result<Self> {
        Ok(Self::from_rate(Rate::new(fps, drop_frame)?))
    }

    /// Create a counter at `00:00:00:00`.
    pub fn from_rate(rate: Rate) -> Self {
        Self {
            current: Timecode::from_frames(rate, 0),
        }
    }

    /// Start from an existing timecode, folded into a single day.
    pub fn from_timecode(timecode: Timecode) -> Self {
        let rate = timecode.rate();
        Self {
            current: Timecode::from_frames(rate, timecode.frames() % rate.frames_per_day()),
        }
    }

    #[inline]
    pub fn timecode(&self) -> Timecode {
        self.current
    }

    #[inline]
    pub fn rate(&self) -> Rate {
        self.current.rate()
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.current.frames()
    }

    /// Elapsed wall-clock seconds at the counter's fps.
    pub fn to_seconds(&self) -> f64 {
        self.current.real_seconds()
    }

    /// Back to `00:00:00:00`, keeping the rate.
    pub fn reset(&mut self) {
        self.current = Timecode::from_frames(self.rate(), 0);
    }

    /// Change the fps, keeping the drop-frame flag and the frame count.
    pub fn set_frame_rate(&mut self, fps: f64) -> Result<()> {
        let rate = Rate::new(fps, self.rate().drop_frame())?;
        self.replace(rate, self.frames());
        Ok(())
    }

    /// Switch numbering scheme; the frame count is kept.
    pub fn set_drop_frame(&mut self, drop_frame: bool) {
        self.replace(self.rate().with_drop_frame(drop_frame), self.frames());
    }

    pub fn add_frames(&mut self, frames: u64) {
        let day = self.rate().frames_per_day();
        let next = self.frames() + frames % day;
        if next >= day {
            debug!(frames, "timecode counter wrapped past 24 hours");
        }
        self.replace(self.rate(), next);
    }

    pub fn sub_frames(&mut self, frames: u64) {
        let day = self.rate().frames_per_day();
        let back = frames % day;
        let current = self.frames();
        let next = if back > current {
            debug!(frames, "timecode counter wrapped below zero");
            current + day - back
        } else {
            current - back
        };
        self.replace(self.rate(), next);
    }

    /// Advance by nominal seconds, truncated to whole frames.
    pub fn add_seconds(&mut self, seconds: f64) -> Result<()> {
        let delta = Timecode::from_seconds(self.rate(), seconds)?;
        self.add_frames(delta.frames());
        Ok(())
    }

    /// Step back by nominal seconds, truncated to whole frames.
    pub fn sub_seconds(&mut self, seconds: f64) -> Result<()> {
        let delta = Timecode::from_seconds(self.rate(), seconds)?;
        self.sub_frames(delta.frames());
        Ok(())
    }

    /// Advance by a timecode string parsed at the counter's rate.
    pub fn add_str(&mut self, s: &str) -> Result<()> {
        let delta = Timecode::parse(self.rate(), s)?;
        self.add_frames(delta.frames());
        Ok(())
    }

    /// Step back by a timecode string parsed at the counter's rate.
    pub fn sub_str(&mut self, s: &str) -> Result<()> {
        let delta = Timecode::parse(self.rate(), s)?;
        self.sub_frames(delta.frames());
        Ok(())
    }

    /// Advance by another timecode. Rates must match; see [`Timecode::rescale`].
    pub fn add(&mut self, other: &Timecode) -> Result<()> {
        ensure_same_rate(self.rate(), other.rate())?;
        self.add_frames(other.frames());
        Ok(())
    }

    /// Step back by another timecode. Rates must match; see [`Timecode::rescale`].
    pub fn sub(&mut self, other: &Timecode) -> Result<()> {
        ensure_same_rate(self.rate(), other.rate())?;
        self.sub_frames(other.frames());
        Ok(())
    }

    fn replace(&mut self, rate: Rate, frames: u64) {
        self.current = Timecode::from_frames(rate, frames % rate.frames_per_day());
    }
}

impl From<Timecode> for TimecodeCounter {
    fn from(timecode: Timecode) -> Self {
        Self::from_timecode(timecode)
    }
}

impl fmt::Display for TimecodeCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.current, f)
    }
}
