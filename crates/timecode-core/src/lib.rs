//! Timecode Core - SMPTE/EBU timecodes for frame-accurate editing
//!
//! This crate provides:
//! - Frame rates with drop-frame numbering (`Rate`) and the broadcast/film catalog
//! - Parsing and formatting of `hh:mm:ss:ff` / `hh:mm:ss;ff` strings
//! - Conversion between packed frame counts and timecode fields
//! - Value arithmetic on timecodes, plus a wrapping 24-hour counter

pub mod counter;
pub mod error;
pub mod parts;
pub mod rate;
pub mod timecode;

pub use counter::TimecodeCounter;
pub use error::{Result, TimecodeError};
pub use parts::TimecodeParts;
pub use rate::Rate;
pub use timecode::Timecode;
