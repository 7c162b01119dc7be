//! Integration test crate for the timecode workspace.
//!
//! This crate exists solely to hold end-to-end scenarios that drive
//! timecode-core through its public API only.


#[cfg(test)]
mod scenarios;
