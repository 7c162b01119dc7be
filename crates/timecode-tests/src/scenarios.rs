//! End-to-end timecode scenarios.
//!
//! Exercises rate construction, parsing, formatting and arithmetic the way
//! an editing application strings them together.

use timecode_core::{Rate, Timecode, TimecodeError, TimecodeParts};
use tracing::info;

use crate::support::{init_tracing, ten_minute_block};

// ── Helpers ────────────────────────────────────────────────────

fn tc(rate: Rate, s: &str) -> Timecode {
    Timecode::parse(rate, s).unwrap()
}

fn round_trips(rate: Rate, frames: u64) -> bool {
    let formatted = Timecode::from_frames(rate, frames).to_string();
    Timecode::parse(rate, &formatted).map(|t| t.frames()) == Ok(frames)
}

// ── Rates ──────────────────────────────────────────────────────

#[test]
fn ntsc_ratio_rounds_to_catalog_value() {
    let rate = Rate::parse("30000/1001", false).unwrap();
    assert_eq!(rate.fps(), 29.97);
    assert_eq!(rate, Rate::FPS_29_97);
}

#[test]
fn rate_errors() {
    init_tracing();
    assert!(matches!(
        Rate::new(0.5, false),
        Err(TimecodeError::InvalidRate(_))
    ));
    assert!(Rate::parse("30/0", false).is_err());
}

// ── Drop-frame numbering ───────────────────────────────────────

#[test]
fn ninety_seconds_drop_frame() {
    let t = Timecode::from_seconds(Rate::FPS_29_97_DF, 90.0).unwrap();
    assert_eq!(t.to_string(), "00:01:30;02");
    assert_eq!(
        t.parts(),
        TimecodeParts {
            hour: 0,
            minute: 1,
            second: 30,
            frame: 2
        }
    );
}

#[test]
fn drop_frame_skips_two_numbers_each_non_tenth_minute() {
    let rate = Rate::FPS_29_97_DF;
    for minute in 0..120u64 {
        let before = format!("{:02}:{:02}:59;29", minute / 60, minute % 60);
        let next = tc(rate, &before).add(1);
        let upcoming = minute + 1;
        let expected_frame = if upcoming % 10 == 0 { 0 } else { 2 };
        let expected = format!(
            "{:02}:{:02}:00;{:02}",
            upcoming / 60,
            upcoming % 60,
            expected_frame
        );
        assert_eq!(next.to_string(), expected, "after {before}");
    }
}

#[test]
fn drop_frame_round_trips_around_ten_minute_blocks() {
    for rate in [Rate::FPS_29_97_DF, Rate::FPS_59_94_DF] {
        let dropped = (rate.fps() * 0.066666).round() as u64;
        let block = ten_minute_block(rate);
        for d in 0..=144u64 {
            let base = block * d;
            for offset in [0, 1, dropped, dropped + 1] {
                assert!(round_trips(rate, base + offset), "{rate} at {}", base + offset);
                if base >= offset {
                    assert!(round_trips(rate, base - offset), "{rate} at {}", base - offset);
                }
            }
        }
    }
}

#[test]
fn one_hour_drop_frame_matches_wall_clock() {
    let t = tc(Rate::FPS_29_97_DF, "01:00:00;00");
    assert_eq!(t.frames(), 107_892);
    // 107892 / 29.97 = 3600 seconds, to within the 2-decimal fps rounding
    assert!((t.real_seconds() - 3600.0).abs() < 0.01);
}

// ── Non-drop formatting ────────────────────────────────────────

#[test]
fn non_drop_round_trips_every_catalog_rate() {
    for rate in Rate::CATALOG.iter().filter(|r| !r.drop_frame()) {
        let limit = rate.time_base() * 3600 * 100;
        let step = limit / 997;
        for frames in (0..limit).step_by(step as usize).chain([limit - 1]) {
            assert!(round_trips(*rate, frames), "{rate} at {frames}");
        }
    }
}

#[test]
fn hours_grow_past_two_digits() {
    let t = Timecode::from_frames(Rate::FPS_25, 25 * 3600 * 150 + 3);
    assert_eq!(t.to_string(), "150:00:00:03");
    assert_eq!(t.hour(), 150);
}

#[test]
fn high_frame_rate_frames_use_three_digits() {
    let t = tc(Rate::FPS_120, "00:00:01:119");
    assert_eq!(t.frames(), 239);
    assert_eq!(t.to_string(), "00:00:01:119");
}

// ── Range and arithmetic errors ────────────────────────────────

#[test]
fn parse_range_errors() {
    init_tracing();
    assert!(matches!(
        Timecode::parse(Rate::FPS_30, "12:70:00:00"),
        Err(TimecodeError::Range(_))
    ));
    assert!(matches!(
        Timecode::parse(Rate::FPS_30, "12:00:00:40"),
        Err(TimecodeError::Range(_))
    ));
}

#[test]
fn subtracting_below_zero_fails() {
    let t = Timecode::from_frames(Rate::FPS_30, 5);
    assert!(matches!(
        t.sub(10),
        Err(TimecodeError::NegativeResult {
            frames: 5,
            subtrahend: 10
        })
    ));
}

#[test]
fn seconds_recover_input_within_a_frame() {
    for rate in Rate::CATALOG {
        for seconds in [0.0, 0.5, 1.0 / 3.0, 59.999, 90.0, 3599.99, 86_400.25] {
            let t = Timecode::from_seconds(rate, seconds).unwrap();
            let delta = seconds - t.seconds();
            assert!(
                (-1e-9..1.0 / rate.time_base() as f64 + 1e-9).contains(&delta),
                "{rate} {seconds}: {}",
                t.seconds()
            );
        }
    }
}

// ── Edit-style workflow ────────────────────────────────────────

#[test]
fn conform_clip_from_pal_to_ntsc_drop_frame() {
    init_tracing();
    let source_in = tc(Rate::FPS_25, "10:00:00:00");
    let duration = tc(Rate::FPS_25, "00:00:30:12");
    let source_out = source_in.add_timecode(duration).unwrap();
    assert_eq!(source_out.to_string(), "10:00:30:12");

    // different rates never combine implicitly
    let record_in = tc(Rate::FPS_29_97_DF, "01:00:00;00");
    assert!(matches!(
        record_in.add_timecode(duration),
        Err(TimecodeError::RateMismatch { .. })
    ));

    let conformed = duration.rescale(Rate::FPS_29_97_DF);
    // 30.48 s at a time base of 30 is 914.4 frames
    assert_eq!(conformed.frames(), 914);
    let record_out = record_in.add_timecode(conformed).unwrap();
    info!(%record_in, %record_out, "conformed clip");
    assert_eq!(record_out.to_string(), "01:00:30;14");
    assert_eq!(
        record_out.sub_timecode(record_in).unwrap().frames(),
        conformed.frames()
    );
}

#[test]
fn add_one_never_wraps_at_24_hours() {
    let rate = Rate::FPS_29_97_DF;
    let t = tc(rate, "23:59:59;29").add(1);
    assert_eq!(t.to_string(), "24:00:00;00");
    // 144 ten-minute blocks
    assert_eq!(t.frames(), 144 * ten_minute_block(rate));
    assert_eq!(t.frames(), 2_589_408);
}
