//! Fixed timing constants (§6). Unlike [`crate::config::JudgeConfig`], these
//! are not configurable — they describe the tick grid itself, not a tunable
//! judgement policy.

/// Ticks per 60 Hz display frame.
pub const JUDGE_TPF: i64 = 3;

/// Ticks per second.
pub const JUDGE_TPS: i64 = 180;

pub const TAP_CRITICAL: i64 = 3;
pub const TAP_AVAILABLE: i64 = 27;
pub const TOUCH_CRITICAL: i64 = 27;
pub const TOUCH_AVAILABLE: i64 = 27;

pub const SLIDE_CRITICAL: i64 = 42;
pub const SLIDE_AVAILABLE: i64 = 108;
pub const SLIDE_LEADING: i64 = 15;
pub const SLIDE_DELTA_SHIFT: i64 = 9;

pub const FAKE_HOLD_DURATION: i64 = 3;

/// Extension applied beyond a tap-on-slide collide interval's upper bound
/// before the final judge area, and (per the resolved open question in
/// DESIGN.md) the same value used for `COLLIDE_TAIL_THRESHOLD`.
pub const COLLIDE_EXTRA_DELTA: i64 = 6;

/// Converts a tick count to seconds.
pub fn ticks_to_seconds(ticks: f64) -> f64 {
    ticks / JUDGE_TPS as f64
}
