//! Pure style lookups for score and rating-change rendering.
//!
//! These are total functions over the whole integer range; the returned
//! strings are utility classes consumed verbatim by the UI. No state, no
//! errors, no I/O.

/// Glow effect applied to top-tier values.
const GLOW: &str =
    "text-black [-webkit-text-stroke:1px_white] [text-shadow:0_0_4px_white,0_0_6px_white,0_0_12px_white]";

/// Text decorator for an absolute score.
#[must_use]
pub const fn score_decorator(score: i64) -> &'static str {
    match score {
        i64::MIN..=-1000 => "text-red-950/90",
        -999..=-500 => "text-red-800/90",
        -499..=-100 => "text-red-200/80",
        -99..=-1 => "text-orange-700/80",
        0 => "text-slate-50/90",
        1..=99 => "text-emerald-200/80",
        100..=499 => "text-emerald-400/80",
        500..=999 => "text-emerald-700/90",
        1000..=i64::MAX => GLOW,
    }
}

/// Text decorator for a rating change (delta, smaller magnitudes than scores).
#[must_use]
pub const fn change_decorator(change: i64) -> &'static str {
    match change {
        i64::MIN..=-100 => "text-red-950/90",
        -99..=-50 => "text-red-800/90",
        -49..=-10 => "text-red-200/80",
        -9..=-1 => "text-orange-700/80",
        0 => "text-slate-50/90",
        1..=9 => "text-emerald-200/80",
        10..=49 => "text-emerald-400/80",
        50..=99 => "text-emerald-700/90",
        100..=i64::MAX => GLOW,
    }
}
