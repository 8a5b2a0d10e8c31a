//! Opt-in timing spans for the vignette pipeline.
//!
//! A [`TimingGuard`] measures the scope it lives in and logs the duration under the
//! `vignette::telemetry` target when dropped. Guards only log when telemetry has been switched
//! on through [`configure`] and the requested level passes both the telemetry threshold and the
//! global logger filter.

use std::{
    borrow::Cow,
    sync::atomic::{AtomicU8, Ordering},
    time::{Duration, Instant},
};

use log::{Level, LevelFilter, log, log_enabled};

/// Log target used by every timing span.
pub const TELEMETRY_TARGET: &str = "vignette::telemetry";

/// Highest level telemetry may log at. `LevelFilter::Off` (0) doubles as "disabled".
static THRESHOLD: AtomicU8 = AtomicU8::new(0);

/// Scoped timer that reports its elapsed time when it goes out of scope.
pub struct TimingGuard {
    label: Cow<'static, str>,
    level: Level,
    start: Instant,
    active: bool,
}

impl TimingGuard {
    /// Whether dropping this guard will produce a log line.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer without logging and hand back the measured duration.
    pub fn finish(mut self) -> Duration {
        self.active = false;
        self.start.elapsed()
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if self.active {
            log!(
                target: TELEMETRY_TARGET,
                self.level,
                "{} took {:.2?}",
                self.label,
                self.start.elapsed()
            );
        }
    }
}

/// Start a timing span that logs at `level` when telemetry allows it.
pub fn timing_guard(label: impl Into<Cow<'static, str>>, level: Level) -> TimingGuard {
    timing_guard_if(label, level, true)
}

/// Like [`timing_guard`], with an extra caller-side switch.
pub fn timing_guard_if(
    label: impl Into<Cow<'static, str>>,
    level: Level,
    enabled: bool,
) -> TimingGuard {
    let active =
        enabled && telemetry_allows(level) && log_enabled!(target: TELEMETRY_TARGET, level);
    TimingGuard {
        label: label.into(),
        level,
        start: Instant::now(),
        active,
    }
}

/// Turn telemetry on or off and set its verbosity threshold.
pub fn configure(enabled: bool, level: LevelFilter) {
    let threshold = if enabled { level as u8 } else { 0 };
    THRESHOLD.store(threshold, Ordering::Relaxed);
}

pub fn telemetry_enabled() -> bool {
    THRESHOLD.load(Ordering::Relaxed) > 0
}

/// Current telemetry threshold; `Off` while telemetry is disabled.
pub fn telemetry_level() -> LevelFilter {
    match THRESHOLD.load(Ordering::Relaxed) {
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        5 => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

/// `true` when telemetry is on and `level` is at or below the threshold.
pub fn telemetry_allows(level: Level) -> bool {
    level <= telemetry_level()
}
