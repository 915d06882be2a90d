use crate::error::{ElapsedError, Endpoint};
use crate::format::format_minutes;
use crate::timestamp;
use std::fmt;
use tracing::debug;

/// Minute value reported when the elapsed time is unavailable.
pub const UNAVAILABLE: f64 = -1.0;

/// Time logged between two `yyyy-MM-dd HH:mm` timestamps.
///
/// The elapsed minutes are derived eagerly: every setter recomputes them
/// before returning, so reads never see a stale value. Unparseable input and
/// spans where `end` precedes `start` both read back as [`UNAVAILABLE`]
/// (`"-1"` when formatted); [`ElapsedDurationTracker::elapsed`] keeps the
/// cause.
#[derive(Debug, Clone, PartialEq)]
pub struct ElapsedDurationTracker {
    start: String,
    end: String,
    elapsed: Result<f64, ElapsedError>,
}

impl ElapsedDurationTracker {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> ElapsedDurationTracker {
        let start = start.into();
        let end = end.into();
        let elapsed = compute_elapsed(&start, &end);

        ElapsedDurationTracker {
            start,
            end,
            elapsed,
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn set_start(&mut self, start: impl Into<String>) {
        self.start = start.into();
        self.recompute();
    }

    pub fn set_end(&mut self, end: impl Into<String>) {
        self.end = end.into();
        self.recompute();
    }

    /// Elapsed minutes, fractional part kept, or [`UNAVAILABLE`].
    pub fn elapsed_minutes(&self) -> f64 {
        match self.elapsed {
            Ok(minutes) => minutes,
            Err(_) => UNAVAILABLE,
        }
    }

    /// Elapsed minutes with the reason they are unavailable, if they are.
    pub fn elapsed(&self) -> Result<f64, &ElapsedError> {
        self.elapsed.as_ref().map(|minutes| *minutes)
    }

    pub fn is_available(&self) -> bool {
        self.elapsed.is_ok()
    }

    /// Magnitude-scaled rendering, e.g. `"90 m"`, `"3 h"`, `"4 mo"`, or `"-1"`.
    pub fn formatted(&self) -> String {
        format_minutes(self.elapsed_minutes())
    }

    fn recompute(&mut self) {
        self.elapsed = compute_elapsed(&self.start, &self.end);
    }
}

impl fmt::Display for ElapsedDurationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

// Only the final, clamped value leaves this function.
fn compute_elapsed(start: &str, end: &str) -> Result<f64, ElapsedError> {
    let begin = timestamp::parse(start).ok_or_else(|| ElapsedError::ParseFailure {
        endpoint: Endpoint::Start,
        value: start.to_string(),
    });
    let finish = timestamp::parse(end).ok_or_else(|| ElapsedError::ParseFailure {
        endpoint: Endpoint::End,
        value: end.to_string(),
    });

    let result = begin.and_then(|begin| {
        let finish = finish?;
        let millis = finish.signed_duration_since(begin).num_milliseconds();
        if millis < 0 {
            return Err(ElapsedError::NegativeSpan {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(millis as f64 / 60_000.0)
    });

    if let Err(e) = &result {
        debug!(start, end, error = %e, "elapsed time unavailable");
    }

    result
}
