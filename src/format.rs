use std::fmt;

/// Displayed values stay below this in whichever unit is chosen, months aside.
const SCALE_LIMIT: f64 = 120.0;

const MINUTES_PER_HOUR: f64 = 60.0;
const HOURS_PER_DAY: f64 = 24.0;
const DAYS_PER_MONTH: f64 = 30.0;

/// Unit picked for displaying an elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    Minutes,
    Hours,
    Days,
    Months,
}

impl Magnitude {
    pub fn suffix(self) -> &'static str {
        match self {
            Magnitude::Minutes => "m",
            Magnitude::Hours => "h",
            Magnitude::Days => "d",
            Magnitude::Months => "mo",
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Picks the smallest unit keeping the value under 120 (months are
/// unbounded) and returns the value in that unit, not yet truncated.
pub fn scale(minutes: f64) -> (f64, Magnitude) {
    if minutes < SCALE_LIMIT {
        return (minutes, Magnitude::Minutes);
    }

    let hours = minutes / MINUTES_PER_HOUR;
    if hours < SCALE_LIMIT {
        return (hours, Magnitude::Hours);
    }

    let days = hours / HOURS_PER_DAY;
    if days < SCALE_LIMIT {
        return (days, Magnitude::Days);
    }

    (days / DAYS_PER_MONTH, Magnitude::Months)
}

/// Renders a minute count as `"<n> <unit>"`, truncating toward zero.
/// Negative input is the unavailable sentinel and renders as `"-1"`.
pub fn format_minutes(minutes: f64) -> String {
    if minutes < 0.0 || minutes.is_nan() {
        return "-1".to_string();
    }

    let (value, magnitude) = scale(minutes);
    format!("{} {}", value.trunc() as u64, magnitude)
}
