//! Free-text budget window parsing ("2h 30m", "45m", "1h").

use once_cell::sync::Lazy;
use regex::Regex;

static HOURS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)h").expect("valid hours pattern"));
static MINUTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)m").expect("valid minutes pattern"));

/// Hour and minute components found in a duration label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowDuration {
    pub hours: u64,
    pub minutes: u64,
}

impl WindowDuration {
    /// Parses the first `<int>h` and first `<int>m` token; missing parts count as zero.
    pub fn parse(text: &str) -> Self {
        Self {
            hours: first_number(&HOURS, text),
            minutes: first_number(&MINUTES, text),
        }
    }

    pub fn total_minutes(self) -> u64 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }

    pub fn is_empty(self) -> bool {
        self.total_minutes() == 0
    }
}

/// Total minutes described by `text`; zero means nothing usable was found.
pub fn parse_duration_minutes(text: &str) -> u64 {
    WindowDuration::parse(text).total_minutes()
}

fn first_number(pattern: &Regex, text: &str) -> u64 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        // digits only, so a parse failure means the value overflowed
        .map(|digits| digits.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}
