//! Intraday ticks and the trailing session window they are restricted to.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One intraday trade print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayTick {
    pub timestamp: NaiveDateTime,
    pub price: f64,
}

/// Time-of-day window (inclusive on both ends) used to select the tail of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SessionWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// The last thirty minutes of an A-share session: 14:30 to 15:00.
    pub fn closing_half_hour() -> Self {
        Self {
            start: NaiveTime::MIN + Duration::minutes(14 * 60 + 30),
            end: NaiveTime::MIN + Duration::hours(15),
        }
    }

    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        let t = timestamp.time();
        t >= self.start && t <= self.end
    }
}

impl Default for SessionWindow {
    fn default() -> Self {
        Self::closing_half_hour()
    }
}

/// Keep only the ticks of the most recent session that fall inside `window`,
/// ordered by timestamp.
pub fn latest_session_ticks(mut ticks: Vec<IntradayTick>, window: &SessionWindow) -> Vec<IntradayTick> {
    let Some(latest) = ticks.iter().map(|t| t.timestamp.date()).max() else {
        return ticks;
    };
    ticks.retain(|t| t.timestamp.date() == latest && window.contains(&t.timestamp));
    ticks.sort_by_key(|t| t.timestamp);
    ticks
}
