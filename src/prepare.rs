//! Ordering and de-duplication of bars coming from the bar-source route.
//!
//! Indicators align purely by position, so they need bars in ascending time
//! order with no repeated times. The proxy route makes no such promise; these
//! helpers establish it.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::{Bar, Error, Ohlcv, Result};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a JSON array of bars as served by the proxy route.
///
/// # Errors
///
/// Returns [`Error::Json`] if the payload is not an array of
/// `{time, open, high, low, close, volume?}` objects.
pub fn parse_bars(json: &str) -> Result<Vec<Bar>> {
    Ok(serde_json::from_str(json)?)
}

/// Sorts bars ascending by their parsed time and drops repeated times.
///
/// The sort is stable and the first bar seen for a time string wins, so
/// `prepare_bars` is idempotent.
///
/// # Errors
///
/// Returns [`Error::InvalidTime`] for a time that is not a date
/// (`2024-01-31`), a date-time (`2024-01-31 09:15`, `2024-01-31T09:15:00`,
/// optionally with seconds) or RFC 3339 (`2024-01-31T09:15:00+05:30`).
///
/// # Example
///
/// ```
/// use chart_indicators::{Bar, Ohlcv, prepare_bars};
///
/// let bar = |t: &str, c| Bar::new(t, c, c, c, c);
/// let bars = prepare_bars(vec![
///     bar("2024-01-03", 3.0),
///     bar("2024-01-01", 1.0),
///     bar("2024-01-03", 9.0),
/// ]).unwrap();
///
/// let times: Vec<_> = bars.iter().map(Ohlcv::time).collect();
/// assert_eq!(times, ["2024-01-01", "2024-01-03"]);
/// assert_eq!(bars[1].close(), 3.0);
/// ```
pub fn prepare_bars(bars: Vec<Bar>) -> Result<Vec<Bar>> {
    let total = bars.len();

    let mut keyed = bars
        .into_iter()
        .map(|bar| Ok((sort_key(bar.time())?, bar)))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by_key(|(key, _)| *key);

    let mut seen = HashSet::with_capacity(keyed.len());
    let unique: Vec<Bar> = keyed
        .into_iter()
        .map(|(_, bar)| bar)
        .filter(|bar| seen.insert(bar.time().to_owned()))
        .collect();

    if unique.len() < total {
        debug!(
            dropped = total - unique.len(),
            kept = unique.len(),
            "dropped bars with repeated times"
        );
    }

    Ok(unique)
}

/// [`parse_bars`] followed by [`prepare_bars`].
///
/// # Errors
///
/// See [`parse_bars`] and [`prepare_bars`].
pub fn load_bars(json: &str) -> Result<Vec<Bar>> {
    prepare_bars(parse_bars(json)?)
}

/// Milliseconds since the Unix epoch. Naive times are read as UTC.
fn sort_key(time: &str) -> Result<i64> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(time) {
        return Ok(date_time.timestamp_millis());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(time, format) {
            return Ok(date_time.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(time, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date_time| date_time.and_utc().timestamp_millis())
        .ok_or_else(|| Error::InvalidTime {
            time: time.to_owned(),
        })
}
