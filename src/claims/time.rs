//! Time values accepted by the `exp`, `nbf` and `iat` claims.
//!
//! A time is either an RFC 3339 date string, a number of milliseconds since
//! the unix epoch, or a relative expression such as `"1 hour"` that is added
//! to the current time.

use crate::errors::PasetoError;

use chrono::prelude::*;
use chrono::Duration;
use serde_json::Value as JsonValue;

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = SECOND_MS * 60.0;
const HOUR_MS: f64 = MINUTE_MS * 60.0;
const DAY_MS: f64 = HOUR_MS * 24.0;
const WEEK_MS: f64 = DAY_MS * 7.0;
const MONTH_MS: f64 = DAY_MS * 30.0;
const YEAR_MS: f64 = DAY_MS * 365.0;

// Far beyond any date chrono can represent, keeps the f64 -> i64 cast exact.
const MAX_OFFSET_MS: f64 = 1e16;

/// Parses an RFC 3339 date string, returning `None` for anything else.
#[must_use]
pub fn parse_iso_date(date: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(date).ok().map(|parsed| parsed.with_timezone(&Utc))
}

#[must_use]
pub fn is_iso_date(date: &str) -> bool {
  parse_iso_date(date).is_some()
}

/// Formats a time the way every claim is stored: UTC with millisecond precision.
#[must_use]
pub fn to_iso_string(time: &DateTime<Utc>) -> String {
  time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn unit_millis(unit: &str) -> Option<f64> {
  let millis = match unit {
    "s" | "sec" | "secs" | "second" | "seconds" => SECOND_MS,
    "m" | "min" | "mins" | "minute" | "minutes" => MINUTE_MS,
    "h" | "hr" | "hrs" | "hour" | "hours" => HOUR_MS,
    "d" | "day" | "days" => DAY_MS,
    "w" | "wk" | "wks" | "week" | "weeks" => WEEK_MS,
    "mo" | "mos" | "month" | "months" => MONTH_MS,
    "y" | "yr" | "yrs" | "year" | "years" => YEAR_MS,
    _ => return None,
  };
  Some(millis)
}

fn offset(now: &DateTime<Utc>, millis: f64, original: &str) -> Result<DateTime<Utc>, PasetoError> {
  if !millis.is_finite() || millis.abs() > MAX_OFFSET_MS {
    return Err(PasetoError::InvalidTime(format!("{} is out of range", original)));
  }
  #[allow(clippy::cast_possible_truncation)]
  let delta = Duration::milliseconds(millis.round() as i64);
  now
    .checked_add_signed(delta)
    .ok_or_else(|| PasetoError::InvalidTime(format!("{} is out of range", original)))
}

/// Resolves a relative expression such as `"2 days"`, `"1h"` or `"30mins"`
/// against `now`.
///
/// The amount is an unsigned integer or decimal, optionally followed by a
/// single space, then a unit. Units are case insensitive. Months are 30 days
/// and years are 365 days.
pub fn parse_time_string(time: &str, now: &DateTime<Utc>) -> Result<DateTime<Utc>, PasetoError> {
  let invalid = || PasetoError::InvalidTime(format!("Invalid time string: {}", time));

  let split = time
    .find(|c: char| !(c.is_ascii_digit() || c == '.'))
    .ok_or_else(invalid)?;
  let (amount, rest) = time.split_at(split);
  if amount.is_empty() || amount.starts_with('.') || amount.ends_with('.') || amount.matches('.').count() > 1 {
    return Err(invalid());
  }
  let unit = rest.strip_prefix(' ').unwrap_or(rest).to_ascii_lowercase();

  let unit_ms = unit_millis(&unit).ok_or_else(invalid)?;
  let amount: f64 = amount.parse().map_err(|_| invalid())?;

  offset(now, amount * unit_ms, time)
}

/// Resolves any time a claim may hold into an absolute UTC time.
pub fn parse_time(value: &JsonValue, now: &DateTime<Utc>) -> Result<DateTime<Utc>, PasetoError> {
  match value {
    JsonValue::String(time) => match parse_iso_date(time) {
      Some(parsed) => Ok(parsed),
      None => parse_time_string(time, now),
    },
    JsonValue::Number(number) => {
      let millis = number
        .as_f64()
        .filter(|millis| millis.is_finite() && millis.abs() <= MAX_OFFSET_MS)
        .ok_or_else(|| PasetoError::InvalidTime(format!("{} is out of range", number)))?;
      #[allow(clippy::cast_possible_truncation)]
      Utc
        .timestamp_millis_opt(millis.round() as i64)
        .single()
        .ok_or_else(|| PasetoError::InvalidTime(format!("{} is out of range", number)))
    }
    _ => Err(PasetoError::InvalidTime(String::from(
      "date must be a string, number or date",
    ))),
  }
}
