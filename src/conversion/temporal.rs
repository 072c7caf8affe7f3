// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed text layouts for Athena temporal values.
//!
//! Athena renders `timestamp` as `YYYY-MM-DD HH:MM:SS.fff`, `date` as
//! `YYYY-MM-DD`, and `timestamp with time zone` as a timestamp followed by
//! a space and a zone abbreviation. Fractional seconds are optional when
//! parsing and may carry up to nanosecond precision.

use crate::error::ParseFailure;
use crate::types::value::ZonedTimestamp;
use chrono::{FixedOffset, NaiveDate, NaiveDateTime};

/// Parse layout for `timestamp` values; `%.f` also accepts a missing fraction.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Output layout for `timestamp` values, millisecond precision.
pub const TIMESTAMP_OUTPUT_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Layout for `date` values.
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

const SECONDS_PER_HOUR: i32 = 3600;

/// Parses `YYYY-MM-DD HH:MM:SS[.fraction]`.
///
/// Every field is zero-padded to its fixed width and the fraction, when
/// present, has 1 to 9 digits. chrono is more lenient than that, so the
/// shape is checked first.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseFailure> {
    let (date, time) = value
        .split_once(' ')
        .ok_or(ParseFailure::Layout(TIMESTAMP_LAYOUT))?;
    if !is_date_shape(date.as_bytes()) || !is_time_shape(time.as_bytes()) {
        return Err(ParseFailure::Layout(TIMESTAMP_LAYOUT));
    }
    Ok(NaiveDateTime::parse_from_str(value, TIMESTAMP_LAYOUT)?)
}

/// Parses `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseFailure> {
    if !is_date_shape(value.as_bytes()) {
        return Err(ParseFailure::Layout(DATE_LAYOUT));
    }
    Ok(NaiveDate::parse_from_str(value, DATE_LAYOUT)?)
}

fn is_digits(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit)
}

fn is_date_shape(b: &[u8]) -> bool {
    b.len() == 10
        && is_digits(&b[0..4])
        && b[4] == b'-'
        && is_digits(&b[5..7])
        && b[7] == b'-'
        && is_digits(&b[8..10])
}

/// `HH:MM:SS` with an optional `.` and 1-9 fraction digits. Leap second 60
/// is not a valid Athena time.
fn is_time_shape(b: &[u8]) -> bool {
    if b.len() < 8
        || !is_digits(&b[0..2])
        || b[2] != b':'
        || !is_digits(&b[3..5])
        || b[5] != b':'
        || !is_digits(&b[6..8])
        || &b[6..8] >= b"60".as_slice()
    {
        return false;
    }
    match &b[8..] {
        [] => true,
        [b'.', fraction @ ..] => fraction.len() <= 9 && is_digits(fraction),
        _ => false,
    }
}

/// Parses `YYYY-MM-DD HH:MM:SS[.fff] ZONE`.
///
/// `UTC` and `GMT` resolve to offset zero and `GMT+H`/`GMT-H` to a whole-hour
/// offset. Any other well-formed abbreviation (`PST`, `CEST`, ...) is kept
/// by name and resolved to offset zero, since abbreviations do not identify
/// an offset unambiguously.
pub fn parse_timestamp_with_zone(value: &str) -> Result<ZonedTimestamp, ParseFailure> {
    let (local, zone) = value
        .rsplit_once(' ')
        .ok_or_else(|| ParseFailure::TimeZone(String::new()))?;
    let local = parse_timestamp(local)?;
    let offset = zone_offset(zone).ok_or_else(|| ParseFailure::TimeZone(zone.to_string()))?;
    let instant = local
        .and_local_timezone(offset)
        .single()
        .ok_or(ParseFailure::OutOfRange)?;
    Ok(ZonedTimestamp::new(instant, zone))
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_OUTPUT_LAYOUT).to_string()
}

pub fn format_date(value: &NaiveDate) -> String {
    value.format(DATE_LAYOUT).to_string()
}

pub fn format_timestamp_with_zone(value: &ZonedTimestamp) -> String {
    format!("{} {}", format_timestamp(&value.local()), value.zone)
}

fn zone_offset(zone: &str) -> Option<FixedOffset> {
    match zone {
        "UTC" | "GMT" => return FixedOffset::east_opt(0),
        _ => {}
    }
    if let Some(hours) = zone.strip_prefix("GMT") {
        return gmt_hours(hours).and_then(|h| FixedOffset::east_opt(h * SECONDS_PER_HOUR));
    }
    if is_zone_abbreviation(zone) {
        return FixedOffset::east_opt(0);
    }
    None
}

/// Parses the `+H`/`-HH` suffix of `GMT+H`.
fn gmt_hours(suffix: &str) -> Option<i32> {
    let digits = suffix.strip_prefix(['+', '-'])?;
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits.parse().ok()?;
    if hours > 23 {
        return None;
    }
    Some(if suffix.starts_with('-') { -hours } else { hours })
}

fn is_zone_abbreviation(zone: &str) -> bool {
    if zone == "ChST" || zone == "MeST" {
        return true;
    }
    if !zone.bytes().all(|b| b.is_ascii_uppercase()) {
        return false;
    }
    match zone.len() {
        3 => true,
        4 => zone.ends_with('T') || zone == "WITA",
        5 => zone.ends_with('T'),
        _ => false,
    }
}
