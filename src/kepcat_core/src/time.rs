//! Time parsing and elapsed time calculations.
//!
//! All timestamps are UTC [`DateTime`]s. Catalogue epochs are calendar dates in
//! `YYYY-MM-DD` form and are placed at midnight UTC of that day.
// BSD 3-Clause License
//
// Copyright (c) 2026, Dar Dahlen
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use chrono::{DateTime, NaiveDate, Utc};

use crate::prelude::{Error, KepcatResult};

/// Parse a catalogue epoch in `YYYY-MM-DD` form into a UTC timestamp at midnight.
///
/// The month field is 1-indexed in the text. Surrounding whitespace on each field
/// is ignored.
///
/// ```
///     use chrono::Datelike;
///     use kepcat_core::time::parse_epoch;
///     let epoch = parse_epoch("2021-03-15").unwrap();
///     assert_eq!(epoch.month0(), 2);
///     assert_eq!(epoch.day(), 15);
/// ```
///
/// # Errors
/// [`Error::ParseError`] if the text does not have three hyphen separated integer
/// fields, or if they do not form a valid calendar date.
pub fn parse_epoch(s: &str) -> KepcatResult<DateTime<Utc>> {
    let mut fields = s.trim().split('-');
    let (Some(year), Some(month), Some(day), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(Error::ParseError(format!(
            "Epoch '{s}' is not of the form YYYY-MM-DD."
        )));
    };

    let year: i32 = year.trim().parse()?;
    let month: u32 = month.trim().parse()?;
    let day: u32 = day.trim().parse()?;

    let month0 = month
        .checked_sub(1)
        .ok_or_else(|| Error::ParseError(format!("Epoch '{s}' has month 0.")))?;

    from_year_month0_day(year, month0, day)
        .ok_or_else(|| Error::ParseError(format!("Epoch '{s}' is not a valid calendar date.")))
}

/// Construct midnight UTC of the given date, with a zero-based month.
#[must_use]
pub fn from_year_month0_day(year: i32, month0: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Read time from the standard ISO format for time.
///
/// # Errors
/// An error is returned if ISO string parsing fails.
pub fn from_iso(s: &str) -> KepcatResult<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.to_utc())
}

/// Signed number of seconds from `start` to `end`, at millisecond resolution.
///
/// Negative when `end` is before `start`.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "Millisecond counts fit in f64")]
pub fn elapsed_seconds(start: &DateTime<Utc>, end: &DateTime<Utc>) -> f64 {
    (*end - *start).num_milliseconds() as f64 / 1000.0
}
