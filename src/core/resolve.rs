use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike,
};
use chrono_tz::Tz;

use crate::types::command::{AbsoluteFields, RelativeFields};

/// Completes the absolute grammar's fields against `reference` and applies
/// the past-time rollover.
///
/// Absent date and time fields default to the corresponding field of the
/// reference time, with one asymmetry: an absent second defaults to zero,
/// never to the reference's seconds. If the completed instant lies before
/// the reference, the command meant the next occurrence:
/// - no explicit day given (time-of-day command) → advance one calendar day;
/// - explicit day given → advance one calendar year, as twelve calendar
///   months so a Feb 29 deadline clamps to Feb 28 instead of failing.
///
/// Returns `None` when the fields do not form a real calendar date or time
/// (month 13, hour 25, ...); the caller treats that as an unparsable command
/// and falls back to the default rule.
pub fn resolve_absolute(fields: &AbsoluteFields, reference: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let year: i32 = match fields.year {
        Some(y) => i32::try_from(y).ok()?,
        None => reference.year(),
    };
    let date: NaiveDate = NaiveDate::from_ymd_opt(
        year,
        fields.month.unwrap_or(reference.month()),
        fields.day.unwrap_or(reference.day()),
    )?;
    let time: NaiveTime = NaiveTime::from_hms_opt(
        fields.hour.unwrap_or(reference.hour()),
        fields.minute.unwrap_or(reference.minute()),
        fields.second.unwrap_or(0),
    )?;

    let mut delete_at: DateTime<Tz> = from_local(reference.timezone(), date.and_time(time))?;
    if delete_at < reference {
        delete_at = if fields.day.is_none() {
            delete_at.checked_add_days(Days::new(1))?
        } else {
            delete_at.checked_add_months(Months::new(12))?
        };
    }
    Some(delete_at)
}

/// `reference + duration` for the relative grammar.
///
/// Years and months are calendar-aware (`Months` addition, day-of-month
/// clamped on short target months), weeks contribute seven calendar days
/// each, days are calendar days too (local clock time preserved), and the
/// hour/minute/second remainder is plain duration arithmetic.
pub fn resolve_relative(fields: &RelativeFields, reference: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let months: u32 = fields
        .years
        .unwrap_or(0)
        .checked_mul(12)?
        .checked_add(fields.months.unwrap_or(0))?;
    let days: u64 =
        u64::from(fields.weeks.unwrap_or(0)) * 7 + u64::from(fields.days.unwrap_or(0));
    let clock: Duration = Duration::hours(i64::from(fields.hours.unwrap_or(0)))
        + Duration::minutes(i64::from(fields.minutes.unwrap_or(0)))
        + Duration::seconds(i64::from(fields.seconds.unwrap_or(0)));

    reference
        .checked_add_months(Months::new(months))?
        .checked_add_days(Days::new(days))?
        .checked_add_signed(clock)
}

/// One calendar day past the reference: the deadline used when no command
/// grammar matched.
pub fn fallback(reference: DateTime<Tz>) -> DateTime<Tz> {
    reference
        .checked_add_days(Days::new(1))
        .unwrap_or_else(|| reference + Duration::days(1))
}

// Wall-clock resolution policy: an ambiguous local time (DST fold) takes the
// earlier instant, a nonexistent one (DST gap) is pushed forward one hour.
fn from_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => tz.from_local_datetime(&(naive + Duration::hours(1))).earliest(),
    }
}
