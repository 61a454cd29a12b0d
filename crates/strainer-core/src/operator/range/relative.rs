//! Relative date tokens: `ct`, `bo<p>`, `eo<p>` with an optional `±n<p>` offset.

use crate::operator::OperatorError;
use chrono::{
    Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday,
};
use regex::Regex;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(ct)|(bo|eo)(\w))(?:([+-]\d+)(\w))?$").expect("relative date token pattern")
});

///
/// Clock
///
/// Source of the current instant for relative-date resolution.
///

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

///
/// SystemClock
/// Local wall-clock time.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

///
/// FixedClock
/// Always reports the same instant; used for reproducible resolution.
///

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

///
/// RangeContext
///
/// Inputs relative dates are resolved against.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RangeContext {
    pub now: NaiveDateTime,
    pub week_start: Weekday,
}

impl RangeContext {
    #[must_use]
    pub const fn new(now: NaiveDateTime, week_start: Weekday) -> Self {
        Self { now, week_start }
    }
}

///
/// Period
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Period {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// Decode a single-character period code. Codes are case-sensitive:
    /// `m` is minute, `M` is month.
    pub fn from_code(code: &str, input: &str) -> Result<Self, OperatorError> {
        match code {
            "s" => Ok(Self::Second),
            "m" => Ok(Self::Minute),
            "h" => Ok(Self::Hour),
            "d" => Ok(Self::Day),
            "w" => Ok(Self::Week),
            "M" => Ok(Self::Month),
            "y" => Ok(Self::Year),
            _ => Err(OperatorError::InvalidPeriod {
                code: code.to_string(),
                input: input.to_string(),
            }),
        }
    }

    /// Start of the period containing `t`.
    #[must_use]
    pub fn truncate(self, t: NaiveDateTime, week_start: Weekday) -> Option<NaiveDateTime> {
        let date = t.date();

        match self {
            Self::Second => t.with_nanosecond(0),
            Self::Minute => date.and_hms_opt(t.hour(), t.minute(), 0),
            Self::Hour => date.and_hms_opt(t.hour(), 0, 0),
            Self::Day => Some(date.and_time(NaiveTime::MIN)),
            Self::Week => {
                let back = (7 + date.weekday().num_days_from_monday()
                    - week_start.num_days_from_monday())
                    % 7;
                let start = date.checked_sub_signed(TimeDelta::try_days(i64::from(back))?)?;
                Some(start.and_time(NaiveTime::MIN))
            }
            Self::Month => {
                let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
                Some(first.and_time(NaiveTime::MIN))
            }
            Self::Year => {
                let first = NaiveDate::from_ymd_opt(date.year(), 1, 1)?;
                Some(first.and_time(NaiveTime::MIN))
            }
        }
    }

    /// Shift `t` by `n` periods; months and years use calendar arithmetic.
    #[must_use]
    pub fn add(self, t: NaiveDateTime, n: i64) -> Option<NaiveDateTime> {
        match self {
            Self::Second => t.checked_add_signed(TimeDelta::try_seconds(n)?),
            Self::Minute => t.checked_add_signed(TimeDelta::try_minutes(n)?),
            Self::Hour => t.checked_add_signed(TimeDelta::try_hours(n)?),
            Self::Day => t.checked_add_signed(TimeDelta::try_days(n)?),
            Self::Week => t.checked_add_signed(TimeDelta::try_weeks(n)?),
            Self::Month => add_months(t, n),
            Self::Year => add_months(t, n.checked_mul(12)?),
        }
    }
}

fn add_months(t: NaiveDateTime, n: i64) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(n.unsigned_abs()).ok()?);

    if n >= 0 {
        t.checked_add_months(months)
    } else {
        t.checked_sub_months(months)
    }
}

///
/// Edge
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Edge {
    Begin,
    End,
}

///
/// RelativeDate
///
/// A parsed relative-date token, e.g. `boM-1d` (one day before the start
/// of the current month) or `ct-30d` (thirty days before now).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelativeDate {
    text: String,
    base: Option<(Edge, Period)>,
    offset: Option<(i64, Period)>,
}

impl RelativeDate {
    /// Parse a token. `Ok(None)` means the text is not a relative date at
    /// all; a recognised token with a bad period code is an error.
    pub fn parse(text: &str) -> Result<Option<Self>, OperatorError> {
        let Some(caps) = TOKEN.captures(text) else {
            return Ok(None);
        };

        let base = match (caps.get(2), caps.get(3)) {
            (Some(edge), Some(code)) => {
                let edge = if edge.as_str() == "bo" { Edge::Begin } else { Edge::End };
                Some((edge, Period::from_code(code.as_str(), text)?))
            }
            _ => None,
        };

        let offset = match (caps.get(4), caps.get(5)) {
            (Some(amount), Some(code)) => {
                let amount = amount
                    .as_str()
                    .parse::<i64>()
                    .map_err(|_| OperatorError::OffsetOutOfRange {
                        input: text.to_string(),
                    })?;
                Some((amount, Period::from_code(code.as_str(), text)?))
            }
            _ => None,
        };

        Ok(Some(Self {
            text: text.to_string(),
            base,
            offset,
        }))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Resolve against `ctx`: truncate to the period start for `bo`/`eo`,
    /// advance one period for `eo`, then apply the offset.
    pub fn resolve(&self, ctx: &RangeContext) -> Result<NaiveDateTime, OperatorError> {
        self.try_resolve(ctx).ok_or_else(|| OperatorError::OffsetOutOfRange {
            input: self.text.clone(),
        })
    }

    fn try_resolve(&self, ctx: &RangeContext) -> Option<NaiveDateTime> {
        let mut t = ctx.now;

        if let Some((edge, period)) = self.base {
            t = period.truncate(t, ctx.week_start)?;
            if edge == Edge::End {
                t = period.add(t, 1)?;
            }
        }

        if let Some((amount, period)) = self.offset {
            t = period.add(t, amount)?;
        }

        Some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    // Wednesday
    fn ctx() -> RangeContext {
        RangeContext::new(at(2024, 3, 13, 15, 42, 7), Weekday::Mon)
    }

    fn resolve(token: &str) -> NaiveDateTime {
        RelativeDate::parse(token)
            .unwrap()
            .unwrap()
            .resolve(&ctx())
            .unwrap()
    }

    #[test]
    fn current_time_is_now() {
        assert_eq!(resolve("ct"), ctx().now);
        assert_eq!(resolve("ct-30d"), at(2024, 2, 12, 15, 42, 7));
        assert_eq!(resolve("ct+2h"), at(2024, 3, 13, 17, 42, 7));
    }

    #[test]
    fn beginning_of_periods() {
        assert_eq!(resolve("bom"), at(2024, 3, 13, 15, 42, 0));
        assert_eq!(resolve("boh"), at(2024, 3, 13, 15, 0, 0));
        assert_eq!(resolve("bod"), at(2024, 3, 13, 0, 0, 0));
        assert_eq!(resolve("bow"), at(2024, 3, 11, 0, 0, 0));
        assert_eq!(resolve("boM"), at(2024, 3, 1, 0, 0, 0));
        assert_eq!(resolve("boy"), at(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn end_of_period_is_start_of_next() {
        assert_eq!(resolve("eod"), at(2024, 3, 14, 0, 0, 0));
        assert_eq!(resolve("eoM"), at(2024, 4, 1, 0, 0, 0));
        assert_eq!(resolve("eoy"), at(2025, 1, 1, 0, 0, 0));
    }

    #[test]
    fn offsets_apply_after_truncation() {
        assert_eq!(resolve("boM-1d"), at(2024, 2, 29, 0, 0, 0));
        assert_eq!(resolve("boy+1M"), at(2024, 2, 1, 0, 0, 0));
    }

    #[test]
    fn month_offsets_are_calendar_aware() {
        let ctx = RangeContext::new(at(2024, 3, 31, 9, 0, 0), Weekday::Mon);
        let token = RelativeDate::parse("ct-1M").unwrap().unwrap();

        assert_eq!(token.resolve(&ctx).unwrap(), at(2024, 2, 29, 9, 0, 0));
    }

    #[test]
    fn week_start_follows_context() {
        let ctx = RangeContext::new(ctx().now, Weekday::Sun);
        let token = RelativeDate::parse("bow").unwrap().unwrap();

        assert_eq!(token.resolve(&ctx).unwrap(), at(2024, 3, 10, 0, 0, 0));
    }

    #[test]
    fn non_tokens_are_not_relative_dates() {
        assert_eq!(RelativeDate::parse("2024-01-01").unwrap(), None);
        assert_eq!(RelativeDate::parse("yesterday").unwrap(), None);
    }

    #[test]
    fn bad_period_code_is_an_error() {
        let err = RelativeDate::parse("boq").unwrap_err();
        assert!(matches!(err, OperatorError::InvalidPeriod { ref code, .. } if code == "q"));

        let err = RelativeDate::parse("ct-1x").unwrap_err();
        assert!(matches!(err, OperatorError::InvalidPeriod { .. }));
    }

    #[test]
    fn overflowing_offsets_are_out_of_range() {
        let token = RelativeDate::parse("ct+99999999999y").unwrap().unwrap();

        assert!(matches!(
            token.resolve(&ctx()),
            Err(OperatorError::OffsetOutOfRange { .. })
        ));
    }
}
