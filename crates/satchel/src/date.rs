//! Date formatting and calendar arithmetic on top of `jiff`.
//!
//! Format templates are tokenized once, longest token first, so a template never re-substitutes
//! text that an earlier token produced (`"MMMM MM"` renders `"March 03"`).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp, Zoned};
use tracing::{debug, trace};

use crate::error::Error;

pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD HH:mm:ss";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The date a formatting or arithmetic operation applies to.
#[derive(Debug, Clone, Default)]
pub enum DateInput {
    /// The current moment in the system time zone.
    #[default]
    Now,

    /// Text to parse, see [`DateInput::resolve_in`] for accepted forms.
    Text(String),

    /// Used as-is, including its time zone.
    Zoned(Zoned),

    /// An instant, shown in the target time zone.
    Timestamp(Timestamp),

    /// A wall-clock date and time, placed in the target time zone.
    Civil(DateTime),

    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
}

impl DateInput {
    /// Resolves to a concrete date in the system time zone.
    pub fn resolve(self) -> Result<Zoned, Error> {
        self.resolve_in(TimeZone::system())
    }

    /// Resolves to a concrete date, placing zone-less inputs in `tz`.
    ///
    /// Text is tried as, in order: an RFC 9557 string with a time zone annotation (which keeps
    /// its own zone), an RFC 3339 timestamp with an offset, a civil date-time
    /// (`2024-03-05T13:07:00` or `2024-03-05 13:07:00`), a civil date (`2024-03-05`, taken at
    /// midnight), and an RFC 2822 date. Anything else is [`Error::InvalidDate`].
    pub fn resolve_in(self, tz: TimeZone) -> Result<Zoned, Error> {
        match self {
            DateInput::Now => Ok(Zoned::now().with_time_zone(tz)),
            DateInput::Text(text) => parse_text(&text, tz),
            DateInput::Zoned(zoned) => Ok(zoned),
            DateInput::Timestamp(ts) => Ok(ts.to_zoned(tz)),
            DateInput::Civil(dt) => dt
                .to_zoned(tz)
                .map_err(|e| invalid_date(&dt.to_string(), e)),
            DateInput::EpochMillis(millis) => Timestamp::from_millisecond(millis)
                .map(|ts| ts.to_zoned(tz))
                .map_err(|e| invalid_date(&millis.to_string(), e)),
        }
    }
}

fn parse_text(text: &str, tz: TimeZone) -> Result<Zoned, Error> {
    let text = text.trim();

    if let Ok(zoned) = text.parse::<Zoned>() {
        return Ok(zoned);
    }
    if let Ok(ts) = text.parse::<Timestamp>() {
        return Ok(ts.to_zoned(tz));
    }
    if let Ok(dt) = text.parse::<DateTime>() {
        return dt.to_zoned(tz).map_err(|e| invalid_date(text, e));
    }
    if let Ok(date) = text.parse::<Date>() {
        return date.to_zoned(tz).map_err(|e| invalid_date(text, e));
    }

    match jiff::fmt::rfc2822::parse(text) {
        Ok(zoned) => Ok(zoned.timestamp().to_zoned(tz)),
        Err(e) => Err(invalid_date(text, e)),
    }
}

fn invalid_date(text: &str, cause: jiff::Error) -> Error {
    debug!("unable to resolve date '{}': {}", text, cause);
    Error::InvalidDate(text.to_string())
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl From<Zoned> for DateInput {
    fn from(zoned: Zoned) -> Self {
        DateInput::Zoned(zoned)
    }
}

impl From<&Zoned> for DateInput {
    fn from(zoned: &Zoned) -> Self {
        DateInput::Zoned(zoned.clone())
    }
}

impl From<Timestamp> for DateInput {
    fn from(ts: Timestamp) -> Self {
        DateInput::Timestamp(ts)
    }
}

impl From<DateTime> for DateInput {
    fn from(dt: DateTime) -> Self {
        DateInput::Civil(dt)
    }
}

impl From<Date> for DateInput {
    fn from(date: Date) -> Self {
        DateInput::Civil(date.to_datetime(Time::midnight()))
    }
}

impl<T: Into<DateInput>> From<Option<T>> for DateInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(DateInput::Now, Into::into)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    FullYear,
    ShortYear,
    MonthName,
    MonthAbbrev,
    PaddedMonth,
    Month,
    PaddedDay,
    Hour24,
    Hour12,
    Minute,
    Second,
    Meridiem,
}

// Longest first: a position is matched against these in order and the first hit wins.
const TOKENS: [(&str, Token); 12] = [
    ("YYYY", Token::FullYear),
    ("MMMM", Token::MonthName),
    ("MMM", Token::MonthAbbrev),
    ("YY", Token::ShortYear),
    ("MM", Token::PaddedMonth),
    ("DD", Token::PaddedDay),
    ("HH", Token::Hour24),
    ("hh", Token::Hour12),
    ("mm", Token::Minute),
    ("ss", Token::Second),
    ("M", Token::Month),
    ("A", Token::Meridiem),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Token(Token),
    Literal(String),
}

/// A tokenized format template.
///
/// | token  | output                          |
/// |--------|---------------------------------|
/// | `YYYY` | year, at least 4 digits         |
/// | `YY`   | last two digits of the year     |
/// | `MMMM` | month name (`March`)            |
/// | `MMM`  | month abbreviation (`Mar`)      |
/// | `MM`   | month, 2 digits                 |
/// | `M`    | month, no leading zero          |
/// | `DD`   | day of month, 2 digits          |
/// | `HH`   | hour 00-23                      |
/// | `hh`   | hour 01-12                      |
/// | `mm`   | minute, 2 digits                |
/// | `ss`   | second, 2 digits                |
/// | `A`    | `AM` or `PM`                    |
///
/// Everything else is copied through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pieces: Vec<Piece>,
}

impl DateFormat {
    pub fn parse(template: &str) -> DateFormat {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        'scan: while !rest.is_empty() {
            for (pattern, token) in TOKENS {
                if let Some(tail) = rest.strip_prefix(pattern) {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Token(token));
                    rest = tail;
                    continue 'scan;
                }
            }

            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                literal.push(ch);
            }
            rest = chars.as_str();
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        trace!("parsed date template '{}' into {} pieces", template, pieces.len());
        DateFormat { pieces }
    }

    pub fn render(&self, zoned: &Zoned) -> String {
        let mut out = String::new();

        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Token(token) => render_token(&mut out, *token, zoned),
            }
        }

        out
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat::parse(DEFAULT_DATE_FORMAT)
    }
}

fn render_token(out: &mut String, token: Token, zoned: &Zoned) {
    use std::fmt::Write as _;

    let month_name = MONTH_NAMES[(zoned.month() - 1) as usize];
    let hour = zoned.hour();

    // Writing to a String cannot fail
    let _ = match token {
        Token::FullYear => write!(out, "{:04}", zoned.year()),
        Token::ShortYear => write!(out, "{:02}", i32::from(zoned.year()).rem_euclid(100)),
        Token::MonthName => write!(out, "{month_name}"),
        Token::MonthAbbrev => write!(out, "{}", &month_name[..3]),
        Token::PaddedMonth => write!(out, "{:02}", zoned.month()),
        Token::Month => write!(out, "{}", zoned.month()),
        Token::PaddedDay => write!(out, "{:02}", zoned.day()),
        Token::Hour24 => write!(out, "{hour:02}"),
        Token::Hour12 => write!(out, "{:02}", if hour % 12 == 0 { 12 } else { hour % 12 }),
        Token::Minute => write!(out, "{:02}", zoned.minute()),
        Token::Second => write!(out, "{:02}", zoned.second()),
        Token::Meridiem => write!(out, "{}", if hour < 12 { "AM" } else { "PM" }),
    };
}

/// Formats `input` (the current moment for [`DateInput::Now`]) with the `format` template.
/// See [`DateFormat`] for the token vocabulary.
pub fn date(format: &str, input: impl Into<DateInput>) -> Result<String, Error> {
    let zoned = input.into().resolve()?;
    Ok(DateFormat::parse(format).render(&zoned))
}

/// Calendar units understood by [`add_date`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateUnit {
    Years,
    Months,
    #[default]
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl FromStr for DateUnit {
    type Err = Error;

    fn from_str(unit: &str) -> Result<Self, Self::Err> {
        match unit.to_ascii_lowercase().as_str() {
            "years" => Ok(DateUnit::Years),
            "months" => Ok(DateUnit::Months),
            "days" => Ok(DateUnit::Days),
            "hours" => Ok(DateUnit::Hours),
            "minutes" => Ok(DateUnit::Minutes),
            "seconds" => Ok(DateUnit::Seconds),
            _ => Err(Error::UnsupportedUnit(unit.to_string())),
        }
    }
}

impl Display for DateUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DateUnit::Years => "years",
            DateUnit::Months => "months",
            DateUnit::Days => "days",
            DateUnit::Hours => "hours",
            DateUnit::Minutes => "minutes",
            DateUnit::Seconds => "seconds",
        };
        f.write_str(name)
    }
}

/// Adds `value` (possibly negative) `unit`s to `input` and returns the new date. `unit` is
/// matched case-insensitively against the [`DateUnit`] names.
///
/// The date is resolved first, so an unparseable date is reported as [`Error::InvalidDate`]
/// even when the unit is also bad.
pub fn add_date(input: impl Into<DateInput>, value: i64, unit: &str) -> Result<Zoned, Error> {
    let zoned = input.into().resolve()?;
    let unit = unit.parse::<DateUnit>()?;
    shift(&zoned, value, unit)
}

/// As [`add_date`] with an already parsed unit.
pub fn add_date_in(input: impl Into<DateInput>, value: i64, unit: DateUnit) -> Result<Zoned, Error> {
    let zoned = input.into().resolve()?;
    shift(&zoned, value, unit)
}

/// Years and months roll over rather than clamp: the day of month is kept and any excess
/// spills into the next month (Jan 31 + 1 month = Mar 2 or Mar 3). Days keep the wall-clock
/// time; hours, minutes and seconds are exact elapsed time.
fn shift(zoned: &Zoned, value: i64, unit: DateUnit) -> Result<Zoned, Error> {
    let shifted = match unit {
        DateUnit::Years => add_months(zoned, value.saturating_mul(12))?,
        DateUnit::Months => add_months(zoned, value)?,
        DateUnit::Days => zoned.checked_add(Span::new().try_days(value)?)?,
        DateUnit::Hours => zoned.checked_add(Span::new().try_hours(value)?)?,
        DateUnit::Minutes => zoned.checked_add(Span::new().try_minutes(value)?)?,
        DateUnit::Seconds => zoned.checked_add(Span::new().try_seconds(value)?)?,
    };

    Ok(shifted)
}

fn add_months(zoned: &Zoned, months: i64) -> Result<Zoned, Error> {
    let dt = zoned.datetime();
    let total = (i64::from(dt.year()) * 12 + i64::from(dt.month() - 1)).saturating_add(months);

    // Years outside i16 are left for Date::new to reject
    let year = i16::try_from(total.div_euclid(12)).unwrap_or(i16::MAX);
    let month = (total.rem_euclid(12) + 1) as i8;

    let first = Date::new(year, month, 1)?;
    let date = first.checked_add(Span::new().days(i64::from(dt.day() - 1)))?;

    Ok(date.to_datetime(dt.time()).to_zoned(zoned.time_zone().clone())?)
}
