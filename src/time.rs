use crate::{
    error::{FormatError, TypeError},
    format::{quote, unquote, TIME_PATTERN},
    value::{expect_timestamp, FromValue, ToValue, Value},
};
use chrono::{NaiveDate, NaiveTime, Timelike};
use core::{
    fmt::{self, Display},
    str::FromStr,
};

const SECONDS_PER_DAY: i64 = 86_400;

/// A time-of-day with no date and no time zone, like `09:30:00`, to whole-second precision.
///
/// The text form is always `HH:MM:SS` on a 24 hour clock. In JSON it is that text as a string
/// literal, and in a database it is bound as a [`Value::Timestamp`] on 1970-01-01.
///
/// Times can be compared for equality, but are deliberately not ordered.
///
/// # Examples
///
/// ```
/// use civilcal::prelude::*;
///
/// let time = CivilTime::new(9, 30, 0);
/// assert_eq!("09:30:00", time.to_string());
/// assert_eq!(Ok(time), CivilTime::from_json(b"\"09:30:00\""));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CivilTime(NaiveTime);

impl CivilTime {
    /// Midnight, `00:00:00`.
    pub const MIDNIGHT: Self = Self(NaiveTime::MIN);

    pub(crate) const TYPE_NAME: &'static str = "CivilTime";

    /// Returns the time for the given hour, minute and second.
    ///
    /// Nothing is validated: the total is taken modulo one day, so `(25, 0, 0)` is `01:00:00` and
    /// `(0, 0, -1)` is `23:59:59`. Whatever whole days fall out are discarded.
    pub fn new(hour: i32, minute: i32, second: i32) -> Self {
        let total = i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second);
        let secs = total.rem_euclid(SECONDS_PER_DAY) as u32;
        // `secs` is always below 86_400, so the fallback is never taken
        NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).map_or(Self::MIDNIGHT, Self)
    }

    /// Returns the time-of-day of `timestamp`, throwing away its date, time zone and any
    /// fractional second.
    pub fn from_timestamp(timestamp: &impl Timelike) -> Self {
        Self::new(
            timestamp.hour() as i32,
            timestamp.minute() as i32,
            timestamp.second() as i32,
        )
    }

    /// The hour, `0..=23`.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// The minute, `0..=59`.
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// The second, `0..=59`.
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Returns this time as a `chrono` [`NaiveTime`].
    pub fn to_naive(self) -> NaiveTime {
        self.0
    }

    /// Returns the JSON encoding: the `HH:MM:SS` text as a string literal.
    pub fn to_json(&self) -> Vec<u8> {
        quote(self.to_string())
    }

    /// Decodes a JSON string literal holding `HH:MM:SS` text.
    ///
    /// # Errors
    ///
    /// - [`FormatError::NotAString`] if `json` is not a JSON string literal.
    /// - Otherwise, any error from [parsing](CivilTime::from_str) the string's content.
    pub fn from_json(json: &[u8]) -> Result<Self, FormatError> {
        unquote(json)?.parse()
    }
}

impl FromStr for CivilTime {
    type Err = FormatError;

    /// Parses exactly `HH:MM:SS` on a 24 hour clock.
    ///
    /// # Errors
    ///
    /// - [`FormatError::PatternMismatch`] if `s` does not have that shape.
    /// - [`FormatError::OutOfRange`] if a field is too large, e.g. `24:00:00`.
    /// - [`FormatError::LeapSecond`] for `HH:MM:60`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TIME_PATTERN.check_shape(s)?;
        let time = NaiveTime::parse_from_str(s, TIME_PATTERN.strftime)
            .map_err(|err| TIME_PATTERN.out_of_range(s, err))?;

        // chrono folds `:60` into the nanoseconds of second 59
        if time.nanosecond() >= 1_000_000_000 {
            debug!("rejecting leap second `{s}`");
            return Err(FormatError::LeapSecond {
                input: s.to_owned(),
            });
        }
        Ok(Self(time))
    }
}

impl Display for CivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_PATTERN.strftime))
    }
}

impl From<CivilTime> for NaiveTime {
    fn from(time: CivilTime) -> Self {
        time.0
    }
}

impl From<NaiveTime> for CivilTime {
    /// Truncates any fractional second.
    fn from(time: NaiveTime) -> Self {
        Self::from_timestamp(&time)
    }
}

impl ToValue for CivilTime {
    /// A [`Value::Timestamp`] at this time on 1970-01-01. The date is meaningless.
    fn to_value(&self) -> Value {
        NaiveDate::default().and_time(self.0).into()
    }
}

impl FromValue for CivilTime {
    /// Takes the time-of-day of a [`Value::Timestamp`], whatever its date. A null is an error:
    /// use [`NullableCivilTime`](crate::NullableCivilTime) for nullable columns.
    fn from_value(value: &Value) -> Result<Self, TypeError> {
        expect_timestamp(value, Self::TYPE_NAME).map(|ts| Self::from_timestamp(&ts))
    }
}

impl serde::Serialize for CivilTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CivilTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de;

        struct CivilTimeVisitor;

        impl<'de> de::Visitor<'de> for CivilTimeVisitor {
            type Value = CivilTime;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a time string in HH:MM:SS format")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<CivilTime, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(CivilTimeVisitor)
    }
}
