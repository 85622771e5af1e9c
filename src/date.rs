use crate::{
    error::{FormatError, TypeError},
    format::{quote, unquote, DATE_PATTERN},
    value::{expect_timestamp, FromValue, ToValue, Value},
};
use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};
use core::{
    fmt::{self, Display},
    ops::Deref,
    str::FromStr,
};

/// A date with no time-of-day and no time zone, like `2023-01-05`.
///
/// The text form is always `YYYY-MM-DD`. In JSON it is that text as a string literal, and in a
/// database it is bound as a [`Value::Timestamp`] at midnight.
///
/// # Examples
///
/// ```
/// use civilcal::prelude::*;
///
/// let date = CivilDate::new(2023, 1, 5);
/// assert_eq!("2023-01-05", date.to_string());
/// assert_eq!(b"\"2023-01-05\"".to_vec(), date.to_json());
/// assert!(date.before(&date.add_date(0, 0, 1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate(NaiveDate);

impl CivilDate {
    /// The earliest representable date. Construction saturates here.
    pub const MIN: Self = Self(NaiveDate::MIN);

    /// The latest representable date. Construction saturates here.
    pub const MAX: Self = Self(NaiveDate::MAX);

    pub(crate) const TYPE_NAME: &'static str = "CivilDate";

    /// Returns the date for the given year, month and day.
    ///
    /// Nothing is validated. A month outside `1..=12` rolls over into the neighbouring years
    /// first, then a day outside the month rolls over into the neighbouring months. So
    /// `(2016, 2, 30)` is `2016-03-01` and `(2016, 13, 0)` is `2016-12-31`. Dates beyond the
    /// representable range saturate at [`CivilDate::MIN`] or [`CivilDate::MAX`].
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        let months = i64::from(year) * 12 + i64::from(month) - 1;
        let first_of_month = i32::try_from(months.div_euclid(12))
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, months.rem_euclid(12) as u32 + 1, 1));

        let saturated = |negative: bool| {
            warn!("{year:04}-{month:02}-{day:02} is out of range, saturating");
            if negative {
                Self::MIN
            } else {
                Self::MAX
            }
        };

        match first_of_month {
            Some(first) => first
                .checked_add_signed(TimeDelta::days(i64::from(day) - 1))
                .map_or_else(|| saturated(day < 1), Self),
            None => saturated(months < 0),
        }
    }

    /// Returns the calendar date of `timestamp`, throwing away its time-of-day and time zone.
    ///
    /// Works with anything `chrono` considers a date: [`NaiveDate`], [`chrono::NaiveDateTime`],
    /// [`chrono::DateTime`] in any zone (the date is the one local to that zone), and so on.
    pub fn from_timestamp(timestamp: &impl Datelike) -> Self {
        Self::new(
            timestamp.year(),
            timestamp.month() as i32,
            timestamp.day() as i32,
        )
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month, `1..=12`.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The day of the month, `1..=31`.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns true if this date is strictly earlier than `other`.
    pub fn before(&self, other: &Self) -> bool {
        self < other
    }

    /// Returns true if this date is strictly later than `other`.
    pub fn after(&self, other: &Self) -> bool {
        self > other
    }

    /// Adds the given number of years, months and days, returning a new date.
    ///
    /// Each component is added independently and the result renormalized the same way as
    /// [`CivilDate::new`]. Note this means adding a month to January 31st gives a day in March.
    ///
    /// ```
    /// use civilcal::CivilDate;
    ///
    /// let leap = CivilDate::new(2016, 2, 28);
    /// assert_eq!(CivilDate::new(2016, 3, 1), leap.add_date(0, 0, 2));
    /// assert_eq!(CivilDate::new(2016, 3, 2), CivilDate::new(2016, 1, 31).add_date(0, 1, 0));
    /// ```
    pub fn add_date(&self, years: i32, months: i32, days: i32) -> Self {
        Self::new(
            self.year().saturating_add(years),
            (self.month() as i32).saturating_add(months),
            (self.day() as i32).saturating_add(days),
        )
    }

    /// Returns this date as a `chrono` [`NaiveDate`].
    pub fn to_naive(self) -> NaiveDate {
        self.0
    }

    /// Returns the JSON encoding: the `YYYY-MM-DD` text as a string literal.
    ///
    /// Years outside `0000..=9999` are written with a sign and more digits, as [`Display`] does,
    /// and so do not decode again with [`CivilDate::from_json`].
    pub fn to_json(&self) -> Vec<u8> {
        quote(self.to_string())
    }

    /// Decodes a JSON string literal holding `YYYY-MM-DD` text.
    ///
    /// # Errors
    ///
    /// - [`FormatError::NotAString`] if `json` is not a JSON string literal.
    /// - Otherwise, any error from [parsing](CivilDate::from_str) the string's content.
    pub fn from_json(json: &[u8]) -> Result<Self, FormatError> {
        unquote(json)?.parse()
    }
}

impl FromStr for CivilDate {
    type Err = FormatError;

    /// Parses exactly `YYYY-MM-DD`: a 4-digit year, then 2-digit month and day, separated by
    /// hyphens. Nothing may come before or after.
    ///
    /// # Errors
    ///
    /// - [`FormatError::PatternMismatch`] if `s` does not have that shape.
    /// - [`FormatError::OutOfRange`] if it does, but is no real date (e.g. `2023-02-29`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DATE_PATTERN.check_shape(s)?;
        NaiveDate::parse_from_str(s, DATE_PATTERN.strftime)
            .map(Self)
            .map_err(|err| DATE_PATTERN.out_of_range(s, err))
    }
}

/// Writes `YYYY-MM-DD`. Years outside `0000..=9999` get a sign and as many digits as they need,
/// e.g. `+262142-12-31` for [`CivilDate::MAX`]; that text does not parse back.
impl Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_PATTERN.strftime))
    }
}

impl Deref for CivilDate {
    type Target = NaiveDate;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<NaiveDate> for CivilDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CivilDate> for NaiveDate {
    fn from(date: CivilDate) -> Self {
        date.0
    }
}

impl ToValue for CivilDate {
    /// A [`Value::Timestamp`] at midnight of this date.
    fn to_value(&self) -> Value {
        self.0.and_time(NaiveTime::MIN).into()
    }
}

impl FromValue for CivilDate {
    /// Takes the date of a [`Value::Timestamp`]. A null is an error: use
    /// [`NullableCivilDate`](crate::NullableCivilDate) for nullable columns.
    fn from_value(value: &Value) -> Result<Self, TypeError> {
        expect_timestamp(value, Self::TYPE_NAME).map(|ts| Self::from_timestamp(&ts))
    }
}

impl serde::Serialize for CivilDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CivilDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de;

        struct CivilDateVisitor;

        impl<'de> de::Visitor<'de> for CivilDateVisitor {
            type Value = CivilDate;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a date string in YYYY-MM-DD format")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<CivilDate, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(CivilDateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDateTime, TimeZone};
    use itertools::iproduct;
    use rstest::*;

    const DAYS_IN_MONTH: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    /// The first and last (non-leap) day of every month of 1999 through 2001.
    #[fixture]
    fn valid_ymds() -> impl Iterator<Item = (i32, i32, i32)> {
        iproduct!(1999..=2001, 1..=12, [true, false]).map(|(y, m, first)| {
            let d = if first { 1 } else { DAYS_IN_MONTH[m as usize - 1] };
            (y, m, d)
        })
    }

    fn timestamp(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    #[rstest]
    fn test_text_and_json_round_trip(valid_ymds: impl Iterator<Item = (i32, i32, i32)>) {
        for (y, m, d) in valid_ymds {
            let date = CivilDate::new(y, m, d);
            let text = date.to_string();
            assert_eq!(format!("{y:04}-{m:02}-{d:02}"), text);
            assert_eq!(Ok(date), text.parse::<CivilDate>());

            let json = date.to_json();
            assert_eq!(12, json.len(), "{}", String::from_utf8_lossy(&json));
            assert_eq!(Ok(date), CivilDate::from_json(&json));
        }
    }

    #[rstest]
    fn test_value_round_trip(valid_ymds: impl Iterator<Item = (i32, i32, i32)>) {
        for (y, m, d) in valid_ymds {
            let date = CivilDate::new(y, m, d);
            assert_eq!(Ok(date), CivilDate::from_value(&date.to_value()));
        }
    }

    #[test]
    fn test_example_literal() {
        let date = CivilDate::new(2023, 1, 5);
        assert_eq!("2023-01-05", date.to_string());
        assert_eq!(b"\"2023-01-05\"".to_vec(), date.to_json());
        assert_eq!((2023, 1, 5), (date.year(), date.month(), date.day()));
    }

    #[test]
    fn test_to_value_is_midnight() {
        let date = CivilDate::new(2016, 10, 4);
        assert_eq!(Value::Timestamp(timestamp(2016, 10, 4, 0)), date.to_value());
    }

    #[test]
    fn test_from_value_drops_time() {
        let value = Value::Timestamp(timestamp(2016, 10, 4, 21));
        assert_eq!(Ok(CivilDate::new(2016, 10, 4)), CivilDate::from_value(&value));
    }

    #[test]
    fn test_from_value_null() {
        assert_eq!(
            Err(TypeError::UnexpectedNull {
                type_name: "CivilDate"
            }),
            CivilDate::from_value(&Value::Null)
        );
    }

    #[test]
    fn test_from_value_wrong_type() {
        let value = Value::Text("2016-10-04".to_string());
        assert!(matches!(
            CivilDate::from_value(&value),
            Err(TypeError::Unconvertible { found: "Text", .. })
        ));
    }

    #[test]
    fn test_time_ignored() {
        let d1 = CivilDate::from_timestamp(&timestamp(2016, 10, 4, 1));
        let d2 = CivilDate::from_timestamp(&timestamp(2016, 10, 4, 21));
        assert!(!d2.after(&d1));
        assert!(!d2.before(&d1));
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_from_zoned_timestamp_uses_local_date() {
        let offset = FixedOffset::east_opt(10 * 3600).unwrap();
        // 2016-10-04T20:00Z is already the 5th at +10:00
        let zoned = offset.from_utc_datetime(&timestamp(2016, 10, 4, 20));
        assert_eq!(CivilDate::new(2016, 10, 5), CivilDate::from_timestamp(&zoned));
    }

    #[test]
    fn test_comparisons() {
        let d1 = CivilDate::new(2016, 10, 15);
        let d2 = CivilDate::new(2016, 10, 16);
        assert!(d1.before(&d2));
        assert!(!d1.after(&d2));
        assert_ne!(d1, d2);
        assert!(d2.after(&d1));
        assert!(!d1.after(&d1));
        assert!(!d1.before(&d1));
        assert!(d1 < d2);
    }

    #[rstest]
    #[case((2016, 2, 28), (0, 0, 2), (2016, 3, 1))]
    #[case((2015, 2, 28), (0, 0, 1), (2015, 3, 1))]
    #[case((2016, 1, 31), (0, 1, 0), (2016, 3, 2))]
    #[case((2016, 2, 29), (1, 0, 0), (2017, 3, 1))]
    #[case((2016, 12, 31), (0, 0, 1), (2017, 1, 1))]
    #[case((2016, 3, 1), (0, 0, -1), (2016, 2, 29))]
    #[case((2016, 1, 15), (0, -1, 0), (2015, 12, 15))]
    #[case((2016, 10, 15), (-16, 2, 10), (2000, 12, 25))]
    fn test_add_date(
        #[case] start: (i32, i32, i32),
        #[case] add: (i32, i32, i32),
        #[case] expected: (i32, i32, i32),
    ) {
        let date = CivilDate::new(start.0, start.1, start.2);
        let expected = CivilDate::new(expected.0, expected.1, expected.2);
        assert_eq!(expected, date.add_date(add.0, add.1, add.2));
    }

    #[rstest]
    #[case((2016, 1, 32), "2016-02-01")]
    #[case((2016, 2, 30), "2016-03-01")]
    #[case((2016, 13, 1), "2017-01-01")]
    #[case((2016, 0, 1), "2015-12-01")]
    #[case((2016, 3, 0), "2016-02-29")]
    #[case((2016, 1, -1), "2015-12-30")]
    #[case((2016, 25, 1), "2018-01-01")]
    #[case((2016, -11, 1), "2015-01-01")]
    fn test_new_rolls_over(#[case] ymd: (i32, i32, i32), #[case] expected: &str) {
        assert_eq!(expected, CivilDate::new(ymd.0, ymd.1, ymd.2).to_string());
    }

    #[test]
    fn test_new_saturates() {
        assert_eq!(CivilDate::MAX, CivilDate::new(i32::MAX, 12, 31));
        assert_eq!(CivilDate::MIN, CivilDate::new(i32::MIN, 1, 1));
        assert_eq!(CivilDate::MAX, CivilDate::MAX.add_date(0, 0, 1));
        assert_eq!(CivilDate::MIN, CivilDate::MIN.add_date(0, 0, -1));
    }

    #[rstest]
    #[case("2024-02-29", true)]
    #[case("0000-01-01", true)]
    #[case("2023-02-29", false)]
    #[case("2024-13-01", false)]
    #[case("2024-00-10", false)]
    #[case("2024-04-31", false)]
    fn test_parse_range(#[case] text: &str, #[case] passes: bool) {
        let date = text.parse::<CivilDate>();
        if passes {
            assert_eq!(Ok(text), date.map(|d| d.to_string()).as_deref());
        } else {
            assert!(matches!(date, Err(FormatError::OutOfRange { .. })));
        }
    }

    #[rstest]
    #[case("2021-2-3")]
    #[case("2021-02-03T00:00:00")]
    #[case("2021-02-03 ")]
    #[case(" 2021-02-03")]
    #[case("21-02-03")]
    #[case("20210203")]
    fn test_parse_shape(#[case] text: &str) {
        assert!(matches!(
            text.parse::<CivilDate>(),
            Err(FormatError::PatternMismatch {
                pattern: "YYYY-MM-DD",
                ..
            })
        ));
    }

    #[rstest]
    #[case(b"2023-01-05")]
    #[case(b"\"2023-01-05")]
    #[case(b"null")]
    #[case(b"")]
    #[case(b" \"2023-01-05\"\n")]
    #[case(b"\"2023-01-05\" ")]
    fn test_from_json_not_a_string(#[case] json: &[u8]) {
        assert!(matches!(
            CivilDate::from_json(json),
            Err(FormatError::NotAString { .. })
        ));
    }

    #[test]
    fn test_extreme_years_do_not_round_trip() {
        assert_eq!("+262142-12-31", CivilDate::MAX.to_string());
        assert!(matches!(
            CivilDate::from_json(&CivilDate::MAX.to_json()),
            Err(FormatError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_from_json_bad_content() {
        assert!(matches!(
            CivilDate::from_json(b"\"2023-02-30\""),
            Err(FormatError::OutOfRange { .. })
        ));
        assert!(matches!(
            CivilDate::from_json(b"\"2023-2-3\""),
            Err(FormatError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_serde_in_struct() {
        #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
        struct Holiday {
            name: String,
            on: CivilDate,
        }

        let holiday = Holiday {
            name: "new year".to_string(),
            on: CivilDate::new(2024, 1, 1),
        };
        let json = serde_json::to_string(&holiday).unwrap();
        assert_eq!(r#"{"name":"new year","on":"2024-01-01"}"#, json);
        assert_eq!(holiday, serde_json::from_str(&json).unwrap());
        assert!(serde_json::from_str::<Holiday>(r#"{"name":"x","on":"2024-1-1"}"#).is_err());
    }

    #[test]
    fn test_naive_conversions() {
        let naive = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        let date = CivilDate::from(naive);
        assert_eq!(naive, date.to_naive());
        assert_eq!(naive, NaiveDate::from(date));
        // deref exposes chrono's calendar helpers
        assert_eq!(60, date.ordinal());
    }
}
