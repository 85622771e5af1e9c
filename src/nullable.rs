use crate::{
    date::CivilDate,
    error::{FormatError, TypeError},
    format::JSON_NULL,
    time::CivilTime,
    value::{FromValue, ToValue, Value},
};
use chrono::{Datelike, Timelike};
use core::fmt::{self, Display};

/// Display text of an absent value. Unrelated to the JSON `null`, which happens to be spelled
/// the same.
const NULL_TEXT: &str = "null";

/// A [`CivilDate`] that may be absent, for nullable columns and optional JSON fields.
///
/// This is a thin wrapper around `Option<CivilDate>` that adds the null-aware encodings:
///
/// - JSON: absent is `null`, present is the date's string literal.
/// - Database: absent is [`Value::Null`], present is the date's [`Value::Timestamp`]. Unlike
///   [`CivilDate`], reading a [`Value::Null`] succeeds.
/// - Display: absent is the text `null`.
///
/// Two absent values are equal to each other and unequal to every present value.
///
/// # Examples
///
/// ```
/// use civilcal::prelude::*;
///
/// let absent = NullableCivilDate::from_value(&Value::Null).unwrap();
/// assert!(absent.is_null());
/// assert_eq!(b"null".to_vec(), absent.to_json());
/// assert!(CivilDate::from_value(&Value::Null).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullableCivilDate(Option<CivilDate>);

impl NullableCivilDate {
    /// The absent value.
    pub const NULL: Self = Self(None);

    /// Returns a present value holding [`CivilDate::new(year, month, day)`](CivilDate::new).
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Self(Some(CivilDate::new(year, month, day)))
    }

    /// Returns a present value holding the calendar date of `timestamp`.
    pub fn from_timestamp(timestamp: &impl Datelike) -> Self {
        Self(Some(CivilDate::from_timestamp(timestamp)))
    }

    /// Returns the absent value.
    pub fn null() -> Self {
        Self::NULL
    }

    /// Returns true if no date is present.
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the date, if present.
    pub fn get(self) -> Option<CivilDate> {
        self.0
    }

    /// Returns the JSON encoding: `null` if absent, else the quoted `YYYY-MM-DD` text.
    pub fn to_json(&self) -> Vec<u8> {
        self.0.map_or_else(|| JSON_NULL.to_vec(), |date| date.to_json())
    }

    /// Decodes `null`, empty input, or a JSON string literal holding `YYYY-MM-DD` text.
    ///
    /// # Errors
    ///
    /// Anything but `null` or empty input fails exactly as [`CivilDate::from_json`] would.
    pub fn from_json(json: &[u8]) -> Result<Self, FormatError> {
        if json.is_empty() || json == JSON_NULL {
            return Ok(Self::NULL);
        }
        CivilDate::from_json(json).map(Self::from)
    }
}

impl Display for NullableCivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(date) => Display::fmt(date, f),
            None => f.write_str(NULL_TEXT),
        }
    }
}

impl From<CivilDate> for NullableCivilDate {
    fn from(date: CivilDate) -> Self {
        Self(Some(date))
    }
}

impl From<Option<CivilDate>> for NullableCivilDate {
    fn from(date: Option<CivilDate>) -> Self {
        Self(date)
    }
}

impl From<NullableCivilDate> for Option<CivilDate> {
    fn from(date: NullableCivilDate) -> Self {
        date.0
    }
}

impl ToValue for NullableCivilDate {
    fn to_value(&self) -> Value {
        self.0.as_ref().map(ToValue::to_value).into()
    }
}

impl FromValue for NullableCivilDate {
    /// [`Value::Null`] is the absent value; anything else converts as for [`CivilDate`].
    fn from_value(value: &Value) -> Result<Self, TypeError> {
        if value.is_null() {
            trace!("decoding NULL as an absent date");
            return Ok(Self::NULL);
        }
        CivilDate::from_value(value).map(Self::from)
    }
}

impl serde::Serialize for NullableCivilDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for NullableCivilDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Option<CivilDate> as serde::Deserialize>::deserialize(deserializer).map(Self)
    }
}

/// A [`CivilTime`] that may be absent, for nullable columns and optional JSON fields.
///
/// The null handling is identical to [`NullableCivilDate`]'s: absent is `null` in JSON and
/// display text, [`Value::Null`] in a database, and equal only to other absent values.
///
/// # Examples
///
/// ```
/// use civilcal::prelude::*;
///
/// let absent = NullableCivilTime::NULL;
/// assert_eq!("null", absent.to_string());
/// assert_eq!(b"null".to_vec(), absent.to_json());
/// assert_eq!(Ok(absent), NullableCivilTime::from_json(b"null"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullableCivilTime(Option<CivilTime>);

impl NullableCivilTime {
    /// The absent value.
    pub const NULL: Self = Self(None);

    /// Returns a present value holding [`CivilTime::new(hour, minute, second)`](CivilTime::new).
    pub fn new(hour: i32, minute: i32, second: i32) -> Self {
        Self(Some(CivilTime::new(hour, minute, second)))
    }

    /// Returns a present value holding the time-of-day of `timestamp`.
    pub fn from_timestamp(timestamp: &impl Timelike) -> Self {
        Self(Some(CivilTime::from_timestamp(timestamp)))
    }

    /// Returns the absent value.
    pub fn null() -> Self {
        Self::NULL
    }

    /// Returns true if no time is present.
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the time, if present.
    pub fn get(self) -> Option<CivilTime> {
        self.0
    }

    /// Returns the JSON encoding: `null` if absent, else the quoted `HH:MM:SS` text.
    pub fn to_json(&self) -> Vec<u8> {
        self.0.map_or_else(|| JSON_NULL.to_vec(), |time| time.to_json())
    }

    /// Decodes `null`, empty input, or a JSON string literal holding `HH:MM:SS` text.
    ///
    /// # Errors
    ///
    /// Anything but `null` or empty input fails exactly as [`CivilTime::from_json`] would.
    pub fn from_json(json: &[u8]) -> Result<Self, FormatError> {
        if json.is_empty() || json == JSON_NULL {
            return Ok(Self::NULL);
        }
        CivilTime::from_json(json).map(Self::from)
    }
}

impl Display for NullableCivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(time) => Display::fmt(time, f),
            None => f.write_str(NULL_TEXT),
        }
    }
}

impl From<CivilTime> for NullableCivilTime {
    fn from(time: CivilTime) -> Self {
        Self(Some(time))
    }
}

impl From<Option<CivilTime>> for NullableCivilTime {
    fn from(time: Option<CivilTime>) -> Self {
        Self(time)
    }
}

impl From<NullableCivilTime> for Option<CivilTime> {
    fn from(time: NullableCivilTime) -> Self {
        time.0
    }
}

impl ToValue for NullableCivilTime {
    fn to_value(&self) -> Value {
        self.0.as_ref().map(ToValue::to_value).into()
    }
}

impl FromValue for NullableCivilTime {
    /// [`Value::Null`] is the absent value; anything else converts as for [`CivilTime`].
    fn from_value(value: &Value) -> Result<Self, TypeError> {
        if value.is_null() {
            trace!("decoding NULL as an absent time");
            return Ok(Self::NULL);
        }
        CivilTime::from_value(value).map(Self::from)
    }
}

impl serde::Serialize for NullableCivilTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for NullableCivilTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Option<CivilTime> as serde::Deserialize>::deserialize(deserializer).map(Self)
    }
}
