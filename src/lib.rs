//! # civilcal
//!
//! Civil calendar value types: a date with no time-of-day or time zone, a time-of-day with no
//! date or time zone, and nullable variants of both.
//!
//! Every type supports the same small set of operations: construct, compare, format as text,
//! parse from text or JSON, and bind to or from a database value.
//!
//! ## Examples
//!
//! ```
//! use civilcal::prelude::*;
//!
//! let date = CivilDate::new(2016, 2, 28);
//! let later = date.add_date(0, 0, 2);
//! assert_eq!("2016-03-01", later.to_string());
//! assert!(date.before(&later));
//!
//! let time: CivilTime = "09:30:00".parse().unwrap();
//! assert_eq!(b"\"09:30:00\"".to_vec(), time.to_json());
//!
//! let missing = NullableCivilTime::from_json(b"null").unwrap();
//! assert_eq!("null", missing.to_string());
//! ```
//!
//! ## Types
//!
//! | Type | Text | JSON | Database |
//! |---|---|---|---|
//! | [`CivilDate`] | `YYYY-MM-DD` | `"YYYY-MM-DD"` | [`Value::Timestamp`] at midnight |
//! | [`CivilTime`] | `HH:MM:SS` | `"HH:MM:SS"` | [`Value::Timestamp`] on 1970-01-01 |
//! | [`NullableCivilDate`] | date or `null` | date or `null` | date or [`Value::Null`] |
//! | [`NullableCivilTime`] | time or `null` | time or `null` | time or [`Value::Null`] |
//!
//! Construction never fails. Out-of-range components roll over instead, so
//! `CivilDate::new(2016, 1, 32)` is February 1st and `CivilTime::new(25, 0, 0)` is `01:00:00`.
//!
//! Parsing is strict: only the exact fixed-width pattern is accepted, and it must name a real
//! date or clock time.
//!
//! ## Database values
//!
//! [`Value`] is the driver-neutral representation of a column or parameter. [`ToValue`] and
//! [`FromValue`] convert to and from it. The non-nullable types reject [`Value::Null`] with a
//! [`TypeError`]; the nullable ones read it as absent.
//!
//! ```
//! use civilcal::prelude::*;
//!
//! let date = CivilDate::new(2023, 1, 5);
//! assert_eq!(Ok(date), CivilDate::from_value(&date.to_value()));
//! assert!(CivilDate::from_value(&Value::Null).is_err());
//! assert_eq!(Ok(NullableCivilDate::NULL), NullableCivilDate::from_value(&Value::Null));
//! ```
//!
//! ## Crate features
//!
//! * **logging** (default) - Emits diagnostics through the [`log`](https://docs.rs/log) facade.
//!
//! ## Prelude
//!
//! civilcal provides a prelude module for convenience. It contains everything needed to interact
//! with the library.
//!
//! ```
//! use civilcal::prelude::*;
//! ```
#![warn(missing_docs)]

#[macro_use]
mod logging;

mod date;
mod error;
mod format;
mod nullable;
mod time;
mod value;

pub use crate::date::CivilDate;
pub use crate::error::{CompositeError, FormatError, TypeError};
pub use crate::nullable::{NullableCivilDate, NullableCivilTime};
pub use crate::time::CivilTime;
pub use crate::value::{FromValue, ToValue, Value};

/// A convenience module appropriate for glob imports (`use civilcal::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::CivilDate;
    #[doc(no_inline)]
    pub use crate::CivilTime;
    #[doc(no_inline)]
    pub use crate::CompositeError;
    #[doc(no_inline)]
    pub use crate::FormatError;
    #[doc(no_inline)]
    pub use crate::FromValue;
    #[doc(no_inline)]
    pub use crate::NullableCivilDate;
    #[doc(no_inline)]
    pub use crate::NullableCivilTime;
    #[doc(no_inline)]
    pub use crate::ToValue;
    #[doc(no_inline)]
    pub use crate::TypeError;
    #[doc(no_inline)]
    pub use crate::Value;
}
