use crate::error::TypeError;
use chrono::NaiveDateTime;

/// A driver-neutral database value.
///
/// These are the primitive values a SQL driver hands to, and accepts from, its callers when
/// binding parameters and scanning columns. A driver adapter translates its own column
/// representation to and from this enum; the civil types only ever see a [`Value`].
///
/// Civil values are written as [`Value::Timestamp`] (or [`Value::Null`] for an absent nullable
/// value) and only read back from those two variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// A date and time-of-day with no zone attached.
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Returns the name of this value's variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Text(_) => "Text",
            Value::Bytes(_) => "Bytes",
            Value::Timestamp(_) => "Timestamp",
        }
    }

    /// Returns true if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(ts: NaiveDateTime) -> Self {
        Value::Timestamp(ts)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Conversion of a civil value into a database [`Value`], for binding as a query parameter.
pub trait ToValue {
    /// Returns the database representation of this value. This never fails.
    fn to_value(&self) -> Value;
}

/// Conversion of a database [`Value`] read from a column into a civil value.
pub trait FromValue: Sized {
    /// Converts `value` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns a [`TypeError`] if `value` is of a variant `Self` cannot be built from. For the
    /// non-nullable types this includes [`Value::Null`].
    fn from_value(value: &Value) -> Result<Self, TypeError>;
}

/// Extracts the timestamp from `value`, or reports why it cannot.
///
/// `type_name` names the civil type being decoded and is only used in errors.
pub(crate) fn expect_timestamp(
    value: &Value,
    type_name: &'static str,
) -> Result<NaiveDateTime, TypeError> {
    match value {
        Value::Timestamp(ts) => {
            trace!("decoding {type_name} from timestamp {ts}");
            Ok(*ts)
        }
        Value::Null => {
            debug!("rejecting NULL for non-nullable {type_name}");
            Err(TypeError::UnexpectedNull { type_name })
        }
        other => {
            debug!("rejecting {} value for {type_name}", other.type_name());
            Err(TypeError::Unconvertible {
                type_name,
                found: other.type_name(),
            })
        }
    }
}
