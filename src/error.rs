/// Errors from parsing the text or JSON form of a civil value.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The JSON input was not a string literal.
    #[error("`{input}` should be a quoted JSON string: {reason}")]
    NotAString { input: String, reason: String },

    /// The text did not have the shape of the fixed pattern, e.g. `2024-1-05` for `YYYY-MM-DD`.
    #[error("`{input}` should match the `{pattern}` pattern")]
    PatternMismatch {
        input: String,
        pattern: &'static str,
    },

    /// The text had the right shape, but does not name a real date or clock time, e.g.
    /// `2024-13-01` or `24:00:00`.
    #[error("`{input}` is not a valid value: {source}")]
    OutOfRange {
        input: String,
        source: chrono::ParseError,
    },

    /// A clock time with second `60`. Leap seconds are not modeled.
    #[error("`{input}` is a leap second, which is not supported")]
    LeapSecond { input: String },
}

/// Errors from converting a database [`Value`](crate::Value) into a civil value.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    /// A null was given to a type that cannot represent absence.
    #[error("unsupported NULL {type_name} value")]
    UnexpectedNull { type_name: &'static str },

    /// The database value was neither null nor a timestamp.
    #[error("unable to convert a {found} database value into {type_name}")]
    Unconvertible {
        type_name: &'static str,
        found: &'static str,
    },
}

/// Either a [`FormatError`] or a [`TypeError`], for callers that handle both.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CompositeError {
    /// See [`FormatError`].
    #[error(transparent)]
    Format(#[from] FormatError),

    /// See [`TypeError`].
    #[error(transparent)]
    Type(#[from] TypeError),
}
