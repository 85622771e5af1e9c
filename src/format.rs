use crate::error::FormatError;

/// A fixed-width text pattern, like `YYYY-MM-DD`.
///
/// Every ASCII uppercase letter in the pattern stands for exactly one ASCII digit. Every other
/// byte must appear literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pattern {
    /// The human readable pattern, shown in errors.
    pub(crate) text: &'static str,

    /// The equivalent `chrono` format string.
    pub(crate) strftime: &'static str,
}

pub(crate) const DATE_PATTERN: Pattern = Pattern {
    text: "YYYY-MM-DD",
    strftime: "%Y-%m-%d",
};

pub(crate) const TIME_PATTERN: Pattern = Pattern {
    text: "HH:MM:SS",
    strftime: "%H:%M:%S",
};

/// The JSON encoding of an absent value.
pub(crate) const JSON_NULL: &[u8] = b"null";

impl Pattern {
    /// Checks that `input` has exactly the shape of this pattern. This says nothing about whether
    /// the digits make a real date or time; `chrono` decides that afterwards.
    pub(crate) fn check_shape(&self, input: &str) -> Result<(), FormatError> {
        let matches = input.len() == self.text.len()
            && input
                .bytes()
                .zip(self.text.bytes())
                .all(|(got, want)| {
                    if want.is_ascii_uppercase() {
                        got.is_ascii_digit()
                    } else {
                        got == want
                    }
                });

        if matches {
            Ok(())
        } else {
            debug!("`{input}` does not have the shape of `{}`", self.text);
            Err(FormatError::PatternMismatch {
                input: input.to_owned(),
                pattern: self.text,
            })
        }
    }

    /// Maps a `chrono` parse failure on shape-checked input to a [`FormatError`].
    pub(crate) fn out_of_range(&self, input: &str, source: chrono::ParseError) -> FormatError {
        debug!("`{input}` matches `{}` but is out of range: {source}", self.text);
        FormatError::OutOfRange {
            input: input.to_owned(),
            source,
        }
    }
}

/// Wraps already-formatted text in JSON quotes. Civil text forms never need escaping.
pub(crate) fn quote(text: impl AsRef<str>) -> Vec<u8> {
    let text = text.as_ref();
    let mut json = Vec::with_capacity(text.len() + 2);
    json.push(b'"');
    json.extend_from_slice(text.as_bytes());
    json.push(b'"');
    json
}

/// Decodes a JSON string literal into its content. Escapes are honoured, but the literal must
/// span all of `json`: surrounding whitespace is rejected.
pub(crate) fn unquote(json: &[u8]) -> Result<String, FormatError> {
    let not_a_string = |reason: String| {
        let input = String::from_utf8_lossy(json).into_owned();
        debug!("`{input}` is not a JSON string: {reason}");
        FormatError::NotAString { input, reason }
    };

    if json.len() < 2 || json.first() != Some(&b'"') || json.last() != Some(&b'"') {
        return Err(not_a_string("expected a quote at both ends".to_owned()));
    }
    serde_json::from_slice::<String>(json).map_err(|err| not_a_string(err.to_string()))
}
