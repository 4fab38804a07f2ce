use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;
use thiserror::Error;

/// Error codes raised while parsing the format string or an embedded
/// script. The numeric values are part of the public surface, see
/// [`ScriptErrorCode::into_raw`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    IntoPrimitive,
    TryFromPrimitive,
)]
#[repr(i32)]
pub enum ScriptErrorCode {
    NoError = 0,
    /// The cursor reached the end of the format string in the middle of
    /// a construct. Typically an incomplete format string.
    EndOfString = 1,
    InvalidFieldName = 2,
    InvalidCondition = 3,
    InvalidIndex = 4,
    InvalidAttribute = 5,
    InvalidOperator = 6,
    InvalidString = 7,
    UnenclosedBrace = 8,
    /// Internal error, should not be reachable from well-formed input.
    Unknown = -1,
}

impl ScriptErrorCode {
    pub fn from_raw(value: i32) -> Option<Self> {
        Self::try_from(value).ok()
    }

    pub fn into_raw(self) -> i32 {
        self.into()
    }

    pub fn message(self) -> &'static str {
        match self {
            ScriptErrorCode::NoError => "no error",
            ScriptErrorCode::EndOfString => "end of string",
            ScriptErrorCode::InvalidFieldName => "invalid field name",
            ScriptErrorCode::InvalidCondition => "invalid condition",
            ScriptErrorCode::InvalidIndex => "invalid index",
            ScriptErrorCode::InvalidAttribute => "invalid attribute",
            ScriptErrorCode::InvalidOperator => "invalid operator",
            ScriptErrorCode::InvalidString => "invalid string",
            ScriptErrorCode::UnenclosedBrace => "unenclosed brace",
            ScriptErrorCode::Unknown => "unknown error",
        }
    }
}

impl core::fmt::Display for ScriptErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

fn script_message(code: &ScriptErrorCode, pos: &usize) -> String {
    if cfg!(debug_assertions) {
        format!("script error: {code} (at offset {pos})")
    } else {
        format!("script error: {code}")
    }
}

/// All errors a `vformat*` call can surface. Script errors carry the
/// byte offset of the failing cursor position in the format string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("{}", script_message(.code, .pos))]
    Script { code: ScriptErrorCode, pos: usize },
    /// A script variable was accessed at the wrong type.
    #[error("bad variable access")]
    BadVariableAccess,
    /// A value could not be coerced into a script variable.
    #[error("invalid conversion: {0}")]
    InvalidConversion(String),
    /// A handle was retrieved at the wrong type.
    #[error("bad handle cast")]
    BadHandleCast,
    /// A formatter rejected the spec or the value.
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("argument index out of range: {0}")]
    IndexOutOfRange(usize),
    #[error("invalid named argument: {0}")]
    InvalidNamedArgument(String),
    /// The value does not support the requested indexing operation.
    #[error("index unavailable")]
    IndexUnavailable,
    /// The value does not expose the requested attribute.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),
}

impl FormatError {
    pub(crate) fn script(code: ScriptErrorCode, pos: usize) -> Self {
        FormatError::Script { code, pos }
    }

    pub(crate) fn invalid_format(msg: impl Into<String>) -> Self {
        FormatError::InvalidFormat(msg.into())
    }

    /// The script error code, if this is a script error.
    pub fn script_code(&self) -> Option<ScriptErrorCode> {
        match self {
            FormatError::Script { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_raw_round_trip() {
        assert_eq!(ScriptErrorCode::from_raw(8), Some(ScriptErrorCode::UnenclosedBrace));
        assert_eq!(ScriptErrorCode::from_raw(-1), Some(ScriptErrorCode::Unknown));
        assert_eq!(ScriptErrorCode::from_raw(9), None);
        assert_eq!(ScriptErrorCode::EndOfString.into_raw(), 1);
    }

    #[test]
    fn script_error_exposes_code() {
        let err = FormatError::script(ScriptErrorCode::InvalidOperator, 3);
        assert_eq!(err.script_code(), Some(ScriptErrorCode::InvalidOperator));
        assert_eq!(FormatError::BadHandleCast.script_code(), None);
    }
}
