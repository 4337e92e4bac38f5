//! Safe serialization of error-like and arbitrary values into JSON records.
//!
//! [`serialize_object`] is meant for the moment something has already failed and needs to be
//! logged or returned to a caller, so it never fails itself: whatever it is given it produces a
//! JSON object with at least a `message` field.

use std::any::type_name;
use std::error::Error as StdErrorTrait;

use serde_json::{Map, Number, Value};

use crate::error::Error;

/// A value carrying the conventional error triple plus any caller-attached extras.
pub trait ErrorLike {
    fn name(&self) -> String;

    fn message(&self) -> String;

    fn stack(&self) -> String;

    /// Additional attributes (error codes, offending input, ...) in the order they should
    /// appear in the serialized record.
    fn extra_fields(&self) -> Vec<(String, Value)> {
        Vec::new()
    }
}

/// Adapts any [`std::error::Error`] to [`ErrorLike`].
///
/// The name is the unqualified type name. The stack is a `"{name}: {message}"` header followed
/// by one `caused by:` line per error in the `source()` chain.
pub struct StdError<'a> {
    name: String,
    error: &'a (dyn StdErrorTrait + 'a),
}

impl<'a> StdError<'a> {
    pub fn new<E: StdErrorTrait + 'a>(error: &'a E) -> Self {
        Self {
            name: short_type_name::<E>().to_string(),
            error,
        }
    }

    /// Wraps a trait object, whose concrete type name is no longer known, under `name`.
    pub fn named(name: &str, error: &'a (dyn StdErrorTrait + 'a)) -> Self {
        Self {
            name: name.to_string(),
            error,
        }
    }
}

impl ErrorLike for StdError<'_> {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn message(&self) -> String {
        self.error.to_string()
    }

    fn stack(&self) -> String {
        render_stack(&self.name, self.error)
    }
}

impl ErrorLike for Error {
    fn name(&self) -> String {
        match self {
            Error::InvalidDate(_) => "InvalidDateError",
            Error::UnsupportedUnit(_) => "UnsupportedUnitError",
            Error::DateRange(_) => "DateRangeError",
            Error::Decode(_) => "DecodeError",
            Error::Utf8(_) => "Utf8Error",
        }
        .to_string()
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn stack(&self) -> String {
        render_stack(&self.name(), self)
    }

    fn extra_fields(&self) -> Vec<(String, Value)> {
        let code = match self {
            Error::InvalidDate(_) => "INVALID_DATE",
            Error::UnsupportedUnit(_) => "UNSUPPORTED_UNIT",
            Error::DateRange(_) => "DATE_RANGE",
            Error::Decode(_) => "INVALID_BASE64",
            Error::Utf8(_) => "INVALID_UTF8",
        };

        let mut fields = vec![("code".to_string(), Value::from(code))];
        match self {
            Error::InvalidDate(input) | Error::UnsupportedUnit(input) => {
                fields.push(("input".to_string(), Value::from(input.as_str())));
            }
            Error::Decode(e) => {
                fields.push(("position".to_string(), Value::from(e.position)));
            }
            Error::Utf8(e) => {
                fields.push(("position".to_string(), Value::from(e.utf8_error().valid_up_to())));
            }
            Error::DateRange(_) => {}
        }
        fields
    }
}

/// What [`serialize_object`] is handed: an error-like value or any JSON value.
pub enum Subject<'a> {
    Error(&'a dyn ErrorLike),
    Value(Value),
}

impl<'a, E: ErrorLike + 'a> From<&'a E> for Subject<'a> {
    fn from(error: &'a E) -> Self {
        Subject::Error(error)
    }
}

impl<'a> From<&'a dyn ErrorLike> for Subject<'a> {
    fn from(error: &'a dyn ErrorLike) -> Self {
        Subject::Error(error)
    }
}

impl From<Value> for Subject<'_> {
    fn from(value: Value) -> Self {
        Subject::Value(value)
    }
}

impl From<Map<String, Value>> for Subject<'_> {
    fn from(map: Map<String, Value>) -> Self {
        Subject::Value(Value::Object(map))
    }
}

impl From<&str> for Subject<'_> {
    fn from(value: &str) -> Self {
        Subject::Value(Value::from(value))
    }
}

impl From<String> for Subject<'_> {
    fn from(value: String) -> Self {
        Subject::Value(Value::from(value))
    }
}

impl From<bool> for Subject<'_> {
    fn from(value: bool) -> Self {
        Subject::Value(Value::from(value))
    }
}

impl From<i64> for Subject<'_> {
    fn from(value: i64) -> Self {
        Subject::Value(Value::from(value))
    }
}

impl From<u64> for Subject<'_> {
    fn from(value: u64) -> Self {
        Subject::Value(Value::from(value))
    }
}

impl From<f64> for Subject<'_> {
    fn from(value: f64) -> Self {
        // JSON has no NaN or infinities; keep their conventional spelling as text instead
        let value = match Number::from_f64(value) {
            Some(n) => Value::Number(n),
            None if value.is_nan() => Value::from("NaN"),
            None if value > 0.0 => Value::from("Infinity"),
            None => Value::from("-Infinity"),
        };
        Subject::Value(value)
    }
}

impl<'a, T: Into<Subject<'a>>> From<Option<T>> for Subject<'a> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Subject::Value(Value::Null),
        }
    }
}

/// Converts `subject` into a JSON object, checking in order:
///
/// 1. Error-like values become `{name, message, stack, ...extra_fields}`. Extras are added
///    last, so an extra named `name`, `message` or `stack` overwrites the fixed field (keeping
///    its position).
/// 2. JSON objects pass through untouched.
/// 3. Everything else becomes `{"message": <text>}`: strings verbatim, `null`, booleans and
///    numbers by their JSON spelling, arrays as their JSON text.
///
/// `serde_json::Value` cannot form cycles, so the passthrough branch is always serializable.
pub fn serialize_object<'a>(subject: impl Into<Subject<'a>>) -> Map<String, Value> {
    match subject.into() {
        Subject::Error(error) => error_record(error),
        Subject::Value(Value::Object(map)) => map,
        Subject::Value(other) => {
            let mut record = Map::new();
            record.insert("message".to_string(), Value::String(message_text(other)));
            record
        }
    }
}

fn error_record(error: &dyn ErrorLike) -> Map<String, Value> {
    let mut record = Map::new();
    record.insert("name".to_string(), Value::String(error.name()));
    record.insert("message".to_string(), Value::String(error.message()));
    record.insert("stack".to_string(), Value::String(error.stack()));

    for (key, value) in error.extra_fields() {
        record.insert(key, value);
    }

    record
}

fn message_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn render_stack(name: &str, error: &dyn StdErrorTrait) -> String {
    let mut stack = format!("{name}: {error}");

    let mut source = error.source();
    while let Some(cause) = source {
        stack.push_str("\n    caused by: ");
        stack.push_str(&cause.to_string());
        source = cause.source();
    }

    stack
}

/// `alloc::string::String` -> `String`, `foo::Bar<baz::Qux>` -> `Bar`
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
