//! Request payloads.
//!
//! A [`Payload`] is what a caller hands to a CRUD method: either a structured
//! [`Record`] (an ordered `serde_json` object) or an opaque text/binary body.
//! Records feed placeholder substitution and are encoded as a query string
//! for read actions or as JSON text for everything else. Text and binary
//! bodies are passed through untouched.

use serde_json::{Map, Value};

/// An ordered mapping of field name to value.
///
/// Ordering follows insertion, so query strings and JSON bodies are emitted
/// in the order fields were added.
pub type Record = Map<String, Value>;

/// A request payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Payload {
    /// No payload.
    #[default]
    Empty,
    /// A structured key-value record.
    Record(Record),
    /// A pre-encoded text body.
    Text(String),
    /// A pre-encoded binary body.
    Binary(Vec<u8>),
}

impl Payload {
    /// Returns the record, if this payload is one.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns `true` if there is nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Record(_) => false,
            Self::Text(text) => text.is_empty(),
            Self::Binary(bytes) => bytes.is_empty(),
        }
    }

    /// Sets a field, turning an empty payload into a record first.
    ///
    /// Text and binary payloads are left unchanged since they have no fields.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if matches!(self, Self::Empty) {
            *self = Self::Record(Record::new());
        }
        if let Self::Record(record) = self {
            record.insert(key.into(), value.into());
        }
    }
}

impl From<()> for Payload {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

impl From<Record> for Payload {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Object(record) => Self::Record(record),
            Value::String(text) => Self::Text(text),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

/// Renders a value the way it appears inside a URL path or query string.
///
/// Strings are used verbatim, `null` renders empty, arrays are
/// comma-joined and nested objects fall back to their JSON text.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Returns `true` for the values that count as "not supplied".
///
/// These are `null`, `false`, zero and the empty string.
#[must_use]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Encodes a record as an `application/x-www-form-urlencoded` query string.
///
/// Arrays repeat the key once per element; nested objects encode as an
/// empty value.
///
/// # Example
///
/// ```rust
/// use rest_resource::clients::to_query_string;
/// use serde_json::json;
///
/// let record = json!({"a": 1, "b": "x y"});
/// let query = to_query_string(record.as_object().unwrap());
/// assert_eq!(query, "a=1&b=x%20y");
/// ```
#[must_use]
pub fn to_query_string(record: &Record) -> String {
    let mut pairs = Vec::with_capacity(record.len());
    for (key, value) in record {
        let key = urlencoding::encode(key);
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push(format!("{key}={}", encode_scalar(item)));
                }
            }
            other => pairs.push(format!("{key}={}", encode_scalar(other))),
        }
    }
    pairs.join("&")
}

fn encode_scalar(value: &Value) -> String {
    match value {
        Value::String(_) | Value::Bool(_) | Value::Number(_) => {
            urlencoding::encode(&value_to_string(value)).into_owned()
        }
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}
