//! Result records returned across the call boundary.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{KernelError, Result};

/// The outcome of one kernel call.
///
/// A success carries only data fields. A failure carries only `error`, plus
/// `valid: false` for kernels that report validity.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(Map<String, Value>),
    Failure { error: String, valid: Option<bool> },
}

impl Response {
    /// Render a serializable record as a success. The record must serialize
    /// to a JSON object.
    pub fn record<T: Serialize>(record: &T) -> Result<Self> {
        match serde_json::to_value(record) {
            Ok(Value::Object(fields)) => Ok(Response::Success(fields)),
            Ok(other) => Err(KernelError::Encoding(format!(
                "expected an object record, got {other}"
            ))),
            Err(e) => Err(KernelError::Encoding(e.to_string())),
        }
    }

    /// A failure carrying the error's display text.
    pub fn failure(error: &KernelError) -> Self {
        Response::Failure {
            error: error.to_string(),
            valid: None,
        }
    }

    /// A failure that also reports `valid: false`.
    pub fn invalid(error: &KernelError) -> Self {
        Response::Failure {
            error: error.to_string(),
            valid: Some(false),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// The error text, if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Failure { error, .. } => Some(error),
        }
    }

    /// A field of the rendered record.
    pub fn get(&self, field: &str) -> Option<Value> {
        match self {
            Response::Success(fields) => fields.get(field).cloned(),
            Response::Failure { error, valid } => match field {
                "error" => Some(Value::String(error.clone())),
                "valid" => valid.map(Value::Bool),
                _ => None,
            },
        }
    }

    /// The record as a JSON object.
    pub fn to_json(&self) -> Value {
        match self {
            Response::Success(fields) => Value::Object(fields.clone()),
            Response::Failure { error, valid } => {
                let mut fields = Map::new();
                if let Some(valid) = valid {
                    fields.insert("valid".into(), Value::Bool(*valid));
                }
                fields.insert("error".into(), Value::String(error.clone()));
                Value::Object(fields)
            }
        }
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
