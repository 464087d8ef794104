//! Best-effort, schema-less protobuf probing.
//!
//! The only structure assumed is `google.protobuf.Any`. If the bytes decode
//! as an `Any` whose type URL names a well-known type, the inner message is
//! rendered with the protobuf JSON mapping. Anything else is reported as raw
//! bytes. There is no descriptor pool: user-defined message types never
//! resolve.

use base64::{engine::general_purpose::STANDARD, Engine};
use prost::Message;
use prost_types::{value::Kind, Any, Duration, FieldMask, ListValue, Struct, Timestamp};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::CoreError;

/// Note attached to raw results.
pub const RAW_NOTE: &str = "Decoded as raw protobuf bytes. Specific message type unknown.";

/// Outcome of one probe. The two variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ProbeResult {
    /// The bytes were an `Any` wrapping a resolvable message.
    Any {
        #[serde(rename = "type")]
        type_url: String,
        data: Value,
        raw: String,
    },
    /// Nothing could be interpreted.
    Raw {
        bytes: usize,
        hex: String,
        note: &'static str,
    },
}

impl ProbeResult {
    pub fn is_any(&self) -> bool {
        matches!(self, ProbeResult::Any { .. })
    }

    fn raw(data: &[u8]) -> Self {
        ProbeResult::Raw {
            bytes: data.len(),
            hex: hex::encode(data),
            note: RAW_NOTE,
        }
    }
}

/// Decode standard base64 and probe the bytes.
pub fn probe_base64(input: &str) -> Result<ProbeResult, CoreError> {
    let data = STANDARD.decode(input)?;
    Ok(probe(&data))
}

/// Probe raw bytes.
pub fn probe(data: &[u8]) -> ProbeResult {
    let Ok(any) = Any::decode(data) else {
        return ProbeResult::raw(data);
    };

    match resolve(&any) {
        Some(json) => {
            let raw = serde_json::to_string(&json).unwrap_or_default();
            ProbeResult::Any {
                type_url: any.type_url,
                data: json,
                raw,
            }
        }
        None => ProbeResult::raw(data),
    }
}

/// Render the inner message of a well-known type as JSON.
fn resolve(any: &Any) -> Option<Value> {
    let name = any.type_url.rsplit('/').next()?;
    let bytes = any.value.as_slice();

    let value = match name {
        "google.protobuf.StringValue" => Value::String(String::decode(bytes).ok()?),
        "google.protobuf.BytesValue" => {
            Value::String(STANDARD.encode(<Vec<u8>>::decode(bytes).ok()?))
        }
        "google.protobuf.BoolValue" => Value::Bool(bool::decode(bytes).ok()?),
        "google.protobuf.Int32Value" => Value::from(i32::decode(bytes).ok()?),
        "google.protobuf.UInt32Value" => Value::from(u32::decode(bytes).ok()?),
        // 64-bit integers are strings in the JSON mapping
        "google.protobuf.Int64Value" => Value::String(i64::decode(bytes).ok()?.to_string()),
        "google.protobuf.UInt64Value" => Value::String(u64::decode(bytes).ok()?.to_string()),
        "google.protobuf.FloatValue" => float_json(f64::from(f32::decode(bytes).ok()?)),
        "google.protobuf.DoubleValue" => float_json(f64::decode(bytes).ok()?),
        "google.protobuf.Empty" => {
            <()>::decode(bytes).ok()?;
            Value::Object(Map::new())
        }
        "google.protobuf.Timestamp" => Value::String(Timestamp::decode(bytes).ok()?.to_string()),
        "google.protobuf.Duration" => Value::String(Duration::decode(bytes).ok()?.to_string()),
        "google.protobuf.Struct" => struct_json(&Struct::decode(bytes).ok()?),
        "google.protobuf.Value" => value_json(&prost_types::Value::decode(bytes).ok()?),
        "google.protobuf.ListValue" => list_json(&ListValue::decode(bytes).ok()?),
        "google.protobuf.FieldMask" => Value::String(field_mask_json(&FieldMask::decode(bytes).ok()?)),
        _ => return None,
    };
    Some(value)
}

fn float_json(v: f64) -> Value {
    match Number::from_f64(v) {
        Some(n) => Value::Number(n),
        None if v.is_nan() => Value::String("NaN".into()),
        None if v > 0.0 => Value::String("Infinity".into()),
        None => Value::String("-Infinity".into()),
    }
}

/// Paths joined by commas, each converted to lowerCamelCase.
fn field_mask_json(mask: &FieldMask) -> String {
    mask.paths
        .iter()
        .map(|path| {
            let mut out = String::with_capacity(path.len());
            let mut upper = false;
            for c in path.chars() {
                if c == '_' {
                    upper = true;
                } else if upper {
                    out.extend(c.to_uppercase());
                    upper = false;
                } else {
                    out.push(c);
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn struct_json(s: &Struct) -> Value {
    Value::Object(
        s.fields
            .iter()
            .map(|(k, v)| (k.clone(), value_json(v)))
            .collect(),
    )
}

fn list_json(l: &ListValue) -> Value {
    Value::Array(l.values.iter().map(value_json).collect())
}

fn value_json(v: &prost_types::Value) -> Value {
    match &v.kind {
        None | Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::NumberValue(n)) => float_json(*n),
        Some(Kind::StringValue(s)) => Value::String(s.clone()),
        Some(Kind::BoolValue(b)) => Value::Bool(*b),
        Some(Kind::StructValue(s)) => struct_json(s),
        Some(Kind::ListValue(l)) => list_json(l),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrap(type_name: &str, value: Vec<u8>) -> Vec<u8> {
        Any {
            type_url: format!("type.googleapis.com/{type_name}"),
            value,
        }
        .encode_to_vec()
    }

    #[test]
    fn test_string_value_from_base64() {
        let result = probe_base64(
            "Ci90eXBlLmdvb2dsZWFwaXMuY29tL2dvb2dsZS5wcm90b2J1Zi5TdHJpbmdWYWx1ZRIHCgVoZWxsbw==",
        )
        .unwrap();

        assert_eq!(
            result,
            ProbeResult::Any {
                type_url: "type.googleapis.com/google.protobuf.StringValue".into(),
                data: json!("hello"),
                raw: "\"hello\"".into(),
            }
        );
    }

    #[test]
    fn test_scalar_wrappers() {
        let cases = [
            (wrap("google.protobuf.Int64Value", 42i64.encode_to_vec()), json!("42")),
            (wrap("google.protobuf.Int32Value", (-7i32).encode_to_vec()), json!(-7)),
            (wrap("google.protobuf.BoolValue", true.encode_to_vec()), json!(true)),
            (wrap("google.protobuf.DoubleValue", 1.5f64.encode_to_vec()), json!(1.5)),
            (
                wrap("google.protobuf.BytesValue", b"hi".to_vec().encode_to_vec()),
                json!("aGk="),
            ),
            (wrap("google.protobuf.Empty", Vec::new()), json!({})),
        ];

        for (bytes, expected) in cases {
            match probe(&bytes) {
                ProbeResult::Any { data, .. } => assert_eq!(data, expected),
                other => panic!("expected any, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_struct_value() {
        let fields = [
            ("name", Kind::StringValue("chronos".into())),
            ("count", Kind::NumberValue(3.0)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), prost_types::Value { kind: Some(v) }))
        .collect();
        let bytes = wrap("google.protobuf.Struct", Struct { fields }.encode_to_vec());

        let ProbeResult::Any { data, raw, .. } = probe(&bytes) else {
            panic!("struct should resolve");
        };
        assert_eq!(data, json!({"name": "chronos", "count": 3.0}));
        assert_eq!(serde_json::from_str::<Value>(&raw).unwrap(), data);
    }

    #[test]
    fn test_duration_and_timestamp() {
        let render = |seconds, nanos| {
            let bytes = wrap(
                "google.protobuf.Duration",
                Duration { seconds, nanos }.encode_to_vec(),
            );
            match probe(&bytes) {
                ProbeResult::Any { data, .. } => data,
                other => panic!("duration should resolve, got {other:?}"),
            }
        };
        assert_eq!(render(1, 500_000_000), json!("1.500s"));
        assert_eq!(render(-1, -500_000_000), json!("-1.500s"));
        // mixed signs are normalized before rendering
        assert_eq!(render(1, -500_000_000), json!("0.500s"));
        assert_eq!(render(2, 1_000), json!("2.000001s"));

        let bytes = wrap(
            "google.protobuf.Timestamp",
            Timestamp {
                seconds: 0,
                nanos: 0,
            }
            .encode_to_vec(),
        );
        let ProbeResult::Any { data, .. } = probe(&bytes) else {
            panic!("timestamp should resolve");
        };
        assert_eq!(data, json!("1970-01-01T00:00:00Z"));
    }

    #[test]
    fn test_field_mask_camel_case() {
        let mask = FieldMask {
            paths: vec!["user.display_name".into(), "photo".into()],
        };
        assert_eq!(field_mask_json(&mask), "user.displayName,photo");
    }

    #[test]
    fn test_unknown_type_falls_back_to_raw() {
        let bytes = wrap("acme.Widget", vec![0x08, 0x01]);
        assert_eq!(
            probe(&bytes),
            ProbeResult::Raw {
                bytes: bytes.len(),
                hex: hex::encode(&bytes),
                note: RAW_NOTE,
            }
        );
    }

    #[test]
    fn test_garbage_is_raw() {
        let garbage = [0xff, 0xff, 0xff, 0xff];
        let result = probe(&garbage);
        assert!(!result.is_any());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["format"], "raw");
        assert_eq!(json["bytes"], 4);
        assert_eq!(json["hex"], "ffffffff");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            probe_base64("").unwrap(),
            ProbeResult::Raw {
                bytes: 0,
                hex: String::new(),
                note: RAW_NOTE,
            }
        );
    }

    #[test]
    fn test_bad_base64() {
        assert!(matches!(probe_base64("%%%"), Err(CoreError::Base64(_))));
    }

    #[test]
    fn test_any_serialization_shape() {
        let bytes = wrap("google.protobuf.StringValue", "x".to_string().encode_to_vec());
        let json = serde_json::to_value(probe(&bytes)).unwrap();
        assert_eq!(json["format"], "any");
        assert_eq!(json["type"], "type.googleapis.com/google.protobuf.StringValue");
        assert_eq!(json["data"], "x");
        assert_eq!(json["raw"], "\"x\"");
    }
}
