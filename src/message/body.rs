//! Message body variants.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::message::form::FormData;

/// Decoded or to-be-encoded message body.
#[derive(Debug, Clone, Default)]
pub enum Body {
    /// No body at all.
    #[default]
    Empty,
    /// Raw bytes, passed through verbatim.
    Bytes(Vec<u8>),
    /// Text, encoded as UTF-8.
    Text(String),
    /// Structured value, encoded as JSON text.
    Json(Value),
    /// Multipart form.
    Form(FormData),
}

impl Body {
    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Body::Empty => "empty",
            Body::Bytes(_) => "bytes",
            Body::Text(_) => "text",
            Body::Json(_) => "json",
            Body::Form(_) => "form",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Body::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&FormData> {
        match self {
            Body::Form(form) => Some(form),
            _ => None,
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

impl From<FormData> for Body {
    fn from(form: FormData) -> Self {
        Body::Form(form)
    }
}

/// Tag of the Node-style `{"type": "Buffer", "data": [...]}` byte form.
const BUFFER_TAG: &str = "Buffer";

/// `Empty` → `null`, bytes → `{"type": "Buffer", "data": [...]}`, text → string, JSON as is.
impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Body::Empty => serializer.serialize_none(),
            Body::Bytes(bytes) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", BUFFER_TAG)?;
                map.serialize_entry("data", bytes)?;
                map.end()
            }
            Body::Text(text) => serializer.serialize_str(text),
            Body::Json(value) => value.serialize(serializer),
            Body::Form(form) => form.serialize(serializer),
        }
    }
}

/// `null` → `Empty`, string → `Text`, Buffer object → `Bytes`, anything else → `Json`.
impl<'de> Deserialize<'de> for Body {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Body::Empty,
            Value::String(text) => Body::Text(text),
            other => match buffer_bytes(&other) {
                Some(bytes) => Body::Bytes(bytes),
                None => Body::Json(other),
            },
        })
    }
}

/// Bytes of a `{"type": "Buffer", "data": [...]}` object with nothing else in it.
fn buffer_bytes(value: &Value) -> Option<Vec<u8>> {
    let object = value.as_object()?;
    if object.len() != 2 || object.get("type")?.as_str()? != BUFFER_TAG {
        return None;
    }
    object
        .get("data")?
        .as_array()?
        .iter()
        .map(|byte| byte.as_u64().and_then(|b| u8::try_from(b).ok()))
        .collect()
}
