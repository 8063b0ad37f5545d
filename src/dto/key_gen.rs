use rocket::FromForm;
use serde::Deserialize;
use serde_json::Value;

use crate::model_core::KeyRequest;

/// Form fields for `/generate` and `/keys`. `key_type`/`key_size` are older
/// names for `type`/`size`; the canonical name wins when both are sent.
#[derive(Debug, Default, FromForm)]
pub struct GenerateKeyForm {
    #[field(name = "type")]
    pub key_type: Option<String>,
    pub size: Option<String>,
    #[field(name = "key_type")]
    pub legacy_key_type: Option<String>,
    #[field(name = "key_size")]
    pub legacy_key_size: Option<String>,
}

impl GenerateKeyForm {
    pub fn to_request(&self) -> KeyRequest {
        KeyRequest::normalize(
            self.key_type.as_deref().or(self.legacy_key_type.as_deref()),
            self.size.as_deref().or(self.legacy_key_size.as_deref()),
        )
    }
}

/// JSON body for `/keys`, same names and precedence as the form. Sizes may be
/// numbers or strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateKeyBody {
    #[serde(rename = "type")]
    pub key_type: Option<Value>,
    pub size: Option<Value>,
    #[serde(rename = "key_type")]
    pub legacy_key_type: Option<Value>,
    #[serde(rename = "key_size")]
    pub legacy_key_size: Option<Value>,
}

impl GenerateKeyBody {
    pub fn to_request(&self) -> KeyRequest {
        let key_type = self
            .key_type
            .as_ref()
            .and_then(field_text)
            .or_else(|| self.legacy_key_type.as_ref().and_then(field_text));
        let size = self
            .size
            .as_ref()
            .and_then(field_text)
            .or_else(|| self.legacy_key_size.as_ref().and_then(field_text));
        KeyRequest::normalize(key_type.as_deref(), size.as_deref())
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
