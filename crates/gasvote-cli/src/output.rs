//! Command output
//!
//! Every command reports through [`Output`]: a text message for humans, or a
//! JSON object carrying `"success": true` next to the command's fields. Gas
//! values are written as decimal strings since they can exceed JSON's safe
//! integer range.

use gasvote_primitives::U256;
use serde_json::{Map, Value};

/// Result of one command, printed as text or JSON
pub struct Output {
    json_mode: bool,
    fields: Map<String, Value>,
    message: Option<String>,
}

impl Output {
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            message: None,
        }
    }

    pub fn field(self, key: &str, value: &str) -> Self {
        self.field_value(key, Value::String(value.to_string()))
    }

    pub fn field_u64(self, key: &str, value: u64) -> Self {
        self.field_value(key, Value::from(value))
    }

    pub fn field_bool(self, key: &str, value: bool) -> Self {
        self.field_value(key, Value::Bool(value))
    }

    /// Gas amount, as a decimal string
    pub fn field_u256(self, key: &str, value: U256) -> Self {
        self.field(key, &value.to_string())
    }

    pub fn field_value(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Human-readable text, shown when not in JSON mode
    pub fn message(mut self, msg: &str) -> Self {
        self.message = Some(msg.to_string());
        self
    }

    fn render(self) -> Option<String> {
        if !self.json_mode {
            return self.message;
        }
        let mut fields = self.fields;
        fields.insert("success".to_string(), Value::Bool(true));
        serde_json::to_string_pretty(&Value::Object(fields)).ok()
    }

    pub fn print(self) {
        if let Some(text) = self.render() {
            println!("{}", text);
        }
    }
}
