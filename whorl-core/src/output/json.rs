use serde_json::Value;

use super::{to_json, OutputFormatter};
use crate::record::Record;

pub struct JsonFormatter {
    pretty: bool,
    include_raw: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            pretty: true,
            include_raw: false,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn with_raw(mut self, include_raw: bool) -> Self {
        self.include_raw = include_raw;
        self
    }

    fn render(&self, value: &Value) -> String {
        to_json(value, self.pretty).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_record(&self, record: &Record) -> String {
        let mut value = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(e) => return format!("{{\"error\": \"{}\"}}", e),
        };
        if !self.include_raw {
            if let Some(fields) = value.as_object_mut() {
                fields.remove("raw_text");
            }
        }
        self.render(&value)
    }
}
