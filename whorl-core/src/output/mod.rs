mod human;
mod json;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" | "pretty" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

pub trait OutputFormatter {
    fn format_record(&self, record: &Record) -> String;
}

/// Builds a formatter. `include_raw` only affects JSON; the human summary
/// never shows the raw response.
pub fn get_formatter(format: OutputFormat, include_raw: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new().with_raw(include_raw)),
    }
}

/// Renders any serializable value as JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WhorlError;
    use crate::outline;

    #[test]
    fn test_to_json_renders_outline_sections() {
        let sections = outline::sections("Relevant dates:\n    Registered on: 14-Feb-1999\n    Renewal pending\n".lines());
        let json = to_json(&sections, false).unwrap();

        assert_eq!(
            json,
            r#"[{"header":"relevant dates","items":[["registered on","14-Feb-1999"],"Renewal pending"]}]"#
        );
    }

    #[test]
    fn test_to_json_reports_serialization_errors() {
        let mut bad = std::collections::HashMap::new();
        bad.insert((1u8, 2u8), "tuple keys are not JSON object keys");

        let err = to_json(&bad, true).unwrap_err();
        assert!(matches!(err, WhorlError::Json(_)));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
