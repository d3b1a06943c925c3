use colored::Colorize;

use super::OutputFormatter;
use crate::record::{Contact, Record};

pub struct HumanFormatter {
    use_colors: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn label(&self, text: &str) -> String {
        if self.use_colors {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn value(&self, text: &str) -> String {
        if self.use_colors {
            text.white().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.use_colors {
            text.yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.use_colors {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, text: &str) -> String {
        if self.use_colors {
            format!("\n{}\n{}", text.magenta().bold(), "─".repeat(text.len()).dimmed())
        } else {
            format!("\n{}\n{}", text, "-".repeat(text.len()))
        }
    }

    fn contact_lines(&self, contact: &Contact) -> Vec<String> {
        let fields = [
            ("Name", &contact.name),
            ("Organization", &contact.organization),
            ("Street", &contact.street),
            ("City", &contact.city),
            ("State", &contact.state),
            ("Postal Code", &contact.zip),
            ("Country", &contact.country),
            ("Phone", &contact.phone),
            ("Fax", &contact.fax),
            ("Email", &contact.email),
        ];

        fields
            .iter()
            .filter_map(|(name, value)| {
                value
                    .as_deref()
                    .map(|v| format!("    {}: {}", self.label(name), self.value(v)))
            })
            .collect()
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_record(&self, record: &Record) -> String {
        let mut output = Vec::new();

        let domain = record.domain.as_deref().unwrap_or("unknown domain");
        output.push(self.header(&format!("WHOIS: {}", domain)));

        if let Some(ref registrar) = record.registrar {
            output.push(format!(
                "  {}: {}",
                self.label("Registrar"),
                self.value(registrar)
            ));
        }

        if let Some(created) = record.created_at {
            output.push(format!(
                "  {}: {}",
                self.label("Created"),
                self.value(&created.format("%Y-%m-%d").to_string())
            ));
        }

        if let Some(expires) = record.expires_at {
            let days_until = (expires - chrono::Utc::now()).num_days();
            let expiry_str = expires.format("%Y-%m-%d").to_string();
            let status = if days_until < 0 {
                self.error(&format!("{} (expired)", expiry_str))
            } else if days_until < 30 {
                self.error(&format!("{} (expires in {} days!)", expiry_str, days_until))
            } else if days_until < 90 {
                self.warning(&format!("{} ({} days)", expiry_str, days_until))
            } else {
                self.value(&format!("{} ({} days)", expiry_str, days_until))
            };
            output.push(format!("  {}: {}", self.label("Expires"), status));
        }

        if let Some(updated) = record.updated_at {
            output.push(format!(
                "  {}: {}",
                self.label("Updated"),
                self.value(&updated.format("%Y-%m-%d").to_string())
            ));
        }

        if !record.name_servers.is_empty() {
            output.push(format!("  {}:", self.label("Nameservers")));
            for ns in &record.name_servers {
                output.push(format!("    - {}", self.value(ns)));
            }
        }

        for (role, contact) in record.contacts.iter() {
            if contact.is_empty() {
                continue;
            }
            output.push(format!("  {}:", self.label(&capitalize(role.as_str()))));
            output.extend(self.contact_lines(contact));
        }

        output.join("\n")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::Grammar;

    const SAMPLE: &str = "Domain Name: EXAMPLE.COM\n\
Registrar: Example Registrar LLC\n\
Creation Date: 1995-08-14T04:00:00Z\n\
Registry Expiry Date: 2001-08-13T04:00:00Z\n\
Name Server: NS1.EXAMPLE.COM\n\
Tech Email: tech@example.com\n\
Comment: only in the raw text\n";

    #[test]
    fn test_format_record_plain() {
        let record = Grammar::Flat.parse(SAMPLE);
        let text = HumanFormatter::new().without_colors().format_record(&record);

        assert!(text.contains("WHOIS: EXAMPLE.COM"));
        assert!(text.contains("Registrar: Example Registrar LLC"));
        assert!(text.contains("Created: 1995-08-14"));
        assert!(text.contains("Expires: 2001-08-13 (expired)"));
        assert!(text.contains("    - ns1.example.com"));
        assert!(text.contains("  Technical:"));
        assert!(text.contains("    Email: tech@example.com"));
        assert!(!text.contains("Registrant:"));
        assert!(!text.contains("only in the raw text"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("registrant"), "Registrant");
        assert_eq!(capitalize(""), "");
    }
}
