//! Parser for flat `label: value` responses, the layout used by most gTLD
//! registries and registrars.
//!
//! ```text
//! Domain Name: EXAMPLE.COM
//! Registrar: Example Registrar LLC
//! Name Server: NS1.EXAMPLE.COM
//! Creation Date: 1995-08-14T04:00:00Z
//! Registrant Organization: Example Inc.
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{DateField, RecordParser};
use crate::contact::ContactField;
use crate::date::parse_iso8601;
use crate::record::{ContactRole, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlatField {
    Domain,
    NameServer,
    Registrar,
    Date(DateField),
}

static FLAT_LABELS: Lazy<HashMap<&'static str, FlatField>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("domain name", FlatField::Domain);
    m.insert("name server", FlatField::NameServer);
    m.insert("registrar", FlatField::Registrar);
    m.insert("sponsoring registrar", FlatField::Registrar);
    m.insert("creation date", FlatField::Date(DateField::Created));
    m.insert("updated date", FlatField::Date(DateField::Updated));
    m.insert("expiration date", FlatField::Date(DateField::Expires));
    m.insert("registry expiry date", FlatField::Date(DateField::Expires));

    m
});

#[derive(Debug, Clone, Default)]
pub struct FlatParser;

impl FlatParser {
    pub fn new() -> Self {
        Self
    }

    fn apply(record: &mut Record, label: &str, value: &str) {
        if let Some(field) = FLAT_LABELS.get(label) {
            match *field {
                FlatField::Domain => record.domain = Some(value.to_string()),
                FlatField::NameServer => record.name_servers.push(value.to_string()),
                FlatField::Registrar => record.registrar = Some(value.to_string()),
                FlatField::Date(date) => date.store(record, parse_iso8601(value)),
            }
            return;
        }

        // "registrant email", "admin postal code", "tech phone", ...
        let Some((prefix, suffix)) = label.split_once(' ') else {
            return;
        };
        if let (Some(role), Some(field)) =
            (ContactRole::from_prefix(prefix), ContactField::from_label(suffix))
        {
            field.set(record.contacts.get_mut(role), value.to_string());
        }
    }
}

impl RecordParser for FlatParser {
    fn parse(&self, raw: &str) -> Record {
        let mut record = Record::new(raw);

        for line in raw.lines() {
            // Only the first colon separates; values may hold times or URLs
            let Some((label, value)) = line.split_once(':') else {
                continue;
            };
            let label = label.trim().to_lowercase();
            let value = value.trim();
            if label.is_empty() || value.is_empty() {
                continue;
            }
            Self::apply(&mut record, &label, value);
        }

        record.normalize()
    }
}
