//! Parser for outline-style responses (Nominet and similar registries).
//!
//! The response is first structured by [`crate::outline`]; known section
//! headers are then folded into the record.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{DateField, RecordParser};
use crate::date::parse_day_month_year;
use crate::outline::{self, ContentItem};
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutlineSection {
    Domain,
    NameServers,
    Registrar,
    RelevantDates,
}

static SECTIONS: Lazy<HashMap<&'static str, OutlineSection>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("domain name", OutlineSection::Domain);
    m.insert("name servers", OutlineSection::NameServers);
    m.insert("registrar", OutlineSection::Registrar);
    m.insert("relevant dates", OutlineSection::RelevantDates);

    m
});

/// Keys found under the "relevant dates" header.
static RELEVANT_DATES: Lazy<HashMap<&'static str, DateField>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("registered on", DateField::Created);
    m.insert("expiry date", DateField::Expires);
    m.insert("last updated", DateField::Updated);

    m
});

/// Leading dotted host name of a name server line; glue addresses that
/// follow are discarded and prose lines without a dotted host never match.
static NAME_SERVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)+)").expect("Invalid name server regex")
});

#[derive(Debug, Clone, Default)]
pub struct IndentedParser;

impl IndentedParser {
    pub fn new() -> Self {
        Self
    }

    fn first_text(items: &[ContentItem]) -> Option<String> {
        items.iter().find_map(ContentItem::as_text).map(str::to_string)
    }

    fn apply(record: &mut Record, section: OutlineSection, items: &[ContentItem]) {
        match section {
            OutlineSection::Domain => {
                if let Some(domain) = Self::first_text(items) {
                    record.domain = Some(domain);
                }
            }
            OutlineSection::Registrar => {
                if let Some(registrar) = Self::first_text(items) {
                    record.registrar = Some(registrar);
                }
            }
            OutlineSection::NameServers => {
                let hosts = items
                    .iter()
                    .filter_map(ContentItem::as_text)
                    .filter_map(|line| NAME_SERVER.captures(line))
                    .map(|caps| caps[1].to_string());
                record.name_servers.extend(hosts);
            }
            OutlineSection::RelevantDates => {
                for (key, value) in items.iter().filter_map(ContentItem::as_pair) {
                    if let Some(field) = RELEVANT_DATES.get(key) {
                        field.store(record, parse_day_month_year(value));
                    }
                }
            }
        }
    }
}

impl RecordParser for IndentedParser {
    fn parse(&self, raw: &str) -> Record {
        let mut record = Record::new(raw);

        for (header, items) in outline::parse(raw.lines()) {
            if let Some(section) = SECTIONS.get(header.as_str()) {
                Self::apply(&mut record, *section, &items);
            }
        }

        record.normalize()
    }
}
