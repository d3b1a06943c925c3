//! Record grammars for WHOIS responses.
//!
//! Registries format their answers in one of two ways: flat `label: value`
//! lines, or an indented outline of headers and nested values. Both grammars
//! fold a response into the same [`Record`] and finish with
//! [`Record::normalize`]. Neither ever fails; unrecognized content is
//! dropped and the worst case is a sparsely populated record.

mod flat;
mod indented;

use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::date::Timestamp;
use crate::record::Record;
pub use flat::FlatParser;
pub use indented::IndentedParser;

/// A grammar that turns a raw response into a [`Record`].
pub trait RecordParser: Send + Sync {
    fn parse(&self, raw: &str) -> Record;
}

/// Which grammar a response is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    /// `label: value` lines.
    #[default]
    Flat,
    /// Header/content outline delimited by indentation.
    Indented,
}

/// Services known to answer in the indented outline grammar.
static INDENTED_SERVERS: Lazy<HashMap<&'static str, Grammar>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("whois.nic.uk", Grammar::Indented);

    m
});

impl Grammar {
    /// Picks the grammar used by the given lookup service.
    pub fn for_server(server: &str) -> Self {
        INDENTED_SERVERS
            .get(server.trim().to_lowercase().as_str())
            .copied()
            .unwrap_or_default()
    }

    pub fn parser(self) -> &'static dyn RecordParser {
        match self {
            Grammar::Flat => &FlatParser,
            Grammar::Indented => &IndentedParser,
        }
    }

    pub fn parse(self, raw: &str) -> Record {
        self.parser().parse(raw)
    }
}

impl FromStr for Grammar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(Grammar::Flat),
            "indented" | "outline" => Ok(Grammar::Indented),
            _ => Err(format!("Unknown grammar: {}", s)),
        }
    }
}

/// The three timestamps a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateField {
    Created,
    Updated,
    Expires,
}

impl DateField {
    /// Stores `parsed` unless it is `None`, so a failed parse never erases
    /// an earlier successful one.
    fn store(self, record: &mut Record, parsed: Option<Timestamp>) {
        let Some(value) = parsed else {
            return;
        };
        let slot = match self {
            DateField::Created => &mut record.created_at,
            DateField::Updated => &mut record.updated_at,
            DateField::Expires => &mut record.expires_at,
        };
        *slot = Some(value);
    }
}
