//! Structured data from unstructured WHOIS responses.
//!
//! Two grammars cover the formats registries use in practice: flat
//! `label: value` lines ([`Grammar::Flat`]) and indentation-delimited
//! outlines ([`Grammar::Indented`]). Both produce the same [`Record`].
//!
//! ```
//! use whorl_core::Grammar;
//!
//! let record = Grammar::Flat.parse("Domain Name: EXAMPLE.COM\nName Server: NS1.EXAMPLE.COM\n");
//! assert_eq!(record.domain.as_deref(), Some("EXAMPLE.COM"));
//! assert_eq!(record.name_servers, vec!["ns1.example.com"]);
//! ```

pub mod client;
pub mod contact;
pub mod date;
pub mod error;
pub mod outline;
pub mod output;
pub mod parsers;
pub mod record;
pub mod servers;
pub mod validation;

pub use error::{Result, WhorlError};
pub use validation::normalize_domain;

pub use client::{RawResponse, WhoisClient};
pub use contact::ContactField;
pub use outline::{ContentItem, Outline};
pub use output::{OutputFormat, OutputFormatter};
pub use parsers::{Grammar, RecordParser};
pub use record::{Contact, ContactRole, Contacts, Record};
pub use servers::{get_tld, get_whois_server};
