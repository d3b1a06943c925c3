//! The canonical registration record produced by every grammar.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::Timestamp;

/// Contact details for one registration role. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: Option<String>,
    pub organization: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        *self == Contact::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactRole {
    Registrant,
    Administrator,
    Technical,
}

impl ContactRole {
    pub const ALL: [ContactRole; 3] = [
        ContactRole::Registrant,
        ContactRole::Administrator,
        ContactRole::Technical,
    ];

    /// Maps a flat-style label prefix (`registrant `, `admin `, `tech `)
    /// to its role.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "registrant" => Some(ContactRole::Registrant),
            "admin" => Some(ContactRole::Administrator),
            "tech" => Some(ContactRole::Technical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactRole::Registrant => "registrant",
            ContactRole::Administrator => "administrator",
            ContactRole::Technical => "technical",
        }
    }
}

/// The three contact slots of a record. All three always exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    pub registrant: Contact,
    pub administrator: Contact,
    pub technical: Contact,
}

impl Contacts {
    pub fn get(&self, role: ContactRole) -> &Contact {
        match role {
            ContactRole::Registrant => &self.registrant,
            ContactRole::Administrator => &self.administrator,
            ContactRole::Technical => &self.technical,
        }
    }

    pub fn get_mut(&mut self, role: ContactRole) -> &mut Contact {
        match role {
            ContactRole::Registrant => &mut self.registrant,
            ContactRole::Administrator => &mut self.administrator,
            ContactRole::Technical => &mut self.technical,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactRole, &Contact)> {
        ContactRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

/// Structured data extracted from a single WHOIS response.
///
/// `raw_text` keeps the untouched response for auditing. It is left out of
/// the `Debug` and `Display` renderings, which only summarize.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub domain: Option<String>,
    pub raw_text: String,
    pub name_servers: Vec<String>,
    pub registrar: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub contacts: Contacts,
}

impl Record {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }

    /// Lowercases the name servers and drops duplicates, keeping the first
    /// occurrence of each. Running it twice changes nothing.
    pub fn normalize(mut self) -> Self {
        let mut seen = HashSet::new();
        self.name_servers = std::mem::take(&mut self.name_servers)
            .into_iter()
            .map(|ns| ns.trim().to_lowercase())
            .filter(|ns| !ns.is_empty() && seen.insert(ns.clone()))
            .collect();
        self
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("domain", &self.domain)
            .field("name_servers", &self.name_servers)
            .field("registrar", &self.registrar)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("expires_at", &self.expires_at)
            .field("contacts", &self.contacts)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.domain.as_deref().unwrap_or("<unknown domain>"))?;
        if let Some(ref registrar) = self.registrar {
            write!(f, " via {}", registrar)?;
        }
        if let Some(expires) = self.expires_at {
            write!(f, ", expires {}", expires.format("%Y-%m-%d"))?;
        }
        if !self.name_servers.is_empty() {
            write!(f, " [{}]", self.name_servers.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_all_contact_slots() {
        let record = Record::new("raw");
        let roles: Vec<_> = record.contacts.iter().map(|(role, _)| role).collect();
        assert_eq!(roles, ContactRole::ALL.to_vec());
        assert!(record.contacts.iter().all(|(_, c)| c.is_empty()));
    }

    #[test]
    fn test_normalize_lowercases_and_dedups() {
        let mut record = Record::new("");
        record.name_servers = vec![
            "NS1.EXAMPLE.COM".to_string(),
            "ns2.example.com".to_string(),
            "ns1.example.com".to_string(),
            "Ns2.Example.Com".to_string(),
        ];

        let record = record.normalize();
        assert_eq!(record.name_servers, vec!["ns1.example.com", "ns2.example.com"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut record = Record::new("");
        record.name_servers = vec!["B.NS".to_string(), "a.ns".to_string(), "b.ns".to_string()];

        let once = record.normalize();
        let twice = once.clone().normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_debug_omits_raw_text() {
        let mut record = Record::new("secret raw body");
        record.domain = Some("example.com".to_string());

        let debug = format!("{:?}", record);
        assert!(debug.contains("example.com"));
        assert!(!debug.contains("secret raw body"));
        assert!(!format!("{}", record).contains("secret raw body"));
    }

    #[test]
    fn test_contacts_get_mut_targets_role() {
        let mut contacts = Contacts::default();
        contacts.get_mut(ContactRole::Technical).name = Some("Ops".to_string());

        assert_eq!(contacts.technical.name.as_deref(), Some("Ops"));
        assert!(contacts.registrant.is_empty());
        assert!(contacts.administrator.is_empty());
    }

    #[test]
    fn test_role_prefixes() {
        assert_eq!(ContactRole::from_prefix("admin"), Some(ContactRole::Administrator));
        assert_eq!(ContactRole::from_prefix("billing"), None);
    }
}
