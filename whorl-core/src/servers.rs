//! TLD to WHOIS server lookup.
//!
//! The table ships as `data/servers.csv` (`tld,server` per line, `#` for
//! comments) and is parsed once on first use. Lookups only ever consider the
//! final label of a domain, so multi-label suffixes such as `co.uk` resolve
//! through their last label.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{Result, WhorlError};

const SERVERS_CSV: &str = include_str!("../data/servers.csv");

pub static WHOIS_SERVERS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| parse_server_table(SERVERS_CSV));

fn parse_server_table(content: &'static str) -> HashMap<&'static str, &'static str> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(','))
        .map(|(tld, server)| (tld.trim(), server.trim()))
        .filter(|(tld, server)| !tld.is_empty() && !server.is_empty())
        .collect()
}

/// Returns the final dot-separated label of `domain`.
pub fn get_tld(domain: &str) -> Option<&str> {
    domain
        .trim()
        .trim_end_matches('.')
        .rsplit('.')
        .next()
        .filter(|tld| !tld.is_empty())
}

/// Returns the WHOIS server responsible for `domain`, if the table has one.
pub fn get_whois_server(domain: &str) -> Option<&'static str> {
    let tld = get_tld(domain)?.to_lowercase();
    WHOIS_SERVERS.get(tld.as_str()).copied()
}

/// Like [`get_whois_server`], but reports a missing entry as an error.
pub fn whois_server_for(domain: &str) -> Result<&'static str> {
    let tld = get_tld(domain).ok_or_else(|| WhorlError::InvalidDomain(domain.to_string()))?;
    get_whois_server(domain).ok_or_else(|| WhorlError::ServerNotFound(tld.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_tld() {
        assert_eq!(get_tld("example.com"), Some("com"));
        assert_eq!(get_tld("example.co.uk"), Some("uk"));
        assert_eq!(get_tld("example.com."), Some("com"));
        assert_eq!(get_tld("localhost"), Some("localhost"));
        assert_eq!(get_tld(""), None);
    }

    #[test]
    fn test_get_whois_server() {
        assert_eq!(get_whois_server("example.com"), Some("whois.verisign-grs.com"));
        assert_eq!(get_whois_server("EXAMPLE.ORG"), Some("whois.pir.org"));
        assert_eq!(get_whois_server("example.co.uk"), Some("whois.nic.uk"));
        assert_eq!(get_whois_server("example.de"), Some("whois.denic.de"));
        assert_eq!(get_whois_server("example.invalidtld"), None);
    }

    #[test]
    fn test_whois_server_for_errors() {
        assert!(matches!(
            whois_server_for("example.invalidtld"),
            Err(WhorlError::ServerNotFound(tld)) if tld == "invalidtld"
        ));
        assert!(matches!(
            whois_server_for(""),
            Err(WhorlError::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_parse_server_table() {
        let table = parse_server_table("# comment\n\ncom, whois.example\nbroken\nnet,\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("com"), Some(&"whois.example"));
    }

    #[test]
    fn test_multi_label_entries_are_unreachable() {
        let table = parse_server_table("co.uk,whois.sld.example\n");
        assert!(table.contains_key("co.uk"));
        assert_eq!(get_tld("example.co.uk"), Some("uk"));
    }

    #[test]
    fn test_packaged_table_has_no_blank_entries() {
        assert!(WHOIS_SERVERS.len() > 100);
        assert!(WHOIS_SERVERS
            .iter()
            .all(|(tld, server)| !tld.is_empty() && server.contains('.')));
    }
}
