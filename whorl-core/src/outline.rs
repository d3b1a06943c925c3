//! Parser for indentation-delimited outlines.
//!
//! Some registries answer with a header/content layout instead of flat
//! `label: value` lines:
//!
//! ```text
//! Domain name:
//!     google.co.uk
//!
//! Registrar:
//!     Markmonitor Inc. t/a MarkMonitor Inc. [Tag = MARKMONITOR]
//!     URL: http://www.markmonitor.com
//!
//! Relevant dates:
//!     Registered on: 14-Feb-1999
//!     Expiry date:  14-Feb-2019
//!     Last updated:  13-Jan-2018
//! ```
//!
//! A section is a colon-terminated header followed by lines sharing one
//! indent that is deeper than the header's. The walk stops at the first
//! place where that shape no longer holds, so trailing prose after the
//! structured block is tolerated rather than rejected.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+):$").expect("Invalid outline header regex"));

static KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?):\s+(.*)$").expect("Invalid outline key/value regex"));

/// One content line of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    /// Free text, trimmed.
    Text(String),
    /// A `key: value` line; the key is lowercased.
    Pair(String, String),
}

impl ContentItem {
    fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        match KEY_VALUE.captures(trimmed) {
            Some(caps) => ContentItem::Pair(
                caps[1].trim().to_lowercase(),
                caps[2].trim().to_string(),
            ),
            None => ContentItem::Text(trimmed.to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentItem::Text(text) => Some(text),
            ContentItem::Pair(..) => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&str, &str)> {
        match self {
            ContentItem::Text(_) => None,
            ContentItem::Pair(key, value) => Some((key, value)),
        }
    }
}

/// A header (lowercased, without its colon) and its content lines in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub header: String,
    pub items: Vec<ContentItem>,
}

/// Sections keyed by header. A repeated header keeps its last occurrence.
pub type Outline = HashMap<String, Vec<ContentItem>>;

/// Parses `lines` into an [`Outline`].
pub fn parse<'a, I>(lines: I) -> Outline
where
    I: IntoIterator<Item = &'a str>,
{
    sections(lines)
        .into_iter()
        .map(|section| (section.header, section.items))
        .collect()
}

/// Parses `lines` into sections, in document order.
pub fn sections<'a, I>(lines: I) -> Vec<Section>
where
    I: IntoIterator<Item = &'a str>,
{
    let lines: Vec<&str> = lines.into_iter().collect();
    let mut rest = lines.as_slice();
    let mut result = Vec::new();

    while let Some((section, remaining)) = next_section(rest) {
        result.push(section);
        rest = remaining;
    }

    result
}

/// Extracts the first section of `lines`, or `None` once the input stops
/// looking like an outline.
fn next_section<'a, 'b>(lines: &'b [&'a str]) -> Option<(Section, &'b [&'a str])> {
    let start = lines.iter().position(|line| !is_blank(line))?;
    let lines = &lines[start..];

    let header_line = lines[0];
    let header = parse_header(header_line)?;
    let header_indent = indent_of(header_line);

    let first_content = lines.get(1).filter(|line| !is_blank(line))?;
    let content_indent = indent_of(first_content);
    if content_indent <= header_indent {
        return None;
    }

    let count = lines[1..]
        .iter()
        .take_while(|line| !is_blank(line) && indent_of(line) == content_indent)
        .count();

    let items = lines[1..=count]
        .iter()
        .map(|line| ContentItem::classify(line))
        .collect();

    Some((Section { header, items }, &lines[count + 1..]))
}

fn parse_header(line: &str) -> Option<String> {
    let caps = HEADER.captures(line.trim())?;
    let header = caps[1].trim().to_lowercase();
    if header.is_empty() {
        None
    } else {
        Some(header)
    }
}

fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOMINET_SAMPLE: &str = "
    Domain name:
        google.co.uk

    Data validation:
        Nominet was able to match the registrant's name and address against a 3rd party data source on 10-Dec-2012

    Registrar:
        Markmonitor Inc. t/a MarkMonitor Inc. [Tag = MARKMONITOR]
        URL: http://www.markmonitor.com

    Relevant dates:
        Registered on: 14-Feb-1999
        Expiry date:  14-Feb-2019
        Last updated:  13-Jan-2018

    Registration status:
        Registered until expiry date.

    Name servers:
        ns1.google.com
        ns2.google.com

    WHOIS lookup made at 13:45:37 10-Feb-2018

--
This WHOIS information is provided for free by Nominet UK the central registry
";

    fn pair(key: &str, value: &str) -> ContentItem {
        ContentItem::Pair(key.to_string(), value.to_string())
    }

    fn text(value: &str) -> ContentItem {
        ContentItem::Text(value.to_string())
    }

    #[test]
    fn test_canonical_fixture() {
        let input = "Domain name:\n    google.co.uk\n\nRegistrar:\n    Markmonitor Inc.\n\nRelevant dates:\n    Registered on: 14-Feb-1999\n    Expiry date:  14-Feb-2019\n    Last updated:  13-Jan-2018\n";
        let outline = parse(input.lines());

        let mut headers: Vec<_> = outline.keys().map(String::as_str).collect();
        headers.sort_unstable();
        assert_eq!(headers, vec!["domain name", "registrar", "relevant dates"]);

        assert_eq!(outline["domain name"], vec![text("google.co.uk")]);
        assert_eq!(
            outline["relevant dates"],
            vec![
                pair("registered on", "14-Feb-1999"),
                pair("expiry date", "14-Feb-2019"),
                pair("last updated", "13-Jan-2018"),
            ]
        );
    }

    #[test]
    fn test_trailing_prose_ends_the_walk() {
        let sections = sections(NOMINET_SAMPLE.lines());
        let headers: Vec<_> = sections.iter().map(|s| s.header.as_str()).collect();

        assert_eq!(
            headers,
            vec![
                "domain name",
                "data validation",
                "registrar",
                "relevant dates",
                "registration status",
                "name servers",
            ]
        );
    }

    #[test]
    fn test_key_value_split_is_non_greedy() {
        let outline = parse(NOMINET_SAMPLE.lines());
        assert_eq!(
            outline["registrar"],
            vec![
                text("Markmonitor Inc. t/a MarkMonitor Inc. [Tag = MARKMONITOR]"),
                pair("url", "http://www.markmonitor.com"),
            ]
        );
    }

    #[test]
    fn test_header_without_deeper_content_is_end_of_input() {
        let input = "Domain name:\nexample.co.uk\n";
        assert!(parse(input.lines()).is_empty());

        let input = "Registrar:\n    Foo\nTrailer:\n";
        let outline = parse(input.lines());
        assert_eq!(outline.len(), 1);
        assert!(outline.contains_key("registrar"));
    }

    #[test]
    fn test_non_header_first_line_is_end_of_input() {
        assert!(parse("% comment banner\nDomain name:\n    x.uk\n".lines()).is_empty());
        assert!(parse("".lines()).is_empty());
        assert!(parse("\n\n   \n".lines()).is_empty());
    }

    #[test]
    fn test_first_content_indent_is_authoritative() {
        let input = "Name servers:\n    ns1.example.uk\n      ns2.example.uk\n    ns3.example.uk\n";
        let sections = sections(input.lines());

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].items, vec![text("ns1.example.uk")]);
    }

    #[test]
    fn test_repeated_header_keeps_last() {
        let input = "Registrar:\n  First\n\nRegistrar:\n  Second\n";
        let outline = parse(input.lines());
        assert_eq!(outline["registrar"], vec![text("Second")]);
    }

    #[test]
    fn test_item_accessors() {
        assert_eq!(text("a").as_text(), Some("a"));
        assert_eq!(text("a").as_pair(), None);
        assert_eq!(pair("k", "v").as_pair(), Some(("k", "v")));
    }
}
