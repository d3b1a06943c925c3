use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::error::{Result, WhorlError};
use crate::parsers::Grammar;
use crate::record::Record;
use crate::servers::whois_server_for;
use crate::validation::normalize_domain;

const WHOIS_PORT: u16 = 43;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RESPONSE_SIZE: usize = 1024 * 1024; // 1MB
const MAX_REFERRAL_DEPTH: u8 = 3;

static REFERRAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?im)^\s*Registrar WHOIS Server:\s*(\S+)",
        r"(?im)^\s*Whois Server:\s*(\S+)",
        r"(?im)^\s*ReferralServer:\s*whois://(\S+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid referral regex"))
    .collect()
});

/// The unparsed answer of the last server consulted for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub server: String,
    pub text: String,
}

impl RawResponse {
    /// Parses the response with the grammar its server is known to use.
    pub fn parse(&self) -> Record {
        Grammar::for_server(&self.server).parse(&self.text)
    }
}

#[derive(Debug, Clone)]
pub struct WhoisClient {
    timeout: Duration,
    port: u16,
    max_response_size: usize,
    referral_depth: u8,
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WhoisClient {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            port: WHOIS_PORT,
            max_response_size: MAX_RESPONSE_SIZE,
            referral_depth: MAX_REFERRAL_DEPTH,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_response_size(mut self, bytes: usize) -> Self {
        self.max_response_size = bytes;
        self
    }

    /// Number of referrals to follow; 0 disables referral following.
    pub fn with_referral_depth(mut self, depth: u8) -> Self {
        self.referral_depth = depth;
        self
    }

    /// Looks up `domain` on the server the TLD table names for it.
    #[instrument(skip(self), fields(domain = %domain))]
    pub async fn lookup(&self, domain: &str) -> Result<Record> {
        Ok(self.fetch(domain).await?.parse())
    }

    /// Looks up `domain` on an explicit server.
    #[instrument(skip(self), fields(domain = %domain, server = %server))]
    pub async fn lookup_with_server(&self, domain: &str, server: &str) -> Result<Record> {
        Ok(self.fetch_from(domain, server).await?.parse())
    }

    pub async fn fetch(&self, domain: &str) -> Result<RawResponse> {
        let domain = normalize_domain(domain)?;
        let server = whois_server_for(&domain)?;
        debug!(server = %server, "Selected WHOIS server");
        self.fetch_normalized(&domain, server).await
    }

    pub async fn fetch_from(&self, domain: &str, server: &str) -> Result<RawResponse> {
        let domain = normalize_domain(domain)?;
        self.fetch_normalized(&domain, server).await
    }

    async fn fetch_normalized(&self, domain: &str, server: &str) -> Result<RawResponse> {
        let mut visited = HashSet::new();
        let text = self.query_server(server, domain).await?;
        visited.insert(server.to_lowercase());

        let first = RawResponse {
            server: server.to_string(),
            text,
        };
        Ok(self.follow_referrals(domain, first, 0, &mut visited).await)
    }

    /// Chases referrals from `response`. A failed or looping referral keeps
    /// the last good response instead of failing the lookup.
    fn follow_referrals<'a>(
        &'a self,
        domain: &'a str,
        response: RawResponse,
        depth: u8,
        visited: &'a mut HashSet<String>,
    ) -> Pin<Box<dyn Future<Output = RawResponse> + Send + 'a>> {
        Box::pin(async move {
            if Grammar::for_server(&response.server) != Grammar::Flat {
                return response;
            }
            let Some(referral) = extract_referral(&response.text) else {
                return response;
            };
            if visited.contains(&referral) {
                if referral != response.server.to_lowercase() {
                    warn!(referral = %referral, "Circular WHOIS referral detected");
                }
                return response;
            }
            if depth >= self.referral_depth {
                warn!(depth = depth, referral = %referral, "Max referral depth reached");
                return response;
            }

            debug!(referral = %referral, depth = depth, "Following referral");
            visited.insert(referral.clone());

            match self.query_server(&referral, domain).await {
                Ok(text) => {
                    let next = RawResponse {
                        server: referral,
                        text,
                    };
                    self.follow_referrals(domain, next, depth + 1, visited).await
                }
                Err(e) => {
                    warn!(referral = %referral, error = %e, "Referral query failed");
                    response
                }
            }
        })
    }

    async fn query_server(&self, server: &str, query: &str) -> Result<String> {
        let addr = format!("{}:{}", server, self.port);
        debug!(addr = %addr, "Querying WHOIS server");

        let mut stream = timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| WhorlError::Timeout(format!("Connection to {} timed out", server)))?
            .map_err(|e| WhorlError::Connection(format!("Failed to connect to {}: {}", server, e)))?;

        let query_bytes = format!("{}\r\n", query);
        timeout(self.timeout, stream.write_all(query_bytes.as_bytes()))
            .await
            .map_err(|_| WhorlError::Timeout("Write timed out".to_string()))??;

        let mut response = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            match timeout(self.timeout, stream.read(&mut buf)).await {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => {
                    response.extend_from_slice(&buf[..n]);
                    if response.len() > self.max_response_size {
                        return Err(WhorlError::ResponseTooLarge(self.max_response_size));
                    }
                }
                Ok(Err(e)) => return Err(e.into()),
                // Some servers never close the connection; keep what arrived
                Err(_) if !response.is_empty() => break,
                Err(_) => return Err(WhorlError::Timeout("Read timed out".to_string())),
            }
        }

        Ok(decode(response))
    }
}

/// Decodes UTF-8, falling back to Latin-1 for legacy registries.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}

fn extract_referral(response: &str) -> Option<String> {
    REFERRAL_PATTERNS.iter().find_map(|re| {
        let server = re.captures(response)?.get(1)?.as_str().trim().to_lowercase();
        let server = server.trim_end_matches(['/', '.']).to_string();
        (!server.is_empty() && server.contains('.')).then_some(server)
    })
}
