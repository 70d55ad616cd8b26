use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use crate::error::GenolensError;

/// An HTTP client capped to an allowlist of approved hosts.
///
/// Every data source Genolens talks to is a public scientific API with a
/// stable hostname; anything outside that set is refused before a request
/// is built. Localhost is allowed so tests can stand in for the remotes.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new client with the default allowlist of data-source domains.
    pub fn new() -> Result<Self, GenolensError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "firebrowse.org", // TCGA Firebrowse mRNASeq
            "rest.kegg.jp",   // KEGG REST
            "api.tavily.com", // Tavily web search
            "localhost",      // Test servers
            "127.0.0.1",      // Test servers alt
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GenolensError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or a subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Exposes the inner `reqwest::Client` builder pattern for GET requests.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, GenolensError> {
        if !self.is_allowed(url) {
            return Err(GenolensError::Security(format!(
                "Host not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }

    /// Exposes the inner `reqwest::Client` builder pattern for POST requests.
    pub fn post(&self, url: &str) -> Result<reqwest::RequestBuilder, GenolensError> {
        if !self.is_allowed(url) {
            return Err(GenolensError::Security(format!(
                "Host not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.post(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allowlist_covers_data_sources() {
        let client = SandboxClient::new().unwrap();
        assert!(client.is_allowed("http://firebrowse.org/api/v1/Samples/mRNASeq"));
        assert!(client.is_allowed("https://rest.kegg.jp/info/pathway"));
        assert!(client.is_allowed("https://api.tavily.com/search"));
        assert!(client.is_allowed("http://127.0.0.1:8080/page"));
    }

    #[test]
    fn test_unlisted_host_is_refused() {
        let client = SandboxClient::new().unwrap();
        assert!(!client.is_allowed("https://example.com/"));
        let err = client.get("https://example.com/").err().unwrap();
        assert!(matches!(err, GenolensError::Security(_)));
    }

    #[test]
    fn test_allow_domain_extends_allowlist() {
        let mut client = SandboxClient::new().unwrap();
        assert!(!client.is_allowed("https://api.gdc.cancer.gov/projects"));
        client.allow_domain("api.gdc.cancer.gov");
        assert!(client.is_allowed("https://api.gdc.cancer.gov/projects"));
    }
}
