//! Tavily web-search API client.
//!
//! Endpoint: POST https://api.tavily.com/search
//!
//! A thin wrapper pinning the request options the agent relies on: five
//! results, general topic, and a synthesized answer included.

use genolens_common::sandbox::SandboxClient as Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub const TAVILY_API_URL: &str = "https://api.tavily.com/search";

const MAX_RESULTS: usize = 5;
const TOPIC: &str = "general";

#[derive(Serialize)]
struct TavilySearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    topic: &'a str,
    include_answer: bool,
}

/// One search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct TavilyResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

/// Full search response.
#[derive(Debug, Clone, Deserialize)]
pub struct TavilySearchResponse {
    pub query: String,
    /// Synthesized answer, present because the request asks for one.
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<TavilyResult>,
}

pub struct TavilyClient {
    client: Client,
    api_key: String,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new().unwrap(),
            api_key: api_key.into(),
        }
    }

    /// Run one web search.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> anyhow::Result<TavilySearchResponse> {
        let request = TavilySearchRequest {
            api_key: &self.api_key,
            query,
            max_results: MAX_RESULTS,
            topic: TOPIC,
            include_answer: true,
        };

        let resp = self
            .client
            .post(TAVILY_API_URL)?
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            anyhow::bail!("Tavily search failed: HTTP {}", resp.status());
        }

        let parsed: TavilySearchResponse = resp.json().await?;
        debug!(results = parsed.results.len(), "Tavily search returned");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "query": "KRAS G12D inhibitors",
            "answer": "Several small-molecule KRAS G12D inhibitors are in trials.",
            "results": [
                {
                    "title": "MRTX1133 preclinical profile",
                    "url": "https://example.org/mrtx1133",
                    "content": "MRTX1133 is a noncovalent KRAS G12D inhibitor...",
                    "score": 0.97
                },
                {
                    "title": "KRAS targeting review",
                    "url": "https://example.org/review"
                }
            ]
        }"#;

        let parsed: TavilySearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.query, "KRAS G12D inhibitors");
        assert!(parsed.answer.unwrap().contains("G12D"));
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].title, "MRTX1133 preclinical profile");
        assert!((parsed.results[0].score - 0.97).abs() < 1e-12);
        // Missing optional fields fall back to defaults
        assert_eq!(parsed.results[1].content, "");
        assert_eq!(parsed.results[1].score, 0.0);
    }

    #[test]
    fn test_request_serialization_pins_options() {
        let request = TavilySearchRequest {
            api_key: "tvly-test",
            query: "pancreatic cancer biomarkers",
            max_results: MAX_RESULTS,
            topic: TOPIC,
            include_answer: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["max_results"], 5);
        assert_eq!(value["topic"], "general");
        assert_eq!(value["include_answer"], true);
    }
}
