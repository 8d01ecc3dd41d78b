use super::types::{ApiGraphResponse, parse_graph_response};
use crate::error::FetchError;
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable overriding the API origin.
pub const API_URL_ENV: &str = "PREFILL_API_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_NAMESPACE: &str = "test-namespace";
const DEFAULT_BLUEPRINT_ID: &str = "test-blueprint";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to fetch the blueprint graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub namespace: String,
    pub blueprint_id: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            blueprint_id: DEFAULT_BLUEPRINT_ID.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Default configuration with the origin taken from `PREFILL_API_URL` when set.
    pub fn from_env() -> Self {
        Self::default().with_url_override(std::env::var(API_URL_ENV).ok().as_deref())
    }

    /// Blank overrides keep the current origin.
    fn with_url_override(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.base_url = url.to_string();
        }
        self
    }

    /// Full URL of the graph endpoint.
    pub fn graph_url(&self) -> String {
        format!(
            "{}/api/v1/{}/actions/blueprints/{}/graph",
            self.base_url.trim_end_matches('/'),
            self.namespace,
            self.blueprint_id
        )
    }
}

/// HTTP client for the blueprint graph endpoint.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    config: ClientConfig,
}

pub struct GraphClientBuilder {
    config: ClientConfig,
}

impl GraphClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.to_string();
        self
    }
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.config.namespace = namespace.to_string();
        self
    }
    pub fn blueprint(mut self, blueprint_id: &str) -> Self {
        self.config.blueprint_id = blueprint_id.to_string();
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }
    pub fn build(self) -> Result<GraphClient, FetchError> {
        if self.config.base_url.trim().is_empty() {
            return Err(FetchError::InvalidConfig("base URL is empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| FetchError::InvalidConfig(e.to_string()))?;
        Ok(GraphClient {
            http,
            config: self.config,
        })
    }
}

impl GraphClient {
    pub fn builder() -> GraphClientBuilder {
        GraphClientBuilder::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches and decodes the graph. Non-2xx responses and malformed bodies are errors.
    pub async fn fetch_graph(&self) -> Result<ApiGraphResponse, FetchError> {
        let url = self.config.graph_url();
        info!(%url, "fetching form graph");

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(%url, error = %e, "graph request failed");
            FetchError::Request(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "graph request returned an error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let graph = parse_graph_response(&body)?;
        info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            forms = graph.forms.len(),
            "form graph fetched"
        );
        Ok(graph)
    }
}
