// fetcher.rs
use crate::config::ScraperConfig;
use crate::scraper::{FetchFailure, ScraperError};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};

/// Anything that can turn a URL into page markup.
///
/// One call, one attempt: implementations must not retry. The
/// orchestrator owns the policy of what a failure means.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String, FetchFailure>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP fetcher carrying the fixed header set from [`ScraperConfig`].
pub struct HttpFetcher {
    client: Client,
    config: ScraperConfig,
}

impl HttpFetcher {
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.accept_language)?);
        if config.keep_alive {
            headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ScraperError> {
    HeaderValue::from_str(value)
        .map_err(|e| ScraperError::Network(format!("invalid header value {value:?}: {e}")))
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        let target = self
            .config
            .resolve(url)
            .map_err(|e| FetchFailure::Transport(format!("invalid url {url}: {e}")))?;

        tracing::info!("Attempting to fetch: {target}");

        let resp = self
            .client
            .get(target.as_str())
            .send()
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = resp.status();
        tracing::debug!("Response status code: {status}");

        if !status.is_success() {
            tracing::warn!("Received status code {status} for {target}");
            return Err(FetchFailure::Status(status.as_u16()));
        }

        resp.text()
            .map_err(|e| FetchFailure::Transport(e.to_string()))
    }
}
