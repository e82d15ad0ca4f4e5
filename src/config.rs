// src/config.rs

use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.xe.gr";

pub const DEFAULT_SEED_URL: &str =
    "https://www.xe.gr/property/r/enoikiaseis-katoikion/ChIJ8UNwBh-9oRQR3Y1mdkU1Nic_athhna";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Greek first, English second. The origin serves localized labels and
/// listing text according to this preference, so changing it changes
/// what the extractor sees.
const ACCEPT_LANGUAGE: &str = "el-GR,el;q=0.9,en-US;q=0.8,en;q=0.7";

/// Immutable settings handed to the fetcher and orchestrator at
/// construction. Nothing in the crate reads these from global state.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: Url,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub keep_alive: bool,
    pub timeout: Duration,
    /// Wait observed before every page fetch after the first.
    pub pacing_delay: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            user_agent: USER_AGENT.to_string(),
            accept: ACCEPT.to_string(),
            accept_language: ACCEPT_LANGUAGE.to_string(),
            keep_alive: true,
            timeout: Duration::from_secs(30),
            pacing_delay: Duration::from_secs(2),
        }
    }
}

impl ScraperConfig {
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.accept_language = accept_language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    /// Resolves `url` against the base URL. Absolute URLs pass through.
    pub fn resolve(&self, url: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(url)
    }
}
