//! Client configuration shared by every fetcher
//!
//! Defaults reproduce the fixed constants of a plain run: public endpoints,
//! a one second pause before each per-item request and no NCBI credentials.

use std::time::Duration;

/// NCBI E-utilities base URL
pub const DEFAULT_EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// UniProt REST base URL
pub const DEFAULT_UNIPROT_BASE_URL: &str = "https://rest.uniprot.org";

/// MDPI site root; search and article paths are appended to it
pub const DEFAULT_MDPI_BASE_URL: &str = "https://www.mdpi.com";

/// User agent sent to NCBI when none is configured
pub const DEFAULT_EUTILS_USER_AGENT: &str = "MyTextMiningProject/1.0";

/// User agent sent to UniProt when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!("litharvest/", env!("CARGO_PKG_VERSION"));

/// Desktop browser user agent used for MDPI
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the PMC, UniProt and MDPI clients
///
/// # Example
///
/// ```
/// use litharvest_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_email("curator@example.org")
///     .with_request_delay(Duration::from_millis(500));
///
/// assert_eq!(config.request_delay, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// E-utilities base URL (ESearch / EFetch)
    pub eutils_base_url: String,
    /// UniProt REST base URL
    pub uniprot_base_url: String,
    /// MDPI site root
    pub mdpi_base_url: String,
    /// Overrides every client's default user agent
    pub user_agent: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Pause before each per-item fetch in a harvest loop
    pub request_delay: Duration,
    /// NCBI API key
    pub api_key: Option<String>,
    /// Contact email sent to NCBI
    pub email: Option<String>,
    /// Tool name sent to NCBI
    pub tool: Option<String>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            eutils_base_url: DEFAULT_EUTILS_BASE_URL.to_string(),
            uniprot_base_url: DEFAULT_UNIPROT_BASE_URL.to_string(),
            mdpi_base_url: DEFAULT_MDPI_BASE_URL.to_string(),
            user_agent: None,
            timeout: Duration::from_secs(30),
            request_delay: Duration::from_secs(1),
            api_key: None,
            email: None,
            tool: None,
        }
    }

    pub fn with_eutils_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.eutils_base_url = base_url.into();
        self
    }

    pub fn with_uniprot_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.uniprot_base_url = base_url.into();
        self
    }

    pub fn with_mdpi_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.mdpi_base_url = base_url.into();
        self
    }

    /// Point every client at the same base URL (used with mock servers)
    pub fn with_base_url<S: Into<String>>(self, base_url: S) -> Self {
        let base_url = base_url.into();
        self.with_eutils_base_url(base_url.clone())
            .with_uniprot_base_url(base_url.clone())
            .with_mdpi_base_url(base_url)
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause before each per-item fetch; zero disables it
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Configured user agent, or `default` when none is set
    pub fn effective_user_agent(&self, default: &str) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| default.to_string())
    }

    /// User agent for NCBI: the project string plus a mailto when an email is set
    pub fn eutils_user_agent(&self) -> String {
        match (&self.user_agent, &self.email) {
            (Some(user_agent), _) => user_agent.clone(),
            (None, Some(email)) => format!("{DEFAULT_EUTILS_USER_AGENT} (mailto:{email})"),
            (None, None) => DEFAULT_EUTILS_USER_AGENT.to_string(),
        }
    }

    /// NCBI identification parameters (`api_key`, `email`, `tool`) that are set
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        if let Some(tool) = &self.tool {
            params.push(("tool".to_string(), tool.clone()));
        }

        params
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
