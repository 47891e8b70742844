use serde::Deserialize;

/// Main configuration structure for fi-alerts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub http: HttpConfig,
    pub vpn: VpnConfig,
    pub output: OutputConfig,
}

/// Search endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Paging endpoint returning listing markup embedded in JSON
    pub endpoint: String,

    /// Origin prefixed onto site-relative listing links
    #[serde(rename = "base-origin")]
    pub base_origin: String,

    /// Canonical listings page, recorded as the source of every record
    /// and sent as the Referer header
    #[serde(rename = "listings-page")]
    pub listings_page: String,

    /// Full-text query sent to the endpoint
    pub query: String,

    /// Listings requested per page
    pub take: u32,

    /// Listing language
    pub lang: String,

    /// Upper bound on pages fetched per run; 0 means unbounded
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.fi.se/ajaxsearch/GetWarnedCompanyPagingResults".to_string(),
            base_origin: "https://www.fi.se".to_string(),
            listings_page: "https://www.fi.se/en/our-registers/investor-alerts/".to_string(),
            query: "*".to_string(),
            take: 10,
            lang: "en".to_string(),
            max_pages: 0,
        }
    }
}

/// HTTP request configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Session cookie sent with every request
    #[serde(rename = "session-cookie")]
    pub session_cookie: String,

    /// Browser User-Agent strings; one is picked at random per request
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            session_cookie: "ASP.NET_SessionId=vrfoywftmn4bja3vputhu4da".to_string(),
            // Chrome, Edge and Safari profiles, rotated per request
            user_agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
                    .to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0"
                    .to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                 (KHTML, like Gecko) Version/15.5 Safari/605.1.15"
                    .to_string(),
            ],
        }
    }
}

/// VPN collaborator configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VpnConfig {
    /// Whether to bring the VPN up before the first request
    pub enabled: bool,

    /// Region identifier passed to the VPN client
    pub region: String,
}

impl Default for VpnConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            region: "sweden".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the exported workbook; parent directories are created on demand
    #[serde(rename = "workbook-path")]
    pub workbook_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            workbook_path: "output/investor_alerts.xlsx".to_string(),
        }
    }
}
