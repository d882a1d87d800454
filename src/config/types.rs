use serde::Deserialize;

/// Main configuration structure for uik-scrape
///
/// Every section has a built-in default pointing at the reference election
/// site, so the binary runs without a config file. A TOML file can override
/// any subset of the fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Identity of the crawled site: where the tree starts and how pages are
/// recognized
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Address of the top of the region tree
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Address prefix that identifies a sub-region link on a branch page
    #[serde(rename = "region-link-prefix")]
    pub region_link_prefix: String,

    /// Exact anchor text of the single link that marks a leaf page and
    /// points at the precinct-commission site holding the results table
    #[serde(rename = "leaf-link-text")]
    pub leaf_link_text: String,

    /// Character encoding of every fetched page. The site predates UTF-8;
    /// no auto-detection is attempted.
    #[serde(rename = "page-encoding")]
    pub page_encoding: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_url: "http://www.vybory.izbirkom.ru/region/region/izbirkom?action=show\
                       &root=1&tvd=100100028713304&vrn=100100028713299&region=0&global=1\
                       &sub_region=0&prver=0&pronetvd=null&vibid=100100028713304&type=233"
                .to_string(),
            region_link_prefix: "http://www.vybory.izbirkom.ru/region/region/izbirkom".to_string(),
            leaf_link_text: "сайт избирательной комиссии субъекта Российской Федерации"
                .to_string(),
            page_encoding: "windows-1251".to_string(),
        }
    }
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Total per-request timeout in seconds. A hung fetch fails the request;
    /// a timeout is not retried beyond the single leaf-processing retry.
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("uik-scrape/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
