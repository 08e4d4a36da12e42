use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for one scrape. Passed into the pipeline at
/// construction; nothing in the crate reads ambient global state.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Pool of realistic browser identities; one is picked per session and
    /// per image request.
    pub user_agent_pool: Vec<String>,
    /// Timeout for each image GET.
    pub request_timeout: Duration,
    /// How long to wait for an expected element before giving up on it.
    pub element_wait_timeout: Duration,
    /// Fixed settle interval after navigation, before markup is read.
    pub page_settle: Duration,
    /// Pause after dismissing the consent overlay, while the page
    /// re-renders.
    pub consent_settle: Duration,
    /// Uniform delay range between photo-detail visits.
    pub visit_delay: (Duration, Duration),
    /// Root directory under which per-scrape bundles are created.
    pub output_root: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent_pool: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36"
                    .to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/107.0.0.0 Safari/537.36"
                    .to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36"
                    .to_string(),
            ],
            request_timeout: Duration::from_secs(10),
            element_wait_timeout: Duration::from_secs(10),
            page_settle: Duration::from_secs(3),
            consent_settle: Duration::from_secs(2),
            visit_delay: (Duration::from_secs(2), Duration::from_secs(4)),
            output_root: PathBuf::from("Objekte"),
        }
    }
}
