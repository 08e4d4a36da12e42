use crate::config::ScrapeConfig;
use crate::scrapers::traits::RenderingSession;
use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use rand::seq::SliceRandom;
use std::ffi::OsStr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Rendering session backed by headless Chrome.
///
/// Owns the browser process for exactly one scrape; the process is torn
/// down when the session drops, on every exit path.
pub struct ChromeSession {
    // Held for its Drop impl, which kills the Chrome process.
    _browser: Browser,
    tab: Arc<Tab>,
    page_settle: Duration,
}

impl ChromeSession {
    /// Launch Chrome with reduced automation fingerprinting and apply a
    /// random client identity before the first navigation.
    pub fn launch(config: &ScrapeConfig) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .args(vec![
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-blink-features=AutomationControlled"),
                OsStr::new("--incognito"),
            ])
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;

        if let Some(user_agent) = config.user_agent_pool.choose(&mut rand::thread_rng()) {
            debug!("Session user agent: {}", user_agent);
            tab.set_user_agent(user_agent, None, None)
                .context("Failed to override user agent")?;
        }

        Ok(Self {
            _browser: browser,
            tab,
            page_settle: config.page_settle,
        })
    }
}

impl RenderingSession for ChromeSession {
    fn open(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;
        self.tab.wait_until_navigated()?;
        // Client-side rendering keeps mutating the DOM after load.
        thread::sleep(self.page_settle);
        Ok(())
    }

    fn current_markup(&self) -> Result<String> {
        let result = self
            .tab
            .evaluate("document.documentElement.outerHTML", false)
            .context("Failed to read rendered markup")?;

        let markup = result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Ok(markup)
    }

    fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<bool> {
        match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }

    fn click(&self, selector: &str) -> Result<()> {
        self.tab
            .find_element(selector)
            .with_context(|| format!("Element not found: {}", selector))?
            .click()
            .with_context(|| format!("Failed to click {}", selector))?;
        Ok(())
    }
}
