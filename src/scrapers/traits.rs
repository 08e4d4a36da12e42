use anyhow::Result;
use std::time::Duration;

/// Capability interface over a rendered-page session.
///
/// The pipeline only ever talks to this trait; the concrete browser lives
/// behind it so tests can drive the pipeline with canned markup.
pub trait RenderingSession {
    /// Navigate to a URL and let the page settle before markup is read.
    fn open(&self, url: &str) -> Result<()>;

    /// Snapshot of the current rendered markup.
    fn current_markup(&self) -> Result<String>;

    /// Wait until an element matching `selector` exists. Returns `false`
    /// when it never appears within the timeout; absence is not an error.
    fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<bool>;

    /// Click the first element matching `selector`.
    fn click(&self, selector: &str) -> Result<()>;

    /// Dismiss a consent overlay if one shows up, then pause `settle` to
    /// let the page re-render. The overlay not appearing at all is the
    /// normal case on a warm session.
    fn dismiss_consent(&self, selector: &str, timeout: Duration, settle: Duration) -> Result<()> {
        if self.wait_for_element(selector, timeout)? {
            self.click(selector)?;
            std::thread::sleep(settle);
        }
        Ok(())
    }
}
