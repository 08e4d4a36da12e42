use crate::bundle;
use crate::config::ScrapeConfig;
use crate::images::{ImageFetcher, ImageSource};
use crate::models::OutputBundle;
use crate::rewrite::{rewrite_or_fallback, DescriptionRewriter};
use crate::scrapers::{extract, gallery, site, ChromeSession, RenderingSession};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Sequences one scrape end to end:
/// listing page, photo overview, per-photo resolution, fetch and
/// transform, description rewrite, bundle assembly.
///
/// Everything runs on one logical thread of control; per-photo failures
/// are absorbed, session and filesystem failures abort the run. The run
/// is non-resumable and keeps no partial state.
pub struct Pipeline<R: DescriptionRewriter> {
    config: ScrapeConfig,
    rewriter: R,
}

impl<R: DescriptionRewriter> Pipeline<R> {
    pub fn new(config: ScrapeConfig, rewriter: R) -> Self {
        Self { config, rewriter }
    }

    /// Run one scrape with a freshly launched browser session.
    ///
    /// The session is owned by this call and torn down on every exit
    /// path, including early error returns.
    pub async fn run(&self, listing_url: &str) -> Result<OutputBundle> {
        let session = ChromeSession::launch(&self.config)?;
        let fetcher = ImageFetcher::new(&self.config)?;
        self.run_with_session(&session, &fetcher, listing_url).await
    }

    async fn run_with_session<S: RenderingSession, F: ImageSource>(
        &self,
        session: &S,
        fetcher: &F,
        listing_url: &str,
    ) -> Result<OutputBundle> {
        let mut rng = StdRng::from_entropy();

        session
            .open(listing_url)
            .context("Failed to load listing page")?;
        session.dismiss_consent(
            site::CONSENT_ACCEPT,
            self.config.element_wait_timeout,
            self.config.consent_settle,
        )?;
        let listing_markup = session.current_markup()?;
        let attributes = extract::extract(&listing_markup);
        info!(
            "Listing loaded: area={:?} bedrooms={:?}",
            attributes.floor_area, attributes.bedroom_count
        );

        let overview_url = site::overview_url(listing_url);
        session
            .open(&overview_url)
            .context("Failed to load photo overview page")?;
        let photo_links = gallery::list_photo_links(&session.current_markup()?);
        info!("Overview loaded: {} photo links", photo_links.len());

        let mut resolved_urls = Vec::new();
        for photo in &photo_links {
            session
                .open(&photo.detail_url)
                .with_context(|| format!("Failed to load photo page {}", photo.detail_url))?;

            let hero_present = session
                .wait_for_element(site::PHOTO_HERO, self.config.element_wait_timeout)?;
            if !hero_present {
                debug!("No hero image on {}, skipping", photo.detail_url);
            } else if let Some(url) = gallery::resolve_high_res(&session.current_markup()?) {
                resolved_urls.push(url);
            } else {
                debug!("No resolvable variant on {}, skipping", photo.detail_url);
            }

            // Spacing between photo visits, to stay under rate limits.
            let delay = inter_visit_delay(self.config.visit_delay, &mut rng);
            tokio::time::sleep(delay).await;
        }
        info!("Resolved {} of {} photos", resolved_urls.len(), photo_links.len());

        let mut images = Vec::new();
        for url in &resolved_urls {
            match fetcher.fetch_and_transform(url, &overview_url).await {
                Ok(bytes) => images.push(bytes),
                Err(error) => warn!("Skipping image {}: {:#}", url, error),
            }
        }
        info!("Fetched and transformed {} images", images.len());

        let rewritten =
            rewrite_or_fallback(&self.rewriter, attributes.description.as_deref()).await;

        bundle::assemble(&self.config.output_root, attributes, &images, &rewritten)
    }
}

fn inter_visit_delay<G: Rng>(range: (Duration, Duration), rng: &mut G) -> Duration {
    let (min, max) = range;
    if max <= min {
        return min;
    }
    Duration::from_millis(rng.gen_range(min.as_millis() as u64..=max.as_millis() as u64))
}
