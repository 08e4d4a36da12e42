use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

/// Fixed sentence used wherever a description is missing.
pub const NO_DESCRIPTION: &str = "Keine Beschreibung vorhanden.";

/// External text-rewriting collaborator.
///
/// The service behind this seam turns the raw listing description into
/// localized prose. Implementations must tolerate absent input; failures
/// are absorbed at the call site, never fatal to the scrape.
#[async_trait]
pub trait DescriptionRewriter: Send + Sync {
    async fn rewrite(&self, original: Option<&str>) -> Result<String>;
}

/// Default in-crate rewriter: echoes the original text.
///
/// Keeps the binary runnable without the external service wired up.
pub struct PassthroughRewriter;

#[async_trait]
impl DescriptionRewriter for PassthroughRewriter {
    async fn rewrite(&self, original: Option<&str>) -> Result<String> {
        match original {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Ok(NO_DESCRIPTION.to_string()),
        }
    }
}

/// Invoke the rewriter and absorb any collaborator failure.
///
/// An error is downgraded to a substitute text embedding the error and
/// the original, so the bundle still ships with everything else intact.
pub async fn rewrite_or_fallback<R: DescriptionRewriter + ?Sized>(
    rewriter: &R,
    original: Option<&str>,
) -> String {
    match rewriter.rewrite(original).await {
        Ok(text) => text,
        Err(error) => {
            warn!("Description rewrite failed: {:#}", error);
            format!(
                "(Fehler beim Umschreiben: {:#})\n\n{}",
                error,
                original.unwrap_or(NO_DESCRIPTION)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingRewriter;

    #[async_trait]
    impl DescriptionRewriter for FailingRewriter {
        async fn rewrite(&self, _original: Option<&str>) -> Result<String> {
            anyhow::bail!("service unavailable")
        }
    }

    #[tokio::test]
    async fn passthrough_returns_fixed_sentence_for_absent_input() {
        let rewriter = PassthroughRewriter;
        assert_eq!(rewriter.rewrite(None).await.unwrap(), NO_DESCRIPTION);
        assert_eq!(rewriter.rewrite(Some("  ")).await.unwrap(), NO_DESCRIPTION);
    }

    #[tokio::test]
    async fn passthrough_echoes_present_text() {
        let rewriter = PassthroughRewriter;
        assert_eq!(
            rewriter.rewrite(Some("Mooi huis.")).await.unwrap(),
            "Mooi huis."
        );
    }

    #[tokio::test]
    async fn collaborator_failure_embeds_error_and_original() {
        let text = rewrite_or_fallback(&FailingRewriter, Some("Mooi huis.")).await;
        assert!(text.contains("service unavailable"));
        assert!(text.contains("Mooi huis."));
    }

    #[tokio::test]
    async fn collaborator_failure_without_original_still_yields_text() {
        let text = rewrite_or_fallback(&FailingRewriter, None).await;
        assert!(text.contains(NO_DESCRIPTION));
    }
}
