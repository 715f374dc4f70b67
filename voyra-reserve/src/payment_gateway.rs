use async_trait::async_trait;
use voyra_core::payment::{PaymentError, PaymentGateway, RedirectHandoff};
use voyra_core::reservation::SESSION_ID_PLACEHOLDER;

use crate::app_config::PaymentConfig;

/// Payment adapter for a provider-hosted checkout page. The provider's
/// browser SDK reduces, on this side of the boundary, to producing the page
/// URL for a session; the embedding shell performs the actual navigation.
#[derive(Debug)]
pub struct HostedPageGateway {
    publishable_key: String,
    page_url_template: String,
}

impl HostedPageGateway {
    /// Fails when no publishable key is configured; the flow reports that as
    /// a support issue rather than attempting an anonymous redirect.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        if config.publishable_key.trim().is_empty() {
            return Err(PaymentError::MissingPublishableKey);
        }
        Ok(Self {
            publishable_key: config.publishable_key.clone(),
            page_url_template: config.hosted_page_url.clone(),
        })
    }

    fn page_url(&self, session_id: &str) -> String {
        let base = if self.page_url_template.contains(SESSION_ID_PLACEHOLDER) {
            self.page_url_template
                .replace(SESSION_ID_PLACEHOLDER, session_id)
        } else {
            format!(
                "{}/{}",
                self.page_url_template.trim_end_matches('/'),
                session_id
            )
        };
        let join = if base.contains('?') { '&' } else { '?' };
        format!("{}{}pk={}", base, join, self.publishable_key)
    }
}

#[async_trait]
impl PaymentGateway for HostedPageGateway {
    async fn redirect_to_checkout(
        &self,
        session_id: &str,
    ) -> Result<RedirectHandoff, PaymentError> {
        if session_id.trim().is_empty() {
            return Err(PaymentError::RedirectFailed(
                "empty checkout session id".to_string(),
            ));
        }

        let url = self.page_url(session_id);
        tracing::info!(session_id = %session_id, "built hosted checkout handoff");
        Ok(RedirectHandoff {
            url,
            session_id: session_id.to_string(),
        })
    }
}
