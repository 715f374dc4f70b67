use async_trait::async_trait;

/// The URL the embedding shell must navigate to; producing it is the last
/// thing this engine does before the browser leaves the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectHandoff {
    pub url: String,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment provider publishable key is not configured")]
    MissingPublishableKey,

    #[error("Redirect to hosted checkout failed: {0}")]
    RedirectFailed(String),
}

/// Port onto the payment provider's client surface: initialize with a
/// publishable key, then hand off a checkout session for redirect.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn redirect_to_checkout(&self, session_id: &str) -> Result<RedirectHandoff, PaymentError>;
}
