use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use voyra_domain::intent::BookingIntent;

/// Literal token the payment provider substitutes with the real session id
/// when redirecting back to the success page. Must reach the backend verbatim.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Proof that the backend froze the price for this itinerary. The code is
/// opaque, bounded to roughly 30 minutes backend-side, and is consumed by
/// exactly one checkout-session call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationLock {
    pub pre_book_code: String,
    pub total_price: f64,
    pub price_changed: bool,
}

/// Handle for the hosted payment page, consumed immediately by the redirect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentSession {
    pub session_id: String,
    pub booking_id: Option<String>,
}

/// Where the payment provider sends the browser after the hosted page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutCallbacks {
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutCallbacks {
    pub fn for_locale(origin: &str, locale: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            success_url: format!(
                "{}/{}/booking/success?session_id={}",
                origin, locale, SESSION_ID_PLACEHOLDER
            ),
            cancel_url: format!("{}/{}/booking/cancel", origin, locale),
        }
    }
}

/// What a non-2xx reservation response actually said, decoded once at the
/// HTTP boundary instead of probing optional fields throughout the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendFault {
    /// The backend refused because the live price moved.
    PriceChanged { new_price: Option<f64> },
    /// The backend supplied a human-readable reason.
    Message(String),
    /// Body missing or unintelligible.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReserveError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Reservation API rejected the call (status {status})")]
    Rejected { status: u16, fault: BackendFault },

    #[error("Checkout session response did not include a session id")]
    MissingSessionId,

    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),
}

/// Client-side port onto the reservation backend. One implementation speaks
/// HTTP; tests script it.
#[async_trait]
pub trait ReservationGateway: Send + Sync {
    /// Freeze the price for this itinerary and obtain a short-lived lock.
    async fn prebook(
        &self,
        intent: &BookingIntent,
        bearer: Option<&str>,
    ) -> Result<ReservationLock, ReserveError>;

    /// Convert a confirmed lock into a hosted-payment-page session. The
    /// lock's price is the one sent, never the search-time quote.
    async fn create_checkout_session(
        &self,
        intent: &BookingIntent,
        lock: &ReservationLock,
        callbacks: &CheckoutCallbacks,
        bearer: Option<&str>,
    ) -> Result<PaymentSession, ReserveError>;

    /// Best-effort release of a lock the user declined. Callers may ignore
    /// failures; backend expiry remains the authority.
    async fn release_lock(
        &self,
        pre_book_code: &str,
        bearer: Option<&str>,
    ) -> Result<(), ReserveError>;
}
