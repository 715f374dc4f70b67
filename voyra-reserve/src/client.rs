use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use voyra_core::reservation::{
    BackendFault, CheckoutCallbacks, PaymentSession, ReservationGateway, ReservationLock,
    ReserveError,
};
use voyra_domain::intent::BookingIntent;

use crate::app_config::ApiConfig;
use crate::dto::{
    CheckoutSessionRequest, CheckoutSessionResponse, ErrorBody, PreBookRequest, PreBookResponse,
};

/// HTTP implementation of the reservation port.
#[derive(Clone)]
pub struct HttpReserveClient {
    http: Client,
    base_url: String,
}

impl HttpReserveClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    fn with_bearer(request: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        match bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Decode a non-2xx response into a typed rejection. The body is read as
    /// text first; anything unparseable degrades to an Unknown fault rather
    /// than an error of its own.
    async fn rejection(response: reqwest::Response) -> ReserveError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let fault = serde_json::from_str::<ErrorBody>(&body)
            .map(ErrorBody::into_fault)
            .unwrap_or(BackendFault::Unknown);
        tracing::error!(status, ?fault, "reservation API rejected request");
        ReserveError::Rejected { status, fault }
    }
}

#[async_trait]
impl ReservationGateway for HttpReserveClient {
    async fn prebook(
        &self,
        intent: &BookingIntent,
        bearer: Option<&str>,
    ) -> Result<ReservationLock, ReserveError> {
        let body = PreBookRequest::from(intent);
        tracing::info!(hotel_id = %body.hotel_id, "requesting price lock");

        let request = self
            .http
            .post(format!("{}/bookings/hotels/prebook", self.base_url))
            .json(&body);

        let response = Self::with_bearer(request, bearer)
            .send()
            .await
            .map_err(|e| ReserveError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let parsed = response
            .json::<PreBookResponse>()
            .await
            .map_err(|e| ReserveError::ResponseParseFailed(e.to_string()))?;

        tracing::info!(
            total_price = parsed.total_price,
            price_changed = parsed.price_changed,
            "price lock obtained"
        );
        Ok(parsed.into())
    }

    async fn create_checkout_session(
        &self,
        intent: &BookingIntent,
        lock: &ReservationLock,
        callbacks: &CheckoutCallbacks,
        bearer: Option<&str>,
    ) -> Result<PaymentSession, ReserveError> {
        let body = CheckoutSessionRequest::new(intent, lock, callbacks);

        let request = self
            .http
            .post(format!("{}/bookings/hotels/checkout-session", self.base_url))
            .json(&body);

        let response = Self::with_bearer(request, bearer)
            .send()
            .await
            .map_err(|e| ReserveError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let parsed = response
            .json::<CheckoutSessionResponse>()
            .await
            .map_err(|e| ReserveError::ResponseParseFailed(e.to_string()))?;

        // A 2xx without a session id is a contract violation, not a no-op.
        let session_id = parsed
            .session_id
            .filter(|id| !id.is_empty())
            .ok_or(ReserveError::MissingSessionId)?;

        tracing::info!(session_id = %session_id, "checkout session created");
        Ok(PaymentSession {
            session_id,
            booking_id: parsed.booking_id,
        })
    }

    async fn release_lock(
        &self,
        pre_book_code: &str,
        bearer: Option<&str>,
    ) -> Result<(), ReserveError> {
        let request = self.http.delete(format!(
            "{}/bookings/hotels/prebook/{}",
            self.base_url, pre_book_code
        ));

        let response = Self::with_bearer(request, bearer)
            .send()
            .await
            .map_err(|e| ReserveError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        tracing::info!("price lock released");
        Ok(())
    }
}
