use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use voyra_core::reservation::{BackendFault, CheckoutCallbacks, ReservationLock};
use voyra_domain::intent::BookingIntent;
use voyra_domain::itinerary::ROOMS_PER_BOOKING;
use voyra_shared::Masked;

/// Body of POST /bookings/hotels/prebook, exactly as the backend consumes it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreBookRequest {
    pub hotel_id: String,
    pub room_id: String,
    pub room_type_id: String,
    pub meal_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub rooms: u32,
    pub adults: u32,
    pub children: u32,
    pub children_ages: String,
    pub guest_name: String,
    pub guest_email: Masked<String>,
    pub guest_phone: Masked<String>,
    pub search_price: f64,
    pub is_super_deal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub currency: String,
    pub language: String,
    pub customer_country: String,
}

impl From<&BookingIntent> for PreBookRequest {
    fn from(intent: &BookingIntent) -> Self {
        Self {
            hotel_id: intent.itinerary.hotel_id.clone(),
            room_id: intent.itinerary.room_id.clone(),
            room_type_id: intent.itinerary.room_type_id.clone(),
            meal_id: intent.itinerary.meal_id.clone(),
            check_in_date: intent.itinerary.check_in,
            check_out_date: intent.itinerary.check_out,
            rooms: ROOMS_PER_BOOKING,
            adults: intent.itinerary.adults,
            children: intent.itinerary.children,
            children_ages: intent.children_ages.clone(),
            guest_name: intent.guest_name.clone(),
            guest_email: intent.guest_email.clone(),
            guest_phone: intent.guest_phone.clone(),
            search_price: intent.search_price,
            is_super_deal: false,
            special_requests: intent.special_requests.clone(),
            currency: intent.currency.clone(),
            language: intent.language.clone(),
            customer_country: intent.customer_country.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreBookResponse {
    pub pre_book_code: String,
    pub total_price: f64,
    #[serde(default)]
    pub price_changed: bool,
}

impl From<PreBookResponse> for ReservationLock {
    fn from(body: PreBookResponse) -> Self {
        Self {
            pre_book_code: body.pre_book_code,
            total_price: body.total_price,
            price_changed: body.price_changed,
        }
    }
}

/// Body of POST /bookings/hotels/checkout-session: the prebook itinerary
/// again, plus the lock and the provider callback URLs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    #[serde(flatten)]
    pub stay: PreBookRequest,
    pub pre_book_code: String,
    pub success_url: String,
    pub cancel_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_purchase_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_code_valid: Option<bool>,
}

impl CheckoutSessionRequest {
    pub fn new(
        intent: &BookingIntent,
        lock: &ReservationLock,
        callbacks: &CheckoutCallbacks,
    ) -> Self {
        let mut stay = PreBookRequest::from(intent);
        // The lock's price is authoritative from here on; the search-time
        // quote must not survive into payment.
        stay.search_price = lock.total_price;

        Self {
            stay,
            pre_book_code: lock.pre_book_code.clone(),
            success_url: callbacks.success_url.clone(),
            cancel_url: callbacks.cancel_url.clone(),
            pass_purchase_type: intent.loyalty.pass_purchase_type.clone(),
            pass_code_valid: intent.loyalty.pass_code_valid,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub booking_id: Option<String>,
}

/// Loosely-structured error body the backend returns on non-2xx. Every field
/// is optional; whatever is present decides the fault.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub price_changed: Option<bool>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

impl ErrorBody {
    pub fn into_fault(self) -> BackendFault {
        if self.price_changed == Some(true) {
            BackendFault::PriceChanged {
                new_price: self.total_price,
            }
        } else if let Some(text) = self.message.or(self.error) {
            BackendFault::Message(text)
        } else {
            BackendFault::Unknown
        }
    }
}
