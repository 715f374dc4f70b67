use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use voyra_checkout::{CheckoutFlow, FlowConfig, SubmissionRequest};
use voyra_core::auth::AuthProvider;
use voyra_core::payment::{PaymentError, PaymentGateway, RedirectHandoff};
use voyra_core::prompt::UserPrompt;
use voyra_core::reservation::{
    CheckoutCallbacks, PaymentSession, ReservationGateway, ReservationLock, ReserveError,
};
use voyra_domain::draft::BookingDraft;
use voyra_domain::intent::{BookingIntent, LoyaltyFlags, QuotedPrice};
use voyra_domain::itinerary::StayItinerary;
use voyra_domain::roster::{AdultField, ChildField};
use voyra_reserve::app_config::BookingRules;

/// What the flow asked the reservation backend to check out, as seen at the
/// port boundary.
#[derive(Debug, Clone)]
pub struct CheckoutCall {
    pub pre_book_code: String,
    pub locked_price: f64,
    pub success_url: String,
    pub cancel_url: String,
    pub bearer: Option<String>,
}

/// Reservation port with scripted results and full call recording.
#[derive(Default)]
pub struct ScriptedReservations {
    pub prebook_results: Mutex<VecDeque<Result<ReservationLock, ReserveError>>>,
    pub checkout_results: Mutex<VecDeque<Result<PaymentSession, ReserveError>>>,
    pub prebook_calls: Mutex<Vec<(BookingIntent, Option<String>)>>,
    pub checkout_calls: Mutex<Vec<CheckoutCall>>,
    pub released: Mutex<Vec<String>>,
    /// When set, prebook blocks until the Notify fires; used to hold a
    /// submission in flight.
    pub prebook_gate: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedReservations {
    pub fn push_prebook(&self, result: Result<ReservationLock, ReserveError>) {
        self.prebook_results.lock().unwrap().push_back(result);
    }

    pub fn push_checkout(&self, result: Result<PaymentSession, ReserveError>) {
        self.checkout_results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl ReservationGateway for ScriptedReservations {
    async fn prebook(
        &self,
        intent: &BookingIntent,
        bearer: Option<&str>,
    ) -> Result<ReservationLock, ReserveError> {
        let gate = self.prebook_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.prebook_calls
            .lock()
            .unwrap()
            .push((intent.clone(), bearer.map(str::to_string)));
        self.prebook_results
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted prebook result")
    }

    async fn create_checkout_session(
        &self,
        _intent: &BookingIntent,
        lock: &ReservationLock,
        callbacks: &CheckoutCallbacks,
        bearer: Option<&str>,
    ) -> Result<PaymentSession, ReserveError> {
        self.checkout_calls.lock().unwrap().push(CheckoutCall {
            pre_book_code: lock.pre_book_code.clone(),
            locked_price: lock.total_price,
            success_url: callbacks.success_url.clone(),
            cancel_url: callbacks.cancel_url.clone(),
            bearer: bearer.map(str::to_string),
        });
        self.checkout_results
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted checkout result")
    }

    async fn release_lock(
        &self,
        pre_book_code: &str,
        _bearer: Option<&str>,
    ) -> Result<(), ReserveError> {
        self.released.lock().unwrap().push(pre_book_code.to_string());
        Ok(())
    }
}

/// Prompt port that records every message and answers confirms from a script
/// (defaulting to accept).
#[derive(Default)]
pub struct RecordingPrompt {
    pub confirm_answers: Mutex<VecDeque<bool>>,
    pub confirms: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<String>>,
}

impl RecordingPrompt {
    pub fn answer_confirm_with(&self, answer: bool) {
        self.confirm_answers.lock().unwrap().push_back(answer);
    }
}

#[async_trait]
impl UserPrompt for RecordingPrompt {
    async fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.confirm_answers.lock().unwrap().pop_front().unwrap_or(true)
    }

    async fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

/// Payment port that records redirects, optionally failing every call.
#[derive(Default)]
pub struct RecordingGateway {
    pub redirects: Mutex<Vec<String>>,
    pub fail_with: Mutex<Option<PaymentError>>,
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn redirect_to_checkout(
        &self,
        session_id: &str,
    ) -> Result<RedirectHandoff, PaymentError> {
        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }
        self.redirects.lock().unwrap().push(session_id.to_string());
        Ok(RedirectHandoff {
            url: format!("https://pay.test/c/{}", session_id),
            session_id: session_id.to_string(),
        })
    }
}

pub fn lock(code: &str, total_price: f64, price_changed: bool) -> ReservationLock {
    ReservationLock {
        pre_book_code: code.to_string(),
        total_price,
        price_changed,
    }
}

pub fn session(id: &str, booking_id: Option<&str>) -> PaymentSession {
    PaymentSession {
        session_id: id.to_string(),
        booking_id: booking_id.map(str::to_string),
    }
}

/// Roster for adults=2, children=1 with every field filled validly.
pub fn filled_draft() -> BookingDraft {
    let mut draft = BookingDraft::new(2, 1);
    draft
        .roster
        .set_adult_field(0, AdultField::FirstName, "Ada")
        .unwrap();
    draft
        .roster
        .set_adult_field(0, AdultField::LastName, "Lovelace")
        .unwrap();
    draft
        .roster
        .set_adult_field(1, AdultField::FirstName, "Grace")
        .unwrap();
    draft
        .roster
        .set_adult_field(1, AdultField::LastName, "Hopper")
        .unwrap();
    draft
        .roster
        .set_child_field(0, ChildField::FirstName, "Sam")
        .unwrap();
    draft
        .roster
        .set_child_field(0, ChildField::LastName, "Hopper")
        .unwrap();
    draft.roster.set_child_field(0, ChildField::Age, "7").unwrap();
    draft.contact.set_email("ada@example.com");
    draft.contact.set_phone("+44 20 7946 0000");
    draft
}

pub fn request() -> SubmissionRequest {
    SubmissionRequest {
        itinerary: StayItinerary {
            hotel_id: "h-1".into(),
            room_id: "r-9".into(),
            room_type_id: "rt-2".into(),
            meal_id: "bb".into(),
            check_in: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            adults: 2,
            children: 1,
        },
        quoted: QuotedPrice {
            amount: 250.0,
            currency: "EUR".into(),
        },
        locale: "en".into(),
        loyalty: LoyaltyFlags::default(),
    }
}

pub fn rules() -> BookingRules {
    BookingRules {
        prebook_lock_seconds: 1800,
        expiry_warning_seconds: 300,
        customer_country: "GB".into(),
    }
}

pub fn flow(
    reservations: Arc<ScriptedReservations>,
    payments: Arc<RecordingGateway>,
    prompt: Arc<RecordingPrompt>,
    auth: Arc<dyn AuthProvider>,
) -> CheckoutFlow {
    CheckoutFlow::new(
        reservations,
        payments,
        prompt,
        auth,
        FlowConfig {
            origin: "https://voyra.example".into(),
            rules: rules(),
        },
    )
}
