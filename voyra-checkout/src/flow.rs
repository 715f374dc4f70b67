use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use voyra_core::auth::AuthProvider;
use voyra_core::payment::{PaymentError, PaymentGateway, RedirectHandoff};
use voyra_core::prompt::UserPrompt;
use voyra_core::reservation::{
    BackendFault, CheckoutCallbacks, ReservationGateway, ReservationLock, ReserveError,
};
use voyra_domain::draft::BookingDraft;
use voyra_domain::intent::{BookingIntent, LocaleContext, LoyaltyFlags, QuotedPrice};
use voyra_domain::itinerary::StayItinerary;
use voyra_reserve::app_config::BookingRules;
use voyra_shared::models::events::{
    CheckoutSessionEvent, FlowAbortedEvent, PriceDriftEvent, PriceLockedEvent,
};

use crate::countdown::LockCountdown;
use crate::state::{SubmissionState, SubmissionTracker};

#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Origin the payment provider redirects back to.
    pub origin: String,
    pub rules: BookingRules,
}

impl FlowConfig {
    pub fn from_app_config(config: &voyra_reserve::app_config::Config) -> Self {
        Self {
            origin: config.site.origin.clone(),
            rules: config.booking_rules.clone(),
        }
    }
}

/// One submission's inputs, captured at the moment the user triggers it.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub itinerary: StayItinerary,
    pub quoted: QuotedPrice,
    pub locale: String,
    pub loyalty: LoyaltyFlags,
}

/// Why a submission stopped short of the payment page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    ValidationFailed,
    PriceDriftDeclined,
    PriceDriftRejected,
    BackendRejected,
    ContractViolation,
    LockExpired,
    PaymentNotConfigured,
    GatewayFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The engine is done; the embedder must navigate to the handoff URL.
    Redirected {
        handoff: RedirectHandoff,
        booking_id: Option<String>,
        lock_expires_at: DateTime<Utc>,
    },
    /// The flow stopped; the user has already been told why.
    Aborted {
        stage: SubmissionState,
        reason: AbortReason,
    },
    /// A submission is already running; this trigger did nothing.
    AlreadyInFlight,
}

/// The three-stage checkout protocol: price-lock, payment session, redirect.
/// Strictly sequential, single attempt per trigger; every failure is
/// converted into one user-facing message and an Aborted outcome.
pub struct CheckoutFlow {
    reservations: Arc<dyn ReservationGateway>,
    payments: Arc<dyn PaymentGateway>,
    prompt: Arc<dyn UserPrompt>,
    auth: Arc<dyn AuthProvider>,
    config: FlowConfig,
    busy: AtomicBool,
    tracker: Mutex<SubmissionTracker>,
}

impl CheckoutFlow {
    pub fn new(
        reservations: Arc<dyn ReservationGateway>,
        payments: Arc<dyn PaymentGateway>,
        prompt: Arc<dyn UserPrompt>,
        auth: Arc<dyn AuthProvider>,
        config: FlowConfig,
    ) -> Self {
        Self {
            reservations,
            payments,
            prompt,
            auth,
            config,
            busy: AtomicBool::new(false),
            tracker: Mutex::new(SubmissionTracker::new()),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> SubmissionState {
        self.lock_tracker().state()
    }

    /// Run one submission end to end. Re-triggering while a submission is in
    /// flight is a no-op: no second set of network calls is fired.
    pub async fn submit(
        &self,
        draft: &mut BookingDraft,
        request: &SubmissionRequest,
    ) -> SubmissionOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!(draft_id = %draft.id, "submission already in flight, ignoring trigger");
            return SubmissionOutcome::AlreadyInFlight;
        }

        let outcome = self.run(draft, request).await;
        self.busy.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run(
        &self,
        draft: &mut BookingDraft,
        request: &SubmissionRequest,
    ) -> SubmissionOutcome {
        let attempt_id = Uuid::new_v4();
        let draft_id = draft.id;
        self.advance(SubmissionState::Validating);

        // 1. Validate the roster and assemble the submission payload.
        let locale_ctx = LocaleContext {
            language: request.locale.clone(),
            customer_country: self.config.rules.customer_country.clone(),
        };
        let intent = match BookingIntent::assemble(
            draft,
            &request.itinerary,
            &request.quoted,
            &locale_ctx,
            request.loyalty.clone(),
        ) {
            Ok(intent) => intent,
            Err(err) => {
                self.prompt
                    .notify(&format!(
                        "Please complete the required guest details: {}",
                        err
                    ))
                    .await;
                return self.abort(draft_id, attempt_id, AbortReason::ValidationFailed, &err.to_string());
            }
        };

        let bearer = self.auth.bearer_token();

        // 2. Freeze the price.
        self.advance(SubmissionState::PreBooking);
        let lock = match self.reservations.prebook(&intent, bearer.as_deref()).await {
            Ok(lock) => lock,
            Err(err) => {
                return self
                    .prebook_failure(draft, attempt_id, err)
                    .await;
            }
        };

        let locked_event = PriceLockedEvent {
            draft_id,
            attempt_id,
            total_price: lock.total_price,
            currency: intent.currency.clone(),
            price_changed: lock.price_changed,
            timestamp: Utc::now().timestamp(),
        };
        tracing::info!(event = ?locked_event, "price locked");

        // 3. If the price moved, the user must explicitly accept the new one.
        if lock.price_changed {
            self.advance(SubmissionState::PriceConfirm);
            let accepted = self
                .prompt
                .confirm(&format!(
                    "The total price has changed from {:.2} to {:.2} {}. Continue with the new price?",
                    intent.search_price, lock.total_price, intent.currency
                ))
                .await;

            let drift_event = PriceDriftEvent {
                draft_id,
                attempt_id,
                quoted_price: intent.search_price,
                locked_price: lock.total_price,
                accepted,
                timestamp: Utc::now().timestamp(),
            };
            tracing::info!(event = ?drift_event, "price drift decision");

            if !accepted {
                self.release_quietly(&lock, bearer.as_deref()).await;
                draft.reset();
                return self.abort(
                    draft_id,
                    attempt_id,
                    AbortReason::PriceDriftDeclined,
                    "user declined changed price",
                );
            }
        }

        // From here the lock's price is authoritative; the search-time quote
        // is never sent again.
        let countdown = LockCountdown::start(
            self.config.rules.prebook_lock_seconds,
            self.config.rules.expiry_warning_seconds,
        );
        if countdown.is_expired() {
            self.prompt
                .notify("The price lock has expired. Please submit the booking again.")
                .await;
            return self.abort(draft_id, attempt_id, AbortReason::LockExpired, "lock expired");
        }

        // 4. Create the hosted payment session.
        self.advance(SubmissionState::CheckingOut);
        let callbacks = CheckoutCallbacks::for_locale(&self.config.origin, &request.locale);
        let session = match self
            .reservations
            .create_checkout_session(&intent, &lock, &callbacks, bearer.as_deref())
            .await
        {
            Ok(session) => session,
            Err(err) => return self.checkout_failure(draft_id, attempt_id, err).await,
        };

        let session_event = CheckoutSessionEvent {
            draft_id,
            attempt_id,
            session_id: session.session_id.clone(),
            booking_id: session.booking_id.clone(),
            timestamp: Utc::now().timestamp(),
        };
        tracing::info!(event = ?session_event, "checkout session created");

        // 5. Hand off to the hosted payment page.
        self.advance(SubmissionState::Redirecting);
        let handoff = match self.payments.redirect_to_checkout(&session.session_id).await {
            Ok(handoff) => handoff,
            Err(PaymentError::MissingPublishableKey) => {
                self.prompt
                    .notify("Payments are temporarily unavailable. Please contact support.")
                    .await;
                return self.abort(
                    draft_id,
                    attempt_id,
                    AbortReason::PaymentNotConfigured,
                    "publishable key missing",
                );
            }
            Err(err) => {
                self.prompt
                    .notify(&format!("Could not open the payment page: {}", err))
                    .await;
                return self.abort(draft_id, attempt_id, AbortReason::GatewayFailed, &err.to_string());
            }
        };

        self.lock_tracker().finish();
        tracing::info!(session_id = %session.session_id, "handing off to hosted payment page");

        SubmissionOutcome::Redirected {
            handoff,
            booking_id: session.booking_id,
            lock_expires_at: countdown.expires_at(),
        }
    }

    async fn prebook_failure(
        &self,
        draft: &mut BookingDraft,
        attempt_id: Uuid,
        err: ReserveError,
    ) -> SubmissionOutcome {
        let draft_id = draft.id;
        match err {
            ReserveError::Rejected {
                fault: BackendFault::PriceChanged { new_price },
                ..
            } => {
                let message = match new_price {
                    Some(price) => format!(
                        "The price for this stay has changed to {:.2}. Please review the updated price and book again.",
                        price
                    ),
                    None => "The price for this stay has changed. Please review the updated price and book again.".to_string(),
                };
                self.prompt.notify(&message).await;
                // The draft's pricing context is stale; start over.
                draft.reset();
                self.abort(
                    draft_id,
                    attempt_id,
                    AbortReason::PriceDriftRejected,
                    "prebook rejected with price change",
                )
            }
            ReserveError::Rejected { status, fault } => {
                self.prompt.notify(&rejection_message(status, &fault)).await;
                self.abort(draft_id, attempt_id, AbortReason::BackendRejected, &format!("prebook rejected with status {}", status))
            }
            err => {
                tracing::error!(error = %err, "prebook request failed");
                self.prompt
                    .notify("We could not reserve this stay. Please check your connection and try again.")
                    .await;
                self.abort(draft_id, attempt_id, AbortReason::BackendRejected, &err.to_string())
            }
        }
    }

    async fn checkout_failure(
        &self,
        draft_id: Uuid,
        attempt_id: Uuid,
        err: ReserveError,
    ) -> SubmissionOutcome {
        match err {
            ReserveError::MissingSessionId => {
                self.prompt
                    .notify("The payment session could not be created. Please try again.")
                    .await;
                self.abort(
                    draft_id,
                    attempt_id,
                    AbortReason::ContractViolation,
                    "checkout response missing session id",
                )
            }
            ReserveError::Rejected { status, fault } => {
                self.prompt.notify(&rejection_message(status, &fault)).await;
                self.abort(draft_id, attempt_id, AbortReason::BackendRejected, &format!("checkout rejected with status {}", status))
            }
            err => {
                tracing::error!(error = %err, "checkout request failed");
                self.prompt
                    .notify("We could not start the payment. Please try again.")
                    .await;
                self.abort(draft_id, attempt_id, AbortReason::BackendRejected, &err.to_string())
            }
        }
    }

    /// Best-effort release of a declined lock; the backend's own expiry is
    /// the fallback if this fails.
    async fn release_quietly(&self, lock: &ReservationLock, bearer: Option<&str>) {
        if let Err(err) = self
            .reservations
            .release_lock(&lock.pre_book_code, bearer)
            .await
        {
            tracing::warn!(error = %err, "failed to release declined price lock");
        }
    }

    fn abort(
        &self,
        draft_id: Uuid,
        attempt_id: Uuid,
        reason: AbortReason,
        detail: &str,
    ) -> SubmissionOutcome {
        let stage = self.lock_tracker().fail();
        let event = FlowAbortedEvent {
            draft_id,
            attempt_id,
            stage: format!("{:?}", stage),
            reason: detail.to_string(),
            timestamp: Utc::now().timestamp(),
        };
        tracing::info!(event = ?event, "booking submission aborted");
        SubmissionOutcome::Aborted { stage, reason }
    }

    fn advance(&self, next: SubmissionState) {
        let mut tracker = self.lock_tracker();
        if let Err(err) = tracker.advance(next) {
            // Unreachable while submissions hold the busy flag.
            tracing::error!(error = %err, "submission state out of sync");
        }
    }

    fn lock_tracker(&self) -> std::sync::MutexGuard<'_, SubmissionTracker> {
        match self.tracker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn rejection_message(status: u16, fault: &BackendFault) -> String {
    match fault {
        BackendFault::Message(text) => text.clone(),
        BackendFault::PriceChanged { .. } | BackendFault::Unknown => format!(
            "The reservation service returned an error (status {}). Please try again.",
            status
        ),
    }
}
