use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct PriceLockedEvent {
    pub draft_id: Uuid,
    pub attempt_id: Uuid,
    pub total_price: f64,
    pub currency: String,
    pub price_changed: bool,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct PriceDriftEvent {
    pub draft_id: Uuid,
    pub attempt_id: Uuid,
    pub quoted_price: f64,
    pub locked_price: f64,
    pub accepted: bool,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct CheckoutSessionEvent {
    pub draft_id: Uuid,
    pub attempt_id: Uuid,
    pub session_id: String,
    pub booking_id: Option<String>,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct FlowAbortedEvent {
    pub draft_id: Uuid,
    pub attempt_id: Uuid,
    pub stage: String,
    pub reason: String,
    pub timestamp: i64,
}
