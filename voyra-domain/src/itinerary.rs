use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every checkout books exactly one room; multi-room stays are separate bookings.
pub const ROOMS_PER_BOOKING: u32 = 1;

/// The stay being booked, as selected on the search results page. Identifiers
/// are opaque strings minted by the reservation backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StayItinerary {
    pub hotel_id: String,
    pub room_id: String,
    pub room_type_id: String,
    pub meal_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
}

impl StayItinerary {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}
