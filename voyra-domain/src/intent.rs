use serde::{Deserialize, Serialize};
use voyra_shared::Masked;

use crate::draft::{BookingDraft, ValidationError};
use crate::itinerary::StayItinerary;

/// The price the user saw in search results, in display currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotedPrice {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleContext {
    pub language: String,
    pub customer_country: String,
}

/// Optional loyalty/coupon context forwarded to the checkout session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoyaltyFlags {
    pub pass_purchase_type: Option<String>,
    pub pass_code_valid: Option<bool>,
}

/// Everything one submission sends to the reservation backend. Assembled
/// fresh on every submit, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingIntent {
    pub itinerary: StayItinerary,
    pub children_ages: String,
    pub guest_name: String,
    pub guest_email: Masked<String>,
    pub guest_phone: Masked<String>,
    pub special_requests: Option<String>,
    pub search_price: f64,
    pub currency: String,
    pub language: String,
    pub customer_country: String,
    pub loyalty: LoyaltyFlags,
}

impl BookingIntent {
    /// Build the submission payload. Fails unless the draft passes the
    /// submission gate and the itinerary's occupancy matches the roster.
    pub fn assemble(
        draft: &BookingDraft,
        itinerary: &StayItinerary,
        quoted: &QuotedPrice,
        locale: &LocaleContext,
        loyalty: LoyaltyFlags,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;

        if itinerary.adults as usize != draft.roster.adult_count()
            || itinerary.children as usize != draft.roster.child_count()
        {
            return Err(ValidationError::OccupancyMismatch {
                adults: itinerary.adults,
                children: itinerary.children,
            });
        }

        let guest_name = draft
            .roster
            .lead_guest_name()
            .ok_or(ValidationError::MissingLeadGuest)?;

        Ok(Self {
            itinerary: itinerary.clone(),
            children_ages: draft.roster.child_ages_csv(),
            guest_name,
            guest_email: draft.contact.email.clone(),
            guest_phone: draft.contact.phone.clone(),
            special_requests: draft.special_requests.clone(),
            search_price: quoted.amount,
            currency: quoted.currency.clone(),
            language: locale.language.clone(),
            customer_country: locale.customer_country.clone(),
            loyalty,
        })
    }
}
