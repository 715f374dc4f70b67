pub mod draft;
pub mod intent;
pub mod itinerary;
pub mod roster;

pub use draft::{BookingDraft, ContactDetails, ValidationError};
pub use intent::{BookingIntent, LocaleContext, LoyaltyFlags, QuotedPrice};
pub use itinerary::{StayItinerary, ROOMS_PER_BOOKING};
pub use roster::{AdultField, AdultGuest, ChildField, ChildGuest, GuestRoster, RosterError};
