use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voyra_shared::Masked;

use crate::roster::GuestRoster;

/// Form-level contact details for the billing guest. Masked so the values
/// never show up in Debug output or traces.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: Masked<String>,
    pub phone: Masked<String>,
}

impl ContactDetails {
    pub fn set_email(&mut self, email: &str) {
        self.email = Masked(email.to_string());
    }

    pub fn set_phone(&mut self, phone: &str) {
        self.phone = Masked(phone.to_string());
    }

    pub fn has_email(&self) -> bool {
        !self.email.inner().trim().is_empty()
    }

    pub fn has_phone(&self) -> bool {
        !self.phone.inner().trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("The billing guest's first and last name are required")]
    MissingLeadGuest,

    #[error("A contact email is required")]
    MissingEmail,

    #[error("A contact phone number is required")]
    MissingPhone,

    #[error("Guest {index} is missing a first or last name")]
    IncompleteAdult { index: usize },

    #[error("Child {index} is missing a first or last name")]
    IncompleteChild { index: usize },

    #[error("Child {index} age must be between 1 and 17, got {age}")]
    ChildAgeOutOfRange { index: usize, age: i64 },

    #[error("Occupancy ({adults} adults, {children} children) does not match the guest list")]
    OccupancyMismatch { adults: u32, children: u32 },
}

/// The long-lived editing state behind the booking form: guest roster plus
/// contact details. Everything here survives a failed submission; only a
/// declined or rejected price change resets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub id: Uuid,
    pub roster: GuestRoster,
    pub contact: ContactDetails,
    pub special_requests: Option<String>,
}

impl BookingDraft {
    pub fn new(adults: usize, children: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            roster: GuestRoster::new(adults, children),
            contact: ContactDetails::default(),
            special_requests: None,
        }
    }

    /// Re-sync the roster after the occupancy selection changes.
    pub fn set_occupancy(&mut self, adults: usize, children: usize) {
        self.roster.resize(adults, children);
    }

    /// The submission gate. Checked fresh on every call; the first problem
    /// found is returned so the user gets one actionable message at a time.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.roster.lead_guest() {
            Some(lead) if lead.is_complete() => {}
            _ => return Err(ValidationError::MissingLeadGuest),
        }

        if !self.contact.has_email() {
            return Err(ValidationError::MissingEmail);
        }
        if !self.contact.has_phone() {
            return Err(ValidationError::MissingPhone);
        }

        for (index, adult) in self.roster.adults().iter().enumerate().skip(1) {
            if !adult.is_complete() {
                return Err(ValidationError::IncompleteAdult { index });
            }
        }

        for (index, child) in self.roster.children().iter().enumerate() {
            if child.first_name.trim().is_empty() || child.last_name.trim().is_empty() {
                return Err(ValidationError::IncompleteChild { index });
            }
            if !child.has_valid_age() {
                return Err(ValidationError::ChildAgeOutOfRange {
                    index,
                    age: child.age,
                });
            }
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Discard everything the user entered while keeping the occupancy shape.
    /// Used when a price change invalidates the draft's pricing context.
    pub fn reset(&mut self) {
        let adults = self.roster.adult_count();
        let children = self.roster.child_count();
        self.roster = GuestRoster::new(adults, children);
        self.contact = ContactDetails::default();
        self.special_requests = None;
    }
}
