use serde::{Deserialize, Serialize};

pub const MIN_CHILD_AGE: i64 = 1;
pub const MAX_CHILD_AGE: i64 = 17;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdultGuest {
    pub first_name: String,
    pub last_name: String,
}

impl AdultGuest {
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChildGuest {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

impl ChildGuest {
    pub fn has_valid_age(&self) -> bool {
        (MIN_CHILD_AGE..=MAX_CHILD_AGE).contains(&self.age)
    }

    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && self.has_valid_age()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdultField {
    FirstName,
    LastName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildField {
    FirstName,
    LastName,
    Age,
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("No adult guest at index {0}")]
    AdultOutOfRange(usize),

    #[error("No child guest at index {0}")]
    ChildOutOfRange(usize),
}

/// Per-guest input state for one room, kept in sync with the occupancy counts
/// selected in the search. Adult index 0 is the billing contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuestRoster {
    adults: Vec<AdultGuest>,
    children: Vec<ChildGuest>,
}

impl GuestRoster {
    pub fn new(adults: usize, children: usize) -> Self {
        let mut roster = Self::default();
        roster.resize(adults, children);
        roster
    }

    /// Grow or truncate both guest arrays to the given occupancy counts.
    /// Entries at surviving indices keep whatever the user already typed;
    /// new entries start blank. Must run whenever the counts change.
    pub fn resize(&mut self, adults: usize, children: usize) {
        self.adults.resize_with(adults, AdultGuest::default);
        self.children.resize_with(children, ChildGuest::default);
    }

    pub fn adult_count(&self) -> usize {
        self.adults.len()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn adults(&self) -> &[AdultGuest] {
        &self.adults
    }

    pub fn children(&self) -> &[ChildGuest] {
        &self.children
    }

    pub fn set_adult_field(
        &mut self,
        index: usize,
        field: AdultField,
        value: &str,
    ) -> Result<(), RosterError> {
        let adult = self
            .adults
            .get_mut(index)
            .ok_or(RosterError::AdultOutOfRange(index))?;

        match field {
            AdultField::FirstName => adult.first_name = value.to_string(),
            AdultField::LastName => adult.last_name = value.to_string(),
        }
        Ok(())
    }

    /// Age arrives as raw text from an input control; unparseable values
    /// coerce to 0, which fails validation until corrected.
    pub fn set_child_field(
        &mut self,
        index: usize,
        field: ChildField,
        value: &str,
    ) -> Result<(), RosterError> {
        let child = self
            .children
            .get_mut(index)
            .ok_or(RosterError::ChildOutOfRange(index))?;

        match field {
            ChildField::FirstName => child.first_name = value.to_string(),
            ChildField::LastName => child.last_name = value.to_string(),
            ChildField::Age => child.age = value.trim().parse::<i64>().unwrap_or(0),
        }
        Ok(())
    }

    /// The billing contact, when one exists.
    pub fn lead_guest(&self) -> Option<&AdultGuest> {
        self.adults.first()
    }

    pub fn lead_guest_name(&self) -> Option<String> {
        self.lead_guest()
            .filter(|lead| lead.is_complete())
            .map(|lead| format!("{} {}", lead.first_name.trim(), lead.last_name.trim()))
    }

    /// Comma-joined child ages, the shape the reservation API expects.
    pub fn child_ages_csv(&self) -> String {
        self.children
            .iter()
            .map(|c| c.age.to_string())
            .collect::<Vec<String>>()
            .join(",")
    }

    /// True iff every guest record is filled in: names on every adult and
    /// child, and every child age within the bookable range.
    pub fn is_complete(&self) -> bool {
        !self.adults.is_empty()
            && self.adults.iter().all(AdultGuest::is_complete)
            && self.children.iter().all(ChildGuest::is_complete)
    }
}
