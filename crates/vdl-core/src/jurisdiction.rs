//! # Jurisdiction Table
//!
//! The fifty U.S. states, keyed by two-letter postal code. Each state gets
//! one credential fixture, and its postal code becomes the license's
//! `issuing_authority` claim.

use serde::Serialize;

/// A U.S. state participating in the fixture set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct State {
    /// Two-letter postal code (e.g. "CA").
    pub code: &'static str,
    /// Full state name (e.g. "California"), used as the fixture name.
    pub name: &'static str,
}

/// All fifty states, in alphabetical order by name.
pub const STATES: [State; 50] = [
    State { code: "AL", name: "Alabama" },
    State { code: "AK", name: "Alaska" },
    State { code: "AZ", name: "Arizona" },
    State { code: "AR", name: "Arkansas" },
    State { code: "CA", name: "California" },
    State { code: "CO", name: "Colorado" },
    State { code: "CT", name: "Connecticut" },
    State { code: "DE", name: "Delaware" },
    State { code: "FL", name: "Florida" },
    State { code: "GA", name: "Georgia" },
    State { code: "HI", name: "Hawaii" },
    State { code: "ID", name: "Idaho" },
    State { code: "IL", name: "Illinois" },
    State { code: "IN", name: "Indiana" },
    State { code: "IA", name: "Iowa" },
    State { code: "KS", name: "Kansas" },
    State { code: "KY", name: "Kentucky" },
    State { code: "LA", name: "Louisiana" },
    State { code: "ME", name: "Maine" },
    State { code: "MD", name: "Maryland" },
    State { code: "MA", name: "Massachusetts" },
    State { code: "MI", name: "Michigan" },
    State { code: "MN", name: "Minnesota" },
    State { code: "MS", name: "Mississippi" },
    State { code: "MO", name: "Missouri" },
    State { code: "MT", name: "Montana" },
    State { code: "NE", name: "Nebraska" },
    State { code: "NV", name: "Nevada" },
    State { code: "NH", name: "New Hampshire" },
    State { code: "NJ", name: "New Jersey" },
    State { code: "NM", name: "New Mexico" },
    State { code: "NY", name: "New York" },
    State { code: "NC", name: "North Carolina" },
    State { code: "ND", name: "North Dakota" },
    State { code: "OH", name: "Ohio" },
    State { code: "OK", name: "Oklahoma" },
    State { code: "OR", name: "Oregon" },
    State { code: "PA", name: "Pennsylvania" },
    State { code: "RI", name: "Rhode Island" },
    State { code: "SC", name: "South Carolina" },
    State { code: "SD", name: "South Dakota" },
    State { code: "TN", name: "Tennessee" },
    State { code: "TX", name: "Texas" },
    State { code: "UT", name: "Utah" },
    State { code: "VT", name: "Vermont" },
    State { code: "VA", name: "Virginia" },
    State { code: "WA", name: "Washington" },
    State { code: "WV", name: "West Virginia" },
    State { code: "WI", name: "Wisconsin" },
    State { code: "WY", name: "Wyoming" },
];

/// Look up a state's full name by its postal code.
///
/// Returns `"Unknown"` for codes outside the fifty-state table, matching
/// the behavior report templates rely on.
pub fn state_name(code: &str) -> &'static str {
    STATES
        .iter()
        .find(|s| s.code == code)
        .map(|s| s.name)
        .unwrap_or("Unknown")
}
