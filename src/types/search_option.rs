use serde::{Deserialize, Serialize};

use crate::services::maps_client::types::google_autocomplete_response::GoogleAutocompleteResponsePrediction;

/// One row of the suggestion list. Two options are the same option when they
/// point at the same place, whatever their labels say.
#[derive(Serialize, Deserialize, Debug, Clone, Eq)]
pub struct SearchOption {
    pub label: String,
    pub value: String,
}

impl SearchOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl PartialEq for SearchOption {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<GoogleAutocompleteResponsePrediction> for SearchOption {
    fn from(p: GoogleAutocompleteResponsePrediction) -> Self {
        Self {
            label: p.description,
            value: p.place_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_value() {
        assert_eq!(
            SearchOption::new("Paris, France", "p1"),
            SearchOption::new("Paris", "p1")
        );
        assert_ne!(
            SearchOption::new("Paris", "p1"),
            SearchOption::new("Paris", "p2")
        );
    }

    #[test]
    fn from_prediction() {
        let option = SearchOption::from(GoogleAutocompleteResponsePrediction {
            description: "Paris, France".to_string(),
            place_id: "p1".to_string(),
        });

        assert_eq!(option.label, "Paris, France");
        assert_eq!(option.value, "p1");
    }
}
