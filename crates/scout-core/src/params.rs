//! Search parameters edited through the form.

use serde::{Deserialize, Serialize};

/// One of the five editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Product,
    Applications,
    Regions,
    Industries,
    Keywords,
}

impl SearchField {
    /// All fields in form order.
    pub const ALL: [SearchField; 5] = [
        SearchField::Product,
        SearchField::Applications,
        SearchField::Regions,
        SearchField::Industries,
        SearchField::Keywords,
    ];

    /// Label shown above the input.
    pub fn label(self) -> &'static str {
        match self {
            SearchField::Product => "Product",
            SearchField::Applications => "Target applications",
            SearchField::Regions => "Regions",
            SearchField::Industries => "Industries",
            SearchField::Keywords => "Search hints / keywords",
        }
    }

    /// Literal the field starts with.
    pub fn default_value(self) -> &'static str {
        match self {
            SearchField::Product => "Melexis Triaxis (3D magnetic position)",
            SearchField::Applications => {
                "steer-by-wire, brake-by-wire, pedals, pumps, valves, selectors"
            }
            SearchField::Regions => "China, EU, US",
            SearchField::Industries => "Automotive, Industrial Automation, Robotics",
            SearchField::Keywords => "stray-field robust, ASIL, rotary, linear, angle",
        }
    }
}

/// The free-text inputs describing a prospecting query.
///
/// No validation is applied: every field accepts any string, including empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    pub product: String,
    pub applications: String,
    pub regions: String,
    pub industries: String,
    pub keywords: String,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            product: SearchField::Product.default_value().to_string(),
            applications: SearchField::Applications.default_value().to_string(),
            regions: SearchField::Regions.default_value().to_string(),
            industries: SearchField::Industries.default_value().to_string(),
            keywords: SearchField::Keywords.default_value().to_string(),
        }
    }
}

impl SearchParameters {
    /// Read a field.
    pub fn get(&self, field: SearchField) -> &str {
        match field {
            SearchField::Product => &self.product,
            SearchField::Applications => &self.applications,
            SearchField::Regions => &self.regions,
            SearchField::Industries => &self.industries,
            SearchField::Keywords => &self.keywords,
        }
    }

    /// Replace a field, returning the previous value.
    pub fn replace(&mut self, field: SearchField, value: impl Into<String>) -> String {
        let slot = match field {
            SearchField::Product => &mut self.product,
            SearchField::Applications => &mut self.applications,
            SearchField::Regions => &mut self.regions,
            SearchField::Industries => &mut self.industries,
            SearchField::Keywords => &mut self.keywords,
        };
        std::mem::replace(slot, value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_field_literals() {
        let params = SearchParameters::default();
        for field in SearchField::ALL {
            assert_eq!(params.get(field), field.default_value());
        }
        assert_eq!(params.regions, "China, EU, US");
    }

    #[test]
    fn test_replace_returns_old_value() {
        let mut params = SearchParameters::default();

        let old = params.replace(SearchField::Regions, "Japan");
        assert_eq!(old, "China, EU, US");
        assert_eq!(params.regions, "Japan");

        // Other fields untouched
        assert_eq!(params.product, SearchField::Product.default_value());
    }

    #[test]
    fn test_replace_accepts_empty() {
        let mut params = SearchParameters::default();
        params.replace(SearchField::Keywords, "");
        assert_eq!(params.get(SearchField::Keywords), "");
    }

    #[test]
    fn test_labels() {
        assert_eq!(SearchField::Applications.label(), "Target applications");
        assert_eq!(SearchField::Keywords.label(), "Search hints / keywords");
    }
}
