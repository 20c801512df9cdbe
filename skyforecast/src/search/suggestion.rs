use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A location the dropdown can offer.
///
/// Two suggestions are the same entry when their ids match, whatever the
/// other fields say.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationSuggestion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub is_recent: bool,
}

impl LocationSuggestion {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        region: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region: region.into(),
            country: country.into(),
            is_recent: false,
        }
    }

    /// Mark as coming from the recent-searches list.
    pub fn recent(mut self) -> Self {
        self.is_recent = true;
        self
    }

    /// `"Name, Region, Country"`, the string handed to the page on a pick.
    ///
    /// Missing parts stay as empty segments: `"Tokyo, , Japan"`.
    pub fn display_label(&self) -> String {
        format!("{}, {}, {}", self.name, self.region, self.country)
    }

    /// Secondary line shown under the name in the dropdown.
    pub fn detail(&self) -> String {
        format!("{}, {}", self.region, self.country)
    }

    /// Case-insensitive substring match on name, region or country.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.name, &self.region, &self.country]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl PartialEq for LocationSuggestion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LocationSuggestion {}

impl Hash for LocationSuggestion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_display_label() {
        let tokyo = LocationSuggestion::new("4", "Tokyo", "Tokyo", "Japan");
        assert_eq!(tokyo.display_label(), "Tokyo, Tokyo, Japan");
        assert_eq!(tokyo.detail(), "Tokyo, Japan");
    }

    #[test]
    fn test_missing_fields_become_empty_segments() {
        let item: LocationSuggestion = toml::from_str(
            r#"
            id = "x"
            name = "Atlantis"
            "#,
        )
        .unwrap();

        assert_eq!(item.display_label(), "Atlantis, , ");
        assert!(!item.is_recent);

        let no_region = LocationSuggestion::new("y", "Tokyo", "", "Japan");
        assert_eq!(no_region.display_label(), "Tokyo, , Japan");
    }

    #[test]
    fn test_equality_is_by_id() {
        let a = LocationSuggestion::new("4", "Tokyo", "Tokyo", "Japan");
        let b = LocationSuggestion::new("4", "Tōkyō", "", "");
        let c = LocationSuggestion::new("5", "Tokyo", "Tokyo", "Japan");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_matches_any_field() {
        let paris = LocationSuggestion::new("5", "Paris", "Île-de-France", "France");
        assert!(paris.matches_lowercase("par"));
        assert!(paris.matches_lowercase("île"));
        assert!(paris.matches_lowercase("fran"));
        assert!(!paris.matches_lowercase("tok"));
    }
}
