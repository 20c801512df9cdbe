use super::suggestion::LocationSuggestion;

/// Popular cities shown when the query is empty.
pub const POPULAR_BROWSE_LIMIT: usize = 5;

/// The two static candidate lists: recent searches and popular cities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationCatalog {
    recent: Vec<LocationSuggestion>,
    popular: Vec<LocationSuggestion>,
}

impl LocationCatalog {
    /// Build a catalog; every recent entry is flagged `is_recent`.
    pub fn new(recent: Vec<LocationSuggestion>, popular: Vec<LocationSuggestion>) -> Self {
        let recent = recent.into_iter().map(LocationSuggestion::recent).collect();
        let popular = popular
            .into_iter()
            .map(|mut item| {
                item.is_recent = false;
                item
            })
            .collect();
        Self { recent, popular }
    }

    pub fn recent(&self) -> &[LocationSuggestion] {
        &self.recent
    }

    pub fn popular(&self) -> &[LocationSuggestion] {
        &self.popular
    }

    /// Popular cities as listed under an empty query.
    pub fn browse_popular(&self) -> &[LocationSuggestion] {
        let end = self.popular.len().min(POPULAR_BROWSE_LIMIT);
        &self.popular[..end]
    }

    /// Replace either list, keeping the other.
    pub fn with_overrides(
        self,
        recent: Option<Vec<LocationSuggestion>>,
        popular: Option<Vec<LocationSuggestion>>,
    ) -> Self {
        Self::new(
            recent.unwrap_or(self.recent),
            popular.unwrap_or(self.popular),
        )
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::new(
            vec![
                LocationSuggestion::new("1", "New York", "NY", "USA"),
                LocationSuggestion::new("2", "Los Angeles", "CA", "USA"),
                LocationSuggestion::new("3", "London", "England", "UK"),
            ],
            vec![
                LocationSuggestion::new("4", "Tokyo", "Tokyo", "Japan"),
                LocationSuggestion::new("5", "Paris", "Île-de-France", "France"),
                LocationSuggestion::new("6", "Sydney", "NSW", "Australia"),
                LocationSuggestion::new("7", "Dubai", "Dubai", "UAE"),
                LocationSuggestion::new("8", "Singapore", "Singapore", "Singapore"),
            ],
        )
    }
}
