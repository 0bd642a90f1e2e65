use crate::models::media::MediaFile;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    Add,
    Remove,
}

impl OperationKind {
    /// Numeric code the tag mutation endpoint expects.
    pub fn code(self) -> u8 {
        match self {
            OperationKind::Add => 1,
            OperationKind::Remove => 0,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::Add => t!("manage_tags.operation.add"),
            OperationKind::Remove => t!("manage_tags.operation.remove"),
        };
        write!(f, "{}", s)
    }
}

/// One batch tag mutation, built per user action and discarded afterwards.
#[derive(Debug, Clone)]
pub struct TagOperation {
    pub urls: Vec<String>,
    pub tags: Vec<String>,
    pub kind: OperationKind,
}

/// Filters for a media search. Filters are independent and combine with
/// logical AND; an empty query matches everything.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchQuery {
    /// Tag name to minimum count.
    pub tags: BTreeMap<String, u32>,
    pub species: Vec<String>,
    pub thumbnail_url: Option<String>,
}

impl SearchQuery {
    pub fn new() -> SearchQuery {
        SearchQuery::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.species.is_empty() && self.thumbnail_url.is_none()
    }

    /// Pure filter semantics, applied to files already in hand.
    pub fn matches(&self, file: &MediaFile) -> bool {
        let tags_ok = self.tags.iter().all(|(name, min_count)| {
            file.tags
                .iter()
                .any(|tag| tag.name == *name && tag.count >= *min_count)
        });

        let species_ok = self.species.is_empty()
            || self.species.iter().any(|species| {
                file.tags
                    .iter()
                    .any(|tag| tag.name.eq_ignore_ascii_case(species))
            });

        let thumbnail_ok = match &self.thumbnail_url {
            Some(url) => file.thumbnail_url.as_deref() == Some(url.as_str()),
            None => true,
        };

        tags_ok && species_ok && thumbnail_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::{MediaType, Tag};

    fn robin_file() -> MediaFile {
        MediaFile {
            id: "1".to_string(),
            file_name: "robin.jpg".to_string(),
            file_type: MediaType::Image,
            file_url: "https://x/robin.jpg".to_string(),
            thumbnail_url: Some("https://x/thumb/robin.jpg".to_string()),
            tags: vec![Tag::new("robin", 3), Tag::new("bird", 1)],
            upload_date: String::new(),
            user_id: "user123".to_string(),
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(SearchQuery::new().matches(&robin_file()));
    }

    #[test]
    fn test_tag_count_is_a_minimum() {
        let mut query = SearchQuery::new();
        query.tags.insert("robin".to_string(), 3);
        assert!(query.matches(&robin_file()));

        query.tags.insert("robin".to_string(), 4);
        assert!(!query.matches(&robin_file()));
    }

    #[test]
    fn test_missing_tag_does_not_match() {
        let mut query = SearchQuery::new();
        query.tags.insert("owl".to_string(), 1);
        assert!(!query.matches(&robin_file()));
    }

    #[test]
    fn test_species_match_is_case_insensitive() {
        let mut query = SearchQuery::new();
        query.species.push("Robin".to_string());
        assert!(query.matches(&robin_file()));
    }

    #[test]
    fn test_thumbnail_match_is_exact() {
        let mut query = SearchQuery::new();
        query.thumbnail_url = Some("https://x/thumb/robin.jpg".to_string());
        assert!(query.matches(&robin_file()));

        query.thumbnail_url = Some("https://x/thumb/robin.jpg?w=300".to_string());
        assert!(!query.matches(&robin_file()));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let mut query = SearchQuery::new();
        query.tags.insert("robin".to_string(), 1);
        query.species.push("eagle".to_string());
        // tag filter passes, species filter fails, so the whole query fails
        assert!(!query.matches(&robin_file()));
    }

    #[test]
    fn test_operation_codes() {
        assert_eq!(OperationKind::Add.code(), 1);
        assert_eq!(OperationKind::Remove.code(), 0);
    }
}
