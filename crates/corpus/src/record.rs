use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Conventional field names read by the analysis layers
pub mod fields {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const ABSTRACT: &str = "abstract";
    pub const JOURNAL: &str = "journal";
    pub const ISSN: &str = "issn";
}

/// One bibliographic entry: field name -> value, in source order.
///
/// A missing field (`None`) and a present-but-empty field (`Some("")`) are
/// different things; callers decide what "empty" means for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a field
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn id(&self) -> Option<&str> {
        self.get(fields::ID)
    }

    pub fn title(&self) -> Option<&str> {
        self.get(fields::TITLE)
    }

    pub fn abstract_text(&self) -> Option<&str> {
        self.get(fields::ABSTRACT)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_fields_differ() {
        let record = Record::new().with("journal", "");
        assert_eq!(record.get("journal"), Some(""));
        assert_eq!(record.get("issn"), None);
        assert!(record.has("journal"));
        assert!(!record.has("issn"));
    }

    #[test]
    fn serializes_as_flat_object_in_insertion_order() {
        let record: Record = [("id", "k1"), ("title", "T"), ("abstract", "A")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"k1","title":"T","abstract":"A"}"#);
    }
}
