use crate::error::{AnalysisError, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_VOCABULARY: &str = include_str!("../vocabulary/default.json");

/// Named group of canonical terms. Terms are unique within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    name: String,
    variables: Vec<String>,
}

impl Category {
    /// Duplicated variables are dropped, keeping the first occurrence
    pub fn new<I, S>(name: impl Into<String>, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: IndexSet<String> = variables.into_iter().map(Into::into).collect();
        Self {
            name: name.into(),
            variables: unique.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Canonical term -> accepted surface forms.
///
/// The canonical term is only a surface form of itself when listed
/// explicitly; a term without an entry is matched by its own name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Equivalences {
    forms: IndexMap<String, Vec<String>>,
}

impl Equivalences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register the surface forms of a canonical term
    #[must_use]
    pub fn with<I, S>(mut self, canonical: impl Into<String>, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forms
            .insert(canonical.into(), forms.into_iter().map(Into::into).collect());
        self
    }

    pub fn surface_forms<'a>(&'a self, canonical: &'a str) -> Vec<&'a str> {
        match self.forms.get(canonical) {
            Some(forms) => forms.iter().map(String::as_str).collect(),
            None => vec![canonical],
        }
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Controlled vocabulary injected into the frequency engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    categories: Vec<Category>,
    equivalences: Equivalences,
}

#[derive(Debug, Deserialize)]
struct RawVocabulary {
    categories: IndexMap<String, Vec<String>>,
    #[serde(default)]
    equivalences: Equivalences,
}

impl Vocabulary {
    pub fn new(categories: Vec<Category>, equivalences: Equivalences) -> Self {
        Self {
            categories,
            equivalences,
        }
    }

    /// Vocabulary bundled with the crate
    pub fn builtin() -> Self {
        // checked by builtin_vocabulary_parses
        Self::parse(BUILTIN_VOCABULARY.as_bytes())
            .unwrap_or_else(|err| unreachable!("bundled vocabulary is invalid: {err}"))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let vocabulary = Self::parse(&bytes)?;
        log::debug!(
            "Loaded vocabulary from {}: {} categories, {} equivalences",
            path.display(),
            vocabulary.categories.len(),
            vocabulary.equivalences.len()
        );
        Ok(vocabulary)
    }

    /// Parse a JSON document, falling back to TOML
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let raw: RawVocabulary = match serde_json::from_slice(bytes) {
            Ok(raw) => raw,
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes)
                    .map_err(|err| AnalysisError::VocabularyError(format!("{json_err}; {err}")))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    AnalysisError::VocabularyError(format!(
                        "Vocabulary is not valid JSON ({json_err}) or TOML ({toml_err})"
                    ))
                })?
            }
        };

        let categories = raw
            .categories
            .into_iter()
            .map(|(name, variables)| Category::new(name, variables))
            .collect();

        Ok(Self::new(categories, raw.equivalences))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn equivalences(&self) -> &Equivalences {
        &self.equivalences
    }
}
