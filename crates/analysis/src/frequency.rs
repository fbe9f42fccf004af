use crate::vocabulary::Vocabulary;
use biblio_corpus::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category name -> lowercased surface form -> occurrences across abstracts.
///
/// Keys are surface forms, not canonical terms: "classical test theory" and
/// "ctt" are separate buckets even though they name the same concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    categories: IndexMap<String, IndexMap<String, u64>>,
}

impl FrequencyTable {
    pub fn get(&self, category: &str, form: &str) -> Option<u64> {
        self.categories.get(category)?.get(form).copied()
    }

    pub fn category(&self, name: &str) -> Option<&IndexMap<String, u64>> {
        self.categories.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, u64>)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn total(&self) -> u64 {
        self.categories.values().flat_map(|c| c.values()).sum()
    }
}

/// Surface form -> total count summed across categories (word cloud input)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinedFrequencies {
    terms: IndexMap<String, u64>,
}

impl CombinedFrequencies {
    pub fn get(&self, form: &str) -> Option<u64> {
        self.terms.get(form).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Highest counts first; ties keep table order
    pub fn top(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> =
            self.terms.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

/// Merge every category of `table` into one term -> count map
pub fn combined_frequencies(table: &FrequencyTable) -> CombinedFrequencies {
    let mut terms: IndexMap<String, u64> = IndexMap::new();
    for (_, forms) in table.iter() {
        for (form, &count) in forms {
            *terms.entry(form.clone()).or_insert(0) += count;
        }
    }
    CombinedFrequencies { terms }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Matcher {
    Whole(String),
    /// "x - y" counts x and y independently. Over-counts when either part
    /// occurs outside the compound.
    Split(String, String),
}

impl Matcher {
    fn for_form(form: &str) -> Self {
        match form.split_once('-') {
            Some((left, right)) => Self::Split(left.trim().to_string(), right.trim().to_string()),
            None => Self::Whole(form.to_string()),
        }
    }

    fn count_in(&self, text: &str) -> u64 {
        match self {
            Self::Whole(needle) => count_occurrences(text, needle),
            Self::Split(left, right) => {
                count_occurrences(text, left) + count_occurrences(text, right)
            }
        }
    }
}

/// Non-overlapping, left-to-right substring count; an empty needle never matches
fn count_occurrences(haystack: &str, needle: &str) -> u64 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u64
}

struct FormSlot {
    category: usize,
    key: String,
    matcher: Matcher,
}

/// Counts vocabulary surface forms inside record abstracts.
///
/// Matchers are compiled once from the vocabulary, so one engine can be run
/// over several corpora.
pub struct FrequencyEngine {
    category_names: Vec<String>,
    slots: Vec<FormSlot>,
}

impl FrequencyEngine {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let equivalences = vocabulary.equivalences();
        let mut category_names = Vec::with_capacity(vocabulary.categories().len());
        let mut slots = Vec::new();

        for (idx, category) in vocabulary.categories().iter().enumerate() {
            category_names.push(category.name().to_string());
            for variable in category.variables() {
                for form in equivalences.surface_forms(variable) {
                    let key = form.to_lowercase();
                    let matcher = Matcher::for_form(&key);
                    slots.push(FormSlot {
                        category: idx,
                        key,
                        matcher,
                    });
                }
            }
        }

        Self {
            category_names,
            slots,
        }
    }

    pub fn analyze(&self, records: &[Record]) -> FrequencyTable {
        log::debug!(
            "Starting frequency analysis: {} records, {} surface forms",
            records.len(),
            self.slots.len()
        );

        let mut buckets: Vec<IndexMap<String, u64>> =
            vec![IndexMap::new(); self.category_names.len()];
        for slot in &self.slots {
            buckets[slot.category].entry(slot.key.clone()).or_insert(0);
        }

        for record in records {
            let text = record.abstract_text().unwrap_or_default().to_lowercase();
            if text.is_empty() {
                continue;
            }
            for slot in &self.slots {
                let count = slot.matcher.count_in(&text);
                if count > 0 {
                    if let Some(total) = buckets[slot.category].get_mut(&slot.key) {
                        *total += count;
                    }
                }
            }
        }

        let categories = self
            .category_names
            .iter()
            .cloned()
            .zip(buckets)
            .collect();

        let table = FrequencyTable { categories };
        log::debug!("Finished frequency analysis: {} total hits", table.total());
        table
    }
}

/// One-shot frequency analysis
pub fn analyze(records: &[Record], vocabulary: &Vocabulary) -> FrequencyTable {
    FrequencyEngine::new(vocabulary).analyze(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{Category, Equivalences};
    use pretty_assertions::assert_eq;

    fn record(text: &str) -> Record {
        Record::new().with("abstract", text)
    }

    fn single(category: &str, variables: &[&str], eq: Equivalences) -> Vocabulary {
        Vocabulary::new(
            vec![Category::new(category, variables.iter().copied())],
            eq,
        )
    }

    #[test]
    fn count_is_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("abc", ""), 0);
        assert_eq!(count_occurrences("", "a"), 0);
    }

    #[test]
    fn hyphenated_form_counts_both_parts_independently() {
        let vocabulary = single("Tools", &["Self-efficacy"], Equivalences::new());
        let records = vec![record("self report of efficacy; self-efficacy scale")];
        let table = analyze(&records, &vocabulary);
        // "self" x2 + "efficacy" x2, the compound itself is never matched whole
        assert_eq!(table.get("Tools", "self-efficacy"), Some(4));
    }

    #[test]
    fn split_is_on_first_hyphen_only() {
        assert_eq!(
            Matcher::for_form("cta - cta-ces"),
            Matcher::Split("cta".to_string(), "cta-ces".to_string())
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let vocabulary = single("Tools", &["Scratch"], Equivalences::new());
        let table = analyze(&[record("SCRATCH and scratch")], &vocabulary);
        assert_eq!(table.get("Tools", "scratch"), Some(2));
    }

    #[test]
    fn substring_matching_is_lossy() {
        let vocabulary = single("Tools", &["Scratch", "ScratchJr"], Equivalences::new());
        let table = analyze(&[record("ScratchJr")], &vocabulary);
        assert_eq!(table.get("Tools", "scratch"), Some(1));
        assert_eq!(table.get("Tools", "scratchjr"), Some(1));
    }

    #[test]
    fn missing_abstract_contributes_zero() {
        let vocabulary = single("Tools", &["Scratch"], Equivalences::new());
        let table = analyze(&[Record::new().with("title", "Scratch")], &vocabulary);
        assert_eq!(table.get("Tools", "scratch"), Some(0));
    }

    #[test]
    fn empty_corpus_still_lists_every_form() {
        let eq = Equivalences::new().with("Item Response Theory", ["Item Response Theory", "IRT"]);
        let vocabulary = single("Psychometrics", &["Item Response Theory", "Validity"], eq);
        let table = analyze(&[], &vocabulary);
        let forms: Vec<_> = table
            .category("Psychometrics")
            .unwrap()
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(
            forms,
            vec![("item response theory", 0), ("irt", 0), ("validity", 0)]
        );
    }

    #[test]
    fn same_form_in_one_category_accumulates() {
        let eq = Equivalences::new()
            .with("A", ["shared"])
            .with("B", ["Shared"]);
        let vocabulary = single("C", &["A", "B"], eq);
        let table = analyze(&[record("shared")], &vocabulary);
        assert_eq!(table.category("C").unwrap().len(), 1);
        assert_eq!(table.get("C", "shared"), Some(2));
    }

    #[test]
    fn combined_frequencies_sum_across_categories() {
        let vocabulary = Vocabulary::new(
            vec![
                Category::new("Skills", ["Programming"]),
                Category::new("Medium", ["Programming", "Robotics"]),
            ],
            Equivalences::new(),
        );
        let table = analyze(&[record("programming robotics programming")], &vocabulary);
        let combined = combined_frequencies(&table);
        assert_eq!(combined.get("programming"), Some(4));
        assert_eq!(combined.get("robotics"), Some(1));
        assert_eq!(combined.top(1), vec![("programming", 4)]);
    }
}
