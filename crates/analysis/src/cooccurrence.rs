use biblio_corpus::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAIR_LIMIT: usize = 15;

/// How often a (field_a, field_b) value pair occurs across the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCount {
    pub value_a: String,
    pub value_b: String,
    pub count: u64,
}

impl PairCount {
    /// Bar-chart label, `"{a} - {b}"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.value_a, self.value_b)
    }
}

/// Most frequent value pairs of two fields.
///
/// Records missing either field are skipped. Ties keep first-seen order.
pub fn top_pairs(records: &[Record], field_a: &str, field_b: &str, limit: usize) -> Vec<PairCount> {
    let mut counts: IndexMap<(&str, &str), u64> = IndexMap::new();
    for record in records {
        if let (Some(a), Some(b)) = (record.get(field_a), record.get(field_b)) {
            *counts.entry((a, b)).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<PairCount> = counts
        .into_iter()
        .map(|((a, b), count)| PairCount {
            value_a: a.to_string(),
            value_b: b.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|x, y| y.count.cmp(&x.count));
    ranked.truncate(limit);

    log::debug!(
        "Ranked {} pairs for ({field_a}, {field_b}), limit {limit}",
        ranked.len()
    );
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(year: Option<&str>, kind: Option<&str>) -> Record {
        let mut record = Record::new();
        if let Some(year) = year {
            record.insert("year", year);
        }
        if let Some(kind) = kind {
            record.insert("type", kind);
        }
        record
    }

    #[test]
    fn pairs_ranked_by_count_with_stable_ties() {
        let records = vec![
            rec(Some("2020"), Some("article")),
            rec(Some("2021"), Some("inproceedings")),
            rec(Some("2021"), Some("article")),
            rec(Some("2021"), Some("inproceedings")),
            rec(Some("2020"), Some("book")),
        ];
        let pairs = top_pairs(&records, "year", "type", 15);
        let labels: Vec<_> = pairs.iter().map(|p| (p.label(), p.count)).collect();
        assert_eq!(
            labels,
            vec![
                ("2021 - inproceedings".to_string(), 2),
                ("2020 - article".to_string(), 1),
                ("2021 - article".to_string(), 1),
                ("2020 - book".to_string(), 1),
            ]
        );
    }

    #[test]
    fn records_missing_a_field_are_excluded() {
        let records = vec![
            rec(Some("2020"), None),
            rec(None, Some("article")),
            rec(Some("2020"), Some("article")),
        ];
        let pairs = top_pairs(&records, "year", "type", 15);
        assert_eq!(pairs.len(), 1);
        let total: u64 = pairs.iter().map(|p| p.count).sum();
        assert!(total <= 1);
    }

    #[test]
    fn limit_truncates() {
        let records: Vec<_> = (0..20)
            .map(|i| rec(Some(&i.to_string()), Some("article")))
            .collect();
        assert_eq!(top_pairs(&records, "year", "type", DEFAULT_PAIR_LIMIT).len(), 15);
        assert!(top_pairs(&records, "year", "type", 0).is_empty());
    }
}
