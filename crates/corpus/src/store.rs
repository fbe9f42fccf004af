use crate::error::Result;
use crate::record::{fields, Record};
use crate::source::CorpusSource;
use std::collections::BTreeSet;

/// Loaded bibliographic records. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    records: Vec<Record>,
}

impl CorpusStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load from `source`, recovering from failure with an empty corpus.
    ///
    /// Analytical callers never see the load error; they simply work on zero
    /// records. Use [`CorpusStore::try_load`] when the failure must be reported.
    pub fn load(source: &dyn CorpusSource) -> Self {
        match Self::try_load(source) {
            Ok(store) => store,
            Err(err) => {
                log::warn!(
                    "Failed to load corpus from {}: {}; continuing with 0 records",
                    source.describe(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn try_load(source: &dyn CorpusSource) -> Result<Self> {
        let records = source.read_records()?;
        log::info!(
            "Loaded {} records from {}",
            records.len(),
            source.describe()
        );
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records where `field` is present and contains `value` (case-sensitive)
    pub fn filter(&self, field: &str, value: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.get(field).is_some_and(|v| v.contains(value)))
            .collect()
    }

    pub fn unique_values(&self, field: &str) -> BTreeSet<String> {
        self.records
            .iter()
            .filter_map(|r| r.get(field))
            .map(str::to_string)
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Record> {
        let found = self.records.iter().find(|r| r.id() == Some(id));
        if found.is_none() {
            log::debug!("Record with id {id} not found");
        }
        found
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Abstract text of every record that has one
    pub fn abstracts(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|r| r.get(fields::ABSTRACT))
            .collect()
    }
}
