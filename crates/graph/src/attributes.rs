use crate::error::{GraphError, Result};
use biblio_corpus::Record;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Default attribute values: countries, assigned independently of the record
pub const COUNTRIES: &[&str] = &[
    "USA", "UK", "Germany", "Canada", "Australia", "France", "Japan", "China", "India", "Brazil",
    "Mexico", "Italy", "South Korea", "Spain", "Russia", "Netherlands", "Turkey", "Switzerland",
    "Sweden", "Belgium", "Argentina", "Norway", "Austria", "Denmark", "South Africa", "Ireland",
    "New Zealand", "Singapore", "Finland", "Poland", "Greece", "Portugal", "Czech Republic",
    "Israel", "Chile", "Hungary", "Saudi Arabia", "Colombia", "Philippines", "Malaysia",
    "United Arab Emirates", "Thailand", "Egypt", "Indonesia", "Vietnam", "Pakistan", "Nigeria",
    "Bangladesh", "Ukraine", "Romania", "Peru", "Hong Kong", "Venezuela", "Ecuador", "Morocco",
    "Slovakia", "Bulgaria", "Croatia", "Lithuania", "Slovenia", "Estonia", "Latvia", "Serbia",
    "Iceland", "Luxembourg", "Malta", "Cyprus", "Jordan", "Uruguay", "Panama", "Bolivia",
    "Paraguay", "Honduras", "El Salvador", "Costa Rica", "Guatemala", "Trinidad and Tobago",
    "Bosnia and Herzegovina", "Macedonia", "Montenegro", "Albania", "Georgia", "Armenia",
    "Azerbaijan", "Kazakhstan",
];

/// Supplies the attribute node attached to each sampled article.
///
/// Any non-determinism in graph construction lives behind this trait; the
/// builder itself is deterministic given a deterministic source.
pub trait AttributeSource {
    fn attribute_for(&mut self, record: &Record) -> String;
}

impl<F> AttributeSource for F
where
    F: FnMut(&Record) -> String,
{
    fn attribute_for(&mut self, record: &Record) -> String {
        self(record)
    }
}

/// Uniform random pick from a fixed value set
pub struct RandomChoice {
    values: Vec<String>,
    rng: StdRng,
}

impl RandomChoice {
    /// Seeded from OS entropy; repeated builds differ
    pub fn new(values: Vec<String>) -> Result<Self> {
        Self::with_rng(values, StdRng::from_entropy())
    }

    /// Same seed, same sequence of picks
    pub fn seeded(values: Vec<String>, seed: u64) -> Result<Self> {
        Self::with_rng(values, StdRng::seed_from_u64(seed))
    }

    fn with_rng(values: Vec<String>, rng: StdRng) -> Result<Self> {
        if values.is_empty() {
            return Err(GraphError::EmptyAttributeSet);
        }
        Ok(Self { values, rng })
    }
}

impl AttributeSource for RandomChoice {
    fn attribute_for(&mut self, _record: &Record) -> String {
        // with_rng rejects empty sets
        self.values
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }
}

/// Round-robin through a value set
pub struct Cycle {
    values: Vec<String>,
    next: usize,
}

impl Cycle {
    pub fn new(values: Vec<String>) -> Result<Self> {
        if values.is_empty() {
            return Err(GraphError::EmptyAttributeSet);
        }
        Ok(Self { values, next: 0 })
    }
}

impl AttributeSource for Cycle {
    fn attribute_for(&mut self, _record: &Record) -> String {
        let value = self.values[self.next % self.values.len()].clone();
        self.next = self.next.wrapping_add(1);
        value
    }
}

/// Attribute read from a record field, with a fallback for records without it
pub struct FromField {
    field: String,
    fallback: String,
}

impl FromField {
    pub fn new(field: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            fallback: fallback.into(),
        }
    }
}

impl AttributeSource for FromField {
    fn attribute_for(&mut self, record: &Record) -> String {
        record
            .get(&self.field)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(self.fallback.as_str())
            .to_string()
    }
}

pub fn default_values() -> Vec<String> {
    COUNTRIES.iter().map(|c| c.to_string()).collect()
}
