//! # Biblio Analysis
//!
//! Analytical views over a loaded corpus.
//!
//! ## Views
//!
//! - **Keyword frequency** - vocabulary surface forms counted inside abstracts
//! - **Combined frequency** - the same counts merged across categories
//! - **Co-occurrence** - most frequent value pairs of two record fields
//! - **Venue ranking** - journals (or ISSNs) with the most records
//!
//! Every view is a pure function of its inputs; nothing here mutates the
//! corpus or keeps global state.
//!
//! ## Example
//!
//! ```rust
//! use biblio_analysis::{analyze, Category, Equivalences, Vocabulary};
//! use biblio_corpus::Record;
//!
//! let vocabulary = Vocabulary::new(
//!     vec![Category::new("Tools", ["Scratch"])],
//!     Equivalences::new(),
//! );
//! let records = vec![Record::new().with("abstract", "Scratch in class")];
//! let table = analyze(&records, &vocabulary);
//! assert_eq!(table.get("Tools", "scratch"), Some(1));
//! ```

mod cooccurrence;
mod error;
mod frequency;
mod session;
mod venues;
mod vocabulary;

pub use cooccurrence::{top_pairs, PairCount, DEFAULT_PAIR_LIMIT};
pub use error::{AnalysisError, Result};
pub use frequency::{
    analyze, combined_frequencies, CombinedFrequencies, FrequencyEngine, FrequencyTable,
};
pub use session::AnalysisSession;
pub use venues::{resolve_venue, top_venues, VenueCount, DEFAULT_VENUE_LIMIT};
pub use vocabulary::{Category, Equivalences, Vocabulary};
