//! # Biblio Corpus
//!
//! Loading and querying of bibliographic records.
//!
//! ## Pipeline
//!
//! ```text
//! .bib / .json file
//!     │
//!     ├──> CorpusSource (biblatex / serde_json)
//!     │      └─> Record[] (field -> value)
//!     │
//!     └──> CorpusStore (read-only after load)
//!            ├─ filter / unique_values / get_by_id
//!            └─ SharedCorpus (atomic snapshot swap)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use biblio_corpus::{source_for_path, CorpusStore};
//!
//! let source = source_for_path("corpus.bib").unwrap();
//! let store = CorpusStore::load(source.as_ref());
//! println!("{} records", store.count());
//! ```

mod error;
mod record;
mod shared;
mod source;
mod store;

pub use error::{CorpusError, Result};
pub use record::{fields, Record};
pub use shared::SharedCorpus;
pub use source::{source_for_path, BibtexFile, CorpusSource, InMemory, JsonFile};
pub use store::CorpusStore;
