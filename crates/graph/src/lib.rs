//! # Biblio Graph
//!
//! Venue / article / attribute relationship graphs.
//!
//! ## Architecture
//!
//! ```text
//! VenueCount[] (ranked venues)
//!     │
//!     ├──> RelationshipGraphBuilder
//!     │      ├─ Sample first N articles per venue (corpus order)
//!     │      ├─ Ask AttributeSource for each article's attribute
//!     │      └─ Edges: venue - article, article - attribute
//!     │
//!     └──> RelationshipGraph (petgraph, undirected)
//!            ├─ Nodes keyed by raw string value
//!            ├─ Neighbor queries by node kind
//!            └─ Export: typed node/edge payload, Graphviz DOT
//! ```
//!
//! Node identity is the string itself. A title equal to a venue name or an
//! attribute value lands on the same node; use
//! [`ArticleIdentity::VenueTitle`] when articles must stay per-venue.

mod attributes;
mod builder;
mod error;
mod graph;
mod types;

pub use attributes::{default_values, AttributeSource, Cycle, FromField, RandomChoice, COUNTRIES};
pub use biblio_protocol::NodeKind;
pub use builder::{
    ArticleIdentity, GraphBuilderConfig, RelationshipGraphBuilder, DEFAULT_SAMPLE_SIZE,
    MISSING_TITLE,
};
pub use error::{GraphError, Result};
pub use types::{GraphNode, RelationshipGraph, RelationshipType};
