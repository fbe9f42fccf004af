use crate::attributes::AttributeSource;
use crate::types::{RelationshipGraph, RelationshipType};
use biblio_analysis::{resolve_venue, VenueCount};
use biblio_corpus::Record;
use biblio_protocol::NodeKind;

pub const DEFAULT_SAMPLE_SIZE: usize = 5;
pub const MISSING_TITLE: &str = "No title";

/// How article nodes are keyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleIdentity {
    /// Raw title; equal titles under different venues share one node
    #[default]
    Title,

    /// `"{venue} / {title}"`, one node per venue even for equal titles
    VenueTitle,
}

#[derive(Debug, Clone)]
pub struct GraphBuilderConfig {
    /// Articles sampled per venue, in corpus order
    pub sample_size: usize,

    /// Title used for records without one
    pub missing_title: String,

    pub article_identity: ArticleIdentity,
}

impl Default for GraphBuilderConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            missing_title: MISSING_TITLE.to_string(),
            article_identity: ArticleIdentity::default(),
        }
    }
}

/// Build venue -> article -> attribute graphs from a venue ranking
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraphBuilder {
    config: GraphBuilderConfig,
}

impl RelationshipGraphBuilder {
    pub fn new(config: GraphBuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraphBuilderConfig {
        &self.config
    }

    /// First `sample_size` records published in `venue`, in corpus order
    pub fn sample_articles<'a>(&self, records: &'a [Record], venue: &str) -> Vec<&'a Record> {
        records
            .iter()
            .filter(|r| resolve_venue(r) == Some(venue))
            .take(self.config.sample_size)
            .collect()
    }

    pub fn build(
        &self,
        records: &[Record],
        venues: &[VenueCount],
        attributes: &mut dyn AttributeSource,
    ) -> RelationshipGraph {
        let mut graph = RelationshipGraph::new();

        for ranked in venues {
            let venue = ranked.venue.as_str();
            let venue_idx = graph.add_node(venue, NodeKind::Venue);

            for record in self.sample_articles(records, venue) {
                let article_id = self.article_id(venue, record);
                let attribute = attributes.attribute_for(record);

                let article_idx = graph.add_node(&article_id, NodeKind::Article);
                let attribute_idx = graph.add_node(&attribute, NodeKind::Attribute);

                graph.add_edge(venue_idx, article_idx, RelationshipType::Publishes);
                graph.add_edge(article_idx, attribute_idx, RelationshipType::HasAttribute);
            }
        }

        log::info!(
            "Built relationship graph: {} venues, {} nodes, {} edges",
            venues.len(),
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }

    fn article_id(&self, venue: &str, record: &Record) -> String {
        let title = record.title().unwrap_or(self.config.missing_title.as_str());
        match self.config.article_identity {
            ArticleIdentity::Title => title.to_string(),
            ArticleIdentity::VenueTitle => format!("{venue} / {title}"),
        }
    }
}
