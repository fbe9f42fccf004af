use crate::command::domain::{CommandOutcome, GraphFormat, GraphRequest, RequestError};
use crate::config::{AttributeMode, AttributesConfig, BiblioConfig};
use anyhow::Result;
use biblio_analysis::top_venues;
use biblio_corpus::CorpusStore;
use biblio_graph::{ArticleIdentity, GraphBuilderConfig, RelationshipGraphBuilder};
use serde_json::{json, Value};

pub(super) fn build(
    corpus: &CorpusStore,
    config: &BiblioConfig,
    request: GraphRequest,
) -> Result<CommandOutcome> {
    if request.seed.is_some() && request.attribute_field.is_some() {
        return Err(RequestError::InvalidPayload {
            action: "graph",
            message: "seed and attribute_field are mutually exclusive".to_string(),
        }
        .into());
    }

    let venue_limit = request.venue_limit.unwrap_or(config.limits.venues);
    let venues = top_venues(corpus.records(), venue_limit);

    let builder = RelationshipGraphBuilder::new(GraphBuilderConfig {
        sample_size: request.sample_size.unwrap_or(config.limits.sample_size),
        article_identity: if request.per_venue_titles {
            ArticleIdentity::VenueTitle
        } else {
            ArticleIdentity::Title
        },
        ..Default::default()
    });

    let mut attributes = attribute_config(&config.attributes, &request).source()?;
    let graph = builder.build(corpus.records(), &venues, attributes.as_mut());

    let data = match request.format {
        GraphFormat::Dot => Value::String(graph.to_dot()),
        GraphFormat::Json => json!({
            "venues": venues,
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "graph": graph.to_payload(),
        }),
    };
    Ok(CommandOutcome::new(data, corpus.count()))
}

/// Request overrides on top of the configured attribute source
fn attribute_config(base: &AttributesConfig, request: &GraphRequest) -> AttributesConfig {
    let mut attributes = base.clone();
    if let Some(field) = &request.attribute_field {
        attributes.mode = AttributeMode::Field;
        attributes.field = Some(field.clone());
    } else if let Some(seed) = request.seed {
        attributes.mode = AttributeMode::Random;
        attributes.seed = Some(seed);
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::domain::classify_error;
    use biblio_corpus::Record;
    use pretty_assertions::assert_eq;

    fn corpus() -> CorpusStore {
        CorpusStore::new(vec![
            Record::new()
                .with("journal", "J")
                .with("title", "T1")
                .with("country", "Chile"),
            Record::new()
                .with("journal", "J")
                .with("title", "T2")
                .with("country", "Peru"),
            Record::new().with("issn", "0001").with("title", "T3"),
        ])
    }

    #[test]
    fn field_attributes_follow_records() {
        let request = GraphRequest {
            attribute_field: Some("country".to_string()),
            ..Default::default()
        };
        let outcome = build(&corpus(), &BiblioConfig::default(), request).unwrap();
        assert_eq!(outcome.data["node_count"], 2 + 3 + 3);
        assert_eq!(outcome.data["edge_count"], 6);

        let ids: Vec<&str> = outcome.data["graph"]["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|n| n["kind"] == "attribute")
            .filter_map(|n| n["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["Chile", "Peru", "Unknown"]);
    }

    #[test]
    fn seeded_requests_repeat() {
        let request = || GraphRequest {
            seed: Some(7),
            ..Default::default()
        };
        let config = BiblioConfig::default();
        let first = build(&corpus(), &config, request()).unwrap();
        let second = build(&corpus(), &config, request()).unwrap();
        assert_eq!(first.data, second.data);
    }

    #[test]
    fn seed_with_attribute_field_is_rejected() {
        let request = GraphRequest {
            seed: Some(3),
            attribute_field: Some("country".to_string()),
            ..Default::default()
        };
        let err = build(&corpus(), &BiblioConfig::default(), request).unwrap_err();
        assert_eq!(classify_error(&err).code, "invalid_request");
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn dot_format_is_text() {
        let request = GraphRequest {
            seed: Some(1),
            format: GraphFormat::Dot,
            ..Default::default()
        };
        let outcome = build(&corpus(), &BiblioConfig::default(), request).unwrap();
        let dot = outcome.data.as_str().unwrap();
        assert!(dot.starts_with("graph {"));
        assert!(dot.contains("T3"));
    }
}
