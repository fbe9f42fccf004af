use crate::command::domain::{CommandOutcome, PairsPayload, VenuesPayload, WordCloudPayload};
use crate::config::BiblioConfig;
use anyhow::Result;
use biblio_analysis::{AnalysisSession, Vocabulary};
use biblio_corpus::CorpusStore;
use biblio_protocol::{ChartSeries, PairRow, VenueRow};
use serde_json::json;
use std::sync::Arc;

pub(super) fn frequency(corpus: &Arc<CorpusStore>, vocabulary: &Vocabulary) -> Result<CommandOutcome> {
    let mut session = AnalysisSession::new(Arc::clone(corpus), vocabulary);
    let table = session.analyze_frequency();
    let data = json!({
        "categories": table,
        "total": table.total(),
    });
    Ok(CommandOutcome::new(data, corpus.count()))
}

pub(super) fn word_cloud(
    corpus: &Arc<CorpusStore>,
    vocabulary: &Vocabulary,
    payload: WordCloudPayload,
) -> Result<CommandOutcome> {
    let mut session = AnalysisSession::new(Arc::clone(corpus), vocabulary);
    session.analyze_frequency();
    let combined = session.combined_frequencies()?;

    let limit = payload.top.unwrap_or(combined.len());
    let top: ChartSeries = combined
        .top(limit)
        .into_iter()
        .map(|(term, count)| (term.to_string(), count))
        .collect();

    let data = json!({
        "terms": combined,
        "top": top,
    });
    Ok(CommandOutcome::new(data, corpus.count()))
}

pub(super) fn pairs(
    corpus: &CorpusStore,
    config: &BiblioConfig,
    payload: PairsPayload,
) -> Result<CommandOutcome> {
    let limit = payload.limit.unwrap_or(config.limits.pairs);
    let rows: Vec<PairRow> = biblio_analysis::top_pairs(
        corpus.records(),
        &payload.field_a,
        &payload.field_b,
        limit,
    )
    .into_iter()
    .map(|pair| PairRow {
        label: pair.label(),
        value_a: pair.value_a,
        value_b: pair.value_b,
        count: pair.count,
    })
    .collect();
    let chart: ChartSeries = rows.iter().map(|r| (r.label.clone(), r.count)).collect();

    let data = json!({
        "field_a": payload.field_a,
        "field_b": payload.field_b,
        "pairs": rows,
        "chart": chart,
    });
    Ok(CommandOutcome::new(data, corpus.count()))
}

pub(super) fn venues(
    corpus: &CorpusStore,
    config: &BiblioConfig,
    payload: VenuesPayload,
) -> Result<CommandOutcome> {
    let limit = payload.limit.unwrap_or(config.limits.venues);
    let rows: Vec<VenueRow> = biblio_analysis::top_venues(corpus.records(), limit)
        .into_iter()
        .map(|v| VenueRow {
            venue: v.venue,
            count: v.count,
        })
        .collect();
    let chart: ChartSeries = rows.iter().map(|r| (r.venue.clone(), r.count)).collect();

    let data = json!({
        "venues": rows,
        "chart": chart,
    });
    Ok(CommandOutcome::new(data, corpus.count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblio_analysis::{Category, Equivalences};
    use biblio_corpus::Record;
    use pretty_assertions::assert_eq;

    fn corpus() -> Arc<CorpusStore> {
        Arc::new(CorpusStore::new(vec![
            Record::new()
                .with("journal", "A")
                .with("abstract", "Scratch and robotics with scratch"),
            Record::new().with("journal", "B").with("abstract", "robotics"),
            Record::new().with("journal", "A"),
        ]))
    }

    fn vocabulary() -> Vocabulary {
        Vocabulary::new(
            vec![Category::new("Tools", ["Scratch", "Robotics"])],
            Equivalences::new(),
        )
    }

    #[test]
    fn word_cloud_top_is_ranked_chart() {
        let outcome = word_cloud(
            &corpus(),
            &vocabulary(),
            WordCloudPayload { top: Some(1) },
        )
        .unwrap();
        assert_eq!(outcome.data["terms"]["scratch"], 2);
        assert_eq!(outcome.data["top"]["labels"], json!(["scratch"]));
        assert_eq!(outcome.records, 3);
    }

    #[test]
    fn venue_limit_falls_back_to_config() {
        let mut config = BiblioConfig::default();
        config.limits.venues = 1;
        let outcome = venues(&corpus(), &config, VenuesPayload::default()).unwrap();
        assert_eq!(outcome.data["venues"], json!([{"venue": "A", "count": 2}]));
        assert_eq!(outcome.data["chart"]["counts"], json!([2]));
    }

    #[test]
    fn pair_rows_carry_display_label() {
        let corpus = CorpusStore::new(vec![
            Record::new().with("journal", "A").with("issn", "1"),
            Record::new().with("journal", "A").with("issn", "1"),
        ]);
        let payload = PairsPayload {
            field_a: "journal".to_string(),
            field_b: "issn".to_string(),
            limit: None,
        };
        let outcome = pairs(&corpus, &BiblioConfig::default(), payload).unwrap();
        assert_eq!(outcome.data["pairs"][0]["label"], "A - 1");
        assert_eq!(outcome.data["pairs"][0]["count"], 2);
    }
}
