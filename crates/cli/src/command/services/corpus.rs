use crate::command::domain::{
    CommandOutcome, FilterPayload, GetRecordPayload, RequestError, UniqueValuesPayload,
};
use anyhow::{Context, Result};
use biblio_analysis::resolve_venue;
use biblio_corpus::{fields, CorpusStore, SharedCorpus};
use serde_json::json;
use std::collections::BTreeSet;

pub(super) fn stats(corpus: &CorpusStore) -> Result<CommandOutcome> {
    let field_names: BTreeSet<&str> = corpus
        .records()
        .iter()
        .flat_map(|r| r.field_names())
        .collect();
    let venues: BTreeSet<&str> = corpus.records().iter().filter_map(resolve_venue).collect();

    let data = json!({
        "records": corpus.count(),
        "with_abstract": corpus.abstracts().len(),
        "with_title": corpus.records().iter().filter(|r| r.has(fields::TITLE)).count(),
        "venues": venues.len(),
        "fields": field_names,
    });
    Ok(CommandOutcome::new(data, corpus.count()))
}

pub(super) fn filter(corpus: &CorpusStore, payload: FilterPayload) -> Result<CommandOutcome> {
    let matches = corpus.filter(&payload.field, &payload.value);
    let data = json!({
        "field": payload.field,
        "value": payload.value,
        "count": matches.len(),
        "records": matches,
    });
    Ok(CommandOutcome::new(data, corpus.count()))
}

pub(super) fn unique_values(
    corpus: &CorpusStore,
    payload: UniqueValuesPayload,
) -> Result<CommandOutcome> {
    let values = corpus.unique_values(&payload.field);
    let data = json!({
        "field": payload.field,
        "count": values.len(),
        "values": values,
    });
    Ok(CommandOutcome::new(data, corpus.count()))
}

pub(super) fn get_record(corpus: &CorpusStore, payload: GetRecordPayload) -> Result<CommandOutcome> {
    let record = corpus
        .get_by_id(&payload.id)
        .ok_or_else(|| RequestError::NotFound(payload.id.clone()))?;
    Ok(CommandOutcome::new(json!({ "record": record }), corpus.count()))
}

pub(super) fn reload(shared: &SharedCorpus) -> Result<CommandOutcome> {
    let count = shared.reload().context("Corpus reload failed")?;
    log::info!("Reloaded corpus: {count} records");
    Ok(CommandOutcome::new(json!({ "records": count }), count))
}
