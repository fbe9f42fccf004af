use crate::error::{CorpusError, Result};
use crate::record::{fields, Record};
use biblatex::{Pair, RawBibliography, RawChunk, RawEntry, Spanned};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Somewhere records can be read from.
///
/// Implementations only translate an external format into [`Record`]s; the
/// recovery policy for failures lives in [`crate::CorpusStore::load`].
pub trait CorpusSource {
    fn read_records(&self) -> Result<Vec<Record>>;

    /// Human-readable origin, used in log lines
    fn describe(&self) -> String;
}

/// BibTeX/BibLaTeX file read with the `biblatex` raw parser.
///
/// Each entry becomes a record with `id` set to the citation key and every
/// field stored under its lowercase name, in source order. `@string`
/// abbreviations are expanded; whitespace runs collapse to one space.
/// Entries sharing a citation key are all kept, in file order. A malformed
/// entry is skipped with a warning instead of failing the whole file.
#[derive(Debug, Clone)]
pub struct BibtexFile {
    path: PathBuf,
}

/// Bound on nested `@string` expansion, so cyclic definitions terminate
const MAX_ABBREVIATION_DEPTH: usize = 8;

struct RawEntries<'s> {
    entries: Vec<RawEntry<'s>>,
    abbreviations: Vec<Pair<'s>>,
}

impl BibtexFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse_str(src: &str) -> Result<Vec<Record>> {
        let raw = match RawBibliography::parse(src) {
            Ok(raw) => RawEntries {
                entries: raw.entries.into_iter().map(|entry| entry.v).collect(),
                abbreviations: raw.abbreviations,
            },
            Err(err) => {
                log::warn!("Malformed BibTeX ({err}); parsing entry by entry");
                Self::parse_entrywise(src)?
            }
        };

        Ok(raw
            .entries
            .iter()
            .map(|entry| {
                let mut record = Record::new().with(fields::ID, entry.key.v);
                for pair in &entry.fields {
                    record.insert(
                        pair.key.v.to_lowercase(),
                        render_field(&pair.value.v, &raw.abbreviations, 0),
                    );
                }
                record
            })
            .collect())
    }

    /// Parse every `@` block on its own and keep the ones that parse
    fn parse_entrywise(src: &str) -> Result<RawEntries<'_>> {
        let mut parsed = RawEntries {
            entries: Vec::new(),
            abbreviations: Vec::new(),
        };
        let mut first_error = None;

        for block in entry_blocks(src) {
            match RawBibliography::parse(block) {
                Ok(raw) => {
                    parsed.entries.extend(raw.entries.into_iter().map(|entry| entry.v));
                    parsed.abbreviations.extend(raw.abbreviations);
                }
                Err(err) => {
                    let head = block.lines().next().unwrap_or_default().trim();
                    log::warn!("Skipping malformed BibTeX entry `{head}`: {err}");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) if parsed.entries.is_empty() => {
                Err(CorpusError::BibtexError(err.to_string()))
            }
            _ => Ok(parsed),
        }
    }
}

/// Slices starting at each `@` that opens a line
fn entry_blocks(src: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut line_start = true;
    for (idx, c) in src.char_indices() {
        if c == '@' && line_start {
            starts.push(idx);
        }
        if c == '\n' {
            line_start = true;
        } else if !c.is_whitespace() {
            line_start = false;
        }
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(src.len());
            &src[start..end]
        })
        .collect()
}

fn render_field(field: &[Spanned<RawChunk<'_>>], abbreviations: &[Pair<'_>], depth: usize) -> String {
    let mut text = String::new();
    for chunk in field {
        match &chunk.v {
            RawChunk::Normal(value) => text.push_str(value),
            RawChunk::Abbreviation(name) => {
                // later @string definitions win; unknown names stay literal
                let expansion = abbreviations
                    .iter()
                    .rev()
                    .find(|pair| pair.key.v.eq_ignore_ascii_case(name));
                match expansion {
                    Some(pair) if depth < MAX_ABBREVIATION_DEPTH => {
                        text.push_str(&render_field(&pair.value.v, abbreviations, depth + 1));
                    }
                    _ => text.push_str(name),
                }
            }
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl CorpusSource for BibtexFile {
    fn read_records(&self) -> Result<Vec<Record>> {
        let src = std::fs::read_to_string(&self.path)?;
        Self::parse_str(&src)
    }

    fn describe(&self) -> String {
        format!("bibtex:{}", self.path.display())
    }
}

/// JSON array of flat objects.
///
/// Strings are taken as-is, other scalars are stringified, `null` means the
/// field is absent.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse_str(src: &str) -> Result<Vec<Record>> {
        let value: Value = serde_json::from_str(src)?;
        let Value::Array(items) = value else {
            return Err(CorpusError::Other(
                "JSON corpus must be an array of objects".to_string(),
            ));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(map) => Ok(map
                    .into_iter()
                    .filter_map(|(key, value)| json_field_value(value).map(|v| (key, v)))
                    .collect()),
                other => Err(CorpusError::Other(format!(
                    "JSON corpus item {idx} is not an object: {other}"
                ))),
            })
            .collect()
    }
}

fn json_field_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl CorpusSource for JsonFile {
    fn read_records(&self) -> Result<Vec<Record>> {
        let src = std::fs::read_to_string(&self.path)?;
        Self::parse_str(&src)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

/// Records already in memory
#[derive(Debug, Clone, Default)]
pub struct InMemory {
    records: Vec<Record>,
}

impl InMemory {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl CorpusSource for InMemory {
    fn read_records(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} records", self.records.len())
    }
}

/// Pick a source from the file extension
pub fn source_for_path(path: impl AsRef<Path>) -> Result<Box<dyn CorpusSource + Send + Sync>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "bib" | "bibtex" => Ok(Box::new(BibtexFile::new(path))),
        "json" => Ok(Box::new(JsonFile::new(path))),
        _ => Err(CorpusError::UnsupportedFormat(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bibtex_entries_become_records() {
        let src = r#"
@article{smith2020,
  title = {Measuring Computational Thinking},
  journal = {Computers \& Education},
  abstract = {We apply CTT and EFA.},
  year = {2020}
}
"#;
        let records = BibtexFile::parse_str(src).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id(), Some("smith2020"));
        assert_eq!(record.title(), Some("Measuring Computational Thinking"));
        assert_eq!(record.abstract_text(), Some("We apply CTT and EFA."));
        assert_eq!(record.get("issn"), None);
    }

    #[test]
    fn bibtex_fields_keep_source_order() {
        let src = "@article{k, title = {T}, journal = {J}, abstract = {A}, issn = {1}}";
        let records = BibtexFile::parse_str(src).unwrap();
        let names: Vec<&str> = records[0].field_names().collect();
        assert_eq!(names, vec!["id", "title", "journal", "abstract", "issn"]);
    }

    #[test]
    fn duplicate_citation_keys_are_all_kept() {
        let src = r#"
@article{k1, title = {First}, journal = {A}}
@article{k1, title = {Second}, journal = {B}}
@article{k2, title = {Third}, journal = {A}}
"#;
        let records = BibtexFile::parse_str(src).unwrap();
        let titles: Vec<_> = records.iter().filter_map(Record::title).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert_eq!(records[1].id(), Some("k1"));
    }

    #[test]
    fn malformed_entry_is_skipped() {
        let src = r#"
@article{good1, title = {Kept}, journal = {A}}
@article{broken, title = {Unclosed, journal = {B}
@article{good2, title = {Also kept}, journal = {C}}
"#;
        let records = BibtexFile::parse_str(src).unwrap();
        let ids: Vec<_> = records.iter().filter_map(Record::id).collect();
        assert_eq!(ids, vec!["good1", "good2"]);
    }

    #[test]
    fn nothing_parseable_is_an_error() {
        let err = BibtexFile::parse_str("@article{broken, title = {Unclosed}").unwrap_err();
        assert!(matches!(err, CorpusError::BibtexError(_)));
    }

    #[test]
    fn string_abbreviations_expand_and_whitespace_collapses() {
        let src = r#"
@string{ce = {Computers and Education}}
@article{k, journal = ce, abstract = {Classical test
    theory}, month = jan}
"#;
        let records = BibtexFile::parse_str(src).unwrap();
        assert_eq!(records[0].get("journal"), Some("Computers and Education"));
        assert_eq!(records[0].abstract_text(), Some("Classical test theory"));
        assert_eq!(records[0].get("month"), Some("jan"));
    }

    #[test]
    fn json_nulls_are_absent_and_scalars_stringified() {
        let src = r#"[{"id": "a", "journal": null, "year": 2021, "title": "T"}]"#;
        let records = JsonFile::parse_str(src).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("journal"), None);
        assert_eq!(records[0].get("year"), Some("2021"));
        assert_eq!(records[0].title(), Some("T"));
    }

    #[test]
    fn json_rejects_non_array_documents() {
        assert!(JsonFile::parse_str(r#"{"id": "a"}"#).is_err());
        assert!(JsonFile::parse_str(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn source_is_selected_by_extension() {
        assert!(source_for_path("refs.bib").is_ok());
        assert!(source_for_path("refs.JSON").is_ok());
        assert!(matches!(
            source_for_path("refs.csv"),
            Err(CorpusError::UnsupportedFormat(_))
        ));
    }
}
