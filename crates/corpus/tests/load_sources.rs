use biblio_corpus::{source_for_path, CorpusStore};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const BIB: &str = r#"
@article{lee2021,
  title = {Unplugged activities in primary school},
  journal = {Education Sciences},
  abstract = {A quasi-experiments design with Scratch.}
}

@article{ortiz2022,
  title = {A computational thinking scale},
  issn = {1234-5678}
}
"#;

#[test]
fn bibtex_file_loads_through_extension_dispatch() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("corpus.bib");
    fs::write(&path, BIB).expect("write bib");

    let source = source_for_path(&path).expect("source");
    let store = CorpusStore::try_load(source.as_ref()).expect("load");

    assert_eq!(store.count(), 2);
    let second = store.get_by_id("ortiz2022").expect("record");
    assert_eq!(second.get("issn"), Some("1234-5678"));
    assert_eq!(second.get("journal"), None);
    assert_eq!(store.abstracts().len(), 1);
}

#[test]
fn missing_file_degrades_to_empty_corpus() {
    let temp = TempDir::new().expect("tempdir");
    let source = source_for_path(temp.path().join("absent.bib")).expect("source");

    let store = CorpusStore::load(source.as_ref());
    assert_eq!(store.count(), 0);
    assert!(store.unique_values("journal").is_empty());
}

#[test]
fn corrupt_json_degrades_to_empty_corpus() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("corpus.json");
    fs::write(&path, "[{").expect("write json");

    let source = source_for_path(&path).expect("source");
    assert!(CorpusStore::try_load(source.as_ref()).is_err());
    assert_eq!(CorpusStore::load(source.as_ref()).count(), 0);
}

#[test]
fn merged_export_with_duplicate_and_broken_entries_still_loads() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("merged.bib");
    fs::write(
        &path,
        r#"
@article{dup, title = {From Scopus}, journal = {Education Sciences}}
@article{dup, title = {From WoS}, journal = {Education Sciences}}
@article{cut, title = {Truncated export, journal = {X}
@article{last, title = {Complete}, issn = {1234-5678}}
"#,
    )
    .expect("write bib");

    let source = source_for_path(&path).expect("source");
    let store = CorpusStore::load(source.as_ref());

    assert_eq!(store.count(), 3);
    assert_eq!(store.filter("journal", "Education Sciences").len(), 2);
    assert!(store.get_by_id("cut").is_none());
}
