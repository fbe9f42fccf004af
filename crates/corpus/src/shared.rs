use crate::error::Result;
use crate::source::CorpusSource;
use crate::store::CorpusStore;
use std::sync::{Arc, RwLock};

/// Corpus cache shared across requests.
///
/// Readers take an `Arc` snapshot; `reload` builds the new store without
/// holding the lock and swaps it in whole, so a reader never observes a
/// partially loaded corpus.
pub struct SharedCorpus {
    source: Box<dyn CorpusSource + Send + Sync>,
    current: RwLock<Arc<CorpusStore>>,
}

impl SharedCorpus {
    pub fn new(source: Box<dyn CorpusSource + Send + Sync>) -> Self {
        let store = CorpusStore::load(source.as_ref());
        Self {
            source,
            current: RwLock::new(Arc::new(store)),
        }
    }

    pub fn snapshot(&self) -> Arc<CorpusStore> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Re-read the source. On failure the previous snapshot stays in place.
    pub fn reload(&self) -> Result<usize> {
        let fresh = Arc::new(CorpusStore::try_load(self.source.as_ref())?);
        let count = fresh.count();
        match self.current.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::source::JsonFile;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reload_swaps_snapshot_without_touching_old_readers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(&path, r#"[{"id": "a"}]"#).unwrap();

        let shared = SharedCorpus::new(Box::new(JsonFile::new(&path)));
        let before = shared.snapshot();
        assert_eq!(before.count(), 1);

        fs::write(&path, r#"[{"id": "a"}, {"id": "b"}]"#).unwrap();
        assert_eq!(shared.reload().unwrap(), 2);

        assert_eq!(before.count(), 1);
        assert_eq!(shared.snapshot().count(), 2);
        assert_eq!(
            shared.snapshot().get_by_id("b"),
            Some(&Record::new().with("id", "b"))
        );
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(&path, r#"[{"id": "a"}]"#).unwrap();

        let shared = SharedCorpus::new(Box::new(JsonFile::new(&path)));
        fs::write(&path, "not json").unwrap();
        assert!(shared.reload().is_err());
        assert_eq!(shared.snapshot().count(), 1);
    }
}
