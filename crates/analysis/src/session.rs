use crate::error::{AnalysisError, Result};
use crate::frequency::{combined_frequencies, CombinedFrequencies, FrequencyEngine, FrequencyTable};
use crate::vocabulary::Vocabulary;
use biblio_corpus::CorpusStore;
use std::sync::Arc;

/// One analysis run over a corpus snapshot.
///
/// Holds the last frequency table so the word-cloud view can be asked for
/// separately; asking before [`AnalysisSession::analyze_frequency`] is an
/// explicit error rather than an empty result.
pub struct AnalysisSession {
    corpus: Arc<CorpusStore>,
    engine: FrequencyEngine,
    frequency: Option<FrequencyTable>,
}

impl AnalysisSession {
    pub fn new(corpus: Arc<CorpusStore>, vocabulary: &Vocabulary) -> Self {
        Self {
            corpus,
            engine: FrequencyEngine::new(vocabulary),
            frequency: None,
        }
    }

    pub fn analyze_frequency(&mut self) -> &FrequencyTable {
        let table = self.engine.analyze(self.corpus.records());
        self.frequency.insert(table)
    }

    pub fn combined_frequencies(&self) -> Result<CombinedFrequencies> {
        self.frequency
            .as_ref()
            .map(combined_frequencies)
            .ok_or(AnalysisError::PrerequisiteNotComputed("frequency analysis"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{Category, Equivalences};
    use biblio_corpus::Record;

    fn session() -> AnalysisSession {
        let corpus = CorpusStore::new(vec![Record::new().with("abstract", "scratch robotics")]);
        let vocabulary = Vocabulary::new(
            vec![Category::new("Tools", ["Scratch", "Robotics"])],
            Equivalences::new(),
        );
        AnalysisSession::new(Arc::new(corpus), &vocabulary)
    }

    #[test]
    fn combined_view_requires_frequency_analysis() {
        let mut session = session();
        assert!(matches!(
            session.combined_frequencies(),
            Err(AnalysisError::PrerequisiteNotComputed(_))
        ));

        session.analyze_frequency();
        let combined = session.combined_frequencies().unwrap();
        assert_eq!(combined.get("scratch"), Some(1));
        assert_eq!(combined.get("robotics"), Some(1));
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let mut session = session();
        let first = session.analyze_frequency().clone();
        let second = session.analyze_frequency().clone();
        assert_eq!(first, second);
    }
}
