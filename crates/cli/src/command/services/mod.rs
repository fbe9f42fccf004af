mod analysis;
mod corpus;
mod graph;

use super::domain::{parse_payload, CommandAction, CommandOutcome};
use crate::config::BiblioConfig;
use anyhow::Result;
use biblio_analysis::Vocabulary;
use biblio_corpus::SharedCorpus;
use serde_json::Value;

pub struct Services {
    corpus: SharedCorpus,
    vocabulary: Vocabulary,
    config: BiblioConfig,
}

impl Services {
    pub fn new(corpus: SharedCorpus, vocabulary: Vocabulary, config: BiblioConfig) -> Self {
        Self {
            corpus,
            vocabulary,
            config,
        }
    }

    pub fn route(&self, action: CommandAction, payload: Value) -> Result<CommandOutcome> {
        let snapshot = self.corpus.snapshot();
        match action {
            CommandAction::Frequency => analysis::frequency(&snapshot, &self.vocabulary),
            CommandAction::WordCloud => analysis::word_cloud(
                &snapshot,
                &self.vocabulary,
                parse_payload(action, payload)?,
            ),
            CommandAction::Pairs => {
                analysis::pairs(&snapshot, &self.config, parse_payload(action, payload)?)
            }
            CommandAction::Venues => {
                analysis::venues(&snapshot, &self.config, parse_payload(action, payload)?)
            }
            CommandAction::Graph => {
                graph::build(&snapshot, &self.config, parse_payload(action, payload)?)
            }
            CommandAction::CorpusStats => corpus::stats(&snapshot),
            CommandAction::Filter => corpus::filter(&snapshot, parse_payload(action, payload)?),
            CommandAction::UniqueValues => {
                corpus::unique_values(&snapshot, parse_payload(action, payload)?)
            }
            CommandAction::GetRecord => {
                corpus::get_record(&snapshot, parse_payload(action, payload)?)
            }
            CommandAction::Reload => corpus::reload(&self.corpus),
        }
    }
}
